use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteExecutor;
use utoipa::ToSchema;

use crate::model::attendance::Attendance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "EMP-001",
        "full_name": "John Doe",
        "email_address": "john.doe@company.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    /// Surrogate key assigned by the database
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@company.com", format = "email")]
    pub email_address: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

impl Employee {
    pub async fn find(
        executor: impl SqliteExecutor<'_>,
        employee_id: &str,
    ) -> sqlx::Result<Option<Employee>> {
        sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_id, full_name, email_address, department
            FROM employees
            WHERE employee_id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(executor)
        .await
    }

    pub async fn email_taken(
        executor: impl SqliteExecutor<'_>,
        email_address: &str,
    ) -> sqlx::Result<bool> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM employees WHERE email_address = ?")
            .bind(email_address)
            .fetch_optional(executor)
            .await?;
        Ok(id.is_some())
    }

    /// Attendance records owned by this employee, in storage order.
    pub async fn attendances(
        &self,
        executor: impl SqliteExecutor<'_>,
    ) -> sqlx::Result<Vec<Attendance>> {
        sqlx::query_as::<_, Attendance>(
            r#"
            SELECT id, employee_id, date, status
            FROM attendances
            WHERE employee_id = ?
            ORDER BY id
            "#,
        )
        .bind(&self.employee_id)
        .fetch_all(executor)
        .await
    }
}

/// Employee detail view, carrying every attendance record the employee owns.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeWithAttendances {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email_address: String,
    #[schema(example = "Engineering")]
    pub department: String,
    pub attendances: Vec<Attendance>,
}

impl EmployeeWithAttendances {
    pub fn new(employee: Employee, attendances: Vec<Attendance>) -> Self {
        Self {
            id: employee.id,
            employee_id: employee.employee_id,
            full_name: employee.full_name,
            email_address: employee.email_address,
            department: employee.department,
            attendances,
        }
    }
}
