use crate::{
    error::{ApiError, ApiResult},
    model::employee::{Employee, EmployeeWithAttendances},
    utils::{
        db_utils::{SqlFilter, SqlValue, bind_as, bind_scalar, contains_pattern},
        validation::{page_bounds, validate_email},
    },
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email_address: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Number of records to skip
    #[param(minimum = 0, default = 0)]
    pub skip: Option<i64>,
    /// Maximum number of records to return
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: Option<i64>,
    /// Search term for employee name, email, department or id
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeListResponse {
    pub employees: Vec<Employee>,
    #[schema(example = 15)]
    pub total: i64,
    #[schema(example = 0)]
    pub skip: i64,
    #[schema(example = 10)]
    pub limit: i64,
    #[schema(example = true)]
    pub has_next: bool,
    #[schema(example = false)]
    pub has_prev: bool,
}

/// Unique-constraint failures that slipped past the pre-checks become the same conflicts.
fn insert_error(e: sqlx::Error) -> ApiError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            warn!(error = %db_err, "Employee insert hit a unique constraint");
            return if db_err.message().contains("email_address") {
                ApiError::conflict("Email address already exists")
            } else {
                ApiError::conflict("Employee ID already exists")
            };
        }
    }
    error!(error = %e, "Failed to create employee");
    ApiError::Internal(e)
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/employees/",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid email, duplicate employee id or duplicate email", body = ErrorBody, example = json!({
            "detail": "Employee ID already exists"
        })),
        (status = 422, description = "Malformed request body", body = ErrorBody)
    ),
    tag = "Employee"
)]
#[instrument(skip_all, fields(employee_id = %payload.employee_id))]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();

    validate_email(&payload.email_address)?;

    if Employee::find(pool.get_ref(), &payload.employee_id)
        .await?
        .is_some()
    {
        warn!("Duplicate employee id");
        return Err(ApiError::conflict("Employee ID already exists"));
    }

    if Employee::email_taken(pool.get_ref(), &payload.email_address).await? {
        warn!(email = %payload.email_address, "Duplicate email address");
        return Err(ApiError::conflict("Email address already exists"));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO employees
        (employee_id, full_name, email_address, department)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&payload.employee_id)
    .bind(&payload.full_name)
    .bind(&payload.email_address)
    .bind(&payload.department)
    .execute(pool.get_ref())
    .await
    .map_err(insert_error)?;

    let employee = Employee {
        id: result.last_insert_rowid(),
        employee_id: payload.employee_id,
        full_name: payload.full_name,
        email_address: payload.email_address,
        department: payload.department,
    };
    info!(id = employee.id, "Employee created");

    Ok(HttpResponse::Created().json(employee))
}

// -------------------- Handler --------------------

#[utoipa::path(
    get,
    path = "/employees/",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse),
        (status = 422, description = "skip or limit out of range", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> ApiResult<HttpResponse> {
    let (skip, limit) = page_bounds(query.skip, query.limit)?;

    // ---------- build WHERE clause dynamically ----------
    let mut filter = SqlFilter::new();

    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        let like = contains_pattern(search);
        filter.push(
            r"(full_name LIKE ? ESCAPE '\' OR email_address LIKE ? ESCAPE '\' OR department LIKE ? ESCAPE '\' OR employee_id LIKE ? ESCAPE '\')",
            std::iter::repeat(SqlValue::Text(like)).take(4),
        );
    }

    let where_clause = filter.where_clause();

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) FROM employees {}", where_clause);
    debug!(sql = %count_sql, bindings = ?filter.values(), "Counting employees");

    let total = bind_scalar(sqlx::query_scalar::<_, i64>(&count_sql), filter.values())
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, sql = %count_sql, "Failed to count employees");
            ApiError::Internal(e)
        })?;

    // ---------- data query ----------
    let data_sql = format!(
        "SELECT id, employee_id, full_name, email_address, department FROM employees {} ORDER BY id LIMIT ? OFFSET ?",
        where_clause
    );
    debug!(sql = %data_sql, bindings = ?filter.values(), skip, limit, "Fetching employees");

    let employees = bind_as(sqlx::query_as::<_, Employee>(&data_sql), filter.values())
        .bind(limit)
        .bind(skip)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, sql = %data_sql, "Failed to fetch employees");
            ApiError::Internal(e)
        })?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        employees,
        total,
        skip,
        limit,
        has_next: skip.saturating_add(limit) < total,
        has_prev: skip > 0,
    }))
}

/// Get Employee by ID, with attendance records
#[utoipa::path(
    get,
    path = "/employees/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Business employee id")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeWithAttendances),
        (status = 404, description = "Employee not found", body = ErrorBody, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let employee_id = path.into_inner();

    let employee = Employee::find(pool.get_ref(), &employee_id)
        .await?
        .ok_or_else(ApiError::employee_not_found)?;
    let attendances = employee.attendances(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(EmployeeWithAttendances::new(employee, attendances)))
}

/// Delete Employee and its attendance records
#[utoipa::path(
    delete,
    path = "/employees/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Business employee id")
    ),
    responses(
        (status = 204, description = "Employee and attendance records deleted"),
        (status = 404, description = "Employee not found", body = ErrorBody, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let employee_id = path.into_inner();

    let mut tx = pool.begin().await?;

    if Employee::find(&mut *tx, &employee_id).await?.is_none() {
        return Err(ApiError::employee_not_found());
    }

    let removed = sqlx::query("DELETE FROM attendances WHERE employee_id = ?")
        .bind(&employee_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM employees WHERE employee_id = ?")
        .bind(&employee_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!(employee_id = %employee_id, attendances = removed, "Employee deleted");

    Ok(HttpResponse::NoContent().finish())
}
