use crate::{
    error::{ApiError, ApiResult},
    model::{
        attendance::{Attendance, AttendanceStatus},
        employee::Employee,
    },
    utils::{
        db_utils::{SqlFilter, SqlValue, bind_as},
        validation::parse_date_filter,
    },
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceFilter {
    /// Filter by start date (YYYY-MM-DD), inclusive
    #[param(example = "2024-01-01")]
    pub start_date: Option<String>,
    /// Filter by end date (YYYY-MM-DD), inclusive
    #[param(example = "2024-01-31")]
    pub end_date: Option<String>,
}

fn insert_error(e: sqlx::Error) -> ApiError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            warn!(error = %db_err, "Attendance insert hit the per-day constraint");
            return ApiError::conflict("Attendance record already exists for this date");
        }
        if db_err.is_foreign_key_violation() {
            warn!(error = %db_err, "Employee vanished before attendance insert");
            return ApiError::employee_not_found();
        }
    }
    error!(error = %e, "Failed to create attendance");
    ApiError::Internal(e)
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/attendances/",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = Attendance),
        (status = 400, description = "Attendance already recorded for this date", body = ErrorBody, example = json!({
            "detail": "Attendance record already exists for this date"
        })),
        (status = 404, description = "Employee not found", body = ErrorBody),
        (status = 422, description = "Malformed request body", body = ErrorBody)
    ),
    tag = "Attendance"
)]
#[instrument(skip_all, fields(employee_id = %payload.employee_id, date = %payload.date))]
pub async fn create_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateAttendance>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();

    if Employee::find(pool.get_ref(), &payload.employee_id)
        .await?
        .is_none()
    {
        return Err(ApiError::employee_not_found());
    }

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM attendances WHERE employee_id = ? AND date = ?",
    )
    .bind(&payload.employee_id)
    .bind(payload.date)
    .fetch_optional(pool.get_ref())
    .await?;

    if existing.is_some() {
        warn!("Attendance already recorded");
        return Err(ApiError::conflict(
            "Attendance record already exists for this date",
        ));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO attendances (employee_id, date, status)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&payload.employee_id)
    .bind(payload.date)
    .bind(payload.status)
    .execute(pool.get_ref())
    .await
    .map_err(insert_error)?;

    let attendance = Attendance {
        id: result.last_insert_rowid(),
        employee_id: payload.employee_id,
        date: payload.date,
        status: payload.status,
    };
    info!(id = attendance.id, status = %attendance.status, "Attendance recorded");

    Ok(HttpResponse::Created().json(attendance))
}

/// Attendance of one employee, newest first
#[utoipa::path(
    get,
    path = "/attendances/employee/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Business employee id"),
        AttendanceFilter
    ),
    responses(
        (status = 200, description = "Attendance records ordered by date descending", body = [Attendance]),
        (status = 400, description = "Invalid date filter", body = ErrorBody, example = json!({
            "detail": "Invalid start_date format. Use YYYY-MM-DD"
        })),
        (status = 404, description = "Employee not found", body = ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn list_employee_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    query: web::Query<AttendanceFilter>,
) -> ApiResult<HttpResponse> {
    let employee_id = path.into_inner();

    if Employee::find(pool.get_ref(), &employee_id).await?.is_none() {
        return Err(ApiError::employee_not_found());
    }

    let start_date = parse_date_filter("start_date", query.start_date.as_deref())?;
    let end_date = parse_date_filter("end_date", query.end_date.as_deref())?;

    let mut filter = SqlFilter::new();
    filter.push("employee_id = ?", [SqlValue::Text(employee_id)]);
    if let Some(start) = start_date {
        filter.push("date >= ?", [SqlValue::Date(start)]);
    }
    if let Some(end) = end_date {
        filter.push("date <= ?", [SqlValue::Date(end)]);
    }

    let sql = format!(
        "SELECT id, employee_id, date, status FROM attendances {} ORDER BY date DESC",
        filter.where_clause()
    );
    debug!(sql = %sql, bindings = ?filter.values(), "Fetching attendance");

    let records = bind_as(sqlx::query_as::<_, Attendance>(&sql), filter.values())
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, sql = %sql, "Failed to fetch attendance");
            ApiError::Internal(e)
        })?;

    Ok(HttpResponse::Ok().json(records))
}

/// Every attendance record
#[utoipa::path(
    get,
    path = "/attendances/",
    responses(
        (status = 200, description = "All attendance records", body = [Attendance])
    ),
    tag = "Attendance"
)]
pub async fn list_attendances(pool: web::Data<SqlitePool>) -> ApiResult<HttpResponse> {
    let records = sqlx::query_as::<_, Attendance>(
        "SELECT id, employee_id, date, status FROM attendances ORDER BY id",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(records))
}
