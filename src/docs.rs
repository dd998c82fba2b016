use crate::api::attendance::CreateAttendance;
use crate::api::employee::{CreateEmployee, EmployeeListResponse};
use crate::error::ErrorBody;
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::employee::{Employee, EmployeeWithAttendances};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A small **Human Resource Management** API.

### Features
- **Employee Management**
  - Create, list (paginated, searchable), view and delete employees
  - Deleting an employee removes its attendance records
- **Attendance Management**
  - Mark one `present` / `absent` record per employee per day
  - List an employee's attendance by date range, newest first

### Errors
Every error response is `{"detail": "<message>"}`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::index,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::create_attendance,
        crate::api::attendance::list_employee_attendance,
        crate::api::attendance::list_attendances
    ),
    components(
        schemas(
            CreateEmployee,
            Employee,
            EmployeeWithAttendances,
            EmployeeListResponse,
            CreateAttendance,
            Attendance,
            AttendanceStatus,
            ErrorBody
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
