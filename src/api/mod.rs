use actix_web::{HttpResponse, Responder};
use serde_json::json;

pub mod attendance;
pub mod employee;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({
            "message": "HRMS Lite API is running"
        }))
    ),
    tag = "Health"
)]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "HRMS Lite API is running" }))
}
