use crate::{
    api::{self, attendance, employee},
    error,
};
use actix_cors::Cors;
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Result, anyhow};

/// Per-peer-IP limiter allowing `requests_per_min` requests with a full-minute burst.
pub fn build_limiter(requests_per_min: u32) -> Result<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    if requests_per_min == 0 {
        return Err(anyhow!("RATE_PER_MIN must be greater than 0"));
    }
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limiter configuration"))?;
    Ok(Governor::new(&cfg))
}

/// Any origin, method and header; credentials are never allowed.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(error::configure_extractors)
        .service(web::resource("/").route(web::get().to(api::index)))
        .service(
            web::scope("/employees")
                // /employees
                .service(
                    web::resource("")
                        .route(web::post().to(employee::create_employee))
                        .route(web::get().to(employee::list_employees)),
                )
                // /employees/{employee_id}
                .service(
                    web::resource("/{employee_id}")
                        .route(web::get().to(employee::get_employee))
                        .route(web::delete().to(employee::delete_employee)),
                ),
        )
        .service(
            web::scope("/attendances")
                // /attendances
                .service(
                    web::resource("")
                        .route(web::post().to(attendance::create_attendance))
                        .route(web::get().to(attendance::list_attendances)),
                )
                // /attendances/employee/{employee_id}
                .service(
                    web::resource("/employee/{employee_id}")
                        .route(web::get().to(attendance::list_employee_attendance)),
                ),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use actix_web::{App, http::StatusCode, http::header, test, web::Data};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn root_reports_status() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let req = test::TestRequest::get().uri("/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "message": "HRMS Lite API is running" }));
    }

    #[actix_web::test]
    async fn trailing_slash_is_optional() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        for uri in ["/employees", "/employees/", "/attendances", "/attendances/"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        }
    }

    #[actix_web::test]
    async fn cors_allows_any_origin_without_credentials() {
        let pool = test_pool().await;
        let app = test::init_service(
            App::new()
                .wrap(cors())
                .app_data(Data::new(pool.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://anywhere.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
        assert!(
            !resp.headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
        );
    }

    #[actix_web::test]
    async fn limiter_rejects_zero_rate() {
        assert!(build_limiter(0).is_err());
        assert!(build_limiter(60).is_ok());
        assert!(build_limiter(120_000).is_ok());
    }
}
