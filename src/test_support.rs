/// Builds the full route table over `$pool`, with the same path normalization as the server.
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::new($pool.clone()))
                .configure(crate::routes::configure),
        )
        .await
    };
}
