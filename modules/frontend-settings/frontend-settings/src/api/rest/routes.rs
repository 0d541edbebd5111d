use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub const BASE_PATH: &str = "/frontend-settings";

pub fn register_routes(router: Router, service: Arc<Service>, max_body_bytes: usize) -> Router {
    router
        .route(
            &format!("{BASE_PATH}/{{settings_type}}"),
            get(handlers::get_document).post(handlers::save_document),
        )
        .route(
            &format!("{BASE_PATH}/{{settings_type}}/lock"),
            post(handlers::lock),
        )
        .route(
            &format!("{BASE_PATH}/{{settings_type}}/unlock"),
            post(handlers::unlock),
        )
        .route(
            &format!("{BASE_PATH}/{{settings_type}}/archive"),
            get(handlers::list_archived).post(handlers::archive_tests),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(Extension(service))
}
