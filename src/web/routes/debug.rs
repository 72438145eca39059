use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};

use crate::services::debug_service::{self, DebugReport};
use crate::web::routes::activity::not_found_handler;
use crate::web::AppState;

#[derive(Template)]
#[template(path = "debug.html")]
pub struct DebugTemplate {
    pub report: DebugReport,
}

/// Sheets connectivity diagnostics. Hidden unless `DEBUG_MODE=true`; the
/// page exists for chasing credential and tab-name misconfigurations.
pub async fn debug_handler(State(state): State<AppState>) -> Response {
    let enabled = std::env::var("DEBUG_MODE")
        .map(|v| v == "true")
        .unwrap_or(false);
    if !enabled {
        return not_found_handler().await.into_response();
    }

    let report = debug_service::run_diagnostics(&state.activities).await;
    let template = DebugTemplate { report };
    Html(template.render().unwrap()).into_response()
}
