use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

use crate::models::Activity;
use crate::services::activities_service;
use crate::web::AppState;

#[derive(Template)]
#[template(path = "activity.html")]
pub struct ActivityDetailTemplate {
    pub activity: Activity,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;

pub async fn activity_detail_handler(
    Path(activity_id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    // A failed read looks the same to the visitor as an unknown id.
    let activity = match activities_service::fetch_activity(&state.activities, &activity_id).await
    {
        Ok(found) => found,
        Err(e) => {
            warn!("Activity detail load failed for {}: {}", activity_id, e);
            None
        }
    };

    match activity {
        Some(activity) => {
            let template = ActivityDetailTemplate { activity };
            Html(template.render().unwrap()).into_response()
        }
        None => not_found_handler().await.into_response(),
    }
}

pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(NotFoundTemplate.render().unwrap()),
    )
}
