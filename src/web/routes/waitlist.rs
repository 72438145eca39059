use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, warn};

use crate::services::waitlist_service::{self, WaitlistError, WaitlistRequest};
use crate::web::AppState;

/// JSON waitlist endpoint: `{success, message}` on 200, `{error}` on
/// 400/500, matching what the signup widget expects.
pub async fn waitlist_api_handler(
    State(state): State<AppState>,
    Json(payload): Json<WaitlistRequest>,
) -> impl IntoResponse {
    match waitlist_service::join_waitlist(&state.waitlist, &payload).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Successfully joined waitlist!",
            })),
        ),
        Err(WaitlistError::InvalidEmail) => {
            warn!("Waitlist API rejected invalid email");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid email address." })),
            )
        }
        Err(e) => {
            error!("Waitlist append failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": waitlist_service::user_message(&e) })),
            )
        }
    }
}
