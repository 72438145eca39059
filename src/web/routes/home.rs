use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use crate::models::Activity;
use crate::services::activities_service;
use crate::services::waitlist_service::{self, WaitlistError, WaitlistRequest};
use crate::web::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub weekend_picks: Vec<Activity>,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct HomeQuery {
    pub notice: Option<String>,
}

pub async fn home_handler(
    Query(query): Query<HomeQuery>,
    State(state): State<AppState>,
) -> Html<String> {
    let weekend_picks = match activities_service::fetch_activities(&state.activities).await {
        Ok(activities) => activities_service::weekend_picks(&activities, Utc::now().date_naive()),
        Err(e) => {
            warn!("Landing page activities load failed: {}", e);
            activities_service::sample_activities()
        }
    };

    let template = IndexTemplate {
        weekend_picks,
        notice: query.notice,
    };
    Html(template.render().unwrap())
}

#[derive(Debug, Deserialize)]
pub struct WaitlistForm {
    pub email: String,
    pub name: Option<String>,
}

/// Plain-HTML waitlist submission; the JSON endpoint in `waitlist.rs`
/// covers scripted clients. Both paths share the same service.
pub async fn waitlist_form_handler(
    State(state): State<AppState>,
    Form(form): Form<WaitlistForm>,
) -> Redirect {
    let request = WaitlistRequest {
        email: form.email,
        name: form.name,
    };
    match waitlist_service::join_waitlist(&state.waitlist, &request).await {
        Ok(_) => Redirect::to("/?notice=waitlist_ok"),
        Err(WaitlistError::InvalidEmail) => Redirect::to("/?notice=waitlist_invalid"),
        Err(e) => {
            warn!("Waitlist form submission failed: {}", e);
            Redirect::to("/?notice=waitlist_error")
        }
    }
}
