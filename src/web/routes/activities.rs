use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use tracing::warn;

use crate::models::Activity;
use crate::services::activities_service::{
    self, ActivitiesQuery, AppliedActivityFilters, FilterOptions,
};
use crate::web::AppState;

#[derive(Template)]
#[template(path = "activities.html")]
pub struct ActivitiesTemplate {
    pub activities: Vec<Activity>,
    pub filters: AppliedActivityFilters,
    pub options: FilterOptions,
    pub load_failed: bool,
}

pub async fn activities_handler(
    Query(query): Query<ActivitiesQuery>,
    State(state): State<AppState>,
) -> Html<String> {
    let filters = AppliedActivityFilters::from_query(&query);

    let (activities, options, load_failed) =
        match activities_service::fetch_activities(&state.activities).await {
            Ok(all) => {
                let options = activities_service::filter_options(&all);
                (activities_service::apply_filters(&all, &filters), options, false)
            }
            Err(e) => {
                warn!("Activities page load failed: {}", e);
                (Vec::new(), FilterOptions::default(), true)
            }
        };

    let template = ActivitiesTemplate {
        activities,
        filters,
        options,
        load_failed,
    };
    Html(template.render().unwrap())
}
