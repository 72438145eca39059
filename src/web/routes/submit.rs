use askama::Template;
use axum::response::Html;

#[derive(Template)]
#[template(path = "submit.html")]
pub struct SubmitTemplate {
    pub embed_url: Option<String>,
}

/// Activity submission is handled entirely by an embedded third-party
/// form; this page just hosts the embed.
pub async fn submit_page() -> Html<String> {
    let embed_url = std::env::var("SUBMIT_FORM_EMBED_URL")
        .ok()
        .filter(|v| !v.trim().is_empty());

    let template = SubmitTemplate { embed_url };
    Html(template.render().unwrap())
}
