use askama::Template;
use axum::{
    extract::Query,
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use crate::services::contact_service::{self, ContactError, ContactRequest};

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ContactQuery {
    pub notice: Option<String>,
}

pub async fn contact_page(Query(query): Query<ContactQuery>) -> Html<String> {
    let template = ContactTemplate {
        notice: query.notice,
    };
    Html(template.render().unwrap())
}

pub async fn contact_form_handler(Form(form): Form<ContactRequest>) -> Redirect {
    match contact_service::submit_contact(&form) {
        Ok(_) => Redirect::to("/contact?notice=sent"),
        Err(ContactError::InvalidEmail) => Redirect::to("/contact?notice=invalid_email"),
        Err(ContactError::EmptyMessage) => Redirect::to("/contact?notice=empty_message"),
    }
}
