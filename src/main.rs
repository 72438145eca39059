use axum::{
    routing::{get, get_service, post},
    Router,
};
use dotenvy::dotenv;
use http::header::{HeaderValue, CACHE_CONTROL};
use std::env;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use playscout::sheets::{ServiceAccountKey, SheetsClient};
use playscout::web::routes::{activities, activity, contact, debug, home, submit, waitlist};
use playscout::web::AppState;

#[tokio::main]
async fn main() {
    // Load .env before anything reads configuration
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();
    tracing::info!("PlayScout build {}", env!("PLAYSCOUT_BUILD_ID"));

    // 2. Sheets clients (the spreadsheet is our database)
    let key = ServiceAccountKey::from_env().expect("Google credentials missing or malformed");
    let activities_sheet_id = env::var("GOOGLE_SHEET_ID").expect("GOOGLE_SHEET_ID must be set");
    let waitlist_sheet_id =
        env::var("GOOGLE_SHEET_ID_WAITLIST").expect("GOOGLE_SHEET_ID_WAITLIST must be set");

    let state = AppState {
        activities: SheetsClient::read_only(activities_sheet_id, key.clone()),
        waitlist: SheetsClient::read_write(waitlist_sheet_id, key),
    };

    // 3. Build the application
    let app = Router::new()
        .route("/", get(home::home_handler))
        .route("/waitlist", post(home::waitlist_form_handler))
        .route("/api/waitlist", post(waitlist::waitlist_api_handler))
        .route("/activities", get(activities::activities_handler))
        .route(
            "/activities/:activity_id",
            get(activity::activity_detail_handler),
        )
        .route("/submit", get(submit::submit_page))
        .route(
            "/contact",
            get(contact::contact_page).post(contact::contact_form_handler),
        )
        .route("/debug", get(debug::debug_handler))
        // Static files
        .nest_service(
            "/assets",
            get_service(ServeDir::new("assets")).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=3600"),
            )),
        )
        .fallback(activity::not_found_handler)
        // Layers
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        // State
        .with_state(state);

    // 4. Start the server (with fallback port)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Cannot parse host/port");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Could not bind {}: {}. Trying fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("Cannot parse fallback address");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("Cannot bind fallback port")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 PlayScout running on http://{}", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
