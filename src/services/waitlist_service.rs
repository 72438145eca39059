use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::models::WaitlistEntry;
use crate::sheets::{SheetsClient, SheetsError};

const DEFAULT_WAITLIST_TAB: &str = "Sheet1";

/// Payload accepted by both the JSON endpoint and the HTML form. Earlier
/// launches collected only the email, so the name stays optional.
#[derive(Debug, Deserialize)]
pub struct WaitlistRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum WaitlistError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error(transparent)]
    Sheets(#[from] SheetsError),
}

/// Same shape check the signup form has always used: no whitespace, one
/// `@`, something before it, and a dotted domain after it.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn waitlist_range() -> String {
    let tab =
        std::env::var("WAITLIST_SHEET_NAME").unwrap_or_else(|_| DEFAULT_WAITLIST_TAB.to_string());
    format!("{}!A:C", tab)
}

/// Validate and append one `[timestamp, email, name]` row. Nothing is
/// written when validation fails.
pub async fn join_waitlist(
    client: &SheetsClient,
    request: &WaitlistRequest,
) -> Result<(), WaitlistError> {
    let email = request.email.trim();
    if !is_valid_email(email) {
        return Err(WaitlistError::InvalidEmail);
    }

    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let entry = WaitlistEntry {
        submitted_at: Utc::now(),
        email: email.to_string(),
        name,
    };

    let range = waitlist_range();
    info!("Appending waitlist entry to range {}", range);
    client.append_row(&range, entry.into_row()).await?;
    info!("Waitlist entry stored");
    Ok(())
}

/// User-facing message for a failed submission. Coarse on purpose: the
/// caller only distinguishes access, bad sheet id and bad tab name.
pub fn user_message(err: &WaitlistError) -> String {
    match err {
        WaitlistError::InvalidEmail => "Invalid email address.".to_string(),
        WaitlistError::Sheets(SheetsError::PermissionDenied { .. }) => {
            "Server permission error writing to the waitlist sheet.".to_string()
        }
        WaitlistError::Sheets(SheetsError::SpreadsheetNotFound { .. }) => {
            "Waitlist spreadsheet not found. Verify GOOGLE_SHEET_ID_WAITLIST.".to_string()
        }
        WaitlistError::Sheets(SheetsError::BadRange { range }) => format!(
            "Waitlist sheet tab not found or range invalid ('{}'). Verify the tab name.",
            range
        ),
        WaitlistError::Sheets(_) => "Failed to join waitlist due to a server issue.".to_string(),
    }
}
