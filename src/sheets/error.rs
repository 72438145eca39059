#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("Google auth failed: {0}")]
    Auth(String),

    #[error("permission denied for spreadsheet {spreadsheet_id}")]
    PermissionDenied { spreadsheet_id: String },

    #[error("spreadsheet {spreadsheet_id} not found")]
    SpreadsheetNotFound { spreadsheet_id: String },

    #[error("unable to parse range {range}")]
    BadRange { range: String },

    #[error("Sheets API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}
