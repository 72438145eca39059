use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use super::auth::{ServiceAccountKey, TokenProvider, SCOPE_READONLY, SCOPE_READWRITE};
use super::error::SheetsError;

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const ERROR_BODY_LIMIT: usize = 300;

/// Thin client for one spreadsheet: read a rectangular range, append a row,
/// or fetch tab metadata. Cloning is cheap and shares the token cache.
#[derive(Clone)]
pub struct SheetsClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    auth: TokenProvider,
    spreadsheet_id: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    properties: Option<SheetTitle>,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: Option<SheetTitle>,
}

#[derive(Debug, Deserialize)]
struct SheetTitle {
    title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SpreadsheetMeta {
    pub title: String,
    pub sheet_titles: Vec<String>,
}

impl SheetsClient {
    /// Client for the activities sheet; only ever reads.
    pub fn read_only(spreadsheet_id: String, key: ServiceAccountKey) -> Self {
        Self::with_scope(spreadsheet_id, key, SCOPE_READONLY)
    }

    /// Client for the waitlist sheet; needs the append scope.
    pub fn read_write(spreadsheet_id: String, key: ServiceAccountKey) -> Self {
        Self::with_scope(spreadsheet_id, key, SCOPE_READWRITE)
    }

    fn with_scope(spreadsheet_id: String, key: ServiceAccountKey, scope: &'static str) -> Self {
        let http = reqwest::Client::new();
        let auth = TokenProvider::new(key, scope, http.clone());
        Self {
            inner: Arc::new(Inner {
                http,
                auth,
                spreadsheet_id,
            }),
        }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.inner.spreadsheet_id
    }

    /// Fetch a rectangular range of cells. Cells come back as formatted
    /// strings; missing trailing cells are simply absent from the row.
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let token = self.inner.auth.access_token().await?;
        let url = format!(
            "{}/{}/values/{}",
            API_BASE,
            self.inner.spreadsheet_id,
            encode_range(range)
        );
        let resp = self.inner.http.get(&url).bearer_auth(token).send().await?;
        let resp = self.check_status(resp, range).await?;
        let parsed: ValueRange = resp.json().await?;
        Ok(parsed.values)
    }

    /// Append one row after the last row of data in `range`.
    pub async fn append_row(&self, range: &str, row: Vec<String>) -> Result<(), SheetsError> {
        let token = self.inner.auth.access_token().await?;
        let url = format!(
            "{}/{}/values/{}:append",
            API_BASE,
            self.inner.spreadsheet_id,
            encode_range(range)
        );
        let resp = self
            .inner
            .http
            .post(&url)
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        self.check_status(resp, range).await?;
        Ok(())
    }

    /// Spreadsheet title plus the titles of its tabs. Used by diagnostics
    /// to discover which tab names actually exist.
    pub async fn get_metadata(&self) -> Result<SpreadsheetMeta, SheetsError> {
        let token = self.inner.auth.access_token().await?;
        let url = format!("{}/{}", API_BASE, self.inner.spreadsheet_id);
        let resp = self
            .inner
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("fields", "properties.title,sheets.properties.title")])
            .send()
            .await?;
        let resp = self.check_status(resp, "").await?;
        let parsed: SpreadsheetResponse = resp.json().await?;
        Ok(SpreadsheetMeta {
            title: parsed
                .properties
                .and_then(|p| p.title)
                .unwrap_or_default(),
            sheet_titles: parsed
                .sheets
                .into_iter()
                .filter_map(|s| s.properties.and_then(|p| p.title))
                .collect(),
        })
    }

    async fn check_status(
        &self,
        resp: reqwest::Response,
        range: &str,
    ) -> Result<reqwest::Response, SheetsError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(map_api_error(
            status.as_u16(),
            &body,
            &self.inner.spreadsheet_id,
            range,
        ))
    }
}

/// Coarse mapping from HTTP status to a typed error, mirroring the checks
/// callers branch on: 403 access, 404 bad sheet id, 400 bad range.
pub(crate) fn map_api_error(
    status: u16,
    body: &str,
    spreadsheet_id: &str,
    range: &str,
) -> SheetsError {
    match status {
        403 => SheetsError::PermissionDenied {
            spreadsheet_id: spreadsheet_id.to_string(),
        },
        404 => SheetsError::SpreadsheetNotFound {
            spreadsheet_id: spreadsheet_id.to_string(),
        },
        400 if body.contains("Unable to parse range") => SheetsError::BadRange {
            range: range.to_string(),
        },
        _ => SheetsError::Api {
            status,
            body: truncate(body),
        },
    }
}

fn truncate(body: &str) -> String {
    if body.len() <= ERROR_BODY_LIMIT {
        return body.to_string();
    }
    let mut end = ERROR_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

/// Minimal path encoding for A1 ranges; tab names may contain spaces or
/// quotes, the rest of the A1 syntax is URL-safe.
fn encode_range(range: &str) -> String {
    range.replace(' ', "%20").replace('\'', "%27")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_403_maps_to_permission_denied() {
        let err = map_api_error(403, "", "sheet-a", "Activities!A1:I");
        assert!(matches!(
            err,
            SheetsError::PermissionDenied { spreadsheet_id } if spreadsheet_id == "sheet-a"
        ));
    }

    #[test]
    fn status_404_maps_to_spreadsheet_not_found() {
        let err = map_api_error(404, "", "sheet-a", "");
        assert!(matches!(err, SheetsError::SpreadsheetNotFound { .. }));
    }

    #[test]
    fn status_400_with_range_message_maps_to_bad_range() {
        let body = r#"{"error":{"message":"Unable to parse range: Nope!A:C"}}"#;
        let err = map_api_error(400, body, "sheet-a", "Nope!A:C");
        assert!(matches!(err, SheetsError::BadRange { range } if range == "Nope!A:C"));
    }

    #[test]
    fn other_statuses_keep_status_and_body() {
        let err = map_api_error(500, "boom", "sheet-a", "A:C");
        match err {
            SheetsError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn range_encoding_handles_spaces_and_quotes() {
        assert_eq!(
            encode_range("'My Tab'!A1:C5"),
            "%27My%20Tab%27!A1:C5"
        );
        assert_eq!(encode_range("Activities!A1:I"), "Activities!A1:I");
    }
}
