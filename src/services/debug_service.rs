use tracing::warn;

use crate::sheets::SheetsClient;

// How many data rows a probe asks for; enough to prove the range works.
const PROBE_ROW_LIMIT: usize = 5;

pub struct ConfigReport {
    pub activities_sheet_id: Option<String>,
    pub waitlist_sheet_id: Option<String>,
    pub credentials_source: String,
}

pub struct RangeProbe {
    pub range: String,
    pub outcome: String,
}

pub struct DebugReport {
    pub config: ConfigReport,
    pub spreadsheet_title: Option<String>,
    pub sheet_titles: Vec<String>,
    pub probes: Vec<RangeProbe>,
}

/// Show only the edges of a spreadsheet id so the page can be shared in a
/// bug report without leaking the full id.
pub fn redact_id(id: &str) -> String {
    if !id.is_ascii() || id.len() <= 8 {
        return "...".to_string();
    }
    format!("{}...{} ({} chars)", &id[..4], &id[id.len() - 4..], id.len())
}

fn config_report() -> ConfigReport {
    let credentials_source = if std::env::var("GOOGLE_CREDENTIALS").is_ok() {
        "inline JSON (GOOGLE_CREDENTIALS)"
    } else if std::env::var("GOOGLE_APPLICATION_CREDENTIALS").is_ok() {
        "key file (GOOGLE_APPLICATION_CREDENTIALS)"
    } else {
        "missing"
    };

    ConfigReport {
        activities_sheet_id: std::env::var("GOOGLE_SHEET_ID").ok().map(|v| redact_id(&v)),
        waitlist_sheet_id: std::env::var("GOOGLE_SHEET_ID_WAITLIST")
            .ok()
            .map(|v| redact_id(&v)),
        credentials_source: credentials_source.to_string(),
    }
}

/// Connectivity check for the activities spreadsheet: config summary,
/// metadata fetch, then a sample read against each candidate tab. The tab
/// name has been a recurring misconfiguration, so the probes try the
/// expected names plus whatever tab the spreadsheet actually reports first.
pub async fn run_diagnostics(client: &SheetsClient) -> DebugReport {
    let config = config_report();

    let (spreadsheet_title, sheet_titles) = match client.get_metadata().await {
        Ok(meta) => (Some(meta.title), meta.sheet_titles),
        Err(e) => {
            warn!("Debug metadata fetch failed: {}", e);
            (None, Vec::new())
        }
    };

    let mut ranges = vec![
        format!("Activities!A1:I{}", PROBE_ROW_LIMIT),
        format!("Sheet1!A1:I{}", PROBE_ROW_LIMIT),
    ];
    if let Some(first) = sheet_titles.first() {
        let discovered = format!("{}!A1:I{}", first, PROBE_ROW_LIMIT);
        if !ranges.contains(&discovered) {
            ranges.push(discovered);
        }
    }

    let mut probes = Vec::new();
    for range in ranges {
        let outcome = match client.get_values(&range).await {
            Ok(rows) => format!("ok, {} rows", rows.len()),
            Err(e) => format!("failed: {}", e),
        };
        probes.push(RangeProbe { range, outcome });
    }

    DebugReport {
        config,
        spreadsheet_title,
        sheet_titles,
        probes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_keeps_only_the_edges() {
        let id = "1aBcDeFgHiJkLmNoPqRsTuVwXyZ0123456789";
        let redacted = redact_id(id);
        assert!(redacted.starts_with("1aBc"));
        assert!(redacted.contains("6789"));
        assert!(!redacted.contains("DeFgHiJk"));
    }

    #[test]
    fn short_ids_are_fully_hidden() {
        assert_eq!(redact_id("tiny"), "...");
    }
}
