use chrono::{DateTime, Utc};

/// One pre-launch signup, stored as a `[timestamp, email, name]` row in the
/// waitlist sheet. Append-only; the name cell stays empty when not given.
#[derive(Debug, Clone)]
pub struct WaitlistEntry {
    pub submitted_at: DateTime<Utc>,
    pub email: String,
    pub name: Option<String>,
}

impl WaitlistEntry {
    pub fn into_row(self) -> Vec<String> {
        vec![
            self.submitted_at.to_rfc3339(),
            self.email,
            self.name
                .map(|n| n.trim().to_string())
                .unwrap_or_default(),
        ]
    }
}
