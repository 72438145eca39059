pub mod routes;

use crate::sheets::SheetsClient;

/// Shared handler state: one client per spreadsheet. The activities sheet
/// is read-only, the waitlist sheet needs the append scope.
#[derive(Clone)]
pub struct AppState {
    pub activities: SheetsClient,
    pub waitlist: SheetsClient,
}
