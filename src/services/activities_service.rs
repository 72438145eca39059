use chrono::{Datelike, Duration, NaiveDate};
use serde::Deserialize;
use tracing::info;

use crate::models::Activity;
use crate::sheets::{SheetsClient, SheetsError};

// Row 1 is the header; it is the authoritative column-to-field mapping.
const ACTIVITIES_RANGE: &str = "Activities!A1:I";
pub const WEEKEND_PICKS_LIMIT: usize = 3;

const DEFAULT_AGE_RANGE: &str = "N/A";
const DEFAULT_LOCATION: &str = "N/A";
const DEFAULT_CATEGORY: &str = "General";
const DEFAULT_DESCRIPTION: &str = "No description provided.";
const DEFAULT_REGISTRATION_LINK: &str = "#";

#[derive(Debug, thiserror::Error)]
pub enum ActivitiesError {
    #[error("activities sheet header has no '{0}' column")]
    MissingColumn(&'static str),
    #[error(transparent)]
    Sheets(#[from] SheetsError),
}

#[derive(Debug, Deserialize, Default)]
pub struct ActivitiesQuery {
    pub age: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
}

/// Filter state echoed back into the listing page, so the selects keep
/// their value and the Clear link only shows when something is active.
#[derive(Debug, Clone, Default)]
pub struct AppliedActivityFilters {
    pub age_range: String,
    pub location: String,
    pub category: String,
}

impl AppliedActivityFilters {
    pub fn from_query(query: &ActivitiesQuery) -> Self {
        let pick = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or("").to_string();
        Self {
            age_range: pick(&query.age),
            location: pick(&query.location),
            category: pick(&query.category),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.age_range.is_empty() || !self.location.is_empty() || !self.category.is_empty()
    }
}

/// Distinct values present in the data, one list per filter select.
#[derive(Debug, Default)]
pub struct FilterOptions {
    pub age_ranges: Vec<String>,
    pub locations: Vec<String>,
    pub categories: Vec<String>,
}

/// Column indexes resolved from the header row. Only `id` and `name` are
/// required; any other missing column just means its field takes the
/// default for every row.
#[derive(Debug)]
struct ColumnMap {
    id: usize,
    name: usize,
    age_range: Option<usize>,
    location: Option<usize>,
    category: Option<usize>,
    description: Option<usize>,
    registration_link: Option<usize>,
    image_url: Option<usize>,
    activity_date: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Result<Self, ActivitiesError> {
        let find = |names: &[&str]| {
            header.iter().position(|cell| {
                let normalized = normalize_header(cell);
                names.contains(&normalized.as_str())
            })
        };

        let id = find(&["id"]).ok_or(ActivitiesError::MissingColumn("id"))?;
        let name =
            find(&["name", "activityname"]).ok_or(ActivitiesError::MissingColumn("name"))?;

        Ok(Self {
            id,
            name,
            age_range: find(&["agerange", "age", "ages"]),
            location: find(&["location", "city"]),
            category: find(&["category"]),
            description: find(&["description"]),
            registration_link: find(&["registrationlink", "link", "registration"]),
            image_url: find(&["imageurl", "image"]),
            activity_date: find(&["activitydate", "date"]),
        })
    }
}

fn normalize_header(cell: &str) -> String {
    cell.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn cell<'a>(row: &'a [String], idx: Option<usize>) -> &'a str {
    idx.and_then(|i| row.get(i)).map(|s| s.trim()).unwrap_or("")
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Map one data row through the column map. Rows without an id or name are
/// not activities; everything else degrades to placeholder defaults.
fn normalize_activity(map: &ColumnMap, row: &[String]) -> Option<Activity> {
    let id = cell(row, Some(map.id));
    let name = cell(row, Some(map.name));
    if id.is_empty() || name.is_empty() {
        return None;
    }

    Some(Activity {
        id: id.to_string(),
        name: name.to_string(),
        age_range: or_default(cell(row, map.age_range), DEFAULT_AGE_RANGE),
        location: or_default(cell(row, map.location), DEFAULT_LOCATION),
        category: or_default(cell(row, map.category), DEFAULT_CATEGORY),
        description: or_default(cell(row, map.description), DEFAULT_DESCRIPTION),
        registration_link: or_default(
            cell(row, map.registration_link),
            DEFAULT_REGISTRATION_LINK,
        ),
        image_url: optional(cell(row, map.image_url)),
        activity_date: optional(cell(row, map.activity_date)),
    })
}

pub async fn fetch_activities(client: &SheetsClient) -> Result<Vec<Activity>, ActivitiesError> {
    let rows = client.get_values(ACTIVITIES_RANGE).await?;
    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        info!("No data found in activities sheet");
        return Ok(Vec::new());
    };

    let map = ColumnMap::from_header(&header)?;
    let activities: Vec<Activity> = rows
        .filter_map(|row| normalize_activity(&map, &row))
        .collect();
    info!("Mapped {} valid activities from sheet", activities.len());
    Ok(activities)
}

pub async fn fetch_activity(
    client: &SheetsClient,
    id: &str,
) -> Result<Option<Activity>, ActivitiesError> {
    let activities = fetch_activities(client).await?;
    Ok(activities.into_iter().find(|a| a.id == id))
}

/// Conjunction of up to three equality matches; an empty filter value
/// means "no constraint".
pub fn apply_filters(
    activities: &[Activity],
    filters: &AppliedActivityFilters,
) -> Vec<Activity> {
    activities
        .iter()
        .filter(|a| {
            let age_ok = filters.age_range.is_empty() || a.age_range == filters.age_range;
            let location_ok = filters.location.is_empty() || a.location == filters.location;
            let category_ok = filters.category.is_empty() || a.category == filters.category;
            age_ok && location_ok && category_ok
        })
        .cloned()
        .collect()
}

pub fn filter_options(activities: &[Activity]) -> FilterOptions {
    FilterOptions {
        age_ranges: unique_sorted(activities.iter().map(|a| a.age_range.clone()).collect()),
        locations: unique_sorted(activities.iter().map(|a| a.location.clone()).collect()),
        categories: unique_sorted(activities.iter().map(|a| a.category.clone()).collect()),
    }
}

fn unique_sorted(mut values: Vec<String>) -> Vec<String> {
    values.retain(|v| !v.is_empty());
    values.sort();
    values.dedup();
    values
}

pub fn parse_activity_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%m/%d/%Y").ok()
}

/// The upcoming (Saturday, Sunday) relative to `today`. On a Saturday the
/// Saturday is today; on a Sunday the Sunday is today and the Saturday is
/// six days out.
pub fn upcoming_weekend(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let current = today.weekday().num_days_from_sunday() as i64;
    let saturday = today + Duration::days((6 - current).rem_euclid(7));
    let sunday = today + Duration::days((7 - current).rem_euclid(7));
    (saturday, sunday)
}

pub fn is_this_weekend(date: Option<&str>, today: NaiveDate) -> bool {
    let Some(raw) = date else {
        return false;
    };
    let Some(parsed) = parse_activity_date(raw) else {
        return false;
    };
    let (saturday, sunday) = upcoming_weekend(today);
    parsed == saturday || parsed == sunday
}

/// Up to three activities dated this weekend; when none are, the first
/// three activities overall so the landing page never looks empty.
pub fn weekend_picks(activities: &[Activity], today: NaiveDate) -> Vec<Activity> {
    let picks: Vec<Activity> = activities
        .iter()
        .filter(|a| is_this_weekend(a.activity_date.as_deref(), today))
        .take(WEEKEND_PICKS_LIMIT)
        .cloned()
        .collect();
    if !picks.is_empty() {
        return picks;
    }
    activities.iter().take(WEEKEND_PICKS_LIMIT).cloned().collect()
}

/// Hard-coded sample list shown on the landing page when the sheet read
/// fails outright.
pub fn sample_activities() -> Vec<Activity> {
    vec![
        Activity {
            id: "1".to_string(),
            name: "Kids Soccer Stars".to_string(),
            age_range: "4-6 years".to_string(),
            location: "City Park".to_string(),
            category: "Sports".to_string(),
            description: "Introduction to soccer for young children.".to_string(),
            registration_link: DEFAULT_REGISTRATION_LINK.to_string(),
            image_url: None,
            activity_date: None,
        },
        Activity {
            id: "2".to_string(),
            name: "Creative Canvas Workshop".to_string(),
            age_range: "7-10 years".to_string(),
            location: "Community Center".to_string(),
            category: "Arts".to_string(),
            description: "Fun art projects for elementary school kids.".to_string(),
            registration_link: DEFAULT_REGISTRATION_LINK.to_string(),
            image_url: None,
            activity_date: None,
        },
        Activity {
            id: "3".to_string(),
            name: "Future Coders Camp".to_string(),
            age_range: "8-12 years".to_string(),
            location: "Tech Hub Downtown".to_string(),
            category: "STEM".to_string(),
            description: "Introduction to coding concepts for kids.".to_string(),
            registration_link: DEFAULT_REGISTRATION_LINK.to_string(),
            image_url: None,
            activity_date: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn standard_header() -> Vec<String> {
        strings(&[
            "ID",
            "Name",
            "Age Range",
            "Location",
            "Category",
            "Description",
            "Registration Link",
            "Image URL",
            "Activity Date",
        ])
    }

    fn activity(id: &str, age: &str, location: &str, category: &str) -> Activity {
        Activity {
            id: id.to_string(),
            name: format!("Activity {}", id),
            age_range: age.to_string(),
            location: location.to_string(),
            category: category.to_string(),
            description: "desc".to_string(),
            registration_link: "#".to_string(),
            image_url: None,
            activity_date: None,
        }
    }

    #[test]
    fn row_without_id_or_name_is_excluded() {
        let map = ColumnMap::from_header(&standard_header()).unwrap();
        assert!(normalize_activity(&map, &strings(&["", "Soccer"])).is_none());
        assert!(normalize_activity(&map, &strings(&["a1", "   "])).is_none());
        assert!(normalize_activity(&map, &strings(&["a1", "Soccer"])).is_some());
    }

    #[test]
    fn blank_optional_fields_take_documented_defaults() {
        let map = ColumnMap::from_header(&standard_header()).unwrap();
        let activity = normalize_activity(&map, &strings(&["a1", "Soccer"])).unwrap();
        assert_eq!(activity.age_range, "N/A");
        assert_eq!(activity.location, "N/A");
        assert_eq!(activity.category, "General");
        assert_eq!(activity.description, "No description provided.");
        assert_eq!(activity.registration_link, "#");
        assert_eq!(activity.image_url, None);
        assert_eq!(activity.activity_date, None);
    }

    #[test]
    fn mapping_follows_header_names_not_positions() {
        // Same columns, shuffled order: the map must still land each field.
        let header = strings(&["Category", "Activity Date", "Name", "ID", "Location"]);
        let map = ColumnMap::from_header(&header).unwrap();
        let row = strings(&["STEM", "05/17/2025", "Robot Lab", "r1", "Library"]);
        let activity = normalize_activity(&map, &row).unwrap();
        assert_eq!(activity.id, "r1");
        assert_eq!(activity.name, "Robot Lab");
        assert_eq!(activity.category, "STEM");
        assert_eq!(activity.location, "Library");
        assert_eq!(activity.activity_date.as_deref(), Some("05/17/2025"));
    }

    #[test]
    fn header_without_id_column_is_an_error() {
        let header = strings(&["Name", "Category"]);
        let err = ColumnMap::from_header(&header).unwrap_err();
        assert!(matches!(err, ActivitiesError::MissingColumn("id")));
    }

    #[test]
    fn short_rows_are_padded_with_defaults() {
        let map = ColumnMap::from_header(&standard_header()).unwrap();
        // Sheets drops trailing empty cells, so rows may be shorter than
        // the header.
        let activity = normalize_activity(&map, &strings(&["a1", "Soccer", "4-6 years"])).unwrap();
        assert_eq!(activity.age_range, "4-6 years");
        assert_eq!(activity.location, "N/A");
    }

    #[test]
    fn filters_are_a_conjunction_of_equalities() {
        let all = vec![
            activity("1", "4-6 years", "Portland", "Sports"),
            activity("2", "4-6 years", "Seattle", "Sports"),
            activity("3", "7-10 years", "Portland", "Arts"),
        ];

        let mut filters = AppliedActivityFilters::default();
        assert_eq!(apply_filters(&all, &filters).len(), 3);

        filters.age_range = "4-6 years".to_string();
        assert_eq!(apply_filters(&all, &filters).len(), 2);

        filters.location = "Portland".to_string();
        let hits = apply_filters(&all, &filters);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");

        filters.category = "Arts".to_string();
        assert!(apply_filters(&all, &filters).is_empty());
    }

    #[test]
    fn filter_options_are_unique_and_sorted() {
        let all = vec![
            activity("1", "4-6 years", "Portland", "Sports"),
            activity("2", "4-6 years", "Seattle", "Sports"),
            activity("3", "7-10 years", "Portland", "Arts"),
        ];
        let options = filter_options(&all);
        assert_eq!(options.age_ranges, vec!["4-6 years", "7-10 years"]);
        assert_eq!(options.locations, vec!["Portland", "Seattle"]);
        assert_eq!(options.categories, vec!["Arts", "Sports"]);
    }

    #[test]
    fn upcoming_weekend_from_a_wednesday() {
        // Wednesday 2025-05-14 -> Saturday 17th, Sunday 18th.
        let today = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();
        let (saturday, sunday) = upcoming_weekend(today);
        assert_eq!(saturday, NaiveDate::from_ymd_opt(2025, 5, 17).unwrap());
        assert_eq!(sunday, NaiveDate::from_ymd_opt(2025, 5, 18).unwrap());
    }

    #[test]
    fn weekend_boundaries_on_saturday_and_sunday() {
        // On a Saturday, that Saturday and the next day count.
        let saturday = NaiveDate::from_ymd_opt(2025, 5, 17).unwrap();
        let (sat, sun) = upcoming_weekend(saturday);
        assert_eq!(sat, saturday);
        assert_eq!(sun, NaiveDate::from_ymd_opt(2025, 5, 18).unwrap());

        // On a Sunday, the Sunday is today but the Saturday has rolled over.
        let sunday = NaiveDate::from_ymd_opt(2025, 5, 18).unwrap();
        let (sat, sun) = upcoming_weekend(sunday);
        assert_eq!(sun, sunday);
        assert_eq!(sat, NaiveDate::from_ymd_opt(2025, 5, 24).unwrap());
    }

    #[test]
    fn weekend_filter_selects_only_the_upcoming_weekend() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();
        assert!(is_this_weekend(Some("05/17/2025"), today));
        assert!(is_this_weekend(Some("5/18/2025"), today));
        assert!(!is_this_weekend(Some("05/24/2025"), today));
        assert!(!is_this_weekend(Some("05/16/2025"), today));
        assert!(!is_this_weekend(Some("not a date"), today));
        assert!(!is_this_weekend(None, today));
    }

    #[test]
    fn weekend_picks_fall_back_to_first_three() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();
        let mut all = vec![
            activity("1", "4-6 years", "Portland", "Sports"),
            activity("2", "4-6 years", "Seattle", "Sports"),
            activity("3", "7-10 years", "Portland", "Arts"),
            activity("4", "7-10 years", "Portland", "Arts"),
        ];

        // No dated activities: first three win.
        let picks = weekend_picks(&all, today);
        assert_eq!(picks.len(), 3);
        assert_eq!(picks[0].id, "1");

        // One activity dated this weekend: only that one.
        all[3].activity_date = Some("05/17/2025".to_string());
        let picks = weekend_picks(&all, today);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id, "4");
    }
}
