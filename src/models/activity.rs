/// One listed kids' class, camp or event, read from the activities sheet.
///
/// Rows are created externally (form submissions appended to the sheet);
/// the application never updates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub age_range: String,
    pub location: String,
    pub category: String,
    pub description: String,
    pub registration_link: String,
    pub image_url: Option<String>,
    /// Free-text date, `MM/DD/YYYY` when present.
    pub activity_date: Option<String>,
}

impl Activity {
    /// CSS badge class for the category chip on cards and the detail page.
    pub fn category_class(&self) -> &'static str {
        match self.category.as_str() {
            "Sports" => "badge-sports",
            "Arts" => "badge-arts",
            "STEM" => "badge-stem",
            "Music" => "badge-music",
            "Dance" => "badge-dance",
            _ => "badge-general",
        }
    }
}
