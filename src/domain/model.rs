use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CATEGORY: &str = "Architecture / Interior Design";
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// One firm scraped from a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,
    pub category: String,
    pub description: String,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            website: String::new(),
            category: CATEGORY.to_string(),
            description: String::new(),
        }
    }
}

impl Record {
    /// Identity used for deduplication: (name, phone, email), compared exactly.
    pub fn identity(&self) -> (&str, &str, &str) {
        (&self.name, &self.phone, &self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    pub url_template: String,
}

impl Site {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    pub fn page_url(&self, page: usize) -> String {
        page_url(&self.url_template, page)
    }
}

/// `count` page numbers from `start`, stopping short instead of overflowing.
pub fn page_numbers(start: usize, count: usize) -> impl Iterator<Item = usize> {
    (0..count).map_while(move |offset| start.checked_add(offset))
}

pub fn page_url(template: &str, page: usize) -> String {
    template.replace(PAGE_PLACEHOLDER, &page.to_string())
}

pub fn default_sites() -> Vec<Site> {
    vec![
        Site::new(
            "JustDial",
            "https://www.justdial.com/Hyderabad/Architects/page-{page}",
        ),
        Site::new(
            "Sulekha",
            "https://www.sulekha.com/interior-designers-decorators/hyderabad?page={page}",
        ),
        Site::new(
            "Houzz",
            "https://www.houzz.in/professionals/interior-designers-and-decorators/c/Hyderabadi/p/{page}",
        ),
    ]
}

#[derive(Debug, Clone)]
pub struct DedupeResult {
    pub records: Vec<Record>,
    pub duplicates_removed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Saved { path: String, records: usize },
    NoData,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub scraped_records: usize,
    pub unique_records: usize,
}

impl RunSummary {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    pub fn duplicates_removed(&self) -> usize {
        self.scraped_records - self.unique_records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_substitutes_every_placeholder() {
        let site = Site::new("X", "https://x.example/{page}?p={page}");
        assert_eq!(site.page_url(4), "https://x.example/4?p=4");
    }

    #[test]
    fn test_page_numbers_stop_at_usize_max() {
        assert_eq!(page_numbers(2, 3).collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(
            page_numbers(usize::MAX - 1, 5).collect::<Vec<_>>(),
            vec![usize::MAX - 1, usize::MAX]
        );
        assert_eq!(page_numbers(1, 0).count(), 0);
    }

    #[test]
    fn test_default_record_has_category() {
        let record = Record::default();
        assert_eq!(record.category, "Architecture / Interior Design");
        assert_eq!(record.identity(), ("", "", ""));
    }
}
