//! In-memory patient records and the queries the table asks for.

use anyhow::Context;
use listing_widgets::{CellContent, FilterOption, Row, SortDirection, SortSpec, DEFAULT_OPTION_ID};
use std::cmp::Ordering;
use std::path::Path;

const LAST_NAMES: [&str; 12] = [
    "Okafor", "Lindqvist", "Moreau", "Nakamura", "Petrov", "Quinn", "Ramos", "Schultz", "Tanaka",
    "Umarov", "Vega", "Whitfield",
];
const FIRST_NAMES: [&str; 9] = [
    "Ada", "Bruno", "Chiara", "Dev", "Elif", "Femi", "Grace", "Hugo", "Ines",
];
const ORGANIZATIONS: [&str; 4] = ["Bayview Clinic", "Cedar Health", "Harbor Medical", "Oakridge"];
const STATUSES: [&str; 3] = ["active", "inactive", "pending"];

/// Field identifying each record.
pub const ID_FIELD: &str = "id";
/// Field the status filter applies to.
pub const STATUS_FIELD: &str = "status";

/// What the table currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Applied status option; `"all"` disables the filter
    pub status: String,
    pub sort: SortSpec,
    /// 1-based
    pub page: usize,
    pub per_page: usize,
}

impl Query {
    /// First page, unfiltered and unsorted.
    pub fn new(per_page: usize) -> Self {
        Self {
            status: DEFAULT_OPTION_ID.to_string(),
            sort: SortSpec::default(),
            page: 1,
            per_page: per_page.max(1),
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub rows: Vec<Row>,
    /// Matching rows across all pages
    pub total: usize,
    /// 1-based index of the first row shown, 0 when empty
    pub first: usize,
    pub last: usize,
}

impl PageResult {
    /// Text shown left of the page controls.
    pub fn summary(&self) -> String {
        if self.total == 0 {
            String::new()
        } else {
            format!("Showing {}-{} of {}", self.first, self.last, self.total)
        }
    }
}

/// All records, held in memory.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Row>,
}

impl Dataset {
    /// Deterministic generated records with ids `1..=count`.
    pub fn generate(count: usize) -> Self {
        let records = (1..=count)
            .map(|id| {
                let last = LAST_NAMES[(id * 5) % LAST_NAMES.len()];
                let first = FIRST_NAMES[(id * 7) % FIRST_NAMES.len()];
                let email = (id % 9 != 0).then(|| {
                    format!("{}.{}@example.net", first.to_lowercase(), last.to_lowercase())
                });
                Row::new()
                    .with(ID_FIELD, id)
                    .with("lastname", last)
                    .with("firstname", first)
                    .with("email", email)
                    .with("mrn", format!("MRN-{:06}", 200_000 + id * 613 % 99_991))
                    .with("organization", ORGANIZATIONS[(id / 3) % ORGANIZATIONS.len()])
                    .with("age", 19 + (id * 13) % 71)
                    .with(STATUS_FIELD, STATUSES[(id * 2 + id / 5) % STATUSES.len()])
            })
            .collect();
        Self { records }
    }

    /// Parse a JSON array of row objects.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let records: Vec<Row> = serde_json::from_str(json).context("expected a JSON array of objects")?;
        Ok(Self { records })
    }

    /// Load a JSON fixture file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("parsing fixture {}", path.display()))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct status values in first-seen order, as filter options.
    pub fn status_options(&self) -> Vec<FilterOption> {
        let mut options: Vec<FilterOption> = Vec::new();
        for record in &self.records {
            let value = record.display(STATUS_FIELD);
            if value.is_empty() || value == DEFAULT_OPTION_ID || options.iter().any(|o| o.id == value) {
                continue;
            }
            options.push(FilterOption::new(value.clone(), capitalize(&value)));
        }
        options
    }

    /// Filter, sort and slice the records.
    ///
    /// A page past the end is clamped to the last page.
    pub fn query(&self, query: &Query) -> PageResult {
        let mut matching: Vec<&Row> = self
            .records
            .iter()
            .filter(|r| query.status == DEFAULT_OPTION_ID || r.display(STATUS_FIELD) == query.status)
            .collect();

        if !query.sort.is_unsorted() {
            let column = query.sort.sort_by.as_str();
            matching.sort_by(|a, b| {
                let ord = compare_cells(a.get(column), b.get(column));
                match query.sort.sort_dir {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        let total = matching.len();
        let per_page = query.per_page.max(1);
        let pages = listing_widgets::page_count(total, per_page).max(1);
        let page = query.page.clamp(1, pages);
        let start = (page - 1) * per_page;
        let rows: Vec<Row> = matching.into_iter().skip(start).take(per_page).cloned().collect();

        let (first, last) = if rows.is_empty() {
            (0, 0)
        } else {
            (start + 1, start + rows.len())
        };
        PageResult {
            rows,
            total,
            first,
            last,
        }
    }
}

/// Numbers before text, empty cells last.
fn compare_cells(a: Option<&CellContent>, b: Option<&CellContent>) -> Ordering {
    let rank = |cell: Option<&CellContent>| match cell {
        Some(CellContent::Number(_)) => 0,
        Some(CellContent::Text(_)) | Some(CellContent::Flag(_)) => 1,
        Some(CellContent::Empty) | None => 2,
    };
    match (a, b) {
        (Some(CellContent::Number(x)), Some(CellContent::Number(y))) => x.total_cmp(y),
        (Some(CellContent::Text(x)), Some(CellContent::Text(y))) => {
            x.to_lowercase().cmp(&y.to_lowercase())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_widgets::RowId;

    fn ids(result: &PageResult) -> Vec<RowId> {
        result.rows.iter().filter_map(|r| r.id(ID_FIELD)).collect()
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = Dataset::generate(30);
        let b = Dataset::generate(30);
        assert_eq!(a.records, b.records);
        assert_eq!(a.len(), 30);
        assert!(a.records[8].get("email").is_some_and(CellContent::is_empty));
    }

    #[test]
    fn test_paging() {
        let data = Dataset::generate(47);
        let result = data.query(&Query::new(10));
        assert_eq!(result.total, 47);
        assert_eq!(result.rows.len(), 10);
        assert_eq!(result.summary(), "Showing 1-10 of 47");

        let mut query = Query::new(10);
        query.page = 5;
        let result = data.query(&query);
        assert_eq!(result.rows.len(), 7);
        assert_eq!(result.summary(), "Showing 41-47 of 47");
    }

    #[test]
    fn test_page_past_end_is_clamped() {
        let data = Dataset::generate(12);
        let mut query = Query::new(5);
        query.page = 9;
        let result = data.query(&query);
        assert_eq!(ids(&result), vec![RowId::from(11), RowId::from(12)]);
    }

    #[test]
    fn test_status_filter() {
        let data = Dataset::generate(60);
        let options = data.status_options();
        assert_eq!(options.len(), 3);
        assert!(options.iter().any(|o| o.id == "pending" && o.display == "Pending"));

        let mut query = Query::new(100);
        query.status = "inactive".to_string();
        let result = data.query(&query);
        assert!(result.total > 0 && result.total < 60);
        assert!(result.rows.iter().all(|r| r.display(STATUS_FIELD) == "inactive"));
    }

    #[test]
    fn test_sort_numbers_and_text() {
        let data = Dataset::generate(20);
        let mut query = Query::new(20);

        query.sort = SortSpec::new("age", SortDirection::Descending);
        let ages: Vec<f64> = data
            .query(&query)
            .rows
            .iter()
            .filter_map(|r| match r.get("age") {
                Some(CellContent::Number(n)) => Some(*n),
                _ => None,
            })
            .collect();
        assert!(ages.windows(2).all(|w| w[0] >= w[1]));

        query.sort = SortSpec::new("lastname", SortDirection::Ascending);
        let names: Vec<String> = data.query(&query).rows.iter().map(|r| r.display("lastname")).collect();
        assert!(names.windows(2).all(|w| w[0].to_lowercase() <= w[1].to_lowercase()));
    }

    #[test]
    fn test_empty_cells_sort_last() {
        let data = Dataset::generate(18);
        let mut query = Query::new(18);
        query.sort = SortSpec::new("email", SortDirection::Ascending);
        let result = data.query(&query);
        assert!(result.rows[17].display("email").is_empty());
        assert!(result.rows[16].display("email").is_empty());
        assert!(!result.rows[15].display("email").is_empty());
    }

    #[test]
    fn test_from_json() {
        let data = Dataset::from_json(r#"[{"id": 1, "status": "active"}, {"id": 2, "status": null}]"#).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.status_options(), vec![FilterOption::new("active", "Active")]);

        assert!(Dataset::from_json(r#"{"id": 1}"#).is_err());
    }
}
