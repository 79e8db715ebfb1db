// 🔎 List Filters - category equality + inclusive date range
//
// Filters compose with AND and never reorder: results keep insertion order.

use crate::expense::{parse_date, Expense};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Optional filters for listing expenses, as sent in the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseQuery {
    /// Exact category name ("Food")
    pub category: Option<String>,

    /// Inclusive lower bound; defaults to the earliest representable time
    pub start_date: Option<String>,

    /// Inclusive upper bound; defaults to "now" at evaluation
    pub end_date: Option<String>,

    /// Set when a filter key repeats or the query cannot be read; nothing matches
    #[serde(skip)]
    pub unsatisfiable: bool,
}

/// Resolved date window
///
/// `Unsatisfiable` comes from a bound that does not parse: nothing can
/// fall inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Unbounded,
    Between(DateTime<Utc>, DateTime<Utc>),
    Unsatisfiable,
}

impl DateRange {
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        match self {
            DateRange::Unbounded => true,
            DateRange::Between(start, end) => *start <= date && date <= *end,
            DateRange::Unsatisfiable => false,
        }
    }
}

/// Empty query values behave as if the parameter were absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ExpenseQuery {
    pub fn by_category(category: &str) -> Self {
        ExpenseQuery {
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    pub fn between(start_date: Option<&str>, end_date: Option<&str>) -> Self {
        ExpenseQuery {
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
            ..Default::default()
        }
    }

    /// Build from raw query-string pairs; unknown keys are ignored
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = ExpenseQuery::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut query.category,
                "startDate" => &mut query.start_date,
                "endDate" => &mut query.end_date,
                _ => continue,
            };

            if slot.is_some() {
                query.unsatisfiable = true;
            } else {
                *slot = Some(value);
            }
        }

        query
    }

    /// Resolve the date bounds against `now`
    pub fn date_range(&self, now: DateTime<Utc>) -> DateRange {
        let start = present(&self.start_date);
        let end = present(&self.end_date);

        if start.is_none() && end.is_none() {
            return DateRange::Unbounded;
        }

        let start = match start {
            Some(s) => parse_date(s),
            None => Some(DateTime::<Utc>::MIN_UTC),
        };
        let end = match end {
            Some(s) => parse_date(s),
            None => Some(now),
        };

        match (start, end) {
            (Some(start), Some(end)) => DateRange::Between(start, end),
            _ => DateRange::Unsatisfiable,
        }
    }
}

/// Apply `query` to `expenses`, keeping insertion order
pub fn filter_expenses(expenses: &[Expense], query: &ExpenseQuery, now: DateTime<Utc>) -> Vec<Expense> {
    if query.unsatisfiable {
        return Vec::new();
    }

    let category = present(&query.category);
    let range = query.date_range(now);

    expenses
        .iter()
        .filter(|exp| category.map_or(true, |c| exp.category.as_str() == c))
        .filter(|exp| range.contains(exp.date))
        .cloned()
        .collect()
}
