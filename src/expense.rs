// 💸 Expense Model - Fixed categories, stored records and raw create input
//
// An Expense is created once and never mutated. Everything a client sends
// arrives as a NewExpense and only becomes an Expense after validation.

use crate::error::ExpenseError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CATEGORY
// ============================================================================

/// Closed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Travel,
    Bills,
    Entertainment,
    Other,
}

impl Category {
    /// Every category, in declared order (analysis output follows this order)
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Travel,
        Category::Bills,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ExpenseError;

    /// Exact, case-sensitive match ("food" is not a category)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(ExpenseError::InvalidCategory)
    }
}

// ============================================================================
// EXPENSE
// ============================================================================

/// A stored expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Position in the store, starting at 1
    pub id: u64,

    pub category: Category,

    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,

    #[serde(serialize_with = "serialize_timestamp")]
    pub date: DateTime<Utc>,
}

/// Write whole amounts as JSON integers (`50`, not `50.0`)
pub(crate) fn serialize_amount<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // 2^53: beyond this f64 stops representing every integer
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-10T00:00:00.000Z`
fn serialize_timestamp<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Parse a client-supplied date string into a UTC timestamp
///
/// Accepted forms:
/// - RFC 3339 with offset: `2024-01-10T08:30:00+02:00`, `2024-01-10T08:30:00.000Z`
/// - minute precision with offset: `2024-01-10T08:30Z`, `2024-01-10T08:30+02:00`
/// - date-time without offset, read as UTC: `2024-01-10T08:30:00`, `2024-01-10T08:30`
/// - date only, UTC midnight: `2024-01-10`, `2024-01` (1st), `2024` (Jan 1st)
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    // %:z does not take `Z`, spell it as an offset
    let zoned = match input.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => input.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_str(&zoned, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    parse_calendar_date(input)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`; a missing month or day is the 1st
fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let is_year = |s: &str| s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit());

    match input.len() {
        10 => NaiveDate::parse_from_str(input, "%Y-%m-%d").ok(),
        7 if input.get(..4).is_some_and(is_year) && input.as_bytes()[4] == b'-' => {
            NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d").ok()
        }
        4 if is_year(input) => input
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        _ => None,
    }
}

// ============================================================================
// CREATE INPUT
// ============================================================================

/// Raw create request, exactly as the client sent it
///
/// Fields are kept as JSON values so that a wrong type is reported as the
/// matching validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewExpense {
    #[serde(default)]
    pub category: Value,

    #[serde(default)]
    pub amount: Value,

    #[serde(default)]
    pub date: Value,
}

/// A NewExpense that passed every check, waiting for an id
#[derive(Debug, Clone, PartialEq)]
pub struct ValidExpense {
    pub category: Category,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl NewExpense {
    pub fn new(category: &str, amount: f64, date: &str) -> Self {
        NewExpense {
            category: Value::from(category),
            amount: Value::from(amount),
            date: Value::from(date),
        }
    }

    /// Check category, then amount, then date; the first failure wins
    pub fn validate(&self) -> Result<ValidExpense, ExpenseError> {
        let category = self
            .category
            .as_str()
            .ok_or(ExpenseError::InvalidCategory)?
            .parse::<Category>()?;

        let amount = self
            .amount
            .as_f64()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or(ExpenseError::InvalidAmount)?;

        let date = self
            .date
            .as_str()
            .and_then(parse_date)
            .ok_or(ExpenseError::InvalidDate)?;

        Ok(ValidExpense { category, amount, date })
    }
}

impl ValidExpense {
    pub fn with_id(self, id: u64) -> Expense {
        Expense {
            id,
            category: self.category,
            amount: self.amount,
            date: self.date,
        }
    }
}
