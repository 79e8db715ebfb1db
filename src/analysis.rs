// 📊 Analysis Engine - per-category totals + top spending category

use crate::expense::{serialize_amount, Category, Expense};
use serde::{Deserialize, Serialize};

/// Total spent in one category
///
/// `category` is `None` only for the "no spending yet" sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Option<Category>,

    #[serde(serialize_with = "serialize_amount")]
    pub total: f64,
}

impl CategoryTotal {
    /// Starting point of the max scan: `{category: null, total: 0}`
    pub fn none() -> Self {
        CategoryTotal {
            category: None,
            total: 0.0,
        }
    }
}

/// Result of analyze()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingAnalysis {
    /// One entry per category, in `Category::ALL` order
    pub analysis: Vec<CategoryTotal>,

    pub highest_spending_category: CategoryTotal,
}

/// Sum amounts per category and pick the biggest spender
pub fn analyze(expenses: &[Expense]) -> SpendingAnalysis {
    let analysis: Vec<CategoryTotal> = Category::ALL
        .into_iter()
        .map(|category| CategoryTotal {
            category: Some(category),
            total: expenses
                .iter()
                .filter(|exp| exp.category == category)
                .fold(0.0, |sum, exp| sum + exp.amount),
        })
        .collect();

    let highest_spending_category = highest(&analysis);

    SpendingAnalysis {
        analysis,
        highest_spending_category,
    }
}

/// Strictly-greater scan: ties keep the earlier entry, all-zero keeps the sentinel
fn highest(totals: &[CategoryTotal]) -> CategoryTotal {
    totals
        .iter()
        .fold(CategoryTotal::none(), |max, entry| {
            if entry.total > max.total {
                entry.clone()
            } else {
                max
            }
        })
}
