// 🗄️ Expense Store - append-only, process-lifetime storage
//
// Ids are `count + 1` at insertion time. There is no update or delete, so
// ids are never reused or compacted.

use crate::error::ExpenseError;
use crate::expense::{Expense, NewExpense};
use crate::query::{filter_expenses, ExpenseQuery};
use chrono::Utc;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

// ============================================================================
// REPOSITORY TRAIT
// ============================================================================

/// Storage operations the HTTP layer depends on
///
/// Implementations must assign ids and append atomically with respect to
/// each other, so the id sequence stays gap-free and increasing.
pub trait ExpenseRepository: Send + Sync {
    /// Validate and append a new expense, returning the stored record
    fn create(&self, new_expense: NewExpense) -> Result<Expense, ExpenseError>;

    /// Expenses matching `query`, in insertion order
    fn list(&self, query: &ExpenseQuery) -> Vec<Expense>;

    /// Every stored expense, in insertion order
    fn all(&self) -> Vec<Expense>;

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    expenses: RwLock<Vec<Expense>>,
}

impl InMemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Every write is a single push, so a panic elsewhere cannot leave the
    // vector half-updated; recover the guard instead of propagating poison.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Expense>> {
        self.expenses.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Expense>> {
        self.expenses.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ExpenseRepository for InMemoryExpenseStore {
    fn create(&self, new_expense: NewExpense) -> Result<Expense, ExpenseError> {
        let valid = new_expense.validate().map_err(|e| {
            warn!(kind = e.kind(), "Rejected expense: {}", e);
            e
        })?;

        let mut expenses = self.write();

        // Category totals must stay finite or analysis would report null
        let total = expenses
            .iter()
            .filter(|exp| exp.category == valid.category)
            .fold(0.0, |sum, exp| sum + exp.amount)
            + valid.amount;
        if !total.is_finite() {
            warn!(category = %valid.category, "Rejected expense: category total overflows");
            return Err(ExpenseError::InvalidAmount);
        }

        let expense = valid.with_id(expenses.len() as u64 + 1);
        expenses.push(expense.clone());

        info!(
            id = expense.id,
            category = %expense.category,
            amount = expense.amount,
            "Recorded expense"
        );

        Ok(expense)
    }

    fn list(&self, query: &ExpenseQuery) -> Vec<Expense> {
        let result = filter_expenses(&self.read(), query, Utc::now());
        debug!(?query, matched = result.len(), "Listed expenses");
        result
    }

    fn all(&self) -> Vec<Expense> {
        self.read().clone()
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::Category;
    use std::sync::Arc;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let store = InMemoryExpenseStore::new();

        let first = store.create(NewExpense::new("Food", 50.0, "2024-01-10")).unwrap();
        let second = store.create(NewExpense::new("Travel", 30.0, "2024-01-15")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_rejected_creates_do_not_consume_ids() {
        let store = InMemoryExpenseStore::new();

        store.create(NewExpense::new("Food", 10.0, "2024-01-10")).unwrap();
        assert_eq!(
            store.create(NewExpense::new("Groceries", 10.0, "2024-01-10")),
            Err(ExpenseError::InvalidCategory)
        );
        assert_eq!(
            store.create(NewExpense::new("Food", 0.0, "2024-01-10")),
            Err(ExpenseError::InvalidAmount)
        );
        assert_eq!(
            store.create(NewExpense::new("Food", 5.0, "never")),
            Err(ExpenseError::InvalidDate)
        );
        let next = store.create(NewExpense::new("Bills", 10.0, "2024-01-11")).unwrap();

        assert_eq!(next.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_returns_stored_record() {
        let store = InMemoryExpenseStore::new();
        let created = store.create(NewExpense::new("Entertainment", 0.01, "2024-05-05")).unwrap();

        assert_eq!(created.category, Category::Entertainment);
        assert_eq!(created.amount, 0.01);
        assert_eq!(store.all(), vec![created]);
    }

    #[test]
    fn test_list_without_filters_is_creation_order() {
        let store = InMemoryExpenseStore::new();
        let created: Vec<Expense> = [
            ("Other", 3.0, "2024-03-01"),
            ("Food", 1.0, "2024-01-01"),
            ("Travel", 2.0, "2024-02-01"),
        ]
        .into_iter()
        .map(|(c, a, d)| store.create(NewExpense::new(c, a, d)).unwrap())
        .collect();

        assert_eq!(store.list(&ExpenseQuery::default()), created);
    }

    #[test]
    fn test_list_by_category() {
        let store = InMemoryExpenseStore::new();
        store.create(NewExpense::new("Food", 50.0, "2024-01-10")).unwrap();
        store.create(NewExpense::new("Travel", 30.0, "2024-01-15")).unwrap();
        store.create(NewExpense::new("Food", 20.0, "2024-02-01")).unwrap();

        let food = store.list(&ExpenseQuery::by_category("Food"));

        assert_eq!(food.len(), 2);
        assert!(food.iter().all(|e| e.category == Category::Food));
    }

    #[test]
    fn test_empty_store() {
        let store = InMemoryExpenseStore::new();
        assert!(store.is_empty());
        assert!(store.list(&ExpenseQuery::default()).is_empty());
    }

    #[test]
    fn test_concurrent_creates_keep_ids_unique() {
        let store = Arc::new(InMemoryExpenseStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.create(NewExpense::new("Food", 1.0, "2024-01-10")).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let ids: Vec<u64> = store.all().iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=200).collect::<Vec<u64>>());
    }

    #[test]
    fn test_category_total_overflow_rejected() {
        let store = InMemoryExpenseStore::new();

        store.create(NewExpense::new("Food", 1e308, "2024-01-10")).unwrap();
        assert_eq!(
            store.create(NewExpense::new("Food", 1e308, "2024-01-11")),
            Err(ExpenseError::InvalidAmount)
        );

        // Other categories keep their own headroom
        let travel = store.create(NewExpense::new("Travel", 1e308, "2024-01-12")).unwrap();
        assert_eq!(travel.id, 2);

        let analysis = crate::analysis::analyze(&store.all());
        assert!(analysis.analysis.iter().all(|t| t.total.is_finite()));
    }

    #[test]
    fn test_create_recovers_from_poisoned_lock() {
        let store = Arc::new(InMemoryExpenseStore::new());
        store.create(NewExpense::new("Food", 5.0, "2024-01-10")).unwrap();

        let poisoner = Arc::clone(&store);
        let outcome = std::thread::spawn(move || {
            let _guard = poisoner.write();
            panic!("writer died while holding the lock");
        })
        .join();

        assert!(outcome.is_err());
        assert!(store.expenses.is_poisoned());

        let next = store.create(NewExpense::new("Bills", 7.0, "2024-01-11")).unwrap();
        assert_eq!(next.id, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.list(&ExpenseQuery::default()).len(), 2);
    }
}
