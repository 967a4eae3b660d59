//! Wallet, spending classification and the weekly expense ledger.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::time::Duration;

use crate::validate::{
    ValidationError, validate_affordability, validate_budget, validate_savings_goal,
};

/// Ledger category for an expense entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Toys,
    Cleaning,
    Vet,
    Tricks,
    Bills,
    /// Income entries carry a negative amount so one list holds both sides.
    Income,
}

impl ExpenseCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Toys => "toys",
            Self::Cleaning => "cleaning",
            Self::Vet => "vet",
            Self::Tricks => "tricks",
            Self::Bills => "bills",
            Self::Income => "income",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a spend is routine care or emergency/corrective care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendKind {
    Preventive,
    Reactive,
}

/// One ledger entry; `at` is elapsed session time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub category: ExpenseCategory,
    pub item: String,
    pub amount: i64,
    pub at: Duration,
}

/// Per-category subtotal for the reporting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub subtotal: i64,
    pub entries: usize,
}

/// Wallet balance plus the full spending history of a session.
///
/// The wallet is signed and may go negative: the recurring bill charges
/// unconditionally, modeling real debt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceLedger {
    pub wallet: i64,
    pub budget: i64,
    pub total_spent: i64,
    pub preventive_spent: i64,
    pub reactive_spent: i64,
    pub current_week_spending: i64,
    #[serde(default)]
    pub weekly_spending: SmallVec<[i64; 16]>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub savings_goal: Option<i64>,
}

impl FinanceLedger {
    /// Open a ledger with a starting budget.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BudgetRange`] when the budget is outside
    /// the allowed range or step size.
    pub fn new(budget: i64) -> Result<Self, ValidationError> {
        validate_budget(budget)?;
        Ok(Self {
            wallet: budget,
            budget,
            total_spent: 0,
            preventive_spent: 0,
            reactive_spent: 0,
            current_week_spending: 0,
            weekly_spending: SmallVec::new(),
            expenses: Vec::new(),
            savings_goal: None,
        })
    }

    /// Spend from the wallet and record the expense.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Unaffordable`] without mutating anything
    /// when the amount is non-positive or exceeds the wallet.
    pub fn spend(
        &mut self,
        amount: i64,
        category: ExpenseCategory,
        item: &str,
        kind: SpendKind,
        at: Duration,
    ) -> Result<(), ValidationError> {
        validate_affordability(amount, self.wallet)?;
        self.wallet -= amount;
        self.total_spent += amount;
        match kind {
            SpendKind::Preventive => self.preventive_spent += amount,
            SpendKind::Reactive => self.reactive_spent += amount,
        }
        self.current_week_spending += amount;
        self.expenses.push(Expense {
            category,
            item: item.to_string(),
            amount,
            at,
        });
        Ok(())
    }

    /// Add income. Always succeeds; recorded as a negative-amount entry.
    pub fn earn(&mut self, amount: i64, source: &str, at: Duration) {
        self.wallet += amount;
        self.expenses.push(Expense {
            category: ExpenseCategory::Income,
            item: source.to_string(),
            amount: -amount.abs(),
            at,
        });
    }

    /// Charge a recurring bill. Bills always apply, even past zero; do not
    /// add a floor here.
    pub fn charge_bill(&mut self, amount: i64, label: &str, at: Duration) {
        self.wallet -= amount;
        self.total_spent += amount;
        self.expenses.push(Expense {
            category: ExpenseCategory::Bills,
            item: label.to_string(),
            amount,
            at,
        });
    }

    /// Close out the running week: archive the accumulator and zero it.
    /// The scheduler calls this exactly once per week boundary.
    pub fn close_week(&mut self) {
        self.weekly_spending.push(self.current_week_spending);
        self.current_week_spending = 0;
    }

    /// Reinitialize wallet, totals and the expense log for a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BudgetRange`] and leaves the ledger
    /// untouched when the new budget is invalid.
    pub fn reset(&mut self, new_budget: i64) -> Result<(), ValidationError> {
        validate_budget(new_budget)?;
        *self = Self {
            wallet: new_budget,
            budget: new_budget,
            total_spent: 0,
            preventive_spent: 0,
            reactive_spent: 0,
            current_week_spending: 0,
            weekly_spending: SmallVec::new(),
            expenses: Vec::new(),
            savings_goal: None,
        };
        Ok(())
    }

    /// Set an optional savings goal for the session.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SavingsGoal`] when non-positive or above
    /// the starting budget.
    pub fn set_savings_goal(&mut self, goal: i64) -> Result<(), ValidationError> {
        validate_savings_goal(goal, self.budget)?;
        self.savings_goal = Some(goal);
        Ok(())
    }

    /// Whether the savings goal (if any) is currently met.
    #[must_use]
    pub fn goal_met(&self) -> bool {
        self.savings_goal.is_some_and(|goal| self.wallet >= goal)
    }

    /// Total income recorded so far.
    #[must_use]
    pub fn total_income(&self) -> i64 {
        self.expenses
            .iter()
            .filter(|e| e.category == ExpenseCategory::Income)
            .map(|e| e.amount.abs())
            .sum()
    }

    /// Group the flat expense list into per-category subtotals, preserving
    /// first-seen category order.
    #[must_use]
    pub fn expense_report(&self) -> Vec<CategoryTotal> {
        let mut report: Vec<CategoryTotal> = Vec::new();
        for expense in &self.expenses {
            if let Some(row) = report.iter_mut().find(|r| r.category == expense.category) {
                row.subtotal += expense.amount;
                row.entries += 1;
            } else {
                report.push(CategoryTotal {
                    category: expense.category,
                    subtotal: expense.amount,
                    entries: 1,
                });
            }
        }
        report
    }
}
