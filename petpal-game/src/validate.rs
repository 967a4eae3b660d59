//! Pure validation predicates shared by every mutating operation.
use thiserror::Error;

use crate::constants::{BUDGET_MAX, BUDGET_MIN, BUDGET_STEP, STAT_MAX, STAT_MIN};

/// Errors raised when a player-facing operation fails validation.
///
/// These are expected outcomes, not faults: every mutating operation in the
/// crate returns `Result<_, ValidationError>` and leaves state untouched on
/// the error path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("cost {cost} cannot be paid from wallet {wallet}")]
    Unaffordable { cost: i64, wallet: i64 },
    #[error("stat at {current} cannot move by {requested}")]
    OutOfRange { current: i32, requested: i32 },
    #[error("invalid name: {reason}")]
    InvalidFormat { reason: &'static str },
    #[error("duplicate entry: {candidate}")]
    Duplicate { candidate: String },
    #[error("budget {amount} must be {min}..={max} in steps of {step}")]
    BudgetRange {
        amount: i64,
        min: i64,
        max: i64,
        step: i64,
    },
    #[error("savings goal {goal} invalid for budget {budget}")]
    SavingsGoal { goal: i64, budget: i64 },
}

impl ValidationError {
    /// Short failure-kind label for the presentation layer.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unaffordable { .. } => "Unaffordable",
            Self::OutOfRange { .. } => "OutOfRange",
            Self::InvalidFormat { .. } => "InvalidFormat",
            Self::Duplicate { .. } => "Duplicate",
            Self::BudgetRange { .. } => "BudgetRange",
            Self::SavingsGoal { .. } => "SavingsGoal",
        }
    }
}

/// Character sets accepted by name-token validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCharset {
    /// Letters, digits and spaces (pet names).
    Plain,
    /// Letters, digits, spaces, apostrophes, periods and hyphens
    /// (owner and trick names).
    Punctuated,
}

impl NameCharset {
    fn allows(self, c: char) -> bool {
        if c.is_ascii_alphanumeric() || c == ' ' {
            return true;
        }
        matches!(self, Self::Punctuated) && matches!(c, '\'' | '.' | '-')
    }
}

/// Check that a cost is positive and covered by the wallet balance.
///
/// # Errors
///
/// Returns [`ValidationError::Unaffordable`] when `cost <= 0` or the wallet
/// holds less than `cost`.
pub fn validate_affordability(cost: i64, wallet: i64) -> Result<(), ValidationError> {
    if cost <= 0 || wallet < cost {
        return Err(ValidationError::Unaffordable { cost, wallet });
    }
    Ok(())
}

/// Clamp a requested stat delta into the valid range and return the delta
/// that can actually be applied.
///
/// A zero request is always valid and yields zero. Callers report the
/// returned effective delta, never the requested one.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] when the stat already sits at the
/// boundary in the direction of the delta, so not even a clamped change can
/// be realized.
pub fn validate_bounded_delta(current: i32, requested: i32) -> Result<i32, ValidationError> {
    let target = (current + requested).clamp(STAT_MIN, STAT_MAX);
    let effective = target - current;
    if requested != 0 && effective == 0 {
        return Err(ValidationError::OutOfRange { current, requested });
    }
    Ok(effective)
}

/// Trim and validate a player-supplied name token.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] on empty input, over-length
/// input, or characters outside the charset. Nothing is silently coerced
/// beyond the trim.
pub fn validate_name_token(
    text: &str,
    max_len: usize,
    charset: NameCharset,
) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidFormat {
            reason: "name is required",
        });
    }
    if trimmed.chars().count() > max_len {
        return Err(ValidationError::InvalidFormat {
            reason: "name is too long",
        });
    }
    if !trimmed.chars().all(|c| charset.allows(c)) {
        return Err(ValidationError::InvalidFormat {
            reason: "name contains disallowed characters",
        });
    }
    Ok(trimmed.to_string())
}

/// Check a candidate against an existing list, case-insensitively.
///
/// # Errors
///
/// Returns [`ValidationError::Duplicate`] when an entry matches.
pub fn validate_unique(candidate: &str, existing: &[String]) -> Result<(), ValidationError> {
    if existing
        .iter()
        .any(|entry| entry.eq_ignore_ascii_case(candidate))
    {
        return Err(ValidationError::Duplicate {
            candidate: candidate.to_string(),
        });
    }
    Ok(())
}

/// Check a starting-budget selection against the allowed range and step.
///
/// # Errors
///
/// Returns [`ValidationError::BudgetRange`] when outside the range or not a
/// multiple of the step size.
pub fn validate_budget(amount: i64) -> Result<(), ValidationError> {
    if !(BUDGET_MIN..=BUDGET_MAX).contains(&amount) || amount % BUDGET_STEP != 0 {
        return Err(ValidationError::BudgetRange {
            amount,
            min: BUDGET_MIN,
            max: BUDGET_MAX,
            step: BUDGET_STEP,
        });
    }
    Ok(())
}

/// Check a savings goal: positive and within the starting budget.
///
/// # Errors
///
/// Returns [`ValidationError::SavingsGoal`] otherwise.
pub fn validate_savings_goal(goal: i64, budget: i64) -> Result<(), ValidationError> {
    if goal <= 0 || goal > budget {
        return Err(ValidationError::SavingsGoal { goal, budget });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affordability_rejects_zero_cost_and_short_wallets() {
        assert!(validate_affordability(5, 10).is_ok());
        assert!(matches!(
            validate_affordability(0, 10),
            Err(ValidationError::Unaffordable { .. })
        ));
        assert!(matches!(
            validate_affordability(15, 10),
            Err(ValidationError::Unaffordable { cost: 15, wallet: 10 })
        ));
    }

    #[test]
    fn bounded_delta_clamps_and_reports_effective_change() {
        assert_eq!(validate_bounded_delta(80, 30).unwrap(), 20);
        assert_eq!(validate_bounded_delta(10, -30).unwrap(), -10);
        assert_eq!(validate_bounded_delta(50, 0).unwrap(), 0);
    }

    #[test]
    fn bounded_delta_rejects_saturated_stats() {
        assert!(matches!(
            validate_bounded_delta(100, 5),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_bounded_delta(0, -5),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn name_tokens_respect_charsets() {
        assert_eq!(
            validate_name_token("  Rex  ", 20, NameCharset::Plain).unwrap(),
            "Rex"
        );
        assert!(validate_name_token("", 20, NameCharset::Plain).is_err());
        assert!(validate_name_token("O'Malley", 30, NameCharset::Plain).is_err());
        assert!(validate_name_token("O'Malley", 30, NameCharset::Punctuated).is_ok());
        assert!(validate_name_token(&"x".repeat(21), 20, NameCharset::Plain).is_err());
        assert!(validate_name_token("sit!", 20, NameCharset::Punctuated).is_err());
    }

    #[test]
    fn uniqueness_is_case_insensitive() {
        let known = vec!["Sit".to_string(), "Roll Over".to_string()];
        assert!(validate_unique("shake", &known).is_ok());
        assert!(matches!(
            validate_unique("sit", &known),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn budget_range_and_step() {
        assert!(validate_budget(200).is_ok());
        assert!(validate_budget(50).is_ok());
        assert!(validate_budget(500).is_ok());
        assert!(validate_budget(40).is_err());
        assert!(validate_budget(510).is_err());
        assert!(validate_budget(205).is_err());
    }

    #[test]
    fn savings_goal_bounds() {
        assert!(validate_savings_goal(100, 200).is_ok());
        assert!(validate_savings_goal(0, 200).is_err());
        assert!(validate_savings_goal(250, 200).is_err());
    }

    #[test]
    fn error_kinds_are_stable_labels() {
        assert_eq!(
            validate_affordability(1, 0).unwrap_err().kind(),
            "Unaffordable"
        );
        assert_eq!(
            validate_bounded_delta(100, 1).unwrap_err().kind(),
            "OutOfRange"
        );
    }
}
