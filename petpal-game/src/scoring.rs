//! End-of-session scoring over the recorded weekly history.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::constants::{
    MAX_PAIR_INSTABILITY, SCORE_NEUTRAL, SCORE_WEIGHT_CONSISTENCY, SCORE_WEIGHT_FINANCIAL,
    SCORE_WEIGHT_VOLATILITY, SCORE_WEIGHT_WELLBEING,
};
use crate::numbers::{i64_to_f64, round_f64_to_i32};
use crate::stats::PetStats;

/// Stat triple captured once per completed week. Hunger and hygiene are
/// decay drivers, not scored dimensions, and are intentionally excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSnapshot {
    pub happiness: i32,
    pub health: i32,
    pub energy: i32,
}

impl WeekSnapshot {
    /// Capture the scored dimensions of the current stat vector.
    #[must_use]
    pub const fn of(stats: &PetStats) -> Self {
        Self {
            happiness: stats.happiness,
            health: stats.health,
            energy: stats.energy,
        }
    }

    fn mean(&self) -> f64 {
        f64::from(self.happiness + self.health + self.energy) / 3.0
    }
}

/// Session-owned, append-only snapshot history.
pub type SnapshotHistory = SmallVec<[WeekSnapshot; 16]>;

/// Named band a final score maps into for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerTier {
    Neglectful,
    Struggling,
    Learning,
    Responsible,
    Elite,
}

impl OwnerTier {
    /// Minimum final score for this tier.
    #[must_use]
    pub const fn min_score(self) -> i32 {
        match self {
            Self::Neglectful => 0,
            Self::Struggling => 40,
            Self::Learning => 60,
            Self::Responsible => 75,
            Self::Elite => 90,
        }
    }

    /// Display label for the tier.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Neglectful => "Neglectful Owner",
            Self::Struggling => "Struggling Owner",
            Self::Learning => "Learning Owner",
            Self::Responsible => "Responsible Owner",
            Self::Elite => "Elite Owner",
        }
    }

    /// Map a final score into its tier.
    #[must_use]
    pub const fn classify(score: i32) -> Self {
        if score >= Self::Elite.min_score() {
            Self::Elite
        } else if score >= Self::Responsible.min_score() {
            Self::Responsible
        } else if score >= Self::Learning.min_score() {
            Self::Learning
        } else if score >= Self::Struggling.min_score() {
            Self::Struggling
        } else {
            Self::Neglectful
        }
    }
}

impl fmt::Display for OwnerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Letter grade over the live stat vector at session end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareGrade {
    A,
    B,
    C,
    D,
    F,
}

impl CareGrade {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for CareGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade the mean of all five live stats.
#[must_use]
pub fn care_grade(stats: &PetStats) -> CareGrade {
    let average = stats.average();
    if average >= 90.0 {
        CareGrade::A
    } else if average >= 75.0 {
        CareGrade::B
    } else if average >= 60.0 {
        CareGrade::C
    } else if average >= 45.0 {
        CareGrade::D
    } else {
        CareGrade::F
    }
}

/// Inputs to the scoring computation, all borrowed from the session.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub snapshots: &'a [WeekSnapshot],
    pub weekly_spending: &'a [i64],
    pub preventive_spent: i64,
    pub reactive_spent: i64,
}

/// Component scores (rounded for display), the final score and its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub wellbeing: i32,
    pub financial: i32,
    pub consistency: i32,
    pub volatility: i32,
    pub final_score: i32,
    pub classification: OwnerTier,
}

/// Mean of `(happiness + health + energy) / 3` across snapshots, in
/// `[0,100]`. Neutral 50 with no snapshots yet.
#[must_use]
pub fn wellbeing_score(snapshots: &[WeekSnapshot]) -> f64 {
    if snapshots.is_empty() {
        return SCORE_NEUTRAL;
    }
    let averages: Vec<f64> = snapshots.iter().map(WeekSnapshot::mean).collect();
    mean(&averages).clamp(0.0, 100.0)
}

/// Preventive share of total spending, in `[0,100]`. Neutral 50 when no
/// spending is recorded.
#[must_use]
pub fn financial_score(preventive_spent: i64, reactive_spent: i64) -> f64 {
    let total = preventive_spent + reactive_spent;
    if total == 0 {
        return SCORE_NEUTRAL;
    }
    (i64_to_f64(preventive_spent) / i64_to_f64(total) * 100.0).clamp(0.0, 100.0)
}

/// Mean stability across consecutive snapshot pairs, in `[0,100]`. Perfectly
/// consistent (100) with fewer than two snapshots.
#[must_use]
pub fn consistency_score(snapshots: &[WeekSnapshot]) -> f64 {
    if snapshots.len() < 2 {
        return 100.0;
    }
    let stabilities: Vec<f64> = snapshots
        .windows(2)
        .map(|pair| {
            let instability = f64::from(
                (pair[1].happiness - pair[0].happiness).abs()
                    + (pair[1].health - pair[0].health).abs()
                    + (pair[1].energy - pair[0].energy).abs(),
            );
            (100.0 - instability / MAX_PAIR_INSTABILITY * 100.0).clamp(0.0, 100.0)
        })
        .collect();
    mean(&stabilities).clamp(0.0, 100.0)
}

/// Coefficient of variation of weekly spending, scaled to `[0,100]`. Zero
/// penalty with no spending or a zero mean.
#[must_use]
pub fn volatility_score(weekly_spending: &[i64]) -> f64 {
    if weekly_spending.is_empty() {
        return 0.0;
    }
    let values: Vec<f64> = weekly_spending.iter().map(|&v| i64_to_f64(v)).collect();
    let spend_mean = mean(&values);
    if spend_mean == 0.0 {
        return 0.0;
    }
    (stddev_population(&values) / spend_mean * 100.0).clamp(0.0, 100.0)
}

/// Compute the full breakdown: weighted components, the clamped rounded
/// final score and its classification tier.
#[must_use]
pub fn compute(inputs: &ScoreInputs<'_>) -> ScoreBreakdown {
    let wellbeing = wellbeing_score(inputs.snapshots);
    let financial = financial_score(inputs.preventive_spent, inputs.reactive_spent);
    let consistency = consistency_score(inputs.snapshots);
    let volatility = volatility_score(inputs.weekly_spending);

    let raw = SCORE_WEIGHT_WELLBEING * wellbeing
        + SCORE_WEIGHT_FINANCIAL * financial
        + SCORE_WEIGHT_CONSISTENCY * consistency
        - SCORE_WEIGHT_VOLATILITY * volatility;
    let final_score = round_f64_to_i32(raw).clamp(0, 100);

    ScoreBreakdown {
        wellbeing: round_f64_to_i32(wellbeing),
        financial: round_f64_to_i32(financial),
        consistency: round_f64_to_i32(consistency),
        volatility: round_f64_to_i32(volatility),
        final_score,
        classification: OwnerTier::classify(final_score),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let len = values.len() as f64;
    values.iter().sum::<f64>() / len
}

fn stddev_population(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    #[allow(clippy::cast_precision_loss)]
    let len = values.len() as f64;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / len;
    variance.sqrt()
}
