//! Dual-clock scheduler driving decay, aging and the weekly pipeline.
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    AGE_INTERVAL_SECS, DECAY_INTERVAL_SECS, SALARY_FULL, SALARY_FULL_HEALTH_MIN, SALARY_PARTIAL,
    SALARY_PARTIAL_HEALTH_MIN, TOTAL_WEEKS, WEEK_DURATION_SECS, WEEKLY_BILL,
};
use crate::finance::FinanceLedger;
use crate::pet::Pet;
use crate::scoring::{SnapshotHistory, WeekSnapshot};

/// Cadence and billing configuration for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "ScheduleConfig::default_decay_interval")]
    pub decay_interval: Duration,
    #[serde(default = "ScheduleConfig::default_age_interval")]
    pub age_interval: Duration,
    #[serde(default = "ScheduleConfig::default_week_duration")]
    pub week_duration: Duration,
    #[serde(default = "ScheduleConfig::default_total_weeks")]
    pub total_weeks: u32,
    #[serde(default = "ScheduleConfig::default_weekly_bill")]
    pub weekly_bill: i64,
}

impl ScheduleConfig {
    const fn default_decay_interval() -> Duration {
        Duration::from_secs(DECAY_INTERVAL_SECS)
    }

    const fn default_age_interval() -> Duration {
        Duration::from_secs(AGE_INTERVAL_SECS)
    }

    const fn default_week_duration() -> Duration {
        Duration::from_secs(WEEK_DURATION_SECS)
    }

    const fn default_total_weeks() -> u32 {
        TOTAL_WEEKS
    }

    const fn default_weekly_bill() -> i64 {
        WEEKLY_BILL
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            decay_interval: Self::default_decay_interval(),
            age_interval: Self::default_age_interval(),
            week_duration: Self::default_week_duration(),
            total_weeks: Self::default_total_weeks(),
            weekly_bill: Self::default_weekly_bill(),
        }
    }
}

/// Session lifecycle phase. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Active,
    Ended,
}

/// Salary earned for the coming week, tiered on current health.
#[must_use]
pub const fn salary_for_health(health: i32) -> i64 {
    if health >= SALARY_FULL_HEALTH_MIN {
        SALARY_FULL
    } else if health >= SALARY_PARTIAL_HEALTH_MIN {
        SALARY_PARTIAL
    } else {
        0
    }
}

/// Payload produced by one week boundary for the reporting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekReport {
    pub completed_week: u32,
    pub next_week: u32,
    pub salary: i64,
    pub bill: i64,
    pub pet_health: i32,
    pub game_over: bool,
}

/// Events applied by one `tick` call.
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub decay_ticks: u32,
    pub age_ticks: u32,
    pub reports: Vec<WeekReport>,
    pub ended: bool,
}

/// Week scheduler: accumulates externally supplied deltas onto two fast
/// clocks (decay, aging) and the week clock, firing the weekly pipeline on
/// each boundary.
///
/// Within one boundary the five sub-steps run in a fixed order: snapshot,
/// close the spending week, charge the bill, pay the health-tiered salary,
/// advance the week counter. Salary must read health before the next week's
/// decay, and the snapshot must precede the accumulator reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekScheduler {
    #[serde(default)]
    pub config: ScheduleConfig,
    week: u32,
    phase: SessionPhase,
    elapsed_total: Duration,
    decay_elapsed: Duration,
    age_elapsed: Duration,
    week_elapsed: Duration,
}

impl WeekScheduler {
    #[must_use]
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            config,
            week: 1,
            phase: SessionPhase::Active,
            elapsed_total: Duration::ZERO,
            decay_elapsed: Duration::ZERO,
            age_elapsed: Duration::ZERO,
            week_elapsed: Duration::ZERO,
        }
    }

    /// Current week number, starting at 1.
    #[must_use]
    pub const fn week(&self) -> u32 {
        self.week
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    /// Elapsed session time; the clock every log timestamp derives from.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.elapsed_total
    }

    /// Time left until the next week boundary.
    #[must_use]
    pub fn time_remaining(&self) -> Duration {
        self.config.week_duration.saturating_sub(self.week_elapsed)
    }

    /// Stop the clocks and return to week 1. The session wrapper resets the
    /// state containers; this only rewinds the scheduler itself.
    pub fn reset(&mut self) {
        self.week = 1;
        self.phase = SessionPhase::Active;
        self.elapsed_total = Duration::ZERO;
        self.decay_elapsed = Duration::ZERO;
        self.age_elapsed = Duration::ZERO;
        self.week_elapsed = Duration::ZERO;
    }

    /// Advance the simulation by `delta`, applying every decay tick, age
    /// tick and week boundary the elapsed time covers.
    ///
    /// A tick against an ended session is a no-op; the guard runs before
    /// any clock moves, so a tick that fires after reset or session end
    /// cannot apply an in-flight mutation.
    pub fn tick(
        &mut self,
        delta: Duration,
        pet: &mut Pet,
        ledger: &mut FinanceLedger,
        snapshots: &mut SnapshotHistory,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.is_ended() {
            return outcome;
        }

        self.elapsed_total += delta;
        self.decay_elapsed += delta;
        self.age_elapsed += delta;
        self.week_elapsed += delta;

        while self.decay_elapsed >= self.config.decay_interval {
            self.decay_elapsed -= self.config.decay_interval;
            pet.apply_decay_tick();
            outcome.decay_ticks += 1;
        }

        while self.age_elapsed >= self.config.age_interval {
            self.age_elapsed -= self.config.age_interval;
            pet.advance_age();
            outcome.age_ticks += 1;
        }

        while self.week_elapsed >= self.config.week_duration && !self.is_ended() {
            self.week_elapsed -= self.config.week_duration;
            let report = self.close_week_boundary(pet, ledger, snapshots);
            let over = report.game_over;
            outcome.reports.push(report);
            if over {
                outcome.ended = true;
            }
        }

        outcome
    }

    /// The five ordered sub-steps of a week boundary, plus the terminal
    /// extra snapshot when the session ends.
    fn close_week_boundary(
        &mut self,
        pet: &mut Pet,
        ledger: &mut FinanceLedger,
        snapshots: &mut SnapshotHistory,
    ) -> WeekReport {
        let completed_week = self.week;

        // (1) snapshot before the accumulator resets
        snapshots.push(WeekSnapshot::of(&pet.stats));
        // (2) close the spending week
        ledger.close_week();
        // (3) recurring bill, unconditionally
        ledger.charge_bill(
            self.config.weekly_bill,
            &format!("Week {completed_week} living costs"),
            self.elapsed_total,
        );
        // (4) salary from health as it stands now
        let salary = salary_for_health(pet.stats.health);
        if salary > 0 {
            ledger.earn(
                salary,
                &format!("Week {completed_week} salary"),
                self.elapsed_total,
            );
        }
        // (5) advance the counter
        self.week += 1;
        // (6) terminal check; keep the last week's post-boundary state
        let game_over = self.week > self.config.total_weeks;
        if game_over {
            self.phase = SessionPhase::Ended;
            snapshots.push(WeekSnapshot::of(&pet.stats));
            ledger.close_week();
        }

        WeekReport {
            completed_week,
            next_week: self.week,
            salary,
            bill: self.config.weekly_bill,
            pet_health: pet.stats.health,
            game_over,
        }
    }
}

impl Default for WeekScheduler {
    fn default() -> Self {
        Self::new(ScheduleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::SpeciesId;

    fn fixtures() -> (Pet, FinanceLedger, SnapshotHistory) {
        let pet = Pet::new(
            "Rex".to_string(),
            SpeciesId::Dog,
            "Sam".to_string(),
            serde_json::Value::Null,
        );
        let ledger = FinanceLedger::new(200).unwrap();
        (pet, ledger, SnapshotHistory::new())
    }

    #[test]
    fn salary_tiers_follow_health() {
        assert_eq!(salary_for_health(100), 30);
        assert_eq!(salary_for_health(70), 30);
        assert_eq!(salary_for_health(69), 15);
        assert_eq!(salary_for_health(40), 15);
        assert_eq!(salary_for_health(39), 0);
    }

    #[test]
    fn decay_clock_fires_per_interval() {
        let (mut pet, mut ledger, mut snapshots) = fixtures();
        let mut scheduler = WeekScheduler::default();
        let outcome = scheduler.tick(
            Duration::from_secs(9),
            &mut pet,
            &mut ledger,
            &mut snapshots,
        );
        assert_eq!(outcome.decay_ticks, 2);
        assert_eq!(pet.stats.hunger, 70);
        assert!(outcome.reports.is_empty());
        // one second of remainder carries over
        let outcome = scheduler.tick(
            Duration::from_secs(3),
            &mut pet,
            &mut ledger,
            &mut snapshots,
        );
        assert_eq!(outcome.decay_ticks, 1);
    }

    #[test]
    fn age_clock_is_slower_than_decay() {
        let (mut pet, mut ledger, mut snapshots) = fixtures();
        let mut scheduler = WeekScheduler::default();
        scheduler.tick(
            Duration::from_secs(59),
            &mut pet,
            &mut ledger,
            &mut snapshots,
        );
        assert_eq!(pet.profile.age, 0);
        scheduler.tick(
            Duration::from_secs(1),
            &mut pet,
            &mut ledger,
            &mut snapshots,
        );
        assert_eq!(pet.profile.age, 1);
    }

    #[test]
    fn week_boundary_runs_the_pipeline_in_order() {
        let (mut pet, mut ledger, mut snapshots) = fixtures();
        pet.stats.health = 80;
        ledger
            .spend(
                12,
                crate::finance::ExpenseCategory::Food,
                "Gourmet Feast",
                crate::finance::SpendKind::Preventive,
                Duration::ZERO,
            )
            .unwrap();

        let mut scheduler = WeekScheduler::new(ScheduleConfig {
            // decay quiet for this test
            decay_interval: Duration::from_secs(1_000_000),
            age_interval: Duration::from_secs(1_000_000),
            ..ScheduleConfig::default()
        });
        let outcome = scheduler.tick(
            Duration::from_secs(90),
            &mut pet,
            &mut ledger,
            &mut snapshots,
        );

        assert_eq!(outcome.reports.len(), 1);
        let report = outcome.reports[0];
        assert_eq!(report.completed_week, 1);
        assert_eq!(report.next_week, 2);
        assert_eq!(report.salary, 30);
        assert_eq!(report.bill, 20);
        assert!(!report.game_over);

        // snapshot taken before the accumulator reset
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].health, 80);
        assert_eq!(ledger.weekly_spending.as_slice(), &[12]);
        assert_eq!(ledger.current_week_spending, 0);
        // 200 - 12 spend - 20 bill + 30 salary
        assert_eq!(ledger.wallet, 198);
        assert_eq!(scheduler.week(), 2);
    }

    #[test]
    fn no_salary_below_the_partial_tier() {
        let (mut pet, mut ledger, mut snapshots) = fixtures();
        pet.stats.health = 30;
        let mut scheduler = WeekScheduler::new(ScheduleConfig {
            decay_interval: Duration::from_secs(1_000_000),
            age_interval: Duration::from_secs(1_000_000),
            ..ScheduleConfig::default()
        });
        let outcome = scheduler.tick(
            Duration::from_secs(90),
            &mut pet,
            &mut ledger,
            &mut snapshots,
        );
        assert_eq!(outcome.reports[0].salary, 0);
        assert_eq!(ledger.total_income(), 0);
        assert_eq!(ledger.wallet, 180);
    }

    #[test]
    fn final_boundary_ends_the_session_with_an_extra_snapshot() {
        let (mut pet, mut ledger, mut snapshots) = fixtures();
        let mut scheduler = WeekScheduler::new(ScheduleConfig {
            decay_interval: Duration::from_secs(1_000_000),
            age_interval: Duration::from_secs(1_000_000),
            week_duration: Duration::from_secs(10),
            total_weeks: 2,
            ..ScheduleConfig::default()
        });

        let outcome = scheduler.tick(
            Duration::from_secs(10),
            &mut pet,
            &mut ledger,
            &mut snapshots,
        );
        assert!(!outcome.ended);
        assert_eq!(snapshots.len(), 1);

        let outcome = scheduler.tick(
            Duration::from_secs(10),
            &mut pet,
            &mut ledger,
            &mut snapshots,
        );
        assert!(outcome.ended);
        assert!(scheduler.is_ended());
        assert!(outcome.reports[0].game_over);
        // boundary snapshot plus the terminal extra one
        assert_eq!(snapshots.len(), 3);
        assert_eq!(ledger.weekly_spending.len(), 3);

        // ticks after the end are no-ops
        let wallet = ledger.wallet;
        let outcome = scheduler.tick(
            Duration::from_secs(60),
            &mut pet,
            &mut ledger,
            &mut snapshots,
        );
        assert_eq!(outcome.decay_ticks, 0);
        assert!(outcome.reports.is_empty());
        assert_eq!(ledger.wallet, wallet);
        assert_eq!(scheduler.now(), Duration::from_secs(20));
    }

    #[test]
    fn one_large_delta_fires_multiple_boundaries() {
        let (mut pet, mut ledger, mut snapshots) = fixtures();
        let mut scheduler = WeekScheduler::new(ScheduleConfig {
            decay_interval: Duration::from_secs(1_000_000),
            age_interval: Duration::from_secs(1_000_000),
            week_duration: Duration::from_secs(10),
            total_weeks: 12,
            ..ScheduleConfig::default()
        });
        let outcome = scheduler.tick(
            Duration::from_secs(35),
            &mut pet,
            &mut ledger,
            &mut snapshots,
        );
        assert_eq!(outcome.reports.len(), 3);
        assert_eq!(scheduler.week(), 4);
        assert_eq!(scheduler.time_remaining(), Duration::from_secs(5));
    }

    #[test]
    fn reset_rewinds_clocks_and_phase() {
        let (mut pet, mut ledger, mut snapshots) = fixtures();
        let mut scheduler = WeekScheduler::new(ScheduleConfig {
            week_duration: Duration::from_secs(10),
            total_weeks: 1,
            ..ScheduleConfig::default()
        });
        scheduler.tick(
            Duration::from_secs(10),
            &mut pet,
            &mut ledger,
            &mut snapshots,
        );
        assert!(scheduler.is_ended());
        scheduler.reset();
        assert!(!scheduler.is_ended());
        assert_eq!(scheduler.week(), 1);
        assert_eq!(scheduler.now(), Duration::ZERO);
        assert_eq!(scheduler.time_remaining(), Duration::from_secs(10));
    }
}
