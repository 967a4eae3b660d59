//! Centralized balance and tuning constants for PetPal game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Stat bounds and baseline ---------------------------------------------------
pub(crate) const STAT_MIN: i32 = 0;
pub(crate) const STAT_MAX: i32 = 100;
pub(crate) const BASE_HUNGER: i32 = 80;
pub(crate) const BASE_HAPPINESS: i32 = 70;
pub(crate) const BASE_ENERGY: i32 = 80;
pub(crate) const BASE_HEALTH: i32 = 80;
pub(crate) const BASE_HYGIENE: i32 = 70;

// Decay tick -----------------------------------------------------------------
pub(crate) const DECAY_HUNGER: i32 = 5;
pub(crate) const DECAY_HAPPINESS: i32 = 3;
pub(crate) const DECAY_ENERGY: i32 = 2;
pub(crate) const DECAY_HYGIENE: i32 = 2;
pub(crate) const HUNGER_PENALTY_SEVERE_BELOW: i32 = 30;
pub(crate) const HUNGER_PENALTY_SEVERE: i32 = 5;
pub(crate) const HUNGER_PENALTY_MILD_BELOW: i32 = 50;
pub(crate) const HUNGER_PENALTY_MILD: i32 = 2;
pub(crate) const HYGIENE_PENALTY_SEVERE_BELOW: i32 = 30;
pub(crate) const HYGIENE_PENALTY_SEVERE: i32 = 3;
pub(crate) const HYGIENE_PENALTY_MILD_BELOW: i32 = 50;
pub(crate) const HYGIENE_PENALTY_MILD: i32 = 1;
pub(crate) const CRITICAL_HEALTH: i32 = 20;

// Mood derivation ------------------------------------------------------------
pub(crate) const MOOD_WEIGHT_HUNGER: f64 = 0.30;
pub(crate) const MOOD_WEIGHT_HAPPINESS: f64 = 0.30;
pub(crate) const MOOD_WEIGHT_HEALTH: f64 = 0.25;
pub(crate) const MOOD_WEIGHT_ENERGY: f64 = 0.10;
pub(crate) const MOOD_WEIGHT_HYGIENE: f64 = 0.05;
pub(crate) const MOOD_SICK_HEALTH_BELOW: i32 = 30;
pub(crate) const MOOD_TIRED_ENERGY_BELOW: i32 = 25;
pub(crate) const MOOD_ENERGETIC_ENERGY_ABOVE: i32 = 85;
pub(crate) const MOOD_HAPPY_WEIGHTED_ABOVE: f64 = 75.0;
pub(crate) const MOOD_SAD_WEIGHTED_BELOW: f64 = 40.0;

// Evolution ------------------------------------------------------------------
pub(crate) const STAGE_TEEN_AGE: u32 = 5;
pub(crate) const STAGE_ADULT_AGE: u32 = 10;

// Player actions -------------------------------------------------------------
pub(crate) const REST_ENERGY_BOOST: i32 = 20;
pub(crate) const CLEAN_COST: i64 = 2;
pub(crate) const CLEAN_HYGIENE_BOOST: i32 = 30;
pub(crate) const TRICK_COST: i64 = 10;
pub(crate) const FULL_TREATMENT_BONUS: i32 = 10;
pub(crate) const MYSTERY_SNACK_LOW: i32 = 5;
pub(crate) const MYSTERY_SNACK_HIGH: i32 = 25;

// Name tokens ----------------------------------------------------------------
pub(crate) const PET_NAME_MAX_LEN: usize = 20;
pub(crate) const OWNER_NAME_MAX_LEN: usize = 30;
pub(crate) const TRICK_NAME_MAX_LEN: usize = 20;

// Budget ---------------------------------------------------------------------
pub(crate) const BUDGET_MIN: i64 = 50;
pub(crate) const BUDGET_MAX: i64 = 500;
pub(crate) const BUDGET_STEP: i64 = 10;
pub(crate) const STARTING_BUDGET: i64 = 200;

// Weekly schedule ------------------------------------------------------------
pub(crate) const DECAY_INTERVAL_SECS: u64 = 4;
pub(crate) const AGE_INTERVAL_SECS: u64 = 60;
pub(crate) const WEEK_DURATION_SECS: u64 = 90;
pub(crate) const TOTAL_WEEKS: u32 = 12;
pub(crate) const WEEKLY_BILL: i64 = 20;
pub(crate) const SALARY_FULL_HEALTH_MIN: i32 = 70;
pub(crate) const SALARY_FULL: i64 = 30;
pub(crate) const SALARY_PARTIAL_HEALTH_MIN: i32 = 40;
pub(crate) const SALARY_PARTIAL: i64 = 15;

// Scoring --------------------------------------------------------------------
pub(crate) const SCORE_WEIGHT_WELLBEING: f64 = 0.4;
pub(crate) const SCORE_WEIGHT_FINANCIAL: f64 = 0.3;
pub(crate) const SCORE_WEIGHT_CONSISTENCY: f64 = 0.2;
pub(crate) const SCORE_WEIGHT_VOLATILITY: f64 = 0.1;
pub(crate) const SCORE_NEUTRAL: f64 = 50.0;
pub(crate) const MAX_PAIR_INSTABILITY: f64 = 300.0;
