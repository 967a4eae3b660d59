//! Pet state: profile, decay, player actions and the action log.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::catalog::{FoodId, FoodItem, ToyItem, VetId, VetOption};
use crate::constants::{
    CLEAN_COST, CLEAN_HYGIENE_BOOST, CRITICAL_HEALTH, DECAY_ENERGY, DECAY_HAPPINESS, DECAY_HUNGER,
    DECAY_HYGIENE, FULL_TREATMENT_BONUS, HUNGER_PENALTY_MILD, HUNGER_PENALTY_MILD_BELOW,
    HUNGER_PENALTY_SEVERE, HUNGER_PENALTY_SEVERE_BELOW, HYGIENE_PENALTY_MILD,
    HYGIENE_PENALTY_MILD_BELOW, HYGIENE_PENALTY_SEVERE, HYGIENE_PENALTY_SEVERE_BELOW,
    MYSTERY_SNACK_HIGH, MYSTERY_SNACK_LOW, REST_ENERGY_BOOST, TRICK_COST, TRICK_NAME_MAX_LEN,
};
use crate::rng::RngBundle;
use crate::stats::{Mood, PetStats, Stage, StatKind, derive_mood, stage_for_age};
use crate::validate::{
    NameCharset, ValidationError, validate_affordability, validate_bounded_delta,
    validate_name_token, validate_unique,
};

/// Closed set of adoptable species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeciesId {
    #[default]
    Dog,
    Cat,
    Rabbit,
    Hamster,
    Dragon,
    Axolotl,
}

impl SpeciesId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
            Self::Rabbit => "rabbit",
            Self::Hamster => "hamster",
            Self::Dragon => "dragon",
            Self::Axolotl => "axolotl",
        }
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpeciesId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dog" => Ok(Self::Dog),
            "cat" => Ok(Self::Cat),
            "rabbit" => Ok(Self::Rabbit),
            "hamster" => Ok(Self::Hamster),
            "dragon" => Ok(Self::Dragon),
            "axolotl" => Ok(Self::Axolotl),
            _ => Err(()),
        }
    }
}

/// Identity and read-mostly attributes of one pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetProfile {
    pub name: String,
    pub species: SpeciesId,
    pub owner_name: String,
    /// Cosmetic customization; opaque to the core.
    #[serde(default)]
    pub customization: serde_json::Value,
    pub stage: Stage,
    pub age: u32,
    #[serde(default)]
    pub tricks: Vec<String>,
    #[serde(default)]
    pub minigames_played: u32,
    /// Sticky: set once health ever drops below the critical threshold,
    /// never cleared within a session.
    #[serde(default)]
    pub health_crisis: bool,
}

/// Action kind for the human-readable activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Feed,
    Play,
    Rest,
    Clean,
    Vet,
    Trick,
}

impl ActionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Rest => "rest",
            Self::Clean => "clean",
            Self::Vet => "vet",
            Self::Trick => "trick",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the unvalidated activity log; `at` is elapsed session time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub action: ActionKind,
    pub cost: i64,
    pub note: String,
    pub at: Duration,
}

/// Stat deltas applied by one decay tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecayOutcome {
    pub hunger_delta: i32,
    pub happiness_delta: i32,
    pub energy_delta: i32,
    pub hygiene_delta: i32,
    pub health_delta: i32,
}

/// Effects applied by a successful feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedReceipt {
    pub item: FoodId,
    pub cost: i64,
    pub hunger_delta: i32,
    pub happiness_delta: i32,
}

/// Effects applied by a successful play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayReceipt {
    pub item: String,
    pub cost: i64,
    pub happiness_delta: i32,
    pub energy_delta: i32,
}

/// Effects applied by a successful rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestReceipt {
    pub energy_delta: i32,
}

/// Effects applied by a successful clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanReceipt {
    pub cost: i64,
    pub hygiene_delta: i32,
}

/// Effects applied by a successful vet visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VetReceipt {
    pub option: VetId,
    pub cost: i64,
    pub health_delta: i32,
    /// Uniform bonus requested for the other four stats (full treatment).
    pub bonus_delta: i32,
}

/// Effects applied by a successfully learned trick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickReceipt {
    pub name: String,
    pub cost: i64,
}

/// One pet: profile, stat vector, derived mood and the activity log.
///
/// Action methods validate every sub-delta before applying any of them; a
/// rejected call leaves the pet untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub profile: PetProfile,
    pub stats: PetStats,
    pub mood: Mood,
    #[serde(default)]
    pub action_log: Vec<ActionLogEntry>,
}

impl Pet {
    /// Create a pet at the baseline stat vector.
    #[must_use]
    pub fn new(
        name: String,
        species: SpeciesId,
        owner_name: String,
        customization: serde_json::Value,
    ) -> Self {
        let stats = PetStats::default();
        let mood = derive_mood(&stats);
        Self {
            profile: PetProfile {
                name,
                species,
                owner_name,
                customization,
                stage: stage_for_age(0),
                age: 0,
                tricks: Vec::new(),
                minigames_played: 0,
                health_crisis: false,
            },
            stats,
            mood,
            action_log: Vec::new(),
        }
    }

    /// Recompute mood and the sticky crisis flag after any stat change.
    fn after_stat_change(&mut self) {
        self.mood = derive_mood(&self.stats);
        if self.stats.health < CRITICAL_HEALTH {
            self.profile.health_crisis = true;
        }
    }

    fn log_action(&mut self, action: ActionKind, cost: i64, note: String, at: Duration) {
        self.action_log.push(ActionLogEntry {
            action,
            cost,
            note,
            at,
        });
    }

    /// Apply one decay tick. Scheduler-invoked, never player-invoked, and
    /// never rejects: each stat is independently clamped.
    ///
    /// The health penalty tiers read hunger and hygiene as they stood at
    /// tick entry, before this tick's decay.
    pub fn apply_decay_tick(&mut self) -> DecayOutcome {
        let hunger_before = self.stats.hunger;
        let hygiene_before = self.stats.hygiene;

        let hunger_delta = self.stats.apply_clamped(StatKind::Hunger, -DECAY_HUNGER);
        let happiness_delta = self.stats.apply_clamped(StatKind::Happiness, -DECAY_HAPPINESS);
        let energy_delta = self.stats.apply_clamped(StatKind::Energy, -DECAY_ENERGY);
        let hygiene_delta = self.stats.apply_clamped(StatKind::Hygiene, -DECAY_HYGIENE);

        let penalty = hunger_penalty(hunger_before) + hygiene_penalty(hygiene_before);
        let health_delta = if penalty > 0 {
            self.stats.apply_clamped(StatKind::Health, -penalty)
        } else {
            0
        };

        self.after_stat_change();
        DecayOutcome {
            hunger_delta,
            happiness_delta,
            energy_delta,
            hygiene_delta,
            health_delta,
        }
    }

    /// Advance the age counter and re-derive the evolution stage. Runs on
    /// its own slower clock than stat decay.
    pub fn advance_age(&mut self) {
        self.profile.age += 1;
        self.profile.stage = stage_for_age(self.profile.age);
    }

    /// Feed the pet a food item.
    ///
    /// The mystery snack resolves its hunger restore through the injected
    /// `feed` RNG stream with a 50/50 split between the two fixed amounts.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Unaffordable`] against the supplied wallet, or
    /// [`ValidationError::OutOfRange`] when a delta cannot be realized; no
    /// partial mutation either way.
    pub fn feed(
        &mut self,
        item: &FoodItem,
        wallet: i64,
        rng: &RngBundle,
        at: Duration,
    ) -> Result<FeedReceipt, ValidationError> {
        validate_affordability(item.cost, wallet)?;

        let hunger_boost = if item.id == FoodId::MysterySnack {
            if rng.feed().gen_bool(0.5) {
                MYSTERY_SNACK_HIGH
            } else {
                MYSTERY_SNACK_LOW
            }
        } else {
            item.hunger_restore
        };
        let hunger_delta = validate_bounded_delta(self.stats.hunger, hunger_boost)?;
        let happiness_delta = validate_bounded_delta(self.stats.happiness, item.happiness_bonus)?;

        self.stats.apply_exact(StatKind::Hunger, hunger_delta);
        self.stats.apply_exact(StatKind::Happiness, happiness_delta);
        self.after_stat_change();

        let note = format!("Fed {} a {}.", self.profile.name, item.name);
        self.log_action(ActionKind::Feed, item.cost, note, at);
        Ok(FeedReceipt {
            item: item.id,
            cost: item.cost,
            hunger_delta,
            happiness_delta,
        })
    }

    /// Play with the pet using a toy item.
    ///
    /// # Errors
    ///
    /// Same contract as [`Pet::feed`].
    pub fn play(
        &mut self,
        item: &ToyItem,
        wallet: i64,
        at: Duration,
    ) -> Result<PlayReceipt, ValidationError> {
        validate_affordability(item.cost, wallet)?;

        let happiness_delta = validate_bounded_delta(self.stats.happiness, item.happiness_restore)?;
        let energy_delta = validate_bounded_delta(self.stats.energy, -item.energy_cost)?;

        self.stats.apply_exact(StatKind::Happiness, happiness_delta);
        self.stats.apply_exact(StatKind::Energy, energy_delta);
        self.after_stat_change();

        let note = format!("Played with {} using {}.", self.profile.name, item.name);
        self.log_action(ActionKind::Play, item.cost, note, at);
        Ok(PlayReceipt {
            item: item.name.clone(),
            cost: item.cost,
            happiness_delta,
            energy_delta,
        })
    }

    /// Let the pet rest. Free of charge.
    ///
    /// # Errors
    ///
    /// [`ValidationError::OutOfRange`] only when energy is already at the
    /// maximum.
    pub fn rest(&mut self, at: Duration) -> Result<RestReceipt, ValidationError> {
        let energy_delta = validate_bounded_delta(self.stats.energy, REST_ENERGY_BOOST)?;
        self.stats.apply_exact(StatKind::Energy, energy_delta);
        self.after_stat_change();

        let note = format!("{} took a power nap.", self.profile.name);
        self.log_action(ActionKind::Rest, 0, note, at);
        Ok(RestReceipt { energy_delta })
    }

    /// Clean the pet for a fixed cost.
    ///
    /// # Errors
    ///
    /// Same contract as [`Pet::feed`].
    pub fn clean(&mut self, wallet: i64, at: Duration) -> Result<CleanReceipt, ValidationError> {
        validate_affordability(CLEAN_COST, wallet)?;
        let hygiene_delta = validate_bounded_delta(self.stats.hygiene, CLEAN_HYGIENE_BOOST)?;
        self.stats.apply_exact(StatKind::Hygiene, hygiene_delta);
        self.after_stat_change();

        let note = format!("{} got a fresh clean.", self.profile.name);
        self.log_action(ActionKind::Clean, CLEAN_COST, note, at);
        Ok(CleanReceipt {
            cost: CLEAN_COST,
            hygiene_delta,
        })
    }

    /// Visit the vet. The full-treatment variant additionally grants a
    /// small uniform bonus to hunger, happiness, energy and hygiene; all
    /// four bonus deltas must validate or the whole call is rejected.
    ///
    /// # Errors
    ///
    /// Same contract as [`Pet::feed`].
    pub fn visit_vet(
        &mut self,
        option: &VetOption,
        wallet: i64,
        at: Duration,
    ) -> Result<VetReceipt, ValidationError> {
        validate_affordability(option.cost, wallet)?;
        let health_delta = validate_bounded_delta(self.stats.health, option.health_restore)?;

        let bonus = match option.id {
            VetId::FullTreatment => FULL_TREATMENT_BONUS,
            VetId::Checkup => 0,
        };
        let hunger_delta = validate_bounded_delta(self.stats.hunger, bonus)?;
        let happiness_delta = validate_bounded_delta(self.stats.happiness, bonus)?;
        let energy_delta = validate_bounded_delta(self.stats.energy, bonus)?;
        let hygiene_delta = validate_bounded_delta(self.stats.hygiene, bonus)?;

        self.stats.apply_exact(StatKind::Health, health_delta);
        self.stats.apply_exact(StatKind::Hunger, hunger_delta);
        self.stats.apply_exact(StatKind::Happiness, happiness_delta);
        self.stats.apply_exact(StatKind::Energy, energy_delta);
        self.stats.apply_exact(StatKind::Hygiene, hygiene_delta);
        self.after_stat_change();

        let note = format!("{} received {}.", self.profile.name, option.name);
        self.log_action(ActionKind::Vet, option.cost, note, at);
        Ok(VetReceipt {
            option: option.id,
            cost: option.cost,
            health_delta,
            bonus_delta: bonus,
        })
    }

    /// Teach the pet a new trick for a fixed cost.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Unaffordable`], [`ValidationError::InvalidFormat`]
    /// or [`ValidationError::Duplicate`]; no partial mutation.
    pub fn teach_trick(
        &mut self,
        name: &str,
        wallet: i64,
        at: Duration,
    ) -> Result<TrickReceipt, ValidationError> {
        validate_affordability(TRICK_COST, wallet)?;
        let trimmed = validate_name_token(name, TRICK_NAME_MAX_LEN, NameCharset::Punctuated)?;
        validate_unique(&trimmed, &self.profile.tricks)?;

        self.profile.tricks.push(trimmed.clone());
        let note = format!("{} learned {}.", self.profile.name, trimmed);
        self.log_action(ActionKind::Trick, TRICK_COST, note, at);
        Ok(TrickReceipt {
            name: trimmed,
            cost: TRICK_COST,
        })
    }

    /// Record one minigame play.
    pub fn record_minigame(&mut self) {
        self.profile.minigames_played += 1;
    }
}

const fn hunger_penalty(hunger: i32) -> i32 {
    if hunger < HUNGER_PENALTY_SEVERE_BELOW {
        HUNGER_PENALTY_SEVERE
    } else if hunger < HUNGER_PENALTY_MILD_BELOW {
        HUNGER_PENALTY_MILD
    } else {
        0
    }
}

const fn hygiene_penalty(hygiene: i32) -> i32 {
    if hygiene < HYGIENE_PENALTY_SEVERE_BELOW {
        HYGIENE_PENALTY_SEVERE
    } else if hygiene < HYGIENE_PENALTY_MILD_BELOW {
        HYGIENE_PENALTY_MILD
    } else {
        0
    }
}
