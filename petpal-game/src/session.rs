//! Owned session object binding the pet, the ledger and the scheduler.
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::time::Duration;

use crate::catalog::{FoodId, ItemCatalog, ToyId, VetId};
use crate::constants::{OWNER_NAME_MAX_LEN, PET_NAME_MAX_LEN, STARTING_BUDGET};
use crate::finance::{ExpenseCategory, FinanceLedger, SpendKind};
use crate::pet::{
    CleanReceipt, FeedReceipt, Pet, PlayReceipt, RestReceipt, SpeciesId, TrickReceipt, VetReceipt,
};
use crate::rng::RngBundle;
use crate::schedule::{ScheduleConfig, SessionPhase, TickOutcome, WeekScheduler};
use crate::scoring::{ScoreBreakdown, ScoreInputs, SnapshotHistory, compute};
use crate::validate::{
    NameCharset, ValidationError, validate_budget, validate_name_token,
};

fn default_budget() -> i64 {
    STARTING_BUDGET
}

/// Player-supplied setup for a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub pet_name: String,
    #[serde(default)]
    pub species: SpeciesId,
    pub owner_name: String,
    /// Cosmetic blob; the core stores it untouched.
    #[serde(default)]
    pub customization: serde_json::Value,
    #[serde(default = "default_budget")]
    pub starting_budget: i64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl SessionConfig {
    /// Validate the player-controlled fields and return the trimmed names.
    ///
    /// # Errors
    ///
    /// Returns the first failing name or budget validation.
    fn validated_names(&self) -> Result<(String, String), ValidationError> {
        let pet_name = validate_name_token(&self.pet_name, PET_NAME_MAX_LEN, NameCharset::Plain)?;
        let owner_name =
            validate_name_token(&self.owner_name, OWNER_NAME_MAX_LEN, NameCharset::Punctuated)?;
        validate_budget(self.starting_budget)?;
        Ok((pet_name, owner_name))
    }
}

/// Everything a session persists; the RNG bundle is rebuilt from the seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub config: SessionConfig,
    pub pet: Pet,
    pub finances: FinanceLedger,
    #[serde(default)]
    pub snapshots: SnapshotHistory,
    #[serde(default)]
    pub scheduler: WeekScheduler,
}

/// One running game session.
///
/// The session owns the three state containers (pet, finances, snapshot
/// history) plus the scheduler and the RNG bundle, so concurrent sessions
/// and clean teardown come for free. Action entry points pair the pet
/// mutation with the matching ledger spend; both validate before either
/// mutates.
#[derive(Debug, Clone)]
pub struct PetSession {
    state: SessionState,
    catalog: ItemCatalog,
    rng: Rc<RngBundle>,
}

impl PetSession {
    /// Start a session from a validated config and an item catalog.
    ///
    /// # Errors
    ///
    /// Returns the first failing name or budget validation.
    pub fn new(config: SessionConfig, catalog: ItemCatalog) -> Result<Self, ValidationError> {
        let (pet_name, owner_name) = config.validated_names()?;
        let pet = Pet::new(
            pet_name,
            config.species,
            owner_name,
            config.customization.clone(),
        );
        let finances = FinanceLedger::new(config.starting_budget)?;
        let scheduler = WeekScheduler::new(config.schedule.clone());
        let rng = Rc::new(RngBundle::from_user_seed(config.seed));
        Ok(Self {
            state: SessionState {
                config,
                pet,
                finances,
                snapshots: SnapshotHistory::new(),
                scheduler,
            },
            catalog,
            rng,
        })
    }

    /// Rehydrate a session from a persisted state, rebuilding the RNG
    /// bundle from the stored seed.
    #[must_use]
    pub fn from_state(state: SessionState, catalog: ItemCatalog) -> Self {
        let rng = Rc::new(RngBundle::from_user_seed(state.config.seed));
        Self {
            state,
            catalog,
            rng,
        }
    }

    /// Advance the simulation. A tick against an ended or freshly reset
    /// session is a no-op (the scheduler guards before any clock moves).
    pub fn tick(&mut self, delta: Duration) -> TickOutcome {
        self.state.scheduler.tick(
            delta,
            &mut self.state.pet,
            &mut self.state.finances,
            &mut self.state.snapshots,
        )
    }

    /// Feed the pet by catalog id and record the expense.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidFormat`] for an out-of-catalog id, or the
    /// pet/ledger validation error; no partial mutation.
    pub fn feed(&mut self, id: FoodId) -> Result<FeedReceipt, ValidationError> {
        let item = self
            .catalog
            .food(id)
            .ok_or(ValidationError::InvalidFormat {
                reason: "food item is not in the catalog",
            })?
            .clone();
        let now = self.state.scheduler.now();
        let receipt = self
            .state
            .pet
            .feed(&item, self.state.finances.wallet, &self.rng, now)?;
        self.state.finances.spend(
            item.cost,
            ExpenseCategory::Food,
            &item.name,
            SpendKind::Preventive,
            now,
        )?;
        Ok(receipt)
    }

    /// Play with the pet by catalog id and record the expense.
    ///
    /// # Errors
    ///
    /// Same contract as [`PetSession::feed`].
    pub fn play(&mut self, id: ToyId) -> Result<PlayReceipt, ValidationError> {
        let item = self
            .catalog
            .toy(id)
            .ok_or(ValidationError::InvalidFormat {
                reason: "toy item is not in the catalog",
            })?
            .clone();
        let now = self.state.scheduler.now();
        let receipt = self.state.pet.play(&item, self.state.finances.wallet, now)?;
        self.state.finances.spend(
            item.cost,
            ExpenseCategory::Toys,
            &item.name,
            SpendKind::Preventive,
            now,
        )?;
        Ok(receipt)
    }

    /// Let the pet rest; free, so the ledger is untouched.
    ///
    /// # Errors
    ///
    /// [`ValidationError::OutOfRange`] when energy is already full.
    pub fn rest(&mut self) -> Result<RestReceipt, ValidationError> {
        let now = self.state.scheduler.now();
        self.state.pet.rest(now)
    }

    /// Clean the pet and record the fixed expense.
    ///
    /// # Errors
    ///
    /// Same contract as [`PetSession::feed`].
    pub fn clean(&mut self) -> Result<CleanReceipt, ValidationError> {
        let now = self.state.scheduler.now();
        let receipt = self.state.pet.clean(self.state.finances.wallet, now)?;
        self.state.finances.spend(
            receipt.cost,
            ExpenseCategory::Cleaning,
            "Bath time",
            SpendKind::Preventive,
            now,
        )?;
        Ok(receipt)
    }

    /// Visit the vet by catalog id. The full treatment is emergency care
    /// and lands in the reactive spending bucket; the checkup is routine.
    ///
    /// # Errors
    ///
    /// Same contract as [`PetSession::feed`].
    pub fn visit_vet(&mut self, id: VetId) -> Result<VetReceipt, ValidationError> {
        let option = self
            .catalog
            .vet_option(id)
            .ok_or(ValidationError::InvalidFormat {
                reason: "vet option is not in the catalog",
            })?
            .clone();
        let kind = match option.id {
            VetId::FullTreatment => SpendKind::Reactive,
            VetId::Checkup => SpendKind::Preventive,
        };
        let now = self.state.scheduler.now();
        let receipt = self
            .state
            .pet
            .visit_vet(&option, self.state.finances.wallet, now)?;
        self.state
            .finances
            .spend(option.cost, ExpenseCategory::Vet, &option.name, kind, now)?;
        Ok(receipt)
    }

    /// Teach the pet a trick and record the fixed expense.
    ///
    /// # Errors
    ///
    /// Same contract as [`PetSession::feed`], plus format and duplicate
    /// failures for the trick name.
    pub fn teach_trick(&mut self, name: &str) -> Result<TrickReceipt, ValidationError> {
        let now = self.state.scheduler.now();
        let receipt = self
            .state
            .pet
            .teach_trick(name, self.state.finances.wallet, now)?;
        self.state.finances.spend(
            receipt.cost,
            ExpenseCategory::Tricks,
            &receipt.name,
            SpendKind::Preventive,
            now,
        )?;
        Ok(receipt)
    }

    /// Add income from outside the core (minigame winnings and the like).
    pub fn earn(&mut self, amount: i64, source: &str) {
        let now = self.state.scheduler.now();
        self.state.finances.earn(amount, source, now);
    }

    /// Record one minigame play on the profile.
    pub fn record_minigame(&mut self) {
        self.state.pet.record_minigame();
    }

    /// Set the optional savings goal.
    ///
    /// # Errors
    ///
    /// [`ValidationError::SavingsGoal`] when out of range.
    pub fn set_savings_goal(&mut self, goal: i64) -> Result<(), ValidationError> {
        self.state.finances.set_savings_goal(goal)
    }

    /// Restart the session: stop the clocks and reinitialize the pet, the
    /// finances and the snapshot history before any pending tick can apply.
    /// Passing `None` keeps the current starting budget.
    ///
    /// # Errors
    ///
    /// [`ValidationError::BudgetRange`] leaves the session untouched.
    pub fn reset(&mut self, new_budget: Option<i64>) -> Result<(), ValidationError> {
        let budget = new_budget.unwrap_or(self.state.config.starting_budget);
        validate_budget(budget)?;

        let (pet_name, owner_name) = self.state.config.validated_names()?;
        self.state.scheduler.reset();
        self.state.pet = Pet::new(
            pet_name,
            self.state.config.species,
            owner_name,
            self.state.config.customization.clone(),
        );
        self.state.finances.reset(budget)?;
        self.state.config.starting_budget = budget;
        self.state.snapshots.clear();
        self.rng = Rc::new(RngBundle::from_user_seed(self.state.config.seed));
        Ok(())
    }

    /// Compute the composite score over everything recorded so far.
    #[must_use]
    pub fn final_score(&self) -> ScoreBreakdown {
        compute(&ScoreInputs {
            snapshots: &self.state.snapshots,
            weekly_spending: &self.state.finances.weekly_spending,
            preventive_spent: self.state.finances.preventive_spent,
            reactive_spent: self.state.finances.reactive_spent,
        })
    }

    #[must_use]
    pub const fn pet(&self) -> &Pet {
        &self.state.pet
    }

    #[must_use]
    pub const fn finances(&self) -> &FinanceLedger {
        &self.state.finances
    }

    #[must_use]
    pub fn snapshots(&self) -> &[crate::scoring::WeekSnapshot] {
        &self.state.snapshots
    }

    #[must_use]
    pub const fn week(&self) -> u32 {
        self.state.scheduler.week()
    }

    #[must_use]
    pub fn time_remaining(&self) -> Duration {
        self.state.scheduler.time_remaining()
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.state.scheduler.phase()
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.state.scheduler.is_ended()
    }

    /// Borrow the persistable state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Consume the session, returning the persistable state.
    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.state
    }

    /// Borrow the catalog this session resolves ids against.
    #[must_use]
    pub const fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }
}
