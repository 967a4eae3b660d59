//! PetPal Game Engine
//!
//! Platform-agnostic core game logic for the PetPal budget pet simulation.
//! This crate provides all game mechanics without UI or platform-specific
//! dependencies: stat decay and derivation, action validation, the financial
//! ledger, weekly scheduling and the composite scoring algorithm.

pub mod catalog;
pub mod constants;
pub mod finance;
pub mod numbers;
pub mod pet;
pub mod rng;
pub mod schedule;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod validate;

// Re-export commonly used types
pub use catalog::{FoodId, FoodItem, ItemCatalog, ToyId, ToyItem, VetId, VetOption};
pub use finance::{CategoryTotal, Expense, ExpenseCategory, FinanceLedger, SpendKind};
pub use pet::{
    ActionKind, ActionLogEntry, CleanReceipt, DecayOutcome, FeedReceipt, Pet, PetProfile,
    PlayReceipt, RestReceipt, SpeciesId, TrickReceipt, VetReceipt,
};
pub use rng::{CountingRng, RngBundle};
pub use schedule::{
    ScheduleConfig, SessionPhase, TickOutcome, WeekReport, WeekScheduler, salary_for_health,
};
pub use scoring::{
    CareGrade, OwnerTier, ScoreBreakdown, ScoreInputs, SnapshotHistory, WeekSnapshot, care_grade,
    compute,
};
pub use session::{PetSession, SessionConfig, SessionState};
pub use stats::{Mood, PetStats, Stage, StatKind, derive_mood, stage_for_age};
pub use validate::{
    NameCharset, ValidationError, validate_affordability, validate_bounded_delta, validate_budget,
    validate_name_token, validate_savings_goal, validate_unique,
};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the item/option catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_item_catalog(&self) -> Result<ItemCatalog, Self::Error>;

    /// Load configuration data for a specific system
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Trait for abstracting save/load operations
/// Platform-specific implementations should provide this
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save session state
    ///
    /// # Errors
    ///
    /// Returns an error if the session state cannot be saved.
    fn save_session(&self, save_name: &str, state: &SessionState) -> Result<(), Self::Error>;

    /// Load session state
    ///
    /// # Errors
    ///
    /// Returns an error if the session state cannot be loaded.
    fn load_session(&self, save_name: &str) -> Result<Option<SessionState>, Self::Error>;

    /// Delete a saved session
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// Main game engine for managing game sessions
pub struct GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    data_loader: L,
    storage: S,
}

impl<L, S> GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    /// Create a new game engine with the provided data loader and storage
    pub const fn new(data_loader: L, storage: S) -> Self {
        Self {
            data_loader,
            storage,
        }
    }

    /// Start a new session from a player-supplied configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or the configuration
    /// fails validation.
    pub fn create_session(&self, config: SessionConfig) -> Result<PetSession, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let catalog = self.data_loader.load_item_catalog().map_err(Into::into)?;
        Ok(PetSession::new(config, catalog)?)
    }

    /// Save a session's state
    ///
    /// # Errors
    ///
    /// Returns an error if the session state cannot be saved.
    pub fn save_session(&self, save_name: &str, state: &SessionState) -> Result<(), S::Error> {
        self.storage.save_session(save_name, state)
    }

    /// Load a session, rehydrating the catalog and the RNG bundle
    ///
    /// # Errors
    ///
    /// Returns an error if the session state cannot be loaded or rehydrated.
    pub fn load_session(&self, save_name: &str) -> Result<Option<PetSession>, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        if let Some(state) = self.storage.load_session(save_name).map_err(Into::into)? {
            // Rehydrate with fresh catalog data
            let catalog = self.data_loader.load_item_catalog().map_err(Into::into)?;
            Ok(Some(PetSession::from_state(state, catalog)))
        } else {
            Ok(None)
        }
    }

    /// Delete a saved session
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn delete_save(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_save(save_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl DataLoader for FixtureLoader {
        type Error = Infallible;

        fn load_item_catalog(&self) -> Result<ItemCatalog, Self::Error> {
            Ok(ItemCatalog::load_from_static())
        }

        fn load_config<T>(&self, _config_name: &str) -> Result<T, Self::Error>
        where
            T: DeserializeOwned,
        {
            let parsed = serde_json::from_str("{}")
                .or_else(|_| serde_json::from_str("null"))
                .unwrap();
            Ok(parsed)
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStorage {
        saves: Rc<RefCell<HashMap<String, SessionState>>>,
    }

    impl GameStorage for MemoryStorage {
        type Error = Infallible;

        fn save_session(&self, save_name: &str, state: &SessionState) -> Result<(), Self::Error> {
            self.saves
                .borrow_mut()
                .insert(save_name.to_string(), state.clone());
            Ok(())
        }

        fn load_session(&self, save_name: &str) -> Result<Option<SessionState>, Self::Error> {
            Ok(self.saves.borrow().get(save_name).cloned())
        }

        fn delete_save(&self, save_name: &str) -> Result<(), Self::Error> {
            self.saves.borrow_mut().remove(save_name);
            Ok(())
        }
    }

    fn sample_config() -> SessionConfig {
        SessionConfig {
            pet_name: "Mochi".to_string(),
            species: SpeciesId::Axolotl,
            owner_name: "Robin".to_string(),
            customization: serde_json::Value::Null,
            starting_budget: 200,
            seed: 0xABCD,
            schedule: ScheduleConfig::default(),
        }
    }

    #[test]
    fn engine_creates_and_roundtrips_sessions() {
        let engine = GameEngine::new(FixtureLoader, MemoryStorage::default());
        let mut session = engine.create_session(sample_config()).unwrap();
        session.feed(FoodId::BasicKibble).unwrap();
        session.tick(std::time::Duration::from_secs(90));

        let state = session.into_state();
        engine.save_session("slot-one", &state).unwrap();

        let loaded = engine.load_session("slot-one").unwrap().expect("save exists");
        assert_eq!(loaded.week(), 2);
        assert_eq!(loaded.pet().profile.name, "Mochi");
        assert!(engine.load_session("missing-slot").unwrap().is_none());

        engine.delete_save("slot-one").unwrap();
        assert!(engine.load_session("slot-one").unwrap().is_none());
    }

    #[test]
    fn engine_surfaces_config_validation_failures() {
        let engine = GameEngine::new(FixtureLoader, MemoryStorage::default());
        let mut config = sample_config();
        config.starting_budget = 33;
        assert!(engine.create_session(config).is_err());
    }

    #[test]
    fn fixture_loader_parses_default_configs() {
        let loader = FixtureLoader;
        let schedule: ScheduleConfig = loader.load_config("schedule").unwrap();
        assert_eq!(schedule, ScheduleConfig::default());
    }
}
