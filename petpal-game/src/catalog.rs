//! Tagged item and option catalogs supplied to the core as static data.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DEFAULT_ITEMS_DATA: &str = include_str!("../assets/data/items.json");

/// Closed set of food items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodId {
    BasicKibble,
    PremiumMeal,
    GourmetFeast,
    /// Restores a randomized amount, resolved through the injected RNG.
    MysterySnack,
}

impl FoodId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BasicKibble => "basic_kibble",
            Self::PremiumMeal => "premium_meal",
            Self::GourmetFeast => "gourmet_feast",
            Self::MysterySnack => "mystery_snack",
        }
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic_kibble" => Ok(Self::BasicKibble),
            "premium_meal" => Ok(Self::PremiumMeal),
            "gourmet_feast" => Ok(Self::GourmetFeast),
            "mystery_snack" => Ok(Self::MysterySnack),
            _ => Err(()),
        }
    }
}

/// Closed set of toy items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToyId {
    YarnBall,
    PuzzleToy,
    LuxuryPlayset,
}

impl ToyId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YarnBall => "yarn_ball",
            Self::PuzzleToy => "puzzle_toy",
            Self::LuxuryPlayset => "luxury_playset",
        }
    }
}

impl fmt::Display for ToyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToyId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yarn_ball" => Ok(Self::YarnBall),
            "puzzle_toy" => Ok(Self::PuzzleToy),
            "luxury_playset" => Ok(Self::LuxuryPlayset),
            _ => Err(()),
        }
    }
}

/// Closed set of vet visit options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VetId {
    Checkup,
    /// Also grants a small uniform bonus to the other four stats.
    FullTreatment,
}

impl VetId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Checkup => "checkup",
            Self::FullTreatment => "full_treatment",
        }
    }
}

impl fmt::Display for VetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VetId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkup" => Ok(Self::Checkup),
            "full_treatment" => Ok(Self::FullTreatment),
            _ => Err(()),
        }
    }
}

/// A purchasable food item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: FoodId,
    pub name: String,
    pub cost: i64,
    pub hunger_restore: i32,
    #[serde(default)]
    pub happiness_bonus: i32,
}

/// A purchasable toy item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToyItem {
    pub id: ToyId,
    pub name: String,
    pub cost: i64,
    pub happiness_restore: i32,
    pub energy_cost: i32,
}

/// A purchasable vet option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VetOption {
    pub id: VetId,
    pub name: String,
    pub cost: i64,
    pub health_restore: i32,
}

/// Complete item catalog handed to the core as static data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemCatalog {
    #[serde(default)]
    pub foods: Vec<FoodItem>,
    #[serde(default)]
    pub toys: Vec<ToyItem>,
    #[serde(default)]
    pub vet_options: Vec<VetOption>,
}

impl ItemCatalog {
    /// Load the catalog bundled with the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_ITEMS_DATA).unwrap_or_default()
    }

    /// Get default catalog data.
    #[must_use]
    pub fn default_config() -> Self {
        Self::load_from_static()
    }

    #[must_use]
    pub fn food(&self, id: FoodId) -> Option<&FoodItem> {
        self.foods.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn toy(&self, id: ToyId) -> Option<&ToyItem> {
        self.toys.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn vet_option(&self, id: VetId) -> Option<&VetOption> {
        self.vet_options.iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses_and_covers_all_variants() {
        let catalog = ItemCatalog::load_from_static();
        assert_eq!(catalog.foods.len(), 4);
        assert_eq!(catalog.toys.len(), 3);
        assert_eq!(catalog.vet_options.len(), 2);

        let feast = catalog.food(FoodId::GourmetFeast).unwrap();
        assert_eq!(feast.cost, 12);
        assert_eq!(feast.hunger_restore, 50);
        assert_eq!(feast.happiness_bonus, 15);

        let playset = catalog.toy(ToyId::LuxuryPlayset).unwrap();
        assert_eq!(playset.energy_cost, 20);

        let treatment = catalog.vet_option(VetId::FullTreatment).unwrap();
        assert_eq!(treatment.cost, 25);
        assert_eq!(treatment.health_restore, 50);
    }

    #[test]
    fn ids_roundtrip_through_strings() {
        assert_eq!("mystery_snack".parse::<FoodId>(), Ok(FoodId::MysterySnack));
        assert_eq!(FoodId::MysterySnack.to_string(), "mystery_snack");
        assert_eq!("puzzle_toy".parse::<ToyId>(), Ok(ToyId::PuzzleToy));
        assert_eq!("full_treatment".parse::<VetId>(), Ok(VetId::FullTreatment));
        assert!("laser_pointer".parse::<ToyId>().is_err());
    }
}
