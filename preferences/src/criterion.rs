use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::Item;

/// Dimensions on which items are compared. The set itself is unordered,
/// each agent imposes its own importance order.
#[derive(
    Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CriterionName {
    ProductionCost,
    Consumption,
    Durability,
    EnvironmentImpact,
    Noise,
}

impl CriterionName {
    pub fn all() -> Vec<CriterionName> {
        vec![
            CriterionName::ProductionCost,
            CriterionName::Consumption,
            CriterionName::Durability,
            CriterionName::EnvironmentImpact,
            CriterionName::Noise,
        ]
    }
}

/// Ordinal rating of an item on a single criterion.
///
/// Discriminant 2 is reserved for a middle level that no rating source emits,
/// so the numeric gaps between levels carry no meaning. Compare values only
/// through their order.
#[derive(
    Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Value {
    #[display(fmt = "VERY_BAD")]
    VeryBad = 0,
    #[display(fmt = "BAD")]
    Bad = 1,
    #[display(fmt = "GOOD")]
    Good = 3,
    #[display(fmt = "VERY_GOOD")]
    VeryGood = 4,
}

impl Value {
    pub fn all() -> Vec<Value> {
        vec![Value::VeryBad, Value::Bad, Value::Good, Value::VeryGood]
    }

    /// Dense rank of the level, from 0 for `VeryBad` to 3 for `VeryGood`.
    pub fn ordinal(self) -> u64 {
        match self {
            Value::VeryBad => 0,
            Value::Bad => 1,
            Value::Good => 2,
            Value::VeryGood => 3,
        }
    }

    pub fn is_good(self) -> bool {
        self >= Value::Good
    }
}

/// States that `item` is rated `value` on `criterion`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CriterionValue {
    pub item: Item,
    pub criterion: CriterionName,
    pub value: Value,
}

impl CriterionValue {
    pub fn new(item: Item, criterion: CriterionName, value: Value) -> CriterionValue {
        CriterionValue {
            item,
            criterion,
            value,
        }
    }
}
