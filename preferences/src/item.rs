use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::{CriterionName, Preferences, Value};

/// Alternative under negotiation. Identity is defined by `name` only.
#[derive(Clone, Debug, Display, Serialize, Deserialize)]
#[display(fmt = "{} ({})", name, description)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Item {
    pub fn new(name: impl ToString, description: impl ToString) -> Item {
        Item {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    pub fn value(&self, preferences: &Preferences, criterion: CriterionName) -> Option<Value> {
        preferences.value(self, criterion)
    }

    /// Lexicographically weighted score. Criterion on position `rank` in the agent's
    /// order gets weight `4^(K-1-rank)`. Since a single level step is worth at most 3,
    /// difference on more important criterion outweighs any combination of differences
    /// on less important ones.
    pub fn score(&self, preferences: &Preferences) -> u64 {
        let order = preferences.criterion_name_list();
        let count = order.len() as u32;

        order
            .iter()
            .enumerate()
            .filter_map(|(rank, criterion)| {
                preferences
                    .value(self, *criterion)
                    .map(|value| 4u64.pow(count - 1 - rank as u32) * value.ordinal())
            })
            .sum()
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
