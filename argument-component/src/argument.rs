use serde::{Deserialize, Serialize};
use std::fmt;

use ya_preferences::{CriterionName, Item, Preferences, Value};

/// Premise stating that item has `value` on `criterion`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display(fmt = "{}={}", criterion, value)]
pub struct CoupleValue {
    pub criterion: CriterionName,
    pub value: Value,
}

/// Premise stating that `best` criterion is more important than `worst`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display(fmt = "{} > {}", best, worst)]
pub struct Comparison {
    pub best: CriterionName,
    pub worst: CriterionName,
}

/// Justification supporting or attacking single item.
///
/// Premises lists can only grow. Once Argument is sent in a message it
/// should be treated as immutable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    positive: bool,
    item: Item,
    couple_values: Vec<CoupleValue>,
    comparisons: Vec<Comparison>,
}

impl Argument {
    pub fn support(item: Item) -> Argument {
        Argument::new(true, item)
    }

    pub fn attack(item: Item) -> Argument {
        Argument::new(false, item)
    }

    pub fn new(positive: bool, item: Item) -> Argument {
        Argument {
            positive,
            item,
            couple_values: vec![],
            comparisons: vec![],
        }
    }

    pub fn with_couple_value(mut self, criterion: CriterionName, value: Value) -> Argument {
        self.add_premise_couple_values(criterion, value);
        self
    }

    pub fn with_comparison(mut self, best: CriterionName, worst: CriterionName) -> Argument {
        self.add_premise_comparison(best, worst);
        self
    }

    pub fn add_premise_couple_values(&mut self, criterion: CriterionName, value: Value) {
        self.couple_values.push(CoupleValue { criterion, value });
    }

    pub fn add_premise_comparison(&mut self, best: CriterionName, worst: CriterionName) {
        self.comparisons.push(Comparison { best, worst });
    }

    pub fn is_positive(&self) -> bool {
        self.positive
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn couple_values(&self) -> &[CoupleValue] {
        &self.couple_values
    }

    pub fn comparisons(&self) -> &[Comparison] {
        &self.comparisons
    }

    /// Criterion is used in one of value premises.
    pub fn cites(&self, criterion: CriterionName) -> bool {
        self.couple_values
            .iter()
            .any(|couple| couple.criterion == criterion)
    }

    /// Checks if argument has the same polarity, target item and uses
    /// `criterion` in one of value premises.
    pub fn raises(&self, positive: bool, item: &Item, criterion: CriterionName) -> bool {
        self.positive == positive && &self.item == item && self.cites(criterion)
    }

    /// Argument refers only to the two criteria, that are most important for the agent.
    pub fn is_important_for(&self, preferences: &Preferences) -> bool {
        let important = preferences
            .criterion_name_list()
            .iter()
            .take(2)
            .collect::<Vec<_>>();
        self.couple_values
            .iter()
            .all(|couple| important.contains(&&couple.criterion))
    }

    /// Some value premise claims less than agent itself thinks about the item.
    pub fn has_criterion_not_respected(&self, preferences: &Preferences) -> bool {
        self.couple_values.iter().any(|couple| {
            preferences
                .value(&self.item, couple.criterion)
                .map(|own| own > couple.value)
                .unwrap_or(false)
        })
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |list: Vec<String>| list.join(", ");
        write!(
            f,
            "{}{} <= [{}]",
            if self.positive { "" } else { "not " },
            self.item.name,
            join(
                self.couple_values
                    .iter()
                    .map(ToString::to_string)
                    .chain(self.comparisons.iter().map(ToString::to_string))
                    .collect()
            )
        )
    }
}
