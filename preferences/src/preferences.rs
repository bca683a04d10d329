use serde::Serialize;
use std::collections::HashSet;

use crate::{CriterionName, CriterionValue, Error, Item, Value};

/// Private preferences of a single agent.
#[derive(Clone, Debug, Serialize)]
pub struct Preferences {
    /// All criteria, most important first.
    criterion_name_list: Vec<CriterionName>,
    criterion_value_list: Vec<CriterionValue>,
}

impl Preferences {
    /// Creates empty ratings table with given importance order. Order must be
    /// a permutation of all criteria.
    pub fn new(order: Vec<CriterionName>) -> Result<Preferences, Error> {
        let unique = order.iter().collect::<HashSet<_>>();
        if order.len() != CriterionName::all().len() || unique.len() != order.len() {
            return Err(Error::InvalidCriteriaOrder(order));
        }

        Ok(Preferences {
            criterion_name_list: order,
            criterion_value_list: vec![],
        })
    }

    pub fn criterion_name_list(&self) -> &[CriterionName] {
        &self.criterion_name_list
    }

    pub fn criterion_value_list(&self) -> &[CriterionValue] {
        &self.criterion_value_list
    }

    pub fn add_criterion_value(&mut self, criterion_value: CriterionValue) {
        if self
            .value(&criterion_value.item, criterion_value.criterion)
            .is_some()
        {
            log::warn!(
                "Item '{}' already rated on {}. Rating {} will be shadowed.",
                criterion_value.item.name,
                criterion_value.criterion,
                criterion_value.value
            );
        }
        self.criterion_value_list.push(criterion_value);
    }

    /// All ratings of the item, in insertion order. Use `rank` to sort
    /// them by importance.
    pub fn criteria_for(&self, item: &Item) -> Vec<&CriterionValue> {
        self.criterion_value_list
            .iter()
            .filter(|criterion_value| &criterion_value.item == item)
            .collect()
    }

    /// First rating inserted for (item, criterion) pair.
    pub fn value(&self, item: &Item, criterion: CriterionName) -> Option<Value> {
        self.criterion_value_list
            .iter()
            .find(|criterion_value| {
                &criterion_value.item == item && criterion_value.criterion == criterion
            })
            .map(|criterion_value| criterion_value.value)
    }

    /// Position of criterion in importance order. 0 is the most important.
    pub fn rank(&self, criterion: CriterionName) -> Option<usize> {
        self.criterion_name_list
            .iter()
            .position(|name| *name == criterion)
    }

    pub fn is_preferred_criterion(&self, first: CriterionName, second: CriterionName) -> bool {
        match (self.rank(first), self.rank(second)) {
            (Some(first), Some(second)) => first < second,
            _ => false,
        }
    }

    /// Criteria more important than `criterion`, most important first.
    pub fn criteria_more_important_than(&self, criterion: CriterionName) -> &[CriterionName] {
        match self.rank(criterion) {
            Some(rank) => &self.criterion_name_list[..rank],
            None => &[],
        }
    }

    pub fn is_preferred_item(&self, first: &Item, second: &Item) -> bool {
        first.score(self) > second.score(self)
    }

    /// Ratings of the item that are at least `Good`, most important criterion first.
    pub fn supporting_premises(&self, item: &Item) -> Vec<(CriterionName, Value)> {
        self.sorted_premises(item, Value::is_good)
    }

    /// Ratings of the item below `Good`, most important criterion first.
    pub fn attacking_premises(&self, item: &Item) -> Vec<(CriterionName, Value)> {
        self.sorted_premises(item, |value| !value.is_good())
    }

    fn sorted_premises(
        &self,
        item: &Item,
        filter: impl Fn(Value) -> bool,
    ) -> Vec<(CriterionName, Value)> {
        let mut premises = self
            .criteria_for(item)
            .into_iter()
            .filter(|criterion_value| filter(criterion_value.value))
            .map(|criterion_value| (criterion_value.criterion, criterion_value.value))
            .collect::<Vec<_>>();

        premises.sort_by_key(|(criterion, _)| self.rank(*criterion).unwrap_or(usize::MAX));
        premises
    }

    /// Items sorted by descending score. Sort is stable, so items with equal
    /// score keep their input order.
    pub fn ranked<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        let mut sorted = items.iter().collect::<Vec<_>>();
        sorted.sort_by_key(|item| std::cmp::Reverse(item.score(self)));
        sorted
    }

    /// Item with the highest score. First one wins on ties.
    /// Returns `None` for empty list.
    pub fn most_preferred<'a>(&self, items: &'a [Item]) -> Option<&'a Item> {
        self.ranked(items).into_iter().next()
    }

    /// Checks if item ranks in the best 10% of `items`, meaning its position
    /// in descending score order is lower than `floor(0.1 * len)`.
    pub fn is_top_decile(&self, item: &Item, items: &[Item]) -> bool {
        let threshold = items.len() / 10;
        self.ranked(items)
            .iter()
            .position(|ranked| *ranked == item)
            .map(|rank| rank < threshold)
            .unwrap_or(false)
    }
}
