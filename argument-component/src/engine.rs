use std::cmp::Reverse;

use ya_preferences::{CriterionName, Item, Preferences, Value};

use crate::argument::{Argument, Comparison, CoupleValue};

/// Produces justifications and rebuttals from agent's preferences.
///
/// Every produced Argument either proposes item, that wasn't discussed yet in
/// the thread, or attacks item with premise, that wasn't raised yet. Both sets are
/// finite, so chain of arguments built on each other always ends with `None`.
pub struct ArgumentGenerator<'a> {
    preferences: &'a Preferences,
    items: &'a [Item],
}

impl<'a> ArgumentGenerator<'a> {
    pub fn new(preferences: &'a Preferences, items: &'a [Item]) -> ArgumentGenerator<'a> {
        ArgumentGenerator { preferences, items }
    }

    /// Builds next Argument about `item`.
    ///
    /// Parameters:
    /// item - Item under dispute.
    /// incoming - Argument to rebut. `None` if we are asked to justify `item`.
    /// history - Arguments exchanged in this thread so far, including `incoming`.
    ///
    /// `None` means there is nothing more to say and the caller should concede.
    pub fn generate(
        &self,
        item: &Item,
        incoming: Option<&Argument>,
        history: &[Argument],
    ) -> Option<Argument> {
        let incoming = match incoming {
            None => return self.justify(item),
            Some(incoming) => incoming,
        };

        let argument = match (incoming.couple_values(), incoming.comparisons()) {
            ([couple], []) => self.rebut_value(item, couple, history),
            ([couple], [comparison]) => self.rebut_comparison(item, couple, comparison, history),
            _ => None,
        };

        if argument.is_none() {
            log::debug!(
                "No further argument against [{}]. Items discussed: {}",
                incoming,
                discussed(history).len()
            );
        }
        argument
    }

    /// Supports item with its most important criterion rated at least `Good`.
    pub fn justify(&self, item: &Item) -> Option<Argument> {
        let (criterion, value) = *self.preferences.supporting_premises(item).first()?;
        Some(Argument::support(item.clone()).with_couple_value(criterion, value))
    }

    /// Rebuttal of argument with single premise `(C = x)`.
    fn rebut_value(
        &self,
        item: &Item,
        couple: &CoupleValue,
        history: &[Argument],
    ) -> Option<Argument> {
        // Better alternative on the same criterion.
        let mut alternatives = self.better_alternatives(item, couple, history);
        alternatives.sort_by_key(|(_, value)| Reverse(*value));

        if let Some((alternative, value)) = alternatives.first() {
            log::debug!(
                "Counter proposing [{}], which is better on {}.",
                alternative.name,
                couple.criterion
            );
            return Some(
                Argument::support((*alternative).clone()).with_couple_value(couple.criterion, *value),
            );
        }

        // Disputed item is weak on the criterion itself.
        if let Some(own) = self.preferences.value(item, couple.criterion) {
            if own <= couple.value && !own.is_good() && !attacked(history, item, couple.criterion) {
                log::debug!("Attacking [{}] on {}.", item.name, couple.criterion);
                return Some(Argument::attack(item.clone()).with_couple_value(couple.criterion, own));
            }
        }

        // Disputed item is weak on more important criterion.
        let (criterion, value) = self
            .preferences
            .criteria_more_important_than(couple.criterion)
            .iter()
            .filter(|criterion| !attacked(history, item, **criterion))
            .find_map(|criterion| {
                self.preferences
                    .value(item, *criterion)
                    .filter(|value| !value.is_good())
                    .map(|value| (*criterion, value))
            })?;

        log::debug!(
            "Attacking [{}] on {}, which is more important than {}.",
            item.name,
            criterion,
            couple.criterion
        );
        Some(
            Argument::attack(item.clone())
                .with_couple_value(criterion, value)
                .with_comparison(criterion, couple.criterion),
        )
    }

    /// Rebuttal of argument with premises `(C = x)` and `(B > C)`.
    fn rebut_comparison(
        &self,
        item: &Item,
        couple: &CoupleValue,
        comparison: &Comparison,
        history: &[Argument],
    ) -> Option<Argument> {
        // Better alternative on the same criterion, the best one overall.
        let mut alternatives = self.better_alternatives(item, couple, history);
        alternatives.sort_by_key(|(alternative, _)| Reverse(alternative.score(self.preferences)));

        if let Some((alternative, value)) = alternatives.first() {
            log::debug!(
                "Counter proposing [{}], which is better on {} and has the best score.",
                alternative.name,
                couple.criterion
            );
            return Some(
                Argument::support((*alternative).clone()).with_couple_value(couple.criterion, *value),
            );
        }

        // We don't agree with the importance order.
        if self
            .preferences
            .is_preferred_criterion(comparison.worst, comparison.best)
            && !attacked(history, item, comparison.worst)
        {
            let value = self.preferences.value(item, comparison.worst)?;

            log::debug!(
                "Attacking [{}], because {} is more important than {}.",
                item.name,
                comparison.worst,
                comparison.best
            );
            return Some(
                Argument::attack(item.clone())
                    .with_couple_value(comparison.worst, value)
                    .with_comparison(comparison.worst, comparison.best),
            );
        }
        None
    }

    /// Items other than `item`, not discussed in the thread, rated strictly
    /// better than premise value. Keeps catalogue order.
    fn better_alternatives(
        &self,
        item: &Item,
        couple: &CoupleValue,
        history: &[Argument],
    ) -> Vec<(&'a Item, Value)> {
        let discussed = discussed(history);
        self.items
            .iter()
            .filter(|alternative| *alternative != item && !discussed.contains(alternative))
            .filter_map(|alternative| {
                self.preferences
                    .value(alternative, couple.criterion)
                    .filter(|value| *value > couple.value)
                    .map(|value| (alternative, value))
            })
            .collect()
    }
}

/// Items, that were the subject of any argument in the thread.
fn discussed(history: &[Argument]) -> Vec<&Item> {
    let mut items = Vec::<&Item>::new();
    for argument in history {
        if !items.contains(&argument.item()) {
            items.push(argument.item());
        }
    }
    items
}

fn attacked(history: &[Argument], item: &Item, criterion: CriterionName) -> bool {
    history
        .iter()
        .any(|argument| argument.raises(false, item, criterion))
}
