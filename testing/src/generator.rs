use rand::seq::SliceRandom;
use rand::Rng;

use ya_preferences::{CriterionName, CriterionValue, Error, Item, Preferences, Value};

/// Items named `Item0`, `Item1`, ...
pub fn generate_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|idx| Item::new(format!("Item{}", idx), format!("Generated item {}", idx)))
        .collect()
}

/// Random criteria order and every item rated on every criterion.
pub fn generate_preferences<R: Rng + ?Sized>(
    items: &[Item],
    rng: &mut R,
) -> Result<Preferences, Error> {
    let mut order = CriterionName::all();
    order.shuffle(rng);

    let mut preferences = Preferences::new(order)?;
    let values = Value::all();

    for item in items {
        for criterion in CriterionName::all() {
            if let Some(value) = values.choose(rng) {
                preferences.add_criterion_value(CriterionValue::new(
                    item.clone(),
                    criterion,
                    *value,
                ));
            }
        }
    }
    Ok(preferences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_full_table() {
        let items = generate_items(4);
        let mut rng = StdRng::seed_from_u64(7);
        let preferences = generate_preferences(&items, &mut rng).unwrap();

        assert_eq!(preferences.criterion_name_list().len(), 5);
        assert_eq!(preferences.criterion_value_list().len(), 4 * 5);
        for item in &items {
            for criterion in CriterionName::all() {
                assert!(preferences.value(item, criterion).is_some());
            }
        }
    }

    #[test]
    fn test_same_seed_same_preferences() {
        let items = generate_items(3);
        let first = generate_preferences(&items, &mut StdRng::seed_from_u64(1)).unwrap();
        let second = generate_preferences(&items, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(first.criterion_name_list(), second.criterion_name_list());
        assert_eq!(first.criterion_value_list(), second.criterion_value_list());
    }
}
