use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{CriterionName, CriterionValue, Error, Item, Preferences, Value};

/// Preferences table as delivered by whoever generates agent preferences
/// before negotiations start.
///
/// ```yaml
/// criteria: [EnvironmentImpact, Noise, ProductionCost, Consumption, Durability]
/// values:
///   E:
///     EnvironmentImpact: VeryGood
///     ProductionCost: Bad
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Criteria ordered from the most important.
    pub criteria: Vec<CriterionName>,
    /// Ratings keyed by item name.
    #[serde(default)]
    pub values: BTreeMap<String, BTreeMap<CriterionName, Value>>,
}

impl PreferencesConfig {
    pub fn from_yaml(yaml: &str) -> Result<PreferencesConfig, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn into_preferences(self, items: &[Item]) -> Result<Preferences, Error> {
        let mut preferences = Preferences::new(self.criteria)?;

        for (name, ratings) in self.values {
            let item = items
                .iter()
                .find(|item| item.name == name)
                .ok_or_else(|| Error::UnknownItem(name.clone()))?;

            for (criterion, value) in ratings {
                preferences.add_criterion_value(CriterionValue::new(item.clone(), criterion, value));
            }
        }
        Ok(preferences)
    }
}

impl From<&Preferences> for PreferencesConfig {
    fn from(preferences: &Preferences) -> Self {
        let mut values = BTreeMap::<String, BTreeMap<CriterionName, Value>>::new();
        for rating in preferences.criterion_value_list() {
            values
                .entry(rating.item.name.clone())
                .or_default()
                .entry(rating.criterion)
                .or_insert(rating.value);
        }

        PreferencesConfig {
            criteria: preferences.criterion_name_list().to_vec(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
criteria: [EnvironmentImpact, Noise, ProductionCost, Consumption, Durability]
values:
  E:
    EnvironmentImpact: VeryGood
    Noise: VeryGood
    ProductionCost: Bad
  D:
    EnvironmentImpact: VeryBad
"#;

    fn items() -> Vec<Item> {
        vec![Item::new("E", "Electric"), Item::new("D", "Diesel")]
    }

    #[test]
    fn test_preferences_from_yaml() -> anyhow::Result<()> {
        let preferences = PreferencesConfig::from_yaml(EXAMPLE)?.into_preferences(&items())?;

        assert_eq!(
            preferences.criterion_name_list()[0],
            CriterionName::EnvironmentImpact
        );
        assert_eq!(
            preferences.value(&items()[0], CriterionName::ProductionCost),
            Some(Value::Bad)
        );
        assert_eq!(preferences.value(&items()[1], CriterionName::Noise), None);
        Ok(())
    }

    #[test]
    fn test_unknown_item() -> anyhow::Result<()> {
        let config = PreferencesConfig::from_yaml(EXAMPLE)?;
        let result = config.into_preferences(&[Item::new("E", "")]);

        assert_eq!(result.unwrap_err(), Error::UnknownItem("D".to_string()));
        Ok(())
    }

    #[test]
    fn test_config_roundtrip_through_preferences() -> anyhow::Result<()> {
        let preferences = PreferencesConfig::from_yaml(EXAMPLE)?.into_preferences(&items())?;
        let serialized = serde_yaml::to_string(&PreferencesConfig::from(&preferences))?;
        let restored = PreferencesConfig::from_yaml(&serialized)?.into_preferences(&items())?;

        assert_eq!(
            restored.criterion_name_list(),
            preferences.criterion_name_list()
        );
        assert_eq!(
            restored.value(&items()[0], CriterionName::Noise),
            Some(Value::VeryGood)
        );
        Ok(())
    }
}
