use serde::{Deserialize, Serialize};

use ya_argument_component::NegotiationStrategy;

/// Plain argumentation protocol. Accepts only its most preferred item and
/// argues about everything else until it runs out of arguments.
pub struct Argumentative {
    initiate: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Agent not initiating threads only responds to other agents.
    #[serde(default = "default_initiate")]
    pub initiate: bool,
}

fn default_initiate() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initiate: default_initiate(),
        }
    }
}

impl Argumentative {
    pub fn new(config: serde_yaml::Value) -> anyhow::Result<Argumentative> {
        let config: Config = crate::parse_config(config)?;
        Ok(Argumentative {
            initiate: config.initiate,
        })
    }
}

impl NegotiationStrategy for Argumentative {
    fn opens_threads(&self) -> bool {
        self.initiate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(serde_yaml::Value::Null, true; "Default config initiates threads")]
    #[test_case(serde_yaml::from_str("initiate: false").unwrap(), false; "Responder")]
    #[test_case(serde_yaml::from_str("{}").unwrap(), true; "Empty params")]
    fn test_argumentative_config(config: serde_yaml::Value, initiate: bool) {
        let strategy = Argumentative::new(config).unwrap();
        assert_eq!(strategy.opens_threads(), initiate);
    }

    #[test]
    fn test_invalid_config() {
        let config = serde_yaml::from_str("initiate: maybe").unwrap();
        assert!(Argumentative::new(config).is_err());
    }
}
