pub mod config;
mod criterion;
mod item;
mod preferences;

pub use config::PreferencesConfig;
pub use criterion::{CriterionName, CriterionValue, Value};
pub use item::Item;
pub use preferences::Preferences;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Criteria order must list every criterion exactly once, got: {0:?}")]
    InvalidCriteriaOrder(Vec<CriterionName>),
    #[error("Item '{0}' is not in the negotiated items list.")]
    UnknownItem(String),
}
