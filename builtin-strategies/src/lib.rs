pub mod accept_all;
pub mod argumentative;
pub mod top_decile;

pub use accept_all::AcceptAll;
pub use argumentative::Argumentative;
pub use top_decile::TopDecile;

/// Parses strategy params. Missing params mean default config.
fn parse_config<C>(config: serde_yaml::Value) -> anyhow::Result<C>
where
    C: Default + serde::de::DeserializeOwned,
{
    Ok(match config {
        serde_yaml::Value::Null => C::default(),
        config => serde_yaml::from_value(config)?,
    })
}
