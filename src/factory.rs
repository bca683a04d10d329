use anyhow::{anyhow, bail, Context};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use ya_argument_component::{AgentId, NegotiationStrategy};
use ya_preferences::config::PreferencesConfig;
use ya_preferences::Item;

use crate::builtin::{AcceptAll, Argumentative, TopDecile};
use crate::ArgumentAgent;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub name: String,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub strategy: StrategyConfig,
    pub preferences: PreferencesConfig,
}

/// Catalogue of items and agents taking part in discussion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiscussionConfig {
    pub items: Vec<Item>,
    pub agents: Vec<AgentConfig>,
}

impl DiscussionConfig {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<DiscussionConfig> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<DiscussionConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read discussion config {}", path.display()))?;
        DiscussionConfig::from_yaml(&content)
            .with_context(|| format!("Invalid discussion config {}", path.display()))
    }
}

/// Creates agents with sequential ids in the order of configuration.
/// Duplicated agent names get `#n` postfix.
pub fn create_agents(config: DiscussionConfig) -> anyhow::Result<Vec<ArgumentAgent>> {
    let mut agents = Vec::<ArgumentAgent>::with_capacity(config.agents.len());
    let mut names = Vec::<String>::new();

    for (idx, agent) in config.agents.into_iter().enumerate() {
        let name = unique_name(&names, agent.name)?;
        let preferences = agent
            .preferences
            .into_preferences(&config.items)
            .map_err(|e| anyhow!("Agent '{}' preferences: {}", name, e))?;
        let strategy = create_strategy(&agent.strategy.name, agent.strategy.params)
            .with_context(|| format!("Agent '{}' strategy", name))?;

        log::debug!(
            "Created agent '{}' with strategy {}.",
            name,
            agent.strategy.name
        );

        agents.push(ArgumentAgent::new(
            AgentId(idx as u32),
            &name,
            preferences,
            strategy,
        ));
        names.push(name);
    }
    Ok(agents)
}

pub fn create_strategy(
    name: &str,
    config: serde_yaml::Value,
) -> anyhow::Result<Box<dyn NegotiationStrategy>> {
    let strategy = match &name[..] {
        "Argumentative" => {
            Box::new(Argumentative::new(config)?) as Box<dyn NegotiationStrategy>
        }
        "AcceptAll" => Box::new(AcceptAll::new(config)?) as Box<dyn NegotiationStrategy>,
        "TopDecile" => Box::new(TopDecile::new(config)?) as Box<dyn NegotiationStrategy>,
        _ => bail!("Builtin strategy {} doesn't exist.", &name),
    };
    Ok(strategy)
}

fn unique_name(taken: &[String], mut name: String) -> anyhow::Result<String> {
    let re = Regex::new(r"#(?P<idx>[0-9]+)\z")?;

    while taken.contains(&name) {
        if let Some(idx) = re
            .captures(&name)
            .and_then(|caps| caps.name("idx"))
            .and_then(|capture| capture.as_str().parse::<u32>().map(|idx| idx + 1).ok())
        {
            name = re.replace(&name, format!("#{idx}")).to_string()
        } else {
            name = format!("{name}#1");
        }
    }
    Ok(name)
}
