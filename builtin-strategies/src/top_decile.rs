use serde::{Deserialize, Serialize};

use ya_argument_component::{DiscussionView, NegotiationStrategy, ProposalReaction};
use ya_preferences::Item;

/// Accepts proposals of items, that are among 10% of its best items.
/// Argues about others the same way as `Argumentative` does.
pub struct TopDecile {
    initiate: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
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

impl TopDecile {
    pub fn new(config: serde_yaml::Value) -> anyhow::Result<TopDecile> {
        let config: Config = crate::parse_config(config)?;
        Ok(TopDecile {
            initiate: config.initiate,
        })
    }
}

impl NegotiationStrategy for TopDecile {
    fn opens_threads(&self) -> bool {
        self.initiate
    }

    fn react_to_proposal(&mut self, view: &DiscussionView, item: &Item) -> ProposalReaction {
        let best = view.most_preferred() == Some(item);
        if best || view.preferences.is_top_decile(item, view.items) {
            log::info!(
                "TopDecile [{}]: [{}] is among best items, accepting.",
                view.me,
                item.name
            );
            ProposalReaction::Accept
        } else {
            ProposalReaction::AskWhy
        }
    }
}
