mod agent;
mod dispatch;
pub mod factory;
mod stats;

pub use agent::{ArgumentAgent, StepContext};
pub use dispatch::{MessageService, Recipient};
pub use stats::AgentStats;

pub use ya_argument_component::{
    AgentId, Argument, Content, Message, NegotiationStrategy, Performative,
};
pub use ya_preferences::{CriterionName, CriterionValue, Item, Preferences, Value};

pub mod builtin {
    pub use ya_builtin_strategies::{AcceptAll, Argumentative, TopDecile};
}

pub mod component {
    pub use ya_argument_component::{
        ArgumentGenerator, Comparison, CoupleValue, DiscussionView, Mailbox, NegotiationStrategy,
        ProposalReaction, Reaction,
    };
}

pub mod preferences {
    pub use ya_preferences::config::PreferencesConfig;
    pub use ya_preferences::{CriterionName, CriterionValue, Error, Item, Preferences, Value};
}
