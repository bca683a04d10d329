pub mod argument;
pub mod component;
pub mod engine;
pub mod mailbox;
pub mod message;

pub use argument::{Argument, Comparison, CoupleValue};
pub use component::{DiscussionView, NegotiationStrategy, ProposalReaction, Reaction};
pub use engine::ArgumentGenerator;
pub use mailbox::Mailbox;
pub use message::{AgentId, Content, Message, Performative};

pub use ya_preferences::{CriterionName, CriterionValue, Item, Preferences, Value};
