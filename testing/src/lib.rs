pub mod error;
mod framework;
mod generator;
mod negotiation_record;

pub use error::{FrameworkError, NegotiationError};
pub use framework::{Activation, Framework};
pub use generator::{generate_items, generate_preferences};
pub use negotiation_record::{
    AgentPair, NegotiationRecord, NegotiationResult, NegotiationStage, OpenThread,
};
