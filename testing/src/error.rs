use std::fmt;

use crate::negotiation_record::{AgentPair, NegotiationRecord};

#[derive(thiserror::Error, Debug)]
pub enum NegotiationError {
    #[error("Agent {0} not found")]
    AgentNotFound(String),
    #[error("Negotiation between agents {0} exceeded steps limit")]
    InfiniteLoop(AgentPair),
    #[error("Condition not reached after {0} ticks")]
    Timeout(u64),
}

#[derive(thiserror::Error)]
#[error("{error}\nNegotiation traceback:\n\n{negotiation_traceback}")]
pub struct FrameworkError {
    pub error: anyhow::Error,
    pub negotiation_traceback: NegotiationRecord,
}

impl FrameworkError {
    pub fn from(error: impl Into<anyhow::Error>, record: &NegotiationRecord) -> FrameworkError {
        FrameworkError {
            error: error.into(),
            negotiation_traceback: record.clone(),
        }
    }
}

impl fmt::Debug for FrameworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
