use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use ya_preferences::Item;

use crate::Argument;

#[derive(
    Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl FromStr for AgentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AgentId(s.parse()?))
    }
}

/// Speech act type of the message.
#[derive(
    Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Performative {
    #[display(fmt = "PROPOSE")]
    Propose,
    #[display(fmt = "ACCEPT")]
    Accept,
    #[display(fmt = "ASK_WHY")]
    AskWhy,
    #[display(fmt = "ARGUE")]
    Argue,
    #[display(fmt = "COMMIT")]
    Commit,
}

impl Performative {
    pub fn all() -> [Performative; 5] {
        [
            Performative::Propose,
            Performative::Accept,
            Performative::AskWhy,
            Performative::Argue,
            Performative::Commit,
        ]
    }
}

/// Message payload. Payload type is determined by performative, so it
/// isn't possible to build message with content not matching its performative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Content {
    Propose(Item),
    Accept(Item),
    AskWhy(Item),
    Argue(Argument),
    /// `ack` is false for the message opening commitment and true
    /// for the acknowledgement closing the thread.
    Commit { item: Item, ack: bool },
}

impl Content {
    pub fn performative(&self) -> Performative {
        match self {
            Content::Propose(_) => Performative::Propose,
            Content::Accept(_) => Performative::Accept,
            Content::AskWhy(_) => Performative::AskWhy,
            Content::Argue(_) => Performative::Argue,
            Content::Commit { .. } => Performative::Commit,
        }
    }

    /// Item the message refers to.
    pub fn item(&self) -> &Item {
        match self {
            Content::Propose(item)
            | Content::Accept(item)
            | Content::AskWhy(item)
            | Content::Commit { item, .. } => item,
            Content::Argue(argument) => argument.item(),
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Argue(argument) => write!(f, "ARGUE({})", argument),
            Content::Commit { item, ack } => write!(f, "COMMIT({}, ack={})", item.name, ack),
            content => write!(f, "{}({})", content.performative(), content.item().name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: AgentId,
    pub receiver: AgentId,
    pub content: Content,
}

impl Message {
    pub fn new(sender: AgentId, receiver: AgentId, content: Content) -> Message {
        Message {
            sender,
            receiver,
            content,
        }
    }

    pub fn performative(&self) -> Performative {
        self.content.performative()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -> {}] {}", self.sender, self.receiver, self.content)
    }
}
