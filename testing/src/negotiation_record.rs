use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use anyhow::anyhow;
use ya_argument_component::{AgentId, Content, Message};
use ya_preferences::Item;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum NegotiationStage {
    /// Message delivered in `tick`.
    Message { tick: u64, message: Message },
    /// Acknowledged commitment closed the thread.
    Deal { tick: u64, item: Item },
    InfiniteLoop,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NegotiationResult {
    pub stage: Vec<NegotiationStage>,
    pub deals: Vec<Item>,
    /// Threads not closed by a deal yet. Both agents can run their own
    /// thread at the same time.
    pub threads: Vec<OpenThread>,
}

/// Chain of messages started by `opener`, where every message answers
/// the previous one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpenThread {
    pub opener: AgentId,
    /// Agent expected to answer `last`.
    pub awaiting: AgentId,
    pub last: Content,
    pub len: usize,
}

/// Unordered pair of agents negotiating with each other.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, derive_more::Display)]
#[display(fmt = "{}-{}", _0, _1)]
pub struct AgentPair(pub AgentId, pub AgentId);

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NegotiationRecord {
    #[serde_as(as = "HashMap<DisplayFromStr, _>")]
    pub results: HashMap<AgentPair, NegotiationResult>,
    pub deals_by_item: BTreeMap<String, u64>,

    max_steps: usize,
}

impl NegotiationRecord {
    pub fn new(max_steps: usize) -> NegotiationRecord {
        NegotiationRecord {
            results: Default::default(),
            deals_by_item: Default::default(),
            max_steps,
        }
    }

    /// Stores delivered message in the thread it answers, or starts a new thread.
    /// Thread is closed by `COMMIT` acknowledgement.
    pub fn message(&mut self, tick: u64, message: Message) {
        let max_steps = self.max_steps;
        let negotiation = self
            .results
            .entry(AgentPair(message.sender, message.receiver))
            .or_default();

        let idx = match negotiation
            .threads
            .iter()
            .position(|thread| thread.answered_by(&message))
        {
            Some(idx) => idx,
            None => {
                negotiation.threads.push(OpenThread {
                    opener: message.sender,
                    awaiting: message.receiver,
                    last: message.content.clone(),
                    len: 0,
                });
                negotiation.threads.len() - 1
            }
        };

        let thread_len = {
            let thread = &mut negotiation.threads[idx];
            thread.awaiting = message.receiver;
            thread.last = message.content.clone();
            thread.len += 1;
            thread.len
        };

        let deal = match &message.content {
            Content::Commit { item, ack: true } => Some(item.clone()),
            _ => None,
        };

        negotiation
            .stage
            .push(NegotiationStage::Message { tick, message });

        if let Some(item) = deal {
            negotiation.threads.remove(idx);
            negotiation.stage.push(NegotiationStage::Deal {
                tick,
                item: item.clone(),
            });
            negotiation.deals.push(item.clone());

            *self.deals_by_item.entry(item.name).or_insert(0) += 1;
        } else if thread_len == max_steps + 1 {
            negotiation.stage.push(NegotiationStage::InfiniteLoop);
        }
    }

    pub fn result(&self, first: AgentId, second: AgentId) -> Option<&NegotiationResult> {
        self.results.get(&AgentPair(first, second))
    }

    pub fn deals(&self) -> u64 {
        self.deals_by_item.values().sum()
    }

    /// First pair of agents, that exceeded steps limit in a single thread.
    pub fn infinite_loop(&self) -> Option<AgentPair> {
        self.results
            .iter()
            .find(|(_, result)| result.is_looping())
            .map(|(pair, _)| pair.ordered())
    }

    /// All messages ordered by delivery tick.
    pub fn messages(&self) -> Vec<(u64, &Message)> {
        let mut messages = self
            .results
            .values()
            .flat_map(|result| result.messages())
            .collect::<Vec<_>>();
        // Stable sort keeps order of messages between the same pair.
        messages.sort_by_key(|(tick, _)| *tick);
        messages
    }
}

impl NegotiationResult {
    pub fn is_finished(&self) -> bool {
        match self.stage.last() {
            Some(stage) => matches!(
                stage,
                NegotiationStage::Deal { .. } | NegotiationStage::InfiniteLoop
            ),
            None => false,
        }
    }

    /// Some thread exceeded steps limit. Deals closing other threads
    /// don't clear it.
    pub fn is_looping(&self) -> bool {
        self.stage
            .iter()
            .any(|stage| matches!(stage, NegotiationStage::InfiniteLoop))
    }

    pub fn messages(&self) -> impl Iterator<Item = (u64, &Message)> {
        self.stage.iter().filter_map(|stage| match stage {
            NegotiationStage::Message { tick, message } => Some((*tick, message)),
            _ => None,
        })
    }
}

impl OpenThread {
    fn answered_by(&self, message: &Message) -> bool {
        message.sender == self.awaiting && is_reply(&self.last, &message.content)
    }
}

/// Protocol allows `next` as an answer to `last`.
fn is_reply(last: &Content, next: &Content) -> bool {
    matches!(
        (last, next),
        (Content::Propose(_), Content::Accept(_) | Content::AskWhy(_))
            | (Content::AskWhy(_), Content::Argue(_) | Content::Propose(_))
            | (Content::Argue(_), Content::Argue(_) | Content::Accept(_))
            | (Content::Accept(_), Content::Commit { ack: false, .. })
            | (Content::Commit { ack: false, .. }, Content::Commit { ack: true, .. })
    )
}

impl AgentPair {
    pub fn ordered(self) -> AgentPair {
        match self.0.cmp(&self.1) {
            Ordering::Greater => AgentPair(self.1, self.0),
            _ => self,
        }
    }
}

impl PartialEq for AgentPair {
    fn eq(&self, other: &Self) -> bool {
        let ord1 = self.ordered();
        let ord2 = other.ordered();

        ord1.0 == ord2.0 && ord1.1 == ord2.1
    }
}

impl Eq for AgentPair {}

impl PartialOrd for AgentPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let ord1 = self.ordered();
        let ord2 = other.ordered();
        Some((ord1.0, ord1.1).cmp(&(ord2.0, ord2.1)))
    }
}

impl Hash for AgentPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let pair = self.ordered();
        pair.0.hash(state);
        pair.1.hash(state);
    }
}

impl FromStr for AgentPair {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id1, id2) = s
            .split_once('-')
            .ok_or_else(|| anyhow!("Invalid agent pair: {}", s))?;
        Ok(AgentPair(id1.parse()?, id2.parse()?))
    }
}

impl fmt::Display for NegotiationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl fmt::Display for NegotiationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}
