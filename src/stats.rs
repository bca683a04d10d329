use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use ya_argument_component::{Item, Performative};

/// Counters collected by agent during negotiations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub messages_sent: u64,
    pub performative_uses: BTreeMap<Performative, u64>,
    /// Threads closed by acknowledged commitment of our proposal.
    pub deals_won: u64,
    /// Commitments made by this agent, both as proposer and acceptor.
    pub agreements: u64,
    pub deals_by_item: BTreeMap<String, u64>,
}

impl AgentStats {
    pub(crate) fn sent(&mut self, performative: Performative) {
        self.messages_sent += 1;
        *self.performative_uses.entry(performative).or_insert(0) += 1;
    }

    pub(crate) fn agreement(&mut self) {
        self.agreements += 1;
    }

    pub(crate) fn deal_won(&mut self, item: &Item) {
        self.deals_won += 1;
        *self.deals_by_item.entry(item.name.clone()).or_insert(0) += 1;
    }

    pub fn uses_of(&self, performative: Performative) -> u64 {
        self.performative_uses
            .get(&performative)
            .copied()
            .unwrap_or(0)
    }
}

impl fmt::Display for AgentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}
