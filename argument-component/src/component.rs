use serde::{Deserialize, Serialize};

use ya_preferences::{Item, Preferences};

use crate::{AgentId, Argument, ArgumentGenerator};

/// Read-only view of a single discussion thread, given to `NegotiationStrategy`
/// when it has to react.
pub struct DiscussionView<'a> {
    pub me: AgentId,
    pub peer: AgentId,
    pub preferences: &'a Preferences,
    /// All items, that can be negotiated.
    pub items: &'a [Item],
    /// Arguments exchanged with `peer` in the current thread.
    pub history: &'a [Argument],
}

impl<'a> DiscussionView<'a> {
    pub fn generator(&self) -> ArgumentGenerator<'a> {
        ArgumentGenerator::new(self.preferences, self.items)
    }

    pub fn most_preferred(&self) -> Option<&'a Item> {
        self.preferences.most_preferred(self.items)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalReaction {
    Accept,
    AskWhy,
}

/// Decision what to send to the peer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Reaction {
    Argue(Argument),
    Accept(Item),
    Propose(Item),
    /// Don't send anything. Thread stays open, but idle.
    Withdraw,
}

/// Behavioral role of the negotiating agent. Protocol state machine decides
/// when strategy is asked, strategy decides what will be answered.
///
/// Default implementation is the plain argumentation protocol: accept only
/// the most preferred item, justify own proposals, rebut until there is nothing
/// more to say and concede afterwards.
pub trait NegotiationStrategy {
    /// Should agent start new threads with peers, it isn't discussing with.
    fn opens_threads(&self) -> bool {
        true
    }

    /// Item proposed at the beginning of the thread.
    fn opening_item(&mut self, view: &DiscussionView) -> Option<Item> {
        view.most_preferred().cloned()
    }

    fn react_to_proposal(&mut self, view: &DiscussionView, item: &Item) -> ProposalReaction {
        match view.most_preferred() {
            Some(best) if best == item => ProposalReaction::Accept,
            _ => ProposalReaction::AskWhy,
        }
    }

    /// Called with ARGUE message. `argument` is already included in `view.history`.
    fn react_to_argument(&mut self, view: &DiscussionView, argument: &Argument) -> Reaction {
        match view
            .generator()
            .generate(argument.item(), Some(argument), view.history)
        {
            Some(rebuttal) => Reaction::Argue(rebuttal),
            None => Reaction::Accept(argument.item().clone()),
        }
    }

    /// Called with ASK_WHY message about our item.
    fn react_to_ask_why(&mut self, view: &DiscussionView, item: &Item) -> Reaction {
        if let Some(argument) = view.generator().generate(item, None, view.history) {
            return Reaction::Argue(argument);
        }

        match self.alternative_item(view, item) {
            Some(alternative) => Reaction::Propose(alternative),
            None => Reaction::Withdraw,
        }
    }

    /// Item to propose instead of `disputed`, when we can't justify it.
    /// Items we can justify go first. Without them any other item will do,
    /// `None` only when `disputed` is the only item.
    fn alternative_item(&mut self, view: &DiscussionView, disputed: &Item) -> Option<Item> {
        let generator = view.generator();
        let (justified, unjustified): (Vec<_>, Vec<_>) = view
            .items
            .iter()
            .filter(|item| *item != disputed)
            .cloned()
            .partition(|item| generator.justify(item).is_some());

        view.preferences
            .most_preferred(&justified)
            .or_else(|| view.preferences.most_preferred(&unjustified))
            .cloned()
    }
}
