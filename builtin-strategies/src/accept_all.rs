use ya_argument_component::{
    Argument, DiscussionView, Item, NegotiationStrategy, ProposalReaction, Reaction,
};

/// Strategy that accepts every proposal and concedes to every argument.
/// It still justifies its own proposals, when asked.
pub struct AcceptAll {}

impl AcceptAll {
    pub fn new(_config: serde_yaml::Value) -> anyhow::Result<AcceptAll> {
        Ok(AcceptAll {})
    }
}

impl NegotiationStrategy for AcceptAll {
    fn react_to_proposal(&mut self, view: &DiscussionView, item: &Item) -> ProposalReaction {
        log::info!(
            "AcceptAll [{}]: accepting [{}] proposed by [{}].",
            view.me,
            item.name,
            view.peer
        );
        ProposalReaction::Accept
    }

    fn react_to_argument(&mut self, _view: &DiscussionView, argument: &Argument) -> Reaction {
        Reaction::Accept(argument.item().clone())
    }
}
