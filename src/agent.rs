use std::collections::HashMap;

use ya_argument_component::{
    AgentId, Argument, Content, DiscussionView, Mailbox, Message, NegotiationStrategy,
    Performative, ProposalReaction, Reaction,
};
use ya_preferences::{Item, Preferences};

use crate::dispatch::{MessageService, Recipient};
use crate::stats::AgentStats;

/// Environment of a single agent step, provided by the scheduler.
pub struct StepContext<'a> {
    pub tick: u64,
    /// All items, that can be negotiated.
    pub items: &'a [Item],
    /// All agents in simulation. May include stepping agent.
    pub peers: &'a [AgentId],
}

/// Agent negotiating with others by exchanging arguments.
///
/// Agent owns its preferences, mailbox and discussion threads. The only way to
/// affect other agents is sending messages through `MessageService`.
pub struct ArgumentAgent {
    id: AgentId,
    name: String,
    preferences: Preferences,
    strategy: Box<dyn NegotiationStrategy>,
    mailbox: Mailbox,
    /// Arguments exchanged with peers in currently open threads.
    discussions: HashMap<AgentId, Vec<Argument>>,
    stats: AgentStats,
}

impl ArgumentAgent {
    pub fn new(
        id: AgentId,
        name: impl ToString,
        preferences: Preferences,
        strategy: Box<dyn NegotiationStrategy>,
    ) -> ArgumentAgent {
        ArgumentAgent {
            id,
            name: name.to_string(),
            preferences,
            strategy,
            mailbox: Mailbox::new(),
            discussions: HashMap::new(),
            stats: AgentStats::default(),
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn stats(&self) -> &AgentStats {
        &self.stats
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    /// Arguments exchanged with `peer` in open thread. `None` if there is no thread.
    pub fn discussion(&self, peer: AgentId) -> Option<&[Argument]> {
        self.discussions.get(&peer).map(Vec::as_slice)
    }

    /// Single protocol step. Consumes all messages delivered before this tick.
    /// Messages sent during the step are queued in `outbox` and will be visible
    /// for recipients after next dispatch.
    pub fn step(&mut self, ctx: &StepContext, outbox: &mut MessageService) {
        log::trace!(
            "[{}] Agent '{}' step. Unread messages: {}",
            ctx.tick,
            self.name,
            self.mailbox.unread_count()
        );

        self.open_threads(ctx, outbox);
        self.process_arguments(ctx, outbox);
        self.process_commits(outbox);
        self.process_proposals(ctx, outbox);
        self.process_accepts(outbox);
        self.process_ask_why(ctx, outbox);
    }

    fn open_threads(&mut self, ctx: &StepContext, outbox: &mut MessageService) {
        if !self.strategy.opens_threads() {
            return;
        }

        for peer in ctx.peers {
            if *peer == self.id || self.discussions.contains_key(peer) {
                continue;
            }

            let view = DiscussionView {
                me: self.id,
                peer: *peer,
                preferences: &self.preferences,
                items: ctx.items,
                history: &[],
            };

            match self.strategy.opening_item(&view) {
                Some(item) => {
                    self.discussions.insert(*peer, vec![]);
                    self.send(*peer, Content::Propose(item), outbox);
                }
                None => log::debug!("Agent '{}' has nothing to propose to [{}].", self.name, peer),
            }
        }
    }

    fn process_arguments(&mut self, ctx: &StepContext, outbox: &mut MessageService) {
        while let Some(message) = self.mailbox.pop_unread(Performative::Argue, None) {
            let peer = message.sender;
            let argument = match message.content {
                Content::Argue(argument) => argument,
                _ => continue,
            };

            // Arguments from unknown peer start new thread.
            let history = self.discussions.entry(peer).or_default();
            history.push(argument.clone());

            let view = DiscussionView {
                me: self.id,
                peer,
                preferences: &self.preferences,
                items: ctx.items,
                history,
            };
            let reaction = self.strategy.react_to_argument(&view, &argument);
            self.execute(peer, reaction, outbox);
        }
    }

    fn process_commits(&mut self, outbox: &mut MessageService) {
        while let Some(message) = self.mailbox.pop_unread(Performative::Commit, None) {
            let peer = message.sender;
            let (item, ack) = match message.content {
                Content::Commit { item, ack } => (item, ack),
                _ => continue,
            };

            self.discussions.remove(&peer);

            if ack {
                log::info!(
                    "Deal done with item [{}] (agent {} -> {}).",
                    item.name,
                    peer,
                    self.id
                );
                self.stats.deal_won(&item);
            } else {
                self.stats.agreement();
                self.send(peer, Content::Commit { item, ack: true }, outbox);
            }
        }
    }

    fn process_proposals(&mut self, ctx: &StepContext, outbox: &mut MessageService) {
        while let Some(message) = self.mailbox.pop_unread(Performative::Propose, None) {
            let peer = message.sender;
            let item = match message.content {
                Content::Propose(item) => item,
                _ => continue,
            };

            // Proposal always starts the thread from scratch.
            self.discussions.insert(peer, vec![]);

            let view = DiscussionView {
                me: self.id,
                peer,
                preferences: &self.preferences,
                items: ctx.items,
                history: &[],
            };
            let content = match self.strategy.react_to_proposal(&view, &item) {
                ProposalReaction::Accept => Content::Accept(item),
                ProposalReaction::AskWhy => Content::AskWhy(item),
            };
            self.send(peer, content, outbox);
        }
    }

    fn process_accepts(&mut self, outbox: &mut MessageService) {
        while let Some(message) = self.mailbox.pop_unread(Performative::Accept, None) {
            let peer = message.sender;
            let item = match message.content {
                Content::Accept(item) => item,
                _ => continue,
            };

            self.stats.agreement();
            self.send(peer, Content::Commit { item, ack: false }, outbox);
        }
    }

    fn process_ask_why(&mut self, ctx: &StepContext, outbox: &mut MessageService) {
        while let Some(message) = self.mailbox.pop_unread(Performative::AskWhy, None) {
            let peer = message.sender;
            let item = match message.content {
                Content::AskWhy(item) => item,
                _ => continue,
            };

            let history = self.discussions.entry(peer).or_default();
            let view = DiscussionView {
                me: self.id,
                peer,
                preferences: &self.preferences,
                items: ctx.items,
                history,
            };
            let reaction = self.strategy.react_to_ask_why(&view, &item);
            self.execute(peer, reaction, outbox);
        }
    }

    fn execute(&mut self, peer: AgentId, reaction: Reaction, outbox: &mut MessageService) {
        match reaction {
            Reaction::Argue(argument) => {
                self.discussions
                    .entry(peer)
                    .or_default()
                    .push(argument.clone());
                self.send(peer, Content::Argue(argument), outbox);
            }
            Reaction::Accept(item) => self.send(peer, Content::Accept(item), outbox),
            Reaction::Propose(item) => {
                // New proposal starts new thread.
                self.discussions.insert(peer, vec![]);
                self.send(peer, Content::Propose(item), outbox);
            }
            Reaction::Withdraw => log::warn!(
                "Agent '{}' can neither justify its item nor propose another one to [{}]. Thread stays idle.",
                self.name,
                peer
            ),
        }
    }

    fn send(&mut self, peer: AgentId, content: Content, outbox: &mut MessageService) {
        self.stats.sent(content.performative());
        outbox.send(Message::new(self.id, peer, content));
    }
}

impl Recipient for ArgumentAgent {
    fn id(&self) -> AgentId {
        self.id
    }

    fn receive(&mut self, message: Message) {
        self.mailbox.receive(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ya_argument_component::Value;
    use ya_builtin_strategies::Argumentative;
    use ya_preferences::{CriterionName, CriterionValue};

    const ME: AgentId = AgentId(0);
    const PEER: AgentId = AgentId(1);

    fn items() -> Vec<Item> {
        vec![Item::new("E", "Electric"), Item::new("D", "Diesel")]
    }

    fn agent(initiate: bool) -> ArgumentAgent {
        let mut preferences = Preferences::new(CriterionName::all()).unwrap();
        let ratings = [
            ("E", CriterionName::ProductionCost, Value::Bad),
            ("E", CriterionName::EnvironmentImpact, Value::VeryGood),
            ("D", CriterionName::ProductionCost, Value::VeryGood),
            ("D", CriterionName::EnvironmentImpact, Value::VeryBad),
        ];
        for (name, criterion, value) in ratings {
            preferences.add_criterion_value(CriterionValue::new(Item::new(name, ""), criterion, value));
        }

        let config = serde_yaml::to_value(ya_builtin_strategies::argumentative::Config { initiate })
            .unwrap();
        ArgumentAgent::new(
            ME,
            "Agent",
            preferences,
            Box::new(Argumentative::new(config).unwrap()),
        )
    }

    fn step(agent: &mut ArgumentAgent, incoming: Vec<Content>) -> Vec<Message> {
        let items = items();
        let peers = [ME, PEER];
        let mut outbox = MessageService::new();

        for content in incoming {
            agent.receive(Message::new(PEER, ME, content));
        }
        agent.step(
            &StepContext {
                tick: 0,
                items: &items,
                peers: &peers,
            },
            &mut outbox,
        );
        outbox.pending().to_vec()
    }

    fn contents(messages: Vec<Message>) -> Vec<Content> {
        messages.into_iter().map(|message| message.content).collect()
    }

    #[test]
    fn test_open_thread_once() {
        let mut agent = agent(true);

        let sent = step(&mut agent, vec![]);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].receiver, PEER);
        assert_eq!(sent[0].content, Content::Propose(Item::new("D", "")));
        assert_eq!(agent.discussion(PEER), Some(&[][..]));

        assert!(step(&mut agent, vec![]).is_empty());
        assert_eq!(agent.stats().messages_sent, 1);
    }

    #[test]
    fn test_responder_doesnt_open_threads() {
        let mut agent = agent(false);
        assert!(step(&mut agent, vec![]).is_empty());
        assert_eq!(agent.discussion(PEER), None);
    }

    #[test]
    fn test_proposal_reactions() {
        let mut agent = agent(false);

        let sent = contents(step(
            &mut agent,
            vec![
                Content::Propose(Item::new("D", "")),
                Content::Propose(Item::new("E", "")),
            ],
        ));
        assert_eq!(
            sent,
            vec![
                Content::Accept(Item::new("D", "")),
                Content::AskWhy(Item::new("E", "")),
            ]
        );
    }

    #[test]
    fn test_commit_round_trip() {
        let mut agent = agent(false);

        let sent = contents(step(&mut agent, vec![Content::Accept(Item::new("D", ""))]));
        assert_eq!(
            sent,
            vec![Content::Commit {
                item: Item::new("D", ""),
                ack: false
            }]
        );
        assert_eq!(agent.stats().agreements, 1);

        // Acknowledgement closes the thread without response.
        let sent = step(
            &mut agent,
            vec![Content::Commit {
                item: Item::new("D", ""),
                ack: true,
            }],
        );
        assert!(sent.is_empty());
        assert_eq!(agent.stats().deals_won, 1);
        assert_eq!(agent.stats().deals_by_item.get("D"), Some(&1));
    }

    #[test]
    fn test_commit_acknowledged() {
        let mut agent = agent(false);
        step(&mut agent, vec![Content::Propose(Item::new("D", ""))]);
        assert!(agent.discussion(PEER).is_some());

        let sent = contents(step(
            &mut agent,
            vec![Content::Commit {
                item: Item::new("D", ""),
                ack: false,
            }],
        ));
        assert_eq!(
            sent,
            vec![Content::Commit {
                item: Item::new("D", ""),
                ack: true
            }]
        );
        assert_eq!(agent.discussion(PEER), None);
        assert_eq!(agent.stats().agreements, 1);
        assert_eq!(agent.stats().deals_won, 0);
    }

    #[test]
    fn test_argument_from_unknown_peer_opens_thread() {
        let mut agent = agent(false);
        let argument = Argument::support(Item::new("E", ""))
            .with_couple_value(CriterionName::EnvironmentImpact, Value::VeryGood);

        let sent = contents(step(&mut agent, vec![Content::Argue(argument.clone())]));

        // Nothing beats Electric on environment, but production cost is more important.
        let rebuttal = Argument::attack(Item::new("E", ""))
            .with_couple_value(CriterionName::ProductionCost, Value::Bad)
            .with_comparison(CriterionName::ProductionCost, CriterionName::EnvironmentImpact);
        assert_eq!(sent, vec![Content::Argue(rebuttal.clone())]);
        assert_eq!(agent.discussion(PEER), Some(&[argument, rebuttal][..]));
    }

    #[test]
    fn test_concede_without_argument() {
        let mut agent = agent(false);
        let argument = Argument::support(Item::new("D", ""))
            .with_couple_value(CriterionName::ProductionCost, Value::VeryGood);

        let sent = contents(step(&mut agent, vec![Content::Argue(argument)]));
        assert_eq!(sent, vec![Content::Accept(Item::new("D", ""))]);
    }

    #[test]
    fn test_answer_ask_why() {
        let mut agent = agent(false);

        let sent = contents(step(
            &mut agent,
            vec![
                Content::AskWhy(Item::new("D", "")),
                Content::AskWhy(Item::new("E", "")),
            ],
        ));
        assert_eq!(
            sent,
            vec![
                Content::Argue(
                    Argument::support(Item::new("D", ""))
                        .with_couple_value(CriterionName::ProductionCost, Value::VeryGood)
                ),
                Content::Argue(
                    Argument::support(Item::new("E", ""))
                        .with_couple_value(CriterionName::EnvironmentImpact, Value::VeryGood)
                ),
            ]
        );
        assert_eq!(agent.stats().performative_uses.get(&Performative::Argue), Some(&2));
    }

    #[test]
    fn test_processing_order() {
        let mut agent = agent(false);

        let sent = contents(step(
            &mut agent,
            vec![
                Content::AskWhy(Item::new("D", "")),
                Content::Accept(Item::new("D", "")),
                Content::Propose(Item::new("D", "")),
            ],
        ));
        let performatives = sent
            .iter()
            .map(Content::performative)
            .collect::<Vec<_>>();
        assert_eq!(
            performatives,
            vec![Performative::Accept, Performative::Commit, Performative::Argue]
        );
    }
}
