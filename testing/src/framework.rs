use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use ya_argumentation::factory::{create_agents, create_strategy, DiscussionConfig};
use ya_argumentation::{
    AgentId, ArgumentAgent, MessageService, NegotiationStrategy, StepContext,
};
use ya_preferences::{Item, Preferences};

use crate::error::{FrameworkError, NegotiationError};
use crate::negotiation_record::NegotiationRecord;

/// Order, in which agents are stepped in a single tick.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Activation {
    /// Order of adding agents.
    Sequential,
    /// New permutation each tick, reproducible for the same seed.
    Random { seed: u64 },
}

/// Runs discussion between agents in discrete ticks.
///
/// Each tick delivers messages sent in the previous tick and then steps
/// every agent exactly once.
pub struct Framework {
    pub agents: Vec<ArgumentAgent>,
    pub items: Vec<Item>,

    activation: Activation,
    rng: StdRng,
    service: MessageService,
    record: NegotiationRecord,
    tick: u64,
}

impl Framework {
    pub fn new(items: Vec<Item>) -> Framework {
        let _ = env_logger::builder().try_init();

        Framework {
            agents: vec![],
            items,
            activation: Activation::Sequential,
            rng: StdRng::seed_from_u64(0),
            service: MessageService::new(),
            record: NegotiationRecord::new(100),
            tick: 0,
        }
    }

    pub fn from_config(config: DiscussionConfig) -> anyhow::Result<Framework> {
        let mut framework = Framework::new(config.items.clone());
        framework.agents = create_agents(config)?;
        Ok(framework)
    }

    pub fn activation(mut self, activation: Activation) -> Self {
        if let Activation::Random { seed } = activation {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.activation = activation;
        self
    }

    /// Maximal number of messages in a single thread before it is considered infinite loop.
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.record = NegotiationRecord::new(max_steps);
        self
    }

    pub fn add_agent(
        mut self,
        name: &str,
        preferences: Preferences,
        strategy: Box<dyn NegotiationStrategy>,
    ) -> Self {
        let id = AgentId(self.agents.len() as u32);
        self.agents
            .push(ArgumentAgent::new(id, name, preferences, strategy));
        self
    }

    pub fn add_builtin(
        self,
        name: &str,
        strategy: &str,
        params: serde_yaml::Value,
        preferences: Preferences,
    ) -> anyhow::Result<Self> {
        let strategy = create_strategy(strategy, params)?;
        Ok(self.add_agent(name, preferences, strategy))
    }

    pub fn agent(&self, name: &str) -> Result<&ArgumentAgent, NegotiationError> {
        self.agents
            .iter()
            .find(|agent| agent.name() == name)
            .ok_or_else(|| NegotiationError::AgentNotFound(name.to_string()))
    }

    pub fn record(&self) -> &NegotiationRecord {
        &self.record
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn tick(&mut self) {
        self.tick += 1;

        for message in self.service.dispatch_messages(self.agents.iter_mut()) {
            self.record.message(self.tick, message);
        }

        let peers = self.agents.iter().map(|agent| agent.id()).collect::<Vec<_>>();
        let mut order = (0..self.agents.len()).collect::<Vec<_>>();
        if let Activation::Random { .. } = self.activation {
            order.shuffle(&mut self.rng);
        }

        let ctx = StepContext {
            tick: self.tick,
            items: &self.items,
            peers: &peers,
        };
        for idx in order {
            self.agents[idx].step(&ctx, &mut self.service);
        }
    }

    /// Runs exactly `ticks` ticks, unless some thread exceeds steps limit.
    pub fn run(&mut self, ticks: u64) -> Result<NegotiationRecord, FrameworkError> {
        for _ in 0..ticks {
            self.tick();
            self.check_loops()?;
        }
        Ok(self.record.clone())
    }

    /// Runs until `predicate` is satisfied after a tick.
    pub fn run_until<F>(
        &mut self,
        max_ticks: u64,
        predicate: F,
    ) -> Result<NegotiationRecord, FrameworkError>
    where
        F: Fn(&Framework) -> bool,
    {
        for _ in 0..max_ticks {
            self.tick();
            self.check_loops()?;

            if predicate(&*self) {
                log::info!("Finished after {} ticks.", self.tick);
                return Ok(self.record.clone());
            }
        }
        Err(FrameworkError::from(
            NegotiationError::Timeout(max_ticks),
            &self.record,
        ))
    }

    pub fn run_until_deal(&mut self, max_ticks: u64) -> Result<NegotiationRecord, FrameworkError> {
        self.run_until(max_ticks, |framework| framework.record.deals() > 0)
    }

    fn check_loops(&self) -> Result<(), FrameworkError> {
        match self.record.infinite_loop() {
            Some(pair) => Err(FrameworkError::from(
                NegotiationError::InfiniteLoop(pair),
                &self.record,
            )),
            None => Ok(()),
        }
    }
}
