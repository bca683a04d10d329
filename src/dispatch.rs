use std::collections::HashMap;

use ya_argument_component::{AgentId, Message};

/// Anything that can get messages from `MessageService`.
pub trait Recipient {
    fn id(&self) -> AgentId;
    fn receive(&mut self, message: Message);
}

/// Queues messages sent during a tick and delivers them on `dispatch_messages`.
///
/// Messages are never delivered in the same tick they were sent, so agents
/// activated later in the tick don't have advantage over earlier ones.
#[derive(Debug, Default)]
pub struct MessageService {
    queue: Vec<Message>,
}

impl MessageService {
    pub fn new() -> MessageService {
        MessageService::default()
    }

    pub fn send(&mut self, message: Message) {
        log::trace!("Queued message: {}", message);
        self.queue.push(message);
    }

    /// Messages waiting for delivery, in the order they were sent.
    pub fn pending(&self) -> &[Message] {
        &self.queue
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Delivers all queued messages to their receivers. Returns delivered messages
    /// in the order they were sent. Messages to unknown agents are dropped.
    pub fn dispatch_messages<'a, R, I>(&mut self, recipients: I) -> Vec<Message>
    where
        R: Recipient + 'a,
        I: IntoIterator<Item = &'a mut R>,
    {
        let mut recipients = recipients
            .into_iter()
            .map(|recipient| (recipient.id(), recipient))
            .collect::<HashMap<_, _>>();

        let mut delivered = Vec::with_capacity(self.queue.len());
        for message in self.queue.drain(..) {
            match recipients.get_mut(&message.receiver) {
                Some(recipient) => {
                    log::debug!("{}", message);
                    recipient.receive(message.clone());
                    delivered.push(message);
                }
                None => log::warn!("Dropping message to unknown agent: {}", message),
            }
        }
        delivered
    }
}
