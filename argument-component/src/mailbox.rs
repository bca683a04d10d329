use crate::message::{AgentId, Message, Performative};

/// Agent's inbox. Keeps track of messages, that were already consumed.
#[derive(Clone, Debug, Default)]
pub struct Mailbox {
    unread: Vec<Message>,
    read: Vec<Message>,
}

impl Mailbox {
    pub fn new() -> Mailbox {
        Mailbox::default()
    }

    pub fn receive(&mut self, message: Message) {
        self.unread.push(message);
    }

    /// Marks all unread messages as read and returns them.
    pub fn new_messages(&mut self) -> Vec<Message> {
        let unread = std::mem::take(&mut self.unread);
        self.read.extend(unread.iter().cloned());
        unread
    }

    /// All received messages. Unread messages are marked as read.
    pub fn messages(&mut self) -> &[Message] {
        self.new_messages();
        &self.read
    }

    /// Read and unread messages with performative. Doesn't change read state.
    pub fn messages_with_performative(&self, performative: Performative) -> Vec<&Message> {
        self.all()
            .filter(|message| message.performative() == performative)
            .collect()
    }

    /// Read and unread messages from `sender`. Doesn't change read state.
    pub fn messages_from(&self, sender: AgentId) -> Vec<&Message> {
        self.all().filter(|message| message.sender == sender).collect()
    }

    pub fn has_unread(&self, performative: Performative, sender: Option<AgentId>) -> bool {
        self.unread
            .iter()
            .any(|message| is_matching(message, performative, sender))
    }

    /// Removes the earliest unread message with `performative` (optionally only from
    /// `sender`) and moves it to read messages.
    ///
    /// Note: messages with the same performative are consumed in the order of arrival,
    /// so this is the *oldest* matching message, not the most recent one.
    pub fn pop_unread(
        &mut self,
        performative: Performative,
        sender: Option<AgentId>,
    ) -> Option<Message> {
        let idx = self
            .unread
            .iter()
            .position(|message| is_matching(message, performative, sender))?;

        let message = self.unread.remove(idx);
        self.read.push(message.clone());
        Some(message)
    }

    pub fn unread_count(&self) -> usize {
        self.unread.len()
    }

    fn all(&self) -> impl Iterator<Item = &Message> {
        self.read.iter().chain(self.unread.iter())
    }
}

fn is_matching(message: &Message, performative: Performative, sender: Option<AgentId>) -> bool {
    message.performative() == performative
        && sender.map(|sender| message.sender == sender).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Content;
    use test_case::test_case;
    use ya_preferences::Item;

    fn propose(sender: u32, name: &str) -> Message {
        Message::new(
            AgentId(sender),
            AgentId(0),
            Content::Propose(Item::new(name, "")),
        )
    }

    fn ask_why(sender: u32, name: &str) -> Message {
        Message::new(AgentId(sender), AgentId(0), Content::AskWhy(Item::new(name, "")))
    }

    #[test_case(1; "Single message")]
    #[test_case(5; "Five messages")]
    #[test_case(20; "Twenty messages")]
    fn test_drain_in_arrival_order(count: usize) {
        let mut mailbox = Mailbox::new();
        for i in 0..count {
            mailbox.receive(propose(1, &i.to_string()));
            mailbox.receive(ask_why(1, "noise"));
        }

        for i in 0..count {
            assert!(mailbox.has_unread(Performative::Propose, None));
            let message = mailbox.pop_unread(Performative::Propose, None).unwrap();
            assert_eq!(message.content.item().name, i.to_string());
        }

        assert!(!mailbox.has_unread(Performative::Propose, None));
        assert_eq!(mailbox.pop_unread(Performative::Propose, None), None);
        assert_eq!(mailbox.unread_count(), count);
    }

    #[test]
    fn test_pop_from_sender() {
        let mut mailbox = Mailbox::new();
        mailbox.receive(propose(1, "A"));
        mailbox.receive(propose(2, "B"));

        assert!(!mailbox.has_unread(Performative::Propose, Some(AgentId(3))));
        assert!(mailbox.has_unread(Performative::Propose, Some(AgentId(2))));

        let message = mailbox
            .pop_unread(Performative::Propose, Some(AgentId(2)))
            .unwrap();
        assert_eq!(message.content.item().name, "B");
        assert_eq!(mailbox.unread_count(), 1);
    }

    #[test]
    fn test_read_state() {
        let mut mailbox = Mailbox::new();
        mailbox.receive(propose(1, "A"));
        mailbox.receive(ask_why(2, "A"));
        mailbox.receive(propose(2, "B"));

        mailbox.pop_unread(Performative::AskWhy, None).unwrap();
        assert_eq!(mailbox.messages_with_performative(Performative::Propose).len(), 2);
        assert_eq!(mailbox.messages_from(AgentId(2)).len(), 2);
        assert_eq!(mailbox.unread_count(), 2);

        let new = mailbox.new_messages();
        assert_eq!(new.len(), 2);
        assert_eq!(mailbox.unread_count(), 0);
        assert!(mailbox.new_messages().is_empty());
        assert_eq!(mailbox.messages().len(), 3);
    }
}
