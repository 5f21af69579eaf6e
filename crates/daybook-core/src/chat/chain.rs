//! Message chain ordering.
//!
//! Messages of a chat form a singly-linked list from the root (no parent) to
//! the latest message. The backend does not promise to return them in that
//! order, so fetched histories are re-linked here before they reach a session.

use super::message::Message;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// A broken chain invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainViolation {
    #[error("chain has no root message")]
    MissingRoot,

    #[error("chain has {0} root messages")]
    MultipleRoots(usize),

    #[error("root message '{0}' is not first")]
    RootNotFirst(String),

    #[error("message '{message_id}' references unknown or later parent '{parent_id}'")]
    DanglingParent {
        message_id: String,
        parent_id: String,
    },

    #[error("message '{message_id}' belongs to chat '{found}', expected '{expected}'")]
    ForeignMessage {
        message_id: String,
        expected: String,
        found: String,
    },
}

/// Puts messages into chain order, root first.
///
/// Starting at the root, each step follows the first not-yet-visited child.
/// Messages that cannot be reached this way keep their incoming relative
/// order and are appended at the end. An input without a root is returned
/// unchanged.
pub fn order_chain(messages: Vec<Message>) -> Vec<Message> {
    let Some(root_index) = messages.iter().position(Message::is_root) else {
        return messages;
    };

    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, message) in messages.iter().enumerate() {
        if let Some(parent) = message.parent_id.as_deref() {
            children.entry(parent).or_default().push(index);
        }
    }

    let mut visited = vec![false; messages.len()];
    let mut order = Vec::with_capacity(messages.len());
    let mut current = Some(root_index);

    while let Some(index) = current {
        visited[index] = true;
        order.push(index);
        current = children
            .get(messages[index].id.as_str())
            .and_then(|candidates| candidates.iter().copied().find(|&c| !visited[c]));
    }

    order.extend((0..messages.len()).filter(|&i| !visited[i]));

    let mut slots: Vec<Option<Message>> = messages.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}

/// Checks the chain invariants of an ordered message sequence.
///
/// Exactly one message is the root and it comes first; every other message's
/// parent appears earlier in the sequence; all messages share the root's chat.
/// An empty sequence is valid.
pub fn verify_chain(messages: &[Message]) -> Result<(), ChainViolation> {
    let Some(first) = messages.first() else {
        return Ok(());
    };

    let roots: Vec<&Message> = messages.iter().filter(|m| m.is_root()).collect();
    match roots.len() {
        0 => return Err(ChainViolation::MissingRoot),
        1 => {}
        n => return Err(ChainViolation::MultipleRoots(n)),
    }
    if !first.is_root() {
        return Err(ChainViolation::RootNotFirst(roots[0].id.clone()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for message in messages {
        if message.chat_id != first.chat_id {
            return Err(ChainViolation::ForeignMessage {
                message_id: message.id.clone(),
                expected: first.chat_id.clone(),
                found: message.chat_id.clone(),
            });
        }
        if let Some(parent) = message.parent_id.as_deref()
            && !seen.contains(parent)
        {
            return Err(ChainViolation::DanglingParent {
                message_id: message.id.clone(),
                parent_id: parent.to_string(),
            });
        }
        seen.insert(message.id.as_str());
    }

    Ok(())
}
