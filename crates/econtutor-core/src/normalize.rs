//! Message normalization.
//!
//! Fresh chat sessions never send a system turn; returning sessions that
//! already negotiated one must not get a second.

use crate::domain::{Conversation, Turn};

/// Ensure `persona` leads the conversation as a system turn.
///
/// If the first turn is already a system turn the conversation is returned
/// unchanged. Otherwise the persona is prepended and every input turn
/// follows in its original order. System turns past index 0 are passed
/// through as-is.
pub fn normalize(conversation: Conversation, persona: &str) -> Conversation {
    if conversation.first().is_some_and(Turn::is_system) {
        return conversation;
    }

    let mut normalized = Vec::with_capacity(conversation.len() + 1);
    normalized.push(Turn::system(persona));
    normalized.extend(conversation);
    normalized
}
