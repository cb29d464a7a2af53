//! Domain types for the chat relay.
//!
//! These are pure data types with no transport or provider dependencies.

mod frame;
mod turn;

pub use frame::{DONE_DATA, DONE_EVENT, Delta, ERROR_EVENT, ErrorPayload, RelayResult, WireFrame};
pub use turn::{Conversation, Role, Turn};
