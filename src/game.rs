//! Game session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! Collaborator calls are requested through effects and their results come
//! back as events, so the transition function never performs I/O.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{Answer, GameConfig, GamePhase, GuessOutcome, QaEntry, Session};
pub use transition::{transition, TransitionError};
