//! AI systems (FSM transitions, movement decisions)

pub mod movement;
pub mod transitions;
