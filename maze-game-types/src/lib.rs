//! Types for the maze-chase game: the capability traits the search engines
//! are written against, the closed set of moves, and a concrete maze board
//! with a wire (JSON) representation used by the evaluators and by tests.

#[macro_use]
extern crate serde_derive;

pub mod types;
pub mod wire_representation;
