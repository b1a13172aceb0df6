//! Fruit Machine — procedural slot machines and their captions.
//!
//! Spins a themed fruit machine and writes everything a bot would post
//! about it: the status caption, drawn from a weighted template grammar
//! whose odds are uniform over distinct expansions rather than over
//! tree nodes, plus the accessibility description and the jackpot
//! verdict. Art selection picks the pieces; composing and publishing
//! them is the caller's business.

pub mod catalog;
pub mod core;
pub mod schema;
