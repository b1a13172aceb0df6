//! The generation engine: templates, weights, selection, and spins.

pub mod context;
pub mod english;
pub mod machine;
pub mod phrase;
pub mod select;
pub mod template;
