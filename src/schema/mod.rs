//! Data model shared by the phrase engine and the catalog loader.

pub mod machine;
pub mod symbol;
