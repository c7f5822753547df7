//! Command handlers. Each translates parsed arguments into core calls.

pub mod completions;
pub mod create;
