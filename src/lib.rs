pub mod cli;
pub mod engine;
pub mod error;
pub mod rule;
pub mod shell;
pub mod store;
