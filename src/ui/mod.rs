//! Terminal presentation shell.

pub mod input;
pub mod messages;
pub mod render;
pub mod shell;
