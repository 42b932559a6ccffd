pub mod commands;
mod render;
pub mod setup;

pub use commands::{error_hint, run};
