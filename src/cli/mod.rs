pub mod args;
pub mod commands;
pub mod settings;

pub use args::{Cli, Commands, InputArgs};
pub use commands::run;
pub use settings::{Overrides, Settings};
