pub mod args;
pub mod commands;
pub mod menu;

pub use args::{BreakdownSelection, Cli, Commands};
pub use commands::run;
pub use menu::{Menu, MenuChoice};
