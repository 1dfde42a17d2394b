mod command_enum;
mod help;
mod parse;

pub use command_enum::{Command, CommandError};
pub use help::help_text;
