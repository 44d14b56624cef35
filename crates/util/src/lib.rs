//! Command-line reading and timing helpers used by the adlib tools.

mod command_line;
mod timer;

pub use command_line::{Command, CommandLineError, CommandLineParser, CommandLineSetting};
pub use timer::{EasyTimer, TimeUnit};
