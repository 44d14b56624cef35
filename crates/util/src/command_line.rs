//! Prefix-based command-line reader.
//!
//! A [`CommandLineSetting`] declares a prefix such as `-o` and how many
//! parameters follow it. [`CommandLineParser::parse`] splits `argv` into one
//! [`Command`] per prefix given, plus the empty-prefix command `""` holding
//! every argument after the last prefix's parameters.

use std::collections::BTreeMap;
use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandLineError {
    #[error("(program error) prefix \"{0}\" is defined twice")]
    DuplicateSetting(String),
    #[error("(program error) settings contain the empty prefix \"\"")]
    EmptyPrefix,
    #[error("(program error) there is no command line content")]
    EmptyCommandLine,
    #[error("prefix \"{0}\" is given twice")]
    DuplicateInput(String),
    #[error("prefix \"{0}\" is missing parameters")]
    InsufficientParameters(String),
    #[error("parameter \"{0}\" is invalid")]
    InvalidParameter(String),
}

/// One accepted prefix. Settings compare equal when their prefixes do.
#[derive(Debug, Clone, Eq)]
pub struct CommandLineSetting {
    prefix: String,
    parameter_count: usize,
    help: String,
}

impl PartialEq for CommandLineSetting {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix
    }
}

impl CommandLineSetting {
    pub fn new(prefix: impl Into<String>, parameter_count: usize, help: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            parameter_count,
            help: help.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn number_of_parameter(&self) -> usize {
        self.parameter_count
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Writes one block per setting, then a `NO PREFIX` block unless
    /// `no_prefix_help` is empty.
    pub fn show_help(
        settings: &[CommandLineSetting],
        no_prefix_help: &str,
        out: &mut impl Write,
    ) -> io::Result<()> {
        for setting in settings {
            write!(out, "{}", setting.prefix)?;
            if setting.parameter_count > 0 {
                write!(out, " (+ {} parameters)", setting.parameter_count)?;
            }
            writeln!(out)?;
            writeln!(out, "{}", setting.help)?;
            writeln!(out)?;
        }
        if !no_prefix_help.is_empty() {
            writeln!(out, "NO PREFIX")?;
            writeln!(out, "{no_prefix_help}")?;
            writeln!(out)?;
        }
        out.flush()
    }
}

/// A prefix together with the parameters that followed it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Command {
    prefix: String,
    args: Vec<String>,
}

impl Command {
    pub fn new(prefix: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            prefix: prefix.into(),
            args,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Command-line reader. Each call resets the recorded command line and
/// error list.
///
/// ```
/// use adlib_util::{CommandLineParser, CommandLineSetting};
///
/// let settings = [
///     CommandLineSetting::new("-o", 1, "output file"),
///     CommandLineSetting::new("-v", 0, "verbose"),
/// ];
/// let mut parser = CommandLineParser::new();
/// let commands = parser.parse(&settings, &["tool", "-v", "-o", "out.bin", "a", "b"]);
/// assert_eq!(commands["-o"].args(), ["out.bin"]);
/// assert!(commands["-v"].args().is_empty());
/// assert_eq!(commands[""].args(), ["a", "b"]);
/// assert_eq!(parser.command_arguments(), "tool -v -o out.bin a b");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineParser {
    arguments: String,
    errors: Vec<CommandLineError>,
}

impl CommandLineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `argv` (program name first) into commands keyed by prefix.
    /// On error the map is empty and the error is recorded.
    pub fn parse<S: AsRef<str>>(
        &mut self,
        settings: &[CommandLineSetting],
        argv: &[S],
    ) -> BTreeMap<String, Command> {
        self.try_parse(settings, argv).unwrap_or_default()
    }

    pub fn try_parse<S: AsRef<str>>(
        &mut self,
        settings: &[CommandLineSetting],
        argv: &[S],
    ) -> Result<BTreeMap<String, Command>, CommandLineError> {
        self.arguments.clear();
        self.errors.clear();
        let argv: Vec<&str> = argv.iter().map(AsRef::as_ref).collect();
        let result = self.read(settings, &argv);
        if let Err(err) = &result {
            debug!(error = %err, "command line rejected");
            self.errors.push(err.clone());
        }
        result
    }

    /// The full command line of the last call, program name included.
    pub fn command_arguments(&self) -> &str {
        &self.arguments
    }

    pub fn errors(&self) -> &[CommandLineError] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    fn read(
        &mut self,
        settings: &[CommandLineSetting],
        argv: &[&str],
    ) -> Result<BTreeMap<String, Command>, CommandLineError> {
        if argv.is_empty() {
            return Err(CommandLineError::EmptyCommandLine);
        }
        self.arguments = argv.join(" ");
        check_settings(settings)?;
        let last = prefixed_region_end(settings, argv)?;
        build_commands(settings, argv, last)
    }
}

fn check_settings(settings: &[CommandLineSetting]) -> Result<(), CommandLineError> {
    for (i, setting) in settings.iter().enumerate() {
        if setting.prefix.is_empty() {
            return Err(CommandLineError::EmptyPrefix);
        }
        if settings[i + 1..].contains(setting) {
            return Err(CommandLineError::DuplicateSetting(setting.prefix.clone()));
        }
    }
    Ok(())
}

/// Index of the last argument consumed by the last prefix given, clamped to
/// `argv`. Zero when no prefix appears.
fn prefixed_region_end(
    settings: &[CommandLineSetting],
    argv: &[&str],
) -> Result<usize, CommandLineError> {
    let mut seen = vec![false; settings.len()];
    let mut end = 0;
    for (i, arg) in argv.iter().enumerate().skip(1) {
        if let Some(j) = settings.iter().position(|s| s.prefix == *arg) {
            if seen[j] {
                return Err(CommandLineError::DuplicateInput(settings[j].prefix.clone()));
            }
            seen[j] = true;
            end = i + settings[j].parameter_count;
        }
    }
    Ok(end.min(argv.len() - 1))
}

fn build_commands(
    settings: &[CommandLineSetting],
    argv: &[&str],
    last: usize,
) -> Result<BTreeMap<String, Command>, CommandLineError> {
    let mut commands = BTreeMap::new();
    let rest = argv[last + 1..].iter().map(|s| s.to_string()).collect();
    commands.insert(String::new(), Command::new("", rest));

    let mut i = 1;
    while i <= last {
        let prefix = argv[i];
        let Some(setting) = settings.iter().find(|s| s.prefix == prefix) else {
            return Err(CommandLineError::InvalidParameter(prefix.to_owned()));
        };
        if i + setting.parameter_count > last {
            return Err(CommandLineError::InsufficientParameters(prefix.to_owned()));
        }
        let args = argv[i + 1..=i + setting.parameter_count]
            .iter()
            .map(|s| s.to_string())
            .collect();
        commands.insert(prefix.to_owned(), Command::new(prefix, args));
        i += setting.parameter_count + 1;
    }
    Ok(commands)
}
