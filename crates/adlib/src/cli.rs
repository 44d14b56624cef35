//! Shared driver for the `json-pack` and `json-unpack` binaries.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use adlib_json::{JsonParser, MsgpackParser, ParseError};
use adlib_util::{CommandLineError, CommandLineParser, CommandLineSetting, EasyTimer, TimeUnit};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    CommandLine(#[from] CommandLineError),
    #[error("{0}")]
    Usage(String),
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Which way a tool converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// JSON text to MessagePack.
    Pack,
    /// MessagePack to JSON text.
    Unpack,
}

impl Direction {
    fn tool_name(self) -> &'static str {
        match self {
            Direction::Pack => "json-pack",
            Direction::Unpack => "json-unpack",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub timing: bool,
    pub help: bool,
}

impl Options {
    pub fn settings() -> Vec<CommandLineSetting> {
        vec![
            CommandLineSetting::new("-i", 1, "Input file. Reads standard input when omitted."),
            CommandLineSetting::new("-o", 1, "Output file. Writes standard output when omitted."),
            CommandLineSetting::new("-t", 0, "Log the elapsed conversion time in milliseconds."),
            CommandLineSetting::new("-h", 0, "Show this help."),
        ]
    }

    /// Reads options from `argv` (program name first). A single trailing
    /// argument is taken as the input file when `-i` is absent.
    pub fn from_args<S: AsRef<str>>(argv: &[S]) -> Result<Self, CliError> {
        let mut parser = CommandLineParser::new();
        let commands = parser.try_parse(&Self::settings(), argv)?;
        debug!(command = parser.command_arguments(), "command line read");

        let mut options = Options {
            input: commands.get("-i").map(|c| PathBuf::from(&c.args()[0])),
            output: commands.get("-o").map(|c| PathBuf::from(&c.args()[0])),
            timing: commands.contains_key("-t"),
            help: commands.contains_key("-h"),
        };
        let positional = commands.get("").map(|c| c.args()).unwrap_or_default();
        match positional {
            [] => {}
            [path] if options.input.is_none() => options.input = Some(PathBuf::from(path)),
            _ => {
                return Err(CliError::Usage(format!(
                    "unexpected arguments: {}",
                    positional.join(" ")
                )))
            }
        }
        Ok(options)
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `info`
/// default.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Converts one document. Warnings are logged, the first error is returned.
pub fn convert(direction: Direction, input: &[u8]) -> Result<Vec<u8>, ParseError> {
    match direction {
        Direction::Pack => {
            let mut parser = JsonParser::new();
            let value = parser.try_parse_bytes(input)?;
            for message in parser.warning_messages() {
                warn!("{message}");
            }
            Ok(value.dump_msgpack())
        }
        Direction::Unpack => {
            let mut parser = MsgpackParser::new();
            let value = parser.try_parse(input)?;
            for message in parser.warning_messages() {
                warn!("{message}");
            }
            Ok(value.dump().into_bytes())
        }
    }
}

pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => fs::read(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .map_err(|source| CliError::Io {
                    path: "<stdin>".into(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

pub fn write_output(path: Option<&Path>, data: &[u8]) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, data).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(data)
                .and_then(|()| stdout.flush())
                .map_err(|source| CliError::Io {
                    path: "<stdout>".into(),
                    source,
                })
        }
    }
}

/// Runs a tool end to end.
pub fn run<S: AsRef<str>>(direction: Direction, argv: &[S]) -> Result<(), CliError> {
    let options = Options::from_args(argv)?;
    if options.help {
        let no_prefix = "Input file, as an alternative to -i.";
        let mut stdout = io::stdout().lock();
        return CommandLineSetting::show_help(&Options::settings(), no_prefix, &mut stdout)
            .map_err(|source| CliError::Io {
                path: "<stdout>".into(),
                source,
            });
    }

    let timer = EasyTimer::new();
    let input = read_input(options.input.as_deref())?;
    let output = convert(direction, &input)?;
    write_output(options.output.as_deref(), &output)?;
    if options.timing {
        info!(
            tool = direction.tool_name(),
            elapsed_ms = timer.duration_time(TimeUnit::MilliSeconds),
            input_bytes = input.len(),
            output_bytes = output.len(),
            "conversion finished"
        );
    }
    Ok(())
}
