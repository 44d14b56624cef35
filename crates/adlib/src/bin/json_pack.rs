//! `json-pack`: JSON text in, MessagePack out.

use std::process::ExitCode;

use adlib::cli::{self, Direction};

fn main() -> ExitCode {
    cli::init_tracing();
    let argv: Vec<String> = std::env::args().collect();
    match cli::run(Direction::Pack, &argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("json-pack: {err}");
            ExitCode::FAILURE
        }
    }
}
