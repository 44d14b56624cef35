//! `json-unpack`: MessagePack in, compact JSON text out.

use std::process::ExitCode;

use adlib::cli::{self, Direction};

fn main() -> ExitCode {
    cli::init_tracing();
    let argv: Vec<String> = std::env::args().collect();
    match cli::run(Direction::Unpack, &argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("json-unpack: {err}");
            ExitCode::FAILURE
        }
    }
}
