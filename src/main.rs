//! Play Simon in the terminal.
//!
//! Timings can be tweaked with `SIMON_TIMINGS` (a JSON object, e.g. `{"round_pause": 500}`) and `SIMON_SPEED` (a
//! multiplier, e.g. `1.5`). Logs go to stderr and are filtered with `RUST_LOG`, so redirect them somewhere other than
//! the terminal the game's in: `RUST_LOG=debug simon 2>simon.log`.

use std::process::ExitCode;

use log::error;
use simon::{term, Engine};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let timings = match term::timings_from_env() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match term::run(Engine::random().timings(timings)) {
        Ok(engine) => {
            println!("Best level: {}", engine.best());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("terminal frontend failed: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
