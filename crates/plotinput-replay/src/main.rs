//! Replay a pointer-input script and print what the router delivered.
//!
//! Usage: `plotinput-replay [SCRIPT.json]`. Reads the script from stdin when no
//! path (or `-`) is given. Set `RUST_LOG=debug` to trace router transitions.

use plotinput_replay::{ReplayError, Script, run};
use std::io::{self, Read};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let path = std::env::args().nth(1);
    match replay(path.as_deref()) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Replay failed: {err}");
            eprintln!("plotinput-replay: {err}");
            ExitCode::FAILURE
        }
    }
}

fn replay(path: Option<&str>) -> Result<String, ReplayError> {
    let script = match path {
        Some(path) if path != "-" => Script::load(path)?,
        _ => {
            let mut json = String::new();
            io::stdin()
                .read_to_string(&mut json)
                .map_err(|source| ReplayError::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Script::from_json_str(&json)?
        }
    };
    run(&script)?.to_json_lines()
}
