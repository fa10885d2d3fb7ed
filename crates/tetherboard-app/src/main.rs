//! Main application entry point.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: tetherboard <script.json>");
        return ExitCode::from(2);
    };
    log::info!("Replaying {:?}", path);

    let result = tetherboard_app::Script::load(&path).and_then(|script| tetherboard_app::run(&script));
    match result {
        Ok(canvas) => {
            print!("{}", tetherboard_app::summarize(&canvas));
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
