//! todo - Keyboard-driven in-memory to-do list

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = todo_list::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
