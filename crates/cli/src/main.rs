use std::process::ExitCode;

fn main() -> ExitCode {
    heliodesk_cli::run()
}
