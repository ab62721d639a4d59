use std::process::ExitCode;

fn main() -> ExitCode {
    ts_cli::run()
}
