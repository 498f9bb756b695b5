use std::process::ExitCode;

fn main() -> ExitCode {
    shipwise_cli::run()
}
