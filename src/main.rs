use std::process::ExitCode;

fn main() -> ExitCode {
    sqltest::cli::run()
}
