//! The sqltest command-line interface.
//!
//! Wires the pre-flight checks (filters, URI, discovery, admin connection,
//! output directory) to the run controller and maps the session outcome to
//! the process exit status. Any error returned from [`run_suite`] is fatal
//! and happens before the first testcase executes.

use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::args::SqltestArgs;
use crate::cli::output::Reporter;
use crate::discovery;
use crate::engine::{Engine, EngineConfig};
use crate::errors::SqltestError;
use crate::process::ShellRunner;
use crate::provision::{DatabaseUri, NameGenerator, PgProvisioner};
use crate::runner::{self, Outcomes};

pub mod args;
pub mod output;

pub fn run() -> ExitCode {
    let args = SqltestArgs::parse();
    init_logging(args.debug);

    match run_suite(&args) {
        Ok(outcomes) if outcomes.all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "sqltest=debug" } else { "sqltest=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_suite(args: &SqltestArgs) -> Result<Outcomes, SqltestError> {
    let run_filter = discovery::compile_filter(&args.run)?;
    let approve = args
        .approve
        .as_deref()
        .map(discovery::compile_filter)
        .transpose()?;
    let admin_uri = DatabaseUri::parse(&args.db)?;

    let testcases = discovery::load_testcases(&args.dir_in)?;
    let testcases = discovery::filter_testcases(testcases, &run_filter);

    let mut provisioner = PgProvisioner::connect(&admin_uri)?;
    let dir_out = tempfile::Builder::new()
        .prefix("sqltest_")
        .tempdir()
        .map_err(|e| SqltestError::io("create output directory", e))?;

    let names = NameGenerator::new();
    let process = ShellRunner;
    let config = EngineConfig {
        dir_in: &args.dir_in,
        dir_expected: &args.dir_expected,
        dir_out: dir_out.path(),
        setup: args.setup.as_deref(),
        teardown: args.teardown.as_deref(),
        approve: approve.as_ref(),
        admin_uri: &admin_uri,
    };

    let mut engine = Engine::new(config, &mut provisioner, &process, &names);
    let mut reporter = Reporter::stdout();
    let outcomes = runner::run_all(&mut engine, &testcases, &mut reporter);

    if args.no_rm {
        let kept = dir_out.into_path();
        info!(path = %kept.display(), "keeping output directory");
    }

    Ok(outcomes)
}
