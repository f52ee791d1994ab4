//! Error taxonomy for the whole runner.
//!
//! Every failure mode is a variant of [`SqltestError`]; the engine attaches
//! the pipeline stage separately (see [`crate::engine::Failure`]), so the
//! variants here only describe *what* went wrong, not *where*.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// What a provisioner operation was doing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionAction {
    Create,
    Drop,
}

impl std::fmt::Display for ProvisionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProvisionAction::Create => write!(f, "create"),
            ProvisionAction::Drop => write!(f, "drop"),
        }
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum SqltestError {
    #[error("failed to read input directory {}", .path.display())]
    #[diagnostic(code(sqltest::discovery))]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid filter pattern {pattern:?}")]
    #[diagnostic(
        code(sqltest::pattern),
        help("filters are regular expressions searched against testcase names")
    )]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid database URI {uri:?}")]
    #[diagnostic(code(sqltest::uri))]
    Uri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to connect to database server")]
    #[diagnostic(
        code(sqltest::connect),
        help("check --db and that the server is reachable")
    )]
    Connect {
        #[source]
        source: postgres::Error,
    },

    #[error("failed to {action} database {name:?}")]
    #[diagnostic(code(sqltest::provision))]
    Provision {
        action: ProvisionAction,
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Non-zero exit or launch failure of a hook, the SQL client, or any
    /// other external process. `status` is `None` when the child never ran.
    #[error("external command failed: {command}")]
    #[diagnostic(code(sqltest::exec))]
    ExternalCommand {
        command: String,
        status: Option<i32>,
        stderr: String,
        #[source]
        source: Option<io::Error>,
    },

    /// The actual output differs from the golden file. Carries the rendered
    /// diff text verbatim; only empty-vs-non-empty is decided elsewhere.
    #[error("actual output differs from expected")]
    #[diagnostic(
        code(sqltest::diff),
        help("re-run with --approve <filter> to accept the actual output")
    )]
    Comparison { diff: String },

    #[error("{context}")]
    #[diagnostic(code(sqltest::io))]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl SqltestError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        SqltestError::Io {
            context: context.into(),
            source,
        }
    }
}
