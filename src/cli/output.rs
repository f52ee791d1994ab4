//! User-facing result reporting.
//!
//! One `PASS`/`FAIL` line per testcase the moment it completes, failure
//! detail (stage, cause chain, diff or captured stderr) indented underneath,
//! and a single summary line after the run. Colors go through `termcolor`
//! and are disabled automatically when stdout is not a terminal.

use std::error::Error;
use std::io::Write;
use std::time::Duration;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::engine::{Failure, Verdict};
use crate::errors::SqltestError;
use crate::runner::Outcomes;

pub struct Reporter {
    stream: StandardStream,
}

impl Reporter {
    pub fn stdout() -> Self {
        let choice = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Reporter {
            stream: StandardStream::stdout(choice),
        }
    }

    pub fn pass(&mut self, name: &str, verdict: Verdict, took: Duration) {
        self.set_color(Color::Green, true);
        let _ = write!(self.stream, "PASS");
        self.reset();
        let note = match verdict {
            Verdict::Passed => "",
            Verdict::Approved => " (approved)",
        };
        let _ = writeln!(self.stream, " {name}{note} ({took:.2?})");
    }

    pub fn fail(&mut self, name: &str, failure: &Failure, took: Duration) {
        self.set_color(Color::Red, true);
        let _ = write!(self.stream, "FAIL");
        self.reset();
        let _ = writeln!(self.stream, " {name} ({took:.2?})");
        let _ = writeln!(self.stream, "  stage: {}", failure.stage);
        let _ = writeln!(self.stream, "  cause: {}", failure.error);

        let mut source = failure.error.source();
        while let Some(cause) = source {
            let _ = writeln!(self.stream, "  caused by: {cause}");
            source = cause.source();
        }

        match &failure.error {
            SqltestError::Comparison { diff } => self.print_block(diff),
            SqltestError::ExternalCommand { stderr, .. } if !stderr.is_empty() => {
                self.print_block(stderr)
            }
            _ => {}
        }
    }

    pub fn summary(&mut self, outcomes: &Outcomes, took: Duration) {
        if outcomes.all_passed() {
            self.set_color(Color::Green, true);
            let _ = write!(self.stream, "PASS");
            self.reset();
            let _ = writeln!(
                self.stream,
                " {} testcases ({took:.2?})",
                outcomes.passed
            );
        } else {
            self.set_color(Color::Red, true);
            let _ = write!(self.stream, "FAIL");
            self.reset();
            let _ = writeln!(
                self.stream,
                " {}/{} ({:.2}%) testcases ({took:.2?})",
                outcomes.failed,
                outcomes.total(),
                outcomes.percent_failed()
            );
        }
    }

    fn print_block(&mut self, text: &str) {
        for line in text.lines() {
            let _ = writeln!(self.stream, "    {line}");
        }
    }

    fn set_color(&mut self, color: Color, bold: bool) {
        let _ = self
            .stream
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
    }

    fn reset(&mut self) {
        let _ = self.stream.reset();
    }
}
