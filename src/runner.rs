//! Run controller: drives the filtered testcases through the engine strictly
//! one at a time, streams a result line per testcase as it completes, and
//! tallies the session outcome.

use std::time::Instant;

use crate::cli::output::Reporter;
use crate::discovery::Testcase;
use crate::engine::Engine;

/// Session-level pass/fail tally.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcomes {
    pub passed: usize,
    pub failed: usize,
}

impl Outcomes {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Decides the process exit status.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn percent_failed(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.failed as f64 / self.total() as f64 * 100.0
        }
    }
}

/// Executes every testcase sequentially, reporting each result as soon as it
/// is known, then the summary line.
pub fn run_all(engine: &mut Engine<'_>, testcases: &[Testcase], reporter: &mut Reporter) -> Outcomes {
    let started_at = Instant::now();
    let mut outcomes = Outcomes::default();

    for testcase in testcases {
        let testcase_started_at = Instant::now();
        let result = engine.run(testcase);
        let took = testcase_started_at.elapsed();

        match result {
            Ok(verdict) => {
                outcomes.passed += 1;
                reporter.pass(&testcase.name, verdict, took);
            }
            Err(failure) => {
                outcomes.failed += 1;
                reporter.fail(&testcase.name, &failure, took);
            }
        }
    }

    reporter.summary(&outcomes, started_at.elapsed());
    outcomes
}
