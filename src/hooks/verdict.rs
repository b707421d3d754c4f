//! Merging tool results into a single pass/fail verdict

use crate::cli::Output;
use crate::config::ToolFamily;
use crate::external::ToolResult;

/// Output of a tool that reported problems
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub family: ToolFamily,
    pub output: String,
}

/// Outcome of all lint passes of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    failures: Vec<Failure>,
}

impl Verdict {
    /// Any tool with non-empty output fails the run, a lone newline included.
    /// Exit statuses are not consulted: the tools are run in modes that print
    /// only violations.
    pub fn from_results(results: impl IntoIterator<Item = ToolResult>) -> Self {
        let failures = results
            .into_iter()
            .filter(|result| !result.output.is_empty())
            .map(|result| Failure {
                family: result.family,
                output: result.output,
            })
            .collect();

        Self { failures }
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Print every failure: phpcs reports verbatim, ESLint reports as errors
    pub fn report(&self, output: &Output) {
        for failure in &self.failures {
            match failure.family {
                ToolFamily::CodeSniffer => output.raw(&failure.output),
                ToolFamily::Eslint => output.error(failure.output.trim_end()),
            }
        }
    }
}
