//! Pre-commit hook implementation
//!
//! Runs the gate in order, stopping at the first stage that decides the
//! outcome:
//! - environment gate
//! - tool location
//! - staged change discovery
//! - routing by extension
//! - auto-fix, re-stage and analysis per tool family
//! - verdict
//! - optional test suite

use std::fmt;

use super::HookContext;
use super::router;
use super::test_gate::{self, TestOutcome};
use super::verdict::Verdict;
use crate::cli::Output;
use crate::config::SnifferConfig;
use crate::error::GateError;
use crate::external::{CommandBuilder, CommandKind, ProcessRunner, ToolResult};
use crate::git::StagingArea;
use crate::tools::ToolLocator;

/// How a gate run that allows the commit ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Active environment differs from the target one; nothing ran
    EnvironmentMismatch { active: String, target: String },
    /// No added, copied, modified or renamed paths
    NothingStaged,
    /// Staged paths exist but none matches a tool's extensions
    NothingToCheck,
    /// Every tool passed, and the test suite if it is enabled
    Passed { tests_ran: bool },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::EnvironmentMismatch { active, target } => write!(
                f,
                "Environment is '{active}', checks only run in '{target}'"
            ),
            Outcome::NothingStaged => write!(f, "No staged files to check"),
            Outcome::NothingToCheck => write!(f, "No staged files match a configured tool"),
            Outcome::Passed { tests_ran: true } => write!(f, "All checks and tests passed"),
            Outcome::Passed { tests_ran: false } => write!(f, "All checks passed"),
        }
    }
}

/// `Some` when the active environment is not the one checks run in
pub fn environment_gate(config: &SnifferConfig) -> Option<Outcome> {
    if config.environment_matches() {
        return None;
    }

    tracing::info!(
        "Environment '{}' is not '{}', skipping checks",
        config.app_env,
        config.env
    );
    Some(Outcome::EnvironmentMismatch {
        active: config.app_env.clone(),
        target: config.env.clone(),
    })
}

/// Execute the pre-commit gate
pub fn execute<S, R>(
    context: &HookContext,
    staging: &S,
    runner: &R,
    output: &Output,
) -> Result<Outcome, GateError>
where
    S: StagingArea + ?Sized,
    R: ProcessRunner + ?Sized,
{
    let config = &context.config;

    if let Some(skipped) = environment_gate(config) {
        return Ok(skipped);
    }

    ToolLocator::new(config, &context.work_dir).verify()?;

    let changes = staging.staged_changes()?;
    if changes.is_empty() {
        return Ok(Outcome::NothingStaged);
    }
    output.verbose(&format!("{} staged file(s)", changes.len()));

    let queues = router::route(&changes, config);
    if queues.is_empty() {
        return Ok(Outcome::NothingToCheck);
    }

    let builder = CommandBuilder::new(config);
    let mut results = Vec::with_capacity(queues.len());

    for queue in &queues {
        output.step(&format!("Running {} on {} file(s)", queue.family, queue.len()));

        for command in builder.build(queue) {
            tracing::debug!("{:?} command: {}", command.kind, command.line);
            let captured = runner
                .run(&command.line)
                .map_err(|source| GateError::Spawn {
                    command: command.line.clone(),
                    source,
                })?;

            match command.kind {
                CommandKind::Fix => {
                    output.raw(&captured.output);
                    // The fixer may have rewritten files; commit what it left on disk
                    staging.restage(queue.paths())?;
                }
                CommandKind::Analyze => results.push(ToolResult {
                    family: command.family,
                    output: captured.output,
                    status: captured.status,
                }),
            }
        }
    }

    let verdict = Verdict::from_results(results);
    if !verdict.passed() {
        return Err(GateError::ToolFailure(verdict));
    }
    output.success("Coding standard checks passed");

    match test_gate::run(runner, config, &context.project, output)? {
        TestOutcome::Skipped => Ok(Outcome::Passed { tests_ran: false }),
        TestOutcome::Passed => Ok(Outcome::Passed { tests_ran: true }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolFamily;
    use crate::error::ConfigurationError;
    use crate::external::CommandOutput;
    use crate::git::{ChangeKind, StagedChange};
    use std::cell::RefCell;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeIndex {
        changes: Vec<StagedChange>,
        listed: RefCell<usize>,
        restaged: RefCell<Vec<String>>,
    }

    impl FakeIndex {
        fn with(paths: &[&str]) -> Self {
            Self {
                changes: paths
                    .iter()
                    .map(|path| StagedChange::new(*path, ChangeKind::Modified))
                    .collect(),
                ..Self::default()
            }
        }
    }

    impl StagingArea for FakeIndex {
        fn staged_changes(&self) -> Result<Vec<StagedChange>, git2::Error> {
            *self.listed.borrow_mut() += 1;
            Ok(self.changes.clone())
        }

        fn restage(&self, paths: &[String]) -> Result<(), git2::Error> {
            self.restaged.borrow_mut().extend(paths.iter().cloned());
            Ok(())
        }
    }

    /// Answers commands by the binary they start with
    #[derive(Default)]
    struct FakeRunner {
        replies: Vec<(&'static str, &'static str, i32)>,
        test_status: i32,
        commands: RefCell<Vec<String>>,
        test_runs: RefCell<usize>,
    }

    impl FakeRunner {
        fn reply(mut self, bin: &'static str, output: &'static str, status: i32) -> Self {
            self.replies.push((bin, output, status));
            self
        }

        fn commands_for(&self, bin: &str) -> Vec<String> {
            self.commands
                .borrow()
                .iter()
                .filter(|line| line.starts_with(&format!("\"{bin}\"")))
                .cloned()
                .collect()
        }
    }

    impl ProcessRunner for FakeRunner {
        fn run(&self, command_line: &str) -> std::io::Result<CommandOutput> {
            self.commands.borrow_mut().push(command_line.to_string());
            let (output, status) = self
                .replies
                .iter()
                .find(|(bin, _, _)| command_line.starts_with(&format!("\"{bin}\"")))
                .map(|(_, output, status)| (output.to_string(), *status))
                .unwrap_or_default();
            Ok(CommandOutput { output, status })
        }

        fn run_streaming(
            &self,
            _program: &Path,
            on_line: &mut dyn FnMut(&str),
        ) -> std::io::Result<i32> {
            *self.test_runs.borrow_mut() += 1;
            on_line("Tests: 3, Assertions: 7");
            Ok(self.test_status)
        }
    }

    const PHPCS: &str = "vendor/bin/phpcs";
    const PHPCBF: &str = "vendor/bin/phpcbf";
    const ESLINT: &str = "node_modules/.bin/eslint";
    const PHPUNIT: &str = "vendor/bin/phpunit";

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        PathBuf::from(name)
    }

    fn context(dir: &TempDir) -> HookContext {
        let root = dir.path();
        let mut config = SnifferConfig::default();
        config.phpcs.bin = Some(touch(root, PHPCS));
        config.phpcs.fixer_bin = Some(touch(root, PHPCBF));
        config.phpcs.extensions = vec!["php".to_string()];
        config.phpcs.standard = "PSR2".to_string();
        config.phpcs.encoding = "utf-8".to_string();
        config.eslint.bin = Some(touch(root, ESLINT));
        config.eslint.config = Some(touch(root, ".eslintrc.json"));
        config.eslint.extensions = vec!["js".to_string()];
        config.tests.bin = Some(touch(root, PHPUNIT));

        HookContext::new(config, root, "shop")
    }

    fn quiet() -> Output {
        Output::new(false, true)
    }

    #[test]
    fn test_environment_mismatch_runs_nothing() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        context.config.app_env = "production".to_string();
        context.config.phpcs.bin = Some(PathBuf::from("does/not/exist"));
        let index = FakeIndex::with(&["a.php"]);
        let runner = FakeRunner::default();

        let outcome = execute(&context, &index, &runner, &quiet()).unwrap();

        assert_eq!(
            outcome,
            Outcome::EnvironmentMismatch {
                active: "production".to_string(),
                target: "local".to_string(),
            }
        );
        assert_eq!(*index.listed.borrow(), 0);
        assert!(runner.commands.borrow().is_empty());
        assert_eq!(*runner.test_runs.borrow(), 0);
    }

    #[test]
    fn test_missing_tool_fails_before_diff() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        context.config.eslint.bin = Some(PathBuf::from("node_modules/.bin/missing"));
        let index = FakeIndex::with(&["a.php"]);
        let runner = FakeRunner::default();

        let err = execute(&context, &index, &runner, &quiet()).unwrap_err();

        assert!(matches!(err, GateError::Configuration(ConfigurationError::Missing { .. })));
        assert!(err.to_string().starts_with("ESLint bin not found"));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(*index.listed.borrow(), 0);
        assert!(runner.commands.borrow().is_empty());
    }

    #[test]
    fn test_nothing_staged() {
        let dir = TempDir::new().unwrap();
        let context = context(&dir);
        let runner = FakeRunner::default();

        let outcome = execute(&context, &FakeIndex::default(), &runner, &quiet()).unwrap();

        assert_eq!(outcome, Outcome::NothingStaged);
        assert!(runner.commands.borrow().is_empty());
    }

    #[test]
    fn test_nothing_routable() {
        let dir = TempDir::new().unwrap();
        let context = context(&dir);
        let runner = FakeRunner::default();

        let index = FakeIndex::with(&["README.md", "logo.png"]);
        let outcome = execute(&context, &index, &runner, &quiet()).unwrap();

        assert_eq!(outcome, Outcome::NothingToCheck);
        assert!(runner.commands.borrow().is_empty());
    }

    #[test]
    fn test_files_routed_to_their_tools() {
        let dir = TempDir::new().unwrap();
        let context = context(&dir);
        let index = FakeIndex::with(&["a.php", "b.js", "c.png"]);
        let runner = FakeRunner::default();

        let outcome = execute(&context, &index, &runner, &quiet()).unwrap();
        assert_eq!(outcome, Outcome::Passed { tests_ran: false });

        let commands = runner.commands.borrow();
        assert_eq!(
            *commands,
            vec![
                format!(r#""{PHPCBF}" -p "a.php""#),
                format!(
                    r#""{PHPCS}" -s --standard=PSR2 --encoding=utf-8 --extensions=php "a.php""#
                ),
                format!(r#""{ESLINT}" -c ".eslintrc.json" --no-ignore --quiet "b.js""#),
            ]
        );
        assert!(commands.iter().all(|line| !line.contains("c.png")));
    }

    #[test]
    fn test_path_matching_both_families() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        context.config.phpcs.extensions.push("vue".to_string());
        context.config.eslint.extensions.push("vue".to_string());
        let index = FakeIndex::with(&["App.vue"]);
        let runner = FakeRunner::default();

        execute(&context, &index, &runner, &quiet()).unwrap();

        assert!(runner.commands_for(PHPCS)[0].ends_with(r#" "App.vue""#));
        assert!(runner.commands_for(ESLINT)[0].ends_with(r#" "App.vue""#));
    }

    #[test]
    fn test_fixed_files_restaged_exactly_once() {
        let dir = TempDir::new().unwrap();
        let context = context(&dir);
        let index = FakeIndex::with(&["a.php", "b.js", "lib/c.php"]);
        let runner = FakeRunner::default().reply(PHPCBF, "Fixed 2 files\n", 1);

        let outcome = execute(&context, &index, &runner, &quiet()).unwrap();

        assert_eq!(outcome, Outcome::Passed { tests_ran: false });
        assert_eq!(*index.restaged.borrow(), vec!["a.php", "lib/c.php"]);
    }

    #[test]
    fn test_restage_happens_even_when_analysis_fails() {
        let dir = TempDir::new().unwrap();
        let context = context(&dir);
        let index = FakeIndex::with(&["a.php"]);
        let runner = FakeRunner::default()
            .reply(PHPCBF, "", 2)
            .reply(PHPCS, "FOUND 1 ERROR\n", 2);

        let err = execute(&context, &index, &runner, &quiet()).unwrap_err();

        assert!(matches!(err, GateError::ToolFailure(_)));
        assert_eq!(*index.restaged.borrow(), vec!["a.php"]);
    }

    #[test]
    fn test_no_fixer_means_no_restage() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        context.config.phpcs.fixer_bin = None;
        let index = FakeIndex::with(&["a.php"]);
        let runner = FakeRunner::default();

        execute(&context, &index, &runner, &quiet()).unwrap();

        assert!(runner.commands_for(PHPCBF).is_empty());
        assert!(index.restaged.borrow().is_empty());
    }

    #[test]
    fn test_analysis_output_fails_and_skips_tests() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        context.config.tests.enabled = true;
        let report = "FILE: a.php\n----\n 3 | ERROR | Expected 1 space\n";
        let index = FakeIndex::with(&["a.php", "b.js"]);
        let runner = FakeRunner::default().reply(PHPCS, report, 2);

        let err = execute(&context, &index, &runner, &quiet()).unwrap_err();

        let GateError::ToolFailure(verdict) = err else {
            panic!("expected tool failure");
        };
        assert_eq!(verdict.failures().len(), 1);
        assert_eq!(verdict.failures()[0].family, ToolFamily::CodeSniffer);
        assert_eq!(verdict.failures()[0].output, report);
        assert_eq!(*runner.test_runs.borrow(), 0);
    }

    #[test]
    fn test_eslint_alone_decides() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        context.config.phpcs.bin = None;
        let index = FakeIndex::with(&["a.php", "b.js"]);
        let runner = FakeRunner::default().reply(ESLINT, "b.js: 1:1 error no-undef\n", 1);

        let err = execute(&context, &index, &runner, &quiet()).unwrap_err();

        assert!(runner.commands_for(PHPCS).is_empty());
        assert!(runner.commands_for(PHPCBF).is_empty());
        assert_eq!(runner.commands.borrow().len(), 1);
        let GateError::ToolFailure(verdict) = err else {
            panic!("expected tool failure");
        };
        assert_eq!(verdict.failures()[0].family, ToolFamily::Eslint);
    }

    #[test]
    fn test_test_gate_disabled() {
        let dir = TempDir::new().unwrap();
        let context = context(&dir);
        let runner = FakeRunner::default();

        let outcome = execute(&context, &FakeIndex::with(&["a.php"]), &runner, &quiet()).unwrap();

        assert_eq!(outcome, Outcome::Passed { tests_ran: false });
        assert_eq!(*runner.test_runs.borrow(), 0);
    }

    #[test]
    fn test_test_gate_passes() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        context.config.tests.enabled = true;
        let runner = FakeRunner::default();

        let outcome = execute(&context, &FakeIndex::with(&["a.php"]), &runner, &quiet()).unwrap();

        assert_eq!(outcome, Outcome::Passed { tests_ran: true });
        assert_eq!(*runner.test_runs.borrow(), 1);
    }

    #[test]
    fn test_test_gate_failure_overrides_lint_pass() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        context.config.tests.enabled = true;
        let runner = FakeRunner {
            test_status: 2,
            ..FakeRunner::default()
        };

        let err = execute(&context, &FakeIndex::with(&["a.php"]), &runner, &quiet()).unwrap_err();

        assert!(matches!(
            err,
            GateError::TestFailure { ref project, status: 2 } if project == "shop"
        ));
        assert_eq!(err.exit_code(), 1);
    }
}
