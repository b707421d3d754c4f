//! Styled terminal output for git-sniffer
//!
//! Status lines go to stdout and are silenced by `--quiet`. Errors go to
//! stderr and are never silenced. Tool and test runner output passes through
//! [`Output::raw`] untouched so reports keep their layout.

use console::{StyledObject, Term, style};

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn success(&self, message: &str) {
        self.status(style("✔").green(), message);
    }

    /// Errors are shown even in quiet mode
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✖").red(), message);
    }

    pub fn warning(&self, message: &str) {
        self.status(style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        self.status(style("ℹ").blue(), message);
    }

    /// Only printed with `-v`
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            self.status(style("ℹ").dim(), &style(message).dim().to_string());
        }
    }

    pub fn step(&self, step: &str) {
        self.status(style("❯").cyan(), step);
    }

    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Pass external output through verbatim
    ///
    /// Always printed: a failing report must reach the user in quiet mode too.
    /// Empty text prints nothing; a missing final newline is added.
    pub fn raw(&self, text: &str) {
        match text {
            "" => {}
            text if text.ends_with('\n') => print!("{text}"),
            text => println!("{text}"),
        }
    }

    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        let value = if highlight {
            style(value).green().bold()
        } else {
            style(value).white()
        };
        self.line(&format!("  {:<20} {}", style(key).dim(), value));
    }

    pub fn list_item(&self, item: &str) {
        self.line(&format!("  • {item}"));
    }

    pub fn blank_line(&self) {
        self.line("");
    }

    /// Restore default terminal attributes after a child process coloured them
    pub fn reset_colors(&self) {
        if Term::stdout().is_term() {
            print!("\x1b[0m");
        }
    }

    fn status(&self, symbol: StyledObject<&str>, message: &str) {
        self.line(&format!("{symbol} {message}"));
    }

    fn line(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }
}
