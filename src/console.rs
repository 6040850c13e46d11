//! Console output helpers
//!
//! Standardized logging for agent runs. Each message is prefixed with the
//! agent or subsystem name in cyan/bold so interleaved output from multiple
//! steps stays readable.

use colored::*;

/// Logger with consistent formatting for agent operations
///
/// ## Example
///
/// ```rust,no_run
/// use crew::console::Logger;
///
/// let logger = Logger::default();
/// logger.info("architect", "Analyzing 12 files");
/// logger.success("architect", "Analysis complete");
/// ```
#[derive(Default)]
pub struct Logger;

impl Logger {
    pub fn info(&self, subject: &str, msg: &str) {
        println!("{} | {}", subject.cyan().bold(), msg);
    }

    pub fn success(&self, subject: &str, msg: &str) {
        println!("{} | {}", subject.cyan().bold(), msg.green());
    }

    pub fn warn(&self, subject: &str, msg: &str) {
        println!("{} | {}", subject.cyan().bold(), msg.yellow());
    }

    pub fn error(&self, subject: &str, msg: &str) {
        eprintln!("{} | {}", subject.cyan().bold(), msg.red());
    }
}
