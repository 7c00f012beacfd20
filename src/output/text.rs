use std::fmt::Write;
use std::time::Duration;

use crate::checks::Status;
use crate::engine::{FileOutcome, FileVerdict, Outcome, RenderContext, ReportRenderer, Summary};

use super::one_line;

const SEPARATOR_WIDTH: usize = 60;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

/// Human-readable per-file reports and the batch footer.
pub struct TextFormatter {
    use_colors: bool,
    separator: String,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            separator: "=".repeat(SEPARATOR_WIDTH),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    const fn status_color(status: Status) -> &'static str {
        match status {
            Status::Pass => ansi::GREEN,
            Status::Warn => ansi::YELLOW,
            Status::Fail | Status::Error => ansi::RED,
        }
    }

    fn format_outcome(&self, outcome: &Outcome, ctx: &RenderContext<'_>, out: &mut String) {
        let name = &outcome.result.name;
        let tag = if ctx.checks.is_critical(name) {
            "CRIT"
        } else {
            "NORM"
        };
        let status = outcome.status();
        let changed = if outcome.fix.did_change {
            " [changed]"
        } else {
            ""
        };
        let mut message = one_line(&outcome.result.message);
        if message.is_empty() {
            message.push('-');
        }
        let note = one_line(&outcome.fix.note);
        if !note.is_empty() {
            let _ = write!(message, " | note: {note}");
        }

        let status = self.paint(status.as_str(), Self::status_color(status));
        let _ = writeln!(out, "→ [{tag}] {name} ... {status}{changed}");
        let _ = writeln!(out, "   {message}");
    }

    fn format_summary(&self, summary: &Summary, ctx: &RenderContext<'_>, out: &mut String) {
        for outcome in &summary.outcomes {
            self.format_outcome(outcome, ctx, out);
        }

        let counts = summary.counts;
        let _ = writeln!(
            out,
            "\nSummary for {}: {} passed, {} warning(s), {} failed, {} errors",
            summary.path.display(),
            self.paint(&counts.pass.to_string(), ansi::GREEN),
            self.paint(&counts.warn.to_string(), ansi::YELLOW),
            self.paint(&counts.fail.to_string(), ansi::RED),
            self.paint(&counts.error.to_string(), ansi::RED),
        );

        if let Some(early) = &summary.early_exit {
            let skipped = ctx.checks.len().saturating_sub(summary.outcomes.len());
            let _ = writeln!(
                out,
                "{} due to fail-fast in check \"{}\" ({}). Skipped {skipped} remaining check(s).",
                self.paint("Stopped early", ansi::RED),
                early.check,
                early.status,
            );
        }
    }

    fn format_verdict(&self, outcome: &FileOutcome, out: &mut String) {
        let line = match outcome.verdict() {
            FileVerdict::Passed => self.paint("Result: PASSED", ansi::GREEN),
            FileVerdict::PassedWithWarnings => {
                self.paint("Result: PASSED WITH WARNINGS", ansi::YELLOW)
            }
            FileVerdict::Failed | FileVerdict::Errored => self.paint("Result: FAILED", ansi::RED),
        };
        let _ = writeln!(out, "{line}");
    }

    /// Batch totals, printed once after every per-file report.
    ///
    /// Files are counted once by verdict and warnings are summed over checks.
    /// Errors are operation errors only, so a hard-fail escalation shows up
    /// under failed.
    #[must_use]
    pub fn format_footer(&self, outcomes: &[FileOutcome], elapsed: Duration) -> String {
        let mut out = String::new();
        if outcomes.len() > 1 {
            let passed: usize = outcomes.iter().map(|o| o.passed).sum();
            let warnings: usize = outcomes
                .iter()
                .filter_map(|o| o.summary.as_ref())
                .map(|s| s.counts.warn)
                .sum();
            let failed: usize = outcomes.iter().map(|o| o.failed).sum();
            let errors: usize = outcomes.iter().map(|o| o.errored).sum();
            let _ = writeln!(
                out,
                "\nOverall: {} passed, {} warning(s), {} failed, {} error(s)",
                self.paint(&passed.to_string(), ansi::GREEN),
                self.paint(&warnings.to_string(), ansi::YELLOW),
                self.paint(&failed.to_string(), ansi::RED),
                self.paint(&errors.to_string(), ansi::RED),
            );
        }
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let _ = writeln!(out, "\nTotal time: {:?}", Duration::from_millis(millis));
        out
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl ReportRenderer for TextFormatter {
    fn render(&self, outcome: &FileOutcome, ctx: &RenderContext<'_>) -> String {
        let sep = &self.separator;
        let mut out = String::new();
        if outcome.index > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{sep}\n{}: {}\n{sep}\n\n",
            self.paint("Validating", ansi::CYAN),
            outcome.path.display()
        );
        let options = ctx.options;
        let _ = write!(
            out,
            "Mode: fix={:?}, rerun_after_fix={}, hard_fail_on_error={}\n\n",
            options.fix_mode, options.rerun_after_fix, options.hard_fail_on_error
        );

        let Some(summary) = &outcome.summary else {
            let error = outcome.error.as_deref().unwrap_or("not processed");
            let _ = writeln!(out, "{}: {error}", self.paint("ERROR", ansi::RED));
            let _ = writeln!(out, "{sep}");
            return out;
        };

        self.format_summary(summary, ctx, &mut out);

        if let Some(fixed) = &outcome.fixed_path {
            let _ = writeln!(
                out,
                "{} wrote fixed file: {} (bytes={})",
                self.paint("Info", ansi::CYAN),
                fixed.display(),
                summary.final_data.len()
            );
        } else if let Some(error) = &outcome.error {
            let _ = writeln!(out, "{} {error}", self.paint("ERROR", ansi::RED));
        }

        self.format_verdict(outcome, &mut out);
        let _ = writeln!(out, "{sep}");
        out
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
