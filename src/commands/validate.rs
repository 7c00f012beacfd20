use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use tracing::{debug, info};

use crate::checks::CheckRegistry;
use crate::cli::{Cli, ValidateArgs};
use crate::config::Config;
use crate::engine::{
    BatchResult, FileOutcome, FilePipeline, FileScheduler, FixMode, NullRenderer, RealFileStore,
    ReportRenderer, RunOptions,
};
use crate::error::{GuardError, Result};
use crate::output::{ColorMode, JsonFormatter, OutputFormat, ScanProgress, TextFormatter};
use crate::scanner::{GlobScanner, expand_files, preprocess_langs};
use crate::{EXIT_OPERATION_ERROR, EXIT_SUCCESS, EXIT_VALIDATION_FAILED};

use super::context::{build_registry, color_choice_to_mode, load_config};

/// Effective settings for one `validate` run: CLI flags over config over
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateSettings {
    pub files: Vec<PathBuf>,
    pub langs: Vec<String>,
    pub parallel: usize,
    pub options: RunOptions,
    pub format: OutputFormat,
    pub color: ColorMode,
}

fn default_parallelism() -> usize {
    thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

impl ValidateSettings {
    /// # Errors
    /// Returns a usage error when no input files remain after expansion, or
    /// an error for an invalid glob pattern.
    pub fn resolve(args: &ValidateArgs, cli: &Cli, config: &Config) -> Result<Self> {
        let defaults = &config.validate;

        let files = expand_files(&args.file_args(), &GlobScanner)?;

        let raw_langs = if args.langs.is_empty() {
            &defaults.langs
        } else {
            &args.langs
        };
        let langs = preprocess_langs(raw_langs);

        let parallel = args
            .parallel
            .or(defaults.parallel)
            .unwrap_or_else(default_parallelism)
            .max(1);

        let fix = args.fix || defaults.fix.unwrap_or(false);
        let options = RunOptions {
            fix_mode: if fix { FixMode::IfNotPass } else { FixMode::None },
            rerun_after_fix: args
                .rerun_after_fix
                .or(defaults.rerun_after_fix)
                .unwrap_or(true),
            hard_fail_on_error: args.hard_fail_on_error
                || defaults.hard_fail_on_error.unwrap_or(false),
        };

        let format = args
            .format_override()
            .or(defaults.format)
            .unwrap_or_default();

        let color = if args.no_color {
            ColorMode::Never
        } else {
            color_choice_to_mode(cli.color)
        };

        Ok(Self {
            files,
            langs,
            parallel,
            options,
            format,
            color,
        })
    }
}

/// Operation errors take precedence over validation failures.
#[must_use]
pub const fn exit_code(batch: &BatchResult) -> i32 {
    if batch.had_op_err {
        EXIT_OPERATION_ERROR
    } else if batch.had_val_fail {
        EXIT_VALIDATION_FAILED
    } else {
        EXIT_SUCCESS
    }
}

#[must_use]
pub fn run_validate(args: &ValidateArgs, cli: &Cli) -> i32 {
    match run_validate_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e.detail());
            EXIT_OPERATION_ERROR
        }
    }
}

pub(crate) fn run_validate_impl(args: &ValidateArgs, cli: &Cli) -> Result<i32> {
    // 1. Configuration and registry
    let config = load_config(cli.config.as_deref(), cli.no_config)?;
    let registry = build_registry(&config)?;
    ensure_not_empty(&registry)?;

    // 2. Effective settings
    let settings = ValidateSettings::resolve(args, cli, &config)?;
    debug!(?settings, "resolved settings");

    // 3. Run the batch
    let started = Instant::now();
    let quiet = cli.quiet || settings.format == OutputFormat::Json;
    let (batch, formatter) = run_batch(&registry, &settings, quiet);
    info!(
        files = batch.outcomes.len(),
        had_op_err = batch.had_op_err,
        had_val_fail = batch.had_val_fail,
        "batch finished"
    );

    // 4. Report
    let report = match settings.format {
        OutputFormat::Json => JsonFormatter.format(&batch.outcomes)? + "\n",
        OutputFormat::Text => {
            let mut text: String = batch.outcomes.iter().map(|o| o.output.as_str()).collect();
            text.push_str(&formatter.format_footer(&batch.outcomes, started.elapsed()));
            text
        }
    };
    write_stdout(&report)?;

    Ok(exit_code(&batch))
}

fn ensure_not_empty(registry: &CheckRegistry) -> Result<()> {
    if registry.is_empty() {
        return Err(GuardError::Config(
            "No checks registered. Nothing to run.".to_string(),
        ));
    }
    Ok(())
}

/// Validate every file and return the batch plus the text formatter used
/// for per-file reports (the footer needs the same color settings).
pub(crate) fn run_batch(
    registry: &CheckRegistry,
    settings: &ValidateSettings,
    quiet: bool,
) -> (BatchResult, TextFormatter) {
    let snapshot = registry.snapshot();
    let formatter = TextFormatter::new(settings.color);
    let renderer: &dyn ReportRenderer = match settings.format {
        OutputFormat::Text => &formatter,
        OutputFormat::Json => &NullRenderer,
    };
    let pipeline = FilePipeline::new(
        &snapshot,
        &settings.langs,
        settings.options,
        &RealFileStore,
        renderer,
    );

    let progress = ScanProgress::new(settings.files.len() as u64, quiet);
    let scheduler = FileScheduler::new(settings.parallel);
    let batch = scheduler.run(&settings.files, |job| {
        let outcome: FileOutcome = pipeline.process(job);
        progress.inc();
        outcome
    });
    progress.finish();
    (batch, formatter)
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
