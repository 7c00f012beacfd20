use clap::Parser;

use glossary_guard::cli::{Cli, Commands};
use glossary_guard::commands::{run_checks, run_validate};
use glossary_guard::logging::init_tracing;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Validate(args) => run_validate(args, &cli),
        Commands::Checks(args) => run_checks(args, &cli),
    };

    std::process::exit(exit_code);
}
