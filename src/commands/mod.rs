pub mod checks;
pub mod context;
pub mod validate;

pub use checks::{CheckInfo, format_checks_text, list_checks, run_checks};
pub use context::{build_registry, color_choice_to_mode, load_config};
pub use validate::{ValidateSettings, exit_code, run_validate};
