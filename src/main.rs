use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use impsort::{
    generate_init_file, load_config_from_json_file, run, should_use_colors, Config, ConfigError,
    Configuration, OutputContext, OutputMode,
};

#[derive(Parser)]
#[command(name = "impsort")]
#[command(version, about = "Sort and format TypeScript/JavaScript import statements")]
struct Cli {
    /// Target files or directories
    #[arg(required_unless_present = "init")]
    paths: Vec<String>,

    /// Check only (no modifications), exit 1 if files would change
    #[arg(short, long)]
    check: bool,

    /// Report changes without writing files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show changes in diff format
    #[arg(short, long)]
    diff: bool,

    /// Output only modified file names
    #[arg(short, long)]
    quiet: bool,

    /// Report skipped files and configuration warnings
    #[arg(short, long)]
    verbose: bool,

    /// Base configuration JSON file (lowest precedence)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Generate a template import-sorter.json configuration file
    #[arg(long)]
    init: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --init command
    if cli.init {
        return handle_init();
    }

    // An explicitly requested config file must be valid; this is the one
    // fatal configuration error.
    let base = match load_base_config(&cli.config) {
        Ok(base) => base,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.diff {
        OutputMode::Diff
    } else {
        OutputMode::Normal
    };

    let ctx = OutputContext::new(
        output_mode,
        should_use_colors(false, cli.no_color),
        cli.verbose,
        output_mode == OutputMode::Normal,
    );

    let config = Config {
        check_only: cli.check,
        dry_run: cli.dry_run,
        base,
    };

    match run(&cli.paths, &config, &ctx) {
        Ok(result) => {
            if (config.check_only && result.has_problems()) || result.errors > 0 {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn handle_init() -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn load_base_config(explicit_path: &Option<PathBuf>) -> Result<Configuration, ConfigError> {
    match explicit_path {
        Some(path) => load_config_from_json_file(&path.to_string_lossy()),
        None => Ok(Configuration::default()),
    }
}
