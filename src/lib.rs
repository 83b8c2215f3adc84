pub mod colors;
pub mod config;
pub mod format;
mod output;
pub mod progress;
pub mod walker;

pub use colors::{should_use_colors, Colors};
pub use config::{
    detect_eol, enhance_eol, find_file_from_path_and_parents, generate_init_file,
    is_file_excluded_by_config, load_config_from_json_file, merge_config, parent_folder,
    resolve_config_for_file, ConfigError, Configuration, EolKind, ResolvedConfig, SegmentOrder,
    SortRules, DEFAULT_CONFIG_FILE_NAME,
};
pub use format::{format_source, is_supported};
pub use output::{print_diff, Config, OutputContext, OutputMode, RunResult};
pub use progress::ProgressReporter;
pub use walker::walk_paths;

use std::fs;
use std::io;
use std::path::Path;

/// Main entry point: format all supported files under the given paths.
///
/// Every file gets its own configuration resolution; a resolution failure
/// is reported and counted but never stops the batch.
pub fn run(paths: &[String], config: &Config, ctx: &OutputContext) -> io::Result<RunResult> {
    let mut result = RunResult::default();

    // Count files for the progress bar (2-pass approach)
    let file_count = walk_paths(paths)
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .count() as u64;

    let progress = ProgressReporter::new(file_count, ctx.show_progress);

    for path in walk_paths(paths) {
        let path = path?;
        if !is_supported(&path) {
            continue;
        }

        progress.tick(&path);

        if let Err(e) = process_file(&path, config, &mut result, ctx) {
            if ctx.mode != OutputMode::Quiet {
                eprintln!("Error processing {}: {e}", path.display());
            }
            result.errors += 1;
        }
    }

    progress.finish();

    output::print_summary(&result, config, ctx);

    Ok(result)
}

fn process_file(
    path: &Path,
    config: &Config,
    result: &mut RunResult,
    ctx: &OutputContext,
) -> io::Result<()> {
    let path_str = path.to_string_lossy();

    let resolved = match resolve_config_for_file(&path_str, &config.base) {
        Ok(resolved) => resolved,
        Err(e) => {
            result.errors += 1;
            if ctx.mode != OutputMode::Quiet {
                eprintln!("Error: {e}");
            }
            return Ok(());
        }
    };

    result.warnings += resolved.warnings.len();
    if ctx.verbose {
        for warning in &resolved.warnings {
            output::print_warning(warning, ctx);
        }
    }

    if is_file_excluded_by_config(&path_str, &resolved.config) {
        if ctx.verbose {
            output::print_skipped(path, "excluded by config", ctx);
        }
        return Ok(());
    }

    let bytes = fs::read(path)?;
    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(_) => {
            if ctx.verbose {
                output::print_skipped(path, "non-UTF-8", ctx);
            }
            return Ok(());
        }
    };

    let Some(formatted) = format_source(&source, &resolved.config) else {
        if ctx.verbose {
            output::print_checked(path, ctx);
        }
        return Ok(());
    };

    if config.check_only {
        result.files_with_problems += 1;
        output::print_check_result(path, ctx);
    } else if config.dry_run {
        result.files_modified += 1;
        output::print_dry_run_result(path, &source, &formatted, ctx);
    } else {
        fs::write(path, &formatted)?;
        result.files_modified += 1;
        output::print_fix_result(path, &source, &formatted, ctx);
    }

    Ok(())
}
