use similar::{ChangeTag, TextDiff};
use std::path::Path;

use crate::colors::Colors;
use crate::config::Configuration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Quiet,
    Diff,
}

/// What one run does with the files it visits.
pub struct Config {
    pub check_only: bool,
    pub dry_run: bool,
    /// Caller-supplied base configuration, lowest precedence during
    /// per-file resolution.
    pub base: Configuration,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
    pub verbose: bool,
    pub show_progress: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool, verbose: bool, show_progress: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
            verbose,
            show_progress,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub files_modified: usize,
    pub files_with_problems: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl RunResult {
    pub fn has_problems(&self) -> bool {
        self.files_with_problems > 0 || self.errors > 0
    }
}

pub fn print_check_result(path: &Path, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        println!("{}", path.display());
        return;
    }
    println!(
        "{}Would reformat:{} {}",
        ctx.colors.error(),
        ctx.colors.reset(),
        path.display()
    );
}

pub fn print_fix_result(path: &Path, original: &str, formatted: &str, ctx: &OutputContext) {
    match ctx.mode {
        OutputMode::Quiet => println!("{}", path.display()),
        OutputMode::Diff => print_diff(&path.display().to_string(), original, formatted),
        OutputMode::Normal => {
            println!(
                "{}Formatted:{} {}",
                ctx.colors.success(),
                ctx.colors.reset(),
                path.display()
            );
        }
    }
}

pub fn print_dry_run_result(path: &Path, original: &str, formatted: &str, ctx: &OutputContext) {
    match ctx.mode {
        OutputMode::Quiet => println!("{}", path.display()),
        OutputMode::Diff => print_diff(&path.display().to_string(), original, formatted),
        OutputMode::Normal => println!("'{}' will be modified.", path.display()),
    }
}

pub fn print_checked(path: &Path, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    println!(
        "{}Checked:{} {}",
        ctx.colors.info(),
        ctx.colors.reset(),
        path.display()
    );
}

pub fn print_skipped(path: &Path, reason: &str, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    println!(
        "{}Skipping {}: {}{}",
        ctx.colors.info(),
        reason,
        ctx.colors.reset(),
        path.display()
    );
}

pub fn print_warning(message: &str, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    eprintln!(
        "{}Warning:{} {message}",
        ctx.colors.warning(),
        ctx.colors.reset()
    );
}

pub fn print_diff(label: &str, original: &str, content: &str) {
    let diff = TextDiff::from_lines(original, content);

    println!("--- {label}");
    println!("+++ {label}");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!();
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                print!("{sign}{change}");
            }
        }
    }
}

pub fn print_summary(result: &RunResult, config: &Config, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }

    if config.check_only {
        if result.files_with_problems > 0 {
            println!();
            println!(
                "{}{} files would be reformatted{}",
                ctx.colors.error(),
                result.files_with_problems,
                ctx.colors.reset()
            );
        }
        return;
    }

    if result.files_modified > 0 || result.errors > 0 {
        println!();
        let mut parts = vec![];
        if result.files_modified > 0 {
            let tense = if config.dry_run { "would be " } else { "" };
            parts.push(format!(
                "{}{} files {tense}formatted{}",
                ctx.colors.success(),
                result.files_modified,
                ctx.colors.reset()
            ));
        }
        if result.errors > 0 {
            parts.push(format!(
                "{}{} errors{}",
                ctx.colors.error(),
                result.errors,
                ctx.colors.reset()
            ));
        }
        println!("{}", parts.join(", "));
    }
}
