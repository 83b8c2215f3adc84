//! Layered configuration resolution for the import formatter.
//!
//! This module provides:
//! - The shared `Configuration` vocabulary and its per-field merge strategy
//! - Separator-agnostic upward filesystem search for layered sources
//! - Loaders for `import-sorter.json`, the `package.json` section, ESLint
//!   rules, Prettier settings, and `.editorconfig`
//! - Per-file resolution along a fixed precedence chain, with line-ending
//!   fill-in from actual file content
//! - Template generation with `--init`

mod editorconfig;
mod eol;
pub mod eslint;
mod init;
mod json_file;
mod merge;
mod package_json;
mod path;
mod prettier;
mod resolve;
mod types;

pub use editorconfig::editor_settings_config;
pub use eol::{detect_eol, enhance_eol, EolKind};
pub use init::{generate_init_file, generate_init_file_in, IMPORT_SORTER_JSON_TEMPLATE};
pub use json_file::{
    file_config, load_config_from_json_file, ConfigError, DEFAULT_CONFIG_FILE_NAME,
};
pub use merge::merge_config;
pub use package_json::package_config;
pub use path::{find_file_from_path_and_parents, parent_folder};
pub use prettier::prettier_config;
pub use resolve::{is_file_excluded_by_config, resolve_config_for_file, ResolvedConfig};
pub use types::{Configuration, SegmentOrder, SortRules};
