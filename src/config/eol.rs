//! Line-ending vocabulary and the fill-in pass that completes a resolved
//! configuration from actual file content.

use serde::{Deserialize, Serialize};

use super::merge::merge_config;
use super::types::Configuration;

/// Symbolic line-ending styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EolKind {
    LF,
    CRLF,
    CR,
    LFCR,
}

impl EolKind {
    /// The literal byte sequence for this style.
    pub fn as_str(self) -> &'static str {
        match self {
            EolKind::LF => "\n",
            EolKind::CRLF => "\r\n",
            EolKind::CR => "\r",
            EolKind::LFCR => "\n\r",
        }
    }

    /// Map a raw newline string to its symbolic value. Anything
    /// unrecognized counts as LF.
    pub fn from_newline(newline: &str) -> Self {
        match newline {
            "\r" => EolKind::CR,
            "\r\n" => EolKind::CRLF,
            "\n\r" => EolKind::LFCR,
            _ => EolKind::LF,
        }
    }

    /// Map an `end_of_line` keyword as used by Prettier and
    /// `.editorconfig`. `"auto"` and unknown keywords contribute nothing.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "lf" => Some(EolKind::LF),
            "crlf" => Some(EolKind::CRLF),
            "cr" => Some(EolKind::CR),
            _ => None,
        }
    }
}

/// First line-break sequence occurring in `content`, `"\n"` when there is
/// none.
pub fn detect_eol(content: &str) -> &'static str {
    let bytes = content.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\r' => {
                return if bytes.get(i + 1) == Some(&b'\n') {
                    "\r\n"
                } else {
                    "\r"
                };
            }
            b'\n' => {
                return if bytes.get(i + 1) == Some(&b'\r') {
                    "\n\r"
                } else {
                    "\n"
                };
            }
            _ => {}
        }
    }
    "\n"
}

/// Fill in `eol` from actual file content when no source has set it.
///
/// An `eol` configured anywhere in the precedence chain always wins; the
/// detected value merges as the lowest-precedence contribution and `detect`
/// is not invoked at all when the field is already resolved.
pub fn enhance_eol<F>(config: Configuration, detect: F) -> Configuration
where
    F: FnOnce() -> String,
{
    if config.eol.is_some() {
        return config;
    }
    let detected = Configuration {
        eol: Some(EolKind::from_newline(&detect())),
        ..Default::default()
    };
    merge_config([detected, config])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_eol_variants() {
        assert_eq!(detect_eol("a\nb"), "\n");
        assert_eq!(detect_eol("a\r\nb"), "\r\n");
        assert_eq!(detect_eol("a\rb"), "\r");
        assert_eq!(detect_eol("a\n\rb"), "\n\r");
        assert_eq!(detect_eol("no newline"), "\n");
        assert_eq!(detect_eol(""), "\n");
    }

    #[test]
    fn test_from_newline_mapping() {
        assert_eq!(EolKind::from_newline("\r"), EolKind::CR);
        assert_eq!(EolKind::from_newline("\r\n"), EolKind::CRLF);
        assert_eq!(EolKind::from_newline("\n\r"), EolKind::LFCR);
        assert_eq!(EolKind::from_newline("\n"), EolKind::LF);
        assert_eq!(EolKind::from_newline("anything"), EolKind::LF);
    }

    #[test]
    fn test_enhance_eol_fills_gap() {
        let config = enhance_eol(Configuration::default(), || "\r\n".to_string());
        assert_eq!(config.eol, Some(EolKind::CRLF));
    }

    #[test]
    fn test_enhance_eol_never_overrides() {
        let config = Configuration {
            eol: Some(EolKind::CRLF),
            ..Default::default()
        };
        let enhanced = enhance_eol(config, || panic!("detection must not run"));
        assert_eq!(enhanced.eol, Some(EolKind::CRLF));
    }

    #[test]
    fn test_enhance_eol_keeps_other_fields() {
        let config = Configuration {
            tab_size: Some(4),
            ..Default::default()
        };
        let enhanced = enhance_eol(config, || "\n".to_string());
        assert_eq!(enhanced.tab_size, Some(4));
        assert_eq!(enhanced.eol, Some(EolKind::LF));
    }

    #[test]
    fn test_eol_serializes_symbolically() {
        assert_eq!(serde_json::to_string(&EolKind::CRLF).unwrap(), "\"CRLF\"");
        let parsed: EolKind = serde_json::from_str("\"LFCR\"").unwrap();
        assert_eq!(parsed, EolKind::LFCR);
    }
}
