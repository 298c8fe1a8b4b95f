//! Front-matter extraction and decoding.
//!
//! An agent file starts with a `---` line, followed by a structured block and a
//! closing `---` line:
//!
//! ```text
//! ---
//! name: reviewer
//! tools: Read, Grep
//! ---
//! Free-form body
//! ```
//!
//! Locating the block is format independent. Decoding it is delegated to a
//! [`FrontmatterDecoder`], so the agent parser never depends on a particular
//! serialization library. [`YamlFrontmatter`] is the default.

use serde_json::Value;
use std::fmt;

/// Decodes a front-matter block into a JSON value.
///
/// Implementations return `Err` with a human-readable reason when the block is
/// malformed. Whether the value is a mapping is checked by the caller.
pub trait FrontmatterDecoder: fmt::Debug {
    /// Decode `block`, the text between the two delimiter lines.
    fn decode(&self, block: &str) -> Result<Value, String>;
}

/// YAML front-matter via `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFrontmatter;

impl FrontmatterDecoder for YamlFrontmatter {
    fn decode(&self, block: &str) -> Result<Value, String> {
        serde_yaml::from_str::<Value>(block).map_err(|e| e.to_string())
    }
}

const DELIMITER: &str = "---";

/// The text between the opening and closing `---` lines, if `content` starts
/// with one and a closing line follows.
///
/// Handles both LF and CRLF line endings.
#[must_use]
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let first = lines.next()?;
    if trim_line_ending(first) != DELIMITER {
        return None;
    }

    let start = first.len();
    let mut end = start;
    for line in lines {
        if trim_line_ending(line) == DELIMITER {
            return Some(&content[start..end]);
        }
        end += line.len();
    }

    None
}

fn trim_line_ending(line: &str) -> &str {
    line.strip_suffix('\n').map_or(line, |l| l.strip_suffix('\r').unwrap_or(l))
}
