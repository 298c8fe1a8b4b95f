//! Validation of MCP server configuration blocks.
//!
//! Server blocks follow a closed schema: `command` is required and only
//! `args`, `env`, `cwd` and `timeout` may accompany it. Anything else is
//! rejected so that typos (`arg`, `environment`) surface before they are
//! persisted.
//!
//! Checks run in a fixed order and the first failure is reported. The
//! messages are user-visible and stable:
//!
//! 1. `Configuration must be a JSON object`
//! 2. `Missing required fields: command`
//! 3. `Unknown fields: <names>`
//! 4. `Command must be a non-empty string`
//! 5. `Args must be an array` / `All args must be strings`
//! 6. `Env must be an object` / `All env keys and values must be strings`
//! 7. `Cwd must be a string`
//! 8. `Timeout must be a positive number`
//!
//! A configuration that passes all checks is also compared against a table of
//! well-known `npx` packages; missing environment variables those packages
//! usually need are returned as an advisory note, never as a failure.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Keys that must be present in every server block.
pub const REQUIRED_FIELDS: &[&str] = &["command"];

/// Keys that may accompany the required ones.
pub const OPTIONAL_FIELDS: &[&str] = &["args", "env", "cwd", "timeout"];

/// Well-known npx packages and the environment variable each usually needs.
const KNOWN_NPX_SERVERS: &[(&str, Option<KnownServerRequirement>)] = &[
    (
        "@modelcontextprotocol/server-filesystem",
        Some(KnownServerRequirement {
            env_var: "WORKSPACE_DIR",
            warning: "server-filesystem usually requires WORKSPACE_DIR env variable",
        }),
    ),
    (
        "@modelcontextprotocol/server-github",
        Some(KnownServerRequirement {
            env_var: "GITHUB_TOKEN",
            warning: "server-github requires GITHUB_TOKEN env variable",
        }),
    ),
    (
        "@modelcontextprotocol/server-postgres",
        Some(KnownServerRequirement {
            env_var: "DATABASE_URL",
            warning: "server-postgres requires DATABASE_URL env variable",
        }),
    ),
    ("@modelcontextprotocol/server-sqlite", None),
    ("@modelcontextprotocol/server-memory", None),
    ("@modelcontextprotocol/server-puppeteer", None),
    ("@modelcontextprotocol/server-everart", None),
    ("@modelcontextprotocol/server-everything", None),
    ("@modelcontextprotocol/server-fetch", None),
    ("@modelcontextprotocol/server-slack", None),
    ("claude-flow", None),
];

#[derive(Debug, Clone, Copy)]
struct KnownServerRequirement {
    env_var: &'static str,
    warning: &'static str,
}

/// Reasons a server configuration is rejected.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum McpValidationError {
    /// The configuration is not a JSON object.
    #[error("Configuration must be a JSON object")]
    NotAnObject,

    /// Required keys are absent.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Keys outside the closed schema are present.
    #[error("Unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    /// `command` is not a string, or is blank.
    #[error("Command must be a non-empty string")]
    InvalidCommand,

    /// `args` is not an array.
    #[error("Args must be an array")]
    ArgsNotArray,

    /// `args` contains a non-string element.
    #[error("All args must be strings")]
    ArgsNotStrings,

    /// `env` is not an object.
    #[error("Env must be an object")]
    EnvNotObject,

    /// `env` contains a non-string value.
    #[error("All env keys and values must be strings")]
    EnvNotStrings,

    /// `cwd` is not a string.
    #[error("Cwd must be a string")]
    CwdNotString,

    /// `timeout` is not a number greater than zero.
    #[error("Timeout must be a positive number")]
    InvalidTimeout,

    /// The text form could not be parsed as JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// A validated block could not be decoded into the typed form.
    #[error("Cannot decode configuration: {0}")]
    Decode(String),
}

/// Outcome of a successful validation: an optional advisory note.
pub type ValidationResult = Result<Option<String>, McpValidationError>;

/// Stateless gatekeeper for MCP server configuration blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct McpValidator;

impl McpValidator {
    /// Validate a server configuration.
    ///
    /// Returns `Ok(None)` for a clean configuration, `Ok(Some(note))` for a
    /// valid configuration with advisory warnings, and `Err` with the first
    /// failed check otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use claude_manager::mcp::McpValidator;
    /// use serde_json::json;
    ///
    /// let err = McpValidator::validate(&json!({"args": ["x"]}), "s").unwrap_err();
    /// assert_eq!(err.to_string(), "Missing required fields: command");
    ///
    /// let note = McpValidator::validate(
    ///     &json!({"command": "npx", "args": ["@modelcontextprotocol/server-github"]}),
    ///     "s",
    /// )
    /// .unwrap();
    /// assert!(note.unwrap().contains("GITHUB_TOKEN"));
    /// ```
    pub fn validate(config: &Value, server_name: &str) -> ValidationResult {
        let Some(object) = config.as_object() else {
            return Err(McpValidationError::NotAnObject);
        };

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !object.contains_key(**field))
            .map(|field| (*field).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(McpValidationError::MissingFields(missing));
        }

        let unknown: Vec<String> = object
            .keys()
            .filter(|key| !REQUIRED_FIELDS.contains(&key.as_str()) && !OPTIONAL_FIELDS.contains(&key.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(McpValidationError::UnknownFields(unknown));
        }

        match object.get("command").and_then(Value::as_str) {
            Some(command) if !command.trim().is_empty() => {}
            _ => return Err(McpValidationError::InvalidCommand),
        }

        if let Some(args) = object.get("args") {
            let args = args.as_array().ok_or(McpValidationError::ArgsNotArray)?;
            if !args.iter().all(Value::is_string) {
                return Err(McpValidationError::ArgsNotStrings);
            }
        }

        if let Some(env) = object.get("env") {
            let env = env.as_object().ok_or(McpValidationError::EnvNotObject)?;
            if !env.values().all(Value::is_string) {
                return Err(McpValidationError::EnvNotStrings);
            }
        }

        if let Some(cwd) = object.get("cwd") {
            if !cwd.is_string() {
                return Err(McpValidationError::CwdNotString);
            }
        }

        if let Some(timeout) = object.get("timeout") {
            match timeout.as_f64() {
                Some(seconds) if seconds > 0.0 => {}
                _ => return Err(McpValidationError::InvalidTimeout),
            }
        }

        let warnings = known_server_warnings(config);
        if warnings.is_empty() {
            debug!("MCP server '{server_name}' configuration is valid");
            Ok(None)
        } else {
            debug!("MCP server '{server_name}' is valid with {} warning(s)", warnings.len());
            Ok(Some(format!("Configuration valid. Note: {}", warnings.join("; "))))
        }
    }

    /// Parse `text` as JSON and validate it.
    ///
    /// A parse failure is reported as `Invalid JSON: <parser message>`.
    pub fn validate_json_text(text: &str, server_name: &str) -> ValidationResult {
        let config: Value = serde_json::from_str(text)
            .map_err(|e| McpValidationError::InvalidJson(e.to_string()))?;
        Self::validate(&config, server_name)
    }
}

/// Advisory warnings for well-known `npx` server packages missing the
/// environment variables they usually need.
///
/// The package is the first `args` entry with any trailing `@version` removed.
/// A leading flag such as `-y` means no package is recognised.
#[must_use]
pub fn known_server_warnings(config: &Value) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.get("command").and_then(Value::as_str) != Some("npx") {
        return warnings;
    }

    let Some(package) = config
        .get("args")
        .and_then(Value::as_array)
        .and_then(|args| args.first())
        .and_then(Value::as_str)
    else {
        return warnings;
    };

    let base = strip_version_suffix(package);
    let requirement = KNOWN_NPX_SERVERS
        .iter()
        .find(|(name, _)| *name == base)
        .and_then(|(_, requirement)| *requirement);

    if let Some(requirement) = requirement {
        let present = config
            .get("env")
            .and_then(|env| env.get(requirement.env_var))
            .and_then(Value::as_str)
            .is_some_and(|value| !value.is_empty());
        if !present {
            warnings.push(requirement.warning.to_string());
        }
    }

    warnings
}

/// `claude-flow@alpha` -> `claude-flow`; `@scope/pkg@1.2` -> `@scope/pkg`;
/// `@scope/pkg` is unchanged.
fn strip_version_suffix(package: &str) -> &str {
    match package.rfind('@') {
        Some(idx) if idx > 0 => &package[..idx],
        _ => package,
    }
}
