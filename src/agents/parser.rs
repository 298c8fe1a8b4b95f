//! Builds an [`Agent`] from a single markdown file.

use crate::agents::frontmatter::{FrontmatterDecoder, extract_frontmatter};
use crate::core::{ManagerError, ManagerResult};
use crate::models::{Agent, AgentType};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Parse the agent defined in `path`.
///
/// # Errors
///
/// - [`ManagerError::NotFound`] / [`ManagerError::IoFailure`] if the file can't be read
/// - [`ManagerError::SchemaError`] if there is no front-matter or it is not a mapping
/// - [`ManagerError::ParseError`] if the decoder rejects the block
pub fn parse_agent_file(
    path: &Path,
    agent_type: AgentType,
    decoder: &dyn FrontmatterDecoder,
) -> ManagerResult<Agent> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ManagerError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ManagerError::io("reading agent file", path, e)
        }
    })?;

    let block = extract_frontmatter(&content)
        .ok_or_else(|| ManagerError::schema(path, "missing front-matter"))?;
    if block.trim().is_empty() {
        return Err(ManagerError::schema(path, "empty front-matter"));
    }
    let value = decoder.decode(block).map_err(|reason| ManagerError::parse(path, reason))?;
    let Value::Object(fields) = value else {
        return Err(ManagerError::schema(path, "front-matter is not a mapping"));
    };

    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    Ok(agent_from_fields(&fields, stem, path, agent_type))
}

fn agent_from_fields(
    fields: &Map<String, Value>,
    default_name: String,
    path: &Path,
    agent_type: AgentType,
) -> Agent {
    let mut agent = Agent::new(
        fields.get("name").and_then(scalar_string).unwrap_or(default_name),
        agent_type,
    );
    agent.description = fields.get("description").and_then(scalar_string).unwrap_or_default();
    agent.tools = fields.get("tools").map(parse_tools).unwrap_or_default();
    agent.file_path = path.to_path_buf();
    agent.color = fields.get("color").and_then(scalar_string);
    agent.priority = fields.get("priority").and_then(scalar_string);
    agent.neural_patterns = fields.get("neural_patterns").map(string_list).unwrap_or_default();
    agent.learning_enabled = flag(fields, "learning_enabled");
    agent.collective_memory = flag(fields, "collective_memory");
    agent.hive_mind_role = fields.get("hive_mind_role").and_then(scalar_string);
    agent.concurrent_execution = flag(fields, "concurrent_execution");
    agent.sparc_integration = flag(fields, "sparc_integration");
    agent
}

/// `"Read, Write,,"` -> `["Read", "Write"]`; a list is taken element-wise.
fn parse_tools(value: &Value) -> Vec<String> {
    match value {
        Value::String(csv) => {
            csv.split(',').map(str::trim).filter(|t| !t.is_empty()).map(String::from).collect()
        }
        Value::Array(_) => string_list(value),
        _ => Vec::new(),
    }
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        other => scalar_string(other).into_iter().collect(),
    }
}

/// Strings as-is, numbers and booleans stringified, anything else ignored.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn flag(fields: &Map<String, Value>, key: &str) -> bool {
    fields.get(key).and_then(Value::as_bool).unwrap_or(false)
}
