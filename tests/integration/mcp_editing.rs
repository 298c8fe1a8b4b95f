use claude_manager::mcp::{McpServerConfig, McpValidator, get_template};
use claude_manager::test_utils::ConfigFixture;
use serde_json::json;

fn fixture() -> ConfigFixture {
    ConfigFixture::with_document(&json!({
        "projects": {
            "/work/app": {
                "mcpServers": {"old": {"command": "node", "args": ["old.js"]}},
                "hasTrustDialogAccepted": true
            }
        }
    }))
}

#[test]
fn test_validated_template_is_persisted() {
    let fixture = fixture();
    let mut store = fixture.loaded_store();

    let template = get_template("github").unwrap();
    let note = McpValidator::validate(&template, "github").unwrap();
    assert_eq!(note, None);

    let mut project = store.get_project("/work/app").unwrap();
    project.set_mcp_server("github", template.clone());
    store.update_project(&project);
    store.save(true).unwrap();

    let on_disk = fixture.read_config();
    assert_eq!(on_disk["projects"]["/work/app"]["mcpServers"]["github"], template);
    assert_eq!(store.get_backups().unwrap().len(), 1);
}

#[test]
fn test_rename_server_keeps_single_entry() {
    let fixture = fixture();
    let mut store = fixture.loaded_store();

    let mut project = store.get_project("/work/app").unwrap();
    let config = json!({"command": "node", "args": ["new.js"]});
    McpValidator::validate(&config, "renamed").unwrap();
    project.rename_mcp_server("old", "renamed", config);
    store.update_project(&project);
    store.save(false).unwrap();

    let servers = fixture.read_config()["projects"]["/work/app"]["mcpServers"].clone();
    assert_eq!(servers, json!({"renamed": {"command": "node", "args": ["new.js"]}}));
}

#[test]
fn test_invalid_block_is_rejected_before_storing() {
    let fixture = fixture();
    let store = fixture.loaded_store();

    let err = McpValidator::validate_json_text(r#"{"command": "npx", "bogus": 1}"#, "s").unwrap_err();
    assert_eq!(err.to_string(), "Unknown fields: bogus");

    let project = store.get_project("/work/app").unwrap();
    assert_eq!(project.mcp_servers.len(), 1);
}

#[test]
fn test_typed_view_of_stored_servers() {
    let fixture = fixture();
    let store = fixture.loaded_store();
    let project = store.get_project("/work/app").unwrap();

    let server = McpServerConfig::from_value(&project.mcp_servers["old"], "old").unwrap();
    assert_eq!(server.command_line(), "node old.js");
}

#[test]
fn test_toggle_all_servers_persists() {
    let fixture = fixture();
    let mut store = fixture.loaded_store();

    let mut project = store.get_project("/work/app").unwrap();
    assert!(project.toggle_enable_all_mcp_servers());
    store.update_project(&project);
    store.save(false).unwrap();

    assert_eq!(
        fixture.read_config()["projects"]["/work/app"]["enableAllProjectMcpServers"],
        json!(true)
    );
}
