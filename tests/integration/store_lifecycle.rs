use claude_manager::backup::BackupManager;
use claude_manager::core::ManagerError;
use claude_manager::models::Project;
use claude_manager::test_utils::{ConfigFixture, init_test_logging};
use serde_json::{Value, json};
use std::fs;

fn sample_document() -> Value {
    json!({
        "numStartups": 12,
        "firstStartTime": "2024-05-01T10:00:00.000Z",
        "oauthAccount": {"emailAddress": "dev@example.com", "organizationName": "Example"},
        "projects": {
            "/work/api": {
                "history": [
                    {"display": "add endpoint", "pastedContents": {}},
                    {"display": "fix tests", "pastedContents": {}}
                ],
                "mcpServers": {
                    "github": {
                        "command": "npx",
                        "args": ["-y", "@modelcontextprotocol/server-github"],
                        "env": {"GITHUB_TOKEN": "ghp_x"},
                        "timeout": 30
                    }
                },
                "enabledMcpjsonServers": [],
                "disabledMcpjsonServers": ["old"],
                "enableAllProjectMcpServers": false,
                "mcpContextUris": ["file:///a", "file:///a"],
                "hasTrustDialogAccepted": true,
                "allowedTools": ["Bash(git:*)"],
                "lastCost": 0.25
            },
            "/work/web": {
                "history": [],
                "mcpServers": null,
                "hasTrustDialogAccepted": false
            }
        },
        "tipsHistory": {"memory": 3}
    })
}

#[test]
fn test_round_trip_reproduces_document() {
    init_test_logging(None);
    let fixture = ConfigFixture::with_document(&sample_document());
    let mut store = fixture.loaded_store();

    for project in store.get_projects().values() {
        store.update_project(project);
    }
    store.save(false).unwrap();

    let mut reloaded = fixture.store();
    reloaded.load().unwrap();
    let original = store.get_projects();
    let after = reloaded.get_projects();
    assert_eq!(original, after);

    let on_disk = fixture.read_config();
    assert_eq!(on_disk["projects"]["/work/api"], sample_document()["projects"]["/work/api"]);
    assert_eq!(on_disk["projects"]["/work/api"]["mcpServers"]["github"]["timeout"], json!(30));
    assert_eq!(on_disk["tipsHistory"], json!({"memory": 3}));
    // null collections are normalized on the way through
    assert_eq!(on_disk["projects"]["/work/web"]["mcpServers"], json!({}));
}

#[test]
fn test_failed_save_leaves_original_untouched() {
    let fixture = ConfigFixture::with_document(&sample_document());
    let before = fs::read(fixture.config_path()).unwrap();
    let mut store = fixture.loaded_store();
    store.remove_project("/work/web");

    // A directory at the temp path makes the temp write fail.
    let temp_path = fixture.config_path().with_extension("tmp");
    fs::create_dir(&temp_path).unwrap();

    let err = store.save(false).unwrap_err();
    assert!(matches!(err, ManagerError::IoFailure { .. }));
    assert_eq!(fs::read(fixture.config_path()).unwrap(), before);
}

#[test]
fn test_rapid_backups_are_unique() {
    let fixture = ConfigFixture::with_document(&sample_document());
    let store = fixture.loaded_store();

    let first = store.create_backup().unwrap().unwrap();
    let second = store.create_backup().unwrap().unwrap();
    assert_ne!(first, second);
    for backup in [&first, &second] {
        let content: Value = serde_json::from_str(&fs::read_to_string(backup).unwrap()).unwrap();
        assert_eq!(content, sample_document());
    }
    assert_eq!(store.get_backups().unwrap(), vec![second, first]);
}

#[test]
fn test_backup_without_config_is_noop() {
    let fixture = ConfigFixture::new();
    let store = fixture.store();
    assert!(store.create_backup().unwrap().is_none());
    assert!(store.get_backups().unwrap().is_empty());
}

#[test]
fn test_retention_keeps_ten_most_recent() {
    let fixture = ConfigFixture::with_document(&json!({"projects": {}}));
    let mut store = fixture.loaded_store();

    // Save i backs up the file written by save i-1, which holds i-1 projects.
    for i in 1..=15 {
        store.update_project(&Project::new(format!("/p{i}")));
        store.save(true).unwrap();
    }

    let backups = store.get_backups().unwrap();
    assert_eq!(backups.len(), 10);

    let counts: Vec<usize> = backups
        .iter()
        .map(|path| {
            let doc: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
            doc["projects"].as_object().unwrap().len()
        })
        .collect();
    assert_eq!(counts, (5..=14).rev().collect::<Vec<_>>());
}

#[test]
fn test_custom_retention() {
    let fixture = ConfigFixture::with_document(&json!({}));
    let store = fixture.store().with_backup_manager(BackupManager::new(&fixture.paths().backup_dir).with_retention(2));
    for _ in 0..4 {
        store.create_backup().unwrap();
    }
    assert_eq!(store.get_backups().unwrap().len(), 2);
}

#[test]
fn test_restore_does_not_create_backup() {
    let fixture = ConfigFixture::with_document(&sample_document());
    let mut store = fixture.loaded_store();
    let backup = store.create_backup().unwrap().unwrap();

    assert!(store.remove_project("/work/api"));
    store.save(false).unwrap();
    assert!(!fixture.read_config()["projects"].as_object().unwrap().contains_key("/work/api"));

    let before = store.get_backups().unwrap().len();
    store.restore_from_backup(&backup).unwrap();
    assert_eq!(store.get_backups().unwrap().len(), before);

    assert!(store.get_projects().contains_key("/work/api"));
    assert_eq!(fixture.read_config(), sample_document());
}

#[test]
fn test_restore_over_corrupted_config() {
    let fixture = ConfigFixture::with_document(&sample_document());
    let store = fixture.loaded_store();
    let backup = store.create_backup().unwrap().unwrap();

    fs::write(fixture.config_path(), "{ truncated").unwrap();
    let mut store = fixture.store();
    assert!(store.load().is_err());

    store.restore_from_backup(&backup).unwrap();
    assert_eq!(store.get_stats().num_startups, 12);
}

#[test]
fn test_restore_missing_backup_fails() {
    let fixture = ConfigFixture::with_document(&sample_document());
    let mut store = fixture.loaded_store();
    let err = store.restore_from_backup(&fixture.home().join("missing.json")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.get_projects().len(), 2);
}

#[test]
fn test_delete_backup() {
    let fixture = ConfigFixture::with_document(&sample_document());
    let store = fixture.loaded_store();
    let older = store.create_backup().unwrap().unwrap();
    let newer = store.create_backup().unwrap().unwrap();

    store.delete_backup(&older).unwrap();
    assert_eq!(store.get_backups().unwrap(), vec![newer]);

    // The live configuration is not a backup and must survive.
    let err = store.delete_backup(fixture.config_path()).unwrap_err();
    assert!(matches!(err, ManagerError::SchemaError { .. }));
    assert!(fixture.config_path().exists());
}

#[test]
fn test_remove_project_semantics() {
    let fixture = ConfigFixture::with_document(&sample_document());
    let mut store = fixture.loaded_store();
    let snapshot = store.document().clone();

    assert!(!store.remove_project("/missing/path"));
    assert_eq!(store.document(), &snapshot);

    assert!(store.remove_project("/work/web"));
    assert!(!store.get_projects().contains_key("/work/web"));

    // Nothing reaches disk until save.
    assert!(fixture.read_config()["projects"].as_object().unwrap().contains_key("/work/web"));
    store.save(true).unwrap();
    assert!(!fixture.read_config()["projects"].as_object().unwrap().contains_key("/work/web"));
}

#[test]
fn test_stats_and_analysis() {
    let fixture = ConfigFixture::with_document(&sample_document());
    let store = fixture.loaded_store();

    let stats = store.get_stats();
    assert_eq!(stats.total_projects, 2);
    assert_eq!(stats.total_history_entries, 2);
    assert_eq!(stats.total_mcp_servers, 1);
    assert_eq!(stats.num_startups, 12);
    assert_eq!(stats.first_start_time, "2024-05-01T10:00:00.000Z");
    assert_eq!(stats.user_email, "dev@example.com");
    assert_eq!(stats.organization, "Example");
    assert!(stats.config_size > 0);

    let analysis = store.analyze_projects();
    assert_eq!(analysis.missing_directories.len(), 2);
    assert_eq!(analysis.unused, vec!["/work/web"]);
    assert_eq!(analysis.untrusted, vec!["/work/web"]);
}

#[test]
fn test_history_retention_persists() {
    let fixture = ConfigFixture::with_document(&sample_document());
    let mut store = fixture.loaded_store();

    let mut project = store.get_project("/work/api").unwrap();
    assert_eq!(project.keep_recent_history(1), 1);
    assert_eq!(project.recent_history_displays(5), vec!["fix tests"]);
    store.update_project(&project);
    store.save(false).unwrap();

    let history = &fixture.read_config()["projects"]["/work/api"]["history"];
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["display"], "fix tests");
}
