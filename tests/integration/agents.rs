use claude_manager::agents::project_agents_dir;
use claude_manager::models::AgentType;
use claude_manager::test_utils::{ConfigFixture, write_agent};
use std::fs;

#[test]
fn test_project_agent_shadows_global() {
    let fixture = ConfigFixture::new();
    fixture.write_global_agent("reviewer.md", "name: reviewer\ndescription: Global reviewer\ntools: Read, Grep");
    fixture.write_global_agent("planner.md", "name: planner\ndescription: Plans work");

    let project = fixture.project_dir("app");
    write_agent(
        &project_agents_dir(&project),
        "reviewer.md",
        "name: reviewer\ndescription: Project reviewer\ntools: Read",
    );

    let store = fixture.store();

    let global = store.get_agents(None);
    assert_eq!(global.len(), 2);
    assert_eq!(global["reviewer"].agent_type, AgentType::Global);
    assert_eq!(global["reviewer"].tools, vec!["Read", "Grep"]);

    let merged = store.get_agents(Some(project.as_path()));
    assert_eq!(merged.len(), 2);
    assert_eq!(merged["reviewer"].agent_type, AgentType::Project);
    assert_eq!(merged["reviewer"].description, "Project reviewer");
    assert_eq!(merged["planner"].agent_type, AgentType::Global);
}

#[test]
fn test_malformed_agent_does_not_abort_scan() {
    let fixture = ConfigFixture::new();
    fixture.write_global_agent("good.md", "name: good");
    let broken = fixture.write_global_agent("broken.md", "name: [oops");
    fs::write(fixture.paths().global_agents_dir.join("plain.md"), "# no front-matter").unwrap();

    let agents = fixture.store().get_agents(None);
    assert_eq!(agents.len(), 1);
    assert!(agents.contains_key("good"));
    assert!(broken.exists());
}

#[test]
fn test_name_defaults_to_file_stem_and_advanced_flags() {
    let fixture = ConfigFixture::new();
    fixture.write_global_agent(
        "swarm-lead.md",
        "description: Coordinates\ncollective_memory: true\nconcurrent_execution: true\npriority: high",
    );

    let agents = fixture.store().get_agents(None);
    let agent = &agents["swarm-lead"];
    assert!(agent.is_advanced());
    assert_eq!(agent.tools_display(), "All tools");
    assert_eq!(agent.priority.as_deref(), Some("high"));
}

#[test]
fn test_agents_are_read_fresh_each_time() {
    let fixture = ConfigFixture::new();
    let store = fixture.store();
    assert!(store.get_agents(None).is_empty());

    fixture.write_global_agent("late.md", "name: late");
    assert!(store.get_agents(None).contains_key("late"));
}
