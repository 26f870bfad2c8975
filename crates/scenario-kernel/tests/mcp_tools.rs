use std::sync::Arc;

use l7_adapter::{McpServer, ServerInfo};
use scenario_kernel::{Config, ToolService};
use serde_json::{json, Value};
use tokio::io::BufReader;

fn config_for(project: &std::path::Path) -> Config {
    Config {
        project_dir: project.to_path_buf(),
        ..Config::default()
    }
}

#[tokio::test]
async fn generate_test_over_mcp_writes_spec() {
    let project = tempfile::tempdir().unwrap();
    let tools = ToolService::from_config(&config_for(project.path())).unwrap();
    let server = McpServer::new(
        Arc::new(tools),
        ServerInfo {
            name: "scenario-forge".into(),
            version: "test".into(),
        },
    );

    let frames = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {
            "name": "generate-test",
            "arguments": {
                "description": "Type 'hi' into 'Message' then verify 'Sent' should be visible",
                "testName": "Chat Send"
            }
        }}),
    ];
    let input: String = frames.iter().map(|frame| format!("{frame}\n")).collect();
    let mut output = Vec::new();
    server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 3);

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 3);
    let generate = tools
        .iter()
        .find(|tool| tool["name"] == "generate-test")
        .unwrap();
    assert_eq!(
        generate["inputSchema"]["required"],
        json!(["description", "testName"])
    );

    let spec = project.path().join("cypress/e2e/chat-send.cy.ts");
    let saved = std::fs::read_to_string(&spec).unwrap();
    let text = responses[2]["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with(&format!("Test generated and saved to: {}", spec.display())));
    assert!(text.ends_with(&saved));
    assert!(saved.contains(
        r#"cy.get('[placeholder="Message"], [name="Message"], label:contains("Message")').type('hi');"#
    ));
    assert!(saved.contains("cy.contains('Sent').should('be.visible');"));
}
