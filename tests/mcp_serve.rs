use serde_json::{json, Value};

fn frames(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("json frame"))
        .collect()
}

#[test]
fn serve_answers_frames_until_stdin_closes() {
    let dir = tempfile::tempdir().unwrap();
    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {
                "name": "generate-test",
                "arguments": {"description": "click 'Login'", "testName": "login"}
            }
        }),
        json!({"jsonrpc": "2.0", "id": 4, "method": "resources/list"}),
    ]
    .iter()
    .map(|frame| format!("{frame}\n"))
    .collect::<String>();

    let bin = assert_cmd::cargo::cargo_bin!("scenario-forge");
    let assert = assert_cmd::Command::new(bin)
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env("SCENARIO_FORGE_PROJECT_DIR", dir.path())
        .args(["serve", "--server-name", "forge-test"])
        .write_stdin(input)
        .assert()
        .success();

    let responses = frames(&assert.get_output().stdout);
    assert_eq!(responses.len(), 4, "notification must not be answered");

    assert_eq!(responses[0]["id"], json!(1));
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], json!("forge-test"));

    let names: Vec<_> = responses[1]["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tool| tool["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["execute-test", "generate-test", "record-test"]);

    assert_eq!(responses[2]["result"]["isError"], json!(false));
    let text = responses[2]["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Test generated and saved to: "));
    assert!(dir.path().join("cypress/e2e/login.cy.ts").exists());

    assert_eq!(responses[3]["error"]["code"], json!(-32601));
}
