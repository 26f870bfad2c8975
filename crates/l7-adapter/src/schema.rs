//! Tool descriptors advertised through `tools/list`

use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Tool taking only required string arguments, given as `(name, description)`.
    pub fn with_string_args(
        name: impl Into<String>,
        description: impl Into<String>,
        args: &[(&str, &str)],
    ) -> Self {
        let mut properties = Map::new();
        for (arg, about) in args {
            properties.insert(
                arg.to_string(),
                json!({ "type": "string", "description": about }),
            );
        }
        let required: Vec<&str> = args.iter().map(|(arg, _)| *arg).collect();

        Self {
            name: name.into(),
            description: description.into(),
            input_schema: json!({
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": false,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_args_become_required_properties() {
        let tool = ToolDescriptor::with_string_args(
            "record-test",
            "Start recording",
            &[("testName", "Name of the test to be generated")],
        );
        assert_eq!(tool.input_schema["required"], json!(["testName"]));
        assert_eq!(
            tool.input_schema["properties"]["testName"]["type"],
            json!("string")
        );

        let encoded = serde_json::to_value(&tool).unwrap();
        assert!(encoded.get("inputSchema").is_some());
    }
}
