use std::fmt;

/// Composite selector that locates a form field by placeholder, name or
/// label text.
pub fn field_selector(field: &str) -> String {
    let escaped = field.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        "[placeholder=\"{f}\"], [name=\"{f}\"], label:contains(\"{f}\")",
        f = escaped
    )
}

/// Kind of automation step an [`Action`] performs.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ActionOp {
    Navigate,
    Click,
    Input,
    AssertVisible,
    AssertExists,
    Wait,
    Placeholder,
}

impl ActionOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionOp::Navigate => "navigate",
            ActionOp::Click => "click",
            ActionOp::Input => "input",
            ActionOp::AssertVisible => "assert_visible",
            ActionOp::AssertExists => "assert_exists",
            ActionOp::Wait => "wait",
            ActionOp::Placeholder => "placeholder",
        }
    }

    pub fn requires_target(&self) -> bool {
        !matches!(self, ActionOp::Wait | ActionOp::Placeholder)
    }

    pub fn requires_value(&self) -> bool {
        matches!(self, ActionOp::Input | ActionOp::Wait)
    }
}

impl fmt::Display for ActionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionOp::Navigate => "Navigate",
            ActionOp::Click => "Click",
            ActionOp::Input => "Input",
            ActionOp::AssertVisible => "AssertVisible",
            ActionOp::AssertExists => "AssertExists",
            ActionOp::Wait => "Wait",
            ActionOp::Placeholder => "Placeholder",
        };
        f.write_str(label)
    }
}

/// One compiled automation step.
///
/// Fields are private: the constructor chosen fixes the operation, and the
/// operation fixes which of `target` / `value` are populated. Once built an
/// action never changes.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Action {
    operation: ActionOp,
    #[cfg_attr(
        feature = "serde-full",
        serde(skip_serializing_if = "Option::is_none")
    )]
    target: Option<String>,
    #[cfg_attr(
        feature = "serde-full",
        serde(skip_serializing_if = "Option::is_none")
    )]
    value: Option<String>,
    annotation: String,
}

impl Action {
    pub fn navigate(url: impl Into<String>) -> Self {
        Self {
            operation: ActionOp::Navigate,
            target: Some(url.into()),
            value: None,
            annotation: "Navigate to the specified URL".to_string(),
        }
    }

    pub fn click(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            operation: ActionOp::Click,
            annotation: format!("Click on element containing text \"{}\"", label),
            target: Some(label),
            value: None,
        }
    }

    pub fn input(field: impl Into<String>, text: impl Into<String>) -> Self {
        let field = field.into();
        let text = text.into();
        Self {
            operation: ActionOp::Input,
            annotation: format!("Enter \"{}\" into the {} field", text, field),
            target: Some(field),
            value: Some(text),
        }
    }

    pub fn assert_visible(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            operation: ActionOp::AssertVisible,
            annotation: format!("Verify that \"{}\" is visible", text),
            target: Some(text),
            value: None,
        }
    }

    pub fn assert_exists(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            operation: ActionOp::AssertExists,
            annotation: format!("Verify that \"{}\" exists", text),
            target: Some(text),
            value: None,
        }
    }

    /// Fixed pause, expressed in milliseconds.
    pub fn wait(ms: u64) -> Self {
        let annotation = if ms % 1000 == 0 {
            format!("Wait for {} seconds", ms / 1000)
        } else {
            format!("Wait for {} milliseconds", ms)
        };
        Self {
            operation: ActionOp::Wait,
            target: None,
            value: Some(ms.to_string()),
            annotation,
        }
    }

    /// Fallback step recording a description nothing could translate.
    pub fn placeholder(description: &str) -> Self {
        Self {
            operation: ActionOp::Placeholder,
            target: None,
            value: None,
            annotation: format!("TODO: Implement test steps for: {}", description),
        }
    }

    pub fn operation(&self) -> ActionOp {
        self.operation
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    /// Milliseconds of a `Wait` step; `None` for every other operation.
    pub fn wait_ms(&self) -> Option<u64> {
        match self.operation {
            ActionOp::Wait => self.value.as_deref().and_then(|v| v.parse().ok()),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        let mut first = true;
        if let Some(target) = &self.target {
            write!(f, "target='{}'", target)?;
            first = false;
        }
        if let Some(value) = &self.value {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "value='{}'", value)?;
        }
        f.write_str(")")
    }
}
