//! Cypress test source emitter

use std::fmt::Write as _;

use scenario_core_types::{field_selector, Action, ActionOp, Scenario};

use crate::errors::{CompileError, CompileResult};

pub const DEFAULT_SUITE_TITLE: &str = "Generated Test";
pub const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);

const INDENT: &str = "    ";

/// Renders compiled steps into a single Cypress spec file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEmitter {
    suite_title: String,
    viewport: (u32, u32),
}

impl Default for TestEmitter {
    fn default() -> Self {
        Self {
            suite_title: DEFAULT_SUITE_TITLE.to_string(),
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

impl TestEmitter {
    pub fn new(suite_title: impl Into<String>, viewport: (u32, u32)) -> CompileResult<Self> {
        let suite_title = suite_title.into();
        if suite_title.trim().is_empty() {
            return Err(CompileError::InvalidConfig(
                "suite title must not be empty".to_string(),
            ));
        }
        if viewport.0 == 0 || viewport.1 == 0 {
            return Err(CompileError::InvalidConfig(format!(
                "viewport {}x{} has a zero dimension",
                viewport.0, viewport.1
            )));
        }
        Ok(Self {
            suite_title,
            viewport,
        })
    }

    pub fn emit(&self, scenario: &Scenario, actions: &[Action]) -> CompileResult<String> {
        let mut out = String::new();

        writeln!(out, "// Generated Cypress test from description:")?;
        writeln!(out, "// {}", comment_text(&scenario.description))?;
        writeln!(out)?;
        writeln!(out, "describe('{}', () => {{", js_string(&self.suite_title))?;
        writeln!(out, "  beforeEach(() => {{")?;
        writeln!(out, "    // Add any setup code here")?;
        writeln!(
            out,
            "    cy.viewport({}, {}); // Default viewport size",
            self.viewport.0, self.viewport.1
        )?;
        writeln!(out, "  }});")?;
        writeln!(out)?;
        writeln!(out, "  it('{}', () => {{", js_string(&scenario.display_name))?;

        for (index, action) in actions.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{INDENT}// {}", comment_text(action.annotation()))?;
            writeln!(out, "{INDENT}{};", render_call(action))?;
        }

        writeln!(out, "  }});")?;
        writeln!(out, "}});")?;
        Ok(out)
    }
}

/// Cypress call for one step.
pub fn render_call(action: &Action) -> String {
    let target = action.target().map(js_string).unwrap_or_default();
    match action.operation() {
        ActionOp::Navigate => format!("cy.visit('{}')", target),
        ActionOp::Click => format!("cy.contains('{}').click()", target),
        ActionOp::Input => format!(
            "cy.get('{}').type('{}')",
            js_string(&field_selector(action.target().unwrap_or_default())),
            action.value().map(js_string).unwrap_or_default()
        ),
        ActionOp::AssertVisible => format!("cy.contains('{}').should('be.visible')", target),
        ActionOp::AssertExists => format!("cy.contains('{}').should('exist')", target),
        ActionOp::Wait => format!("cy.wait({})", action.wait_ms().unwrap_or_default()),
        ActionOp::Placeholder => "cy.log('Test steps need to be implemented')".to_string(),
    }
}

/// Skeleton spec handed out when a recording session starts.
pub fn render_recording_skeleton(test_name: &str) -> String {
    format!(
        "describe('{}', () => {{\n  it('should perform recorded actions', () => {{\n    // Recorded commands will be added here\n  }});\n}});\n",
        js_string(test_name)
    )
}

/// Escape text for a single-quoted JavaScript string literal.
fn js_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Line comments end at the first line terminator.
fn comment_text(text: &str) -> String {
    text.split(['\r', '\n', '\u{2028}', '\u{2029}'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
