//! One-line engine commands: `visit <url>`, `click <selector>`,
//! `type <selector> <text>`, `contains <text>`

use std::fmt;
use std::str::FromStr;

use action_primitives::{ActionError, AutomationSession};
use tracing::info;

use crate::errors::{FlowError, FlowResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Visit(String),
    Click(String),
    Type { selector: String, text: String },
    Contains(String),
}

impl EngineCommand {
    pub fn verb(&self) -> &'static str {
        match self {
            EngineCommand::Visit(_) => "visit",
            EngineCommand::Click(_) => "click",
            EngineCommand::Type { .. } => "type",
            EngineCommand::Contains(_) => "contains",
        }
    }

    /// Run the command under the session retry policy.
    pub async fn execute(&self, session: &AutomationSession) -> FlowResult<()> {
        info!(session = %session.id(), command = %self, "executing command");

        let outcome = session
            .retry(|| async {
                match self {
                    EngineCommand::Visit(url) => session.visit(url).await,
                    EngineCommand::Click(selector) => {
                        let element = session.wait_and_get(selector).await?;
                        session.click(&element).await
                    }
                    EngineCommand::Type { selector, text } => {
                        let element = session.wait_and_get(selector).await?;
                        session.type_text(&element, text).await
                    }
                    EngineCommand::Contains(text) => expect_text(session, text).await,
                }
            })
            .await?;

        info!(attempts = outcome.attempts_made, "command completed");
        Ok(())
    }
}

/// Fails unless some element contains `text`.
pub(crate) async fn expect_text(
    session: &AutomationSession,
    text: &str,
) -> Result<(), ActionError> {
    match session.contains(text).await? {
        Some(_) => Ok(()),
        None => Err(ActionError::AssertionFailed(format!(
            "expected content '{text}' to exist"
        ))),
    }
}

impl FromStr for EngineCommand {
    type Err = FlowError;

    fn from_str(command: &str) -> Result<Self, Self::Err> {
        let command = command.trim();
        let (verb, rest) = command.split_once(' ').unwrap_or((command, ""));
        let rest = rest.trim();

        let require = |what: &str| {
            if rest.is_empty() {
                Err(FlowError::InvalidCommand(format!("{verb} requires {what}")))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb.to_lowercase().as_str() {
            "visit" => Ok(EngineCommand::Visit(require("a URL")?)),
            "click" => Ok(EngineCommand::Click(require("a selector")?)),
            "contains" => Ok(EngineCommand::Contains(require("text")?)),
            "type" => {
                let (selector, text) = rest.split_once(' ').unwrap_or((rest, ""));
                if selector.is_empty() {
                    return Err(FlowError::InvalidCommand(format!(
                        "{verb} requires a selector"
                    )));
                }
                Ok(EngineCommand::Type {
                    selector: selector.to_string(),
                    text: text.to_string(),
                })
            }
            _ => Err(FlowError::UnknownCommand(verb.to_string())),
        }
    }
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineCommand::Visit(arg) | EngineCommand::Click(arg) | EngineCommand::Contains(arg) => {
                write!(f, "{} {}", self.verb(), arg)
            }
            EngineCommand::Type { selector, text } => write!(f, "type {selector} {text}"),
        }
    }
}
