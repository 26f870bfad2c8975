//! Action sequence assembly

use scenario_core_types::{Action, Scenario};
use tracing::debug;

use crate::emitter::TestEmitter;
use crate::errors::CompileResult;
use crate::matchers::{IntentMatcher, SentenceView, DEFAULT_MATCHERS};
use crate::segmenter::segment;

/// Output of one compilation: the scenario, its steps and the test source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledScenario {
    pub scenario: Scenario,
    pub actions: Vec<Action>,
    pub source: String,
}

/// Runs the matcher list over every sentence and renders the result.
#[derive(Debug, Clone)]
pub struct ScenarioCompiler {
    matchers: Vec<IntentMatcher>,
    emitter: TestEmitter,
}

impl Default for ScenarioCompiler {
    fn default() -> Self {
        Self::new(TestEmitter::default())
    }
}

impl ScenarioCompiler {
    pub fn new(emitter: TestEmitter) -> Self {
        Self {
            matchers: DEFAULT_MATCHERS.to_vec(),
            emitter,
        }
    }

    /// Append a matcher after the built-in ones.
    pub fn with_matcher(mut self, matcher: IntentMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Ordered steps for `description`; never empty.
    pub fn actions(&self, description: &str) -> Vec<Action> {
        let mut actions = Vec::new();

        for (index, sentence) in segment(description).enumerate() {
            let view = SentenceView::new(sentence);
            for matcher in &self.matchers {
                if let Some(action) = matcher.attempt_match(&view) {
                    debug!(
                        sentence = index,
                        matcher = matcher.name,
                        action = %action,
                        "intent matched"
                    );
                    actions.push(action);
                }
            }
        }

        if actions.is_empty() {
            debug!("no intent matched; emitting placeholder step");
            actions.push(Action::placeholder(description));
        }

        actions
    }

    pub fn compile(&self, description: &str) -> CompileResult<CompiledScenario> {
        let scenario = Scenario::new(description);
        let actions = self.actions(description);
        let source = self.emitter.emit(&scenario, &actions)?;
        Ok(CompiledScenario {
            scenario,
            actions,
            source,
        })
    }
}

/// Steps for `description` using the built-in matchers.
pub fn build_actions(description: &str) -> Vec<Action> {
    ScenarioCompiler::default().actions(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenario_core_types::ActionOp;

    #[test]
    fn sentence_order_then_matcher_order() {
        let actions = build_actions(
            "Click 'Menu' and visit 'https://a.test'. Wait 1 second and verify 'Home' is visible.",
        );
        let ops: Vec<_> = actions.iter().map(Action::operation).collect();
        assert_eq!(
            ops,
            vec![
                ActionOp::Navigate,
                ActionOp::Click,
                ActionOp::AssertVisible,
                ActionOp::Wait,
            ]
        );
    }

    #[test]
    fn unmatched_description_yields_single_placeholder() {
        let actions = build_actions("Open the fridge and admire the cheese");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].operation(), ActionOp::Placeholder);
        assert!(actions[0]
            .annotation()
            .ends_with("Open the fridge and admire the cheese"));
    }

    #[test]
    fn empty_description_yields_placeholder() {
        let actions = build_actions("");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].operation(), ActionOp::Placeholder);
    }

    #[test]
    fn custom_matcher_runs_after_builtins() {
        fn reload(sentence: &SentenceView<'_>) -> Option<Action> {
            sentence
                .lowered()
                .contains("reload")
                .then(|| Action::navigate("about:reload"))
        }

        let compiler =
            ScenarioCompiler::default().with_matcher(IntentMatcher::new("reload", reload));
        let actions = compiler.actions("Reload and wait 1 second");
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].operation(), ActionOp::Wait);
        assert_eq!(actions[1].target(), Some("about:reload"));
    }
}
