//! In-memory engine with scripted page state
//!
//! Elements can appear or become visible only after a number of lookups,
//! and failures can be queued per operation. Every call is recorded.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::engine::{AutomationEngine, Element};
use crate::errors::EngineError;

/// Engine operation, used to queue failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineOp {
    Visit,
    Get,
    Contains,
    Click,
    Type,
    Wait,
}

/// When an element shows up, counted in lookups of its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementScript {
    pub present_after: u32,
    /// `None` keeps the element hidden forever
    pub visible_after: Option<u32>,
}

impl ElementScript {
    pub fn visible() -> Self {
        Self {
            present_after: 0,
            visible_after: Some(0),
        }
    }

    pub fn hidden() -> Self {
        Self {
            present_after: 0,
            visible_after: None,
        }
    }

    pub fn appears_after(lookups: u32) -> Self {
        Self {
            present_after: lookups,
            visible_after: Some(lookups),
        }
    }

    pub fn visible_after(lookups: u32) -> Self {
        Self {
            present_after: 0,
            visible_after: Some(lookups),
        }
    }
}

#[derive(Default)]
struct ScriptState {
    selectors: HashMap<String, ElementScript>,
    texts: HashMap<String, ElementScript>,
    lookups: HashMap<(EngineOp, String), u32>,
    failures: HashMap<EngineOp, VecDeque<EngineError>>,
    calls: HashMap<EngineOp, u32>,
    visits: Vec<String>,
    clicks: Vec<String>,
    typed: Vec<(String, String)>,
    waits: Vec<u64>,
}

impl ScriptState {
    fn begin(&mut self, op: EngineOp) -> Result<(), EngineError> {
        *self.calls.entry(op).or_default() += 1;
        match self.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn lookup(&mut self, op: EngineOp, key: &str) -> Option<Element> {
        let script = match op {
            EngineOp::Contains => self.texts.get(key).copied(),
            _ => self.selectors.get(key).copied(),
        }?;

        let counter = self.lookups.entry((op, key.to_string())).or_default();
        let lookup = *counter;
        *counter += 1;

        if lookup < script.present_after {
            return None;
        }
        let visible = script.visible_after.is_some_and(|after| lookup >= after);
        let element = Element::new(format!("{op:?}:{key}").to_lowercase(), key, visible);
        Some(match op {
            EngineOp::Contains => element.with_text(key),
            _ => element,
        })
    }
}

#[derive(Default)]
pub struct ScriptedEngine {
    state: Mutex<ScriptState>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&self, selector: impl Into<String>, script: ElementScript) {
        self.state.lock().selectors.insert(selector.into(), script);
    }

    pub fn add_text(&self, text: impl Into<String>, script: ElementScript) {
        self.state.lock().texts.insert(text.into(), script);
    }

    /// Queue `error` for the next call of `op`.
    pub fn fail_next(&self, op: EngineOp, error: EngineError) {
        self.state
            .lock()
            .failures
            .entry(op)
            .or_default()
            .push_back(error);
    }

    pub fn calls(&self, op: EngineOp) -> u32 {
        self.state.lock().calls.get(&op).copied().unwrap_or(0)
    }

    pub fn visits(&self) -> Vec<String> {
        self.state.lock().visits.clone()
    }

    /// Selectors of clicked elements, in order
    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().clicks.clone()
    }

    /// `(selector, text)` pairs, in order
    pub fn typed(&self) -> Vec<(String, String)> {
        self.state.lock().typed.clone()
    }

    pub fn waits(&self) -> Vec<u64> {
        self.state.lock().waits.clone()
    }
}

#[async_trait]
impl AutomationEngine for ScriptedEngine {
    async fn visit(&self, url: &str) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.begin(EngineOp::Visit)?;
        state.visits.push(url.to_string());
        Ok(())
    }

    async fn get(&self, selector: &str) -> Result<Option<Element>, EngineError> {
        let mut state = self.state.lock();
        state.begin(EngineOp::Get)?;
        Ok(state.lookup(EngineOp::Get, selector))
    }

    async fn contains(&self, text: &str) -> Result<Option<Element>, EngineError> {
        let mut state = self.state.lock();
        state.begin(EngineOp::Contains)?;
        Ok(state.lookup(EngineOp::Contains, text))
    }

    async fn click(&self, element: &Element) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.begin(EngineOp::Click)?;
        state.clicks.push(element.selector.clone());
        Ok(())
    }

    async fn type_text(&self, element: &Element, text: &str) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.begin(EngineOp::Type)?;
        state
            .typed
            .push((element.selector.clone(), text.to_string()));
        Ok(())
    }

    async fn wait(&self, ms: u64) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.begin(EngineOp::Wait)?;
        state.waits.push(ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn visibility_follows_lookup_count() {
        let engine = ScriptedEngine::new();
        engine.add_element("#spinner", ElementScript::visible_after(1));

        let first = engine.get("#spinner").await.unwrap().unwrap();
        assert!(!first.visible);
        let second = engine.get("#spinner").await.unwrap().unwrap();
        assert!(second.visible);
        assert!(engine.get("#unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn queued_failures_are_consumed_in_order() {
        let engine = ScriptedEngine::new();
        engine.fail_next(EngineOp::Visit, EngineError::Navigation("502".into()));

        assert!(engine.visit("https://a.test").await.is_err());
        engine.visit("https://a.test").await.unwrap();
        assert_eq!(engine.visits(), vec!["https://a.test".to_string()]);
        assert_eq!(engine.calls(EngineOp::Visit), 2);
    }
}
