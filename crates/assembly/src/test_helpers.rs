//! Shared test helpers for assembly tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use promptloom_core::context::ContextItem;
use promptloom_core::error::RetrievalError;
use promptloom_core::retrieval::ContextRetriever;
use promptloom_core::settings::ConfigProvider;

/// A retriever that returns a fixed batch and records every call.
pub struct ScriptedRetriever {
    items: Vec<ContextItem>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl ScriptedRetriever {
    pub fn returning(items: Vec<ContextItem>) -> Self {
        Self {
            items,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The `(query, char_budget)` pairs seen so far.
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContextRetriever for ScriptedRetriever {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn retrieve(
        &self,
        query: &str,
        char_budget: usize,
    ) -> Result<Vec<ContextItem>, RetrievalError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), char_budget));
        Ok(self.items.clone())
    }
}

/// A retriever whose backend is always down.
pub struct FailingRetriever;

#[async_trait]
impl ContextRetriever for FailingRetriever {
    fn name(&self) -> &str {
        "failing"
    }

    async fn retrieve(
        &self,
        _query: &str,
        _char_budget: usize,
    ) -> Result<Vec<ContextItem>, RetrievalError> {
        Err(RetrievalError::Backend("index unavailable".into()))
    }
}

/// Deterministic in-memory settings.
pub struct MapSettings {
    values: HashMap<(String, String), String>,
}

impl MapSettings {
    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn with(mut self, section: &str, key: &str, value: &str) -> Self {
        self.values
            .insert((section.to_string(), key.to_string()), value.to_string());
        self
    }
}

impl ConfigProvider for MapSettings {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.values
            .get(&(section.to_string(), key.to_string()))
            .cloned()
    }
}
