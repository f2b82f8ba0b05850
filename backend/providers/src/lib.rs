//! Collaborators behind the persona's speech: chat-completion providers,
//! the model-backed and template-backed text generators, and the lexicon
//! sentiment classifier.

pub mod generator;
pub mod mistral;
pub mod mock;
pub mod sentiment;
pub mod templates;

use std::collections::HashMap;
use std::sync::Arc;

use paddock_core::LlmProvider;

pub use generator::{clean_llm_response, LlmTextGenerator, SamplingConfig};
pub use mistral::MistralProvider;
pub use mock::MockProvider;
pub use sentiment::LexiconClassifier;
pub use templates::TemplateGenerator;

/// Registry of LLM providers, looked up by name.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn LlmProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider by name. A later registration replaces an earlier one.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn LlmProvider>) {
        self.providers.insert(name.into(), provider);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn LlmProvider>> {
        self.providers.get(name).cloned()
    }

    /// Registered provider names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
