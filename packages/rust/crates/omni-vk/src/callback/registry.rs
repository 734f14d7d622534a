use std::collections::HashMap;

use super::CallbackSourceConfig;

/// Registered sources keyed by `group_id`. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: HashMap<i64, CallbackSourceConfig>,
}

impl SourceRegistry {
    pub fn new(sources: impl IntoIterator<Item = CallbackSourceConfig>) -> Self {
        let mut registry = HashMap::new();
        for source in sources {
            if let Some(previous) = registry.insert(source.group_id, source) {
                tracing::warn!(
                    group_id = previous.group_id,
                    "duplicate callback source registration; last one wins"
                );
            }
        }
        Self { sources: registry }
    }

    pub fn get(&self, group_id: i64) -> Option<&CallbackSourceConfig> {
        self.sources.get(&group_id)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl FromIterator<CallbackSourceConfig> for SourceRegistry {
    fn from_iter<I: IntoIterator<Item = CallbackSourceConfig>>(iter: I) -> Self {
        Self::new(iter)
    }
}
