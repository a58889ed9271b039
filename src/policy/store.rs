use parking_lot::RwLock;
use tracing::{debug, warn};

use super::{ConversationKey, Policies, Policy};
use crate::config::{ConfigFile, ConfigManager};
use crate::error::{Error, Result};

/// Where mutations are mirrored: the config manager plus the rest of the
/// document read at startup, so each save rewrites the whole file.
#[derive(Debug)]
struct ConfigSink {
    manager: ConfigManager,
    document: ConfigFile,
}

/// Process-wide map from conversation key to policy.
///
/// Every accessor takes the lock for its whole duration, so a mutation and
/// the file rewrite that follows it are observed together.
#[derive(Debug)]
pub struct PolicyStore {
    policies: RwLock<Policies>,
    sink: Option<ConfigSink>,
}

impl PolicyStore {
    /// A store that is never written anywhere.
    pub fn in_memory(policies: Policies) -> Self {
        Self {
            policies: RwLock::new(sanitize(policies)),
            sink: None,
        }
    }

    /// A store backed by the config document; takes over its `target_config`.
    pub fn persistent(manager: ConfigManager, mut document: ConfigFile) -> Self {
        let policies = sanitize(std::mem::take(&mut document.target_config));
        Self {
            policies: RwLock::new(policies),
            sink: Some(ConfigSink { manager, document }),
        }
    }

    pub fn get(&self, key: &ConversationKey) -> Option<Policy> {
        self.policies.read().get(key).cloned()
    }

    /// Looks up the chat-specific policy, then the sender-wide one.
    pub fn resolve(&self, chat_id: i64, sender_id: i64) -> Option<Policy> {
        let policies = self.policies.read();
        policies
            .get(&ConversationKey::chat(chat_id, sender_id))
            .or_else(|| policies.get(&ConversationKey::global(sender_id)))
            .cloned()
    }

    /// Stores the policy, then persists.
    ///
    /// A persistence failure is returned but the in-memory change stays.
    pub fn set(&self, key: ConversationKey, policy: Policy) -> Result<()> {
        let mut policies = self.policies.write();
        debug!(%key, ?policy, "Setting policy");
        policies.insert(key, policy);
        self.persist(&policies)
    }

    /// Removes the policy. Returns whether one existed; persists only then.
    pub fn delete(&self, key: &ConversationKey) -> Result<bool> {
        let mut policies = self.policies.write();
        if policies.remove(key).is_none() {
            return Ok(false);
        }
        debug!(%key, "Deleted policy");
        self.persist(&policies)?;
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.policies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.read().is_empty()
    }

    fn persist(&self, policies: &Policies) -> Result<()> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };

        let document = ConfigFile {
            target_config: policies.clone(),
            ..sink.document.clone()
        };
        sink.manager.save(&document).map_err(Error::Persistence)
    }
}

fn sanitize(policies: Policies) -> Policies {
    policies
        .into_iter()
        .filter(|(key, policy)| {
            let valid = policy.is_valid();
            if !valid {
                warn!(%key, ?policy, "Ignoring stored policy without languages");
            }
            valid
        })
        .collect()
}
