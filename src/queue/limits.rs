//! Capacity limits configuration
//!
//! `QueueLimits` carries the default queue attributes plus per-queue-name
//! overrides, deserializable from TOML. The registry consumes it through an
//! explicit [`apply_limits`](crate::queue::QueueRegistry::apply_limits) call
//! so configuration order never couples to registry construction.
//!
//! ```toml
//! [default]
//! max_elements = 1000
//! overflow = "block"
//!
//! [queues.telemetry]
//! max_bytes = 65536
//! overflow = "reject"
//! ```

use crate::queue::error::{QueueError, QueueResult};
use crate::queue::types::QueueAttributes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Default and per-queue capacity attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueLimits {
    /// Attributes for queues without a specific override
    pub default: QueueAttributes,
    /// Per-queue-name overrides, keyed by exact queue name
    pub queues: HashMap<String, QueueAttributes>,
}

impl QueueLimits {
    /// Attributes to apply when creating `name`: the override if one is
    /// configured, the default otherwise.
    pub fn attributes_for(&self, name: &str) -> QueueAttributes {
        self.queues
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }

    /// Parse limits from a TOML document.
    pub fn from_toml_str(raw: &str) -> QueueResult<Self> {
        let limits: Self = toml::from_str(raw).map_err(|err| QueueError::InvalidLimits {
            message: err.to_string(),
        })?;
        limits.validate()?;
        Ok(limits)
    }

    /// Read and parse limits from a TOML file.
    pub fn from_file(path: &Path) -> QueueResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| QueueError::InvalidLimits {
            message: format!("cannot read {}: {}", path.display(), err),
        })?;
        Self::from_toml_str(&raw)
    }

    /// A zero bound would make a queue permanently full.
    fn validate(&self) -> QueueResult<()> {
        let entries = std::iter::once(("default", &self.default)).chain(
            self.queues
                .iter()
                .map(|(name, attrs)| (name.as_str(), attrs)),
        );
        for (name, attrs) in entries {
            if attrs.max_elements == Some(0) || attrs.max_bytes == Some(0) {
                return Err(QueueError::InvalidLimits {
                    message: format!("'{}': bounds must be greater than zero", name),
                });
            }
        }
        Ok(())
    }
}
