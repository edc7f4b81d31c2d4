/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

use crate::common::ChannelRef;
use crate::message::MessagingError;

/// Resolves channel names to channels.
///
/// Used wherever a message refers to a channel by name, such as a `replyChannel` header
/// holding a string.
pub trait ChannelResolver: Send + Sync + std::fmt::Debug {
    /// Looks up the channel registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::ChannelResolution`] when no channel has that name.
    fn resolve(&self, name: &str) -> Result<ChannelRef, MessagingError>;
}

/// A concurrent name-to-channel map.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    channels: Arc<DashMap<String, ChannelRef>>,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `channel` under `name`, returning the channel previously registered there.
    pub fn register(&self, name: impl Into<String>, channel: ChannelRef) -> Option<ChannelRef> {
        let name = name.into();
        trace!(channel = %name, "registering channel");
        self.channels.insert(name, channel)
    }

    /// Registers `channel` under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Configuration`] when the channel is anonymous.
    pub fn register_named(&self, channel: ChannelRef) -> Result<Option<ChannelRef>, MessagingError> {
        let name = channel
            .name()
            .map(str::to_owned)
            .ok_or_else(|| MessagingError::Configuration("cannot register an anonymous channel".into()))?;
        Ok(self.register(name, channel))
    }

    /// Removes and returns the channel registered as `name`.
    pub fn unregister(&self, name: &str) -> Option<ChannelRef> {
        self.channels.remove(name).map(|(_, channel)| channel)
    }

    /// Whether a channel is registered as `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Number of registered channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl ChannelResolver for ChannelRegistry {
    fn resolve(&self, name: &str) -> Result<ChannelRef, MessagingError> {
        self.channels
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| MessagingError::ChannelResolution(format!("no channel named '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::NullChannel;

    #[test]
    fn registered_channels_resolve_by_name() {
        let registry = ChannelRegistry::new();
        let channel: ChannelRef = Arc::new(NullChannel::named("sink"));
        assert!(registry.register_named(channel.clone()).is_ok());

        let resolved = registry.resolve("sink");
        assert!(matches!(resolved, Ok(found) if Arc::ptr_eq(&found, &channel)));
        assert!(matches!(
            registry.resolve("missing"),
            Err(MessagingError::ChannelResolution(_))
        ));
    }

    #[test]
    fn anonymous_channels_cannot_self_register() {
        let registry = ChannelRegistry::new();
        let channel: ChannelRef = Arc::new(NullChannel::new());
        assert!(matches!(
            registry.register_named(channel),
            Err(MessagingError::Configuration(_))
        ));
        assert!(registry.is_empty());
    }
}
