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
use std::fmt;

use crate::common::BoxError;
use crate::message::Message;

/// Represents errors raised by channels, dispatchers, handlers and processing stages.
///
/// Expected outcomes are not errors: a selector that rejects returns `false`, a filter
/// drops silently unless configured otherwise, and a channel operation that times out
/// reports `Ok(false)` or `None`. The variants here cover the conditions a sender must
/// be told about.
#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    /// A channel or dispatcher could not accept or deliver the message.
    #[error("message delivery failed: {reason}")]
    Delivery {
        /// The message that could not be delivered, when one was involved.
        message: Option<Message>,
        /// Why delivery failed.
        reason: DeliveryFailure,
    },
    /// A handler declined the message, or every handler of a dispatcher did.
    #[error("message rejected: {reason}")]
    Rejected {
        /// The rejected message.
        message: Message,
        /// Human readable explanation.
        reason: String,
    },
    /// A handler failed unexpectedly while processing the message.
    #[error("message handling failed: {source}")]
    Handling {
        /// The message being handled.
        message: Message,
        /// The underlying failure.
        #[source]
        source: BoxError,
    },
    /// A transformer failed to produce its output message.
    #[error("message transformation failed: {source}")]
    Transformation {
        /// The message being transformed.
        message: Message,
        /// The underlying failure.
        #[source]
        source: BoxError,
    },
    /// Attempted mutation of an immutable structure such as [`MessageHeaders`](crate::message::MessageHeaders).
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    /// A value did not have the type the caller asked for.
    #[error("type mismatch for {context}: expected {expected}, found {found}")]
    TypeMismatch {
        /// What was being read (a header key, a payload, an invocation result).
        context: String,
        /// The requested type.
        expected: &'static str,
        /// The stored type.
        found: &'static str,
    },
    /// A component was assembled with invalid settings. Raised at construction time.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// No channel is registered under the requested name.
    #[error("no channel registered under name '{0}'")]
    ChannelResolution(String),
}

/// The reason attached to [`MessagingError::Delivery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryFailure {
    /// The dispatcher had no handlers to deliver to.
    NoSubscribers,
    /// The channel declares datatypes and the payload is none of them.
    UnsupportedPayload {
        /// The channel that refused the message.
        channel: String,
        /// The payload's concrete type.
        payload: &'static str,
    },
    /// An interceptor vetoed the send.
    Vetoed(String),
    /// A reply was produced but there was nowhere to send it.
    NoReplyChannel,
    /// A reply could not be sent within the configured timeout.
    SendTimedOut {
        /// The channel that did not accept the reply in time.
        channel: String,
    },
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSubscribers => write!(f, "dispatcher has no subscribers"),
            Self::UnsupportedPayload { channel, payload } => {
                write!(f, "channel '{channel}' does not accept payloads of type {payload}")
            }
            Self::Vetoed(reason) => write!(f, "send vetoed: {reason}"),
            Self::NoReplyChannel => write!(f, "no output channel or replyChannel header available"),
            Self::SendTimedOut { channel } => {
                write!(f, "timed out sending reply to channel '{channel}'")
            }
        }
    }
}

impl MessagingError {
    /// Creates a [`MessagingError::Delivery`] for `message`.
    pub fn delivery(message: Message, reason: DeliveryFailure) -> Self {
        Self::Delivery {
            message: Some(message),
            reason,
        }
    }

    /// Creates a [`MessagingError::Rejected`] for `message`.
    pub fn rejected(message: Message, reason: impl Into<String>) -> Self {
        Self::Rejected {
            message,
            reason: reason.into(),
        }
    }

    /// Creates a [`MessagingError::Handling`] wrapping `source`.
    pub fn handling(message: Message, source: impl Into<BoxError>) -> Self {
        Self::Handling {
            message,
            source: source.into(),
        }
    }

    /// Wraps `self` as a [`MessagingError::Transformation`] for `message`.
    ///
    /// An error that already is a transformation failure is returned unchanged.
    #[must_use]
    pub fn into_transformation(self, message: &Message) -> Self {
        match self {
            Self::Transformation { .. } => self,
            other => Self::Transformation {
                message: message.clone(),
                source: Box::new(other),
            },
        }
    }

    /// Creates a [`MessagingError::Transformation`] wrapping an arbitrary cause.
    pub fn transformation(message: &Message, source: impl Into<BoxError>) -> Self {
        let source = source.into();
        match source.downcast::<Self>() {
            Ok(inner) => (*inner).into_transformation(message),
            Err(source) => Self::Transformation {
                message: message.clone(),
                source,
            },
        }
    }

    /// Creates a [`MessagingError::TypeMismatch`].
    pub fn type_mismatch(
        context: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    /// Returns `true` for [`MessagingError::Rejected`], the signal a handler uses to
    /// decline a message.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Returns the message the failure concerns, if any.
    #[must_use]
    pub fn failed_message(&self) -> Option<&Message> {
        match self {
            Self::Delivery { message, .. } => message.as_ref(),
            Self::Rejected { message, .. }
            | Self::Handling { message, .. }
            | Self::Transformation { message, .. } => Some(message),
            Self::UnsupportedOperation(_)
            | Self::TypeMismatch { .. }
            | Self::Configuration(_)
            | Self::ChannelResolution(_) => None,
        }
    }
}
