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

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Courier
//!
//! An in-process messaging core built on top of Tokio: typed messages, channels,
//! dispatch strategies and composable message-processing stages.
//!
//! ## Key Concepts
//!
//! - **Messages (`Message`)**: An immutable payload plus immutable headers. Every message
//!   gets a unique `id` and a `timestamp`; derived messages are made with a
//!   `MessageBuilder`.
//! - **Channels**: `QueueChannel` and `PriorityChannel` buffer messages for polling
//!   receivers; `DirectChannel` and `PublishSubscribeChannel` push them to subscribed
//!   handlers through a dispatcher. Every channel runs an interceptor chain.
//! - **Dispatchers**: `SimpleDispatcher` gives a message to the first handler that accepts
//!   it; `BroadcastingDispatcher` gives every handler a copy, inline or through a
//!   `TaskExecutor`.
//! - **Selectors**: Predicates over messages, combinable in a `MessageSelectorChain`.
//! - **Processing stages**: `MessageFilter`, splitters and transformers run inside a
//!   `ReplyProducingHandler` that forwards their output to the next channel.
//! - **Configuration (`CourierConfig`)**: Process-wide defaults for capacities,
//!   timeouts and dispatch, loaded from XDG locations.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! let channel = QueueChannel::with_capacity(10)?;
//! channel.send(Message::new("hello".to_string())).await?;
//! let received = channel.receive_timeout(Timeout::Immediate).await;
//! ```

/// Shared utilities: configuration, timeouts, executors, channel lookup.
pub mod common;

/// Channel implementations.
pub mod channel;

/// Dispatch strategies.
pub mod dispatcher;

/// Reply-producing handlers and the message filter.
pub mod handler;

/// Message representation.
pub mod message;

/// Message selectors.
pub mod selector;

/// Splitters.
pub mod splitter;

/// Core traits.
pub mod traits;

/// Transformers.
pub mod transformer;

/// A prelude module for conveniently importing the most commonly used items.
///
/// # Re-exports
///
/// ## External Crates
/// *   [`async_trait::async_trait`](https://docs.rs/async-trait/latest/async_trait/attr.async_trait.html): The macro for implementing the async traits.
///
/// ## Core Types
/// *   Messages: [`Message`](crate::message::Message), [`MessageBuilder`](crate::message::MessageBuilder),
///     [`MessageHeaders`](crate::message::MessageHeaders), [`HeaderValue`](crate::message::HeaderValue),
///     [`MessagePriority`](crate::message::MessagePriority), [`MessagingError`](crate::message::MessagingError).
/// *   Channels: every channel type, [`ChannelTemplate`](crate::channel::ChannelTemplate) and
///     [`MessageSelectingInterceptor`](crate::channel::MessageSelectingInterceptor).
/// *   Dispatch: both dispatchers and [`TokioTaskExecutor`](crate::common::TokioTaskExecutor).
/// *   Stages: selectors, filter, splitters, transformers and the reply machinery.
/// *   Traits: every capability trait from [`crate::traits`].
pub mod prelude {
    // External crate re-exports
    pub use async_trait::async_trait;

    // Core types
    pub use crate::channel::{
        ChannelTemplate, DirectChannel, MessageSelectingInterceptor, NullChannel,
        PriorityChannel, PublishSubscribeChannel, QueueChannel,
    };
    pub use crate::common::{
        BoxError, ChannelRef, ChannelRegistry, ChannelResolver, CourierConfig, FnInvoker,
        HandlerRef, InterceptorRef, MessageComparator, SelectorRef, SharedPayload,
        Timeout, TokioTaskExecutor,
    };
    pub use crate::dispatcher::{BroadcastingDispatcher, SimpleDispatcher};
    pub use crate::handler::{
        MessageFilter, ReplyMessageHolder, ReplyProducer, ReplyProducingHandler,
    };
    pub use crate::message::{
        keys, DeliveryFailure, HeaderValue, Message, MessageBuilder, MessageHeaders,
        MessagePriority, MessagingError,
    };
    pub use crate::selector::{
        MessageSelectorChain, MethodInvokingSelector, PayloadTypeSelector,
        UnexpiredMessageSelector, VotingStrategy,
    };
    pub use crate::splitter::{
        DefaultMessageSplitter, MessageSplitter, MethodInvokingSplitter, Split, SplitItem,
        SplittingProducer,
    };
    pub use crate::traits::{
        ChannelInterceptor, FnHandler, MessageChannel, MessageDispatcher, MessageHandler,
        MessageSelector, MethodInvoker, Payload, PayloadType, PollableChannel,
        SubscribableChannel, TaskExecutor,
    };
    pub use crate::transformer::{
        HeaderEnricher, HeaderMutator, HeaderTransformer, MethodInvokingTransformer,
        PayloadTransformer, Transformer, TransformingProducer,
    };
}
