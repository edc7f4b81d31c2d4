//! Provides common types, utilities, and shared runtime components for `courier`.
//!
//! This module serves as an aggregation point for building blocks shared across the
//! crate and exposed to users via the prelude.
//!
//! # Key Re-exported Components:
//!
//! *   [`Timeout`]: How long a channel operation may wait.
//! *   [`CourierConfig`]: Process-wide defaults loaded from XDG locations.
//! *   [`TokioTaskExecutor`]: The executor used by broadcasting dispatchers.
//! *   [`ChannelRegistry`] and [`ChannelResolver`]: Name-based channel lookup.
//! *   [`FnInvoker`]: Binds closures to the method-invoking stages.
//!
//! Internal types and submodules handle the implementation details for these components.

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

// --- Public Re-exports ---
pub use config::CourierConfig;
pub use executor::TokioTaskExecutor;
pub use invoker::FnInvoker;
pub use registry::{ChannelRegistry, ChannelResolver};
pub use timeout::Timeout;
pub use types::*;

// --- Crate-Internal Re-exports ---
pub(crate) use cow_list::CopyOnWriteList;

// --- Submodules ---

/// Defines common type aliases.
mod types;

/// Defines the configuration system for `courier`.
pub mod config;
/// Defines the copy-on-write list backing handler and interceptor sets.
mod cow_list;
/// Defines the Tokio-backed task executor.
mod executor;
/// Defines the closure-backed method invoker.
mod invoker;
/// Defines the channel registry.
mod registry;
/// Defines [`Timeout`].
mod timeout;
