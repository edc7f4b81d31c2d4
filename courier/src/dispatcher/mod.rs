//! Dispatch strategies used by subscribable channels.
//!
//! *   [`SimpleDispatcher`]: one handler per message, the first that accepts it.
//! *   [`BroadcastingDispatcher`]: every handler gets a copy, optionally via an executor.

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
pub use broadcasting::BroadcastingDispatcher;
pub use simple::SimpleDispatcher;

// --- Submodules ---

/// Defines [`BroadcastingDispatcher`].
mod broadcasting;
/// Ordered, identity-unique handler set shared by the dispatchers.
mod handler_set;
/// Defines [`SimpleDispatcher`].
mod simple;
