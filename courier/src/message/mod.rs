//! Defines the message envelope, its headers, the builder used to derive messages,
//! and the error type shared by the whole crate.
//!
//! # Key Components
//!
//! *   [`Message`]: Immutable payload plus [`MessageHeaders`].
//! *   [`MessageHeaders`]: Read-only header map with framework-generated `id` and
//!     `timestamp`; well-known names live in [`keys`].
//! *   [`MessageBuilder`]: Creates new messages or derives changed copies.
//! *   [`MessagePriority`]: Value of the `priority` header.
//! *   [`MessagingError`]: Error kinds raised by channels, dispatchers and handlers.

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
pub use builder::MessageBuilder;
pub use headers::{keys, HeaderValue, MessageHeaders};
pub use message::Message;
pub use message_error::{DeliveryFailure, MessagingError};
pub use priority::MessagePriority;

// --- Submodules ---

/// Defines [`MessageBuilder`].
mod builder;
/// Defines [`MessageHeaders`] and [`HeaderValue`].
mod headers;
/// Defines [`Message`].
#[allow(clippy::module_inception)]
mod message;
/// Defines [`MessagingError`].
mod message_error;
/// Defines [`MessagePriority`].
mod priority;
