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

/// The value carried by the `priority` header.
///
/// Variants are declared from lowest to highest, so the derived ordering ranks
/// `Highest` above everything else. A message without a `priority` header is treated
/// as [`MessagePriority::Normal`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessagePriority {
    /// Delivered after every other priority.
    Lowest,
    /// Below normal.
    Low,
    /// The default priority.
    #[default]
    Normal,
    /// Above normal.
    High,
    /// Delivered before every other priority.
    Highest,
}
