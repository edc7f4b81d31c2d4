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

use chrono::Utc;

use crate::message::Message;
use crate::traits::MessageSelector;

/// Accepts messages without an `expirationDate` header, or whose expiration is still in
/// the future when evaluated.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnexpiredMessageSelector;

impl MessageSelector for UnexpiredMessageSelector {
    fn accept(&self, message: &Message) -> bool {
        message
            .headers()
            .expiration_date()
            .map_or(true, |expires| expires > Utc::now())
    }
}
