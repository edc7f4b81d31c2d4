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

use crate::common::{CopyOnWriteList, HandlerRef};

/// Handler identity: the address of the shared handler, ignoring vtable metadata.
fn same_handler(a: &HandlerRef, b: &HandlerRef) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a).cast::<()>(),
        Arc::as_ptr(b).cast::<()>(),
    )
}

/// Registration-ordered set of handlers, unique by identity.
#[derive(Debug, Default)]
pub(crate) struct HandlerSet {
    handlers: CopyOnWriteList<HandlerRef>,
}

impl HandlerSet {
    pub(crate) fn add(&self, handler: HandlerRef) -> bool {
        self.handlers.push_unique(handler, same_handler)
    }

    pub(crate) fn remove(&self, handler: &HandlerRef) -> bool {
        self.handlers.remove_where(|existing| same_handler(existing, handler))
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }

    pub(crate) fn snapshot(&self) -> Arc<Vec<HandlerRef>> {
        self.handlers.snapshot()
    }
}
