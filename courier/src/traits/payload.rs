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
use std::any::{Any, TypeId};
use std::fmt::{self, Debug};

use dyn_clone::DynClone;

/// A marker trait for values that can travel inside a [`Message`](crate::message::Message),
/// either as its payload or as a header value.
///
/// This trait combines `Any`, `Send`, `Sync` and `Debug` with [`DynClone`] so that values
/// can be shared between tasks, downcast back to their concrete type, cloned as trait
/// objects, and logged.
///
/// A blanket implementation is provided, so any `T: Clone + Debug + Send + Sync + 'static`
/// is a `Payload`. Message payloads and header values are stored as `Arc<dyn Payload>`.
///
/// When calling [`as_any`](Payload::as_any) on a shared value, always go through the
/// trait object (`arc.as_ref().as_any()`): an `Arc<dyn Payload>` is itself a `Payload`,
/// and calling the method on the `Arc` inspects the `Arc` rather than its contents.
pub trait Payload: DynClone + Any + Send + Sync + Debug {
    /// Returns a reference to the value as a dynamic [`Any`] trait object.
    fn as_any(&self) -> &dyn Any;

    /// Returns the fully qualified name of the concrete type, for diagnostics.
    fn type_name(&self) -> &'static str;
}

dyn_clone::clone_trait_object!(Payload);

impl<T> Payload for T
where
    T: Any + Send + Sync + Debug + DynClone,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// The runtime identity of a payload type.
///
/// Channels use a list of `PayloadType`s as their declared datatypes, and the
/// [`PayloadTypeSelector`](crate::selector::PayloadTypeSelector) matches against them.
/// A payload is assignable to a `PayloadType` when its concrete type is exactly that type.
#[derive(Clone, Copy)]
pub struct PayloadType {
    id: TypeId,
    name: &'static str,
}

impl PayloadType {
    /// Returns the `PayloadType` describing `T`.
    #[must_use]
    pub fn of<T: Payload>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The name of the described type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` when `value`'s concrete type is the described type.
    #[must_use]
    pub fn matches(&self, value: &dyn Payload) -> bool {
        value.as_any().type_id() == self.id
    }
}

impl PartialEq for PayloadType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PayloadType {}

impl Debug for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn shared_payload_reports_inner_type() {
        let shared: Arc<dyn Payload> = Arc::new(String::from("hello"));
        assert!(PayloadType::of::<String>().matches(shared.as_ref()));
        assert!(!PayloadType::of::<i32>().matches(shared.as_ref()));
        assert_eq!(shared.as_ref().type_name(), "alloc::string::String");
    }

    #[test]
    fn payload_types_compare_by_identity() {
        assert_eq!(PayloadType::of::<u8>(), PayloadType::of::<u8>());
        assert_ne!(PayloadType::of::<u8>(), PayloadType::of::<u16>());
    }
}
