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

use std::future::Future;

use tracing::trace;

use crate::common::{CopyOnWriteList, InterceptorRef};
use crate::message::{DeliveryFailure, Message, MessagingError};
use crate::traits::{MessageChannel, PayloadType};

/// State and send/receive plumbing shared by every channel variant.
///
/// Holds the channel's name, its declared datatypes and its interceptor chain.
#[derive(Debug, Default)]
pub(crate) struct ChannelCore {
    name: Option<String>,
    datatypes: Vec<PayloadType>,
    interceptors: CopyOnWriteList<InterceptorRef>,
}

impl ChannelCore {
    pub(crate) fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub(crate) fn set_datatypes(&mut self, datatypes: Vec<PayloadType>) {
        self.datatypes = datatypes;
    }

    pub(crate) fn datatypes(&self) -> &[PayloadType] {
        &self.datatypes
    }

    pub(crate) fn add_interceptor(&self, interceptor: InterceptorRef) {
        self.interceptors.push(interceptor);
    }

    pub(crate) fn set_interceptors(&self, interceptors: Vec<InterceptorRef>) {
        self.interceptors.replace_all(interceptors);
    }

    pub(crate) fn interceptors(&self) -> Vec<InterceptorRef> {
        self.interceptors.snapshot().to_vec()
    }

    fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| "<anonymous>".to_owned())
    }

    /// Fails when datatypes are declared and the payload matches none of them.
    fn check_datatype(&self, message: Message) -> Result<Message, MessagingError> {
        if self.datatypes.is_empty()
            || self
                .datatypes
                .iter()
                .any(|datatype| datatype.matches(message.payload_value()))
        {
            return Ok(message);
        }
        let payload = message.payload_type_name();
        Err(MessagingError::delivery(
            message,
            DeliveryFailure::UnsupportedPayload {
                channel: self.label(),
                payload,
            },
        ))
    }

    /// Runs the datatype check and the interceptor chain around `deliver`.
    ///
    /// `deliver` receives the message as left by the `pre_send` hooks. A `pre_send` hook
    /// returning `None` ends the send with `Ok(false)` before anything is delivered.
    pub(crate) async fn send_with<F, Fut>(
        &self,
        channel: &dyn MessageChannel,
        message: Message,
        deliver: F,
    ) -> Result<bool, MessagingError>
    where
        F: FnOnce(Message) -> Fut,
        Fut: Future<Output = Result<bool, MessagingError>>,
    {
        let mut message = self.check_datatype(message)?;
        let interceptors = self.interceptors.snapshot();
        for interceptor in interceptors.iter() {
            match interceptor.pre_send(message, channel)? {
                Some(next) => message = next,
                None => {
                    trace!(channel = %self.label(), "send cancelled by interceptor");
                    return Ok(false);
                }
            }
        }
        let observed = (!interceptors.is_empty()).then(|| message.clone());
        let sent = deliver(message).await?;
        if let Some(observed) = observed {
            for interceptor in interceptors.iter() {
                interceptor.post_send(&observed, channel, sent);
            }
        }
        trace!(channel = %self.label(), sent, "send finished");
        Ok(sent)
    }

    /// Runs the `pre_receive` hooks; `false` means the receive must not proceed.
    pub(crate) fn pre_receive(&self, channel: &dyn MessageChannel) -> bool {
        self.interceptors
            .snapshot()
            .iter()
            .all(|interceptor| interceptor.pre_receive(channel))
    }

    /// Runs the `post_receive` hooks over a received message.
    pub(crate) fn post_receive(
        &self,
        message: Option<Message>,
        channel: &dyn MessageChannel,
    ) -> Option<Message> {
        let mut message = message?;
        for interceptor in self.interceptors.snapshot().iter() {
            message = interceptor.post_receive(message, channel)?;
        }
        Some(message)
    }
}
