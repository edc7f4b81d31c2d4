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
use std::time::Duration;

use courier::prelude::*;

use crate::setup::handlers::Recorder;
use crate::setup::*;

mod setup;

fn uppercase_responder() -> HandlerRef {
    Arc::new(TransformingProducer::handler(PayloadTransformer::new(
        |text: &String| Ok::<_, BoxError>(text.to_uppercase()),
    )))
}

#[tokio::test]
async fn test_send_and_receive_returns_reply() -> anyhow::Result<()> {
    initialize_tracing();
    let service = DirectChannel::new().named("uppercase");
    service.subscribe(uppercase_responder());

    let template = ChannelTemplate::new().with_receive_timeout(Timeout::After(Duration::from_secs(1)));
    let reply = template
        .send_and_receive(&service, Message::new("hello".to_string()))
        .await?;

    let reply = reply.ok_or_else(|| anyhow::anyhow!("no reply"))?;
    assert_eq!(reply.payload::<String>().map(String::as_str), Some("HELLO"));
    Ok(())
}

#[tokio::test]
async fn test_send_and_receive_times_out_without_reply() -> anyhow::Result<()> {
    initialize_tracing();
    let service = DirectChannel::new();
    let sink = Recorder::shared();
    service.subscribe(sink.clone());

    let template =
        ChannelTemplate::new().with_receive_timeout(Timeout::After(Duration::from_millis(20)));
    let reply = template
        .send_and_receive(&service, Message::new("anyone?".to_string()))
        .await?;

    assert!(reply.is_none());
    assert_eq!(sink.count(), 1);
    assert!(sink.messages()[0].headers().reply_channel().is_some());
    Ok(())
}

#[tokio::test]
async fn test_send_and_receive_skips_wait_when_not_sent() -> anyhow::Result<()> {
    initialize_tracing();
    let template = ChannelTemplate::new();
    let unsubscribed = DirectChannel::new();
    let reply = template
        .send_and_receive(&unsubscribed, Message::new(()))
        .await?;
    assert!(reply.is_none());
    Ok(())
}

#[tokio::test]
async fn test_template_uses_default_channel() -> anyhow::Result<()> {
    initialize_tracing();
    let queue = Arc::new(QueueChannel::unbounded());
    let template = ChannelTemplate::new()
        .with_send_timeout(Timeout::Immediate)
        .with_receive_timeout(Timeout::Immediate)
        .with_default_channel(queue.clone());

    assert!(template.send(Message::new(3_u16)).await?);
    let received = template.receive_from(queue.as_ref()).await;
    assert_eq!(received.and_then(|m| m.payload::<u16>().copied()), Some(3));
    assert!(template.receive_from(queue.as_ref()).await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_template_without_default_channel_fails() {
    initialize_tracing();
    let outcome = ChannelTemplate::new().send(Message::new(())).await;
    assert!(matches!(outcome, Err(MessagingError::Configuration(_))));
}
