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

use courier::prelude::*;
use uuid::Uuid;

use crate::setup::handlers::Recorder;
use crate::setup::*;

mod setup;

async fn drain(channel: &QueueChannel) -> Vec<Message> {
    let mut drained = Vec::new();
    while let Some(message) = channel.receive_timeout(Timeout::Immediate).await {
        drained.push(message);
    }
    drained
}

fn texts(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .filter_map(|message| message.payload::<String>().cloned())
        .collect()
}

#[tokio::test]
async fn test_filter_passes_only_accepted_messages() -> anyhow::Result<()> {
    initialize_tracing();
    let input = DirectChannel::new().named("input");
    let accepted = Arc::new(QueueChannel::unbounded().named("accepted"));
    let filter = ReplyProducingHandler::new(MessageFilter::new(Arc::new(
        PayloadTypeSelector::of::<String>(),
    )))
    .with_output_channel(accepted.clone());
    input.subscribe(Arc::new(filter));

    assert!(input.send(Message::new("kept".to_string())).await?);
    assert!(input.send(Message::new(42_i32)).await?);
    assert!(input.send(Message::new("also kept".to_string())).await?);

    assert_eq!(texts(&drain(&accepted).await), ["kept", "also kept"]);
    Ok(())
}

#[tokio::test]
async fn test_filter_can_raise_on_rejection() {
    initialize_tracing();
    let input = DirectChannel::new().surface_failures(true);
    let filter = MessageFilter::new(Arc::new(PayloadTypeSelector::of::<String>()))
        .raise_on_rejection(true);
    input.subscribe(Arc::new(
        ReplyProducingHandler::new(filter).with_output_channel(Arc::new(NullChannel::new())),
    ));

    let outcome = input.send(Message::new(0_u8)).await;
    assert!(matches!(outcome, Err(MessagingError::Rejected { .. })));
}

#[tokio::test]
async fn test_selector_chain_in_filter() -> anyhow::Result<()> {
    initialize_tracing();
    let chain = MessageSelectorChain::new(VotingStrategy::All);
    chain.add(Arc::new(PayloadTypeSelector::of::<i64>()));
    chain.add(Arc::new(MethodInvokingSelector::from_payload_fn(|n: &i64| {
        *n % 2 == 0
    })));
    let evens = Arc::new(QueueChannel::unbounded());
    let input = DirectChannel::new();
    input.subscribe(Arc::new(
        ReplyProducingHandler::new(MessageFilter::new(Arc::new(chain)))
            .with_output_channel(evens.clone()),
    ));

    for n in 1..=6_i64 {
        input.send(Message::new(n)).await?;
    }
    input.send(Message::new("4".to_string())).await?;

    let received: Vec<i64> = drain(&evens)
        .await
        .iter()
        .filter_map(|message| message.payload::<i64>().copied())
        .collect();
    assert_eq!(received, [2, 4, 6]);
    Ok(())
}

#[tokio::test]
async fn test_splitter_stamps_sequence_and_correlation() -> anyhow::Result<()> {
    initialize_tracing();
    let parts = Arc::new(QueueChannel::unbounded());
    let splitter = SplittingProducer::handler(DefaultMessageSplitter::new().with_delimiters(","))
        .with_output_channel(parts.clone());

    let original = MessageBuilder::with_payload("a,b,,c".to_string())
        .set_header("origin", "batch-7".to_string())
        .build();
    splitter.handle(original.clone()).await?;

    let replies = drain(&parts).await;
    assert_eq!(texts(&replies), ["a", "b", "c"]);
    for (index, reply) in replies.iter().enumerate() {
        let headers = reply.headers();
        assert_eq!(headers.sequence_number(), Some(index + 1));
        assert_eq!(headers.sequence_size(), Some(3));
        assert_eq!(
            headers
                .correlation_id()
                .and_then(HeaderValue::downcast_ref::<Uuid>),
            Some(&original.id())
        );
        assert_eq!(
            headers.get_as::<String>("origin")?.map(String::as_str),
            Some("batch-7")
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_splitter_without_delimiters_emits_single_reply() -> anyhow::Result<()> {
    initialize_tracing();
    let parts = Arc::new(QueueChannel::unbounded());
    let splitter =
        SplittingProducer::handler(DefaultMessageSplitter::new()).with_output_channel(parts.clone());

    splitter.handle(Message::new("a,b,c".to_string())).await?;

    let replies = drain(&parts).await;
    assert_eq!(texts(&replies), ["a,b,c"]);
    assert_eq!(replies[0].headers().sequence_number(), Some(1));
    assert_eq!(replies[0].headers().sequence_size(), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_method_invoking_splitter_with_empty_result_sends_nothing() -> anyhow::Result<()> {
    initialize_tracing();
    let parts = Arc::new(QueueChannel::unbounded());
    let splitter = SplittingProducer::handler(MethodInvokingSplitter::from_payload_fn(
        |words: &String| {
            words
                .split_whitespace()
                .map(str::to_owned)
                .collect::<Vec<String>>()
        },
    ))
    .with_output_channel(parts.clone());

    splitter.handle(Message::new("   ".to_string())).await?;
    splitter.handle(Message::new("one two".to_string())).await?;

    assert_eq!(texts(&drain(&parts).await), ["one", "two"]);
    Ok(())
}

#[tokio::test]
async fn test_transformers_chain_through_channels() -> anyhow::Result<()> {
    initialize_tracing();
    let middle = Arc::new(DirectChannel::new().named("middle"));
    let output = Arc::new(QueueChannel::unbounded().named("output"));

    let upper = TransformingProducer::handler(PayloadTransformer::new(|text: &String| {
        Ok::<_, BoxError>(text.to_uppercase())
    }))
    .with_output_channel(middle.clone());
    let length = TransformingProducer::handler(MethodInvokingTransformer::from_payload_fn(
        |text: &String| text.len(),
    ))
    .with_output_channel(output.clone());
    middle.subscribe(Arc::new(length));

    let request = MessageBuilder::with_payload("courier".to_string())
        .set_header("trace", 11_u32)
        .build();
    upper.handle(request).await?;

    let results = drain(&output).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].payload::<usize>(), Some(&7));
    assert_eq!(results[0].headers().get_as::<u32>("trace")?, Some(&11));
    Ok(())
}

#[tokio::test]
async fn test_failed_transformation_reports_original_message() {
    initialize_tracing();
    let handler = TransformingProducer::handler(PayloadTransformer::new(|n: &u32| {
        u8::try_from(*n)
    }))
    .with_output_channel(Arc::new(NullChannel::new()));

    let original = Message::new(300_u32);
    let outcome = handler.handle(original.clone()).await;
    match outcome {
        Err(MessagingError::Transformation { message, .. }) => {
            assert_eq!(message.id(), original.id());
        }
        other => panic!("expected a transformation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_header_enricher_keeps_existing_values() -> anyhow::Result<()> {
    initialize_tracing();
    let output = Arc::new(QueueChannel::unbounded());
    let enricher = TransformingProducer::handler(
        HeaderEnricher::new()
            .with_header("tenant", "acme".to_string())
            .with_header("region", "eu".to_string()),
    )
    .with_output_channel(output.clone());

    let request = MessageBuilder::with_payload(())
        .set_header("tenant", "globex".to_string())
        .build();
    enricher.handle(request).await?;

    let enriched = drain(&output).await;
    let headers = enriched[0].headers();
    assert_eq!(
        headers.get_as::<String>("tenant")?.map(String::as_str),
        Some("globex")
    );
    assert_eq!(
        headers.get_as::<String>("region")?.map(String::as_str),
        Some("eu")
    );
    Ok(())
}

#[tokio::test]
async fn test_reply_goes_to_reply_channel_header() -> anyhow::Result<()> {
    initialize_tracing();
    let replies = Arc::new(QueueChannel::unbounded());
    let echo = TransformingProducer::handler(HeaderEnricher::new().with_header("echoed", true));

    let request = MessageBuilder::with_payload("ping".to_string())
        .set_reply_channel(replies.clone())
        .build();
    echo.handle(request).await?;

    let received = drain(&replies).await;
    assert_eq!(texts(&received), ["ping"]);
    assert_eq!(received[0].headers().get_as::<bool>("echoed")?, Some(&true));
    Ok(())
}

#[tokio::test]
async fn test_reply_channel_names_resolve_through_registry() -> anyhow::Result<()> {
    initialize_tracing();
    let registry = ChannelRegistry::new();
    let audit = Recorder::shared();
    let named = DirectChannel::new().named("audit");
    named.subscribe(audit.clone());
    registry.register_named(Arc::new(named))?;

    let handler = TransformingProducer::handler(HeaderEnricher::new())
        .with_channel_resolver(Arc::new(registry.clone()));

    let request = MessageBuilder::with_payload("by name".to_string())
        .set_reply_channel_name("audit")
        .build();
    handler.handle(request).await?;
    assert_eq!(audit.texts(), ["by name"]);

    let unknown = MessageBuilder::with_payload("nowhere".to_string())
        .set_reply_channel_name("missing")
        .build();
    let outcome = handler.handle(unknown).await;
    assert!(matches!(outcome, Err(MessagingError::ChannelResolution(_))));
    Ok(())
}

#[tokio::test]
async fn test_reply_without_destination_is_an_error() {
    initialize_tracing();
    let handler = TransformingProducer::handler(HeaderEnricher::new());
    let outcome = handler.handle(Message::new(1_u8)).await;
    assert!(matches!(
        outcome,
        Err(MessagingError::Delivery {
            reason: DeliveryFailure::NoReplyChannel,
            ..
        })
    ));
}

#[tokio::test]
async fn test_full_reply_channel_reports_send_timeout() -> anyhow::Result<()> {
    initialize_tracing();
    let full = Arc::new(QueueChannel::with_capacity(1)?.named("full"));
    full.send(Message::new(())).await?;
    let handler = TransformingProducer::handler(HeaderEnricher::new())
        .with_output_channel(full.clone())
        .with_send_timeout(Timeout::Immediate);

    let outcome = handler.handle(Message::new(2_u8)).await;
    assert!(matches!(
        outcome,
        Err(MessagingError::Delivery {
            reason: DeliveryFailure::SendTimedOut { .. },
            ..
        })
    ));
    Ok(())
}

#[tokio::test]
async fn test_payload_transform_round_trip_keeps_headers() -> anyhow::Result<()> {
    initialize_tracing();
    let encode = PayloadTransformer::new(|text: &String| Ok::<_, BoxError>(text.as_bytes().to_vec()));
    let decode = PayloadTransformer::new(|bytes: &Vec<u8>| String::from_utf8(bytes.clone()));

    let original = MessageBuilder::with_payload("résumé".to_string())
        .set_header("lang", "fr".to_string())
        .set_sequence_number(2)
        .build();
    let restored = decode.transform(&encode.transform(&original)?)?;

    assert_eq!(restored.payload::<String>(), original.payload::<String>());
    assert_eq!(restored.headers().get_as::<String>("lang")?, Some(&"fr".to_string()));
    assert_eq!(restored.headers().sequence_number(), Some(2));
    assert_ne!(restored.id(), original.id());
    assert_eq!(restored.headers().len(), original.headers().len());
    Ok(())
}

#[tokio::test]
async fn test_requires_reply_turns_silent_drop_into_failure() -> anyhow::Result<()> {
    initialize_tracing();
    let only_text = || MessageFilter::new(Arc::new(PayloadTypeSelector::of::<String>()));
    let lenient =
        ReplyProducingHandler::new(only_text()).with_output_channel(Arc::new(NullChannel::new()));
    let strict = ReplyProducingHandler::new(only_text())
        .with_output_channel(Arc::new(NullChannel::new()))
        .with_requires_reply(true);

    lenient.handle(Message::new(1_u8)).await?;
    let outcome = strict.handle(Message::new(1_u8)).await;
    assert!(matches!(outcome, Err(MessagingError::Handling { .. })));

    strict.handle(Message::new("text".to_string())).await?;
    Ok(())
}
