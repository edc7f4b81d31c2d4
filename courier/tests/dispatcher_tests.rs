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

use crate::setup::handlers::{Recorder, Rejecter};
use crate::setup::*;

mod setup;

fn correlation(message: &Message) -> Option<Uuid> {
    message
        .headers()
        .correlation_id()
        .and_then(HeaderValue::downcast_ref::<Uuid>)
        .copied()
}

fn failing_handler() -> HandlerRef {
    Arc::new(FnHandler::new("failing", |message: Message| async move {
        Err(MessagingError::handling(message, "disk full"))
    }))
}

#[tokio::test]
async fn test_simple_dispatcher_without_handlers_fails() {
    initialize_tracing();
    let dispatcher = SimpleDispatcher::new();
    let outcome = dispatcher.dispatch(Message::new("lost".to_string())).await;
    assert!(matches!(
        outcome,
        Err(MessagingError::Delivery {
            reason: DeliveryFailure::NoSubscribers,
            ..
        })
    ));
}

#[tokio::test]
async fn test_simple_dispatcher_reports_when_all_reject() {
    initialize_tracing();
    let dispatcher = SimpleDispatcher::new();
    let first = Rejecter::shared();
    let second = Rejecter::shared();
    dispatcher.add_handler(first.clone());
    dispatcher.add_handler(second.clone());

    let outcome = dispatcher.dispatch(Message::new(1_u8)).await;
    assert!(matches!(outcome, Err(MessagingError::Rejected { .. })));
    assert_eq!(first.attempts(), 1);
    assert_eq!(second.attempts(), 1);
}

#[tokio::test]
async fn test_simple_dispatcher_falls_through_to_next_handler() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = SimpleDispatcher::new();
    let rejecter = Rejecter::shared();
    let first_acceptor = Recorder::shared();
    let second_acceptor = Recorder::shared();
    dispatcher.add_handler(rejecter.clone());
    dispatcher.add_handler(first_acceptor.clone());
    dispatcher.add_handler(second_acceptor.clone());

    assert!(dispatcher.dispatch(Message::new("once".to_string())).await?);
    assert_eq!(rejecter.attempts(), 1);
    assert_eq!(first_acceptor.texts(), ["once"]);
    assert_eq!(second_acceptor.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_simple_dispatcher_propagates_handler_failures() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = SimpleDispatcher::new();
    let failing = failing_handler();
    let never = Recorder::shared();
    dispatcher.add_handler(failing);
    dispatcher.add_handler(never.clone());

    let outcome = dispatcher.dispatch(Message::new(())).await;
    assert!(matches!(outcome, Err(MessagingError::Handling { .. })));
    assert_eq!(never.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_handler_removed_mid_stream_stops_receiving() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = BroadcastingDispatcher::new();
    let stays = Recorder::shared();
    let leaves = Recorder::shared();
    dispatcher.add_handler(stays.clone());
    dispatcher.add_handler(leaves.clone());

    dispatcher.dispatch(Message::new("first".to_string())).await?;
    let leaves_ref: HandlerRef = leaves.clone();
    assert!(dispatcher.remove_handler(&leaves_ref));
    assert!(!dispatcher.remove_handler(&leaves_ref));
    dispatcher.dispatch(Message::new("second".to_string())).await?;

    assert_eq!(stays.texts(), ["first", "second"]);
    assert_eq!(leaves.texts(), ["first"]);
    assert_eq!(dispatcher.handler_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_broadcast_applies_sequence_headers() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = BroadcastingDispatcher::new().with_apply_sequence(true);
    let recorders = [Recorder::shared(), Recorder::shared(), Recorder::shared()];
    for recorder in &recorders {
        dispatcher.add_handler(recorder.clone());
    }

    let original = Message::new("fan-out".to_string());
    assert!(dispatcher.dispatch(original.clone()).await?);

    for (index, recorder) in recorders.iter().enumerate() {
        let copies = recorder.messages();
        assert_eq!(copies.len(), 1);
        let copy = &copies[0];
        assert_eq!(copy.headers().sequence_number(), Some(index + 1));
        assert_eq!(copy.headers().sequence_size(), Some(3));
        assert_eq!(correlation(copy), Some(original.id()));
        assert_eq!(copy.payload::<String>().map(String::as_str), Some("fan-out"));
    }
    Ok(())
}

#[tokio::test]
async fn test_broadcast_without_sequence_leaves_headers_alone() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = BroadcastingDispatcher::new().with_apply_sequence(false);
    let recorder = Recorder::shared();
    dispatcher.add_handler(recorder.clone());

    dispatcher.dispatch(Message::new(5_i32)).await?;
    let copy = &recorder.messages()[0];
    assert_eq!(copy.headers().sequence_number(), None);
    assert!(correlation(copy).is_none());
    Ok(())
}

#[tokio::test]
async fn test_broadcast_tolerates_rejecting_subscribers() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = BroadcastingDispatcher::new();
    let rejecter = Rejecter::shared();
    let recorder = Recorder::shared();
    dispatcher.add_handler(rejecter.clone());
    dispatcher.add_handler(recorder.clone());

    assert!(dispatcher.dispatch(Message::new(())).await?);
    assert_eq!(rejecter.attempts(), 1);
    assert_eq!(recorder.count(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_broadcast_through_task_executor() -> anyhow::Result<()> {
    initialize_tracing();
    let executor = Arc::new(TokioTaskExecutor::current()?);
    let dispatcher =
        BroadcastingDispatcher::new().with_executor(executor.clone() as Arc<dyn TaskExecutor>);
    let recorders: Vec<_> = (0..4).map(|_| Recorder::shared()).collect();
    for recorder in &recorders {
        dispatcher.add_handler(recorder.clone());
    }

    assert!(dispatcher.dispatch(Message::new("async".to_string())).await?);
    executor.close();
    executor.wait().await;

    for recorder in &recorders {
        assert_eq!(recorder.texts(), ["async"]);
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_executor_failures_stay_with_the_executor() -> anyhow::Result<()> {
    initialize_tracing();
    let executor = Arc::new(TokioTaskExecutor::current()?);
    let dispatcher =
        BroadcastingDispatcher::new().with_executor(executor.clone() as Arc<dyn TaskExecutor>);
    let before = Recorder::shared();
    let after = Recorder::shared();
    dispatcher.add_handler(before.clone());
    dispatcher.add_handler(failing_handler());
    dispatcher.add_handler(after.clone());

    assert!(dispatcher.dispatch(Message::new("fan".to_string())).await?);
    executor.close();
    executor.wait().await;

    assert_eq!(before.texts(), ["fan"]);
    assert_eq!(after.texts(), ["fan"]);
    Ok(())
}

#[tokio::test]
async fn test_inline_broadcast_propagates_handler_failures() {
    initialize_tracing();
    let dispatcher = BroadcastingDispatcher::new();
    let first = Recorder::shared();
    dispatcher.add_handler(first.clone());
    dispatcher.add_handler(failing_handler());

    let outcome = dispatcher.dispatch(Message::new(())).await;
    assert!(matches!(outcome, Err(MessagingError::Handling { .. })));
    assert_eq!(first.count(), 1);
}

#[tokio::test]
async fn test_closed_executor_runs_on_caller() -> anyhow::Result<()> {
    initialize_tracing();
    let executor = Arc::new(TokioTaskExecutor::new(
        tokio::runtime::Handle::current(),
        Some(1),
    ));
    executor.close();
    let dispatcher = BroadcastingDispatcher::new().with_executor(executor);
    let recorder = Recorder::shared();
    dispatcher.add_handler(recorder.clone());

    assert!(dispatcher.dispatch(Message::new(9_u64)).await?);
    assert_eq!(recorder.count(), 1);
    Ok(())
}
