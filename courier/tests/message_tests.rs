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
use std::collections::HashMap;

use courier::prelude::*;
use uuid::Uuid;

use crate::setup::*;

mod setup;

#[test]
fn test_headers_reject_mutation() {
    initialize_tracing();
    let message = MessageBuilder::with_payload(1_u8)
        .set_header("kept", "yes".to_string())
        .build();
    let headers = message.headers();

    assert!(matches!(
        headers.insert("added", HeaderValue::new(2_u8)),
        Err(MessagingError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        headers.extend(HashMap::new()),
        Err(MessagingError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        headers.remove("kept"),
        Err(MessagingError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        headers.clear(),
        Err(MessagingError::UnsupportedOperation(_))
    ));
    assert!(headers.contains_key("kept"));
}

#[test]
fn test_caller_cannot_forge_identity() -> anyhow::Result<()> {
    initialize_tracing();
    let forged = Uuid::nil();
    let message = MessageBuilder::with_payload("x".to_string())
        .set_header(keys::ID, forged)
        .build();

    assert_ne!(message.id(), forged);
    assert_eq!(message.headers().get_as::<Uuid>(keys::ID)?, Some(&message.id()));
    assert!(message.headers().contains_key(keys::TIMESTAMP));
    Ok(())
}

#[test]
fn test_derived_messages_get_fresh_identity() {
    initialize_tracing();
    let original = MessageBuilder::with_payload(10_i32)
        .set_correlation_id("order-1".to_string())
        .set_priority(MessagePriority::High)
        .build();
    let derived = MessageBuilder::from_message(&original)
        .set_header("step", 2_u8)
        .build();

    assert_ne!(derived.id(), original.id());
    assert!(derived.timestamp() >= original.timestamp());
    assert_eq!(derived.headers().priority(), Some(MessagePriority::High));
    assert_eq!(
        derived
            .headers()
            .correlation_id()
            .and_then(HeaderValue::downcast_ref::<String>)
            .map(String::as_str),
        Some("order-1")
    );
    assert!(!original.headers().contains_key("step"));
}

#[test]
fn test_typed_reads_report_mismatches() {
    initialize_tracing();
    let message = MessageBuilder::with_payload(4.5_f64)
        .set_header("count", 3_u32)
        .build();

    assert!(matches!(
        message.headers().get_as::<String>("count"),
        Err(MessagingError::TypeMismatch { .. })
    ));
    assert!(matches!(
        message.payload_as::<String>(),
        Err(MessagingError::TypeMismatch { .. })
    ));
    assert!(matches!(message.headers().get_as::<u32>("absent"), Ok(None)));
}

#[test]
fn test_builder_if_absent_keeps_existing() {
    initialize_tracing();
    let message = MessageBuilder::with_payload(())
        .set_header("mode", "fast".to_string())
        .set_header_if_absent("mode", "slow".to_string())
        .set_header_if_absent("retries", 3_u8)
        .build();

    assert!(matches!(
        message.headers().get_as::<String>("mode"),
        Ok(Some(mode)) if mode == "fast"
    ));
    assert!(matches!(message.headers().get_as::<u8>("retries"), Ok(Some(&3))));
}
