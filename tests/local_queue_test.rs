//! Local Queue Provider Tests
//!
//! Covers FIFO delivery, visibility-timeout redelivery to the head of the
//! queue, acknowledgement, and the dangling-id sweep that keeps deleted
//! messages from resurfacing.

use ephemera::error::Error;
use ephemera::ports::QueueProvider;
use ephemera::providers::LocalQueueProvider;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn test_fifo_with_zero_timeout() {
    let queue = LocalQueueProvider::new();

    queue.send_message(b"foo".to_vec()).await.unwrap();
    queue.send_message(b"bar".to_vec()).await.unwrap();

    let first = queue.receive_message(Duration::ZERO).await.unwrap();
    assert_eq!(first.id, None);
    assert_eq!(first.payload, b"foo".to_vec());

    let second = queue.receive_message(Duration::ZERO).await.unwrap();
    assert_eq!(second.id, None);
    assert_eq!(second.payload, b"bar".to_vec());

    let err = queue.receive_message(Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, Error::NoMessages));
}

#[tokio::test]
async fn test_receive_on_empty_queue() {
    let queue = LocalQueueProvider::new();

    let err = queue.receive_message(Duration::ZERO).await.unwrap_err();
    assert!(err.is_no_messages());
}

#[tokio::test]
async fn test_leased_receive_returns_id() {
    let queue = LocalQueueProvider::new();

    queue.send_message(b"foo".to_vec()).await.unwrap();

    let msg = queue
        .receive_message(Duration::from_millis(100))
        .await
        .unwrap();
    assert!(msg.id.is_some());
    assert_eq!(msg.payload, b"foo".to_vec());

    // While in flight the message is hidden from other receivers
    let err = queue.receive_message(Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, Error::NoMessages));
}

#[tokio::test]
async fn test_redelivery_returns_to_head() {
    let queue = LocalQueueProvider::new();

    queue.send_message(b"foo".to_vec()).await.unwrap();
    queue.send_message(b"bar".to_vec()).await.unwrap();

    let msg = queue
        .receive_message(Duration::from_millis(100))
        .await
        .unwrap();
    assert_eq!(msg.payload, b"foo".to_vec());

    // Let the visibility timeout elapse without acknowledging
    sleep(Duration::from_millis(300)).await;

    // The timed-out message comes back ahead of "bar", not behind it
    let redelivered = queue.receive_message(Duration::ZERO).await.unwrap();
    assert_eq!(redelivered.payload, b"foo".to_vec());

    let next = queue.receive_message(Duration::ZERO).await.unwrap();
    assert_eq!(next.payload, b"bar".to_vec());
}

#[tokio::test]
async fn test_zero_timeout_message_never_redelivered() {
    let queue = LocalQueueProvider::new();

    queue.send_message(b"foo".to_vec()).await.unwrap();
    queue.receive_message(Duration::ZERO).await.unwrap();

    sleep(Duration::from_millis(300)).await;

    let err = queue.receive_message(Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, Error::NoMessages));
}

#[tokio::test]
async fn test_redelivered_exactly_once() {
    let queue = LocalQueueProvider::new();

    queue.send_message(b"foo".to_vec()).await.unwrap();
    queue
        .receive_message(Duration::from_millis(100))
        .await
        .unwrap();

    sleep(Duration::from_millis(400)).await;

    let redelivered = queue.receive_message(Duration::ZERO).await.unwrap();
    assert_eq!(redelivered.payload, b"foo".to_vec());

    let err = queue.receive_message(Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, Error::NoMessages));
}

#[tokio::test]
async fn test_delete_before_timeout() {
    let queue = LocalQueueProvider::new();

    queue.send_message(b"foo".to_vec()).await.unwrap();

    let msg = queue
        .receive_message(Duration::from_millis(100))
        .await
        .unwrap();
    let id = msg.id.unwrap();
    queue.delete_message(&id).await.unwrap();

    // Past the timeout: the acknowledged message must not resurface
    sleep(Duration::from_millis(300)).await;

    let err = queue.receive_message(Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, Error::NoMessages));
}

#[tokio::test]
async fn test_delete_after_timeout() {
    let queue = LocalQueueProvider::new();

    queue.send_message(b"foo".to_vec()).await.unwrap();

    let msg = queue
        .receive_message(Duration::from_millis(100))
        .await
        .unwrap();
    let id = msg.id.unwrap();

    // The message re-enqueues itself, then gets acknowledged late
    sleep(Duration::from_millis(300)).await;
    queue.delete_message(&id).await.unwrap();

    // The dangling id left in the sequence is swept, not delivered
    let err = queue.receive_message(Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, Error::NoMessages));
}

#[tokio::test]
async fn test_dangling_id_sweep_skips_to_live_message() {
    let queue = LocalQueueProvider::new();

    queue.send_message(b"foo".to_vec()).await.unwrap();
    queue.send_message(b"bar".to_vec()).await.unwrap();

    let msg = queue
        .receive_message(Duration::from_millis(100))
        .await
        .unwrap();
    let id = msg.id.unwrap();

    // Redeliver "foo" to the head, then delete it while dangling
    sleep(Duration::from_millis(300)).await;
    queue.delete_message(&id).await.unwrap();

    // The sweep skips the dead head id and delivers "bar"
    let next = queue.receive_message(Duration::ZERO).await.unwrap();
    assert_eq!(next.payload, b"bar".to_vec());
}

#[tokio::test]
async fn test_delete_unknown_id_is_noop() {
    let queue = LocalQueueProvider::new();

    queue.delete_message("not-a-real-id").await.unwrap();

    // Double-delete of a once-valid id is also a no-op
    queue.send_message(b"foo".to_vec()).await.unwrap();
    let msg = queue
        .receive_message(Duration::from_millis(100))
        .await
        .unwrap();
    let id = msg.id.unwrap();
    queue.delete_message(&id).await.unwrap();
    queue.delete_message(&id).await.unwrap();
}

#[tokio::test]
async fn test_same_id_across_redeliveries() {
    let queue = LocalQueueProvider::new();

    queue.send_message(b"foo".to_vec()).await.unwrap();

    let first = queue
        .receive_message(Duration::from_millis(100))
        .await
        .unwrap();
    sleep(Duration::from_millis(300)).await;

    let second = queue
        .receive_message(Duration::from_millis(100))
        .await
        .unwrap();
    assert_eq!(first.id, second.id);

    // The id is still a valid acknowledgement handle
    queue.delete_message(&second.id.unwrap()).await.unwrap();
    sleep(Duration::from_millis(300)).await;
    let err = queue.receive_message(Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, Error::NoMessages));
}

#[tokio::test]
async fn test_instances_are_independent() {
    let a = LocalQueueProvider::new();
    let b = LocalQueueProvider::new();

    a.send_message(b"foo".to_vec()).await.unwrap();

    let err = b.receive_message(Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, Error::NoMessages));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_senders() {
    let queue = LocalQueueProvider::new();

    let mut handles = Vec::new();
    for i in 0..8u8 {
        let queue = queue.clone();
        handles.push(tokio::spawn(async move {
            queue.send_message(vec![i]).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // All eight messages arrive, in some order
    let mut received = HashSet::new();
    for _ in 0..8 {
        let msg = queue.receive_message(Duration::ZERO).await.unwrap();
        received.insert(msg.payload);
    }
    assert_eq!(received.len(), 8);

    let err = queue.receive_message(Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, Error::NoMessages));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_leased_ids_are_unique() {
    let queue = LocalQueueProvider::new();

    for i in 0..8u8 {
        queue.send_message(vec![i]).await.unwrap();
    }

    let mut ids = HashSet::new();
    for _ in 0..8 {
        let msg = queue.receive_message(Duration::from_secs(60)).await.unwrap();
        ids.insert(msg.id.unwrap());
    }
    assert_eq!(ids.len(), 8);

    for id in &ids {
        queue.delete_message(id).await.unwrap();
    }
}
