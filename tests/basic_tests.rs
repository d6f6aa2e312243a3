use bytes::Bytes;
use futures::StreamExt;
use replicating_object_store::{
    AccessPolicy, KeyConstraint, ReplicatingStore, ValidationError, create_in_memory_store,
};

#[tokio::test]
async fn write_then_read_round_trips_binary_bytes() {
    let store = create_in_memory_store(&["primary"]).unwrap();

    let payload = Bytes::from(vec![0x00, 0xff, 0xfe, 0x01, b'x']);
    store
        .resolve("blobs/raw.bin")
        .unwrap()
        .write(payload.clone())
        .await
        .unwrap();

    // A fresh handle reads the same bytes back.
    let read = store
        .resolve("blobs/raw.bin")
        .unwrap()
        .read()
        .await
        .unwrap();
    assert_eq!(read, Some(payload));
}

#[tokio::test]
async fn unwritten_key_is_absent_not_an_error() {
    let store = create_in_memory_store(&["primary"]).unwrap();
    let object = store.resolve("never/written").unwrap();

    assert!(!object.exists().await.unwrap());
    assert_eq!(object.read().await.unwrap(), None);
    assert!(object.read_stream().await.unwrap().is_none());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let store = create_in_memory_store(&["primary"]).unwrap();
    let object = store.resolve("doomed").unwrap();

    assert!(!object.delete().await.unwrap());

    object.write("content").await.unwrap();
    assert!(object.delete().await.unwrap());
    assert!(!object.delete().await.unwrap());
    assert!(!object.exists().await.unwrap());
}

#[tokio::test]
async fn streaming_read_yields_the_full_payload() {
    let store = create_in_memory_store(&["primary"]).unwrap();
    let object = store.resolve("streamed").unwrap();
    let payload = Bytes::from(vec![42u8; 4096]);

    object.write(payload.clone()).await.unwrap();

    let mut stream = object.read_stream().await.unwrap().unwrap();
    let mut collected = Vec::new();
    while let Some(chunk) = stream.next().await {
        collected.extend_from_slice(&chunk.unwrap());
    }
    assert_eq!(collected, payload.to_vec());
}

#[tokio::test]
async fn callback_read_feeds_chunks_or_reports_absence() {
    let store = create_in_memory_store(&["primary"]).unwrap();
    let object = store.resolve("chunked").unwrap();

    let mut collected = Vec::new();
    assert!(!object.read_with(|chunk| collected.extend_from_slice(&chunk)).await.unwrap());
    assert!(collected.is_empty());

    object.write("CONTENT").await.unwrap();
    assert!(object.read_with(|chunk| collected.extend_from_slice(&chunk)).await.unwrap());
    assert_eq!(collected, b"CONTENT");
}

#[tokio::test]
async fn invalid_keys_are_rejected_before_any_io() {
    let store = create_in_memory_store(&["primary"]).unwrap();

    assert_eq!(store.resolve("").unwrap_err(), ValidationError::EmptyKey);
    assert_eq!(
        store.resolve("/leading").unwrap_err(),
        ValidationError::KeyStartsWithSlash
    );
    assert_eq!(
        store.resolve("a//b").unwrap_err(),
        ValidationError::KeyContainsDoubleSlash
    );
    assert_eq!(
        store.resolve("nul\0byte").unwrap_err(),
        ValidationError::InvalidKeyCharacter { character: '\0' }
    );
    assert!(matches!(
        store.resolve(&"x".repeat(2000)).unwrap_err(),
        ValidationError::KeyTooLong { .. }
    ));
}

#[tokio::test]
async fn custom_key_constraint_applies_at_resolution() {
    let store = ReplicatingStore::builder()
        .with_backend(std::sync::Arc::new(
            replicating_object_store::InMemoryBackend::new("primary"),
        ))
        .with_key_constraint(KeyConstraint::default().with_max_len(8))
        .build()
        .unwrap();

    assert!(store.resolve("short").is_ok());
    assert!(matches!(
        store.resolve("way-too-long-for-this-store").unwrap_err(),
        ValidationError::KeyTooLong { max: 8, .. }
    ));
}

#[tokio::test]
async fn memory_store_is_available() {
    let store = create_in_memory_store(&["primary"]).unwrap();
    assert!(store.available().await);
}

#[tokio::test]
async fn policy_defaults_to_private() {
    let store = create_in_memory_store(&["primary"]).unwrap();
    assert_eq!(store.policy(), AccessPolicy::Private);
}
