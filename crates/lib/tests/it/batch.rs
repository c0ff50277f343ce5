use std::{sync::Arc, time::Duration};

use docshim::{
    Reference,
    transport::{Method, Request},
};
use serde_json::json;

use crate::helpers::{BarrierTransport, Failure, FlakyTransport, client, seeded_backend};

#[tokio::test]
async fn test_update_existing_item_issues_single_patch() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let mut batch = db.write_batch();
    batch.update(&Reference::from(["items", "7"]), json!({"number": 3}));
    let outcome = batch.commit().await;

    assert!(outcome.is_success());
    assert_eq!(
        backend.requests_with(Method::Patch),
        vec![Request::patch("/items/7", json!({"number": 3}))]
    );
    assert!(backend.requests_with(Method::Post).is_empty());
}

#[tokio::test]
async fn test_set_missing_item_posts_to_collection() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let mut batch = db.write_batch();
    batch.set(&db.doc(["items", "12"]), json!({"number": 5}));
    batch.commit().await.into_result().unwrap();

    assert_eq!(
        backend.requests_with(Method::Post),
        vec![Request::post("/items", json!({"number": 5, "id": "12"}))]
    );
}

#[tokio::test]
async fn test_delete_issues_delete() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let mut batch = db.write_batch();
    batch.delete(&db.doc(["items", "7"]));
    batch.commit().await.into_result().unwrap();

    assert_eq!(backend.requests(), vec![Request::delete("/items/7")]);
}

#[tokio::test]
async fn test_one_write_call_per_operation_in_queue_order() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let mut batch = db.write_batch();
    batch
        .update(&db.doc(["items", "7"]), json!({"number": 10}))
        .set(&db.doc(["items", "20"]), json!({"number": 20}))
        .set(&db.doc(["lists", "4", "items", "1"]), json!({"label": "rye"}))
        .delete(&db.doc(["lists", "4"]));
    let outcome = batch.commit().await;

    assert_eq!(outcome.len(), 4);
    assert!(outcome.is_success());

    let writes: Vec<Request> = backend
        .requests()
        .into_iter()
        .filter(|r| r.method != Method::Get)
        .collect();
    assert_eq!(writes.len(), 4);
    assert_eq!(backend.requests_with(Method::Patch).len(), 2);
    assert_eq!(backend.requests_with(Method::Post).len(), 1);
    assert_eq!(backend.requests_with(Method::Delete).len(), 1);

    let results = outcome.into_results();
    assert_eq!(results[0].as_ref().unwrap().data()["number"], 10);
    assert_eq!(results[1].as_ref().unwrap().data()["id"], "20");
    assert_eq!(results[2].as_ref().unwrap().data()["listId"], "4");
}

#[tokio::test]
async fn test_failures_do_not_abort_other_operations() {
    let backend = seeded_backend();
    let flaky = FlakyTransport::new(backend.clone())
        .fail(Method::Patch, "/items/7", Failure::Status(500))
        .fail(Method::Delete, "/lists/4", Failure::Connection);
    let db = client(Arc::new(flaky));

    let mut batch = db.write_batch();
    batch
        .update(&db.doc(["items", "7"]), json!({"number": 1}))
        .set(&db.doc(["items", "30"]), json!({"number": 30}))
        .delete(&db.doc(["lists", "4"]))
        .set(&db.doc(["unknown", "1", "items", "2"]), json!({}));
    let outcome = batch.commit().await;

    assert_eq!(outcome.len(), 4);
    assert!(!outcome.is_success());

    let failed: Vec<usize> = outcome.failures().map(|(index, _)| index).collect();
    assert_eq!(failed, [0, 2, 3]);

    let results = outcome.results();
    assert!(results[0].as_ref().unwrap_err().is_transport_error());
    assert!(results[1].is_ok());
    assert!(results[2].as_ref().unwrap_err().is_connection_error());
    // no singular name registered for "unknown"
    assert!(results[3].as_ref().unwrap_err().is_validation_error());

    assert_eq!(
        backend.requests_with(Method::Post),
        vec![Request::post("/items", json!({"number": 30, "id": "30"}))]
    );
}

#[tokio::test]
async fn test_commit_dispatches_operations_concurrently() {
    let backend = seeded_backend();
    let operations = 5;
    let db = client(Arc::new(BarrierTransport::new(backend.clone(), operations)));

    let mut batch = db.write_batch();
    for i in 0..operations {
        batch.update(&db.doc(["items", "7"]), json!({ "number": i }));
    }

    let outcome = tokio::time::timeout(Duration::from_secs(10), batch.commit())
        .await
        .expect("all writes must be in flight at once");

    assert!(outcome.is_success());
    assert_eq!(backend.requests_with(Method::Patch).len(), operations);
}

#[tokio::test]
async fn test_queued_operations_have_no_side_effects_before_commit() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let mut batch = db.write_batch();
    batch
        .set(&db.doc(["items", "1"]), json!({}))
        .delete(&db.doc(["items", "7"]));

    assert_eq!(batch.len(), 2);
    assert!(backend.requests().is_empty());
    drop(batch);
    assert!(backend.requests().is_empty());
}
