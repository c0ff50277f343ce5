use std::sync::Arc;

use docshim::{
    Firestore, SetOptions,
    transport::{Method, Request, memory::InMemoryTransport},
};
use serde::Serialize;
use serde_json::json;

use crate::helpers::{Failure, FlakyTransport, client, seeded_backend};

#[tokio::test]
async fn test_get_doc_returns_body_from_single_get() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let snapshot = db.get_doc(&db.doc(["items", "7"])).await.unwrap();

    assert_eq!(snapshot.data(), &json!({"id": "7", "number": 1}));
    assert_eq!(backend.requests(), vec![Request::get("/items/7")]);
}

#[tokio::test]
async fn test_get_doc_on_singleton() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let snapshot = db.get_doc(&db.doc(["singles", "settings"])).await.unwrap();

    assert_eq!(snapshot.data()["theme"], "dark");
    assert_eq!(backend.requests(), vec![Request::get("/settings")]);
}

#[tokio::test]
async fn test_get_doc_propagates_missing() {
    let db = client(seeded_backend());
    let err = db.get_doc(&db.doc(["items", "404"])).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.module(), "transport");
}

#[tokio::test]
async fn test_get_docs_on_collection_materializes_docs() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let snapshot = db.get_docs(&db.collection(["items"])).await.unwrap();

    assert_eq!(snapshot.data(), &json!([{"id": "7", "number": 1}]));
    assert_eq!(snapshot.docs().len(), 1);
    assert_eq!(snapshot.docs()[0].id(), "7");
    assert_eq!(backend.requests(), vec![Request::get("/items")]);
}

#[tokio::test]
async fn test_set_single_item_creates_when_missing() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    db.set_doc(&db.doc(["items", "8"]), json!({"number": 2}), SetOptions::default())
        .await
        .unwrap();

    assert_eq!(
        backend.requests(),
        vec![
            Request::get("/items/8"),
            Request::post("/items", json!({"number": 2, "id": "8"})),
        ]
    );
    let stored = db.get_doc(&db.doc(["items", "8"])).await.unwrap();
    assert_eq!(stored.data(), &json!({"number": 2, "id": "8"}));
}

#[tokio::test]
async fn test_set_single_item_patches_when_present() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    db.set_doc(&db.doc(["items", "7"]), json!({"number": 3}), SetOptions { merge: true })
        .await
        .unwrap();

    assert_eq!(
        backend.requests(),
        vec![
            Request::get("/items/7"),
            Request::patch("/items/7", json!({"number": 3})),
        ]
    );
}

#[tokio::test]
async fn test_set_accepts_serializable_structs() {
    #[derive(Serialize)]
    struct Item {
        number: u32,
        tags: Vec<&'static str>,
    }

    let backend = seeded_backend();
    let db = client(backend.clone());
    db.set_doc(
        &db.doc(["items", "7"]),
        Item {
            number: 9,
            tags: vec!["a"],
        },
        SetOptions::default(),
    )
    .await
    .unwrap();

    let patches = backend.requests_with(Method::Patch);
    assert_eq!(patches[0].body, Some(json!({"number": 9, "tags": ["a"]})));
}

#[tokio::test]
async fn test_set_list_item_patches_sibling_with_foreign_key() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    db.set_doc(
        &db.doc(["lists", "4", "items", "1"]),
        json!({"label": "rye bread"}),
        SetOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        backend.requests(),
        vec![
            Request::get("/listsItems/1"),
            Request::patch(
                "/listsItems/1",
                json!({"label": "rye bread", "listId": "4", "id": "1"})
            ),
        ]
    );
}

#[tokio::test]
async fn test_set_list_item_posts_to_sibling_collection_when_missing() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    db.set_doc(
        &db.doc(["categories", "2", "items", "5"]),
        json!({"label": "x"}),
        SetOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        backend.requests_with(Method::Post),
        vec![Request::post(
            "/categoriesItems",
            json!({"label": "x", "categoryId": "2", "id": "5"})
        )]
    );
}

#[tokio::test]
async fn test_set_generic_path_patches_as_is() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let snapshot = db
        .set_doc(
            &db.doc(["singles", "settings"]),
            json!({"lang": "en"}),
            SetOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(snapshot.data(), &json!({"theme": "dark", "lang": "en"}));
    assert_eq!(
        backend.requests(),
        vec![Request::patch("/settings", json!({"lang": "en"}))]
    );
}

#[tokio::test]
async fn test_single_item_write_failure_is_returned() {
    let backend = seeded_backend();
    let flaky = FlakyTransport::new(backend.clone()).fail(Method::Patch, "/items/7", Failure::Status(500));
    let db = client(Arc::new(flaky));

    let err = db
        .set_doc(&db.doc(["items", "7"]), json!({"number": 4}), SetOptions::default())
        .await
        .unwrap_err();

    let transport_err = err.transport_error().expect("transport error");
    assert_eq!(transport_err.status_code(), Some(500));
    assert_eq!(transport_err.request_line(), r#"PATCH /items/7 {"number":4}"#);
}

#[tokio::test]
async fn test_non_object_payload_rejected_for_single_item_create() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let err = db
        .set_doc(&db.doc(["items", "99"]), json!([1, 2, 3]), SetOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_validation_error());
    // only the existence check went out
    assert_eq!(backend.requests(), vec![Request::get("/items/99")]);
}

#[tokio::test]
async fn test_four_part_path_without_items_is_rejected_locally() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let err = db
        .set_doc(
            &db.doc(["orders", "7", "lines", "3"]),
            json!({"n": 1}),
            SetOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(err.is_validation_error());
    assert_eq!(err.module(), "reference");
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_document_exists_status_and_connection_errors() {
    let backend = seeded_backend();
    let flaky = FlakyTransport::new(backend)
        .fail(Method::Get, "/broken", Failure::Status(503))
        .fail(Method::Get, "/offline", Failure::Connection)
        .fail(Method::Get, "/garbled", Failure::Decode);
    let db = client(Arc::new(flaky));

    assert!(db.document_exists("/items/7").await.unwrap());
    assert!(!db.document_exists("/items/404").await.unwrap());
    // any error status counts as missing
    assert!(!db.document_exists("/broken").await.unwrap());
    // the backend answered, so the resource is there
    assert!(db.document_exists("/garbled").await.unwrap());
    let err = db.document_exists("/offline").await.unwrap_err();
    assert!(err.is_connection_error());
}

#[tokio::test]
async fn test_connection_failure_during_existence_check_aborts_set() {
    let backend = seeded_backend();
    let flaky =
        FlakyTransport::new(backend.clone()).fail(Method::Get, "/items/7", Failure::Connection);
    let db = client(Arc::new(flaky));

    let err = db
        .set_doc(&db.doc(["items", "7"]), json!({"number": 4}), SetOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_connection_error());
    assert!(backend.requests_with(Method::Patch).is_empty());
    assert!(backend.requests_with(Method::Post).is_empty());
}

#[tokio::test]
async fn test_delete_doc_issues_one_delete() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    db.delete_doc(&db.doc(["items", "7"])).await.unwrap();

    assert_eq!(backend.requests(), vec![Request::delete("/items/7")]);
    assert!(db.get_doc(&db.doc(["items", "7"])).await.is_err());
}

#[tokio::test]
async fn test_add_doc_posts_to_collection() {
    let backend = seeded_backend();
    let db = client(backend.clone());

    let snapshot = db
        .add_doc(&db.collection(["lists"]), json!({"name": "hardware"}))
        .await
        .unwrap();

    assert_eq!(snapshot.data()["name"], "hardware");
    assert_eq!(
        backend.requests(),
        vec![Request::post("/lists", json!({"name": "hardware"}))]
    );
}

#[tokio::test]
async fn test_set_transport_swaps_backend() {
    let first = seeded_backend();
    let second = Arc::new(InMemoryTransport::new());
    let mut db: Firestore = client(first.clone());

    db.set_transport(second.clone());
    let _ = db.get_doc(&db.doc(["items", "7"])).await;

    assert!(first.requests().is_empty());
    assert_eq!(second.requests(), vec![Request::get("/items/7")]);
}
