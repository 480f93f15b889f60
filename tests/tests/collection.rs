use docbridge::{
    doc,
    driver::{Documents, Operation, Response},
    options::{FindOptions, InsertManyOptions, UpdateOptions},
    schema::app::{Element, Field, Primitive},
    stmt::{Document, Value},
    types::TrackedDocument,
    ConnectOptions, Schema,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tests::connect;

fn wire(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(object) => object,
        other => panic!("expected an object, got {other}"),
    }
}

fn cats_schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder("cats")
            .field("name", Field::text().required())
            .field("tags", Field::set(Element::new(Primitive::Text).required()))
            .field("embedding", Field::vector(2).select(true))
            .build()
            .unwrap(),
    )
}

#[tokio::test]
async fn upsert_injects_generated_id() {
    let (conn, driver) = connect(ConnectOptions::new()).await;
    let cats = conn.collection("cats");

    cats.update_one(
        doc! { "name" => "Fluffy" },
        doc! { "$set" => doc! { "age" => 3i64 } },
        UpdateOptions::default().upsert(),
    )
    .await
    .unwrap();

    let Operation::UpdateOne(op) = driver.log().pop_op() else {
        panic!("expected updateOne");
    };
    assert!(op.upsert);
    assert_eq!(op.update["$set"], json!({ "age": 3 }));

    let id = op.update["$setOnInsert"]["_id"].as_str().unwrap();
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn upsert_keeps_id_from_filter() {
    let (conn, driver) = connect(ConnectOptions::new()).await;
    let cats = conn.collection("cats");

    cats.update_one(
        doc! { "_id" => "c1" },
        doc! { "$set" => doc! { "age" => 3i64 } },
        UpdateOptions::default().upsert(),
    )
    .await
    .unwrap();

    let Operation::UpdateOne(op) = driver.log().pop_op() else {
        panic!("expected updateOne");
    };
    assert_eq!(op.update, wire(json!({ "$set": { "age": 3 } })));
}

#[tokio::test]
async fn update_without_upsert_is_untouched() {
    let (conn, driver) = connect(ConnectOptions::new()).await;

    conn.collection("cats")
        .update_one(
            doc! { "name" => "Fluffy" },
            doc! { "age" => 4i64 },
            UpdateOptions::default(),
        )
        .await
        .unwrap();

    let Operation::UpdateOne(op) = driver.log().pop_op() else {
        panic!("expected updateOne");
    };
    assert!(!op.upsert);
    // Plain fields read as a partial update
    assert_eq!(op.update, wire(json!({ "$set": { "age": 4 } })));
}

#[tokio::test]
async fn replace_one_upsert_injects_id() {
    let (conn, driver) = connect(ConnectOptions::new()).await;

    conn.collection("cats")
        .replace_one(
            doc! { "name" => "Fluffy" },
            doc! { "name" => "Whiskers" },
            UpdateOptions::default().upsert(),
        )
        .await
        .unwrap();

    let Operation::ReplaceOne(op) = driver.log().pop_op() else {
        panic!("expected replaceOne");
    };
    assert_eq!(op.replacement["name"], "Whiskers");
    assert!(op.replacement["_id"].is_string());
}

#[tokio::test]
async fn meta_sort_is_unwrapped() {
    let (conn, driver) = connect(ConnectOptions::new()).await;

    let mut cursor = conn
        .collection("cats")
        .find(
            doc! {},
            FindOptions::default().sort(doc! {
                "$vector" => doc! { "$meta" => vec![0.5f64, 0.25] },
                "name" => Value::Null,
            }),
        )
        .await
        .unwrap();

    // The cursor is lazy
    assert!(driver.log().is_empty());
    assert!(cursor.next().await.is_none());

    let Operation::Find(op) = driver.log().pop_op() else {
        panic!("expected find");
    };
    assert_eq!(op.sort, Some(wire(json!({ "$vector": [0.5, 0.25] }))));
}

#[tokio::test]
async fn cursor_follows_page_state() {
    let (conn, driver) = connect(ConnectOptions::new()).await;

    driver.respond(Ok(Response::Documents(Documents {
        documents: vec![wire(json!({ "_id": "a" })), wire(json!({ "_id": "b" }))],
        next_page_state: Some("page-2".to_string()),
        sort_vector: None,
    })));
    driver.respond(Ok(Response::documents(vec![wire(json!({ "_id": "c" }))])));

    let docs: Vec<Document> = conn
        .collection("cats")
        .find(doc! {}, FindOptions::default().limit(10))
        .await
        .unwrap()
        .collect()
        .await
        .unwrap();

    let ids: Vec<_> = docs.iter().map(|doc| doc.id().cloned()).collect();
    assert_eq!(
        ids,
        vec![Some(Value::from("a")), Some(Value::from("b")), Some(Value::from("c"))]
    );

    let mut log = driver.log();
    assert_eq!(log.len(), 2);
    assert!(log.has_find() && !log.has_update());

    let Operation::Find(first) = log.pop_op() else {
        panic!("expected find");
    };
    let Operation::Find(second) = log.pop_op() else {
        panic!("expected find");
    };
    assert_eq!(first.page_state, None);
    assert_eq!(first.limit, Some(10));
    assert_eq!(second.page_state.as_deref(), Some("page-2"));
}

#[tokio::test]
async fn delete_many_without_a_count() {
    let (conn, driver) = connect(ConnectOptions::new()).await;
    driver.respond(Ok(Response::Deleted(None)));

    let result = conn.collection("cats").delete_many(doc! {}).await.unwrap();
    assert_eq!(result.deleted_count, None);
}

#[tokio::test]
async fn count_documents_over_upper_bound() {
    let (conn, driver) = connect(ConnectOptions::new()).await;
    let cats = conn.collection("cats");

    driver.respond(Ok(Response::Count { count: 7, more: false }));
    assert_eq!(cats.count_documents(doc! {}, 100).await.unwrap(), 7);

    driver.respond(Ok(Response::Count {
        count: 100,
        more: true,
    }));
    let err = cats.count_documents(doc! {}, 100).await.unwrap_err();
    assert!(err.is_invalid_result());
}

#[tokio::test]
async fn insert_many_is_split_into_batches() {
    let (conn, driver) = connect(ConnectOptions::new()).await;

    let docs = (0..150)
        .map(|i| doc! { "_id" => format!("cat-{i}") })
        .collect::<Vec<_>>();

    let result = conn
        .collection("cats")
        .insert_many(docs, InsertManyOptions::default())
        .await
        .unwrap();

    assert_eq!(result.inserted_ids.len(), 150);
    assert_eq!(result.inserted_ids[149], Value::from("cat-149"));

    let sizes = driver.log().with_ops(|ops| {
        ops.iter()
            .map(|op| match &op.operation {
                Operation::InsertMany(insert) => {
                    assert!(insert.ordered);
                    insert.documents.len()
                }
                other => panic!("expected insertMany, got {}", other.name()),
            })
            .collect::<Vec<_>>()
    });
    assert_eq!(sizes, vec![100, 50]);
}

#[tokio::test]
async fn unsupported_operations_never_reach_the_driver() {
    let (conn, driver) = connect(ConnectOptions::new()).await;
    let cats = conn.collection("cats");

    let err = cats.aggregate(&[]).unwrap_err();
    assert!(err.is_unsupported_operation());
    assert_eq!(err.to_string(), "operation not supported: aggregate");

    assert!(cats.bulk_write(&[]).unwrap_err().is_unsupported_operation());
    assert!(cats.watch().unwrap_err().is_unsupported_operation());
    assert!(cats.start_transaction().unwrap_err().is_unsupported_operation());
    assert!(cats
        .distinct("name", &doc! {})
        .unwrap_err()
        .is_unsupported_operation());

    // Table indexes are not available on collections
    let err = cats.create_index("by_name", "name", None).await.unwrap_err();
    assert!(err.is_unsupported_operation());

    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn find_one_deserializes_the_document() {
    let (conn, driver) = connect(ConnectOptions::new()).await;
    driver.respond(Ok(Response::Document(Some(wire(json!({
        "_id": "c1",
        "name": "Tom",
        "born": { "$date": 0 },
    }))))));

    let doc = conn
        .collection("cats")
        .find_one(doc! { "_id" => "c1" }, Default::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(doc.get("name"), Some(&Value::from("Tom")));
    assert!(matches!(doc.get("born"), Some(Value::Date(_))));
}

#[tokio::test]
async fn run_command_returns_raw_body() {
    let (conn, driver) = connect(ConnectOptions::new()).await;

    let body = conn
        .collection("cats")
        .run_command(doc! { "findOne" => doc! { "filter" => doc! {} } })
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": { "ok": 1 } }));

    let Operation::Command(op) = driver.log().pop_op() else {
        panic!("expected command");
    };
    assert_eq!(op.collection.as_deref(), Some("cats"));
    assert_eq!(op.body, wire(json!({ "findOne": { "filter": {} } })));
}

#[tokio::test]
async fn model_writes_are_validated() {
    let (conn, driver) = connect(ConnectOptions::new()).await;
    let cats = conn.model(cats_schema());

    let err = cats.insert_one(doc! { "_id" => "c1" }).await.unwrap_err();
    assert!(err.is_validation());

    let err = cats
        .insert_one(doc! {
            "_id" => "c1",
            "name" => "Tom",
            "embedding" => vec![0.1f64, 0.2, 0.3],
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation failed at `embedding`: expected 2 dimensions, got 3"
    );

    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn model_queries_select_hidden_fields() {
    let (conn, driver) = connect(ConnectOptions::new()).await;
    let cats = conn.model(cats_schema());

    cats.find_one(doc! {}, Default::default()).await.unwrap();

    let Operation::FindOne(op) = driver.log().pop_op() else {
        panic!("expected findOne");
    };
    assert_eq!(op.projection, Some(wire(json!({ "*": 1 }))));
}

#[tokio::test]
async fn save_sends_atomic_set_updates() {
    let (conn, driver) = connect(ConnectOptions::new()).await;
    let schema = cats_schema();
    let cats = conn.model(schema.clone());

    let mut tom = TrackedDocument::hydrate(
        doc! {
            "_id" => "c1",
            "name" => "Tom",
            "tags" => vec!["a", "b"],
        },
        &schema,
    )
    .unwrap();

    // Nothing changed yet
    cats.save(&mut tom).await.unwrap();
    assert!(driver.log().is_empty());

    tom.set_field("tags").unwrap().add("c").unwrap();
    cats.save(&mut tom).await.unwrap();

    let Operation::UpdateOne(op) = driver.log().pop_op() else {
        panic!("expected updateOne");
    };
    assert_eq!(op.filter, wire(json!({ "_id": "c1" })));
    assert_eq!(
        op.update,
        wire(json!({ "$push": { "tags": { "$each": ["c"] } } }))
    );
    assert!(!tom.is_modified());

    // Mixing additions and removals falls back to a full replace
    let tags = tom.set_field("tags").unwrap();
    tags.add("d").unwrap();
    tags.delete("a").unwrap();
    cats.save(&mut tom).await.unwrap();

    let mut log = driver.log();
    let Operation::UpdateOne(op) = log.pop_op() else {
        panic!("expected updateOne");
    };
    assert_eq!(op.update, wire(json!({ "$set": { "tags": ["b", "c", "d"] } })));
}
