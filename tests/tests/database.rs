use docbridge::{
    doc,
    driver::{Operation, Response},
    schema::{
        app::{Element, Field, Primitive},
        db::{Column, ScalarType},
    },
    ConnectOptions, Mode, Schema,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tests::connect;

fn tables() -> ConnectOptions {
    ConnectOptions::new().mode(Mode::Tables)
}

fn profile_schema() -> Arc<Schema> {
    let address = Schema::builder("address")
        .field("street", Field::text())
        .field("zip", Field::primitive(Primitive::Int))
        .build()
        .unwrap();

    Arc::new(
        Schema::builder("profiles")
            .field("name", Field::text())
            .field("address", Field::embedded(address).udt_name("address_udt"))
            .build()
            .unwrap(),
    )
}

#[tokio::test]
async fn collections_db_manages_collections() {
    let (conn, driver) = connect(ConnectOptions::new()).await;
    let db = conn.db();
    assert_eq!(db.mode(), Mode::Collections);

    let cats = db
        .create_collection("cats", Some(doc! { "vector" => doc! { "dimension" => 2i64 } }))
        .await
        .unwrap();
    assert_eq!(cats.name(), "cats");

    driver.respond(Ok(Response::Names(vec!["cats".to_string()])));
    assert_eq!(db.list_collections().await.unwrap(), vec!["cats".to_string()]);

    db.drop_collection("cats").await.unwrap();

    assert_eq!(
        driver.log().names(),
        vec!["createCollection", "findCollections", "deleteCollection"]
    );

    let Operation::CreateCollection(op) = driver.log().pop_op() else {
        panic!("expected createCollection");
    };
    assert_eq!(op.keyspace, "app");
    let options: serde_json::Map<_, _> =
        serde_json::from_value(json!({ "vector": { "dimension": 2 } })).unwrap();
    assert_eq!(op.options, Some(options));
}

#[tokio::test]
async fn collections_db_rejects_table_operations() {
    let (conn, driver) = connect(ConnectOptions::new()).await;
    let db = conn.db();

    let err = db.list_tables().await.unwrap_err();
    assert!(err.is_mode_mismatch());
    assert_eq!(
        err.to_string(),
        "`listTables` is not available in collections mode"
    );

    assert!(db.drop_table("profiles").await.unwrap_err().is_mode_mismatch());
    assert!(db
        .sync_table(profile_schema())
        .await
        .unwrap_err()
        .is_mode_mismatch());

    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn tables_db_rejects_collection_operations() {
    let (conn, driver) = connect(tables()).await;
    let db = conn.db();
    assert_eq!(db.mode(), Mode::Tables);

    let err = db.create_collection("cats", None).await.unwrap_err();
    assert!(err.is_mode_mismatch());
    assert_eq!(
        err.to_string(),
        "`createCollection` is not available in tables mode"
    );

    assert!(db.list_collections().await.unwrap_err().is_mode_mismatch());
    assert!(db.drop_collection("cats").await.unwrap_err().is_mode_mismatch());
    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn sync_table_creates_types_before_the_table() {
    let (conn, driver) = connect(tables()).await;

    let profiles = conn.db().sync_table(profile_schema()).await.unwrap();
    assert_eq!(profiles.name(), "profiles");
    assert!(profiles.schema().is_some());

    let mut log = driver.log();
    assert_eq!(log.names(), vec!["createType", "createTable"]);

    let Operation::CreateType(create_type) = log.pop_op() else {
        panic!("expected createType");
    };
    assert_eq!(create_type.definition.name, "address_udt");
    assert!(create_type.if_not_exists);
    assert_eq!(
        create_type.definition.fields.get("zip"),
        Some(&ScalarType::Int)
    );

    let Operation::CreateTable(create_table) = log.pop_op() else {
        panic!("expected createTable");
    };
    assert_eq!(create_table.name, "profiles");
    assert_eq!(create_table.definition.primary_key, "_id");
    assert_eq!(
        create_table.definition.column("name"),
        Some(&Column::Scalar(ScalarType::Text))
    );
    assert_eq!(
        create_table.definition.column("address"),
        Some(&Column::Udt("address_udt".to_string()))
    );
}

#[tokio::test]
async fn sync_table_reports_compile_errors() {
    let (conn, driver) = connect(tables()).await;

    let schema = Schema::builder("bad")
        .field("tags", Field::set(Element::new(Primitive::Text)))
        .build()
        .unwrap();

    let err = conn.db().sync_table(Arc::new(schema)).await.unwrap_err();
    assert!(err.is_schema_compile());
    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn table_indexes() {
    let (conn, driver) = connect(tables()).await;
    let profiles = conn.collection("profiles");

    profiles.create_index("by_name", "name", None).await.unwrap();

    driver.respond(Ok(Response::Names(vec!["by_name".to_string()])));
    assert_eq!(profiles.list_indexes().await.unwrap(), vec!["by_name".to_string()]);

    let Operation::CreateIndex(op) = driver.log().pop_op() else {
        panic!("expected createIndex");
    };
    assert_eq!(op.target.name, "profiles");
    assert_eq!(op.column, "name");
}

#[tokio::test]
async fn keyspace_command() {
    let (conn, driver) = connect(ConnectOptions::new()).await;

    let body = conn
        .db()
        .run_command(doc! { "findCollections" => doc! {} })
        .await
        .unwrap();
    assert_eq!(body["status"]["ok"], 1);

    let Operation::Command(op) = driver.log().pop_op() else {
        panic!("expected command");
    };
    assert_eq!(op.keyspace, "app");
    assert_eq!(op.collection, None);
}
