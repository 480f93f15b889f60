use docbridge::{doc, driver::Operation, err, ConnectOptions, Connection, Mode, State};
use docbridge_core::driver::Capability;
use pretty_assertions::assert_eq;
use std::time::Duration;
use tests::{connect, init_tracing, settle, wait_for, MockDriver, URL};

fn inserted_id(op: &Operation) -> serde_json::Value {
    match op {
        Operation::InsertOne(insert) => insert.document["_id"].clone(),
        other => panic!("expected insertOne, got {}", other.name()),
    }
}

#[tokio::test]
async fn open_transitions_to_connected() {
    let (conn, driver) = connect(ConnectOptions::new()).await;

    assert_eq!(conn.state(), State::Connected);
    assert_eq!(conn.keyspace().unwrap(), "app");
    assert_eq!(driver.connects(), 1);

    let url = driver.last_url().unwrap();
    assert_eq!(url.application_token.as_deref(), Some("AstraCS:secret"));
    assert_eq!(url.api_path, "api/json/v1");
}

#[tokio::test]
async fn buffered_commands_run_in_order_once_connected() {
    init_tracing();

    let driver = MockDriver::new();
    let gate = driver.gate();
    let conn = Connection::new(driver.clone());

    let open = tokio::spawn({
        let conn = conn.clone();
        async move { conn.open(URL).await }
    });
    wait_for(&conn, State::Connecting).await;

    let cats = conn.collection("cats");
    let first = tokio::spawn({
        let cats = cats.clone();
        async move { cats.insert_one(doc! { "_id" => "a" }).await }
    });
    settle().await;

    let second = tokio::spawn({
        let cats = cats.clone();
        async move { cats.insert_one(doc! { "_id" => "b" }).await }
    });
    settle().await;

    // Nothing reaches the driver while connecting
    assert!(driver.log().is_empty());

    gate.open();
    open.await.unwrap().unwrap();

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();
    assert_eq!(first.inserted_id.as_str(), Some("a"));
    assert_eq!(second.inserted_id.as_str(), Some("b"));

    let mut log = driver.log();
    assert_eq!(log.len(), 2);
    assert!(log.has_insert());
    assert_eq!(inserted_id(&log.pop_op()), "a");
    assert_eq!(inserted_id(&log.pop_op()), "b");
}

#[tokio::test]
async fn commands_fail_while_connecting_without_buffering() {
    init_tracing();

    let driver = MockDriver::new();
    let gate = driver.gate();
    let conn = Connection::with_options(driver.clone(), ConnectOptions::new().buffer_commands(false));

    let open = tokio::spawn({
        let conn = conn.clone();
        async move { conn.open(URL).await }
    });
    wait_for(&conn, State::Connecting).await;

    let err = conn
        .collection("cats")
        .insert_one(doc! { "_id" => "a" })
        .await
        .unwrap_err();
    assert!(err.is_not_connected());
    assert_eq!(err.to_string(), "not connected (connection is connecting)");

    gate.open();
    open.await.unwrap().unwrap();
    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn commands_fail_before_open() {
    let conn = Connection::new(MockDriver::new());

    let err = conn
        .collection("cats")
        .find_one(doc! {}, Default::default())
        .await
        .unwrap_err();
    assert!(err.is_not_connected());
}

#[tokio::test]
async fn failed_connect_rejects_buffered_commands() {
    init_tracing();

    let driver = MockDriver::new();
    let gate = driver.gate();
    driver.fail_connect(err!("connection refused"));
    let conn = Connection::new(driver.clone());

    let open = tokio::spawn({
        let conn = conn.clone();
        async move { conn.open(URL).await }
    });
    wait_for(&conn, State::Connecting).await;

    let queued = tokio::spawn({
        let cats = conn.collection("cats");
        async move { cats.insert_one(doc! { "_id" => "a" }).await }
    });
    settle().await;

    gate.open();

    let open_err = open.await.unwrap().unwrap_err();
    let queued_err = queued.await.unwrap().unwrap_err();
    assert_eq!(open_err.to_string(), "connection refused");
    assert_eq!(queued_err.to_string(), "connection refused");

    assert_eq!(conn.state(), State::Disconnected);
    assert!(conn.ready().await.unwrap_err().is_not_connected());
    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn abandoned_open_still_connects() {
    init_tracing();

    let driver = MockDriver::new();
    let gate = driver.gate();
    let conn = Connection::new(driver.clone());

    let abandoned = tokio::time::timeout(Duration::from_millis(20), conn.open(URL)).await;
    assert!(abandoned.is_err());
    assert_eq!(conn.state(), State::Connecting);

    let queued = tokio::spawn({
        let cats = conn.collection("cats");
        async move { cats.insert_one(doc! { "_id" => "a" }).await }
    });
    settle().await;

    gate.open();
    conn.ready().await.unwrap();

    let inserted = queued.await.unwrap().unwrap();
    assert_eq!(inserted.inserted_id.as_str(), Some("a"));

    conn.collection("cats")
        .insert_one(doc! { "_id" => "b" })
        .await
        .unwrap();
    assert_eq!(driver.log().len(), 2);

    conn.close().await.unwrap();
    assert_eq!(driver.closes(), 1);
}

#[tokio::test]
async fn abandoned_open_still_rejects_buffered_commands() {
    init_tracing();

    let driver = MockDriver::new();
    let gate = driver.gate();
    driver.fail_connect(err!("connection refused"));
    let conn = Connection::new(driver.clone());

    let abandoned = tokio::time::timeout(Duration::from_millis(20), conn.open(URL)).await;
    assert!(abandoned.is_err());

    let queued = tokio::spawn({
        let cats = conn.collection("cats");
        async move { cats.insert_one(doc! { "_id" => "a" }).await }
    });
    settle().await;

    gate.open();

    let err = queued.await.unwrap().unwrap_err();
    assert_eq!(err.to_string(), "connection refused");
    assert_eq!(conn.state(), State::Disconnected);
    assert!(conn.ready().await.unwrap_err().is_not_connected());

    // The connection is settled, so opening again is a fresh attempt
    let err = conn.open(URL).await.unwrap_err();
    assert!(!err.is_invalid_state_transition());
    assert_eq!(err.to_string(), "connection refused");
    assert_eq!(driver.connects(), 2);
}

#[tokio::test]
async fn close_during_drain_rejects_remaining_commands() {
    init_tracing();

    let driver = MockDriver::new();
    let gate = driver.gate();
    let conn = Connection::new(driver.clone());

    let open = tokio::spawn({
        let conn = conn.clone();
        async move { conn.open(URL).await }
    });
    wait_for(&conn, State::Connecting).await;

    let cats = conn.collection("cats");
    let first = tokio::spawn({
        let cats = cats.clone();
        async move { cats.insert_one(doc! { "_id" => "a" }).await }
    });
    settle().await;

    let second = tokio::spawn({
        let cats = cats.clone();
        async move { cats.insert_one(doc! { "_id" => "b" }).await }
    });
    settle().await;

    // The first released command blocks inside the driver
    let hold = driver.hold_exec();
    gate.open();
    settle().await;
    assert_eq!(conn.state(), State::Connected);

    conn.close().await.unwrap();
    hold.open();

    first.await.unwrap().unwrap();
    let err = second.await.unwrap().unwrap_err();
    assert!(err.is_not_connected());
    open.await.unwrap().unwrap();

    let mut log = driver.log();
    assert_eq!(log.len(), 1);
    assert_eq!(inserted_id(&log.pop_op()), "a");
    assert_eq!(driver.closes(), 1);
}

#[tokio::test]
async fn ready_waits_for_open() {
    init_tracing();

    let driver = MockDriver::new();
    let gate = driver.gate();
    let conn = Connection::new(driver.clone());

    let open = tokio::spawn({
        let conn = conn.clone();
        async move { conn.open(URL).await }
    });
    wait_for(&conn, State::Connecting).await;

    let ready = tokio::spawn({
        let conn = conn.clone();
        async move { conn.ready().await }
    });
    settle().await;
    assert!(!ready.is_finished());

    gate.open();
    ready.await.unwrap().unwrap();
    open.await.unwrap().unwrap();
}

#[tokio::test]
async fn concurrent_close_closes_client_once() {
    let (conn, driver) = connect(ConnectOptions::new()).await;

    let (a, b, c) = tokio::join!(conn.close(), conn.close(), conn.close());
    a.unwrap();
    b.unwrap();
    c.unwrap();

    assert_eq!(driver.closes(), 1);
    assert_eq!(conn.state(), State::Disconnected);

    // Closing again is a no-op
    conn.close().await.unwrap();
    assert_eq!(driver.closes(), 1);
}

#[tokio::test]
async fn close_while_connecting_waits_for_open() {
    init_tracing();

    let driver = MockDriver::new();
    let gate = driver.gate();
    let conn = Connection::new(driver.clone());

    let open = tokio::spawn({
        let conn = conn.clone();
        async move { conn.open(URL).await }
    });
    wait_for(&conn, State::Connecting).await;

    let close = tokio::spawn({
        let conn = conn.clone();
        async move { conn.close().await }
    });
    settle().await;

    gate.open();
    open.await.unwrap().unwrap();
    close.await.unwrap().unwrap();

    assert_eq!(driver.closes(), 1);
    assert_eq!(conn.state(), State::Disconnected);
}

#[tokio::test]
async fn open_twice_is_an_illegal_transition() {
    let (conn, _driver) = connect(ConnectOptions::new()).await;

    let err = conn.open(URL).await.unwrap_err();
    assert!(err.is_invalid_state_transition());
    assert_eq!(conn.state(), State::Connected);
}

#[tokio::test]
async fn reopen_after_close() {
    let (conn, driver) = connect(ConnectOptions::new()).await;

    conn.close().await.unwrap();
    conn.open(URL).await.unwrap();

    assert_eq!(conn.state(), State::Connected);
    assert_eq!(driver.connects(), 2);
}

#[tokio::test]
async fn invalid_connection_string() {
    let conn = Connection::new(MockDriver::new());

    let err = conn
        .open("https://db.example.com/app?applicationToken=a&applicationToken=b")
        .await
        .unwrap_err();
    assert!(err.is_invalid_connection_url());
    assert_eq!(
        err.to_string(),
        "invalid connection URL: multiple application tokens"
    );

    assert_eq!(conn.state(), State::Disconnected);
}

#[tokio::test]
async fn options_fill_in_token_and_header() {
    init_tracing();

    let driver = MockDriver::new();
    let conn = Connection::with_options(
        driver.clone(),
        ConnectOptions::new()
            .application_token("from-options")
            .auth_header_name("X-Cassandra-Token"),
    );

    conn.open("http://localhost:8181/v1/app").await.unwrap();

    let url = driver.last_url().unwrap();
    assert_eq!(url.application_token.as_deref(), Some("from-options"));
    assert_eq!(url.auth_header_name(), "X-Cassandra-Token");
}

#[tokio::test]
async fn token_in_url_wins_over_options() {
    init_tracing();

    let driver = MockDriver::new();
    let conn = Connection::with_options(
        driver.clone(),
        ConnectOptions::new().application_token("from-options"),
    );

    conn.open(URL).await.unwrap();
    assert_eq!(
        driver.last_url().unwrap().application_token.as_deref(),
        Some("AstraCS:secret")
    );
}

#[tokio::test]
async fn create_keyspace_on_open() {
    let (_conn, driver) = connect(
        ConnectOptions::new()
            .create_keyspace(true)
            .admin_timeout(Duration::from_secs(90)),
    )
    .await;

    let mut log = driver.log();
    match log.pop_op() {
        Operation::CreateKeyspace(op) => {
            assert_eq!(op.name, "app");
            assert_eq!(op.timeout, Some(Duration::from_secs(90)));
        }
        other => panic!("expected createKeyspace, got {}", other.name()),
    }
}

#[tokio::test]
async fn tables_mode_requires_table_support() {
    init_tracing();

    let driver = MockDriver::with_capability(Capability::DATA_API_COLLECTIONS_ONLY);
    let conn = Connection::with_options(driver.clone(), ConnectOptions::new().mode(Mode::Tables));

    let err = conn.open(URL).await.unwrap_err();
    assert!(err.is_invalid_option());
    assert_eq!(conn.state(), State::Disconnected);
    assert_eq!(driver.connects(), 0);
}
