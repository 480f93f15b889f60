mod exec_log;
pub use exec_log::ExecLog;

mod mock_driver;
pub use mock_driver::{DriverOp, Gate, MockDriver};

use docbridge::{ConnectOptions, Connection, State};

use std::sync::Once;

/// Connection string used by every test. The keyspace is `app`.
pub const URL: &str = "https://db.example.com/api/json/v1/app?applicationToken=AstraCS:secret";

/// Installs a test subscriber once, filtered by `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Opens a connection over a fresh mock driver.
pub async fn connect(options: ConnectOptions) -> (Connection, MockDriver) {
    init_tracing();

    let driver = MockDriver::new();
    let conn = Connection::with_options(driver.clone(), options);
    conn.open(URL).await.unwrap();
    (conn, driver)
}

/// Lets spawned tasks run until they block.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Waits until `conn` reaches `state`.
pub async fn wait_for(conn: &Connection, state: State) {
    while conn.state() != state {
        tokio::task::yield_now().await;
    }
}
