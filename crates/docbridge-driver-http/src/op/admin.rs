use super::{Body, Expect, Request, Route};

use docbridge_core::{
    driver::operation::{Command, CreateKeyspace},
    wire::WireValue,
};

pub(super) fn create_keyspace(name: &'static str, op: CreateKeyspace) -> Request {
    Request {
        name,
        route: Route::Api,
        body: Body::new().field("name", op.name).finish(name),
        timeout: op.timeout,
        expect: Expect::Ok,
    }
}

pub(super) fn list_keyspaces(name: &'static str) -> Request {
    Request {
        name,
        route: Route::Api,
        body: Body::new().finish(name),
        timeout: None,
        expect: Expect::Names("keyspaces"),
    }
}

pub(super) fn command(op: Command) -> Request {
    let route = match op.collection {
        Some(name) => Route::Collection {
            keyspace: op.keyspace,
            name,
        },
        None => Route::Keyspace(op.keyspace),
    };

    Request {
        name: "command",
        route,
        body: WireValue::Object(op.body),
        timeout: None,
        expect: Expect::Raw,
    }
}
