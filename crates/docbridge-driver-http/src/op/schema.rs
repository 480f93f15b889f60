use super::{Body, Expect, Request, Route};

use docbridge_core::driver::operation::{
    CreateCollection, CreateIndex, CreateTable, CreateType, DropCollection, DropTable,
    ListCollections, ListIndexes, ListTables,
};

fn ddl(name: &'static str, keyspace: String, body: Body, expect: Expect) -> Request {
    Request {
        name,
        route: Route::Keyspace(keyspace),
        body: body.finish(name),
        timeout: None,
        expect,
    }
}

pub(super) fn create_collection(name: &'static str, op: CreateCollection) -> Request {
    let body = Body::new()
        .field("name", op.name)
        .field_opt("options", op.options);

    ddl(name, op.keyspace, body, Expect::Ok)
}

pub(super) fn drop_collection(name: &'static str, op: DropCollection) -> Request {
    let body = Body::new().field("name", op.name);
    ddl(name, op.keyspace, body, Expect::Ok)
}

pub(super) fn list_collections(name: &'static str, op: ListCollections) -> Request {
    ddl(name, op.keyspace, Body::new(), Expect::Names("collections"))
}

pub(super) fn create_table(name: &'static str, op: CreateTable) -> Request {
    let body = Body::new()
        .field("name", op.name)
        .field("definition", op.definition.to_wire())
        .flag("ifNotExists", op.if_not_exists);

    ddl(name, op.keyspace, body, Expect::Ok)
}

pub(super) fn drop_table(name: &'static str, op: DropTable) -> Request {
    let body = Body::new().field("name", op.name);
    ddl(name, op.keyspace, body, Expect::Ok)
}

pub(super) fn list_tables(name: &'static str, op: ListTables) -> Request {
    ddl(name, op.keyspace, Body::new(), Expect::Names("tables"))
}

pub(super) fn create_type(name: &'static str, op: CreateType) -> Request {
    let body = Body::new()
        .field("name", op.definition.name.clone())
        .field("definition", op.definition.to_wire())
        .flag("ifNotExists", op.if_not_exists);

    ddl(name, op.keyspace, body, Expect::Ok)
}

pub(super) fn create_index(name: &'static str, op: CreateIndex) -> Request {
    let definition = Body::new()
        .field("column", op.column)
        .field_opt("options", op.options)
        .fields;

    let body = Body::new()
        .field("name", op.name)
        .field("definition", definition);

    Request {
        name,
        route: Route::target(&op.target),
        body: body.finish(name),
        timeout: None,
        expect: Expect::Ok,
    }
}

pub(super) fn list_indexes(name: &'static str, op: ListIndexes) -> Request {
    Request {
        name,
        route: Route::target(&op.target),
        body: Body::new().finish(name),
        timeout: None,
        expect: Expect::Names("indexes"),
    }
}
