use super::{Body, Expect, Request, Route};

use docbridge_core::{
    driver::operation::{
        CountDocuments, DeleteMany, DeleteOne, EstimatedDocumentCount, Find, FindOne,
        FindOneAndDelete, FindOneAndReplace, FindOneAndUpdate, InsertMany, InsertOne, ReplaceOne,
        UpdateMany, UpdateOne,
    },
    wire::{WireDocument, WireValue},
};

fn data(name: &'static str, route: Route, body: Body, expect: Expect) -> Request {
    Request {
        name,
        route,
        body: body.finish(name),
        timeout: None,
        expect,
    }
}

pub(super) fn find(name: &'static str, op: Find) -> Request {
    let body = Body::new()
        .field("filter", op.filter)
        .field_opt("sort", op.sort)
        .field_opt("projection", op.projection)
        .option_opt("limit", op.limit)
        .option_opt("skip", op.skip)
        .flag("includeSimilarity", op.include_similarity)
        .flag("includeSortVector", op.include_sort_vector)
        .option_opt("pageState", op.page_state);

    data(name, Route::target(&op.target), body, Expect::Documents)
}

pub(super) fn find_one(name: &'static str, op: FindOne) -> Request {
    let body = Body::new()
        .field("filter", op.filter)
        .field_opt("sort", op.sort)
        .field_opt("projection", op.projection)
        .flag("includeSimilarity", op.include_similarity);

    data(name, Route::target(&op.target), body, Expect::Document)
}

pub(super) fn insert_one(name: &'static str, op: InsertOne) -> Request {
    let body = Body::new().field("document", op.document);
    data(name, Route::target(&op.target), body, Expect::Inserted)
}

pub(super) fn insert_many(name: &'static str, op: InsertMany) -> Request {
    let documents = op
        .documents
        .into_iter()
        .map(WireValue::Object)
        .collect::<Vec<_>>();

    let body = Body::new()
        .field("documents", documents)
        .option("ordered", op.ordered);

    data(name, Route::target(&op.target), body, Expect::Inserted)
}

pub(super) fn update_one(name: &'static str, op: UpdateOne) -> Request {
    let body = Body::new()
        .field("filter", op.filter)
        .field("update", op.update)
        .field_opt("sort", op.sort)
        .flag("upsert", op.upsert);

    data(name, Route::target(&op.target), body, Expect::Updated)
}

pub(super) fn update_many(name: &'static str, op: UpdateMany) -> Request {
    let body = Body::new()
        .field("filter", op.filter)
        .field("update", op.update)
        .flag("upsert", op.upsert);

    data(name, Route::target(&op.target), body, Expect::Updated)
}

/// There is no `replaceOne` command; the replacement goes through
/// `findOneAndReplace` with a minimal projection and only the counts are
/// read back.
pub(super) fn replace_one(name: &'static str, op: ReplaceOne) -> Request {
    let mut projection = WireDocument::new();
    projection.insert("_id".to_string(), WireValue::from(1));

    let body = Body::new()
        .field("filter", op.filter)
        .field("replacement", op.replacement)
        .field_opt("sort", op.sort)
        .field("projection", projection)
        .flag("upsert", op.upsert);

    data(name, Route::target(&op.target), body, Expect::Updated)
}

pub(super) fn delete_one(name: &'static str, op: DeleteOne) -> Request {
    let body = Body::new()
        .field("filter", op.filter)
        .field_opt("sort", op.sort);

    data(name, Route::target(&op.target), body, Expect::Deleted)
}

pub(super) fn delete_many(name: &'static str, op: DeleteMany) -> Request {
    let body = Body::new().field("filter", op.filter);
    data(name, Route::target(&op.target), body, Expect::Deleted)
}

pub(super) fn find_one_and_update(name: &'static str, op: FindOneAndUpdate) -> Request {
    let body = Body::new()
        .field("filter", op.filter)
        .field("update", op.update)
        .field_opt("sort", op.sort)
        .field_opt("projection", op.projection)
        .flag("upsert", op.upsert)
        .option("returnDocument", op.return_document.as_str());

    data(name, Route::target(&op.target), body, Expect::Document)
}

pub(super) fn find_one_and_replace(name: &'static str, op: FindOneAndReplace) -> Request {
    let body = Body::new()
        .field("filter", op.filter)
        .field("replacement", op.replacement)
        .field_opt("sort", op.sort)
        .field_opt("projection", op.projection)
        .flag("upsert", op.upsert)
        .option("returnDocument", op.return_document.as_str());

    data(name, Route::target(&op.target), body, Expect::Document)
}

pub(super) fn find_one_and_delete(name: &'static str, op: FindOneAndDelete) -> Request {
    let body = Body::new()
        .field("filter", op.filter)
        .field_opt("sort", op.sort)
        .field_opt("projection", op.projection);

    data(name, Route::target(&op.target), body, Expect::Document)
}

pub(super) fn count_documents(name: &'static str, op: CountDocuments) -> Request {
    let body = Body::new().field("filter", op.filter);
    let expect = Expect::Count {
        upper_bound: Some(op.upper_bound),
    };

    data(name, Route::target(&op.target), body, expect)
}

pub(super) fn estimated_document_count(name: &'static str, op: EstimatedDocumentCount) -> Request {
    let expect = Expect::Count { upper_bound: None };
    data(name, Route::target(&op.target), Body::new(), expect)
}
