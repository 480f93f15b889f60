use crate::op::Expect;

use docbridge_core::{
    driver::{Documents, Response, UpdateResult},
    wire::{WireDocument, WireValue},
    Error, Result,
};

/// Reads a successful response body according to what the command returns.
pub(crate) fn map(body: WireValue, expect: Expect) -> Result<Response> {
    if expect == Expect::Raw {
        return Ok(Response::Raw(body));
    }

    let WireValue::Object(mut body) = body else {
        return Err(Error::invalid_result(format!(
            "expected a JSON object, got `{body}`"
        )));
    };

    let mut data = take_object(&mut body, "data");
    let mut status = take_object(&mut body, "status");

    Ok(match expect {
        Expect::Documents => {
            let documents = match data.remove("documents") {
                Some(WireValue::Array(documents)) => documents
                    .into_iter()
                    .map(object)
                    .collect::<Result<Vec<_>>>()?,
                Some(WireValue::Null) | None => vec![],
                Some(other) => return Err(unexpected("data.documents", &other)),
            };

            let next_page_state = match data.remove("nextPageState") {
                Some(WireValue::String(state)) => Some(state),
                _ => None,
            };

            Response::Documents(Documents {
                documents,
                next_page_state,
                sort_vector: status.get("sortVector").and_then(sort_vector),
            })
        }
        Expect::Document => match data.remove("document") {
            Some(WireValue::Null) | None => Response::Document(None),
            Some(document) => Response::Document(Some(object(document)?)),
        },
        Expect::Inserted => match status.remove("insertedIds") {
            Some(WireValue::Array(ids)) => Response::Inserted(ids),
            Some(other) => return Err(unexpected("status.insertedIds", &other)),
            None => Response::Inserted(vec![]),
        },
        Expect::Updated => Response::Updated(UpdateResult {
            matched: count(&status, "matchedCount")?.unwrap_or(0),
            modified: count(&status, "modifiedCount")?.unwrap_or(0),
            upserted_id: status.remove("upsertedId"),
        }),
        Expect::Deleted => {
            // A negative count means the remote deleted an unknown number
            let deleted = match status.get("deletedCount") {
                Some(WireValue::Number(n)) => n.as_u64(),
                _ => None,
            };
            Response::Deleted(deleted)
        }
        Expect::Count { upper_bound } => {
            let count = count(&status, "count")?.unwrap_or(0);
            let more_data = matches!(status.get("moreData"), Some(WireValue::Bool(true)));
            let more = more_data || upper_bound.is_some_and(|bound| count > bound);
            Response::Count { count, more }
        }
        Expect::Names(key) => match status.remove(key) {
            Some(WireValue::Array(names)) => Response::Names(
                names
                    .into_iter()
                    .map(|name| match name {
                        WireValue::String(name) => Ok(name),
                        // Listings with explain return objects carrying `name`
                        WireValue::Object(mut obj) => match obj.remove("name") {
                            Some(WireValue::String(name)) => Ok(name),
                            _ => Err(unexpected(key, &WireValue::Object(obj))),
                        },
                        other => Err(unexpected(key, &other)),
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            Some(other) => return Err(unexpected(key, &other)),
            None => Response::Names(vec![]),
        },
        Expect::Raw | Expect::Ok => Response::Ok,
    })
}

fn take_object(body: &mut WireDocument, key: &str) -> WireDocument {
    match body.remove(key) {
        Some(WireValue::Object(object)) => object,
        _ => WireDocument::new(),
    }
}

fn object(value: WireValue) -> Result<WireDocument> {
    match value {
        WireValue::Object(object) => Ok(object),
        other => Err(unexpected("document", &other)),
    }
}

fn count(status: &WireDocument, key: &str) -> Result<Option<u64>> {
    match status.get(key) {
        None | Some(WireValue::Null) => Ok(None),
        Some(WireValue::Number(n)) => match n.as_u64() {
            Some(n) => Ok(Some(n)),
            None => Err(unexpected(key, &WireValue::Number(n.clone()))),
        },
        Some(other) => Err(unexpected(key, other)),
    }
}

fn sort_vector(value: &WireValue) -> Option<Vec<f32>> {
    let WireValue::Array(items) = value else {
        tracing::trace!("ignoring sort vector that is not a plain array");
        return None;
    };

    items
        .iter()
        .map(|item| item.as_f64().map(|n| n as f32))
        .collect()
}

fn unexpected(what: &str, value: &WireValue) -> Error {
    Error::invalid_result(format!("unexpected `{what}` in response: {value}"))
}
