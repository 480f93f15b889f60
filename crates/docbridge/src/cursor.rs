use crate::Connection;

use docbridge_core::{
    driver::operation::Find,
    stmt::Document,
    wire::{Deserializer, WireDocument, WireValue},
    Error,
};

use std::{collections::VecDeque, sync::Arc};
use tokio_stream::Stream;

/// Lazily paged query results.
///
/// No request is sent until the first call to [`next`](Cursor::next). Each
/// following page is fetched when the previous one is used up.
#[derive(Debug)]
pub struct Cursor {
    conn: Connection,
    op: Find,
    deserializer: Arc<Deserializer>,
    page: VecDeque<WireDocument>,
    state: Paging,
    sort_vector: Option<Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq)]
enum Paging {
    /// No page fetched yet
    Start,

    /// Another page can be fetched with this state
    More(String),

    Exhausted,
}

pub trait FromCursor<A>: Extend<A> + Default {}

impl<A, T: Extend<A> + Default> FromCursor<A> for T {}

impl Cursor {
    pub(crate) fn new(conn: Connection, op: Find, deserializer: Arc<Deserializer>) -> Cursor {
        Cursor {
            conn,
            op,
            deserializer,
            page: VecDeque::new(),
            state: Paging::Start,
            sort_vector: None,
        }
    }

    pub async fn next(&mut self) -> Option<Result<Document, Error>> {
        loop {
            if let Some(document) = self.page.pop_front() {
                return Some(
                    self.deserializer
                        .deserialize_document(WireValue::Object(document)),
                );
            }

            let page_state = match &self.state {
                Paging::Exhausted => return None,
                Paging::Start => None,
                Paging::More(page_state) => Some(page_state.clone()),
            };

            if let Err(err) = self.fetch(page_state).await {
                self.state = Paging::Exhausted;
                return Some(Err(err));
            }
        }
    }

    /// Collect all values
    pub async fn collect<B>(mut self) -> Result<B, Error>
    where
        B: FromCursor<Document>,
    {
        let mut ret = B::default();

        while let Some(res) = self.next().await {
            ret.extend(Some(res?));
        }

        Ok(ret)
    }

    /// The vector the remote sorted by. Fetches the first page if needed;
    /// `None` unless the query asked for it with `include_sort_vector`.
    pub async fn sort_vector(&mut self) -> Result<Option<&[f32]>, Error> {
        if self.state == Paging::Start {
            self.fetch(None).await?;
        }

        Ok(self.sort_vector.as_deref())
    }

    pub fn into_stream(mut self) -> impl Stream<Item = Result<Document, Error>> {
        async_stream::stream! {
            while let Some(res) = self.next().await {
                yield res;
            }
        }
    }

    async fn fetch(&mut self, page_state: Option<String>) -> Result<(), Error> {
        let mut op = self.op.clone();
        op.page_state = page_state;

        let page = self.conn.exec(op.into()).await?.into_documents()?;

        tracing::trace!(
            collection = %self.op.target.name,
            documents = page.documents.len(),
            more = page.next_page_state.is_some(),
            "fetched page"
        );

        if page.sort_vector.is_some() {
            self.sort_vector = page.sort_vector;
        }

        self.page.extend(page.documents);
        self.state = match page.next_page_state {
            Some(next) => Paging::More(next),
            None => Paging::Exhausted,
        };

        Ok(())
    }
}
