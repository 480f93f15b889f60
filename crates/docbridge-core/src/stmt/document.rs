use super::{Value, ID_FIELD};

use indexmap::IndexMap;

/// An ordered document, as the mapping layer sees it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Document {
    fields: IndexMap<String, Value>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Looks up a dotted path, descending through nested documents and maps.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;

        for segment in segments {
            current = match current {
                Value::Document(doc) => doc.get(segment)?,
                Value::Map(map) => map.get(segment)?,
                _ => return None,
            };
        }

        Some(current)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.fields.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the document identifier, if set.
    pub fn id(&self) -> Option<&Value> {
        self.get(ID_FIELD).filter(|id| !id.is_null())
    }

    /// Returns the named entry as a document, inserting an empty one when
    /// the key is absent.
    pub fn entry_document(&mut self, key: &str) -> Option<&mut Document> {
        match self
            .fields
            .entry(key.to_string())
            .or_insert_with(|| Value::Document(Document::new()))
        {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.fields
    }
}

impl From<IndexMap<String, Value>> for Document {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Document { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Document {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Builds a [`Document`] from `key => value` pairs.
#[macro_export]
macro_rules! doc {
    () => {
        $crate::stmt::Document::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut doc = $crate::stmt::Document::new();
        $( doc.insert($key, $value); )+
        doc
    }};
}
