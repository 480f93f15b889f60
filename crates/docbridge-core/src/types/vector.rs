use crate::{stmt::Value, Error, Result};

use indexmap::IndexMap;
use serde::Serialize;

/// A fixed-dimension vector field whose value the remote API can generate
/// from text with an embedding service.
///
/// Assigning a string defers embedding to the server; assigning numbers
/// stores them directly after a dimension check.
#[derive(Debug, Clone, PartialEq)]
pub struct Vectorize {
    dimension: usize,
    service: VectorizeService,
}

/// Embedding service descriptor, serialized as the `service` entry of a
/// vector column definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorizeService {
    pub provider: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub authentication: IndexMap<String, String>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, serde_json::Value>,
}

impl Vectorize {
    /// Fails with an invalid option error when the dimension is zero or the
    /// provider is empty.
    pub fn new(dimension: usize, service: VectorizeService) -> Result<Vectorize> {
        if dimension == 0 {
            return Err(Error::invalid_option(
                "dimension",
                "vectorize fields need a positive integer dimension",
            ));
        }

        if service.provider.trim().is_empty() {
            return Err(Error::invalid_option(
                "service.provider",
                "vectorize fields need an embedding provider",
            ));
        }

        Ok(Vectorize { dimension, service })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn service(&self) -> &VectorizeService {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut VectorizeService {
        &mut self.service
    }

    /// Casts an assigned value.
    ///
    /// `init` is true while hydrating a document loaded from the remote API.
    /// Outside of that, a string is kept verbatim for server-side embedding.
    pub fn cast(&self, path: &str, value: Value, init: bool) -> Result<Value> {
        match value {
            Value::String(text) if !init => Ok(Value::String(text)),
            value => cast_vector(path, Some(self.dimension), value),
        }
    }
}

impl VectorizeService {
    pub fn new(provider: impl Into<String>) -> VectorizeService {
        VectorizeService {
            provider: provider.into(),
            model_name: None,
            authentication: IndexMap::new(),
            parameters: IndexMap::new(),
        }
    }

    pub fn model_name(mut self, model_name: impl Into<String>) -> VectorizeService {
        self.model_name = Some(model_name.into());
        self
    }

    pub fn authentication(mut self, key: impl Into<String>, value: impl Into<String>) -> VectorizeService {
        self.authentication.insert(key.into(), value.into());
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> VectorizeService {
        self.parameters.insert(key.into(), value);
        self
    }
}

/// Casts a value to a numeric vector, checking its length against
/// `dimension` when one is declared. `Null` stays `Null`.
pub fn cast_vector(path: &str, dimension: Option<usize>, value: Value) -> Result<Value> {
    let items = match value {
        Value::Null => return Ok(Value::Null),
        Value::Vector(items) => items,
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item.as_f64() {
                Some(v) => Ok(v as f32),
                None => Err(Error::type_conversion(item, "vector element")),
            })
            .collect::<Result<Vec<_>>>()?,
        other => return Err(Error::type_conversion(other, "vector")),
    };

    if let Some(dimension) = dimension {
        if items.len() != dimension {
            return Err(Error::validation_dimension(path, dimension, items.len()));
        }
    }

    Ok(Value::Vector(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorize() -> Vectorize {
        Vectorize::new(
            2,
            VectorizeService::new("openai").model_name("text-embedding-3-small"),
        )
        .unwrap()
    }

    #[test]
    fn zero_dimension_is_a_config_error() {
        let err = Vectorize::new(0, VectorizeService::new("openai")).unwrap_err();
        assert!(err.is_invalid_option());
    }

    #[test]
    fn empty_provider_is_a_config_error() {
        let err = Vectorize::new(3, VectorizeService::new("")).unwrap_err();
        assert!(err.is_invalid_option());
        assert!(err.to_string().contains("service.provider"));
    }

    #[test]
    fn string_passes_through_outside_init() {
        let value = vectorize().cast("v", Value::from("hello"), false).unwrap();
        assert_eq!(value, Value::from("hello"));
    }

    #[test]
    fn string_is_rejected_on_init() {
        assert!(vectorize().cast("v", Value::from("hello"), true).is_err());
    }

    #[test]
    fn array_is_dimension_checked() {
        let ok = vectorize()
            .cast("v", Value::from(vec![1i64, 2i64]), false)
            .unwrap();
        assert_eq!(ok, Value::Vector(vec![1.0, 2.0]));

        let err = vectorize()
            .cast("v", Value::from(vec![1i64, 2i64, 3i64]), false)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn clone_does_not_alias_service() {
        let original = vectorize();
        let mut cloned = original.clone();
        cloned.service_mut().provider = "nvidia".to_string();

        assert_eq!(original.service().provider, "openai");
    }
}
