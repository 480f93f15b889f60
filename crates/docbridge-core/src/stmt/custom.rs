use super::Value;

use std::{fmt, sync::Arc};

/// A value type that knows how to convert itself into its stored form.
///
/// The serializer runs this hook before any other rule, so custom
/// subdocument types can choose their own representation.
pub trait ToWire: fmt::Debug + Send + Sync + 'static {
    fn to_wire(&self) -> Value;
}

/// A [`Value`] carrying a [`ToWire`] hook.
#[derive(Clone)]
pub struct CustomValue(Arc<dyn ToWire>);

impl CustomValue {
    pub fn new(value: impl ToWire) -> CustomValue {
        CustomValue(Arc::new(value))
    }

    pub fn to_wire(&self) -> Value {
        self.0.to_wire()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &CustomValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.to_wire() == other.to_wire()
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
