use crate::{stmt::Value, Result};

/// Value-level checks attached to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Array or vector length must equal the dimension. `Null` passes.
    Dimension(usize),
}

impl Constraint {
    pub fn check(&self, path: &str, value: &Value) -> Result<()> {
        match self {
            Constraint::Dimension(dimension) => {
                let len = match value {
                    Value::Null => return Ok(()),
                    Value::Vector(items) => items.len(),
                    Value::Array(items) => items.len(),
                    // Strings are deferred server-side embedding
                    _ => return Ok(()),
                };

                if len != *dimension {
                    return Err(crate::Error::validation_dimension(path, *dimension, len));
                }

                Ok(())
            }
        }
    }
}
