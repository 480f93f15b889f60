use docbridge_core::wire::{WireDocument, WireValue};

/// An error reported by the Data API.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The command was rejected; the body carried an `errors` array
    Command(Vec<ErrorDescriptor>),

    /// Non-success HTTP status without a command error payload
    Status { status: u16, body: String },
}

/// One entry of a response's `errors` array.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    #[serde(default)]
    pub error_code: Option<String>,

    #[serde(default)]
    pub message: String,
}

impl ApiError {
    /// The error codes reported by the remote, in order.
    pub fn codes(&self) -> Vec<&str> {
        match self {
            ApiError::Command(errors) => errors
                .iter()
                .filter_map(|error| error.error_code.as_deref())
                .collect(),
            ApiError::Status { .. } => vec![],
        }
    }
}

impl std::error::Error for ApiError {}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Command(errors) => {
                f.write_str("command failed")?;
                for (i, error) in errors.iter().enumerate() {
                    f.write_str(if i == 0 { ": " } else { "; " })?;
                    match &error.error_code {
                        Some(code) => write!(f, "[{code}] {}", error.message)?,
                        None => f.write_str(&error.message)?,
                    }
                }
                Ok(())
            }
            ApiError::Status { status, body } if body.is_empty() => {
                write!(f, "request failed with status {status}")
            }
            ApiError::Status { status, body } => {
                write!(f, "request failed with status {status}: {body}")
            }
        }
    }
}

/// Extracts the `errors` array from a response body, if it is non-empty.
pub(crate) fn from_body(body: &WireDocument) -> Option<ApiError> {
    let Some(WireValue::Array(errors)) = body.get("errors") else {
        return None;
    };

    if errors.is_empty() {
        return None;
    }

    let errors = errors
        .iter()
        .map(|error| {
            serde_json::from_value(error.clone()).unwrap_or_else(|_| ErrorDescriptor {
                error_code: None,
                message: error.to_string(),
            })
        })
        .collect();

    Some(ApiError::Command(errors))
}
