mod error;
pub use error::{ApiError, ErrorDescriptor};

mod op;
use op::{Request, Route};

mod response;

use docbridge_core::{
    async_trait,
    driver::{self, Capability, ConnectionUrl, Driver, Operation, Response},
    wire::WireValue,
    Error, Result,
};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use std::{sync::Arc, time::Duration};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Driver for the JSON Data API over HTTP.
#[derive(Debug, Clone)]
pub struct DataApi {
    capability: Capability,
    timeout: Duration,
}

impl DataApi {
    pub fn new() -> DataApi {
        DataApi {
            capability: Capability::DATA_API,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Per-request timeout used by every command except keyspace creation
    /// with its own timeout.
    pub fn timeout(mut self, timeout: Duration) -> DataApi {
        self.timeout = timeout;
        self
    }

    /// Overrides the advertised capability, e.g. for deployments without
    /// tables.
    pub fn with_capability(mut self, capability: Capability) -> DataApi {
        self.capability = capability;
        self
    }
}

impl Default for DataApi {
    fn default() -> Self {
        DataApi::new()
    }
}

#[async_trait]
impl Driver for DataApi {
    fn capability(&self) -> &Capability {
        &self.capability
    }

    async fn connect(&self, url: &ConnectionUrl) -> Result<Arc<dyn driver::Client>> {
        Ok(Arc::new(Client::connect(url, self.timeout)?))
    }
}

/// An HTTP client bound to one Data API endpoint.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    url: ConnectionUrl,
}

impl Client {
    pub fn connect(url: &ConnectionUrl, timeout: Duration) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &url.application_token {
            let name = HeaderName::from_bytes(url.auth_header_name().as_bytes()).map_err(|_| {
                Error::invalid_connection_url(format!(
                    "`{}` is not a valid header name",
                    url.auth_header_name()
                ))
            })?;
            let mut value = HeaderValue::from_str(token).map_err(|_| {
                Error::invalid_connection_url("application token is not a valid header value")
            })?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(Error::driver)?;

        Ok(Client {
            http,
            url: url.clone(),
        })
    }

    fn endpoint(&self, route: &Route) -> String {
        match route {
            Route::Api => self.url.api_url(),
            Route::Keyspace(keyspace) => self.url.keyspace_url(keyspace, None),
            Route::Collection { keyspace, name } => self.url.keyspace_url(keyspace, Some(name)),
        }
    }

    async fn send(&self, request: Request) -> Result<WireValue> {
        let endpoint = self.endpoint(&request.route);
        let request_name = request.name;
        tracing::trace!(%endpoint, command = request_name, "sending command");

        let mut builder = self.http.post(&endpoint).json(&request.body);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(Error::driver)?;
        let status = response.status();
        let body = response.text().await.map_err(Error::driver)?;

        // Command errors arrive in the body, with or without a failure status
        let parsed = serde_json::from_str::<WireValue>(&body);
        if let Ok(WireValue::Object(object)) = &parsed {
            if let Some(errors) = error::from_body(object) {
                tracing::debug!(command = request_name, %errors, "command rejected");
                return Err(Error::driver(errors));
            }
        }

        if !status.is_success() {
            return Err(Error::driver(ApiError::Status {
                status: status.as_u16(),
                body,
            }));
        }

        Ok(parsed?)
    }
}

#[async_trait]
impl driver::Client for Client {
    async fn exec(&self, op: Operation) -> Result<Response> {
        let request = op::request(op);
        let expect = request.expect;
        let body = self.send(request).await?;
        response::map(body, expect)
    }

    async fn close(&self) -> Result<()> {
        // reqwest releases pooled connections when the client drops
        Ok(())
    }
}
