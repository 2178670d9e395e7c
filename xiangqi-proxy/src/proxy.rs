//! Forwarding of a single request to the backend.

use std::time::Duration;

use hyper::{
    body::Bytes,
    client::HttpConnector,
    header::{HeaderName, HeaderValue, CONNECTION, HOST, ORIGIN},
    Body, Client, HeaderMap, Method, Request, Response, StatusCode,
};
use tracing::{debug, info, warn};

use crate::{config::ProxyRule, errors::ForwardError};

const HOP_BY_HOP: [&str; 6] = [
    "connection",
    "keep-alive",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Removes the headers that only apply to a single connection, including
/// all `proxy-*` headers and those listed in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<String> = headers
        .get_all(CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();
    for name in listed {
        headers.remove(name.as_str());
    }

    let proxy: Vec<HeaderName> = headers
        .keys()
        .filter(|name| name.as_str().starts_with("proxy-"))
        .cloned()
        .collect();
    for name in proxy {
        headers.remove(name);
    }

    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

/// Prepares the headers of a request for the backend of `rule`.
///
/// If the rule changes the origin, `Host` is set to the target authority
/// and an `Origin` header, if present, is replaced by the target origin.
pub fn rewrite_request_headers(rule: &ProxyRule, headers: &mut HeaderMap) {
    strip_hop_by_hop(headers);

    if !rule.changes_origin() {
        return;
    }

    if let Ok(host) = HeaderValue::from_str(rule.authority()) {
        headers.insert(HOST, host);
    }

    if headers.contains_key(ORIGIN) {
        let origin = rule.origin();
        if let Ok(value) = HeaderValue::from_str(&origin) {
            debug!(%origin, "rewriting origin");
            headers.insert(ORIGIN, value);
        }
    }
}

/// Response sent to the browser when forwarding fails.
pub fn error_response(error: &ForwardError) -> Response<Body> {
    let status = match error {
        ForwardError::Request(_) => StatusCode::BAD_REQUEST,
        ForwardError::Backend(_) => StatusCode::BAD_GATEWAY,
        ForwardError::Timeout => StatusCode::GATEWAY_TIMEOUT,
    };
    let mut response = Response::new(Body::from(error.to_string()));
    *response.status_mut() = status;
    response
}

/// Sends requests to the backend over a pooled HTTP/1 client.
#[derive(Clone, Debug)]
pub struct Forwarder {
    client: Client<HttpConnector>,
    timeout: Option<Duration>,
}

impl Default for Forwarder {
    fn default() -> Forwarder {
        Forwarder::new(None)
    }
}

impl Forwarder {
    pub fn new(timeout: Option<Duration>) -> Forwarder {
        Forwarder {
            client: Client::new(),
            timeout,
        }
    }

    /// Forwards a request to the backend of `rule`. No retries.
    ///
    /// # Errors
    ///
    /// Errors if the backend cannot be reached or does not answer within
    /// the timeout.
    pub async fn forward(
        &self,
        rule: &ProxyRule,
        method: Method,
        path: &str,
        query: Option<&str>,
        mut headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response<Body>, ForwardError> {
        let uri = rule
            .upstream_uri(path, query)
            .map_err(|err| ForwardError::Request(err.into()))?;
        rewrite_request_headers(rule, &mut headers);

        info!(%method, %uri, "forwarding");

        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body))
            .map_err(ForwardError::Request)?;
        *request.headers_mut() = headers;

        let pending = self.client.request(request);
        let result = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, pending).await {
                Ok(result) => result.map_err(ForwardError::Backend),
                Err(_) => Err(ForwardError::Timeout),
            },
            None => pending.await.map_err(ForwardError::Backend),
        };

        let mut response = result.map_err(|err| {
            warn!(%err, "forwarding failed");
            err
        })?;
        strip_hop_by_hop(response.headers_mut());
        Ok(response)
    }
}
