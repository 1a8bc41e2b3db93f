//! HTTP transport.
//!
//! Only 200, 201 and 204 count as success; every other status becomes
//! [`GatewayError::Status`]. Nothing is retried.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use labelsync_sync::{GatewayError, Method};

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const ACCEPTED: [u16; 3] = [200, 201, 204];
const ACCEPT: &str = "application/vnd.github+json";

/// Connection settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API root, e.g. `https://api.github.com`.
    pub base_url: String,

    /// Personal access token; requests are anonymous when `None`.
    pub token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// A successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    /// Decoded JSON body; `Null` when the body is empty.
    pub body: Value,
    /// Raw `Link` header.
    pub link: Option<String>,
}

/// Sends one request and returns the decoded response.
pub trait Transport {
    fn send(&self, method: Method, url: &str, body: Option<&Value>)
        -> Result<Response, GatewayError>;
}

/// Blocking transport backed by a shared `ureq` agent.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &GitHubConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&format!("labelsync/{}", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            token: config.token.clone(),
        }
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Response, GatewayError> {
        debug!("Calling {method} on {url}{}", render_body(body));

        let mut request = self
            .agent
            .request(method.as_str(), url)
            .set("Accept", ACCEPT);
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("token {token}"));
        }

        let result = match body {
            Some(json) => request.send_json(json),
            None => request.call(),
        };
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                warn!("got {status} when requesting {url}");
                return Err(GatewayError::Status {
                    method,
                    url: url.to_owned(),
                    status,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(GatewayError::Transport {
                    method,
                    url: url.to_owned(),
                    message: transport.to_string(),
                })
            }
        };

        let status = response.status();
        if !ACCEPTED.contains(&status) {
            warn!("got {status} when requesting {url}");
            return Err(GatewayError::Status {
                method,
                url: url.to_owned(),
                status,
            });
        }

        let link = response.header("Link").map(str::to_owned);
        let text = response
            .into_string()
            .map_err(|e| GatewayError::Transport {
                method,
                url: url.to_owned(),
                message: e.to_string(),
            })?;
        let body = decode_body(&text, url)?;

        Ok(Response { status, body, link })
    }
}

/// Decode a response body; blank bodies (e.g. 204) decode to `Null`.
pub(crate) fn decode_body(text: &str, url: &str) -> Result<Value, GatewayError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| GatewayError::Decode {
        url: url.to_owned(),
        message: e.to_string(),
    })
}

/// `?key=value&...` rendering of a JSON object body, for request logs.
fn render_body(body: Option<&Value>) -> String {
    let Some(Value::Object(map)) = body else {
        return String::new();
    };
    let pairs: Vec<String> = map
        .iter()
        .map(|(k, v)| match v {
            Value::String(s) => format!("{k}={s}"),
            other => format!("{k}={other}"),
        })
        .collect();
    format!("?{}", pairs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_body_decodes_to_null() {
        assert_eq!(decode_body("  \n", "u").unwrap(), Value::Null);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode_body("{nope", "https://x/labels").unwrap_err();
        assert!(matches!(err, GatewayError::Decode { ref url, .. } if url == "https://x/labels"));
    }

    #[test]
    fn request_log_renders_object_bodies() {
        assert_eq!(render_body(None), "");
        assert_eq!(
            render_body(Some(&json!({ "color": "ee0701", "name": "bug" }))),
            "?color=ee0701&name=bug"
        );
    }

    #[test]
    fn default_config_points_at_public_api() {
        let config = GitHubConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.token.is_none());
    }
}
