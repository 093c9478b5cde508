//! `httpRequest` shaping
//!
//! Mirrors the Cloud Logging `HttpRequest` message. Each field is emitted
//! only when it holds a non-default value; a request with every field at its
//! default produces no `httpRequest` key at all.
//!
//! See <https://cloud.google.com/logging/docs/reference/v2/rest/v2/LogEntry#HttpRequest>.

use super::keys;
use super::severity::Severity;
use super::value::Attr;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRequest {
    pub request_method: String,
    pub request_url: String,
    pub request_size: i64,
    pub status: u16,
    pub response_size: i64,
    pub user_agent: String,
    pub remote_ip: String,
    pub server_ip: String,
    pub referer: String,
    pub latency: Duration,
    pub cache_lookup: bool,
    pub cache_hit: bool,
    pub cache_validated_with_origin_server: bool,
    pub cache_fill_bytes: i64,
    pub protocol: String,
}

/// Format a duration the way protobuf's `Duration` JSON mapping does: `123.000000456s`.
pub fn format_latency(latency: Duration) -> String {
    format!("{}.{:09}s", latency.as_secs(), latency.subsec_nanos())
}

impl HttpRequest {
    /// Fields of the `httpRequest` group, skipping defaults.
    ///
    /// Byte sizes are rendered as decimal strings (int64 in the API), `status`
    /// stays numeric.
    pub fn to_attrs(&self) -> Vec<Attr> {
        let mut attrs = Vec::with_capacity(15);

        if !self.request_method.is_empty() {
            attrs.push(Attr::new("requestMethod", &self.request_method));
        }
        if !self.request_url.is_empty() {
            attrs.push(Attr::new("requestUrl", &self.request_url));
        }
        if self.request_size != 0 {
            attrs.push(Attr::new("requestSize", self.request_size.to_string()));
        }
        if self.status != 0 {
            attrs.push(Attr::new("status", self.status));
        }
        if self.response_size != 0 {
            attrs.push(Attr::new("responseSize", self.response_size.to_string()));
        }
        if !self.user_agent.is_empty() {
            attrs.push(Attr::new("userAgent", &self.user_agent));
        }
        if !self.remote_ip.is_empty() {
            attrs.push(Attr::new("remoteIp", &self.remote_ip));
        }
        if !self.server_ip.is_empty() {
            attrs.push(Attr::new("serverIp", &self.server_ip));
        }
        if !self.referer.is_empty() {
            attrs.push(Attr::new("referer", &self.referer));
        }
        if !self.latency.is_zero() {
            attrs.push(Attr::new("latency", format_latency(self.latency)));
        }
        if self.cache_lookup {
            attrs.push(Attr::new("cacheLookup", true));
            attrs.push(Attr::new("cacheHit", self.cache_hit));
            if self.cache_hit {
                attrs.push(Attr::new(
                    "cacheValidatedWithOriginServer",
                    self.cache_validated_with_origin_server,
                ));
            }
        }
        if self.cache_fill_bytes != 0 {
            attrs.push(Attr::new("cacheFillBytes", self.cache_fill_bytes.to_string()));
        }
        if !self.protocol.is_empty() {
            attrs.push(Attr::new("protocol", &self.protocol));
        }

        attrs
    }

    /// The `httpRequest` group attribute.
    pub fn to_attr(&self) -> Attr {
        Attr::group(keys::HTTP_REQUEST, self.to_attrs())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `ERROR` for server errors (status >= 500), `INFO` otherwise.
    pub fn severity(&self) -> Severity {
        if self.status >= 500 {
            Severity::ERROR
        } else {
            Severity::INFO
        }
    }

    /// Short description such as `GET /index.html HTTP/1.1`.
    pub fn summary(&self) -> String {
        let parts: Vec<&str> = [
            self.request_method.as_str(),
            self.request_url.as_str(),
            self.protocol.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

        if parts.is_empty() {
            "HTTP request".to_string()
        } else {
            parts.join(" ")
        }
    }
}
