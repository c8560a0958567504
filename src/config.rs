//! Sender configuration.

use crate::report::{DiagnosticsReporter, NoticeLogger};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default bound on connection establishment.
pub const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(2);
/// Default bound on response reading.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// URL scheme the collector endpoint is displayed and assembled with.
///
/// Display-level only: whether the connection actually negotiates TLS is
/// decided by [`SenderConfig::secure`], not by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// The scheme string used when assembling the collector URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }

    /// Lenient scheme parse for callers that carry the protocol as a string.
    ///
    /// Anything that is not recognizably HTTPS falls back to HTTP.
    pub fn from_scheme(scheme: &str) -> Self {
        if scheme.eq_ignore_ascii_case("https") {
            Protocol::Https
        } else {
            Protocol::Http
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection configuration for a [`Sender`](crate::Sender).
///
/// Immutable for the lifetime of the sender: fields are read on every
/// `send` call but never mutated after construction. No validation happens
/// up front; an unusable host or port surfaces at send time as a
/// transport failure.
#[derive(Clone)]
pub struct SenderConfig {
    /// Scheme used when assembling the collector URL.
    pub protocol: Protocol,
    /// Collector hostname.
    pub host: String,
    /// Collector port.
    pub port: u16,
    /// Authoritative TLS signal. When true the connection negotiates TLS
    /// even if `protocol` reads `http`.
    pub secure: bool,
    /// Collector ingestion path, merged into `protocol://host:port`.
    pub path: String,
    /// Forward proxy hostname. Absent means connect directly.
    pub proxy_host: Option<String>,
    /// Forward proxy port.
    pub proxy_port: Option<u16>,
    /// Basic credentials for the proxy.
    pub proxy_user: Option<String>,
    /// Basic credentials for the proxy.
    pub proxy_pass: Option<String>,
    /// Bound on connection establishment.
    pub open_timeout: Duration,
    /// Bound on response reading.
    pub read_timeout: Duration,
    /// Injected logging capability. Absence silences all log lines.
    pub logger: Option<Arc<dyn NoticeLogger>>,
    /// Injected diagnostics capability. Absence silences attempt callbacks.
    pub reporter: Option<Arc<dyn DiagnosticsReporter>>,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            protocol: Protocol::Http,
            host: "localhost".to_string(),
            port: 80,
            secure: false,
            path: "/".to_string(),
            proxy_host: None,
            proxy_port: None,
            proxy_user: None,
            proxy_pass: None,
            open_timeout: DEFAULT_OPEN_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            logger: None,
            reporter: None,
        }
    }
}

impl fmt::Debug for SenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderConfig")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("path", &self.path)
            .field("proxy_host", &self.proxy_host)
            .field("proxy_port", &self.proxy_port)
            .field("proxy_user", &self.proxy_user)
            .field("proxy_pass", &self.proxy_pass.as_ref().map(|_| "[REDACTED]"))
            .field("open_timeout", &self.open_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("logger", &self.logger.is_some())
            .field("reporter", &self.reporter.is_some())
            .finish()
    }
}
