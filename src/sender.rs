//! The delivery sender.
//!
//! One component, one operation: build the collector URL, POST the notice
//! payload over a fresh blocking connection, classify the result. Runs
//! inside the host application's error-reporting path, so the closed set of
//! recoverable transport faults never propagates out of [`Sender::send`].

use crate::config::SenderConfig;
use crate::error::{classify_transport, DeliveryError, DeliveryResult, TransportErrorKind};
use crate::outcome::{CollectorResponse, DeliveryOutcome};
use crate::report::AttemptContext;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Proxy;
use std::collections::HashMap;
use url::Url;

/// Delivers pre-serialized notice payloads to the collector endpoint.
///
/// Construction stores the configuration as-is; no network I/O and no
/// validation happen until [`send`](Sender::send). The sender holds no
/// per-call mutable state, so one instance may be shared across threads
/// and invoked concurrently.
pub struct Sender {
    config: SenderConfig,
}

impl Sender {
    /// Creates a sender over the given connection configuration.
    pub fn new(config: SenderConfig) -> Self {
        Self { config }
    }

    /// The configuration this sender was constructed with.
    pub fn config(&self) -> &SenderConfig {
        &self.config
    }

    /// The collector URL: `protocol://host:port` merged with the configured
    /// path per standard URL-merge rules.
    ///
    /// Recomputed on every call rather than cached; config fields may be
    /// re-read from a live source in the surrounding application.
    pub fn endpoint_url(&self) -> Result<Url, url::ParseError> {
        let base = Url::parse(&format!(
            "{}://{}:{}",
            self.config.protocol, self.config.host, self.config.port
        ))?;
        base.join(&self.config.path)
    }

    /// Sends one notice payload to the collector.
    ///
    /// Performs exactly one network attempt: no implicit retry, no
    /// connection reuse across calls. `payload` is opaque; `content_headers`
    /// is applied to the request exactly as supplied and must carry at
    /// least a content-type header.
    ///
    /// Faults inside the closed recoverable set come back as
    /// `Ok(DeliveryOutcome::TransportFailure { .. })`; anything else is an
    /// `Err` the caller must handle. Either way the injected logger sees
    /// one debug line before the attempt and one info/error line after,
    /// and the diagnostics reporter is invoked exactly once.
    pub fn send(
        &self,
        payload: &[u8],
        content_headers: &HashMap<String, String>,
    ) -> DeliveryResult<DeliveryOutcome> {
        let endpoint = self.endpoint_url();
        let destination = match &endpoint {
            Ok(url) => url.to_string(),
            Err(_) => format!(
                "{}://{}:{}{}",
                self.config.protocol, self.config.host, self.config.port, self.config.path
            ),
        };

        self.log_debug(&format!(
            "Sending request to {}:\n{}",
            destination,
            String::from_utf8_lossy(payload)
        ));

        let attempt = match &endpoint {
            Ok(url) => self.attempt(url, payload, content_headers),
            Err(err) => Ok(DeliveryOutcome::TransportFailure {
                kind: TransportErrorKind::InvalidEndpoint,
                detail: err.to_string(),
            }),
        };

        match attempt {
            Ok(outcome) => {
                self.report_outcome(&destination, &outcome);
                Ok(outcome)
            }
            Err(err) => {
                self.log_error(&format!("Failure: {err}"));
                self.report_attempt(&destination, "fault", None);
                Err(err)
            }
        }
    }

    /// One connection, one POST, one classification.
    fn attempt(
        &self,
        notice_url: &Url,
        payload: &[u8],
        content_headers: &HashMap<String, String>,
    ) -> DeliveryResult<DeliveryOutcome> {
        let transport_url = match self.transport_url(notice_url) {
            Ok(url) => url,
            Err(detail) => {
                return Ok(DeliveryOutcome::TransportFailure {
                    kind: TransportErrorKind::InvalidEndpoint,
                    detail,
                })
            }
        };

        let headers = build_headers(content_headers)?;

        let client = match self.client() {
            Ok(client) => client,
            Err(err) => return self.transport_result(err),
        };

        let response = match client
            .post(transport_url)
            .headers(headers)
            .body(payload.to_vec())
            .send()
        {
            Ok(response) => response,
            Err(err) => return self.transport_result(err),
        };

        let status = response.status();
        let body = match response.text() {
            Ok(body) => body,
            Err(err) => return self.transport_result(err),
        };

        let response = CollectorResponse { status, body };
        Ok(if status.is_success() {
            DeliveryOutcome::HttpSuccess(response)
        } else {
            DeliveryOutcome::HttpFailure(response)
        })
    }

    /// The URL the connection is actually opened against.
    ///
    /// `secure` is the authoritative TLS signal: the scheme is forced to
    /// match it while the effective port is preserved, so a caller carrying
    /// `protocol = http` for display purposes still gets TLS.
    fn transport_url(&self, notice_url: &Url) -> Result<Url, String> {
        let scheme = if self.config.secure { "https" } else { "http" };
        if notice_url.scheme() == scheme {
            return Ok(notice_url.clone());
        }
        let port = notice_url.port_or_known_default();
        let mut url = notice_url.clone();
        url.set_scheme(scheme)
            .map_err(|()| format!("cannot apply scheme {scheme} to {notice_url}"))?;
        if let Some(port) = port {
            url.set_port(Some(port))
                .map_err(|()| format!("cannot preserve port {port} on {url}"))?;
        }
        Ok(url)
    }

    /// Fresh client per attempt: independent connect/read bounds, no pooled
    /// connections across calls, proxy wiring when configured.
    fn client(&self) -> Result<Client, reqwest::Error> {
        let mut builder = Client::builder()
            .connect_timeout(self.config.open_timeout)
            .timeout(self.config.read_timeout)
            .pool_max_idle_per_host(0);

        if let (Some(proxy_host), Some(proxy_port)) =
            (self.config.proxy_host.as_deref(), self.config.proxy_port)
        {
            let mut proxy = Proxy::all(format!("http://{proxy_host}:{proxy_port}"))?;
            if let Some(user) = self.config.proxy_user.as_deref() {
                proxy = proxy.basic_auth(user, self.config.proxy_pass.as_deref().unwrap_or(""));
            }
            builder = builder.proxy(proxy);
        }

        builder.build()
    }

    /// Converts a transport error into an outcome when its kind is in the
    /// closed recoverable set, and propagates it otherwise.
    fn transport_result(&self, err: reqwest::Error) -> DeliveryResult<DeliveryOutcome> {
        match classify_transport(&err) {
            Some(kind) => Ok(DeliveryOutcome::TransportFailure {
                kind,
                detail: err.to_string(),
            }),
            None => Err(DeliveryError::Unclassified(err)),
        }
    }

    fn report_outcome(&self, destination: &str, outcome: &DeliveryOutcome) {
        match outcome {
            DeliveryOutcome::HttpSuccess(response) => {
                self.log_info(&format!("Success: {}", response.status_label()));
                self.report_attempt(destination, "success", Some(&response.body));
            }
            DeliveryOutcome::HttpFailure(response) => {
                self.log_error(&format!("Failure: {}", response.status_label()));
                self.report_attempt(destination, "http failure", Some(&response.body));
            }
            DeliveryOutcome::TransportFailure { kind, detail } => {
                self.log_error(&format!(
                    "Failure: {kind} while contacting the collector: {detail}"
                ));
                self.report_attempt(destination, "transport failure", None);
            }
        }
    }

    fn report_attempt(&self, destination: &str, outcome: &str, body: Option<&str>) {
        if let Some(reporter) = &self.config.reporter {
            reporter.attempt_delivered(&AttemptContext {
                url: destination,
                outcome,
            });
            if let Some(body) = body {
                reporter.response_body(body);
            }
        }
    }

    fn log_debug(&self, msg: &str) {
        if let Some(logger) = &self.config.logger {
            logger.debug(msg);
        }
    }

    fn log_info(&self, msg: &str) {
        if let Some(logger) = &self.config.logger {
            logger.info(msg);
        }
    }

    fn log_error(&self, msg: &str) {
        if let Some(logger) = &self.config.logger {
            logger.error(msg);
        }
    }
}

/// Materializes caller-supplied headers, rejecting anything that cannot be
/// represented on the wire as a propagating [`DeliveryError::Header`].
fn build_headers(content_headers: &HashMap<String, String>) -> DeliveryResult<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(content_headers.len());
    for (name, value) in content_headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| DeliveryError::Header {
                name: name.clone(),
                reason: err.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|err| DeliveryError::Header {
            name: name.clone(),
            reason: err.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
