//! Per-attempt delivery outcomes.

use crate::error::TransportErrorKind;
use reqwest::StatusCode;

/// The raw collector response carried by HTTP-level outcomes.
///
/// Exposed as-is for caller inspection and diagnostics; the body is never
/// parsed by this crate.
#[derive(Debug, Clone)]
pub struct CollectorResponse {
    /// HTTP status returned by the collector.
    pub status: StatusCode,
    /// Response body, read in full.
    pub body: String,
}

impl CollectorResponse {
    /// Human-readable status label, e.g. `200 OK` or `500 Internal Server Error`.
    ///
    /// Used in log lines where the original reporter would name the
    /// response's runtime class.
    pub fn status_label(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{} {}", self.status.as_u16(), reason),
            None => self.status.as_u16().to_string(),
        }
    }
}

/// Result of a single delivery attempt.
///
/// Exactly one of three terminal states; a transport failure carries the
/// fault kind, HTTP-level states carry the raw response.
#[derive(Debug, Clone)]
pub enum DeliveryOutcome {
    /// The connection could not be established or the response could not
    /// be read; the fault was inside the closed recoverable set.
    TransportFailure {
        /// Which recoverable fault occurred.
        kind: TransportErrorKind,
        /// Transport-level detail for diagnostics.
        detail: String,
    },
    /// A response arrived with a status outside the 2xx success range.
    HttpFailure(CollectorResponse),
    /// A response arrived with a 2xx status.
    HttpSuccess(CollectorResponse),
}

impl DeliveryOutcome {
    /// True only for [`DeliveryOutcome::HttpSuccess`].
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryOutcome::HttpSuccess(_))
    }

    /// The collector response, when one was received.
    pub fn response(&self) -> Option<&CollectorResponse> {
        match self {
            DeliveryOutcome::TransportFailure { .. } => None,
            DeliveryOutcome::HttpFailure(response) | DeliveryOutcome::HttpSuccess(response) => {
                Some(response)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> CollectorResponse {
        CollectorResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: String::new(),
        }
    }

    #[test]
    fn only_http_success_is_success() {
        assert!(DeliveryOutcome::HttpSuccess(response(200)).is_success());
        assert!(!DeliveryOutcome::HttpFailure(response(500)).is_success());
        assert!(!DeliveryOutcome::TransportFailure {
            kind: TransportErrorKind::Timeout,
            detail: String::new(),
        }
        .is_success());
    }

    #[test]
    fn response_is_exposed_for_http_outcomes() {
        let outcome = DeliveryOutcome::HttpFailure(response(422));
        assert_eq!(outcome.response().unwrap().status.as_u16(), 422);

        let outcome = DeliveryOutcome::TransportFailure {
            kind: TransportErrorKind::ConnectionReset,
            detail: "reset by peer".to_string(),
        };
        assert!(outcome.response().is_none());
    }

    #[test]
    fn status_label_includes_reason_phrase() {
        assert_eq!(response(200).status_label(), "200 OK");
        assert_eq!(response(500).status_label(), "500 Internal Server Error");
    }

    #[test]
    fn status_label_without_reason_phrase_is_bare_code() {
        assert_eq!(response(599).status_label(), "599");
    }
}
