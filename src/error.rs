//! Error types and transport fault classification.
//!
//! Recoverability is decided by a closed set of transport-level fault
//! kinds. Faults in the set become `DeliveryOutcome::TransportFailure`
//! values; everything else propagates as [`DeliveryError`] so unrecognized
//! failure categories are never silently swallowed.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use thiserror::Error;

/// The closed set of recoverable transport-level fault kinds.
///
/// A fault whose kind appears here is converted into a
/// `DeliveryOutcome::TransportFailure` instead of propagating out of
/// `Sender::send`. The set is deliberately not extensible: matching is by
/// kind, never by catching broad error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connect or read deadline elapsed.
    Timeout,
    /// Endpoint or proxy address could not be assembled into a request.
    InvalidEndpoint,
    /// Peer reset the connection.
    ConnectionReset,
    /// Connection closed before a complete response arrived.
    UnexpectedEof,
    /// Response framing or status line could not be parsed.
    ///
    /// Hyper's client parser reports header-syntax faults as generic parse
    /// errors, so they classify here as well.
    MalformedResponse,
    /// Response header section was unparsable or oversized.
    ///
    /// Mirrors the header-syntax condition of the closed set. The current
    /// transport has no client-side signal that separates it from
    /// [`TransportErrorKind::MalformedResponse`], so classification never
    /// produces it; it remains for callers matching the full taxonomy.
    MalformedHeaders,
    /// Generic HTTP protocol violation.
    Protocol,
    /// Peer refused the connection.
    ConnectionRefused,
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::InvalidEndpoint => "invalid endpoint",
            TransportErrorKind::ConnectionReset => "connection reset",
            TransportErrorKind::UnexpectedEof => "unexpected end of stream",
            TransportErrorKind::MalformedResponse => "malformed response",
            TransportErrorKind::MalformedHeaders => "malformed headers",
            TransportErrorKind::Protocol => "protocol error",
            TransportErrorKind::ConnectionRefused => "connection refused",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Faults that propagate out of `Sender::send`.
///
/// These are intentionally narrow: recoverable transport faults never take
/// this path, so anything observed here is a programming error or an
/// unrecognized failure category from the underlying transport.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Transport fault outside the closed recoverable set.
    #[error("unclassified transport fault: {0}")]
    Unclassified(#[from] reqwest::Error),

    /// Caller-supplied content header that cannot be represented on the wire.
    #[error("invalid content header {name:?}: {reason}")]
    Header {
        /// The offending header name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Convenience Result alias for delivery operations.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Matches a transport error against the closed recoverable set.
///
/// Returns None when the fault is outside the set and must propagate.
/// The source chain is walked twice: an `io::Error` with a recognized kind
/// wins over the surrounding `hyper::Error` wrapper, so a reset observed
/// mid-read classifies as a reset rather than a generic protocol error.
pub(crate) fn classify_transport(err: &reqwest::Error) -> Option<TransportErrorKind> {
    if err.is_timeout() {
        return Some(TransportErrorKind::Timeout);
    }
    if err.is_builder() {
        return Some(TransportErrorKind::InvalidEndpoint);
    }

    if let Some(kind) = find_io_kind(err) {
        return Some(kind);
    }

    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(cause) = source {
        if let Some(hyper_err) = cause.downcast_ref::<hyper::Error>() {
            return Some(classify_hyper(hyper_err));
        }
        source = cause.source();
    }

    None
}

/// First recognized `io::ErrorKind` anywhere in the source chain.
fn find_io_kind(err: &reqwest::Error) -> Option<TransportErrorKind> {
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::ConnectionReset => {
                    return Some(TransportErrorKind::ConnectionReset)
                }
                io::ErrorKind::ConnectionRefused => {
                    return Some(TransportErrorKind::ConnectionRefused)
                }
                io::ErrorKind::ConnectionAborted => {
                    return Some(TransportErrorKind::ConnectionReset)
                }
                io::ErrorKind::UnexpectedEof => return Some(TransportErrorKind::UnexpectedEof),
                io::ErrorKind::TimedOut => return Some(TransportErrorKind::Timeout),
                io::ErrorKind::InvalidInput => return Some(TransportErrorKind::InvalidEndpoint),
                _ => {}
            }
        }
        source = cause.source();
    }
    None
}

/// Maps a `hyper::Error` with no recognized io cause onto the closed set.
fn classify_hyper(err: &hyper::Error) -> TransportErrorKind {
    if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_incomplete_message() {
        TransportErrorKind::UnexpectedEof
    } else if err.is_parse_status() || err.is_parse() {
        TransportErrorKind::MalformedResponse
    } else {
        TransportErrorKind::Protocol
    }
}
