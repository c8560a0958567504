//! # notice-delivery
//!
//! Synchronous delivery client for pre-serialized error-notice payloads.
//!
//! ## Design Philosophy
//!
//! This crate is the wire-side half of an error reporter: some other layer
//! captures an error, serializes it into a notice, and hands the finished
//! bytes to a [`Sender`]. The sender builds the collector URL, performs a
//! single blocking HTTP POST (optionally through a forward proxy), and
//! classifies the result as one of three [`DeliveryOutcome`] states.
//!
//! Because delivery runs inside the host application's error-reporting path,
//! a fixed set of transport-level faults (timeouts, resets, refused
//! connections, malformed responses) is converted into a
//! [`DeliveryOutcome::TransportFailure`] value instead of propagating.
//! Anything outside that closed set is deliberately allowed to surface as a
//! [`DeliveryError`] so programming errors are never silently swallowed.
//!
//! The sender has zero knowledge of:
//!
//! - How the notice was produced (any byte sequence is accepted)
//! - Where log lines go (an injected [`NoticeLogger`] capability)
//! - Who consumes attempt diagnostics (an injected [`DiagnosticsReporter`])
//!
//! ## Usage
//!
//! ```rust,ignore
//! use notice_delivery::{Protocol, Sender, SenderConfig};
//! use std::collections::HashMap;
//!
//! let sender = Sender::new(SenderConfig {
//!     protocol: Protocol::Https,
//!     host: "collector.example".into(),
//!     port: 443,
//!     secure: true,
//!     path: "/api/notices".into(),
//!     ..Default::default()
//! });
//!
//! let mut headers = HashMap::new();
//! headers.insert("Content-Type".to_string(), "text/xml".to_string());
//!
//! let outcome = sender.send(b"<notice/>", &headers)?;
//! if outcome.is_success() {
//!     println!("notice accepted");
//! }
//! ```

mod config;
mod error;
mod outcome;
mod report;
mod sender;

pub use config::{Protocol, SenderConfig};
pub use error::{DeliveryError, DeliveryResult, TransportErrorKind};
pub use outcome::{CollectorResponse, DeliveryOutcome};
pub use report::{AttemptContext, DiagnosticsReporter, NoticeLogger, TracingLogger};
pub use sender::Sender;
