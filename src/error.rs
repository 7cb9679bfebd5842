//! Error types for the stream bridge.

use thiserror::Error;

/// A fault raised by the foreign side of the bridge, or by a local stream
/// while servicing a foreign call.
///
/// Every fault is surfaced to the caller as a typed error; adapter methods
/// convert faults into `std::io::Error` values. End-of-stream is never a
/// fault — it travels as the host's null sentinel and becomes `Ok(0)`.
#[derive(Debug, Clone, Error)]
pub enum HostFault {
    /// The handle member exists but is not callable.
    #[error("member '{member}' is not callable")]
    NotCallable { member: String },

    /// A call returned or settled with a value of the wrong shape.
    #[error("'{call}': unexpected {got}")]
    UnexpectedType { call: &'static str, got: &'static str },

    /// The host raised an exception instead of settling normally.
    #[error("host rejected '{call}': {reason}")]
    Rejected { call: &'static str, reason: String },

    /// The reported transfer count does not fit the buffer it refers to.
    #[error("'{call}' reported count {count} for a {capacity}-byte buffer")]
    InvalidCount {
        call: &'static str,
        count: i64,
        capacity: usize,
    },

    /// A seek carried a whence code outside {0, 1, 2}.
    #[error("invalid whence value {0}")]
    InvalidWhence(i64),

    /// A seek carried or settled with an offset that cannot name a position.
    #[error("invalid seek offset {0}")]
    InvalidOffset(i64),

    /// The promise for an async call was dropped without ever settling.
    #[error("'{call}' was abandoned before settling")]
    Abandoned { call: &'static str },

    /// The wrapped local stream failed while servicing a foreign call.
    #[error("local stream failed in '{call}': {message}")]
    Stream {
        call: &'static str,
        message: String,
    },
}

impl From<HostFault> for std::io::Error {
    fn from(fault: HostFault) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, fault)
    }
}
