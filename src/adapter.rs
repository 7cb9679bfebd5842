//! Foreign→local adapters: blocking `std::io` over a foreign stream handle.
//!
//! Each adapter wraps one capability of a foreign handle. At construction
//! the handle is probed once for the synchronous variant of its operation
//! and the chosen path never changes afterwards. The sync path calls
//! `<op>Sync` directly; the async path calls `<op>`, registers a settle
//! callback on the returned promise, and parks the calling thread on a
//! one-shot channel until the host settles. That is a genuine blocking
//! wait, so adapters must never run on the host loop thread itself.
//!
//! Every local call makes exactly one foreign call; adapters never loop to
//! complete a partial transfer.

use std::io;
use std::sync::mpsc;

use tracing::{debug, warn};

use crate::error::HostFault;
use crate::host::{ByteView, Object, Value};
use crate::marshal;
use crate::probe::{self, Op};

/// Stream positions a seek may be relative to.
/// Wire encoding: Start=0, Current=1, End=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    Start = 0,
    Current = 1,
    End = 2,
}

impl Whence {
    /// The wire code for this position.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Decode a wire code.
    pub fn from_code(code: i64) -> Result<Self, HostFault> {
        match code {
            0 => Ok(Whence::Start),
            1 => Ok(Whence::Current),
            2 => Ok(Whence::End),
            other => Err(HostFault::InvalidWhence(other)),
        }
    }
}

/// Split a `SeekFrom` into its wire (offset, whence) pair.
pub(crate) fn split_seek(pos: io::SeekFrom) -> (i64, Whence) {
    match pos {
        io::SeekFrom::Start(n) => (n as i64, Whence::Start),
        io::SeekFrom::Current(n) => (n, Whence::Current),
        io::SeekFrom::End(n) => (n, Whence::End),
    }
}

/// Combine a wire (offset, whence) pair back into a `SeekFrom`.
pub(crate) fn join_seek(offset: i64, whence: Whence) -> Result<io::SeekFrom, HostFault> {
    match whence {
        Whence::Start => u64::try_from(offset)
            .map(io::SeekFrom::Start)
            .map_err(|_| HostFault::InvalidOffset(offset)),
        Whence::Current => Ok(io::SeekFrom::Current(offset)),
        Whence::End => Ok(io::SeekFrom::End(offset)),
    }
}

/// Blocking close contract for local streams — the companion of
/// `std::io::Read` and friends for the close capability.
pub trait Close {
    fn close(&mut self) -> io::Result<()>;
}

/// Issue the async form of `op` and block until the host settles.
///
/// Exactly one foreign call is made. A promise that is dropped without
/// ever settling surfaces as [`HostFault::Abandoned`] rather than a hang.
fn call_and_settle(handle: &Object, op: Op, args: &[Value]) -> Result<Value, HostFault> {
    let result = handle.call(op.name(), args)?;
    let promise = match result {
        Value::Promise(p) => p,
        other => {
            return Err(HostFault::UnexpectedType {
                call: op.name(),
                got: other.kind(),
            })
        }
    };

    let (tx, rx) = mpsc::channel();
    promise.on_settle(move |outcome| {
        let _ = tx.send(outcome);
    });
    // Our clone must not keep an abandoned promise (and the sender inside
    // its callback) alive, or recv below could never observe the drop.
    drop(promise);

    match rx.recv() {
        Ok(outcome) => outcome,
        Err(_) => Err(HostFault::Abandoned { call: op.name() }),
    }
}

/// Interpret a read result: null is end-of-stream, an int is the byte
/// count to copy back out of the shared view.
fn finish_read(
    buf: &mut [u8],
    view: &ByteView,
    value: Value,
    call: &'static str,
) -> io::Result<usize> {
    match value {
        Value::Null => Ok(0),
        Value::Int(count) => {
            let n = usize::try_from(count)
                .ok()
                .filter(|&n| n <= buf.len())
                .ok_or(HostFault::InvalidCount {
                    call,
                    count,
                    capacity: buf.len(),
                })?;
            let data = marshal::copy_to_local(view, n);
            buf[..n].copy_from_slice(&data);
            Ok(n)
        }
        other => Err(HostFault::UnexpectedType {
            call,
            got: other.kind(),
        }
        .into()),
    }
}

/// Interpret a write result: a non-negative count within the buffer size.
fn finish_count(value: Value, limit: usize, call: &'static str) -> io::Result<usize> {
    match value {
        Value::Int(count) => usize::try_from(count)
            .ok()
            .filter(|&n| n <= limit)
            .ok_or_else(|| {
                HostFault::InvalidCount {
                    call,
                    count,
                    capacity: limit,
                }
                .into()
            }),
        other => Err(HostFault::UnexpectedType {
            call,
            got: other.kind(),
        }
        .into()),
    }
}

/// Blocking reader over a foreign handle's read capability.
pub struct Reader {
    handle: Object,
    sync_enabled: bool,
}

impl Reader {
    /// Wrap the read capability of `handle`, probing once for `readSync`.
    pub fn new(handle: Object) -> Self {
        let sync_enabled = probe::has_sync(&handle, Op::Read);
        debug!(op = "read", sync_enabled, "adapter constructed");
        Self {
            handle,
            sync_enabled,
        }
    }

    /// Which path reads take, fixed at construction.
    pub fn sync_enabled(&self) -> bool {
        self.sync_enabled
    }
}

impl io::Read for Reader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let view = ByteView::alloc(buf.len());
        let args = [Value::Bytes(view.clone())];
        if self.sync_enabled {
            let call = Op::Read.sync_name();
            let value = self.handle.call(call, &args)?;
            finish_read(buf, &view, value, call)
        } else {
            let value = call_and_settle(&self.handle, Op::Read, &args)?;
            finish_read(buf, &view, value, Op::Read.name())
        }
    }
}

/// Blocking writer over a foreign handle's write capability.
///
/// The whole buffer is marshalled to a foreign view before the call. The
/// foreign-reported count is returned as-is; callers loop on short writes.
pub struct Writer {
    handle: Object,
    sync_enabled: bool,
}

impl Writer {
    /// Wrap the write capability of `handle`, probing once for `writeSync`.
    pub fn new(handle: Object) -> Self {
        let sync_enabled = probe::has_sync(&handle, Op::Write);
        debug!(op = "write", sync_enabled, "adapter constructed");
        Self {
            handle,
            sync_enabled,
        }
    }

    /// Which path writes take, fixed at construction.
    pub fn sync_enabled(&self) -> bool {
        self.sync_enabled
    }
}

impl io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let view = marshal::copy_to_foreign(buf);
        let args = [Value::Bytes(view)];
        if self.sync_enabled {
            let call = Op::Write.sync_name();
            let value = self.handle.call(call, &args)?;
            finish_count(value, buf.len(), call)
        } else {
            let value = call_and_settle(&self.handle, Op::Write, &args)?;
            finish_count(value, buf.len(), Op::Write.name())
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        // nothing is buffered locally
        Ok(())
    }
}

/// Blocking seeker over a foreign handle's seek capability.
pub struct Seeker {
    handle: Object,
    sync_enabled: bool,
}

impl Seeker {
    /// Wrap the seek capability of `handle`, probing once for `seekSync`.
    pub fn new(handle: Object) -> Self {
        let sync_enabled = probe::has_sync(&handle, Op::Seek);
        debug!(op = "seek", sync_enabled, "adapter constructed");
        Self {
            handle,
            sync_enabled,
        }
    }

    /// Which path seeks take, fixed at construction.
    pub fn sync_enabled(&self) -> bool {
        self.sync_enabled
    }
}

impl io::Seek for Seeker {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (offset, whence) = split_seek(pos);
        let args = [Value::Int(offset), Value::Int(whence.code())];
        let (value, call) = if self.sync_enabled {
            let call = Op::Seek.sync_name();
            (self.handle.call(call, &args)?, call)
        } else {
            (call_and_settle(&self.handle, Op::Seek, &args)?, Op::Seek.name())
        };
        match value {
            Value::Int(new_offset) => u64::try_from(new_offset)
                .map_err(|_| io::Error::from(HostFault::InvalidOffset(new_offset))),
            other => Err(HostFault::UnexpectedType {
                call,
                got: other.kind(),
            }
            .into()),
        }
    }
}

/// Closer over a foreign handle.
///
/// Close is fire-and-forget: the call is issued, faults are logged and
/// swallowed, and success is reported unconditionally.
pub struct Closer {
    handle: Object,
}

impl Closer {
    pub fn new(handle: Object) -> Self {
        Self { handle }
    }
}

impl Close for Closer {
    fn close(&mut self) -> io::Result<()> {
        if let Err(fault) = self.handle.call("close", &[]) {
            warn!(error = %fault, "close fault swallowed");
        }
        Ok(())
    }
}
