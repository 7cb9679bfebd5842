//! Capability probing for foreign handles.

use crate::host::{Object, Value};

/// The probeable stream operations. Close has no sync variant to probe;
/// it is always issued fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read,
    Write,
    Seek,
}

impl Op {
    /// Name of the asynchronous, promise-returning member.
    pub fn name(self) -> &'static str {
        match self {
            Op::Read => "read",
            Op::Write => "write",
            Op::Seek => "seek",
        }
    }

    /// Name of the synchronous member.
    pub fn sync_name(self) -> &'static str {
        match self {
            Op::Read => "readSync",
            Op::Write => "writeSync",
            Op::Seek => "seekSync",
        }
    }
}

/// True iff `handle` exposes a callable `<op>Sync` member.
///
/// Called once per adapter construction; the result is latched for the
/// adapter's lifetime. If the handle's members change afterwards the
/// adapter keeps its original path — a documented limitation.
pub fn has_sync(handle: &Object, op: Op) -> bool {
    matches!(handle.get(op.sync_name()), Value::Func(_))
}
