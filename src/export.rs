//! Local→foreign exporters: foreign-callable objects over blocking streams.
//!
//! Each capability installs two entries on the target object: `<op>Sync`,
//! which runs the local operation on the caller's thread and returns its
//! result directly, and `<op>`, which returns a deferred immediately and
//! completes the operation on a spawned background thread that settles it.
//! All entries for one exported stream share the same `Arc<Mutex<_>>`, so
//! overlapping foreign calls serialize on the stream.
//!
//! Local end-of-stream maps to the host's null sentinel, mirroring what
//! the adapters in [`crate::adapter`] expect — the symmetry is what lets a
//! stream round-trip through both directions of the bridge.

use std::io::{Read, Seek, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use tracing::warn;

use crate::adapter::{join_seek, Close, Whence};
use crate::error::HostFault;
use crate::host::{ByteView, Deferred, Object, Value};
use crate::marshal;

fn expect_view(args: &[Value], call: &'static str) -> Result<ByteView, HostFault> {
    match args.first() {
        Some(Value::Bytes(view)) => Ok(view.clone()),
        Some(other) => Err(HostFault::UnexpectedType {
            call,
            got: other.kind(),
        }),
        None => Err(HostFault::UnexpectedType {
            call,
            got: "missing argument",
        }),
    }
}

fn expect_int(args: &[Value], index: usize, call: &'static str) -> Result<i64, HostFault> {
    match args.get(index) {
        Some(Value::Int(n)) => Ok(*n),
        Some(other) => Err(HostFault::UnexpectedType {
            call,
            got: other.kind(),
        }),
        None => Err(HostFault::UnexpectedType {
            call,
            got: "missing argument",
        }),
    }
}

fn lock<'a, S>(stream: &'a Mutex<S>, call: &'static str) -> Result<MutexGuard<'a, S>, HostFault> {
    stream.lock().map_err(|_| HostFault::Stream {
        call,
        message: "stream mutex poisoned".into(),
    })
}

fn service_read<S: Read>(
    stream: &Mutex<S>,
    view: &ByteView,
    call: &'static str,
) -> Result<Value, HostFault> {
    if view.is_empty() {
        // a zero-length request transfers zero bytes; it is not end-of-stream
        return Ok(Value::Int(0));
    }
    let mut local = vec![0u8; view.len()];
    let n = lock(stream, call)?
        .read(&mut local)
        .map_err(|e| HostFault::Stream {
            call,
            message: e.to_string(),
        })?;
    if n == 0 {
        return Ok(Value::Null);
    }
    view.copy_from(&local[..n]);
    Ok(Value::Int(n as i64))
}

fn service_write<S: Write>(
    stream: &Mutex<S>,
    view: &ByteView,
    call: &'static str,
) -> Result<Value, HostFault> {
    let local = marshal::copy_to_local(view, view.len());
    let n = lock(stream, call)?
        .write(&local)
        .map_err(|e| HostFault::Stream {
            call,
            message: e.to_string(),
        })?;
    Ok(Value::Int(n as i64))
}

fn service_seek<S: Seek>(
    stream: &Mutex<S>,
    offset: i64,
    whence_code: i64,
    call: &'static str,
) -> Result<Value, HostFault> {
    let whence = Whence::from_code(whence_code)?;
    let pos = join_seek(offset, whence)?;
    let new_offset = lock(stream, call)?
        .seek(pos)
        .map_err(|e| HostFault::Stream {
            call,
            message: e.to_string(),
        })?;
    Ok(Value::Int(new_offset as i64))
}

/// Install `read` and `readSync` on `obj`, both backed by `stream`.
pub fn register_read<S>(obj: &Object, stream: Arc<Mutex<S>>)
where
    S: Read + Send + 'static,
{
    let sync_stream = Arc::clone(&stream);
    obj.set(
        "readSync",
        Value::func(move |args| {
            let view = expect_view(args, "readSync")?;
            service_read(&sync_stream, &view, "readSync")
        }),
    );
    obj.set(
        "read",
        Value::func(move |args| {
            let view = expect_view(args, "read")?;
            let deferred = Deferred::new();
            let settle = deferred.clone();
            let stream = Arc::clone(&stream);
            thread::spawn(move || match service_read(&stream, &view, "read") {
                Ok(value) => settle.resolve(value),
                Err(fault) => settle.reject(fault),
            });
            Ok(Value::Promise(deferred))
        }),
    );
}

/// Install `write` and `writeSync` on `obj`, both backed by `stream`.
pub fn register_write<S>(obj: &Object, stream: Arc<Mutex<S>>)
where
    S: Write + Send + 'static,
{
    let sync_stream = Arc::clone(&stream);
    obj.set(
        "writeSync",
        Value::func(move |args| {
            let view = expect_view(args, "writeSync")?;
            service_write(&sync_stream, &view, "writeSync")
        }),
    );
    obj.set(
        "write",
        Value::func(move |args| {
            let view = expect_view(args, "write")?;
            let deferred = Deferred::new();
            let settle = deferred.clone();
            let stream = Arc::clone(&stream);
            thread::spawn(move || match service_write(&stream, &view, "write") {
                Ok(value) => settle.resolve(value),
                Err(fault) => settle.reject(fault),
            });
            Ok(Value::Promise(deferred))
        }),
    );
}

/// Install `seek` and `seekSync` on `obj`, both backed by `stream`.
pub fn register_seek<S>(obj: &Object, stream: Arc<Mutex<S>>)
where
    S: Seek + Send + 'static,
{
    let sync_stream = Arc::clone(&stream);
    obj.set(
        "seekSync",
        Value::func(move |args| {
            let offset = expect_int(args, 0, "seekSync")?;
            let whence = expect_int(args, 1, "seekSync")?;
            service_seek(&sync_stream, offset, whence, "seekSync")
        }),
    );
    obj.set(
        "seek",
        Value::func(move |args| {
            let offset = expect_int(args, 0, "seek")?;
            let whence = expect_int(args, 1, "seek")?;
            let deferred = Deferred::new();
            let settle = deferred.clone();
            let stream = Arc::clone(&stream);
            thread::spawn(
                move || match service_seek(&stream, offset, whence, "seek") {
                    Ok(value) => settle.resolve(value),
                    Err(fault) => settle.reject(fault),
                },
            );
            Ok(Value::Promise(deferred))
        }),
    );
}

/// Install `close` on `obj`. Fire-and-forget: local close errors are
/// logged and swallowed, and the entry returns `Undefined`.
pub fn register_close<S>(obj: &Object, stream: Arc<Mutex<S>>)
where
    S: Close + Send + 'static,
{
    obj.set(
        "close",
        Value::func(move |_args| {
            match lock(&stream, "close") {
                Ok(mut guard) => {
                    if let Err(err) = guard.close() {
                        warn!(error = %err, "exported close failed");
                    }
                }
                Err(fault) => warn!(error = %fault, "exported close failed"),
            }
            Ok(Value::Undefined)
        }),
    );
}

/// Export a reader as a fresh foreign object.
pub fn export_reader<S>(stream: S) -> Object
where
    S: Read + Send + 'static,
{
    let obj = Object::new();
    register_read(&obj, Arc::new(Mutex::new(stream)));
    obj
}

/// Export a writer as a fresh foreign object.
pub fn export_writer<S>(stream: S) -> Object
where
    S: Write + Send + 'static,
{
    let obj = Object::new();
    register_write(&obj, Arc::new(Mutex::new(stream)));
    obj
}

/// Export a seeker as a fresh foreign object.
pub fn export_seeker<S>(stream: S) -> Object
where
    S: Seek + Send + 'static,
{
    let obj = Object::new();
    register_seek(&obj, Arc::new(Mutex::new(stream)));
    obj
}

/// Export a closer as a fresh foreign object.
pub fn export_closer<S>(stream: S) -> Object
where
    S: Close + Send + 'static,
{
    let obj = Object::new();
    register_close(&obj, Arc::new(Mutex::new(stream)));
    obj
}

/// Export a reader+writer; both capabilities share the stream.
pub fn export_read_writer<S>(stream: S) -> Object
where
    S: Read + Write + Send + 'static,
{
    let obj = Object::new();
    let stream = Arc::new(Mutex::new(stream));
    register_read(&obj, Arc::clone(&stream));
    register_write(&obj, stream);
    obj
}

/// Export a reader+seeker; both capabilities share the stream.
pub fn export_read_seeker<S>(stream: S) -> Object
where
    S: Read + Seek + Send + 'static,
{
    let obj = Object::new();
    let stream = Arc::new(Mutex::new(stream));
    register_read(&obj, Arc::clone(&stream));
    register_seek(&obj, stream);
    obj
}

/// Export a reader+closer; both capabilities share the stream.
pub fn export_read_closer<S>(stream: S) -> Object
where
    S: Read + Close + Send + 'static,
{
    let obj = Object::new();
    let stream = Arc::new(Mutex::new(stream));
    register_read(&obj, Arc::clone(&stream));
    register_close(&obj, stream);
    obj
}

/// Export a writer+closer; both capabilities share the stream.
pub fn export_write_closer<S>(stream: S) -> Object
where
    S: Write + Close + Send + 'static,
{
    let obj = Object::new();
    let stream = Arc::new(Mutex::new(stream));
    register_write(&obj, Arc::clone(&stream));
    register_close(&obj, stream);
    obj
}

/// Export a writer+seeker; both capabilities share the stream.
pub fn export_write_seeker<S>(stream: S) -> Object
where
    S: Write + Seek + Send + 'static,
{
    let obj = Object::new();
    let stream = Arc::new(Mutex::new(stream));
    register_write(&obj, Arc::clone(&stream));
    register_seek(&obj, stream);
    obj
}

/// Export a reader+writer+seeker; all capabilities share the stream.
pub fn export_read_write_seeker<S>(stream: S) -> Object
where
    S: Read + Write + Seek + Send + 'static,
{
    let obj = Object::new();
    let stream = Arc::new(Mutex::new(stream));
    register_read(&obj, Arc::clone(&stream));
    register_write(&obj, Arc::clone(&stream));
    register_seek(&obj, stream);
    obj
}

/// Export a reader+writer+closer; all capabilities share the stream.
pub fn export_read_write_closer<S>(stream: S) -> Object
where
    S: Read + Write + Close + Send + 'static,
{
    let obj = Object::new();
    let stream = Arc::new(Mutex::new(stream));
    register_read(&obj, Arc::clone(&stream));
    register_write(&obj, Arc::clone(&stream));
    register_close(&obj, stream);
    obj
}

/// Export a full file-like stream: read, write, seek, and close.
pub fn export_file<S>(stream: S) -> Object
where
    S: Read + Write + Seek + Close + Send + 'static,
{
    let obj = Object::new();
    let stream = Arc::new(Mutex::new(stream));
    register_read(&obj, Arc::clone(&stream));
    register_write(&obj, Arc::clone(&stream));
    register_seek(&obj, Arc::clone(&stream));
    register_close(&obj, stream);
    obj
}
