//! Behavior tests for the local→foreign exporters, exercised through the
//! foreign-callable surface directly.

use std::io::{self, Cursor, Read, Write};
use std::sync::{mpsc, Arc, Mutex};

use loopio::host::{ByteView, Outcome, Value};
use loopio::{
    export_closer, export_reader, export_seeker, export_writer, Close,
};

/// Write sink whose backing buffer stays observable after export.
#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reader that fails on every call.
struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "wire cut"))
    }
}

/// Closer that always fails.
struct FailingClose;

impl Close for FailingClose {
    fn close(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "cannot close"))
    }
}

fn settle_blocking(value: Value) -> Outcome {
    let promise = match value {
        Value::Promise(p) => p,
        other => panic!("expected promise, got {other:?}"),
    };
    let (tx, rx) = mpsc::channel();
    promise.on_settle(move |outcome| {
        tx.send(outcome).unwrap();
    });
    rx.recv().unwrap()
}

#[test]
fn sync_read_entry_fills_view_and_signals_eof() {
    let obj = export_reader(Cursor::new(b"abc".to_vec()));

    let view = ByteView::alloc(8);
    let result = obj
        .call("readSync", &[Value::Bytes(view.clone())])
        .unwrap();
    match result {
        Value::Int(3) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(&view.to_vec()[..3], b"abc");

    let again = obj
        .call("readSync", &[Value::Bytes(ByteView::alloc(8))])
        .unwrap();
    assert!(matches!(again, Value::Null));
}

#[test]
fn async_read_entry_settles_with_the_same_sentinel() {
    let obj = export_reader(Cursor::new(b"zz".to_vec()));

    let view = ByteView::alloc(8);
    let first = obj.call("read", &[Value::Bytes(view.clone())]).unwrap();
    match settle_blocking(first).unwrap() {
        Value::Int(2) => assert_eq!(&view.to_vec()[..2], b"zz"),
        other => panic!("unexpected settlement: {other:?}"),
    }

    let second = obj
        .call("read", &[Value::Bytes(ByteView::alloc(8))])
        .unwrap();
    assert!(matches!(settle_blocking(second).unwrap(), Value::Null));
}

#[test]
fn async_write_entry_settles_with_full_count() {
    let sink = SharedSink::default();
    let obj = export_writer(sink.clone());
    let payload = b"written through the async entry";

    let result = obj
        .call("write", &[Value::Bytes(ByteView::from_slice(payload))])
        .unwrap();
    match settle_blocking(result).unwrap() {
        Value::Int(n) => assert_eq!(n as usize, payload.len()),
        other => panic!("unexpected settlement: {other:?}"),
    }
    assert_eq!(sink.0.lock().unwrap().as_slice(), payload);
}

#[test]
fn sync_write_entry_returns_count_directly() {
    let sink = SharedSink::default();
    let obj = export_writer(sink.clone());

    let result = obj
        .call("writeSync", &[Value::Bytes(ByteView::from_slice(b"hi"))])
        .unwrap();
    assert!(matches!(result, Value::Int(2)));
    assert_eq!(sink.0.lock().unwrap().as_slice(), b"hi");
}

#[test]
fn seek_entries_honor_the_whence_encoding() {
    let obj = export_seeker(Cursor::new(vec![0u8; 10]));

    let pos = obj
        .call("seekSync", &[Value::Int(5), Value::Int(0)])
        .unwrap();
    assert!(matches!(pos, Value::Int(5)));

    let pos = obj
        .call("seekSync", &[Value::Int(0), Value::Int(1)])
        .unwrap();
    assert!(matches!(pos, Value::Int(5)));

    let pos = obj.call("seek", &[Value::Int(-3), Value::Int(2)]).unwrap();
    assert!(matches!(settle_blocking(pos).unwrap(), Value::Int(7)));
}

#[test]
fn seek_entry_rejects_bad_arguments() {
    let obj = export_seeker(Cursor::new(vec![0u8; 10]));

    let err = obj
        .call("seekSync", &[Value::Int(0), Value::Int(9)])
        .unwrap_err();
    assert!(err.to_string().contains("whence"));

    let err = obj
        .call("seekSync", &[Value::Int(-1), Value::Int(0)])
        .unwrap_err();
    assert!(err.to_string().contains("offset"));

    let err = obj.call("seekSync", &[Value::Null]).unwrap_err();
    assert!(err.to_string().contains("unexpected"));
}

#[test]
fn local_read_failure_faults_sync_and_rejects_async() {
    let obj = export_reader(BrokenReader);

    let err = obj
        .call("readSync", &[Value::Bytes(ByteView::alloc(4))])
        .unwrap_err();
    assert!(err.to_string().contains("wire cut"));

    let result = obj
        .call("read", &[Value::Bytes(ByteView::alloc(4))])
        .unwrap();
    let fault = settle_blocking(result).unwrap_err();
    assert!(fault.to_string().contains("wire cut"));
}

#[test]
fn zero_length_read_is_not_end_of_stream() {
    let obj = export_reader(Cursor::new(b"data".to_vec()));

    let result = obj
        .call("readSync", &[Value::Bytes(ByteView::alloc(0))])
        .unwrap();
    assert!(matches!(result, Value::Int(0)));
}

#[test]
fn close_entry_swallows_local_failures() {
    let obj = export_closer(FailingClose);
    let result = obj.call("close", &[]).unwrap();
    assert!(matches!(result, Value::Undefined));
}
