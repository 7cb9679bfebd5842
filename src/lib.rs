//! loopio: blocking `std::io` over event-loop hosted streams
//!
//! Bridges two incompatible I/O execution models. On one side sits a host
//! whose streams are event-loop-scheduled objects: every operation has a
//! promise-returning form (`read`, `write`, `seek`) and, optionally, a
//! synchronous form (`readSync`, `writeSync`, `seekSync`). On the other
//! side sits guest code that expects blocking, sequential
//! `read`/`write`/`seek`/`close` contracts.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                    loopio                      │
//! │                                                │
//! │  host     - object space primitives            │
//! │  probe    - sync-variant capability probe      │
//! │  marshal  - local <-> foreign byte movement    │
//! │  adapter  - foreign handle -> std::io          │
//! │  export   - std::io -> foreign object          │
//! │  compose  - multi-capability composites        │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! Wrapping a foreign handle probes once, at construction, for the sync
//! variant of each operation and latches the result: present means every
//! call takes the direct sync path, absent means every call issues the
//! async form and parks on a rendezvous until the host settles the
//! returned promise. Exporting a local stream installs both forms on a
//! fresh host object, with the async form serviced by a background thread.
//! End-of-stream travels as the host's null sentinel in both directions.
//!
//! ```no_run
//! use std::io::Read;
//! use loopio::{export_reader, Reader};
//!
//! let exported = export_reader(std::io::Cursor::new(b"hello".to_vec()));
//! let mut reader = Reader::new(exported);
//! let mut buf = Vec::new();
//! reader.read_to_end(&mut buf).unwrap();
//! assert_eq!(buf, b"hello");
//! ```

pub mod adapter;
pub mod compose;
pub mod error;
pub mod export;
pub mod host;
pub mod marshal;
pub mod probe;

pub use adapter::{Close, Closer, Reader, Seeker, Whence, Writer};
pub use compose::{
    File, ReadCloser, ReadSeeker, ReadWriteCloser, ReadWriteSeeker, ReadWriter, WriteCloser,
    WriteSeeker,
};
pub use error::HostFault;
pub use export::{
    export_closer, export_file, export_read_closer, export_read_seeker, export_read_write_closer,
    export_read_write_seeker, export_read_writer, export_reader, export_seeker,
    export_write_closer, export_write_seeker, export_writer,
};
