//! Fixed-capacity byte views.

use std::fmt;
use std::sync::{Arc, Mutex};

/// A fixed-capacity, shared, mutable byte buffer — the host's byte view.
///
/// Capacity is set at allocation and never changes. Cloning shares storage,
/// so a view handed to a foreign call and the caller's copy refer to the
/// same bytes.
#[derive(Clone)]
pub struct ByteView {
    data: Arc<Mutex<Box<[u8]>>>,
}

impl ByteView {
    /// Allocate a zeroed view of `len` bytes.
    pub fn alloc(len: usize) -> Self {
        Self {
            data: Arc::new(Mutex::new(vec![0u8; len].into_boxed_slice())),
        }
    }

    /// Allocate a view holding a copy of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            data: Arc::new(Mutex::new(bytes.to_vec().into_boxed_slice())),
        }
    }

    /// Capacity in bytes.
    pub fn len(&self) -> usize {
        self.data.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy out into `dest`, up to the shorter of the two lengths.
    /// Returns the number of bytes copied.
    pub fn copy_to(&self, dest: &mut [u8]) -> usize {
        let data = self.data.lock().unwrap();
        let n = data.len().min(dest.len());
        dest[..n].copy_from_slice(&data[..n]);
        n
    }

    /// Copy in from `src`, up to the shorter of the two lengths.
    /// Returns the number of bytes copied.
    pub fn copy_from(&self, src: &[u8]) -> usize {
        let mut data = self.data.lock().unwrap();
        let n = data.len().min(src.len());
        data[..n].copy_from_slice(&src[..n]);
        n
    }

    /// Copy the whole view into a fresh vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.lock().unwrap().to_vec()
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteView({} bytes)", self.len())
    }
}
