//! Byte movement between local buffers and foreign views.
//!
//! Copies never exceed the smaller of the two capacities involved. Who
//! frees the foreign allocation is the host's concern, not ours.

use crate::host::ByteView;

/// Copy the first `n` bytes of a foreign view into a fresh local buffer.
/// `n` is clamped to the view's capacity.
pub fn copy_to_local(view: &ByteView, n: usize) -> Vec<u8> {
    let n = n.min(view.len());
    let mut local = vec![0u8; n];
    view.copy_to(&mut local);
    local
}

/// Allocate a foreign view sized to `bytes` and copy everything into it.
pub fn copy_to_foreign(bytes: &[u8]) -> ByteView {
    let view = ByteView::alloc(bytes.len());
    view.copy_from(bytes);
    view
}
