//! Byte copies that treat a slice as circular.
//!
//! Every helper takes a start position `at < buf.len()` and a run length no
//! larger than `buf.len()`. A run that reaches the end of the slice continues
//! from offset 0.

/// Moves `pos` forward by `n` bytes around a ring of `capacity` bytes.
#[inline]
pub(crate) const fn advance(pos: usize, n: usize, capacity: usize) -> usize {
    debug_assert!(pos < capacity && n <= capacity);

    let next = pos + n;
    if next >= capacity {
        next - capacity
    } else {
        next
    }
}

/// Splits `len` bytes at `at` into the run up to the end of `buf` and the
/// wrapped remainder at its start.
#[inline]
pub(crate) fn segments(buf: &[u8], at: usize, len: usize) -> (&[u8], &[u8]) {
    debug_assert!(at < buf.len() && len <= buf.len());

    let first = len.min(buf.len() - at);
    (&buf[at..at + first], &buf[..len - first])
}

#[inline]
fn segments_mut(buf: &mut [u8], at: usize, len: usize) -> (&mut [u8], &mut [u8]) {
    debug_assert!(at < buf.len() && len <= buf.len());

    let first = len.min(buf.len() - at);
    let (front, back) = buf.split_at_mut(at);
    (&mut back[..first], &mut front[..len - first])
}

/// Copies `src` into `buf` at `at` and returns the position after the last byte.
pub(crate) fn write(buf: &mut [u8], at: usize, src: &[u8]) -> usize {
    let capacity = buf.len();
    let (first, second) = segments_mut(buf, at, src.len());
    let split = first.len();

    first.copy_from_slice(&src[..split]);
    second.copy_from_slice(&src[split..]);

    advance(at, src.len(), capacity)
}

/// Fills `dst` from `buf` at `at` and returns the position after the last byte.
pub(crate) fn read(buf: &[u8], at: usize, dst: &mut [u8]) -> usize {
    let (first, second) = segments(buf, at, dst.len());
    let split = first.len();

    dst[..split].copy_from_slice(first);
    dst[split..].copy_from_slice(second);

    advance(at, dst.len(), buf.len())
}

pub(crate) fn fill(buf: &mut [u8], at: usize, len: usize, byte: u8) {
    let (first, second) = segments_mut(buf, at, len);
    first.fill(byte);
    second.fill(byte);
}
