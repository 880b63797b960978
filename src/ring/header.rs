/// Width of the big-endian length prefix in front of every payload.
pub const HEADER_LEN: usize = 4;

#[inline]
pub(crate) fn encode(payload_len: u32, buf: &mut [u8; HEADER_LEN]) {
    *buf = payload_len.to_be_bytes();
}

#[inline]
pub(crate) fn decode(buf: &[u8; HEADER_LEN]) -> usize {
    u32::from_be_bytes(*buf) as usize
}

/// `None` when `len` cannot be represented in the length prefix.
#[inline]
pub(crate) fn payload_len(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}
