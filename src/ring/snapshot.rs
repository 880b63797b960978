use std::fmt;

/// Owned copy of a store's cursors and raw buffer, for inspection and debugging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub head: usize,
    pub tail: usize,
    pub entry_count: usize,
    pub available: usize,
    pub bytes: Vec<u8>,
}

/// Hex dump with the head byte shown as `[..]`, the tail byte as `<..>`, and
/// `{..}` when both cursors sit on the same byte.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "head: {} tail: {} entries: {} available: {}",
            self.head, self.tail, self.entry_count, self.available
        )?;

        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }

            match (i == self.head, i == self.tail) {
                (true, true) => write!(f, "{{{byte:02x}}}")?,
                (true, false) => write!(f, "[{byte:02x}]")?,
                (false, true) => write!(f, "<{byte:02x}>")?,
                (false, false) => write!(f, "{byte:02x}")?,
            }
        }

        Ok(())
    }
}
