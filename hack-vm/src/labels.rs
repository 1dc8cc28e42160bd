//! Mints unique labels for a translation unit.
//!
//! A single monotonic counter backs every generated label — comparison
//! branches and call return sites alike — so uniqueness holds across the
//! whole unit rather than per label family.
#[derive(Default)]
pub(crate) struct LabelMint {
    next: u32,
}

impl LabelMint {
    pub fn new() -> Self {
        LabelMint { next: 0 }
    }

    /// Returns the next unique ordinal and advances the counter.
    pub fn next(&mut self) -> u32 {
        let n = self.next;
        self.next += 1;
        n
    }
}
