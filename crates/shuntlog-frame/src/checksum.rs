/// Running 64-bit sum over the integer fields of one snapshot.
///
/// Addition wraps on overflow. Build a fresh accumulator for every snapshot
/// block; the trailer field itself is never added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum(i64);

impl Checksum {
    /// A zeroed accumulator.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add one decoded field value.
    pub fn add(&mut self, term: i64) {
        self.0 = self.0.wrapping_add(term);
    }

    /// The current sum.
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Whether the sum equals a stored trailer.
    pub const fn matches(&self, trailer: i64) -> bool {
        self.0 == trailer
    }
}
