//! Flat main memory backing store.
//!
//! Main memory is only ever touched by the bus: read when no peer cache
//! can provide a requested block, and written when a transaction's flush
//! phase completes.

/// Maximum addressable words (1 MiB of 32-bit words at the 20-bit address
/// width this machine's addresses are masked to).
pub const MAX_WORDS: usize = 1 << 20;

/// Flat main memory.
pub struct MainMemory {
    words: Vec<i32>,
}

impl MainMemory {
    /// Creates main memory pre-loaded with `image`, zero-padded to
    /// `MAX_WORDS`. `image` must not exceed `MAX_WORDS` entries.
    pub fn new(image: Vec<i32>) -> Self {
        let mut words = image;
        words.resize(MAX_WORDS, 0);
        Self { words }
    }

    /// Reads the 8-word block starting at `base` (must be block-aligned).
    pub fn read_block(&self, base: u32) -> [i32; crate::cache::LINE_WORDS] {
        let base = base as usize;
        let mut block = [0i32; crate::cache::LINE_WORDS];
        block.copy_from_slice(&self.words[base..base + crate::cache::LINE_WORDS]);
        block
    }

    /// Writes an 8-word block starting at `base` (must be block-aligned).
    pub fn write_block(&mut self, base: u32, block: [i32; crate::cache::LINE_WORDS]) {
        let base = base as usize;
        self.words[base..base + crate::cache::LINE_WORDS].copy_from_slice(&block);
    }

    /// All words, for the `memout` dump. Callers are responsible for
    /// trimming trailing zeros per the output format.
    pub fn words(&self) -> &[i32] {
        &self.words
    }
}
