//! Two-phase state word ring.
//!
//! The device keeps per-channel context out in host memory and streams it
//! through the link with SCAN frames. The ring is split into two phases:
//! slots `0..state_words` and `state_words..full_state_words`. The cursor
//! walks forward one slot per SCAN and drops back to 0 on reaching the end
//! of either phase, so a scan started inside the second phase finishes it
//! and then cycles the first phase.

/// Next cursor position after `cursor`, wrapping to 0 on exact equality
/// with either phase boundary.
///
/// The comparison is equality, not a range check: the cursor only ever
/// steps by one, so it always lands on the boundary it is about to cross.
#[must_use]
pub fn wrap_cursor(cursor: usize, state_words: usize, full_state_words: usize) -> usize {
    let next = cursor + 1;
    if next == state_words || next == full_state_words {
        0
    } else {
        next
    }
}

/// Ring of state words with a read-before-write exchange cursor.
#[derive(Debug, Clone)]
pub struct StateRing {
    words: Vec<u32>,
    state_words: usize,
    cursor: usize,
}

impl StateRing {
    /// A zeroed ring with the cursor at the start of the second phase.
    ///
    /// `full_state_words` must exceed `state_words`;
    /// [`LinkGeometry::validate`](crate::LinkGeometry::validate) checks this.
    #[must_use]
    pub fn new(state_words: usize, full_state_words: usize) -> Self {
        Self {
            words: vec![0; full_state_words],
            state_words,
            cursor: state_words,
        }
    }

    /// Return the word under the cursor, store `word` in its place, and
    /// step the cursor.
    pub fn exchange(&mut self, word: u32) -> u32 {
        let old = std::mem::replace(&mut self.words[self.cursor], word);
        self.cursor = wrap_cursor(self.cursor, self.state_words, self.words.len());
        old
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor. Returns false (and leaves it alone) if `cursor` is
    /// not a slot.
    pub fn set_cursor(&mut self, cursor: usize) -> bool {
        if cursor < self.words.len() {
            self.cursor = cursor;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<u32> {
        self.words.get(slot).copied()
    }

    /// Overwrite one slot. Returns false if `slot` is out of range.
    pub fn set(&mut self, slot: usize, word: u32) -> bool {
        match self.words.get_mut(slot) {
            Some(w) => {
                *w = word;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Slots in the first phase.
    #[must_use]
    pub fn state_words(&self) -> usize {
        self.state_words
    }
}
