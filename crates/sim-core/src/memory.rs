//! Read-only word memory seen by bus components.

/// Word-addressed memory that a bus component may read but never write.
///
/// The owner of the memory is free to change it between bus cycles; a
/// component only samples it at the moment a read completes.
///
/// Addresses past the end wrap modulo the memory length, the way a device
/// with fewer decoded address lines mirrors its contents. Empty memory
/// reads as zero.
pub trait WordMemory {
    /// Read the word at `address`.
    fn read_word(&self, address: u32) -> u32;

    /// Number of words before the contents start to mirror.
    fn len_words(&self) -> usize;

    /// True if `address` falls inside the decoded range.
    fn contains(&self, address: u32) -> bool {
        (address as usize) < self.len_words()
    }
}

fn mirrored(address: u32, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(address as usize % len)
    }
}

impl WordMemory for [u16] {
    fn read_word(&self, address: u32) -> u32 {
        mirrored(address, self.len()).map_or(0, |i| u32::from(self[i]))
    }

    fn len_words(&self) -> usize {
        self.len()
    }
}

impl WordMemory for [u32] {
    fn read_word(&self, address: u32) -> u32 {
        mirrored(address, self.len()).map_or(0, |i| self[i])
    }

    fn len_words(&self) -> usize {
        self.len()
    }
}

impl<T> WordMemory for Vec<T>
where
    [T]: WordMemory,
{
    fn read_word(&self, address: u32) -> u32 {
        self.as_slice().read_word(address)
    }

    fn len_words(&self) -> usize {
        self.len()
    }
}

impl<T: WordMemory + ?Sized> WordMemory for &T {
    fn read_word(&self, address: u32) -> u32 {
        (**self).read_word(address)
    }

    fn len_words(&self) -> usize {
        (**self).len_words()
    }
}
