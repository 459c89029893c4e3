use crate::utils::{deposit, zextract};

/// Bit field inside a 32-bit packed word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    start: u8,
    size: u8,
}

impl Field {
    pub const fn new(start: u8, size: u8) -> Self {
        assert!(size != 0 && start < 32 && (start + size) <= 32);
        Self { start, size }
    }

    /// Single bit field.
    pub const fn bit(start: u8) -> Self {
        Self::new(start, 1)
    }

    pub const fn start(&self) -> u32 {
        self.start as u32
    }

    pub const fn size(&self) -> u32 {
        self.size as u32
    }

    /// Largest value the field can hold.
    pub const fn max(&self) -> u32 {
        u32::MAX >> (32 - self.size as u32)
    }

    /// First bit after the field.
    pub const fn end(&self) -> u32 {
        self.start as u32 + self.size as u32
    }

    pub const fn get(&self, word: u32) -> u32 {
        zextract(word, self.start(), self.size())
    }

    pub const fn is_set(&self, word: u32) -> bool {
        self.get(word) != 0
    }

    pub fn set(&self, word: u32, value: u32) -> u32 {
        debug_assert!(value <= self.max());
        deposit(word, self.start(), self.size(), value)
    }

    pub fn overlaps(&self, other: &Field) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }
}

/// Set of boolean properties packed into one word.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct Flags {
    raw: u32,
}

impl Flags {
    pub const fn empty() -> Self {
        Self { raw: 0 }
    }

    pub fn set(&mut self, flags: u32) -> &mut Self {
        self.raw |= flags;
        self
    }

    pub fn set_if(&mut self, flags: u32, cond: bool) -> &mut Self {
        if cond {
            self.raw |= flags;
        } else {
            self.raw &= !flags;
        }
        self
    }

    pub const fn any(&self, flags: u32) -> bool {
        self.raw & flags != 0
    }
}
