//! Bit manipulation on packed words.

/// Zero-extended `len` bits of `value` starting at bit `pos`.
pub const fn zextract(value: u32, pos: u32, len: u32) -> u32 {
    (value << (u32::BITS - pos - len)) >> (u32::BITS - len)
}

/// Replaces `len` bits of `value` at `pos` with the low bits of `field`.
pub const fn deposit(value: u32, pos: u32, len: u32, field: u32) -> u32 {
    let mask = (u32::MAX >> (u32::BITS - len)) << pos;
    (value & !mask) | ((field << pos) & mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract() {
        assert_eq!(zextract(0xabcd_1234, 16, 16), 0xabcd);
        assert_eq!(zextract(0xabcd_1234, 0, 3), 4);
        assert_eq!(zextract(0xffff_ffff, 0, 32), 0xffff_ffff);
    }

    #[test]
    fn insert() {
        assert_eq!(deposit(0, 16, 16, 0x90), 0x0090_0000);
        assert_eq!(deposit(0xffff_ffff, 4, 4, 0), 0xffff_ff0f);
        // high bits of `field` are dropped
        assert_eq!(deposit(0, 0, 2, 7), 3);
    }
}
