use std::fmt;


/// A growable sequence of bits packed eight to a byte, most significant bit first.
///
/// Padding bits in the last byte are always zero, so two vectors holding the same bit
/// sequence compare and hash equal. This is what lets codes key the decode map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitVec {

    /// The actual raw bits
    raw_data: Vec<u8>,
    /// How many bits of padding the last byte contains.
    /// Padding bits have no meaning
    last_byte_padding: u8

}

impl BitVec {

    pub const fn new() -> Self {
        Self {
            raw_data: Vec::new(),
            last_byte_padding: 0
        }
    }


    pub fn len_bits(&self) -> usize {
        self.raw_data.len() * 8 - self.last_byte_padding as usize
    }


    pub fn is_empty(&self) -> bool {
        self.raw_data.is_empty()
    }


    pub fn clear(&mut self) {
        self.raw_data.clear();
        self.last_byte_padding = 0;
    }


    pub fn append_bit(&mut self, bit: bool) {

        if self.last_byte_padding == 0 {

            self.raw_data.push((bit as u8) << 7);
            self.last_byte_padding = 7;

        } else if let Some(last_byte) = self.raw_data.last_mut() {

            // A non-zero padding implies at least one byte
            *last_byte |= (bit as u8) << (self.last_byte_padding - 1);

            self.last_byte_padding -= 1;
        }
    }


    /// Returns a copy of `self` with `bit` appended. Used to walk down the tree.
    pub fn with_bit(&self, bit: bool) -> Self {
        let mut res = self.clone();
        res.append_bit(bit);
        res
    }


    /// Bit at position `i`, counting from the first appended bit.
    fn bit(&self, i: usize) -> bool {
        self.raw_data[i / 8] & (0x80 >> (i % 8)) != 0
    }


    pub fn iter_bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len_bits()).map(|i| self.bit(i))
    }


    /// Whether `self` is a (not necessarily proper) prefix of `other`.
    pub fn is_prefix_of(&self, other: &BitVec) -> bool {
        self.len_bits() <= other.len_bits()
            && self.iter_bits().zip(other.iter_bits()).all(|(a, b)| a == b)
    }


    /// Parses a string made of ASCII `'0'` and `'1'` characters.
    /// Returns `None` if any other character is found.
    pub fn from_ascii(text: &str) -> Option<Self> {

        let mut res = Self {
            raw_data: Vec::with_capacity(least_bytes_repr_for_bits(text.len())),
            last_byte_padding: 0
        };

        for ch in text.bytes() {
            match ch {
                b'0' => res.append_bit(false),
                b'1' => res.append_bit(true),
                _ => return None
            }
        }

        Some(res)
    }


    /// Appends the `'0'`/`'1'` rendition of the bits to `buf`.
    pub fn write_ascii(&self, buf: &mut String) {
        buf.extend(
            self.iter_bits().map(|bit| if bit { '1' } else { '0' })
        );
    }

}

impl fmt::Display for BitVec {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::with_capacity(self.len_bits());
        self.write_ascii(&mut buf);
        f.write_str(&buf)
    }
}


pub const fn least_bytes_repr_for_bits(bit_count: usize) -> usize {
    bit_count / 8 + (bit_count % 8 != 0) as usize
}


#[cfg(test)]
mod tests {

    use std::collections::HashMap;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;


    #[test]
    fn append_crosses_byte_boundaries() {

        let mut rng = StdRng::seed_from_u64(0);

        for len in 0..40 {

            let bools: Vec<bool> = (0..len).map(|_| rng.gen_bool(0.5)).collect();

            let mut v = BitVec::new();
            for &b in &bools {
                v.append_bit(b);
            }

            assert_eq!(v.len_bits(), len);
            assert_eq!(v.is_empty(), len == 0);
            assert_eq!(v.iter_bits().collect::<Vec<bool>>(), bools);
        }
    }


    #[test]
    fn with_bit_leaves_original_untouched() {

        let base = BitVec::from_ascii("1010101").unwrap();

        let left = base.with_bit(false);
        let right = base.with_bit(true);

        assert_eq!(base.to_string(), "1010101");
        assert_eq!(left.to_string(), "10101010");
        assert_eq!(right.to_string(), "10101011");
        assert_eq!(right.with_bit(true).to_string(), "101010111");
    }


    #[test]
    fn ascii_text_form() {

        let v = BitVec::from_ascii("1001011101").unwrap();

        assert_eq!(v.len_bits(), 10);
        assert_eq!(v.to_string(), "1001011101");

        let mut buf = String::from("97:");
        v.write_ascii(&mut buf);
        assert_eq!(buf, "97:1001011101");

        assert!(BitVec::from_ascii("10a1").is_none());
        assert!(BitVec::from_ascii("1 0").is_none());
        assert!(BitVec::from_ascii("").unwrap().is_empty());
    }


    #[test]
    fn equal_bits_are_equal_keys() {

        // Built bit by bit, parsed, and reused after a clear
        let mut built = BitVec::new();
        for bit in [true, false, true, true] {
            built.append_bit(bit);
        }

        let mut reused = BitVec::from_ascii("11111111111").unwrap();
        reused.clear();
        assert_eq!(reused, BitVec::new());
        for bit in [true, false, true, true] {
            reused.append_bit(bit);
        }

        let parsed = BitVec::from_ascii("1011").unwrap();

        assert_eq!(built, parsed);
        assert_eq!(reused, parsed);

        // Trailing zeros are significant
        assert_ne!(parsed, BitVec::from_ascii("10110").unwrap());

        let mut map = HashMap::new();
        map.insert(parsed, b'x');
        map.insert(BitVec::from_ascii("0").unwrap(), b'y');

        assert_eq!(map.get(&built), Some(&b'x'));
        assert_eq!(map.get(&reused), Some(&b'x'));
        assert_eq!(map.get(&BitVec::from_ascii("00").unwrap()), None);
    }


    #[test]
    fn prefix_relation() {

        let short = BitVec::from_ascii("10").unwrap();
        let long = BitVec::from_ascii("1011").unwrap();
        let other = BitVec::from_ascii("11").unwrap();

        assert!(short.is_prefix_of(&long));
        assert!(short.is_prefix_of(&short));
        assert!(BitVec::new().is_prefix_of(&short));
        assert!(!long.is_prefix_of(&short));
        assert!(!other.is_prefix_of(&long));

        // Across a byte boundary
        let nine = BitVec::from_ascii("101010101").unwrap();
        assert!(nine.is_prefix_of(&nine.with_bit(false)));
        assert!(!nine.with_bit(true).is_prefix_of(&nine.with_bit(false)));
    }

}
