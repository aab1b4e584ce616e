use serde::{Deserialize, Serialize};

use crate::error::{HuffmanError, Result};

/// A packed bit sequence together with its exact length in bits.
///
/// Bits are stored most significant first within each byte; the unused low bits of the last
/// byte are zero. Since padding is indistinguishable from data, `bit_len` has to travel with the
/// bytes for them to be decodable.
///
/// Deserialization goes through [`PackedBits::new`], so a value whose length does not match its
/// bytes is never built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPackedBits")]
pub struct PackedBits {
    bytes: Box<[u8]>,
    bit_len: usize,
}

#[derive(Deserialize)]
struct RawPackedBits {
    bytes: Box<[u8]>,
    bit_len: usize,
}

impl TryFrom<RawPackedBits> for PackedBits {
    type Error = HuffmanError;

    fn try_from(raw: RawPackedBits) -> Result<Self> {
        Self::new(raw.bytes, raw.bit_len)
    }
}

impl PackedBits {
    /// Wraps raw bytes read back from storage.
    ///
    /// # Errors
    ///
    /// Fails with [`HuffmanError::InvalidCode`] if `bytes` is not exactly `ceil(bit_len / 8)`
    /// bytes long.
    pub fn new(bytes: Box<[u8]>, bit_len: usize) -> Result<Self> {
        if bytes.len() != packed_len(bit_len) {
            return Err(HuffmanError::InvalidCode(format!(
                "{} bits need {} bytes, found {}",
                bit_len,
                packed_len(bit_len),
                bytes.len()
            )));
        }

        Ok(Self { bytes, bit_len })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of meaningful bits, padding excluded.
    #[inline(always)]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    pub fn reader(&self) -> BitReader<'_> {
        BitReader::new(self)
    }
}

/// Number of bytes needed to hold `bit_len` bits.
#[inline(always)]
pub fn packed_len(bit_len: usize) -> usize {
    bit_len.div_ceil(8)
}

/// Accumulates bits, most significant first, into a byte buffer.
pub struct BitWriter {
    os: Vec<u8>,
    written_bits: usize,
    current: u8,
    free: usize,
}

impl Default for BitWriter {
    fn default() -> Self {
        BitWriter {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self { os: Vec::with_capacity(packed_len(bits)), ..Self::default() }
    }

    /// Flushes the pending byte, if it holds any bit, and returns the packed output.
    pub fn build(mut self) -> PackedBits {
        if self.free < 8 {
            self.os.push(self.current);
        }

        PackedBits {
            bytes: self.os.into_boxed_slice(),
            bit_len: self.written_bits,
        }
    }

    #[inline(always)]
    pub fn written_bits(&self) -> usize {
        self.written_bits
    }

    /// Writes the `len` low bits of `b` into the pending byte. `len` must not exceed `free`.
    #[inline(always)]
    fn write_in_current(&mut self, b: u64, len: usize) {
        debug_assert!(len <= self.free);

        self.free -= len;
        self.current |= ((b & ((1 << len) - 1)) as u8) << self.free;

        if self.free == 0 {
            self.os.push(self.current);
            self.free = 8;
            self.current = 0;
        }

        self.written_bits += len;
    }

    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) {
        self.write_in_current(bit as u64, 1);
    }

    /// Writes a bit-string made of `'0'` and `'1'` characters.
    ///
    /// # Errors
    ///
    /// Fails with [`HuffmanError::InvalidBit`] on the first other character. Bits before it have
    /// already been written.
    pub fn push_code(&mut self, code: &str) -> Result<()> {
        for b in code.chars() {
            match b {
                '0' => self.push_bit(false),
                '1' => self.push_bit(true),
                other => return Err(HuffmanError::InvalidBit(other)),
            }
        }
        Ok(())
    }
}

/// Packs a bit-string into `ceil(L / 8)` bytes, zero-padding the last one.
///
/// # Examples
///
/// ```
/// use text_huffman::bitstreams::pack;
///
/// let packed = pack("01001100100111").unwrap();
/// assert_eq!(packed.as_bytes(), &[0b0100_1100, 0b1001_1100]);
/// assert_eq!(packed.bit_len(), 14);
/// ```
pub fn pack(bits: &str) -> Result<PackedBits> {
    let mut writer = BitWriter::with_capacity(bits.len());
    writer.push_code(bits)?;
    Ok(writer.build())
}

/// Expands packed bits back into a bit-string, dropping the padding.
pub fn unpack(packed: &PackedBits) -> String {
    packed.reader().map(|bit| if bit { '1' } else { '0' }).collect()
}

/// Reads the bits of a [`PackedBits`] back, stopping at its bit length.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    is: &'a [u8],
    bit_len: usize,
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(packed: &'a PackedBits) -> Self {
        BitReader {
            is: &packed.bytes,
            bit_len: packed.bit_len,
            position: 0,
        }
    }

    /// Bits read so far.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.bit_len - self.position
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.position >= self.bit_len {
            return None;
        }

        let byte = *self.is.get(self.position >> 3)?;
        let bit = (byte >> (7 - (self.position & 7))) & 1;
        self.position += 1;

        Some(bit == 1)
    }
}

impl<'a> Iterator for BitReader<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl<'a> ExactSizeIterator for BitReader<'a> {}

#[cfg(test)]
mod tests;
