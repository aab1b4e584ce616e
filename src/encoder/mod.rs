use serde::{Deserialize, Serialize};

use crate::{
    bitstreams::{BitWriter, PackedBits},
    codes::CodeTable,
    error::{HuffmanError, Result},
    frequency::FrequencyTable,
    tree::HuffmanTree,
};

/// Output of one compression: the code table and the packed payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compressed {
    pub codes: CodeTable,
    pub payload: PackedBits,
    /// Number of characters of the original text.
    pub characters: usize,
}

impl Compressed {
    /// Decodes the payload back into the original text.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`decompress`], fails with [`HuffmanError::InvalidCode`] if the
    /// decoded text does not have `characters` characters.
    pub fn decompress(&self) -> Result<String> {
        let text = decompress(&self.payload, &self.codes)?;

        let decoded = text.chars().count();
        if decoded != self.characters {
            return Err(HuffmanError::InvalidCode(format!(
                "expected {} characters, decoded {}",
                self.characters, decoded
            )));
        }

        Ok(text)
    }
}

/// Concatenates the code of every character of `text`, in order.
///
/// # Errors
///
/// Fails with [`HuffmanError::SymbolNotInTable`] on the first character `codes` has no entry
/// for.
pub fn encode_bits(text: &str, codes: &CodeTable) -> Result<String> {
    let mut bits = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        bits.push_str(codes.get(c).ok_or(HuffmanError::SymbolNotInTable(c))?);
    }
    Ok(bits)
}

/// Packs the codes of `text` straight into a [`PackedBits`], without building the intermediate
/// bit-string.
///
/// # Errors
///
/// Same as [`encode_bits`].
pub fn encode(text: &str, codes: &CodeTable) -> Result<PackedBits> {
    let mut writer = BitWriter::with_capacity(text.len() * 2);
    for c in text.chars() {
        writer.push_code(codes.get(c).ok_or(HuffmanError::SymbolNotInTable(c))?)?;
    }
    Ok(writer.build())
}

/// Runs the whole pipeline on `text`: count, build the tree, assign codes and pack.
///
/// The tree only lives for the duration of the call. An empty text gives an empty table and an
/// empty payload.
///
/// # Examples
///
/// ```
/// use text_huffman::encoder::compress;
///
/// let compressed = compress("abacabad").unwrap();
/// assert_eq!(compressed.codes.get('a'), Some("0"));
/// assert_eq!(compressed.payload.bit_len(), 14);
/// assert_eq!(compressed.decompress().unwrap(), "abacabad");
/// ```
pub fn compress(text: &str) -> Result<Compressed> {
    let frequencies = FrequencyTable::from_text(text);
    let tree = HuffmanTree::build(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);
    let payload = encode(text, &codes)?;

    debug_assert_eq!(payload.bit_len(), codes.encoded_bit_len(&frequencies));

    Ok(Compressed { codes, payload, characters: frequencies.total() })
}

/// Decodes `payload` with `codes`, reading exactly `payload.bit_len()` bits.
///
/// # Errors
///
/// Fails with [`HuffmanError::TruncatedCode`] if the bits run out in the middle of a code and
/// with [`HuffmanError::InvalidCode`] if a run of bits longer than any code matches nothing.
pub fn decompress(payload: &PackedBits, codes: &CodeTable) -> Result<String> {
    if payload.is_empty() {
        return Ok(String::new());
    }
    if codes.is_empty() {
        return Err(HuffmanError::InvalidCode("cannot decode with an empty code table".to_owned()));
    }

    let lookup = codes.reversed();
    let max_len = codes.max_code_len();

    let mut text = String::new();
    let mut pending = String::with_capacity(max_len);

    let mut reader = payload.reader();
    while let Some(bit) = reader.read_bit() {
        pending.push(if bit { '1' } else { '0' });

        if let Some(&symbol) = lookup.get(pending.as_str()) {
            text.push(symbol);
            pending.clear();
        } else if pending.len() >= max_len {
            return Err(HuffmanError::InvalidCode(format!("no symbol has the code {}", pending)));
        }
    }

    if !pending.is_empty() {
        return Err(HuffmanError::TruncatedCode { consumed: reader.position() - pending.len() });
    }

    Ok(text)
}

#[cfg(test)]
mod tests;
