use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::{BufReader, Write},
    path::Path,
    str::FromStr,
};

use java_properties::PropertiesWriter;

use crate::{
    bitstreams::{packed_len, PackedBits},
    codes::CodeTable,
    encoder::Compressed,
    error::{HuffmanError, Result},
    utils,
};

pub const PROPERTIES_VERSION: u32 = 1;
pub const CODEC_NAME: &str = "huffman";

/// Metadata written next to a `.huff` payload as `<basename>.properties`.
///
/// Besides being a readable summary of the compression, it carries what the raw payload cannot:
/// the exact bit length and the code table needed to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Properties {
    pub version: u32,
    /// Number of characters of the original text.
    pub characters: usize,
    /// Size in bytes of the original text.
    pub bytes: usize,
    pub symbols: usize,
    pub bit_len: usize,
    pub packed_bytes: usize,
    pub codes: CodeTable,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            version: PROPERTIES_VERSION,
            characters: 0,
            bytes: 0,
            symbols: 0,
            bit_len: 0,
            packed_bytes: 0,
            codes: CodeTable::default(),
        }
    }
}

impl Properties {
    /// Describes `compressed`, produced from a text of `bytes` bytes.
    pub fn new(compressed: &Compressed, bytes: usize) -> Self {
        Self {
            characters: compressed.characters,
            bytes,
            symbols: compressed.codes.len(),
            bit_len: compressed.payload.bit_len(),
            packed_bytes: compressed.payload.as_bytes().len(),
            codes: compressed.codes.clone(),
            ..Default::default()
        }
    }

    /// Pairs the metadata with a payload read back from disk.
    pub fn attach(self, payload: Vec<u8>) -> Result<Compressed> {
        if payload.len() != self.packed_bytes {
            return Err(HuffmanError::Properties(format!(
                "expected a payload of {} bytes, found {}",
                self.packed_bytes,
                payload.len()
            )));
        }

        Ok(Compressed {
            payload: PackedBits::new(payload.into_boxed_slice(), self.bit_len)?,
            codes: self.codes,
            characters: self.characters,
        })
    }

    /// Reads `<basename>.properties`.
    pub fn load(basename: &str) -> Result<Self> {
        let file = File::open(format!("{}.properties", basename))?;
        let map = java_properties::read(BufReader::new(file))?;
        Self::try_from(map)
    }

    /// Writes `<basename>.properties`, keys in alphabetical order.
    pub fn store(&self, basename: &str) -> Result<()> {
        let mut out = Vec::new();
        write_sorted(&mut out, &BTreeMap::try_from(self)?)?;
        utils::write_atomic(Path::new(&format!("{}.properties", basename)), &out)
    }
}

fn write_sorted<W: Write>(out: W, map: &BTreeMap<String, String>) -> Result<()> {
    let mut writer = PropertiesWriter::new(out);
    for (key, value) in map {
        writer.write(key, value)?;
    }
    writer.finish()?;
    Ok(())
}

fn parse<T: FromStr>(map: &HashMap<String, String>, key: &str) -> Result<T> {
    let value = map
        .get(key)
        .ok_or_else(|| HuffmanError::Properties(format!("missing key {}", key)))?;

    value
        .trim()
        .parse()
        .map_err(|_| HuffmanError::Properties(format!("invalid value {:?} for {}", value, key)))
}

impl TryFrom<HashMap<String, String>> for Properties {
    type Error = HuffmanError;

    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        match value.get("codec").map(|c| c.trim()) {
            Some(CODEC_NAME) => {}
            Some(other) => return Err(HuffmanError::Properties(format!("unknown codec {}", other))),
            None => return Err(HuffmanError::Properties("missing key codec".to_owned())),
        }

        let version: u32 = parse(&value, "version")?;
        if version != PROPERTIES_VERSION {
            return Err(HuffmanError::Properties(format!("unsupported version {}", version)));
        }

        let codes: CodeTable = match value.get("codes") {
            Some(json) => {
                let raw: BTreeMap<u32, String> = serde_json::from_str(json)?;
                let pairs = raw
                    .into_iter()
                    .map(|(point, code)| {
                        char::from_u32(point)
                            .map(|c| (c, code))
                            .ok_or_else(|| HuffmanError::Properties(format!("invalid code point {}", point)))
                    })
                    .collect::<Result<Vec<_>>>()?;
                CodeTable::from_pairs(pairs)?
            }
            None => return Err(HuffmanError::Properties("missing key codes".to_owned())),
        };

        let props = Properties {
            version,
            characters: parse(&value, "characters")?,
            bytes: parse(&value, "bytes")?,
            symbols: parse(&value, "symbols")?,
            bit_len: parse(&value, "bitlength")?,
            packed_bytes: parse(&value, "packedbytes")?,
            codes,
        };

        if props.packed_bytes != packed_len(props.bit_len) {
            return Err(HuffmanError::Properties(format!(
                "{} bits cannot be stored in {} bytes",
                props.bit_len, props.packed_bytes
            )));
        }
        if props.symbols != props.codes.len() {
            return Err(HuffmanError::Properties(format!(
                "{} symbols declared but {} codes found",
                props.symbols,
                props.codes.len()
            )));
        }

        Ok(props)
    }
}

impl TryFrom<&Properties> for BTreeMap<String, String> {
    type Error = HuffmanError;

    fn try_from(val: &Properties) -> Result<Self> {
        let mut map = BTreeMap::new();

        map.insert("version".to_owned(), val.version.to_string());
        map.insert("codec".to_owned(), CODEC_NAME.to_owned());
        map.insert("characters".to_owned(), val.characters.to_string());
        map.insert("bytes".to_owned(), val.bytes.to_string());
        map.insert("symbols".to_owned(), val.symbols.to_string());
        map.insert("bitlength".to_owned(), val.bit_len.to_string());
        map.insert("packedbytes".to_owned(), val.packed_bytes.to_string());
        // Keyed by code point so the file stays plain ASCII whatever the alphabet.
        let points: BTreeMap<u32, &str> = val.codes.iter().map(|(c, code)| (c as u32, code)).collect();
        map.insert("codes".to_owned(), serde_json::to_string(&points)?);

        Ok(map)
    }
}
