use std::{collections::{btree_map, BTreeMap}, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    error::{HuffmanError, Result},
    frequency::FrequencyTable,
    tree::{HuffmanNode, HuffmanTree},
};

/// Code given to the only symbol of a one-leaf tree.
pub const SINGLE_SYMBOL_CODE: &str = "0";

/// Mapping from every symbol of a text to its Huffman code, a non-empty string of `0`s and `1`s.
///
/// A table built from a tree is prefix-free because codes are only assigned at leaves. A
/// deserialized table goes through [`CodeTable::from_pairs`] and is held to the same rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<char, String>", into = "BTreeMap<char, String>")]
pub struct CodeTable {
    codes: BTreeMap<char, String>,
}

impl CodeTable {
    /// Assigns a code to each leaf of `tree` from its root-to-leaf path, `0` for left and `1`
    /// for right.
    ///
    /// The walk keeps its own stack so a badly skewed tree cannot exhaust the call stack. A tree
    /// made of a single leaf gets [`SINGLE_SYMBOL_CODE`], since the empty path cannot be packed.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();

        let Some(root) = tree.root() else {
            return Self { codes };
        };

        if let HuffmanNode::Leaf { symbol, .. } = root {
            codes.insert(*symbol, SINGLE_SYMBOL_CODE.to_owned());
            return Self { codes };
        }

        let mut stack = vec![(root, String::new())];
        while let Some((node, code)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes.insert(*symbol, code);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_code = code.clone();
                    right_code.push('1');
                    let mut left_code = code;
                    left_code.push('0');

                    // Left is popped first, keeping the walk in pre-order.
                    stack.push((&**right, right_code));
                    stack.push((&**left, left_code));
                }
            }
        }

        Self { codes }
    }

    /// Builds a table from already known `(symbol, code)` pairs, e.g. read back from metadata.
    ///
    /// # Errors
    ///
    /// Fails with [`HuffmanError::InvalidCode`] if a code is empty, a symbol appears twice or
    /// the codes are not prefix-free, and with [`HuffmanError::InvalidBit`] if a code contains
    /// anything but `0` and `1`.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, String)>,
    {
        let mut codes = BTreeMap::new();

        for (symbol, code) in pairs {
            if code.is_empty() {
                return Err(HuffmanError::InvalidCode(format!("empty code for {:?}", symbol)));
            }
            if let Some(bad) = code.chars().find(|&b| b != '0' && b != '1') {
                return Err(HuffmanError::InvalidBit(bad));
            }
            if codes.insert(symbol, code).is_some() {
                return Err(HuffmanError::InvalidCode(format!("{:?} has more than one code", symbol)));
            }
        }

        let table = Self { codes };
        if !table.is_prefix_free() {
            return Err(HuffmanError::InvalidCode("codes are not prefix-free".to_owned()));
        }

        Ok(table)
    }

    pub fn get(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates over `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.codes.iter().map(|(&c, code)| (c, code.as_str()))
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    /// Returns `true` if no code is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        // In lexicographic order a code is immediately followed by the codes it prefixes.
        let mut sorted: Vec<&str> = self.codes.values().map(String::as_str).collect();
        sorted.sort_unstable();

        sorted.windows(2).all(|w| !w[1].starts_with(w[0]))
    }

    /// Number of bits needed to encode a text with the given symbol counts.
    ///
    /// Symbols missing from the table are not counted.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> usize {
        frequencies
            .iter()
            .filter_map(|(symbol, freq)| self.get(symbol).map(|code| freq * code.len()))
            .sum()
    }

    /// Inverse mapping used while decoding.
    pub(crate) fn reversed(&self) -> BTreeMap<&str, char> {
        self.codes.iter().map(|(&c, code)| (code.as_str(), c)).collect()
    }
}

impl<'a> IntoIterator for &'a CodeTable {
    type Item = (&'a char, &'a String);
    type IntoIter = btree_map::Iter<'a, char, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

impl TryFrom<BTreeMap<char, String>> for CodeTable {
    type Error = HuffmanError;

    fn try_from(codes: BTreeMap<char, String>) -> Result<Self> {
        Self::from_pairs(codes)
    }
}

impl From<CodeTable> for BTreeMap<char, String> {
    fn from(table: CodeTable) -> Self {
        table.codes
    }
}

impl From<&HuffmanTree> for CodeTable {
    fn from(tree: &HuffmanTree) -> Self {
        Self::from_tree(tree)
    }
}

/// Renders the table as `{a=0, b=10, c=110}`. Symbols are escaped, so newlines and tabs keep the
/// dump on a single line.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (symbol, code)) in self.codes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", symbol.escape_debug(), code)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests;
