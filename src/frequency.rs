use std::collections::{btree_map, BTreeMap};

/// Number of occurrences of every distinct character of a text.
///
/// Entries are kept in ascending symbol order, which is also the order leaves are handed to the
/// tree builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every character of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut table = Self::new();
        for c in text.chars() {
            table.counts.entry(c).and_modify(|freq| *freq += 1).or_insert(1);
        }
        table
    }

    /// Returns the count of `symbol`, if it occurs at all.
    pub fn get(&self, symbol: char) -> Option<usize> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of characters of the counted text.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&c, &f)| (c, f))
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (&'a char, &'a usize);
    type IntoIter = btree_map::Iter<'a, char, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

impl From<&str> for FrequencyTable {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

#[test]
fn test_counts_sum_to_text_length() {
    let text = "the quick brown fox jumps over the lazy dog ∑∑ü";
    let table = FrequencyTable::from_text(text);

    assert_eq!(table.total(), text.chars().count());
    assert_eq!(table.get('o'), Some(4));
    assert_eq!(table.get('∑'), Some(2));
    assert_eq!(table.get('x'), Some(1));
    assert_eq!(table.get('Z'), None);
}

#[test]
fn test_abacabad() {
    let table = FrequencyTable::from("abacabad");

    assert_eq!(table.len(), 4);
    assert_eq!(table.iter().collect::<Vec<_>>(), vec![('a', 4), ('b', 2), ('c', 1), ('d', 1)]);
}

#[test]
fn test_empty_text() {
    let table = FrequencyTable::from_text("");

    assert!(table.is_empty());
    assert_eq!(table.total(), 0);
    assert_eq!(table.iter().count(), 0);
}
