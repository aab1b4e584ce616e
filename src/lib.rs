//! Static Huffman compression of text.
//!
//! ```
//! use text_huffman::encoder::compress;
//!
//! let compressed = compress("abracadabra").unwrap();
//! assert_eq!(compressed.decompress().unwrap(), "abracadabra");
//! ```

pub mod archive;
pub mod bitstreams;
pub mod codes;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod priority_queue;
pub mod properties;
pub mod report;
pub mod tree;
pub mod utils;

pub use codes::CodeTable;
pub use encoder::{compress, decompress, Compressed};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanNode, HuffmanTree};
