//! # text_huffman
//!
//! Static Huffman compression for UTF-8 text.
//!
//! Compression counts every character, builds a Huffman tree, reads a
//! prefix-free code table off it and bit-packs the text. The container keeps
//! only the table, so decompression never rebuilds a tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use text_huffman::HuffmanCodec;
//!
//! let compressed = HuffmanCodec::compress("abracadabra")?;
//! let restored = HuffmanCodec::decompress(&compressed)?;
//! assert_eq!(restored, "abracadabra");
//! # Ok::<(), text_huffman::HuffmanError>(())
//! ```
//!
//! Files or any other byte source go through the reader/writer adapters:
//!
//! ```rust,no_run
//! use text_huffman::HuffmanCodec;
//! use std::fs::File;
//!
//! let input = File::open("input.txt")?;
//! let output = File::create("input.huff")?;
//! let stats = HuffmanCodec::encode_from_file(input, output)?;
//! println!("saved {:.1}%", stats.ratio_percent());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod code_table;
pub mod config;
pub mod container;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;

// Internal modules - not part of public API
mod bit_vec;
mod min_heap;

pub use code_table::{Code, CodeTable};
pub use container::Container;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{CompressionStats, HuffmanCodec};
pub use hufftree::HuffmanTree;
