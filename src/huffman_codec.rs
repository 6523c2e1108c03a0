use std::io::{Read, Write};

use tracing::{debug, instrument};

use crate::bit_vec::BitVec;
use crate::code_table::CodeTable;
use crate::container::Container;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;

/// Encodes text with a fixed code table and decodes containers.
///
/// The table is the only state; decoding never needs a codec instance
/// because every container carries its own table.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(table: CodeTable) -> Self {
        HuffmanCodec { table }
    }

    /// Derives the optimal table for `text`. The tree is dropped once the
    /// codes are read off it.
    pub fn from_text(text: &str) -> Result<Self> {
        let frequencies = FrequencyTable::from_text(text)?;
        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        debug!(
            alphabet = frequencies.len(),
            symbols = tree.weight(),
            "built huffman tree"
        );
        tracing::trace!("tree structure:\n{tree}");

        Ok(Self::new(CodeTable::from_tree(&tree)))
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn encode(&self, text: &str) -> Result<Container> {
        if text.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut bit_vec = BitVec::with_capacity(text.len());
        let mut symbol_count = 0u64;
        for symbol in text.chars() {
            let code = self.table.get(symbol).ok_or(HuffmanError::UnknownSymbol(symbol))?;
            bit_vec.push_bits(code.bits());
            symbol_count += 1;
        }

        let padding = bit_vec.padding();
        debug!(
            symbols = symbol_count,
            payload_bits = bit_vec.bit_count(),
            padding,
            "encoded payload"
        );

        Ok(Container {
            padding,
            symbol_count,
            table: self.table.clone(),
            payload: bit_vec.into_bytes(),
        })
    }

    /// Streams the payload bits against the container's own table.
    pub fn decode(container: Container) -> Result<String> {
        let Container { padding, symbol_count, table, payload } = container;

        let bit_count = (payload.len() * 8).saturating_sub(padding as usize);
        let bits = BitVec::from_bytes(payload, bit_count)
            .ok_or_else(|| HuffmanError::malformed("padding exceeds payload"))?;

        let inverse = table.inverse();
        let max_code_len = table.max_code_len();

        let mut text = String::with_capacity(bit_count.min(symbol_count as usize));
        let mut decoded = 0u64;
        let mut candidate: Vec<bool> = Vec::with_capacity(max_code_len);

        for bit in bits.iter() {
            candidate.push(bit);
            if let Some(&symbol) = inverse.get(&candidate[..]) {
                decoded += 1;
                if decoded > symbol_count {
                    return Err(HuffmanError::corrupt(format!(
                        "payload holds more than the declared {symbol_count} symbols"
                    )));
                }
                text.push(symbol);
                candidate.clear();
            } else if candidate.len() >= max_code_len {
                return Err(HuffmanError::corrupt(format!(
                    "bit sequence {} matches no code",
                    candidate.iter().map(|&b| if b { '1' } else { '0' }).collect::<String>()
                )));
            }
        }

        if !candidate.is_empty() {
            return Err(HuffmanError::corrupt(format!(
                "payload ends inside a code ({} dangling bits)",
                candidate.len()
            )));
        }
        if decoded != symbol_count {
            return Err(HuffmanError::corrupt(format!(
                "decoded {decoded} symbols, container declares {symbol_count}"
            )));
        }

        Ok(text)
    }

    /// Text in, container bytes out.
    #[instrument(skip_all, fields(input_bytes = text.len()))]
    pub fn compress(text: &str) -> Result<Vec<u8>> {
        let codec = Self::from_text(text)?;
        let bytes = codec.encode(text)?.to_bytes()?;
        debug!(output_bytes = bytes.len(), "compressed");
        Ok(bytes)
    }

    /// Container bytes in, original text out.
    #[instrument(skip_all, fields(input_bytes = data.len()))]
    pub fn decompress(data: &[u8]) -> Result<String> {
        let container = Container::parse(data)?;
        debug!(
            alphabet = container.table.len(),
            symbols = container.symbol_count,
            payload_bits = container.payload_bits(),
            "parsed container"
        );
        let text = Self::decode(container)?;
        debug!(output_bytes = text.len(), "decompressed");
        Ok(text)
    }

    /// Reads all of `input` as UTF-8 text and writes its container to `output`.
    pub fn encode_from_file<R: Read, W: Write>(mut input: R, mut output: W) -> Result<CompressionStats> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        let text = String::from_utf8(data).map_err(|_| HuffmanError::InvalidUtf8)?;

        let compressed = Self::compress(&text)?;
        output.write_all(&compressed)?;
        output.flush()?;

        Ok(CompressionStats {
            original_bytes: text.len(),
            compressed_bytes: compressed.len(),
        })
    }

    /// Reads a whole container from `input` and writes the recovered text to `output`.
    pub fn decode_from_file<R: Read, W: Write>(mut input: R, mut output: W) -> Result<CompressionStats> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        let text = Self::decompress(&data)?;
        output.write_all(text.as_bytes())?;
        output.flush()?;

        Ok(CompressionStats {
            original_bytes: text.len(),
            compressed_bytes: data.len(),
        })
    }
}

/// Sizes on both sides of one compress or decompress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    pub original_bytes: usize,
    pub compressed_bytes: usize,
}

impl CompressionStats {
    /// Space saved as a percentage of the original; negative when the
    /// container outgrew the text.
    pub fn ratio_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        let original = self.original_bytes as f64;
        (original - self.compressed_bytes as f64) / original * 100.0
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::code_table::Code;

    #[test]
    fn round_trips_plain_text() {
        let text = "Huffman encoding is a greedy algorithm that builds optimal prefix codes.";
        let compressed = HuffmanCodec::compress(text).unwrap();
        assert_eq!(HuffmanCodec::decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn single_symbol_input() {
        let codec = HuffmanCodec::from_text("aaaa").unwrap();
        assert_eq!(codec.table().get('a'), Some(&Code::from_bits([false])));

        let container = codec.encode("aaaa").unwrap();
        assert_eq!(container.payload, vec![0]);
        assert_eq!(container.padding, 4);

        let compressed = HuffmanCodec::compress("aaaa").unwrap();
        assert_eq!(HuffmanCodec::decompress(&compressed).unwrap(), "aaaa");
    }

    #[test]
    fn two_symbol_input() {
        let codec = HuffmanCodec::from_text("ab").unwrap();
        assert_eq!(codec.table().len(), 2);
        assert!(codec.table().is_prefix_free());

        let container = codec.encode("ab").unwrap();
        assert_eq!(container.payload, vec![0b0100_0000]);
        assert_eq!(container.padding, 6);
        assert_eq!(HuffmanCodec::decode(container).unwrap(), "ab");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(HuffmanCodec::compress(""), Err(HuffmanError::EmptyInput)));
        let codec = HuffmanCodec::from_text("abc").unwrap();
        assert!(matches!(codec.encode(""), Err(HuffmanError::EmptyInput)));
    }

    #[test]
    fn foreign_symbol_is_rejected() {
        let codec = HuffmanCodec::from_text("abc").unwrap();
        assert!(matches!(codec.encode("abd"), Err(HuffmanError::UnknownSymbol('d'))));
    }

    #[test]
    fn table_from_one_text_encodes_another() {
        let codec = HuffmanCodec::from_text("abcdefgh").unwrap();
        let container = codec.encode("hgfedcba").unwrap();
        assert_eq!(HuffmanCodec::decode(container).unwrap(), "hgfedcba");
    }

    #[test]
    fn skewed_input_packs_below_eight_bits_per_symbol() {
        let text = "aaaaaaaaab";
        let container = HuffmanCodec::from_text(text).unwrap().encode(text).unwrap();
        assert!(container.payload_bits() < 8 * text.chars().count());
        assert_eq!(container.payload_bits(), 10);
    }

    #[test]
    fn compress_is_deterministic() {
        let text = "mississippi river banks";
        let first = HuffmanCodec::compress(text).unwrap();
        for _ in 0..5 {
            assert_eq!(HuffmanCodec::compress(text).unwrap(), first);
        }
    }

    #[test]
    fn truncated_payload_is_detected() {
        let text = "aaaaaaaaaaaaaaaa";
        let mut compressed = HuffmanCodec::compress(text).unwrap();
        compressed.pop();
        assert!(matches!(
            HuffmanCodec::decompress(&compressed),
            Err(HuffmanError::CorruptContainer { .. })
        ));
    }

    #[test]
    fn dangling_bits_are_detected() {
        let codec = HuffmanCodec::from_text("aaaaaaaabbbbccd").unwrap();
        let mut container = codec.encode("d").unwrap();
        // 'd' is "000"; claim only five padding bits are junk so two
        // extra zero bits remain after it.
        assert_eq!(container.padding, 5);
        container.padding = 3;
        assert!(matches!(
            HuffmanCodec::decode(container),
            Err(HuffmanError::CorruptContainer { .. })
        ));
    }

    #[test]
    fn symbol_count_mismatch_is_detected() {
        let codec = HuffmanCodec::from_text("ab").unwrap();
        let mut container = codec.encode("abab").unwrap();
        container.symbol_count = 3;
        assert!(matches!(
            HuffmanCodec::decode(container),
            Err(HuffmanError::CorruptContainer { .. })
        ));
    }

    #[test]
    fn file_adapters_round_trip() {
        let text = "line one\nline two\nünïcödé line three\n";
        let mut compressed = Vec::new();
        let stats = HuffmanCodec::encode_from_file(Cursor::new(text.as_bytes()), &mut compressed).unwrap();
        assert_eq!(stats.original_bytes, text.len());
        assert_eq!(stats.compressed_bytes, compressed.len());

        let mut restored = Vec::new();
        let stats = HuffmanCodec::decode_from_file(Cursor::new(&compressed), &mut restored).unwrap();
        assert_eq!(stats.compressed_bytes, compressed.len());
        assert_eq!(String::from_utf8(restored).unwrap(), text);
    }

    #[test]
    fn file_adapter_rejects_invalid_utf8() {
        let mut sink = Vec::new();
        let result = HuffmanCodec::encode_from_file(Cursor::new(vec![0x66, 0xFF, 0x6F]), &mut sink);
        assert!(matches!(result, Err(HuffmanError::InvalidUtf8)));
        assert!(sink.is_empty());
    }

    #[test]
    fn ratio_percent() {
        let stats = CompressionStats { original_bytes: 200, compressed_bytes: 150 };
        assert_eq!(stats.ratio_percent(), 25.0);

        let grown = CompressionStats { original_bytes: 10, compressed_bytes: 20 };
        assert_eq!(grown.ratio_percent(), -100.0);

        let empty = CompressionStats { original_bytes: 0, compressed_bytes: 14 };
        assert_eq!(empty.ratio_percent(), 0.0);
    }
}
