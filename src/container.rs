use std::io::Cursor;

use crate::code_table::{read_u64, read_u8, CodeTable};
use crate::error::{HuffmanError, Result};

/// Current version of the table section.
pub const FORMAT_VERSION: u8 = 1;

/// Padding byte, version byte, symbol count and entry count.
pub const MIN_HEADER_BYTES: usize = 1 + 1 + 8 + 4;

/// Parsed form of a compressed file.
///
/// Layout:
///
/// | field         | size                          |
/// |---------------|-------------------------------|
/// | padding       | 1 byte, 0..=7                 |
/// | version       | 1 byte                        |
/// | symbol count  | 8 bytes LE                    |
/// | code table    | see [`CodeTable::write_to`]   |
/// | payload       | remaining bytes               |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub padding: u8,
    pub symbol_count: u64,
    pub table: CodeTable,
    pub payload: Vec<u8>,
}

impl Container {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(MIN_HEADER_BYTES + self.payload.len());

        bytes.push(self.padding);
        bytes.push(FORMAT_VERSION);
        bytes.extend_from_slice(&self.symbol_count.to_le_bytes());
        self.table.write_to(&mut bytes)?;
        bytes.extend_from_slice(&self.payload);

        Ok(bytes)
    }

    pub fn parse(data: &[u8]) -> Result<Container> {
        if data.len() < MIN_HEADER_BYTES {
            return Err(HuffmanError::malformed(format!(
                "{} bytes is shorter than the {MIN_HEADER_BYTES}-byte header",
                data.len()
            )));
        }

        let mut cursor = Cursor::new(data);

        let padding = read_u8(&mut cursor)?;
        if padding > 7 {
            return Err(HuffmanError::malformed(format!("padding of {padding} bits")));
        }

        let version = read_u8(&mut cursor)?;
        if version != FORMAT_VERSION {
            return Err(HuffmanError::malformed(format!("unsupported format version {version}")));
        }

        let symbol_count = read_u64(&mut cursor)?;
        if symbol_count == 0 {
            return Err(HuffmanError::malformed("container declares zero symbols"));
        }

        let table = CodeTable::read_from(&mut cursor)?;

        let payload = data[cursor.position() as usize..].to_vec();
        if payload.is_empty() && padding > 0 {
            return Err(HuffmanError::malformed("padding declared for an empty payload"));
        }

        Ok(Container {
            padding,
            symbol_count,
            table,
            payload,
        })
    }

    /// Meaningful payload bits once padding is dropped.
    pub fn payload_bits(&self) -> usize {
        (self.payload.len() * 8).saturating_sub(self.padding as usize)
    }
}
