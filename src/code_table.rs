use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::io::{Cursor, Read};

use tracing::trace;

use crate::bit_vec::BitVec;
use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Per-entry minimum on the wire: 4-byte symbol, 1-byte length, 1 code byte.
const MIN_ENTRY_BYTES: usize = 6;

/// A non-empty string of code bits, first bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        Code { bits: bits.into_iter().collect() }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    fn with_bit(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping, the only part of the tree that gets persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    /// Walks the tree depth-first with an explicit stack, 0 for left and 1
    /// for right. A lone leaf root is bound to the code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(&tree.root, Code::default())];

        while let Some((node, code)) = stack.pop() {
            match node {
                HuffNode::Leaf { symbol, .. } => {
                    let code = if code.is_empty() { Code::from_bits([false]) } else { code };
                    trace!(symbol = ?symbol, code = %code, "assigned code");
                    codes.insert(*symbol, code);
                }
                HuffNode::Internal { left, right, .. } => {
                    stack.push((right.as_ref(), code.with_bit(true)));
                    stack.push((left.as_ref(), code.with_bit(false)));
                }
            }
        }

        CodeTable { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// True when no code is a prefix of (or equal to) another.
    ///
    /// After sorting, any prefix relation shows up between neighbours.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort();
        sorted.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Bit string to symbol lookup used by the decoder.
    pub fn inverse(&self) -> HashMap<&[bool], char> {
        self.codes.iter()
            .map(|(&symbol, code)| (code.bits(), symbol))
            .collect()
    }

    /// Appends `[entry_count: u32 LE]` then, per symbol in ascending order,
    /// `[symbol: u32 LE][code_len: u8][code bits, MSB first, zero-padded]`.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let entry_count = self.codes.len() as u32;
        out.extend_from_slice(&entry_count.to_le_bytes());

        for (&symbol, code) in &self.codes {
            let length = u8::try_from(code.len())
                .map_err(|_| HuffmanError::CodeTooLong { symbol, length: code.len() })?;

            out.extend_from_slice(&u32::from(symbol).to_le_bytes());
            out.push(length);

            let mut packed = BitVec::with_capacity(code.len());
            packed.push_bits(code.bits());
            out.extend_from_slice(packed.as_bytes());
        }

        Ok(())
    }

    /// Parses a table written by [`CodeTable::write_to`], leaving the cursor
    /// on the first byte after it.
    pub fn read_from(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        let entry_count = read_u32(cursor)? as usize;
        if entry_count == 0 {
            return Err(HuffmanError::malformed("code table has no entries"));
        }

        let remaining = remaining(cursor);
        if entry_count > remaining / MIN_ENTRY_BYTES {
            return Err(HuffmanError::malformed(format!(
                "code table declares {entry_count} entries but only {remaining} bytes remain"
            )));
        }

        let mut codes = BTreeMap::new();
        let mut seen_codes = HashSet::with_capacity(entry_count);

        for _ in 0..entry_count {
            let scalar = read_u32(cursor)?;
            let symbol = char::from_u32(scalar).ok_or_else(|| {
                HuffmanError::malformed(format!("{scalar:#x} is not a Unicode scalar value"))
            })?;

            let length = read_u8(cursor)? as usize;
            if length == 0 {
                return Err(HuffmanError::malformed(format!("empty code for {symbol:?}")));
            }

            let mut packed = vec![0u8; length.div_ceil(8)];
            read_exact(cursor, &mut packed)?;
            let bits = BitVec::from_bytes(packed, length)
                .ok_or_else(|| HuffmanError::malformed("code length exceeds its bytes"))?;
            let code = Code::from_bits(bits.iter());

            if !seen_codes.insert(code.clone()) {
                return Err(HuffmanError::malformed(format!("code {code} assigned twice")));
            }
            if codes.insert(symbol, code).is_some() {
                return Err(HuffmanError::malformed(format!("symbol {symbol:?} listed twice")));
            }
        }

        let table = CodeTable { codes };
        if !table.is_prefix_free() {
            return Err(HuffmanError::malformed("code table is not prefix-free"));
        }
        Ok(table)
    }
}

fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    let len = cursor.get_ref().len() as u64;
    len.saturating_sub(cursor.position()) as usize
}

pub(crate) fn read_exact(cursor: &mut Cursor<&[u8]>, buf: &mut [u8]) -> Result<()> {
    cursor.read_exact(buf)
        .map_err(|_| HuffmanError::malformed("container ended inside the code table"))
}

pub(crate) fn read_u8(cursor: &mut Cursor<&[u8]>) -> Result<u8> {
    let mut byte = [0u8; 1];
    read_exact(cursor, &mut byte)?;
    Ok(byte[0])
}

pub(crate) fn read_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32> {
    let mut bytes = [0u8; 4];
    read_exact(cursor, &mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

pub(crate) fn read_u64(cursor: &mut Cursor<&[u8]>) -> Result<u64> {
    let mut bytes = [0u8; 8];
    read_exact(cursor, &mut bytes)?;
    Ok(u64::from_le_bytes(bytes))
}
