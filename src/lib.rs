pub mod archive;
pub mod bitvec;
pub mod fuzzy;
pub mod search;
pub mod tree;

use std::collections::HashMap;

use bitvec::{least_bytes_repr_for_bits, BitVec};
use tree::{CodeTable, FrequencyTable, HuffmanTree};

pub use fuzzy::{closest_match, edit_distance, suggest, Match, COMMANDS};
pub use search::{search, search_lines, LineMatch, SearchReport};


#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {

    #[error("no symbols to build a code tree from")]
    EmptyInput,

    #[error("malformed archive: {0}")]
    Format(#[from] FormatError),

    #[error("corrupted archive: payload ends with {trailing_bits} unmatched bit(s)")]
    Decode { trailing_bits: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

}


#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {

    #[error("no {:?} delimiter between code table and payload", archive::DELIMITER)]
    MissingDelimiter,

    #[error("table entry {entry:?} has no ':' separator")]
    MissingFieldSeparator { entry: String },

    #[error("table entry symbol {field:?} is not a byte value")]
    InvalidSymbol { field: String },

    #[error("code {code:?} of symbol {symbol} is not a non-empty bit string")]
    InvalidCode { symbol: u8, code: String },

    #[error("symbol {symbol} appears more than once in the code table")]
    DuplicateSymbol { symbol: u8 },

    #[error("code of symbol {prefix} is a prefix of the code of symbol {symbol}")]
    NotPrefixFree { prefix: u8, symbol: u8 },

    #[error("unexpected character {found:?} at payload offset {offset}")]
    InvalidPayloadChar { offset: usize, found: char },

}


/// Size figures of a single compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {

    pub original_len: usize,
    pub distinct_symbols: usize,
    /// Length of the payload, one character per bit
    pub payload_bits: usize,
    pub archive_len: usize

}

impl CompressionStats {

    /// Bytes the payload would take if its bits were packed.
    pub const fn packed_payload_bytes(&self) -> usize {
        least_bytes_repr_for_bits(self.payload_bits)
    }


    /// Archive size relative to the original size, `None` for empty inputs.
    pub fn archive_ratio(&self) -> Option<f64> {
        (self.original_len != 0)
            .then(|| self.archive_len as f64 / self.original_len as f64)
    }

}


/// Counts the occurrences of every byte in `data`.
pub fn frequencies(data: &[u8]) -> FrequencyTable {

    let mut frequencies = FrequencyTable::new();

    for &byte in data {
        *frequencies.entry(byte).or_insert(0) += 1;
    }

    frequencies
}


/// Builds the Huffman code table of `data`. Fails with [`Error::EmptyInput`] on empty data.
pub fn build_code_table(data: &[u8]) -> Result<CodeTable, Error> {
    HuffmanTree::from_frequencies(&frequencies(data))
        .map(|tree| tree.code_table())
}


pub fn compress(data: &[u8]) -> Result<String, Error> {
    compress_with_stats(data).map(|(archive, _)| archive)
}


/// Compresses `data` into an archive. Empty data produces an archive with an empty code table
/// and an empty payload.
pub fn compress_with_stats(data: &[u8]) -> Result<(String, CompressionStats), Error> {

    let table = match build_code_table(data) {
        Ok(table) => table,
        Err(Error::EmptyInput) => {
            log::debug!("Empty input, writing an empty archive");
            CodeTable::new()
        },
        Err(err) => return Err(err)
    };

    // Rendered codes indexed by symbol
    let mut rendered = vec![String::new(); 256];
    for (&symbol, code) in &table {
        rendered[symbol as usize] = code.to_string();
    }

    let payload_bits: usize = data.iter()
        .map(|&byte| rendered[byte as usize].len())
        .sum();

    let mut payload = String::with_capacity(payload_bits);

    for &byte in data {
        payload.push_str(&rendered[byte as usize]);
    }

    let archive = archive::assemble(&archive::serialize_table(&table), &payload);

    let stats = CompressionStats {
        original_len: data.len(),
        distinct_symbols: table.len(),
        payload_bits,
        archive_len: archive.len()
    };

    log::debug!("Compressed {} bytes into a {} byte archive ({} distinct symbols)",
        stats.original_len, stats.archive_len, stats.distinct_symbols);

    Ok((archive, stats))
}


/// Inverse of a code table.
struct DecodeMap {

    symbols: HashMap<BitVec, u8>,
    longest_code: usize

}

impl DecodeMap {

    /// Fails if the table is not prefix-free, since greedy decoding would then be ambiguous.
    fn new(table: &CodeTable) -> Result<Self, FormatError> {

        // Any prefix relation in a set of strings shows up between lexicographic neighbours
        let mut codes: Vec<(String, &BitVec, u8)> = table.iter()
            .map(|(&symbol, code)| (code.to_string(), code, symbol))
            .collect();
        codes.sort_unstable_by(|a, b| a.0.cmp(&b.0).then(a.2.cmp(&b.2)));

        for pair in codes.windows(2) {
            let (_, prefix_code, prefix) = &pair[0];
            let (_, code, symbol) = &pair[1];

            if prefix_code.is_prefix_of(code) {
                return Err(FormatError::NotPrefixFree { prefix: *prefix, symbol: *symbol });
            }
        }

        Ok(Self {
            longest_code: table.values().map(BitVec::len_bits).max().unwrap_or(0),
            symbols: table.iter()
                .map(|(&symbol, code)| (code.clone(), symbol))
                .collect()
        })
    }

}


/// Recovers the original data from an archive produced by [`compress`].
pub fn decompress(archive: &str) -> Result<Vec<u8>, Error> {

    let (table, payload) = archive::split(archive)?;

    let table = archive::deserialize_table(table)?;
    let decode_map = DecodeMap::new(&table)?;

    log::trace!("Decoding {} payload bits with {} codes", payload.len(), table.len());

    let mut decoded = Vec::new();
    let mut buffer = BitVec::new();

    for (offset, ch) in payload.char_indices() {

        match ch {
            '0' => buffer.append_bit(false),
            '1' => buffer.append_bit(true),
            found => return Err(FormatError::InvalidPayloadChar { offset, found }.into())
        }

        if let Some(&symbol) = decode_map.symbols.get(&buffer) {
            decoded.push(symbol);
            buffer.clear();
        } else if buffer.len_bits() >= decode_map.longest_code {
            // No code is long enough to ever match
            return Err(Error::Decode { trailing_bits: buffer.len_bits() });
        }
    }

    if !buffer.is_empty() {
        return Err(Error::Decode { trailing_bits: buffer.len_bits() });
    }

    Ok(decoded)
}
