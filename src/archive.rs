//! Textual archive format.
//!
//! An archive is the serialized code table, the delimiter line and the payload:
//!
//! ```text
//! 97:0,98:110,99:100,100:101,114:111,
//! ====
//! 01101110100010101101110
//! ```
//!
//! Each table entry is `<decimal byte value>:<code>` followed by a comma. The payload is
//! the concatenation of every input symbol's code written as ASCII `0`/`1` characters.

use std::collections::btree_map::Entry;

use crate::bitvec::BitVec;
use crate::tree::CodeTable;
use crate::{Error, FormatError};


pub const DELIMITER: &str = "\n====\n";
pub const FIELD_SEPARATOR: char = ':';
pub const ENTRY_SEPARATOR: char = ',';


/// Serializes the table in ascending symbol order.
pub fn serialize_table(table: &CodeTable) -> String {

    let mut buf = String::new();

    for (symbol, code) in table {
        buf.push_str(&symbol.to_string());
        buf.push(FIELD_SEPARATOR);
        code.write_ascii(&mut buf);
        buf.push(ENTRY_SEPARATOR);
    }

    buf
}


/// Parses a serialized table. Empty fragments between separators are skipped.
/// A symbol listed twice is rejected.
pub fn deserialize_table(text: &str) -> Result<CodeTable, Error> {

    let mut table = CodeTable::new();

    for entry in text.split(ENTRY_SEPARATOR).filter(|entry| !entry.is_empty()) {

        let (symbol, code) = parse_entry(entry)?;

        match table.entry(symbol) {
            Entry::Vacant(slot) => {
                slot.insert(code);
            },
            Entry::Occupied(_) => {
                return Err(FormatError::DuplicateSymbol { symbol }.into());
            }
        }
    }

    Ok(table)
}


fn parse_entry(entry: &str) -> Result<(u8, BitVec), FormatError> {

    let (symbol, code) = entry.split_once(FIELD_SEPARATOR)
        .ok_or_else(|| FormatError::MissingFieldSeparator { entry: entry.to_string() })?;

    // `u8::from_str` would accept a leading '+'
    if symbol.is_empty() || !symbol.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidSymbol { field: symbol.to_string() });
    }

    let symbol: u8 = symbol.parse()
        .map_err(|_| FormatError::InvalidSymbol { field: symbol.to_string() })?;

    match BitVec::from_ascii(code) {
        Some(bits) if !bits.is_empty() => Ok((symbol, bits)),
        _ => Err(FormatError::InvalidCode { symbol, code: code.to_string() })
    }
}


pub fn assemble(table: &str, payload: &str) -> String {

    let mut archive = String::with_capacity(table.len() + DELIMITER.len() + payload.len());

    archive.push_str(table);
    archive.push_str(DELIMITER);
    archive.push_str(payload);

    archive
}


/// Splits an archive into its table and payload segments at the first delimiter.
pub fn split(archive: &str) -> Result<(&str, &str), Error> {
    archive.split_once(DELIMITER)
        .ok_or(Error::Format(FormatError::MissingDelimiter))
}
