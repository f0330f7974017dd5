// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Label exports for the debugger UI.

use std::io::{self, Write};

use serde_json::json;

use crate::core::symbol_table::SymbolTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFormat {
    Text,
    Json,
}

/// Write the symbol table, sorted by name, as `NAME = $XXXX` lines or as
/// a JSON object the debugger can ingest.
pub fn write_labels(
    out: &mut dyn Write,
    symbols: &SymbolTable,
    format: LabelFormat,
) -> io::Result<()> {
    let mut entries = symbols.entries().to_vec();
    entries.sort_by(|left, right| {
        left.name
            .to_ascii_lowercase()
            .cmp(&right.name.to_ascii_lowercase())
    });

    match format {
        LabelFormat::Text => {
            for entry in entries {
                writeln!(out, "{} = ${:04X}", entry.name, entry.val)?;
            }
            Ok(())
        }
        LabelFormat::Json => {
            let labels: Vec<serde_json::Value> = entries
                .into_iter()
                .map(|entry| {
                    json!({
                        "name": entry.name,
                        "address": format!("{:04X}", entry.val),
                        "value": entry.val,
                    })
                })
                .collect();
            writeln!(out, "{}", json!({ "labels": labels }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{write_labels, LabelFormat};
    use crate::core::symbol_table::SymbolTable;

    fn table() -> SymbolTable {
        let mut symbols = SymbolTable::new();
        symbols.set("start", 0x1900);
        symbols.set("OSWRCH", 0xFFEE);
        symbols
    }

    #[test]
    fn text_labels_are_sorted_by_name() {
        let mut out = Vec::new();
        write_labels(&mut out, &table(), LabelFormat::Text).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "OSWRCH = $FFEE\nstart = $1900\n");
    }

    #[test]
    fn json_labels_carry_name_address_and_value() {
        let mut out = Vec::new();
        write_labels(&mut out, &table(), LabelFormat::Json).expect("write");
        let parsed: serde_json::Value =
            serde_json::from_slice(&out).expect("output should be valid JSON");
        let labels = parsed["labels"].as_array().expect("labels array");
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1]["name"], "start");
        assert_eq!(labels[1]["address"], "1900");
        assert_eq!(labels[1]["value"], 0x1900);
    }
}
