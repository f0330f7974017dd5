// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Assembly listing output.

use std::io::{self, Write};

use crate::core::report::PassCounts;
use crate::core::symbol_table::SymbolTable;

const BYTES_PER_ROW: usize = 4;

/// Writes the per-line listing produced during the emit pass.
pub struct ListingWriter<'a> {
    out: &'a mut dyn Write,
}

impl<'a> ListingWriter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out }
    }

    pub fn header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "{title}")?;
        writeln!(self.out)
    }

    /// Write one source line with its address and emitted bytes. Long
    /// emissions (`.text`, `.byte` lists) continue on follow-up rows.
    pub fn write_line(
        &mut self,
        addr: u16,
        bytes: &[u8],
        line_num: u32,
        source: &str,
    ) -> io::Result<()> {
        let first = render_bytes(&bytes[..bytes.len().min(BYTES_PER_ROW)]);
        writeln!(
            self.out,
            "{line_num:>5}  {addr:04X}  {first:<width$}  {source}",
            width = BYTES_PER_ROW * 3 - 1
        )?;

        let mut row_addr = addr.wrapping_add(BYTES_PER_ROW as u16);
        for chunk in bytes.chunks(BYTES_PER_ROW).skip(1) {
            writeln!(self.out, "       {row_addr:04X}  {}", render_bytes(chunk))?;
            row_addr = row_addr.wrapping_add(BYTES_PER_ROW as u16);
        }
        Ok(())
    }

    pub fn footer(&mut self, counts: &PassCounts, symbols: &SymbolTable) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} lines, {} errors, {} warnings",
            counts.lines, counts.errors, counts.warnings
        )?;
        if symbols.is_empty() {
            return Ok(());
        }

        writeln!(self.out)?;
        let mut entries = symbols.entries().to_vec();
        entries.sort_by(|left, right| {
            left.name
                .to_ascii_lowercase()
                .cmp(&right.name.to_ascii_lowercase())
        });
        for entry in entries {
            writeln!(self.out, "{:<16} = ${:04X}", entry.name, entry.val)?;
        }
        Ok(())
    }
}

fn render_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::ListingWriter;
    use crate::core::report::PassCounts;
    use crate::core::symbol_table::SymbolTable;

    #[test]
    fn lines_carry_address_bytes_and_source() {
        let mut out = Vec::new();
        let mut listing = ListingWriter::new(&mut out);
        listing
            .write_line(0x1900, &[0xA9, 0x41], 2, "LDA #'A'")
            .expect("write should succeed");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "    2  1900  A9 41        LDA #'A'\n");
    }

    #[test]
    fn long_emissions_continue_on_follow_up_rows() {
        let mut out = Vec::new();
        let mut listing = ListingWriter::new(&mut out);
        listing
            .write_line(0x2000, &[1, 2, 3, 4, 5, 6], 1, ".byte 1,2,3,4,5,6")
            .expect("write should succeed");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("01 02 03 04"));
        assert!(lines[1].contains("2004  05 06"));
    }

    #[test]
    fn footer_reports_counts_and_sorted_symbols() {
        let mut symbols = SymbolTable::new();
        symbols.set("zeta", 0x0002);
        symbols.set("Alpha", 0x1900);
        let counts = PassCounts {
            lines: 4,
            errors: 0,
            warnings: 0,
        };

        let mut out = Vec::new();
        let mut listing = ListingWriter::new(&mut out);
        listing.footer(&counts, &symbols).expect("footer");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("4 lines, 0 errors, 0 warnings"));
        let alpha = text.find("Alpha").expect("Alpha listed");
        let zeta = text.find("zeta").expect("zeta listed");
        assert!(alpha < zeta, "symbols should sort case-insensitively");
        assert!(text.contains("= $1900"));
    }
}
