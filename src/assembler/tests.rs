// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use super::{assemble_str, Assembler, AssemblyResult, ListingWriter};
use crate::core::report::{AsmErrorKind, AsmRunError};
use crate::core::source_map::{SourceMap, SourceOrigin};
use crate::m65c02::{table, AddressMode, Mnemonic, INSTRUCTION_TABLE};

fn assemble(source: &str) -> AssemblyResult {
    assemble_str(source, None).expect("assembly should succeed")
}

fn assemble_err(source: &str) -> AsmRunError {
    assemble_str(source, None).expect_err("assembly should fail")
}

#[test]
fn hello_world_assembles_to_the_documented_bytes() {
    let result = assemble(".org $1900\nLDA #'A'\nJSR $FFEE\nRTS\n");
    assert_eq!(result.origin, Some(0x1900));
    assert_eq!(result.bytes(), vec![0xA9, 0x41, 0x20, 0xEE, 0xFF, 0x60]);
}

#[test]
fn forward_constant_sizes_as_zero_page() {
    let result = assemble(".org $2000\nLDA FOO\nRTS\nFOO = $70\n");
    assert_eq!(result.bytes(), vec![0xA5, 0x70, 0x60]);
}

#[test]
fn backward_branch_encodes_negative_delta() {
    let result = assemble(".org $1000\nloop:\nNOP\nBNE loop\n");
    assert_eq!(result.bytes(), vec![0xEA, 0xD0, 0xFD]);
}

#[test]
fn emitted_bytes_are_identical_under_constant_reordering() {
    let before = assemble(".org $1000\nK = $70\nLDA K\nsym: RTS\nJMP sym\n");
    let after = assemble(".org $1000\nLDA K\nsym: RTS\nJMP sym\nK = $70\n");
    let before_map: Vec<(u16, u8)> = before.image.entries().collect();
    let after_map: Vec<(u16, u8)> = after.image.entries().collect();
    assert_eq!(before_map, after_map);
    // Zero-page sizing, not absolute.
    assert_eq!(before.bytes()[0], 0xA5);
}

#[test]
fn word_directive_is_little_endian() {
    let result = assemble(".org $1000\n.word $1234\n");
    assert_eq!(result.bytes(), vec![0x34, 0x12]);
}

#[test]
fn byte_and_word_accept_value_lists() {
    let result = assemble(".org $1000\n.byte 1, 2, 'C'\n.word $A, $B\n");
    assert_eq!(
        result.bytes(),
        vec![0x01, 0x02, 0x43, 0x0A, 0x00, 0x0B, 0x00]
    );
}

#[test]
fn text_directive_emits_ascii_bytes() {
    let result = assemble(".org $1900\n.text \"HI\\r\"\n");
    assert_eq!(result.bytes(), vec![b'H', b'I', 0x0D]);
}

#[test]
fn output_directive_records_the_override() {
    let result = assemble(".output \"build/game\"\n.org $1900\nRTS\n");
    assert_eq!(result.output_path.as_deref(), Some("build/game"));
}

#[test]
fn first_org_fixes_the_origin() {
    let result = assemble(".org $1900\nRTS\n.org $2000\nRTS\n");
    assert_eq!(result.origin, Some(0x1900));
}

#[test]
fn multiple_org_regions_produce_a_sparse_map() {
    let result = assemble(".org $1000\n.byte 1\n.org $1010\n.byte 2\n");
    assert_eq!(result.image.num_entries(), 2);
    let bytes = result.bytes();
    assert_eq!(bytes.len(), 0x11);
    assert_eq!(bytes[0x00], 1);
    assert_eq!(bytes[0x01], 0); // gap zero-fill
    assert_eq!(bytes[0x10], 2);
}

#[test]
fn mnemonics_and_symbols_are_case_insensitive() {
    let result = assemble(".org $1000\nValue = $70\nlda value\nsta VALUE\n");
    assert_eq!(result.bytes(), vec![0xA5, 0x70, 0x85, 0x70]);
}

#[test]
fn dotted_labels_share_the_symbol_namespace() {
    let result = assemble(".org $1000\n.loop:\nNOP\nBNE .loop\nJMP loop\n");
    assert_eq!(
        result.bytes(),
        vec![0xEA, 0xD0, 0xFD, 0x4C, 0x00, 0x10]
    );
}

#[test]
fn immediate_operands_wrap_to_the_low_byte() {
    let result = assemble(".org $1000\nLDA #$1FF\n");
    assert_eq!(result.bytes(), vec![0xA9, 0xFF]);
}

#[test]
fn accumulator_and_implied_forms_encode_one_byte() {
    let result = assemble(".org $1000\nINC A\nASL\nDEX\n");
    assert_eq!(result.bytes(), vec![0x1A, 0x0A, 0xCA]);
}

#[test]
fn indirect_operand_forms_resolve_to_their_modes() {
    let result = assemble(
        ".org $1000\nPTR = $70\nLDA (PTR,X)\nLDA (PTR),Y\nLDA (PTR)\nJMP ($1234)\nJMP ($1234,X)\n",
    );
    assert_eq!(
        result.bytes(),
        vec![0xA1, 0x70, 0xB1, 0x70, 0xB2, 0x70, 0x6C, 0x34, 0x12, 0x7C, 0x34, 0x12]
    );
}

#[test]
fn parenthesized_grouping_is_not_mistaken_for_indirection() {
    let result = assemble(".org $1000\nLDA ($60+$10)+1\n");
    assert_eq!(result.bytes(), vec![0xA5, 0x71]);
}

#[test]
fn branch_to_forward_label_within_range() {
    let result = assemble(".org $1000\nBEQ done\nNOP\ndone:\nRTS\n");
    assert_eq!(result.bytes(), vec![0xF0, 0x01, 0xEA, 0x60]);
}

#[test]
fn relative_byte_is_delta_masked_to_eight_bits() {
    // Forward 127 is the far edge of the reachable range.
    let mut source = String::from(".org $1000\nBNE far\n");
    for _ in 0..127 {
        source.push_str("NOP\n");
    }
    source.push_str("far:\nRTS\n");
    let result = assemble(&source);
    assert_eq!(result.bytes()[1], 0x7F);
}

#[test]
fn branch_out_of_range_is_fatal() {
    let mut source = String::from(".org $1000\nBNE far\n");
    for _ in 0..128 {
        source.push_str("NOP\n");
    }
    source.push_str("far:\nRTS\n");
    let err = assemble_err(&source);
    assert_eq!(err.kind(), AsmErrorKind::Semantic);
    assert!(err.diagnostic().message().starts_with("Branch out of range"));
}

#[test]
fn code_before_org_is_fatal() {
    let err = assemble_err("LDA #1\n");
    assert_eq!(err.diagnostic().message(), "Missing .org before code");
}

#[test]
fn label_before_org_is_fatal() {
    let err = assemble_err("start:\n.org $1900\n");
    assert_eq!(err.diagnostic().message(), "Label defined before .org");
}

#[test]
fn undefined_symbol_in_emit_pass_is_fatal() {
    let err = assemble_err(".org $1000\nLDA missing\n");
    assert_eq!(err.kind(), AsmErrorKind::Semantic);
    assert_eq!(err.diagnostic().message(), "Undefined symbol: missing");
    assert_eq!(err.diagnostic().line(), 2);
}

#[test]
fn unknown_directive_is_fatal() {
    let err = assemble_err(".org $1000\n.banana 1\n");
    assert_eq!(err.diagnostic().message(), "Unknown directive: .banana");
}

#[test]
fn unsupported_mode_is_fatal() {
    let err = assemble_err(".org $1000\nSTA #$10\n");
    assert_eq!(
        err.diagnostic().message(),
        "Unsupported addressing mode for STA"
    );
}

#[test]
fn unresolved_include_is_fatal() {
    let err = assemble_err(".org $1000\n.include \"lib.asm\"\n");
    assert_eq!(err.kind(), AsmErrorKind::Include);
}

#[test]
fn invalid_number_is_a_numeric_error() {
    let err = assemble_err(".org $1000\nLDA #%102\n");
    assert_eq!(err.kind(), AsmErrorKind::Numeric);
    assert_eq!(err.diagnostic().message(), "Invalid number: %102");
}

#[test]
fn diagnostics_use_the_file_line_col_prefix() {
    let mut map = SourceMap::default();
    map.push(SourceOrigin::new(Some("main.asm".to_string()), 1));
    map.push(SourceOrigin::new(Some("main.asm".to_string()), 2));
    let lines = vec![".org $1000".to_string(), "LDA missing".to_string()];
    let err = Assembler::new()
        .assemble(&lines, &map)
        .expect_err("assembly should fail");
    let rendered = err.diagnostic().format();
    assert!(
        rendered.starts_with("main.asm(2,5):"),
        "unexpected prefix: {rendered}"
    );
}

#[test]
fn diagnostics_without_a_file_use_line_colon_col() {
    let err = assemble_err(".org $1000\nLDA missing\n");
    assert!(err.diagnostic().format().starts_with("2:5:"));
}

/// Every legal (mnemonic, mode) pair assembles to a byte sequence whose
/// first byte decodes back to the same mnemonic and mode.
#[test]
fn opcode_table_round_trips_through_the_assembler() {
    for entry in INSTRUCTION_TABLE {
        let operand = operand_source(entry.mnemonic, entry.mode);
        let source = format!(".org $1000\n{} {}\n", entry.mnemonic.as_str(), operand);
        let result = assemble_str(&source, None)
            .unwrap_or_else(|err| panic!("{} {operand}: {err}", entry.mnemonic.as_str()));
        let bytes = result.bytes();
        assert_eq!(bytes[0], entry.opcode, "{} {}", entry.mnemonic.as_str(), operand);
        assert_eq!(bytes.len() as u8, entry.size(), "{} {}", entry.mnemonic.as_str(), operand);

        let decoded = table::decode(bytes[0]).expect("emitted opcode should decode");
        assert_eq!(decoded.mnemonic, entry.mnemonic);
        assert_eq!(decoded.mode, entry.mode);
    }
}

fn operand_source(mnemonic: Mnemonic, mode: AddressMode) -> &'static str {
    if mnemonic.is_branch() {
        return "$1001";
    }
    match mode {
        AddressMode::Implied => "",
        AddressMode::Accumulator => "A",
        AddressMode::Immediate => "#$12",
        AddressMode::ZeroPage => "$12",
        AddressMode::ZeroPageX => "$12,X",
        AddressMode::ZeroPageY => "$12,Y",
        AddressMode::Absolute => "$1234",
        AddressMode::AbsoluteX => "$1234,X",
        AddressMode::AbsoluteY => "$1234,Y",
        AddressMode::Indirect => "($1234)",
        AddressMode::IndirectX => "($12,X)",
        AddressMode::IndirectY => "($12),Y",
        AddressMode::ZeroPageIndirect => "($12)",
        AddressMode::AbsoluteIndexedIndirect => "($1234,X)",
        AddressMode::Relative => "$1001",
    }
}

#[test]
fn listing_records_addresses_bytes_and_footer() {
    let lines = vec![
        ".org $1900".to_string(),
        "LDA #'A'".to_string(),
        "RTS".to_string(),
    ];
    let map = SourceMap::default();
    let mut out = Vec::new();
    let mut listing = ListingWriter::new(&mut out);
    listing.header("beebforge listing").expect("header");
    Assembler::new()
        .assemble_listed(&lines, &map, &mut listing)
        .expect("assembly should succeed");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("1900  A9 41"));
    assert!(text.contains("3 lines, 0 errors, 0 warnings"));
}
