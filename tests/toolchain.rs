// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! End-to-end toolchain tests: source text through the assembler onto a
//! DFS disk and into the stepping CPU.

use std::fs;

use beebforge::assembler::{assemble_str, Assembler};
use beebforge::cpu::disasm::disassemble;
use beebforge::cpu::Cpu;
use beebforge::dfs::{
    build_autoboot_side, build_dsd, patch_template, read_catalog, validate, DfsImageBuilder,
    SideOrdering, SECTOR_SIZE, SIDE_SIZE,
};
use beebforge::preprocess::Preprocessor;

const DEMO_SOURCE: &str = ".org $1900\nstart:\nLDA #'A'\nJSR $FFEE\nBRK\n";

#[test]
fn assemble_boot_and_step_a_program() {
    let result = assemble_str(DEMO_SOURCE, Some("demo.asm")).expect("assembly should succeed");
    let origin = result.origin.expect("origin should be set");
    assert_eq!(origin, 0x1900);
    let program = result.bytes();
    assert_eq!(program, vec![0xA9, 0x41, 0x20, 0xEE, 0xFF, 0x00]);

    // Put the object code on an auto-booting disk and read it back.
    let image = build_autoboot_side("DEMO", '$', "DEMO", &program, origin as u32, origin as u32)
        .expect("disk build should succeed");
    validate(&image).expect("image should validate");
    let catalog = read_catalog(&image).expect("catalog should parse");
    let entry = catalog
        .entries
        .iter()
        .find(|entry| entry.name == "DEMO")
        .expect("DEMO should be cataloged");
    assert_eq!(entry.load_addr, 0x1900);
    assert_eq!(entry.length, program.len() as u32);

    // Pull the payload back off the disk and run it.
    let start = entry.start_sector as usize * SECTOR_SIZE;
    let payload = &image[start..start + entry.length as usize];
    let mut cpu = Cpu::new();
    cpu.load(origin, payload);
    cpu.reset(origin);

    assert_eq!(cpu.step(), 2);
    assert_eq!(cpu.a, 0x41);
    assert_eq!(cpu.step(), 6); // JSR $FFEE skipped, MOS not emulated
    assert_eq!(cpu.pc, 0x1905);
    cpu.step();
    assert!(cpu.halted);
    assert_eq!(cpu.step(), 0);
}

#[test]
fn disassembly_matches_the_assembled_source() {
    let result = assemble_str(DEMO_SOURCE, None).expect("assembly should succeed");
    let mut cpu = Cpu::new();
    cpu.load(0x1900, &result.bytes());

    let mut addr = 0x1900u16;
    let mut lines = Vec::new();
    for _ in 0..3 {
        let d = disassemble(cpu.mem(), addr);
        addr = addr.wrapping_add(d.size as u16);
        lines.push(d.text);
    }
    assert_eq!(lines, vec!["LDA #$41", "JSR $FFEE  [OSWRCH]", "BRK"]);
}

#[test]
fn include_expansion_feeds_the_assembler_with_mapped_diagnostics() {
    let dir = {
        let mut dir = std::env::temp_dir();
        dir.push(format!("beebforge-e2e-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        dir
    };
    fs::write(dir.join("charmap.asm"), "GLYPH = $70\n").expect("write include");
    let main = dir.join("main.asm");
    fs::write(
        &main,
        ".org $1900\n.include \"charmap.asm\"\nLDA GLYPH\nRTS\n",
    )
    .expect("write main");

    let mut pp = Preprocessor::new();
    pp.expand_file(&main).expect("expansion should succeed");
    let (lines, map) = pp.into_parts();

    let result = Assembler::new()
        .assemble(&lines, &map)
        .expect("assembly should succeed");
    // GLYPH is in the zero page, so the load is two bytes.
    assert_eq!(result.bytes(), vec![0xA5, 0x70, 0x60]);

    // An error inside the main file maps back to its original line.
    fs::write(&main, ".org $1900\n.include \"charmap.asm\"\nLDA nope\n").expect("rewrite");
    let mut pp = Preprocessor::new();
    pp.expand_file(&main).expect("expansion should succeed");
    let (lines, map) = pp.into_parts();
    let err = Assembler::new()
        .assemble(&lines, &map)
        .expect_err("assembly should fail");
    let diag = err.diagnostic();
    assert!(diag.file().expect("file should be set").ends_with("main.asm"));
    assert_eq!(diag.line(), 3);
}

#[test]
fn patched_template_boots_the_new_payload() {
    // Author a template with a placeholder HELLO, then patch real code in.
    let placeholder = vec![0u8; 64];
    let mut builder = DfsImageBuilder::create_blank("TEMPLATE", 0).expect("create");
    builder
        .add_file('$', "!BOOT", b"*RUN $.HELLO\r", 0, 0, true)
        .expect("boot");
    builder
        .add_file('$', "HELLO", &placeholder, 0x1100, 0x1100, false)
        .expect("placeholder");
    let template = builder.into_image();

    let result = assemble_str(DEMO_SOURCE, None).expect("assembly should succeed");
    let program = result.bytes();
    let patched =
        patch_template(&template, &program, 0x1900, 0x1900).expect("patch should succeed");

    let catalog = read_catalog(&patched).expect("catalog should parse");
    let hello = catalog
        .entries
        .iter()
        .find(|entry| entry.name == "HELLO")
        .expect("HELLO survives the patch");
    assert_eq!(hello.length, program.len() as u32);
    assert_eq!(hello.exec_addr, 0x1900);

    let start = hello.start_sector as usize * SECTOR_SIZE;
    assert_eq!(&patched[start..start + program.len()], &program[..]);

    // The boot file and catalog meta are byte-identical to the template.
    assert_eq!(&patched[..8], &template[..8]);
    let boot_start = 2 * SECTOR_SIZE;
    assert_eq!(
        &patched[boot_start..boot_start + 13],
        &template[boot_start..boot_start + 13]
    );
}

#[test]
fn double_sided_image_carries_two_bootable_sides() {
    let game = assemble_str(".org $1900\nLDA #1\nBRK\n", None).expect("assemble");
    let tools = assemble_str(".org $2000\nLDX #2\nBRK\n", None).expect("assemble");

    let side0 =
        build_autoboot_side("GAME", '$', "GAME", &game.bytes(), 0x1900, 0x1900).expect("side 0");
    let side1 =
        build_autoboot_side("TOOLS", '$', "TOOLS", &tools.bytes(), 0x2000, 0x2000).expect("side 1");

    let dsd = build_dsd(&side0, &side1, SideOrdering::TrackInterleaved).expect("dsd");
    assert_eq!(dsd.len(), 2 * SIDE_SIZE);

    // Track 0 of each side holds that side's catalog.
    let track_len = 10 * SECTOR_SIZE;
    let cat0 = read_catalog(&dsd[..track_len]).expect("catalog 0");
    let cat1 = read_catalog(&dsd[track_len..2 * track_len]).expect("catalog 1");
    assert_eq!(cat0.title, "GAME");
    assert_eq!(cat1.title, "TOOLS");
}

#[test]
fn assembler_output_path_override_reaches_the_caller() {
    let result = assemble_str(
        ".output \"images/game.ssd\"\n.org $1900\nRTS\n",
        None,
    )
    .expect("assembly should succeed");
    assert_eq!(result.output_path.as_deref(), Some("images/game.ssd"));
}
