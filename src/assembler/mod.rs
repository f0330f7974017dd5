// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Two-phase 65C02 assembler.
//!
//! Addressing-mode sizing depends on operand values, which may depend on
//! symbols defined later in the source. The assembler therefore runs two
//! label-collection passes before the emit pass:
//!
//! 1. Pass 1a sizes instructions with whatever symbols are already known,
//!    recording labels at the addresses reached. Forward references
//!    resolve to 0x100, which forces absolute sizing.
//! 2. Pass 1b repeats the traversal seeded with pass 1a's symbol table,
//!    settling zero-page versus absolute sizing globally and re-recording
//!    every label address.
//! 3. The emit pass encodes bytes; undefined symbols are now fatal.
//!
//! Assembly aborts on the first error and retains no partial image.

pub mod listing;
pub mod output;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::core::expr::{
    eval_expr, parse_expr, EvalContext, EvalErrorKind, Expr,
};
use crate::core::imagestore::ImageStore;
use crate::core::preprocess::Preprocessor;
use crate::core::report::{AsmError, AsmErrorKind, AsmRunError, Diagnostic, PassCounts, Severity};
use crate::core::source_map::SourceMap;
use crate::core::symbol_table::SymbolTable;
use crate::core::tokenizer::{tokenize_line, Token, TokenKind};
use crate::m65c02::{table, AddressMode, Mnemonic};

pub use listing::ListingWriter;

/// Value an undefined symbol takes during a collection pass. Above the
/// zero page, so forward references size as absolute.
const UNRESOLVED_SYMBOL_VALUE: i64 = 0x100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Collect,
    Emit,
}

/// Result of a successful assembly run.
#[derive(Debug, Default)]
pub struct AssemblyResult {
    /// First address assigned via `.org`.
    pub origin: Option<u16>,
    /// Output path override from `.output`, if any.
    pub output_path: Option<String>,
    /// Sparse address/byte image.
    pub image: ImageStore,
}

impl AssemblyResult {
    /// Contiguous `[min, max]` byte slice with gaps zero-filled.
    pub fn bytes(&self) -> Vec<u8> {
        self.image.to_bytes()
    }
}

struct PassState {
    pc: u16,
    org_seen: bool,
    origin: Option<u16>,
    output_path: Option<String>,
}

struct PassOutput {
    origin: Option<u16>,
    output_path: Option<String>,
    counts: PassCounts,
}

/// A failed line: error kind, message, and 1-based column.
struct LineFail {
    kind: AsmErrorKind,
    message: String,
    column: usize,
}

impl LineFail {
    fn new(kind: AsmErrorKind, message: impl Into<String>, column: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            column,
        }
    }
}

/// Operand form as written in the source, before mode resolution.
enum OperandForm {
    None,
    Accumulator,
    Immediate(Expr),
    Direct(Expr),
    DirectX(Expr),
    DirectY(Expr),
    IndirectX(Expr),
    IndirectY(Expr),
    Indirect(Expr),
    Relative(Expr),
}

pub struct Assembler {
    symbols: SymbolTable,
    image: ImageStore,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            image: ImageStore::new(),
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Assemble expanded source lines. `map` translates expanded line
    /// numbers back to original files for diagnostics.
    pub fn assemble(
        &mut self,
        lines: &[String],
        map: &SourceMap,
    ) -> Result<AssemblyResult, AsmRunError> {
        self.assemble_inner(lines, map, None)
    }

    /// Assemble while writing an assembly listing during the emit pass.
    pub fn assemble_listed(
        &mut self,
        lines: &[String],
        map: &SourceMap,
        listing: &mut ListingWriter<'_>,
    ) -> Result<AssemblyResult, AsmRunError> {
        self.assemble_inner(lines, map, Some(listing))
    }

    fn assemble_inner(
        &mut self,
        lines: &[String],
        map: &SourceMap,
        mut listing: Option<&mut ListingWriter<'_>>,
    ) -> Result<AssemblyResult, AsmRunError> {
        self.symbols.clear();
        self.image = ImageStore::new();

        self.run_pass(lines, map, Pass::Collect, None)?;
        self.run_pass(lines, map, Pass::Collect, None)?;
        let reborrowed = listing.as_mut().map(|l| &mut **l);
        let outcome = self.run_pass(lines, map, Pass::Emit, reborrowed)?;

        if let Some(listing) = listing {
            listing
                .footer(&outcome.counts, &self.symbols)
                .map_err(|err| {
                    self.diagnose(map, outcome.counts.lines, AsmErrorKind::Io, &err.to_string(), 1)
                })?;
        }

        Ok(AssemblyResult {
            origin: outcome.origin,
            output_path: outcome.output_path,
            image: std::mem::take(&mut self.image),
        })
    }

    fn run_pass(
        &mut self,
        lines: &[String],
        map: &SourceMap,
        pass: Pass,
        mut listing: Option<&mut ListingWriter<'_>>,
    ) -> Result<PassOutput, AsmRunError> {
        let mut state = PassState {
            pc: 0,
            org_seen: false,
            origin: None,
            output_path: None,
        };
        let mut counts = PassCounts::new();

        for (ix, src) in lines.iter().enumerate() {
            let line_num = ix as u32 + 1;
            counts.lines += 1;

            let tokens = tokenize_line(src, line_num).map_err(|err| {
                let column = err.span.col_start;
                self.diagnose(map, line_num, AsmErrorKind::Lexical, &err.message, column)
            })?;

            let (addr, bytes) = self
                .process_line(&tokens, &mut state, pass)
                .map_err(|fail| {
                    counts.errors += 1;
                    self.diagnose(map, line_num, fail.kind, &fail.message, fail.column)
                })?;

            if pass == Pass::Emit {
                if !bytes.is_empty() {
                    self.image.store_slice(addr, &bytes);
                }
                if let Some(listing) = listing.as_mut() {
                    listing.write_line(addr, &bytes, line_num, src).map_err(|err| {
                        self.diagnose(map, line_num, AsmErrorKind::Io, &err.to_string(), 1)
                    })?;
                }
            }
        }

        Ok(PassOutput {
            origin: state.origin,
            output_path: state.output_path,
            counts,
        })
    }

    fn diagnose(
        &self,
        map: &SourceMap,
        line_num: u32,
        kind: AsmErrorKind,
        message: &str,
        column: usize,
    ) -> AsmRunError {
        let (file, line) = map.resolve(line_num);
        let diag = Diagnostic::new(line, Severity::Error, AsmError::new(kind, message, None))
            .with_column(column.max(1))
            .with_file(file.map(|f| f.to_string()));
        AsmRunError::new(diag)
    }

    /// Process one statement line. Returns the address the line's bytes
    /// start at and the bytes themselves (empty for non-emitting lines).
    fn process_line(
        &mut self,
        tokens: &[Token],
        state: &mut PassState,
        pass: Pass,
    ) -> Result<(u16, Vec<u8>), LineFail> {
        let mut pos = 0;

        // Label definitions: `name:` or `.name:`, possibly several.
        loop {
            match label_at(tokens, pos) {
                Some((name, width, column)) => {
                    if !state.org_seen {
                        return Err(LineFail::new(
                            AsmErrorKind::Semantic,
                            "Label defined before .org",
                            column,
                        ));
                    }
                    self.symbols.set(&name, state.pc);
                    pos += width;
                }
                None => break,
            }
        }

        let addr = state.pc;
        match kind_at(tokens, pos) {
            TokenKind::End => Ok((addr, Vec::new())),
            TokenKind::Dot => self.process_directive(tokens, pos, state, pass),
            TokenKind::Identifier(name) if kind_at(tokens, pos + 1) == TokenKind::Equals => {
                self.process_constant(&name, tokens, pos + 2, pass)?;
                Ok((addr, Vec::new()))
            }
            TokenKind::Identifier(name) => {
                self.process_instruction(&name, tokens, pos, state, pass)
            }
            _ => Err(LineFail::new(
                AsmErrorKind::Parse,
                "Unexpected token",
                column_at(tokens, pos),
            )),
        }
    }

    /// Handle `NAME = expr`; `pos` is positioned after the equals sign.
    fn process_constant(
        &mut self,
        name: &str,
        tokens: &[Token],
        mut pos: usize,
        pass: Pass,
    ) -> Result<(), LineFail> {
        let expr = parse_operand_expr(tokens, &mut pos)?;
        expect_end(tokens, pos)?;
        let val = self.eval(&expr, pass)?;
        if !(0..=0xFFFF).contains(&val) {
            return Err(LineFail::new(
                AsmErrorKind::Numeric,
                format!("Value out of 16-bit range: {val}"),
                column_at(tokens, pos),
            ));
        }
        self.symbols.set(name, val as u16);
        Ok(())
    }

    fn process_directive(
        &mut self,
        tokens: &[Token],
        mut pos: usize,
        state: &mut PassState,
        pass: Pass,
    ) -> Result<(u16, Vec<u8>), LineFail> {
        let dot_column = column_at(tokens, pos);
        pos += 1;
        let name = match &tokens.get(pos).map(|t| &t.kind) {
            Some(TokenKind::Identifier(name)) => name.to_ascii_lowercase(),
            _ => {
                return Err(LineFail::new(
                    AsmErrorKind::Parse,
                    "Expected directive name after '.'",
                    dot_column,
                ))
            }
        };
        pos += 1;

        match name.as_str() {
            "org" => {
                let expr = parse_operand_expr(tokens, &mut pos)?;
                expect_end(tokens, pos)?;
                let val = self.eval(&expr, pass)?;
                if !(0..=0xFFFF).contains(&val) {
                    return Err(LineFail::new(
                        AsmErrorKind::Numeric,
                        format!("Address out of 16-bit range: {val}"),
                        dot_column,
                    ));
                }
                state.pc = val as u16;
                state.org_seen = true;
                if state.origin.is_none() {
                    state.origin = Some(state.pc);
                }
                Ok((state.pc, Vec::new()))
            }
            "byte" | "word" => {
                self.require_org(state, dot_column)?;
                let addr = state.pc;
                let mut bytes = Vec::new();
                loop {
                    let expr = parse_operand_expr(tokens, &mut pos)?;
                    let val = self.eval(&expr, pass)?;
                    if name == "byte" {
                        bytes.push((val & 0xFF) as u8);
                    } else {
                        bytes.push((val & 0xFF) as u8);
                        bytes.push(((val >> 8) & 0xFF) as u8);
                    }
                    match kind_at(tokens, pos) {
                        TokenKind::Comma => pos += 1,
                        _ => break,
                    }
                }
                expect_end(tokens, pos)?;
                state.pc = state.pc.wrapping_add(bytes.len() as u16);
                Ok((addr, bytes))
            }
            "text" => {
                self.require_org(state, dot_column)?;
                let addr = state.pc;
                let bytes = match tokens.get(pos).map(|t| &t.kind) {
                    Some(TokenKind::Str(lit)) => lit.bytes.clone(),
                    _ => {
                        return Err(LineFail::new(
                            AsmErrorKind::Parse,
                            "Expected string after .text",
                            column_at(tokens, pos),
                        ))
                    }
                };
                pos += 1;
                expect_end(tokens, pos)?;
                state.pc = state.pc.wrapping_add(bytes.len() as u16);
                Ok((addr, bytes))
            }
            "output" => {
                match tokens.get(pos).map(|t| &t.kind) {
                    Some(TokenKind::Str(lit)) => {
                        state.output_path =
                            Some(String::from_utf8_lossy(&lit.bytes).to_string());
                    }
                    _ => {
                        return Err(LineFail::new(
                            AsmErrorKind::Parse,
                            "Expected string after .output",
                            column_at(tokens, pos),
                        ))
                    }
                }
                pos += 1;
                expect_end(tokens, pos)?;
                Ok((state.pc, Vec::new()))
            }
            "include" => Err(LineFail::new(
                AsmErrorKind::Include,
                "Unresolved .include; includes must be expanded before assembly",
                dot_column,
            )),
            _ => Err(LineFail::new(
                AsmErrorKind::Semantic,
                format!("Unknown directive: .{name}"),
                dot_column,
            )),
        }
    }

    fn process_instruction(
        &mut self,
        text: &str,
        tokens: &[Token],
        mut pos: usize,
        state: &mut PassState,
        pass: Pass,
    ) -> Result<(u16, Vec<u8>), LineFail> {
        let column = column_at(tokens, pos);
        let mnemonic = Mnemonic::parse(text).ok_or_else(|| {
            LineFail::new(
                AsmErrorKind::Semantic,
                format!("Unknown instruction: {text}"),
                column,
            )
        })?;
        self.require_org(state, column)?;
        pos += 1;

        let form = parse_operand_form(tokens, &mut pos, mnemonic)?;
        expect_end(tokens, pos)?;

        let (mode, value) = self.resolve_operand(mnemonic, &form, state, pass, column)?;
        let entry = table::lookup(mnemonic, mode).ok_or_else(|| {
            LineFail::new(
                AsmErrorKind::Semantic,
                format!("Unsupported addressing mode for {}", mnemonic.as_str()),
                column,
            )
        })?;

        let addr = state.pc;
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        bytes.push(entry.opcode);
        match mode.operand_size() {
            0 => {}
            1 => bytes.push((value & 0xFF) as u8),
            _ => {
                bytes.push((value & 0xFF) as u8);
                bytes.push(((value >> 8) & 0xFF) as u8);
            }
        }
        state.pc = state.pc.wrapping_add(entry.size() as u16);

        if pass == Pass::Collect {
            return Ok((addr, Vec::new()));
        }
        Ok((addr, bytes))
    }

    /// Map an operand form and its evaluated value to an addressing mode.
    fn resolve_operand(
        &self,
        mnemonic: Mnemonic,
        form: &OperandForm,
        state: &PassState,
        pass: Pass,
        column: usize,
    ) -> Result<(AddressMode, i64), LineFail> {
        let unsupported = || {
            LineFail::new(
                AsmErrorKind::Semantic,
                format!("Unsupported addressing mode for {}", mnemonic.as_str()),
                column,
            )
        };
        let has = |mode| table::has_mode(mnemonic, mode);

        match form {
            OperandForm::None => {
                if has(AddressMode::Implied) {
                    Ok((AddressMode::Implied, 0))
                } else if has(AddressMode::Accumulator) {
                    Ok((AddressMode::Accumulator, 0))
                } else {
                    Err(unsupported())
                }
            }
            OperandForm::Accumulator => {
                if has(AddressMode::Accumulator) {
                    Ok((AddressMode::Accumulator, 0))
                } else {
                    Err(unsupported())
                }
            }
            OperandForm::Immediate(expr) => {
                let val = self.eval(expr, pass)?;
                Ok((AddressMode::Immediate, val & 0xFF))
            }
            OperandForm::Direct(expr) => {
                let val = self.eval(expr, pass)?;
                self.direct_mode(val, AddressMode::ZeroPage, AddressMode::Absolute, &has)
                    .map(|mode| (mode, val))
                    .ok_or_else(unsupported)
            }
            OperandForm::DirectX(expr) => {
                let val = self.eval(expr, pass)?;
                self.direct_mode(val, AddressMode::ZeroPageX, AddressMode::AbsoluteX, &has)
                    .map(|mode| (mode, val))
                    .ok_or_else(unsupported)
            }
            OperandForm::DirectY(expr) => {
                let val = self.eval(expr, pass)?;
                self.direct_mode(val, AddressMode::ZeroPageY, AddressMode::AbsoluteY, &has)
                    .map(|mode| (mode, val))
                    .ok_or_else(unsupported)
            }
            OperandForm::IndirectX(expr) => {
                let val = self.eval(expr, pass)?;
                let wants_absolute = !(0..=0xFF).contains(&val);
                if has(AddressMode::AbsoluteIndexedIndirect)
                    && (wants_absolute || !has(AddressMode::IndirectX))
                {
                    Ok((AddressMode::AbsoluteIndexedIndirect, val))
                } else if has(AddressMode::IndirectX) {
                    Ok((AddressMode::IndirectX, val))
                } else {
                    Err(unsupported())
                }
            }
            OperandForm::IndirectY(expr) => {
                let val = self.eval(expr, pass)?;
                if has(AddressMode::IndirectY) {
                    Ok((AddressMode::IndirectY, val))
                } else {
                    Err(unsupported())
                }
            }
            OperandForm::Indirect(expr) => {
                let val = self.eval(expr, pass)?;
                if (0..=0xFF).contains(&val) && has(AddressMode::ZeroPageIndirect) {
                    Ok((AddressMode::ZeroPageIndirect, val))
                } else if has(AddressMode::Indirect) {
                    Ok((AddressMode::Indirect, val))
                } else if has(AddressMode::ZeroPageIndirect) {
                    Ok((AddressMode::ZeroPageIndirect, val))
                } else {
                    Err(unsupported())
                }
            }
            OperandForm::Relative(expr) => {
                let target = self.eval(expr, pass)?;
                if pass == Pass::Collect {
                    // Size is fixed; the delta is checked when emitting.
                    return Ok((AddressMode::Relative, 0));
                }
                let next = state.pc.wrapping_add(2) as i64;
                let delta = target - next;
                if !(-128..=127).contains(&delta) {
                    return Err(LineFail::new(
                        AsmErrorKind::Semantic,
                        format!("Branch out of range: {delta}"),
                        column,
                    ));
                }
                Ok((AddressMode::Relative, delta & 0xFF))
            }
        }
    }

    fn direct_mode(
        &self,
        val: i64,
        zero_page: AddressMode,
        absolute: AddressMode,
        has: &dyn Fn(AddressMode) -> bool,
    ) -> Option<AddressMode> {
        if (0..=0xFF).contains(&val) && has(zero_page) {
            return Some(zero_page);
        }
        if (0..=0xFFFF).contains(&val) && has(absolute) {
            return Some(absolute);
        }
        None
    }

    fn require_org(&self, state: &PassState, column: usize) -> Result<(), LineFail> {
        if state.org_seen {
            return Ok(());
        }
        Err(LineFail::new(
            AsmErrorKind::Semantic,
            "Missing .org before code",
            column,
        ))
    }

    fn eval(&self, expr: &Expr, pass: Pass) -> Result<i64, LineFail> {
        let result = match pass {
            Pass::Collect => eval_expr(
                expr,
                &CollectCtx {
                    symbols: &self.symbols,
                },
            ),
            Pass::Emit => eval_expr(
                expr,
                &EmitCtx {
                    symbols: &self.symbols,
                },
            ),
        };
        result.map_err(|err| {
            let kind = match err.kind {
                EvalErrorKind::Numeric => AsmErrorKind::Numeric,
                EvalErrorKind::Symbol => AsmErrorKind::Semantic,
            };
            LineFail::new(kind, err.message, err.span.col_start)
        })
    }
}

/// Collection-pass context: undefined symbols resolve to a value above
/// the zero page so forward references size as absolute.
struct CollectCtx<'a> {
    symbols: &'a SymbolTable,
}

impl EvalContext for CollectCtx<'_> {
    fn lookup_symbol(&self, name: &str) -> Option<i64> {
        Some(
            self.symbols
                .lookup(name)
                .map(i64::from)
                .unwrap_or(UNRESOLVED_SYMBOL_VALUE),
        )
    }
}

/// Emit-pass context: undefined symbols are fatal.
struct EmitCtx<'a> {
    symbols: &'a SymbolTable,
}

impl EvalContext for EmitCtx<'_> {
    fn lookup_symbol(&self, name: &str) -> Option<i64> {
        self.symbols.lookup(name).map(i64::from)
    }
}

/// Recognize a label definition at `pos`: `name:` or `.name:`.
/// Returns the label name, token count consumed, and column.
fn label_at(tokens: &[Token], pos: usize) -> Option<(String, usize, usize)> {
    match (kind_at(tokens, pos), kind_at(tokens, pos + 1)) {
        (TokenKind::Identifier(name), TokenKind::Colon) => {
            Some((name, 2, column_at(tokens, pos)))
        }
        (TokenKind::Dot, TokenKind::Identifier(name)) => {
            if kind_at(tokens, pos + 2) == TokenKind::Colon {
                Some((name, 3, column_at(tokens, pos)))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn kind_at(tokens: &[Token], pos: usize) -> TokenKind {
    tokens
        .get(pos)
        .map(|t| t.kind.clone())
        .unwrap_or(TokenKind::End)
}

fn column_at(tokens: &[Token], pos: usize) -> usize {
    tokens.get(pos).map(|t| t.span.col_start).unwrap_or(1)
}

fn expect_end(tokens: &[Token], pos: usize) -> Result<(), LineFail> {
    match kind_at(tokens, pos) {
        TokenKind::End => Ok(()),
        _ => Err(LineFail::new(
            AsmErrorKind::Parse,
            "Unexpected token",
            column_at(tokens, pos),
        )),
    }
}

fn parse_operand_expr(tokens: &[Token], pos: &mut usize) -> Result<Expr, LineFail> {
    parse_expr(tokens, pos)
        .map_err(|err| LineFail::new(AsmErrorKind::Parse, err.message, err.span.col_start))
}

/// Parse the operand's source form per the addressing-mode table.
fn parse_operand_form(
    tokens: &[Token],
    pos: &mut usize,
    mnemonic: Mnemonic,
) -> Result<OperandForm, LineFail> {
    if kind_at(tokens, *pos) == TokenKind::End {
        return Ok(OperandForm::None);
    }

    // Branches always take a relative target expression.
    if mnemonic.is_branch() {
        let expr = parse_operand_expr(tokens, pos)?;
        return Ok(OperandForm::Relative(expr));
    }

    // Bare `A` selects the accumulator when the instruction has that form.
    if let TokenKind::Identifier(name) = kind_at(tokens, *pos) {
        if name.eq_ignore_ascii_case("A")
            && kind_at(tokens, *pos + 1) == TokenKind::End
            && table::has_mode(mnemonic, AddressMode::Accumulator)
        {
            *pos += 1;
            return Ok(OperandForm::Accumulator);
        }
    }

    match kind_at(tokens, *pos) {
        TokenKind::Hash => {
            *pos += 1;
            let expr = parse_operand_expr(tokens, pos)?;
            Ok(OperandForm::Immediate(expr))
        }
        TokenKind::OpenParen => parse_paren_form(tokens, pos),
        _ => {
            let expr = parse_operand_expr(tokens, pos)?;
            parse_index_suffix(tokens, pos, expr)
        }
    }
}

/// Disambiguate `(expr,X)`, `(expr),Y`, `(expr)`, and a parenthesized
/// plain expression such as `(BASE+1)-LOW`.
fn parse_paren_form(tokens: &[Token], pos: &mut usize) -> Result<OperandForm, LineFail> {
    let start = *pos;
    *pos += 1;
    let expr = parse_operand_expr(tokens, pos)?;
    match kind_at(tokens, *pos) {
        TokenKind::Comma => {
            *pos += 1;
            expect_register(tokens, pos, "X")?;
            expect_kind(tokens, pos, TokenKind::CloseParen, "Expected ')'")?;
            Ok(OperandForm::IndirectX(expr))
        }
        TokenKind::CloseParen => {
            *pos += 1;
            match kind_at(tokens, *pos) {
                TokenKind::Comma => {
                    *pos += 1;
                    expect_register(tokens, pos, "Y")?;
                    Ok(OperandForm::IndirectY(expr))
                }
                TokenKind::End => Ok(OperandForm::Indirect(expr)),
                _ => {
                    // Trailing operators mean the parens were grouping, not
                    // indirection. Reparse the whole operand as a plain
                    // expression.
                    *pos = start;
                    let expr = parse_operand_expr(tokens, pos)?;
                    parse_index_suffix(tokens, pos, expr)
                }
            }
        }
        _ => Err(LineFail::new(
            AsmErrorKind::Parse,
            "Expected ')' or ',' in operand",
            column_at(tokens, *pos),
        )),
    }
}

fn parse_index_suffix(
    tokens: &[Token],
    pos: &mut usize,
    expr: Expr,
) -> Result<OperandForm, LineFail> {
    if kind_at(tokens, *pos) != TokenKind::Comma {
        return Ok(OperandForm::Direct(expr));
    }
    *pos += 1;
    match kind_at(tokens, *pos) {
        TokenKind::Identifier(name) if name.eq_ignore_ascii_case("X") => {
            *pos += 1;
            Ok(OperandForm::DirectX(expr))
        }
        TokenKind::Identifier(name) if name.eq_ignore_ascii_case("Y") => {
            *pos += 1;
            Ok(OperandForm::DirectY(expr))
        }
        _ => Err(LineFail::new(
            AsmErrorKind::Parse,
            "Expected X or Y after ','",
            column_at(tokens, *pos),
        )),
    }
}

fn expect_register(tokens: &[Token], pos: &mut usize, register: &str) -> Result<(), LineFail> {
    match kind_at(tokens, *pos) {
        TokenKind::Identifier(name) if name.eq_ignore_ascii_case(register) => {
            *pos += 1;
            Ok(())
        }
        _ => Err(LineFail::new(
            AsmErrorKind::Parse,
            format!("Expected {register} register"),
            column_at(tokens, *pos),
        )),
    }
}

fn expect_kind(
    tokens: &[Token],
    pos: &mut usize,
    kind: TokenKind,
    message: &str,
) -> Result<(), LineFail> {
    if kind_at(tokens, *pos) == kind {
        *pos += 1;
        return Ok(());
    }
    Err(LineFail::new(
        AsmErrorKind::Parse,
        message,
        column_at(tokens, *pos),
    ))
}

/// Expand and assemble in-memory source text in one call. Include paths
/// resolve relative to the current directory.
pub fn assemble_str(source: &str, file: Option<&str>) -> Result<AssemblyResult, AsmRunError> {
    let mut pp = Preprocessor::new();
    pp.expand_str(source, file, Path::new(".")).map_err(|err| {
        let diag = Diagnostic::new(
            err.line().unwrap_or(0),
            Severity::Error,
            AsmError::new(AsmErrorKind::Include, err.message(), None),
        )
        .with_file(err.file().map(|f| f.to_string()));
        AsmRunError::new(diag)
    })?;
    let (lines, map) = pp.into_parts();
    Assembler::new().assemble(&lines, &map)
}
