// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types, diagnostics, and reporting for the assembler.

use std::fmt;

/// Categories of assembler errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsmErrorKind {
    Lexical,
    Parse,
    Semantic,
    Numeric,
    Include,
    Io,
}

/// An assembler error with a kind and message.
#[derive(Debug, Clone)]
pub struct AsmError {
    kind: AsmErrorKind,
    message: String,
}

impl AsmError {
    pub fn new(kind: AsmErrorKind, msg: &str, param: Option<&str>) -> Self {
        Self {
            kind,
            message: format_error(msg, param),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> AsmErrorKind {
        self.kind
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AsmError {}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A diagnostic message with its original-source location.
///
/// `line` is the 1-based line in the original file once the source map
/// has been applied; `file` is absent for in-memory sources.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    line: u32,
    column: usize,
    file: Option<String>,
    code: String,
    severity: Severity,
    error: AsmError,
}

impl Diagnostic {
    pub fn new(line: u32, severity: Severity, error: AsmError) -> Self {
        Self {
            line,
            column: 1,
            file: None,
            code: default_diagnostic_code(error.kind()).to_string(),
            severity,
            error,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    pub fn with_file(mut self, file: Option<String>) -> Self {
        self.file = file;
        self
    }

    /// Location prefix: `file(line,col)` when the file is known,
    /// `line:col` otherwise.
    pub fn location_prefix(&self) -> String {
        match &self.file {
            Some(file) => format!("{}({},{})", file, self.line, self.column),
            None => format!("{}:{}", self.line, self.column),
        }
    }

    pub fn format(&self) -> String {
        let sev = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        format!(
            "{}: {} [{}] {}",
            self.location_prefix(),
            sev,
            self.code,
            self.error.message()
        )
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn message(&self) -> &str {
        self.error.message()
    }

    pub fn kind(&self) -> AsmErrorKind {
        self.error.kind()
    }
}

/// Error from a failed assembly run. The run aborts on the first error;
/// no partial image is retained.
#[derive(Debug)]
pub struct AsmRunError {
    error: AsmError,
    diagnostic: Diagnostic,
}

impl AsmRunError {
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self {
            error: AsmError::new(diagnostic.kind(), diagnostic.message(), None),
            diagnostic,
        }
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    pub fn kind(&self) -> AsmErrorKind {
        self.error.kind()
    }
}

impl fmt::Display for AsmRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic.format())
    }
}

impl std::error::Error for AsmRunError {}

/// Pass statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassCounts {
    pub lines: u32,
    pub errors: u32,
    pub warnings: u32,
}

impl PassCounts {
    pub fn new() -> Self {
        Self::default()
    }
}

fn default_diagnostic_code(kind: AsmErrorKind) -> &'static str {
    match kind {
        AsmErrorKind::Lexical => "lex001",
        AsmErrorKind::Parse => "par001",
        AsmErrorKind::Semantic => "sem001",
        AsmErrorKind::Numeric => "num001",
        AsmErrorKind::Include => "inc001",
        AsmErrorKind::Io => "io001",
    }
}

/// Format an error message with an optional parameter.
pub fn format_error(msg: &str, param: Option<&str>) -> String {
    match param {
        Some(p) => format!("{msg}: {p}"),
        None => msg.to_string(),
    }
}
