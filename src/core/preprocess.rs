// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Include expander.
//!
//! Replaces `.include "path"` lines with the contents of the referenced
//! file and records one source-map entry per output line, so assembler
//! diagnostics can point at the original file and line.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use crate::core::source_map::{SourceMap, SourceOrigin};

#[derive(Debug)]
pub struct PreprocessError {
    message: String,
    file: Option<String>,
    line: Option<u32>,
}

impl PreprocessError {
    fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            file: None,
            line: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    fn with_context(mut self, file: Option<&str>, line: u32) -> Self {
        if self.line.is_none() {
            self.file = file.map(|f| f.to_string());
            self.line = Some(line);
        }
        self
    }
}

impl fmt::Display for PreprocessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PreprocessError {}

/// Recursive `.include` expander with cycle detection.
///
/// The expander owns its source map and appends to it, so a caller may
/// seed it with an existing map when concatenating several top-level
/// files into one assembly unit.
#[derive(Debug, Default)]
pub struct Preprocessor {
    lines: Vec<String>,
    map: SourceMap,
    expanding: Vec<PathBuf>,
}

impl Preprocessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the expander with a pre-populated source map to append to.
    #[must_use]
    pub fn with_map(map: SourceMap) -> Self {
        Self {
            lines: Vec::new(),
            map,
            expanding: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.map
    }

    pub fn into_parts(self) -> (Vec<String>, SourceMap) {
        (self.lines, self.map)
    }

    /// Expand a top-level source file, inlining its `.include` tree.
    pub fn expand_file(&mut self, path: &Path) -> Result<(), PreprocessError> {
        self.expand_file_internal(path)
    }

    /// Expand in-memory source text. Include paths resolve relative to
    /// `base_dir`; `file` tags the source-map entries.
    pub fn expand_str(
        &mut self,
        text: &str,
        file: Option<&str>,
        base_dir: &Path,
    ) -> Result<(), PreprocessError> {
        let mut line_num: u32 = 0;
        for line in text.lines() {
            line_num += 1;
            self.process_line(line, file, line_num, base_dir)?;
        }
        Ok(())
    }

    fn expand_file_internal(&mut self, path: &Path) -> Result<(), PreprocessError> {
        let canonical = path
            .canonicalize()
            .map_err(|_| PreprocessError::new(format!("Error opening file: {}", path.display())))?;
        if self.expanding.contains(&canonical) {
            return Err(PreprocessError::new(format!(
                "Circular .include: {}",
                path.display()
            )));
        }

        let file = File::open(path)
            .map_err(|_| PreprocessError::new(format!("Error opening file: {}", path.display())))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        let file_name = path.to_string_lossy().to_string();

        self.expanding.push(canonical);
        let result = self.expand_reader(io::BufReader::new(file), &file_name, &base_dir);
        self.expanding.pop();
        result
    }

    fn expand_reader<R: BufRead>(
        &mut self,
        mut reader: R,
        file_name: &str,
        base_dir: &Path,
    ) -> Result<(), PreprocessError> {
        let mut line = String::new();
        let mut line_num: u32 = 0;
        loop {
            line.clear();
            let read = reader.read_line(&mut line).map_err(|_| {
                PreprocessError::new(format!("Error reading file: {file_name}"))
            })?;
            if read == 0 {
                return Ok(());
            }
            line_num += 1;
            match line.as_bytes().last() {
                Some(b'\n') => {
                    line.pop();
                    if line.as_bytes().last() == Some(&b'\r') {
                        line.pop();
                    }
                }
                Some(b'\r') => {
                    line.pop();
                }
                _ => {}
            }
            self.process_line(&line, Some(file_name), line_num, base_dir)?;
        }
    }

    fn process_line(
        &mut self,
        line: &str,
        file: Option<&str>,
        line_num: u32,
        base_dir: &Path,
    ) -> Result<(), PreprocessError> {
        match parse_include(line) {
            Some(Ok(target)) => {
                let path = base_dir.join(target);
                self.expand_file_internal(&path)
                    .map_err(|err| err.with_context(file, line_num))
            }
            Some(Err(message)) => {
                Err(PreprocessError::new(message).with_context(file, line_num))
            }
            None => {
                self.lines.push(line.to_string());
                self.map
                    .push(SourceOrigin::new(file.map(|f| f.to_string()), line_num));
                Ok(())
            }
        }
    }
}

/// Recognize a `.include "path"` line. Leading whitespace and a trailing
/// `;` comment are allowed. Returns `None` for ordinary lines.
fn parse_include(line: &str) -> Option<Result<String, String>> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix('.')?;
    let head = rest.get(..7)?;
    if !head.eq_ignore_ascii_case("include") {
        return None;
    }
    let args = &rest[7..];
    if !args.is_empty() && !args.starts_with(' ') && !args.starts_with('\t') {
        // Something like `.includefoo` is an ordinary identifier line.
        return None;
    }

    let mut args = args.trim();
    if let Some(comment) = find_unquoted(args, b';') {
        args = args[..comment].trim_end();
    }
    let bytes = args.as_bytes();
    let target = match (bytes.first(), bytes.last()) {
        (Some(b'"'), Some(b'"')) if args.len() >= 2 => &args[1..args.len() - 1],
        _ => args,
    };
    if target.is_empty() {
        return Some(Err(".include missing file".to_string()));
    }
    Some(Ok(target.to_string()))
}

fn find_unquoted(s: &str, needle: u8) -> Option<usize> {
    let mut in_quote = false;
    for (ix, &c) in s.as_bytes().iter().enumerate() {
        match c {
            b'"' => in_quote = !in_quote,
            _ if c == needle && !in_quote => return Some(ix),
            _ => {}
        }
    }
    None
}
