// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Number and expression primitives.
//!
//! Operand expressions are additive only: primaries joined by `+` and `-`,
//! left-associative, no precedence distinction. Symbol resolution goes
//! through [`EvalContext`] so the assembler can decide what an undefined
//! symbol means for the current pass.

use crate::core::tokenizer::{Span, Token, TokenKind};

/// Parse a numeric literal: `$hex`, `%bin`, or decimal.
pub fn parse_number(text: &str) -> Option<i64> {
    let (digits, base) = match text.as_bytes().first() {
        Some(b'$') => (&text[1..], 16),
        Some(b'%') => (&text[1..], 2),
        _ => (text, 10),
    };
    if digits.is_empty() {
        return None;
    }
    i64::from_str_radix(digits, base).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(String, Span),
    Char(u8, Span),
    Identifier(String, Span),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
}

pub fn expr_span(expr: &Expr) -> Span {
    match expr {
        Expr::Number(_, span) | Expr::Char(_, span) | Expr::Identifier(_, span) => *span,
        Expr::Binary { span, .. } => *span,
    }
}

#[derive(Debug, Clone)]
pub struct ExprParseError {
    pub message: String,
    pub span: Span,
}

/// Parse an additive expression from a token slice, advancing `pos`.
pub fn parse_expr(tokens: &[Token], pos: &mut usize) -> Result<Expr, ExprParseError> {
    let mut left = parse_primary(tokens, pos)?;
    loop {
        let op = match peek(tokens, *pos) {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            _ => return Ok(left),
        };
        let op_span = tokens[*pos].span;
        *pos += 1;
        let right = parse_primary(tokens, pos)?;
        left = Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span: op_span,
        };
    }
}

fn parse_primary(tokens: &[Token], pos: &mut usize) -> Result<Expr, ExprParseError> {
    let token = match tokens.get(*pos) {
        Some(token) => token,
        None => {
            return Err(ExprParseError {
                message: "Expected expression".to_string(),
                span: Span::default(),
            })
        }
    };
    match &token.kind {
        TokenKind::Number(num) => {
            *pos += 1;
            Ok(Expr::Number(num.text.clone(), token.span))
        }
        TokenKind::Char(c) => {
            *pos += 1;
            Ok(Expr::Char(*c, token.span))
        }
        TokenKind::Identifier(name) => {
            *pos += 1;
            Ok(Expr::Identifier(name.clone(), token.span))
        }
        // `.name` looks up the same namespace as `name`.
        TokenKind::Dot => {
            *pos += 1;
            match tokens.get(*pos).map(|t| &t.kind) {
                Some(TokenKind::Identifier(name)) => {
                    let span = tokens[*pos].span;
                    *pos += 1;
                    Ok(Expr::Identifier(name.clone(), span))
                }
                _ => Err(ExprParseError {
                    message: "Expected identifier after '.'".to_string(),
                    span: token.span,
                }),
            }
        }
        TokenKind::OpenParen => {
            *pos += 1;
            let inner = parse_expr(tokens, pos)?;
            match peek(tokens, *pos) {
                TokenKind::CloseParen => {
                    *pos += 1;
                    Ok(inner)
                }
                _ => Err(ExprParseError {
                    message: "Expected ')' in expression".to_string(),
                    span: token.span,
                }),
            }
        }
        _ => Err(ExprParseError {
            message: "Expected expression".to_string(),
            span: token.span,
        }),
    }
}

fn peek(tokens: &[Token], pos: usize) -> TokenKind {
    tokens
        .get(pos)
        .map(|t| t.kind.clone())
        .unwrap_or(TokenKind::End)
}

/// Error returned from expression evaluation.
#[derive(Debug, Clone)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalErrorKind {
    Numeric,
    Symbol,
}

/// Context for expression evaluation.
pub trait EvalContext {
    /// Look up a symbol's value by name.
    fn lookup_symbol(&self, name: &str) -> Option<i64>;
}

/// Evaluate an expression to a numeric value.
pub fn eval_expr(expr: &Expr, ctx: &dyn EvalContext) -> Result<i64, EvalError> {
    match expr {
        Expr::Number(text, span) => parse_number(text).ok_or_else(|| EvalError {
            kind: EvalErrorKind::Numeric,
            message: format!("Invalid number: {}", text),
            span: *span,
        }),

        Expr::Char(c, _) => Ok(*c as i64),

        Expr::Identifier(name, span) => {
            ctx.lookup_symbol(name).ok_or_else(|| EvalError {
                kind: EvalErrorKind::Symbol,
                message: format!("Undefined symbol: {}", name),
                span: *span,
            })
        }

        Expr::Binary {
            op, left, right, ..
        } => {
            let l = eval_expr(left, ctx)?;
            let r = eval_expr(right, ctx)?;
            Ok(match op {
                BinaryOp::Add => l.wrapping_add(r),
                BinaryOp::Sub => l.wrapping_sub(r),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::tokenize_line;
    use std::collections::HashMap;

    struct TestCtx {
        values: HashMap<String, i64>,
    }

    impl EvalContext for TestCtx {
        fn lookup_symbol(&self, name: &str) -> Option<i64> {
            self.values.get(&name.to_ascii_uppercase()).copied()
        }
    }

    fn eval(src: &str, values: &[(&str, i64)]) -> Result<i64, EvalError> {
        let tokens = tokenize_line(src, 1).expect("tokenize should succeed");
        let mut pos = 0;
        let expr = parse_expr(&tokens, &mut pos).expect("parse should succeed");
        let ctx = TestCtx {
            values: values
                .iter()
                .map(|(name, val)| (name.to_string(), *val))
                .collect(),
        };
        eval_expr(&expr, &ctx)
    }

    #[test]
    fn parses_all_number_bases() {
        assert_eq!(parse_number("$1f"), Some(0x1f));
        assert_eq!(parse_number("%1010"), Some(10));
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number("$"), None);
        assert_eq!(parse_number("%102"), None);
        assert_eq!(parse_number("12ab"), None);
    }

    #[test]
    fn additive_chain_is_left_associative() {
        assert_eq!(eval("10-4+2", &[]).expect("eval"), 8);
    }

    #[test]
    fn char_literals_evaluate_to_their_byte() {
        assert_eq!(eval("'A'+1", &[]).expect("eval"), 0x42);
    }

    #[test]
    fn dotted_lookup_shares_the_symbol_namespace() {
        assert_eq!(eval(".loop+2", &[("LOOP", 0x1900)]).expect("eval"), 0x1902);
    }

    #[test]
    fn parenthesized_subexpressions_group() {
        assert_eq!(eval("10-(4+2)", &[]).expect("eval"), 4);
    }

    #[test]
    fn undefined_symbol_reports_symbol_kind() {
        let err = eval("missing", &[]).expect_err("should fail");
        assert_eq!(err.kind, EvalErrorKind::Symbol);
        assert_eq!(err.message, "Undefined symbol: missing");
    }

    #[test]
    fn invalid_number_reports_numeric_kind() {
        let err = eval("$zz", &[]).expect_err("should fail");
        assert_eq!(err.kind, EvalErrorKind::Numeric);
    }
}
