//! Tokenizer.
//!
//! Tokens are a kind plus a span; text is sliced out of the source on demand.
//! A run of characters no rule matches becomes a single `Garbage` token, and
//! a quoted string comes out as opening quote, content, closing quote.

use std::ops::Range;

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    fn new(kind: SyntaxKind, start: usize, end: usize) -> Self {
        let offset = |n: usize| TextSize::from(n as u32);
        Self {
            kind,
            span: TextRange::new(offset(start), offset(end)),
        }
    }
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut garbage_from: Option<usize> = None;

    for (result, span) in SyntaxKind::lexer(source).spanned() {
        let Ok(kind) = result else {
            garbage_from.get_or_insert(span.start);
            continue;
        };
        if let Some(start) = garbage_from.take() {
            tokens.push(Token::new(SyntaxKind::Garbage, start, span.start));
        }

        if kind == SyntaxKind::StringLiteral {
            push_string(source, span, &mut tokens);
        } else {
            tokens.push(Token::new(kind, span.start, span.end));
        }
    }

    if let Some(start) = garbage_from {
        tokens.push(Token::new(SyntaxKind::Garbage, start, source.len()));
    }
    tokens
}

fn push_string(source: &str, span: Range<usize>, tokens: &mut Vec<Token>) {
    let quote = if source.as_bytes()[span.start] == b'"' {
        SyntaxKind::DoubleQuote
    } else {
        SyntaxKind::SingleQuote
    };
    let content = span.start + 1..span.end - 1;

    tokens.push(Token::new(quote, span.start, content.start));
    if !content.is_empty() {
        tokens.push(Token::new(SyntaxKind::StrVal, content.start, content.end));
    }
    tokens.push(Token::new(quote, content.end, span.end));
}

pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span]
}
