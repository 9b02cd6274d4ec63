//! Syntax kinds shared by the lexer and the CST.
//!
//! Token kinds carry their `logos` patterns; node kinds come after them and
//! have none.

use logos::Logos;
use rowan::Language;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token(",")]
    Comma,

    #[token("*")]
    Star,

    /// Ascending sort marker.
    #[token("+")]
    Plus,

    /// Descending sort marker.
    #[token("-")]
    Minus,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    /// Split by the lexer into quotes and `StrVal`, never emitted.
    #[doc(hidden)]
    StringLiteral,

    DoubleQuote,
    SingleQuote,
    /// String content between quotes
    StrVal,

    /// Signed integer. Defined as a regex so `-1` wins over `Minus` by length.
    #[regex(r"[+-]?[0-9]+")]
    Int,

    #[regex(r"[+-]?[0-9]*\.[0-9]+")]
    Float,

    /// Function names and dotted field paths, `_score` included.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*")]
    Id,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Run of unrecognized characters.
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    /// `name(args...)`
    Call,
    /// `(args...)` of a call
    ArgList,
    /// A string or number literal
    Value,
    /// `+field` or `-field`
    SortKey,
    FieldRef,
    /// `*` as an argument
    AllFields,

    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        self == Whitespace
    }

    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    fn from_raw(raw: u16) -> Option<Self> {
        // SAFETY: `repr(u16)` with contiguous discriminants below `__LAST`
        (raw < __LAST as u16).then(|| unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) })
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Rowan language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PqlLanguage {}

impl Language for PqlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0).unwrap_or_else(|| panic!("unknown syntax kind {}", raw.0))
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<PqlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<PqlLanguage>;

/// Set of token kinds as a bitmask. Token kinds all sit below 64.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            assert!((kinds[i] as u16) < 64, "token kind out of TokenSet range");
            bits |= 1 << kinds[i] as u16;
            i += 1;
        }
        TokenSet(bits)
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        (kind as u16) < 64 && self.0 & (1 << kind as u16) != 0
    }

    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds = (0..64u16)
            .filter(|&bit| self.0 & (1 << bit) != 0)
            .filter_map(SyntaxKind::from_raw);
        f.debug_set().entries(kinds).finish()
    }
}

pub mod token_sets {
    use super::*;

    /// Tokens that start a literal.
    pub const VALUES: TokenSet = TokenSet::new(&[Int, Float, DoubleQuote, SingleQuote]);

    pub const SORT_SIGNS: TokenSet = TokenSet::new(&[Plus, Minus]);

    /// FIRST set of a call argument.
    pub const ARG_FIRST: TokenSet = VALUES.union(SORT_SIGNS).union(TokenSet::new(&[Id, Star]));

    /// Where a broken argument stops swallowing tokens.
    pub const ARG_RECOVERY: TokenSet = TokenSet::new(&[Comma, ParenClose]);

    /// Where a broken top-level clause stops swallowing tokens.
    pub const ROOT_RECOVERY: TokenSet = TokenSet::new(&[Comma, Id]);
}
