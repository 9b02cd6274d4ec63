//! Internal consistency checks. A failure here is a parser bug, never bad input.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::ast::Root;
use super::core::Parser;
use super::cst::{SyntaxKind, SyntaxNode};

/// Lookaheads allowed between two consumed tokens.
pub(super) const STALL_LIMIT: u32 = 256;

impl Parser<'_> {
    #[inline]
    pub(super) fn check_progress(&self) {
        let left = self.stall.get();
        assert!(left != 0, "parser made no progress in {STALL_LIMIT} lookaheads");
        self.stall.set(left - 1);
    }

    #[inline]
    pub(super) fn assert_current(&mut self, kind: SyntaxKind) {
        let found = self.current();
        assert_eq!(found, kind, "caller must check for {kind:?} before parsing it");
    }

    #[inline]
    pub(super) fn assert_not_eof(&mut self) {
        assert!(!self.at_eof(), "token consumed past end of input");
    }
}

pub(super) fn ensure_root(node: SyntaxNode) -> Root {
    Root::cast(node).unwrap_or_else(|| panic!("tree is not rooted at Root"))
}
