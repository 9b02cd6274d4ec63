use crate::parser::cst::{PqlLanguage, SyntaxKind::*, TokenSet};
use crate::parser::cst::token_sets::{ARG_FIRST, SORT_SIGNS, VALUES};
use rowan::Language;

#[test]
fn token_set_contains() {
    let set = TokenSet::new(&[ParenOpen, ParenClose, Star]);
    assert!(set.contains(ParenOpen));
    assert!(set.contains(ParenClose));
    assert!(set.contains(Star));
    assert!(!set.contains(Plus));
    assert!(!set.contains(Comma));
}

#[test]
fn token_set_union() {
    let set = TokenSet::new(&[ParenOpen, ParenClose]).union(SORT_SIGNS);
    assert!(set.contains(ParenOpen));
    assert!(set.contains(Minus));
    assert!(!set.contains(Star));
    assert!(!TokenSet::new(&[]).contains(Star));
}

#[test]
fn value_tokens_start_arguments() {
    for kind in [Int, Float, SingleQuote, DoubleQuote] {
        assert!(VALUES.contains(kind));
        assert!(ARG_FIRST.contains(kind));
    }
    assert!(!VALUES.contains(Id));
}

#[test]
fn node_kinds_are_outside_token_sets() {
    assert!(!ARG_FIRST.contains(Call));
    assert!(!TokenSet::new(&[Whitespace]).contains(__LAST));
}

#[test]
fn trivia_and_errors() {
    assert!(Whitespace.is_trivia());
    assert!(!Id.is_trivia());
    assert!(Garbage.is_error());
    assert!(Error.is_error());
    assert!(!Value.is_error());
}

#[test]
fn kind_round_trips_through_rowan() {
    for kind in [ParenOpen, Id, Root, Call, AllFields] {
        assert_eq!(PqlLanguage::kind_from_raw(PqlLanguage::kind_to_raw(kind)), kind);
    }
}

#[test]
fn token_set_debug() {
    insta::assert_snapshot!(format!("{:?}", TokenSet::new(&[Comma, ParenClose])), @"{ParenClose, Comma}");
}
