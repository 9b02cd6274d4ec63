use crate::parser::lexer::{lex, token_text};

fn snapshot(input: &str) -> String {
    let mut out = String::new();
    for token in lex(input) {
        if !token.kind.is_trivia() {
            out.push_str(&format!("{:?} {:?}\n", token.kind, token_text(input, &token)));
        }
    }
    out
}

#[test]
fn punctuation() {
    insta::assert_snapshot!(snapshot("( ) , * + -"), @r#"
    ParenOpen "("
    ParenClose ")"
    Comma ","
    Star "*"
    Plus "+"
    Minus "-"
    "#);
}

#[test]
fn call_with_dotted_field() {
    insta::assert_snapshot!(snapshot("eq(donor.gender,'male')"), @r#"
    Id "eq"
    ParenOpen "("
    Id "donor.gender"
    Comma ","
    SingleQuote "'"
    StrVal "male"
    SingleQuote "'"
    ParenClose ")"
    "#);
}

#[test]
fn numbers_take_their_sign() {
    insta::assert_snapshot!(snapshot("10 -3 +7 1.5 -0.25"), @r#"
    Int "10"
    Int "-3"
    Int "+7"
    Float "1.5"
    Float "-0.25"
    "#);
}

#[test]
fn sort_signs_before_identifiers() {
    insta::assert_snapshot!(snapshot("sort(-_score,+symbol)"), @r#"
    Id "sort"
    ParenOpen "("
    Minus "-"
    Id "_score"
    Comma ","
    Plus "+"
    Id "symbol"
    ParenClose ")"
    "#);
}

#[test]
fn double_quoted_and_empty_strings() {
    insta::assert_snapshot!(snapshot(r#""a b" ''"#), @r#"
    DoubleQuote "\""
    StrVal "a b"
    DoubleQuote "\""
    SingleQuote "'"
    SingleQuote "'"
    "#);
}

#[test]
fn escaped_quote_stays_in_string() {
    insta::assert_snapshot!(snapshot(r"'it\'s'"), @r#"
    SingleQuote "'"
    StrVal "it\\'s"
    SingleQuote "'"
    "#);
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("eq(a,@#$)"), @r#"
    Id "eq"
    ParenOpen "("
    Id "a"
    Comma ","
    Garbage "@#$"
    ParenClose ")"
    "#);
}

#[test]
fn whitespace_is_trivia() {
    let tokens = lex(" count ( ) ");
    assert_eq!(tokens.len(), 7);
    assert!(tokens[0].kind.is_trivia());
}
