use pretty_assertions::assert_eq;

use super::prelude::{source_chars, stream_chars, Lexer, Token, TokenKind};
use crate::utils::prelude::SrcSpan;

fn lex(input: &str) -> Lexer<impl Iterator<Item = (u32, char)> + '_> {
    Lexer::new(source_chars(input))
}

fn assert_tokens(input: &str, expected: &[(TokenKind, &str)]) {
    let mut lexer = lex(input);

    for (idx, (kind, literal)) in expected.iter().enumerate() {
        let token = lexer.next_token();

        assert_eq!(
            (*kind, *literal), (token.kind, token.literal.as_str()),
            "Next token does not match expected token at {}", idx
        );
    }
}

#[test]
fn test_punctuation() {
    assert_tokens("=+(){},;", &[
        (TokenKind::Assign, "="),
        (TokenKind::Plus, "+"),
        (TokenKind::LParen, "("),
        (TokenKind::RParen, ")"),
        (TokenKind::LBrace, "{"),
        (TokenKind::RBrace, "}"),
        (TokenKind::Comma, ","),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Eof, ""),
    ]);
}

#[test]
fn test_input() {
    let input = r#"
        let five = 5;
        let ten = 10;

        let add = fn(x, y) {
            x + y;
        };

        !-/*5;
        5 < 10 > 5;

        if (5 < 10) {
            return true;
        } else {
            return false;
        }

        10 == 10;
        10 != 9;
    "#;

    assert_tokens(input, &[
        (TokenKind::Let, "let"),
        (TokenKind::Ident, "five"),
        (TokenKind::Assign, "="),
        (TokenKind::Int, "5"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Let, "let"),
        (TokenKind::Ident, "ten"),
        (TokenKind::Assign, "="),
        (TokenKind::Int, "10"),
        (TokenKind::Semicolon, ";"),

        (TokenKind::Let, "let"),
        (TokenKind::Ident, "add"),
        (TokenKind::Assign, "="),
        (TokenKind::Function, "fn"),
        (TokenKind::LParen, "("),
        (TokenKind::Ident, "x"),
        (TokenKind::Comma, ","),
        (TokenKind::Ident, "y"),
        (TokenKind::RParen, ")"),
        (TokenKind::LBrace, "{"),
        (TokenKind::Ident, "x"),
        (TokenKind::Plus, "+"),
        (TokenKind::Ident, "y"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::RBrace, "}"),
        (TokenKind::Semicolon, ";"),

        (TokenKind::Bang, "!"),
        (TokenKind::Minus, "-"),
        (TokenKind::Slash, "/"),
        (TokenKind::Asterisk, "*"),
        (TokenKind::Int, "5"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Int, "5"),
        (TokenKind::LessThan, "<"),
        (TokenKind::Int, "10"),
        (TokenKind::GreaterThan, ">"),
        (TokenKind::Int, "5"),
        (TokenKind::Semicolon, ";"),

        (TokenKind::If, "if"),
        (TokenKind::LParen, "("),
        (TokenKind::Int, "5"),
        (TokenKind::LessThan, "<"),
        (TokenKind::Int, "10"),
        (TokenKind::RParen, ")"),
        (TokenKind::LBrace, "{"),
        (TokenKind::Return, "return"),
        (TokenKind::True, "true"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::RBrace, "}"),
        (TokenKind::Else, "else"),
        (TokenKind::LBrace, "{"),
        (TokenKind::Return, "return"),
        (TokenKind::False, "false"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::RBrace, "}"),

        (TokenKind::Int, "10"),
        (TokenKind::Equal, "=="),
        (TokenKind::Int, "10"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Int, "10"),
        (TokenKind::NotEqual, "!="),
        (TokenKind::Int, "9"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Eof, ""),
    ]);
}

#[test]
fn test_identifiers() {
    assert_tokens("foo_bar _x x1 letter iffy 12ab", &[
        (TokenKind::Ident, "foo_bar"),
        (TokenKind::Ident, "_x"),
        (TokenKind::Ident, "x1"),
        (TokenKind::Ident, "letter"),
        (TokenKind::Ident, "iffy"),
        (TokenKind::Int, "12"),
        (TokenKind::Ident, "ab"),
        (TokenKind::Eof, ""),
    ]);
}

#[test]
fn test_illegal() {
    assert_tokens("a @ b ? é", &[
        (TokenKind::Ident, "a"),
        (TokenKind::Illegal, "@"),
        (TokenKind::Ident, "b"),
        (TokenKind::Illegal, "?"),
        (TokenKind::Illegal, "é"),
        (TokenKind::Eof, ""),
    ]);
}

#[test]
fn test_eof_repeats() {
    let mut lexer = lex("x");

    assert_eq!(TokenKind::Ident, lexer.next_token().kind);

    for _ in 0..3 {
        assert_eq!(Token::eof(1), lexer.next_token());
    }
}

#[test]
fn test_iterator_stops_after_eof() {
    let kinds = lex("1 + 2")
        .map(|token| token.kind)
        .collect::<Vec<TokenKind>>();

    assert_eq!(
        vec![TokenKind::Int, TokenKind::Plus, TokenKind::Int, TokenKind::Eof],
        kinds
    );
}

#[test]
fn test_locations() {
    let tokens = lex("let éa = 10 != 9;").collect::<Vec<Token>>();

    let spans = tokens.iter()
        .map(|token| token.location)
        .collect::<Vec<SrcSpan>>();

    assert_eq!(
        vec![
            SrcSpan::from(0, 3),
            SrcSpan::from(4, 6),
            SrcSpan::from(6, 7),
            SrcSpan::from(8, 9),
            SrcSpan::from(10, 12),
            SrcSpan::from(13, 15),
            SrcSpan::from(16, 17),
            SrcSpan::from(17, 18),
            SrcSpan::from(18, 18),
        ],
        spans
    );
}

#[test]
fn test_stream_matches_source() {
    let input = "if (a != b) { return -1; }";

    let from_source = lex(input).collect::<Vec<Token>>();
    let from_stream = Lexer::new(stream_chars(input.chars())).collect::<Vec<Token>>();

    assert_eq!(from_source, from_stream);
}

#[test]
fn test_tokenize_is_repeatable() {
    let kinds = |src: &str| crate::tokenize(src)
        .into_iter()
        .map(|token| token.kind)
        .collect::<Vec<TokenKind>>();

    let expected = vec![
        TokenKind::Let, TokenKind::Ident, TokenKind::Assign, TokenKind::Int,
        TokenKind::Semicolon, TokenKind::Eof,
    ];

    assert_eq!(expected, kinds("let a = 1;"));
    assert_eq!(expected, kinds("let a = 1;"));
    assert_eq!(vec![TokenKind::Eof], kinds(""));
}
