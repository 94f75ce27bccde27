// tests/lexer_tests.rs

use tagquery::ast::TokenKind;
use tagquery::lexer::{LexError, Lexer, tokenize};

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

// ============================================================================
// Operators and Punctuation
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("(", TokenKind::LParen),
        (")", TokenKind::RParen),
        ("*", TokenKind::Star),
        ("!", TokenKind::Bang),
        ("<", TokenKind::Lt),
        (">", TokenKind::Gt),
    ];

    for (input, expected) in test_cases {
        assert_eq!(kinds(input), vec![expected, TokenKind::Eof], "Failed for input: {}", input);
    }
}

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        ("==", TokenKind::EqEq),
        ("!=", TokenKind::NotEq),
        ("<=", TokenKind::LtEq),
        (">=", TokenKind::GtEq),
        ("&&", TokenKind::AndAnd),
        ("||", TokenKind::OrOr),
    ];

    for (input, expected) in test_cases {
        assert_eq!(kinds(input), vec![expected, TokenKind::Eof], "Failed for input: {}", input);
    }
}

#[test]
fn test_two_char_vs_single_char() {
    assert_eq!(
        kinds("! !="),
        vec![TokenKind::Bang, TokenKind::NotEq, TokenKind::Eof]
    );
    assert_eq!(
        kinds("< <= >="),
        vec![TokenKind::Lt, TokenKind::LtEq, TokenKind::GtEq, TokenKind::Eof]
    );
    assert_eq!(kinds("!!"), vec![TokenKind::Bang, TokenKind::Bang, TokenKind::Eof]);
}

#[test]
fn test_lone_ampersand_pipe_equals_are_invalid() {
    for (input, ch) in [("&", '&'), ("|", '|'), ("=", '=')] {
        assert_eq!(
            tokenize(input),
            Err(LexError::UnexpectedCharacter {
                position: 0,
                character: ch
            })
        );
    }
}

// ============================================================================
// Tag References
// ============================================================================

#[test]
fn test_tag_ref() {
    assert_eq!(
        kinds("tag.person.alice"),
        vec![TokenKind::TagRef("person.alice".into()), TokenKind::Eof]
    );
}

#[test]
fn test_tag_ref_lowercased() {
    assert_eq!(
        kinds("tag.Person.ALICE"),
        vec![TokenKind::TagRef("person.alice".into()), TokenKind::Eof]
    );
}

#[test]
fn test_tag_ref_with_underscores_and_digits() {
    assert_eq!(
        kinds("tag.location.has_lat_lon tag.cam2"),
        vec![
            TokenKind::TagRef("location.has_lat_lon".into()),
            TokenKind::TagRef("cam2".into()),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_tag_ref_trailing_dot_kept() {
    assert_eq!(
        kinds("tag.scene.outdoor.*"),
        vec![
            TokenKind::TagRef("scene.outdoor.".into()),
            TokenKind::Star,
            TokenKind::Eof
        ]
    );
    assert_eq!(
        kinds("tag.scene.outdoor*"),
        vec![
            TokenKind::TagRef("scene.outdoor".into()),
            TokenKind::Star,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_tag_ref_rejects_non_ascii() {
    assert_eq!(
        tokenize("tag.place.café"),
        Err(LexError::UnexpectedCharacter {
            position: 13,
            character: 'é'
        })
    );
}

#[test]
fn test_tag_prefix_is_case_sensitive() {
    assert_eq!(
        tokenize("TAG.person"),
        Err(LexError::UnexpectedCharacter {
            position: 0,
            character: 'T'
        })
    );
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_strings() {
    assert_eq!(
        kinds(r#""Alice" 'Bob'"#),
        vec![
            TokenKind::String("Alice".into()),
            TokenKind::String("Bob".into()),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_strings_keep_other_quote_and_backslash() {
    assert_eq!(
        kinds(r#""it's" 'say "hi"' "a\n""#),
        vec![
            TokenKind::String("it's".into()),
            TokenKind::String("say \"hi\"".into()),
            TokenKind::String("a\\n".into()),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        tokenize("tag.a == 'x)"),
        Err(LexError::UnterminatedString {
            position: 9,
            quote: '\''
        })
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        kinds("2018 -4 40.71 -73.5 0"),
        vec![
            TokenKind::Integer(2018),
            TokenKind::Integer(-4),
            TokenKind::Float(40.71),
            TokenKind::Float(-73.5),
            TokenKind::Integer(0),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_number_with_second_dot_stops() {
    let result = tokenize("1.2.3");
    assert_eq!(
        result,
        Err(LexError::UnexpectedCharacter {
            position: 3,
            character: '.'
        })
    );
}

#[test]
fn test_integer_overflow() {
    let result = tokenize("99999999999999999999");
    assert!(matches!(result, Err(LexError::InvalidNumber { position: 0, .. })));
}

#[test]
fn test_bare_minus_is_invalid() {
    assert!(matches!(
        tokenize("- 3"),
        Err(LexError::UnexpectedCharacter { character: '-', .. })
    ));
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("true false None"),
        vec![
            TokenKind::Boolean(true),
            TokenKind::Boolean(false),
            TokenKind::None,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_keywords_are_whole_words() {
    assert!(tokenize("trueish").is_err());
    assert!(tokenize("Nonesuch").is_err());
    assert!(tokenize("none").is_err());
    assert!(tokenize("TRUE").is_err());
}

// ============================================================================
// Whole Expressions and Positions
// ============================================================================

#[test]
fn test_comparison_without_spaces() {
    assert_eq!(
        kinds(r#"tag.person=="alice""#),
        vec![
            TokenKind::TagRef("person".into()),
            TokenKind::EqEq,
            TokenKind::String("alice".into()),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_positions() {
    let tokens = tokenize("tag.a && !(tag.b)").unwrap();
    let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![0, 6, 9, 10, 11, 16, 17]);
}

#[test]
fn test_positions_count_characters() {
    // 'é' is two bytes but one character
    let tokens = tokenize("tag.city == 'é' && tag.b").unwrap();
    assert_eq!(tokens[3].kind, TokenKind::AndAnd);
    assert_eq!(tokens[3].position, 16);
}

#[test]
fn test_whitespace_only() {
    assert_eq!(kinds("  \t\n "), vec![TokenKind::Eof]);
    assert_eq!(tokenize("   ").unwrap()[0].position, 3);
}

#[test]
fn test_next_token_streaming() {
    let mut lexer = Lexer::new("tag.a||tag.b");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::TagRef("a".into()));
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::OrOr);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::TagRef("b".into()));
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_error_message() {
    let err = tokenize("tag.a # tag.b").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected character '#' at position 6");
    assert_eq!(err.position(), 6);
}
