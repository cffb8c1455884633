//! Go lexer using chumsky
//!
//! Turns source text into tokens with byte spans, then applies Go's
//! automatic semicolon insertion so the token parser sees the same
//! statement boundaries the Go compiler does.

use std::fmt;
use std::path::Path;

use chumsky::prelude::*;
use tracing::trace;

use crate::core::chumsky_utils::{line_column, trivia, BYTE_ORDER_MARK};
use crate::core::ExtractError;

/// A Go token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    // Keywords the parser cares about
    Package,
    Import,
    Type,
    Struct,
    Interface,
    Map,
    Chan,
    Func,
    Var,
    Const,

    /// Identifier, including keywords that only appear in bodies
    Ident(String),
    /// Integer, floating point, or imaginary literal
    Number(String),
    /// Interpreted or raw string literal, quotes included
    Str(String),
    /// Rune literal, quotes included
    Char(String),

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Dot,
    Ellipsis,
    Star,
    /// `<-`
    Arrow,
    /// `=`
    Assign,
    Tilde,
    Pipe,
    /// Any other operator
    Op(String),
}

impl Token {
    /// Whether a line ending after this token terminates a statement
    fn ends_statement(&self) -> bool {
        match self {
            Token::Ident(_)
            | Token::Number(_)
            | Token::Str(_)
            | Token::Char(_)
            | Token::RParen
            | Token::RBracket
            | Token::RBrace => true,
            Token::Op(op) => op == "++" || op == "--",
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Package => write!(f, "package"),
            Token::Import => write!(f, "import"),
            Token::Type => write!(f, "type"),
            Token::Struct => write!(f, "struct"),
            Token::Interface => write!(f, "interface"),
            Token::Map => write!(f, "map"),
            Token::Chan => write!(f, "chan"),
            Token::Func => write!(f, "func"),
            Token::Var => write!(f, "var"),
            Token::Const => write!(f, "const"),
            Token::Ident(s) | Token::Number(s) | Token::Str(s) | Token::Char(s) | Token::Op(s) => {
                write!(f, "{}", s)
            }
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Dot => write!(f, "."),
            Token::Ellipsis => write!(f, "..."),
            Token::Star => write!(f, "*"),
            Token::Arrow => write!(f, "<-"),
            Token::Assign => write!(f, "="),
            Token::Tilde => write!(f, "~"),
            Token::Pipe => write!(f, "|"),
        }
    }
}

/// A token and the byte range it covers
pub type Spanned<T> = (T, SimpleSpan);

/// Token stream of one file, ready for the token parser
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    /// Byte spans, parallel to `tokens`
    pub spans: Vec<SimpleSpan>,
}

impl TokenStream {
    /// Byte offset where the token at `index` starts; past the end maps to
    /// the end of the last token
    pub fn offset_of(&self, index: usize) -> usize {
        match self.spans.get(index) {
            Some(span) => span.start,
            None => self.spans.last().map(|s| s.end).unwrap_or(0),
        }
    }
}

fn keyword_or_ident(word: &str) -> Token {
    match word {
        "package" => Token::Package,
        "import" => Token::Import,
        "type" => Token::Type,
        "struct" => Token::Struct,
        "interface" => Token::Interface,
        "map" => Token::Map,
        "chan" => Token::Chan,
        "func" => Token::Func,
        "var" => Token::Var,
        "const" => Token::Const,
        other => Token::Ident(other.to_string()),
    }
}

fn punctuation(op: &str) -> Token {
    match op {
        "(" => Token::LParen,
        ")" => Token::RParen,
        "{" => Token::LBrace,
        "}" => Token::RBrace,
        "[" => Token::LBracket,
        "]" => Token::RBracket,
        "," => Token::Comma,
        ";" => Token::Semicolon,
        "." => Token::Dot,
        "..." => Token::Ellipsis,
        "*" => Token::Star,
        "<-" => Token::Arrow,
        "=" => Token::Assign,
        "~" => Token::Tilde,
        "|" => Token::Pipe,
        other => Token::Op(other.to_string()),
    }
}

/// Character-level lexer producing spanned tokens (before semicolon insertion)
pub fn lexer<'src>(
) -> impl Parser<'src, &'src str, Vec<Spanned<Token>>, extra::Err<Rich<'src, char>>> {
    let word = any()
        .filter(|c: &char| c.is_alphabetic() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_alphanumeric() || *c == '_')
                .repeated(),
        )
        .to_slice()
        .map(keyword_or_ident);

    // Loose on purpose: digits, letters, `_`, `.`, and signed exponents cover
    // every Go numeric literal form.
    let number = one_of("0123456789")
        .then(
            choice((
                one_of("eEpP").then(one_of("+-")).ignored(),
                any()
                    .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
                    .ignored(),
            ))
            .repeated(),
        )
        .to_slice()
        .map(|s: &str| Token::Number(s.to_string()));

    let escape = just('\\').then(any()).ignored();

    let string = just('"')
        .then(choice((escape.clone(), none_of("\"\\\n").ignored())).repeated())
        .then(just('"'))
        .to_slice()
        .map(|s: &str| Token::Str(s.to_string()))
        .labelled("string literal");

    let raw_string = just('`')
        .then(none_of("`").repeated())
        .then(just('`'))
        .to_slice()
        .map(|s: &str| Token::Str(s.to_string()))
        .labelled("raw string literal");

    let rune = just('\'')
        .then(choice((escape, none_of("'\\\n").ignored())).repeated().at_least(1))
        .then(just('\''))
        .to_slice()
        .map(|s: &str| Token::Char(s.to_string()))
        .labelled("rune literal");

    // Longest operators first
    let operator = choice((
        choice((
            just("<<="),
            just(">>="),
            just("&^="),
            just("..."),
            just("&&"),
            just("||"),
            just("<-"),
            just("++"),
            just("--"),
            just("=="),
            just("!="),
            just("<="),
            just(">="),
            just(":="),
        ))
        .ignored(),
        choice((
            just("+="),
            just("-="),
            just("*="),
            just("/="),
            just("%="),
            just("&="),
            just("|="),
            just("^="),
            just("<<"),
            just(">>"),
            just("&^"),
        ))
        .ignored(),
        one_of("+-*/%&|^<>=!~:.,;()[]{}").ignored(),
    ))
    .to_slice()
    .map(punctuation);

    let token = choice((word, number, string, raw_string, rune, operator));

    trivia()
        .ignore_then(
            token
                .map_with(|tok, e| (tok, e.span()))
                .then_ignore(trivia())
                .repeated()
                .collect(),
        )
        .then_ignore(end())
}

/// Apply Go's semicolon insertion rule
///
/// A `;` is inserted after a line's final token when that token is an
/// identifier, a literal, one of `break continue fallthrough return`, or one
/// of `++ -- ) ] }`. A block comment spanning lines counts as a line break.
/// A semicolon is also inserted at end of input under the same rule.
pub fn insert_semicolons(source: &str, tokens: Vec<Spanned<Token>>) -> Vec<Spanned<Token>> {
    let mut out: Vec<Spanned<Token>> = Vec::with_capacity(tokens.len() + tokens.len() / 4);
    let mut iter = tokens.into_iter().peekable();

    while let Some((token, span)) = iter.next() {
        let needs_semicolon = token.ends_statement();
        let gap_end = iter.peek().map(|(_, next)| next.start).unwrap_or(source.len());
        let line_break = source
            .get(span.end..gap_end)
            .map(|gap| gap.contains('\n'))
            .unwrap_or(false);
        let at_end = iter.peek().is_none();
        out.push((token, span));

        if needs_semicolon && (line_break || at_end) {
            let at = SimpleSpan::from(span.end..span.end);
            out.push((Token::Semicolon, at));
        }
    }

    out
}

/// Lex a whole file into a [`TokenStream`]
///
/// A leading byte order mark is skipped; spans still index into `source`.
pub fn tokenize(path: &Path, source: &str) -> Result<TokenStream, ExtractError> {
    let body = source.strip_prefix(BYTE_ORDER_MARK).unwrap_or(source);
    let shift = source.len() - body.len();

    let raw = lexer().parse(body).into_result().map_err(|errors| {
        let first = errors.into_iter().next();
        let offset = first.as_ref().map(|e| e.span().start).unwrap_or(0) + shift;
        let message = match first.as_ref().and_then(|e| e.found()) {
            Some(c) => format!("unexpected character {:?}", c),
            None => "unexpected end of input".to_string(),
        };
        let (line, column) = line_column(source, offset);
        ExtractError::syntax_error(path, message, line, column)
    })?;

    let tokens = insert_semicolons(body, raw);
    trace!(file = %path.display(), token_count = tokens.len(), "Lexed file");

    let (tokens, spans) = tokens
        .into_iter()
        .map(|(token, span)| (token, SimpleSpan::from(span.start + shift..span.end + shift)))
        .unzip();
    Ok(TokenStream { tokens, spans })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(Path::new("test.go"), source).unwrap().tokens
    }

    fn ident(name: &str) -> Token {
        Token::Ident(name.to_string())
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("package main"),
            vec![Token::Package, ident("main"), Token::Semicolon]
        );
        assert_eq!(
            kinds("type T struct {}"),
            vec![
                Token::Type,
                ident("T"),
                Token::Struct,
                Token::LBrace,
                Token::RBrace,
                Token::Semicolon
            ]
        );
    }

    #[test]
    fn test_semicolon_insertion_after_line_end() {
        let tokens = kinds("a int\nb string\n");
        assert_eq!(
            tokens,
            vec![
                ident("a"),
                ident("int"),
                Token::Semicolon,
                ident("b"),
                ident("string"),
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_no_semicolon_after_open_brace_or_comma() {
        let tokens = kinds("struct {\n}\nf(a,\nb)");
        assert_eq!(
            tokens,
            vec![
                Token::Struct,
                Token::LBrace,
                Token::RBrace,
                Token::Semicolon,
                ident("f"),
                Token::LParen,
                ident("a"),
                Token::Comma,
                ident("b"),
                Token::RParen,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_comments_are_trivia() {
        let tokens = kinds("a // trailing\n/* block */ b /* multi\nline */ c");
        assert_eq!(
            tokens,
            vec![
                ident("a"),
                Token::Semicolon,
                ident("b"),
                Token::Semicolon,
                ident("c"),
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let tokens = kinds(r#"x "a\"b" `raw
string` 'c' '\n' 0x1F 1e+9 3.14i"#);
        assert_eq!(tokens[0], ident("x"));
        assert_eq!(tokens[1], Token::Str(r#""a\"b""#.to_string()));
        assert_eq!(tokens[2], Token::Str("`raw\nstring`".to_string()));
        assert_eq!(tokens[3], Token::Char("'c'".to_string()));
        assert_eq!(tokens[4], Token::Char(r"'\n'".to_string()));
        assert_eq!(tokens[5], Token::Number("0x1F".to_string()));
        assert_eq!(tokens[6], Token::Number("1e+9".to_string()));
        assert_eq!(tokens[7], Token::Number("3.14i".to_string()));
    }

    #[test]
    fn test_operators() {
        let tokens = kinds("<-chan ... := x++ &^= ~ |");
        assert_eq!(
            tokens,
            vec![
                Token::Arrow,
                Token::Chan,
                Token::Ellipsis,
                Token::Op(":=".to_string()),
                ident("x"),
                Token::Op("++".to_string()),
                Token::Op("&^=".to_string()),
                Token::Tilde,
                Token::Pipe,
            ]
        );
    }

    #[test]
    fn test_unicode_identifiers() {
        assert_eq!(kinds("π"), vec![ident("π"), Token::Semicolon]);
    }

    #[test]
    fn test_unterminated_string_is_syntax_error() {
        let err = tokenize(Path::new("bad.go"), "package a\nvar s = \"oops\n").unwrap_err();
        match err {
            ExtractError::SyntaxError { file, line, .. } => {
                assert_eq!(file, Path::new("bad.go"));
                assert!(line >= 2);
            }
            other => panic!("Expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_leading_byte_order_mark_is_skipped() {
        let stream = tokenize(Path::new("bom.go"), "\u{FEFF}package p\n").unwrap();
        assert_eq!(
            stream.tokens,
            vec![Token::Package, ident("p"), Token::Semicolon]
        );
        assert_eq!(stream.offset_of(0), 3);
        assert_eq!(stream.offset_of(1), 11);

        let err = tokenize(Path::new("bom.go"), "\u{FEFF}package p\n$").unwrap_err();
        match err {
            ExtractError::SyntaxError { line, column, .. } => assert_eq!((line, column), (2, 1)),
            other => panic!("Expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_byte_order_mark_inside_file_is_an_error() {
        assert!(tokenize(Path::new("bom.go"), "package p\n\u{FEFF}").is_err());
    }

    #[test]
    fn test_offset_of() {
        let stream = tokenize(Path::new("t.go"), "a  b").unwrap();
        assert_eq!(stream.offset_of(0), 0);
        assert_eq!(stream.offset_of(1), 3);
        assert_eq!(stream.offset_of(99), 4);
    }
}
