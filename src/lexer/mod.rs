mod token;
mod token_kind;

pub use token::*;
pub use token_kind::*;

use once_cell::sync::Lazy;
use std::collections::HashMap;

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("let", TokenKind::Let);
    m.insert("mut", TokenKind::Mut);
    m.insert("if", TokenKind::If);
    m.insert("else", TokenKind::Else);
    m.insert("true", TokenKind::True);
    m.insert("false", TokenKind::False);
    m.insert("nil", TokenKind::Nil);
    m
});

/// Two-character operators, tried before falling back to single characters.
const TWO_CHAR_OPS: &[&str] = &["#{", "==", "!=", ">=", "<=", "&&", "||", "|>", ">>"];

/// Single-character operators and punctuation.
const ONE_CHAR_OPS: &str = "+-*/={}[](),:;|><";

/// Scans a source string into a flat token stream.
///
/// The lexer never fails: unterminated strings are tolerated by reading to
/// end of input, and any byte that doesn't start a recognized token is
/// silently dropped. Source is expected to already have CR bytes stripped
/// by the caller (see `load_source` in `main.rs`).
pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    pub fn lex(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn current(&self) -> Option<u8> {
        self.byte_at(0)
    }

    fn slice_from(&self, start: usize) -> &'a str {
        // `start` and `self.pos` are always ASCII delimiter positions (or
        // the end of the source), so this is always a char-boundary slice.
        &self.source[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')) {
            self.pos += 1;
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();
            let Some(b) = self.current() else {
                return None;
            };

            if b == b'/' && self.byte_at(1) == Some(b'/') {
                return Some(self.lex_comment());
            }

            if let Some(op) = self.match_two_char_op() {
                self.pos += op.len();
                return Some(Token::new(TokenKind::Operator, op));
            }

            if b == b'"' {
                return Some(self.lex_string());
            }

            if b.is_ascii_digit() {
                return Some(self.lex_number());
            }

            if b.is_ascii_alphabetic() || b == b'_' {
                return Some(self.lex_identifier());
            }

            if b.is_ascii() && ONE_CHAR_OPS.as_bytes().contains(&b) {
                self.pos += 1;
                return Some(Token::new(
                    TokenKind::Operator,
                    (b as char).to_string(),
                ));
            }

            // Any other byte (including unmatched '#', '!', '&' etc.) is
            // silently skipped - it never starts a token.
            self.pos += 1;
        }
    }

    fn match_two_char_op(&self) -> Option<&'static str> {
        TWO_CHAR_OPS.iter().copied().find(|op| {
            let op_bytes = op.as_bytes();
            self.byte_at(0) == Some(op_bytes[0]) && self.byte_at(1) == Some(op_bytes[1])
        })
    }

    fn lex_comment(&mut self) -> Token {
        let start = self.pos;
        self.pos += 2;
        while !matches!(self.current(), None | Some(b'\n')) {
            self.pos += 1;
        }
        Token::new(TokenKind::Comment, self.slice_from(start))
    }

    fn lex_string(&mut self) -> Token {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.current() {
                None => break,
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => self.pos += 2,
                Some(_) => self.pos += 1,
            }
        }
        Token::new(TokenKind::Str, self.slice_from(start))
    }

    fn lex_number(&mut self) -> Token {
        let start = self.pos;
        self.consume_digits_and_underscores();

        let mut kind = TokenKind::Int;
        if self.current() == Some(b'.') && self.byte_at(1).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
            kind = TokenKind::Dec;
            self.consume_digits_and_underscores();
        }

        Token::new(kind, self.slice_from(start))
    }

    fn consume_digits_and_underscores(&mut self) {
        loop {
            match self.current() {
                Some(b) if b.is_ascii_digit() => self.pos += 1,
                Some(b'_') if self.byte_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                    self.pos += 1
                }
                _ => break,
            }
        }
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.current(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        let text = self.slice_from(start);
        let kind = KEYWORDS.get(text).copied().unwrap_or(TokenKind::Id);
        Token::new(kind, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_let_binding() {
        let tokens = Lexer::new("let mut x = 42;").lex();
        let kinds: Vec<&str> = tokens.iter().map(|t| t.type_name()).collect();
        assert_eq!(kinds, ["LET", "MUT", "ID", "=", "INT", ";"]);
    }

    #[test]
    fn lexes_two_char_operators_before_one_char() {
        let tokens = Lexer::new("a >= b | c > d").lex();
        let kinds: Vec<&str> = tokens.iter().map(|t| t.type_name()).collect();
        assert_eq!(kinds, ["ID", ">=", "ID", "|", "ID", ">", "ID"]);
    }

    #[test]
    fn lexes_pipeline_and_composition() {
        let tokens = Lexer::new("f |> g >> h").lex();
        let kinds: Vec<&str> = tokens.iter().map(|t| t.type_name()).collect();
        assert_eq!(kinds, ["ID", "|>", "ID", ">>", "ID"]);
    }

    #[test]
    fn lexes_comment_to_end_of_line() {
        let tokens = Lexer::new("1 // a comment\n2").lex();
        assert_eq!(tokens[1].text, "// a comment");
        assert_eq!(tokens[1].kind, TokenKind::Comment);
    }

    #[test]
    fn string_literal_keeps_quotes_and_escapes() {
        let tokens = Lexer::new(r#""a\"b""#).lex();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, r#""a\"b""#);
    }

    #[test]
    fn unterminated_string_consumes_to_end() {
        let tokens = Lexer::new(r#""abc"#).lex();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, r#""abc"#);
    }

    #[test]
    fn number_with_underscores_and_decimal() {
        let tokens = Lexer::new("1_000 3.14 4_2.0_1").lex();
        assert_eq!(tokens[0].text, "1_000");
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[1].text, "3.14");
        assert_eq!(tokens[1].kind, TokenKind::Dec);
        assert_eq!(tokens[2].text, "4_2.0_1");
    }

    #[test]
    fn dot_without_following_digit_is_not_decimal() {
        let tokens = Lexer::new("1.foo").lex();
        let kinds: Vec<&str> = tokens.iter().map(|t| t.type_name()).collect();
        assert_eq!(kinds, ["INT", "ID"]);
        assert_eq!(tokens[1].text, "foo");
    }

    #[test]
    fn unknown_bytes_are_silently_skipped() {
        let tokens = Lexer::new("a @ ! & b").lex();
        let kinds: Vec<&str> = tokens.iter().map(|t| t.type_name()).collect();
        assert_eq!(kinds, ["ID", "ID"]);
    }

    #[test]
    fn lexing_is_deterministic() {
        let src = "let x = #{\"a\": [1, 2.5, \"s\"], \"b\": {1,2}};";
        assert_eq!(Lexer::new(src).lex(), Lexer::new(src).lex());
    }

    #[test]
    fn hash_brace_is_atomic_dictionary_opener() {
        let tokens = Lexer::new("#{1: 2}").lex();
        let kinds: Vec<&str> = tokens.iter().map(|t| t.type_name()).collect();
        assert_eq!(kinds, ["#{", "INT", ":", "INT", "}"]);
    }
}
