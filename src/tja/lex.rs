//! Lexical analyzer of TJA format.
//!
//! Raw [String] == [lex](self) ==> [`TokenStream`] == [parse](super::parse) ==> [Song](super::model::Song) (in
//! [`ParseOutput`](super::parse::ParseOutput))
//!
//! TJA is line oriented, so every meaningful line becomes exactly one token. The lexer never fails: whether a
//! header or command is known, and whether a data line consists of valid note codes, is decided by the parser.

mod cursor;
pub mod token;

use self::{cursor::Cursor, token::Token, token::TokenWithRange};

/// Tokens of the whole source, with the position where the source ends.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TokenStream<'a> {
    /// tokens
    pub tokens: Vec<TokenWithRange<'a>>,
    /// The line number after the last line, used to report errors at the end of the source.
    pub eof_line: usize,
    /// The length of the source in bytes.
    pub eof_index: usize,
}

impl<'a> TokenStream<'a> {
    /// Analyzes and converts the TJA format text into [`TokenStream`].
    #[must_use]
    pub fn parse_lex(source: &'a str) -> Self {
        let mut cursor = Cursor::new(source);
        let mut tokens = vec![];
        while let Some(line) = cursor.next_line() {
            tokens.push(Token::from_line(line));
        }
        Self {
            tokens,
            eof_line: cursor.line(),
            eof_index: source.len(),
        }
    }

    /// Iterates tokens by reference.
    pub fn iter(&self) -> std::slice::Iter<'_, TokenWithRange<'a>> {
        self.tokens.iter()
    }
}

impl<'a, 'b> IntoIterator for &'b TokenStream<'a> {
    type Item = &'b TokenWithRange<'a>;
    type IntoIter = std::slice::Iter<'b, TokenWithRange<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
