//! Query Line Tokenizer
//!
//! Splits one query line into its tokens with a small character-class state
//! machine.
//!
//! ## States
//!
//! ```text
//!                letter/digit/_                 whitespace
//!   ┌──────────────────────────────┐  ┌───────────────────────────┐
//!   │                              ▼  │                           ▼
//! ┌─┴──────────────┐          ┌───────┴──┐              ┌────────────────┐
//! │ SkipWhitespace │          │ InToken  │ ──(close)──> │ SkipWhitespace │
//! └───────┬────────┘          └────┬─────┘              └────────────────┘
//!         │ other                  │ other
//!         ▼                        ▼
//!     ┌─────────┐             ┌─────────┐
//!     │ Invalid │             │ Invalid │
//!     └─────────┘             └─────────┘
//! ```
//!
//! - Whitespace is `' '`, `'\t'` and `'\n'`; it separates tokens and is never
//!   part of one.
//! - Token characters are ASCII letters, digits and `_`.
//! - Anything else fails the whole line with [`DbError::InvalidSymbol`]; no
//!   partial token list is returned.
//! - Reaching the end of input inside a token closes that token.
//!
//! There is no quoting grammar, so a value can never contain whitespace.

use crate::error::{DbError, DbResult};
use tracing::debug;

/// Character classes the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    Whitespace,
    Letter,
    Other,
}

impl Symbol {
    #[inline]
    fn classify(byte: u8) -> Self {
        if is_whitespace(byte) {
            Symbol::Whitespace
        } else if is_letter(byte) {
            Symbol::Letter
        } else {
            Symbol::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SkipWhitespace,
    InToken,
    Invalid,
}

/// One-shot tokenizing machine. A new one is built for every line.
struct StateMachine<'a> {
    input: &'a str,
    state: State,
    token_start: usize,
    tokens: Vec<String>,
}

impl<'a> StateMachine<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            state: State::SkipWhitespace,
            token_start: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> DbResult<Vec<String>> {
        for (pos, &byte) in self.input.as_bytes().iter().enumerate() {
            self.state = self.step(pos, Symbol::classify(byte));
            if self.state == State::Invalid {
                return Err(DbError::InvalidSymbol);
            }
        }

        if self.state == State::InToken {
            self.close_token(self.input.len());
        }

        Ok(self.tokens)
    }

    fn step(&mut self, pos: usize, symbol: Symbol) -> State {
        match (self.state, symbol) {
            (_, Symbol::Other) | (State::Invalid, _) => State::Invalid,
            (State::SkipWhitespace, Symbol::Whitespace) => State::SkipWhitespace,
            (State::SkipWhitespace, Symbol::Letter) => {
                self.token_start = pos;
                State::InToken
            }
            (State::InToken, Symbol::Letter) => State::InToken,
            (State::InToken, Symbol::Whitespace) => {
                self.close_token(pos);
                State::SkipWhitespace
            }
        }
    }

    // Token bytes are all ASCII, so both ends fall on char boundaries.
    fn close_token(&mut self, end: usize) {
        self.tokens
            .push(self.input[self.token_start..end].to_string());
    }
}

/// Turns raw query lines into token lists.
///
/// # Example
///
/// ```
/// use linekv::compute::Parser;
///
/// let tokens = Parser::new().parse("SET name value").unwrap();
/// assert_eq!(tokens, vec!["SET", "name", "value"]);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Tokenizes a single query line.
    ///
    /// Empty or whitespace-only input yields an empty list; deciding whether
    /// that is a valid command is up to the analyzer.
    pub fn parse(&self, line: &str) -> DbResult<Vec<String>> {
        let tokens = StateMachine::new(line).run().inspect_err(|_| {
            debug!(line = %line.escape_debug(), "invalid symbol in query");
        })?;

        debug!(?tokens, "query parsed");
        Ok(tokens)
    }
}

#[inline]
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n')
}

#[inline]
fn is_letter(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> DbResult<Vec<String>> {
        Parser::new().parse(line)
    }

    #[test]
    fn test_parse_set_command() {
        assert_eq!(parse("SET a b").unwrap(), vec!["SET", "a", "b"]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let parser = Parser::new();
        for _ in 0..3 {
            assert_eq!(parser.parse("SET a b").unwrap(), vec!["SET", "a", "b"]);
        }
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_whitespace_only() {
        for line in [" ", "\t", "\n", "  \t \n  ", "\n\n"] {
            assert!(parse(line).unwrap().is_empty(), "input {:?}", line);
        }
    }

    #[test]
    fn test_parse_mixed_separators() {
        assert_eq!(parse("  GET  key1 \n").unwrap(), vec!["GET", "key1"]);
        assert_eq!(
            parse("\tDEL\t\tsome_key\n").unwrap(),
            vec!["DEL", "some_key"]
        );
    }

    #[test]
    fn test_parse_token_at_end_of_input() {
        assert_eq!(parse("GET key").unwrap(), vec!["GET", "key"]);
    }

    #[test]
    fn test_parse_digits_and_underscores() {
        assert_eq!(
            parse("SET user_101 42").unwrap(),
            vec!["SET", "user_101", "42"]
        );
        assert_eq!(parse("_ 0 __9").unwrap(), vec!["_", "0", "__9"]);
    }

    #[test]
    fn test_parse_invalid_symbols() {
        for line in [
            "SET a b!",
            "GET user:101",
            "SET key \"value\"",
            "DEL a-b",
            "*",
            "GET key\r\n",
            "SET ключ value",
        ] {
            assert_eq!(parse(line), Err(DbError::InvalidSymbol), "input {:?}", line);
        }
    }

    #[test]
    fn test_parse_invalid_symbol_between_whitespace() {
        assert_eq!(parse("SET a . b"), Err(DbError::InvalidSymbol));
        assert_eq!(parse("  ?  "), Err(DbError::InvalidSymbol));
    }

    #[test]
    fn test_symbol_classes() {
        assert_eq!(Symbol::classify(b' '), Symbol::Whitespace);
        assert_eq!(Symbol::classify(b'\t'), Symbol::Whitespace);
        assert_eq!(Symbol::classify(b'\n'), Symbol::Whitespace);
        assert_eq!(Symbol::classify(b'\r'), Symbol::Other);
        assert_eq!(Symbol::classify(b'z'), Symbol::Letter);
        assert_eq!(Symbol::classify(b'Z'), Symbol::Letter);
        assert_eq!(Symbol::classify(b'5'), Symbol::Letter);
        assert_eq!(Symbol::classify(b'_'), Symbol::Letter);
        assert_eq!(Symbol::classify(b'-'), Symbol::Other);
    }
}
