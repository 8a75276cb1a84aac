//! Token recognizers for the console grammar.
//!
//! Stateless matchers over a byte cursor into the remaining input. The
//! line parser decides which recognizer to run where; nothing here knows
//! about commands or declarations.

/// What followed a parsed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Termination {
    /// Unconsumed trailing text follows the command.
    #[default]
    None,
    EndOfInput,
    Separator,
}

/// Byte that separates commands on one line.
pub const COMMAND_SEPARATOR: u8 = b';';

/// Base58 alphabet: digits and letters excluding `0`, `O`, `I` and `l`.
const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// A cursor over one input line.
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Consumes zero or more whitespace bytes; true when at least one went.
    pub fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// Looks at what terminates a command here without consuming it.
    pub fn peek_terminator(&self) -> Option<Termination> {
        match self.peek() {
            None => Some(Termination::EndOfInput),
            Some(COMMAND_SEPARATOR) => Some(Termination::Separator),
            Some(_) => None,
        }
    }

    /// Classifies and consumes the terminator after a command.
    pub fn take_terminator(&mut self) -> Termination {
        match self.peek() {
            None => Termination::EndOfInput,
            Some(COMMAND_SEPARATOR) => {
                self.pos += 1;
                Termination::Separator
            }
            Some(_) => Termination::None,
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if pred(b)) {
            self.pos += 1;
        }
        // Predicates only start or stop on ASCII bytes, so the slice sits
        // on character boundaries of the original &str.
        std::str::from_utf8(&self.input[start..self.pos]).unwrap_or("")
    }

    /// One or more alphanumeric, underscore or dot bytes. Dots let
    /// compound `<contract>.<method>` names parse as a single token.
    pub fn command_name(&mut self) -> &'a str {
        self.take_while(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
    }

    /// One or more bytes from the base58 alphabet.
    pub fn base58_token(&mut self) -> &'a str {
        self.take_while(|b| BASE58_ALPHABET.contains(&b))
    }

    /// One or more hex digits.
    pub fn hex_token(&mut self) -> &'a str {
        self.take_while(|b| b.is_ascii_hexdigit())
    }

    /// Unsigned decimal with an optional fractional part: `12`, `12.`,
    /// `12.5` or `.5`. A lone dot matches nothing.
    pub fn amount_token(&mut self) -> &'a str {
        let start = self.pos;
        let integral = !self.take_while(|b| b.is_ascii_digit()).is_empty();
        if self.peek() == Some(b'.') {
            let dot = self.pos;
            self.pos += 1;
            let fractional = !self.take_while(|b| b.is_ascii_digit()).is_empty();
            if !integral && !fractional {
                self.pos = dot;
            }
        }
        std::str::from_utf8(&self.input[start..self.pos]).unwrap_or("")
    }

    /// One or more bytes that are not whitespace, a quote or the command
    /// separator.
    pub fn simple_string(&mut self) -> &'a str {
        self.take_while(|b| {
            !b.is_ascii_whitespace() && b != b'\'' && b != b'"' && b != COMMAND_SEPARATOR
        })
    }

    /// True when the cursor sits on a quote character.
    pub fn at_quote(&self) -> bool {
        matches!(self.peek(), Some(b'\'' | b'"'))
    }

    /// Consumes a quoted string starting at the opening quote. Backslash
    /// escapes of a backslash or of either quote collapse to the escaped
    /// byte; any other escape keeps the backslash literally. Returns
    /// `None` when no closing quote arrives before end of input.
    pub fn quoted_string(&mut self) -> Option<String> {
        let quote = self.peek()?;
        self.pos += 1;
        let mut out = Vec::new();
        while let Some(b) = self.peek() {
            self.pos += 1;
            if b == b'\\' {
                match self.peek() {
                    Some(next @ (b'\\' | b'\'' | b'"')) => {
                        out.push(next);
                        self.pos += 1;
                    }
                    _ => out.push(b'\\'),
                }
            } else if b == quote {
                return Some(String::from_utf8_lossy(&out).into_owned());
            } else {
                out.push(b);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_whitespace_reports_whether_it_moved() {
        let mut sc = Scanner::new("  x");
        assert!(sc.skip_whitespace());
        assert!(!sc.skip_whitespace());
        assert_eq!(sc.command_name(), "x");
    }

    #[test]
    fn command_name_accepts_compound_names() {
        let mut sc = Scanner::new("token.transfer rest");
        assert_eq!(sc.command_name(), "token.transfer");
    }

    #[test]
    fn command_name_stops_at_non_word_bytes() {
        let mut sc = Scanner::new("bal-ance");
        assert_eq!(sc.command_name(), "bal");
    }

    #[test]
    fn base58_token_excludes_ambiguous_letters() {
        let mut sc = Scanner::new("1iwBq0rest");
        assert_eq!(sc.base58_token(), "1iwBq");
    }

    #[test]
    fn amount_token_shapes() {
        for (input, expected) in [
            ("12", "12"),
            ("12.5x", "12.5"),
            ("12.", "12."),
            (".5", ".5"),
            (".", ""),
            ("x", ""),
        ] {
            let mut sc = Scanner::new(input);
            assert_eq!(sc.amount_token(), expected, "input {input:?}");
        }
    }

    #[test]
    fn simple_string_stops_at_separator_and_quotes() {
        let mut sc = Scanner::new("ab'c");
        assert_eq!(sc.simple_string(), "ab");
        let mut sc = Scanner::new("ab;c");
        assert_eq!(sc.simple_string(), "ab");
    }

    #[test]
    fn quoted_string_collapses_known_escapes() {
        let mut sc = Scanner::new(r#""a\"b""#);
        assert_eq!(sc.quoted_string(), Some("a\"b".to_string()));
    }

    #[test]
    fn quoted_string_keeps_unknown_escapes() {
        let mut sc = Scanner::new(r#""a\nb""#);
        assert_eq!(sc.quoted_string(), Some(r"a\nb".to_string()));
    }

    #[test]
    fn quoted_string_mixes_quote_kinds() {
        let mut sc = Scanner::new(r#"'he said "hi"'"#);
        assert_eq!(sc.quoted_string(), Some(r#"he said "hi""#.to_string()));
    }

    #[test]
    fn unterminated_quote_is_none() {
        let mut sc = Scanner::new("\"abc");
        assert_eq!(sc.quoted_string(), None);
        let mut sc = Scanner::new("\"abc\\");
        assert_eq!(sc.quoted_string(), None);
    }

    #[test]
    fn terminator_classification() {
        let mut sc = Scanner::new("");
        assert_eq!(sc.take_terminator(), Termination::EndOfInput);
        let mut sc = Scanner::new("; rest");
        assert_eq!(sc.take_terminator(), Termination::Separator);
        let mut sc = Scanner::new("rest");
        assert_eq!(sc.take_terminator(), Termination::None);
    }
}
