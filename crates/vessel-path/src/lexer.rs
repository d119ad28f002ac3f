//! Path data lexer.
//!
//! Tokenizes SVG-style path data into command letters and numbers. Handles:
//! - Command letters (case preserved: uppercase absolute, lowercase relative)
//! - Numbers with optional sign, fraction and exponent (e.g., `-1.5e-3`)
//! - Numbers packed without separators (`0.5.3` is `0.5` then `.3`,
//!   `10-5` is `10` then `-5`)
//!
//! Anything else (whitespace, commas, stray signs or punctuation) is
//! skipped. The lexer never fails.

/// A token in path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A command letter such as `M` or `c`.
    Command(char),
    /// A finite numeric literal.
    Number(f64),
}

impl Token {
    /// The command letter, if this is a command token.
    pub fn as_command(&self) -> Option<char> {
        match self {
            Token::Command(c) => Some(*c),
            Token::Number(_) => None,
        }
    }

    /// The numeric value, if this is a number token.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Token::Number(v) => Some(*v),
            Token::Command(_) => None,
        }
    }
}

/// Lexer for path data.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenize the entire input.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token() {
            tokens.push(tok);
        }
        tokens
    }

    /// Get the next token, or `None` if at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphabetic() {
                self.pos += 1;
                return Some(Token::Command(ch as char));
            }
            if let Some((value, end)) = self.scan_number(self.pos) {
                self.pos = end;
                // Overflowing literals such as `1e999` are dropped.
                if value.is_finite() {
                    return Some(Token::Number(value));
                }
                continue;
            }
            self.pos += 1;
        }
        None
    }

    fn peek_char(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn digit_at(&self, i: usize) -> bool {
        self.input.get(i).is_some_and(|c| c.is_ascii_digit())
    }

    fn skip_digits(&self, mut i: usize) -> usize {
        while self.digit_at(i) {
            i += 1;
        }
        i
    }

    /// Scan a number starting at `start`, returning its value and end offset.
    fn scan_number(&self, start: usize) -> Option<(f64, usize)> {
        let mut i = start;

        // Sign
        if matches!(self.input.get(i), Some(b'-' | b'+')) {
            i += 1;
        }

        // Integer part
        let int_end = self.skip_digits(i);
        let has_int = int_end > i;

        // Fraction: a '.' only belongs to this number if a digit follows it
        let mut end = if self.input.get(int_end) == Some(&b'.') && self.digit_at(int_end + 1) {
            self.skip_digits(int_end + 1)
        } else if has_int {
            int_end
        } else {
            return None;
        };

        // Exponent: only consumed when at least one digit follows
        if matches!(self.input.get(end), Some(b'e' | b'E')) {
            let mut j = end + 1;
            if matches!(self.input.get(j), Some(b'-' | b'+')) {
                j += 1;
            }
            let exp_end = self.skip_digits(j);
            if exp_end > j {
                end = exp_end;
            }
        }

        let text = std::str::from_utf8(&self.input[start..end]).ok()?;
        let value: f64 = text.parse().ok()?;
        Some((value, end))
    }
}

/// Tokenize a path data string.
pub fn tokenize_path(d: &str) -> Vec<Token> {
    Lexer::new(d.as_bytes()).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(input: &str) -> Vec<f64> {
        tokenize_path(input)
            .into_iter()
            .filter_map(|t| t.as_number())
            .collect()
    }

    #[test]
    fn test_commands() {
        assert_eq!(
            tokenize_path("MLz"),
            vec![
                Token::Command('M'),
                Token::Command('L'),
                Token::Command('z'),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(numbers("42"), vec![42.0]);
        assert_eq!(numbers("-7"), vec![-7.0]);
        assert_eq!(numbers("+3.25"), vec![3.25]);
        assert_eq!(numbers("-1.5E-10"), vec![-1.5e-10]);
        assert_eq!(numbers("2.0e3"), vec![2000.0]);
        assert_eq!(numbers(".5"), vec![0.5]);
        assert_eq!(numbers("-.5"), vec![-0.5]);
    }

    #[test]
    fn test_packed_decimals() {
        assert_eq!(numbers("0.5.3"), vec![0.5, 0.3]);
        assert_eq!(numbers("135.5.49"), vec![135.5, 0.49]);
        assert_eq!(numbers("10-5"), vec![10.0, -5.0]);
        assert_eq!(numbers("1e2-3"), vec![100.0, -3.0]);
    }

    #[test]
    fn test_separators() {
        assert_eq!(numbers("1,2 3\t4\n5"), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_trailing_dot_is_dropped() {
        assert_eq!(numbers("5."), vec![5.0]);
    }

    #[test]
    fn test_exponent_without_digits() {
        // `e` with no digits is not part of the number; it lexes as a letter.
        assert_eq!(
            tokenize_path("1e"),
            vec![Token::Number(1.0), Token::Command('e')]
        );
    }

    #[test]
    fn test_malformed_fragments_skipped() {
        assert_eq!(
            tokenize_path("M 1 # 2 - ; 3"),
            vec![
                Token::Command('M'),
                Token::Number(1.0),
                Token::Number(2.0),
                Token::Number(3.0),
            ]
        );
        assert_eq!(numbers("1e999 4"), vec![4.0]);
        assert_eq!(numbers("é7"), vec![7.0]);
    }

    #[test]
    fn test_complete_path() {
        let tokens = tokenize_path("M10,20L-3.5.5z");
        assert_eq!(
            tokens,
            vec![
                Token::Command('M'),
                Token::Number(10.0),
                Token::Number(20.0),
                Token::Command('L'),
                Token::Number(-3.5),
                Token::Number(0.5),
                Token::Command('z'),
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert!(tokenize_path("").is_empty());
        assert!(tokenize_path("  , ,").is_empty());
    }
}
