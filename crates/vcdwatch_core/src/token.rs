//! Streaming word tokeniser over a VCD file.
//!
//! VCD has no line structure that matters to the grammar — tokens are
//! whitespace-separated words, and a single declaration can span many lines
//! (`$comment ... $end` bodies in particular). This tokeniser reads one line
//! at a time and yields its words before reading the next, so it never
//! buffers more of the file than the line currently in flight.

use std::io::BufRead;

use crate::error::VcdError;

/// A single whitespace-delimited word read from the file, with the 1-based
/// line number it came from (used for error reporting).
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The raw word text.
    pub text: String,
    /// The 1-based source line this word was read from.
    pub line: usize,
}

/// A forward-only, line-buffered word tokeniser.
pub struct Tokeniser<R> {
    reader: R,
    line_no: usize,
    pending: std::vec::IntoIter<(String, usize)>,
}

impl<R: BufRead> Tokeniser<R> {
    /// Wraps a buffered reader in a tokeniser.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            pending: Vec::new().into_iter(),
        }
    }

    fn refill(&mut self) -> Result<bool, VcdError> {
        let mut line = String::new();
        let bytes_read = self.reader.read_line(&mut line)?;
        if bytes_read == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        let line_no = self.line_no;
        let words: Vec<(String, usize)> = line
            .split_whitespace()
            .map(|w| (w.to_string(), line_no))
            .collect();
        self.pending = words.into_iter();
        Ok(true)
    }

    /// Returns the next token, or `None` at end of file.
    pub fn next_token(&mut self) -> Result<Option<Token>, VcdError> {
        loop {
            if let Some((text, line)) = self.pending.next() {
                return Ok(Some(Token { text, line }));
            }
            if !self.refill()? {
                return Ok(None);
            }
        }
    }
}

impl<R: BufRead> Iterator for Tokeniser<R> {
    type Item = Result<Token, VcdError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(text: &str) -> Vec<String> {
        Tokeniser::new(Cursor::new(text))
            .map(|t| t.unwrap().text)
            .collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(collect("$var wire 1 ! clk $end"), vec!["$var", "wire", "1", "!", "clk", "$end"]);
    }

    #[test]
    fn spans_multiple_lines() {
        let text = "$comment\n  hello\n  world\n$end\n";
        assert_eq!(collect(text), vec!["$comment", "hello", "world", "$end"]);
    }

    #[test]
    fn skips_blank_lines() {
        let text = "a\n\n\nb\n";
        assert_eq!(collect(text), vec!["a", "b"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn tracks_line_numbers() {
        let text = "a b\nc\n";
        let tokens: Vec<Token> = Tokeniser::new(Cursor::new(text))
            .map(|t| t.unwrap())
            .collect();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 1);
        assert_eq!(tokens[2].line, 2);
    }
}
