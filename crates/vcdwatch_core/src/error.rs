//! Error types for VCD parsing and observation.
//!
//! All errors are fatal: the parser does not attempt resynchronisation after
//! a malformed token or an unresolved reference, it surfaces the error to
//! whoever called [`crate::parser::Parser::parse`].

use std::io;

/// Errors that can occur while parsing a VCD file or resolving references
/// into it.
#[derive(Debug, thiserror::Error)]
pub enum VcdError {
    /// An I/O error occurred while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A header keyword or simulation-section token could not be parsed.
    #[error("parse error at line {line}: unexpected token {token:?}")]
    ParseError {
        /// The offending keyword or token text.
        token: String,
        /// The 1-based source line number it was read from.
        line: usize,
    },

    /// A cross-module reference did not match any declared variable.
    #[error("no matching identifier code for XMR: {path}")]
    UnknownXmr {
        /// The dotted hierarchical path that failed to resolve.
        path: String,
    },

    /// A value-change token referenced an identifier code that was never
    /// declared by a `$var` statement.
    #[error("unknown identifier code: {id}")]
    UnknownIdCode {
        /// The identifier code text.
        id: String,
    },

    /// A value could not be decoded into the form the caller requested.
    #[error("value error: {reason}")]
    ValueError {
        /// Description of why the value could not be decoded.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_display() {
        let e = VcdError::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(e.to_string().contains("I/O error"));
    }

    #[test]
    fn parse_error_display() {
        let e = VcdError::ParseError {
            token: "$bogus".into(),
            line: 7,
        };
        assert_eq!(
            e.to_string(),
            "parse error at line 7: unexpected token \"$bogus\""
        );
    }

    #[test]
    fn unknown_xmr_display() {
        let e = VcdError::UnknownXmr {
            path: "top.missing".into(),
        };
        assert_eq!(
            e.to_string(),
            "no matching identifier code for XMR: top.missing"
        );
    }

    #[test]
    fn unknown_id_code_display() {
        let e = VcdError::UnknownIdCode { id: "!".into() };
        assert_eq!(e.to_string(), "unknown identifier code: !");
    }

    #[test]
    fn value_error_display() {
        let e = VcdError::ValueError {
            reason: "bit is X".into(),
        };
        assert_eq!(e.to_string(), "value error: bit is X");
    }
}
