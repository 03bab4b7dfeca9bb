//! Header parser: walks the declaration section of a VCD file
//! (`$date`/`$version`/`$timescale`/`$scope`/`$var`/`$upscope`/`$comment`)
//! and builds the [`SymbolTable`], stopping at `$enddefinitions $end`.

use std::io::BufRead;

use crate::error::VcdError;
use crate::idcode::IdCode;
use crate::symbol::{SymbolTable, VarDecl};
use crate::token::{Token, Tokeniser};

/// Declaration-section metadata plus the populated symbol table.
#[derive(Debug, Default)]
pub struct Header {
    /// Raw `$date` body, if present.
    pub date: Option<String>,
    /// Raw `$version` body, if present.
    pub version: Option<String>,
    /// Raw `$timescale` body, if present (e.g. `"1 ns"`).
    pub timescale: Option<String>,
    /// The symbol table built from all `$var` declarations.
    pub symbols: SymbolTable,
}

/// Parses the declaration section from `tokeniser`, consuming tokens through
/// `$enddefinitions $end`. Leaves the tokeniser positioned at the first token
/// of the simulation section.
pub fn parse_header<R: BufRead>(tokeniser: &mut Tokeniser<R>) -> Result<Header, VcdError> {
    let mut header = Header::default();
    let mut scope_stack: Vec<String> = Vec::new();

    loop {
        let token = next_required(tokeniser)?;
        match token.text.as_str() {
            "$comment" => {
                drop_until_end(tokeniser)?;
            }
            "$date" => header.date = Some(collect_until_end(tokeniser)?.join(" ")),
            "$version" => header.version = Some(collect_until_end(tokeniser)?.join(" ")),
            "$timescale" => header.timescale = Some(collect_until_end(tokeniser)?.join(" ")),
            "$scope" => {
                let body = collect_until_end(tokeniser)?;
                let name = body.get(1).or_else(|| body.first()).ok_or_else(|| {
                    VcdError::ParseError {
                        token: "$scope".into(),
                        line: token.line,
                    }
                })?;
                scope_stack.push(name.clone());
            }
            "$upscope" => {
                collect_until_end(tokeniser)?;
                if scope_stack.pop().is_none() {
                    return Err(VcdError::ParseError {
                        token: "$upscope".into(),
                        line: token.line,
                    });
                }
            }
            "$var" => {
                let body = collect_until_end(tokeniser)?;
                if body.len() < 4 {
                    return Err(VcdError::ParseError {
                        token: "$var".into(),
                        line: token.line,
                    });
                }
                let var_type = body[0].clone();
                let width: u32 = body[1].parse().map_err(|_| VcdError::ParseError {
                    token: body[1].clone(),
                    line: token.line,
                })?;
                let id = IdCode::new(&body[2]);
                let name = body[3].clone();
                let bit_range = body.get(4).cloned();

                let mut path = scope_stack.clone();
                path.push(name);

                header.symbols.declare(
                    id,
                    VarDecl {
                        var_type,
                        width,
                        path,
                        bit_range,
                    },
                );
            }
            "$enddefinitions" => {
                collect_until_end(tokeniser)?;
                return Ok(header);
            }
            other => {
                return Err(VcdError::ParseError {
                    token: other.to_string(),
                    line: token.line,
                })
            }
        }
    }
}

fn next_required<R: BufRead>(tokeniser: &mut Tokeniser<R>) -> Result<Token, VcdError> {
    tokeniser
        .next_token()?
        .ok_or_else(|| VcdError::ParseError {
            token: "<eof>".into(),
            line: 0,
        })
}

/// Consumes tokens up to and including `$end`, discarding their text.
fn drop_until_end<R: BufRead>(tokeniser: &mut Tokeniser<R>) -> Result<(), VcdError> {
    loop {
        let token = next_required(tokeniser)?;
        if token.text == "$end" {
            return Ok(());
        }
    }
}

/// Consumes tokens up to (not including) `$end`, collecting their text.
fn collect_until_end<R: BufRead>(tokeniser: &mut Tokeniser<R>) -> Result<Vec<String>, VcdError> {
    let mut words = Vec::new();
    loop {
        let token = next_required(tokeniser)?;
        if token.text == "$end" {
            return Ok(words);
        }
        words.push(token.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Header {
        let mut t = Tokeniser::new(Cursor::new(text));
        parse_header(&mut t).unwrap()
    }

    #[test]
    fn minimal_header() {
        let h = parse(
            "$timescale 1 ns $end\n\
             $scope module top $end\n\
             $var wire 1 ! clk $end\n\
             $upscope $end\n\
             $enddefinitions $end\n",
        );
        assert_eq!(h.timescale.as_deref(), Some("1 ns"));
        assert_eq!(
            &*h.symbols.get_xmr(&IdCode::new("!")).unwrap(),
            "top.clk"
        );
    }

    #[test]
    fn comment_and_version_are_skipped() {
        let h = parse(
            "$comment\n  multi\n  line\n$end\n\
             $version\n  Some Simulator v1.0\n$end\n\
             $timescale 1 ns $end\n\
             $enddefinitions $end\n",
        );
        assert_eq!(h.version.as_deref(), Some("Some Simulator v1.0"));
    }

    #[test]
    fn nested_scopes_build_hierarchical_path() {
        let h = parse(
            "$scope module top $end\n\
             $scope module m1 $end\n\
             $var wire 1 ! net3 $end\n\
             $upscope $end\n\
             $upscope $end\n\
             $enddefinitions $end\n",
        );
        assert_eq!(
            &*h.symbols.get_xmr(&IdCode::new("!")).unwrap(),
            "top.m1.net3"
        );
    }

    #[test]
    fn bit_range_suffix_is_preserved() {
        let h = parse(
            "$scope module top $end\n\
             $var wire 8 ! data [7:0] $end\n\
             $upscope $end\n\
             $enddefinitions $end\n",
        );
        assert_eq!(
            h.symbols.decl(&IdCode::new("!")).unwrap().bit_range.as_deref(),
            Some("[7:0]")
        );
    }

    #[test]
    fn aliased_id_code_across_two_vars() {
        let h = parse(
            "$scope module top $end\n\
             $var wire 1 ! net_a $end\n\
             $var wire 1 ! net_b $end\n\
             $upscope $end\n\
             $enddefinitions $end\n",
        );
        assert_eq!(h.symbols.aliases(&IdCode::new("!")).len(), 2);
        assert_eq!(&*h.symbols.get_xmr(&IdCode::new("!")).unwrap(), "top.net_a");
    }

    #[test]
    fn malformed_var_is_parse_error() {
        let mut t = Tokeniser::new(Cursor::new("$var wire 1 $end\n$enddefinitions $end\n"));
        assert!(matches!(
            parse_header(&mut t),
            Err(VcdError::ParseError { .. })
        ));
    }

    #[test]
    fn unknown_keyword_is_parse_error() {
        let mut t = Tokeniser::new(Cursor::new("$bogus foo $end\n$enddefinitions $end\n"));
        assert!(matches!(
            parse_header(&mut t),
            Err(VcdError::ParseError { .. })
        ));
    }

    #[test]
    fn missing_enddefinitions_is_parse_error() {
        let mut t = Tokeniser::new(Cursor::new("$timescale 1 ns $end\n"));
        assert!(parse_header(&mut t).is_err());
    }
}
