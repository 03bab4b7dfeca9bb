//! The top-level parser: ties the tokeniser, header parser, symbol table,
//! change engine, and watcher registry together into the single entry point
//! a consumer calls.

use std::io::BufRead;
use std::rc::Rc;

use crate::engine::ChangeEngine;
use crate::error::VcdError;
use crate::header::{parse_header, Header};
use crate::idcode::IdCode;
use crate::symbol::SymbolTable;
use crate::token::Tokeniser;
use crate::value::Value;
use crate::watcher::Watcher;

/// A handle returned by [`Parser::register_watcher`], used to later
/// deregister that watcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatcherId(usize);

/// Parses a VCD file and drives a registered set of watchers over its
/// value-change stream.
#[derive(Default)]
pub struct Parser {
    watchers: Vec<Option<Box<dyn Watcher>>>,
    symbols: SymbolTable,
    engine: ChangeEngine,
    date: Option<String>,
    version: Option<String>,
    timescale: Option<String>,
}

impl Parser {
    /// Creates a parser with no watchers registered yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a watcher for notification at every future timestep with
    /// activity on its sensitivity list. Returns a handle for later
    /// deregistration.
    pub fn register_watcher(&mut self, watcher: Box<dyn Watcher>) -> WatcherId {
        self.watchers.push(Some(watcher));
        WatcherId(self.watchers.len() - 1)
    }

    /// Removes a previously registered watcher; it receives no further
    /// notifications.
    pub fn deregister_watcher(&mut self, id: WatcherId) {
        if let Some(slot) = self.watchers.get_mut(id.0) {
            *slot = None;
        }
    }

    /// The raw `$date` header body, if present.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// The raw `$version` header body, if present.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The raw `$timescale` header body, if present.
    pub fn timescale(&self) -> Option<&str> {
        self.timescale.as_deref()
    }

    /// Resolves a dotted cross-module reference to its identifier code.
    pub fn get_id(&self, xmr: &str) -> Result<IdCode, VcdError> {
        self.symbols.get_id(xmr)
    }

    /// Resolves an identifier code to its canonical dotted XMR.
    pub fn get_xmr(&self, id: &IdCode) -> Result<Rc<str>, VcdError> {
        self.symbols.get_xmr(id)
    }

    /// Lists every XMR declared in the file, in declaration order.
    pub fn show_nets(&self) -> Result<Vec<Rc<str>>, VcdError> {
        self.symbols.show_nets()
    }

    /// Parses only the declaration section of `reader`, through
    /// `$enddefinitions $end`, and populates the symbol table and header
    /// metadata. Does not touch the simulation section or notify any
    /// registered watcher — for callers that only need [`Parser::show_nets`]
    /// or the resolved header fields.
    pub fn parse_header_only<R: BufRead>(&mut self, reader: R) -> Result<(), VcdError> {
        let mut tokeniser = Tokeniser::new(reader);
        let Header {
            date,
            version,
            timescale,
            symbols,
        } = parse_header(&mut tokeniser)?;
        self.date = date;
        self.version = version;
        self.timescale = timescale;
        self.symbols = symbols;
        Ok(())
    }

    /// Parses `reader` end to end: the header section, then the full
    /// simulation section, notifying registered watchers as their
    /// sensitivity lists fire. Fatal on the first malformed token or
    /// unresolved reference — there is no resynchronisation.
    pub fn parse<R: BufRead>(&mut self, reader: R) -> Result<(), VcdError> {
        let mut tokeniser = Tokeniser::new(reader);
        let Header {
            date,
            version,
            timescale,
            symbols,
        } = parse_header(&mut tokeniser)?;
        self.date = date;
        self.version = version;
        self.timescale = timescale;
        self.symbols = symbols;

        for slot in self.watchers.iter_mut() {
            if let Some(watcher) = slot {
                watcher.state_mut().resolve_ids(&self.symbols)?;
                self.engine
                    .init_watched(watcher.state().watching_ids().iter().cloned());
            }
        }

        while let Some(token) = tokeniser.next_token()? {
            let text = token.text.as_str();
            let mut chars = text.chars();
            let lead = match chars.next() {
                Some(c) => c,
                None => continue,
            };

            match lead {
                '$' => {
                    // $dumpall/$dumpoff/$dumpon/$dumpvars/$end markers in
                    // the simulation section carry no state of their own.
                }
                '#' => {
                    let rest = &text[1..];
                    let next_time: u64 = rest.parse().map_err(|_| VcdError::ParseError {
                        token: text.to_string(),
                        line: token.line,
                    })?;
                    self.engine
                        .commit_timestep(next_time, &mut self.watchers, &self.symbols);
                }
                '0' | '1' | 'x' | 'X' | 'z' | 'Z' => {
                    let id = IdCode::new(&text[1..]);
                    let value = Value::scalar_from_char(lead).ok_or_else(|| VcdError::ParseError {
                        token: text.to_string(),
                        line: token.line,
                    })?;
                    self.engine.record(id, value);
                }
                'b' | 'B' => {
                    let digits = &text[1..];
                    let id_token = tokeniser.next_token()?.ok_or(VcdError::ParseError {
                        token: text.to_string(),
                        line: token.line,
                    })?;
                    let id = IdCode::new(&id_token.text);
                    let width = self.symbols.decl(&id).map(|d| d.width).unwrap_or(digits.len() as u32);
                    let value = Value::binary_vector(digits, width).ok_or_else(|| VcdError::ValueError {
                        reason: format!("malformed binary vector {digits:?}"),
                    })?;
                    self.engine.record(id, value);
                }
                'r' | 'R' => {
                    let digits = &text[1..];
                    let id_token = tokeniser.next_token()?.ok_or(VcdError::ParseError {
                        token: text.to_string(),
                        line: token.line,
                    })?;
                    let id = IdCode::new(&id_token.text);
                    self.engine.record(id, Value::real_vector(digits));
                }
                _ => {
                    return Err(VcdError::ParseError {
                        token: text.to_string(),
                        line: token.line,
                    })
                }
            }
        }

        self.engine.flush(&mut self.watchers, &self.symbols);

        Ok(())
    }
}
