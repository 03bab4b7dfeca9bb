//! The symbol table mapping identifier codes to declared variables, and
//! resolving cross-module references (XMRs) in both directions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::VcdError;
use crate::idcode::IdCode;

/// A single `$var` declaration.
///
/// `path` is the full hierarchical name (scope names followed by the
/// variable's own name); `bit_range` preserves the raw `[msb:lsb]` suffix on
/// the identifier, if present, without interpreting it.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    /// The VCD variable type keyword (`wire`, `reg`, `integer`, ...).
    pub var_type: String,
    /// Declared bit width.
    pub width: u32,
    /// Full hierarchical path, scope names followed by the variable name.
    pub path: Vec<String>,
    /// The raw bit-range suffix on the identifier, if the `$var` line had
    /// one (e.g. `data [7:0]` declares `bit_range = Some("[7:0]")`).
    pub bit_range: Option<String>,
}

/// Maps identifier codes to their declared variables, and resolves XMRs.
///
/// One identifier code may have more than one [`VarDecl`] when a signal is
/// aliased under multiple hierarchical paths; the first declaration seen is
/// canonical for [`SymbolTable::get_xmr`].
#[derive(Debug, Default)]
pub struct SymbolTable {
    declarations: HashMap<IdCode, Vec<VarDecl>>,
    xmr_cache: RefCell<HashMap<IdCode, Rc<str>>>,
    /// Declaration order of identifier codes, for stable `show_nets` output.
    order: Vec<IdCode>,
}

impl SymbolTable {
    /// Creates an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a `$var` declaration for the given identifier code.
    pub fn declare(&mut self, id: IdCode, decl: VarDecl) {
        if !self.declarations.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.declarations.entry(id).or_default().push(decl);
    }

    /// Returns every declared identifier code, in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &IdCode> {
        self.order.iter()
    }

    /// Returns the canonical (first-declared) [`VarDecl`] for an identifier
    /// code, if it exists.
    pub fn decl(&self, id: &IdCode) -> Option<&VarDecl> {
        self.declarations.get(id).and_then(|v| v.first())
    }

    /// Returns all declarations (aliases included) for an identifier code.
    pub fn aliases(&self, id: &IdCode) -> &[VarDecl] {
        self.declarations
            .get(id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Finds the identifier code whose canonical path positionally matches
    /// the dotted XMR, component by component.
    ///
    /// This mirrors the reference implementation's linear scan: for each
    /// known identifier code, its first declared reference path is compared
    /// segment-by-segment against the dotted XMR. Scope keyword (module,
    /// task, ...) is ignored — only the name at each depth participates in
    /// the match, per this crate's open-question resolution.
    pub fn get_id(&self, xmr: &str) -> Result<IdCode, VcdError> {
        let search_path: Vec<&str> = xmr.split('.').collect();

        for id in &self.order {
            let decl = match self.declarations.get(id).and_then(|v| v.first()) {
                Some(d) => d,
                None => continue,
            };
            if decl.path.len() != search_path.len() {
                continue;
            }
            if decl
                .path
                .iter()
                .zip(search_path.iter())
                .all(|(have, want)| have == want)
            {
                return Ok(id.clone());
            }
        }

        Err(VcdError::UnknownXmr {
            path: xmr.to_string(),
        })
    }

    /// Given an identifier code, returns its canonical dotted XMR, computed
    /// once and memoised.
    pub fn get_xmr(&self, id: &IdCode) -> Result<Rc<str>, VcdError> {
        if let Some(cached) = self.xmr_cache.borrow().get(id) {
            return Ok(cached.clone());
        }

        let decl = self.decl(id).ok_or_else(|| VcdError::UnknownIdCode {
            id: id.as_str().to_string(),
        })?;
        let xmr: Rc<str> = Rc::from(decl.path.join("."));
        self.xmr_cache.borrow_mut().insert(id.clone(), xmr.clone());
        Ok(xmr)
    }

    /// Returns every XMR declared in the file, in declaration order.
    pub fn show_nets(&self) -> Result<Vec<Rc<str>>, VcdError> {
        self.order.iter().map(|id| self.get_xmr(id)).collect()
    }
}
