//! Named, late-bound rules. Symbols are how the rule graph closes cycles.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::rule::{IntoRule, Rule};

struct SymbolInner {
    name: SmolStr,
    def: RefCell<Option<Rc<Rule>>>,
}

/// A handle into a grammar's symbol table. Cloning a `Symbol` clones the
/// handle, not the definition; all clones observe the same `define()` call.
#[derive(Clone)]
pub struct Symbol(Rc<SymbolInner>);

impl Symbol {
    pub fn new(name: impl Into<SmolStr>) -> Symbol {
        Symbol(Rc::new(SymbolInner {
            name: name.into(),
            def: RefCell::new(None),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Assign this symbol's rule. Reassigning an already-defined symbol is a
    /// programmer error: symbols are meant to be defined exactly once, at
    /// grammar construction time.
    pub fn define(&self, rule: impl IntoRule) {
        let mut slot = self.0.def.borrow_mut();
        if slot.is_some() {
            panic!("symbol '{}' is already defined", self.0.name);
        }
        *slot = Some(rule.into_rule());
    }

    pub fn is_defined(&self) -> bool {
        self.0.def.borrow().is_some()
    }

    pub fn definition(&self) -> Option<Rc<Rule>> {
        self.0.def.borrow().clone()
    }

    /// Identity comparison, used by the memo cache and by cycle-aware
    /// traversals (two `Symbol` handles are the same symbol iff they share
    /// the same backing cell).
    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0.name)
    }
}
