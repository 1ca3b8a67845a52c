/*
 * ==========================================================================
 * VERBOSE - Say What You Mean!
 * ==========================================================================
 * 
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * 
 * License:
 * This file is part of the VERBOSE programming language project.
 * 
 * VERBOSE is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */


/*!
 * Lexical scopes.
 *
 * A scope owns the variables and callables declared inside one block plus
 * a small set of control-flow flags. Scopes never point at each other; a
 * `Context` keeps them in an ordered list, innermost last.
 */

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{Declarator, FunctionDecl, PatternDecl};
use crate::globals::Builtin;
use crate::span::Span;
use crate::value::Value;

/* ============================================================================
 * Flags
 * ============================================================================
 */

bitflags::bitflags! {
    /// Control-flow flags carried by a scope.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScopeFlags: u8 {
        const NONE = 0;

        /// Inside a `WHILE` body; `SKIP` and `STOP` are legal.
        const LOOP = 1 << 0;

        /// Inside a function frame; `RETURN` is legal.
        const CALL = 1 << 1;

        /// Inside a match body or pattern frame; no jumps at all.
        const MATCH = 1 << 2;

        /// The last `IF` evaluated in this scope took its branch.
        const LAST_CONDITION = 1 << 3;

        /// The expression being evaluated must produce a value.
        const EXPECT_VALUE = 1 << 5;
    }
}

impl Default for ScopeFlags {
    fn default() -> Self {
        ScopeFlags::empty()
    }
}

/* ============================================================================
 * Records
 * ============================================================================
 */

/// Where a variable physically lives: call-stack index, scope index, name.
///
/// A mutable parameter passed by reference stores the site of the
/// caller's variable. Sites always name a non-aliased variable, so one hop
/// reaches the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub context: usize,
    pub scope: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub declarator: Declarator,
    pub value: Value,

    /// Owner of the storage when this variable is a reference parameter.
    pub alias: Option<Site>,

    pub initialized: bool,
}

impl Variable {
    pub fn new(declarator: Declarator, value: Value) -> Self {
        Self {
            declarator,
            value,
            alias: None,
            initialized: true,
        }
    }

    /// A declared variable without a value yet.
    pub fn uninitialized(declarator: Declarator) -> Self {
        Self {
            declarator,
            value: Value::Nothing,
            alias: None,
            initialized: false,
        }
    }

    pub fn with_alias(mut self, alias: Option<Site>) -> Self {
        self.alias = alias;
        self
    }
}

/// A user or builtin function or pattern.
#[derive(Debug, Clone)]
pub enum Callable {
    Function(Rc<FunctionDecl>),
    Pattern(Rc<PatternDecl>),
}

impl Callable {
    pub fn name(&self) -> &str {
        match self {
            Callable::Function(f) => &f.name,
            Callable::Pattern(p) => &p.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Callable::Function(f) => f.span,
            Callable::Pattern(p) => p.span,
        }
    }

    pub fn has_body(&self) -> bool {
        match self {
            Callable::Function(f) => f.has_body(),
            Callable::Pattern(p) => p.has_body(),
        }
    }

    /// Lookup key: name plus parameter count. Patterns always take one.
    pub fn key(&self) -> CallableKey {
        match self {
            Callable::Function(f) => (f.name.clone(), f.params.len()),
            Callable::Pattern(p) => (p.name.clone(), 1),
        }
    }
}

pub type CallableKey = (String, usize);

#[derive(Debug, Clone)]
pub struct Entry {
    pub callable: Callable,

    /// Set for entries of the standard library.
    pub builtin: Option<Builtin>,
}

/* ============================================================================
 * Scope
 * ============================================================================
 */

#[derive(Debug, Clone, Default)]
pub struct Scope {
    variables: HashMap<String, Variable>,
    callables: HashMap<CallableKey, Entry>,
    pub flags: ScopeFlags,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(flags: ScopeFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.get_mut(name)
    }

    /// Inserts or replaces a variable in this scope only.
    pub fn insert_variable(&mut self, variable: Variable) {
        self.variables
            .insert(variable.declarator.name.clone(), variable);
    }

    pub fn entry(&self, key: &CallableKey) -> Option<&Entry> {
        self.callables.get(key)
    }

    /// Inserts or replaces a callable in this scope only.
    pub fn insert_callable(&mut self, callable: Callable, builtin: Option<Builtin>) {
        self.callables
            .insert(callable.key(), Entry { callable, builtin });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_sets_combine_and_clear() {
        let mut flags = ScopeFlags::NONE;
        flags.insert(ScopeFlags::LOOP | ScopeFlags::MATCH);

        assert!(flags.contains(ScopeFlags::LOOP));
        assert!(flags.contains(ScopeFlags::LOOP | ScopeFlags::MATCH));
        assert!(!flags.contains(ScopeFlags::CALL));

        flags.remove(ScopeFlags::LOOP);
        assert!(!flags.intersects(ScopeFlags::LOOP));
        assert!(flags.intersects(ScopeFlags::MATCH | ScopeFlags::CALL));
    }

    #[test]
    fn new_scopes_start_without_flags() {
        assert!(Scope::new().flags.is_empty());
        assert_eq!(Scope::with_flags(ScopeFlags::MATCH).flags, ScopeFlags::MATCH);
    }
}
