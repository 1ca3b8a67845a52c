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
 * The Verbose standard library.
 *
 * Builtins are ordinary function and pattern declarations without a body,
 * tagged with the native routine that runs in their place. They live in a
 * dedicated scope of the global frame, so user code can neither redefine
 * nor override them.
 */

pub mod text;

use std::rc::Rc;

use crate::ast::{Declarator, FunctionDecl, PatternDecl, Stmt};
use crate::interpreter::scope::{Callable, Scope};
use crate::span::Span;
use crate::value::ValueType;

/// Native routines behind builtin callables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Print,
    Quit,
    First,
    Last,
    Body,
    Tail,
    Split,
    BackSplit,
    FizzBuzz,
}

/// `(mutable, type, name)` of one builtin parameter.
type ParamSpec = (bool, ValueType, &'static str);

struct FunctionSpec {
    builtin: Builtin,
    name: &'static str,
    returns: ValueType,
    params: &'static [ParamSpec],
}

const TEXT_T: &[ParamSpec] = &[(false, ValueType::Text, "t")];

const FUNCTIONS: &[FunctionSpec] = &[
    // FUNCTION Print WITH TEXT t RETURNS NOTHING
    FunctionSpec {
        builtin: Builtin::Print,
        name: "Print",
        returns: ValueType::Nothing,
        params: TEXT_T,
    },
    // FUNCTION Quit RETURNS NOTHING
    FunctionSpec {
        builtin: Builtin::Quit,
        name: "Quit",
        returns: ValueType::Nothing,
        params: &[],
    },
    FunctionSpec {
        builtin: Builtin::First,
        name: "First",
        returns: ValueType::Text,
        params: TEXT_T,
    },
    FunctionSpec {
        builtin: Builtin::Last,
        name: "Last",
        returns: ValueType::Text,
        params: TEXT_T,
    },
    FunctionSpec {
        builtin: Builtin::Body,
        name: "Body",
        returns: ValueType::Text,
        params: TEXT_T,
    },
    FunctionSpec {
        builtin: Builtin::Tail,
        name: "Tail",
        returns: ValueType::Text,
        params: TEXT_T,
    },
    // FUNCTION Split WITH TEXT source, MUTABLE TEXT head, MUTABLE TEXT tail RETURNS TEXT
    FunctionSpec {
        builtin: Builtin::Split,
        name: "Split",
        returns: ValueType::Text,
        params: &[
            (false, ValueType::Text, "source"),
            (true, ValueType::Text, "head"),
            (true, ValueType::Text, "tail"),
        ],
    },
    // FUNCTION BackSplit WITH TEXT source, MUTABLE TEXT body, MUTABLE TEXT tip RETURNS TEXT
    FunctionSpec {
        builtin: Builtin::BackSplit,
        name: "BackSplit",
        returns: ValueType::Text,
        params: &[
            (false, ValueType::Text, "source"),
            (true, ValueType::Text, "body"),
            (true, ValueType::Text, "tip"),
        ],
    },
];

fn declarator(&(mutable, ty, name): &ParamSpec) -> Declarator {
    Declarator::new(Span::default(), mutable, ty, name)
}

/// Builds the scope holding every builtin.
pub fn builtin_scope() -> Scope {
    let mut scope = Scope::new();

    for spec in FUNCTIONS {
        let decl = FunctionDecl {
            span: Span::default(),
            name: spec.name.to_string(),
            overrides: false,
            params: spec.params.iter().map(declarator).collect(),
            returns: spec.returns,
            body: Stmt::empty(Span::default()),
        };
        scope.insert_callable(Callable::Function(Rc::new(decl)), Some(spec.builtin));
    }

    // PATTERN FizzBuzz WITH NUMBER n
    let fizz_buzz = PatternDecl {
        span: Span::default(),
        name: "FizzBuzz".to_string(),
        overrides: false,
        param: declarator(&(false, ValueType::Number, "n")),
        body: Stmt::empty(Span::default()),
    };
    scope.insert_callable(Callable::Pattern(Rc::new(fizz_buzz)), Some(Builtin::FizzBuzz));

    scope
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_is_registered() {
        let scope = builtin_scope();
        for (name, arity) in [
            ("Print", 1),
            ("Quit", 0),
            ("First", 1),
            ("Last", 1),
            ("Body", 1),
            ("Tail", 1),
            ("Split", 3),
            ("BackSplit", 3),
            ("FizzBuzz", 1),
        ] {
            let entry = scope.entry(&(name.to_string(), arity));
            assert!(entry.is_some_and(|e| e.builtin.is_some()), "{name}/{arity}");
        }
    }
}
