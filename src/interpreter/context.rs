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
 * Call frames.
 *
 * One `Context` exists per active call (function, pattern, or the program
 * itself). It owns the frame's scope chain and enforces the declaration
 * rules for variables, functions and patterns.
 */

use std::rc::Rc;

use crate::ast::{Declarator, FunctionDecl, PatternDecl};
use crate::error::{ErrorKind, InterpreterError};
use crate::interpreter::scope::{Callable, CallableKey, Entry, Scope, ScopeFlags, Variable};
use crate::span::Span;
use crate::value::ValueType;

/// Name of the frame that runs the top level of a program.
pub const MAIN_CONTEXT: &str = "Main Program";

#[derive(Debug, Clone)]
pub struct Context {
    /// Shown in stack traces.
    pub name: String,

    /// Position of the node this frame evaluated last.
    pub span: Span,

    /// Declared return type of the running callable.
    pub returns: ValueType,

    scopes: Vec<Scope>,
}

impl Context {
    pub fn new(name: impl Into<String>, span: Span, returns: ValueType) -> Self {
        Self {
            name: name.into(),
            span,
            returns,
            scopes: vec![Scope::new()],
        }
    }

    /* ==========================================================================
     * SCOPES
     * ========================================================================== */

    pub fn push_scope(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn scope(&self, index: usize) -> Option<&Scope> {
        self.scopes.get(index)
    }

    pub fn scope_mut(&mut self, index: usize) -> Option<&mut Scope> {
        self.scopes.get_mut(index)
    }

    /* ==========================================================================
     * FLAGS
     * ========================================================================== */

    /// True when any scope of the frame carries `flag`.
    pub fn get_flag(&self, flag: ScopeFlags) -> bool {
        self.scopes.iter().any(|s| s.flags.contains(flag))
    }

    /// True when the scopes together carry every bit of `flags`, even if
    /// no single scope does.
    pub fn flag_sum(&self, flags: ScopeFlags) -> bool {
        let mut sum = ScopeFlags::NONE;
        for scope in &self.scopes {
            sum.insert(scope.flags);
            if sum.contains(flags) {
                return true;
            }
        }
        false
    }

    pub fn set_flag(&mut self, flag: ScopeFlags) {
        if let Some(last) = self.scopes.last_mut() {
            last.flags.insert(flag);
        }
    }

    pub fn unset_flag(&mut self, flag: ScopeFlags) {
        if let Some(last) = self.scopes.last_mut() {
            last.flags.remove(flag);
        }
    }

    /// Flags of the innermost scope only.
    pub fn last_flags(&self) -> ScopeFlags {
        self.scopes.last().map(|s| s.flags).unwrap_or_default()
    }

    /* ==========================================================================
     * VARIABLES
     * ========================================================================== */

    /// Index of the innermost scope declaring `name`.
    pub fn find_variable(&self, name: &str) -> Option<usize> {
        self.scopes
            .iter()
            .rposition(|scope| scope.variable(name).is_some())
    }

    /// Declares a variable in the innermost scope.
    ///
    /// # Errors
    /// `VariableRedefinition` when the name exists anywhere in the frame.
    pub fn add_variable(&mut self, variable: Variable) -> Result<(), InterpreterError> {
        let name = &variable.declarator.name;
        if let Some(existing) = self.scopes.iter().find_map(|s| s.variable(name)) {
            return Err(InterpreterError::new(ErrorKind::VariableRedefinition)
                .with_arg(name.as_str())
                .with_arg(existing.declarator.span));
        }
        self.insert_variable(variable);
        Ok(())
    }

    /// Binds a variable in the innermost scope without the redefinition
    /// check, shadowing outer bindings of the same name.
    pub fn insert_variable(&mut self, variable: Variable) {
        if let Some(last) = self.scopes.last_mut() {
            last.insert_variable(variable);
        }
    }

    /* ==========================================================================
     * FUNCTIONS AND PATTERNS
     * ========================================================================== */

    /// Fails when `key` names a builtin anywhere in this frame.
    pub fn check_builtin(&self, key: &CallableKey) -> Result<(), InterpreterError> {
        let builtin = self
            .scopes
            .iter()
            .filter_map(|s| s.entry(key))
            .any(|entry| entry.builtin.is_some());
        if builtin {
            return Err(InterpreterError::new(ErrorKind::BuiltinRedefinition).with_arg(key.0.as_str()));
        }
        Ok(())
    }

    /// Declares or defines a function.
    ///
    /// # Behavior
    /// - A prior declaration without a body may be completed once, with an
    ///   identical signature
    /// - `OVERRIDE` completes the prior declaration in place; otherwise the
    ///   definition lands in the innermost scope
    /// - A prior definition with a body can never be replaced
    pub fn add_function(&mut self, decl: Rc<FunctionDecl>) -> Result<(), InterpreterError> {
        let callable = Callable::Function(decl.clone());
        let key = callable.key();
        let mut completed = false;
        let mut replaced = false;

        for index in 0..self.scopes.len() {
            let Some(old) = self.scopes[index].entry(&key) else {
                continue;
            };
            if old.builtin.is_some() {
                return Err(redefinition(ErrorKind::BuiltinRedefinition, &decl.name, None));
            }

            let old = match &old.callable {
                Callable::Function(old) => old.clone(),
                Callable::Pattern(p) => {
                    return Err(redefinition(
                        ErrorKind::PatternRedefinitionWithFunction,
                        &decl.name,
                        Some(p.span),
                    ));
                }
            };

            if old.returns != decl.returns {
                return Err(InterpreterError::new(ErrorKind::FunctionDefinitionReturnMismatch)
                    .with_arg(decl.name.as_str())
                    .with_arg(old.span)
                    .with_arg(decl.returns)
                    .with_arg(old.returns));
            }
            if old.has_body() {
                return Err(redefinition(ErrorKind::FunctionRedefinition, &decl.name, Some(old.span)));
            }
            if !decl.has_body() {
                return Err(redefinition(ErrorKind::FunctionRedeclaration, &decl.name, Some(old.span)));
            }

            for (new_param, old_param) in decl.params.iter().zip(old.params.iter()) {
                check_param(
                    ErrorKind::FunctionDefinitionParamTypeMismatch,
                    &decl.name,
                    old.span,
                    new_param,
                    old_param,
                )?;
            }

            if decl.overrides {
                self.scopes[index].insert_callable(callable.clone(), None);
                replaced = true;
            }
            completed = true;
        }

        if decl.overrides && !completed {
            return Err(InterpreterError::new(ErrorKind::BadFunctionOverride).with_arg(decl.name.as_str()));
        }
        if !replaced {
            self.insert_callable(callable);
        }
        Ok(())
    }

    /// Declares or defines a pattern. Same rules as [`Context::add_function`].
    pub fn add_pattern(&mut self, decl: Rc<PatternDecl>) -> Result<(), InterpreterError> {
        let callable = Callable::Pattern(decl.clone());
        let key = callable.key();
        let mut completed = false;
        let mut replaced = false;

        for index in 0..self.scopes.len() {
            let Some(old) = self.scopes[index].entry(&key) else {
                continue;
            };
            if old.builtin.is_some() {
                return Err(redefinition(ErrorKind::BuiltinRedefinition, &decl.name, None));
            }

            let old = match &old.callable {
                Callable::Pattern(old) => old.clone(),
                Callable::Function(f) => {
                    return Err(redefinition(
                        ErrorKind::FunctionRedefinitionWithPattern,
                        &decl.name,
                        Some(f.span),
                    ));
                }
            };

            if old.has_body() {
                return Err(redefinition(ErrorKind::PatternRedefinition, &decl.name, Some(old.span)));
            }
            if !decl.has_body() {
                return Err(redefinition(ErrorKind::PatternRedeclaration, &decl.name, Some(old.span)));
            }
            check_param(
                ErrorKind::PatternDefinitionParamTypeMismatch,
                &decl.name,
                old.span,
                &decl.param,
                &old.param,
            )?;

            if decl.overrides {
                self.scopes[index].insert_callable(callable.clone(), None);
                replaced = true;
            }
            completed = true;
        }

        if decl.overrides && !completed {
            return Err(InterpreterError::new(ErrorKind::BadPatternOverride).with_arg(decl.name.as_str()));
        }
        if !replaced {
            self.insert_callable(callable);
        }
        Ok(())
    }

    fn insert_callable(&mut self, callable: Callable) {
        if let Some(last) = self.scopes.last_mut() {
            last.insert_callable(callable, None);
        }
    }

    /// Finds the innermost callable registered under `name` / `arity`.
    ///
    /// # Errors
    /// `NotImplementedFunction` / `NotImplementedPattern` when the match is
    /// a declaration that never received a body.
    pub fn resolve(&self, name: &str, arity: usize) -> Result<Option<Entry>, InterpreterError> {
        let key = (name.to_string(), arity);
        let Some(entry) = self.scopes.iter().rev().find_map(|s| s.entry(&key)) else {
            return Ok(None);
        };

        if entry.builtin.is_none() && !entry.callable.has_body() {
            let kind = match entry.callable {
                Callable::Function(_) => ErrorKind::NotImplementedFunction,
                Callable::Pattern(_) => ErrorKind::NotImplementedPattern,
            };
            return Err(InterpreterError::new(kind)
                .with_arg(name)
                .with_arg(entry.callable.span()));
        }

        Ok(Some(entry.clone()))
    }
}

fn redefinition(kind: ErrorKind, name: &str, old: Option<Span>) -> InterpreterError {
    let err = InterpreterError::new(kind).with_arg(name);
    match old {
        Some(span) => err.with_arg(span),
        None => err,
    }
}

fn check_param(
    kind: ErrorKind,
    name: &str,
    old_span: Span,
    new: &Declarator,
    old: &Declarator,
) -> Result<(), InterpreterError> {
    if new.matches(old) {
        return Ok(());
    }
    Err(InterpreterError::new(kind)
        .with_arg(name)
        .with_arg(old_span)
        .with_arg(new)
        .with_arg(old))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Stmt, StmtKind};
    use crate::value::Value;

    fn decl(name: &str, mutable: bool) -> Declarator {
        Declarator::new(Span::new(1, 1), mutable, ValueType::Number, name)
    }

    fn body() -> Stmt {
        let expr = Expr::literal(Value::Number(1.0), Span::new(1, 1));
        Stmt::new(StmtKind::Expression(expr), Span::new(1, 1))
    }

    fn function(name: &str, returns: ValueType, overrides: bool, has_body: bool) -> Rc<FunctionDecl> {
        Rc::new(FunctionDecl {
            span: Span::new(1, 1),
            name: name.to_string(),
            overrides,
            params: vec![decl("x", false)],
            returns,
            body: if has_body { body() } else { Stmt::empty(Span::new(1, 1)) },
        })
    }

    fn pattern(name: &str, has_body: bool) -> Rc<PatternDecl> {
        Rc::new(PatternDecl {
            span: Span::new(2, 1),
            name: name.to_string(),
            overrides: false,
            param: decl("x", false),
            body: if has_body { body() } else { Stmt::empty(Span::new(2, 1)) },
        })
    }

    fn kind(result: Result<(), InterpreterError>) -> ErrorKind {
        match result {
            Err(e) => e.kind,
            Ok(()) => panic!("expected an error"),
        }
    }

    #[test]
    fn variables_are_unique_across_the_scope_chain() {
        let mut ctx = Context::new(MAIN_CONTEXT, Span::new(1, 1), ValueType::Nothing);
        ctx.add_variable(Variable::new(decl("a", false), Value::Number(1.0))).unwrap();
        ctx.push_scope(Scope::new());

        let err = kind(ctx.add_variable(Variable::new(decl("a", true), Value::Nothing)));
        assert_eq!(err, ErrorKind::VariableRedefinition);

        ctx.add_variable(Variable::new(decl("b", false), Value::Nothing)).unwrap();
        ctx.pop_scope();
        ctx.push_scope(Scope::new());
        ctx.add_variable(Variable::new(decl("b", false), Value::Nothing)).unwrap();
    }

    #[test]
    fn inserted_bindings_shadow_outer_ones() {
        let mut ctx = Context::new(MAIN_CONTEXT, Span::new(1, 1), ValueType::Nothing);
        ctx.insert_variable(Variable::new(decl("VALUE", false), Value::Number(1.0)));
        ctx.push_scope(Scope::new());
        ctx.insert_variable(Variable::new(decl("VALUE", false), Value::Number(2.0)));

        assert_eq!(ctx.find_variable("VALUE"), Some(1));
        ctx.pop_scope();
        assert_eq!(ctx.find_variable("VALUE"), Some(0));
    }

    #[test]
    fn flag_sum_spans_several_scopes() {
        let mut ctx = Context::new(MAIN_CONTEXT, Span::new(1, 1), ValueType::Nothing);
        ctx.set_flag(ScopeFlags::MATCH);
        ctx.push_scope(Scope::new());
        assert!(!ctx.flag_sum(ScopeFlags::MATCH | ScopeFlags::LAST_CONDITION));

        ctx.set_flag(ScopeFlags::LAST_CONDITION);
        assert!(ctx.flag_sum(ScopeFlags::MATCH | ScopeFlags::LAST_CONDITION));
        assert!(!ctx.get_flag(ScopeFlags::MATCH | ScopeFlags::LAST_CONDITION));
    }

    #[test]
    fn forward_declarations_can_be_completed_once() {
        let mut ctx = Context::new(MAIN_CONTEXT, Span::new(1, 1), ValueType::Nothing);
        ctx.add_function(function("f", ValueType::Number, false, false)).unwrap();

        let err = kind(ctx.add_function(function("f", ValueType::Number, false, false)));
        assert_eq!(err, ErrorKind::FunctionRedeclaration);

        ctx.add_function(function("f", ValueType::Number, false, true)).unwrap();
        assert!(ctx.resolve("f", 1).unwrap().is_some());

        let err = kind(ctx.add_function(function("f", ValueType::Number, false, true)));
        assert_eq!(err, ErrorKind::FunctionRedefinition);
    }

    #[test]
    fn signature_mismatches_are_rejected() {
        let mut ctx = Context::new(MAIN_CONTEXT, Span::new(1, 1), ValueType::Nothing);
        ctx.add_function(function("f", ValueType::Number, false, false)).unwrap();

        let err = kind(ctx.add_function(function("f", ValueType::Text, false, true)));
        assert_eq!(err, ErrorKind::FunctionDefinitionReturnMismatch);

        let mut other = (*function("f", ValueType::Number, false, true)).clone();
        other.params = vec![decl("x", true)];
        let err = kind(ctx.add_function(Rc::new(other)));
        assert_eq!(err, ErrorKind::FunctionDefinitionParamTypeMismatch);
    }

    #[test]
    fn override_needs_a_prior_declaration() {
        let mut ctx = Context::new(MAIN_CONTEXT, Span::new(1, 1), ValueType::Nothing);
        let err = kind(ctx.add_function(function("f", ValueType::Number, true, true)));
        assert_eq!(err, ErrorKind::BadFunctionOverride);

        ctx.add_function(function("f", ValueType::Number, false, false)).unwrap();
        ctx.push_scope(Scope::new());
        ctx.add_function(function("f", ValueType::Number, true, true)).unwrap();
        ctx.pop_scope();

        // the override replaced the outer declaration in place
        assert!(ctx.resolve("f", 1).unwrap().is_some());
    }

    #[test]
    fn unimplemented_callables_fail_on_resolve() {
        let mut ctx = Context::new(MAIN_CONTEXT, Span::new(1, 1), ValueType::Nothing);
        ctx.add_pattern(pattern("p", false)).unwrap();

        let err = ctx.resolve("p", 1).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotImplementedPattern);
        assert!(ctx.resolve("p", 2).unwrap().is_none());
    }

    #[test]
    fn functions_and_patterns_share_a_namespace() {
        let mut ctx = Context::new(MAIN_CONTEXT, Span::new(1, 1), ValueType::Nothing);
        ctx.add_pattern(pattern("p", true)).unwrap();
        let err = kind(ctx.add_function(function("p", ValueType::Number, false, true)));
        assert_eq!(err, ErrorKind::PatternRedefinitionWithFunction);

        ctx.add_function(function("f", ValueType::Number, false, true)).unwrap();
        let err = kind(ctx.add_pattern(pattern("f", true)));
        assert_eq!(err, ErrorKind::FunctionRedefinitionWithPattern);
    }
}
