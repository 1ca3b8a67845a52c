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
 * Variable resolution.
 *
 * A name is looked up in the current frame, innermost scope first, then
 * in the global frame. Reference parameters carry the [`Site`] of the
 * caller's variable; reads and writes go straight to that site.
 */

use crate::ast::Expr;
use crate::diagnostics::Sink;
use crate::error::{ErrorKind, InterpreterError};
use crate::interpreter::scope::{ScopeFlags, Site, Variable};
use crate::interpreter::{Eval, Interpreter};
use crate::value::Value;

/// Name bound by a pipe to the value flowing through it.
pub const PIPE: &str = "PIPE";

/// Name bound by a match or pattern to its subject.
pub const VALUE: &str = "VALUE";

pub fn is_reserved(name: &str) -> bool {
    name == PIPE || name == VALUE
}

/// The error for a name nothing declares. The reserved names get their own.
pub fn undefined(name: &str) -> InterpreterError {
    match name {
        PIPE => InterpreterError::new(ErrorKind::PipeNotInPipeline),
        VALUE => InterpreterError::new(ErrorKind::ValueNotInMatch),
        _ => InterpreterError::new(ErrorKind::UndefinedVariable).with_arg(name),
    }
}

impl<S: Sink> Interpreter<S> {
    /// Evaluates `expr` with ExpectValue set on the innermost scope, so a
    /// call to a Nothing-returning function inside it fails. The previous
    /// state of the flag is restored afterwards.
    pub(crate) fn eval_value(&mut self, expr: &Expr) -> Eval<Value> {
        let had = self
            .current()
            .last_flags()
            .contains(ScopeFlags::EXPECT_VALUE);
        self.current_mut().set_flag(ScopeFlags::EXPECT_VALUE);

        let result = self.eval_expr(expr);

        if !had {
            self.current_mut().unset_flag(ScopeFlags::EXPECT_VALUE);
        }
        result
    }

    /// Where `name` is declared, as seen from the current frame.
    pub(crate) fn find_site(&self, name: &str) -> Option<Site> {
        let context = self.current_index();
        if let Some(scope) = self.stack[context].find_variable(name) {
            return Some(Site {
                context,
                scope,
                name: name.to_string(),
            });
        }
        if context != 0 {
            if let Some(scope) = self.global().find_variable(name) {
                return Some(Site {
                    context: 0,
                    scope,
                    name: name.to_string(),
                });
            }
        }
        None
    }

    /// Where the storage behind `site` lives: the alias target for a
    /// reference parameter, otherwise `site` itself.
    pub(crate) fn owner_site(&self, site: Site) -> Site {
        match self.variable_at(&site).and_then(|v| v.alias.clone()) {
            Some(owner) => owner,
            None => site,
        }
    }

    pub(crate) fn variable_at(&self, site: &Site) -> Option<&Variable> {
        self.stack
            .get(site.context)?
            .scope(site.scope)?
            .variable(&site.name)
    }

    fn variable_at_mut(&mut self, site: &Site) -> Option<&mut Variable> {
        self.stack
            .get_mut(site.context)?
            .scope_mut(site.scope)?
            .variable_mut(&site.name)
    }

    /// Reads the value of `name`.
    ///
    /// # Errors
    /// - `PipeNotInPipeline` / `ValueNotInMatch` / `UndefinedVariable`
    /// - `UninitializedVariable` with the declaration position
    pub(crate) fn read_variable(&self, name: &str) -> Result<Value, InterpreterError> {
        let site = self.find_site(name).ok_or_else(|| undefined(name))?;
        let owner = self.owner_site(site);
        let variable = self.variable_at(&owner).ok_or_else(|| undefined(name))?;

        if !variable.initialized {
            return Err(InterpreterError::new(ErrorKind::UninitializedVariable)
                .with_arg(name)
                .with_arg(variable.declarator.span));
        }
        Ok(variable.value.clone())
    }

    /// Stores `value` at `site` and marks the variable initialized.
    pub(crate) fn write_variable(&mut self, site: &Site, value: Value) -> Result<(), InterpreterError> {
        let variable = self
            .variable_at_mut(site)
            .ok_or_else(|| undefined(&site.name))?;
        variable.value = value;
        variable.initialized = true;
        Ok(())
    }
}
