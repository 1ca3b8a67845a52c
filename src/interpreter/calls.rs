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
 * Function, pattern and builtin invocation.
 *
 * A call evaluates its arguments in the caller's frame, then pushes a new
 * [`Context`] holding the parameters. A mutable parameter bound to a
 * mutable variable becomes a reference: it stores the [`Site`] of the
 * caller's storage, so assignments inside the callee reach the caller.
 */

use std::rc::Rc;

use tracing::trace;

use crate::ast::{Declarator, Expr, ExprKind, FunctionDecl, PatternDecl};
use crate::diagnostics::{Sink, WarningKind};
use crate::error::{ErrorKind, InterpreterError, MessageArg};
use crate::globals::{text, Builtin};
use crate::interpreter::casting::{as_number, as_text, as_type};
use crate::interpreter::context::Context;
use crate::interpreter::helpers::VALUE;
use crate::interpreter::scope::{Callable, ScopeFlags, Site, Variable};
use crate::interpreter::statements::Flow;
use crate::interpreter::{Eval, Halt, Interpreter};
use crate::span::Span;
use crate::value::{Value, ValueType};

impl<S: Sink> Interpreter<S> {
    /// `CALL name [WITH args] NOW`
    ///
    /// Callables are looked up in the global frame first, then in the
    /// current one, by name and argument count.
    pub(crate) fn eval_call(&mut self, name: &str, args: &[Expr], span: Span) -> Eval<Value> {
        let entry = match self.global().resolve(name, args.len())? {
            Some(entry) => Some(entry),
            None => self.current().resolve(name, args.len())?,
        };
        let Some(entry) = entry else {
            return Err(InterpreterError::new(ErrorKind::UndefinedFunctionOrPattern)
                .with_arg(name)
                .into());
        };

        trace!(name, arity = args.len(), "call");
        match entry.callable {
            Callable::Function(decl) => self.call_function(decl, entry.builtin, args, span),
            Callable::Pattern(decl) => match args.first() {
                Some(arg) => self.call_pattern(decl, entry.builtin, arg, span),
                None => Ok(Value::Nothing),
            },
        }
    }

    fn call_function(
        &mut self,
        decl: Rc<FunctionDecl>,
        builtin: Option<Builtin>,
        args: &[Expr],
        span: Span,
    ) -> Eval<Value> {
        if decl.returns == ValueType::Nothing && self.current().get_flag(ScopeFlags::EXPECT_VALUE) {
            return Err(InterpreterError::new(ErrorKind::ReturnedNothing).into());
        }

        let mut params = Vec::with_capacity(args.len());
        for (arg, param) in args.iter().zip(&decl.params) {
            let site = self.argument_site(arg);
            let value = self.eval_expr(arg)?;
            params.push(self.bind(param, as_type(&value, param.ty), site));
        }

        let mut context = Context::new(decl.name.as_str(), span, decl.returns);
        for param in params {
            context.insert_variable(param);
        }
        context.set_flag(ScopeFlags::CALL);

        self.mark(span);
        self.stack.push(context);
        let result = match builtin {
            Some(builtin) => self.run_builtin(builtin),
            None => self.exec_stmt(&decl.body).map(|flow| match flow {
                Flow::Return(value) => value,
                _ => self.fell_through(&decl),
            }),
        };
        let value = result?;
        self.stack.pop();

        if decl.returns == ValueType::Nothing {
            return Ok(Value::Nothing);
        }
        Ok(value)
    }

    /// Result of a function body that ended without `RETURN`: whatever was
    /// evaluated last.
    fn fell_through(&mut self, decl: &FunctionDecl) -> Value {
        if decl.returns != ValueType::Nothing {
            let span = self.current().span;
            self.sink.emit_warning(
                WarningKind::MissingReturn,
                span,
                &[MessageArg::from(decl.name.as_str())],
            );
        }
        self.last_value.clone()
    }

    fn call_pattern(
        &mut self,
        decl: Rc<PatternDecl>,
        builtin: Option<Builtin>,
        arg: &Expr,
        span: Span,
    ) -> Eval<Value> {
        let param = &decl.param;
        let site = self.argument_site(arg);
        let value = self.eval_value(arg)?;
        let value = as_type(&value, param.ty);

        let subject = Declarator::new(param.span, false, param.ty, VALUE);
        let mut context = Context::new(decl.name.as_str(), span, ValueType::Nothing);
        context.insert_variable(Variable::new(subject, value.clone()));
        context.insert_variable(self.bind(param, value, site));
        context.set_flag(ScopeFlags::MATCH);

        self.mark(span);
        self.stack.push(context);
        match builtin {
            Some(builtin) => {
                self.run_builtin(builtin)?;
            }
            None => {
                self.exec_stmt(&decl.body)?;
            }
        }
        self.stack.pop();

        Ok(Value::Nothing)
    }

    /// The storage an argument names, when it is a plain mutable variable.
    fn argument_site(&self, arg: &Expr) -> Option<Site> {
        let name = arg.as_identifier()?;
        let site = self.find_site(name)?;
        let mutable = self.variable_at(&site)?.declarator.mutable;
        mutable.then(|| self.owner_site(site))
    }

    /// Builds the variable for one parameter. Only a mutable parameter
    /// keeps the reference to the argument's storage.
    fn bind(&self, param: &Declarator, value: Value, site: Option<Site>) -> Variable {
        let alias = if param.mutable { site } else { None };
        Variable::new(param.clone(), value).with_alias(alias)
    }

    /* ============================================================================
     * Builtins
     * ============================================================================
     */

    fn run_builtin(&mut self, builtin: Builtin) -> Eval<Value> {
        match builtin {
            Builtin::Print => {
                // Nothing prints as an empty line
                let line = as_text(&self.read_variable("t")?).unwrap_or_default();
                self.sink.emit_line(&line);
                Ok(Value::Nothing)
            }

            Builtin::Quit => Err(Halt::Quit),

            Builtin::First => self.text_builtin(|t| Some(text::first(t))),
            Builtin::Last => self.text_builtin(|t| Some(text::last(t))),
            Builtin::Body => self.text_builtin(text::body),
            Builtin::Tail => self.text_builtin(text::tail),

            Builtin::Split => self.split_builtin(text::split, "head", "tail"),
            Builtin::BackSplit => self.split_builtin(text::back_split, "body", "tip"),

            Builtin::FizzBuzz => {
                if let Some(n) = as_number(&self.read_variable("n")?) {
                    self.sink.emit_line(&text::fizz_buzz(n));
                }
                Ok(Value::Nothing)
            }
        }
    }

    fn text_builtin(&mut self, op: fn(&str) -> Option<String>) -> Eval<Value> {
        let t = as_text(&self.read_variable("t")?);
        Ok(t.as_deref()
            .and_then(op)
            .map_or(Value::Nothing, Value::Text))
    }

    /// Splits `source` and assigns both halves through ordinary assignments,
    /// so reference parameters write back to the caller.
    fn split_builtin(
        &mut self,
        op: fn(&str) -> (String, Option<String>),
        left: &str,
        right: &str,
    ) -> Eval<Value> {
        let source = as_text(&self.read_variable("source")?);
        let (l, r) = match source.as_deref().map(op) {
            Some((l, r)) => (Some(l), r),
            None => (None, None),
        };

        let span = self.current().span;
        let mut last = Value::Nothing;
        for (name, half) in [(left, l), (right, r)] {
            let value = half.map_or(Value::Nothing, Value::Text);
            let assign = Expr::new(
                ExprKind::Assign {
                    target: Box::new(Expr::identifier(name, span)),
                    value: Box::new(Expr::literal(value, span)),
                },
                span,
            );
            last = self.eval_expr(&assign)?;
        }
        Ok(last)
    }
}
