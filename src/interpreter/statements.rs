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
 * Statement execution.
 *
 * Statements report how control leaves them through [`Flow`]. A jump
 * propagates outwards until the loop or call that consumes it.
 */

use crate::ast::{Declarator, Expr, JumpKind, Stmt, StmtKind};
use crate::diagnostics::Sink;
use crate::error::{ErrorKind, InterpreterError};
use crate::interpreter::casting::{as_fact, as_type, type_of};
use crate::interpreter::helpers::{is_reserved, VALUE};
use crate::interpreter::scope::{Scope, ScopeFlags, Variable};
use crate::interpreter::{Eval, Interpreter, STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::value::{Value, ValueType};

/// How control left a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,

    /// `SKIP` on its way to the enclosing loop.
    Skip,

    /// `STOP` on its way to the enclosing loop.
    Stop,

    /// `RETURN` on its way to the enclosing call, carrying the cast value.
    Return(Value),
}

impl<S: Sink> Interpreter<S> {
    pub fn exec_stmt(&mut self, stmt: &Stmt) -> Eval<Flow> {
        self.enter(stmt.span)?;
        self.mark(stmt.span);

        let flow =
            stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.exec_kind(stmt))?;

        self.leave();
        Ok(flow)
    }

    fn exec_kind(&mut self, stmt: &Stmt) -> Eval<Flow> {
        match &stmt.kind {
            StmtKind::Expression(expr) => {
                self.eval_expr(expr)?;
                Ok(Flow::Normal)
            }

            StmtKind::Variable { declarator, init } => {
                self.declare_variable(declarator, init.as_ref())?;
                Ok(Flow::Normal)
            }

            StmtKind::Function(decl) => {
                let key = (decl.name.clone(), decl.params.len());
                self.global().check_builtin(&key)?;
                self.current_mut().add_function(decl.clone())?;
                Ok(Flow::Normal)
            }

            StmtKind::Pattern(decl) => {
                let key = (decl.name.clone(), 1);
                self.global().check_builtin(&key)?;
                self.current_mut().add_pattern(decl.clone())?;
                Ok(Flow::Normal)
            }

            StmtKind::Compound(children) => {
                self.current_mut().push_scope(Scope::new());
                let flow = self.exec_block(children);
                self.current_mut().pop_scope();
                flow
            }

            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition = self.condition(condition)?;
                if condition {
                    self.current_mut().set_flag(ScopeFlags::LAST_CONDITION);
                    self.exec_stmt(then_branch)
                } else {
                    self.current_mut().unset_flag(ScopeFlags::LAST_CONDITION);
                    match else_branch {
                        Some(branch) => self.exec_stmt(branch),
                        None => Ok(Flow::Normal),
                    }
                }
            }

            StmtKind::While { condition, body } => self.exec_while(condition, body),

            StmtKind::Jump { kind, value } => self.exec_jump(*kind, value.as_ref()),

            StmtKind::Match { subject, body } => {
                let subject = self.eval_value(subject)?;
                let value = Declarator::new(stmt.span, false, type_of(&subject), VALUE);

                let context = self.current_mut();
                context.push_scope(Scope::with_flags(ScopeFlags::MATCH));
                context.insert_variable(Variable::new(value, subject));

                let flow = self.exec_stmt(body);
                self.current_mut().pop_scope();
                flow
            }

            StmtKind::Empty => Ok(Flow::Normal),
        }
    }

    /// Runs `children` in order. Inside a match, the first branch whose
    /// condition held ends the block.
    fn exec_block(&mut self, children: &[Stmt]) -> Eval<Flow> {
        for child in children {
            let flow = self.exec_stmt(child)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
            if self
                .current()
                .flag_sum(ScopeFlags::MATCH | ScopeFlags::LAST_CONDITION)
            {
                break;
            }
        }
        Ok(Flow::Normal)
    }

    fn declare_variable(&mut self, declarator: &Declarator, init: Option<&Expr>) -> Eval<()> {
        if is_reserved(&declarator.name) {
            return Err(InterpreterError::new(ErrorKind::VariableReserved)
                .with_arg(declarator.name.as_str())
                .into());
        }

        let variable = match init {
            Some(init) => {
                let value = self.eval_value(init)?;
                Variable::new(declarator.clone(), as_type(&value, declarator.ty))
            }
            None => Variable::uninitialized(declarator.clone()),
        };

        self.current_mut().add_variable(variable)?;
        Ok(())
    }

    /// Evaluates a branch condition, which must not be Nothing.
    fn condition(&mut self, condition: &Expr) -> Eval<bool> {
        let value = self.eval_value(condition)?;
        as_fact(&value).ok_or_else(|| InterpreterError::new(ErrorKind::ExpectedNotNone).into())
    }

    fn exec_while(&mut self, condition: &Expr, body: &Stmt) -> Eval<Flow> {
        let mut flow = Flow::Normal;

        while self.condition(condition)? {
            self.current_mut().set_flag(ScopeFlags::LOOP);
            match self.exec_stmt(body)? {
                Flow::Normal | Flow::Skip => {}
                Flow::Stop => break,
                returned @ Flow::Return(_) => {
                    flow = returned;
                    break;
                }
            }
        }

        self.current_mut().unset_flag(ScopeFlags::LOOP);
        Ok(flow)
    }

    /// `SKIP;`, `STOP;` and `RETURN [value];`
    ///
    /// # Errors
    /// - `JumpInMatch` inside a match or pattern
    /// - `InvalidSkip` / `InvalidStop` outside a loop
    /// - `InvalidReturn` outside a call
    /// - `ReturnUnexpectedValue` / `ReturnExpectedValue` when the value
    ///   disagrees with the declared return type
    fn exec_jump(&mut self, kind: JumpKind, value: Option<&Expr>) -> Eval<Flow> {
        let context = self.current();

        if context.get_flag(ScopeFlags::MATCH) {
            return Err(InterpreterError::new(ErrorKind::JumpInMatch).into());
        }

        match kind {
            JumpKind::Skip | JumpKind::Stop if !context.get_flag(ScopeFlags::LOOP) => {
                let error = if kind == JumpKind::Skip {
                    ErrorKind::InvalidSkip
                } else {
                    ErrorKind::InvalidStop
                };
                Err(InterpreterError::new(error).into())
            }
            JumpKind::Skip => Ok(Flow::Skip),
            JumpKind::Stop => Ok(Flow::Stop),

            JumpKind::Return => {
                if !context.get_flag(ScopeFlags::CALL) {
                    return Err(InterpreterError::new(ErrorKind::InvalidReturn).into());
                }

                let returns = context.returns;
                match (returns, value) {
                    (ValueType::Nothing, Some(_)) => {
                        Err(InterpreterError::new(ErrorKind::ReturnUnexpectedValue).into())
                    }
                    (ValueType::Nothing, None) => Ok(Flow::Return(Value::Nothing)),
                    (_, None) => Err(InterpreterError::new(ErrorKind::ReturnExpectedValue).into()),
                    (_, Some(value)) => {
                        let value = self.eval_value(value)?;
                        Ok(Flow::Return(as_type(&value, returns)))
                    }
                }
            }
        }
    }
}
