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
 * The Verbose tree-walking interpreter.
 *
 * The interpreter owns:
 * - the parsed program
 * - the call stack of [`Context`]s, index 0 being the global frame
 * - the diagnostic [`Sink`]
 *
 * Evaluation is split across extension modules, each adding an
 * `impl Interpreter` block:
 * - `expressions` evaluates expression nodes
 * - `statements` executes statements and declarations
 * - `calls` invokes functions, patterns and builtins
 * - `helpers` resolves and writes variables
 */

pub mod calls;
pub mod casting;
pub mod context;
pub mod expressions;
pub mod helpers;
pub mod scope;
pub mod statements;

use std::rc::Rc;

use tracing::debug;

use crate::ast::Program;
use crate::config::Limits;
use crate::diagnostics::Sink;
use crate::error::{BuildError, ErrorKind, InterpreterError, MessageArg};
use crate::globals::builtin_scope;
use crate::parser;
use crate::span::Span;
use crate::value::{Value, ValueType};

use context::{Context, MAIN_CONTEXT};
use scope::ScopeFlags;
use statements::Flow;

const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // grow by 4MB each time

/// Why evaluation stopped early.
#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// `Quit` was called. Not an error.
    Quit,

    Error(InterpreterError),
}

impl From<InterpreterError> for Halt {
    fn from(error: InterpreterError) -> Self {
        Halt::Error(error)
    }
}

/// Result of evaluating a node.
pub type Eval<T> = Result<T, Halt>;

pub struct Interpreter<S: Sink> {
    sink: S,
    limits: Limits,
    program: Option<Rc<Program>>,

    /// Call stack; never empty.
    stack: Vec<Context>,

    /// Nesting of nodes currently being evaluated.
    depth: usize,

    /// Value of the most recently evaluated expression. A function that
    /// falls off its end returns this.
    last_value: Value,
}

impl<S: Sink> Interpreter<S> {
    pub fn new(sink: S, limits: Limits) -> Self {
        Self {
            sink,
            limits,
            program: None,
            stack: vec![Self::global_context()],
            depth: 0,
            last_value: Value::Nothing,
        }
    }

    /// The frame that runs the top level: Call-flagged, so `RETURN;` ends
    /// the program, with the builtins in a scope of their own.
    fn global_context() -> Context {
        let mut context = Context::new(MAIN_CONTEXT, Span::new(1, 1), ValueType::Nothing);
        context.set_flag(ScopeFlags::CALL);
        context.push_scope(builtin_scope());
        context
    }

    /// Drops all runtime state; the built program is kept.
    pub fn reset(&mut self) {
        self.stack = vec![Self::global_context()];
        self.depth = 0;
        self.last_value = Value::Nothing;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_deref()
    }

    /* ============================================================================
     * Pipeline
     * ============================================================================
     */

    /// Lexes and parses `source`, replacing any previously built program.
    ///
    /// # Errors
    /// The first lexical or syntax error. It has already been reported to
    /// the sink; nothing is built.
    pub fn build(&mut self, source: &str) -> Result<(), BuildError> {
        self.program = None;
        match parser::parse(source, &self.limits) {
            Ok(program) => {
                debug!("program built");
                self.program = Some(Rc::new(program));
                Ok(())
            }
            Err(error) => {
                match &error {
                    BuildError::Lexical(e) => {
                        self.sink.emit_error(e.kind, e.span, &e.buffered, &e.args)
                    }
                    BuildError::Syntax(e) => {
                        self.sink.emit_error(e.kind, e.span, &e.found, &e.args)
                    }
                }
                Err(error)
            }
        }
    }

    /// Runs the built program. Running without a built program does nothing.
    ///
    /// # Behavior
    /// - `Quit` ends the run quietly
    /// - A runtime error is reported at the position the innermost frame
    ///   reached, followed by one stack trace line per open frame,
    ///   innermost first
    /// - Afterwards the runtime state is reset, so `run` can be repeated
    pub fn run(&mut self) -> Result<(), InterpreterError> {
        let Some(program) = self.program.clone() else {
            return Ok(());
        };
        debug!("running program");

        let result = self.exec_stmt(&program);
        let outcome = match result {
            Ok(Flow::Normal | Flow::Return(_)) | Err(Halt::Quit) => Ok(()),
            // jumps are validated where they happen; nothing else escapes
            Ok(Flow::Skip | Flow::Stop) => Ok(()),
            Err(Halt::Error(error)) => Err(self.unwind(error)),
        };

        self.reset();
        outcome
    }

    /// Reports `error` and every open frame.
    fn unwind(&mut self, error: InterpreterError) -> InterpreterError {
        let error = error.at(self.current().span);
        debug!(kind = ?error.kind, "runtime error");
        self.sink.emit_error(error.kind, error.span, "", &error.args);

        while let Some(context) = self.stack.pop() {
            self.sink.emit_error(
                ErrorKind::StackTrace,
                context.span,
                "",
                &[MessageArg::from(context.name)],
            );
        }
        error
    }

    /* ============================================================================
     * Frames
     * ============================================================================
     */

    fn current(&self) -> &Context {
        // the global frame is only popped while unwinding
        &self.stack[self.stack.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Context {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn global(&self) -> &Context {
        &self.stack[0]
    }

    fn current_index(&self) -> usize {
        self.stack.len() - 1
    }

    /// Records the node the current frame is at, for error positions.
    fn mark(&mut self, span: Span) {
        self.current_mut().span = span;
    }

    /// Counts one more level of nesting.
    fn enter(&mut self, span: Span) -> Result<(), InterpreterError> {
        self.depth += 1;
        if self.depth >= self.limits.max_depth {
            return Err(InterpreterError::new(ErrorKind::StackOverflow).with_arg(span));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
