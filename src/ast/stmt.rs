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

use std::rc::Rc;

use crate::ast::decl::{Declarator, FunctionDecl, PatternDecl};
use crate::ast::expr::Expr;
use crate::span::Span;

/// A statement or declaration node.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn empty(span: Span) -> Self {
        Self::new(StmtKind::Empty, span)
    }
}

/// All executable Verbose statements.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /* ----------------------------- */
    /* EXPRESSIONS                   */
    /* ----------------------------- */

    Expression(Expr),

    /* ----------------------------- */
    /* DECLARATIONS                  */
    /* ----------------------------- */

    Variable {
        declarator: Declarator,
        init: Option<Expr>,
    },

    Function(Rc<FunctionDecl>),

    Pattern(Rc<PatternDecl>),

    /* ----------------------------- */
    /* CONTROL FLOW                  */
    /* ----------------------------- */

    Compound(Vec<Stmt>),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    Jump {
        kind: JumpKind,
        value: Option<Expr>,
    },

    /// `MATCH WITH subject BEGIN ... END`; the body is the lowered if-chain.
    Match {
        subject: Expr,
        body: Box<Stmt>,
    },

    /// A lone `;`, also the body of a forward declaration.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Skip,
    Stop,
    Return,
}
