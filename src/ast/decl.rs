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

use crate::ast::stmt::{Stmt, StmtKind};
use crate::error::MessageArg;
use crate::span::Span;
use crate::value::ValueType;

/// The static description of a binding: `[MUTABLE] TYPE name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub span: Span,
    pub mutable: bool,
    pub ty: ValueType,
    pub name: String,
}

impl Declarator {
    pub fn new(span: Span, mutable: bool, ty: ValueType, name: impl Into<String>) -> Self {
        Self {
            span,
            mutable,
            ty,
            name: name.into(),
        }
    }

    /// Same mutability, type and name.
    pub fn matches(&self, other: &Declarator) -> bool {
        self.mutable == other.mutable && self.ty == other.ty && self.name == other.name
    }
}

impl From<&Declarator> for MessageArg {
    fn from(d: &Declarator) -> Self {
        MessageArg::Param {
            mutable: d.mutable,
            ty: d.ty,
            name: d.name.clone(),
        }
    }
}

/// `FUNCTION [OVERRIDE] name [WITH params] RETURNS type body`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub span: Span,
    pub name: String,
    pub overrides: bool,
    pub params: Vec<Declarator>,
    pub returns: ValueType,

    /// `StmtKind::Empty` for a forward declaration.
    pub body: Stmt,
}

impl FunctionDecl {
    pub fn has_body(&self) -> bool {
        !matches!(self.body.kind, StmtKind::Empty)
    }
}

/// `PATTERN [OVERRIDE] name WITH param (match-block | ;)`
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDecl {
    pub span: Span,
    pub name: String,
    pub overrides: bool,
    pub param: Declarator,

    /// `StmtKind::Empty` for a forward declaration.
    pub body: Stmt,
}

impl PatternDecl {
    pub fn has_body(&self) -> bool {
        !matches!(self.body.kind, StmtKind::Empty)
    }
}
