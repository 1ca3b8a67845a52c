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

pub mod decl;
pub mod expr;
pub mod stmt;

pub use decl::{Declarator, FunctionDecl, PatternDecl};
pub use expr::{BinaryOp, Expr, ExprKind, UnaryOp};
pub use stmt::{JumpKind, Stmt, StmtKind};

/// A parsed program: the top-level statements, run as one compound block.
pub type Program = Stmt;
