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

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lexer::token::TokenKind;
use crate::span::Span;
use crate::value::ValueType;

/// Every diagnostic the toolchain can raise.
///
/// The variant name doubles as the lookup key inside a locale catalog, so
/// renaming a variant is a breaking change for locale files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NoSource,

    // lexical
    UnknownToken,
    NumberOverflow,
    NumberNotADecimal,
    NumberNotInBase,
    NumberUnknownBase,
    TextTooBig,
    TextSuddenEnd,
    CommentTooBig,
    CommentSuddenEnd,
    IdentifierTooBig,
    UnknownEscape,

    // syntax
    ExpectedToken,
    ExpectedSymbol,
    DuplicateParam,

    // runtime
    DynamicNumberOverflow,
    DivisionByZero,
    AssignmentToNotVariable,
    ExpectedNotNone,
    InvalidSkip,
    InvalidStop,
    InvalidReturn,
    VariableRedefinition,
    FunctionRedeclaration,
    FunctionRedefinition,
    PatternRedeclaration,
    PatternRedefinition,
    BuiltinRedefinition,
    FunctionDefinitionReturnMismatch,
    FunctionDefinitionParamTypeMismatch,
    PatternDefinitionParamTypeMismatch,
    UndefinedVariable,
    UninitializedVariable,
    UndefinedFunctionOrPattern,
    PatternRedefinitionWithFunction,
    FunctionRedefinitionWithPattern,
    VariableReserved,
    VariableReservedAssignment,
    VariableImmutable,
    PipeNotInPipeline,
    ValueNotInMatch,
    BadFunctionOverride,
    BadPatternOverride,
    NotImplementedFunction,
    NotImplementedPattern,
    ReturnExpectedValue,
    ReturnUnexpectedValue,
    ReturnedNothing,
    JumpInMatch,
    StackOverflow,

    /// One frame of the synthetic backtrace printed after a runtime error.
    StackTrace,
}

impl ErrorKind {
    /// Stable error code shown in front of every message (VE00, VE01, ...).
    pub fn code(&self) -> &'static str {
        use ErrorKind::*;
        match self {
            NoSource => "VE00",
            NumberOverflow => "VE01",
            NumberNotADecimal => "VE02",
            NumberNotInBase | NumberUnknownBase => "VE03",
            TextTooBig => "VE04",
            TextSuddenEnd => "VE05",
            CommentTooBig => "VE06",
            CommentSuddenEnd => "VE07",
            IdentifierTooBig => "VE08",
            UnknownEscape => "VE09",
            UnknownToken | ExpectedToken => "VE10",
            ExpectedSymbol => "VE11",
            DynamicNumberOverflow => "VE12",
            DivisionByZero => "VE13",
            ExpectedNotNone | AssignmentToNotVariable => "VE14",
            InvalidSkip => "VE15",
            InvalidStop => "VE16",
            InvalidReturn => "VE17",
            VariableRedefinition => "VE18",
            FunctionRedeclaration => "VE19",
            FunctionRedefinition => "VE20",
            FunctionDefinitionReturnMismatch => "VE21",
            FunctionDefinitionParamTypeMismatch => "VE22",
            BuiltinRedefinition => "VE23",
            PatternRedeclaration => "VE24",
            PatternRedefinition => "VE25",
            UndefinedVariable => "VE26",
            PatternRedefinitionWithFunction => "VE27",
            VariableReserved => "VE28",
            PipeNotInPipeline => "VE29",
            ValueNotInMatch => "VE30",
            BadFunctionOverride => "VE31",
            BadPatternOverride => "VE32",
            NotImplementedFunction => "VE33",
            NotImplementedPattern => "VE34",
            ReturnExpectedValue => "VE36",
            ReturnUnexpectedValue => "VE37",
            VariableReservedAssignment => "VE38",
            VariableImmutable => "VE39",
            FunctionRedefinitionWithPattern => "VE40",
            JumpInMatch => "VE41",
            PatternDefinitionParamTypeMismatch => "VE42",
            ReturnedNothing => "VE43",
            DuplicateParam => "VE44",
            UndefinedFunctionOrPattern => "VE45",
            StackOverflow => "VE46",
            UninitializedVariable => "VE47",
            StackTrace => "",
        }
    }
}

/// Grammar symbols named by `ExpectedToken` / `ExpectedSymbol` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Token(TokenKind),
    Expression,
    Identifier,
    Statement,
    WhileStatement,
    Declarator,
    VariableDeclaration,
    MatchBlock,
    ReturnType,
}

impl Symbol {
    /// Key used to look the symbol up in a locale catalog.
    pub fn key(&self) -> String {
        match self {
            Symbol::Token(kind) => format!("{:?}", kind),
            other => format!("{:?}", other),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Token(kind) => write!(f, "{}", kind),
            Symbol::Expression => write!(f, "expression"),
            Symbol::Identifier => write!(f, "identifier"),
            Symbol::Statement => write!(f, "statement"),
            Symbol::WhileStatement => write!(f, "while statement"),
            Symbol::Declarator => write!(f, "declarator"),
            Symbol::VariableDeclaration => write!(f, "variable declaration"),
            Symbol::MatchBlock => write!(f, "match block"),
            Symbol::ReturnType => write!(f, "return type"),
        }
    }
}

/// One positional format argument of a diagnostic.
///
/// Kept structured (rather than pre-rendered) so a sink can localize
/// symbol and type names.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageArg {
    Text(String),
    Count(usize),
    Char(char),
    Span(Span),
    Symbols(Vec<Symbol>),
    Type(ValueType),
    Param {
        mutable: bool,
        ty: ValueType,
        name: String,
    },
}

impl From<&str> for MessageArg {
    fn from(s: &str) -> Self {
        MessageArg::Text(s.to_string())
    }
}

impl From<String> for MessageArg {
    fn from(s: String) -> Self {
        MessageArg::Text(s)
    }
}

impl From<Span> for MessageArg {
    fn from(span: Span) -> Self {
        MessageArg::Span(span)
    }
}

impl From<ValueType> for MessageArg {
    fn from(ty: ValueType) -> Self {
        MessageArg::Type(ty)
    }
}

impl fmt::Display for MessageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageArg::Text(s) => write!(f, "{}", s),
            MessageArg::Count(n) => write!(f, "{}", n),
            MessageArg::Char(c) => write!(f, "{}", c),
            MessageArg::Span(span) => write!(f, "{}", span),
            MessageArg::Symbols(symbols) => {
                let names: Vec<String> = symbols.iter().map(|s| s.to_string()).collect();
                write!(f, "{}", names.join(", "))
            }
            MessageArg::Type(ty) => write!(f, "{}", ty),
            MessageArg::Param { mutable, ty, name } => {
                let prefix = if *mutable { "MUTABLE" } else { "" };
                write!(f, "{} {} {}", prefix, ty, name)
            }
        }
    }
}

/* ============================================================================
 * Error Families
 * ============================================================================
 */

/// Raised by the lexer when no rule matches or a size limit is exceeded.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[{}] {:?} at {}", .kind.code(), .kind, .span)]
pub struct LexicalError {
    pub kind: ErrorKind,
    pub span: Span,

    /// Raw source consumed since the last good token.
    pub buffered: String,

    pub args: Vec<MessageArg>,
}

impl LexicalError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            buffered: String::new(),
            args: Vec::new(),
        }
    }

    /// Attach a format argument (builder-style).
    pub fn with_arg(mut self, arg: impl Into<MessageArg>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Raised by the parser on the first grammar mismatch.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[{}] {:?} at {}", .kind.code(), .kind, .span)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub span: Span,

    /// Text of the token the parser was looking at.
    pub found: String,

    pub args: Vec<MessageArg>,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, span: Span, found: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            found: found.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<MessageArg>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Raised while a program runs.
///
/// The span is filled in by the interpreter from the frame that was active
/// when the error surfaced, so scope/context code can build errors without
/// knowing where evaluation currently is.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[{}] {:?} at {}", .kind.code(), .kind, .span)]
pub struct InterpreterError {
    pub kind: ErrorKind,
    pub span: Span,
    pub args: Vec<MessageArg>,
}

impl InterpreterError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            span: Span::default(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<MessageArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Either failure that stops a program from being built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::Lexical(e) => e.kind,
            BuildError::Syntax(e) => e.kind,
        }
    }
}
