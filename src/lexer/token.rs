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

use crate::span::Span;

/// Represents the **category of a lexical token** in the Verbose language.
///
/// # Compiler Pipeline Role
/// ```text
/// Source Code → Lexer → TokenKind → Parser → AST
/// ```
///
/// Line breaks and comments get their own kinds so the lexer can report
/// them faithfully; the parser's token stream drops both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End-of-source sentinel, always the last token.
    Etx,

    /// A line break in whatever form the source uses.
    Eol,

    // Values
    Number,
    Text,
    Comment,
    Fact,
    Identifier,

    // Operators
    Dot,
    Comma,
    TernaryYes,
    TernaryNo,
    ParenOpen,
    ParenClose,
    Concatenate,
    NoneTest,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Equal,
    NotEqual,
    EqualText,
    NotEqualText,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,

    // Keywords
    And,
    Begin,
    Call,
    Default,
    Do,
    Else,
    End,
    FactType,
    For,
    Function,
    Is,
    If,
    Match,
    Mutable,
    None,
    Now,
    Not,
    NothingType,
    NumberType,
    Or,
    Otherwise,
    Override,
    Pattern,
    Return,
    Returns,
    Skip,
    Stop,
    TextType,
    Then,
    While,
    With,
}

impl fmt::Display for TokenKind {
    /// Formats a token kind the way it is written in source, or by its
    /// category name for value tokens.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        let text = match self {
            Etx => "end of source",
            Eol => "end of line",
            Number => "number",
            Text => "text",
            Comment => "comment",
            Fact => "fact",
            Identifier => "identifier",
            Dot => ";",
            Comma => ",",
            TernaryYes => "?",
            TernaryNo => ":",
            ParenOpen => "(",
            ParenClose => ")",
            Concatenate => "++",
            NoneTest => "??",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Equal => "==",
            NotEqual => "!=",
            EqualText => "===",
            NotEqualText => "!==",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            And => "AND",
            Begin => "BEGIN",
            Call => "CALL",
            Default => "DEFAULT",
            Do => "DO",
            Else => "ELSE",
            End => "END",
            FactType => "FACT",
            For => "FOR",
            Function => "FUNCTION",
            Is => "IS",
            If => "IF",
            Match => "MATCH",
            Mutable => "MUTABLE",
            None => "NONE",
            Now => "NOW",
            Not => "NOT",
            NothingType => "NOTHING",
            NumberType => "NUMBER",
            Or => "OR",
            Otherwise => "OTHERWISE",
            Override => "OVERRIDE",
            Pattern => "PATTERN",
            Return => "RETURN",
            Returns => "RETURNS",
            Skip => "SKIP",
            Stop => "STOP",
            TextType => "TEXT",
            Then => "THEN",
            While => "WHILE",
            With => "WITH",
        };
        write!(f, "{}", text)
    }
}

/// Payload carried by value tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(f64),
    Text(String),
    Fact(bool),
}

/// Represents a **single lexical token** produced by the Verbose lexer.
///
/// # Example Tokens
/// ```text
/// MUTABLE  →  { kind: Mutable,    value: None }
/// i        →  { kind: Identifier, value: Text("i") }
/// 0x1F     →  { kind: Number,     value: Number(31.0) }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,

    /// Position of the token's first character.
    pub span: Span,

    pub value: Option<TokenValue>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            value: None,
        }
    }

    pub fn with_value(kind: TokenKind, span: Span, value: TokenValue) -> Self {
        Self {
            kind,
            span,
            value: Some(value),
        }
    }

    /// Text payload of identifiers, texts and comments.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::Text(s)) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    /// Formats a token for **user-facing output**: what the user wrote, not
    /// the internal structure.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(TokenValue::Number(n)) => write!(f, "{}", n),
            Some(TokenValue::Text(s)) if self.kind == TokenKind::Text => write!(f, "\"{}\"", s),
            Some(TokenValue::Text(s)) => write!(f, "{}", s),
            Some(TokenValue::Fact(true)) => write!(f, "TRUE"),
            Some(TokenValue::Fact(false)) => write!(f, "FALSE"),
            None => write!(f, "{}", self.kind),
        }
    }
}
