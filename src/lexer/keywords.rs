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

use crate::lexer::token::TokenKind;

/// What a reserved word turns into once the lexer recognises it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Keyword {
    /// An ordinary keyword token.
    Plain(TokenKind),

    /// `TRUE` / `FALSE`, emitted as a Fact literal.
    Literal(bool),

    /// `PIPE` / `VALUE`, emitted as an identifier carrying the word itself.
    /// They are ordinary names that the interpreter binds implicitly.
    Name,
}

/// Looks a word up in the **reserved keyword table**.
///
/// # Parameters
/// - `word`: The identifier text extracted from source code.
///
/// # Returns
/// - `Some(Keyword)` if the word is reserved.
/// - `None` if the word is a normal identifier.
///
/// # Behavior
/// Matching is case-sensitive: keywords are all upper case, so `While` and
/// `while` are plain identifiers.
///
/// # Examples
/// ```text
/// WHILE  -> Plain(While)
/// TRUE   -> Literal(true)
/// PIPE   -> Name
/// count  -> None
/// ```
pub fn lookup_keyword(word: &str) -> Option<Keyword> {
    use TokenKind::*;

    let kind = match word {
        "TRUE" => return Some(Keyword::Literal(true)),
        "FALSE" => return Some(Keyword::Literal(false)),
        "PIPE" | "VALUE" => return Some(Keyword::Name),

        "AND" => And,
        "BEGIN" => Begin,
        "CALL" => Call,
        "DEFAULT" => Default,
        "DO" => Do,
        "ELSE" => Else,
        "END" => End,
        "FACT" => FactType,
        "FOR" => For,
        "FUNCTION" => Function,
        "IS" => Is,
        "IF" => If,
        "MATCH" => Match,
        "MUTABLE" => Mutable,
        "NONE" => None,
        "NOW" => Now,
        "NOT" => Not,
        "NOTHING" => NothingType,
        "NUMBER" => NumberType,
        "OR" => Or,
        "OTHERWISE" => Otherwise,
        "OVERRIDE" => Override,
        "PATTERN" => Pattern,
        "RETURN" => Return,
        "RETURNS" => Returns,
        "SKIP" => Skip,
        "STOP" => Stop,
        "TEXT" => TextType,
        "THEN" => Then,
        "WHILE" => While,
        "WITH" => With,
        _ => return Option::None,
    };

    Some(Keyword::Plain(kind))
}
