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
 * Source Cursor
 * -------------
 *
 * Feeds the lexer one character at a time while tracking the cursor
 * position, the raw text consumed since the last token (for error
 * messages), and the line-ending form the source uses.
 *
 * Brace characters are grouping noise in Verbose and vanish at this level,
 * so the lexer never sees them outside text and comment bodies.
 */

use crate::span::Span;

/// Record separator; accepted as a one-character line break.
const RECORD_SEPARATOR: char = '\u{1e}';

#[derive(Debug, Clone)]
pub struct Scanner {
    chars: Vec<char>,
    current: usize,

    /// Character under the cursor; `None` once the source is exhausted.
    buffer: Option<char>,

    position: Span,

    /// Line-ending form, learned from the first one encountered.
    newline: Option<(char, Option<char>)>,

    /// Raw characters consumed since the last successful token.
    consumed: String,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        let mut scanner = Self {
            chars: source.chars().collect(),
            current: 0,
            buffer: None,
            position: Span::default(),
            newline: None,
            consumed: String::new(),
        };
        scanner.next();
        scanner
    }

    pub fn buffer(&self) -> Option<char> {
        self.buffer
    }

    pub fn position(&self) -> Span {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.buffer.is_none()
    }

    /// Whether the cursor sits on `ch`.
    pub fn is(&self, ch: char) -> bool {
        self.buffer == Some(ch)
    }

    /// Whether the cursor sits on a character satisfying `pred`.
    pub fn is_with(&self, pred: impl Fn(char) -> bool) -> bool {
        self.buffer.map_or(false, pred)
    }

    /// Raw text consumed since the last token, trimmed.
    pub fn buffered_error(&self) -> String {
        self.consumed.trim().to_string()
    }

    /// Starts a fresh buffer holding only the character under the cursor.
    pub fn clear_buffered_error(&mut self) {
        self.consumed.clear();
        if let Some(ch) = self.buffer {
            self.consumed.push(ch);
        }
    }

    /// Advances past the current character, skipping braces.
    pub fn next(&mut self) {
        self.next_char();
        while matches!(self.buffer, Some('{') | Some('}')) {
            self.next_char();
        }
    }

    /// Advances inside a numeric literal, skipping braces and underscores.
    pub fn next_in_number(&mut self) {
        self.next_char();
        while matches!(self.buffer, Some('_') | Some('{') | Some('}')) {
            self.next_char();
        }
    }

    /// Advances inside text or a comment, where every character counts.
    pub fn next_in_string(&mut self) {
        self.next_char();
    }

    /// Skips whitespace, stopping at line breaks and the end of source.
    pub fn skip_whites(&mut self) {
        while self.is_with(char::is_whitespace) && !self.is_special_white_space() {
            self.next();
        }
    }

    /// End of source or a line break: whitespace the lexer must see.
    pub fn is_special_white_space(&self) -> bool {
        self.is_at_end() || self.peek_newline()
    }

    /// Consumes a line break if one starts under the cursor.
    ///
    /// The first break seen fixes the form (`\n`, `\r`, `\r\n`, `\n\r` or the
    /// record separator); afterwards only that exact form is recognised.
    pub fn try_newline(&mut self) -> bool {
        if self.newline.is_none() && !self.learn_newline() {
            return false;
        }

        let Some((first, second)) = self.newline else {
            return false;
        };

        if self.buffer != Some(first) {
            return false;
        }

        match second {
            Some(second) if self.peek() != Some(second) => return false,
            Some(_) => {
                self.next_char();
                self.next();
            }
            None => self.next(),
        }

        self.position.add_line();
        self.clear_buffered_error();
        true
    }

    fn peek_newline(&self) -> bool {
        match self.newline {
            None => matches!(self.buffer, Some('\r') | Some('\n') | Some(RECORD_SEPARATOR)),
            Some((first, second)) => {
                self.buffer == Some(first) && second.map_or(true, |s| self.peek() == Some(s))
            }
        }
    }

    fn learn_newline(&mut self) -> bool {
        let learned = match self.buffer {
            Some('\r') => ('\r', (self.peek() == Some('\n')).then_some('\n')),
            Some('\n') => ('\n', (self.peek() == Some('\r')).then_some('\r')),
            Some(RECORD_SEPARATOR) => (RECORD_SEPARATOR, None),
            _ => return false,
        };
        self.newline = Some(learned);
        true
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    fn next_char(&mut self) {
        self.buffer = self.chars.get(self.current).copied();
        if let Some(ch) = self.buffer {
            self.current += 1;
            self.consumed.push(ch);
        }
        self.position.add_column();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braces_are_invisible() {
        let mut scanner = Scanner::new("{a}b");
        assert_eq!(scanner.buffer(), Some('a'));
        scanner.next();
        assert_eq!(scanner.buffer(), Some('b'));
        scanner.next();
        assert!(scanner.is_at_end());
    }

    #[test]
    fn underscores_vanish_only_in_numbers() {
        let mut scanner = Scanner::new("1_2_3");
        scanner.next_in_number();
        assert_eq!(scanner.buffer(), Some('2'));

        let mut scanner = Scanner::new("1_2");
        scanner.next();
        assert_eq!(scanner.buffer(), Some('_'));
    }

    #[test]
    fn newline_form_is_learned_once() {
        let mut scanner = Scanner::new("\r\nx\ny");
        assert!(scanner.try_newline());
        assert_eq!(scanner.buffer(), Some('x'));
        assert_eq!(scanner.position().line, 2);
        scanner.next();
        // a bare LF is not a break once CRLF was learned
        assert!(!scanner.try_newline());
    }

    #[test]
    fn positions_are_one_based() {
        let mut scanner = Scanner::new("ab\ncd");
        assert_eq!(scanner.position(), Span::new(1, 1));
        scanner.next();
        scanner.next();
        assert!(scanner.try_newline());
        assert_eq!(scanner.position(), Span::new(2, 1));
    }
}
