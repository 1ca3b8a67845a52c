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

use crate::config::Limits;
use crate::error::{ErrorKind, LexicalError, MessageArg};
use crate::lexer::keywords::{lookup_keyword, Keyword};
use crate::lexer::scanner::Scanner;
use crate::lexer::token::{Token, TokenKind, TokenValue};
use crate::span::Span;

type LexResult = Result<Option<Token>, LexicalError>;

pub struct Lexer {
    scanner: Scanner,
    limits: Limits,
}

impl Lexer {
    /// Creates a new Verbose lexer instance from raw source code.
    ///
    /// # Parameters
    /// - `source`: The program text.
    /// - `limits`: Size limits for identifiers, texts, comments and numbers.
    ///
    /// # Compiler Stage
    /// This is the **entry point for lexical analysis** in the Verbose
    /// pipeline. Tokens are produced lazily through [`Lexer::next_token`].
    pub fn new(source: &str, limits: &Limits) -> Self {
        Self {
            scanner: Scanner::new(source),
            limits: limits.clone(),
        }
    }

    /// Current cursor position.
    pub fn position(&self) -> Span {
        self.scanner.position()
    }

    /// Performs complete lexical analysis over the entire source input.
    ///
    /// # Behavior
    /// - Keeps line-break and comment tokens
    /// - Stops after (and includes) the `TokenKind::Etx` sentinel
    /// - Fails on the first lexical error
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexicalError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Etx;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Scans and returns a single token.
    ///
    /// Rules are tried in a fixed order: end of source, line break,
    /// identifier or keyword, operator, number, text, comment. The first
    /// one that recognises the character under the cursor wins.
    ///
    /// # Errors
    /// Returns a `LexicalError` carrying the raw text consumed since the
    /// previous token when no rule matches or a literal is malformed.
    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        self.scanner.clear_buffered_error();
        self.scanner.skip_whites();

        if let Some(token) = self.build_etx() {
            return Ok(token);
        }
        if let Some(token) = self.build_newline() {
            return Ok(token);
        }
        if let Some(token) = self.build_id_or_keyword()? {
            return Ok(token);
        }
        if let Some(token) = self.build_operator()? {
            return Ok(token);
        }
        if let Some(token) = self.build_number()? {
            return Ok(token);
        }
        if let Some(token) = self.build_delimited('"', TokenKind::Text)? {
            return Ok(token);
        }
        if let Some(token) = self.build_delimited('#', TokenKind::Comment)? {
            return Ok(token);
        }

        Err(self.error(ErrorKind::UnknownToken))
    }

    /// Parses the numeric literal at the start of `text`.
    ///
    /// Only a prefix has to be a number; anything after it is ignored.
    /// Returns `None` when the text does not start with a valid literal.
    ///
    /// `max_number` bounds literals in source text only. Runtime casts go
    /// through here with the default limits, so a configured bound does
    /// not reject numbers a program computes and turns into text.
    pub fn number_prefix(text: &str) -> Option<f64> {
        let mut lexer = Lexer::new(text, &Limits::default());
        match lexer.build_number() {
            Ok(Some(Token {
                value: Some(TokenValue::Number(n)),
                ..
            })) => Some(n),
            _ => None,
        }
    }

    fn error(&self, kind: ErrorKind) -> LexicalError {
        LexicalError {
            kind,
            span: self.scanner.position(),
            buffered: self.scanner.buffered_error(),
            args: Vec::new(),
        }
    }

    /* ============================================================================
     * Token Builders
     * ============================================================================
     */

    fn build_etx(&self) -> Option<Token> {
        self.scanner
            .is_at_end()
            .then(|| Token::new(TokenKind::Etx, self.scanner.position()))
    }

    fn build_newline(&mut self) -> Option<Token> {
        let span = self.scanner.position();
        self.scanner
            .try_newline()
            .then(|| Token::new(TokenKind::Eol, span))
    }

    /// Parses an identifier or keyword token.
    ///
    /// # Behavior
    /// - Starts with any Unicode letter or `_`
    /// - Continues with letters, digits and `_`
    /// - Rewrites `TRUE`/`FALSE` into Fact literals and `PIPE`/`VALUE` into
    ///   identifiers
    fn build_id_or_keyword(&mut self) -> LexResult {
        let span = self.scanner.position();
        if !self.scanner.is_with(|c| c.is_alphabetic() || c == '_') {
            return Ok(None);
        }

        let limit = self.limits.max_identifier;
        let mut text = String::new();
        let mut size = 0;
        while size <= limit {
            match self.scanner.buffer() {
                Some(c) if c.is_alphanumeric() || c == '_' => {
                    size += 1;
                    text.push(c);
                    self.scanner.next();
                }
                _ => break,
            }
        }
        if size > limit {
            return Err(self
                .error(ErrorKind::IdentifierTooBig)
                .with_arg(MessageArg::Count(limit)));
        }

        let token = match lookup_keyword(&text) {
            Some(Keyword::Plain(kind)) => Token::new(kind, span),
            Some(Keyword::Literal(fact)) => {
                Token::with_value(TokenKind::Fact, span, TokenValue::Fact(fact))
            }
            Some(Keyword::Name) | None => {
                Token::with_value(TokenKind::Identifier, span, TokenValue::Text(text))
            }
        };
        Ok(Some(token))
    }

    /// Parses an operator using greedy longest match.
    ///
    /// # Behavior
    /// - `===` beats `==`, `==` beats a lone `=`
    /// - `=` and `!` are not operators on their own and fail with
    ///   UnknownToken
    fn build_operator(&mut self) -> LexResult {
        let span = self.scanner.position();
        let Some(first) = self.scanner.buffer() else {
            return Ok(None);
        };

        let single = match first {
            ';' => Some(TokenKind::Dot),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::TernaryNo),
            '(' => Some(TokenKind::ParenOpen),
            ')' => Some(TokenKind::ParenClose),
            '-' => Some(TokenKind::Sub),
            '*' => Some(TokenKind::Mul),
            '/' => Some(TokenKind::Div),
            '%' => Some(TokenKind::Mod),
            _ => None,
        };
        if let Some(kind) = single {
            self.scanner.next();
            return Ok(Some(Token::new(kind, span)));
        }

        let kind = match first {
            '+' => {
                self.scanner.next();
                self.followed_by('+', TokenKind::Concatenate, TokenKind::Add)
            }
            '?' => {
                self.scanner.next();
                self.followed_by('?', TokenKind::NoneTest, TokenKind::TernaryYes)
            }
            '<' => {
                self.scanner.next();
                self.followed_by('=', TokenKind::LessEqual, TokenKind::Less)
            }
            '>' => {
                self.scanner.next();
                self.followed_by('=', TokenKind::GreaterEqual, TokenKind::Greater)
            }
            '=' | '!' => {
                self.scanner.next();
                if !self.scanner.is('=') {
                    return Err(self.error(ErrorKind::UnknownToken));
                }
                self.scanner.next();
                if first == '=' {
                    self.followed_by('=', TokenKind::EqualText, TokenKind::Equal)
                } else {
                    self.followed_by('=', TokenKind::NotEqualText, TokenKind::NotEqual)
                }
            }
            _ => return Ok(None),
        };

        Ok(Some(Token::new(kind, span)))
    }

    /// Consumes `ch` and yields `longer` if it is next, `shorter` otherwise.
    fn followed_by(&mut self, ch: char, longer: TokenKind, shorter: TokenKind) -> TokenKind {
        if self.scanner.is(ch) {
            self.scanner.next();
            longer
        } else {
            shorter
        }
    }

    /* ============================================================================
     * Numbers
     * ============================================================================
     */

    /// Parses a numeric literal.
    ///
    /// # Examples
    /// - `42`, `1_000_000`, `3.1415`
    /// - `0x1F`, `0o17`, `0b1010`
    fn build_number(&mut self) -> LexResult {
        let span = self.scanner.position();
        let Some(first) = self.scanner.buffer().filter(char::is_ascii_digit) else {
            return Ok(None);
        };

        let value = if first == '0' {
            self.scanner.next_in_number();
            if let Some(value) = self.number_other_base()? {
                value
            } else if let Some(value) = self.number_decimal_part(0.0)? {
                value
            } else if self.scanner.is_with(|c| c.is_ascii_digit()) {
                return Err(self.error(ErrorKind::NumberNotADecimal));
            } else if self.scanner.is_with(char::is_alphabetic) {
                return Err(self.error(ErrorKind::NumberUnknownBase));
            } else {
                0.0
            }
        } else {
            let whole = self.number_whole_part()?;
            self.number_decimal_part(whole)?.unwrap_or(whole)
        };

        Ok(Some(Token::with_value(
            TokenKind::Number,
            span,
            TokenValue::Number(value),
        )))
    }

    fn number_whole_part(&mut self) -> Result<f64, LexicalError> {
        let mut whole = 0.0;
        while let Some(digit) = self.scanner.buffer().and_then(|c| c.to_digit(10)) {
            whole = whole * 10.0 + f64::from(digit);
            self.check_overflow(whole)?;
            self.scanner.next_in_number();
        }
        Ok(whole)
    }

    /// Parses `.digits` and adds it to `whole`.
    ///
    /// Returns `Ok(None)` when the cursor is not on a decimal point.
    fn number_decimal_part(&mut self, whole: f64) -> Result<Option<f64>, LexicalError> {
        if !self.scanner.is('.') {
            return Ok(None);
        }
        self.scanner.next_in_number();
        if !self.scanner.is_with(|c| c.is_ascii_digit()) {
            return Err(self.error(ErrorKind::NumberNotADecimal));
        }

        let mut part: u64 = 0;
        let mut decimals: i32 = 0;
        while let Some(digit) = self.scanner.buffer().and_then(|c| c.to_digit(10)) {
            part = part
                .checked_mul(10)
                .and_then(|p| p.checked_add(u64::from(digit)))
                .ok_or_else(|| self.error(ErrorKind::NumberOverflow))?;
            self.check_overflow(part as f64)?;
            decimals += 1;
            self.scanner.next_in_number();
        }

        Ok(Some(whole + part as f64 / 10f64.powi(decimals)))
    }

    /// Parses the digits after `0x`, `0o` or `0b`.
    ///
    /// Returns `Ok(None)` when the cursor is not on a radix letter.
    fn number_other_base(&mut self) -> Result<Option<f64>, LexicalError> {
        let radix = match self.scanner.buffer() {
            Some('x') => 16,
            Some('o') => 8,
            Some('b') => 2,
            _ => return Ok(None),
        };
        self.scanner.next_in_number();

        let digit = |scanner: &Scanner| scanner.buffer().and_then(|c| c.to_digit(radix));
        if digit(&self.scanner).is_none() {
            return Err(self.error(ErrorKind::NumberNotInBase));
        }

        let mut num: u64 = 0;
        while let Some(d) = digit(&self.scanner) {
            num = num
                .checked_mul(u64::from(radix))
                .and_then(|n| n.checked_add(u64::from(d)))
                .ok_or_else(|| self.error(ErrorKind::NumberOverflow))?;
            self.check_overflow(num as f64)?;
            self.scanner.next_in_number();
        }

        Ok(Some(num as f64))
    }

    fn check_overflow(&self, value: f64) -> Result<(), LexicalError> {
        if value > self.limits.max_number {
            Err(self.error(ErrorKind::NumberOverflow))
        } else {
            Ok(())
        }
    }

    /* ============================================================================
     * Text & Comments
     * ============================================================================
     */

    /// Parses a `"text"` or `#comment#` body.
    ///
    /// # Behavior
    /// - Backslash escapes: `\a \b \f \n \r \t \v \\ \' \" \#`
    /// - Line breaks inside the body are kept verbatim
    /// - Fails on end of source, unknown escapes and oversize bodies
    fn build_delimited(&mut self, delimiter: char, kind: TokenKind) -> LexResult {
        let span = self.scanner.position();
        if !self.scanner.is(delimiter) {
            return Ok(None);
        }

        let (limit, too_big, sudden_end) = if kind == TokenKind::Text {
            (self.limits.max_text, ErrorKind::TextTooBig, ErrorKind::TextSuddenEnd)
        } else {
            (self.limits.max_comment, ErrorKind::CommentTooBig, ErrorKind::CommentSuddenEnd)
        };

        self.scanner.next_in_string();
        let mut text = String::new();
        let mut size = 0;
        while !self.scanner.is(delimiter) && size <= limit {
            let Some(mut ch) = self.scanner.buffer() else {
                return Err(self.error(sudden_end));
            };
            if ch == '\\' {
                self.scanner.next_in_string();
                ch = self.handle_escape(sudden_end)?;
            }
            size += 1;
            text.push(ch);
            self.scanner.next_in_string();
        }

        if size > limit {
            return Err(self.error(too_big).with_arg(MessageArg::Count(limit)));
        }
        self.scanner.next();

        Ok(Some(Token::with_value(kind, span, TokenValue::Text(text))))
    }

    fn handle_escape(&self, sudden_end: ErrorKind) -> Result<char, LexicalError> {
        let Some(ch) = self.scanner.buffer() else {
            return Err(self.error(sudden_end));
        };
        let escaped = match ch {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0b}',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            '#' => '#',
            other => {
                return Err(self
                    .error(ErrorKind::UnknownEscape)
                    .with_arg(MessageArg::Char(other)))
            }
        };
        Ok(escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source, &Limits::default())
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn single(source: &str) -> Token {
        Lexer::new(source, &Limits::default()).next_token().unwrap()
    }

    fn fails(source: &str) -> ErrorKind {
        Lexer::new(source, &Limits::default())
            .tokenize()
            .unwrap_err()
            .kind
    }

    fn number(source: &str) -> f64 {
        match single(source).value {
            Some(TokenValue::Number(n)) => n,
            other => panic!("not a number: {:?}", other),
        }
    }

    #[test]
    fn operators_use_longest_match() {
        use TokenKind::*;
        assert_eq!(
            kinds("=== == !== != <= < >= > ++ + ?? ? - ; , : ( ) * / %"),
            vec![
                EqualText, Equal, NotEqualText, NotEqual, LessEqual, Less, GreaterEqual,
                Greater, Concatenate, Add, NoneTest, TernaryYes, Sub, Dot, Comma, TernaryNo,
                ParenOpen, ParenClose, Mul, Div, Mod, Etx
            ]
        );
    }

    #[test]
    fn lone_assignment_sign_is_unknown() {
        assert_eq!(fails("a = 1"), ErrorKind::UnknownToken);
        assert_eq!(fails("!a"), ErrorKind::UnknownToken);
    }

    #[test]
    fn stray_characters_are_unknown() {
        assert_eq!(fails("a @ b"), ErrorKind::UnknownToken);
        assert_eq!(fails("$"), ErrorKind::UnknownToken);
    }

    #[test]
    fn numbers_in_every_base() {
        assert_eq!(number("42"), 42.0);
        assert_eq!(number("12.5"), 12.5);
        assert_eq!(number("0.25"), 0.25);
        assert_eq!(number("0x1F"), 31.0);
        assert_eq!(number("0xff"), 255.0);
        assert_eq!(number("0o17"), 15.0);
        assert_eq!(number("0b1010"), 10.0);
        assert_eq!(number("1_000_000"), 1_000_000.0);
        assert_eq!(number("1{000}"), 1000.0);
        assert_eq!(number("0"), 0.0);
    }

    #[test]
    fn malformed_numbers() {
        assert_eq!(fails("0x"), ErrorKind::NumberNotInBase);
        assert_eq!(fails("0b2"), ErrorKind::NumberNotInBase);
        assert_eq!(fails("01"), ErrorKind::NumberNotADecimal);
        assert_eq!(fails("1."), ErrorKind::NumberNotADecimal);
        assert_eq!(fails("0."), ErrorKind::NumberNotADecimal);
        assert_eq!(fails("0z"), ErrorKind::NumberUnknownBase);
        assert_eq!(fails("0xFFFFFFFFFFFFFFFFF"), ErrorKind::NumberOverflow);
    }

    #[test]
    fn number_limit_is_configurable() {
        let limits = Limits {
            max_number: 100.0,
            ..Limits::default()
        };
        let err = Lexer::new("1000", &limits).next_token().unwrap_err();
        assert_eq!(err.kind, ErrorKind::NumberOverflow);
    }

    #[test]
    fn keywords_and_rewrites() {
        assert_eq!(single("WHILE").kind, TokenKind::While);
        assert_eq!(single("TRUE").value, Some(TokenValue::Fact(true)));

        let pipe = single("PIPE");
        assert_eq!(pipe.kind, TokenKind::Identifier);
        assert_eq!(pipe.text(), Some("PIPE"));
    }

    #[test]
    fn identifiers_accept_unicode_letters() {
        let token = single("testGąska");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.text(), Some("testGąska"));
    }

    #[test]
    fn identifier_limit() {
        let exact = "a".repeat(100);
        assert_eq!(single(&exact).text(), Some(exact.as_str()));
        assert_eq!(fails(&"a".repeat(101)), ErrorKind::IdentifierTooBig);
    }

    #[test]
    fn text_escapes() {
        let token = single(r#""a\tb\"c\#""#);
        assert_eq!(token.kind, TokenKind::Text);
        assert_eq!(token.text(), Some("a\tb\"c#"));
    }

    #[test]
    fn text_and_comment_failures() {
        assert_eq!(fails(r#""abc"#), ErrorKind::TextSuddenEnd);
        assert_eq!(fails("#abc"), ErrorKind::CommentSuddenEnd);
        assert_eq!(fails(r#""\q""#), ErrorKind::UnknownEscape);
        assert_eq!(fails(&format!("\"{}\"", "x".repeat(101))), ErrorKind::TextTooBig);
        assert_eq!(fails(&format!("#{}#", "x".repeat(101))), ErrorKind::CommentTooBig);
    }

    #[test]
    fn comments_and_newlines_are_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("a # note #\nb"),
            vec![Identifier, Comment, Eol, Identifier, Etx]
        );
    }

    #[test]
    fn error_carries_buffered_text() {
        let err = Lexer::new("x IS 0q1;", &Limits::default())
            .tokenize()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NumberUnknownBase);
        assert_eq!(err.buffered, "0q");
    }

    #[test]
    fn number_prefix_ignores_tail() {
        assert_eq!(Lexer::number_prefix("12.5"), Some(12.5));
        assert_eq!(Lexer::number_prefix("12abc"), Some(12.0));
        assert_eq!(Lexer::number_prefix("abc"), None);
        assert_eq!(Lexer::number_prefix(""), None);
        assert_eq!(Lexer::number_prefix("1."), None);
    }

    #[test]
    fn number_prefix_is_not_bound_by_a_configured_limit() {
        let limits = Limits {
            max_number: 100.0,
            ..Limits::default()
        };
        assert!(Lexer::new("1000", &limits).tokenize().is_err());
        assert_eq!(Lexer::number_prefix("1000"), Some(1000.0));
    }
}
