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
 * Word helpers behind the text builtins.
 *
 * Words are separated by single spaces and nothing else; consecutive
 * spaces produce empty words, exactly like a plain `split(' ')`.
 */

/// The first word. A text without spaces is its own first word.
pub fn first(text: &str) -> String {
    text.split(' ').next().unwrap_or_default().to_string()
}

/// The last word.
pub fn last(text: &str) -> String {
    text.split(' ').last().unwrap_or_default().to_string()
}

/// Everything but the last word, or `None` for a single word.
pub fn body(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split(' ').collect();
    (words.len() > 1).then(|| words[..words.len() - 1].join(" "))
}

/// Everything but the first word, or `None` for a single word.
pub fn tail(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split(' ').collect();
    (words.len() > 1).then(|| words[1..].join(" "))
}

/// Splits off the first word: `(head, tail)`.
pub fn split(text: &str) -> (String, Option<String>) {
    (first(text), tail(text))
}

/// Splits off the last word: `(body, tip)`.
///
/// The body of a single word is empty text rather than `None`.
pub fn back_split(text: &str) -> (String, Option<String>) {
    let words: Vec<&str> = text.split(' ').collect();
    let body = words[..words.len().saturating_sub(1)].join(" ");
    let tip = (words.len() > 1).then(|| last(text));
    (body, tip)
}

/// `Fizz` for multiples of 3, `Buzz` for multiples of 5, both for 15,
/// otherwise the number itself.
pub fn fizz_buzz(n: f64) -> String {
    let mut out = String::new();
    if n % 3.0 == 0.0 {
        out.push_str("Fizz");
    }
    if n % 5.0 == 0.0 {
        out.push_str("Buzz");
    }
    if out.is_empty() {
        out = n.to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_of_a_sentence() {
        assert_eq!(first("ban ano lot"), "ban");
        assert_eq!(last("ban ano lot"), "lot");
        assert_eq!(body("ban ano lot").as_deref(), Some("ban ano"));
        assert_eq!(tail("ban ano lot").as_deref(), Some("ano lot"));
    }

    #[test]
    fn single_words() {
        assert_eq!(first("ban"), "ban");
        assert_eq!(last("ban"), "ban");
        assert_eq!(body("ban"), None);
        assert_eq!(tail("ban"), None);
        assert_eq!(split("ban"), ("ban".to_string(), None));
        assert_eq!(back_split("ban"), (String::new(), None));
    }

    #[test]
    fn splitting_both_ways() {
        assert_eq!(
            split("ban ano lot"),
            ("ban".to_string(), Some("ano lot".to_string()))
        );
        assert_eq!(
            back_split("ban ano lot"),
            ("ban ano".to_string(), Some("lot".to_string()))
        );
    }

    #[test]
    fn fizz_buzz_rules() {
        assert_eq!(fizz_buzz(9.0), "Fizz");
        assert_eq!(fizz_buzz(10.0), "Buzz");
        assert_eq!(fizz_buzz(30.0), "FizzBuzz");
        assert_eq!(fizz_buzz(7.0), "7");
    }
}
