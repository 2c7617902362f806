//! Command argument tokenizer.
//!
//! Shell-like splitting so multi-word triggers can be quoted:
//! `/filter "good morning" Have a great day` yields the trigger
//! `good morning`. Single quotes, double quotes, and backslash escapes are
//! supported; inside double quotes a backslash only escapes `"` and `\`.

use thiserror::Error;

/// Tokenization failure, reported verbatim to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("no closing quotation")]
    UnbalancedQuote,
    #[error("trailing escape character")]
    TrailingEscape,
}

#[derive(Clone, Copy, PartialEq)]
enum State {
    Plain,
    SingleQuoted,
    DoubleQuoted,
}

/// Split `input` into whitespace-separated tokens with shell quoting rules.
pub fn split_args(input: &str) -> Result<Vec<String>, SplitError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Quoted empty strings must survive as tokens, so track "token open"
    // separately from "current is non-empty".
    let mut in_token = false;
    let mut state = State::Plain;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match state {
            State::Plain => match c {
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                '\'' => {
                    state = State::SingleQuoted;
                    in_token = true;
                }
                '"' => {
                    state = State::DoubleQuoted;
                    in_token = true;
                }
                '\\' => {
                    let escaped = chars.next().ok_or(SplitError::TrailingEscape)?;
                    current.push(escaped);
                    in_token = true;
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
            State::SingleQuoted => match c {
                '\'' => state = State::Plain,
                c => current.push(c),
            },
            State::DoubleQuoted => match c {
                '"' => state = State::Plain,
                '\\' => {
                    let escaped = chars.next().ok_or(SplitError::TrailingEscape)?;
                    match escaped {
                        '"' | '\\' => current.push(escaped),
                        c => {
                            current.push('\\');
                            current.push(c);
                        }
                    }
                }
                c => current.push(c),
            },
        }
    }

    if state != State::Plain {
        return Err(SplitError::UnbalancedQuote);
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_split() {
        let parts = split_args("/filter hello Hi there!").unwrap();
        assert_eq!(parts, vec!["/filter", "hello", "Hi", "there!"]);
    }

    #[test]
    fn test_quoted_multi_word_trigger() {
        let parts = split_args(r#"/filter "good morning" Have a great day"#).unwrap();
        assert_eq!(parts[1], "good morning");
        assert_eq!(parts[2..], ["Have", "a", "great", "day"]);
    }

    #[test]
    fn test_single_quotes() {
        let parts = split_args("/stop 'good morning'").unwrap();
        assert_eq!(parts, vec!["/stop", "good morning"]);
    }

    #[test]
    fn test_escaped_quote_inside_double_quotes() {
        let parts = split_args(r#"/filter "say \"hi\"" ok"#).unwrap();
        assert_eq!(parts[1], r#"say "hi""#);
    }

    #[test]
    fn test_empty_quoted_token_survives() {
        let parts = split_args(r#"/filter "" x"#).unwrap();
        assert_eq!(parts, vec!["/filter", "", "x"]);
    }

    #[test]
    fn test_unbalanced_quote_is_error() {
        assert_eq!(
            split_args(r#"/filter "good morning"#),
            Err(SplitError::UnbalancedQuote)
        );
    }

    #[test]
    fn test_trailing_escape_is_error() {
        assert_eq!(split_args(r"/filter hello\"), Err(SplitError::TrailingEscape));
    }

    #[test]
    fn test_extra_whitespace_collapses() {
        let parts = split_args("  /filter   hello    world  ").unwrap();
        assert_eq!(parts, vec!["/filter", "hello", "world"]);
    }
}
