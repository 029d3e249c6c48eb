//! Tokenizer for the TypeScript declaration subset rspc emits.
//!
//! Bindings files only contain comments, import statements and type
//! declarations, so the token set is small. Line numbers are tracked for
//! syntax errors.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Str(String),
    Number(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Lt,
    Gt,
    Colon,
    Semi,
    Comma,
    Dot,
    Pipe,
    Amp,
    Eq,
    Question,
    Star,
}

/// A token together with the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
}

pub fn tokenize(source: &str) -> Result<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1;

    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '/' => {
                chars.next();
                match chars.peek() {
                    Some('/') => {
                        while let Some(&c) = chars.peek() {
                            if c == '\n' {
                                break;
                            }
                            chars.next();
                        }
                    }
                    Some('*') => {
                        chars.next();
                        let mut prev = ' ';
                        loop {
                            match chars.next() {
                                Some('\n') => {
                                    line += 1;
                                    prev = '\n';
                                }
                                Some('/') if prev == '*' => break,
                                Some(c) => prev = c,
                                None => {
                                    return Err(Error::Syntax {
                                        line,
                                        message: "unterminated block comment".into(),
                                    })
                                }
                            }
                        }
                    }
                    _ => {
                        return Err(Error::Syntax {
                            line,
                            message: "unexpected `/`".into(),
                        })
                    }
                }
            }
            '"' | '\'' => {
                let quote = c;
                let start = line;
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some(c) if c == quote => break,
                        Some('\\') => {
                            if let Some(escaped) = chars.next() {
                                value.push(escaped);
                            }
                        }
                        Some('\n') | None => {
                            return Err(Error::Syntax {
                                line: start,
                                message: "unterminated string literal".into(),
                            })
                        }
                        Some(c) => value.push(c),
                    }
                }
                tokens.push(Spanned {
                    token: Token::Str(value),
                    line: start,
                });
            }
            c if c.is_ascii_digit() || c == '-' => {
                let mut value = String::new();
                value.push(c);
                chars.next();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' || c == 'e' || c == '_' {
                        value.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Spanned {
                    token: Token::Number(value),
                    line,
                });
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let mut value = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '$' {
                        value.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Spanned {
                    token: Token::Ident(value),
                    line,
                });
            }
            _ => {
                let token = match c {
                    '{' => Token::LBrace,
                    '}' => Token::RBrace,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    '<' => Token::Lt,
                    '>' => Token::Gt,
                    ':' => Token::Colon,
                    ';' => Token::Semi,
                    ',' => Token::Comma,
                    '.' => Token::Dot,
                    '|' => Token::Pipe,
                    '&' => Token::Amp,
                    '=' => Token::Eq,
                    '?' => Token::Question,
                    '*' => Token::Star,
                    c => {
                        return Err(Error::Syntax {
                            line,
                            message: format!("unexpected character `{c}`"),
                        })
                    }
                };
                chars.next();
                tokens.push(Spanned { token, line });
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn tokenizes_type_alias() {
        assert_eq!(
            kinds("type A = string;"),
            vec![
                Token::Ident("type".into()),
                Token::Ident("A".into()),
                Token::Eq,
                Token::Ident("string".into()),
                Token::Semi,
            ]
        );
    }

    #[test]
    fn tokenizes_string_literals() {
        assert_eq!(
            kinds(r#""user.list" 'user.get'"#),
            vec![Token::Str("user.list".into()), Token::Str("user.get".into())]
        );
    }

    #[test]
    fn skips_comments() {
        let source = "// line comment\n/* block\ncomment */ type";
        assert_eq!(kinds(source), vec![Token::Ident("type".into())]);
    }

    #[test]
    fn tracks_lines() {
        let tokens = tokenize("type\n\nA").unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(matches!(
            tokenize("\"oops"),
            Err(Error::Syntax { line: 1, .. })
        ));
    }
}
