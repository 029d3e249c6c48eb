//! Recursive-descent parser for the declaration subset rspc emits.
//!
//! Handles `type` aliases and `interface` declarations (with optional
//! `export`/`declare` modifiers) plus import statements, which are skipped.
//! Type expressions cover references with generic arguments, inline object
//! types, unions, tuples, postfix arrays and literal types.

use crate::ast::{ObjectProperty, SourceFile, TypeAlias, TypeExpr};
use crate::error::{Error, Result};
use crate::lexer::{tokenize, Spanned, Token};

pub fn parse(source: &str) -> Result<SourceFile> {
    Parser::new(tokenize(source)?).source_file()
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn source_file(mut self) -> Result<SourceFile> {
        let mut aliases = Vec::new();

        while let Some(spanned) = self.peek() {
            let line = spanned.line;
            match &spanned.token {
                Token::Ident(word) => match word.as_str() {
                    "export" | "declare" => {
                        self.advance();
                    }
                    "import" => self.skip_statement(),
                    "type" => {
                        self.advance();
                        aliases.push(self.type_alias()?);
                    }
                    "interface" => {
                        self.advance();
                        aliases.push(self.interface()?);
                    }
                    other => {
                        return Err(Error::Syntax {
                            line,
                            message: format!("unexpected `{other}` at top level"),
                        })
                    }
                },
                Token::Semi => {
                    self.advance();
                }
                token => {
                    return Err(Error::Syntax {
                        line,
                        message: format!("unexpected {token:?} at top level"),
                    })
                }
            }
        }

        Ok(SourceFile { aliases })
    }

    fn type_alias(&mut self) -> Result<TypeAlias> {
        let name = self.expect_ident()?;
        self.expect(Token::Eq)?;
        let ty = self.type_expr()?;
        // Trailing semicolon is optional at end of file.
        if matches!(self.peek_token(), Some(Token::Semi)) {
            self.advance();
        }
        Ok(TypeAlias { name, ty })
    }

    fn interface(&mut self) -> Result<TypeAlias> {
        let name = self.expect_ident()?;
        self.expect(Token::LBrace)?;
        let ty = self.object_body()?;
        Ok(TypeAlias { name, ty })
    }

    /// Union level. Intersections are not part of the rspc output grammar.
    fn type_expr(&mut self) -> Result<TypeExpr> {
        // Allow a leading `|` before the first alternative.
        if matches!(self.peek_token(), Some(Token::Pipe)) {
            self.advance();
        }

        let first = self.postfix_expr()?;
        if !matches!(self.peek_token(), Some(Token::Pipe)) {
            return Ok(first);
        }

        let mut members = vec![first];
        while matches!(self.peek_token(), Some(Token::Pipe)) {
            self.advance();
            members.push(self.postfix_expr()?);
        }
        Ok(TypeExpr::Union(members))
    }

    fn postfix_expr(&mut self) -> Result<TypeExpr> {
        let mut ty = self.primary_expr()?;
        while matches!(self.peek_token(), Some(Token::LBracket)) {
            // Only `[]` is valid postfix; anything else is a parse error here.
            self.advance();
            self.expect(Token::RBracket)?;
            ty = TypeExpr::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn primary_expr(&mut self) -> Result<TypeExpr> {
        let spanned = self.next_spanned()?;
        let line = spanned.line;
        match spanned.token {
            Token::LBrace => self.object_body(),
            Token::LBracket => {
                let mut fields = Vec::new();
                if !matches!(self.peek_token(), Some(Token::RBracket)) {
                    loop {
                        fields.push(self.type_expr()?);
                        if matches!(self.peek_token(), Some(Token::Comma)) {
                            self.advance();
                        } else {
                            break;
                        }
                    }
                }
                self.expect(Token::RBracket)?;
                Ok(TypeExpr::Tuple(fields))
            }
            Token::LParen => {
                let inner = self.type_expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Str(value) => Ok(TypeExpr::StringLiteral(value)),
            Token::Number(value) => Ok(TypeExpr::NumberLiteral(value)),
            Token::Ident(name) => match name.as_str() {
                "never" => Ok(TypeExpr::Never),
                "true" => Ok(TypeExpr::BooleanLiteral(true)),
                "false" => Ok(TypeExpr::BooleanLiteral(false)),
                _ => {
                    let mut args = Vec::new();
                    if matches!(self.peek_token(), Some(Token::Lt)) {
                        self.advance();
                        loop {
                            args.push(self.type_expr()?);
                            match self.peek_token() {
                                Some(Token::Comma) => {
                                    self.advance();
                                }
                                _ => break,
                            }
                        }
                        self.expect(Token::Gt)?;
                    }
                    Ok(TypeExpr::Reference { name, args })
                }
            },
            token => Err(Error::Syntax {
                line,
                message: format!("expected a type, found {token:?}"),
            }),
        }
    }

    /// Parses object properties after the opening brace has been consumed.
    fn object_body(&mut self) -> Result<TypeExpr> {
        let mut properties = Vec::new();

        loop {
            match self.peek_token() {
                Some(Token::RBrace) => {
                    self.advance();
                    break;
                }
                Some(Token::Ident(_) | Token::Str(_)) => {
                    let name = match self.next_spanned()?.token {
                        Token::Ident(name) | Token::Str(name) => name,
                        _ => unreachable!(),
                    };
                    let optional = if matches!(self.peek_token(), Some(Token::Question)) {
                        self.advance();
                        true
                    } else {
                        false
                    };
                    self.expect(Token::Colon)?;
                    let ty = self.type_expr()?;
                    properties.push(ObjectProperty { name, optional, ty });

                    if matches!(self.peek_token(), Some(Token::Comma | Token::Semi)) {
                        self.advance();
                    }
                }
                _ => {
                    let line = self.current_line();
                    return Err(Error::Syntax {
                        line,
                        message: "expected a property name or `}`".into(),
                    });
                }
            }
        }

        Ok(TypeExpr::Object(properties))
    }

    /// Skips everything up to and including the next semicolon.
    fn skip_statement(&mut self) {
        while let Some(spanned) = self.peek() {
            let is_semi = spanned.token == Token::Semi;
            self.advance();
            if is_semi {
                break;
            }
        }
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.peek().map(|s| &s.token)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn current_line(&self) -> usize {
        self.peek()
            .map(|s| s.line)
            .or_else(|| self.tokens.last().map(|s| s.line))
            .unwrap_or(1)
    }

    fn next_spanned(&mut self) -> Result<Spanned> {
        let spanned = self.tokens.get(self.pos).cloned().ok_or(Error::Syntax {
            line: self.current_line(),
            message: "unexpected end of file".into(),
        })?;
        self.pos += 1;
        Ok(spanned)
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        let spanned = self.next_spanned()?;
        if spanned.token == expected {
            Ok(())
        } else {
            Err(Error::Syntax {
                line: spanned.line,
                message: format!("expected {expected:?}, found {:?}", spanned.token),
            })
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        let spanned = self.next_spanned()?;
        match spanned.token {
            Token::Ident(name) => Ok(name),
            token => Err(Error::Syntax {
                line: spanned.line,
                message: format!("expected an identifier, found {token:?}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_alias() {
        let file = parse("export type User = { id: string; name: string };").unwrap();
        assert_eq!(file.aliases.len(), 1);
        assert_eq!(file.aliases[0].name, "User");
        match &file.aliases[0].ty {
            TypeExpr::Object(props) => {
                assert_eq!(props.len(), 2);
                assert_eq!(props[0].name, "id");
            }
            other => panic!("expected object type, got {other:?}"),
        }
    }

    #[test]
    fn parses_union_in_declaration_order() {
        let file = parse(r#"type T = { key: "a" } | { key: "b" } | { key: "c" };"#).unwrap();
        match &file.aliases[0].ty {
            TypeExpr::Union(members) => assert_eq!(members.len(), 3),
            other => panic!("expected union, got {other:?}"),
        }
    }

    #[test]
    fn parses_postfix_array_and_tuple() {
        let file = parse("type T = [string, null[]];").unwrap();
        match &file.aliases[0].ty {
            TypeExpr::Tuple(fields) => {
                assert_eq!(fields[0], TypeExpr::reference("string"));
                assert_eq!(
                    fields[1],
                    TypeExpr::Array(Box::new(TypeExpr::reference("null")))
                );
            }
            other => panic!("expected tuple, got {other:?}"),
        }
    }

    #[test]
    fn parses_generic_reference() {
        let file = parse("type T = Record<string, number>;").unwrap();
        match &file.aliases[0].ty {
            TypeExpr::Reference { name, args } => {
                assert_eq!(name, "Record");
                assert_eq!(args.len(), 2);
            }
            other => panic!("expected reference, got {other:?}"),
        }
    }

    #[test]
    fn parses_never_and_literals() {
        let file = parse(r#"type T = { input: never, key: "user.list", n: 42 };"#).unwrap();
        match &file.aliases[0].ty {
            TypeExpr::Object(props) => {
                assert_eq!(props[0].ty, TypeExpr::Never);
                assert_eq!(props[1].ty, TypeExpr::StringLiteral("user.list".into()));
                assert_eq!(props[2].ty, TypeExpr::NumberLiteral("42".into()));
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn folds_interface_into_alias() {
        let file = parse("export interface Config { debug: boolean }").unwrap();
        assert_eq!(file.aliases[0].name, "Config");
        assert!(matches!(file.aliases[0].ty, TypeExpr::Object(_)));
    }

    #[test]
    fn skips_import_statements() {
        let file = parse("import { Thing } from \"./thing\";\ntype A = string;").unwrap();
        assert_eq!(file.aliases.len(), 1);
    }

    #[test]
    fn reports_line_of_syntax_error() {
        let err = parse("type A = string;\ntype = string;").unwrap_err();
        match err {
            Error::Syntax { line, .. } => assert_eq!(line, 2),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }
}
