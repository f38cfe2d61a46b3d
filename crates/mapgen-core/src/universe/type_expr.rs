//! Type expressions in host syntax.
//!
//! The universe JSON spells type references the way the host program does:
//! `Box<int>`, `m.Shape?`, `(int, String, {bool flag})`. This module lexes
//! and parses them into unresolved [`TypeExpr`] trees; name resolution
//! happens in the loader.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,
}

impl Token {
    fn describe(self) -> &'static str {
        match self {
            Token::Ident => "identifier",
            Token::LAngle => "`<`",
            Token::RAngle => "`>`",
            Token::LParen => "`(`",
            Token::RParen => "`)`",
            Token::LBrace => "`{`",
            Token::RBrace => "`}`",
            Token::Comma => "`,`",
            Token::Question => "`?`",
            Token::Dot => "`.`",
        }
    }
}

/// Unresolved type expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpr {
    Named {
        /// Import prefix (`m` in `m.Shape`).
        prefix: Option<String>,
        name: String,
        args: Vec<TypeExpr>,
        nullable: bool,
    },
    Record {
        positional: Vec<TypeExpr>,
        named: Vec<(String, TypeExpr)>,
        nullable: bool,
    },
}

/// Syntax error at a byte offset of the expression text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct SyntaxError {
    pub offset: usize,
    pub message: String,
}

/// Parse a complete type expression.
pub fn parse_type_expr(source: &str) -> Result<TypeExpr, SyntaxError> {
    let mut parser = Parser::new(source)?;
    let expr = parser.parse_type()?;
    if let Some((token, span)) = parser.peek_full() {
        return Err(SyntaxError {
            offset: span.start,
            message: format!("unexpected {} after type", token.describe()),
        });
    }
    Ok(expr)
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Result<Self, SyntaxError> {
        let mut tokens = Vec::new();
        let mut lexer = Token::lexer(source);
        while let Some(result) = lexer.next() {
            match result {
                Ok(token) => tokens.push((token, lexer.span())),
                Err(()) => {
                    return Err(SyntaxError {
                        offset: lexer.span().start,
                        message: format!("unexpected character `{}`", lexer.slice()),
                    });
                }
            }
        }
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn peek_full(&self) -> Option<(Token, Range<usize>)> {
        self.tokens.get(self.pos).cloned()
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len(), |(_, span)| span.start)
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> Result<Range<usize>, SyntaxError> {
        match self.peek_full() {
            Some((t, span)) if t == token => {
                self.pos += 1;
                Ok(span)
            }
            Some((t, span)) => Err(SyntaxError {
                offset: span.start,
                message: format!("expected {}, found {}", token.describe(), t.describe()),
            }),
            None => Err(SyntaxError {
                offset: self.source.len(),
                message: format!("expected {}, found end of input", token.describe()),
            }),
        }
    }

    fn ident(&mut self) -> Result<String, SyntaxError> {
        let span = self.expect(Token::Ident)?;
        Ok(self.source[span].to_string())
    }

    fn parse_type(&mut self) -> Result<TypeExpr, SyntaxError> {
        let mut expr = match self.peek() {
            Some(Token::Ident) => self.parse_named()?,
            Some(Token::LParen) => self.parse_record()?,
            _ => {
                return Err(SyntaxError {
                    offset: self.offset(),
                    message: "expected type".to_string(),
                });
            }
        };
        if self.eat(Token::Question) {
            match &mut expr {
                TypeExpr::Named { nullable, .. } | TypeExpr::Record { nullable, .. } => {
                    *nullable = true
                }
            }
        }
        Ok(expr)
    }

    fn parse_named(&mut self) -> Result<TypeExpr, SyntaxError> {
        let first = self.ident()?;
        let (prefix, name) = if self.eat(Token::Dot) {
            (Some(first), self.ident()?)
        } else {
            (None, first)
        };

        let mut args = Vec::new();
        if self.eat(Token::LAngle) {
            loop {
                args.push(self.parse_type()?);
                if !self.eat(Token::Comma) {
                    break;
                }
            }
            self.expect(Token::RAngle)?;
        }

        Ok(TypeExpr::Named {
            prefix,
            name,
            args,
            nullable: false,
        })
    }

    fn parse_record(&mut self) -> Result<TypeExpr, SyntaxError> {
        self.expect(Token::LParen)?;
        let mut positional = Vec::new();
        let mut named = Vec::new();

        loop {
            match self.peek() {
                Some(Token::RParen) => break,
                Some(Token::LBrace) => {
                    named = self.parse_named_fields()?;
                    break;
                }
                _ => {
                    positional.push(self.parse_type()?);
                    if !self.eat(Token::Comma) {
                        break;
                    }
                }
            }
        }
        self.expect(Token::RParen)?;

        Ok(TypeExpr::Record {
            positional,
            named,
            nullable: false,
        })
    }

    fn parse_named_fields(&mut self) -> Result<Vec<(String, TypeExpr)>, SyntaxError> {
        self.expect(Token::LBrace)?;
        let mut fields = Vec::new();
        while self.peek() != Some(Token::RBrace) {
            let ty = self.parse_type()?;
            let name = self.ident()?;
            fields.push((name, ty));
            if !self.eat(Token::Comma) {
                break;
            }
        }
        self.expect(Token::RBrace)?;
        Ok(fields)
    }
}
