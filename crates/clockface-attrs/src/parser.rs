use std::collections::HashSet;

use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenWithPos};
use crate::sheet::{Attr, StyleBlock, StyleSheet, Value};

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| (t.line, t.col))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    /// Consumes the current token, returning it with its position.
    fn advance(&mut self) -> (Token, usize, usize) {
        let (line, col) = self.current_pos();
        let tok = self.tokens.get(self.pos).map(|t| t.token.clone()).unwrap_or(Token::Eof);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        (tok, line, col)
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        let (line, col) = self.current_pos();
        ParseError::new(msg, line, col)
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected {expected:?}, got {:?}", self.peek())))
        }
    }

    // ── Sheet ─────────────────────────────────────────────────────────────

    pub fn parse_sheet(&mut self) -> Result<StyleSheet, ParseError> {
        let mut blocks: Vec<StyleBlock> = Vec::new();

        while self.peek() != &Token::Eof {
            let block = self.parse_block()?;
            if blocks.iter().any(|b| b.name == block.name) {
                return Err(ParseError::new(
                    format!("duplicate style block {:?}", block.name),
                    block.line,
                    block.col,
                ));
            }
            blocks.push(block);
        }

        Ok(StyleSheet { blocks })
    }

    // ── Block ─────────────────────────────────────────────────────────────

    /// `Name { (key: value)* }`
    fn parse_block(&mut self) -> Result<StyleBlock, ParseError> {
        let (name, line, col) = match self.advance() {
            (Token::Ident(name), line, col) => (name, line, col),
            (tok, line, col) => {
                return Err(ParseError::new(
                    format!("expected a style block name, got {tok:?}"),
                    line,
                    col,
                ));
            }
        };
        self.expect(&Token::LBrace)?;

        let mut attrs = Vec::new();
        let mut seen = HashSet::new();

        loop {
            match self.peek() {
                Token::RBrace => {
                    self.advance();
                    break;
                }
                Token::Eof => return Err(self.err(format!("unclosed '{{' in block {name:?}"))),
                Token::Ident(_) => {
                    let attr = self.parse_attr()?;
                    if !seen.insert(attr.key.clone()) {
                        return Err(ParseError::new(
                            format!("duplicate attribute {:?} in block {name:?}", attr.key),
                            attr.line,
                            attr.col,
                        ));
                    }
                    attrs.push(attr);
                }
                tok => {
                    return Err(self.err(format!(
                        "unexpected {tok:?} inside block {name:?}; expected `key: value`"
                    )));
                }
            }
        }

        Ok(StyleBlock { name, attrs, line, col })
    }

    // ── Attr ──────────────────────────────────────────────────────────────

    fn parse_attr(&mut self) -> Result<Attr, ParseError> {
        let (key, line, col) = match self.advance() {
            (Token::Ident(key), line, col) => (key, line, col),
            (tok, line, col) => {
                return Err(ParseError::new(format!("expected attribute name, got {tok:?}"), line, col));
            }
        };
        self.expect(&Token::Colon)?;
        let value = self.parse_value()?;
        Ok(Attr { key, value, line, col })
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.advance() {
            (Token::Str(s), ..) => Ok(Value::Str(s)),
            (Token::Number(n), ..) => Ok(Value::Number(n)),
            (Token::Color(c), ..) => Ok(Value::Color(c)),
            (Token::Ident(s), ..) => Ok(Value::Ident(s)),
            (tok, line, col) => {
                Err(ParseError::new(format!("expected a value, got {tok:?}"), line, col))
            }
        }
    }
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parses an attribute sheet.
pub fn parse_str(src: &str) -> Result<StyleSheet, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_sheet()
}
