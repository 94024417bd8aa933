use crate::error::ParseError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Str(String),
    Number(f32),
    /// `[r, g, b, a]` straight-alpha bytes from `#rrggbb` or `#rrggbbaa`.
    Color([u8; 4]),
    Colon,
    LBrace,
    RBrace,
    Eof,
}

/// A token with the 1-based position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos {
    pub token: Token,
    pub line: usize,
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1, col: 1 }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithPos>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            let (line, col) = (self.line, self.col);
            let token = self.next_token()?;
            let eof = token == Token::Eof;
            tokens.push(TokenWithPos { token, line, col });
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(msg, self.line, self.col)
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), ParseError> {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.advance();
            }
            if self.rest().starts_with("//") {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.advance();
                }
            } else if self.rest().starts_with("/*") {
                let (line, col) = (self.line, self.col);
                self.advance();
                self.advance();
                loop {
                    if self.rest().starts_with("*/") {
                        self.advance();
                        self.advance();
                        break;
                    }
                    if self.advance().is_none() {
                        return Err(ParseError::new("unterminated block comment", line, col));
                    }
                }
            } else {
                return Ok(());
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let Some(ch) = self.peek() else {
            return Ok(Token::Eof);
        };

        match ch {
            ':' => { self.advance(); Ok(Token::Colon) }
            '{' => { self.advance(); Ok(Token::LBrace) }
            '}' => { self.advance(); Ok(Token::RBrace) }
            '"' => self.lex_string(),
            '#' => self.lex_color(),
            c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => self.lex_number(),
            c if c.is_alphabetic() || c == '_' => Ok(self.lex_ident()),
            other => Err(self.err(format!("unexpected character {other:?}"))),
        }
    }

    fn lex_string(&mut self) -> Result<Token, ParseError> {
        let (line, col) = (self.line, self.col);
        self.advance(); // opening `"`
        let mut s = String::new();
        loop {
            match self.advance() {
                None | Some('\n') => {
                    return Err(ParseError::new("unterminated string literal", line, col));
                }
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('"') => s.push('"'),
                    Some('\\') => s.push('\\'),
                    Some(c) => return Err(self.err(format!("unknown escape sequence \\{c}"))),
                    None => return Err(ParseError::new("unterminated string literal", line, col)),
                },
                Some(c) => s.push(c),
            }
        }
        Ok(Token::Str(s))
    }

    fn lex_color(&mut self) -> Result<Token, ParseError> {
        let (line, col) = (self.line, self.col);
        self.advance(); // `#`
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric()) {
            self.advance();
        }
        let hex = &self.src[start..self.pos];

        if (hex.len() != 6 && hex.len() != 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseError::new(
                format!("color literal must be #rrggbb or #rrggbbaa, got #{hex}"),
                line,
                col,
            ));
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(u8::MAX);
        let a = if hex.len() == 8 { channel(6) } else { u8::MAX };
        Ok(Token::Color([channel(0), channel(2), channel(4), a]))
    }

    fn lex_number(&mut self) -> Result<Token, ParseError> {
        let (line, col) = (self.line, self.col);
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.advance();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        let s = &self.src[start..self.pos];
        s.parse::<f32>()
            .map(Token::Number)
            .map_err(|_| ParseError::new(format!("invalid number {s:?}"), line, col))
    }

    fn lex_ident(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        Token::Ident(self.src[start..self.pos].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn positions_are_one_based() {
        let toks = Lexer::new("Clock {\n  size20: 20\n}").tokenize().unwrap();
        let pos: Vec<_> = toks.iter().map(|t| (t.line, t.col)).collect();
        assert_eq!(pos, vec![(1, 1), (1, 7), (2, 3), (2, 9), (2, 11), (3, 1), (3, 2)]);
    }

    #[test]
    fn six_digit_color_is_opaque() {
        assert_eq!(tokens("#ff2020")[0], Token::Color([0xff, 0x20, 0x20, 0xff]));
    }

    #[test]
    fn eight_digit_color_keeps_alpha() {
        assert_eq!(tokens("#1e3cff80")[0], Token::Color([0x1e, 0x3c, 0xff, 0x80]));
    }

    #[test]
    fn signed_and_fractional_numbers() {
        assert_eq!(
            tokens("-10 +2.5 .5"),
            vec![Token::Number(-10.0), Token::Number(2.5), Token::Number(0.5), Token::Eof]
        );
    }

    #[test]
    fn lone_sign_is_an_error() {
        let e = Lexer::new("Clock { a: - }").tokenize().unwrap_err();
        assert_eq!((e.line, e.col), (1, 12));
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let e = Lexer::new("Clock /* never closed").tokenize().unwrap_err();
        assert_eq!((e.line, e.col), (1, 7));
    }

    #[test]
    fn unknown_escape_is_an_error() {
        assert!(Lexer::new(r#""\q""#).tokenize().is_err());
    }
}
