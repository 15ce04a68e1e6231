//! Tokenizer for Turtle and N-Triples

use super::{IoError, IoResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// `<...>`, escapes resolved, not yet resolved against the base
    IriRef(String),
    PrefixedName { prefix: String, local: String },
    BlankLabel(String),
    String(String),
    LangTag(String),
    Integer(String),
    Decimal(String),
    Double(String),
    Boolean(bool),
    /// `@prefix`
    PrefixDirective,
    /// `@base`
    BaseDirective,
    /// SPARQL-style `PREFIX`
    SparqlPrefix,
    /// SPARQL-style `BASE`
    SparqlBase,
    /// The `a` keyword
    A,
    DoubleCaret,
    Dot,
    Semicolon,
    Comma,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token start
    pub position: usize,
}

pub(crate) fn tokenize(input: &str) -> IoResult<Vec<Token>> {
    let mut lexer = Lexer { input, pos: 0 };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, position: usize, message: impl Into<String>) -> IoError {
        IoError::lexer(position, message)
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> IoResult<Token> {
        self.skip_trivia();
        let position = self.pos;
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                position,
            });
        };

        let kind = match c {
            '<' => self.iri_ref()?,
            '"' | '\'' => self.string_literal(c)?,
            '@' => self.at_keyword()?,
            '_' if self.peek_at(1) == Some(':') => self.blank_label()?,
            '^' => {
                self.bump();
                if self.bump() != Some('^') {
                    return Err(self.error(position, "expected '^^'"));
                }
                TokenKind::DoubleCaret
            }
            '.' if !self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => {
                self.bump();
                TokenKind::Dot
            }
            ';' => {
                self.bump();
                TokenKind::Semicolon
            }
            ',' => {
                self.bump();
                TokenKind::Comma
            }
            '[' => {
                self.bump();
                TokenKind::LBracket
            }
            ']' => {
                self.bump();
                TokenKind::RBracket
            }
            '(' => {
                self.bump();
                TokenKind::LParen
            }
            ')' => {
                self.bump();
                TokenKind::RParen
            }
            '+' | '-' | '.' | '0'..='9' => self.number()?,
            c if is_name_start(c) || c == ':' => self.name()?,
            other => {
                return Err(self.error(position, format!("unexpected character '{}'", other)));
            }
        };

        Ok(Token { kind, position })
    }

    fn iri_ref(&mut self) -> IoResult<TokenKind> {
        let start = self.pos;
        self.bump();
        let mut iri = String::new();
        loop {
            match self.bump() {
                Some('>') => return Ok(TokenKind::IriRef(iri)),
                Some('\\') => iri.push(self.unicode_escape(start)?),
                Some(c) if c.is_whitespace() || matches!(c, '<' | '"' | '{' | '}' | '|' | '^' | '`') => {
                    return Err(self.error(start, format!("invalid character '{}' in IRI", c)));
                }
                Some(c) => iri.push(c),
                None => return Err(self.error(start, "unterminated IRI")),
            }
        }
    }

    /// `\uXXXX` or `\UXXXXXXXX`; the backslash is already consumed
    fn unicode_escape(&mut self, start: usize) -> IoResult<char> {
        let width = match self.bump() {
            Some('u') => 4,
            Some('U') => 8,
            _ => return Err(self.error(start, "invalid escape in IRI")),
        };
        self.hex_char(start, width)
    }

    fn hex_char(&mut self, start: usize, width: usize) -> IoResult<char> {
        let mut code = 0u32;
        for _ in 0..width {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error(start, "invalid hex escape"))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| self.error(start, "invalid code point"))
    }

    fn string_literal(&mut self, quote: char) -> IoResult<TokenKind> {
        let start = self.pos;
        let long = self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote);
        if long {
            self.bump();
            self.bump();
            self.bump();
        } else {
            self.bump();
        }

        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error(start, "unterminated string literal")),
                Some(c) if c == quote => {
                    if !long {
                        return Ok(TokenKind::String(value));
                    }
                    if self.peek() == Some(quote)
                        && self.peek_at(1) == Some(quote)
                        && self.peek_at(2) != Some(quote)
                    {
                        self.bump();
                        self.bump();
                        return Ok(TokenKind::String(value));
                    }
                    value.push(c);
                }
                Some('\n') | Some('\r') if !long => {
                    return Err(self.error(start, "newline in short string literal"));
                }
                Some('\\') => {
                    let escaped = match self.bump() {
                        Some('t') => '\t',
                        Some('b') => '\u{8}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('f') => '\u{c}',
                        Some('"') => '"',
                        Some('\'') => '\'',
                        Some('\\') => '\\',
                        Some('u') => self.hex_char(start, 4)?,
                        Some('U') => self.hex_char(start, 8)?,
                        _ => return Err(self.error(start, "invalid escape sequence")),
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// `@prefix`, `@base`, or a language tag
    fn at_keyword(&mut self) -> IoResult<TokenKind> {
        let start = self.pos;
        self.bump();
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        match word.as_str() {
            "" => Err(self.error(start, "empty language tag")),
            "prefix" => Ok(TokenKind::PrefixDirective),
            "base" => Ok(TokenKind::BaseDirective),
            _ => Ok(TokenKind::LangTag(word)),
        }
    }

    fn blank_label(&mut self) -> IoResult<TokenKind> {
        let start = self.pos;
        self.bump();
        self.bump();
        let label = self.name_chars();
        if label.is_empty() {
            return Err(self.error(start, "empty blank node label"));
        }
        Ok(TokenKind::BlankLabel(label))
    }

    fn number(&mut self) -> IoResult<TokenKind> {
        let start = self.pos;
        let mut text = String::new();
        if let Some(sign) = self.peek().filter(|c| *c == '+' || *c == '-') {
            text.push(sign);
            self.bump();
        }
        self.digits(&mut text);

        let mut decimal = false;
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) {
            decimal = true;
            text.push('.');
            self.bump();
            self.digits(&mut text);
        }

        let mut double = false;
        if let Some(e) = self.peek().filter(|c| *c == 'e' || *c == 'E') {
            double = true;
            text.push(e);
            self.bump();
            if let Some(sign) = self.peek().filter(|c| *c == '+' || *c == '-') {
                text.push(sign);
                self.bump();
            }
            self.digits(&mut text);
        }

        if !text.chars().any(|c| c.is_ascii_digit()) {
            return Err(self.error(start, "invalid numeric literal"));
        }
        Ok(if double {
            TokenKind::Double(text)
        } else if decimal {
            TokenKind::Decimal(text)
        } else {
            TokenKind::Integer(text)
        })
    }

    fn digits(&mut self, text: &mut String) {
        while let Some(d) = self.peek().filter(|c| c.is_ascii_digit()) {
            text.push(d);
            self.bump();
        }
    }

    /// Prefixed name, or one of the bare keywords
    fn name(&mut self) -> IoResult<TokenKind> {
        let start = self.pos;
        let prefix = self.name_chars();
        if self.peek() == Some(':') {
            self.bump();
            let local = self.name_chars();
            return Ok(TokenKind::PrefixedName { prefix, local });
        }
        match prefix.as_str() {
            "a" => Ok(TokenKind::A),
            "true" => Ok(TokenKind::Boolean(true)),
            "false" => Ok(TokenKind::Boolean(false)),
            word if word.eq_ignore_ascii_case("prefix") => Ok(TokenKind::SparqlPrefix),
            word if word.eq_ignore_ascii_case("base") => Ok(TokenKind::SparqlBase),
            word => Err(self.error(start, format!("unknown keyword '{}'", word))),
        }
    }

    /// Name characters; a '.' is kept only when more name characters follow it
    fn name_chars(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if is_name_char(c) {
                out.push(c);
                self.bump();
            } else if c == '.' && self.peek_at(1).is_some_and(is_name_char) {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }
        out
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '\u{b7}'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn tokenizes_a_simple_statement() {
        assert_eq!(
            kinds("<> dc:title \"Hi\"@en ."),
            vec![
                TokenKind::IriRef(String::new()),
                TokenKind::PrefixedName {
                    prefix: "dc".into(),
                    local: "title".into()
                },
                TokenKind::String("Hi".into()),
                TokenKind::LangTag("en".into()),
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn trailing_dot_is_not_part_of_a_name() {
        assert_eq!(
            kinds("ex:a ex:b ex:c."),
            vec![
                TokenKind::PrefixedName { prefix: "ex".into(), local: "a".into() },
                TokenKind::PrefixedName { prefix: "ex".into(), local: "b".into() },
                TokenKind::PrefixedName { prefix: "ex".into(), local: "c".into() },
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn numbers_and_booleans() {
        assert_eq!(
            kinds("42 -1.5 2e10 true"),
            vec![
                TokenKind::Integer("42".into()),
                TokenKind::Decimal("-1.5".into()),
                TokenKind::Double("2e10".into()),
                TokenKind::Boolean(true),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn long_strings_keep_newlines_and_quotes() {
        assert_eq!(
            kinds("\"\"\"line one\n\"quoted\"\"\"\""),
            vec![
                TokenKind::String("line one\n\"quoted\"".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn parentheses_delimit_collections() {
        assert_eq!(
            kinds("(1 <x>)"),
            vec![
                TokenKind::LParen,
                TokenKind::Integer("1".into()),
                TokenKind::IriRef("x".into()),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("# nothing here\n  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn unterminated_iri_reports_position() {
        let err = tokenize("  <http://example.org").unwrap_err();
        assert!(matches!(err, IoError::Lexer { position: 2, .. }));
    }
}
