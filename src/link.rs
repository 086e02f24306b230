//! `Link` header parsing and lookup by relation.
//!
//! Grammar accepted (RFC 8288, minus extended `*` parameters):
//!
//! ```text
//! Link       = link-value *( "," link-value )
//! link-value = "<" URI ">" *( ";" param )
//! param      = token [ "=" ( token / quoted-string ) ]
//! ```

use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use http::{HeaderMap, HeaderName};
use url::Url;

use crate::{parse_uri, Error, Result};

/// A single parsed link-value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkHeader {
    pub href: Url,
    pub rel: String,
    /// Remaining parameters in header order, names lower-cased.
    pub params: Vec<(String, String)>,
}

impl LinkHeader {
    pub fn new(href: Url, rel: impl Into<String>) -> Self {
        Self { href, rel: rel.into(), params: Vec::new() }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parse every link-value in one header line.
    pub fn parse_all(input: &str) -> Result<Vec<LinkHeader>> {
        let mut parser = Parser::new(input);
        let mut links = Vec::new();

        loop {
            parser.skip_ws();
            links.push(parser.link_value()?);
            parser.skip_ws();
            match parser.next() {
                None => break,
                Some((_, ',')) => continue,
                Some((pos, c)) => return Err(parser.error(pos, format!("Unexpected '{c}' after link-value"))),
            }
        }

        Ok(links)
    }
}

impl FromStr for LinkHeader {
    type Err = Error;

    /// Parse a header line holding exactly one link-value.
    fn from_str(s: &str) -> Result<Self> {
        let mut links = Self::parse_all(s)?;
        if links.len() != 1 {
            return Err(Error::MalformedLink {
                input: s.to_owned(),
                position: 0,
                message: format!("Expected one link-value, found {}", links.len()),
            });
        }
        Ok(links.remove(0))
    }
}

impl fmt::Display for LinkHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>; rel=\"{}\"", self.href, self.rel)?;
        for (k, v) in &self.params {
            write!(f, "; {k}=\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\""))?;
        }
        Ok(())
    }
}

/// First link under `header_name` whose relation is exactly `rel`.
///
/// Header names match case-insensitively; `rel` is compared byte for byte.
/// Values are scanned in header order, and within a line in link-value
/// order, up to the first match. An unparsable entry before the match fails
/// the lookup; entries after it are never read.
pub fn resolve(headers: &HeaderMap, header_name: &str, rel: &str) -> Result<Option<LinkHeader>> {
    if header_name.is_empty() {
        return Err(Error::InvalidArgument("Header name cannot be empty".into()));
    }
    if rel.is_empty() {
        return Err(Error::InvalidArgument("Link relation cannot be empty".into()));
    }
    let name = HeaderName::from_bytes(header_name.as_bytes())
        .map_err(|e| Error::InvalidArgument(format!("Invalid header name '{header_name}': {e}")))?;

    for value in headers.get_all(&name) {
        let value = value.to_str().map_err(|e| Error::MalformedLink {
            input: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            position: 0,
            message: format!("Header value is not visible ASCII: {e}"),
        })?;
        for link in LinkHeader::parse_all(value)? {
            if link.rel == rel {
                return Ok(Some(link));
            }
        }
    }

    Ok(None)
}

// ============================================================================
// Parser
// ============================================================================

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, chars: input.char_indices().peekable() }
    }

    fn error(&self, position: usize, message: impl Into<String>) -> Error {
        Error::MalformedLink {
            input: self.input.to_owned(),
            position,
            message: message.into(),
        }
    }

    fn next(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(p, _)| p)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|c| c == ' ' || c == '\t') {
            self.chars.next();
        }
    }

    fn link_value(&mut self) -> Result<LinkHeader> {
        let start = self.pos();
        match self.next() {
            Some((_, '<')) => {}
            Some((pos, c)) => return Err(self.error(pos, format!("Expected '<', found '{c}'"))),
            None => return Err(self.error(start, "Expected '<', found end of input")),
        }

        let href_start = self.pos();
        let href_end = loop {
            match self.next() {
                Some((pos, '>')) => break pos,
                Some(_) => {}
                None => return Err(self.error(start, "Unterminated URI reference")),
            }
        };
        let raw_href = &self.input[href_start..href_end];
        let href = parse_uri(raw_href)
            .map_err(|e| self.error(href_start, format!("Invalid href: {e}")))?;

        let mut rel = None;
        let mut params = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() != Some(';') {
                break;
            }
            self.chars.next();
            self.skip_ws();
            // Tolerate an empty trailing parameter: `<..>; rel="x";`
            if matches!(self.peek(), None | Some(',')) {
                break;
            }
            let (name, value) = self.param()?;
            if name == "rel" {
                // Only the first occurrence of rel counts.
                if rel.is_none() {
                    rel = Some(value);
                }
            } else {
                params.push((name, value));
            }
        }

        let rel = rel.ok_or_else(|| self.error(start, "Missing rel parameter"))?;
        Ok(LinkHeader { href, rel, params })
    }

    fn param(&mut self) -> Result<(String, String)> {
        let name_start = self.pos();
        let name = self.token();
        if name.is_empty() {
            return Err(self.error(name_start, "Expected parameter name"));
        }

        self.skip_ws();
        if self.peek() != Some('=') {
            return Ok((name.to_ascii_lowercase(), String::new()));
        }
        self.chars.next();
        self.skip_ws();

        let value = if self.peek() == Some('"') {
            self.quoted()?
        } else {
            self.token()
        };
        Ok((name.to_ascii_lowercase(), value))
    }

    fn token(&mut self) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ';' | ',' | '=' | '"' | '<' | '>') {
                break;
            }
            s.push(c);
            self.chars.next();
        }
        s
    }

    fn quoted(&mut self) -> Result<String> {
        let start = self.pos();
        self.chars.next(); // opening quote
        let mut s = String::new();
        loop {
            match self.next() {
                Some((_, '\\')) => match self.next() {
                    Some((_, c)) => s.push(c),
                    None => return Err(self.error(start, "Unterminated quoted string")),
                },
                Some((_, '"')) => return Ok(s),
                Some((_, c)) => s.push(c),
                None => return Err(self.error(start, "Unterminated quoted string")),
            }
        }
    }
}
