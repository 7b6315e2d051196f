//! Resolution of textual type expressions.
//!
//! Grammar:
//!
//! ```text
//! expr   := NAME ( '[' params ']' )?
//! params := param ( ',' param )* ','?
//! param  := '...' | '(' ')' | bound? ':' bound? | bound | expr
//! bound  := '-'? INT | '-'? FLOAT | STR | 'True' | 'False'
//! ```
//!
//! Names are looked up in a `Namespace`. A subscripted name must be a
//! factory; a bare factory name is the factory called with no arguments.
//! Callables are only valid as parameters.

mod lexer;

use std::ops::Range;

use logos::Logos;
use vela_value::Value;

use crate::errors::{malformed_expression, not_subscriptable, unresolved_name, ConfigError};
use crate::factory::Param;
use crate::namespace::{Namespace, Symbol};
use crate::stack::ensure_sufficient_stack;
use crate::ty::Type;
use lexer::RawToken;

/// Resolve `expression` to a type using the names in `namespace`.
#[tracing::instrument(level = "debug", skip(namespace))]
pub fn resolve(expression: &str, namespace: &Namespace) -> Result<Type, ConfigError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        source: expression,
        tokens,
        pos: 0,
        namespace,
    };
    let param = parser.named()?;
    if let Some((_, span)) = parser.peek_full() {
        return Err(parser.error(span.start, "unexpected trailing input"));
    }
    match param {
        Param::Type(ty) => {
            tracing::debug!(resolved = %ty, "resolved type expression");
            Ok(ty)
        }
        other => Err(parser.error(0, &format!("expected a type, found {}", other.describe()))),
    }
}

fn tokenize(source: &str) -> Result<Vec<(RawToken, Range<usize>)>, ConfigError> {
    let mut tokens = Vec::new();
    let mut lex = RawToken::lexer(source);
    while let Some(result) = lex.next() {
        match result {
            Ok(token) => tokens.push((token, lex.span())),
            Err(()) => {
                return Err(malformed_expression(
                    source,
                    lex.span().start,
                    &format!("unexpected '{}'", lex.slice()),
                ))
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(RawToken, Range<usize>)>,
    pos: usize,
    namespace: &'a Namespace,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&RawToken> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn peek_full(&self) -> Option<(RawToken, Range<usize>)> {
        self.tokens.get(self.pos).cloned()
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len(), |(_, span)| span.start)
    }

    fn advance(&mut self) -> Option<(RawToken, Range<usize>)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &RawToken) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &RawToken, what: &str) -> Result<(), ConfigError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(self.offset(), &format!("expected {what}")))
        }
    }

    fn error(&self, position: usize, detail: &str) -> ConfigError {
        malformed_expression(self.source, position, detail)
    }

    /// `NAME ( '[' params ']' )?`
    fn named(&mut self) -> Result<Param, ConfigError> {
        let (source, namespace) = (self.source, self.namespace);
        let start = self.offset();
        let span = match self.advance() {
            Some((RawToken::Name, span)) => span,
            _ => return Err(self.error(start, "expected a name")),
        };
        let name = &source[span];
        let subscripted = self.peek() == Some(&RawToken::LBracket);
        match namespace.lookup(name) {
            None => Err(unresolved_name(name)),
            Some(Symbol::Type(_) | Symbol::Callable(_)) if subscripted => {
                Err(not_subscriptable(name))
            }
            Some(Symbol::Type(ty)) => Ok(Param::Type(ty.clone())),
            Some(Symbol::Callable(func)) => Ok(Param::Callable(func.clone())),
            Some(Symbol::Factory(factory)) => {
                let factory = factory.clone();
                let params = if subscripted {
                    self.pos += 1;
                    let params = ensure_sufficient_stack(|| self.params())?;
                    self.expect(&RawToken::RBracket, "']'")?;
                    params
                } else {
                    Vec::new()
                };
                factory.parameterize(&params).map(Param::Type)
            }
        }
    }

    /// Comma-separated parameters up to (not including) `]`.
    fn params(&mut self) -> Result<Vec<Param>, ConfigError> {
        let mut params = Vec::new();
        while self.peek() != Some(&RawToken::RBracket) {
            params.push(self.param()?);
            if !self.eat(&RawToken::Comma) {
                break;
            }
        }
        Ok(params)
    }

    fn param(&mut self) -> Result<Param, ConfigError> {
        match self.peek() {
            Some(RawToken::Ellipsis) => {
                self.pos += 1;
                Ok(Param::Ellipsis)
            }
            Some(RawToken::LParen) => {
                self.pos += 1;
                self.expect(&RawToken::RParen, "')'")?;
                Ok(Param::Unit)
            }
            Some(RawToken::Name) => self.named(),
            Some(_) => self.bound_or_slice(),
            None => Err(self.error(self.offset(), "unexpected end of expression")),
        }
    }

    /// `bound? ':' bound?` or a bare `bound`.
    fn bound_or_slice(&mut self) -> Result<Param, ConfigError> {
        let lower = self.bound()?;
        if !self.eat(&RawToken::Colon) {
            return match lower {
                Some(value) => Ok(Param::Value(value)),
                None => Err(self.error(self.offset(), "expected a parameter")),
            };
        }
        let upper = self.bound()?;
        Ok(Param::slice(lower, upper))
    }

    /// A literal bound value, if one starts here.
    fn bound(&mut self) -> Result<Option<Value>, ConfigError> {
        let negative = self.eat(&RawToken::Minus);
        let value = match self.peek().cloned() {
            Some(RawToken::Int(n)) => {
                let int = if negative {
                    0_i64.checked_sub_unsigned(n)
                } else {
                    i64::try_from(n).ok()
                };
                match int {
                    Some(int) => Value::Int(int),
                    None => return Err(self.error(self.offset(), "integer out of range")),
                }
            }
            Some(RawToken::Float(f)) => Value::Float(if negative { -f } else { f }),
            Some(RawToken::Str(s)) if !negative => Value::string(s),
            Some(RawToken::True) if !negative => Value::Bool(true),
            Some(RawToken::False) if !negative => Value::Bool(false),
            _ if negative => return Err(self.error(self.offset(), "expected a number after '-'")),
            _ => return Ok(None),
        };
        self.pos += 1;
        Ok(Some(value))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
