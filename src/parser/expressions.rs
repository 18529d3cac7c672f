//! Expression parsing implementation
//!
//! This module handles parsing of Misnomer expressions with one function per
//! precedence level, from `or` (loosest) down to primaries.
//!
//! # Supported Expressions
//!
//! - Literals: integers, floats, strings
//! - Identifiers and function calls
//! - Logical: `or`, `and`, `not` / `!`
//! - Comparison: `==`, `!=`, `<`, `<=`, `>`, `>=` (non-associative)
//! - Arithmetic: `+`, `-`, `*`, `/`, unary `-`
//! - Parenthesized expressions
//!
//! # Operator chains
//!
//! `+`, `*`, `and` and `or` are built as flat n-ary nodes. Subtraction and
//! division are folded into those chains by wrapping the right operand in
//! [`UnOp::Negate`] / [`UnOp::Reciprocal`], so `a - b / c` becomes
//! `Add[a, Negate(Multiply[b, Reciprocal(c)])]`. A chain of one operand is
//! that operand.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, TokenKind, TokenValue};
use crate::parser::parse::{ParseError, Parser};
use crate::source::SourceStream;

type OperandParser<S> = fn(&mut Parser<S>) -> Result<Option<Expr>, ParseError>;

const RELATIONAL_OPERATORS: &[TokenKind] = &[
    TokenKind::Equal,
    TokenKind::NotEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
    TokenKind::Greater,
    TokenKind::GreaterEqual,
];

impl<S: SourceStream> Parser<S> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Option<Expr>, ParseError> {
        self.parse_logical_or()
    }

    /// Parse logical OR chain
    fn parse_logical_or(&mut self) -> Result<Option<Expr>, ParseError> {
        self.parse_chain(NaryOp::Or, &[TokenKind::Or], Self::parse_logical_and)
    }

    /// Parse logical AND chain
    fn parse_logical_and(&mut self) -> Result<Option<Expr>, ParseError> {
        self.parse_chain(NaryOp::And, &[TokenKind::And], Self::parse_relational)
    }

    /// Parse a single (non-associative) comparison
    fn parse_relational(&mut self) -> Result<Option<Expr>, ParseError> {
        let Some(left) = self.parse_additive()? else {
            return Ok(None);
        };

        let Some(operator) = self.match_token(RELATIONAL_OPERATORS)? else {
            return Ok(Some(left));
        };

        let Some(right) = self.parse_additive()? else {
            return Err(self.missing_operand(operator.kind()));
        };

        let op = match operator.kind() {
            TokenKind::Equal => CmpOp::Equal,
            TokenKind::NotEqual => CmpOp::NotEqual,
            TokenKind::Less => CmpOp::Less,
            TokenKind::LessEqual => CmpOp::LessEqual,
            TokenKind::Greater => CmpOp::Greater,
            _ => CmpOp::GreaterEqual,
        };

        Ok(Some(Expr::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location: operator.position(),
        }))
    }

    /// Parse additive chain (`+`, `-`)
    fn parse_additive(&mut self) -> Result<Option<Expr>, ParseError> {
        self.parse_chain(
            NaryOp::Add,
            &[TokenKind::Add, TokenKind::Subtract],
            Self::parse_multiplicative,
        )
    }

    /// Parse multiplicative chain (`*`, `/`)
    fn parse_multiplicative(&mut self) -> Result<Option<Expr>, ParseError> {
        self.parse_chain(
            NaryOp::Multiply,
            &[TokenKind::Multiply, TokenKind::Divide],
            Self::parse_unary,
        )
    }

    /// Parse `operand (operator operand)*` into a flat n-ary node
    fn parse_chain(
        &mut self,
        op: NaryOp,
        operators: &[TokenKind],
        operand: OperandParser<S>,
    ) -> Result<Option<Expr>, ParseError> {
        let Some(first) = operand(self)? else {
            return Ok(None);
        };

        let location = first.location();
        let mut operands = vec![first];

        while let Some(operator) = self.match_token(operators)? {
            let Some(next) = operand(self)? else {
                return Err(self.missing_operand(operator.kind()));
            };

            let next = match operator.kind() {
                TokenKind::Subtract => Expr::UnaryOp {
                    op: UnOp::Negate,
                    operand: Box::new(next),
                    location: operator.position(),
                },
                TokenKind::Divide => Expr::UnaryOp {
                    op: UnOp::Reciprocal,
                    operand: Box::new(next),
                    location: operator.position(),
                },
                _ => next,
            };
            operands.push(next);
        }

        if operands.len() == 1 {
            return Ok(operands.pop());
        }

        Ok(Some(Expr::NaryOp {
            op,
            operands,
            location,
        }))
    }

    /// Parse unary: [- | not] primary
    fn parse_unary(&mut self) -> Result<Option<Expr>, ParseError> {
        let Some(operator) = self.match_token(&[TokenKind::Subtract, TokenKind::Not])? else {
            return self.parse_primary();
        };

        let Some(operand) = self.parse_primary()? else {
            return Err(self.missing_operand(operator.kind()));
        };

        let op = match operator.kind() {
            TokenKind::Subtract => UnOp::Negate,
            _ => UnOp::Not,
        };

        Ok(Some(Expr::UnaryOp {
            op,
            operand: Box::new(operand),
            location: operator.position(),
        }))
    }

    /// Parse primary: literal, identifier, call, or ( expression )
    fn parse_primary(&mut self) -> Result<Option<Expr>, ParseError> {
        let loc = self.current_location();

        match self.current.kind() {
            TokenKind::LParen => {
                self.advance()?;
                let Some(inner) = self.parse_expression()? else {
                    return Err(ParseError::MissingExpression {
                        found: self.describe_current(),
                        location: self.current_location(),
                    });
                };
                self.expect_token(&[TokenKind::RParen])?;
                Ok(Some(inner))
            }

            TokenKind::NumericLiteral => match self.advance()?.into_value() {
                Some(TokenValue::Int(n)) => Ok(Some(Expr::IntLiteral(n, loc))),
                Some(TokenValue::Float(x)) => Ok(Some(Expr::FloatLiteral(x, loc))),
                other => Err(inconsistent(TokenKind::NumericLiteral, other, loc)),
            },

            TokenKind::StringLiteral => match self.advance()?.into_value() {
                Some(TokenValue::Str(s)) => Ok(Some(Expr::StringLiteral(s, loc))),
                other => Err(inconsistent(TokenKind::StringLiteral, other, loc)),
            },

            TokenKind::Identifier => {
                let (name, loc) = self.expect_identifier()?;
                if self.check(TokenKind::LParen) {
                    return Ok(Some(Expr::Call(self.parse_call_arguments(name, loc)?)));
                }
                Ok(Some(Expr::Identifier(name, loc)))
            }

            _ => Ok(None),
        }
    }

    /// Parse the argument list of a call whose name was already consumed
    pub(crate) fn parse_call_arguments(
        &mut self,
        name: String,
        location: Position,
    ) -> Result<CallExpr, ParseError> {
        self.expect_token(&[TokenKind::LParen])?;

        let mut args = Vec::new();
        if let Some(first) = self.parse_expression()? {
            args.push(first);
            while self.match_token(&[TokenKind::Comma])?.is_some() {
                args.push(self.parse_required_expression()?);
            }
        }

        self.expect_token(&[TokenKind::RParen])?;

        Ok(CallExpr {
            name,
            args,
            location,
        })
    }

    fn missing_operand(&self, operator: TokenKind) -> ParseError {
        ParseError::MissingOperand {
            operator: operator_symbol(operator).to_string(),
            found: self.describe_current(),
            location: self.current_location(),
        }
    }
}

fn operator_symbol(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Or => "or",
        TokenKind::And => "and",
        TokenKind::Not => "not",
        TokenKind::Equal => "==",
        TokenKind::NotEqual => "!=",
        TokenKind::Less => "<",
        TokenKind::LessEqual => "<=",
        TokenKind::Greater => ">",
        TokenKind::GreaterEqual => ">=",
        TokenKind::Add => "+",
        TokenKind::Subtract => "-",
        TokenKind::Multiply => "*",
        TokenKind::Divide => "/",
        _ => "?",
    }
}

fn inconsistent(kind: TokenKind, value: Option<TokenValue>, location: Position) -> ParseError {
    ParseError::Lex(LexError::InconsistentToken {
        kind,
        value: value.map(|v| v.to_string()).unwrap_or_default(),
        location,
    })
}
