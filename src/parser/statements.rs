//! Statement parsing implementation
//!
//! This module handles parsing of all Misnomer statement types:
//!
//! - Variable declarations: `var x: int = 42;`
//! - Assignments and call statements: `x = 1;`, `print(x);`
//! - Control flow: `if`/`else`, `while`
//! - Jump statements: `return`, `break`, `continue`
//! - Blocks: `{ ... }`
//!
//! # Grammar
//!
//! ```text
//! block       ::= "{" statement* "}"
//! statement   ::= if_stmt | while_stmt | var_decl ";" | assignment ";"
//!               | return_stmt ";" | "break" ";" | "continue" ";" | call ";"
//! instruction ::= block | statement
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::source::SourceStream;

impl<S: SourceStream> Parser<S> {
    /// Parse a block: { statements }
    pub(crate) fn parse_block(&mut self) -> Result<Option<Block>, ParseError> {
        let Some(open) = self.match_token(&[TokenKind::LBrace])? else {
            return Ok(None);
        };

        let mut statements = Vec::new();
        while let Some(statement) = self.parse_statement()? {
            statements.push(statement);
        }

        self.expect_token(&[TokenKind::RBrace])?;

        Ok(Some(Block {
            statements,
            location: open.position(),
        }))
    }

    /// Parse the body of an `if`, `else` or `while`: a block or a single statement
    pub(crate) fn parse_instruction(&mut self) -> Result<Option<Stmt>, ParseError> {
        if let Some(block) = self.parse_block()? {
            return Ok(Some(Stmt::Block(block)));
        }
        self.parse_statement()
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        let loc = self.current_location();

        let statement = match self.current.kind() {
            TokenKind::If => return self.parse_if_statement().map(Some),
            TokenKind::While => return self.parse_while_statement().map(Some),
            TokenKind::Var => self.parse_variable_declaration()?,
            TokenKind::Return => self.parse_return_statement()?,
            TokenKind::Break | TokenKind::Continue => self.parse_loop_control()?,
            TokenKind::Identifier => self.parse_assignment_or_call()?,
            _ => return Ok(None),
        };

        self.expect_token(&[TokenKind::Semicolon])?;
        tracing::trace!(location = %loc, "parsed statement");
        Ok(Some(statement))
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.expect_token(&[TokenKind::If])?.position();

        let condition = self.parse_condition("if")?;

        let Some(then_branch) = self.parse_instruction()? else {
            return Err(ParseError::MissingBody {
                construct: "if".to_string(),
                location: self.current_location(),
            });
        };

        let else_branch = match self.match_token(&[TokenKind::Else])? {
            Some(_) => match self.parse_instruction()? {
                Some(branch) => Some(Box::new(branch)),
                None => {
                    return Err(ParseError::MissingBody {
                        construct: "else".to_string(),
                        location: self.current_location(),
                    })
                }
            },
            None => None,
        };

        Ok(Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
            location: loc,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.expect_token(&[TokenKind::While])?.position();

        let condition = self.parse_condition("while")?;

        self.loop_depth += 1;
        let body = self.parse_instruction()?;
        self.loop_depth -= 1;

        let Some(body) = body else {
            return Err(ParseError::MissingBody {
                construct: "while".to_string(),
                location: self.current_location(),
            });
        };

        Ok(Stmt::While {
            condition,
            body: Box::new(body),
            location: loc,
        })
    }

    /// Parse a parenthesized condition: ( expression )
    fn parse_condition(&mut self, construct: &str) -> Result<Expr, ParseError> {
        self.expect_token(&[TokenKind::LParen])?;

        let Some(condition) = self.parse_expression()? else {
            return Err(ParseError::MissingCondition {
                construct: construct.to_string(),
                location: self.current_location(),
            });
        };

        self.expect_token(&[TokenKind::RParen])?;
        Ok(condition)
    }

    /// Parse variable declaration: var name: type [= expression]
    fn parse_variable_declaration(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.expect_token(&[TokenKind::Var])?.position();

        let (name, _) = self.expect_identifier()?;
        self.expect_token(&[TokenKind::Colon])?;
        let var_type = self.parse_var_type()?;

        let init = match self.match_token(&[TokenKind::Assignment])? {
            Some(_) => Some(self.parse_required_expression()?),
            None => None,
        };

        Ok(Stmt::VarDecl {
            name,
            var_type,
            init,
            location: loc,
        })
    }

    /// Parse return statement: return [expression]
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.expect_token(&[TokenKind::Return])?.position();
        let expr = self.parse_expression()?;
        Ok(Stmt::Return {
            expr,
            location: loc,
        })
    }

    /// Parse `break` or `continue`
    fn parse_loop_control(&mut self) -> Result<Stmt, ParseError> {
        let token = self.expect_token(&[TokenKind::Break, TokenKind::Continue])?;
        let loc = token.position();

        let (statement, keyword) = match token.kind() {
            TokenKind::Break => (Stmt::Break { location: loc }, "break"),
            _ => (Stmt::Continue { location: loc }, "continue"),
        };

        if self.loop_depth == 0 {
            return Err(ParseError::LoopControlOutsideLoop {
                statement: keyword.to_string(),
                location: loc,
            });
        }

        Ok(statement)
    }

    /// Parse a statement that starts with an identifier: `name = expr` or `name(args)`
    fn parse_assignment_or_call(&mut self) -> Result<Stmt, ParseError> {
        let (name, loc) = self.expect_identifier()?;

        if self.match_token(&[TokenKind::Assignment])?.is_some() {
            let value = self.parse_required_expression()?;
            return Ok(Stmt::Assignment {
                name,
                value,
                location: loc,
            });
        }

        if self.check(TokenKind::LParen) {
            let call = self.parse_call_arguments(name, loc)?;
            return Ok(Stmt::Call(call));
        }

        Err(ParseError::UnexpectedToken {
            expected: vec![TokenKind::Assignment, TokenKind::LParen],
            found: self.describe_current(),
            location: self.current_location(),
        })
    }

    /// Parse an expression that must be present
    pub(crate) fn parse_required_expression(&mut self) -> Result<Expr, ParseError> {
        match self.parse_expression()? {
            Some(expr) => Ok(expr),
            None => Err(ParseError::MissingExpression {
                found: self.describe_current(),
                location: self.current_location(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, Parser};

    fn parse_main_body(body: &str) -> Result<Vec<Stmt>, ParseError> {
        let source = format!("main() returns int {{ {} }}", body);
        let program = Parser::from_source(&source)?.parse_program()?;
        Ok(program.function("main").unwrap().body.statements.clone())
    }

    #[test]
    fn test_variable_declaration() {
        let stmts = parse_main_body("var x: float = 1; var s: string;").unwrap();
        assert_eq!(stmts.len(), 2);

        match &stmts[0] {
            Stmt::VarDecl {
                name,
                var_type,
                init,
                ..
            } => {
                assert_eq!(name, "x");
                assert_eq!(*var_type, Type::Float);
                assert!(matches!(init, Some(Expr::IntLiteral(1, _))));
            }
            other => panic!("expected declaration, got {:?}", other),
        }

        assert!(matches!(
            &stmts[1],
            Stmt::VarDecl {
                var_type: Type::String,
                init: None,
                ..
            }
        ));
    }

    #[test]
    fn test_if_else_with_single_statements() {
        let stmts = parse_main_body("if (1 < 2) return 1; else return 2;").unwrap();
        match &stmts[0] {
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                assert!(matches!(**then_branch, Stmt::Return { .. }));
                assert!(matches!(
                    else_branch.as_deref(),
                    Some(Stmt::Return { .. })
                ));
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_while_with_block() {
        let stmts = parse_main_body("while (1 < 2) { break; }").unwrap();
        match &stmts[0] {
            Stmt::While { body, .. } => match &**body {
                Stmt::Block(block) => {
                    assert!(matches!(block.statements[0], Stmt::Break { .. }))
                }
                other => panic!("expected block, got {:?}", other),
            },
            other => panic!("expected while, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_and_call_statements() {
        let stmts = parse_main_body("x = 3; print(x, 1);").unwrap();
        assert!(matches!(&stmts[0], Stmt::Assignment { name, .. } if name == "x"));
        assert!(matches!(&stmts[1], Stmt::Call(call) if call.name == "print" && call.args.len() == 2));
    }

    #[test]
    fn test_bare_return() {
        let stmts = parse_main_body("return;").unwrap();
        assert!(matches!(stmts[0], Stmt::Return { expr: None, .. }));
    }

    #[test]
    fn test_missing_condition() {
        let err = parse_main_body("if () return 1;").unwrap_err();
        assert!(matches!(err, ParseError::MissingCondition { ref construct, .. } if construct == "if"));

        let err = parse_main_body("while () return 1;").unwrap_err();
        assert!(
            matches!(err, ParseError::MissingCondition { ref construct, .. } if construct == "while")
        );
    }

    #[test]
    fn test_missing_bodies() {
        let err = parse_main_body("if (1 < 2)").unwrap_err();
        assert!(matches!(err, ParseError::MissingBody { ref construct, .. } if construct == "if"));

        let err = parse_main_body("if (1 < 2) return 1; else").unwrap_err();
        assert!(matches!(err, ParseError::MissingBody { ref construct, .. } if construct == "else"));

        let err = parse_main_body("while (1 < 2)").unwrap_err();
        assert!(matches!(err, ParseError::MissingBody { ref construct, .. } if construct == "while"));
    }

    #[test]
    fn test_missing_expression_after_assignment() {
        let err = parse_main_body("var x: int = ;").unwrap_err();
        assert!(matches!(err, ParseError::MissingExpression { .. }));

        let err = parse_main_body("x = ;").unwrap_err();
        assert!(matches!(err, ParseError::MissingExpression { .. }));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_main_body("var x: int = 1").unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, .. } => {
                assert_eq!(expected, vec![crate::parser::lexer::TokenKind::Semicolon]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_identifier_without_assignment_or_call() {
        let err = parse_main_body("x;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref expected, .. } if expected.len() == 2));
    }

    #[test]
    fn test_loop_control_outside_loop() {
        let err = parse_main_body("break;").unwrap_err();
        assert!(matches!(
            err,
            ParseError::LoopControlOutsideLoop { ref statement, .. } if statement == "break"
        ));

        let err = parse_main_body("while (1 < 2) { } continue;").unwrap_err();
        assert!(matches!(err, ParseError::LoopControlOutsideLoop { .. }));
    }

    #[test]
    fn test_loop_control_in_nested_if() {
        let stmts = parse_main_body("while (1 < 2) { if (1 < 2) continue; else break; }").unwrap();
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_main_body("var x: int = 1; {").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
