//! Declaration parsing implementation
//!
//! This module handles parsing of top-level function definitions and the
//! types that appear in declarations:
//!
//! - Function definitions: `name(params) returns type { ... }`
//! - Parameter lists: `name: type, name: type`
//! - Variable types (`int`, `float`, `string`) and return types (plus `nothing`)
//!
//! # Grammar
//!
//! ```text
//! function_def ::= identifier "(" params? ")" "returns" return_type block
//! params       ::= param ("," param)*
//! param        ::= identifier ":" var_type
//! var_type     ::= "int" | "float" | "string"
//! return_type  ::= var_type | "nothing"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::source::SourceStream;

const VAR_TYPES: &[TokenKind] = &[TokenKind::Int, TokenKind::Float, TokenKind::String];

const RETURN_TYPES: &[TokenKind] = &[
    TokenKind::Int,
    TokenKind::Float,
    TokenKind::String,
    TokenKind::Nothing,
];

impl<S: SourceStream> Parser<S> {
    /// Parse function definition: name(params) returns type { body }
    ///
    /// Returns `Ok(None)` when the current token cannot start a definition.
    pub(crate) fn parse_function_definition(&mut self) -> Result<Option<FunctionDef>, ParseError> {
        let Some((name, location)) = self.match_identifier()? else {
            return Ok(None);
        };

        self.expect_token(&[TokenKind::LParen])?;
        let params = self.parse_parameter_list(&name)?;
        self.expect_token(&[TokenKind::RParen])?;

        self.expect_token(&[TokenKind::Returns])?;
        let return_type = self.parse_return_type()?;

        self.loop_depth = 0;
        let Some(body) = self.parse_block()? else {
            return Err(ParseError::MissingBody {
                construct: format!("function {}", name),
                location: self.current_location(),
            });
        };

        Ok(Some(FunctionDef {
            name,
            params,
            return_type,
            body,
            location,
        }))
    }

    /// Parse parameter list: name: type, name: type, ...
    pub(crate) fn parse_parameter_list(&mut self, function: &str) -> Result<Vec<Param>, ParseError> {
        let mut params: Vec<Param> = Vec::new();

        let Some(first) = self.parse_parameter()? else {
            return Ok(params);
        };
        params.push(first);

        while self.match_token(&[TokenKind::Comma])?.is_some() {
            let location = self.current_location();
            let Some(param) = self.parse_parameter()? else {
                return Err(ParseError::UnexpectedToken {
                    expected: vec![TokenKind::Identifier],
                    found: self.describe_current(),
                    location,
                });
            };

            if params.iter().any(|p| p.name == param.name) {
                return Err(ParseError::DuplicateParameter {
                    function: function.to_string(),
                    parameter: param.name,
                    location: param.location,
                });
            }
            params.push(param);
        }

        Ok(params)
    }

    /// Parse a single parameter: name: type
    fn parse_parameter(&mut self) -> Result<Option<Param>, ParseError> {
        let Some((name, location)) = self.match_identifier()? else {
            return Ok(None);
        };

        self.expect_token(&[TokenKind::Colon])?;
        let param_type = self.parse_var_type()?;

        Ok(Some(Param {
            name,
            param_type,
            location,
        }))
    }

    /// Parse a declarable variable type
    pub(crate) fn parse_var_type(&mut self) -> Result<Type, ParseError> {
        let token = self.expect_token(VAR_TYPES)?;
        Ok(type_of(token.kind()))
    }

    /// Parse a function return type (variable types plus `nothing`)
    pub(crate) fn parse_return_type(&mut self) -> Result<Type, ParseError> {
        let token = self.expect_token(RETURN_TYPES)?;
        Ok(type_of(token.kind()))
    }
}

fn type_of(kind: TokenKind) -> Type {
    match kind {
        TokenKind::Float => Type::Float,
        TokenKind::String => Type::String,
        TokenKind::Nothing => Type::Nothing,
        _ => Type::Int,
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, Parser};

    fn parse(source: &str) -> Result<Program, ParseError> {
        Parser::from_source(source)?.parse_program()
    }

    #[test]
    fn test_parameters_and_return_type() {
        let program = parse("add(a: int, b: float) returns float { return a + b; }").unwrap();
        let add = program.function("add").unwrap();

        assert_eq!(add.return_type, Type::Float);
        assert_eq!(add.params.len(), 2);
        assert_eq!(add.params[0].name, "a");
        assert_eq!(add.params[0].param_type, Type::Int);
        assert_eq!(add.params[1].name, "b");
        assert_eq!(add.params[1].param_type, Type::Float);
    }

    #[test]
    fn test_nothing_return_type() {
        let program = parse("greet() returns nothing { print(\"hi\"); }").unwrap();
        assert_eq!(program.function("greet").unwrap().return_type, Type::Nothing);
    }

    #[test]
    fn test_nothing_is_not_a_parameter_type() {
        let err = parse("f(x: nothing) returns int { return 0; }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_duplicate_parameter() {
        let err = parse("f(x: int, x: float) returns int { return 0; }").unwrap_err();
        match err {
            ParseError::DuplicateParameter {
                function,
                parameter,
                ..
            } => {
                assert_eq!(function, "f");
                assert_eq!(parameter, "x");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_function_body() {
        let err = parse("f() returns int return 0;").unwrap_err();
        assert!(
            matches!(err, ParseError::MissingBody { ref construct, .. } if construct == "function f")
        );
    }

    #[test]
    fn test_missing_returns_keyword() {
        let err = parse("f() int { return 0; }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_trailing_comma_in_parameters() {
        let err = parse("f(a: int,) returns int { return 0; }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let program = parse(
            "b() returns int { return 1; } a() returns int { return 2; } main() returns int { return 0; }",
        )
        .unwrap();
        let names: Vec<&str> = program.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "main"]);
    }
}
