// AST (Abstract Syntax Tree) definitions for the Misnomer interpreter

use crate::parser::parse::ParseError;
use rustc_hash::FxHashMap;
use std::fmt;

/// Source position for error reporting
///
/// All three counters are 1-based. Tokens and AST nodes each keep their own
/// copy, taken when they were built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Position of the first character of a source
    pub fn start() -> Self {
        Self::new(1, 1, 1)
    }

    /// Move past `ch`.
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.offset += 1;
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Declarable types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Float,
    String,
    /// Only valid as a function return type
    Nothing,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::String => "string",
            Type::Nothing => "nothing",
        };
        f.write_str(name)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Negate,     // -x, and the right operand of a subtraction
    Not,        // not x, !x
    Reciprocal, // right operand of a division
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::Negate => "-",
            UnOp::Not => "not",
            UnOp::Reciprocal => "/",
        }
    }
}

/// Associative operators kept as flat operand lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaryOp {
    Add,
    Multiply,
    And,
    Or,
}

impl NaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            NaryOp::Add => "+",
            NaryOp::Multiply => "*",
            NaryOp::And => "and",
            NaryOp::Or => "or",
        }
    }
}

/// Relational and equality operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl CmpOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CmpOp::Equal => "==",
            CmpOp::NotEqual => "!=",
            CmpOp::Less => "<",
            CmpOp::LessEqual => "<=",
            CmpOp::Greater => ">",
            CmpOp::GreaterEqual => ">=",
        }
    }
}

/// A call, usable both as an expression and as a statement
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: String,
    pub args: Vec<Expr>,
    pub location: Position,
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLiteral(i64, Position),
    FloatLiteral(f64, Position),
    StringLiteral(String, Position),
    Identifier(String, Position),
    Call(CallExpr),
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
        location: Position,
    },
    NaryOp {
        op: NaryOp,
        operands: Vec<Expr>, // always two or more
        location: Position,
    },
    Comparison {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: Position,
    },
}

impl Expr {
    /// Get the source position of this expression
    pub fn location(&self) -> Position {
        match self {
            Expr::IntLiteral(_, loc)
            | Expr::FloatLiteral(_, loc)
            | Expr::StringLiteral(_, loc)
            | Expr::Identifier(_, loc) => *loc,
            Expr::Call(call) => call.location,
            Expr::UnaryOp { location, .. }
            | Expr::NaryOp { location, .. }
            | Expr::Comparison { location, .. } => *location,
        }
    }

    /// Short node description used in operand diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::IntLiteral(..) | Expr::FloatLiteral(..) => "numeric literal",
            Expr::StringLiteral(..) => "string literal",
            Expr::Identifier(..) => "identifier",
            Expr::Call(_) => "function call",
            Expr::UnaryOp { op: UnOp::Negate, .. } => "negation",
            Expr::UnaryOp { op: UnOp::Not, .. } => "logical not",
            Expr::UnaryOp {
                op: UnOp::Reciprocal,
                ..
            } => "division",
            Expr::NaryOp { op: NaryOp::Add, .. } => "additive expression",
            Expr::NaryOp {
                op: NaryOp::Multiply,
                ..
            } => "multiplicative expression",
            Expr::NaryOp { op: NaryOp::And, .. } => "and expression",
            Expr::NaryOp { op: NaryOp::Or, .. } => "or expression",
            Expr::Comparison { .. } => "comparison",
        }
    }
}

/// Brace-delimited statement sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub location: Position,
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        name: String,
        var_type: Type,
        init: Option<Expr>,
        location: Position,
    },
    Assignment {
        name: String,
        value: Expr,
        location: Position,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        location: Position,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
        location: Position,
    },
    Return {
        expr: Option<Expr>,
        location: Position,
    },
    Break {
        location: Position,
    },
    Continue {
        location: Position,
    },
    Call(CallExpr),
    Block(Block),
}

impl Stmt {
    /// Get the source position of this statement
    pub fn location(&self) -> Position {
        match self {
            Stmt::VarDecl { location, .. }
            | Stmt::Assignment { location, .. }
            | Stmt::If { location, .. }
            | Stmt::While { location, .. }
            | Stmt::Return { location, .. }
            | Stmt::Break { location }
            | Stmt::Continue { location } => *location,
            Stmt::Call(call) => call.location,
            Stmt::Block(block) => block.location,
        }
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: Type,
    pub location: Position,
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: Block,
    pub location: Position,
}

/// Top-level program structure
#[derive(Debug, Clone, Default)]
pub struct Program {
    functions: FxHashMap<String, FunctionDef>,
    order: Vec<String>, // declaration order, for deterministic registration
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Add a function definition. Names are unique within a program.
    pub fn add_function(&mut self, function: FunctionDef) -> Result<(), ParseError> {
        if self.functions.contains_key(&function.name) {
            return Err(ParseError::DuplicateFunction {
                name: function.name.clone(),
                location: function.location,
            });
        }
        self.order.push(function.name.clone());
        self.functions.insert(function.name.clone(), function);
        Ok(())
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    /// Function definitions in declaration order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.order.iter().filter_map(|name| self.functions.get(name))
    }

    /// Consume the program, yielding definitions in declaration order
    pub fn into_functions(mut self) -> Vec<FunctionDef> {
        self.order
            .iter()
            .filter_map(|name| self.functions.remove(name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
