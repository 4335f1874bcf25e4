//! Abstract syntax tree produced by the parser
//!
//! The tree is owned top-down: every compound node exclusively owns its
//! children. Nodes serialize as tagged objects such as
//! `{"type": "PrintStatement", ...}`, which is what `dlang --emit ast` prints.

use std::fmt;

use serde::Serialize;

/// A parsed program: the ordered top-level statements.
pub type Program = Vec<Stmt>;

/// A `{ ... }` statement sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    /// Statements in source order
    pub body: Vec<Stmt>,
}

impl Block {
    /// Create a block from statements.
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

/// Statement nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    /// `let <name> = <value>`
    #[serde(rename = "VariableDeclaration")]
    Let {
        /// Bound name
        name: String,
        /// Initializer
        value: Expr,
    },

    /// `<name> = <value>`
    #[serde(rename = "AssignmentExpression")]
    Assign {
        /// Target name
        name: String,
        /// New value
        value: Expr,
    },

    /// `print <value>`
    #[serde(rename = "PrintStatement")]
    Print {
        /// Printed expression
        value: Expr,
    },

    /// `if <condition> { ... } [else { ... }]`
    #[serde(rename = "IfStatement")]
    If {
        /// Branch condition
        condition: Expr,
        /// Taken when the condition is truthy
        #[serde(rename = "thenBranch")]
        then_branch: Block,
        /// Taken otherwise
        #[serde(rename = "elseBranch")]
        else_branch: Option<Block>,
    },

    /// `while <condition> { ... }`
    #[serde(rename = "WhileStatement")]
    While {
        /// Loop condition
        condition: Expr,
        /// Loop body
        body: Block,
    },

    /// A nested block
    #[serde(rename = "BlockStatement")]
    Block(Block),

    /// `break`
    #[serde(rename = "BreakStatement")]
    Break,

    /// `continue`
    #[serde(rename = "ContinueStatement")]
    Continue,

    /// `function <name>(<params>) { ... }`
    #[serde(rename = "FunctionDeclaration")]
    Function {
        /// Function name
        name: String,
        /// Parameter names in order
        params: Vec<String>,
        /// Function body
        body: Block,
    },

    /// `dede [<value>]`
    #[serde(rename = "ReturnStatement")]
    Return {
        /// Returned expression; `None` returns unit
        value: Option<Expr>,
    },

    /// A bare expression evaluated for its effect, e.g. a call
    #[serde(rename = "ExpressionStatement")]
    Expression {
        /// The expression
        expression: Expr,
    },
}

/// Expression nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    /// Numeric literal
    #[serde(rename = "NumberLiteral")]
    Number {
        /// Literal value
        value: f64,
    },

    /// String literal, quotes stripped
    #[serde(rename = "StringLiteral")]
    String {
        /// Literal text
        value: String,
    },

    /// Variable reference
    #[serde(rename = "Identifier")]
    Identifier {
        /// Referenced name
        name: String,
    },

    /// `<left> <operator> <right>`
    #[serde(rename = "BinaryExpression")]
    Binary {
        /// Operator
        operator: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },

    /// `<operator><operand>`
    #[serde(rename = "UnaryExpression")]
    Unary {
        /// Operator
        operator: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },

    /// `<callee>(<arguments>)`
    #[serde(rename = "CallExpression")]
    Call {
        /// Name the callee is looked up by
        callee: String,
        /// Argument expressions in order
        arguments: Vec<Expr>,
    },
}

impl Expr {
    /// Numeric literal node.
    pub fn number(value: f64) -> Self {
        Expr::Number { value }
    }

    /// String literal node.
    pub fn string(value: impl Into<String>) -> Self {
        Expr::String {
            value: value.into(),
        }
    }

    /// Identifier node.
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    /// Binary expression node.
    pub fn binary(operator: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Unary expression node.
    pub fn unary(operator: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    /// Call expression node.
    pub fn call(callee: impl Into<String>, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            callee: callee.into(),
            arguments,
        }
    }
}

/// Binary operators.
///
/// `=` inside an expression is equality, never assignment, and maps to
/// [`BinaryOp::Eq`] just like `==`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    /// `+`
    #[serde(rename = "+")]
    Add,
    /// `-`
    #[serde(rename = "-")]
    Sub,
    /// `*`
    #[serde(rename = "*")]
    Mul,
    /// `/`
    #[serde(rename = "/")]
    Div,
    /// `==` or `=`
    #[serde(rename = "==")]
    Eq,
    /// `!=`
    #[serde(rename = "!=")]
    Ne,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
}

impl BinaryOp {
    /// Map operator token text to an operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "==" | "=" => BinaryOp::Eq,
            "!=" => BinaryOp::Ne,
            "<" => BinaryOp::Lt,
            ">" => BinaryOp::Gt,
            "<=" => BinaryOp::Le,
            ">=" => BinaryOp::Ge,
            _ => return None,
        };
        Some(op)
    }

    /// Canonical symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
        }
    }

    /// Binding strength; higher binds tighter. All levels are left-associative.
    ///
    /// | level | operators           |
    /// |-------|---------------------|
    /// | 4     | `*` `/`             |
    /// | 3     | `+` `-`             |
    /// | 2     | `<` `>` `<=` `>=`   |
    /// | 1     | `==` `=` `!=`       |
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Mul | BinaryOp::Div => 4,
            BinaryOp::Add | BinaryOp::Sub => 3,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => 2,
            BinaryOp::Eq | BinaryOp::Ne => 1,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    /// `-x`
    #[serde(rename = "-")]
    Neg,
    /// `!x`
    #[serde(rename = "!")]
    Not,
}

impl UnaryOp {
    /// Map operator token text to a prefix operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(UnaryOp::Neg),
            "!" => Some(UnaryOp::Not),
            _ => None,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => f.write_str("-"),
            UnaryOp::Not => f.write_str("!"),
        }
    }
}
