use std::fmt;

use serde::{Serialize, Serializer};

use super::token::{Operator, EPSILON, ESCAPE};

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Ast {
    Leaf {
        value: Operand,
    },
    Unary {
        op: UnaryOp,
        child: Box<Ast>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Ast>,
        right: Box<Ast>,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operand {
    Char(char),    // a
    Escaped(char), // '\' a
    Epsilon,       // 'ε'
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum UnaryOp {
    #[serde(rename = "*")]
    Star,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "?")]
    Question,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum BinaryOp {
    #[serde(rename = ".")]
    Concat,
    #[serde(rename = "|")]
    Alternate,
}

impl UnaryOp {
    pub fn symbol(self) -> char {
        match self {
            UnaryOp::Star => '*',
            UnaryOp::Plus => '+',
            UnaryOp::Question => '?',
        }
    }
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Concat => '.',
            BinaryOp::Alternate => '|',
        }
    }
}

pub(crate) enum Arity {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl From<Operator> for Arity {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Star => Arity::Unary(UnaryOp::Star),
            Operator::Plus => Arity::Unary(UnaryOp::Plus),
            Operator::Question => Arity::Unary(UnaryOp::Question),
            Operator::Concat => Arity::Binary(BinaryOp::Concat),
            Operator::Alternate => Arity::Binary(BinaryOp::Alternate),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Char(c) => write!(f, "{}", c),
            Operand::Escaped(c) => write!(f, "{}{}", ESCAPE, c),
            Operand::Epsilon => write!(f, "{}", EPSILON),
        }
    }
}

impl Serialize for Operand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Ast {
    pub fn leaf(value: Operand) -> Ast {
        Ast::Leaf { value }
    }

    pub fn unary(op: UnaryOp, child: Ast) -> Ast {
        Ast::Unary {
            op,
            child: Box::new(child),
        }
    }

    pub fn binary(op: BinaryOp, left: Ast, right: Ast) -> Ast {
        Ast::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Ast::Leaf { value } => value.to_string(),
            Ast::Unary { op, .. } => op.symbol().to_string(),
            Ast::Binary { op, .. } => op.symbol().to_string(),
        }
    }

    pub fn children(&self) -> Vec<&Ast> {
        match self {
            Ast::Leaf { .. } => vec![],
            Ast::Unary { child, .. } => vec![child.as_ref()],
            Ast::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        }
    }

    // node count
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1 + self.children().iter().map(|c| c.len()).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    // post-order reproduces the postfix stream the tree was built from
    pub fn to_postfix(&self) -> String {
        let mut out = String::new();
        self.write_postfix(&mut out);
        out
    }

    fn write_postfix(&self, out: &mut String) {
        for child in self.children() {
            child.write_postfix(out);
        }
        out.push_str(&self.label());
    }

    // binary nodes carry their own parentheses
    pub fn to_infix(&self) -> String {
        match self {
            Ast::Leaf { value } => value.to_string(),
            Ast::Unary { op, child } => format!("{}{}", child.to_infix(), op.symbol()),
            Ast::Binary { op, left, right } => format!(
                "({}{}{})",
                left.to_infix(),
                op.symbol(),
                right.to_infix()
            ),
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_postfix())
    }
}
