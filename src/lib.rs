pub mod cli;
mod parser;
pub mod render;

pub use parser::ast::{BinaryOp, Operand, UnaryOp};
pub use parser::token::{Associativity, Operator, OperatorTable};
pub use parser::{
    build_ast, expand_concatenation, normalize, parse, to_postfix, to_postfix_with, Ast,
    ParseError, Parser, Trace,
};
