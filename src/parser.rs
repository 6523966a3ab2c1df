// pipeline
//
// pattern   -- normalize           -->  only '*', '|' and 'ε' quantifiers
//           -- expand_concatenation -->  explicit '.' between terms
//           -- to_postfix           -->  operators after their operands
//           -- build_ast            -->  Ast
//
// operators (higher binds tighter)
//
// '*' '+' '?'   4   unary, postfix
// '.'           3   concatenation
// '|'           2   alternation
// '(' ')'           grouping
//
// '\' escapes the next character, 'ε' is the empty string.

pub mod ast;
mod builder;
mod concat;
mod error;
mod normalize;
mod postfix;
pub mod token;

pub use ast::Ast;
pub use builder::build_ast;
pub use concat::expand_concatenation;
pub use error::ParseError;
pub use normalize::normalize;
pub use postfix::{to_postfix, to_postfix_with};

use log::debug;
use token::OperatorTable;

// intermediate forms of one pattern, as produced by each stage
#[derive(Debug, PartialEq, Clone)]
pub struct Trace {
    pub pattern: String,
    pub normalized: String,
    pub expanded: String,
    pub postfix: String,
    pub ast: Ast,
}

pub struct Parser {
    table: OperatorTable,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(OperatorTable::STANDARD)
    }
}

impl Parser {
    pub fn new(table: OperatorTable) -> Parser {
        Parser { table }
    }

    pub fn parse(pattern: &str) -> Result<Ast, ParseError> {
        Parser::default().trace(pattern).map(|trace| trace.ast)
    }

    pub fn trace(&self, pattern: &str) -> Result<Trace, ParseError> {
        if pattern.is_empty() {
            return Err(ParseError::EmptyPattern);
        }

        // tokens carry offsets into `pattern` through every stage
        let normalized = normalize::normalize_tokens(pattern)?;
        debug!("normalized: {} -> {}", pattern, token::join(&normalized));

        let expanded = concat::expand(&normalized);
        debug!("concatenation: {}", token::join(&expanded));

        let postfix = postfix::shunt(&self.table, &expanded)?;
        debug!("postfix: {}", token::join(&postfix));

        let ast = builder::Builder::build(&postfix)?;

        Ok(Trace {
            pattern: pattern.to_owned(),
            normalized: token::join(&normalized),
            expanded: token::join(&expanded),
            postfix: token::join(&postfix),
            ast,
        })
    }
}

pub fn parse(pattern: &str) -> Result<Ast, ParseError> {
    Parser::parse(pattern)
}
