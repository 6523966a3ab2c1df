use std::fmt;

// Positions are character offsets into the pattern handed to the failing
// function. Through `parse` that is the pattern as the user wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    EmptyPattern,
    DanglingEscape { pos: usize },
    UnbalancedParentheses { pos: usize },
    MalformedPostfix { op: char, pos: usize },
    IncompleteExpression,
    DanglingOperands { count: usize },
    UnexpectedToken { token: String, pos: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyPattern => write!(f, "empty pattern"),
            ParseError::DanglingEscape { pos } => {
                write!(f, "escape at {} has no character to escape", pos)
            }
            ParseError::UnbalancedParentheses { pos } => {
                write!(f, "unbalanced parenthesis at {}", pos)
            }
            ParseError::MalformedPostfix { op, pos } => {
                write!(f, "operator '{}' at {} is missing an operand", op, pos)
            }
            ParseError::IncompleteExpression => write!(f, "expression has no operand"),
            ParseError::DanglingOperands { count } => {
                write!(f, "{} operands left without an operator", count)
            }
            ParseError::UnexpectedToken { token, pos } => {
                write!(f, "unexpected '{}' at {}", token, pos)
            }
        }
    }
}

impl ParseError {
    pub fn pos(&self) -> Option<usize> {
        match self {
            ParseError::DanglingEscape { pos }
            | ParseError::UnbalancedParentheses { pos }
            | ParseError::MalformedPostfix { pos, .. }
            | ParseError::UnexpectedToken { pos, .. } => Some(*pos),
            ParseError::EmptyPattern
            | ParseError::IncompleteExpression
            | ParseError::DanglingOperands { .. } => None,
        }
    }
}

impl std::error::Error for ParseError {}
