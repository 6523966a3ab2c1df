use super::ast::{Arity, Ast, Operand};
use super::error::ParseError;
use super::token::{self, Spanned, Token};

pub fn build_ast(postfix: &str) -> Result<Ast, ParseError> {
    let tokens = token::tokenize(postfix)?;
    Builder::build(&tokens)
}

pub(crate) struct Builder {
    stack: Vec<Ast>,
}

impl Builder {
    pub fn build(tokens: &[Spanned]) -> Result<Ast, ParseError> {
        let mut builder = Builder { stack: Vec::new() };

        for spanned in tokens {
            builder.push(spanned)?;
        }

        builder.finish()
    }

    fn push(&mut self, spanned: &Spanned) -> Result<(), ParseError> {
        let node = match spanned.token {
            Token::Literal(c) => Ast::leaf(Operand::Char(c)),
            Token::Escaped(c) => Ast::leaf(Operand::Escaped(c)),
            Token::Epsilon => Ast::leaf(Operand::Epsilon),
            Token::Operator(op) => {
                let missing = ParseError::MalformedPostfix {
                    op: op.symbol(),
                    pos: spanned.pos,
                };
                match Arity::from(op) {
                    Arity::Unary(op) => {
                        let child = self.stack.pop().ok_or(missing)?;
                        Ast::unary(op, child)
                    }
                    Arity::Binary(op) => {
                        // right operand was pushed last
                        let right = self.stack.pop().ok_or_else(|| missing.clone())?;
                        let left = self.stack.pop().ok_or(missing)?;
                        Ast::binary(op, left, right)
                    }
                }
            }
            Token::Open | Token::Close => {
                return Err(ParseError::UnexpectedToken {
                    token: spanned.token.to_string(),
                    pos: spanned.pos,
                })
            }
        };

        self.stack.push(node);
        Ok(())
    }

    fn finish(mut self) -> Result<Ast, ParseError> {
        match self.stack.len() {
            0 => Err(ParseError::IncompleteExpression),
            1 => self.stack.pop().ok_or(ParseError::IncompleteExpression),
            count => Err(ParseError::DanglingOperands { count }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{BinaryOp, UnaryOp};

    fn leaf(c: char) -> Ast {
        Ast::leaf(Operand::Char(c))
    }

    #[test]
    fn concat_star() {
        assert_eq!(
            build_ast("ab*."),
            Ok(Ast::binary(
                BinaryOp::Concat,
                leaf('a'),
                Ast::unary(UnaryOp::Star, leaf('b')),
            ))
        );
    }

    #[test]
    fn operand_order() {
        assert_eq!(
            build_ast("ab|"),
            Ok(Ast::binary(BinaryOp::Alternate, leaf('a'), leaf('b')))
        );
        assert_eq!(
            build_ast("ab.c."),
            Ok(Ast::binary(
                BinaryOp::Concat,
                Ast::binary(BinaryOp::Concat, leaf('a'), leaf('b')),
                leaf('c'),
            ))
        );
    }

    #[test]
    fn escaped_and_epsilon_leaves() {
        assert_eq!(
            build_ast(r"\*ε|"),
            Ok(Ast::binary(
                BinaryOp::Alternate,
                Ast::leaf(Operand::Escaped('*')),
                Ast::leaf(Operand::Epsilon),
            ))
        );
    }

    #[test]
    fn lone_operator() {
        assert_eq!(
            build_ast("*"),
            Err(ParseError::MalformedPostfix { op: '*', pos: 0 })
        );
        assert_eq!(
            build_ast("a|"),
            Err(ParseError::MalformedPostfix { op: '|', pos: 1 })
        );
    }

    #[test]
    fn empty_stream() {
        assert_eq!(build_ast(""), Err(ParseError::IncompleteExpression));
    }

    #[test]
    fn dangling_operands() {
        assert_eq!(
            build_ast("ab"),
            Err(ParseError::DanglingOperands { count: 2 })
        );
        assert_eq!(
            build_ast("ab*c|"),
            Err(ParseError::DanglingOperands { count: 2 })
        );
    }

    #[test]
    fn parenthesis_in_postfix() {
        assert_eq!(
            build_ast("a(."),
            Err(ParseError::UnexpectedToken {
                token: "(".to_owned(),
                pos: 1
            })
        );
    }

    #[test]
    fn post_order_round_trip() {
        for postfix in ["ab*.", "abc.|", r"a\|.b*|", "aε|*b."] {
            assert_eq!(build_ast(postfix).unwrap().to_postfix(), postfix);
        }
    }
}
