use super::error::ParseError;
use super::token::{self, OperatorTable, Spanned, Token};

pub fn to_postfix(pattern: &str) -> Result<String, ParseError> {
    to_postfix_with(&OperatorTable::STANDARD, pattern)
}

pub fn to_postfix_with(table: &OperatorTable, pattern: &str) -> Result<String, ParseError> {
    let tokens = token::tokenize(pattern)?;
    let output = ShuntingYard::run(table, &tokens)?;
    Ok(token::join(&output))
}

// Tokens keep their offsets, so errors further down still point into the
// pattern the tokens were read from.
pub(crate) fn shunt(table: &OperatorTable, tokens: &[Spanned]) -> Result<Vec<Spanned>, ParseError> {
    ShuntingYard::run(table, tokens)
}

struct ShuntingYard<'a> {
    table: &'a OperatorTable,
    output: Vec<Spanned>,
    stack: Vec<Spanned>,
}

impl<'a> ShuntingYard<'a> {
    fn run(table: &'a OperatorTable, tokens: &[Spanned]) -> Result<Vec<Spanned>, ParseError> {
        let mut yard = ShuntingYard {
            table,
            output: Vec::with_capacity(tokens.len()),
            stack: Vec::new(),
        };

        for &spanned in tokens {
            match spanned.token {
                Token::Open => yard.stack.push(spanned),
                Token::Close => yard.close_group(spanned.pos)?,
                Token::Operator(op) => {
                    while let Some(top) = yard.stack.last() {
                        let pop = match top.token {
                            Token::Operator(top_op) => yard.table.yields_to(op, top_op),
                            _ => false, // '(' is a sentinel
                        };
                        if !pop {
                            break;
                        }
                        yard.pop_to_output();
                    }
                    yard.stack.push(spanned);
                }
                _ => yard.output.push(spanned),
            }
        }

        while let Some(top) = yard.stack.pop() {
            if top.token == Token::Open {
                return Err(ParseError::UnbalancedParentheses { pos: top.pos });
            }
            yard.output.push(top);
        }

        Ok(yard.output)
    }

    fn close_group(&mut self, pos: usize) -> Result<(), ParseError> {
        loop {
            match self.stack.pop() {
                Some(Spanned {
                    token: Token::Open, ..
                }) => return Ok(()),
                Some(top) => self.output.push(top),
                None => return Err(ParseError::UnbalancedParentheses { pos }),
            }
        }
    }

    fn pop_to_output(&mut self) {
        if let Some(top) = self.stack.pop() {
            self.output.push(top);
        }
    }
}
