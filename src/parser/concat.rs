use super::error::ParseError;
use super::token::{self, Operator, Spanned, Token};

pub fn expand_concatenation(pattern: &str) -> Result<String, ParseError> {
    let tokens = token::tokenize(pattern)?;
    Ok(token::join(&expand(&tokens)))
}

// an inserted '.' takes the offset of the term it joins on the right
pub(crate) fn expand(tokens: &[Spanned]) -> Vec<Spanned> {
    let mut output = Vec::with_capacity(tokens.len() * 2);

    for (i, &c) in tokens.iter().enumerate() {
        output.push(c);
        if let Some(&next) = tokens.get(i + 1) {
            if needs_concat(c.token, next.token) {
                output.push(Spanned {
                    token: Token::Operator(Operator::Concat),
                    pos: next.pos,
                });
            }
        }
    }

    output
}

fn needs_concat(c: Token, next: Token) -> bool {
    ends_term(c) && starts_term(next)
}

// '(' and the binary operators open a new term, nothing is concatenated to
// them.
fn ends_term(c: Token) -> bool {
    !matches!(
        c,
        Token::Open | Token::Operator(Operator::Alternate) | Token::Operator(Operator::Concat)
    )
}

// ')', '|', '.' and the postfix operators continue the current term.
fn starts_term(next: Token) -> bool {
    !matches!(
        next,
        Token::Close
            | Token::Operator(Operator::Alternate)
            | Token::Operator(Operator::Concat)
            | Token::Operator(Operator::Star)
            | Token::Operator(Operator::Plus)
            | Token::Operator(Operator::Question)
    )
}
