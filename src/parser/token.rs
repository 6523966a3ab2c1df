use std::fmt;

use super::error::ParseError;

pub const EPSILON: char = 'ε';
pub const ESCAPE: char = '\\';

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Operator {
    Star,      // '*'
    Plus,      // '+'
    Question,  // '?'
    Concat,    // '.'
    Alternate, // '|'
}

impl Operator {
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '*' => Some(Operator::Star),
            '+' => Some(Operator::Plus),
            '?' => Some(Operator::Question),
            '.' => Some(Operator::Concat),
            '|' => Some(Operator::Alternate),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Star => '*',
            Operator::Plus => '+',
            Operator::Question => '?',
            Operator::Concat => '.',
            Operator::Alternate => '|',
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Associativity {
    Left,
    Right,
}

// Higher precedence binds tighter. '(' is not listed, it is a sentinel that
// no comparison pops.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct OperatorTable {
    pub unary: (u8, Associativity),
    pub concat: (u8, Associativity),
    pub alternate: (u8, Associativity),
}

impl OperatorTable {
    pub const STANDARD: OperatorTable = OperatorTable {
        unary: (4, Associativity::Left),
        concat: (3, Associativity::Left),
        alternate: (2, Associativity::Left),
    };

    fn entry(&self, op: Operator) -> (u8, Associativity) {
        match op {
            Operator::Star | Operator::Plus | Operator::Question => self.unary,
            Operator::Concat => self.concat,
            Operator::Alternate => self.alternate,
        }
    }

    pub fn precedence(&self, op: Operator) -> u8 {
        self.entry(op).0
    }

    pub fn associativity(&self, op: Operator) -> Associativity {
        self.entry(op).1
    }

    // `top` must leave the stack before `incoming` is pushed
    pub fn yields_to(&self, incoming: Operator, top: Operator) -> bool {
        let (p_in, assoc) = self.entry(incoming);
        let p_top = self.precedence(top);
        p_in < p_top || (p_in == p_top && assoc == Associativity::Left)
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        OperatorTable::STANDARD
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    Literal(char),
    Escaped(char), // '\' + char
    Epsilon,       // 'ε'
    Operator(Operator),
    Open,  // '('
    Close, // ')'
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(c) => write!(f, "{}", c),
            Token::Escaped(c) => write!(f, "{}{}", ESCAPE, c),
            Token::Epsilon => write!(f, "{}", EPSILON),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

pub fn tokenize(pattern: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();
    let mut stream = pattern.chars().enumerate();

    while let Some((pos, c)) = stream.next() {
        let token = match c {
            ESCAPE => match stream.next() {
                Some((_, e)) => Token::Escaped(e),
                None => return Err(ParseError::DanglingEscape { pos }),
            },
            EPSILON => Token::Epsilon,
            '(' => Token::Open,
            ')' => Token::Close,
            _ => match Operator::from_char(c) {
                Some(op) => Token::Operator(op),
                None => Token::Literal(c),
            },
        };
        tokens.push(Spanned { token, pos });
    }

    Ok(tokens)
}

pub fn join(tokens: &[Spanned]) -> String {
    tokens.iter().map(|s| s.token.to_string()).collect()
}
