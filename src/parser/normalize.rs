use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::error::ParseError;
use super::token::{self, Spanned};

// An escaped pair is matched first so the character after '\' is never read
// as an atom of its own. '+' and '?' are rewritten in the same pass, the
// output of one rewrite never feeds the other.
static QUANTIFIED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(\\.)([+?])?|(\w)([+?])").unwrap());

// x+ -> xx*, x? -> (x|ε)
pub fn normalize(pattern: &str) -> String {
    QUANTIFIED
        .replace_all(pattern, |caps: &Captures| match quantified(caps) {
            Some((atom, quant)) => expansion(atom, quant),
            None => caps[0].to_owned(),
        })
        .into_owned()
}

// Same rewrite on tokens. Every token keeps its offset in `pattern`, tokens
// produced by an expansion take the offset of their atom.
pub(crate) fn normalize_tokens(pattern: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();
    let mut last = 0; // byte offset
    let mut pos = 0; // char offset of `last`

    for caps in QUANTIFIED.captures_iter(pattern) {
        let Some(whole) = caps.get(0) else { continue };

        let gap = &pattern[last..whole.start()];
        tokens.extend(shifted(gap, pos)?);
        pos += gap.chars().count();

        match quantified(&caps) {
            Some((atom, quant)) => {
                let expanded = token::tokenize(&expansion(atom, quant))?;
                tokens.extend(expanded.into_iter().map(|s| Spanned { pos, ..s }));
            }
            None => tokens.extend(shifted(whole.as_str(), pos)?),
        }
        pos += whole.as_str().chars().count();
        last = whole.end();
    }
    tokens.extend(shifted(&pattern[last..], pos)?);

    Ok(tokens)
}

fn quantified<'t>(caps: &Captures<'t>) -> Option<(&'t str, char)> {
    let atom = caps.get(1).or_else(|| caps.get(3))?;
    let quant = caps.get(2).or_else(|| caps.get(4))?;
    quant.as_str().chars().next().map(|q| (atom.as_str(), q))
}

fn expansion(atom: &str, quant: char) -> String {
    match quant {
        '+' => format!("{}{}*", atom, atom),
        _ => format!("({}|ε)", atom),
    }
}

fn shifted(text: &str, base: usize) -> Result<Vec<Spanned>, ParseError> {
    match token::tokenize(text) {
        Ok(tokens) => Ok(tokens
            .into_iter()
            .map(|s| Spanned {
                pos: s.pos + base,
                ..s
            })
            .collect()),
        Err(ParseError::DanglingEscape { pos }) => {
            Err(ParseError::DanglingEscape { pos: pos + base })
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus() {
        assert_eq!(normalize("a+"), "aa*");
        assert_eq!(normalize("ab+c"), "abb*c");
    }

    #[test]
    fn option() {
        assert_eq!(normalize("a?"), "(a|ε)");
        assert_eq!(normalize("a?b?"), "(a|ε)(b|ε)");
    }

    #[test]
    fn plus_before_option() {
        assert_eq!(normalize("a+b?"), "aa*(b|ε)");
        // the star produced by '+' is not an atom
        assert_eq!(normalize("a+?"), "aa*?");
    }

    #[test]
    fn identity_without_quantifiers() {
        for src in ["", "abc", "(a|b)*c", r"a\.b", "ε"] {
            assert_eq!(normalize(src), src);
        }
    }

    #[test]
    fn escaped_atom() {
        assert_eq!(normalize(r"\*+"), r"\*\**");
        assert_eq!(normalize(r"\d?"), r"(\d|ε)");
        assert_eq!(normalize(r"\++"), r"\+\+*");
    }

    #[test]
    fn escaped_backslash_is_not_an_atom_prefix() {
        assert_eq!(normalize(r"\\a+"), r"\\aa*");
    }

    #[test]
    fn escaped_newline_is_an_atom() {
        assert_eq!(normalize("\\\n+"), "\\\n\\\n*");
        assert_eq!(normalize("\\\n?"), "(\\\n|ε)");
    }

    #[test]
    fn tokens_match_string_form() {
        for src in ["a+b?", r"\*+c", "(a|b)?x+", "\\\n+"] {
            assert_eq!(token::join(&normalize_tokens(src).unwrap()), normalize(src));
        }
    }

    #[test]
    fn tokens_keep_source_offsets() {
        let pos: Vec<usize> = normalize_tokens("ab+)")
            .unwrap()
            .iter()
            .map(|s| s.pos)
            .collect();
        // a, b, b, *, )
        assert_eq!(pos, vec![0, 1, 1, 1, 3]);

        let pos: Vec<usize> = normalize_tokens(r"\(x?")
            .unwrap()
            .iter()
            .map(|s| s.pos)
            .collect();
        // \(, (, x, |, ε, )
        assert_eq!(pos, vec![0, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn dangling_escape_offset() {
        assert_eq!(
            normalize_tokens(r"a+b\"),
            Err(ParseError::DanglingEscape { pos: 3 })
        );
    }

    #[test]
    fn group_is_not_expanded() {
        assert_eq!(normalize("(ab)+"), "(ab)+");
        assert_eq!(normalize("(ab)?"), "(ab)?");
    }
}
