use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use rayon::prelude::*;

use crate::parser::{self, Trace};
use crate::render::{self, Graph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Indented text tree
    Tree,
    /// Graphviz digraph
    Dot,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Tree => "txt",
            Format::Dot => "dot",
            Format::Json => "json",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "regex-ast", version, about = "Parse regular expressions into syntax trees")]
pub struct Args {
    /// File with one pattern per line (reads stdin when absent)
    pub file: Option<PathBuf>,

    /// Parse this pattern instead of reading a file (repeatable)
    #[arg(short, long = "pattern", value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Output format of each tree
    #[arg(short, long, value_enum, default_value_t = Format::Tree)]
    pub format: Format,

    /// Write one `ast_expression_<n>` file per pattern into this directory
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

// `number` is 1-based
#[derive(Debug, PartialEq)]
pub struct Line {
    pub number: usize,
    pub pattern: String,
}

pub fn read_lines(input: &str) -> Vec<Line> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| Line {
            number: i + 1,
            pattern: line.trim().to_owned(),
        })
        .filter(|line| !line.pattern.is_empty())
        .collect()
}

pub fn run(args: Args) -> Result<i32> {
    let lines = if args.patterns.is_empty() {
        read_lines(&read_input(args.file.as_deref())?)
    } else {
        args.patterns
            .iter()
            .enumerate()
            .map(|(i, pattern)| Line {
                number: i + 1,
                pattern: pattern.clone(),
            })
            .collect()
    };
    info!("parsing {} patterns", lines.len());

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    // patterns share nothing, results come back in input order
    let results: Vec<_> = lines
        .par_iter()
        .map(|line| parser::Parser::default().trace(&line.pattern))
        .collect();

    let mut failed = 0;
    for (line, result) in lines.iter().zip(results) {
        println!("\n--- expression {}: {} ---", line.number, line.pattern);
        match result {
            Ok(trace) => report(&trace, line.number, &args)?,
            Err(err) => {
                failed += 1;
                warn!("expression {}: {}", line.number, err);
                println!("error: {}", err);
                if let Some(pos) = err.pos() {
                    print!("{}", caret(&line.pattern, pos));
                }
            }
        }
    }

    Ok(if failed == 0 { 0 } else { 1 })
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

// marks a character offset under the pattern
fn caret(pattern: &str, pos: usize) -> String {
    format!("  {}\n  {}^\n", pattern, " ".repeat(pos))
}

fn report(trace: &Trace, number: usize, args: &Args) -> Result<()> {
    println!("normalized: {}", trace.normalized);
    println!("concatenation: {}", trace.expanded);
    println!("postfix: {}", trace.postfix);
    println!("infix: {}", trace.ast.to_infix());
    info!(
        "expression {}: {} nodes, depth {}",
        number,
        trace.ast.len(),
        trace.ast.depth()
    );

    let name = format!("ast_expression_{}", number);
    let rendered = match args.format {
        Format::Tree => render::tree(&trace.ast),
        Format::Dot => Graph::from_ast(&trace.ast).to_dot(&name),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&trace.ast)?;
            json.push('\n');
            json
        }
    };

    match &args.out_dir {
        Some(dir) => {
            let path = dir.join(format!("{}.{}", name, args.format.extension()));
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("tree saved as {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn blank_lines_keep_numbering() {
        let lines = read_lines("ab*\n\n  a|b  \n");
        assert_eq!(
            lines,
            vec![
                Line {
                    number: 1,
                    pattern: "ab*".to_owned()
                },
                Line {
                    number: 3,
                    pattern: "a|b".to_owned()
                },
            ]
        );
    }

    #[test]
    fn args_parse() {
        let args = Args::parse_from(["regex-ast", "-p", "ab", "-p", "a|b", "-f", "dot", "-vv"]);
        assert_eq!(args.patterns, vec!["ab", "a|b"]);
        assert_eq!(args.format, Format::Dot);
        assert_eq!(args.verbose, 2);
        assert!(args.file.is_none());
    }

    #[test]
    fn failing_pattern_sets_exit_code() {
        let args = Args::parse_from(["regex-ast", "-p", "ab", "-p", "a)"]);
        assert_eq!(run(args).unwrap(), 1);
    }

    #[test]
    fn caret_marks_error_offset() {
        let err = parser::parse("ab+)").unwrap_err();
        let pos = err.pos().unwrap();
        assert_eq!(caret("ab+)", pos), "  ab+)\n     ^\n");
        assert_eq!(caret("a", 0), "  a\n  ^\n");
    }

    #[test]
    fn writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let args = Args {
            file: None,
            patterns: vec!["ab*".to_owned()],
            format: Format::Json,
            out_dir: Some(out_dir.clone()),
            verbose: 0,
        };

        assert_eq!(run(args).unwrap(), 0);
        let json = fs::read_to_string(out_dir.join("ast_expression_1.json")).unwrap();
        assert!(json.contains("\"kind\": \"binary\""));
    }

    #[test]
    fn reads_pattern_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("expressions.txt");
        fs::write(&file, "a+\n(a|b)*abb\n").unwrap();

        let args = Args::parse_from([OsStr::new("regex-ast"), file.as_os_str()]);
        assert_eq!(run(args).unwrap(), 0);
    }
}
