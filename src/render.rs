use crate::parser::Ast;

// a node's index in the arena is its identity in the rendered graph
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<(usize, usize)>,
}

pub struct GraphNode {
    pub label: String,
}

impl Graph {
    pub fn from_ast(ast: &Ast) -> Graph {
        let mut graph = Graph {
            nodes: vec![],
            edges: vec![],
        };
        graph.make(ast);
        graph
    }

    // pre-order: the parent is allocated before its children
    fn make(&mut self, ast: &Ast) -> usize {
        let id = self.nodes.len();
        self.nodes.push(GraphNode { label: ast.label() });

        for child in ast.children() {
            let child_id = self.make(child);
            self.edges.push((id, child_id));
        }

        id
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn to_dot(&self, name: &str) -> String {
        let mut dot = String::new();

        dot.push_str(&format!("digraph {} {{\n", quote(name)));
        for (id, node) in self.nodes.iter().enumerate() {
            dot.push_str(&format!("    n{} [label={}];\n", id, quote(&node.label)));
        }
        for (from, to) in self.edges.iter() {
            dot.push_str(&format!("    n{} -> n{};\n", from, to));
        }
        dot.push_str("}\n");

        dot
    }
}

pub fn tree(ast: &Ast) -> String {
    let mut out = String::new();
    write_tree(ast, 0, &mut out);
    out
}

fn write_tree(ast: &Ast, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&ast.label());
    out.push('\n');
    for child in ast.children() {
        write_tree(child, depth + 1, out);
    }
}

fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
