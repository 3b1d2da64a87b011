//! Python oracle backed by tree-sitter.

use super::{ComplexityOracle, FunctionSeed, ImportRef};
use crate::error::{Result, ScorecardError};
use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonOracle;

impl PythonOracle {
    pub fn new() -> Self {
        Self
    }

    /// Parses `source`, returning `None` for input with syntax errors.
    fn parse(&self, source: &str) -> Option<Tree> {
        let tree = match parse_source(source) {
            Ok(tree) => tree,
            Err(err) => {
                debug!(error = %err, "python parse failed");
                return None;
            }
        };
        if tree.root_node().has_error() {
            debug!("python source contains syntax errors; skipping");
            return None;
        }
        Some(tree)
    }
}

fn parse_source(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ScorecardError::Parser(e.to_string()))?;
    parser
        .parse(source, None)
        .ok_or_else(|| ScorecardError::Parser("tree-sitter returned no tree".to_string()))
}

impl ComplexityOracle for PythonOracle {
    fn extension(&self) -> &'static str {
        "py"
    }

    fn entry_module(&self) -> &'static str {
        "__init__"
    }

    fn analyze(&self, source: &str) -> Vec<FunctionSeed> {
        let Some(tree) = self.parse(source) else {
            return Vec::new();
        };
        let bytes = source.as_bytes();
        let mut seeds = Vec::new();
        visit(tree.root_node(), &mut |node| {
            if is_function(node) {
                if let Some(seed) = function_seed(node, bytes) {
                    seeds.push(seed);
                }
            }
        });
        seeds
    }

    fn imports(&self, source: &str) -> Vec<ImportRef> {
        let Some(tree) = self.parse(source) else {
            return Vec::new();
        };
        let bytes = source.as_bytes();
        let mut imports = Vec::new();
        visit(tree.root_node(), &mut |node| match node.kind() {
            "import_statement" => collect_plain_import(node, bytes, &mut imports),
            "import_from_statement" => collect_from_import(node, bytes, &mut imports),
            _ => {}
        });
        imports
    }

    fn signatures(&self, source: &str) -> Vec<String> {
        let Some(tree) = self.parse(source) else {
            return Vec::new();
        };
        let bytes = source.as_bytes();
        let mut signatures = Vec::new();
        visit(tree.root_node(), &mut |node| {
            if is_function(node) || node.kind() == "class_definition" {
                if let Some(signature) = signature(node, bytes) {
                    signatures.push(signature);
                }
            }
        });
        signatures
    }
}

/// Pre-order walk over every node, mirroring source order.
fn visit<'a>(node: Node<'a>, f: &mut impl FnMut(Node<'a>)) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, f);
    }
}

fn is_function(node: Node) -> bool {
    matches!(
        node.kind(),
        "function_definition" | "async_function_definition"
    )
}

fn text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn function_seed(node: Node, source: &[u8]) -> Option<FunctionSeed> {
    let name = text(node.child_by_field_name("name")?, source).to_string();
    let has_return_annotation = node.child_by_field_name("return_type").is_some();
    let has_param_annotation = node
        .child_by_field_name("parameters")
        .map(|params| {
            let mut cursor = params.walk();
            let typed = params.children(&mut cursor).any(|param| {
                matches!(param.kind(), "typed_parameter" | "typed_default_parameter")
            });
            typed
        })
        .unwrap_or(false);

    let complexity = node
        .child_by_field_name("body")
        .map(|body| 1 + decision_points(body))
        .unwrap_or(1);

    Some(FunctionSeed {
        name,
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
        complexity,
        has_return_annotation,
        has_param_annotation,
    })
}

/// McCabe decision points inside `node`, excluding nested definitions
/// which are measured as functions of their own.
fn decision_points(node: Node) -> u32 {
    let mut count = 0;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "function_definition" | "async_function_definition" | "class_definition" => continue,
            "if_statement" | "elif_clause" | "for_statement" | "while_statement"
            | "except_clause" | "except_group_clause" | "case_clause"
            | "conditional_expression" | "if_clause" => count += 1,
            _ => {}
        }
        count += decision_points(child);
    }
    count
}

fn collect_plain_import(node: Node, source: &[u8], imports: &mut Vec<ImportRef>) {
    let mut cursor = node.walk();
    for child in node.children_by_field_name("name", &mut cursor) {
        let module = match child.kind() {
            "dotted_name" => text(child, source),
            "aliased_import" => child
                .child_by_field_name("name")
                .map(|name| text(name, source))
                .unwrap_or(""),
            _ => "",
        };
        if !module.is_empty() {
            imports.push(ImportRef::absolute(module));
        }
    }
}

fn collect_from_import(node: Node, source: &[u8], imports: &mut Vec<ImportRef>) {
    let Some(module_node) = node.child_by_field_name("module_name") else {
        return;
    };
    let (module, level) = if module_node.kind() == "relative_import" {
        let raw = text(module_node, source);
        let level = raw.chars().take_while(|c| *c == '.').count();
        (raw[level..].trim().to_string(), level)
    } else {
        (text(module_node, source).to_string(), 0)
    };

    if !module.is_empty() || level > 0 {
        imports.push(ImportRef::relative(module.clone(), level));
    }

    // `from pkg import mod` may name a submodule rather than an attribute.
    let mut cursor = node.walk();
    for name_node in node.children_by_field_name("name", &mut cursor) {
        let name = match name_node.kind() {
            "dotted_name" => text(name_node, source),
            "aliased_import" => name_node
                .child_by_field_name("name")
                .map(|name| text(name, source))
                .unwrap_or(""),
            _ => "",
        };
        if name.is_empty() {
            continue;
        }
        let qualified = if module.is_empty() {
            name.to_string()
        } else {
            format!("{module}.{name}")
        };
        imports.push(ImportRef::relative(qualified, level));
    }
}

fn signature(node: Node, source: &[u8]) -> Option<String> {
    let body = node.child_by_field_name("body")?;
    let start = node.start_byte();
    let mut end = body.start_byte();
    let mut cursor = node.walk();
    if let Some(colon) = node
        .children(&mut cursor)
        .filter(|child| child.kind() == ":" && child.end_byte() <= body.start_byte())
        .last()
    {
        end = colon.end_byte();
    }
    let header = std::str::from_utf8(source.get(start..end)?).ok()?;
    let header = collapse_whitespace(header);
    if header.is_empty() {
        return None;
    }

    let mut lines = Vec::new();
    if let Some(parent) = node.parent().filter(|p| p.kind() == "decorated_definition") {
        let mut cursor = parent.walk();
        for decorator in parent
            .children(&mut cursor)
            .filter(|child| child.kind() == "decorator")
        {
            lines.push(text(decorator, source).trim().to_string());
        }
    }
    lines.push(header);
    Some(lines.join("\n"))
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("( ", "(")
        .replace(", )", ")")
        .replace(",)", ")")
        .replace(" )", ")")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
def hello():
    print("Hello")

def complex_func(n):
    if n > 1:
        if n > 2:
            if n > 3:
                return 3
    return 1
"#;

    #[test]
    fn analyze_reports_functions_in_source_order() {
        let seeds = PythonOracle::new().analyze(SAMPLE);
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].name, "hello");
        assert_eq!(seeds[0].start_line, 2);
        assert_eq!(seeds[0].end_line, 3);
        assert_eq!(seeds[0].complexity, 1);
        assert_eq!(seeds[1].name, "complex_func");
        assert_eq!(seeds[1].complexity, 4);
    }

    #[test]
    fn analyze_counts_loops_and_handlers() {
        let source = r#"
def busy(items):
    for item in items:
        while item:
            try:
                item = item.next
            except ValueError:
                break
    return [i for i in items if i] or None
"#;
        let seeds = PythonOracle::new().analyze(source);
        assert_eq!(seeds.len(), 1);
        // for + while + except + comprehension if
        assert_eq!(seeds[0].complexity, 5);
    }

    #[test]
    fn nested_functions_are_measured_separately() {
        let source = r#"
def outer(x):
    def inner(y):
        if y:
            return 1
        return 0
    return inner(x)
"#;
        let seeds = PythonOracle::new().analyze(source);
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].name, "outer");
        assert_eq!(seeds[0].complexity, 1);
        assert_eq!(seeds[1].name, "inner");
        assert_eq!(seeds[1].complexity, 2);
    }

    #[test]
    fn annotations_mark_functions_typed() {
        let source = r#"
def returns() -> int:
    return 1

def params(a: int, b):
    return a

def defaults(a: int = 3):
    return a

async def fetch(url):
    return url
"#;
        let seeds = PythonOracle::new().analyze(source);
        assert_eq!(seeds.len(), 4);
        assert!(seeds[0].has_return_annotation);
        assert!(!seeds[0].has_param_annotation);
        assert!(seeds[1].has_param_annotation);
        assert!(seeds[2].has_param_annotation);
        assert_eq!(seeds[3].name, "fetch");
        assert!(!seeds[3].has_return_annotation && !seeds[3].has_param_annotation);
    }

    #[test]
    fn syntax_errors_yield_no_data() {
        let oracle = PythonOracle::new();
        let broken = "def broken(:\n    return\n";
        assert!(oracle.analyze(broken).is_empty());
        assert!(oracle.imports(broken).is_empty());
        assert!(oracle.signatures(broken).is_empty());
    }

    #[test]
    fn imports_capture_absolute_and_relative_forms() {
        let source = r#"
import os
import pkg.utils as u
from internal import x
from . import sibling
from ..core.models import Model
"#;
        let imports = PythonOracle::new().imports(source);
        assert!(imports.contains(&ImportRef::absolute("os")));
        assert!(imports.contains(&ImportRef::absolute("pkg.utils")));
        assert!(imports.contains(&ImportRef::absolute("internal")));
        assert!(imports.contains(&ImportRef::relative("", 1)));
        assert!(imports.contains(&ImportRef::relative("sibling", 1)));
        assert!(imports.contains(&ImportRef::relative("core.models", 2)));
    }

    #[test]
    fn signatures_elide_bodies_and_keep_decorators() {
        let source = r#"
@deco1
@deco2(x=1)
def decorated_func(a, b):
    return a + b

class MyClass:
    """Doc."""

    @property
    def my_prop(self):
        return 1

def multiline_func(
    a: int,
    b: str
) -> bool:
    return True
"#;
        let signatures = PythonOracle::new().signatures(source);
        let joined = signatures.join("\n");
        assert!(joined.contains("@deco1\n@deco2(x=1)\ndef decorated_func(a, b):"));
        assert!(joined.contains("class MyClass:"));
        assert!(joined.contains("@property\ndef my_prop(self):"));
        assert!(joined.contains("def multiline_func(a: int, b: str) -> bool:"));
        assert!(!joined.contains("return"));
        assert!(!joined.contains("Doc."));
    }
}
