//! Type-annotation and default-value rendering.
//!
//! Annotation nodes are lowered into [`Expr`], a small expression sum
//! type, then rendered by structural recursion. Rendering is total over
//! recognized subscript heads (unknown heads degrade to `FIXME`) and
//! fails only for node shapes outside the supported grammar subset,
//! which signal a parse-model mismatch rather than merely odd input.

use anyhow::{bail, Result};
use tree_sitter::Node;

/// Raw source text of a node.
pub(crate) fn text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// Lowered annotation / default-value expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Bare identifier: `int`, `MyType`.
    Name(String),
    /// Dotted path, left-to-right: `module.Type`.
    Dotted(Vec<String>),
    /// Non-string literal, as written: `None`, `True`, `42`.
    Constant(String),
    /// String literal content, quotes stripped.
    Str(String),
    /// Generic form: `List[int]`, `Union[int, str]`.
    Subscript { head: Box<Expr>, params: Vec<Expr> },
    /// `X | Y`, either the operator or a type-context union node.
    Or(Box<Expr>, Box<Expr>),
    /// List display, only meaningful as a default value.
    List(Vec<Expr>),
    /// Tuple display, only meaningful as a default value.
    Tuple(Vec<Expr>),
    /// Anything else, tagged with its node kind.
    Unsupported(String),
}

/// Lower a tree-sitter node into an [`Expr`].
///
/// Covers both node families the grammar produces for annotations:
/// expression context (`subscript`, `attribute`, `binary_operator`) and
/// type context (`type` wrapper, `generic_type`, `member_type`,
/// `union_type`).
pub fn lower(node: Node, source: &str) -> Expr {
    match node.kind() {
        "type" | "parenthesized_expression" => match node.named_child(0) {
            Some(inner) => lower(inner, source),
            None => Expr::Unsupported(node.kind().to_string()),
        },
        "identifier" => Expr::Name(text(node, source).to_string()),
        "attribute" => lower_dotted(
            node,
            node.child_by_field_name("object"),
            node.child_by_field_name("attribute"),
            source,
        ),
        "member_type" => lower_dotted(node, node.named_child(0), node.named_child(1), source),
        "subscript" => {
            let Some(value) = node.child_by_field_name("value") else {
                return Expr::Unsupported("subscript".to_string());
            };
            let mut cursor = node.walk();
            let params = node
                .children_by_field_name("subscript", &mut cursor)
                .map(|param| lower(param, source))
                .collect();
            Expr::Subscript {
                head: Box::new(lower(value, source)),
                params,
            }
        }
        "generic_type" => {
            let Some(head) = node.named_child(0) else {
                return Expr::Unsupported("generic_type".to_string());
            };
            let mut cursor = node.walk();
            let params = match node
                .named_children(&mut cursor)
                .find(|child| child.kind() == "type_parameter")
            {
                Some(list) => lower_elements(list, source),
                None => Vec::new(),
            };
            Expr::Subscript {
                head: Box::new(lower(head, source)),
                params,
            }
        }
        "union_type" => {
            let mut cursor = node.walk();
            let sides: Vec<Node> = node
                .named_children(&mut cursor)
                .filter(|child| child.kind() != "comment")
                .collect();
            match sides.as_slice() {
                [left, right] => Expr::Or(
                    Box::new(lower(*left, source)),
                    Box::new(lower(*right, source)),
                ),
                _ => Expr::Unsupported("union_type".to_string()),
            }
        }
        "binary_operator" => {
            let operator = node.child_by_field_name("operator").map(|op| op.kind());
            let left = node.child_by_field_name("left");
            let right = node.child_by_field_name("right");
            match (operator, left, right) {
                (Some("|"), Some(left), Some(right)) => Expr::Or(
                    Box::new(lower(left, source)),
                    Box::new(lower(right, source)),
                ),
                _ => Expr::Unsupported("binary_operator".to_string()),
            }
        }
        "none" | "true" | "false" | "integer" | "float" => {
            Expr::Constant(text(node, source).to_string())
        }
        "string" => lower_string(node, source),
        "list" => Expr::List(lower_elements(node, source)),
        "tuple" => Expr::Tuple(lower_elements(node, source)),
        other => Expr::Unsupported(other.to_string()),
    }
}

/// Lower an attribute-access chain down to its root identifier,
/// collecting the parts in left-to-right order.
fn lower_dotted(node: Node, base: Option<Node>, attr: Option<Node>, source: &str) -> Expr {
    let (Some(base), Some(attr)) = (base, attr) else {
        return Expr::Unsupported(node.kind().to_string());
    };
    let mut parts = match lower(base, source) {
        Expr::Name(name) => vec![name],
        Expr::Dotted(parts) => parts,
        _ => return Expr::Unsupported(node.kind().to_string()),
    };
    parts.push(text(attr, source).to_string());
    Expr::Dotted(parts)
}

fn lower_elements(node: Node, source: &str) -> Vec<Expr> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .map(|child| lower(child, source))
        .collect()
}

/// Plain string literals become [`Expr::Str`]; `b"..."`/`r"..."` keep
/// their written form; f-strings are not constants and stay unsupported.
fn lower_string(node: Node, source: &str) -> Expr {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    let start = children.iter().find(|c| c.kind() == "string_start");
    let end = children.iter().find(|c| c.kind() == "string_end");
    let (Some(start), Some(end)) = (start, end) else {
        return Expr::Unsupported("string".to_string());
    };
    let prefix = text(*start, source);
    if prefix.contains(['f', 'F']) {
        return Expr::Unsupported("string".to_string());
    }
    if prefix.chars().any(|c| c.is_ascii_alphabetic()) {
        return Expr::Constant(text(node, source).to_string());
    }
    Expr::Str(source[start.end_byte()..end.start_byte()].to_string())
}

/// Render an annotation expression into a human-readable hint.
///
/// Unknown subscript heads degrade to `FIXME`; expression shapes that
/// cannot appear as an annotation at all are a hard error.
pub fn render(expr: &Expr) -> Result<String> {
    match expr {
        Expr::Name(name) => Ok(name.clone()),
        Expr::Dotted(parts) => Ok(parts.join(".")),
        Expr::Constant(value) | Expr::Str(value) => Ok(value.clone()),
        Expr::Subscript { head, params } => render_subscript(head, params),
        Expr::Or(left, right) => Ok(format!("{} or {}", render(left)?, render(right)?)),
        Expr::List(_) | Expr::Tuple(_) | Expr::Unsupported(_) => {
            bail!("unsupported annotation shape: {}", describe(expr))
        }
    }
}

fn render_subscript(head: &Expr, params: &[Expr]) -> Result<String> {
    let head_name = match head {
        Expr::Name(name) => name.as_str(),
        // `typing.List` — the final component decides the container kind
        Expr::Dotted(parts) => parts.last().map(String::as_str).unwrap_or("FIXME"),
        _ => "FIXME",
    };
    let lowered = head_name.to_lowercase();
    if head_name == "Union" && params.len() >= 2 {
        let parts: Vec<String> = params.iter().map(render).collect::<Result<_>>()?;
        return Ok(parts.join(" or "));
    }
    if lowered == "list" || lowered == "iterable" {
        return Ok(match params {
            [] => lowered,
            [inner] => format!("{} of {}", lowered, render(inner)?),
            _ => "FIXME".to_string(),
        });
    }
    if head_name == "Tuple" {
        return Ok(match params {
            [] => "tuple".to_string(),
            [inner] => format!("tuple of {}", render(inner)?),
            _ => {
                let parts: Vec<String> = params.iter().map(render).collect::<Result<_>>()?;
                format!("({})", parts.join(", "))
            }
        });
    }
    Ok("FIXME".to_string())
}

fn describe(expr: &Expr) -> &str {
    match expr {
        Expr::List(_) => "list display",
        Expr::Tuple(_) => "tuple display",
        Expr::Unsupported(kind) => kind,
        _ => "expression",
    }
}

/// Render a default-value expression. Total: anything unrecognized
/// becomes `FIXME`.
pub fn render_default(expr: &Expr) -> String {
    match expr {
        Expr::Constant(value) => value.clone(),
        Expr::Str(content) => repr_str(content),
        Expr::List(elements) => format!("[{}]", join_defaults(elements)),
        Expr::Tuple(elements) => format!("({})", join_defaults(elements)),
        // `module.CONST` only — deeper chains are not resolved
        Expr::Dotted(parts) if parts.len() == 2 => parts.join("."),
        _ => "FIXME".to_string(),
    }
}

fn join_defaults(elements: &[Expr]) -> String {
    elements
        .iter()
        .map(render_default)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Quote a string the way the source language's repr would: single
/// quotes, switching to double quotes when the value contains a single
/// quote and no double quote.
fn repr_str(content: &str) -> String {
    if content.contains('\'') && !content.contains('"') {
        format!("\"{content}\"")
    } else {
        format!("'{}'", content.replace('\'', "\\'"))
    }
}
