//! Undocumented-declaration discovery over the Python syntax tree.
//!
//! Parses the file with tree-sitter and walks two levels: top-level
//! functions and classes, then each class's direct function members.
//! The result is one flat list in document order (a class immediately
//! followed by its undocumented methods), which is the order the
//! splicer needs to compute insertion points.

use crate::hint;
use crate::model::{DeclKind, Declaration, Param};
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::sync::LazyLock;
use tree_sitter::{Node, Parser, Tree};

static RE_DUNDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^__.*__$").unwrap());

static RE_TEST_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^test_").unwrap());

/// Implicit receiver parameter names, never listed in docstrings.
const RECEIVERS: &[&str] = &["self", "cls"];

/// Parse the source and collect every undocumented declaration in
/// document order. Fails when the text is not valid Python — the
/// pipeline never produces partial output from a broken parse.
pub fn undocumented_declarations(source: &str) -> Result<Vec<Declaration>> {
    let tree = parse(source)?;
    let root = tree.root_node();
    let mut decls = Vec::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        let node = unwrap_decorated(child);
        match node.kind() {
            "function_definition" => {
                if !is_excluded(definition_name(node, source)) {
                    decls.extend(collect_function(node, source)?);
                }
            }
            "class_definition" => {
                if !is_excluded(definition_name(node, source)) {
                    collect_class(node, source, &mut decls)?;
                }
            }
            _ => {}
        }
    }
    Ok(decls)
}

fn parse(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .context("failed to load the Python grammar")?;
    let tree = parser
        .parse(source, None)
        .context("the parser did not produce a tree")?;
    if tree.root_node().has_error() {
        bail!("invalid Python syntax");
    }
    Ok(tree)
}

/// Names matching the dunder convention or the test prefix are never
/// collected, regardless of documentation status.
fn is_excluded(name: &str) -> bool {
    RE_DUNDER.is_match(name) || RE_TEST_PREFIX.is_match(name)
}

fn definition_name<'a>(node: Node, source: &'a str) -> &'a str {
    node.child_by_field_name("name")
        .map(|name| hint::text(name, source))
        .unwrap_or("")
}

/// Decorators wrap the definition node; line attribution stays on the
/// `def`/`class` line itself.
fn unwrap_decorated(node: Node) -> Node {
    if node.kind() == "decorated_definition" {
        node.child_by_field_name("definition").unwrap_or(node)
    } else {
        node
    }
}

/// First non-comment statement of a definition body, if any.
fn first_body_statement(node: Node) -> Option<Node> {
    let body = node.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let result = body
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    result
}

/// A documentation block is a string expression as the first body
/// statement.
fn has_docstring(node: Node) -> bool {
    first_body_statement(node)
        .filter(|stmt| stmt.kind() == "expression_statement")
        .and_then(|stmt| stmt.named_child(0))
        .is_some_and(|expr| matches!(expr.kind(), "string" | "concatenated_string"))
}

fn is_async(node: Node) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

/// Build a [`Declaration`] for an undocumented function, or `None` when
/// it is documented or its body shares the header line (no unambiguous
/// insertion line).
fn collect_function(node: Node, source: &str) -> Result<Option<Declaration>> {
    if has_docstring(node) {
        return Ok(None);
    }
    let Some(first_stmt) = first_body_statement(node) else {
        return Ok(None);
    };
    let header_row = node.start_position().row;
    let body_row = first_stmt.start_position().row;
    if body_row == header_row {
        return Ok(None);
    }
    let kind = if is_async(node) {
        DeclKind::AsyncFunction
    } else {
        DeclKind::Function
    };
    Ok(Some(Declaration {
        kind,
        name: definition_name(node, source).to_string(),
        header_row,
        body_row,
        params: function_params(node, source)?,
        returns: return_hint(node, source)?,
        attributes: Vec::new(),
    }))
}

/// Collect a class and then its undocumented methods, in document
/// order. A documented class still contributes members and vice versa.
fn collect_class(node: Node, source: &str, decls: &mut Vec<Declaration>) -> Result<()> {
    if !has_docstring(node) {
        decls.extend(class_declaration(node, source)?);
    }
    let Some(body) = node.child_by_field_name("body") else {
        return Ok(());
    };
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        let member = unwrap_decorated(child);
        if member.kind() != "function_definition" {
            continue;
        }
        if is_excluded(definition_name(member, source)) {
            continue;
        }
        decls.extend(collect_function(member, source)?);
    }
    Ok(())
}

fn class_declaration(node: Node, source: &str) -> Result<Option<Declaration>> {
    let Some(first_stmt) = first_body_statement(node) else {
        return Ok(None);
    };
    let header_row = node.start_position().row;
    let body_row = first_stmt.start_position().row;
    if body_row == header_row {
        return Ok(None);
    }
    let (params, attributes) = match constructor(node, source) {
        Some(ctor) => {
            let params = function_params(ctor, source)?;
            let attributes = constructor_attributes(ctor, source, &params);
            (params, attributes)
        }
        None => (Vec::new(), Vec::new()),
    };
    Ok(Some(Declaration {
        kind: DeclKind::Class,
        name: definition_name(node, source).to_string(),
        header_row,
        body_row,
        params,
        returns: None,
        attributes,
    }))
}

/// The class's own non-async `__init__` member, if any.
fn constructor<'t>(class_node: Node<'t>, source: &str) -> Option<Node<'t>> {
    let body = class_node.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let result = body
        .named_children(&mut cursor)
        .map(unwrap_decorated)
        .find(|member| {
            member.kind() == "function_definition"
                && definition_name(*member, source) == "__init__"
                && !is_async(*member)
        });
    result
}

/// Attribute names assigned directly in the constructor body
/// (`self.name = ...`). Annotated and augmented assignments do not
/// count; names already covered by a parameter are dropped.
fn constructor_attributes(ctor: Node, source: &str, params: &[Param]) -> Vec<String> {
    let mut attributes = Vec::new();
    let Some(body) = ctor.child_by_field_name("body") else {
        return attributes;
    };
    let mut cursor = body.walk();
    for stmt in body.named_children(&mut cursor) {
        if stmt.kind() != "expression_statement" {
            continue;
        }
        let Some(mut node) = stmt.named_child(0) else {
            continue;
        };
        // chained targets: `self.a = self.b = value`
        while node.kind() == "assignment" {
            if node.child_by_field_name("type").is_some() {
                break;
            }
            if let Some(target) = node.child_by_field_name("left") {
                if target.kind() == "attribute" {
                    if let Some(attr) = target.child_by_field_name("attribute") {
                        attributes.push(hint::text(attr, source).to_string());
                    }
                }
            }
            match node.child_by_field_name("right") {
                Some(next) => node = next,
                None => break,
            }
        }
    }
    attributes.retain(|name| params.iter().all(|param| param.name != *name));
    attributes
}

/// Positional parameters, receivers skipped. Collection stops at a bare
/// `*` or `*args`: keyword-only parameters are not part of the rendered
/// list, which keeps defaults a contiguous trailing suffix.
fn function_params(node: Node, source: &str) -> Result<Vec<Param>> {
    let Some(parameters) = node.child_by_field_name("parameters") else {
        return Ok(Vec::new());
    };
    let mut params = Vec::new();
    let mut cursor = parameters.walk();
    for child in parameters.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => push_param(&mut params, hint::text(child, source), None, None),
            "typed_parameter" => {
                let Some(name_node) = child.named_child(0) else {
                    continue;
                };
                if name_node.kind() == "list_splat_pattern" {
                    break;
                }
                if name_node.kind() != "identifier" {
                    continue;
                }
                let hint = annotation_hint(child.child_by_field_name("type"), source)?;
                push_param(&mut params, hint::text(name_node, source), hint, None);
            }
            "default_parameter" | "typed_default_parameter" => {
                let Some(name_node) = child.child_by_field_name("name") else {
                    continue;
                };
                if name_node.kind() != "identifier" {
                    continue;
                }
                let hint = annotation_hint(child.child_by_field_name("type"), source)?;
                let default = child
                    .child_by_field_name("value")
                    .map(|value| hint::render_default(&hint::lower(value, source)));
                push_param(&mut params, hint::text(name_node, source), hint, default);
            }
            "list_splat_pattern" | "keyword_separator" => break,
            _ => {} // `/` markers, `**kwargs`, destructuring patterns
        }
    }
    Ok(params)
}

fn push_param(params: &mut Vec<Param>, name: &str, hint: Option<String>, default: Option<String>) {
    if RECEIVERS.contains(&name) {
        return;
    }
    params.push(Param {
        name: name.to_string(),
        hint,
        default,
    });
}

fn annotation_hint(node: Option<Node>, source: &str) -> Result<Option<String>> {
    match node {
        Some(node) => Ok(Some(hint::render(&hint::lower(node, source))?)),
        None => Ok(None),
    }
}

/// Rendered return annotation. An explicit `-> None` comes out as the
/// literal `"None"`, which the synthesizer uses to suppress the Returns
/// section.
fn return_hint(node: Node, source: &str) -> Result<Option<String>> {
    annotation_hint(node.child_by_field_name("return_type"), source)
}
