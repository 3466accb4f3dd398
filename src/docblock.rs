//! Docstring block synthesis.
//!
//! Produces the literal text of one documentation block per
//! declaration: a FIXME summary, a Parameters section, an Attributes
//! section for classes, and a Returns section for functions with a
//! meaningful return annotation. Blocks are flush-left; the splicer
//! indents them.

use crate::model::{DeclKind, Declaration, Param};

/// Synthesize the docstring block for a declaration.
pub fn generate(decl: &Declaration) -> String {
    let mut sections = entries_section("Parameters", &decl.params);
    match decl.kind {
        DeclKind::Class => {
            let attributes: Vec<Param> = decl
                .attributes
                .iter()
                .map(|name| Param {
                    name: name.clone(),
                    hint: None,
                    default: None,
                })
                .collect();
            sections.push_str(&entries_section("Attributes", &attributes));
        }
        DeclKind::Function | DeclKind::AsyncFunction => {
            // a declared `-> None` suppresses the section entirely
            if let Some(returns) = decl.returns.as_deref() {
                if returns != "None" {
                    sections.push_str("Returns\n-------\n");
                    sections.push_str(returns);
                    sections.push_str("\n    FIXME\n\n");
                }
            }
        }
    }
    if sections.is_empty() {
        "\"\"\"\nFIXME\n\"\"\"\n".to_string()
    } else {
        format!("\"\"\"\nFIXME\n\n{sections}\"\"\"\n")
    }
}

/// One `name : hint` section (Parameters or Attributes). Empty input
/// renders nothing, including the header.
fn entries_section(header: &str, entries: &[Param]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = format!("{}\n{}\n", header, "-".repeat(header.len()));
    for entry in entries {
        out.push_str(&entry.name);
        out.push_str(" : ");
        out.push_str(entry.hint.as_deref().unwrap_or("FIXME"));
        if let Some(default) = entry.default.as_deref() {
            out.push_str(&format!(", optional (default={default})"));
        }
        out.push_str("\n    FIXME\n\n");
    }
    out
}
