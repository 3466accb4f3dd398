//! Block insertion into the original source text.
//!
//! Copies the original lines verbatim around each insertion point and
//! drops the padded block in between. Everything outside the inserted
//! spans stays byte-identical — no reflowing, no whitespace
//! normalization.

use crate::model::Declaration;

/// Insert one block per declaration at its insertion line.
///
/// `decls` and `blocks` are parallel and in document order;
/// `indentation` is the per-line leading-space index of `source`.
pub fn integrate(
    source: &str,
    decls: &[Declaration],
    blocks: &[String],
    indentation: &[usize],
    indentation_spaces: usize,
) -> String {
    debug_assert_eq!(decls.len(), blocks.len());
    if decls.is_empty() {
        return source.to_string();
    }
    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let mut out = String::with_capacity(source.len());
    let mut copied = 0;
    for (decl, block) in decls.iter().zip(blocks) {
        for line in &lines[copied..decl.body_row] {
            out.push_str(line);
        }
        copied = decl.body_row;
        let depth = indentation.get(decl.header_row).copied().unwrap_or(0) + indentation_spaces;
        out.push_str(&pad(block, depth));
    }
    for line in &lines[copied..] {
        out.push_str(line);
    }
    out
}

/// Prepend `depth` spaces to every non-trivial line of a block. Lines
/// of a single character (a bare newline) stay empty so no trailing
/// whitespace is introduced.
fn pad(block: &str, depth: usize) -> String {
    let padding = " ".repeat(depth);
    let mut out = String::with_capacity(block.len() + depth * 8);
    for line in block.split_inclusive('\n') {
        if line.len() > 1 {
            out.push_str(&padding);
        }
        out.push_str(line);
    }
    out
}
