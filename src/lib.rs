//! npdoc — synthesize missing NumPy-style docstring stubs in Python
//! source files.
//!
//! The pipeline is pure text-to-text: measure per-line indentation,
//! locate undocumented declarations, render their type annotations,
//! generate one docstring block per declaration, and splice the blocks
//! back into the original text. Everything outside the inserted spans
//! is preserved byte for byte.

pub mod docblock;
pub mod hint;
pub mod indent;
pub mod locate;
pub mod model;
pub mod splice;

use anyhow::Result;

/// Default number of spaces per indentation level.
pub const INDENTATION_SPACES: usize = 4;

/// Process one file's content, returning the new content with a
/// docstring stub inserted after every undocumented declaration.
///
/// Fails when the text is not parseable Python; no partial output is
/// produced in that case.
pub fn process_file(source: &str, indentation_spaces: usize) -> Result<String> {
    let declarations = locate::undocumented_declarations(source)?;
    if declarations.is_empty() {
        return Ok(source.to_string());
    }
    let indentation = indent::measure(source);
    let blocks: Vec<String> = declarations.iter().map(docblock::generate).collect();
    Ok(splice::integrate(
        source,
        &declarations,
        &blocks,
        &indentation,
        indentation_spaces,
    ))
}
