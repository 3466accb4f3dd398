//! Data model for located declarations — parser-agnostic.

/// Kind of source declaration a docstring can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Function,
    AsyncFunction,
    Class,
}

/// One positional parameter of a function or constructor.
///
/// Receiver parameters (`self`/`cls`) are never materialized.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    /// Rendered type hint, if the parameter was annotated.
    pub hint: Option<String>,
    /// Rendered default value, if the parameter has one.
    pub default: Option<String>,
}

/// An undocumented declaration, in document order.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    /// 0-based line of the `def` / `class` keyword.
    pub header_row: usize,
    /// 0-based line of the first body statement — the insertion line.
    pub body_row: usize,
    /// Positional parameters (the constructor's, for a class).
    pub params: Vec<Param>,
    /// Rendered return hint. `Some("None")` for an explicit `-> None`.
    pub returns: Option<String>,
    /// Constructor-derived attribute names (classes only).
    pub attributes: Vec<String>,
}
