//! Per-line indentation measurement.
//!
//! Records the count of leading space characters for every line of the
//! source. The splicer uses these counts to pad inserted blocks to the
//! body depth of their declaration.

/// Count leading spaces on every line (0 for empty lines).
///
/// Tabs terminate the count — space-only indentation is the supported
/// convention of the target ecosystem.
pub fn measure(source: &str) -> Vec<usize> {
    source
        .lines()
        .map(|line| line.bytes().take_while(|&b| b == b' ').count())
        .collect()
}
