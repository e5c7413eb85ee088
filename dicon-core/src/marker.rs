//! The machine-readable "generated, do not edit" marker.

/// Name of the tool recorded in the marker comment.
pub const TOOL_NAME: &str = "dicon";

/// First line of every generated file.
///
/// Follows the `^// Code generated .* DO NOT EDIT\.$` convention so that
/// linters and other tools skip the file.
pub const GENERATED_HEADER: &str = "// Code generated by \"dicon\"; DO NOT EDIT.";

/// Check whether `content` carries a generated-code marker before its first
/// non-comment line.
pub fn is_generated(content: &str) -> bool {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !line.starts_with("//") {
            return false;
        }
        if line.starts_with("// Code generated ") && line.ends_with(" DO NOT EDIT.") {
            return true;
        }
    }
    false
}
