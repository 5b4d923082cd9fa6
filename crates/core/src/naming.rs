//! Name normalization for projects and test runs.
//!
//! Names are the lookup keys users type on the command line, so they are
//! stored lowercased with all whitespace removed. Descriptions are only
//! trimmed.

use rand::Rng;

/// Length of names generated for records created without one.
pub const GENERATED_NAME_LEN: usize = 12;

/// Normalize a record name: trim, lowercase and strip all whitespace.
///
/// ```
/// use ghz_core::naming::normalize_name;
///
/// assert_eq!(normalize_name(" New Name "), "newname");
/// assert_eq!(normalize_name("TestProj111 "), "testproj111");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn normalize_description(description: &str) -> String {
    description.trim().to_string()
}

/// Generate a random lowercase alphanumeric name.
pub fn generate_name() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(GENERATED_NAME_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Normalize `name`, falling back to a generated name when nothing is left.
pub fn normalize_or_generate(name: Option<&str>) -> String {
    match name.map(normalize_name) {
        Some(normalized) if !normalized.is_empty() => normalized,
        _ => generate_name(),
    }
}
