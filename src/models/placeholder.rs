//! Sentinel values used by definition templates
//!
//! Templates ship with a "please fill in" token in every slot an author is
//! expected to complete. A slot still holding the token is treated exactly
//! like an empty one. Normalization happens once at parse time; the helpers
//! here are also used by record accessors so hand-built records behave the
//! same way.

/// "Please fill in" placeholder left in unfinished templates
pub const PLACEHOLDER: &str = "[请填写]";

/// Literal "unspecified" marker used in data source lists
pub const UNSPECIFIED: &str = "未指定";

/// Remove every placeholder token from `value` and trim the result.
///
/// # Example
///
/// ```rust
/// use dw_definition_sdk::models::strip_placeholder;
///
/// assert_eq!(strip_placeholder("张三 [请填写]"), "张三");
/// assert_eq!(strip_placeholder("[请填写]"), "");
/// ```
pub fn strip_placeholder(value: &str) -> String {
    value.replace(PLACEHOLDER, "").trim().to_string()
}

/// Whether a value is empty or still the fill-in placeholder. Used for
/// single-valued slots such as the owner, where "unspecified" is a real
/// answer.
pub fn is_unfilled(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == PLACEHOLDER
}

/// Whether a value carries no real content: empty, whitespace, the
/// placeholder, or the "unspecified" marker.
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == PLACEHOLDER || trimmed == UNSPECIFIED
}
