//! Placeholder token helpers.
//!
//! Templates reference send-time values with `{name}` tokens. Admin-authored
//! templates sometimes use the doubled `{{name}}` form, which is recognised
//! by the scanner as well. CSS rule bodies (`{ color: #333 }`) never match
//! because a token must consist of a single identifier.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(
        r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}"
    )
    .expect("valid placeholder regex");
}

fn placeholder_name<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map_or("", |m| m.as_str())
}

/// Formats a variable name as its literal token, e.g. `user_name` -> `{user_name}`.
pub fn token(name: &str) -> String {
    format!("{{{}}}", name)
}

/// Builds a context in which every variable renders as its own token.
///
/// Rendering a template with this context keeps every substitution point
/// intact, so the result can be stored and rendered again at send time.
pub fn placeholder_context<S: AsRef<str>>(variables: &[S]) -> HashMap<String, String> {
    variables
        .iter()
        .map(|v| (v.as_ref().to_string(), token(v.as_ref())))
        .collect()
}

/// Returns the distinct placeholder names referenced by `text`, in first-seen order.
pub fn extract_placeholders(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(text) {
        let name = placeholder_name(&caps);
        if !seen.iter().any(|s: &String| s == name) {
            seen.push(name.to_string());
        }
    }
    seen
}

/// Replaces `{name}` and `{{name}}` tokens whose name is present in `context`.
///
/// Tokens without a context entry, or whose entry is the token itself, are
/// left exactly as written.
pub fn substitute(text: &str, context: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| {
            let name = placeholder_name(caps);
            match context.get(name) {
                Some(value) if *value != token(name) => value.clone(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}
