// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template variable interpolation

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

// ${VAR:-default} environment fallbacks, plain ${VAR} for the shell, {name} placeholders
#[allow(clippy::expect_used)]
static TEMPLATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$\{(\w+):-([^}]*)\}|\$\{[a-zA-Z_][a-zA-Z0-9_]*\}|\{([a-zA-Z_][a-zA-Z0-9_]*)\}",
    )
    .expect("constant regex pattern is valid")
});

/// Interpolate against the process environment.
///
/// See [`interpolate_with`].
pub fn interpolate(template: &str, vars: &BTreeMap<String, String>) -> String {
    interpolate_with(template, vars, |name| std::env::var(name).ok())
}

/// Interpolate `${VAR:-default}` from `env` and `{name}` from `vars`.
///
/// One pass over `template`: substituted text is never rescanned, so
/// values may contain braces. As in the shell, an empty `VAR` takes the
/// default. Unknown `{name}` placeholders are left as-is; plain `${VAR}`
/// is left for the shell.
pub fn interpolate_with<F>(template: &str, vars: &BTreeMap<String, String>, env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    TEMPLATE_PATTERN
        .replace_all(template, |caps: &regex::Captures| {
            if let (Some(var_name), Some(default_value)) = (caps.get(1), caps.get(2)) {
                return env(var_name.as_str())
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| default_value.as_str().to_string());
            }
            match caps.get(3) {
                Some(name) => vars
                    .get(name.as_str())
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string()),
                None => caps[0].to_string(),
            }
        })
        .to_string()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
