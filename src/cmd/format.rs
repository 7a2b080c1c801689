/*!
format.rs

Output formatting for `hipchat`.

  - Results go to stdout as pretty-printed JSON, never colored.
  - Diagnostics go to stderr; colored unless NO_COLOR is set or stderr is
    not a terminal.

Public API Summary:
  - StyleOptions::detect() -> StyleOptions
  - color(role, text, &StyleOptions) -> String
  - render_result(&Value) -> String
  - error_line(msg, &StyleOptions) -> String
*/

use std::io::IsTerminal;

use serde_json::Value;

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    /// Style for stderr diagnostics.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        StyleOptions {
            use_color: !no_color && std::io::stderr().is_terminal(),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Color                                                                      */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Error => "38;5;196", // red
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

/* -------------------------------------------------------------------------- */
/* Rendering                                                                  */
/* -------------------------------------------------------------------------- */

/// Pretty JSON for a returned value.
pub fn render_result(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// `error: <msg>` with the prefix colored.
pub fn error_line(msg: impl AsRef<str>, style: &StyleOptions) -> String {
    format!("{} {}", color(Role::Error, "error:", style), msg.as_ref())
}

/// Secondary hint line shown under usage errors.
pub fn hint_line(msg: impl AsRef<str>, style: &StyleOptions) -> String {
    color(Role::Dim, msg, style)
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                       */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_style_has_no_escapes() {
        let s = error_line("boom", &StyleOptions { use_color: false });
        assert_eq!(s, "error: boom");
    }

    #[test]
    fn colored_error_prefix() {
        let style = StyleOptions { use_color: true };
        let s = error_line("boom", &style);
        assert!(s.starts_with("\x1b[38;5;196merror:\x1b[0m"));
        assert_eq!(hint_line("x", &style), "\x1b[2mx\x1b[0m");
    }

    #[test]
    fn render_result_is_pretty() {
        let out = render_result(&json!({"items": [1]}));
        assert_eq!(out, "{\n  \"items\": [\n    1\n  ]\n}");
        assert_eq!(render_result(&Value::Null), "null");
    }
}
