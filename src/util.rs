//! String helpers for prompt building and log output.

/// Substitute `{key}` placeholders. Keys without a value are left as written.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  pairs
    .iter()
    .fold(tpl.to_string(), |acc, (key, value)| acc.replace(&format!("{{{key}}}"), value))
}

/// Log-safe truncation for large strings, cut on a char boundary.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max { return s.to_string(); }
  let mut end = max;
  while !s.is_char_boundary(end) { end -= 1; }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}
