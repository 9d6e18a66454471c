//! Small utility helpers used across modules.

/// Text content of a sanitized rich-text fragment: tags removed, the handful
/// of entities our editor emits decoded. Used for "does this field actually
/// say anything" checks, not for rendering.
pub fn strip_tags(html: &str) -> String {
  let mut out = String::with_capacity(html.len());
  let mut in_tag = false;
  for ch in html.chars() {
    match ch {
      '<' => in_tag = true,
      '>' => in_tag = false,
      c if !in_tag => out.push(c),
      _ => {}
    }
  }
  decode_entities(&out)
}

/// Decode the entities the sanitizer is allowed to produce. Anything else is
/// passed through verbatim.
pub fn decode_entities(s: &str) -> String {
  s.replace("&nbsp;", " ")
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&quot;", "\"")
    .replace("&#39;", "'")
    .replace("&amp;", "&")
}
