//! Blank-marker scanning over rich-text section content.
//!
//! The editor marks a blank with a single inline convention:
//!   `<span data-blank>hidden text</span>`
//! optionally carrying `data-hint="…"`. This module recognizes exactly that
//! convention — it is not a templating engine. Scanning is pure and
//! idempotent: the same content and start number always yield the same
//! `(display_no, local_no, original)` sequence, which is what lets numbering
//! and grading replay it independently without shared state.

use crate::util::decode_entities;

pub const MARKER_ATTR: &str = "data-blank";
const HINT_ATTR: &str = "data-hint=\"";

/// One blank, derived from content in document order. Never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blank {
  /// 1-based within the whole paper: `start + local_no - 1`.
  pub display_no: u32,
  /// 1-based within the owning section.
  pub local_no: u32,
  /// The hidden text. May encode `/`-separated alternatives (grammar).
  pub original: String,
  pub hint: Option<String>,
}

/// Enumerate blanks without touching the content (answer sheets, counting,
/// grading). Zero output for marker-free content.
pub fn enumerate(html: &str, start: u32) -> Vec<Blank> {
  let mut found = Vec::new();
  walk(html, start, &mut |b| {
    found.push(b.clone());
    None
  });
  found
}

/// Rewrite pass for rendering: the callback receives each blank and returns
/// the replacement node text to substitute at the marker's position. The
/// engine itself never invents markup; it only splices what the caller hands
/// back.
pub fn rewrite(html: &str, start: u32, mut replace: impl FnMut(&Blank) -> String) -> String {
  walk(html, start, &mut |b| Some(replace(b)))
}

/// Single scanning core shared by both entry points. The callback may return
/// a replacement (rewrite mode) or `None` (enumerate mode, content kept).
///
/// Malformed markers (no matching close tag) are skipped silently: the marker
/// text passes through untouched and numbering of later well-formed blanks is
/// unaffected.
fn walk(html: &str, start: u32, visit: &mut dyn FnMut(&Blank) -> Option<String>) -> String {
  let mut out = String::with_capacity(html.len());
  let mut rest = html;
  let mut local_no: u32 = 0;

  while let Some(open_at) = rest.find('<') {
    let (before, from_tag) = rest.split_at(open_at);
    out.push_str(before);

    let Some(tag_end) = from_tag.find('>') else {
      // Dangling '<' at the end of the fragment; emit as-is.
      out.push_str(from_tag);
      return out;
    };
    let tag = &from_tag[..=tag_end];
    let after_tag = &from_tag[tag_end + 1..];

    if !is_marker_open(tag) {
      out.push_str(tag);
      rest = after_tag;
      continue;
    }

    let Some((inner_len, close_len)) = find_marker_close(after_tag) else {
      // Unclosed marker: not a blank. Keep the raw tag and move on.
      out.push_str(tag);
      rest = after_tag;
      continue;
    };
    let inner = &after_tag[..inner_len];

    local_no += 1;
    let blank = Blank {
      display_no: start + local_no - 1,
      local_no,
      original: first_text(inner),
      hint: hint_attr(tag),
    };

    match visit(&blank) {
      Some(replacement) => out.push_str(&replacement),
      None => {
        out.push_str(tag);
        out.push_str(inner);
        out.push_str(&after_tag[inner_len..inner_len + close_len]);
      }
    }
    rest = &after_tag[inner_len + close_len..];
  }

  out.push_str(rest);
  out
}

/// True for an opening `<span …>` whose attribute list contains the marker
/// attribute as its own token (bare or valued).
fn is_marker_open(tag: &str) -> bool {
  let body = tag.trim_start_matches('<').trim_end_matches('>').trim_end_matches('/');
  let mut parts = body.split_whitespace();
  if parts.next() != Some("span") {
    return false;
  }
  parts.any(|attr| attr == MARKER_ATTR || attr.starts_with("data-blank="))
}

/// Offset and byte length of the matching `</span>` (counting nested spans),
/// i.e. the marker's inner content ends at `.0` and the tag itself spans the
/// next `.1` bytes. `None` when the marker never closes.
fn find_marker_close(after_open: &str) -> Option<(usize, usize)> {
  let mut depth = 1usize;
  let mut pos = 0usize;
  let rest = after_open;
  while let Some(lt) = rest[pos..].find('<') {
    let at = pos + lt;
    let tail = &rest[at..];
    if let Some(close_len) = close_tag_len(tail) {
      depth -= 1;
      if depth == 0 {
        return Some((at, close_len));
      }
      pos = at + close_len;
    } else if tail.starts_with("<span") {
      depth += 1;
      pos = at + "<span".len();
    } else {
      pos = at + 1;
    }
  }
  None
}

/// Byte length of a complete `</span>` (whitespace before `>` allowed) at the
/// start of `tail`. A truncated close tag is not a close tag.
fn close_tag_len(tail: &str) -> Option<usize> {
  let body = tail.strip_prefix("</span")?;
  let trimmed = body.trim_start();
  if !trimmed.starts_with('>') {
    return None;
  }
  Some(tail.len() - trimmed.len() + 1)
}

/// First text node of the marker's content. The sanitizer guarantees a marker
/// wraps exactly the hidden text, but editors sometimes leave one styled
/// inline element inside (`<span data-blank><b>word</b></span>`); skipping
/// leading tags and reading up to the next tag unwraps that case.
fn first_text(inner: &str) -> String {
  let mut rest = inner;
  loop {
    let trimmed = rest.trim_start();
    if !trimmed.starts_with('<') {
      let text = match trimmed.find('<') {
        Some(end) => &trimmed[..end],
        None => trimmed,
      };
      return decode_entities(text.trim());
    }
    match trimmed.find('>') {
      Some(end) => rest = &trimmed[end + 1..],
      None => return String::new(),
    }
  }
}

/// Optional `data-hint="…"` on the opening tag.
fn hint_attr(tag: &str) -> Option<String> {
  let at = tag.find(HINT_ATTR)?;
  let value = &tag[at + HINT_ATTR.len()..];
  let end = value.find('"')?;
  let hint = decode_entities(&value[..end]);
  if hint.is_empty() { None } else { Some(hint) }
}
