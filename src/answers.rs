//! Section-scoped answer storage.
//!
//! Pure key-value semantics over `(section_id, local_no)`: no validation, no
//! correctness awareness. The store holds literal answer text — never a
//! positional letter — so grading is independent of shuffle order and keeps
//! working if the shuffle construction ever changes. Entries for blanks that
//! no longer exist are harmless; readers treat a dangling key as any other
//! miss.
//!
//! Callers own a sheet per paper session and pass snapshots around explicitly;
//! there is no ambient global store.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::SectionId;

/// Live, still-editable answers for one paper session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnswerSheet {
  entries: HashMap<SectionId, BTreeMap<u32, String>>,
}

impl AnswerSheet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set(&mut self, section_id: &str, local_no: u32, text: impl Into<String>) {
    self
      .entries
      .entry(section_id.to_string())
      .or_default()
      .insert(local_no, text.into());
  }

  pub fn get(&self, section_id: &str, local_no: u32) -> Option<&str> {
    self
      .entries
      .get(section_id)
      .and_then(|by_no| by_no.get(&local_no))
      .map(String::as_str)
  }

  pub fn clear_section(&mut self, section_id: &str) {
    self.entries.remove(section_id);
  }

  pub fn is_empty(&self) -> bool {
    self.entries.values().all(BTreeMap::is_empty)
  }

  /// Immutable snapshot taken at grading time. The live sheet stays editable;
  /// the snapshot never changes afterwards.
  pub fn snapshot(&self) -> SubmittedAnswers {
    SubmittedAnswers { entries: self.entries.clone() }
  }
}

/// Frozen answers as submitted. Read-only by construction.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmittedAnswers {
  entries: HashMap<SectionId, BTreeMap<u32, String>>,
}

impl SubmittedAnswers {
  pub fn get(&self, section_id: &str, local_no: u32) -> Option<&str> {
    self
      .entries
      .get(section_id)
      .and_then(|by_no| by_no.get(&local_no))
      .map(String::as_str)
  }

  /// Submitted local numbers for a section, ascending. Used to make grading
  /// total over stale keys as well as current blanks.
  pub fn local_nos(&self, section_id: &str) -> Vec<u32> {
    self
      .entries
      .get(section_id)
      .map(|by_no| by_no.keys().copied().collect())
      .unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn set_get_round_trip() {
    let mut sheet = AnswerSheet::new();
    assert!(sheet.is_empty());
    sheet.set("sec-a", 1, "runs");
    sheet.set("sec-a", 2, "are");
    sheet.set("sec-b", 1, "harvest");
    assert_eq!(sheet.get("sec-a", 2), Some("are"));
    assert_eq!(sheet.get("sec-b", 1), Some("harvest"));
    assert_eq!(sheet.get("sec-b", 2), None);
    assert_eq!(sheet.get("missing", 1), None);
  }

  #[test]
  fn last_write_wins() {
    let mut sheet = AnswerSheet::new();
    sheet.set("sec-a", 1, "first try");
    sheet.set("sec-a", 1, "second try");
    assert_eq!(sheet.get("sec-a", 1), Some("second try"));
  }

  #[test]
  fn snapshot_is_detached_from_the_live_sheet() {
    let mut sheet = AnswerSheet::new();
    sheet.set("sec-a", 1, "before");
    let submitted = sheet.snapshot();
    sheet.set("sec-a", 1, "after");
    sheet.set("sec-a", 2, "new");
    assert_eq!(submitted.get("sec-a", 1), Some("before"));
    assert_eq!(submitted.get("sec-a", 2), None);
    assert_eq!(submitted.local_nos("sec-a"), vec![1]);
  }

  #[test]
  fn dangling_keys_are_plain_storage() {
    let mut sheet = AnswerSheet::new();
    // Answer to a blank that (no longer) exists: stored and readable anyway.
    sheet.set("sec-a", 99, "stale");
    assert_eq!(sheet.get("sec-a", 99), Some("stale"));
    sheet.clear_section("sec-a");
    assert_eq!(sheet.get("sec-a", 99), None);
  }
}
