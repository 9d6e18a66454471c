//! Scoring and verification: a pure function of (current sections, submitted
//! snapshot). Re-running it reproduces the same record, which is what lets
//! revise mode redisplay grading without asking anyone again.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::answers::SubmittedAnswers;
use crate::domain::{Section, SectionId};

/// Derived grading result; never stored.
#[derive(Clone, Debug, Serialize)]
pub struct ScoreRecord {
  pub perfect_score: u32,
  pub total_score: u32,
  pub per_section: HashMap<SectionId, BTreeMap<u32, bool>>,
}

/// Maximum attainable score: Σ per-question values, honoring per-item weight
/// overrides (translation) and free-text point values.
pub fn perfect_score(sections: &[Section]) -> u32 {
  sections.iter().map(|s| s.rules().perfect_score()).sum()
}

/// Per-blank correctness, total over the union of current blanks and
/// submitted keys. Unanswered blanks and stale entries (local numbers beyond
/// the current question count) both grade `false`; nothing here can fail.
pub fn check_answers(
  sections: &[Section],
  submitted: &SubmittedAnswers,
) -> HashMap<SectionId, BTreeMap<u32, bool>> {
  let mut per_section = HashMap::with_capacity(sections.len());
  for section in sections {
    let rules = section.rules();
    let expected = rules.correct_answers();
    let count = rules.question_count();

    let mut results = BTreeMap::new();
    for local_no in 1..=count {
      results.insert(local_no, false);
    }
    for local_no in submitted.local_nos(section.id()) {
      results.entry(local_no).or_insert(false);
    }

    for (local_no, correct) in results.iter_mut() {
      let want = expected.get((*local_no as usize).wrapping_sub(1)).map(String::as_str);
      let got = submitted.get(section.id(), *local_no);
      *correct = rules.is_correct(want, got);
    }
    per_section.insert(section.id().clone(), results);
  }
  per_section
}

/// Σ per-question values over the correctly answered pairs. Always ≤ the
/// perfect score, since only current questions can grade `true`.
pub fn total_score(sections: &[Section], submitted: &SubmittedAnswers) -> u32 {
  let checked = check_answers(sections, submitted);
  let mut total = 0u32;
  for section in sections {
    if let Some(results) = checked.get(section.id()) {
      let rules = section.rules();
      for (local_no, correct) in results {
        if *correct {
          total += rules.score_for(*local_no);
        }
      }
    }
  }
  total
}

/// Full grading pass in one call.
pub fn grade(sections: &[Section], submitted: &SubmittedAnswers) -> ScoreRecord {
  ScoreRecord {
    perfect_score: perfect_score(sections),
    total_score: total_score(sections, submitted),
    per_section: check_answers(sections, submitted),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::answers::AnswerSheet;
  use crate::domain::{FishingData, GrammarData, Section, SummaryData};

  /// The worked scenario: one grammar section with two blanks ("runs",
  /// "is/are"), one fishing section with one blank plus two distractors.
  fn scenario() -> Vec<Section> {
    vec![
      Section::Grammar(GrammarData {
        id: "sec-grammar".into(),
        title: String::new(),
        text: concat!(
          "<p>He <span data-blank>runs</span> daily. They ",
          "<span data-blank>is/are</span> here.</p>",
        )
        .into(),
      }),
      Section::Fishing(FishingData {
        id: "sec-fishing".into(),
        title: String::new(),
        text: "<p>Bees <span data-blank>pollinate</span> flowers.</p>".into(),
        distractors: vec!["hibernate".into(), "migrate".into()],
      }),
    ]
  }

  #[test]
  fn full_marks_when_everything_is_right() {
    let sections = scenario();
    assert_eq!(crate::numbering::question_starts(&sections), vec![1, 3]);

    let mut sheet = AnswerSheet::new();
    sheet.set("sec-grammar", 1, "runs");
    sheet.set("sec-grammar", 2, "are");
    sheet.set("sec-fishing", 1, "pollinate");
    let record = grade(&sections, &sheet.snapshot());

    assert_eq!(record.perfect_score, 3);
    assert_eq!(record.total_score, 3);
    assert!(record.per_section["sec-grammar"][&2]);
  }

  #[test]
  fn wrong_and_missing_answers_lose_their_points() {
    let sections = scenario();
    let mut sheet = AnswerSheet::new();
    sheet.set("sec-grammar", 1, "runs");
    sheet.set("sec-grammar", 2, "was"); // not among is/are
    let record = grade(&sections, &sheet.snapshot());

    assert_eq!(record.total_score, 1);
    assert!(record.per_section["sec-grammar"][&1]);
    assert!(!record.per_section["sec-grammar"][&2]);
    // Unanswered fishing blank still appears, graded false.
    assert!(!record.per_section["sec-fishing"][&1]);
  }

  #[test]
  fn stale_answer_grades_false_without_error() {
    let sections = scenario();
    let mut sheet = AnswerSheet::new();
    // Grammar section currently has 2 blanks; 5 is left over from an edit.
    sheet.set("sec-grammar", 5, "orphan");
    let record = grade(&sections, &sheet.snapshot());
    assert_eq!(record.per_section["sec-grammar"][&5], false);
    assert_eq!(record.total_score, 0);
  }

  #[test]
  fn answers_survive_section_reordering() {
    let mut sections = scenario();
    let mut sheet = AnswerSheet::new();
    sheet.set("sec-grammar", 1, "runs");
    sheet.set("sec-grammar", 2, "are");
    sheet.set("sec-fishing", 1, "pollinate");
    let submitted = sheet.snapshot();

    let before = grade(&sections, &submitted);
    sections.swap(0, 1);
    let after = grade(&sections, &submitted);

    // Display numbering moved; per-section results and scores did not.
    assert_eq!(crate::numbering::question_starts(&sections), vec![1, 2]);
    assert_eq!(before.total_score, after.total_score);
    assert_eq!(before.per_section, after.per_section);
  }

  #[test]
  fn total_never_exceeds_perfect() {
    let mut sections = scenario();
    sections.push(Section::Summary(SummaryData {
      id: "sec-summary".into(),
      title: String::new(),
      passage: "<p>…</p>".into(),
      score: 10,
    }));
    let mut sheet = AnswerSheet::new();
    sheet.set("sec-grammar", 1, "runs");
    sheet.set("sec-grammar", 2, "are");
    sheet.set("sec-fishing", 1, "pollinate");
    sheet.set("sec-summary", 1, "a fine summary"); // free text, not auto-graded
    let record = grade(&sections, &sheet.snapshot());

    assert_eq!(record.perfect_score, 13);
    assert_eq!(record.total_score, 3);
    assert!(record.total_score <= record.perfect_score);
    assert_eq!(record.per_section["sec-summary"][&1], false);
  }

  #[test]
  fn grading_is_replayable() {
    let sections = scenario();
    let mut sheet = AnswerSheet::new();
    sheet.set("sec-grammar", 2, "is");
    let submitted = sheet.snapshot();
    let a = grade(&sections, &submitted);
    let b = grade(&sections, &submitted);
    assert_eq!(a.total_score, b.total_score);
    assert_eq!(a.per_section, b.per_section);
  }
}
