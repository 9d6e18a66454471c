//! Per-kind question rules behind one uniform contract.
//!
//! Each section payload implements `SectionRules`; `Section::rules()` is the
//! single dispatch point. The union is closed, so the compiler forces that
//! match to grow when a kind is added — nothing else in the engine changes.
//!
//! Defaults cover the simple blank-fill kinds: question count and correct
//! answers come from scanning the payload's text for markers, grading is a
//! trimmed exact match worth one point. Kinds built on explicit question
//! lists or free text override what they need.

use crate::domain::{
  ClozeData, CustomData, FishingData, GrammarData, ListeningData, ChoiceQuestion,
  ReadingData, Section, SentencesData, SummaryData, TranslationData, WritingData,
};
use crate::scanner::{self, Blank};
use crate::shuffle;
use crate::util::strip_tags;

pub trait SectionRules {
  /// The rich-text field scanned for blank markers, when the kind has one.
  fn scanned_text(&self) -> Option<&str> {
    None
  }

  /// Blanks in document order, globally numbered from `start`.
  fn blanks(&self, start: u32) -> Vec<Blank> {
    match self.scanned_text() {
      Some(text) => scanner::enumerate(text, start),
      None => Vec::new(),
    }
  }

  /// How many questions this section contributes to the paper numbering.
  fn question_count(&self) -> u32 {
    self.blanks(1).len() as u32
  }

  /// Expected answer per question, in document order. Empty for kinds that
  /// are graded by hand; grading then defaults every entry to incorrect.
  fn correct_answers(&self) -> Vec<String> {
    self.blanks(1).into_iter().map(|b| b.original).collect()
  }

  /// Total over absent operands: a stale or missing entry on either side is
  /// simply wrong, never a fault.
  fn is_correct(&self, expected: Option<&str>, submitted: Option<&str>) -> bool {
    match (expected, submitted) {
      (Some(e), Some(s)) => {
        let e = e.trim();
        !e.is_empty() && e == s.trim()
      }
      _ => false,
    }
  }

  /// Point value of one question. Kinds with per-item weights override.
  fn score_for(&self, _local_no: u32) -> u32 {
    1
  }

  fn perfect_score(&self) -> u32 {
    (1..=self.question_count()).map(|n| self.score_for(n)).sum()
  }

  /// Section-wide option pool (word bank / sentence pool), already shuffled.
  fn option_pool(&self) -> Option<Vec<String>> {
    None
  }

  /// Per-question option set. Presentation only — grading always compares
  /// against the unshuffled original text.
  fn options_for(&self, _local_no: u32) -> Option<Vec<String>> {
    None
  }
}

impl Section {
  /// The one registry lookup. Exhaustive by construction; an unknown kind is
  /// unrepresentable past the serde boundary.
  pub fn rules(&self) -> &dyn SectionRules {
    match self {
      Section::Fishing(d) => d,
      Section::Cloze(d) => d,
      Section::Grammar(d) => d,
      Section::Sentences(d) => d,
      Section::Reading(d) => d,
      Section::Listening(d) => d,
      Section::Custom(d) => d,
      Section::Summary(d) => d,
      Section::Translation(d) => d,
      Section::Writing(d) => d,
    }
  }
}

impl SectionRules for FishingData {
  fn scanned_text(&self) -> Option<&str> {
    Some(&self.text)
  }

  fn option_pool(&self) -> Option<Vec<String>> {
    let answers = self.correct_answers();
    if answers.is_empty() && self.distractors.is_empty() {
      return None;
    }
    Some(shuffle::shuffled_pool(&answers, &self.distractors))
  }
}

impl SectionRules for ClozeData {
  fn scanned_text(&self) -> Option<&str> {
    Some(&self.text)
  }

  fn options_for(&self, local_no: u32) -> Option<Vec<String>> {
    let answers = self.correct_answers();
    let answer = answers.get(local_no.checked_sub(1)? as usize)?;
    let distractors = self
      .options
      .get((local_no - 1) as usize)
      .cloned()
      .unwrap_or_default();
    Some(shuffle::shuffled_pool(std::slice::from_ref(answer), &distractors))
  }
}

impl SectionRules for GrammarData {
  fn scanned_text(&self) -> Option<&str> {
    Some(&self.text)
  }

  /// The hidden text may list alternative accepted forms: "is/are" accepts
  /// either word. Alternatives are trimmed individually so authors can write
  /// "is / are".
  fn is_correct(&self, expected: Option<&str>, submitted: Option<&str>) -> bool {
    match (expected, submitted) {
      (Some(e), Some(s)) => {
        let given = s.trim();
        !given.is_empty()
          && e.split('/').any(|alt| {
            let alt = alt.trim();
            !alt.is_empty() && alt == given
          })
      }
      _ => false,
    }
  }
}

impl SectionRules for SentencesData {
  fn scanned_text(&self) -> Option<&str> {
    Some(&self.text)
  }

  fn option_pool(&self) -> Option<Vec<String>> {
    let answers = self.correct_answers();
    if answers.is_empty() && self.distractors.is_empty() {
      return None;
    }
    Some(shuffle::shuffled_pool(&answers, &self.distractors))
  }
}

/// Shared rules for the two explicit choice-question kinds.
fn choice_answers(questions: &[ChoiceQuestion]) -> Vec<String> {
  questions
    .iter()
    .map(|q| q.choices.get(q.correct).cloned().unwrap_or_default())
    .collect()
}

fn choice_options(questions: &[ChoiceQuestion], local_no: u32) -> Option<Vec<String>> {
  let q = questions.get(local_no.checked_sub(1)? as usize)?;
  // Declared order: exam choice questions are lettered as authored. Grading
  // stores the choice text, so order never affects correctness.
  Some(q.choices.clone())
}

impl SectionRules for ReadingData {
  fn question_count(&self) -> u32 {
    self.questions.len() as u32
  }

  fn correct_answers(&self) -> Vec<String> {
    choice_answers(&self.questions)
  }

  fn options_for(&self, local_no: u32) -> Option<Vec<String>> {
    choice_options(&self.questions, local_no)
  }
}

impl SectionRules for ListeningData {
  fn question_count(&self) -> u32 {
    self.questions.len() as u32
  }

  fn correct_answers(&self) -> Vec<String> {
    choice_answers(&self.questions)
  }

  fn options_for(&self, local_no: u32) -> Option<Vec<String>> {
    choice_options(&self.questions, local_no)
  }
}

impl SectionRules for CustomData {
  /// One question iff the answer key says anything once tags are stripped.
  fn question_count(&self) -> u32 {
    if strip_tags(&self.key).trim().is_empty() { 0 } else { 1 }
  }

  /// Graded by hand; contributes no machine-checkable answers.
  fn correct_answers(&self) -> Vec<String> {
    Vec::new()
  }
}

impl SectionRules for SummaryData {
  fn question_count(&self) -> u32 {
    1
  }

  fn correct_answers(&self) -> Vec<String> {
    Vec::new()
  }

  fn score_for(&self, _local_no: u32) -> u32 {
    self.score
  }
}

impl SectionRules for TranslationData {
  fn question_count(&self) -> u32 {
    self.items.len() as u32
  }

  /// Reference answers exist for the key view but are free text — never fed
  /// to the exact-match comparator.
  fn correct_answers(&self) -> Vec<String> {
    Vec::new()
  }

  /// Items carry individual point values; the perfect score sums them.
  fn score_for(&self, local_no: u32) -> u32 {
    local_no
      .checked_sub(1)
      .and_then(|i| self.items.get(i as usize))
      .map(|item| item.score)
      .unwrap_or(0)
  }
}

impl SectionRules for WritingData {
  fn question_count(&self) -> u32 {
    1
  }

  fn correct_answers(&self) -> Vec<String> {
    Vec::new()
  }

  fn score_for(&self, _local_no: u32) -> u32 {
    self.score
  }
}
