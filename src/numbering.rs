//! Global question numbering over a paper's section order.
//!
//! Always recomputed from the current section list: inserting, deleting, or
//! reordering sections renumbers everything downstream on the next access,
//! with no cache to invalidate.

use crate::domain::Section;

/// Running left fold of question counts: `starts[0] == 1`,
/// `starts[i] == starts[i-1] + count(sections[i-1])`.
pub fn question_starts(sections: &[Section]) -> Vec<u32> {
  let mut starts = Vec::with_capacity(sections.len());
  let mut next = 1u32;
  for section in sections {
    starts.push(next);
    next += section.rules().question_count();
  }
  starts
}

/// Total question count of the paper.
pub fn question_total(sections: &[Section]) -> u32 {
  sections.iter().map(|s| s.rules().question_count()).sum()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{GrammarData, ReadingData, Section, SectionKind};

  fn grammar_with_blanks(n: usize) -> Section {
    let text: String = (0..n).map(|i| format!("<span data-blank>w{i}</span> ")).collect();
    Section::Grammar(GrammarData { id: format!("g{n}"), title: String::new(), text })
  }

  #[test]
  fn starts_fold_over_counts() {
    // Counts [2, 0, 3] -> starts [1, 3, 3].
    let sections = vec![
      grammar_with_blanks(2),
      Section::Reading(ReadingData {
        id: "r0".into(),
        title: String::new(),
        passage: String::new(),
        questions: vec![],
      }),
      grammar_with_blanks(3),
    ];
    assert_eq!(question_starts(&sections), vec![1, 3, 3]);
    assert_eq!(question_total(&sections), 5);
  }

  #[test]
  fn empty_paper_has_no_starts() {
    assert!(question_starts(&[]).is_empty());
    assert_eq!(question_total(&[]), 0);
  }

  #[test]
  fn reordering_shifts_starts_only() {
    let mut sections = vec![grammar_with_blanks(2), grammar_with_blanks(3)];
    assert_eq!(question_starts(&sections), vec![1, 3]);
    sections.swap(0, 1);
    assert_eq!(question_starts(&sections), vec![1, 4]);
    // Local numbering is per section and untouched by the swap.
    assert_eq!(sections[0].rules().question_count(), 3);
  }

  #[test]
  fn default_sections_count_their_kind() {
    let sections = vec![
      Section::default_of(SectionKind::Cloze),    // no text -> 0
      Section::default_of(SectionKind::Summary),  // free text -> 1
      Section::default_of(SectionKind::Custom),   // empty key -> 0
    ];
    assert_eq!(question_starts(&sections), vec![1, 1, 2]);
  }
}
