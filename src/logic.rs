//! Core behaviors shared by the HTTP handlers.
//!
//! This includes:
//!   - Assembling the learner view of a paper (numbered blanks, shuffled
//!     options, hidden originals withheld)
//!   - Assembling the answer-key view (expected text, references, weights)
//!   - Converting a grading record into the wire shape
//!
//! Everything here is a pure function of a paper snapshot (plus a grading
//! record); handlers own all state access.

use tracing::instrument;

use crate::domain::{Paper, Section};
use crate::numbering::{question_starts, question_total};
use crate::protocol::{
  BlankOut, BlankResultOut, ChoiceOut, GradeOut, KeyEntryOut, PaperKeyOut, PaperOut,
  SectionKeyOut, SectionOut, SectionResultOut, TranslationItemOut,
};
use crate::scanner;
use crate::scoring::{perfect_score, ScoreRecord};

/// Placeholder spliced where a blank marker stood in the learner view.
fn blank_placeholder(display_no: u32) -> String {
  format!("____({display_no})")
}

/// Learner view: global numbering applied, option order derived, hidden text
/// gone. Recomputed from content on every call, so edits and reorders are
/// reflected immediately.
#[instrument(level = "debug", skip(paper), fields(id = %paper.id))]
pub fn paper_view(paper: &Paper, version: u64) -> PaperOut {
  let starts = question_starts(&paper.sections);
  let sections = paper
    .sections
    .iter()
    .zip(starts)
    .map(|(section, start)| section_view(section, start))
    .collect();

  PaperOut {
    id: paper.id.clone(),
    name: paper.name.clone(),
    version,
    perfect_score: perfect_score(&paper.sections),
    question_total: question_total(&paper.sections),
    sections,
  }
}

fn section_view(section: &Section, start: u32) -> SectionOut {
  let rules = section.rules();

  let text = rules
    .scanned_text()
    .map(|t| scanner::rewrite(t, start, |b| blank_placeholder(b.display_no)));
  let blanks = rules
    .blanks(start)
    .into_iter()
    .map(|b| BlankOut {
      display_no: b.display_no,
      local_no: b.local_no,
      hint: b.hint,
      options: rules.options_for(b.local_no),
    })
    .collect();

  let mut out = SectionOut {
    id: section.id().clone(),
    kind: section.kind(),
    title: section.title().to_string(),
    start,
    question_count: rules.question_count(),
    text,
    blanks,
    option_pool: rules.option_pool(),
    passage: None,
    audio: None,
    body: None,
    prompt: None,
    questions: Vec::new(),
    items: Vec::new(),
    score: None,
  };

  match section {
    Section::Reading(d) => {
      out.passage = Some(d.passage.clone());
      out.questions = choice_views(&d.questions, start);
    }
    Section::Listening(d) => {
      out.audio = Some(d.audio.clone());
      out.questions = choice_views(&d.questions, start);
    }
    Section::Custom(d) => {
      // The answer key stays server-side; learners only see the body.
      out.body = Some(d.body.clone());
    }
    Section::Summary(d) => {
      out.passage = Some(d.passage.clone());
      out.score = Some(d.score);
    }
    Section::Translation(d) => {
      out.items = d
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| TranslationItemOut {
          display_no: start + i as u32,
          source: item.source.clone(),
          score: item.score,
        })
        .collect();
    }
    Section::Writing(d) => {
      out.prompt = Some(d.prompt.clone());
      out.score = Some(d.score);
    }
    Section::Fishing(_) | Section::Cloze(_) | Section::Grammar(_) | Section::Sentences(_) => {}
  }
  out
}

fn choice_views(questions: &[crate::domain::ChoiceQuestion], start: u32) -> Vec<ChoiceOut> {
  questions
    .iter()
    .enumerate()
    .map(|(i, q)| ChoiceOut {
      display_no: start + i as u32,
      prompt: q.prompt.clone(),
      choices: q.choices.clone(),
    })
    .collect()
}

/// Answer-key view: one entry per question with the machine-checked expected
/// text where there is one, the free-text reference where there is one, and
/// the point value either way.
#[instrument(level = "debug", skip(paper), fields(id = %paper.id))]
pub fn answer_key(paper: &Paper) -> PaperKeyOut {
  let starts = question_starts(&paper.sections);
  let sections = paper
    .sections
    .iter()
    .zip(starts)
    .map(|(section, start)| {
      let rules = section.rules();
      let answers = rules.correct_answers();
      let entries = (1..=rules.question_count())
        .map(|local_no| KeyEntryOut {
          display_no: start + local_no - 1,
          local_no,
          answer: answers
            .get((local_no - 1) as usize)
            .filter(|a| !a.trim().is_empty())
            .cloned(),
          reference: reference_for(section, local_no),
          score: rules.score_for(local_no),
        })
        .collect();
      SectionKeyOut {
        id: section.id().clone(),
        kind: section.kind(),
        title: section.title().to_string(),
        entries,
      }
    })
    .collect();

  PaperKeyOut {
    id: paper.id.clone(),
    name: paper.name.clone(),
    perfect_score: perfect_score(&paper.sections),
    sections,
  }
}

fn reference_for(section: &Section, local_no: u32) -> Option<String> {
  match section {
    Section::Translation(d) => d
      .items
      .get((local_no - 1) as usize)
      .map(|item| item.reference.clone())
      .filter(|r| !r.trim().is_empty()),
    // Hand-grading key: withheld from the learner view, shown here.
    Section::Custom(d) => {
      Some(d.key.clone()).filter(|k| !crate::util::strip_tags(k).trim().is_empty())
    }
    _ => None,
  }
}

/// Wire shape of a grading record, section results in paper order.
pub fn grade_view(paper: &Paper, record: &ScoreRecord) -> GradeOut {
  let sections = paper
    .sections
    .iter()
    .map(|section| SectionResultOut {
      section_id: section.id().clone(),
      results: record
        .per_section
        .get(section.id())
        .map(|by_no| {
          by_no
            .iter()
            .map(|(local_no, correct)| BlankResultOut { local_no: *local_no, correct: *correct })
            .collect()
        })
        .unwrap_or_default(),
    })
    .collect();

  GradeOut {
    paper_id: paper.id.clone(),
    perfect_score: record.perfect_score,
    total_score: record.total_score,
    sections,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{FishingData, GrammarData, Section};

  fn sample_paper() -> Paper {
    Paper {
      id: "p1".into(),
      name: "Sample".into(),
      sections: vec![
        Section::Grammar(GrammarData {
          id: "g1".into(),
          title: "Forms".into(),
          text: concat!(
            "<p>He <span data-blank>runs</span>. They ",
            "<span data-blank data-hint=\"be\">is/are</span>.</p>",
          )
          .into(),
        }),
        Section::Fishing(FishingData {
          id: "f1".into(),
          title: "Bank".into(),
          text: "<p><span data-blank>pollinate</span></p>".into(),
          distractors: vec!["migrate".into()],
        }),
      ],
    }
  }

  #[test]
  fn learner_view_numbers_and_withholds_originals() {
    let paper = sample_paper();
    let view = paper_view(&paper, 7);
    assert_eq!(view.version, 7);
    assert_eq!(view.perfect_score, 3);
    assert_eq!(view.question_total, 3);
    assert_eq!(view.sections[0].start, 1);
    assert_eq!(view.sections[1].start, 3);
    assert_eq!(view.sections[0].blanks.len(), 2);
    assert_eq!(view.sections[0].blanks[1].hint.as_deref(), Some("be"));

    let grammar_text = view.sections[0].text.as_deref().expect("text");
    assert!(grammar_text.contains("____(1)"));
    assert!(grammar_text.contains("____(2)"));
    assert!(!grammar_text.contains("runs"));
    assert!(!grammar_text.contains("is/are"));

    // The fishing pool shows the original word, mixed with distractors.
    let pool = view.sections[1].option_pool.as_ref().expect("pool");
    assert!(pool.contains(&"pollinate".to_string()));
    assert!(pool.contains(&"migrate".to_string()));
  }

  #[test]
  fn answer_key_lists_expected_text_in_order() {
    let paper = sample_paper();
    let key = answer_key(&paper);
    assert_eq!(key.perfect_score, 3);
    let grammar = &key.sections[0];
    assert_eq!(grammar.entries[0].answer.as_deref(), Some("runs"));
    assert_eq!(grammar.entries[1].answer.as_deref(), Some("is/are"));
    assert_eq!(grammar.entries[1].display_no, 2);
    let fishing = &key.sections[1];
    assert_eq!(fishing.entries[0].display_no, 3);
    assert_eq!(fishing.entries[0].answer.as_deref(), Some("pollinate"));
  }

  #[test]
  fn answer_key_carries_the_custom_grading_key() {
    use crate::domain::CustomData;

    let mut paper = sample_paper();
    paper.sections.push(Section::Custom(CustomData {
      id: "x1".into(),
      title: "Read aloud".into(),
      body: "<p>Read the passage to a partner.</p>".into(),
      key: "<p>Clear pronunciation, any order.</p>".into(),
    }));

    // Learners never see the key.
    let view = paper_view(&paper, 1);
    assert_eq!(view.sections[2].body.as_deref(), Some("<p>Read the passage to a partner.</p>"));
    assert!(view.sections[2].text.is_none());

    // The answer-key view does, as the hand-grading reference.
    let key = answer_key(&paper);
    let custom = &key.sections[2];
    assert_eq!(custom.entries.len(), 1);
    assert_eq!(custom.entries[0].answer, None);
    assert_eq!(
      custom.entries[0].reference.as_deref(),
      Some("<p>Clear pronunciation, any order.</p>"),
    );
  }

  #[test]
  fn grade_view_follows_paper_order() {
    use crate::answers::AnswerSheet;

    let paper = sample_paper();
    let mut sheet = AnswerSheet::new();
    sheet.set("g1", 1, "runs");
    let record = crate::scoring::grade(&paper.sections, &sheet.snapshot());
    let out = grade_view(&paper, &record);

    assert_eq!(out.total_score, 1);
    assert_eq!(out.sections[0].section_id, "g1");
    assert!(out.sections[0].results[0].correct);
    assert!(!out.sections[0].results[1].correct);
    assert_eq!(out.sections[1].results.len(), 1);
  }
}
