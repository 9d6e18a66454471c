//! Domain models used by the backend: question-section kinds, payloads, and papers.
//!
//! A `Paper` is an ordered, user-reorderable list of `Section`s. Each section
//! carries an opaque stable `id` assigned at creation; the answer store and the
//! numbering allocator key on that id and never on array position.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SectionId = String;

/// One question section of a paper. Closed tagged union: serde rejects unknown
/// tags at the boundary, and every dispatcher match over it is exhaustive.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Section {
  Fishing(FishingData),
  Cloze(ClozeData),
  Grammar(GrammarData),
  Sentences(SentencesData),
  Reading(ReadingData),
  Listening(ListeningData),
  Custom(CustomData),
  Summary(SummaryData),
  Translation(TranslationData),
  Writing(WritingData),
}

/// Kind tag, useful where only the discriminant matters (logs, DTOs, defaults).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
  Fishing,
  Cloze,
  Grammar,
  Sentences,
  Reading,
  Listening,
  Custom,
  Summary,
  Translation,
  Writing,
}

impl SectionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      SectionKind::Fishing => "fishing",
      SectionKind::Cloze => "cloze",
      SectionKind::Grammar => "grammar",
      SectionKind::Sentences => "sentences",
      SectionKind::Reading => "reading",
      SectionKind::Listening => "listening",
      SectionKind::Custom => "custom",
      SectionKind::Summary => "summary",
      SectionKind::Translation => "translation",
      SectionKind::Writing => "writing",
    }
  }
}

/// Word-bank fill-in: the text carries blank markers, the section carries a
/// shared pool of extra distractor words mixed with the hidden originals.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FishingData {
  pub id: SectionId,
  #[serde(default)] pub title: String,
  #[serde(default)] pub text: String,
  #[serde(default)] pub distractors: Vec<String>,
}

/// Cloze: each blank gets its own multiple-choice set. `options[i]` holds the
/// distractors for the (i+1)-th blank in document order; a missing entry means
/// the blank renders with just its answer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClozeData {
  pub id: SectionId,
  #[serde(default)] pub title: String,
  #[serde(default)] pub text: String,
  #[serde(default)] pub options: Vec<Vec<String>>,
}

/// Grammar fill-in: no options; a blank's hidden text may encode alternative
/// accepted forms separated by `/` (e.g. "is/are"), and the marker may carry a
/// `data-hint` attribute (typically the base form of the word).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GrammarData {
  pub id: SectionId,
  #[serde(default)] pub title: String,
  #[serde(default)] pub text: String,
}

/// Sentence restoration: sentence-sized blanks in a passage, plus distractor
/// sentences pooled with the removed originals (same pool model as fishing).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SentencesData {
  pub id: SectionId,
  #[serde(default)] pub title: String,
  #[serde(default)] pub text: String,
  #[serde(default)] pub distractors: Vec<String>,
}

/// Explicit multiple-choice question used by reading and listening sections.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChoiceQuestion {
  pub prompt: String,
  pub choices: Vec<String>,
  /// Index into `choices` in declared order. The expected answer is the
  /// choice *text*; grading never depends on position.
  pub correct: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReadingData {
  pub id: SectionId,
  #[serde(default)] pub title: String,
  #[serde(default)] pub passage: String,
  #[serde(default)] pub questions: Vec<ChoiceQuestion>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListeningData {
  pub id: SectionId,
  #[serde(default)] pub title: String,
  /// Opaque reference to the audio asset; storage/delivery is external.
  #[serde(default)] pub audio: String,
  #[serde(default)] pub questions: Vec<ChoiceQuestion>,
}

/// Raw teacher-authored content. Counts as one question iff the answer key has
/// any text content after tag stripping; always graded by hand.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomData {
  pub id: SectionId,
  #[serde(default)] pub title: String,
  #[serde(default)] pub body: String,
  #[serde(default)] pub key: String,
}

/// Free-text summary of a passage. Not auto-graded; `score` is the point value
/// it contributes to the perfect score.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SummaryData {
  pub id: SectionId,
  #[serde(default)] pub title: String,
  #[serde(default)] pub passage: String,
  #[serde(default = "default_free_text_score")] pub score: u32,
}

/// Translation items, each with its own point value (papers routinely weight
/// them differently), and a reference answer shown in the key view only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranslationItem {
  pub source: String,
  #[serde(default)] pub reference: String,
  #[serde(default = "default_free_text_score")] pub score: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranslationData {
  pub id: SectionId,
  #[serde(default)] pub title: String,
  #[serde(default)] pub items: Vec<TranslationItem>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WritingData {
  pub id: SectionId,
  #[serde(default)] pub title: String,
  #[serde(default)] pub prompt: String,
  #[serde(default = "default_free_text_score")] pub score: u32,
}

fn default_free_text_score() -> u32 {
  1
}

impl Section {
  pub fn id(&self) -> &SectionId {
    match self {
      Section::Fishing(d) => &d.id,
      Section::Cloze(d) => &d.id,
      Section::Grammar(d) => &d.id,
      Section::Sentences(d) => &d.id,
      Section::Reading(d) => &d.id,
      Section::Listening(d) => &d.id,
      Section::Custom(d) => &d.id,
      Section::Summary(d) => &d.id,
      Section::Translation(d) => &d.id,
      Section::Writing(d) => &d.id,
    }
  }

  pub fn title(&self) -> &str {
    match self {
      Section::Fishing(d) => &d.title,
      Section::Cloze(d) => &d.title,
      Section::Grammar(d) => &d.title,
      Section::Sentences(d) => &d.title,
      Section::Reading(d) => &d.title,
      Section::Listening(d) => &d.title,
      Section::Custom(d) => &d.title,
      Section::Summary(d) => &d.title,
      Section::Translation(d) => &d.title,
      Section::Writing(d) => &d.title,
    }
  }

  pub fn kind(&self) -> SectionKind {
    match self {
      Section::Fishing(_) => SectionKind::Fishing,
      Section::Cloze(_) => SectionKind::Cloze,
      Section::Grammar(_) => SectionKind::Grammar,
      Section::Sentences(_) => SectionKind::Sentences,
      Section::Reading(_) => SectionKind::Reading,
      Section::Listening(_) => SectionKind::Listening,
      Section::Custom(_) => SectionKind::Custom,
      Section::Summary(_) => SectionKind::Summary,
      Section::Translation(_) => SectionKind::Translation,
      Section::Writing(_) => SectionKind::Writing,
    }
  }

  /// Canonical empty instance of a kind, with a fresh stable id. New sections
  /// enter a paper through here; editors mutate them in place afterwards and
  /// the id survives every edit and reorder.
  pub fn default_of(kind: SectionKind) -> Section {
    let id = Uuid::new_v4().to_string();
    match kind {
      SectionKind::Fishing => Section::Fishing(FishingData {
        id,
        title: String::new(),
        text: String::new(),
        distractors: Vec::new(),
      }),
      SectionKind::Cloze => Section::Cloze(ClozeData {
        id,
        title: String::new(),
        text: String::new(),
        options: Vec::new(),
      }),
      SectionKind::Grammar => Section::Grammar(GrammarData {
        id,
        title: String::new(),
        text: String::new(),
      }),
      SectionKind::Sentences => Section::Sentences(SentencesData {
        id,
        title: String::new(),
        text: String::new(),
        distractors: Vec::new(),
      }),
      SectionKind::Reading => Section::Reading(ReadingData {
        id,
        title: String::new(),
        passage: String::new(),
        questions: Vec::new(),
      }),
      SectionKind::Listening => Section::Listening(ListeningData {
        id,
        title: String::new(),
        audio: String::new(),
        questions: Vec::new(),
      }),
      SectionKind::Custom => Section::Custom(CustomData {
        id,
        title: String::new(),
        body: String::new(),
        key: String::new(),
      }),
      SectionKind::Summary => Section::Summary(SummaryData {
        id,
        title: String::new(),
        passage: String::new(),
        score: default_free_text_score(),
      }),
      SectionKind::Translation => Section::Translation(TranslationData {
        id,
        title: String::new(),
        items: Vec::new(),
      }),
      SectionKind::Writing => Section::Writing(WritingData {
        id,
        title: String::new(),
        prompt: String::new(),
        score: default_free_text_score(),
      }),
    }
  }
}

/// A paper: named, ordered sections. Version stamps live in the store, not
/// here, so a paper value stays a plain in-memory snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Paper {
  pub id: String,
  pub name: String,
  #[serde(default)] pub sections: Vec<Section>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_sections_get_distinct_ids() {
    let a = Section::default_of(SectionKind::Grammar);
    let b = Section::default_of(SectionKind::Grammar);
    assert_ne!(a.id(), b.id());
    assert_eq!(a.kind(), SectionKind::Grammar);
  }

  #[test]
  fn section_tag_round_trips_through_serde() {
    let s = Section::default_of(SectionKind::Reading);
    let json = serde_json::to_value(&s).expect("serialize");
    assert_eq!(json["type"], "reading");
    let back: Section = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back.kind(), SectionKind::Reading);
  }

  #[test]
  fn unknown_kind_tag_is_rejected() {
    let res: Result<Section, _> =
      serde_json::from_str(r#"{"type":"karaoke","id":"x"}"#);
    assert!(res.is_err());
  }
}
