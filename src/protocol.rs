//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.
//!
//! The learner-facing `PaperOut` never contains hidden originals; those only
//! appear in `PaperKeyOut`.

use serde::{Deserialize, Serialize};

use crate::domain::{Section, SectionKind};

/// Learner view of a paper: numbered sections, blanks with hints and shuffled
/// options, hidden text withheld.
#[derive(Debug, Serialize)]
pub struct PaperOut {
    pub id: String,
    pub name: String,
    pub version: u64,
    #[serde(rename = "perfectScore")]
    pub perfect_score: u32,
    #[serde(rename = "questionTotal")]
    pub question_total: u32,
    pub sections: Vec<SectionOut>,
}

#[derive(Debug, Serialize)]
pub struct SectionOut {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub title: String,
    /// Global number of this section's first question.
    pub start: u32,
    #[serde(rename = "questionCount")]
    pub question_count: u32,

    /// Rich text with each marker replaced by a numbered placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blanks: Vec<BlankOut>,
    /// Section-wide word/sentence pool (fishing, sentences), pre-shuffled.
    #[serde(rename = "optionPool", skip_serializing_if = "Option::is_none")]
    pub option_pool: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<ChoiceOut>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TranslationItemOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct BlankOut {
    #[serde(rename = "displayNo")]
    pub display_no: u32,
    #[serde(rename = "localNo")]
    pub local_no: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Per-blank option set (cloze), already shuffled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ChoiceOut {
    #[serde(rename = "displayNo")]
    pub display_no: u32,
    pub prompt: String,
    pub choices: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslationItemOut {
    #[serde(rename = "displayNo")]
    pub display_no: u32,
    pub source: String,
    pub score: u32,
}

/// Answer key view: the expected text (or reference for free-text kinds) per
/// question, with point values.
#[derive(Debug, Serialize)]
pub struct PaperKeyOut {
    pub id: String,
    pub name: String,
    #[serde(rename = "perfectScore")]
    pub perfect_score: u32,
    pub sections: Vec<SectionKeyOut>,
}

#[derive(Debug, Serialize)]
pub struct SectionKeyOut {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub title: String,
    pub entries: Vec<KeyEntryOut>,
}

#[derive(Debug, Serialize)]
pub struct KeyEntryOut {
    #[serde(rename = "displayNo")]
    pub display_no: u32,
    #[serde(rename = "localNo")]
    pub local_no: u32,
    /// Machine-checked expected text. Absent for hand-graded questions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Reference text for free-text questions. Display only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub score: u32,
}

#[derive(Debug, Serialize)]
pub struct GradeOut {
    #[serde(rename = "paperId")]
    pub paper_id: String,
    #[serde(rename = "perfectScore")]
    pub perfect_score: u32,
    #[serde(rename = "totalScore")]
    pub total_score: u32,
    pub sections: Vec<SectionResultOut>,
}

#[derive(Debug, Serialize)]
pub struct SectionResultOut {
    #[serde(rename = "sectionId")]
    pub section_id: String,
    pub results: Vec<BlankResultOut>,
}

#[derive(Debug, Serialize)]
pub struct BlankResultOut {
    #[serde(rename = "localNo")]
    pub local_no: u32,
    pub correct: bool,
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct PaperQuery {
    #[serde(rename = "paperId")]
    pub paper_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveIn {
    #[serde(rename = "paperId")]
    pub paper_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(rename = "baseVersion")]
    pub base_version: Option<u64>,
}

#[derive(Serialize)]
pub struct SaveOut {
    #[serde(rename = "paperId")]
    pub paper_id: String,
    pub version: u64,
}

#[derive(Serialize)]
pub struct VersionOut {
    pub version: u64,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "paperId")]
    pub paper_id: String,
    #[serde(rename = "sectionId")]
    pub section_id: String,
    #[serde(rename = "localNo")]
    pub local_no: u32,
    pub text: String,
}

#[derive(Serialize)]
pub struct AnswerOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct PaperSummaryOut {
    pub id: String,
    pub name: String,
    pub version: u64,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
    #[serde(rename = "currentVersion", skip_serializing_if = "Option::is_none")]
    pub current_version: Option<u64>,
}
