//! Application state: in-memory stores for papers, version stamps, and the
//! per-paper live answer sheets.
//!
//! This module owns:
//!   - the paper store (by id) seeded from TOML bank + built-ins
//!   - monotonically increasing version stamps, one per paper
//!   - one live `AnswerSheet` per paper session
//!
//! The engine itself is pure; everything shared lives here behind RwLocks.
//! Saves use optimistic concurrency: the caller presents the version it
//! started from, a stale stamp is rejected with a distinguishable conflict,
//! and the client is expected to reload wholesale — never merge silently.

use std::{collections::HashMap, sync::Arc};

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::answers::AnswerSheet;
use crate::config::load_bank_from_env;
use crate::domain::Paper;
use crate::scoring::{self, ScoreRecord};
use crate::seeds::seed_papers;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("unknown paper: {0}")]
  UnknownPaper(String),
  /// The paper was edited elsewhere since `base_version` was read.
  #[error("version conflict: paper is at version {current}")]
  VersionConflict { current: u64 },
}

#[derive(Clone)]
pub struct AppState {
  papers: Arc<RwLock<HashMap<String, Paper>>>,
  versions: Arc<RwLock<HashMap<String, u64>>>,
  sheets: Arc<RwLock<HashMap<String, AnswerSheet>>>,
}

impl AppState {
  /// Build state from env: load the TOML bank if configured, then add the
  /// built-in seed paper without overwriting bank entries.
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Self {
    let mut papers = HashMap::<String, Paper>::new();
    let mut versions = HashMap::<String, u64>::new();

    if let Some(bank) = load_bank_from_env() {
      for paper in bank.papers {
        if paper.id.is_empty() {
          warn!(target: "paper", name = %paper.name, "Skipping bank paper: empty id");
          continue;
        }
        versions.insert(paper.id.clone(), 1);
        papers.insert(paper.id.clone(), paper);
      }
    }

    for paper in seed_papers() {
      versions.entry(paper.id.clone()).or_insert(1);
      papers.entry(paper.id.clone()).or_insert(paper);
    }

    for paper in papers.values() {
      info!(
        target: "paper",
        id = %paper.id,
        name = %paper.name,
        sections = paper.sections.len(),
        "Startup paper inventory"
      );
    }

    Self {
      papers: Arc::new(RwLock::new(papers)),
      versions: Arc::new(RwLock::new(versions)),
      sheets: Arc::new(RwLock::new(HashMap::new())),
    }
  }

  /// (id, name, version) for every stored paper.
  pub async fn list_papers(&self) -> Vec<(String, String, u64)> {
    let papers = self.papers.read().await;
    let versions = self.versions.read().await;
    let mut out: Vec<(String, String, u64)> = papers
      .values()
      .map(|p| {
        let v = versions.get(&p.id).copied().unwrap_or(1);
        (p.id.clone(), p.name.clone(), v)
      })
      .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
  }

  #[instrument(level = "debug", skip(self), fields(%id))]
  pub async fn get_paper(&self, id: &str) -> Option<Paper> {
    self.papers.read().await.get(id).cloned()
  }

  /// Current version stamp; clients read this once per editing session to
  /// seed `base_version` before their first save.
  pub async fn version(&self, id: &str) -> Option<u64> {
    self.versions.read().await.get(id).copied()
  }

  /// Optimistic-concurrency save. A new paper is accepted at version 1
  /// regardless of `base_version`; an existing paper requires `base_version`
  /// to match the current stamp exactly, otherwise the write is rejected and
  /// nothing changes.
  #[instrument(level = "info", skip(self, paper), fields(id = %paper.id, sections = paper.sections.len()))]
  pub async fn save_paper(&self, paper: Paper, base_version: Option<u64>) -> Result<u64, StoreError> {
    let mut papers = self.papers.write().await;
    let mut versions = self.versions.write().await;

    let next = match versions.get(&paper.id) {
      None => 1,
      Some(&current) => {
        if base_version != Some(current) {
          warn!(
            target: "paper",
            id = %paper.id,
            %current,
            base = ?base_version,
            "Rejecting save: stale base version"
          );
          return Err(StoreError::VersionConflict { current });
        }
        current + 1
      }
    };

    versions.insert(paper.id.clone(), next);
    papers.insert(paper.id.clone(), paper);
    Ok(next)
  }

  /// Record one answer into the paper's live sheet. Storage only: the text is
  /// kept verbatim, even for blanks that don't currently exist.
  #[instrument(level = "debug", skip(self, text), fields(%paper_id, %section_id, local_no))]
  pub async fn record_answer(
    &self,
    paper_id: &str,
    section_id: &str,
    local_no: u32,
    text: &str,
  ) -> Result<(), StoreError> {
    if !self.papers.read().await.contains_key(paper_id) {
      return Err(StoreError::UnknownPaper(paper_id.to_string()));
    }
    let mut sheets = self.sheets.write().await;
    sheets
      .entry(paper_id.to_string())
      .or_insert_with(AnswerSheet::new)
      .set(section_id, local_no, text);
    Ok(())
  }

  /// Snapshot the live sheet and grade against current content. Replayable:
  /// grading mutates nothing.
  #[instrument(level = "info", skip(self), fields(%paper_id))]
  pub async fn grade_paper(&self, paper_id: &str) -> Result<(Paper, ScoreRecord), StoreError> {
    let paper = self
      .get_paper(paper_id)
      .await
      .ok_or_else(|| StoreError::UnknownPaper(paper_id.to_string()))?;
    let submitted = {
      let sheets = self.sheets.read().await;
      sheets.get(paper_id).map(AnswerSheet::snapshot).unwrap_or_default()
    };
    let record = scoring::grade(&paper.sections, &submitted);
    info!(
      target: "paper",
      id = %paper_id,
      perfect = record.perfect_score,
      total = record.total_score,
      "Paper graded"
    );
    Ok((paper, record))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Section, SectionKind};

  fn empty_paper(id: &str) -> Paper {
    Paper { id: id.into(), name: "t".into(), sections: vec![] }
  }

  #[tokio::test]
  async fn save_bumps_version_and_rejects_stale_writers() {
    let state = AppState::new();
    let v1 = state.save_paper(empty_paper("p1"), None).await.expect("create");
    assert_eq!(v1, 1);

    // Two sessions both start from version 1.
    let v2 = state.save_paper(empty_paper("p1"), Some(1)).await.expect("first writer");
    assert_eq!(v2, 2);
    let err = state.save_paper(empty_paper("p1"), Some(1)).await.unwrap_err();
    match err {
      StoreError::VersionConflict { current } => assert_eq!(current, 2),
      other => panic!("expected version conflict, got {other:?}"),
    }
    assert_eq!(state.version("p1").await, Some(2));
  }

  #[tokio::test]
  async fn existing_paper_requires_a_base_version() {
    let state = AppState::new();
    state.save_paper(empty_paper("p2"), None).await.expect("create");
    assert!(state.save_paper(empty_paper("p2"), None).await.is_err());
  }

  #[tokio::test]
  async fn answers_flow_into_grading() {
    let state = AppState::new();
    let mut paper = empty_paper("p3");
    let section = Section::default_of(SectionKind::Writing);
    let sid = section.id().clone();
    paper.sections.push(section);
    state.save_paper(paper, None).await.expect("create");

    state.record_answer("p3", &sid, 1, "my essay").await.expect("record");
    let (_, record) = state.grade_paper("p3").await.expect("grade");
    assert_eq!(record.perfect_score, 1);
    assert_eq!(record.total_score, 0); // writing is graded by hand
    assert_eq!(record.per_section[&sid][&1], false);

    assert!(matches!(
      state.record_answer("nope", "s", 1, "x").await,
      Err(StoreError::UnknownPaper(_))
    ));
  }
}
