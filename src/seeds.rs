//! Seed data: a built-in sample paper so the service is useful without any
//! external config.

use crate::domain::{
  ChoiceQuestion, FishingData, GrammarData, Paper, ReadingData, Section,
  TranslationData, TranslationItem, WritingData,
};

/// A small mixed paper exercising the common section kinds. Ids are fixed so
/// manual testing against a fresh server is reproducible.
pub fn seed_papers() -> Vec<Paper> {
  vec![Paper {
    id: "paper-starter".into(),
    name: "Starter English Paper".into(),
    sections: vec![
      Section::Grammar(GrammarData {
        id: "starter-grammar".into(),
        title: "Fill in the correct form".into(),
        text: concat!(
          "<p>She <span data-blank data-hint=\"run\">runs</span> every morning. ",
          "There <span data-blank data-hint=\"be\">is/are</span> many parks nearby.</p>",
        )
        .into(),
      }),
      Section::Fishing(FishingData {
        id: "starter-fishing".into(),
        title: "Choose the right word".into(),
        text: concat!(
          "<p>Farmers <span data-blank>harvest</span> wheat in autumn and ",
          "<span data-blank>store</span> it for winter.</p>",
        )
        .into(),
        distractors: vec!["wander".into(), "melt".into()],
      }),
      Section::Reading(ReadingData {
        id: "starter-reading".into(),
        title: "Reading comprehension".into(),
        passage: "<p>Bees carry pollen between flowers, which lets plants set seed.</p>".into(),
        questions: vec![ChoiceQuestion {
          prompt: "What do bees carry between flowers?".into(),
          choices: vec!["Honey".into(), "Pollen".into(), "Seeds".into(), "Water".into()],
          correct: 1,
        }],
      }),
      Section::Translation(TranslationData {
        id: "starter-translation".into(),
        title: "Translate into English".into(),
        items: vec![
          TranslationItem {
            source: "今天天气很好。".into(),
            reference: "The weather is great today.".into(),
            score: 3,
          },
          TranslationItem {
            source: "我们一起学习吧！".into(),
            reference: "Let's study together!".into(),
            score: 5,
          },
        ],
      }),
      Section::Writing(WritingData {
        id: "starter-writing".into(),
        title: "Writing".into(),
        prompt: "<p>Describe your favourite season in about 80 words.</p>".into(),
        score: 15,
      }),
    ],
  }]
}
