//! Question module - draws demo questions for every member of a group
//!
//! Every question group is shuffled once per run; member `g` then receives
//! `picksPerStudent` consecutive questions starting at `(g - 1) * picksPerStudent`,
//! so no two members share a question from the same group.

use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::utils::{cat_image, print_labeled, print_prefixed, print_section, PrefixLevel};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub id: String,
    pub desc: String,
    /// Image shown after the description, relative to the question assets
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionGroup {
    pub picks_per_student: usize,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A question asset: how many members to serve and where to draw from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questioner {
    pub group_size: usize,
    #[serde(default)]
    pub question_groups: Vec<QuestionGroup>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionError {
    #[error(
        "Question group {group} has {available} question(s), {needed} needed for {members} member(s)"
    )]
    NotEnoughQuestions {
        group: usize,
        available: usize,
        needed: usize,
        members: usize,
    },
}

/// Questions drawn for one group member, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuestions<'q> {
    /// 1-based member id
    pub member: usize,
    pub questions: Vec<&'q Question>,
}

impl Questioner {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("Failed to parse questioner")
    }

    /// Check every question group can serve all members.
    pub fn validate(&self) -> Result<(), QuestionError> {
        for (group, question_group) in self.question_groups.iter().enumerate() {
            let needed = self.group_size * question_group.picks_per_student;
            if question_group.questions.len() < needed {
                return Err(QuestionError::NotEnoughQuestions {
                    group: group + 1,
                    available: question_group.questions.len(),
                    needed,
                    members: self.group_size,
                });
            }
        }
        Ok(())
    }

    /// Shuffle every question group in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for group in &mut self.question_groups {
            group.questions.shuffle(rng);
        }
    }

    /// Split the (already shuffled) question groups among the members.
    pub fn assign(&self) -> Result<Vec<MemberQuestions<'_>>, QuestionError> {
        self.validate()?;

        let assignments = (1..=self.group_size)
            .map(|member| {
                let questions = self
                    .question_groups
                    .iter()
                    .flat_map(|group| {
                        let offset = (member - 1) * group.picks_per_student;
                        &group.questions[offset..offset + group.picks_per_student]
                    })
                    .collect();
                MemberQuestions { member, questions }
            })
            .collect();

        Ok(assignments)
    }
}

/// Load a question asset, draw questions and print them per member.
pub fn run_question<R: Rng + ?Sized>(path: &Path, image_dir: &Path, rng: &mut R) -> Result<()> {
    debug!("Generating questions from file: {}", path.display());

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read questions file {}", path.display()))?;
    let mut questioner = Questioner::from_json_str(&text)?;

    questioner.shuffle(rng);

    for assignment in questioner.assign()? {
        print_section(1, &format!("Group {}", assignment.member));

        for question in assignment.questions {
            print_labeled(&format!("{:>3}", question.id), &question.desc);
            println!();

            if !question.image.is_empty() {
                let image = image_dir.join(&question.image);
                if let Err(e) = cat_image(&image, &mut std::io::stdout()) {
                    print_prefixed(PrefixLevel::Error, &format!("{:#}", e));
                }
            }
        }
    }

    Ok(())
}
