//! Portfolio content (pure data).
//!
//! The page is rendered from a [`Portfolio`] loaded from TOML. A default
//! portfolio is compiled into the binary; another file can replace it.

use crate::contact::ContactAction;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The portfolio compiled into the binary.
pub const DEFAULT_PORTFOLIO: &str = include_str!("../../assets/portfolio.toml");

/// Errors loading or validating portfolio content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Content file could not be read.
    #[error("Failed to read content file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Content is not valid TOML or does not match the schema.
    #[error("Invalid portfolio content in {origin}: {reason}")]
    ParseError {
        /// File path, or `"embedded portfolio"` for the built-in one.
        origin: String,
        /// Parse error details.
        reason: String,
    },

    /// Content parsed but breaks a rule the page relies on.
    #[error("Invalid portfolio content: {0}")]
    Invalid(String),
}

/// Everything shown on the page.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Portfolio {
    /// Hero banner and headline.
    pub profile: Profile,
    /// Experience timeline.
    pub experience: ExperienceSection,
    /// Skill bars by category.
    pub skills: SkillsSection,
    /// Project cards.
    pub projects: ProjectsSection,
    /// Working principles.
    pub philosophy: PhilosophySection,
    /// Roadmap and impact statements.
    pub vision: VisionSection,
    /// Contact cards.
    pub contact: ContactSection,
    /// Closing line at the bottom of the page.
    pub footer: Footer,
}

/// Hero content.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Shown in the nav bar, hero and footer.
    pub name: String,
    /// Phrases cycled by the headline typewriter. Must not be empty.
    pub phrases: Vec<String>,
    /// Paragraph under the headline.
    pub summary: String,
}

/// Experience timeline.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExperienceSection {
    /// Section heading.
    pub title: String,
    /// Line under the heading.
    #[serde(default)]
    pub subtitle: String,
    /// Timeline entries, oldest first.
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// One entry on the experience timeline.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Milestone {
    /// Free-form date or range, e.g. `"May 2024 - Nov 2024"`.
    pub date: String,
    /// Entry heading.
    pub title: String,
    /// What happened.
    pub description: String,
    /// Technologies involved.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Skill bars grouped by category.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SkillsSection {
    /// Section heading.
    pub title: String,
    /// Line under the heading.
    #[serde(default)]
    pub subtitle: String,
    /// Skill groups, each drawn as a card.
    #[serde(default)]
    pub categories: Vec<SkillCategory>,
}

/// A titled group of skills.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SkillCategory {
    /// Group heading.
    pub title: String,
    /// Skills in display order.
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// One skill bar.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    /// Skill label.
    pub name: String,
    /// Proficiency in percent, `0..=100`.
    pub level: u8,
}

/// Project cards.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectsSection {
    /// Section heading.
    pub title: String,
    /// Line under the heading.
    #[serde(default)]
    pub subtitle: String,
    /// Cards in display order.
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// One project card.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Project {
    /// Card heading.
    pub title: String,
    /// Short status badge, e.g. `"In production"`.
    pub status: String,
    /// What the project does.
    pub description: String,
    /// Metrics or feature bullets.
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Technologies involved.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A titled paragraph, used by the philosophy and vision sections.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Point {
    /// Heading.
    pub title: String,
    /// Body text.
    pub description: String,
}

/// Working principles.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PhilosophySection {
    /// Section heading.
    pub title: String,
    /// Line under the heading.
    #[serde(default)]
    pub subtitle: String,
    /// One card per principle.
    #[serde(default)]
    pub points: Vec<Point>,
    /// Closing line under the points.
    #[serde(default)]
    pub motto: Option<String>,
}

/// Where the work is heading.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VisionSection {
    /// Section heading.
    pub title: String,
    /// Line under the heading.
    #[serde(default)]
    pub subtitle: String,
    /// Roadmap steps in order.
    #[serde(default)]
    pub steps: Vec<Point>,
    /// Highlighted closing statement.
    #[serde(default)]
    pub statement: Option<Point>,
    /// Expected impacts, one bullet each.
    #[serde(default)]
    pub impacts: Vec<String>,
}

/// Contact cards above the form.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContactSection {
    /// Section heading.
    pub title: String,
    /// Line under the heading.
    #[serde(default)]
    pub subtitle: String,
    /// Cards in focus order.
    #[serde(default)]
    pub methods: Vec<ContactMethod>,
}

/// A contact card: what is shown and what activating it does.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContactMethod {
    /// Card heading, e.g. `"Email"`.
    pub title: String,
    /// Text shown on the card.
    pub value: String,
    /// What Enter does on this card.
    pub action: ContactAction,
}

/// Footer line.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Footer {
    /// Name before the role.
    pub name: String,
    /// Role after the name.
    pub role: String,
    /// Copyright notice.
    pub copyright: String,
}

impl Portfolio {
    /// Parse and validate TOML content. `origin` names the source in errors.
    pub fn from_toml(content: &str, origin: &str) -> Result<Self, ContentError> {
        let portfolio: Portfolio =
            toml::from_str(content).map_err(|e| ContentError::ParseError {
                origin: origin.to_string(),
                reason: e.to_string(),
            })?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// The portfolio compiled into the binary.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_toml(DEFAULT_PORTFOLIO, "embedded portfolio")
    }

    /// Load from `path`, or the embedded portfolio when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ContentError> {
        let Some(path) = path else {
            return Self::embedded();
        };
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.profile.phrases.is_empty() {
            return Err(ContentError::Invalid(
                "profile.phrases must list at least one phrase".to_string(),
            ));
        }
        for category in &self.skills.categories {
            if let Some(skill) = category.skills.iter().find(|s| s.level > 100) {
                return Err(ContentError::Invalid(format!(
                    "skill '{}' has level {} (must be 0-100)",
                    skill.name, skill.level
                )));
            }
        }
        Ok(())
    }
}
