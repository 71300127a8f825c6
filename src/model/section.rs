//! Page section identifiers.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the fixed page sections, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    /// Banner with the typing headline.
    Hero,
    /// Timeline of milestones.
    Experience,
    /// Skill bars.
    Skills,
    /// Project cards.
    Projects,
    /// Working principles.
    Philosophy,
    /// Roadmap and impact.
    Vision,
    /// Contact cards and form.
    Contact,
    /// Closing line.
    Footer,
}

impl SectionId {
    /// All sections in the order they appear on the page.
    pub const ALL: [SectionId; 8] = [
        SectionId::Hero,
        SectionId::Experience,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Philosophy,
        SectionId::Vision,
        SectionId::Contact,
        SectionId::Footer,
    ];

    /// Position on the page, 0 for the hero.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::Experience => "experience",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Philosophy => "philosophy",
            SectionId::Vision => "vision",
            SectionId::Contact => "contact",
            SectionId::Footer => "footer",
        }
    }

    /// Label shown in the navigation bar.
    pub fn label(self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::Experience => "Experience",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Philosophy => "Philosophy",
            SectionId::Vision => "Vision",
            SectionId::Contact => "Contact",
            SectionId::Footer => "About",
        }
    }

    /// The section below, if any.
    pub fn next(self) -> Option<SectionId> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The section above, if any.
    pub fn prev(self) -> Option<SectionId> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A section name that matches no section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section '{0}' (expected one of: hero, experience, skills, projects, philosophy, vision, contact, footer)")]
pub struct UnknownSection(pub String);

impl FromStr for SectionId {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.name() == wanted)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}
