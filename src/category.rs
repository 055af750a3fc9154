use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Fixed set of study categories a task can belong to
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    #[default]
    Reading,
    Coding,
    Language,
    Exercise,
    Other,
}

impl Category {
    /// Display order used by the form and the category breakdown
    pub const ALL: [Category; 5] = [
        Category::Reading,
        Category::Coding,
        Category::Language,
        Category::Exercise,
        Category::Other,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Category::Reading => "reading",
            Category::Coding => "coding",
            Category::Language => "language",
            Category::Exercise => "exercise",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Reading => "Reading",
            Category::Coding => "Coding",
            Category::Language => "Language",
            Category::Exercise => "Exercise",
            Category::Other => "Other",
        }
    }

    /// Single-cell marker shown next to the label
    pub fn glyph(&self) -> char {
        match self {
            Category::Reading => 'R',
            Category::Coding => 'C',
            Category::Language => 'L',
            Category::Exercise => 'E',
            Category::Other => 'O',
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Category::Reading => Color::LightMagenta,
            Category::Coding => Color::Magenta,
            Category::Language => Color::LightBlue,
            Category::Exercise => Color::LightGreen,
            Category::Other => Color::LightYellow,
        }
    }

    pub fn next(&self) -> Category {
        let idx = self.position();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Category {
        let idx = self.position();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }
}
