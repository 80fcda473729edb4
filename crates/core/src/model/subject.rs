use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{UnknownDifficulty, UnknownSubject};

/// School subject. Chat history and quiz generation are partitioned by it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    #[default]
    HistoireGeo,
    Svt,
}

impl Subject {
    /// Known subjects in display order.
    pub const ALL: [Subject; 2] = [Subject::HistoireGeo, Subject::Svt];

    /// Identifier used in request bodies and URL paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Subject::HistoireGeo => "histoire_geo",
            Subject::Svt => "svt",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Subject::HistoireGeo => "Histoire-Géo",
            Subject::Svt => "SVT",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Subject::HistoireGeo => "🌍",
            Subject::Svt => "🧬",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = UnknownSubject;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .into_iter()
            .find(|subject| subject.as_str() == raw)
            .ok_or_else(|| UnknownSubject {
                raw: raw.to_string(),
            })
    }
}

/// Requested quiz difficulty, sent verbatim to the generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Facile,
    #[default]
    Moyen,
    Difficile,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Facile, Difficulty::Moyen, Difficulty::Difficile];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Facile => "facile",
            Difficulty::Moyen => "moyen",
            Difficulty::Difficile => "difficile",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Facile => "Facile",
            Difficulty::Moyen => "Moyen",
            Difficulty::Difficile => "Difficile",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str() == raw)
            .ok_or_else(|| UnknownDifficulty {
                raw: raw.to_string(),
            })
    }
}
