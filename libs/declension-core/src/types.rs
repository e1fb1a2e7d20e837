//! Core types for the declension drill.

use crate::error::{MalformedRecordError, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Grammatical case a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseLabel {
    Nominative,
    Genitive,
    Dative,
    Accusative,
    Instrumental,
    Locative,
    Vocative,
}

impl CaseLabel {
    pub const ALL: [CaseLabel; 7] = [
        Self::Nominative,
        Self::Genitive,
        Self::Dative,
        Self::Accusative,
        Self::Instrumental,
        Self::Locative,
        Self::Vocative,
    ];

    /// Label as understood by the question service.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nominative => "nominative",
            Self::Genitive => "genitive",
            Self::Dative => "dative",
            Self::Accusative => "accusative",
            Self::Instrumental => "instrumental",
            Self::Locative => "locative",
            Self::Vocative => "vocative",
        }
    }
}

impl FromStr for CaseLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|case| case.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownCase(s.to_string()))
    }
}

impl fmt::Display for CaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammatical number a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberLabel {
    Singular,
    Plural,
}

impl NumberLabel {
    pub const ALL: [NumberLabel; 2] = [Self::Singular, Self::Plural];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Singular => "singular",
            Self::Plural => "plural",
        }
    }
}

impl FromStr for NumberLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|number| number.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownNumber(s.to_string()))
    }
}

impl fmt::Display for NumberLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which cases and numbers to request questions for.
///
/// Both sets are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    cases: BTreeSet<CaseLabel>,
    numbers: BTreeSet<NumberLabel>,
}

impl Selection {
    /// Build a selection, rejecting empty case or number sets.
    pub fn new(
        cases: impl IntoIterator<Item = CaseLabel>,
        numbers: impl IntoIterator<Item = NumberLabel>,
    ) -> Result<Self, ValidationError> {
        let cases: BTreeSet<_> = cases.into_iter().collect();
        let numbers: BTreeSet<_> = numbers.into_iter().collect();

        if cases.is_empty() {
            return Err(ValidationError::EmptyCases);
        }
        if numbers.is_empty() {
            return Err(ValidationError::EmptyNumbers);
        }

        Ok(Self { cases, numbers })
    }

    /// Build a selection from raw labels, e.g. command line values.
    pub fn parse<C, N>(cases: C, numbers: N) -> Result<Self, ValidationError>
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let cases = cases
            .into_iter()
            .map(|c| c.as_ref().trim().to_lowercase().parse())
            .collect::<Result<Vec<CaseLabel>, _>>()?;
        let numbers = numbers
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase().parse())
            .collect::<Result<Vec<NumberLabel>, _>>()?;
        Self::new(cases, numbers)
    }

    pub fn cases(&self) -> impl Iterator<Item = CaseLabel> + '_ {
        self.cases.iter().copied()
    }

    pub fn numbers(&self) -> impl Iterator<Item = NumberLabel> + '_ {
        self.numbers.iter().copied()
    }
}

/// Noun gender, as coded by the question service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderLabel {
    MasculineInanimate,
    MasculineAnimate,
    MasculinePersonal,
    Feminine,
    Neuter,
}

impl GenderLabel {
    /// Map a source code such as `"m anim"` to a gender.
    pub fn from_code(code: &str) -> Result<Self, MalformedRecordError> {
        match code {
            "m inan" => Ok(Self::MasculineInanimate),
            "m anim" => Ok(Self::MasculineAnimate),
            "m pers" => Ok(Self::MasculinePersonal),
            "f" => Ok(Self::Feminine),
            "n" => Ok(Self::Neuter),
            other => Err(MalformedRecordError::UnknownGender(other.to_string())),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::MasculineInanimate => "m inan",
            Self::MasculineAnimate => "m anim",
            Self::MasculinePersonal => "m pers",
            Self::Feminine => "f",
            Self::Neuter => "n",
        }
    }

    /// Human-friendly label shown next to the noun.
    pub fn label(self) -> &'static str {
        match self {
            Self::MasculineInanimate => "male inanimate (\u{2642})",
            Self::MasculineAnimate => "male animate (\u{2642}\u{1F493})",
            Self::MasculinePersonal => "male personal (\u{1F468})",
            Self::Feminine => "female\u{2640}",
            Self::Neuter => "neuter\u{2753}",
        }
    }
}

/// A single drill question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt_noun: String,
    pub prompt_adjective: String,
    pub gender: GenderLabel,
    pub target_number: NumberLabel,
    pub target_case: CaseLabel,
    pub expected_answer: String,
}

/// Running tally of answers within one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: u32,
    pub wrong: u32,
    pub total: u32,
}

impl Score {
    pub(crate) fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
        self.total += 1;
        debug_assert_eq!(self.total, self.correct + self.wrong);
    }

    /// Share of correct answers in percent, `None` before the first answer.
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(f64::from(self.correct) / f64::from(self.total) * 100.0)
    }
}
