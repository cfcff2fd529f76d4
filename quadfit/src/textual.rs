mod executor;
mod instruction;
mod parser;

use std::str::FromStr;

pub use executor::Outcome;
pub use instruction::{Correspondence, Query};
use winnow::Parser;

use crate::textual::parser::parse_problem;

/// A fitting problem: four correspondences, plus optional extra points to map.
#[derive(Debug, PartialEq)]
pub struct Problem {
    /// Each source point and the target it should map to, in file order.
    pub correspondences: Vec<Correspondence>,
    /// Points to push through the fitted transform, in file order.
    pub queries: Vec<Query>,
}

impl FromStr for Problem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_problem.parse(s).map_err(|e| e.to_string())
    }
}

/// Name of a point in a problem file.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct Label(String);

impl Label {
    #[allow(missing_docs)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        &self.0 == other
    }
}

impl PartialEq<String> for Label {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Problem {
    /// Labels of every correspondence.
    pub fn labels(&self) -> Vec<&Label> {
        self.correspondences.iter().map(|c| &c.label).collect()
    }
}
