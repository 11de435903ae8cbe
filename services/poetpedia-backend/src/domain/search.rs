use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use super::{AuthorSummary, Poem, PoemSummary};

/// What the welcome page searches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCriteria {
    Title,
    Author,
    Line,
}

impl FromStr for SearchCriteria {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SearchCriteria::Title),
            "author" => Ok(SearchCriteria::Author),
            "line" | "lines" => Ok(SearchCriteria::Line),
            other => Err(format!("unknown search criteria '{other}'")),
        }
    }
}

pub fn summaries(poems: Vec<Poem>) -> Vec<PoemSummary> {
    poems.into_iter().map(PoemSummary::from).collect()
}

/// Author names, without duplicates, in the order they first appear.
pub fn unique_authors(poems: Vec<Poem>) -> Vec<AuthorSummary> {
    let mut seen = HashSet::new();
    poems
        .into_iter()
        .filter(|poem| seen.insert(poem.author.clone()))
        .map(|poem| AuthorSummary {
            author: poem.author,
        })
        .collect()
}
