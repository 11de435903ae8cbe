use serde::{Deserialize, Serialize};

/// A poem, as PoetryDB describes it. Missing fields are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Poem {
    /// The lines, one per row.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemSummary {
    pub title: String,
    pub author: String,
}

impl From<Poem> for PoemSummary {
    fn from(poem: Poem) -> Self {
        PoemSummary {
            title: poem.title,
            author: poem.author,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub author: String,
}
