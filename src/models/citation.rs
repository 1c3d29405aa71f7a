use std::fmt;

use serde::Serialize;

/// Citation fields derived from a [`Work`](crate::models::Work).
///
/// `Display` renders the BibTeX entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    /// First author's surname followed by the year, e.g. `Doe2023`.
    pub key: String,
    /// Author display names joined by ` and `; empty when there are none.
    pub author: String,
    pub title: String,
    pub journal: String,
    pub year: String,
    /// DOI without the `https://doi.org/` resolver prefix.
    pub doi: Option<String>,
}

impl Citation {
    /// Renders a BibTeX `@article` entry.
    #[must_use]
    pub fn to_bibtex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@article{{{},", self.key)?;
        writeln!(f, "    author  = \"{}\",", self.author)?;
        writeln!(f, "    title   = \"{}\",", self.title)?;
        writeln!(f, "    journal = \"{}\",", self.journal)?;
        writeln!(f, "    year    = \"{}\",", self.year)?;
        writeln!(f, "    doi     = \"{}\"", self.doi.as_deref().unwrap_or_default())?;
        write!(f, "}}")
    }
}
