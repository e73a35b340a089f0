//! Free-text heuristics that turn `Role`, `Expertise` and `Interest` into tags.
//!
//! All tests are lowercase substring checks. Rule tables are ordered: the
//! first matching rule wins, except for quadrants where every rule applies.
//!
//! The `r` language rule matches any text containing the letter r. It is
//! kept as-is so tags agree with existing exports.

use kgdir_core::types::{Language, MemberType, Platform, Quadrant};

const ROLE_RULES: &[(&[&str], MemberType)] = &[
    (&["student", "graduate"], MemberType::Student),
    (&["researcher", "research"], MemberType::Researcher),
    (&["professor", "faculty"], MemberType::Faculty),
    (&["developer", "engineer"], MemberType::Developer),
];

const LANGUAGE_RULES: &[(&str, Language)] = &[
    ("python", Language::Python),
    ("r", Language::R),
    ("matlab", Language::Matlab),
    ("git", Language::Git),
];

const PLATFORM_RULES: &[(&str, Platform)] = &[
    ("jupyter", Platform::Jupyter),
    ("rstudio", Platform::RStudio),
    ("matlab", Platform::Matlab),
];

const QUADRANT_RULES: &[(&str, Quadrant)] = &[
    ("reference", Quadrant::Reference),
    ("explanation", Quadrant::Explanation),
    ("tutorial", Quadrant::Tutorials),
    ("guide", Quadrant::HowToGuides),
];

/// Lowercased free text that tag rules scan. Each source is tested on its
/// own, so a needle never matches across the boundary of two fields.
pub struct ScanText {
    sources: Vec<String>,
}

impl ScanText {
    pub fn new<'a>(sources: impl IntoIterator<Item = &'a str>) -> Self {
        Self { sources: sources.into_iter().map(str::to_lowercase).collect() }
    }

    fn contains(&self, needle: &str) -> bool {
        self.sources.iter().any(|s| s.contains(needle))
    }
}

pub fn member_type(role: &str) -> MemberType {
    let role = role.to_lowercase();
    ROLE_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| role.contains(n)))
        .map(|&(_, kind)| kind)
        .unwrap_or_default()
}

pub fn programming_language(text: &ScanText) -> Option<Language> {
    LANGUAGE_RULES.iter().find(|(needle, _)| text.contains(needle)).map(|&(_, lang)| lang)
}

pub fn platform(text: &ScanText) -> Platform {
    PLATFORM_RULES
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|&(_, p)| p)
        .unwrap_or_default()
}

pub fn quadrants(text: &ScanText) -> Vec<Quadrant> {
    QUADRANT_RULES.iter().filter(|(needle, _)| text.contains(needle)).map(|&(_, q)| q).collect()
}
