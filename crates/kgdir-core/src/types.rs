//! Domain types shared by the loader, projector and matcher.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub type MemberId = String;
pub type Fields = Map<String, Value>;
pub type Mappings = BTreeMap<String, Vec<ConceptMapping>>;

/// Attribute names used by the knowledge-graph export.
pub mod field {
    pub const NAME: &str = "Name";
    pub const ROLE: &str = "Role";
    pub const EXPERTISE: &str = "Expertise";
    pub const INTEREST: &str = "Interest";
    pub const NOTE: &str = "Note";
    pub const TIME: &str = "Time";
}

/// One ontology alignment for a free-text attribute. Every part is optional
/// and a part with the wrong JSON type reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptMapping {
    #[serde(deserialize_with = "lenient_part")]
    pub concept_label: Option<String>,
    #[serde(deserialize_with = "lenient_part")]
    pub ontology_id: Option<String>,
    #[serde(deserialize_with = "lenient_part")]
    pub ontology: Option<String>,
    #[serde(deserialize_with = "lenient_part")]
    pub confidence: Option<f64>,
    #[serde(deserialize_with = "lenient_part")]
    pub explanation: Option<String>,
}

impl ConceptMapping {
    pub fn labelled(label: &str) -> Self {
        Self { concept_label: Some(label.to_string()), ..Self::default() }
    }

    /// The concept label, if present and non-empty.
    pub fn label(&self) -> Option<&str> {
        self.concept_label.as_deref().filter(|l| !l.is_empty())
    }

    /// True when the entry carries anything worth showing on a profile.
    /// A zero confidence counts as nothing.
    pub fn is_informative(&self) -> bool {
        let non_empty = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.is_empty());
        non_empty(&self.concept_label)
            || non_empty(&self.ontology_id)
            || self.confidence.is_some_and(|c| c != 0.0)
            || non_empty(&self.explanation)
    }
}

/// A single entry of the knowledge-graph export.
///
/// Decoding is lenient: `fields` or `mappings` that is missing or not an
/// object is empty, a mapping value that is not an
/// array becomes an empty list and a mapping entry that is not an object is
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient_fields")]
    pub fields: Fields,
    #[serde(default, deserialize_with = "lenient_mappings")]
    pub mappings: Mappings,
}

impl RawRecord {
    /// Text of a field. Absent, `null` and non-string values read as "".
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).and_then(Value::as_str).unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.field(field::NAME)
    }

    /// Only records with a non-empty `Name` become members.
    pub fn is_eligible(&self) -> bool {
        !self.name().is_empty()
    }

    pub fn mappings_for(&self, attribute: &str) -> &[ConceptMapping] {
        self.mappings.get(attribute).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty concept labels across every attribute, in attribute then list order.
    pub fn concept_labels(&self) -> impl Iterator<Item = &str> {
        self.mappings.values().flatten().filter_map(ConceptMapping::label)
    }
}

fn lenient_part<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

fn lenient_fields<'de, D>(deserializer: D) -> Result<Fields, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(fields) => Ok(fields),
        _ => Ok(Fields::new()),
    }
}

fn lenient_mappings<'de, D>(deserializer: D) -> Result<Mappings, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(raw) => Ok(raw.into_iter().map(|(attribute, value)| (attribute, decode_mapping_list(value))).collect()),
        _ => Ok(Mappings::new()),
    }
}

fn decode_mapping_list(value: Value) -> Vec<ConceptMapping> {
    match value {
        Value::Array(items) => items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect(),
        _ => Vec::new(),
    }
}

/// Coarse classification derived from the `Role` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemberType {
    Student,
    Researcher,
    Faculty,
    Developer,
    #[default]
    CommunityMember,
}

impl MemberType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Researcher => "Researcher",
            Self::Faculty => "Faculty",
            Self::Developer => "Developer",
            Self::CommunityMember => "Community Member",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    R,
    Matlab,
    Git,
}

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::R => "R",
            Self::Matlab => "MATLAB",
            Self::Git => "Git",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    Jupyter,
    RStudio,
    Matlab,
    /// Serialized as `NA`. Still a non-empty tag for category matching.
    #[default]
    NotAvailable,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Self::Jupyter => "Jupyter",
            Self::RStudio => "RStudio",
            Self::Matlab => "MATLAB",
            Self::NotAvailable => "NA",
        }
    }
}

/// Documentation quadrant a member wants to share or learn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    Reference,
    Explanation,
    Tutorials,
    HowToGuides,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Self::Reference, Self::Explanation, Self::Tutorials, Self::HowToGuides];

    pub fn label(self) -> &'static str {
        match self {
            Self::Reference => "information-oriented (reference)",
            Self::Explanation => "understanding-oriented (explanation)",
            Self::Tutorials => "learning-oriented (tutorials)",
            Self::HowToGuides => "problem-oriented (how to guides)",
        }
    }

    /// Short name accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Explanation => "explanation",
            Self::Tutorials => "tutorials",
            Self::HowToGuides => "guides",
        }
    }
}

impl FromStr for Quadrant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|q| q.key().eq_ignore_ascii_case(s) || q.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown quadrant '{}'", s))
    }
}

macro_rules! label_display_and_serialize {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> { serializer.serialize_str(self.label()) }
        }
    )*};
}

label_display_and_serialize!(MemberType, Language, Platform, Quadrant);

fn label_or_empty<S: Serializer>(language: &Option<Language>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(language.map(Language::label).unwrap_or(""))
}

/// The normalized, display-ready projection of one eligible record.
///
/// - `id`: `member-<n>` where `n` counts eligible records in input order
/// - `keywords`: distinct concept labels from Expertise, Interest and Role
/// - `programming_language`/`platform`: tags inferred from free text
/// - `original_data`: the source record, for detail views only
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub member_type: MemberType,
    pub keywords: Vec<String>,
    #[serde(serialize_with = "label_or_empty")]
    pub programming_language: Option<Language>,
    pub platform: Platform,
    pub quadrants: Vec<Quadrant>,
    pub original_data: RawRecord,
}

impl Member {
    /// Everything a selected category can match: keywords, language and platform.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .chain(self.programming_language.map(Language::label))
            .chain(std::iter::once(self.platform.label()))
            .filter(|t| !t.is_empty())
    }
}

/// Snapshot of what the user is currently filtering by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub search_term: String,
    pub selected_categories: BTreeSet<String>,
    pub selected_quadrants: BTreeSet<String>,
}

impl FilterState {
    pub fn new() -> Self { Self::default() }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.selected_categories.insert(category.into());
        self
    }

    pub fn with_quadrant(mut self, quadrant: Quadrant) -> Self {
        self.selected_quadrants.insert(quadrant.label().to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.selected_categories.is_empty() && self.selected_quadrants.is_empty()
    }
}
