//! kgdir-project
//!
//! Turns raw knowledge-graph records into directory members and collects the
//! category universe offered as filter facets. Projection is pure and never
//! fails: absent fields read as empty text.

pub mod classify;

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use kgdir_core::types::{field, ConceptMapping, Member, RawRecord};

use crate::classify::ScanText;

/// Mapping attributes whose labels become member keywords, in order.
const KEYWORD_SOURCES: [&str; 3] = [field::EXPERTISE, field::INTEREST, field::ROLE];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub members: Vec<Member>,
    pub categories: Vec<String>,
}

pub fn project(records: &[RawRecord]) -> Projection {
    let members: Vec<Member> = records
        .iter()
        .filter(|r| r.is_eligible())
        .enumerate()
        .map(|(index, record)| project_record(index, record))
        .collect();
    let categories = category_universe(records);
    debug!(records = records.len(), members = members.len(), categories = categories.len(), "projected records");
    Projection { members, categories }
}

/// Project one record. `index` counts eligible records only.
pub fn project_record(index: usize, record: &RawRecord) -> Member {
    let text = ScanText::new([record.field(field::EXPERTISE), record.field(field::INTEREST)]);
    Member {
        id: member_id(index),
        title: record.name().to_string(),
        description: describe(record),
        member_type: classify::member_type(record.field(field::ROLE)),
        keywords: keywords(record),
        programming_language: classify::programming_language(&text),
        platform: classify::platform(&text),
        quadrants: classify::quadrants(&text),
        original_data: record.clone(),
    }
}

pub fn member_id(index: usize) -> String { format!("member-{}", index) }

/// Distinct non-empty labels from the keyword attributes, first occurrence kept.
pub fn keywords(record: &RawRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    KEYWORD_SOURCES
        .iter()
        .flat_map(|attribute| record.mappings_for(attribute))
        .filter_map(ConceptMapping::label)
        .filter(|label| seen.insert(*label))
        .map(str::to_string)
        .collect()
}

/// The note when there is one, otherwise a summary of role, expertise and interests.
pub fn describe(record: &RawRecord) -> String {
    let note = record.field(field::NOTE);
    if !note.is_empty() {
        return note.to_string();
    }
    let mut summary = String::new();
    let role = record.field(field::ROLE);
    let expertise = record.field(field::EXPERTISE);
    let interest = record.field(field::INTEREST);
    if !role.is_empty() { summary.push_str(&format!("Role: {}. ", role)); }
    if !expertise.is_empty() { summary.push_str(&format!("Expertise: {}. ", expertise)); }
    if !interest.is_empty() { summary.push_str(&format!("Interests: {}", interest)); }
    summary.trim().to_string()
}

/// Every distinct concept label across all records and all attributes,
/// sorted ascending. Records without a name still contribute.
pub fn category_universe(records: &[RawRecord]) -> Vec<String> {
    records
        .iter()
        .fold(BTreeSet::new(), |mut labels, record| {
            labels.extend(record.concept_labels());
            labels
        })
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord { serde_json::from_value(value).unwrap() }

    #[test]
    fn note_is_used_verbatim() {
        let r = record(json!({"fields": {"Name": "Ada", "Role": "student", "Note": "  Loves data.  "}}));
        assert_eq!(describe(&r), "  Loves data.  ");
    }

    #[test]
    fn summary_omits_empty_segments() {
        let r = record(json!({"fields": {"Name": "Ada", "Role": "PhD student", "Interest": "EEG"}}));
        assert_eq!(describe(&r), "Role: PhD student. Interests: EEG");
        let r = record(json!({"fields": {"Name": "Ada", "Expertise": "stats"}}));
        assert_eq!(describe(&r), "Expertise: stats.");
        let r = record(json!({"fields": {"Name": "Ada"}}));
        assert_eq!(describe(&r), "");
    }

    #[test]
    fn keywords_follow_source_order_without_duplicates() {
        let r = record(json!({
            "fields": {"Name": "Ada"},
            "mappings": {
                "Role": [{"concept_label": "Statistics"}, {"concept_label": "Student"}],
                "Interest": [{"concept_label": "Imaging"}, {"concept_label": ""}],
                "Expertise": [{"concept_label": "Statistics"}, {"concept_label": null}],
                "Note": [{"concept_label": "Ignored"}]
            }
        }));
        assert_eq!(keywords(&r), vec!["Statistics", "Imaging", "Student"]);
    }

    #[test]
    fn ids_count_eligible_records_only() {
        let records = vec![
            record(json!({"fields": {"Name": "Ada"}})),
            record(json!({"fields": {"Role": "nameless"}})),
            record(json!({"fields": {"Name": "Grace"}})),
        ];
        let ids: Vec<String> = project(&records).members.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["member-0", "member-1"]);
    }
}
