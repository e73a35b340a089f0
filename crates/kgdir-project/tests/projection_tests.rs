use serde_json::json;

use kgdir_core::types::{Language, MemberType, Platform, Quadrant, RawRecord};
use kgdir_project::project;

fn records(values: Vec<serde_json::Value>) -> Vec<RawRecord> {
    values.into_iter().map(|v| serde_json::from_value(v).expect("record")).collect()
}

#[test]
fn ada_projects_to_a_student_with_statistics() {
    let input = records(vec![json!({
        "fields": {"Name": "Ada", "Role": "PhD student", "Expertise": "reference material"},
        "mappings": {"Expertise": [{"concept_label": "Statistics"}]}
    })]);

    let projection = project(&input);

    assert_eq!(projection.members.len(), 1);
    let ada = &projection.members[0];
    assert_eq!(ada.id, "member-0");
    assert_eq!(ada.title, "Ada");
    assert_eq!(ada.member_type, MemberType::Student);
    assert_eq!(ada.keywords, vec!["Statistics"]);
    assert_eq!(ada.description, "Role: PhD student. Expertise: reference material.");
    assert_eq!(ada.programming_language, Some(Language::R));
    assert_eq!(ada.platform, Platform::NotAvailable);
    assert_eq!(ada.quadrants, vec![Quadrant::Reference]);
    assert_eq!(ada.original_data, input[0]);
    assert_eq!(projection.categories, vec!["Statistics"]);
}

#[test]
fn nameless_records_still_feed_categories() {
    let input = records(vec![
        json!({"fields": {"Name": ""}, "mappings": {"Role": [{"concept_label": "Zoology"}]}}),
        json!({"fields": {"Role": "faculty"}, "mappings": {"Custom": [{"concept_label": "Acoustics"}]}}),
        json!({"fields": {"Name": "Grace", "Role": "engineer"}, "mappings": {"Role": [{"concept_label": "Engineering"}]}}),
    ]);

    let projection = project(&input);

    assert_eq!(projection.members.len(), 1);
    assert_eq!(projection.members[0].title, "Grace");
    assert_eq!(projection.members[0].member_type, MemberType::Developer);
    assert_eq!(projection.categories, vec!["Acoustics", "Engineering", "Zoology"]);
}

#[test]
fn malformed_parts_keep_their_labels() {
    let input = records(vec![
        json!({"fields": {"Name": "Ada"}, "mappings": {"Expertise": [{"concept_label": "Statistics", "confidence": "0.9"}]}}),
        json!({"fields": "n/a", "mappings": {"Role": [{"concept_label": "Zoology", "ontology_id": 12}]}}),
    ]);

    let projection = project(&input);

    assert_eq!(projection.members.len(), 1);
    assert_eq!(projection.members[0].keywords, vec!["Statistics"]);
    assert_eq!(projection.categories, vec!["Statistics", "Zoology"]);
}

#[test]
fn categories_are_sorted_and_distinct() {
    let input = records(vec![
        json!({"fields": {"Name": "A"}, "mappings": {"Interest": [{"concept_label": "beta"}, {"concept_label": "Alpha"}]}}),
        json!({"fields": {"Name": "B"}, "mappings": {"Expertise": [{"concept_label": "Alpha"}, {"concept_label": "alpha"}]}}),
        json!({"fields": {"Name": "C"}, "mappings": {"Role": [{"concept_label": null}, {"concept_label": ""}]}}),
    ]);

    let categories = project(&input).categories;

    assert_eq!(categories, vec!["Alpha", "alpha", "beta"]);
    let mut sorted = categories.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(categories, sorted);
}

#[test]
fn projection_is_idempotent() {
    let input = records(vec![
        json!({"fields": {"Name": "Ada", "Interest": "Jupyter"}, "mappings": {"Interest": [{"concept_label": "Notebooks"}]}}),
        json!({"fields": {"Name": "Grace", "Expertise": "python, git"}}),
    ]);
    assert_eq!(project(&input), project(&input));
}

#[test]
fn records_with_only_a_name_degrade_gracefully() {
    let input = records(vec![json!({"fields": {"Name": "Lin"}})]);
    let lin = &project(&input).members[0];
    assert_eq!(lin.description, "");
    assert_eq!(lin.member_type, MemberType::CommunityMember);
    assert!(lin.keywords.is_empty());
    assert_eq!(lin.programming_language, None);
    assert_eq!(lin.platform, Platform::NotAvailable);
    assert!(lin.quadrants.is_empty());
}

#[test]
fn empty_input_projects_to_nothing() {
    let projection = project(&[]);
    assert!(projection.members.is_empty());
    assert!(projection.categories.is_empty());
}
