use std::fs;

use serde_json::json;
use tempfile::TempDir;

use kgdir_core::loader::RecordLoader;
use kgdir_core::types::{FilterState, Quadrant, RawRecord};
use kgdir_directory::Directory;

fn sample_lines() -> String {
    [
        json!({"fields": {"Name": "Ada", "Role": "PhD student", "Expertise": "reference material"},
               "mappings": {"Expertise": [{"concept_label": "Statistics", "ontology_id": "STATO:0000039", "confidence": 0.92}]}}),
        json!({"fields": {"Name": "", "Role": "ghost"}, "mappings": {"Role": [{"concept_label": "Ghosts"}]}}),
        json!({"fields": {"Name": "Grace", "Role": "Engineer", "Interest": "tutorial videos"}}),
    ]
    .iter()
    .map(|v| v.to_string())
    .collect::<Vec<_>>()
    .join("\n")
}

fn roster(n: usize) -> Vec<RawRecord> {
    (0..n)
        .map(|i| serde_json::from_value(json!({"fields": {"Name": format!("Person {}", i)}})).expect("record"))
        .collect()
}

#[test]
fn loads_projects_and_reports_skips() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("output_kg.jsonl");
    fs::write(&path, format!("{}\nnot json\n", sample_lines())).unwrap();

    let directory = Directory::load(&RecordLoader::new(&path));

    assert_eq!(directory.len(), 2);
    assert_eq!(directory.categories(), ["Ghosts", "Statistics"]);
    assert_eq!(directory.diagnostics().len(), 1);
    assert_eq!(directory.member("member-1").map(|m| m.title.as_str()), Some("Grace"));
    assert!(directory.member("member-2").is_none());
    assert_eq!(directory.quadrants(), vec![Quadrant::Reference, Quadrant::Tutorials]);
}

#[test]
fn failed_load_is_an_empty_directory() {
    let tmp = TempDir::new().unwrap();
    let mut directory = Directory::load(&RecordLoader::new(tmp.path().join("missing.jsonl")));
    assert!(directory.is_empty());
    assert!(directory.categories().is_empty());
    assert!(directory.visible(&FilterState::default()).is_empty());
}

#[test]
fn in_memory_records_are_a_source_too() {
    let records = roster(3);
    let directory = Directory::load(&records);
    assert_eq!(directory.len(), 3);
}

#[test]
fn visible_follows_the_filter() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kg.jsonl");
    fs::write(&path, sample_lines()).unwrap();
    let mut directory = Directory::load(&RecordLoader::new(&path));

    let all = directory.visible(&FilterState::default());
    assert_eq!(all.len(), 2);

    let visible = directory.visible(&FilterState::new().with_search_term("grace"));
    let titles: Vec<&str> = visible.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Grace"]);

    let tutorials = directory.visible(&FilterState::new().with_quadrant(Quadrant::Tutorials));
    assert_eq!(tutorials.iter().next().map(|m| m.id.as_str()), Some("member-1"));
}

#[test]
fn pages_are_clamped_and_sized() {
    let mut directory = Directory::from_records(&roster(20));
    let visible = directory.visible(&FilterState::default());

    assert_eq!(visible.total_pages(9), 3);
    let last = visible.page(3, 9);
    assert_eq!(last.members.len(), 2);
    assert!(last.has_previous());
    assert!(!last.has_next());
    assert_eq!(last.members[0].title, "Person 18");

    let clamped = visible.page(99, 9);
    assert_eq!(clamped.number, 3);
    let first = visible.page(0, 9);
    assert_eq!(first.number, 1);
    assert_eq!(first.members.len(), 9);
}

#[test]
fn empty_result_has_one_empty_page() {
    let mut directory = Directory::from_records(&roster(2));
    let visible = directory.visible(&FilterState::new().with_search_term("nobody"));
    let page = visible.page(1, 9);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.number, 1);
    assert!(page.members.is_empty());
    assert!(!page.has_next());
}

#[test]
fn export_matches_the_web_document_shape() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kg.json");
    fs::write(&path, format!("[{}]", sample_lines().replace('\n', ","))).unwrap();
    let directory = Directory::load(&RecordLoader::new(&path));

    let value = serde_json::to_value(directory.export()).unwrap();

    assert_eq!(value["categories"], json!(["Ghosts", "Statistics"]));
    let ada = &value["materials"][0];
    assert_eq!(ada["id"], "member-0");
    assert_eq!(ada["type"], "Student");
    assert_eq!(ada["keywords"], json!(["Statistics"]));
    assert_eq!(ada["originalData"]["mappings"]["Expertise"][0]["ontology_id"], "STATO:0000039");
}
