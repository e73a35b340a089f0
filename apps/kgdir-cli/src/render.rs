//! Plain-text views of the directory.

use std::fmt::Write;

use kgdir_core::types::{field, ConceptMapping, Member};
use kgdir_directory::Page;

pub fn initials(title: &str) -> String {
    title.split(' ').filter_map(|word| word.chars().next()).collect::<String>().to_uppercase()
}

pub fn keyword_summary(keywords: &[String], max: usize) -> String {
    let mut out = keywords.iter().take(max).map(String::as_str).collect::<Vec<_>>().join(", ");
    if keywords.len() > max {
        let _ = write!(out, " +{}", keywords.len() - max);
    }
    out
}

pub fn page(page: &Page<'_>, max_keywords: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Community Members", page.total);
    if page.members.is_empty() {
        let _ = writeln!(out, "\nNo community members match the current filters.");
        return out;
    }
    for member in &page.members {
        let _ = writeln!(out, "\n[{}] {} ({})  {}", initials(&member.title), member.title, member.member_type, member.id);
        if !member.description.is_empty() {
            let _ = writeln!(out, "    {}", member.description);
        }
        if !member.keywords.is_empty() {
            let _ = writeln!(out, "    {}", keyword_summary(&member.keywords, max_keywords));
        }
    }
    if page.total_pages > 1 {
        let _ = writeln!(out, "\nPage {} of {}", page.number, page.total_pages);
    }
    out
}

fn mapping_lines(out: &mut String, mappings: &[ConceptMapping]) {
    let informative: Vec<&ConceptMapping> = mappings.iter().filter(|m| m.is_informative()).collect();
    if informative.is_empty() {
        return;
    }
    let _ = writeln!(out, "  Ontology Mappings:");
    for mapping in informative {
        if let Some(label) = mapping.label() {
            let _ = writeln!(out, "    - {}", label);
        }
        if let Some(id) = mapping.ontology_id.as_deref().filter(|s| !s.is_empty()) {
            let _ = writeln!(out, "      ID: {}", id);
        }
        if let Some(confidence) = mapping.confidence.filter(|c| *c != 0.0) {
            let _ = writeln!(out, "      Confidence: {:.1}%", confidence * 100.0);
        }
        if let Some(explanation) = mapping.explanation.as_deref().filter(|s| !s.is_empty()) {
            let _ = writeln!(out, "      {}", explanation);
        }
    }
}

pub fn profile(member: &Member) -> String {
    let record = &member.original_data;
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", initials(&member.title), member.title);
    let _ = writeln!(out, "{}", member.member_type);
    if !member.keywords.is_empty() {
        let _ = writeln!(out, "\nKeywords\n  {}", member.keywords.join(", "));
    }
    for (attribute, heading) in [(field::ROLE, "Current Role"), (field::EXPERTISE, "Knowledge to Share"), (field::INTEREST, "Learning Interests")] {
        let text = record.field(attribute);
        if text.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}\n  {}", heading, text);
        mapping_lines(&mut out, record.mappings_for(attribute));
    }
    let note = record.field(field::NOTE);
    if !note.is_empty() {
        let _ = writeln!(out, "\nAdditional Information\n  {}", note);
    }
    out
}

pub fn raw(member: &Member) -> serde_json::Result<String> {
    let record = &member.original_data;
    Ok(format!(
        "Fields\n{}\n\nMappings\n{}\n",
        serde_json::to_string_pretty(&record.fields)?,
        serde_json::to_string_pretty(&record.mappings)?
    ))
}
