//! kgdir-match
//!
//! Decides which members are visible under a [`FilterState`]. Matching is a
//! single stable pass over the member slice; members are never modified.
//!
//! A member is visible when every active predicate holds:
//! - text: the term is a case-insensitive substring of the title, the
//!   description or any keyword
//! - categories: any selected category equals any member tag, ignoring case
//! - quadrants: any selected quadrant equals any member quadrant, ignoring case

pub mod cache;
pub mod store;

pub use cache::CachedMatcher;
pub use store::FilterStore;

use kgdir_core::types::{FilterState, Member};

/// A filter with its terms lowercased once per pass instead of once per member.
struct Prepared {
    term: String,
    categories: Vec<String>,
    quadrants: Vec<String>,
}

impl Prepared {
    fn new(filter: &FilterState) -> Self {
        Self {
            term: filter.search_term.to_lowercase(),
            categories: filter.selected_categories.iter().map(|c| c.to_lowercase()).collect(),
            quadrants: filter.selected_quadrants.iter().map(|q| q.to_lowercase()).collect(),
        }
    }

    fn matches(&self, member: &Member) -> bool {
        self.text_matches(member) && self.category_matches(member) && self.quadrant_matches(member)
    }

    fn text_matches(&self, member: &Member) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let term = self.term.as_str();
        member.title.to_lowercase().contains(term)
            || member.description.to_lowercase().contains(term)
            || member.keywords.iter().any(|k| k.to_lowercase().contains(term))
    }

    fn category_matches(&self, member: &Member) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        let tags: Vec<String> = member.tags().map(str::to_lowercase).collect();
        self.categories.iter().any(|c| tags.contains(c))
    }

    fn quadrant_matches(&self, member: &Member) -> bool {
        if self.quadrants.is_empty() {
            return true;
        }
        member.quadrants.iter().any(|q| self.quadrants.iter().any(|s| q.label().to_lowercase() == *s))
    }
}

pub fn matches(member: &Member, filter: &FilterState) -> bool {
    Prepared::new(filter).matches(member)
}

/// Positions of the visible members, ascending.
pub fn matching_indices(members: &[Member], filter: &FilterState) -> Vec<usize> {
    let prepared = Prepared::new(filter);
    members.iter().enumerate().filter(|(_, m)| prepared.matches(m)).map(|(i, _)| i).collect()
}

/// The visible members in their original relative order.
pub fn match_members<'a>(members: &'a [Member], filter: &FilterState) -> Vec<&'a Member> {
    let prepared = Prepared::new(filter);
    members.iter().filter(|m| prepared.matches(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgdir_core::types::{Language, MemberType, Platform, Quadrant, RawRecord};

    fn member(title: &str, keywords: &[&str]) -> Member {
        Member {
            id: format!("member-{}", title),
            title: title.to_string(),
            description: String::new(),
            member_type: MemberType::CommunityMember,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            programming_language: None,
            platform: Platform::NotAvailable,
            quadrants: Vec::new(),
            original_data: RawRecord::default(),
        }
    }

    #[test]
    fn term_is_not_trimmed() {
        let m = member("Ada Lovelace", &[]);
        assert!(matches(&m, &FilterState::new().with_search_term("a l")));
        assert!(!matches(&m, &FilterState::new().with_search_term(" ada")));
    }

    #[test]
    fn term_matches_keyword_substrings() {
        let m = member("Ada", &["Neuroimaging"]);
        assert!(matches(&m, &FilterState::new().with_search_term("IMAGING")));
    }

    #[test]
    fn language_and_platform_are_category_tags() {
        let mut m = member("Ada", &[]);
        m.programming_language = Some(Language::Matlab);
        m.platform = Platform::Jupyter;
        assert!(matches(&m, &FilterState::new().with_category("matlab")));
        assert!(matches(&m, &FilterState::new().with_category("JUPYTER")));
        assert!(!matches(&m, &FilterState::new().with_category("python")));
    }

    #[test]
    fn default_platform_matches_na() {
        let m = member("Ada", &[]);
        assert!(matches(&m, &FilterState::new().with_category("na")));
    }

    #[test]
    fn quadrant_filter_requires_a_shared_quadrant() {
        let mut m = member("Ada", &[]);
        m.quadrants = vec![Quadrant::Tutorials];
        assert!(matches(&m, &FilterState::new().with_quadrant(Quadrant::Tutorials)));
        assert!(!matches(&m, &FilterState::new().with_quadrant(Quadrant::Reference)));
        assert!(!matches(&member("Grace", &[]), &FilterState::new().with_quadrant(Quadrant::Tutorials)));
    }
}
