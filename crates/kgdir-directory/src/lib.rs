//! kgdir-directory
//!
//! Wires loading, projection and matching together for a presentation layer:
//! load once, then ask for the visible members whenever the filter changes.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use kgdir_core::loader::ParseDiagnostic;
use kgdir_core::traits::RecordSource;
use kgdir_core::types::{FilterState, Member, Quadrant, RawRecord};
use kgdir_match::CachedMatcher;
use kgdir_project::project;

pub struct Directory {
    members: Arc<[Member]>,
    categories: Vec<String>,
    diagnostics: Vec<ParseDiagnostic>,
    matcher: CachedMatcher,
}

impl Directory {
    pub fn from_records(records: &[RawRecord]) -> Self {
        let projection = project(records);
        Self {
            members: projection.members.into(),
            categories: projection.categories,
            diagnostics: Vec::new(),
            matcher: CachedMatcher::default(),
        }
    }

    /// Load and project. A failed load is logged and yields an empty directory.
    pub fn load(source: &dyn RecordSource) -> Self {
        match source.load_records() {
            Ok(report) => {
                let mut directory = Self::from_records(&report.records);
                directory.diagnostics = report.diagnostics;
                info!(members = directory.len(), categories = directory.categories.len(), skipped = directory.diagnostics.len(), "directory ready");
                directory
            }
            Err(e) => {
                error!(error = %e, "failed to load directory, continuing with no members");
                Self::from_records(&[])
            }
        }
    }

    pub fn members(&self) -> &[Member] { &self.members }

    pub fn categories(&self) -> &[String] { &self.categories }

    /// Entries skipped while loading.
    pub fn diagnostics(&self) -> &[ParseDiagnostic] { &self.diagnostics }

    pub fn len(&self) -> usize { self.members.len() }

    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Quadrants held by at least one member, in canonical order.
    pub fn quadrants(&self) -> Vec<Quadrant> {
        Quadrant::ALL.into_iter().filter(|q| self.members.iter().any(|m| m.quadrants.contains(q))).collect()
    }

    pub fn visible(&mut self, filter: &FilterState) -> Visible {
        let indices = self.matcher.matching(&self.members, filter);
        Visible { members: Arc::clone(&self.members), indices }
    }

    /// The `{ materials, categories }` document the web front end consumes.
    pub fn export(&self) -> DirectoryExport<'_> {
        DirectoryExport { materials: &self.members, categories: &self.categories }
    }
}

#[derive(Debug, Serialize)]
pub struct DirectoryExport<'a> {
    pub materials: &'a [Member],
    pub categories: &'a [String],
}

/// Members visible under one filter snapshot, in directory order.
#[derive(Debug, Clone)]
pub struct Visible {
    members: Arc<[Member]>,
    indices: Arc<[usize]>,
}

impl Visible {
    pub fn len(&self) -> usize { self.indices.len() }

    pub fn is_empty(&self) -> bool { self.indices.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.indices.iter().map(|&i| &self.members[i])
    }

    pub fn total_pages(&self, page_size: usize) -> usize {
        self.len().div_ceil(page_size.max(1))
    }

    /// One page of results. `number` is 1-based and clamped to the valid range.
    pub fn page(&self, number: usize, page_size: usize) -> Page<'_> {
        let page_size = page_size.max(1);
        let total_pages = self.total_pages(page_size);
        let number = number.clamp(1, total_pages.max(1));
        let members = self.iter().skip((number - 1) * page_size).take(page_size).collect();
        Page { number, total_pages, total: self.len(), members }
    }
}

#[derive(Debug)]
pub struct Page<'a> {
    pub number: usize,
    pub total_pages: usize,
    pub total: usize,
    pub members: Vec<&'a Member>,
}

impl Page<'_> {
    pub fn has_previous(&self) -> bool { self.number > 1 }

    pub fn has_next(&self) -> bool { self.number < self.total_pages }
}
