//! Static project catalog, embedded at compile time.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::CatalogError;

const BUILTIN: &str = include_str!("../data/projects.json");

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ProjectEntry {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image: String,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub live: Option<String>,
    #[serde(default)]
    pub pdf: Option<String>,
}

/// The external link kinds a project may expose, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    Source,
    Live,
    Document,
}

impl LinkKind {
    pub fn label(self) -> &'static str {
        match self {
            LinkKind::Source => "View Code",
            LinkKind::Live => "Live Page",
            LinkKind::Document => "Read Paper",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            LinkKind::Source => "fab fa-github",
            LinkKind::Live => "fas fa-external-link-alt",
            LinkKind::Document => "fas fa-file-pdf",
        }
    }
}

impl ProjectEntry {
    /// Links that are actually set, in display order.
    pub fn links(&self) -> impl Iterator<Item = (LinkKind, &str)> {
        [
            (LinkKind::Source, self.github.as_deref()),
            (LinkKind::Live, self.live.as_deref()),
            (LinkKind::Document, self.pdf.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, href)| href.map(|href| (kind, href)))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let required = [
            ("id", &self.id),
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("description", &self.description),
            ("image", &self.image),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CatalogError::MissingField {
                    id: self.id.clone(),
                    field,
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: BTreeMap<String, ProjectEntry>,
}

impl Catalog {
    /// The catalog shipped with the page.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let list: Vec<ProjectEntry> = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();
        for entry in list {
            entry.validate()?;
            if entries.contains_key(&entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
            entries.insert(entry.id.clone(), entry);
        }
        log::debug!("catalog loaded with {} projects", entries.len());
        Ok(Self { entries })
    }

    pub fn get(&self, id: &str) -> Option<&ProjectEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
