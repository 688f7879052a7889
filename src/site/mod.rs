use std::collections::HashMap;

use thiserror::Error;

pub type SiteResult<T> = std::result::Result<T, SiteError>;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no site registered for slug {slug:?}")]
    SiteNotFound { slug: String },
}

/// Opaque identifier assigned by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub u64);

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage namespace a setting belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Site(SiteId),
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Site(id) => write!(f, "site {id}"),
        }
    }
}

/// A site as the host platform describes it: identifier plus the slug of
/// its configured visual theme, if any theme was ever chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub id: SiteId,
    pub theme_slug: Option<String>,
}

/// Host-platform collaborator that resolves a site slug to a [`Site`].
pub trait SiteDirectory {
    fn site_by_slug(&self, slug: &str) -> SiteResult<Site>;
}

/// In-memory directory, used by the CLI and by tests.
#[derive(Debug, Default)]
pub struct StaticSiteDirectory {
    sites: HashMap<String, Site>,
}

impl StaticSiteDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, slug: &str, site: Site) {
        self.sites.insert(slug.to_string(), site);
    }
}

impl SiteDirectory for StaticSiteDirectory {
    fn site_by_slug(&self, slug: &str) -> SiteResult<Site> {
        self.sites
            .get(slug)
            .cloned()
            .ok_or_else(|| SiteError::SiteNotFound {
                slug: slug.to_string(),
            })
    }
}
