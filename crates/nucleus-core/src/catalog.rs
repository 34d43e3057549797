//! Read-only data provider over the static catalog.
//!
//! The site never mutates catalog data. Listing views only ever see active records: industries
//! ordered by `display_order`, companies sorted by name.

use crate::model::{Company, Industry, Job, JobStatus};
use crate::{Error, Result};
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::sync::OnceLock;

const BUNDLED_INDUSTRIES: &str = include_str!("../data/industries.json");
const BUNDLED_COMPANIES: &str = include_str!("../data/companies.json");
const BUNDLED_JOBS: &str = include_str!("../data/jobs.json");

pub trait DataProvider {
    /// Active industries ordered by display order.
    fn list_active_industries(&self) -> Vec<&Industry>;

    /// Active companies, optionally restricted to one industry, sorted by name.
    fn list_active_companies(&self, industry_id: Option<&str>) -> Vec<&Company>;

    fn industry(&self, id: &str) -> Option<&Industry>;

    /// Active company by slug.
    fn company_by_slug(&self, slug: &str) -> Option<&Company>;

    fn company(&self, id: &str) -> Option<&Company>;

    /// Open jobs, optionally restricted to one company.
    fn list_open_jobs(&self, company_id: Option<&str>) -> Vec<&Job>;

    fn job(&self, id: &str) -> Option<&Job>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    industries: Vec<Industry>,
    companies: Vec<Company>,
    jobs: Vec<Job>,
    company_by_slug: FxHashMap<String, usize>,
    company_by_id: FxHashMap<String, usize>,
}

impl StaticCatalog {
    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let industries = parse_json("industries.json", BUNDLED_INDUSTRIES)?;
        let companies = parse_json("companies.json", BUNDLED_COMPANIES)?;
        let jobs = parse_json("jobs.json", BUNDLED_JOBS)?;
        Self::new(industries, companies, jobs)
    }

    /// Loads a catalog from a single JSON document of the shape
    /// `{ "industries": [...], "companies": [...], "jobs": [...] }`.
    pub fn from_json_str(text: &str) -> Result<Self> {
        #[derive(serde::Deserialize)]
        struct CatalogDocument {
            #[serde(default)]
            industries: Vec<Industry>,
            #[serde(default)]
            companies: Vec<Company>,
            #[serde(default)]
            jobs: Vec<Job>,
        }

        let doc: CatalogDocument = parse_json("catalog", text)?;
        Self::new(doc.industries, doc.companies, doc.jobs)
    }

    pub fn new(industries: Vec<Industry>, companies: Vec<Company>, jobs: Vec<Job>) -> Result<Self> {
        let mut industry_ids: FxHashSet<&str> = FxHashSet::default();
        for industry in &industries {
            check_path_key("industry id", &industry.id)?;
            if !industry_ids.insert(industry.id.as_str()) {
                return Err(invalid(format!("duplicate industry id `{}`", industry.id)));
            }
        }

        let mut company_by_slug = FxHashMap::default();
        let mut company_by_id = FxHashMap::default();
        for (idx, company) in companies.iter().enumerate() {
            check_path_key("company slug", &company.slug)?;
            if company_by_id.insert(company.id.clone(), idx).is_some() {
                return Err(invalid(format!("duplicate company id `{}`", company.id)));
            }
            if company_by_slug.insert(company.slug.clone(), idx).is_some() {
                return Err(invalid(format!("duplicate company slug `{}`", company.slug)));
            }
            if !industry_ids.contains(company.industry_id.as_str()) {
                return Err(invalid(format!(
                    "company `{}` references unknown industry `{}`",
                    company.slug, company.industry_id
                )));
            }
        }

        tracing::debug!(
            industries = industries.len(),
            companies = companies.len(),
            jobs = jobs.len(),
            "catalog loaded"
        );

        Ok(Self {
            industries,
            companies,
            jobs,
            company_by_slug,
            company_by_id,
        })
    }

    pub fn industries(&self) -> &[Industry] {
        &self.industries
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(source_name: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| Error::CatalogJson {
        source_name: source_name.to_string(),
        source,
    })
}

/// Industry ids and company slugs become output file names (`orbital/<id>.svg`,
/// `companies/<slug>.html`): lowercase ASCII letters, digits and `-`, not starting with `-`.
fn check_path_key(what: &str, value: &str) -> Result<()> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("valid regex"));
    if re.is_match(value) {
        Ok(())
    } else {
        Err(invalid(format!("{what} `{value}` must match [a-z0-9][a-z0-9-]*")))
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidCatalog { message }
}

pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl DataProvider for StaticCatalog {
    fn list_active_industries(&self) -> Vec<&Industry> {
        let mut out: Vec<&Industry> = self
            .industries
            .iter()
            .filter(|i| i.status.is_active())
            .collect();
        // Stable: equal (or missing) orders keep bundled order; missing orders sort last.
        out.sort_by_key(|i| (i.display_order.is_none(), i.display_order));
        out
    }

    fn list_active_companies(&self, industry_id: Option<&str>) -> Vec<&Company> {
        let mut out: Vec<&Company> = self
            .companies
            .iter()
            .filter(|c| c.status.is_active())
            .filter(|c| industry_id.is_none_or(|id| c.industry_id == id))
            .collect();
        out.sort_by(|a, b| compare_names(&a.name, &b.name));
        out
    }

    fn industry(&self, id: &str) -> Option<&Industry> {
        self.industries.iter().find(|i| i.id == id)
    }

    fn company_by_slug(&self, slug: &str) -> Option<&Company> {
        let idx = *self.company_by_slug.get(slug)?;
        self.companies
            .get(idx)
            .filter(|c| c.status.is_active())
    }

    fn company(&self, id: &str) -> Option<&Company> {
        let idx = *self.company_by_id.get(id)?;
        self.companies.get(idx)
    }

    fn list_open_jobs(&self, company_id: Option<&str>) -> Vec<&Job> {
        self.jobs
            .iter()
            .filter(|j| j.status == JobStatus::Open)
            .filter(|j| company_id.is_none_or(|id| j.company_id.as_deref() == Some(id)))
            .collect()
    }

    fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IndustryFilter {
    #[default]
    All,
    Only(String),
}

impl IndustryFilter {
    /// `all` (or empty) selects every industry; anything else is an industry id.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => Self::All,
            id => Self::Only(id.to_string()),
        }
    }

    pub fn as_query_value(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(id) => id,
        }
    }

    fn matches(&self, industry_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => id == industry_id,
        }
    }
}

/// Company directory search: name substring plus industry filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub search: String,
    pub industry: IndustryFilter,
}

impl DirectoryQuery {
    pub fn new(search: impl Into<String>, industry: IndustryFilter) -> Self {
        Self {
            search: search.into(),
            industry,
        }
    }

    pub fn apply<'a, P: DataProvider + ?Sized>(&self, provider: &'a P) -> Vec<&'a Company> {
        let needle = self.search.to_lowercase();
        provider
            .list_active_companies(None)
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .filter(|c| self.industry.matches(&c.industry_id))
            .collect()
    }
}

/// Careers search: title substring plus optional company filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub search: String,
    pub company_id: Option<String>,
}

impl JobQuery {
    pub fn apply<'a, P: DataProvider + ?Sized>(&self, provider: &'a P) -> Vec<&'a Job> {
        let needle = self.search.to_lowercase();
        provider
            .list_open_jobs(self.company_id.as_deref())
            .into_iter()
            .filter(|j| j.title.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Number of active companies per active industry, in industry display order.
pub fn company_counts<P: DataProvider + ?Sized>(provider: &P) -> Vec<(&Industry, usize)> {
    let companies = provider.list_active_companies(None);
    provider
        .list_active_industries()
        .into_iter()
        .map(|industry| {
            let count = companies
                .iter()
                .filter(|c| c.industry_id == industry.id)
                .count();
            (industry, count)
        })
        .collect()
}
