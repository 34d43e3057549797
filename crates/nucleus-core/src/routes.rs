//! Page routes and the navigation interface.

use crate::catalog::IndustryFilter;
use std::cell::RefCell;
use std::fmt;
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Companies { industry: IndustryFilter },
    CompanyDetail { slug: String },
    Careers,
    Contact,
    NotFound { path: String },
}

impl Route {
    pub fn company(slug: impl Into<String>) -> Self {
        Self::CompanyDetail { slug: slug.into() }
    }

    /// Parses a router path. A leading `#` (hash routing) is accepted; trailing slashes are
    /// ignored; the only query parameter understood is `industry` on `/companies`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let (path, query) = match trimmed.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (trimmed, None),
        };
        let path = path.trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["about"] => Self::About,
            ["companies"] => Self::Companies {
                industry: query
                    .and_then(|q| query_param(q, "industry"))
                    .map(|v| IndustryFilter::parse(&v))
                    .unwrap_or_default(),
            },
            ["companies", slug] => Self::company(*slug),
            ["careers"] => Self::Careers,
            ["contact"] => Self::Contact,
            _ => Self::NotFound {
                path: if trimmed.is_empty() {
                    "/".to_string()
                } else {
                    trimmed.to_string()
                },
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::About => "/about".to_string(),
            Self::Companies {
                industry: IndustryFilter::All,
            } => "/companies".to_string(),
            Self::Companies {
                industry: IndustryFilter::Only(id),
            } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("industry", id)
                    .finish();
                format!("/companies?{query}")
            }
            Self::CompanyDetail { slug } => format!("/companies/{slug}"),
            Self::Careers => "/careers".to_string(),
            Self::Contact => "/contact".to_string(),
            Self::NotFound { path } => path.clone(),
        }
    }

    /// Link target with the site's route prefix applied (`#/companies/acme`).
    pub fn href(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.path())
    }

    /// Output file for the static site build, relative to the output directory.
    pub fn output_file(&self) -> String {
        match self {
            Self::Home => "index.html".to_string(),
            Self::About => "about.html".to_string(),
            Self::Companies { .. } => "companies.html".to_string(),
            Self::CompanyDetail { slug } => format!("companies/{slug}.html"),
            Self::Careers => "careers.html".to_string(),
            Self::Contact => "contact.html".to_string(),
            Self::NotFound { .. } => "404.html".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// First value of `key` in an `application/x-www-form-urlencoded` query, percent-decoded.
fn query_param(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Requests route changes. The caller never awaits or validates the outcome.
pub trait Navigator {
    fn navigate(&self, route: Route);

    fn navigate_to_company(&self, slug: &str) {
        self.navigate(Route::company(slug));
    }
}

/// Records every navigation request in order.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: RefCell<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.borrow().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.history.borrow().last().cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "navigate");
        self.history.borrow_mut().push(route);
    }
}

/// Drops every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn navigate(&self, _route: Route) {}
}
