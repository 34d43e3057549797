#![forbid(unsafe_code)]

//! Static catalog, routes, configuration and form handling for the group site (headless).
//!
//! Design goals:
//! - all data is bundled at build time and never mutated
//! - every consumer goes through the [`DataProvider`] trait, so tests run on synthetic catalogs
//! - runtime-agnostic async form submission (no specific executor required)

pub mod catalog;
pub mod config;
pub mod error;
pub mod forms;
pub mod icons;
pub mod model;
pub mod routes;

pub use catalog::{DataProvider, DirectoryQuery, IndustryFilter, JobQuery, StaticCatalog};
pub use config::{SiteConfig, SiteInfo};
pub use error::{Error, Result};
pub use forms::{
    ApplicationForm, ContactForm, FormError, FormSubmitter, LogMailer, Mailer, Notice,
    ResumeAttachment, UploadPolicy,
};
pub use icons::{Glyph, IconRegistry};
pub use model::{Company, Industry, Job, JobStatus, Status};
pub use routes::{HistoryNavigator, Navigator, NullNavigator, Route};

#[cfg(test)]
mod tests;
