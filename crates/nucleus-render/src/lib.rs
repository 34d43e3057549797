#![forbid(unsafe_code)]

//! Orbital layout, SVG rendering and static HTML pages for the group site.

pub mod geometry;
pub mod interaction;
pub mod model;
pub mod orbital;
pub mod site;
pub mod svg;
pub mod text;

pub use interaction::{InteractionState, OrbitalController, OrbitalEvent, Propagation};
pub use model::OrbitalLayout;
pub use orbital::{OrbitalSettings, layout_orbital};
pub use site::{RenderedPage, SiteRenderer};
pub use svg::{SvgRenderOptions, render_orbital_svg};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid orbital event `{token}`: {message}")]
    InvalidEvent { token: String, message: String },
    #[error("invalid layout: {message}")]
    InvalidLayout { message: String },
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parses a layout previously serialized with `serde_json`.
pub fn layout_from_json(text: &str) -> Result<OrbitalLayout> {
    Ok(serde_json::from_str(text)?)
}
