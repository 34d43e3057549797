#![forbid(unsafe_code)]

//! `nucleus` is a headless toolkit for a multi-industry group site: a bundled static catalog,
//! the orbital industry/company visualization, and static HTML pages for every route.
//!
//! # Features
//!
//! - `render`: enable layout + SVG/HTML rendering (`nucleus::render`)
//! - `raster`: enable PNG output via pure-Rust SVG rasterization

pub use nucleus_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use nucleus_render::interaction::{EventKind, Target};
    pub use nucleus_render::model::OrbitalLayout;
    pub use nucleus_render::svg::SvgRenderOptions;
    pub use nucleus_render::{
        InteractionState, OrbitalController, OrbitalEvent, OrbitalSettings, Propagation,
        RenderedPage, SiteRenderer, layout_orbital,
    };

    use nucleus_core::{
        IconRegistry, Navigator, NullNavigator, Route, SiteConfig, SiteInfo, StaticCatalog,
    };
    use nucleus_render::site::initials;

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] nucleus_core::Error),
        #[error(transparent)]
        Render(#[from] nucleus_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several orbital SVGs
    /// can be inlined into one page without `chart-title-<id>` collisions.
    ///
    /// Unsupported characters become `-`; ids that do not start with an ASCII letter get an
    /// `o-` prefix.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "o-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "o-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "o" {
            return "o-untitled".to_string();
        }
        out.to_string()
    }

    /// Replays `events` from `Idle` and returns the resulting state. Company clicks are sent to
    /// `navigator`.
    pub fn replay_events<N: Navigator + ?Sized>(
        catalog: &StaticCatalog,
        navigator: &N,
        events: &[OrbitalEvent],
    ) -> InteractionState {
        let mut controller = OrbitalController::new(catalog, navigator);
        controller.dispatch_all(events);
        controller.into_state()
    }

    /// Bundles a catalog with the config, icon registry and SVG options needed for headless
    /// rendering.
    #[derive(Debug, Clone)]
    pub struct HeadlessSite {
        pub catalog: StaticCatalog,
        pub config: SiteConfig,
        pub icons: IconRegistry,
        pub svg: SvgRenderOptions,
    }

    impl HeadlessSite {
        pub fn new(catalog: StaticCatalog) -> Self {
            Self {
                catalog,
                config: SiteConfig::defaults(),
                icons: IconRegistry::industry_defaults(),
                svg: SvgRenderOptions::default(),
            }
        }

        /// The catalog compiled into the binary.
        pub fn bundled() -> Result<Self> {
            Ok(Self::new(StaticCatalog::bundled()?))
        }

        pub fn with_config(mut self, config: SiteConfig) -> Self {
            self.config = config;
            self
        }

        pub fn settings(&self) -> OrbitalSettings {
            OrbitalSettings::from_config(&self.config)
        }

        pub fn info(&self) -> SiteInfo {
            SiteInfo::from_config(&self.config)
        }

        pub fn with_svg_options(mut self, svg: SvgRenderOptions) -> Self {
            self.svg = svg;
            self
        }

        /// Page renderer sharing this site's catalog, config and SVG options.
        pub fn site(&self) -> SiteRenderer<'_, StaticCatalog> {
            SiteRenderer::new(&self.catalog, &self.icons, &self.config)
                .with_svg_options(self.svg.clone())
        }

        pub fn layout(&self, state: &InteractionState) -> OrbitalLayout {
            layout_orbital(&self.catalog, state, &self.settings())
        }

        /// Parses an event script (`enter:<id>,leave,click:<id>,company:<slug>`) and replays it.
        pub fn state_for_script<N: Navigator + ?Sized>(
            &self,
            script: &str,
            navigator: &N,
        ) -> Result<InteractionState> {
            let events = OrbitalEvent::parse_sequence(script)?;
            Ok(replay_events(&self.catalog, navigator, &events))
        }

        pub fn render_orbital_svg(&self, state: &InteractionState) -> Result<String> {
            self.render_orbital_svg_with(state, self.svg.clone())
        }

        pub fn render_orbital_svg_with_diagram_id(
            &self,
            state: &InteractionState,
            diagram_id: &str,
        ) -> Result<String> {
            let mut svg = self.svg.clone();
            svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            self.render_orbital_svg_with(state, svg)
        }

        fn render_orbital_svg_with(
            &self,
            state: &InteractionState,
            mut svg: SvgRenderOptions,
        ) -> Result<String> {
            let layout = self.layout(state);
            if svg.center_label.is_none() {
                svg.center_label = Some(initials(&self.info().name));
            }
            Ok(nucleus_render::render_orbital_svg(&layout, &self.icons, &svg)?)
        }

        /// Renders the SVG for the state reached by `script`; navigation requests are dropped.
        pub fn render_script_svg(&self, script: &str) -> Result<String> {
            let state = self.state_for_script(script, &NullNavigator)?;
            self.render_orbital_svg(&state)
        }

        /// HTML for a router path such as `/companies/acme` or `#/companies?industry=it`.
        pub fn render_path(&self, path: &str) -> Result<String> {
            Ok(self.site().render_route(&Route::parse(path))?)
        }

        pub fn build_site(&self) -> Result<Vec<RenderedPage>> {
            Ok(self.site().pages()?)
        }

        #[cfg(feature = "raster")]
        pub fn render_png(
            &self,
            state: &InteractionState,
            options: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            let svg = self.render_orbital_svg(state)?;
            raster::svg_to_png(&svg, options)
        }
    }
}
