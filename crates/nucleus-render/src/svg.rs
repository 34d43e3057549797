//! SVG output for [`OrbitalLayout`].

use crate::model::{CompanyNodeLayout, IndustryNodeLayout, LabelLayout, OrbitalLayout};
use crate::{Error, Result};
use nucleus_core::IconRegistry;
use std::fmt::Write as _;

mod util;

use util::{escape_xml, fmt};

const ICON_BOX: f64 = 24.0;
const ICON_SIZE: f64 = 20.0;
pub const DEFAULT_BACKGROUND: &str = "#10243f";
pub const DEFAULT_HINT: &str = "Tap an industry to explore companies";

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root element id; also scopes the embedded stylesheet.
    pub diagram_id: Option<String>,
    /// Accessible title (`<title>`).
    pub title: Option<String>,
    /// CSS color for the canvas background. `None` uses [`DEFAULT_BACKGROUND`].
    pub background: Option<String>,
    /// Text drawn on the center disc.
    pub center_label: Option<String>,
    pub hint: Option<String>,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            title: None,
            background: None,
            center_label: None,
            hint: Some(DEFAULT_HINT.to_string()),
        }
    }
}

fn orbital_css(diagram_id: &str) -> String {
    let id = escape_xml(diagram_id);
    let font = r#""Inter","Segoe UI",Helvetica,Arial,sans-serif"#;
    let primary = "#1e3a5f";
    let accent = "#d4a017";
    let foreground = "#f8fafc";
    let muted = "#94a3b8";

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"#{id}{{font-family:{font};font-size:10px;fill:{foreground};}}"#
    );
    let _ = write!(
        &mut out,
        r#"#{id} .orbital-ring{{fill:none;stroke:{foreground};stroke-width:1;opacity:0.1;}}"#
    );
    let _ = write!(
        &mut out,
        r#"#{id} .industry-node{{cursor:pointer;}}#{id} .industry-hitbox{{fill:transparent;}}"#
    );
    let _ = write!(
        &mut out,
        r#"#{id} .industry-disc{{fill:{primary};stroke:{accent};}}#{id} .industry-node.active .industry-disc{{fill:{accent};}}"#
    );
    let _ = write!(
        &mut out,
        r#"#{id} .industry-icon{{fill:none;stroke:{foreground};stroke-width:2;stroke-linecap:round;stroke-linejoin:round;opacity:0.7;}}#{id} .industry-node.active .industry-icon{{stroke:{primary};opacity:1;}}"#
    );
    let _ = write!(
        &mut out,
        r#"#{id} .industry-label{{font-size:10px;fill:{foreground};pointer-events:none;}}"#
    );
    let _ = write!(
        &mut out,
        r#"#{id} .company-node{{cursor:pointer;}}#{id} .company-dot{{fill:{accent};}}#{id} .company-label{{font-size:9px;font-weight:500;fill:{foreground};}}"#
    );
    let _ = write!(
        &mut out,
        r#"#{id} .center-disc{{fill:{primary};stroke:{accent};stroke-width:2;}}#{id} .center-label{{font-size:14px;font-weight:700;fill:{accent};}}"#
    );
    let _ = write!(
        &mut out,
        r#"#{id} .legend-industry{{fill:{primary};stroke:{accent};stroke-width:2;}}#{id} .legend-company{{fill:{accent};}}#{id} .legend-text,#{id} .orbital-hint{{font-size:12px;fill:{muted};}}"#
    );
    out
}

/// Renders `layout` as a standalone SVG document. Icons are resolved through `icons`.
pub fn render_orbital_svg(
    layout: &OrbitalLayout,
    icons: &IconRegistry,
    options: &SvgRenderOptions,
) -> Result<String> {
    if !(layout.width.is_finite() && layout.width > 0.0)
        || !(layout.height.is_finite() && layout.height > 0.0)
    {
        return Err(Error::InvalidLayout {
            message: format!(
                "canvas must have a positive size, got {}x{}",
                layout.width, layout.height
            ),
        });
    }

    let diagram_id = options.diagram_id.as_deref().unwrap_or("orbital");
    let diagram_id_esc = escape_xml(diagram_id);
    let title = options
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty());
    let background = options.background.as_deref().unwrap_or(DEFAULT_BACKGROUND);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" role="img" aria-roledescription="orbital""#,
        id = diagram_id_esc,
        w = fmt(layout.width),
        h = fmt(layout.height),
    );
    if title.is_some() {
        let _ = write!(
            &mut out,
            r#" aria-labelledby="chart-title-{id}""#,
            id = diagram_id_esc
        );
    }
    let _ = write!(
        &mut out,
        r#" data-state="{state}" style="background-color: {bg};">"#,
        state = match &layout.state {
            crate::InteractionState::Idle => "idle",
            crate::InteractionState::Hovering(_) => "hovering",
            crate::InteractionState::Locked(_) => "locked",
        },
        bg = escape_xml(background),
    );
    if let Some(title) = title {
        let _ = write!(
            &mut out,
            r#"<title id="chart-title-{id}">{text}</title>"#,
            id = diagram_id_esc,
            text = escape_xml(title)
        );
    }
    let _ = write!(&mut out, "<style>{}</style>", orbital_css(diagram_id));

    let cx = fmt(layout.center.x);
    let cy = fmt(layout.center.y);
    let _ = write!(
        &mut out,
        r#"<circle class="orbital-ring orbital-ring-industry" cx="{cx}" cy="{cy}" r="{r}"/>"#,
        r = fmt(layout.industry_ring_radius)
    );
    if let Some(r) = layout.company_ring_radius {
        let _ = write!(
            &mut out,
            r#"<circle class="orbital-ring orbital-ring-company" cx="{cx}" cy="{cy}" r="{r}"/>"#,
            r = fmt(r)
        );
    }

    for node in &layout.industries {
        render_industry(&mut out, node, icons);
    }

    if !layout.companies.is_empty() {
        out.push_str(r#"<g class="company-nodes">"#);
        for node in &layout.companies {
            render_company(&mut out, node);
        }
        out.push_str("</g>");
    }

    out.push_str(r#"<g class="center-mark">"#);
    let _ = write!(
        &mut out,
        r#"<circle class="center-disc" cx="{cx}" cy="{cy}" r="{r}"/>"#,
        r = fmt(layout.center_radius)
    );
    if let Some(label) = options.center_label.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(
            &mut out,
            r#"<text class="center-label" x="{cx}" y="{cy}" text-anchor="middle" dominant-baseline="middle">{text}</text>"#,
            text = escape_xml(label)
        );
    }
    out.push_str("</g>");

    render_legend(&mut out, layout, options.hint.as_deref());

    out.push_str("</svg>");
    Ok(out)
}

fn render_industry(out: &mut String, node: &IndustryNodeLayout, icons: &IconRegistry) {
    let x = fmt(node.center.x);
    let y = fmt(node.center.y);
    let _ = write!(
        out,
        r#"<g class="industry-node{active_class}" data-industry-id="{id}" data-active="{active}">"#,
        active_class = if node.active { " active" } else { "" },
        id = escape_xml(&node.id),
        active = node.active,
    );
    let _ = write!(
        out,
        r#"<circle class="industry-hitbox" cx="{x}" cy="{y}" r="{r}"/>"#,
        r = fmt(node.hit_radius)
    );
    let _ = write!(
        out,
        r#"<circle class="industry-disc" cx="{x}" cy="{y}" r="{r}" stroke-width="{sw}"/>"#,
        r = fmt(node.radius),
        sw = fmt(node.stroke_width)
    );
    let glyph = icons.resolve(node.icon.as_deref());
    let _ = write!(
        out,
        r#"<g class="industry-icon" data-icon="{name}" transform="translate({tx}, {ty}) scale({s})"><path d="{d}"/></g>"#,
        name = escape_xml(glyph.name),
        tx = fmt(node.center.x - ICON_SIZE / 2.0),
        ty = fmt(node.center.y - ICON_SIZE / 2.0),
        s = fmt(ICON_SIZE / ICON_BOX),
        d = escape_xml(glyph.path),
    );
    render_label(out, "industry-label", &node.label, None);
    out.push_str("</g>");
}

fn render_company(out: &mut String, node: &CompanyNodeLayout) {
    let _ = write!(
        out,
        r#"<a class="company-node" href="{href}" data-company-slug="{slug}" data-industry-id="{industry}">"#,
        href = escape_xml(&node.href),
        slug = escape_xml(&node.slug),
        industry = escape_xml(&node.industry_id),
    );
    let _ = write!(
        out,
        r#"<circle class="company-dot" cx="{x}" cy="{y}" r="{r}"/>"#,
        x = fmt(node.center.x),
        y = fmt(node.center.y),
        r = fmt(node.radius)
    );
    render_label(out, "company-label", &node.label, Some("middle"));
    out.push_str("</a>");
}

fn render_label(out: &mut String, class: &str, label: &LabelLayout, baseline: Option<&str>) {
    let x = fmt(label.x);
    let _ = write!(
        out,
        r#"<text class="{class}" x="{x}" y="{y}" text-anchor="{anchor}""#,
        y = fmt(label.y),
        anchor = label.anchor.as_str()
    );
    if let Some(baseline) = baseline {
        let _ = write!(out, r#" dominant-baseline="{baseline}""#);
    }
    out.push('>');
    for line in &label.lines {
        let _ = write!(
            out,
            r#"<tspan x="{x}" dy="{dy}">{text}</tspan>"#,
            dy = fmt(line.dy),
            text = escape_xml(&line.text)
        );
    }
    out.push_str("</text>");
}

fn render_legend(out: &mut String, layout: &OrbitalLayout, hint: Option<&str>) {
    let mid = layout.width / 2.0;
    let y = layout.height - 40.0;
    let _ = write!(
        out,
        r#"<g class="orbital-legend" transform="translate({x}, {y})">"#,
        x = fmt(mid - 130.0),
        y = fmt(y)
    );
    let _ = write!(
        out,
        r#"<circle class="legend-industry" cx="6" cy="0" r="6"/><text class="legend-text" x="18" y="0" dominant-baseline="middle">Industries ({n})</text>"#,
        n = layout.legend.industries
    );
    let _ = write!(
        out,
        r#"<circle class="legend-company" cx="146" cy="0" r="5"/><text class="legend-text" x="158" y="0" dominant-baseline="middle">Companies ({n})</text>"#,
        n = layout.legend.companies
    );
    out.push_str("</g>");
    if let Some(hint) = hint.filter(|s| !s.is_empty()) {
        let _ = write!(
            out,
            r#"<text class="orbital-hint" x="{x}" y="{y}" text-anchor="middle">{text}</text>"#,
            x = fmt(mid),
            y = fmt(y + 24.0),
            text = escape_xml(hint)
        );
    }
}
