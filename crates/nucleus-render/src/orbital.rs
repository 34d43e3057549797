//! Orbital layout: industries on an inner ring, the active industry's companies fanned out on an
//! outer ring.

use crate::geometry::{
    angle_for_child_with_spacing, angle_for_index, is_right_half, polar_to_cartesian,
};
use crate::interaction::InteractionState;
use crate::model::{
    CompanyNodeLayout, IndustryNodeLayout, LabelLayout, LabelLine, LayoutPoint, LegendCounts,
    OrbitalLayout, TextAnchor,
};
use crate::text::wrap_label;
use nucleus_core::{Company, DataProvider, Industry, Route, SiteConfig};

const INDUSTRY_STROKE: f64 = 1.5;
const ACTIVE_INDUSTRY_STROKE: f64 = 3.0;

/// Canvas geometry, read from the `orbital.*` config keys (plus `site.routePrefix` for links).
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalSettings {
    pub width: f64,
    pub height: f64,
    pub center: LayoutPoint,
    pub industry_radius: f64,
    pub company_radius: f64,
    pub label_radius: f64,
    pub child_spacing: f64,
    pub industry_label_chars: usize,
    pub company_label_chars: usize,
    pub industry_node_radius: f64,
    pub active_industry_node_radius: f64,
    pub hit_radius: f64,
    pub company_node_radius: f64,
    pub center_radius: f64,
    pub label_offset: f64,
    pub industry_label_gap: f64,
    pub line_height: f64,
    pub route_prefix: String,
}

impl Default for OrbitalSettings {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 700.0,
            center: LayoutPoint { x: 350.0, y: 300.0 },
            industry_radius: 220.0,
            company_radius: 290.0,
            label_radius: 310.0,
            child_spacing: 15.0,
            industry_label_chars: 26,
            company_label_chars: 22,
            industry_node_radius: 20.0,
            active_industry_node_radius: 26.0,
            hit_radius: 40.0,
            company_node_radius: 8.0,
            center_radius: 52.0,
            label_offset: 10.0,
            industry_label_gap: 35.0,
            line_height: 11.0,
            route_prefix: "#".to_string(),
        }
    }
}

impl OrbitalSettings {
    /// Missing or mistyped keys keep their default.
    pub fn from_config(config: &SiteConfig) -> Self {
        let d = Self::default();
        let f = |key: &str, default: f64| {
            config
                .get_f64(&format!("orbital.{key}"))
                .filter(|v| v.is_finite())
                .unwrap_or(default)
        };
        let chars = |key: &str, default: usize| {
            config
                .get_u64(&format!("orbital.{key}"))
                .and_then(|v| usize::try_from(v).ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };
        Self {
            width: f("width", d.width),
            height: f("height", d.height),
            center: LayoutPoint {
                x: f("centerX", d.center.x),
                y: f("centerY", d.center.y),
            },
            industry_radius: f("industryRadius", d.industry_radius),
            company_radius: f("companyRadius", d.company_radius),
            label_radius: f("labelRadius", d.label_radius),
            child_spacing: f("childSpacing", d.child_spacing),
            industry_label_chars: chars("industryLabelChars", d.industry_label_chars),
            company_label_chars: chars("companyLabelChars", d.company_label_chars),
            industry_node_radius: f("industryNodeRadius", d.industry_node_radius),
            active_industry_node_radius: f(
                "activeIndustryNodeRadius",
                d.active_industry_node_radius,
            ),
            hit_radius: f("hitRadius", d.hit_radius),
            company_node_radius: f("companyNodeRadius", d.company_node_radius),
            center_radius: f("centerRadius", d.center_radius),
            label_offset: f("labelOffset", d.label_offset),
            industry_label_gap: f("industryLabelGap", d.industry_label_gap),
            line_height: f("lineHeight", d.line_height),
            route_prefix: config
                .get_str("site.routePrefix")
                .map(str::to_string)
                .unwrap_or(d.route_prefix),
        }
    }
}

/// Lays out the visualization for `state`.
///
/// Only active industries are placed. Companies are placed only for the active industry, and
/// only when that id names a displayed industry.
pub fn layout_orbital<P: DataProvider + ?Sized>(
    provider: &P,
    state: &InteractionState,
    settings: &OrbitalSettings,
) -> OrbitalLayout {
    let industries = provider.list_active_industries();
    let active_id = state.active_industry();
    let total = industries.len();

    let mut industry_nodes = Vec::with_capacity(total);
    let mut company_nodes = Vec::new();

    for (index, industry) in industries.iter().enumerate() {
        let angle = angle_for_index(index, total);
        let active = active_id == Some(industry.id.as_str());
        industry_nodes.push(layout_industry(industry, angle, active, settings));

        if active {
            let companies = provider.list_active_companies(Some(&industry.id));
            company_nodes = layout_companies(&companies, angle, settings);
        }
    }

    let legend = LegendCounts {
        industries: total,
        companies: provider.list_active_companies(None).len(),
    };

    tracing::debug!(
        industries = industry_nodes.len(),
        companies = company_nodes.len(),
        active = active_id.unwrap_or("-"),
        "orbital layout"
    );

    OrbitalLayout {
        width: settings.width,
        height: settings.height,
        center: settings.center,
        industry_ring_radius: settings.industry_radius,
        company_ring_radius: active_id.map(|_| settings.company_radius),
        center_radius: settings.center_radius,
        state: state.clone(),
        industries: industry_nodes,
        companies: company_nodes,
        legend,
    }
}

fn layout_industry(
    industry: &Industry,
    angle: f64,
    active: bool,
    settings: &OrbitalSettings,
) -> IndustryNodeLayout {
    let center = polar_to_cartesian(angle, settings.industry_radius, settings.center);
    let label = LabelLayout {
        x: center.x,
        y: center.y - settings.industry_label_gap,
        anchor: TextAnchor::Middle,
        lines: label_lines(&industry.name, settings.industry_label_chars, -4.0, settings),
    };
    IndustryNodeLayout {
        id: industry.id.clone(),
        name: industry.name.clone(),
        icon: industry.icon.clone(),
        angle,
        center,
        radius: if active {
            settings.active_industry_node_radius
        } else {
            settings.industry_node_radius
        },
        stroke_width: if active {
            ACTIVE_INDUSTRY_STROKE
        } else {
            INDUSTRY_STROKE
        },
        hit_radius: settings.hit_radius,
        active,
        label,
    }
}

fn layout_companies(
    companies: &[&Company],
    parent_angle: f64,
    settings: &OrbitalSettings,
) -> Vec<CompanyNodeLayout> {
    let count = companies.len();
    if count == 0 {
        return Vec::new();
    }
    companies
        .iter()
        .enumerate()
        .map(|(i, company)| {
            let angle = angle_for_child_with_spacing(i, count, parent_angle, settings.child_spacing);
            let center = polar_to_cartesian(angle, settings.company_radius, settings.center);
            let label_pos = polar_to_cartesian(angle, settings.label_radius, settings.center);
            let right_side = is_right_half(angle);
            let (dx, anchor) = if right_side {
                (settings.label_offset, TextAnchor::Start)
            } else {
                (-settings.label_offset, TextAnchor::End)
            };
            CompanyNodeLayout {
                id: company.id.clone(),
                slug: company.slug.clone(),
                name: company.name.clone(),
                industry_id: company.industry_id.clone(),
                angle,
                center,
                radius: settings.company_node_radius,
                right_side,
                href: Route::company(company.slug.as_str()).href(&settings.route_prefix),
                label: LabelLayout {
                    x: label_pos.x + dx,
                    y: label_pos.y,
                    anchor,
                    lines: label_lines(&company.name, settings.company_label_chars, 0.0, settings),
                },
            }
        })
        .collect()
}

fn label_lines(text: &str, max_chars: usize, first_dy: f64, settings: &OrbitalSettings) -> Vec<LabelLine> {
    wrap_label(text, max_chars)
        .enumerate()
        .map(|(i, line)| LabelLine {
            text: line.into_owned(),
            dy: if i == 0 { first_dy } else { settings.line_height },
        })
        .collect()
}
