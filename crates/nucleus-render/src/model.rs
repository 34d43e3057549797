use crate::interaction::InteractionState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// One `<tspan>`: relative vertical offset from the previous line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLine {
    pub text: String,
    pub dy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLayout {
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
    pub lines: Vec<LabelLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryNodeLayout {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub angle: f64,
    pub center: LayoutPoint,
    pub radius: f64,
    pub stroke_width: f64,
    /// Transparent hitbox bridging the gap to the company ring.
    pub hit_radius: f64,
    pub active: bool,
    pub label: LabelLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyNodeLayout {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub industry_id: String,
    pub angle: f64,
    pub center: LayoutPoint,
    pub radius: f64,
    pub right_side: bool,
    /// Navigation target for the company detail route.
    pub href: String,
    pub label: LabelLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendCounts {
    pub industries: usize,
    pub companies: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalLayout {
    pub width: f64,
    pub height: f64,
    pub center: LayoutPoint,
    pub industry_ring_radius: f64,
    /// Present only while an industry is active.
    pub company_ring_radius: Option<f64>,
    pub center_radius: f64,
    pub state: InteractionState,
    pub industries: Vec<IndustryNodeLayout>,
    pub companies: Vec<CompanyNodeLayout>,
    pub legend: LegendCounts,
}

impl OrbitalLayout {
    pub fn active_industry(&self) -> Option<&IndustryNodeLayout> {
        self.industries.iter().find(|n| n.active)
    }
}
