use nucleus_core::{HistoryNavigator, Route, SiteConfig, StaticCatalog};
use nucleus_render::geometry::polar_to_cartesian;
use nucleus_render::model::{LayoutPoint, TextAnchor};
use nucleus_render::{
    InteractionState, OrbitalController, OrbitalEvent, OrbitalSettings, Propagation,
    layout_orbital,
};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture_catalog() -> StaticCatalog {
    let path = workspace_root()
        .join("fixtures")
        .join("catalog")
        .join("three_industries.json");
    let text = std::fs::read_to_string(&path).expect("fixture");
    StaticCatalog::from_json_str(&text).expect("catalog ok")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn idle_layout_places_industries_on_thirds() {
    let catalog = fixture_catalog();
    let layout = layout_orbital(
        &catalog,
        &InteractionState::Idle,
        &OrbitalSettings::default(),
    );

    let ids: Vec<&str> = layout.industries.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["heart", "laptop", "fuel"]);
    let angles: Vec<f64> = layout.industries.iter().map(|n| n.angle).collect();
    assert_eq!(angles, vec![-90.0, 30.0, 150.0]);

    assert!(layout.companies.is_empty());
    assert_eq!(layout.company_ring_radius, None);
    assert!(layout.industries.iter().all(|n| !n.active && n.radius == 20.0));
    assert!(layout.industries.iter().all(|n| n.stroke_width == 1.5));
    assert!(layout.industries.iter().all(|n| n.hit_radius == 40.0));
    assert_eq!(layout.legend.industries, 3);
    assert_eq!(layout.legend.companies, 4);

    let laptop = &layout.industries[1];
    assert!(close(laptop.center.x, 350.0 + 220.0 * 30f64.to_radians().cos()));
    assert!(close(laptop.center.y, 410.0));
}

#[test]
fn industry_labels_wrap_above_the_node() {
    let catalog = fixture_catalog();
    let layout = layout_orbital(
        &catalog,
        &InteractionState::Idle,
        &OrbitalSettings::default(),
    );

    let laptop = &layout.industries[1];
    assert_eq!(laptop.label.anchor, TextAnchor::Middle);
    assert!(close(laptop.label.x, laptop.center.x));
    assert!(close(laptop.label.y, laptop.center.y - 35.0));
    let lines: Vec<(&str, f64)> = laptop
        .label
        .lines
        .iter()
        .map(|l| (l.text.as_str(), l.dy))
        .collect();
    assert_eq!(
        lines,
        vec![("Information Technology &", -4.0), ("Digital Solutions", 11.0)]
    );

    let fuel = &layout.industries[2];
    assert_eq!(fuel.label.lines.len(), 1);
    assert_eq!(fuel.label.lines[0].text, "Fuel & Energy");
}

#[test]
fn clicking_laptop_locks_it_and_fans_out_its_companies() {
    let catalog = fixture_catalog();
    let navigator = HistoryNavigator::new();
    let mut controller = OrbitalController::new(&catalog, &navigator);

    assert_eq!(
        controller.dispatch(&OrbitalEvent::click("laptop")),
        Propagation::Continue
    );
    assert_eq!(
        controller.state(),
        &InteractionState::Locked("laptop".to_string())
    );
    assert!(navigator.history().is_empty());

    let settings = OrbitalSettings::default();
    let layout = layout_orbital(&catalog, controller.state(), &settings);

    assert_eq!(layout.company_ring_radius, Some(290.0));
    let active = layout.active_industry().expect("laptop is active");
    assert_eq!(active.id, "laptop");
    assert_eq!(active.radius, 26.0);
    assert_eq!(active.stroke_width, 3.0);

    let names: Vec<&str> = layout.companies.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["alpha Tech", "Beta Soft"]);
    assert!(layout.companies.iter().all(|c| c.industry_id == "laptop"));

    let angles: Vec<f64> = layout.companies.iter().map(|c| c.angle).collect();
    assert_eq!(angles, vec![22.5, 37.5]);

    let center = LayoutPoint { x: 350.0, y: 300.0 };
    for company in &layout.companies {
        assert!(company.right_side);
        assert_eq!(company.radius, 8.0);
        assert_eq!(company.label.anchor, TextAnchor::Start);
        let node = polar_to_cartesian(company.angle, 290.0, center);
        let label = polar_to_cartesian(company.angle, 310.0, center);
        assert!(close(company.center.x, node.x));
        assert!(close(company.center.y, node.y));
        assert!(close(company.label.x, label.x + 10.0));
        assert!(close(company.label.y, label.y));
        assert_eq!(company.label.lines[0].dy, 0.0);
    }
    assert_eq!(layout.companies[0].href, "#/companies/alpha-tech");
}

#[test]
fn left_half_companies_anchor_at_end() {
    let catalog = fixture_catalog();
    let layout = layout_orbital(
        &catalog,
        &InteractionState::Hovering("fuel".to_string()),
        &OrbitalSettings::default(),
    );
    assert_eq!(layout.companies.len(), 1);
    let company = &layout.companies[0];
    assert_eq!(company.angle, 150.0);
    assert!(!company.right_side);
    assert_eq!(company.label.anchor, TextAnchor::End);
    let label = polar_to_cartesian(150.0, 310.0, LayoutPoint { x: 350.0, y: 300.0 });
    assert!(close(company.label.x, label.x - 10.0));
}

#[test]
fn top_industry_children_straddle_the_vertical() {
    let catalog = fixture_catalog();
    let layout = layout_orbital(
        &catalog,
        &InteractionState::Locked("heart".to_string()),
        &OrbitalSettings::default(),
    );
    // A single child sits exactly on -90°, which is not strictly inside the right half.
    assert_eq!(layout.companies.len(), 1);
    assert_eq!(layout.companies[0].angle, -90.0);
    assert_eq!(layout.companies[0].label.anchor, TextAnchor::End);
}

#[test]
fn company_click_navigates_and_never_reaches_the_industry() {
    let catalog = fixture_catalog();
    let navigator = HistoryNavigator::new();
    let mut controller = OrbitalController::new(&catalog, &navigator);

    controller.dispatch(&OrbitalEvent::enter("laptop"));
    let outcome = controller.dispatch(&OrbitalEvent::click_company("beta-soft"));
    assert_eq!(outcome, Propagation::Stop);
    assert_eq!(
        controller.state(),
        &InteractionState::Hovering("laptop".to_string())
    );
    assert_eq!(navigator.last(), Some(Route::company("beta-soft")));

    controller.dispatch(&OrbitalEvent::click("laptop"));
    controller.dispatch(&OrbitalEvent::click_company("alpha-tech"));
    assert_eq!(
        controller.state(),
        &InteractionState::Locked("laptop".to_string())
    );
    assert_eq!(
        navigator.history(),
        vec![Route::company("beta-soft"), Route::company("alpha-tech")]
    );
}

#[test]
fn scripted_sequence_matches_state_machine() {
    let catalog = fixture_catalog();
    let navigator = HistoryNavigator::new();
    let mut controller = OrbitalController::new(&catalog, &navigator);

    let events = OrbitalEvent::parse_sequence(
        "enter:heart,click:heart,enter:fuel,leave,click:laptop,click:laptop",
    )
    .expect("valid script");
    controller.dispatch_all(&events);
    assert_eq!(controller.into_state(), InteractionState::Idle);
}

#[test]
fn stale_active_id_renders_no_children() {
    let catalog = fixture_catalog();
    let layout = layout_orbital(
        &catalog,
        &InteractionState::Locked("retired".to_string()),
        &OrbitalSettings::default(),
    );
    assert_eq!(layout.industries.len(), 3);
    assert!(layout.active_industry().is_none());
    assert!(layout.companies.is_empty());
}

#[test]
fn empty_catalog_short_circuits() {
    let catalog = StaticCatalog::from_json_str("{}").expect("empty catalog");
    let layout = layout_orbital(
        &catalog,
        &InteractionState::Hovering("anything".to_string()),
        &OrbitalSettings::default(),
    );
    assert!(layout.industries.is_empty());
    assert!(layout.companies.is_empty());
    assert_eq!(layout.legend.industries, 0);
    assert_eq!(layout.legend.companies, 0);
}

#[test]
fn settings_follow_config_overrides() {
    let yaml = std::fs::read_to_string(
        workspace_root()
            .join("fixtures")
            .join("config")
            .join("compact.yaml"),
    )
    .expect("fixture");
    let config = SiteConfig::from_yaml_str(&yaml).expect("config ok");
    let settings = OrbitalSettings::from_config(&config);
    assert_eq!(settings.industry_radius, 200.0);
    assert_eq!(settings.company_radius, 270.0);
    assert_eq!(settings.center, LayoutPoint { x: 350.0, y: 300.0 });
    assert_eq!(settings.route_prefix, "/app");

    let catalog = fixture_catalog();
    let layout = layout_orbital(
        &catalog,
        &InteractionState::Locked("fuel".to_string()),
        &settings,
    );
    assert_eq!(layout.industry_ring_radius, 200.0);
    assert_eq!(layout.company_ring_radius, Some(270.0));
    assert_eq!(layout.companies[0].href, "/app/companies/green-fuels");
}

#[test]
fn layout_serializes_to_json() {
    let catalog = fixture_catalog();
    let layout = layout_orbital(
        &catalog,
        &InteractionState::Locked("laptop".to_string()),
        &OrbitalSettings::default(),
    );
    let json = serde_json::to_string(&layout).expect("serialize");
    let back = nucleus_render::layout_from_json(&json).expect("deserialize");
    assert_eq!(back.state, layout.state);
    assert_eq!(back.legend, layout.legend);
    let slugs: Vec<&str> = back.companies.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["alpha-tech", "beta-soft"]);
}
