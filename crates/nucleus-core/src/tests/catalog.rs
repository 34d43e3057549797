use super::fixture_catalog;
use crate::*;
use serde_json::json;

fn slugs(companies: &[&Company]) -> Vec<String> {
    companies.iter().map(|c| c.slug.clone()).collect()
}

#[test]
fn bundled_catalog_loads_and_validates() {
    let catalog = StaticCatalog::bundled().unwrap();
    let industries = catalog.list_active_industries();
    assert_eq!(industries.len(), 12);
    assert_eq!(industries[0].icon.as_deref(), Some("heart"));
    assert_eq!(industries[11].icon.as_deref(), Some("hammer"));
    assert!(catalog.list_active_companies(None).len() >= 18);
    assert!(catalog.list_open_jobs(None).is_empty());
}

#[test]
fn active_industries_follow_display_order() {
    let catalog = fixture_catalog();
    let ids: Vec<&str> = catalog
        .list_active_industries()
        .iter()
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(ids, vec!["heart", "laptop", "fuel"]);
}

#[test]
fn missing_display_order_sorts_last() {
    let doc = json!({
        "industries": [
            { "id": "b", "name": "B", "status": "active" },
            { "id": "a", "name": "A", "status": "active", "display_order": 9 }
        ]
    });
    let catalog = StaticCatalog::from_json_str(&doc.to_string()).unwrap();
    let ids: Vec<&str> = catalog
        .list_active_industries()
        .iter()
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn active_companies_are_sorted_by_name_case_insensitively() {
    let catalog = fixture_catalog();
    assert_eq!(
        slugs(&catalog.list_active_companies(None)),
        vec!["alpha-soft", "beta-fuels", "care-trust", "zeta-tech"]
    );
    assert_eq!(
        slugs(&catalog.list_active_companies(Some("laptop"))),
        vec!["alpha-soft", "zeta-tech"]
    );
    assert!(catalog.list_active_companies(Some("nope")).is_empty());
}

#[test]
fn company_by_slug_ignores_inactive_companies() {
    let catalog = fixture_catalog();
    assert_eq!(
        catalog.company_by_slug("beta-fuels").map(|c| c.id.as_str()),
        Some("c-beta")
    );
    assert!(catalog.company_by_slug("gone-corp").is_none());
    assert!(catalog.company_by_slug("missing").is_none());
}

#[test]
fn directory_query_combines_search_and_industry() {
    let catalog = fixture_catalog();

    let all = DirectoryQuery::default().apply(&catalog);
    assert_eq!(all.len(), 4);

    let q = DirectoryQuery::new("SOFT", IndustryFilter::All);
    assert_eq!(slugs(&q.apply(&catalog)), vec!["alpha-soft"]);

    let q = DirectoryQuery::new("e", IndustryFilter::parse("fuel"));
    assert_eq!(slugs(&q.apply(&catalog)), vec!["beta-fuels"]);

    let q = DirectoryQuery::new("", IndustryFilter::parse("all"));
    assert_eq!(q.industry, IndustryFilter::All);
}

#[test]
fn job_query_filters_open_jobs() {
    let catalog = fixture_catalog();
    let all = JobQuery::default().apply(&catalog);
    assert_eq!(all.len(), 2);

    let q = JobQuery {
        search: "rust".to_string(),
        company_id: None,
    };
    assert_eq!(q.apply(&catalog)[0].id, "j1");

    let q = JobQuery {
        search: String::new(),
        company_id: Some("c-beta".to_string()),
    };
    assert!(q.apply(&catalog).is_empty());
}

#[test]
fn company_counts_cover_active_industries() {
    let catalog = fixture_catalog();
    let counts: Vec<(&str, usize)> = catalog::company_counts(&catalog)
        .into_iter()
        .map(|(i, n)| (i.id.as_str(), n))
        .collect();
    assert_eq!(counts, vec![("heart", 1), ("laptop", 2), ("fuel", 1)]);
}

#[test]
fn duplicate_slugs_are_rejected() {
    let doc = json!({
        "industries": [{ "id": "i", "name": "I", "status": "active" }],
        "companies": [
            { "id": "a", "slug": "same", "name": "A", "industry_id": "i", "status": "active" },
            { "id": "b", "slug": "same", "name": "B", "industry_id": "i", "status": "active" }
        ]
    });
    let err = StaticCatalog::from_json_str(&doc.to_string()).unwrap_err();
    assert_eq!(err.to_string(), "Invalid catalog: duplicate company slug `same`");
}

#[test]
fn dangling_industry_reference_is_rejected() {
    let doc = json!({
        "industries": [],
        "companies": [
            { "id": "a", "slug": "a", "name": "A", "industry_id": "ghost", "status": "active" }
        ]
    });
    let err = StaticCatalog::from_json_str(&doc.to_string()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid catalog: company `a` references unknown industry `ghost`"
    );
}

#[test]
fn slugs_and_industry_ids_must_be_file_name_safe() {
    let doc = json!({
        "industries": [{ "id": "i", "name": "I", "status": "active" }],
        "companies": [
            { "id": "a", "slug": "../../../tmp/x", "name": "A", "industry_id": "i", "status": "active" }
        ]
    });
    let err = StaticCatalog::from_json_str(&doc.to_string()).unwrap_err();
    assert!(matches!(err, Error::InvalidCatalog { .. }), "{err}");
    assert!(err.to_string().contains("../../../tmp/x"), "{err}");

    let doc = json!({
        "industries": [{ "id": "../x", "name": "X", "status": "active" }],
        "companies": []
    });
    let err = StaticCatalog::from_json_str(&doc.to_string()).unwrap_err();
    assert!(matches!(err, Error::InvalidCatalog { .. }), "{err}");

    for bad in ["Acme", "-acme", "a b", "a/b", ""] {
        let doc = json!({
            "industries": [{ "id": "i", "name": "I", "status": "active" }],
            "companies": [
                { "id": "a", "slug": bad, "name": "A", "industry_id": "i", "status": "active" }
            ]
        });
        assert!(
            StaticCatalog::from_json_str(&doc.to_string()).is_err(),
            "slug {bad:?} accepted"
        );
    }
}

#[test]
fn malformed_catalog_json_is_reported() {
    let err = StaticCatalog::from_json_str("{ \"industries\": 3 }").unwrap_err();
    assert!(matches!(err, Error::CatalogJson { .. }));
}
