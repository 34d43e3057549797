mod catalog;
mod forms;

use crate::*;
use serde_json::json;

/// Three industries (one inactive), five companies (one inactive), two jobs (one closed).
pub(crate) fn fixture_catalog() -> StaticCatalog {
    let doc = json!({
        "industries": [
            { "id": "fuel", "name": "Energy", "icon": "fuel", "status": "active", "display_order": 3 },
            { "id": "heart", "name": "Welfare", "icon": "heart", "status": "active", "display_order": 1 },
            { "id": "old", "name": "Retired", "status": "inactive", "display_order": 2 },
            { "id": "laptop", "name": "Technology", "icon": "laptop", "status": "active", "display_order": 2 }
        ],
        "companies": [
            { "id": "c-zeta", "slug": "zeta-tech", "name": "Zeta Tech", "industry_id": "laptop", "status": "active" },
            { "id": "c-alpha", "slug": "alpha-soft", "name": "alpha Soft", "industry_id": "laptop", "status": "active",
              "incorporation_date": "2024-01-18", "email": "hello@alpha.example" },
            { "id": "c-beta", "slug": "beta-fuels", "name": "Beta Fuels", "industry_id": "fuel", "status": "active" },
            { "id": "c-gone", "slug": "gone-corp", "name": "Gone Corp", "industry_id": "laptop", "status": "inactive" },
            { "id": "c-care", "slug": "care-trust", "name": "Care Trust", "industry_id": "heart", "status": "active" }
        ],
        "jobs": [
            { "id": "j1", "company_id": "c-zeta", "title": "Rust Engineer", "status": "open", "created_at": "2025-01-01" },
            { "id": "j2", "company_id": "c-beta", "title": "Plant Engineer", "status": "closed", "created_at": "2025-01-02" },
            { "id": "j3", "company_id": null, "title": "Group Accountant", "status": "open", "created_at": "2025-01-03" }
        ]
    });
    StaticCatalog::from_json_str(&doc.to_string()).unwrap()
}
