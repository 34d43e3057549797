use crate::{Error, Result};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig(Value);

impl Default for SiteConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl SiteConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Built-in site defaults: the orbital canvas geometry, group contact details and the resume
    /// upload policy.
    pub fn defaults() -> Self {
        Self(json!({
            "orbital": {
                "width": 700.0,
                "height": 700.0,
                "centerX": 350.0,
                "centerY": 300.0,
                "industryRadius": 220.0,
                "companyRadius": 290.0,
                "labelRadius": 310.0,
                "childSpacing": 15.0,
                "industryLabelChars": 26,
                "companyLabelChars": 22,
                "industryNodeRadius": 20.0,
                "activeIndustryNodeRadius": 26.0,
                "hitRadius": 40.0,
                "companyNodeRadius": 8.0,
                "centerRadius": 52.0,
                "labelOffset": 10.0,
                "industryLabelGap": 35.0,
                "lineHeight": 11.0
            },
            "site": {
                "name": "Jayashri Group",
                "legalName": "Jayashri Group of Companies",
                "email": "info@jayashrigroup.com",
                "phone": "+91 9960002836",
                "location": "Maharashtra, India",
                "founded": "2023",
                "routePrefix": "#"
            },
            "uploads": {
                "maxBytes": 5242880,
                "allowedTypes": [
                    "application/pdf",
                    "application/msword",
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                ]
            }
        }))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Defaults with a YAML override document merged on top.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let overrides: Value = serde_yaml::from_str(text).map_err(|e| Error::InvalidConfig {
            format: "yaml",
            message: e.to_string(),
        })?;
        Ok(Self::with_overrides(&overrides))
    }

    /// Defaults with a JSON5 override document merged on top.
    pub fn from_json5_str(text: &str) -> Result<Self> {
        let overrides: Value = json5::from_str(text).map_err(|e| Error::InvalidConfig {
            format: "json5",
            message: e.to_string(),
        })?;
        Ok(Self::with_overrides(&overrides))
    }

    pub fn with_overrides(overrides: &Value) -> Self {
        let mut cfg = Self::defaults();
        cfg.deep_merge(overrides);
        cfg
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.lookup(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        let v = self.lookup(dotted_path)?;
        v.as_f64()
            .or_else(|| v.as_i64().map(|n| n as f64))
            .or_else(|| v.as_u64().map(|n| n as f64))
    }

    pub fn get_u64(&self, dotted_path: &str) -> Option<u64> {
        let v = self.lookup(dotted_path)?;
        v.as_u64()
            .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
    }

    pub fn get_str_list(&self, dotted_path: &str) -> Option<Vec<String>> {
        let arr = self.lookup(dotted_path)?.as_array()?;
        Some(
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        )
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Configs are objects; coerce anything else so this never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            for (k, v) in incoming_map {
                match base_map.get_mut(k) {
                    Some(existing) => deep_merge_value(existing, v),
                    None => {
                        base_map.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (base_slot, incoming_value) => {
            *base_slot = incoming_value.clone();
        }
    }
}

/// Group identity and contact details used by page chrome and form payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteInfo {
    pub name: String,
    pub legal_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub founded: String,
    /// Prefix put in front of route paths when emitting links (`#` for hash routing).
    pub route_prefix: String,
}

impl SiteInfo {
    pub fn from_config(cfg: &SiteConfig) -> Self {
        let s = |path: &str, default: &str| cfg.get_str(path).unwrap_or(default).to_string();
        Self {
            name: s("site.name", "Jayashri Group"),
            legal_name: s("site.legalName", "Jayashri Group of Companies"),
            email: s("site.email", "info@jayashrigroup.com"),
            phone: s("site.phone", "+91 9960002836"),
            location: s("site.location", "Maharashtra, India"),
            founded: s("site.founded", "2023"),
            route_prefix: s("site.routePrefix", "#"),
        }
    }
}
