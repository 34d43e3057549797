//! Icon key -> glyph registry.
//!
//! Every renderer (orbital SVG, directory cards, detail hero) resolves industry icon keys through
//! one registry. Resolution is total:
//! - a missing key resolves as [`MISSING_ICON_KEY`],
//! - an unknown key resolves to the registry's default glyph.

use indexmap::IndexMap;

/// Key used when an industry has no icon key at all.
pub const MISSING_ICON_KEY: &str = "building";

/// A stroke glyph drawn in a 24x24 box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub name: &'static str,
    /// SVG path data (`d`), stroked with `currentColor`.
    pub path: &'static str,
}

#[derive(Debug, Clone)]
pub struct IconRegistry {
    glyphs: IndexMap<String, Glyph>,
    default: Glyph,
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self::industry_defaults()
    }
}

impl IconRegistry {
    pub fn new(default: Glyph) -> Self {
        Self {
            glyphs: IndexMap::new(),
            default,
        }
    }

    /// The glyph set used by the bundled industries.
    pub fn industry_defaults() -> Self {
        let mut reg = Self::new(Glyph {
            name: "building-2",
            path: "M6 22V4a2 2 0 0 1 2-2h8a2 2 0 0 1 2 2v18Z M6 12H4a2 2 0 0 0-2 2v8h4 M18 9h2a2 2 0 0 1 2 2v11h-4 M10 6h4 M10 10h4 M10 14h4 M10 18h4",
        });
        for (key, name, path) in [
            (
                "heart",
                "heart",
                "M19 14c1.49-1.46 3-3.21 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.76 0-3 .5-4.5 2-1.5-1.5-2.74-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4.05 3 5.5l7 7Z",
            ),
            (
                "laptop",
                "laptop",
                "M20 16V7a2 2 0 0 0-2-2H6a2 2 0 0 0-2 2v9m16 0H4m16 0 1.28 2.55a1 1 0 0 1-.9 1.45H3.62a1 1 0 0 1-.9-1.45L4 16",
            ),
            (
                "fuel",
                "fuel",
                "M3 22h12 M4 9h10 M14 22V4a2 2 0 0 0-2-2H6a2 2 0 0 0-2 2v18 M14 13h2a2 2 0 0 1 2 2v2a2 2 0 0 0 4 0V9.83a2 2 0 0 0-.59-1.42L18 5",
            ),
            (
                "briefcase",
                "briefcase",
                "M16 20V4a2 2 0 0 0-2-2h-4a2 2 0 0 0-2 2v16 M4 6h16a2 2 0 0 1 2 2v10a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2Z",
            ),
            (
                "building",
                "hard-hat",
                "M2 18a1 1 0 0 0 1 1h18a1 1 0 0 0 1-1v-2a1 1 0 0 0-1-1H3a1 1 0 0 0-1 1v2z M10 10V5a1 1 0 0 1 1-1h2a1 1 0 0 1 1 1v5 M4 15v-3a6 6 0 0 1 6-6 M14 6a6 6 0 0 1 6 6v3",
            ),
            (
                "shirt",
                "shirt",
                "M20.38 3.46 16 2a4 4 0 0 1-8 0L3.62 3.46a2 2 0 0 0-1.34 2.23l.58 3.47a1 1 0 0 0 .99.84H6v10c0 1.1.9 2 2 2h8a2 2 0 0 0 2-2V10h2.15a1 1 0 0 0 .99-.84l.58-3.47a2 2 0 0 0-1.34-2.23z",
            ),
            (
                "sun",
                "sun",
                "M12 8a4 4 0 1 0 0 8a4 4 0 1 0 0-8Z M12 2v2 M12 20v2 M4.93 4.93l1.41 1.41 M17.66 17.66l1.41 1.41 M2 12h2 M20 12h2 M6.34 17.66l-1.41 1.41 M19.07 4.93l-1.41 1.41",
            ),
            (
                "pill",
                "pill",
                "m10.5 20.5 10-10a4.95 4.95 0 1 0-7-7l-10 10a4.95 4.95 0 1 0 7 7Z M8.5 8.5l7 7",
            ),
            (
                "apple",
                "apple",
                "M12 20.94c1.5 0 2.75 1.06 4 1.06 3 0 6-8 6-12.22A4.91 4.91 0 0 0 17 5c-2.22 0-4 1.44-5 2-1-.56-2.78-2-5-2a4.9 4.9 0 0 0-5 4.78C2 14 5 22 8 22c1.25 0 2.5-1.06 4-1.06Z M10 2c1 .5 2 2 2 5",
            ),
            (
                "ship",
                "ship",
                "M2 21c.6.5 1.2 1 2.5 1 2.5 0 2.5-2 5-2 1.3 0 1.9.5 2.5 1 .6.5 1.2 1 2.5 1 2.5 0 2.5-2 5-2 1.3 0 1.9.5 2.5 1 M19.38 20A11.6 11.6 0 0 0 21 14l-9-4-9 4c0 2.9.94 5.34 2.81 7.76 M19 13V7a2 2 0 0 0-2-2H7a2 2 0 0 0-2 2v6 M12 10v4 M12 2v3",
            ),
            (
                "film",
                "film",
                "M3 3h18v18H3Z M7 3v18 M3 7.5h4 M3 12h18 M3 16.5h4 M17 3v18 M17 7.5h4 M17 16.5h4",
            ),
            (
                "hammer",
                "hammer",
                "m15 12-8.373 8.373a1 1 0 1 1-3-3L12 9 M18 15l4-4 M21.5 11.5l-1.914-1.914A2 2 0 0 1 19 8.172V7l-2.26-2.26a6 6 0 0 0-4.202-1.756L9 2.96l.92.82A6.18 6.18 0 0 1 12 8.4V10l2 2h1.172a2 2 0 0 1 1.414.586L18.5 14.5",
            ),
        ] {
            reg.register(key, Glyph { name, path });
        }
        reg
    }

    pub fn register(&mut self, key: impl Into<String>, glyph: Glyph) {
        self.glyphs.insert(key.into(), glyph);
    }

    pub fn default_glyph(&self) -> &Glyph {
        &self.default
    }

    pub fn get(&self, key: &str) -> Option<&Glyph> {
        self.glyphs.get(key)
    }

    pub fn resolve(&self, key: Option<&str>) -> &Glyph {
        let key = key.filter(|k| !k.is_empty()).unwrap_or(MISSING_ICON_KEY);
        self.glyphs.get(key).unwrap_or(&self.default)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.glyphs.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve_to_their_glyph() {
        let reg = IconRegistry::industry_defaults();
        assert_eq!(reg.resolve(Some("laptop")).name, "laptop");
        assert_eq!(reg.resolve(Some("building")).name, "hard-hat");
        assert_eq!(reg.keys().count(), 12);
    }

    #[test]
    fn missing_key_uses_building_and_unknown_key_uses_default() {
        let reg = IconRegistry::industry_defaults();
        assert_eq!(reg.resolve(None).name, "hard-hat");
        assert_eq!(reg.resolve(Some("")).name, "hard-hat");
        assert_eq!(reg.resolve(Some("rocket")).name, "building-2");
    }

    #[test]
    fn empty_registry_always_falls_back() {
        let reg = IconRegistry::new(Glyph {
            name: "dot",
            path: "M12 12h.01",
        });
        assert_eq!(reg.resolve(None).name, "dot");
        assert_eq!(reg.resolve(Some("heart")).name, "dot");
    }
}
