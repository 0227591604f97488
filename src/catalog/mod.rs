// src/catalog/mod.rs
//! Endpoint catalog: every known remote fact source as data.

pub mod animals;
pub mod art;
pub mod developer;
pub mod finance;
pub mod knowledge;
pub mod quotes;
pub mod weather;

use anyhow::{bail, Result};
use std::collections::BTreeMap;

use crate::config::FetchConfig;
use crate::fetch::types::EndpointDescriptor;

/// Name -> descriptor registry. Names are unique; ordering carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, EndpointDescriptor>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// All built-in entries.
    pub fn builtin() -> Self {
        let mut c = Self::empty();
        let groups = [
            weather::entries(),
            animals::entries(),
            quotes::entries(),
            knowledge::entries(),
            art::entries(),
            finance::entries(),
            developer::entries(),
        ];
        for d in groups.into_iter().flatten() {
            // Built-in names are distinct; a clash is a programming error caught by tests.
            if let Err(e) = c.register(d) {
                tracing::error!(error = %e, "duplicate built-in catalog entry");
            }
        }
        c
    }

    /// Built-in entries with config overrides applied.
    pub fn from_config(cfg: &FetchConfig) -> Result<Self> {
        let mut c = Self::builtin();
        c.apply_overrides(cfg)?;
        Ok(c)
    }

    pub fn register(&mut self, d: EndpointDescriptor) -> Result<()> {
        if d.name.trim().is_empty() {
            bail!("catalog entry with empty name");
        }
        if self.entries.contains_key(&d.name) {
            bail!("duplicate catalog entry `{}`", d.name);
        }
        self.entries.insert(d.name.clone(), d);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Closest known name, for "did you mean" hints.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let needle = name.to_ascii_lowercase();
        self.names()
            .map(|n| (n, strsim::jaro_winkler(&needle, n)))
            .filter(|(_, score)| *score >= 0.75)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(n, _)| n)
    }

    /// Replace URL templates of named entries. Unknown names are rejected so
    /// typos in config don't go unnoticed.
    pub fn apply_overrides(&mut self, cfg: &FetchConfig) -> Result<()> {
        for (name, ov) in &cfg.endpoints {
            let Some(d) = self.entries.get_mut(name) else {
                bail!("config overrides unknown endpoint `{name}`");
            };
            tracing::debug!(endpoint = %name, url = %ov.url, "endpoint url overridden");
            *d = d.clone().with_url(ov.url.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointOverride;
    use crate::fetch::template::API_KEY;
    use crate::fetch::types::{CredentialPlacement, Fact};

    #[test]
    fn builtin_names_are_unique_and_present() {
        let c = Catalog::builtin();
        let total: usize = [
            weather::entries().len(),
            animals::entries().len(),
            quotes::entries().len(),
            knowledge::entries().len(),
            art::entries().len(),
            finance::entries().len(),
            developer::entries().len(),
        ]
        .iter()
        .sum();
        assert_eq!(c.len(), total);
        assert!(c.get("cat_fact").is_some());
        assert!(c.get("trivia").is_some());
    }

    #[test]
    fn every_builtin_url_template_parses() {
        for d in Catalog::builtin().iter() {
            assert!(d.url.as_str().starts_with("http"), "{}", d.name);
            assert!(!d.summary.is_empty(), "{} lacks summary", d.name);
            let uses_key = d.url.placeholders().iter().any(|p| p == API_KEY);
            let key_in_url = d
                .credential
                .as_ref()
                .is_some_and(|c| c.placement == CredentialPlacement::Url);
            assert_eq!(
                uses_key, key_in_url,
                "{}: {{api_key}} placeholder and URL credential must come together",
                d.name
            );
        }
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut c = Catalog::empty();
        let d = EndpointDescriptor::json("x", "https://x.test", |_| Ok(Fact::text("x")));
        c.register(d.clone()).unwrap();
        assert!(c.register(d).is_err());
    }

    #[test]
    fn suggest_finds_close_name() {
        let c = Catalog::builtin();
        assert_eq!(c.suggest("cat_fcat"), Some("cat_fact"));
        assert_eq!(c.suggest("qqqqqqqqqqqq"), None);
    }

    #[test]
    fn overrides_replace_url_and_reject_unknown() {
        let mut cfg = FetchConfig::default();
        cfg.endpoints.insert(
            "cat_fact".into(),
            EndpointOverride {
                url: "http://127.0.0.1:1/fact".into(),
            },
        );
        let c = Catalog::from_config(&cfg).unwrap();
        assert_eq!(c.get("cat_fact").unwrap().url.as_str(), "http://127.0.0.1:1/fact");

        cfg.endpoints.insert(
            "no_such".into(),
            EndpointOverride {
                url: "http://x".into(),
            },
        );
        assert!(Catalog::from_config(&cfg).is_err());
    }
}
