// src/fetch/template.rs
//! URL templates with `{name}` placeholders.

use crate::fetch::error::FetchError;
use crate::fetch::types::Params;

/// Placeholder reserved for the resolved credential.
pub const API_KEY: &str = "api_key";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

enum Segment<'a> {
    Lit(&'a str),
    Var(&'a str),
}

impl UrlTemplate {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn segments(&self) -> Result<Vec<Segment<'_>>, String> {
        let mut out = Vec::new();
        let mut rest = self.0.as_str();
        while let Some(open) = rest.find('{') {
            if open > 0 {
                out.push(Segment::Lit(&rest[..open]));
            }
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| format!("unterminated placeholder in `{}`", self.0))?;
            let name = after[..close].trim();
            if name.is_empty() {
                return Err(format!("empty placeholder in `{}`", self.0));
            }
            out.push(Segment::Var(name));
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            out.push(Segment::Lit(rest));
        }
        Ok(out)
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for seg in self.segments().unwrap_or_default() {
            if let Segment::Var(n) = seg {
                if !names.iter().any(|x| x == n) {
                    names.push(n.to_string());
                }
            }
        }
        names
    }

    /// Substitute placeholders: caller params first, then defaults. `{api_key}`
    /// is filled only from the resolved credential, never from params.
    /// Every value is percent-encoded.
    pub fn render(
        &self,
        params: &Params,
        defaults: &Params,
        credential: Option<&str>,
    ) -> Result<String, FetchError> {
        let segs = self.segments().map_err(FetchError::Configuration)?;
        let mut out = String::with_capacity(self.0.len() + 16);
        for seg in segs {
            match seg {
                Segment::Lit(s) => out.push_str(s),
                Segment::Var(name) => {
                    let value = if name == API_KEY {
                        credential.ok_or_else(|| {
                            FetchError::Configuration(
                                "`{api_key}` needs a URL credential".to_string(),
                            )
                        })?
                    } else {
                        params.get(name).or_else(|| defaults.get(name)).ok_or_else(|| {
                            FetchError::Configuration(format!("missing parameter `{name}`"))
                        })?
                    };
                    out.push_str(&encode(value));
                }
            }
        }
        Ok(out)
    }
}

fn encode(v: &str) -> String {
    url::form_urlencoded::byte_serialize(v.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
