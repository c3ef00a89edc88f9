//! Front-matter parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

/// Accept any scalar where text is expected, so `id: 42` or `title: 2024` still load
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

/// Front-matter data from a post
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub description: Option<String>,
    /// Posts are published unless marked otherwise
    pub published: bool,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            id: None,
            title: None,
            date: None,
            slug: None,
            description: None,
            published: true,
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content).
    ///
    /// `---` fences hold YAML, `+++` fences hold TOML. Content without a
    /// closed fence has no front-matter.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if let Some((yaml, body)) = split_fenced(content, "---") {
            return Ok((Self::from_yaml(yaml)?, body));
        }

        if let Some((toml_src, body)) = split_fenced(content, "+++") {
            return Ok((Self::from_toml(toml_src)?, body));
        }

        Ok((FrontMatter::default(), content))
    }

    fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }
        serde_yaml::from_str(yaml).context("invalid YAML front-matter")
    }

    fn from_toml(src: &str) -> Result<Self> {
        let mut table: toml::Table = src.parse().context("invalid TOML front-matter")?;

        // Native TOML datetimes become their RFC 3339 text
        for (_, value) in table.iter_mut() {
            if let toml::Value::Datetime(dt) = value {
                *value = toml::Value::String(dt.to_string());
            }
        }

        toml::Value::Table(table)
            .try_into()
            .context("invalid TOML front-matter")
    }
}

/// Split `fence\n...\nfence\n body` into the fenced text and the body
fn split_fenced<'a>(content: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let rest = content.strip_prefix(fence)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            let body = &rest[offset + line.len()..];
            return Some((&rest[..offset], body.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }

    None
}
