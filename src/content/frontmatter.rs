//! Front-matter parsing and schema validation
//!
//! Every article starts with a YAML block fenced by `---` lines. The block must
//! hold exactly the declared fields; anything else is a schema violation.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_yaml::Value;

use super::error::{SchemaValidationError, SchemaViolation};

lazy_static! {
    static ref DATE_SHAPE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
}

/// Front-matter exactly as written in the file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFrontMatter {
    #[serde(deserialize_with = "yaml_string")]
    title: String,
    #[serde(deserialize_with = "yaml_string")]
    date: String,
    #[serde(default, deserialize_with = "yaml_string_list")]
    tags: Option<Vec<String>>,
    #[serde(default)]
    math: bool,
}

/// Accept only a YAML string; null, numbers and booleans are type errors
fn yaml_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string_value(Value::deserialize(deserializer)?)
}

fn yaml_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Value>>::deserialize(deserializer)?
        .map(|values| {
            values
                .into_iter()
                .map(string_value::<D::Error>)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
}

fn string_value<E: de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Err(E::custom("expected a string, found null")),
        Value::Bool(b) => Err(E::custom(format!("expected a string, found boolean `{b}`"))),
        Value::Number(n) => Err(E::custom(format!("expected a string, found number `{n}`"))),
        Value::Sequence(_) => Err(E::custom("expected a string, found a sequence")),
        Value::Mapping(_) => Err(E::custom("expected a string, found a mapping")),
        Value::Tagged(_) => Err(E::custom("expected a string, found a tagged value")),
    }
}

/// Validated front-matter of an article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    /// Title, whitespace-trimmed and never empty
    pub title: String,
    /// Publication date (calendar date, no time component)
    pub date: NaiveDate,
    /// Tags in declaration order, each trimmed and non-empty
    pub tags: Vec<String>,
    /// Whether the article needs math rendering on the client
    pub math: bool,
}

impl FrontMatter {
    /// Parse and validate the front-matter of `content`.
    /// Returns (front_matter, body) where body is everything after the closing
    /// delimiter line, byte for byte.
    pub fn parse<'a>(
        filename: &str,
        content: &'a str,
    ) -> Result<(Self, &'a str), SchemaValidationError> {
        Self::parse_inner(content).map_err(|violation| SchemaValidationError {
            filename: filename.to_string(),
            violation,
        })
    }

    fn parse_inner(content: &str) -> Result<(Self, &str), SchemaViolation> {
        let (yaml, body) = split(content)?;
        let raw: RawFrontMatter =
            serde_yaml::from_str(yaml).map_err(|e| SchemaViolation::Yaml(e.to_string()))?;
        Ok((Self::validate(raw)?, body))
    }

    fn validate(raw: RawFrontMatter) -> Result<Self, SchemaViolation> {
        let title = raw.title.trim();
        if title.is_empty() {
            return Err(SchemaViolation::EmptyTitle);
        }

        let date = parse_date(&raw.date)?;

        let mut tags = Vec::new();
        for (i, tag) in raw.tags.unwrap_or_default().iter().enumerate() {
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(SchemaViolation::EmptyTag(i + 1));
            }
            tags.push(tag.to_string());
        }

        Ok(Self {
            title: title.to_string(),
            date,
            tags,
            math: raw.math,
        })
    }
}

/// Split a document into its YAML block and the body that follows it
fn split(content: &str) -> Result<(&str, &str), SchemaViolation> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (first, rest) = content.split_once('\n').unwrap_or((content, ""));
    if first.trim_end() != "---" {
        return Err(SchemaViolation::MissingFrontMatter);
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(SchemaViolation::UnterminatedFrontMatter)
}

/// Parse a strict `YYYY-MM-DD` date that must exist on the calendar
pub fn parse_date(s: &str) -> Result<NaiveDate, SchemaViolation> {
    if !DATE_SHAPE.is_match(s) {
        return Err(SchemaViolation::MalformedDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| SchemaViolation::InvalidDate(s.to_string()))
}
