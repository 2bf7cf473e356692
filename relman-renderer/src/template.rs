//! Named-parameter string templates.
//!
//! Syntax: `$name` or `${name}` is replaced by the parameter `name`; `$$` is a literal `$`.
//! Names match `[A-Za-z_][A-Za-z0-9_]*`. A placeholder without a value is an error, never
//! left in the output.

use std::collections::BTreeMap;

use crate::error::TemplateError;

/// Values for a template's placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateParams {
    values: BTreeMap<String, String>,
}

impl TemplateParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the value of `key`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// A parsed template, validated once and substituted many times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTemplate {
    source: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Placeholder(String),
}

impl ParamTemplate {
    /// Parse `source`, rejecting malformed placeholders.
    pub fn new(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let parts = parse(&source)?;
        Ok(Self { source, parts })
    }

    /// The template text as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for part in &self.parts {
            if let Part::Placeholder(name) = part {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Replace every placeholder with its value from `params`.
    pub fn substitute(&self, params: &TemplateParams) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Placeholder(name) => {
                    let value = params.get(name).ok_or_else(|| TemplateError::MissingKey {
                        key: name.clone(),
                        template: self.source.clone(),
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Parse and substitute in one step.
pub fn render_str(source: &str, params: &TemplateParams) -> Result<String, TemplateError> {
    ParamTemplate::new(source)?.substitute(params)
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn parse(source: &str) -> Result<Vec<Part>, TemplateError> {
    let invalid = |position: usize| TemplateError::InvalidPlaceholder {
        position,
        template: source.to_string(),
    };

    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = source.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '$' {
            literal.push(c);
            continue;
        }
        let name = match chars.peek().copied() {
            Some((_, '$')) => {
                chars.next();
                literal.push('$');
                continue;
            }
            Some((_, '{')) => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, ch)) if name.is_empty() && is_name_start(ch) => name.push(ch),
                        Some((_, ch)) if !name.is_empty() && is_name_char(ch) => name.push(ch),
                        _ => return Err(invalid(pos)),
                    }
                }
                if name.is_empty() {
                    return Err(invalid(pos));
                }
                name
            }
            Some((_, ch)) if is_name_start(ch) => {
                let mut name = String::new();
                while let Some((_, ch)) = chars.peek().copied() {
                    if !is_name_char(ch) {
                        break;
                    }
                    name.push(ch);
                    chars.next();
                }
                name
            }
            _ => return Err(invalid(pos)),
        };
        if !literal.is_empty() {
            parts.push(Part::Literal(std::mem::take(&mut literal)));
        }
        parts.push(Part::Placeholder(name));
    }
    if !literal.is_empty() {
        parts.push(Part::Literal(literal));
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TemplateParams {
        TemplateParams::new().with("version", "193").with("tag", "20.1")
    }

    #[test]
    fn substitutes_bare_and_braced_names() {
        let out = render_str("$version-${tag}.zip", &params()).unwrap();
        assert_eq!(out, "193-20.1.zip");
    }

    #[test]
    fn braces_allow_adjacent_name_characters() {
        let out = render_str("${version}_final", &params()).unwrap();
        assert_eq!(out, "193_final");
    }

    #[test]
    fn double_dollar_is_literal() {
        let out = render_str("cost: $$5 for $version", &params()).unwrap();
        assert_eq!(out, "cost: $5 for 193");
    }

    #[test]
    fn missing_key_is_rejected() {
        let err = render_str("$version-$build", &params()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingKey {
                key: "build".to_string(),
                template: "$version-$build".to_string(),
            }
        );
    }

    #[test]
    fn dangling_dollar_is_invalid() {
        let err = ParamTemplate::new("price $").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidPlaceholder { position: 6, .. }));
        assert!(ParamTemplate::new("$1abc").is_err());
        assert!(ParamTemplate::new("${}").is_err());
        assert!(ParamTemplate::new("${tag").is_err());
    }

    #[test]
    fn placeholders_listed_once_in_order() {
        let tpl = ParamTemplate::new("/repos/$owner/$repo/$owner").unwrap();
        assert_eq!(tpl.placeholders(), vec!["owner", "repo"]);
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let out = render_str("https://example.com/a.zip", &TemplateParams::new()).unwrap();
        assert_eq!(out, "https://example.com/a.zip");
    }
}
