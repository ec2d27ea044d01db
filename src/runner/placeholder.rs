//! Typed placeholders
//!
//! A command template may contain `${name:type}` markers. This module finds
//! them and renders user input for each one into shell-safe text.

use crate::error::{TemplateError, TemplateResult};
use regex::Regex;
use std::ops::Range;
use std::str::FromStr;
use std::sync::OnceLock;

/// `${...}` up to the next `}` that is not backslash-escaped
fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{((?:[^}\\]|\\.)+)\}").expect("placeholder regex is valid"))
}

/// Integer or decimal literal with optional sign and exponent
fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$")
            .expect("number regex is valid")
    })
}

/// The kinds of value a placeholder accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderType {
    /// Double-quoted string
    String,
    /// Inserted verbatim
    Raw,
    /// Validated number, inserted verbatim
    Number,
    /// Word list, each word shell-quoted as needed
    Args,
}

impl FromStr for PlaceholderType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(PlaceholderType::String),
            "raw" => Ok(PlaceholderType::Raw),
            "number" => Ok(PlaceholderType::Number),
            "args" => Ok(PlaceholderType::Args),
            _ => Err(()),
        }
    }
}

/// One `${name:type}` occurrence in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Text before the first `:`
    pub name: String,
    /// Text after the first `:`, verbatim; `None` when there is no `:`
    pub annotation: Option<String>,
    /// Byte range of the whole `${...}` in the template
    pub span: Range<usize>,
}

impl Placeholder {
    /// Parse the annotation into a type
    pub fn kind(&self) -> TemplateResult<PlaceholderType> {
        match self.annotation.as_deref() {
            None | Some("") => Err(TemplateError::MissingType {
                placeholder: self.name.clone(),
            }),
            Some(annotation) => {
                annotation
                    .parse()
                    .map_err(|_| TemplateError::InvalidType {
                        placeholder: self.name.clone(),
                        kind: annotation.to_string(),
                    })
            }
        }
    }
}

/// Find all placeholders in a template, left to right
pub fn scan_placeholders(template: &str) -> Vec<Placeholder> {
    placeholder_regex()
        .captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?.as_str();
            let (name, annotation) = match body.split_once(':') {
                Some((name, annotation)) => (name, Some(annotation.to_string())),
                None => (body, None),
            };
            Some(Placeholder {
                name: name.to_string(),
                annotation,
                span: whole.range(),
            })
        })
        .collect()
}

/// Type errors of every placeholder in a template, without rendering
pub fn check_template(template: &str) -> Vec<TemplateError> {
    scan_placeholders(template)
        .iter()
        .filter_map(|p| p.kind().err())
        .collect()
}

/// Render one token for a placeholder
pub fn render(token: &str, placeholder: &Placeholder) -> TemplateResult<String> {
    match placeholder.kind()? {
        PlaceholderType::String => Ok(quote_string(token)),
        PlaceholderType::Raw => Ok(token.to_string()),
        PlaceholderType::Number => {
            if number_regex().is_match(token) {
                Ok(token.to_string())
            } else {
                Err(TemplateError::InvalidNumber {
                    placeholder: placeholder.name.clone(),
                    value: token.to_string(),
                })
            }
        }
        PlaceholderType::Args => Ok(render_words(token.split_whitespace())),
    }
}

/// Quote each word only if the shell would misread it, joined by spaces
pub fn render_words<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|word| shell_words::quote(word.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap in double quotes, escaping embedded backslashes and double quotes
fn quote_string(token: &str) -> String {
    format!("\"{}\"", token.replace('\\', "\\\\").replace('"', "\\\""))
}
