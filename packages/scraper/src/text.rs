//! String-level helpers shared by the field extractors.
//!
//! These operate on text already pulled out of the document tree. None of
//! them are HTML parsers: [`strip_html_fragments`] in particular removes
//! bracketed spans left to right without tracking nesting.

use amdb_film_models::RoleMap;

use crate::ScrapeError;

/// Removes the leftmost `<`..`>` span, where `>` is the first one after the
/// `<`. Returns `None` when there is no such span.
#[must_use]
pub fn strip_first_fragment(text: &str) -> Option<String> {
    let start = text.find('<')?;
    let len = text[start..].find('>')?;
    let mut stripped = String::with_capacity(text.len() - len - 1);
    stripped.push_str(&text[..start]);
    stripped.push_str(&text[start + len + 1..]);
    Some(stripped)
}

/// Repeatedly applies [`strip_first_fragment`] until no bracketed span is
/// left.
///
/// `"a<b>c</b>d"` becomes `"acd"`. Text without a `<`..`>` span is returned
/// unchanged.
#[must_use]
pub fn strip_html_fragments(text: &str) -> String {
    let mut current = text.to_owned();
    while let Some(next) = strip_first_fragment(&current) {
        current = next;
    }
    current
}

/// Collapses every run of whitespace into a single space and trims the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decodes the handful of character references that survive serialisation
/// of inline markup.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Parses a running time of the form `"<H>h <M>min"` into minutes.
///
/// Either segment may be missing and counts as zero: `"1h"` is 60,
/// `"45min"` is 45 and `"2h 15min"` is 135.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if a segment is present but not a number,
/// or the total does not fit in a `u32`.
pub fn parse_length_minutes(text: &str) -> Result<u32, ScrapeError> {
    let mut hours = 0;
    let mut minutes = 0;

    for segment in text.split_whitespace() {
        if segment.contains('h') {
            hours = parse_segment(&segment.replace('h', ""), text)?;
        } else if segment.contains("min") {
            minutes = parse_segment(&segment.replace("min", ""), text)?;
        }
    }

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| ScrapeError::parse(format!("running time '{text}' is out of range")))
}

fn parse_segment(segment: &str, full: &str) -> Result<u32, ScrapeError> {
    if segment.is_empty() {
        return Ok(0);
    }
    segment
        .parse()
        .map_err(|e| ScrapeError::parse(format!("invalid running time '{full}': {e}")))
}

/// Extracts the role annotation from a raw credit string, e.g.
/// `"(screenplay) &"` becomes `"screenplay"`.
///
/// Takes the text between the first `(` and the first `)` after it. An
/// unclosed `(` keeps everything after it, trimmed. Without any `(` the
/// trimmed input is returned.
#[must_use]
pub fn extract_role(credit: &str) -> String {
    let Some(start) = credit.find('(') else {
        return credit.trim().to_owned();
    };
    let inner = &credit[start + 1..];
    match inner.find(')') {
        Some(end) => inner[..end].to_owned(),
        None => inner.trim().to_owned(),
    }
}

/// Pairs the `i`th name with the `i`th role, collecting every role a person
/// holds in page order.
///
/// # Errors
///
/// Returns [`ScrapeError::MalformedCredits`] if the two lists differ in
/// length. Neither list is ever truncated or padded.
pub fn zip_names_and_roles(names: Vec<String>, roles: Vec<String>) -> Result<RoleMap, ScrapeError> {
    if names.len() != roles.len() {
        return Err(ScrapeError::MalformedCredits {
            names: names.len(),
            roles: roles.len(),
        });
    }

    let mut map = RoleMap::new();
    for (name, role) in names.into_iter().zip(roles) {
        map.entry(name).or_default().push(role);
    }
    Ok(map)
}
