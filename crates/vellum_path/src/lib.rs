//! Path selector over variant trees.
//!
//! A path is a `/`-separated sequence of segments. Each segment is an
//! element name or `*`, optionally followed by a `[KEY=VALUE]` predicate
//! (`@` before the key and quotes around the value are tolerated). Selection
//! never fails: a segment that matches nothing, or cannot be parsed at all,
//! simply contributes no results.
//!
//! ```
//! use vellum_foundation::{Bag, Variant};
//! use vellum_path::select;
//!
//! let mut root = Bag::new();
//! root.insert("name", Variant::Any("widget".to_string()));
//! let found = select(&Variant::Bag(root), "/name");
//! assert_eq!(found.len().unwrap(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use vellum_foundation::{List, Variant, mask};

/// One parsed path segment.
struct Segment {
    /// The element name; `None` is the wildcard.
    name: Option<String>,
    /// Optional `[KEY=VALUE]` filter.
    predicate: Option<(String, String)>,
}

/// Selects every node the path reaches from `root`, always as a List.
///
/// Candidates for a named segment are a Mapping's entries for that name;
/// the wildcard visits every child of any collection. Results follow the
/// collection's enumeration order, depth first.
#[must_use]
pub fn select(root: &Variant, path: &str) -> Variant {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut results = List::new();
    collect(root, &segments, &mut results);
    Variant::List(results)
}

fn collect(node: &Variant, segments: &[&str], results: &mut List) {
    let Some((head, rest)) = segments.split_first() else {
        results.push(node.clone());
        return;
    };
    let Some(segment) = parse_segment(head) else {
        return;
    };
    match &segment.name {
        Some(name) => {
            if !node.is(mask::MAPPING) {
                return;
            }
            if let Ok(matches) = node.range(name) {
                for candidate in matches.iter() {
                    if satisfies(candidate, segment.predicate.as_ref()) {
                        collect(candidate, rest, results);
                    }
                }
            }
        }
        None => {
            if let Ok(items) = node.items() {
                for item in items {
                    if satisfies(item.value, segment.predicate.as_ref()) {
                        collect(item.value, rest, results);
                    }
                }
            }
        }
    }
}

/// True if the candidate passes the predicate: it is a Mapping whose `KEY`
/// entry's canonical text equals `VALUE`.
fn satisfies(candidate: &Variant, predicate: Option<&(String, String)>) -> bool {
    let Some((key, expected)) = predicate else {
        return true;
    };
    if !candidate.is(mask::MAPPING) {
        return false;
    }
    let Ok(entry) = candidate.get_key(key) else {
        return false;
    };
    match entry.any_cast() {
        Ok(Variant::Any(actual)) => actual == *expected,
        _ => false,
    }
}

/// Parses one segment by walking its characters; `None` means the segment
/// is malformed and matches nothing.
fn parse_segment(input: &str) -> Option<Segment> {
    let (name_part, rest) = match input.find('[') {
        Some(open) => (&input[..open], &input[open..]),
        None => (input, ""),
    };
    let name = match name_part {
        "" => return None,
        "*" => None,
        other if other.contains(']') => return None,
        other => Some(other.to_string()),
    };
    let predicate = if rest.is_empty() {
        None
    } else {
        Some(parse_predicate(rest)?)
    };
    Some(Segment { name, predicate })
}

fn parse_predicate(input: &str) -> Option<(String, String)> {
    let body = input.strip_prefix('[')?.strip_suffix(']')?;
    if body.contains('[') || body.contains(']') {
        return None;
    }
    let (key, value) = body.split_once('=')?;
    let key = key.trim().trim_start_matches('@');
    if key.is_empty() {
        return None;
    }
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    Some((key.to_string(), value.to_string()))
}
