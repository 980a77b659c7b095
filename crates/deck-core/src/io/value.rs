//! Lexing of the leaf value syntax: scalars, booleans, bracketed vectors
//! and property-name lists with braced units.

use crate::model::{ParseKeywordError, PropertyRequest};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    #[error("invalid number: '{0}'")]
    Number(String),
    #[error("invalid integer: '{0}'")]
    Integer(String),
    #[error("invalid boolean: '{0}' (expected 'true' or 'false')")]
    Boolean(String),
    #[error("vector must be enclosed in brackets: '{0}'")]
    Brackets(String),
    #[error("malformed unit annotation in '{0}' (expected 'name{{unit}}')")]
    UnitAnnotation(String),
    #[error(transparent)]
    Keyword(#[from] ParseKeywordError),
}

pub fn parse_float(s: &str) -> Result<f64, ValueError> {
    s.trim()
        .parse()
        .map_err(|_| ValueError::Number(s.trim().to_string()))
}

pub fn parse_int<T: std::str::FromStr>(s: &str) -> Result<T, ValueError> {
    s.trim()
        .parse()
        .map_err(|_| ValueError::Integer(s.trim().to_string()))
}

pub fn parse_bool(s: &str) -> Result<bool, ValueError> {
    match s.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ValueError::Boolean(other.to_string())),
    }
}

/// Splits a bracketed list into its raw entries. Entries may be separated
/// by commas, whitespace, or both.
fn bracketed_entries(s: &str) -> Result<Vec<&str>, ValueError> {
    let trimmed = s.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| ValueError::Brackets(trimmed.to_string()))?;
    Ok(inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|entry| !entry.is_empty())
        .collect())
}

/// Parses a bracketed vector of floats, such as `[1.0, 0.5, 0.0]`.
pub fn parse_vector(s: &str) -> Result<Vec<f64>, ValueError> {
    bracketed_entries(s)?.into_iter().map(parse_float).collect()
}

/// Parses a bracketed vector of nonnegative integers, such as `[0, 1, 2]`.
pub fn parse_index_vector(s: &str) -> Result<Vec<usize>, ValueError> {
    bracketed_entries(s)?.into_iter().map(parse_int).collect()
}

/// Parses a bracketed property list. Each entry is a property name with an
/// optional braced output unit: `[ time, temperature{kelvin}, potential ]`.
pub fn parse_property_list(s: &str) -> Result<Vec<PropertyRequest>, ValueError> {
    bracketed_entries(s)?
        .into_iter()
        .map(parse_property_request)
        .collect()
}

fn parse_property_request(entry: &str) -> Result<PropertyRequest, ValueError> {
    match entry.find('{') {
        None => {
            if entry.contains('}') {
                return Err(ValueError::UnitAnnotation(entry.to_string()));
            }
            Ok(PropertyRequest::bare(entry))
        }
        Some(open) => {
            let name = &entry[..open];
            let unit = entry[open + 1..]
                .strip_suffix('}')
                .ok_or_else(|| ValueError::UnitAnnotation(entry.to_string()))?;
            if name.is_empty() || unit.is_empty() || unit.contains('{') {
                return Err(ValueError::UnitAnnotation(entry.to_string()));
            }
            Ok(PropertyRequest::in_unit(name, unit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vector_accepts_commas_and_whitespace() {
        assert_eq!(parse_vector("[1.0, 2.5, 3]").unwrap(), vec![1.0, 2.5, 3.0]);
        assert_eq!(parse_vector("[ 1.0 2.5  3 ]").unwrap(), vec![1.0, 2.5, 3.0]);
        assert_eq!(parse_vector("[]").unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn parse_vector_requires_brackets() {
        assert!(matches!(
            parse_vector("1.0, 2.0"),
            Err(ValueError::Brackets(_))
        ));
    }

    #[test]
    fn parse_vector_rejects_malformed_numbers() {
        assert!(matches!(
            parse_vector("[1.0, two]"),
            Err(ValueError::Number(_))
        ));
    }

    #[test]
    fn parse_index_vector_rejects_negative_and_fractional_entries() {
        assert_eq!(parse_index_vector("[0, 1, 5]").unwrap(), vec![0, 1, 5]);
        assert!(parse_index_vector("[-1]").is_err());
        assert!(parse_index_vector("[0.5]").is_err());
    }

    #[test]
    fn parse_bool_accepts_only_lowercase_keywords() {
        assert!(parse_bool(" true ").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert!(parse_bool("True").is_err());
    }

    #[test]
    fn parse_property_list_reads_names_and_braced_units() {
        let list = parse_property_list("[ time, temperature{kelvin}, potential ]").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0], PropertyRequest::bare("time"));
        assert_eq!(list[1], PropertyRequest::in_unit("temperature", "kelvin"));
        assert_eq!(list[2], PropertyRequest::bare("potential"));
    }

    #[test]
    fn parse_property_list_rejects_unbalanced_braces() {
        assert!(parse_property_list("[ temperature{kelvin ]").is_err());
        assert!(parse_property_list("[ temperature}kelvin{ ]").is_err());
        assert!(parse_property_list("[ {kelvin} ]").is_err());
    }
}
