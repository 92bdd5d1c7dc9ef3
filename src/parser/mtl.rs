//! MTL material file parsing.
//!
//! MTL files are brace-delimited blocks of `key = value` lines. Parameters live
//! in flat blocks:
//!
//! ```text
//! {
//!   MAT_0042 = {
//!     Name = BRONZE
//!     Parameters = {
//!       {
//!         Name = TEMPERATURE
//!         Type = Real
//!         Default = 0.000000e+00 F
//!         Access = Full
//!       },
//!     }
//!   }
//! }
//! ```
//!
//! The scanner is line-oriented and only recognizes blocks whose lines are all
//! `key = value` pairs, so enclosing structure such as `Parameters = {` is
//! skipped rather than parsed.

use crate::models::{MaterialRecord, ParamType, ParamValue, ParameterRecord};
use crate::parser::ParseError;
use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// `key = value [remainder]` on a single line.
static FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\S+)\s*=\s*(\S+)(?:\s+(.*?))?\s*$").expect("field regex is valid")
});

/// Outer-block header: `ID = { Name = NAME` with NAME last on its line.
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(\S+)\s*=\s*\{\s*Name\s*=\s*(\S+)[ \t]*\r?$").expect("header regex is valid")
});

/// One `key = value [remainder]` line inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub remainder: Option<&'a str>,
}

/// Parses an MTL file from disk.
///
/// # Errors
///
/// Returns errors for:
/// - File not found or not a regular file
/// - File not readable as UTF-8 text
/// - A `Real`/`Integer` default that is not a number (see [`ParseError`])
pub fn parse_mtl_file(path: &Path) -> Result<MaterialRecord> {
    if !path.is_file() {
        anyhow::bail!("Material file not found: {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read material file: {}", path.display()))?;

    parse_mtl_str(&content)
        .with_context(|| format!("Failed to parse material file: {}", path.display()))
}

/// Parses MTL text into a material record.
///
/// Never fails on structure: text without a header gets the sentinel identity
/// and text without parameter blocks gets an empty table.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] when a numeric default cannot be coerced.
pub fn parse_mtl_str(content: &str) -> std::result::Result<MaterialRecord, ParseError> {
    let mut record = match extract_identity(content) {
        Some((id, name)) => MaterialRecord::new(id, name),
        None => {
            debug!("No material header found, using sentinel identity");
            MaterialRecord::unknown()
        }
    };

    for fields in extract_blocks(content) {
        let mut builder = ParameterBuilder::default();
        for field in &fields {
            builder.absorb(field);
        }

        if let Some(parameter) = builder.build()? {
            trace!(name = %parameter.name, "parsed parameter");
            record.insert(parameter);
        }
    }

    debug!(
        material_id = %record.material_id,
        material_name = %record.material_name,
        parameters = record.parameters.len(),
        "parsed material"
    );

    Ok(record)
}

/// Finds the material id and name from the outer-block header.
///
/// The first character is skipped; it is the file's own opening brace.
fn extract_identity(content: &str) -> Option<(String, String)> {
    let mut chars = content.chars();
    chars.next()?;

    HEADER_REGEX
        .captures(chars.as_str())
        .map(|captures| (captures[1].to_string(), captures[2].to_string()))
}

/// Splits a line into key, value and optional trailing text.
pub(crate) fn parse_field(line: &str) -> Option<Field<'_>> {
    let captures = FIELD_REGEX.captures(line)?;

    Some(Field {
        key: captures.get(1)?.as_str(),
        value: captures.get(2)?.as_str(),
        remainder: captures
            .get(3)
            .map(|m| m.as_str())
            .filter(|text| !text.is_empty()),
    })
}

/// Collects the flat `{ ... }` blocks made entirely of field lines.
///
/// Blank lines inside a block are tolerated. Any other line (or a nested `{`)
/// abandons the open block. Empty blocks are dropped.
pub(crate) fn extract_blocks(content: &str) -> Vec<Vec<Field<'_>>> {
    let mut blocks = Vec::new();
    let mut open: Option<Vec<Field<'_>>> = None;

    for line in content.lines() {
        let trimmed = line.trim();

        if let Some(mut fields) = open.take() {
            if let Some(after) = trimmed.strip_prefix('}') {
                if !fields.is_empty() {
                    blocks.push(fields);
                }
                open = open_block(after);
                continue;
            }

            if trimmed.is_empty() {
                open = Some(fields);
                continue;
            }

            if !trimmed.contains('{') {
                if let Some(field) = parse_field(trimmed) {
                    fields.push(field);
                    open = Some(fields);
                    continue;
                }
            }

            trace!(line = trimmed, "abandoning block");
        }

        open = open_block(trimmed);
    }

    blocks
}

/// Starts a block at the last `{` of a line, if what follows it is empty or a field.
fn open_block(line: &str) -> Option<Vec<Field<'_>>> {
    let start = line.rfind('{')?;
    let rest = line[start + 1..].trim();

    if rest.is_empty() {
        return Some(Vec::new());
    }

    if rest.contains('}') {
        return None;
    }

    parse_field(rest).map(|field| vec![field])
}

/// Accumulates the fields of one block into a [`ParameterRecord`].
#[derive(Debug, Default)]
struct ParameterBuilder {
    name: Option<String>,
    type_tag: Option<String>,
    default: Option<String>,
    access: Option<String>,
    unit: Option<String>,
}

impl ParameterBuilder {
    fn absorb(&mut self, field: &Field<'_>) {
        let value = Some(field.value.to_string());
        match field.key {
            "Name" => self.name = value,
            "Type" => self.type_tag = value,
            "Default" => self.default = value,
            "Access" => self.access = value,
            other => trace!(key = other, "ignoring unknown field"),
        }

        if let Some(remainder) = field.remainder {
            self.unit = Some(remainder.to_string());
        }
    }

    /// Returns `None` for blocks that are not parameters (no `Name` or `Default`).
    fn build(self) -> std::result::Result<Option<ParameterRecord>, ParseError> {
        let (Some(name), Some(raw_default)) = (self.name, self.default) else {
            return Ok(None);
        };

        let param_type = self
            .type_tag
            .as_deref()
            .map_or_else(|| ParamType::Other(String::new()), ParamType::from_tag);

        let (default, unit) = coerce_default(&name, &param_type, raw_default, self.unit)?;

        Ok(Some(ParameterRecord {
            name,
            param_type,
            default,
            unit,
            access: self.access,
        }))
    }
}

/// Converts a raw default token into a typed value.
///
/// For `String` parameters the trailing text is not a unit but the rest of a
/// quoted value containing a space, so it is joined back onto the default.
fn coerce_default(
    name: &str,
    param_type: &ParamType,
    raw: String,
    unit: Option<String>,
) -> std::result::Result<(ParamValue, Option<String>), ParseError> {
    let invalid = |raw: &str| ParseError::InvalidNumber {
        parameter: name.to_string(),
        value: raw.to_string(),
        expected: param_type.clone(),
    };

    match param_type {
        ParamType::Real => {
            let value = raw.parse::<f64>().map_err(|_| invalid(&raw))?;
            Ok((ParamValue::Real(value), unit))
        }
        ParamType::Integer => {
            let value = raw.parse::<i64>().map_err(|_| invalid(&raw))?;
            Ok((ParamValue::Integer(value), unit))
        }
        ParamType::String => {
            let joined = match unit {
                Some(rest) => format!("{raw} {rest}"),
                None => raw,
            };
            Ok((ParamValue::Text(strip_quotes(&joined).to_string()), None))
        }
        ParamType::Other(_) => Ok((ParamValue::Text(raw), unit)),
    }
}

/// Removes one leading and one trailing quote character (`'` or `"`).
fn strip_quotes(text: &str) -> &str {
    let is_quote = |c: char| c == '\'' || c == '"';
    let text = text.strip_prefix(is_quote).unwrap_or(text);
    text.strip_suffix(is_quote).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRONZE_MTL: &str = "{
  MAT_0042 = {
    Name = BRONZE
    Parameters = {
      {
        Name = PTC_MATERIAL_DESCRIPTION
        Type = String
        Default = 'BRONZE'
        Access = Full
      },
      {
        Name = TEMPERATURE
        Type = Real
        Default = 0.000000e+00 F
        Access = Full
      },
      {
        Name = PTC_POISSON_RATIO
        Type = Real
        Default = 3.400000e-01
        Access = Full
      }
    }
  }
}
";

    #[test]
    fn test_parse_field() {
        let field = parse_field("  Default = 0.000000e+00 F").unwrap();
        assert_eq!(field.key, "Default");
        assert_eq!(field.value, "0.000000e+00");
        assert_eq!(field.remainder, Some("F"));

        let field = parse_field("Name = TEMPERATURE   ").unwrap();
        assert_eq!(field.value, "TEMPERATURE");
        assert_eq!(field.remainder, None);

        assert!(parse_field("{").is_none());
        assert!(parse_field("just text").is_none());
        assert!(parse_field("Name =").is_none());
    }

    #[test]
    fn test_extract_blocks_skips_enclosing_structure() {
        let blocks = extract_blocks(BRONZE_MTL);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0][0].key, "Name");
        assert_eq!(blocks[0][0].value, "PTC_MATERIAL_DESCRIPTION");
        assert_eq!(blocks[1].len(), 4);
    }

    #[test]
    fn test_extract_blocks_tolerates_blank_lines_and_inline_open() {
        let text = "{ Name = A\n\n  Type = Integer\n  Default = 1\n}\n{\n}\n";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].len(), 3);
    }

    #[test]
    fn test_extract_blocks_abandons_on_plain_line() {
        let text = "{\n  Name = A\n  not a field\n  Default = 1\n}\n";
        assert!(extract_blocks(text).is_empty());
    }

    #[test]
    fn test_parse_real_with_unit() {
        let text = "{\n  Name = TEMPERATURE\n  Type = Real\n  Default = 0.000000e+00 F\n  Access = Full\n}";
        let record = parse_mtl_str(text).unwrap();
        let param = record.parameter("TEMPERATURE").unwrap();

        assert_eq!(param.param_type, ParamType::Real);
        assert_eq!(param.default, ParamValue::Real(0.0));
        assert_eq!(param.unit.as_deref(), Some("F"));
        assert_eq!(param.access.as_deref(), Some("Full"));
    }

    #[test]
    fn test_parse_quoted_string() {
        let text = "{\n  Name = PTC_MATERIAL_DESCRIPTION\n  Type = String\n  Default = 'BRONZE'\n  Access = Full\n}";
        let record = parse_mtl_str(text).unwrap();
        let param = record.parameter("PTC_MATERIAL_DESCRIPTION").unwrap();

        assert_eq!(param.default, ParamValue::Text("BRONZE".to_string()));
        assert_eq!(param.unit, None);
    }

    #[test]
    fn test_parse_string_with_space_merges_unit() {
        let text = "{\n  Name = DESCRIPTION\n  Type = String\n  Default = 'STAINLESS STEEL'\n  Access = Full\n}";
        let record = parse_mtl_str(text).unwrap();
        let param = record.parameter("DESCRIPTION").unwrap();

        assert_eq!(param.default, ParamValue::Text("STAINLESS STEEL".to_string()));
        assert_eq!(param.unit, None);
    }

    #[test]
    fn test_parse_double_quoted_string() {
        let text = "{\n  Name = GRADE\n  Type = String\n  Default = \"C93200\"\n}";
        let record = parse_mtl_str(text).unwrap();
        assert_eq!(
            record.parameter("GRADE").unwrap().default,
            ParamValue::Text("C93200".to_string())
        );
    }

    #[test]
    fn test_strip_quotes_single_layer() {
        assert_eq!(strip_quotes("'BRONZE'"), "BRONZE");
        assert_eq!(strip_quotes("''X''"), "'X'");
        assert_eq!(strip_quotes("\"A\""), "A");
        assert_eq!(strip_quotes("plain"), "plain");
        assert_eq!(strip_quotes("'"), "");
    }

    #[test]
    fn test_parse_integer() {
        let text = "{\n  Name = COUNT\n  Type = Integer\n  Default = 42\n}";
        let record = parse_mtl_str(text).unwrap();
        let param = record.parameter("COUNT").unwrap();
        assert_eq!(param.default, ParamValue::Integer(42));
        assert_eq!(param.access, None);
    }

    #[test]
    fn test_unknown_type_keeps_raw_token() {
        let text = "{\n  Name = FLAG\n  Type = Boolean\n  Default = YES\n}";
        let record = parse_mtl_str(text).unwrap();
        let param = record.parameter("FLAG").unwrap();
        assert_eq!(param.param_type, ParamType::Other("Boolean".to_string()));
        assert_eq!(param.default, ParamValue::Text("YES".to_string()));
    }

    #[test]
    fn test_missing_type_is_empty_other() {
        let text = "{\n  Name = LOOSE\n  Default = 'x'\n}";
        let record = parse_mtl_str(text).unwrap();
        let param = record.parameter("LOOSE").unwrap();
        assert_eq!(param.param_type, ParamType::Other(String::new()));
        assert_eq!(param.default, ParamValue::Text("'x'".to_string()));
    }

    #[test]
    fn test_invalid_real_is_error() {
        let text = "{\n  Name = DENSITY\n  Type = Real\n  Default = heavy\n}";
        let err = parse_mtl_str(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                parameter: "DENSITY".to_string(),
                value: "heavy".to_string(),
                expected: ParamType::Real,
            }
        );
        assert!(err.to_string().contains("DENSITY"));
    }

    #[test]
    fn test_invalid_integer_is_error() {
        let text = "{\n  Name = COUNT\n  Type = Integer\n  Default = 1.5\n}";
        assert!(matches!(
            parse_mtl_str(text),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_identity_from_header() {
        let record = parse_mtl_str(BRONZE_MTL).unwrap();
        assert_eq!(record.material_id, "MAT_0042");
        assert_eq!(record.material_name, "BRONZE");

        let names: Vec<&str> = record.parameters.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["PTC_MATERIAL_DESCRIPTION", "TEMPERATURE", "PTC_POISSON_RATIO"]
        );
    }

    #[test]
    fn test_identity_skips_first_character() {
        // The leading character is assumed to be the opening brace
        let record = parse_mtl_str("MAT_0001 = {\n  Name = COPPER\n}\n").unwrap();
        assert_eq!(record.material_id, "AT_0001");
        assert_eq!(record.material_name, "COPPER");

        let record = parse_mtl_str("\u{feff}{\n  MAT_0001 = {\n    Name = COPPER\n").unwrap();
        assert_eq!(record.material_id, "MAT_0001");
    }

    #[test]
    fn test_no_header_uses_sentinel() {
        let text = "{\n  Name = COUNT\n  Type = Integer\n  Default = 1\n}";
        let record = parse_mtl_str(text).unwrap();
        assert!(record.has_unknown_identity());
        assert_eq!(record.parameters.len(), 1);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        let record = parse_mtl_str("").unwrap();
        assert!(record.has_unknown_identity());
        assert!(record.parameters.is_empty());

        let record = parse_mtl_str("this is not an mtl file\n").unwrap();
        assert!(record.has_unknown_identity());
        assert!(record.parameters.is_empty());
    }

    #[test]
    fn test_duplicate_names_overwrite_in_place() {
        let text = "{\n Name = A\n Type = Integer\n Default = 1\n}\n\
                    {\n Name = B\n Type = Integer\n Default = 2\n}\n\
                    {\n Name = A\n Type = Integer\n Default = 3\n}\n";
        let record = parse_mtl_str(text).unwrap();

        let names: Vec<&str> = record.parameters.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(record.parameter("A").unwrap().default, ParamValue::Integer(3));
    }

    #[test]
    fn test_blocks_without_default_are_not_parameters() {
        let text = "{\n  Name = BRONZE\n  Description = alloy\n}\n";
        let record = parse_mtl_str(text).unwrap();
        assert!(record.parameters.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = BRONZE_MTL.replace('\n', "\r\n");
        let record = parse_mtl_str(&text).unwrap();
        assert_eq!(record.material_id, "MAT_0042");
        assert_eq!(record.material_name, "BRONZE");
        assert_eq!(
            record.parameter("TEMPERATURE").unwrap().unit.as_deref(),
            Some("F")
        );
    }

    #[test]
    fn test_parse_mtl_file_missing() {
        let err = parse_mtl_file(Path::new("/definitely/not/here.mtl")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_parse_mtl_file_reports_path_on_data_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.mtl");
        std::fs::write(&path, "{\n Name = D\n Type = Real\n Default = x\n}\n").unwrap();

        let err = parse_mtl_file(&path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("bad.mtl"));
        assert!(message.contains("'D'"));
    }
}
