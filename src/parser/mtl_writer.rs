//! MTL text generation.
//!
//! Renders parsed records back into the brace-block format. The output is
//! normalized (fixed indentation, scientific notation for reals) and parses back
//! to the same typed values.

use crate::models::{MaterialRecord, ParamType, ParamValue, ParameterRecord};

/// Indentation used for one nesting level.
const INDENT: &str = "  ";

/// Renders a single parameter block without indentation.
pub fn render_parameter_block(parameter: &ParameterRecord) -> String {
    let mut output = String::from("{\n");
    push_block_body(&mut output, parameter, INDENT);
    output.push('}');
    output
}

/// Renders a whole material file: header, `Parameters` section, all blocks.
pub fn render_material(record: &MaterialRecord) -> String {
    let mut output = String::from("{\n");
    output.push_str(&format!("{INDENT}{} = {{\n", record.material_id));
    output.push_str(&format!("{INDENT}{INDENT}Name = {}\n", record.material_name));
    output.push_str(&format!("{INDENT}{INDENT}Parameters = {{\n"));

    let block_indent = INDENT.repeat(3);
    let field_indent = INDENT.repeat(4);
    let count = record.parameters.len();

    for (position, parameter) in record.parameters.values().enumerate() {
        output.push_str(&format!("{block_indent}{{\n"));
        push_block_body(&mut output, parameter, &field_indent);
        output.push_str(&block_indent);
        output.push('}');
        if position + 1 < count {
            output.push(',');
        }
        output.push('\n');
    }

    output.push_str(&format!("{INDENT}{INDENT}}}\n"));
    output.push_str(&format!("{INDENT}}}\n"));
    output.push_str("}\n");
    output
}

fn push_block_body(output: &mut String, parameter: &ParameterRecord, indent: &str) {
    output.push_str(&format!("{indent}Name = {}\n", parameter.name));

    // A missing Type field parses as an empty tag, so omit it to round-trip
    if !parameter.param_type.as_str().is_empty() {
        output.push_str(&format!("{indent}Type = {}\n", parameter.param_type));
    }

    let mut default_line = format!(
        "{indent}Default = {}",
        render_default(&parameter.param_type, &parameter.default)
    );
    if let Some(unit) = &parameter.unit {
        default_line.push(' ');
        default_line.push_str(unit);
    }
    output.push_str(&default_line);
    output.push('\n');

    if let Some(access) = &parameter.access {
        output.push_str(&format!("{indent}Access = {access}\n"));
    }
}

fn render_default(param_type: &ParamType, value: &ParamValue) -> String {
    match (param_type, value) {
        (_, ParamValue::Real(number)) => format_real(*number),
        (_, ParamValue::Integer(number)) => number.to_string(),
        (ParamType::String, ParamValue::Text(text)) => format!("'{text}'"),
        (_, ParamValue::Text(text)) => text.clone(),
    }
}

/// Formats a real the way MTL files do (`3.400000e-01`).
///
/// Falls back to the shortest exact form when six decimals would lose precision.
pub(crate) fn format_real(value: f64) -> String {
    let fixed = format!("{value:.6e}");
    let candidate = match fixed.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            Err(_) => fixed.clone(),
        },
        None => fixed.clone(),
    };

    if candidate.parse::<f64>().ok() == Some(value) {
        candidate
    } else {
        format!("{value:e}")
    }
}
