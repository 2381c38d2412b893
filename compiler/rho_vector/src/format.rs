//! Console rendering.
//!
//! Numbers follow the usual print rules: a vector shares one layout, with
//! just enough decimals for its most precise element at seven significant
//! digits, switching to scientific notation when that is narrower.

use super::{Vector, VectorData};

const PRINT_DIGITS: usize = 7;
const STRING_DIGITS: usize = 15;
const LINE_WIDTH: usize = 80;

/// Significant digits needed for `x` at `digits` precision, and its
/// decimal exponent.
fn decompose(x: f64, digits: usize) -> (usize, i32) {
    let text = format!("{:.*e}", digits.saturating_sub(1), x.abs());
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let exponent = exponent.parse().unwrap_or(0);
    let significant = mantissa
        .trim_end_matches('0')
        .chars()
        .filter(char::is_ascii_digit)
        .count();
    (significant.max(1), exponent)
}

fn non_finite(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_owned()
    } else if x > 0.0 {
        "Inf".to_owned()
    } else {
        "-Inf".to_owned()
    }
}

/// `1.5e5` in Rust's notation becomes `1.5e+05`.
fn scientific(x: f64, significant: usize) -> String {
    let text = format!("{:.*e}", significant.saturating_sub(1), x);
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

fn format_with_digits(values: &[f64], digits: usize) -> Vec<String> {
    let finite: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    if finite.is_empty() {
        return values.iter().map(|&x| non_finite(x)).collect();
    }
    let shapes: Vec<(usize, i32)> = finite.iter().map(|&x| decompose(x, digits)).collect();

    let decimals = shapes
        .iter()
        .map(|&(sig, exp)| (sig as i32 - 1 - exp).max(0) as usize)
        .max()
        .unwrap_or(0);
    let max_sig = shapes.iter().map(|&(sig, _)| sig).max().unwrap_or(1);

    let fixed_width = finite
        .iter()
        .map(|x| format!("{x:.decimals$}").len())
        .max()
        .unwrap_or(0);
    let exponent_width = shapes
        .iter()
        .map(|&(_, exp)| if exp.abs() >= 100 { 5 } else { 4 })
        .max()
        .unwrap_or(4);
    let sci_width = usize::from(finite.iter().any(|&x| x < 0.0))
        + max_sig
        + usize::from(max_sig > 1)
        + exponent_width;

    let use_fixed = fixed_width <= sci_width;
    values
        .iter()
        .map(|&x| {
            if !x.is_finite() {
                non_finite(x)
            } else if use_fixed {
                format!("{x:.decimals$}")
            } else {
                scientific(x, max_sig)
            }
        })
        .collect()
}

/// Format numbers with a common layout, as `print` does.
pub fn format_numbers(values: &[f64]) -> Vec<String> {
    format_with_digits(values, PRINT_DIGITS)
}

/// One number on its own at full precision, as `as.character` does.
pub(crate) fn format_number_alone(x: f64) -> String {
    format_with_digits(&[x], STRING_DIGITS)
        .pop()
        .unwrap_or_default()
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn empty_label(data: &VectorData) -> &'static str {
    match data {
        VectorData::Numeric(_) => "numeric(0)",
        VectorData::Logical(_) => "logical(0)",
        VectorData::Character(_) => "character(0)",
        VectorData::Factor { .. } => "factor(0)",
        VectorData::DateTime(_) => "POSIXct of length 0",
    }
}

/// Element cells and whether they pad on the left.
fn cells(vector: &Vector) -> (Vec<String>, bool) {
    match vector.data() {
        VectorData::Numeric(v) => (format_numbers(v), true),
        VectorData::Logical(_) => (vector.as_strings(), true),
        VectorData::Character(v) => (v.iter().map(|s| quote(s)).collect(), false),
        VectorData::Factor { .. } => (vector.as_strings(), false),
        VectorData::DateTime(_) => (
            vector
                .as_strings()
                .iter()
                .map(|s| quote(&format!("{s} UTC")))
                .collect(),
            false,
        ),
    }
}

fn pad(cell: &str, width: usize, left: bool) -> String {
    if left {
        format!("{cell:>width$}")
    } else {
        format!("{cell:<width$}")
    }
}

/// Render a vector the way the console prints it. No trailing newline.
pub fn render(vector: &Vector) -> String {
    let mut out = if vector.is_empty() {
        empty_label(vector.data()).to_owned()
    } else {
        let (cells, pad_left) = cells(vector);
        match vector.names() {
            Some(names) => render_named(&cells, names),
            None => render_plain(&cells, pad_left),
        }
    };
    if let Some(levels) = vector.levels() {
        out.push_str("\nLevels: ");
        out.push_str(&levels.join(" "));
    }
    out
}

fn render_plain(cells: &[String], pad_left: bool) -> String {
    let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    let label_width = format!("[{}]", cells.len()).len();
    let per_line = ((LINE_WIDTH - label_width) / (width + 1)).max(1);

    let mut lines = Vec::new();
    for (row, chunk) in cells.chunks(per_line).enumerate() {
        let label = format!("[{}]", row * per_line + 1);
        let mut line = format!("{label:>label_width$}");
        for cell in chunk {
            line.push(' ');
            line.push_str(&pad(cell, width, pad_left));
        }
        lines.push(line.trim_end().to_owned());
    }
    lines.join("\n")
}

fn render_named(cells: &[String], names: &[String]) -> String {
    let width = cells
        .iter()
        .chain(names)
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);
    let per_line = (LINE_WIDTH / (width + 1)).max(1);

    let mut lines = Vec::new();
    for (cell_chunk, name_chunk) in cells.chunks(per_line).zip(names.chunks(per_line)) {
        let header: Vec<String> = name_chunk.iter().map(|n| pad(n, width, true)).collect();
        let values: Vec<String> = cell_chunk.iter().map(|c| pad(c, width, true)).collect();
        lines.push(header.join(" ").trim_end().to_owned());
        lines.push(values.join(" ").trim_end().to_owned());
    }
    lines.join("\n")
}
