//! Diagnostics rendered as annotated source excerpts.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use rho_eval::EvalError;
use rho_ir::Span;
use rho_parse::ParseError;

pub fn parse_error(path: &str, source: &str, error: &ParseError, color: bool) -> String {
    render(path, source, &error.to_string(), Some(error.span()), color)
}

pub fn eval_error(path: &str, source: &str, error: &EvalError, color: bool) -> String {
    render(path, source, &error.message, error.span, color)
}

/// Render one error. Without a usable span the report has no excerpt.
fn render(path: &str, source: &str, message: &str, span: Option<Span>, color: bool) -> String {
    let span = span.filter(|s| !s.is_dummy() && s.range().end <= source.len());
    let offset = span.map_or(0, |s| s.range().start);

    let mut report = Report::build(ReportKind::Error, path, offset)
        .with_config(Config::default().with_color(color))
        .with_message(message);
    if let Some(span) = span {
        report = report.with_label(
            Label::new((path, span.range()))
                .with_message(message)
                .with_color(Color::Red),
        );
    }

    let mut out = Vec::new();
    if let Err(err) = report.finish().write((path, Source::from(source)), &mut out) {
        tracing::warn!(%err, "could not render diagnostic");
        return format!("error: {message}\n");
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_points_at_the_span() {
        let mut interp = rho_eval::Interpreter::builder()
            .print_handler(rho_eval::silent_handler())
            .build();
        let source = "x <- 1\nx + missing_thing\n";
        let values = interp.eval_source(source).unwrap_or_default();
        let Some(rho_eval::Value::Error(error)) = values.last() else {
            panic!("expected an error value, got {values:?}");
        };
        let text = eval_error("demo.R", source, error, false);
        assert!(text.contains("object 'missing_thing' not found"), "{text}");
        assert!(text.contains("demo.R"), "{text}");
        assert!(text.contains("x + missing_thing"), "{text}");
    }

    #[test]
    fn report_without_span_still_has_the_message() {
        let error = EvalError::new("no location");
        let text = eval_error("demo.R", "1\n", &error, false);
        assert!(text.contains("no location"), "{text}");
    }
}
