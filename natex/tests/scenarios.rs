use natex::{
    heuristic,
    normalize::normalize,
    parse,
    rules::rules,
    Method,
    OperationKind,
};
use pretty_assertions::assert_eq;

/// Parses the text, returning the LaTeX, method, and confidence of the result.
fn summary(text: &str) -> (String, Method, f64) {
    let result = parse(text).unwrap();
    (result.latex, result.method_used, result.confidence)
}

#[test]
fn integral_with_respect_to() {
    assert_eq!(
        summary("integrate x squared with respect to y"),
        ("\\int x^{2} \\, dy".to_string(), Method::PatternMatching, 0.9),
    );
}

#[test]
fn derivative_of_function() {
    assert_eq!(
        summary("derivative of sin x with respect to x"),
        ("\\frac{d}{dx} \\sin{(x)}".to_string(), Method::PatternMatching, 0.9),
    );
}

#[test]
fn summation_with_bounds() {
    assert_eq!(
        summary("sum from i=1 to n of i squared"),
        ("\\sum_{i=1}^{n} i^{2}".to_string(), Method::PatternMatching, 0.9),
    );
}

#[test]
fn limit_at_infinity() {
    assert_eq!(
        summary("limit as x approaches infinity of 1/x"),
        ("\\lim_{x \\to \\infty} \\frac{1}{x}".to_string(), Method::PatternMatching, 0.85),
    );
}

#[test]
fn empty_input() {
    assert_eq!(parse(""), None);
    assert_eq!(parse("   \n\t"), None);
}

#[test]
fn simple_expression_fallback() {
    let result = parse("x plus y").unwrap();
    assert_eq!(result.latex, "x + y");
    assert_eq!(result.plain_text, "x + y");
    assert_eq!(result.method_used, Method::Nlp);
    assert_eq!(result.confidence, 0.6);
    assert_eq!(result.kind, OperationKind::SimpleExpression);
}

#[test]
fn normalize_is_idempotent() {
    let inputs = [
        "  Intergrate X SQUARE   wrt y ",
        "σ from k=1 to 10 of k",
        "d/dx of sin x",
        "x^2 w.r.t. x",
        "",
    ];
    for input in inputs {
        let once = normalize(input);
        let twice = normalize(&once);
        assert_eq!(once, twice, "input: {:?}", input);
    }
}

#[test]
fn specific_partial_form_wins() {
    let result = parse("partial derivative of x squared with respect to y").unwrap();
    assert_eq!(result.kind, OperationKind::PartialDerivative);
    assert_eq!(result.latex, "\\frac{\\partial}{\\partial y} x^{2}");
    assert_eq!(result.confidence, 0.85);
}

#[test]
fn fraction_does_not_preempt_operations() {
    let result = parse("integrate x divided by y with respect to x").unwrap();
    assert_eq!(result.kind, OperationKind::Integral);
    assert_eq!(result.latex, "\\int \\frac{x}{y} \\, dx");

    let result = parse("x squared over y").unwrap();
    assert_eq!(result.kind, OperationKind::Fraction);
    assert_eq!(result.latex, "\\frac{x^{2}}{y}");
}

#[test]
fn pattern_confidence_at_least_heuristic() {
    for rule in rules() {
        if let Some(heuristic) = heuristic::confidence(rule.kind) {
            assert!(
                rule.confidence >= heuristic,
                "{} rule ({}) is less confident than the heuristic ({})",
                rule.kind, rule.confidence, heuristic,
            );
        }
    }
}

#[test]
fn typos_are_corrected_before_matching() {
    let result = parse("intergrate x sqared dx").unwrap();
    assert_eq!(result.latex, "\\int x^{2} \\, dx");
    assert_eq!(result.method_used, Method::PatternMatching);
}

#[test]
fn heuristic_tier_reads_loose_phrasing() {
    let result = parse("please find the integral of t cubed").unwrap();
    assert_eq!(result.latex, "\\int t^{3} \\, dt");
    assert_eq!(result.method_used, Method::Nlp);
    assert_eq!(result.confidence, 0.7);
}

#[test]
fn nothing_readable() {
    assert_eq!(parse("hello there"), None);
    assert_eq!(parse("sum of everything"), None);
}

#[test]
fn deeply_nested_input_is_unreadable() {
    let parens = format!("integrate {}x{} dx", "(".repeat(1000), ")".repeat(1000));
    assert_eq!(parse(&parens), None);

    let negations = format!("{}x", "-".repeat(1000));
    assert_eq!(parse(&negations), None);
}

#[test]
fn moderately_nested_input_is_read() {
    let result = parse(&format!("integrate {}x{} dx", "(".repeat(30), ")".repeat(30))).unwrap();
    assert_eq!(result.latex, "\\int x \\, dx");
}

#[test]
fn overlong_input_is_unreadable() {
    let terms = vec!["x"; 8000].join(" plus ");
    assert_eq!(parse(&terms), None);
}
