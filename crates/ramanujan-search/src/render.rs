//! Human-readable closed forms of stored results.

use ramanujan_algorithms::AlgorithmId;
use ramanujan_precision::Constant;
use ramanujan_sequences::{Element, Points, PolynomialSequence, SequenceSpec};
use ramanujan_store::ResultRecord;

/// Levels shown before a nested diagram is elided.
pub const DIAGRAM_DEPTH: usize = 5;

/// Renders integer coefficients (constant term first) as a polynomial in
/// `symbol`, e.g. `3 + 2*e - e^2`.
#[must_use]
pub fn polynomial_to_string(coefficients: &[i64], symbol: &str) -> String {
    let mut out = String::new();
    for (power, &c) in coefficients.iter().enumerate() {
        if c == 0 {
            continue;
        }
        let magnitude = c.unsigned_abs();
        let term = match (power, magnitude) {
            (0, m) => m.to_string(),
            (1, 1) => symbol.to_string(),
            (1, m) => format!("{m}*{symbol}"),
            (p, 1) => format!("{symbol}^{p}"),
            (p, m) => format!("{m}*{symbol}^{p}"),
        };
        if out.is_empty() {
            if c < 0 {
                out.push('-');
            }
        } else {
            out.push_str(if c < 0 { " - " } else { " + " });
        }
        out.push_str(&term);
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

fn signed(term: &str) -> (&'static str, &str) {
    match term.strip_prefix('-') {
        Some(magnitude) => ("-", magnitude),
        None => ("+", term),
    }
}

/// Renders a continued fraction the way it is collapsed, showing at most
/// `depth` partial numerators.
///
/// An empty `b` means every partial numerator is one, and a leading zero
/// numerator on equal-length lists is dropped, as in the collapse itself.
#[must_use]
pub fn continued_fraction_to_string(a: &[String], b: &[String], depth: usize) -> String {
    let ones;
    let mut b = if b.is_empty() {
        ones = vec!["1".to_string(); a.len().saturating_sub(1)];
        &ones[..]
    } else {
        b
    };
    if a.len() == b.len() && b.first().is_some_and(|t| t == "0") {
        b = &b[1..];
    }

    let mut out = String::new();
    let mut open = 0;
    for (i, a_i) in a.iter().enumerate() {
        out.push_str(a_i);
        let Some(b_i) = b.get(i) else { break };
        let (op, magnitude) = signed(b_i);
        if i + 1 >= depth.max(1) && i + 1 < a.len() {
            out.push_str(&format!(" {op} ..."));
            break;
        }
        out.push_str(&format!(" {op} {magnitude}/("));
        open += 1;
        if i + 1 == a.len() {
            out.push('1');
        }
    }
    out.push_str(&")".repeat(open));
    out
}

/// Renders `sqrt(a0 + b0*sqrt(a1 + b1*sqrt(...)))`, showing at most `depth`
/// roots.
#[must_use]
pub fn nested_radical_to_string(a: &[String], b: &[String], depth: usize) -> String {
    let n = a.len().min(b.len());
    if n == 0 {
        return "1".to_string();
    }
    let mut out = String::new();
    let mut open = 0;
    for (i, (a_i, b_i)) in a.iter().zip(b).enumerate() {
        let (op, magnitude) = signed(b_i);
        if i + 1 == n {
            out.push_str(&format!("sqrt({a_i} {op} {magnitude})"));
        } else if i + 1 >= depth.max(1) {
            out.push_str(&format!("sqrt({a_i} {op} {magnitude}*...)"));
            break;
        } else {
            out.push_str(&format!("sqrt({a_i} {op} {magnitude}*"));
            open += 1;
        }
    }
    out.push_str(&")".repeat(open));
    out
}

fn constant_of(spec: &SequenceSpec) -> Option<Constant> {
    match spec {
        SequenceSpec::Polynomial(PolynomialSequence {
            points: Some(Points::Constant(c)),
            ..
        }) => Some(*c),
        _ => None,
    }
}

fn arguments(record: &ResultRecord) -> (Vec<String>, Vec<String>) {
    let digits = record.precision.digits();
    let render = |spec: &SequenceSpec, element: &Element| -> Vec<String> {
        spec.evaluate(element, record.precision)
            .iter()
            .map(|n| n.to_decimal_string(digits))
            .collect()
    };
    (render(&record.space.a, &record.a), render(&record.space.b, &record.b))
}

fn rational(record: &ResultRecord) -> String {
    let (a, b) = (&record.space.a, &record.space.b);
    let (numerator, denominator) = match (constant_of(a), constant_of(b)) {
        (Some(ca), Some(cb)) => {
            let num: Vec<i64> = record.a.values().collect();
            let den: Vec<i64> = record.b.values().collect();
            (
                polynomial_to_string(&num, &ca.symbol()),
                polynomial_to_string(&den, &cb.symbol()),
            )
        }
        _ => {
            let (a, b) = arguments(record);
            (a.join(", "), b.join(", "))
        }
    };
    if denominator == "1" {
        numerator
    } else {
        format!("({numerator}) / ({denominator})")
    }
}

/// The expression that produced a record's value, before its transform.
#[must_use]
pub fn algorithm_expression(record: &ResultRecord) -> String {
    match record.algorithm {
        AlgorithmId::RationalFunction => rational(record),
        AlgorithmId::ContinuedFraction => {
            let (a, b) = arguments(record);
            continued_fraction_to_string(&a, &b, DIAGRAM_DEPTH)
        }
        AlgorithmId::NestedRadical => {
            let (a, b) = arguments(record);
            nested_radical_to_string(&a, &b, DIAGRAM_DEPTH)
        }
        AlgorithmId::Polynomial => {
            let (a, b) = arguments(record);
            format!("polynomial([{}], x = {})", a.join(", "), b.join(", "))
        }
    }
}

/// The full closed form of a record: its transform applied to its
/// algorithm expression.
#[must_use]
pub fn closed_form(record: &ResultRecord) -> String {
    record.transform.render(&algorithm_expression(record))
}

/// One report line, `LHS: <value> = <closed form>`, with the point range
/// appended when the arguments were evaluated over one.
#[must_use]
pub fn describe(record: &ResultRecord) -> String {
    let mut line = format!(
        "{}: {} = {}",
        record.side.prefix().to_uppercase(),
        record.rendered_value(),
        closed_form(record)
    );
    if let SequenceSpec::Polynomial(PolynomialSequence {
        points: Some(points @ Points::Range { .. }),
        ..
    }) = &record.space.a
    {
        line.push_str(&format!("  for {points}"));
    }
    line
}
