//! Integration tests for calc expression building and rendering.

use vcss_calc::{CalcError, CalcExpr, Operator, add, calc, divide, multiply, negate, subtract};

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_divide_then_multiply_renders_nested_parentheses() {
    let half = divide([CalcExpr::from("var(--x)"), 2.into()]).unwrap();
    let expr = multiply([half, 4.into()]).unwrap();
    assert_eq!(expr.to_string(), "calc((var(--x) / 2) * 4)");
}

#[test]
fn test_negated_chain_wraps_operand() {
    let expr = negate(calc("var(--y)").divide(2).unwrap());
    insta::assert_snapshot!(expr.to_string(), @"calc(-1 * (var(--y) / 2))");
}

#[test]
fn test_negate_atom() {
    let expr = negate(CalcExpr::var("gutter"));
    assert_eq!(expr.to_string(), "calc(-1 * var(--gutter))");
}

#[test]
fn test_n_ary_add_joins_all_operands() {
    let expr = add(["1px", "2rem", "3%"]).unwrap();
    assert_eq!(expr.to_string(), "calc(1px + 2rem + 3%)");
}

#[test]
fn test_atoms_render_without_calc_wrapper() {
    assert_eq!(CalcExpr::from("10px").to_string(), "10px");
    assert_eq!(CalcExpr::from(3).to_string(), "3");
    assert_eq!(CalcExpr::var("--gap").to_string(), "var(--gap)");
}

#[test]
fn test_nested_expression_as_operand() {
    let inner = subtract(["100vw", "2rem"]).unwrap();
    let expr = add([inner, CalcExpr::from("1px")]).unwrap();
    assert_eq!(expr.to_string(), "calc((100vw - 2rem) + 1px)");
}

#[test]
fn test_chain_accumulates_left_to_right() {
    let expr = calc("1rem").add("2px").subtract(CalcExpr::var("pad"));
    assert_eq!(expr.to_string(), "calc((1rem + 2px) - var(--pad))");
}

#[test]
fn test_expression_reuse_does_not_mutate_operand() {
    let base = calc("10px").add("1rem");
    let doubled = base.clone().multiply(2).unwrap();
    let halved = base.clone().divide(2).unwrap();

    assert_eq!(base.to_string(), "calc(10px + 1rem)");
    assert_eq!(doubled.to_string(), "calc((10px + 1rem) * 2)");
    assert_eq!(halved.to_string(), "calc((10px + 1rem) / 2)");
}

// ============================================================================
// VALIDATION
// ============================================================================

#[test]
fn test_add_rejects_single_operand() {
    let err = add(["1px"]).unwrap_err();
    assert_eq!(
        err,
        CalcError::TooFewOperands {
            op: Operator::Add,
            found: 1
        }
    );
}

#[test]
fn test_subtract_rejects_empty_operands() {
    let err = subtract(Vec::<CalcExpr>::new()).unwrap_err();
    assert!(matches!(err, CalcError::TooFewOperands { found: 0, .. }));
}

#[test]
fn test_multiply_rejects_two_dimensions() {
    let err = multiply(["10px", "2rem"]).unwrap_err();
    assert!(matches!(err, CalcError::DimensionMismatch { .. }));
}

#[test]
fn test_multiply_rejects_operands_without_plain_number() {
    let err = multiply([CalcExpr::var("a"), CalcExpr::var("b")]).unwrap_err();
    assert!(matches!(err, CalcError::NoDimensionlessOperand { .. }));
}

#[test]
fn test_multiply_accepts_variable_and_number() {
    let expr = multiply([CalcExpr::var("a"), 3.into()]).unwrap();
    assert_eq!(expr.to_string(), "calc(var(--a) * 3)");
}

#[test]
fn test_divide_rejects_dimensioned_divisor() {
    let err = divide(["10px", "2px"]).unwrap_err();
    assert_eq!(
        err,
        CalcError::NonNumericDivisor {
            divisor: "2px".into()
        }
    );
}

#[test]
fn test_divide_rejects_variable_divisor() {
    let err = calc("10px").divide(CalcExpr::var("n")).unwrap_err();
    assert!(matches!(err, CalcError::NonNumericDivisor { .. }));
}

#[test]
fn test_error_messages_name_the_operator() {
    let err = divide(["1px"]).unwrap_err();
    assert_eq!(err.to_string(), "divide needs at least 2 operands, got 1");
}
