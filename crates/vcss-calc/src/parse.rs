//! Operand classification for string inputs.
//!
//! Strings handed to the builder are sorted into three kinds so that the
//! dimension rules of `multiply` and `divide` can be checked up front:
//!
//! - `"2"`, `"-0.5"` become [`CalcExpr::Number`]
//! - `"10px"`, `"50%"` become [`CalcExpr::Quantity`]
//! - anything else (`"var(--x)"`, `"100vh - 1rem"`) is kept as [`CalcExpr::Raw`]

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, char, digit0, digit1},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{pair, tuple},
};

use crate::expr::CalcExpr;

/// Parses a signed decimal number such as `12`, `-3.5` or `.25`.
fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(alt((char('-'), char('+')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn parse_unit(input: &str) -> IResult<&str, &str> {
    alt((tag("%"), alpha1))(input)
}

fn parse_quantity(input: &str) -> IResult<&str, (f64, Option<&str>)> {
    all_consuming(pair(parse_number, opt(parse_unit)))(input)
}

/// Classifies a string operand.
pub fn parse_operand(input: &str) -> CalcExpr {
    let trimmed = input.trim();
    match parse_quantity(trimmed) {
        Ok((_, (value, None))) => CalcExpr::Number(value),
        Ok((_, (value, Some(unit)))) => CalcExpr::Quantity {
            value,
            unit: unit.to_string(),
        },
        Err(_) => CalcExpr::Raw(trimmed.to_string()),
    }
}
