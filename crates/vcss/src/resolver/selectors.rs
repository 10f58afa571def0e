//! Nested selector parsing and `&` substitution.
//!
//! Nested selectors are parsed only far enough to find out which compound
//! selector is styled (the rightmost one) and whether it contains `&`:
//!
//! ```text
//! &:hover            ok      styled part is `&:hover`
//! .theme-dark &      ok      styled part is `&`
//! li:not(&)          ok      `&` inside a pseudo argument of the styled part
//! & > li             error   styled part is `li`
//! ```
//!
//! Substitution itself is textual: every `&` is replaced by the parent
//! selector, and comma lists on either side are multiplied out.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt, recognize},
    multi::many1,
    sequence::{delimited, pair, preceded},
};

use crate::error::{Result, VcssError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Simple {
    Type(String),
    Class(String),
    Id(String),
    Universal,
    Parent,
    Attribute(String),
    /// `:name` or `:name(args)`
    PseudoClass(String, Option<String>),
    /// `::name` or `::name(args)`
    PseudoElement(String, Option<String>),
}

impl Simple {
    fn refers_to_parent(&self) -> bool {
        match self {
            Self::Parent => true,
            Self::PseudoClass(_, Some(args)) | Self::PseudoElement(_, Some(args)) => {
                args.contains('&')
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    None,
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    pub compound: Vec<Simple>,
    pub combinator: Combinator,
}

fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_' || c == '\\')(input)
}

/// Consumes a parenthesized argument list, honouring nested parentheses.
fn parse_args(input: &str) -> IResult<&str, &str> {
    let (rest, _) = char('(')(input)?;
    let mut depth = 1usize;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&rest[i + 1..], &rest[..i]));
                }
            }
            _ => {}
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

fn parse_pseudo(input: &str) -> IResult<&str, Simple> {
    alt((
        map(
            preceded(tag("::"), pair(parse_ident, opt(parse_args))),
            |(name, args)| Simple::PseudoElement(name.to_string(), args.map(str::to_string)),
        ),
        map(
            preceded(char(':'), pair(parse_ident, opt(parse_args))),
            |(name, args)| Simple::PseudoClass(name.to_string(), args.map(str::to_string)),
        ),
    ))(input)
}

fn parse_simple(input: &str) -> IResult<&str, Simple> {
    alt((
        map(preceded(char('#'), parse_ident), |s| Simple::Id(s.to_string())),
        map(preceded(char('.'), parse_ident), |s| {
            Simple::Class(s.to_string())
        }),
        parse_pseudo,
        map(char('&'), |_| Simple::Parent),
        map(char('*'), |_| Simple::Universal),
        map(delimited(char('['), take_until("]"), char(']')), |s: &str| {
            Simple::Attribute(s.trim().to_string())
        }),
        map(parse_ident, |s| Simple::Type(s.to_string())),
    ))(input)
}

fn parse_compound(input: &str) -> IResult<&str, Vec<Simple>> {
    many1(parse_simple)(input)
}

fn parse_combinator(input: &str) -> IResult<&str, Combinator> {
    alt((
        delimited(
            multispace0,
            alt((
                map(char('>'), |_| Combinator::Child),
                map(char('+'), |_| Combinator::AdjacentSibling),
                map(char('~'), |_| Combinator::GeneralSibling),
            )),
            multispace0,
        ),
        map(recognize(multispace1), |_| Combinator::Descendant),
    ))(input)
}

/// Parses one complex selector (no commas).
pub fn parse_complex(input: &str) -> IResult<&str, Vec<Part>> {
    let (mut input, mut current) = parse_compound(input)?;
    let mut parts = Vec::new();

    loop {
        let Ok((after, combinator)) = parse_combinator(input) else {
            break;
        };
        match parse_compound(after) {
            Ok((rest, next)) => {
                parts.push(Part {
                    compound: current,
                    combinator,
                });
                current = next;
                input = rest;
            }
            // Trailing whitespace
            Err(_) => break,
        }
    }

    parts.push(Part {
        compound: current,
        combinator: Combinator::None,
    });
    Ok((input, parts))
}

/// Splits a selector list on commas that are not inside parentheses,
/// brackets or strings.
pub fn split_list(list: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(list[start..].trim());
    out.retain(|s| !s.is_empty());
    out
}

/// Checks that a nested selector parses and that its styled compound refers
/// to `&`.
pub fn validate_nested(selector: &str) -> Result<()> {
    let invalid = |reason: String| VcssError::InvalidSelector {
        selector: selector.to_string(),
        reason,
    };

    for complex in split_list(selector) {
        let (rest, parts) =
            parse_complex(complex).map_err(|e| invalid(format!("cannot parse `{complex}`: {e}")))?;
        if !rest.trim().is_empty() {
            return Err(invalid(format!("unexpected `{}`", rest.trim())));
        }
        let targets_parent = parts
            .last()
            .is_some_and(|part| part.compound.iter().any(Simple::refers_to_parent));
        if !targets_parent {
            return Err(invalid(format!(
                "`{complex}` must target `&`, the selector being styled"
            )));
        }
    }
    Ok(())
}

/// Turns a pseudo shorthand key (`:hover`, `::before`) into a nested
/// selector. The key must be a single pseudo-class or pseudo-element chain
/// on the owner; lists and combinators need [`StyleRule::selector`].
///
/// [`StyleRule::selector`]: crate::StyleRule::selector
pub fn pseudo_selector(pseudo: &str) -> Result<String> {
    let pseudo = pseudo.trim();
    let invalid = || VcssError::InvalidPseudo(pseudo.to_string());
    if !pseudo.starts_with(':') || split_list(pseudo).len() != 1 {
        return Err(invalid());
    }

    let nested = format!("&{pseudo}");
    let (rest, parts) = parse_complex(&nested).map_err(|_| invalid())?;
    if !rest.trim().is_empty() || parts.len() != 1 {
        return Err(invalid());
    }
    Ok(nested)
}

/// Replaces `&` in every member of `child` with every member of `parent`.
pub fn compose(parent: &str, child: &str) -> String {
    let parents = split_list(parent);
    let children = split_list(child);

    let mut combined = Vec::with_capacity(parents.len() * children.len());
    for p in &parents {
        for c in &children {
            combined.push(c.replace('&', p));
        }
    }
    combined.join(", ")
}
