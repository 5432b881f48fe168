use winnow::combinator::{cut_err, opt, preceded, repeat};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::{Rule, RuleSet};

const RULE_SEPARATOR: char = '|';
const PARAMETER_MARKER: char = ':';
const PARAMETER_SEPARATOR: char = ',';

// -- Tokens -----------------------------------------------------------------

fn rule_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c != RULE_SEPARATOR && c != PARAMETER_MARKER)
        .context(StrContext::Expected(StrContextValue::Description(
            "rule name",
        )))
        .parse_next(input)
}

// Everything after the first ':' up to the next '|' is parameter text, so
// parameters may contain further colons but never commas.
fn parameter_list(input: &mut &str) -> ModalResult<Vec<String>> {
    let raw = preceded(
        PARAMETER_MARKER,
        take_while(0.., |c: char| c != RULE_SEPARATOR),
    )
    .parse_next(input)?;
    Ok(raw.split(PARAMETER_SEPARATOR).map(str::to_owned).collect())
}

fn rule(input: &mut &str) -> ModalResult<Rule> {
    let name = rule_name.parse_next(input)?;
    let parameters = opt(parameter_list).parse_next(input)?;
    Ok(match parameters {
        Some(parameters) => Rule::with_parameters(name, parameters),
        None => Rule::new(name),
    })
}

// -- Top-level parser -------------------------------------------------------

fn rule_list(input: &mut &str) -> ModalResult<RuleSet> {
    let first = rule.parse_next(input)?;
    let rest: Vec<Rule> =
        repeat(0.., preceded(RULE_SEPARATOR, cut_err(rule))).parse_next(input)?;
    Ok(std::iter::once(first).chain(rest).collect())
}

pub fn parse_rule_set(input: &mut &str) -> ModalResult<RuleSet> {
    opt(rule_list)
        .map(Option::unwrap_or_default)
        .parse_next(input)
}
