//! Parser for the public suffix list text format.

use super::{RuleParser, TldRule, TldRuleDivision, TldRuleKind};

const BEGIN_ICANN: &str = "===BEGIN ICANN DOMAINS===";
const BEGIN_PRIVATE: &str = "===BEGIN PRIVATE DOMAINS===";
const END_ICANN: &str = "===END ICANN DOMAINS===";
const END_PRIVATE: &str = "===END PRIVATE DOMAINS===";

/// Rejected rule line. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: empty label in rule '{rule}'")]
    EmptyLabel { line: usize, rule: String },

    #[error("line {line}: wildcard must be the whole leftmost label in rule '{rule}'")]
    MisplacedWildcard { line: usize, rule: String },

    #[error("line {line}: exception rule '{rule}' must not contain a wildcard")]
    ExceptionWithWildcard { line: usize, rule: String },

    #[error("line {line}: exception marker without a rule")]
    BareException { line: usize },
}

/// Default parser for `public_suffix_list.dat` style text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TldRuleParser;

impl RuleParser for TldRuleParser {
    fn parse(&self, text: &str) -> Result<Vec<TldRule>, ParseError> {
        let mut rules = Vec::new();
        let mut division = TldRuleDivision::Unknown;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(comment) = line.strip_prefix("//") {
                division = next_division(comment.trim(), division);
                continue;
            }

            let Some(token) = line.split_whitespace().next() else {
                continue;
            };
            rules.push(parse_rule(token, idx + 1, division)?);
        }

        Ok(rules)
    }
}

fn next_division(comment: &str, current: TldRuleDivision) -> TldRuleDivision {
    match comment {
        BEGIN_ICANN => TldRuleDivision::Icann,
        BEGIN_PRIVATE => TldRuleDivision::Private,
        END_ICANN | END_PRIVATE => TldRuleDivision::Unknown,
        _ => current,
    }
}

fn parse_rule(token: &str, line: usize, division: TldRuleDivision) -> Result<TldRule, ParseError> {
    let (kind, name) = if let Some(rest) = token.strip_prefix('!') {
        if rest.is_empty() {
            return Err(ParseError::BareException { line });
        }
        if rest.contains('*') {
            return Err(ParseError::ExceptionWithWildcard { line, rule: token.to_string() });
        }
        (TldRuleKind::WildcardException, rest)
    } else if let Some(rest) = token.strip_prefix("*.") {
        (TldRuleKind::Wildcard, rest)
    } else {
        (TldRuleKind::Normal, token)
    };

    if name.contains('*') {
        return Err(ParseError::MisplacedWildcard { line, rule: token.to_string() });
    }
    if name.split('.').any(str::is_empty) {
        return Err(ParseError::EmptyLabel { line, rule: token.to_string() });
    }

    Ok(TldRule { name: name.to_lowercase(), kind, division })
}
