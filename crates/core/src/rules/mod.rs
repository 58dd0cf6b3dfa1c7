//! Public suffix rule records and the parser seam.

mod parser;

pub use parser::{ParseError, TldRuleParser};

use serde::{Deserialize, Serialize};

/// How a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TldRuleKind {
    /// `example.com`
    Normal,
    /// `*.example.com`
    Wildcard,
    /// `!www.example.com`
    WildcardException,
}

/// Section of the list a rule was declared in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TldRuleDivision {
    #[default]
    Unknown,
    Icann,
    Private,
}

/// One public suffix rule.
///
/// `name` holds the suffix pattern without its `!` or `*.` marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TldRule {
    pub name: String,
    pub kind: TldRuleKind,
    pub division: TldRuleDivision,
}

/// Turns raw rule text into rule records.
pub trait RuleParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Vec<TldRule>, ParseError>;
}
