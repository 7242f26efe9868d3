use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

/// Partie de l'adresse en échec.
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FailureKind {
    #[error("no @")]
    NoSeparator,
    #[error("local part is invalid")]
    InvalidLocal,
    #[error("domain part is invalid")]
    InvalidDomain,
}

/// Non-ordered collection of [`FailureKind`]s returned by a failed check.
///
/// Local and domain failures are reported together when both parts are
/// malformed; `NoSeparator` is always alone.
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureSet {
    kinds: BTreeSet<FailureKind>,
}

impl FailureSet {
    pub fn only(kind: FailureKind) -> Self {
        let mut set = Self::default();
        set.insert(kind);
        set
    }

    pub(crate) fn insert(&mut self, kind: FailureKind) {
        self.kinds.insert(kind);
    }

    pub fn contains(&self, kind: FailureKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = FailureKind> + '_ {
        self.kinds.iter().copied()
    }
}

impl fmt::Display for FailureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, kind) in self.kinds.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FailureSet {}

impl FromIterator<FailureKind> for FailureSet {
    fn from_iter<I: IntoIterator<Item = FailureKind>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

/// One `.`-delimited unit of a local-part, or one quoted-string run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotSegment {
    /// Texte stocké : sans guillemets, échappements résolus.
    pub content: String,
    pub quoted: bool,
    /// Structural verdict from the scanner (stray dot, stray quote,
    /// unterminated quote, dangling escape). Character classes are checked later.
    pub syntactically_valid: bool,
}

impl DotSegment {
    pub(crate) fn new(content: String, quoted: bool, syntactically_valid: bool) -> Self {
        Self {
            content,
            quoted,
            syntactically_valid,
        }
    }
}

/// Surface shape of a domain-part, decided from brackets and the `IPv6:` tag only.
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainShape {
    DnsName,
    Ipv4Literal,
    Ipv6Literal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocalDefect {
    #[error("local part is empty")]
    Empty,
    #[error("local part length {0} > 64")]
    TooLong(usize),
    #[error("local segment #{index} is malformed")]
    MalformedSegment { index: usize },
    #[error("character {ch:?} not allowed in {} local segment", quoting(.quoted))]
    ForbiddenChar { ch: char, quoted: bool },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainDefect {
    #[error("domain label '{label}' length {len} invalid (1..=63)")]
    LabelLength { label: String, len: usize },
    #[error("domain label '{label}' cannot start or end with '-'")]
    LabelHyphen { label: String },
    #[error("domain label '{label}' has invalid chars")]
    LabelChars { label: String },
    #[error("domain label '{label}' is all digits")]
    NumericLabel { label: String },
    #[error("address literal is empty")]
    EmptyLiteral,
    #[error("IPv4 literal has {0} fields, expected 4")]
    Ipv4FieldCount(usize),
    #[error("IPv4 field '{0}' is not a number in 0..=255")]
    Ipv4Field(String),
    #[error("IPv6 group '{0}' is not 1 to 4 hex digits")]
    Ipv6Group(String),
    #[error("IPv6 literal has more than one '::'")]
    Ipv6Elision,
    #[error("IPv6 literal has {0} groups")]
    Ipv6GroupCount(usize),
}

fn quoting(quoted: &bool) -> &'static str {
    if *quoted { "quoted" } else { "unquoted" }
}

impl From<&LocalDefect> for FailureKind {
    fn from(_: &LocalDefect) -> Self {
        FailureKind::InvalidLocal
    }
}

impl From<&DomainDefect> for FailureKind {
    fn from(_: &DomainDefect) -> Self {
        FailureKind::InvalidDomain
    }
}

/// Full outcome of [`check_shape`](crate::check_shape), for reporting.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeReport {
    pub original: String,
    pub local: Option<String>,
    pub domain: Option<String>,
    pub shape: Option<DomainShape>,
    pub valid: bool,
    pub failures: FailureSet,
    pub reasons: Vec<String>,
}

impl ShapeReport {
    pub fn into_result(self) -> Result<(), FailureSet> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(self.failures)
        }
    }
}
