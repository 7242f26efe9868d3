use std::sync::LazyLock;

use regex::Regex;

use super::types::{DomainDefect, DomainShape};

const MAX_LABEL_LEN: usize = 63;
const IPV4_FIELDS: usize = 4;
const IPV6_GROUPS: usize = 8;

static LABEL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9-]+$").expect("static regex")
});
static HEX_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{1,4}$").expect("static regex")
});

impl DomainShape {
    /// Étiquette la partie domaine d'après sa syntaxe de surface, sans rien valider.
    pub fn classify(domain: &str) -> Self {
        if domain.len() >= 2 && domain.starts_with('[') && domain.ends_with(']') {
            if domain.starts_with("[IPv6:") {
                DomainShape::Ipv6Literal
            } else {
                DomainShape::Ipv4Literal
            }
        } else {
            DomainShape::DnsName
        }
    }

    fn literal_prefix(self) -> &'static str {
        match self {
            DomainShape::DnsName => "",
            DomainShape::Ipv4Literal => "[",
            DomainShape::Ipv6Literal => "[IPv6:",
        }
    }

    /// Texte entre le tag du littéral et le crochet fermant.
    fn body(self, domain: &str) -> Option<&str> {
        if self == DomainShape::DnsName {
            return Some(domain);
        }
        domain
            .strip_prefix(self.literal_prefix())
            .and_then(|rest| rest.strip_suffix(']'))
    }
}

/// Classe puis applique les règles de la forme détectée.
pub(crate) fn check_domain(domain: &str) -> Result<DomainShape, DomainDefect> {
    let shape = DomainShape::classify(domain);
    #[cfg(feature = "with-tracing")]
    tracing::trace!(domain, ?shape, "domain shape");
    let body = shape.body(domain).ok_or(DomainDefect::EmptyLiteral)?;
    match shape {
        DomainShape::DnsName => body.split('.').try_for_each(check_label)?,
        DomainShape::Ipv4Literal => check_ipv4(body)?,
        DomainShape::Ipv6Literal => check_ipv6(body)?,
    }
    Ok(shape)
}

fn check_label(label: &str) -> Result<(), DomainDefect> {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return Err(DomainDefect::LabelLength {
            label: label.to_string(),
            len: label.len(),
        });
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(DomainDefect::LabelHyphen {
            label: label.to_string(),
        });
    }
    if label.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainDefect::NumericLabel {
            label: label.to_string(),
        });
    }
    if !LABEL_CHARS.is_match(label) {
        return Err(DomainDefect::LabelChars {
            label: label.to_string(),
        });
    }
    Ok(())
}

fn check_ipv4(body: &str) -> Result<(), DomainDefect> {
    let fields: Vec<&str> = body.split('.').collect();
    if fields.len() != IPV4_FIELDS {
        return Err(DomainDefect::Ipv4FieldCount(fields.len()));
    }
    for field in fields {
        // le parseur de u8 accepte un '+' initial : chiffres seulement
        let digits = !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit());
        if !digits || field.parse::<u8>().is_err() {
            return Err(DomainDefect::Ipv4Field(field.to_string()));
        }
    }
    Ok(())
}

/// Un seul groupe vide autorisé (l'élision `::`), à n'importe quelle position.
fn check_ipv6(body: &str) -> Result<(), DomainDefect> {
    // littéral réduit au tag : aucun groupe explicite
    if body.is_empty() {
        return Err(DomainDefect::EmptyLiteral);
    }
    let groups: Vec<&str> = body.split(':').collect();
    let mut elided = false;
    for group in &groups {
        if group.is_empty() {
            if elided {
                return Err(DomainDefect::Ipv6Elision);
            }
            elided = true;
            continue;
        }
        if !HEX_GROUP.is_match(group) {
            return Err(DomainDefect::Ipv6Group(group.to_string()));
        }
    }
    if groups.len() > IPV6_GROUPS || (!elided && groups.len() != IPV6_GROUPS) {
        return Err(DomainDefect::Ipv6GroupCount(groups.len()));
    }
    Ok(())
}
