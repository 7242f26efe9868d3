mod charset;
mod domain;
mod local;
mod types;

pub use local::parse_local_part;
pub use types::{
    DomainDefect, DomainShape, DotSegment, FailureKind, FailureSet, LocalDefect, ShapeReport,
};

use domain::check_domain;
use local::check_local;

/// Adresse découpée sur son dernier `@`.
///
/// Une partie locale quotée peut contenir un `@` nu : le séparateur est le dernier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address<'a> {
    pub local: &'a str,
    pub domain: &'a str,
}

impl<'a> Address<'a> {
    pub fn split(input: &'a str) -> Option<Self> {
        input
            .rsplit_once('@')
            .map(|(local, domain)| Self { local, domain })
    }
}

/// Verdict par partie ; les deux parties sont toujours vérifiées.
struct Assessment {
    local: Result<(), LocalDefect>,
    domain: Result<DomainShape, DomainDefect>,
}

impl Assessment {
    fn of(address: Address<'_>) -> Self {
        #[cfg(feature = "with-tracing")]
        tracing::trace!(at = address.local.len(), "split on last @");
        let assessment = Self {
            local: check_local(address.local),
            domain: check_domain(address.domain),
        };
        #[cfg(feature = "with-tracing")]
        {
            if let Err(defect) = &assessment.local {
                tracing::debug!(local = address.local, %defect, "local part rejected");
            }
            if let Err(defect) = &assessment.domain {
                tracing::debug!(domain = address.domain, %defect, "domain part rejected");
            }
        }
        assessment
    }

    fn failures(&self) -> FailureSet {
        let local = self.local.as_ref().err().map(FailureKind::from);
        let domain = self.domain.as_ref().err().map(FailureKind::from);
        local.into_iter().chain(domain).collect()
    }
}

/// Checks the syntactic shape of an e-mail address.
///
/// No lookup, no normalization: the input is only read. On failure the set
/// holds [`FailureKind::NoSeparator`] alone, or any of
/// [`FailureKind::InvalidLocal`] and [`FailureKind::InvalidDomain`].
///
/// ```
/// use mailshape::{FailureKind, validate_shape};
///
/// assert!(validate_shape("simple@example.com").is_ok());
/// let err = validate_shape("a b@-x").unwrap_err();
/// assert!(err.contains(FailureKind::InvalidLocal));
/// assert!(err.contains(FailureKind::InvalidDomain));
/// ```
pub fn validate_shape(address: &str) -> Result<(), FailureSet> {
    let Some(parts) = Address::split(address) else {
        #[cfg(feature = "with-tracing")]
        tracing::debug!("no @ in address");
        return Err(FailureSet::only(FailureKind::NoSeparator));
    };
    let failures = Assessment::of(parts).failures();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

pub fn is_valid_shape(address: &str) -> bool {
    validate_shape(address).is_ok()
}

/// **Rapport** : même verdict que [`validate_shape`], avec les parties
/// découpées et la raison de chaque échec.
pub fn check_shape(address: &str) -> ShapeReport {
    let Some(parts) = Address::split(address) else {
        return ShapeReport {
            original: address.to_string(),
            local: None,
            domain: None,
            shape: None,
            valid: false,
            failures: FailureSet::only(FailureKind::NoSeparator),
            reasons: vec![FailureKind::NoSeparator.to_string()],
        };
    };

    let assessment = Assessment::of(parts);
    let failures = assessment.failures();
    let mut reasons = Vec::new();
    if let Err(defect) = &assessment.local {
        reasons.push(defect.to_string());
    }
    if let Err(defect) = &assessment.domain {
        reasons.push(defect.to_string());
    }

    ShapeReport {
        original: address.to_string(),
        local: Some(parts.local.to_string()),
        domain: Some(parts.domain.to_string()),
        shape: Some(DomainShape::classify(parts.domain)),
        valid: failures.is_empty(),
        failures,
        reasons,
    }
}

#[cfg(test)]
mod tests;
