use super::*;
use proptest::prelude::*;

const VALID: &[&str] = &[
    "simple@example.com",
    "very.common@example.com",
    "x@example.com",
    "long.email-address-with-hyphens@and.subdomains.example.com",
    "user.name+tag+sorting@example.com",
    "name/surname@example.com",
    "admin@example",
    "example@s.example",
    r#"" "@example.org"#,
    r#""john..doe"@example.org"#,
    r#"".john.doe"@example.org"#,
    "mailhost!username@example.org",
    r#""very.(),:;<>[]\".VERY.\"very@\\ \"very\".unusual"@strange.example.com"#,
    "user%example.com@example.org",
    "user-@example.org",
    "postmaster@[123.123.123.123]",
    "postmaster@[IPv6:2001:0db8:85a3:0000:0000:8a2e:0370:7334]",
    "_test@[IPv6:2001:0db8:85a3:0000:0000:8a2e:0370:7334]",
    "_test@[IPv6:2001:0db8:85a3::8a2e:0370:7334]",
    r#""a".b@example.com"#,
    r#""a"..b@example.com"#,
    "trailing.@example.com",
    r#""a".@example.com"#,
    "x@[IPv6:1:2:3:4:5:6:7:]",
    "x@[IPv6::1:2:3:4:5:6:7]",
];

const INVALID: &[(&str, FailureKind)] = &[
    ("abc.example.com", FailureKind::NoSeparator),
    ("a@b@c@example.com", FailureKind::InvalidLocal),
    (r#"a"b(c)d,e:f;g<h>i[j\k]l@example.com"#, FailureKind::InvalidLocal),
    (r#"just"not"right@example.com"#, FailureKind::InvalidLocal),
    (r#"this is"not\allowed@example.com"#, FailureKind::InvalidLocal),
    (r#"this\ still\"not\\allowed@example.com"#, FailureKind::InvalidLocal),
    (
        "1234567890123456789012345678901234567890123456789012345678901234+x@example.com",
        FailureKind::InvalidLocal,
    ),
    (".leading@example.com", FailureKind::InvalidLocal),
    (r#""a"."b"@example.com"#, FailureKind::InvalidLocal),
    (r#""unterminated@example.com"#, FailureKind::InvalidLocal),
    (
        "i.like.underscores@but_they_are_not_allowed_in_this_part",
        FailureKind::InvalidDomain,
    ),
    ("example@-dashes-at-start-are-invalid", FailureKind::InvalidDomain),
    ("example@dashes-at-end-are-invalid-", FailureKind::InvalidDomain),
    ("all-numbers-in-domain-are-wrong@123.com", FailureKind::InvalidDomain),
    (
        "domains@must-be-less-than-64-characters-12345678901234567890123456789012",
        FailureKind::InvalidDomain,
    ),
    ("domain-labels@are.non.zero..length", FailureKind::InvalidDomain),
    ("invalid.IPv4@[abc]", FailureKind::InvalidDomain),
    ("too.many.octets@[123.123.123.123.123]", FailureKind::InvalidDomain),
    ("too.few.octets@[123.123.123]", FailureKind::InvalidDomain),
    ("invalid.IPv6@[IPv6:123456::]", FailureKind::InvalidDomain),
    ("invalid.IPv6@[IPv6:defg::]", FailureKind::InvalidDomain),
    ("invalid.IPv6@[IPv6:abcd::efg::a]", FailureKind::InvalidDomain),
    ("empty.domain@", FailureKind::InvalidDomain),
];

#[test]
fn accepts_valid_corpus() {
    for email in VALID {
        assert_eq!(validate_shape(email), Ok(()), "{email}");
        assert!(is_valid_shape(email), "{email}");
    }
}

#[test]
fn rejects_invalid_corpus_with_single_kind() {
    for (email, kind) in INVALID {
        let err = validate_shape(email).expect_err(email);
        assert_eq!(err, FailureSet::only(*kind), "{email}");
    }
}

#[test]
fn reports_both_parts_together() {
    let err = validate_shape("a b@-x").unwrap_err();
    assert_eq!(err.len(), 2);
    assert!(err.contains(FailureKind::InvalidLocal));
    assert!(err.contains(FailureKind::InvalidDomain));
    assert!(!err.contains(FailureKind::NoSeparator));
}

#[test]
fn degenerate_inputs_never_panic() {
    for input in ["", "@", "@@", "[", "a@[", "a@]", "a@[]", "a@[IPv6:]", "\u{0}@\u{7f}", "\"@\""] {
        assert!(validate_shape(input).is_err(), "{input:?}");
    }
    assert_eq!(
        validate_shape("@"),
        Err([FailureKind::InvalidLocal, FailureKind::InvalidDomain]
            .into_iter()
            .collect())
    );
}

#[test]
fn local_length_boundary() {
    let ok = format!("{}@example.com", "a".repeat(64));
    assert!(validate_shape(&ok).is_ok());
    let too_long = format!("\"{}\"@example.com", " ".repeat(63));
    assert_eq!(
        validate_shape(&too_long),
        Err(FailureSet::only(FailureKind::InvalidLocal))
    );
}

#[test]
fn split_uses_last_at() {
    let parts = Address::split("\"a@b\"@example.com").unwrap();
    assert_eq!(parts.local, "\"a@b\"");
    assert_eq!(parts.domain, "example.com");
    assert!(Address::split("nope").is_none());
}

#[test]
fn report_carries_parts_and_reasons() {
    let report = check_shape("example@-dashes");
    assert!(!report.valid);
    assert_eq!(report.local.as_deref(), Some("example"));
    assert_eq!(report.domain.as_deref(), Some("-dashes"));
    assert_eq!(report.shape, Some(DomainShape::DnsName));
    insta::assert_snapshot!(report.reasons.join("; "), @"domain label '-dashes' cannot start or end with '-'");

    let report = check_shape("postmaster@[IPv6:2001:db8::1]");
    assert!(report.valid);
    assert_eq!(report.shape, Some(DomainShape::Ipv6Literal));
    assert!(report.reasons.is_empty());

    let report = check_shape("no-separator");
    assert_eq!(report.local, None);
    insta::assert_snapshot!(report.reasons.join("; "), @"no @");
}

#[test]
fn failure_set_display() {
    let err = validate_shape("a b@-x").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"local part is invalid; domain part is invalid");
    let reasons = check_shape("a b@-x").reasons.join("; ");
    insta::assert_snapshot!(
        reasons,
        @"character ' ' not allowed in unquoted local segment; domain label '-x' cannot start or end with '-'"
    );
}

proptest! {
    #[test]
    fn without_at_only_no_separator(s in "[^@]*") {
        prop_assert_eq!(validate_shape(&s), Err(FailureSet::only(FailureKind::NoSeparator)));
    }

    #[test]
    fn verdict_is_deterministic_and_matches_report(s in ".{0,80}") {
        let first = validate_shape(&s);
        prop_assert_eq!(&first, &validate_shape(&s));
        prop_assert_eq!(first, check_shape(&s).into_result());
    }

    #[test]
    fn dot_atoms_on_plain_domain_pass(local in "[a-z0-9]{1,10}(\\.[a-z0-9+_-]{1,10}){0,3}") {
        let email = format!("{local}@example.com");
        prop_assert!(validate_shape(&email).is_ok());
    }

    #[test]
    fn overlong_local_rejected(local in "[a-z]{65,80}") {
        let err = validate_shape(&format!("{local}@example.com")).unwrap_err();
        prop_assert_eq!(err, FailureSet::only(FailureKind::InvalidLocal));
    }
}

#[cfg(feature = "with-tracing")]
#[test]
fn trace_events_leave_verdict_unchanged() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        assert!(validate_shape("postmaster@[123.123.123.123]").is_ok());
        assert_eq!(check_shape("a b@-x").failures.len(), 2);
    });
}
