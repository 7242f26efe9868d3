#![forbid(unsafe_code)]
//! mailshape — syntactic shape check of e-mail addresses
//!
//! Pure function over the input: no DNS, no SMTP, no normalization.

pub mod validator;
pub use validator::{
    Address,
    DomainDefect,
    DomainShape,
    DotSegment,
    FailureKind,
    FailureSet,
    LocalDefect,
    ShapeReport,
    check_shape,
    is_valid_shape,
    parse_local_part,
    validate_shape,
};
