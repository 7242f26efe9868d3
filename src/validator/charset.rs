use phf::phf_set;

/// ponctuation atext (RFC 5322 §3.2.3)
static UNQUOTED_PUNCTUATION: phf::Set<char> = phf_set! {
    '!', '#', '$', '%', '&', '\'', '*', '+', '-', '/',
    '=', '?', '^', '_', '`', '{', '|', '}', '~',
};

/// Caractères en plus entre guillemets. `"` n'arrive qu'échappé.
static QUOTED_EXTRA: phf::Set<char> = phf_set! {
    ' ', '.', '(', ')', ',', ':', ';', '<', '>', '@', '[', ']', '\\', '"',
};

pub(crate) fn is_unquoted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || UNQUOTED_PUNCTUATION.contains(&c)
}

pub(crate) fn is_quoted_char(c: char) -> bool {
    is_unquoted_char(c) || QUOTED_EXTRA.contains(&c)
}
