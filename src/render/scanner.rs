/// Quote state for the positional scan.
///
/// The two flags toggle independently; one being set does not stop the other from
/// flipping. Templates that nest one quote kind inside the other can therefore end up
/// with both flags set.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct QuoteFlags {
    pub(super) single: bool,
    pub(super) double: bool,
}

impl QuoteFlags {
    pub(super) fn is_clear(self) -> bool {
        !self.single && !self.double
    }
}

/// Substitute every `?` outside quotes with the next literal from `next_literal`.
///
/// A backslash copies itself and the following character unchanged. When `next_literal`
/// runs dry the `?` stays in the output.
pub(super) fn scan_positional<F>(template: &str, mut next_literal: F) -> String
where
    F: FnMut() -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut quotes = QuoteFlags::default();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                quotes.single = !quotes.single;
                out.push(c);
            }
            '"' => {
                quotes.double = !quotes.double;
                out.push(c);
            }
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '?' if quotes.is_clear() => match next_literal() {
                Some(literal) => out.push_str(&literal),
                None => out.push('?'),
            },
            _ => out.push(c),
        }
    }

    out
}

/// Substitute every `?` in order, ignoring quotes entirely.
pub(super) fn substitute_in_order<I>(template: &str, literals: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut literals = literals.into_iter();
    let mut out = String::with_capacity(template.len());
    let mut pieces = template.split('?');

    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for piece in pieces {
        match literals.next() {
            Some(literal) => out.push_str(&literal),
            None => out.push('?'),
        }
        out.push_str(piece);
    }

    out
}
