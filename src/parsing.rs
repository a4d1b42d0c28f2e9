//! # Parsing
//! Squares, pieces, castling rights, moves and whole positions can all be read
//! from their usual textual notation through the standard [`FromStr`](std::str::FromStr)
//! trait.
//!
//! Every one of those types also implements [`PartialFromStr`], which parses a
//! value from the *start* of the input and hands back whatever was left over.
//! Parsing "e2e4" as a square yields `Ok((Square::E2, "e4"))`, so successive
//! calls can walk along a larger string such as a move or a FEN record.

use std::str::FromStr;

/// Parses a value from a prefix of a string.
pub trait PartialFromStr: Sized {
    type Err;

    /// Parses a value from the start of `s`, returning it along with the unparsed
    /// rest of the input.
    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err>;
}

/// Parses an unsigned decimal number, returning `None` when `src` does not start
/// with a digit or the value does not fit in `T`.
pub(crate) fn parse_int<T: FromStr>(src: &str) -> Option<(T, &str)> {
    let digits = src.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value = src[..digits].parse().ok()?;
    Some((value, &src[digits..]))
}

/// Returns the rest of the input after walking whitespace values.
pub(crate) fn walk_whitespace(src: &str) -> &str {
    src.trim_start()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_int_stops_at_non_digit() {
        assert_eq!(parse_int::<u16>("42 1"), Some((42, " 1")));
        assert_eq!(parse_int::<u16>("7"), Some((7, "")));
        assert_eq!(parse_int::<u16>("x7"), None);
        assert_eq!(parse_int::<u16>("99999"), None);
        assert_eq!(parse_int::<u32>("99999"), Some((99999, "")));
    }
}
