//! ## Element encoding
//! Every element pushed into a sketch is first turned into a canonical byte sequence
//! which is what the base hash functions see. The set of encodable values is closed:
//! - byte sequences pass through unchanged
//! - fixed-width integers of any width and signedness are widened to 64 bits
//!   (signed values sign-extended) and written as 8 little-endian bytes
//! - strings which fully parse as a non-negative integer literal (decimal, `0x`, `0o`,
//!   `0b` or leading-zero octal, with optional `_` digit separators) are encoded as
//!   that integer, anything else as its UTF-8 bytes
//!
//! Types outside this set have no `Into<Element>` conversion and are rejected by the
//! compiler.

use enum_dispatch::enum_dispatch;

/// Element variants supported by `Sketch::push`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[enum_dispatch]
pub enum Element<'a> {
    Bytes(Bytes<'a>),
    Integer(Integer),
    IntegerLiteral(IntegerLiteral<'a>),
}

/// Canonical encoding trait implemented by every element variant.
#[enum_dispatch(Element)]
pub trait Encode {
    fn encode(&self) -> Encoded<'_>;
}

/// Canonical byte form of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoded<'a> {
    Borrowed(&'a [u8]),
    Word([u8; 8]),
}

impl Encoded<'_> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Encoded::Borrowed(bytes) => *bytes,
            Encoded::Word(word) => &word[..],
        }
    }
}

/// Raw byte sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bytes<'a>(pub &'a [u8]);

/// Integer widened to 64 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer(pub u64);

/// String which is hashed as an integer when it reads as one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerLiteral<'a>(pub &'a str);

impl Encode for Bytes<'_> {
    #[inline]
    fn encode(&self) -> Encoded<'_> {
        Encoded::Borrowed(self.0)
    }
}

impl Encode for Integer {
    #[inline]
    fn encode(&self) -> Encoded<'_> {
        Encoded::Word(self.0.to_le_bytes())
    }
}

impl Encode for IntegerLiteral<'_> {
    #[inline]
    fn encode(&self) -> Encoded<'_> {
        match parse_integer_literal(self.0) {
            Some(n) => Encoded::Word(n.to_le_bytes()),
            None => Encoded::Borrowed(self.0.as_bytes()),
        }
    }
}

/// Parse a non-negative integer literal with an optional radix prefix.
///
/// Single underscores may separate digits, or follow a radix prefix. Returns `None`
/// unless the whole string is consumed and the value fits in `u64`.
pub(crate) fn parse_integer_literal(s: &str) -> Option<u64> {
    let (digits, radix, prefixed) = match s.as_bytes() {
        [b'0', b'x' | b'X', ..] => (&s[2..], 16, true),
        [b'0', b'o' | b'O', ..] => (&s[2..], 8, true),
        [b'0', b'b' | b'B', ..] => (&s[2..], 2, true),
        [b'0', _, ..] => (&s[1..], 8, true),
        _ => (s, 10, false),
    };

    let mut value = 0u64;
    let mut seen_digit = false;
    // a prefix counts as a digit for separator placement
    let mut after_digit = prefixed;
    for c in digits.chars() {
        if c == '_' {
            if !after_digit {
                return None;
            }
            after_digit = false;
            continue;
        }
        let d = c.to_digit(radix)?;
        value = value
            .checked_mul(u64::from(radix))?
            .checked_add(u64::from(d))?;
        seen_digit = true;
        after_digit = true;
    }

    if !seen_digit || !after_digit {
        return None;
    }
    Some(value)
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Element<'_> {
                #[inline]
                fn from(v: $t) -> Self {
                    Element::Integer(Integer(u64::from(v)))
                }
            }

            impl From<&$t> for Element<'_> {
                #[inline]
                fn from(v: &$t) -> Self {
                    Element::from(*v)
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Element<'_> {
                #[inline]
                fn from(v: $t) -> Self {
                    Element::Integer(Integer(i64::from(v) as u64))
                }
            }

            impl From<&$t> for Element<'_> {
                #[inline]
                fn from(v: &$t) -> Self {
                    Element::from(*v)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64);
impl_from_signed!(i8, i16, i32, i64);

impl From<usize> for Element<'_> {
    #[inline]
    fn from(v: usize) -> Self {
        Element::Integer(Integer(v as u64))
    }
}

impl From<&usize> for Element<'_> {
    #[inline]
    fn from(v: &usize) -> Self {
        Element::from(*v)
    }
}

impl From<isize> for Element<'_> {
    #[inline]
    fn from(v: isize) -> Self {
        Element::Integer(Integer(v as i64 as u64))
    }
}

impl From<&isize> for Element<'_> {
    #[inline]
    fn from(v: &isize) -> Self {
        Element::from(*v)
    }
}

impl<'a> From<&'a [u8]> for Element<'a> {
    #[inline]
    fn from(v: &'a [u8]) -> Self {
        Element::Bytes(Bytes(v))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Element<'a> {
    #[inline]
    fn from(v: &'a [u8; N]) -> Self {
        Element::Bytes(Bytes(v))
    }
}

impl<'a> From<&'a Vec<u8>> for Element<'a> {
    #[inline]
    fn from(v: &'a Vec<u8>) -> Self {
        Element::Bytes(Bytes(v))
    }
}

impl<'a> From<&'a str> for Element<'a> {
    #[inline]
    fn from(v: &'a str) -> Self {
        Element::IntegerLiteral(IntegerLiteral(v))
    }
}

impl<'a> From<&'a String> for Element<'a> {
    #[inline]
    fn from(v: &'a String) -> Self {
        Element::IntegerLiteral(IntegerLiteral(v))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use test_case::test_case;

    fn encode<'a>(e: impl Into<Element<'a>>) -> Vec<u8> {
        e.into().encode().as_bytes().to_vec()
    }

    #[test_case("0" => Some(0); "zero")]
    #[test_case("42" => Some(42); "decimal")]
    #[test_case("0x2a" => Some(42); "hex")]
    #[test_case("0X2A" => Some(42); "upper hex")]
    #[test_case("0o52" => Some(42); "octal")]
    #[test_case("052" => Some(42); "leading zero octal")]
    #[test_case("0b101010" => Some(42); "binary")]
    #[test_case("18446744073709551615" => Some(u64::MAX); "max u64")]
    #[test_case("18446744073709551616" => None; "overflow")]
    #[test_case("" => None; "empty")]
    #[test_case("-1" => None; "negative")]
    #[test_case("+1" => None; "explicit sign")]
    #[test_case("08" => None; "invalid octal digit")]
    #[test_case("0x" => None; "prefix only")]
    #[test_case("12ab" => None; "trailing garbage")]
    #[test_case("item" => None; "word")]
    #[test_case("1_000" => Some(1000); "digit separators")]
    #[test_case("0x_1f" => Some(31); "separator after hex prefix")]
    #[test_case("0b_1_0" => Some(2); "separators in binary")]
    #[test_case("0_17" => Some(15); "separator after leading zero")]
    #[test_case("1__0" => None; "doubled separator")]
    #[test_case("_1" => None; "leading separator")]
    #[test_case("1_" => None; "trailing separator")]
    #[test_case("0x_" => None; "separator only after prefix")]
    fn test_parse_integer_literal(s: &str) -> Option<u64> {
        parse_integer_literal(s)
    }

    #[test]
    fn test_integers_encode_little_endian() {
        assert_eq!(encode(1u8), vec![1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encode(0x0102u16), vec![2, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encode(7usize), encode(7u64));
        assert_eq!(encode(7i32), encode(7u64));
        assert_eq!(encode(&7u32), encode(7u64));
    }

    #[test]
    fn test_signed_integers_sign_extend() {
        assert_eq!(encode(-1i8), vec![0xff; 8]);
        assert_eq!(encode(-1i64), vec![0xff; 8]);
        assert_eq!(encode(-2isize), encode(-2i16));
    }

    #[test]
    fn test_bytes_pass_through() {
        assert_eq!(encode(&b"abc"[..]), b"abc".to_vec());
        assert_eq!(encode(b"abc"), b"abc".to_vec());
        assert_eq!(encode(&vec![9u8, 8]), vec![9, 8]);
        assert!(encode(&b""[..]).is_empty());
    }

    #[test]
    fn test_strings() {
        assert_eq!(encode("42"), encode(42u32));
        assert_eq!(encode("0x2a"), encode(42u32));
        assert_eq!(encode("1_000"), encode(1000u32));
        assert_eq!(encode("1__000"), b"1__000".to_vec());
        assert_eq!(encode("item"), b"item".to_vec());
        assert_eq!(encode(&String::from("-5")), b"-5".to_vec());
    }
}
