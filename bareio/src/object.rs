use core::fmt;

/// Immutable byte string with an explicit length.
///
/// Borrowed from the script image or from a builtin's stack frame; never
/// nul-terminated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BareString<'s> {
    bytes: &'s [u8],
}

impl<'s> BareString<'s> {
    pub const fn new(bytes: &'s [u8]) -> Self {
        Self { bytes }
    }

    pub const fn from_text(value: &'s str) -> Self {
        Self {
            bytes: value.as_bytes(),
        }
    }

    #[inline]
    pub const fn as_bytes(&self) -> &'s [u8] {
        self.bytes
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes `start..end`, or `None` if the range is not inside the string.
    pub fn slice(&self, start: i64, end: i64) -> Option<&'s [u8]> {
        let start = usize::try_from(start).ok()?;
        let end = usize::try_from(end).ok()?;
        self.bytes.get(start..end)
    }
}

impl fmt::Debug for BareString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(self.bytes) {
            Ok(s) => write!(f, "{s:?}"),
            Err(_) => write!(f, "{:?}", self.bytes),
        }
    }
}

/// Runtime value.
///
/// The variant decides which builtin table a send is looked up in, so a
/// builtin can never see a payload of the wrong kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Object<'s> {
    /// The root context every top-level script starts from.
    Globals,
    String(BareString<'s>),
    Integer(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Globals,
    String,
    Integer,
}

impl<'s> Object<'s> {
    pub const fn string(bytes: &'s [u8]) -> Self {
        Self::String(BareString::new(bytes))
    }

    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::Globals => ObjectKind::Globals,
            Self::String(_) => ObjectKind::String,
            Self::Integer(_) => ObjectKind::Integer,
        }
    }

    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_string(&self) -> Option<BareString<'s>> {
        match self {
            Self::String(value) => Some(*value),
            _ => None,
        }
    }
}

impl ObjectKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Globals => "globals",
            Self::String => "string",
            Self::Integer => "integer",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_variant() {
        assert_eq!(Object::Globals.kind(), ObjectKind::Globals);
        assert_eq!(Object::string(b"abc").kind(), ObjectKind::String);
        assert_eq!(Object::Integer(3).kind(), ObjectKind::Integer);
    }

    #[test]
    fn accessors_reject_other_variants() {
        assert_eq!(Object::Integer(5).as_integer(), Some(5));
        assert_eq!(Object::Globals.as_integer(), None);
        assert_eq!(Object::Integer(5).as_string(), None);
        assert_eq!(
            Object::string(b"hi").as_string().map(|s| s.as_bytes()),
            Some(&b"hi"[..])
        );
    }

    #[test]
    fn slice_checks_bounds() {
        let s = BareString::from_text("BareIO!");
        assert_eq!(s.slice(0, 4), Some(&b"Bare"[..]));
        assert_eq!(s.slice(4, 4), Some(&b""[..]));
        assert_eq!(s.slice(4, 7), Some(&b"IO!"[..]));
        assert_eq!(s.slice(-1, 3), None);
        assert_eq!(s.slice(3, 2), None);
        assert_eq!(s.slice(0, 8), None);
    }
}
