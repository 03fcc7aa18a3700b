use core::fmt;

use crate::Object;

/// Raw identifier of the end-of-script marker in image listings.
pub const END_OF_SCRIPT_ID: i64 = -1;
/// Raw identifier of the context-reset marker in image listings.
pub const RESET_CONTEXT_ID: i64 = -2;
/// Builtin `i` is encoded as `BUILTIN_BASE_ID + i`.
const BUILTIN_BASE_ID: i64 = i64::MIN;

/// Identifier of a builtin operation.
///
/// The discriminant is the index into every [`BuiltinTable`](crate::BuiltinTable),
/// so new builtins are appended to keep existing identifiers stable.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Halt = 0,
    Print = 1,
    PrintRange = 2,
}

impl Builtin {
    pub const COUNT: usize = 3;
    pub const ALL: [Builtin; Self::COUNT] =
        [Builtin::Halt, Builtin::Print, Builtin::PrintRange];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name used for this builtin in script source.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Halt => "halt",
            Self::Print => "print",
            Self::PrintRange => "printRange",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a send asks the receiver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    Builtin(Builtin),
    /// Reserved for user-defined handlers, which this runtime does not have.
    User(u32),
}

impl Selector {
    /// Identifier in the image encoding: builtins count up from `i64::MIN`,
    /// user identifiers are non-negative.
    pub const fn raw(self) -> i64 {
        match self {
            Self::Builtin(builtin) => BUILTIN_BASE_ID + builtin as i64,
            Self::User(id) => id as i64,
        }
    }

    /// Inverse of [`Selector::raw`]. Control markers and unassigned builtin
    /// identifiers are not selectors.
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw >= 0 {
            return u32::try_from(raw).ok().map(Self::User);
        }
        let index = usize::try_from(raw.wrapping_sub(BUILTIN_BASE_ID)).ok()?;
        Builtin::from_index(index).map(Self::Builtin)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(builtin) => write!(f, "{builtin}"),
            Self::User(id) => write!(f, "#{id}"),
        }
    }
}

/// Nested argument scripts of a send, evaluated only on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arguments<'s> {
    scripts: &'s [Script<'s>],
}

impl<'s> Arguments<'s> {
    pub const EMPTY: Arguments<'static> = Arguments { scripts: &[] };

    pub const fn new(scripts: &'s [Script<'s>]) -> Self {
        Self { scripts }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.scripts.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&'s Script<'s>> {
        self.scripts.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'s, Script<'s>> {
        self.scripts.iter()
    }
}

/// One step of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message<'s> {
    /// Forced result: the literal becomes the receiver and the result.
    Literal(Object<'s>),
    Send {
        selector: Selector,
        arguments: Arguments<'s>,
    },
    /// Rebind the receiver to the context the script was started with.
    ResetContext,
    End,
}

impl<'s> Message<'s> {
    pub const fn send(builtin: Builtin) -> Self {
        Self::Send {
            selector: Selector::Builtin(builtin),
            arguments: Arguments::EMPTY,
        }
    }

    pub const fn send_with(builtin: Builtin, arguments: &'s [Script<'s>]) -> Self {
        Self::Send {
            selector: Selector::Builtin(builtin),
            arguments: Arguments::new(arguments),
        }
    }

    /// Identifier of this message in the image encoding; literals carry no
    /// selector and encode as `0`.
    pub const fn raw_id(&self) -> i64 {
        match self {
            Self::Literal(_) => 0,
            Self::Send { selector, .. } => selector.raw(),
            Self::ResetContext => RESET_CONTEXT_ID,
            Self::End => END_OF_SCRIPT_ID,
        }
    }
}

/// Terminated, read-only sequence of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Script<'s> {
    messages: &'s [Message<'s>],
}

impl<'s> Script<'s> {
    /// # Panics
    /// If `messages` does not end with [`Message::End`]. In a `static` this
    /// is a compile error.
    pub const fn new(messages: &'s [Message<'s>]) -> Self {
        assert!(
            matches!(messages.last(), Some(Message::End)),
            "script must end with Message::End"
        );
        Self { messages }
    }

    pub const fn try_new(messages: &'s [Message<'s>]) -> Option<Self> {
        if matches!(messages.last(), Some(Message::End)) {
            Some(Self { messages })
        } else {
            None
        }
    }

    /// All messages including the terminating [`Message::End`].
    #[inline]
    pub const fn messages(&self) -> &'s [Message<'s>] {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
            assert_eq!(Builtin::from_index(builtin.index()), Some(builtin));
        }
        assert_eq!(Builtin::from_name("put"), None);
        assert_eq!(Builtin::from_index(Builtin::COUNT), None);
    }

    #[test]
    fn raw_identifiers_do_not_collide() {
        assert_eq!(Selector::Builtin(Builtin::Halt).raw(), i64::MIN);
        assert_eq!(Selector::Builtin(Builtin::PrintRange).raw(), i64::MIN + 2);
        assert_eq!(Selector::User(0).raw(), 0);

        for builtin in Builtin::ALL {
            let raw = Selector::Builtin(builtin).raw();
            assert!(raw < RESET_CONTEXT_ID);
            assert_eq!(Selector::from_raw(raw), Some(Selector::Builtin(builtin)));
        }
        assert_eq!(Selector::from_raw(END_OF_SCRIPT_ID), None);
        assert_eq!(Selector::from_raw(RESET_CONTEXT_ID), None);
        assert_eq!(Selector::from_raw(i64::MIN + 3), None);
        assert_eq!(Selector::from_raw(42), Some(Selector::User(42)));
    }

    #[test]
    fn script_requires_terminator() {
        let open = [Message::Literal(Object::Integer(1))];
        assert!(Script::try_new(&open).is_none());
        assert!(Script::try_new(&[]).is_none());

        let closed = [Message::Literal(Object::Integer(1)), Message::End];
        let script = Script::try_new(&closed).expect("terminated");
        assert_eq!(script.messages().len(), 2);
    }

    #[test]
    #[should_panic(expected = "script must end with Message::End")]
    fn script_new_panics_when_unterminated() {
        let open = [Message::ResetContext];
        let _ = Script::new(&open);
    }

    #[test]
    fn raw_ids_of_markers() {
        assert_eq!(Message::End.raw_id(), END_OF_SCRIPT_ID);
        assert_eq!(Message::ResetContext.raw_id(), RESET_CONTEXT_ID);
        assert_eq!(Message::Literal(Object::Globals).raw_id(), 0);
        assert_eq!(Message::send(Builtin::Print).raw_id(), i64::MIN + 1);
    }
}
