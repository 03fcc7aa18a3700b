use crate::{
    Builtin, BuiltinCall, ExecutionResult, Interpreter, Object, ObjectKind,
    primitives,
};

pub type BuiltinFunction =
    for<'s> fn(&mut Interpreter<'_>, BuiltinCall<'s>) -> ExecutionResult<'s>;

#[derive(Debug, Copy, Clone)]
pub struct BuiltinMessage {
    pub builtin: Builtin,
    /// `<variant>.<operation>`, for listings and logs.
    pub name: &'static str,
    pub ptr: BuiltinFunction,
}

impl BuiltinMessage {
    pub const fn new(
        builtin: Builtin,
        name: &'static str,
        ptr: BuiltinFunction,
    ) -> Self {
        Self { builtin, name, ptr }
    }
}

/// Builtins understood by one object variant, indexed by [`Builtin::index`].
#[derive(Debug)]
pub struct BuiltinTable {
    pub kind: ObjectKind,
    entries: [Option<BuiltinMessage>; Builtin::COUNT],
}

impl BuiltinTable {
    /// # Panics
    /// At compile time if a builtin is registered twice.
    pub const fn new(kind: ObjectKind, messages: &[BuiltinMessage]) -> Self {
        let mut entries = [None; Builtin::COUNT];
        let mut i = 0;
        while i < messages.len() {
            let message = messages[i];
            let index = message.builtin.index();
            assert!(entries[index].is_none(), "builtin registered twice");
            entries[index] = Some(message);
            i += 1;
        }
        Self { kind, entries }
    }

    #[inline]
    pub fn get(&self, builtin: Builtin) -> Option<&BuiltinMessage> {
        self.entries[builtin.index()].as_ref()
    }

    #[inline]
    pub fn lookup(&self, builtin: Builtin) -> Option<BuiltinFunction> {
        self.get(builtin).map(|message| message.ptr)
    }

    pub fn messages(&self) -> impl Iterator<Item = &BuiltinMessage> {
        self.entries.iter().flatten()
    }
}

pub static GLOBALS_BUILTINS: BuiltinTable = BuiltinTable::new(
    ObjectKind::Globals,
    &[BuiltinMessage::new(Builtin::Halt, "globals.halt", primitives::globals::halt)],
);

pub static STRING_BUILTINS: BuiltinTable = BuiltinTable::new(
    ObjectKind::String,
    &[
        BuiltinMessage::new(Builtin::Print, "string.print", primitives::string::print),
        BuiltinMessage::new(
            Builtin::PrintRange,
            "string.print_range",
            primitives::string::print_range,
        ),
    ],
);

pub static INTEGER_BUILTINS: BuiltinTable = BuiltinTable::new(
    ObjectKind::Integer,
    &[BuiltinMessage::new(Builtin::Print, "integer.print", primitives::integer::print)],
);

pub fn builtin_table(kind: ObjectKind) -> &'static BuiltinTable {
    match kind {
        ObjectKind::Globals => &GLOBALS_BUILTINS,
        ObjectKind::String => &STRING_BUILTINS,
        ObjectKind::Integer => &INTEGER_BUILTINS,
    }
}

/// Resolve `builtin` against the table of `receiver`'s variant.
pub fn lookup(receiver: &Object<'_>, builtin: Builtin) -> Option<BuiltinFunction> {
    builtin_table(receiver.kind()).lookup(builtin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_match_variants() {
        for kind in [ObjectKind::Globals, ObjectKind::String, ObjectKind::Integer] {
            assert_eq!(builtin_table(kind).kind, kind);
        }
    }

    #[test]
    fn halt_only_on_globals() {
        assert!(lookup(&Object::Globals, Builtin::Halt).is_some());
        assert!(lookup(&Object::string(b"x"), Builtin::Halt).is_none());
        assert!(lookup(&Object::Integer(1), Builtin::Halt).is_none());
    }

    #[test]
    fn print_on_strings_and_integers() {
        assert!(lookup(&Object::Globals, Builtin::Print).is_none());
        assert_eq!(
            STRING_BUILTINS.get(Builtin::Print).map(|m| m.name),
            Some("string.print")
        );
        assert_eq!(
            INTEGER_BUILTINS.get(Builtin::Print).map(|m| m.name),
            Some("integer.print")
        );
    }

    #[test]
    fn print_range_only_on_strings() {
        assert!(lookup(&Object::string(b"x"), Builtin::PrintRange).is_some());
        assert!(lookup(&Object::Integer(1), Builtin::PrintRange).is_none());
        assert!(lookup(&Object::Globals, Builtin::PrintRange).is_none());
    }

    #[test]
    fn messages_lists_registered_entries_in_index_order() {
        let names: std::vec::Vec<_> =
            STRING_BUILTINS.messages().map(|m| m.name).collect();
        assert_eq!(names, ["string.print", "string.print_range"]);
    }
}
