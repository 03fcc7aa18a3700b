use log::debug;

use crate::{BuiltinCall, ExecutionResult, Interpreter, Unwind};

/// Ask the firmware to power off.
///
/// On hardware the request never returns. If it does, evaluation unwinds so
/// no later message runs.
pub fn halt<'s>(
    interpreter: &mut Interpreter<'_>,
    call: BuiltinCall<'s>,
) -> ExecutionResult<'s> {
    debug!("halt requested by {}", call.receiver.kind());
    interpreter.machine().request_shutdown();
    Err(Unwind::Halted)
}

#[cfg(test)]
mod tests {
    use crate::{
        Builtin, Message, Object, Outcome, Script, run, testing::RecordingMachine,
    };

    #[test]
    fn halt_after_output_keeps_output() {
        let messages = [
            Message::Literal(Object::string(b"bye")),
            Message::send(Builtin::Print),
            Message::ResetContext,
            Message::send(Builtin::Halt),
            Message::ResetContext,
            Message::Literal(Object::string(b"never")),
            Message::send(Builtin::Print),
            Message::End,
        ];
        let mut machine = RecordingMachine::default();
        assert_eq!(run(&mut machine, &Script::new(&messages)), Ok(Outcome::Halted));
        assert_eq!(machine.output_str(), "bye\n");
        assert_eq!(machine.shutdowns, 1);
    }

    #[test]
    fn halt_inside_argument_unwinds_outer_script() {
        let halting = [Message::send(Builtin::Halt), Message::End];
        let end = [Message::Literal(Object::Integer(1)), Message::End];
        let arguments = [Script::new(&halting), Script::new(&end)];
        let messages = [
            Message::Literal(Object::string(b"abc")),
            Message::send_with(Builtin::PrintRange, &arguments),
            Message::End,
        ];
        let mut machine = RecordingMachine::default();
        assert_eq!(run(&mut machine, &Script::new(&messages)), Ok(Outcome::Halted));
        assert!(machine.output.is_empty());
        assert_eq!(machine.shutdowns, 1);
    }
}
