use crate::{
    BareString, BuiltinCall, ExecutionResult, Fault, Interpreter, ObjectKind,
    Unwind,
};

fn receiver_string<'s>(
    interpreter: &Interpreter<'_>,
    call: &BuiltinCall<'s>,
) -> Result<BareString<'s>, Unwind> {
    call.receiver.as_string().ok_or_else(|| {
        interpreter.fault(Fault::TypeMismatch {
            expected: ObjectKind::String,
            found: call.receiver.kind(),
        })
    })
}

/// Print the receiver's bytes followed by a newline.
pub fn print<'s>(
    interpreter: &mut Interpreter<'_>,
    call: BuiltinCall<'s>,
) -> ExecutionResult<'s> {
    let string = receiver_string(interpreter, &call)?;
    interpreter.machine().write_line(string.as_bytes());
    Ok(call.receiver)
}

/// `printRange(start, end)`: print bytes `start..end` followed by a newline.
///
/// Both bounds are argument scripts, evaluated start first in the caller's
/// scope. Bounds outside the string fault instead of being clamped.
pub fn print_range<'s>(
    interpreter: &mut Interpreter<'_>,
    call: BuiltinCall<'s>,
) -> ExecutionResult<'s> {
    let string = receiver_string(interpreter, &call)?;
    let start = interpreter.integer_argument(&call, 0)?;
    let end = interpreter.integer_argument(&call, 1)?;

    let Some(bytes) = string.slice(start, end) else {
        return Err(interpreter.fault(Fault::RangeOutOfBounds {
            start,
            end,
            len: string.len(),
        }));
    };

    interpreter.machine().write_line(bytes);
    Ok(call.receiver)
}
