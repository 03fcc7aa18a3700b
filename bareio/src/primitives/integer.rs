use crate::{
    BuiltinCall, DECIMAL_BUFFER_LEN, ExecutionResult, Fault, Interpreter,
    ObjectKind, format_decimal,
};

/// Print the receiver in decimal followed by a newline.
pub fn print<'s>(
    interpreter: &mut Interpreter<'_>,
    call: BuiltinCall<'s>,
) -> ExecutionResult<'s> {
    let Some(value) = call.receiver.as_integer() else {
        return Err(interpreter.fault(Fault::TypeMismatch {
            expected: ObjectKind::Integer,
            found: call.receiver.kind(),
        }));
    };

    let mut buf = [0; DECIMAL_BUFFER_LEN];
    interpreter
        .machine()
        .write_line(format_decimal(value, &mut buf));
    Ok(call.receiver)
}
