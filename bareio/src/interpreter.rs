use log::{debug, trace, warn};

use crate::{
    Arguments, Builtin, ExecutionResult, Fault, Machine, Message, Object,
    ObjectKind, Script, Selector, Unwind, lookup,
};

#[derive(Debug, Clone)]
pub struct InterpreterSettings {
    /// How many argument scripts may be evaluated inside each other.
    pub max_depth: usize,
}

impl Default for InterpreterSettings {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// What a builtin is invoked with.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinCall<'s> {
    pub builtin: Builtin,
    pub receiver: Object<'s>,
    pub arguments: Arguments<'s>,
    // the context the enclosing script was started with, argument scripts
    // are evaluated against it rather than against `receiver`
    pub locals: Object<'s>,
}

/// How a top-level run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'s> {
    Halted,
    /// The script reached its end; carries the last result.
    Completed(Object<'s>),
}

pub struct Interpreter<'m> {
    machine: &'m mut dyn Machine,
    settings: InterpreterSettings,
    depth: usize,
}

impl<'m> Interpreter<'m> {
    pub fn new(machine: &'m mut dyn Machine, settings: InterpreterSettings) -> Self {
        Self {
            machine,
            settings,
            depth: 0,
        }
    }

    #[inline]
    pub fn machine(&mut self) -> &mut (dyn Machine + 'm) {
        &mut *self.machine
    }

    pub fn settings(&self) -> &InterpreterSettings {
        &self.settings
    }

    /// Evaluate `script` against `context` and return the last result.
    pub fn evaluate<'s>(
        &mut self,
        script: &Script<'s>,
        context: Object<'s>,
    ) -> ExecutionResult<'s> {
        let mut receiver = context;
        let mut result = context;

        for message in script.messages() {
            match *message {
                Message::End => break,
                Message::ResetContext => {
                    trace!("reset to {}", context.kind());
                    receiver = context;
                }
                Message::Literal(literal) => {
                    trace!("literal {literal:?}");
                    receiver = literal;
                    result = literal;
                }
                Message::Send {
                    selector: Selector::Builtin(builtin),
                    arguments,
                } => {
                    let call = BuiltinCall {
                        builtin,
                        receiver,
                        arguments,
                        locals: context,
                    };
                    receiver = self.send(call)?;
                    result = receiver;
                }
                Message::Send {
                    selector: Selector::User(id),
                    ..
                } => {
                    return Err(self.fault(Fault::UserSelector { id }));
                }
            }
        }

        Ok(result)
    }

    fn send<'s>(&mut self, call: BuiltinCall<'s>) -> ExecutionResult<'s> {
        let Some(function) = lookup(&call.receiver, call.builtin) else {
            return Err(self.fault(Fault::UnknownBuiltin {
                builtin: call.builtin,
                receiver: call.receiver.kind(),
            }));
        };
        trace!("send {} to {}", call.builtin, call.receiver.kind());
        function(self, call)
    }

    /// Evaluate argument `index` of `call` in the caller's scope.
    ///
    /// Arguments are lazy: one that is never asked for never runs.
    pub fn evaluate_argument<'s>(
        &mut self,
        call: &BuiltinCall<'s>,
        index: usize,
    ) -> ExecutionResult<'s> {
        let Some(script) = call.arguments.get(index) else {
            return Err(self.fault(Fault::MissingArgument {
                builtin: call.builtin,
                index,
            }));
        };

        if self.depth >= self.settings.max_depth {
            return Err(self.fault(Fault::NestingTooDeep {
                limit: self.settings.max_depth,
            }));
        }

        debug!("evaluate argument {index} of `{}`", call.builtin);
        self.depth += 1;
        let value = self.evaluate(script, call.locals);
        self.depth -= 1;
        value
    }

    /// Evaluate argument `index` and require an integer result.
    pub fn integer_argument(
        &mut self,
        call: &BuiltinCall<'_>,
        index: usize,
    ) -> Result<i64, Unwind> {
        let value = self.evaluate_argument(call, index)?;
        value.as_integer().ok_or_else(|| {
            self.fault(Fault::TypeMismatch {
                expected: ObjectKind::Integer,
                found: value.kind(),
            })
        })
    }

    pub(crate) fn fault(&self, fault: Fault) -> Unwind {
        warn!("fault: {fault}");
        Unwind::Fault(fault)
    }
}

/// Evaluate `script` against a fresh [`Object::Globals`] with default settings.
pub fn run<'s>(
    machine: &mut dyn Machine,
    script: &Script<'s>,
) -> Result<Outcome<'s>, Fault> {
    run_with(machine, script, InterpreterSettings::default())
}

pub fn run_with<'s>(
    machine: &mut dyn Machine,
    script: &Script<'s>,
    settings: InterpreterSettings,
) -> Result<Outcome<'s>, Fault> {
    let mut interpreter = Interpreter::new(machine, settings);
    match interpreter.evaluate(script, Object::Globals) {
        Ok(result) => Ok(Outcome::Completed(result)),
        Err(Unwind::Halted) => Ok(Outcome::Halted),
        Err(Unwind::Fault(fault)) => Err(fault),
    }
}
