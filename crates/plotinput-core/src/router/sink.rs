//! Reporting of failures raised by module callbacks and strategies.

use crate::error::ModuleError;
use serde::Serialize;
use std::fmt;

/// Dispatch step a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPhase {
    Press,
    Motion,
    Paint,
    Promote,
    Release,
    Key,
    Wheel,
    Cancel,
}

impl fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DispatchPhase::Press => "press",
            DispatchPhase::Motion => "motion",
            DispatchPhase::Paint => "paint",
            DispatchPhase::Promote => "promote",
            DispatchPhase::Release => "release",
            DispatchPhase::Key => "key",
            DispatchPhase::Wheel => "wheel",
            DispatchPhase::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

/// A failure isolated to one module during one dispatch step.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackFailure {
    pub module: String,
    pub phase: DispatchPhase,
    pub error: ModuleError,
}

impl fmt::Display for CallbackFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module '{}' failed during {}: {}", self.module, self.phase, self.error)
    }
}

/// Receives failures caught at the router boundary.
pub trait ErrorSink {
    fn report(&mut self, failure: CallbackFailure);
}

impl<F> ErrorSink for F
where
    F: FnMut(CallbackFailure),
{
    fn report(&mut self, failure: CallbackFailure) {
        self(failure)
    }
}

/// Default sink: logs every failure at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report(&mut self, failure: CallbackFailure) {
        log::error!("{failure}");
    }
}
