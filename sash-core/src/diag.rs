//! Diagnostic output for actuator transitions
//!
//! Every state change an actuator makes is reported once through a
//! [`DiagnosticSink`]. Sinks are fire-and-forget: nothing they do can
//! affect the state machine.

use core::fmt;

use crate::state::Transition;

/// A state change on a labelled actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiagnosticEvent<'a> {
    /// Label of the actuator that changed state
    pub label: &'a str,
    /// What happened
    pub transition: Transition,
}

impl fmt::Display for DiagnosticEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.label;
        match self.transition {
            Transition::Opening => write!(f, "Opening window {}.", label),
            Transition::Closing => write!(f, "Closing window {}.", label),
            Transition::Stopped => write!(f, "Stopping window {}.", label),
            Transition::Opened => write!(f, "Window {} has been opened.", label),
            Transition::Closed => write!(f, "Window {} has been closed.", label),
            Transition::TimedOut => {
                write!(f, "Window {} is moving too slowly, stopping.", label)
            }
        }
    }
}

/// Receiver for actuator diagnostics
pub trait DiagnosticSink {
    /// Record a transition
    fn emit(&mut self, event: &DiagnosticEvent<'_>);
}

/// Discards all diagnostics
impl DiagnosticSink for () {
    fn emit(&mut self, _event: &DiagnosticEvent<'_>) {}
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, event: &DiagnosticEvent<'_>) {
        (**self).emit(event)
    }
}

/// Logs diagnostics through `defmt`
///
/// Timeouts are logged as warnings, everything else as info.
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtSink;

#[cfg(feature = "defmt")]
impl DiagnosticSink for DefmtSink {
    fn emit(&mut self, event: &DiagnosticEvent<'_>) {
        if event.transition == Transition::TimedOut {
            defmt::warn!("{}", defmt::Display2Format(event));
        } else {
            defmt::info!("{}", defmt::Display2Format(event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    fn render(transition: Transition) -> String<64> {
        let mut out = String::new();
        let event = DiagnosticEvent {
            label: "roof",
            transition,
        };
        write!(out, "{}", event).unwrap();
        out
    }

    #[test]
    fn test_messages_include_label() {
        assert_eq!(render(Transition::Opening).as_str(), "Opening window roof.");
        assert_eq!(render(Transition::Closing).as_str(), "Closing window roof.");
        assert_eq!(render(Transition::Stopped).as_str(), "Stopping window roof.");
        assert_eq!(
            render(Transition::Opened).as_str(),
            "Window roof has been opened."
        );
        assert_eq!(
            render(Transition::Closed).as_str(),
            "Window roof has been closed."
        );
        assert_eq!(
            render(Transition::TimedOut).as_str(),
            "Window roof is moving too slowly, stopping."
        );
    }

    #[test]
    fn test_unit_sink_discards() {
        let mut sink = ();
        sink.emit(&DiagnosticEvent {
            label: "roof",
            transition: Transition::Stopped,
        });
    }
}
