//! Confirmation gate for destructive commands

use tracing::{debug, warn};

/// What the user is asked before a destructive operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Short caption, e.g. "Removing website"
    pub caption: String,
    /// Full question naming the target
    pub warning: String,
    /// Resource the operation applies to
    pub target: String,
}

/// Answer from a confirmation port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Declined,
}

/// Result of passing through the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Proceed,
    Abort,
}

/// Source of confirmation answers
pub trait Confirm {
    fn ask(&self, prompt: &Prompt) -> Decision;
}

/// Interactive prompt on the terminal.
///
/// Anything that prevents an answer (no terminal, read error) counts as a decline.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn ask(&self, prompt: &Prompt) -> Decision {
        let answer = dialoguer::Confirm::new()
            .with_prompt(format!("{}: {}", prompt.caption, prompt.warning))
            .default(false)
            .interact();

        decision_from(answer, prompt)
    }
}

/// Map a prompt result to a decision; a prompt that could not be shown is a decline
fn decision_from(answer: dialoguer::Result<bool>, prompt: &Prompt) -> Decision {
    match answer {
        Ok(true) => Decision::Confirmed,
        Ok(false) => Decision::Declined,
        Err(e) => {
            warn!(
                "Cannot ask for confirmation to remove {} ({}); use --force to skip the prompt",
                prompt.target, e
            );
            Decision::Declined
        }
    }
}

/// Answers yes to every prompt
#[cfg(test)]
pub struct AlwaysConfirm;

#[cfg(test)]
impl Confirm for AlwaysConfirm {
    fn ask(&self, _prompt: &Prompt) -> Decision {
        Decision::Confirmed
    }
}

/// Answers no to every prompt
#[cfg(test)]
pub struct AlwaysDecline;

#[cfg(test)]
impl Confirm for AlwaysDecline {
    fn ask(&self, _prompt: &Prompt) -> Decision {
        Decision::Declined
    }
}

/// Decide whether a destructive operation may run.
///
/// `force` skips the port entirely.
pub fn gate(force: bool, prompt: &Prompt, port: &dyn Confirm) -> GateOutcome {
    if force {
        debug!("Confirmation skipped for {} (--force)", prompt.target);
        return GateOutcome::Proceed;
    }

    match port.ask(prompt) {
        Decision::Confirmed => GateOutcome::Proceed,
        Decision::Declined => {
            debug!("Confirmation declined for {}", prompt.target);
            GateOutcome::Abort
        }
    }
}
