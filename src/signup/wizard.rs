//! Wizard step and submission state
//!
//! The step is clamped to `1..=3` by every transition, and the phase enum
//! makes "submitting" and "succeeded" mutually exclusive.

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 3;

/// Where the wizard is in its submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardPhase {
    /// Fields are editable
    #[default]
    Editing,
    /// A registration request is in flight
    Submitting,
    /// Registration accepted; terminal
    Succeeded,
}

/// Result of a navigation or submission transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed
    Moved,
    /// Already at a boundary, nothing changed
    AtBoundary,
    /// Transition not allowed in the current phase
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardState {
    step: u8,
    phase: WizardPhase,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: FIRST_STEP,
            phase: WizardPhase::Editing,
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == WizardPhase::Submitting
    }

    pub fn is_success(&self) -> bool {
        self.phase == WizardPhase::Succeeded
    }

    pub fn is_first_step(&self) -> bool {
        self.step == FIRST_STEP
    }

    pub fn is_last_step(&self) -> bool {
        self.step == LAST_STEP
    }

    /// Progress through the steps as a fraction, 0.0 on step 1 and 1.0 on step 3
    pub fn progress(&self) -> f64 {
        f64::from(self.step - FIRST_STEP) / f64::from(LAST_STEP - FIRST_STEP)
    }

    /// Advance one step (the "Next" button)
    pub fn next(&mut self) -> Transition {
        if self.phase != WizardPhase::Editing {
            return Transition::Blocked;
        }
        if self.step >= LAST_STEP {
            return Transition::AtBoundary;
        }
        self.step += 1;
        Transition::Moved
    }

    /// Go back one step (the "Previous" button)
    pub fn previous(&mut self) -> Transition {
        if self.phase != WizardPhase::Editing {
            return Transition::Blocked;
        }
        if self.step <= FIRST_STEP {
            return Transition::AtBoundary;
        }
        self.step -= 1;
        Transition::Moved
    }

    /// Jump to a specific step, clamped to the valid range
    #[cfg(test)]
    pub(crate) fn go_to(&mut self, step: u8) -> Transition {
        if self.phase != WizardPhase::Editing {
            return Transition::Blocked;
        }
        let target = step.clamp(FIRST_STEP, LAST_STEP);
        if target == self.step {
            return Transition::AtBoundary;
        }
        self.step = target;
        Transition::Moved
    }

    /// Enter the in-flight phase; only allowed from the last step while editing
    pub fn begin_submit(&mut self) -> Transition {
        if self.phase != WizardPhase::Editing || !self.is_last_step() {
            return Transition::Blocked;
        }
        self.phase = WizardPhase::Submitting;
        Transition::Moved
    }

    /// Settle an in-flight submission
    pub fn finish_submit(&mut self, accepted: bool) -> Transition {
        if self.phase != WizardPhase::Submitting {
            return Transition::Blocked;
        }
        self.phase = if accepted {
            WizardPhase::Succeeded
        } else {
            WizardPhase::Editing
        };
        Transition::Moved
    }
}
