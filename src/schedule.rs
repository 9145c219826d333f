//! Recurring-payment schedule.
//!
//! ```text
//! Unscheduled --open--> Editing --confirm--> Scheduled
//!      ^                   |                     |
//!      +---cancel_dialog---+                     |
//!      +-------------cancel_schedule-------------+
//! ```
//!
//! Reopening the dialog while scheduled re-enters `Editing` with the committed
//! unit and count as the draft.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use crate::amount::NAIRA;

/// Repeat interval of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntervalUnit {
    #[default]
    Days,
    Weeks,
    Months,
    Years,
}

impl IntervalUnit {
    pub const ALL: [IntervalUnit; 4] = [
        IntervalUnit::Days,
        IntervalUnit::Weeks,
        IntervalUnit::Months,
        IntervalUnit::Years,
    ];

    pub fn plural(&self) -> &'static str {
        match self {
            IntervalUnit::Days => "days",
            IntervalUnit::Weeks => "weeks",
            IntervalUnit::Months => "months",
            IntervalUnit::Years => "years",
        }
    }

    /// Plural form with the trailing `s` stripped.
    pub fn singular(&self) -> &'static str {
        let plural = self.plural();
        &plural[..plural.len() - 1]
    }

    /// Singular when `count == 1`, plural otherwise.
    pub fn label(&self, count: u32) -> &'static str {
        if count == 1 {
            self.singular()
        } else {
            self.plural()
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown interval unit '{0}'")]
pub struct UnknownUnit(String);

impl FromStr for IntervalUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        IntervalUnit::ALL
            .into_iter()
            .find(|unit| unit.plural() == lower || unit.singular() == lower)
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

/// A recurring payment: `amount` every `count` `unit`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub unit: IntervalUnit,
    /// Always at least 1.
    pub count: u32,
    /// Raw amount field text.
    pub amount: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            unit: IntervalUnit::Days,
            count: 1,
            amount: String::new(),
        }
    }
}

impl ScheduleConfig {
    /// `₦5000 deducted every 3 months`.
    pub fn describe(&self) -> String {
        format!(
            "{NAIRA}{} deducted every {} {}",
            self.amount,
            self.count,
            self.unit.label(self.count)
        )
    }
}

/// Coarse state, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unscheduled,
    Editing,
    Scheduled,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Unscheduled => f.write_str("unscheduled"),
            Phase::Editing => f.write_str("editing"),
            Phase::Scheduled => f.write_str("scheduled"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule amount is required")]
    MissingAmount,
    #[error("cannot {action} while {phase}")]
    InvalidState { action: &'static str, phase: Phase },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum State {
    #[default]
    Unscheduled,
    Editing,
    Scheduled(ScheduleConfig),
}

/// Schedule dialog plus the committed schedule, if any.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    state: State,
    draft: ScheduleConfig,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Unscheduled => Phase::Unscheduled,
            State::Editing => Phase::Editing,
            State::Scheduled(_) => Phase::Scheduled,
        }
    }

    pub fn draft(&self) -> &ScheduleConfig {
        &self.draft
    }

    /// The committed schedule, present only while scheduled.
    pub fn active(&self) -> Option<&ScheduleConfig> {
        match &self.state {
            State::Scheduled(config) => Some(config),
            _ => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.active().is_some()
    }

    /// Display text of the committed schedule; `None` unless scheduled.
    pub fn description(&self) -> Option<String> {
        self.active().map(ScheduleConfig::describe)
    }

    /// Open the dialog with the amount pre-filled from the payment form.
    pub fn open(&mut self, amount_field: &str) -> Result<(), ScheduleError> {
        match std::mem::take(&mut self.state) {
            State::Editing => {
                self.state = State::Editing;
                return Err(self.invalid("open the schedule dialog"));
            }
            State::Scheduled(config) => self.draft = config,
            State::Unscheduled => {}
        }
        self.draft.amount = amount_field.trim().to_string();
        self.state = State::Editing;
        Ok(())
    }

    pub fn select_unit(&mut self, unit: IntervalUnit) -> Result<(), ScheduleError> {
        self.editing("select a unit")?.unit = unit;
        Ok(())
    }

    pub fn set_amount(&mut self, amount: &str) -> Result<(), ScheduleError> {
        self.editing("set the amount")?.amount = amount.trim().to_string();
        Ok(())
    }

    pub fn increment(&mut self) -> Result<u32, ScheduleError> {
        let draft = self.editing("change the count")?;
        draft.count = draft.count.saturating_add(1);
        Ok(draft.count)
    }

    /// Set the count directly, never below 1.
    pub fn set_count(&mut self, count: u32) -> Result<u32, ScheduleError> {
        let draft = self.editing("change the count")?;
        draft.count = count.max(1);
        Ok(draft.count)
    }

    /// Decrease the count, never below 1.
    pub fn decrement(&mut self) -> Result<u32, ScheduleError> {
        let draft = self.editing("change the count")?;
        draft.count = draft.count.saturating_sub(1).max(1);
        Ok(draft.count)
    }

    /// Commit the draft. With an empty amount the dialog stays open.
    pub fn confirm(&mut self) -> Result<ScheduleConfig, ScheduleError> {
        let draft = self.editing("confirm")?;
        if draft.amount.is_empty() {
            return Err(ScheduleError::MissingAmount);
        }
        let config = draft.clone();
        info!(
            unit = %config.unit,
            count = config.count,
            amount = %config.amount,
            "schedule confirmed"
        );
        self.state = State::Scheduled(config.clone());
        Ok(config)
    }

    /// Close the dialog without committing; the draft resets to the default.
    pub fn cancel_dialog(&mut self) -> Result<(), ScheduleError> {
        self.editing("cancel the dialog")?;
        self.reset();
        Ok(())
    }

    /// Drop the committed schedule if the user confirmed the prompt.
    ///
    /// Returns whether the schedule was cleared.
    pub fn cancel_schedule(&mut self, confirmed: bool) -> Result<bool, ScheduleError> {
        if !self.is_scheduled() {
            return Err(self.invalid("cancel the schedule"));
        }
        if !confirmed {
            return Ok(false);
        }
        info!("schedule cancelled");
        self.reset();
        Ok(true)
    }

    fn reset(&mut self) {
        self.state = State::Unscheduled;
        self.draft = ScheduleConfig::default();
    }

    fn editing(&mut self, action: &'static str) -> Result<&mut ScheduleConfig, ScheduleError> {
        match self.state {
            State::Editing => Ok(&mut self.draft),
            _ => Err(self.invalid(action)),
        }
    }

    fn invalid(&self, action: &'static str) -> ScheduleError {
        ScheduleError::InvalidState {
            action,
            phase: self.phase(),
        }
    }
}
