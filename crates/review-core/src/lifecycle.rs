//! Submission lifecycle
//!
//! `Idle -> Validating -> Submitting -> (Resolved | TimedOut)`
//!
//! The lifecycle gates the browser's native form submission. It never
//! performs the request itself: an accepted submit shows the busy
//! indicator and arms a timeout, and the host lets the form post.
//! Timeouts are tagged with the attempt that armed them, so a stale timer
//! firing after a newer submit (or after a navigation) does nothing.

use crate::config::ReviewConfig;
use crate::error::Result;
use crate::feedback::{AlertKind, Notification};
use crate::types::{FormState, ValidationResult};
use crate::validator::{Validator, ValidatorLimits};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Resolved,
    TimedOut,
}

/// Identifies one accepted submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AttemptId(pub u64);

/// Opaque handle of a scheduled timeout, issued by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// What the page does on behalf of the lifecycle
pub trait SubmissionHost {
    fn show_busy(&mut self);

    /// Must be safe to call when the indicator is already hidden
    fn hide_busy(&mut self);

    fn notify(&mut self, notification: Notification);

    /// Arrange for [`SubmissionLifecycle::on_timeout`] to be called with
    /// `attempt` after `delay`
    fn schedule_timeout(&mut self, delay: Duration, attempt: AttemptId) -> Result<TimerHandle>;

    fn cancel_timeout(&mut self, handle: TimerHandle);
}

/// Whether the native submission may go ahead
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed(AttemptId),
    Blocked(ValidationResult),
}

impl SubmitDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, SubmitDecision::Proceed(_))
    }
}

#[derive(Debug)]
pub struct SubmissionLifecycle {
    state: SubmissionState,
    validator: Validator,
    timeout: Duration,
    alert_ttl: Duration,
    next_attempt: u64,
    current: Option<AttemptId>,
    pending: Option<TimerHandle>,
}

impl Default for SubmissionLifecycle {
    fn default() -> Self {
        Self::new(&ReviewConfig::default())
    }
}

impl SubmissionLifecycle {
    pub fn new(config: &ReviewConfig) -> Self {
        Self {
            state: SubmissionState::Idle,
            validator: Validator::new(ValidatorLimits::from(config)),
            timeout: config.submit_timeout(),
            alert_ttl: config.alert_ttl(),
            next_attempt: 1,
            current: None,
            pending: None,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn current_attempt(&self) -> Option<AttemptId> {
        self.current
    }

    /// Validate and, when the form is acceptable, start a new attempt.
    ///
    /// A blocked submit leaves an in-flight attempt alone: its indicator
    /// and timeout stay armed.
    pub fn submit<H: SubmissionHost>(&mut self, form: &FormState, host: &mut H) -> SubmitDecision {
        let previous = self.state;
        self.state = SubmissionState::Validating;
        let result = self.validator.validate(form);

        if !result.ok {
            warn!(issue = ?result.issue, "submission blocked by validation");
            self.state = match previous {
                SubmissionState::Submitting => SubmissionState::Submitting,
                _ => SubmissionState::Idle,
            };
            if let Some(message) = &result.message {
                host.notify(
                    Notification::new(message.clone(), AlertKind::from(result.severity))
                        .with_ttl(self.alert_ttl),
                );
            }
            return SubmitDecision::Blocked(result);
        }

        if let Some(stale) = self.pending.take() {
            host.cancel_timeout(stale);
        }

        let attempt = AttemptId(self.next_attempt);
        self.next_attempt += 1;
        self.current = Some(attempt);
        self.state = SubmissionState::Submitting;
        host.show_busy();

        match host.schedule_timeout(self.timeout, attempt) {
            Ok(handle) => self.pending = Some(handle),
            // The form still posts; only the safety net is missing
            Err(e) => warn!(error = %e, "could not arm submission timeout"),
        }

        info!(attempt = attempt.0, timeout_ms = self.timeout.as_millis() as u64, "submission accepted");
        SubmitDecision::Proceed(attempt)
    }

    /// Called by the host when a scheduled timeout fires
    pub fn on_timeout<H: SubmissionHost>(&mut self, attempt: AttemptId, host: &mut H) {
        if self.current != Some(attempt) || self.state != SubmissionState::Submitting {
            debug!(attempt = attempt.0, "ignoring stale submission timeout");
            return;
        }

        self.pending = None;
        host.hide_busy();
        self.state = SubmissionState::TimedOut;
        info!(attempt = attempt.0, "submission timed out without a response");
    }

    /// Page visibility changed; coming back to the page clears the indicator
    pub fn on_visibility_change<H: SubmissionHost>(&mut self, hidden: bool, host: &mut H) {
        if !hidden {
            self.force_hide(host);
        }
    }

    /// The page is being unloaded (navigation to the results view)
    pub fn on_unload<H: SubmissionHost>(&mut self, host: &mut H) {
        self.force_hide(host);
    }

    fn force_hide<H: SubmissionHost>(&mut self, host: &mut H) {
        if let Some(handle) = self.pending.take() {
            host.cancel_timeout(handle);
        }
        host.hide_busy();
        if self.state == SubmissionState::Submitting {
            self.state = SubmissionState::Resolved;
        }
    }
}
