//! The four-step payment wizard.
//!
//! ```text
//! PolicyEntry ──submit_policy──▶ PersonalEntry ──submit_personal──▶ Review
//!      ▲  ◀────────back────────────┘  ▲ ◀──────────back──────────────┘ │
//!      │                              └────────edit_step───────────────┤
//!      └──────────────finish────────── Confirmed ◀──confirm_and_pay────┘
//! ```
//!
//! Every rejected navigation call leaves the wizard exactly as it was. The only
//! suspension point is the gateway call made by `confirm_and_pay`.

use crate::domain::charges::{Charges, FeeSchedule};
use crate::domain::personal::PersonalInformation;
use crate::domain::policy::PolicyInformation;
use crate::domain::ports::SharedPaymentGateway;
use crate::domain::transaction::{PaymentData, PaymentTransaction};
use crate::domain::validation::{PersonalForm, PolicyForm};
use crate::error::{PaymentError, Result, WizardError};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    PolicyEntry,
    PersonalEntry,
    Review,
    Confirmed,
}

impl Step {
    pub const ALL: [Self; 4] = [
        Self::PolicyEntry,
        Self::PersonalEntry,
        Self::Review,
        Self::Confirmed,
    ];

    /// One-based position in the flow.
    pub fn number(&self) -> u8 {
        match self {
            Self::PolicyEntry => 1,
            Self::PersonalEntry => 2,
            Self::Review => 3,
            Self::Confirmed => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PolicyEntry => "Policy Info",
            Self::PersonalEntry => "Personal Info",
            Self::Review => "Review",
            Self::Confirmed => "Confirmation",
        }
    }
}

impl TryFrom<u8> for Step {
    type Error = u8;

    fn try_from(n: u8) -> std::result::Result<Self, Self::Error> {
        Self::ALL.into_iter().find(|s| s.number() == n).ok_or(n)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

/// An in-flight payment, detached from the wizard so the caller can await it
/// without holding the wizard.
///
/// The wizard stays in processing for as long as the submission is alive.
/// Dropping it without handing it to [`Wizard::complete_submission`] returns
/// the wizard to an idle `Review`.
pub struct Submission {
    data: PaymentData,
    gateway: SharedPaymentGateway,
    timeout: Duration,
    in_flight: Arc<AtomicBool>,
}

impl Submission {
    pub fn data(&self) -> &PaymentData {
        &self.data
    }

    /// Sends the payment, bounded by the wizard's submission timeout.
    pub async fn send(&self) -> Result<PaymentTransaction> {
        match tokio::time::timeout(self.timeout, self.gateway.submit(&self.data)).await {
            Ok(result) => result,
            Err(_) => Err(PaymentError::Processing(format!(
                "no response within {}s",
                self.timeout.as_secs_f64()
            ))),
        }
    }
}

impl Drop for Submission {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

pub struct Wizard {
    step: Step,
    policy: Option<PolicyInformation>,
    personal: Option<PersonalInformation>,
    transaction: Option<PaymentTransaction>,
    terms_accepted: bool,
    in_flight: Arc<AtomicBool>,
    last_error: Option<String>,
    gateway: SharedPaymentGateway,
    fees: FeeSchedule,
    submit_timeout: Duration,
}

impl Wizard {
    /// Creates a wizard at `PolicyEntry`.
    ///
    /// `fees` must be the schedule the backend applies, so the review preview
    /// shows the amounts that will be charged.
    pub fn new(gateway: SharedPaymentGateway, fees: FeeSchedule) -> Self {
        Self {
            step: Step::PolicyEntry,
            policy: None,
            personal: None,
            transaction: None,
            terms_accepted: false,
            in_flight: Arc::new(AtomicBool::new(false)),
            last_error: None,
            gateway,
            fees,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn policy(&self) -> Option<&PolicyInformation> {
        self.policy.as_ref()
    }

    pub fn personal(&self) -> Option<&PersonalInformation> {
        self.personal.as_ref()
    }

    pub fn transaction(&self) -> Option<&PaymentTransaction> {
        self.transaction.as_ref()
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    /// The message of the last failed submission, cleared on the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Previously entered policy data, for seeding the step-1 form.
    pub fn policy_form(&self) -> PolicyForm {
        self.policy.as_ref().map(PolicyForm::from).unwrap_or_default()
    }

    /// Previously entered personal data, for seeding the step-2 form.
    pub fn personal_form(&self) -> PersonalForm {
        self.personal.as_ref().map(PersonalForm::from).unwrap_or_default()
    }

    /// Charges the backend will apply to the captured premium.
    pub fn charges_preview(&self) -> Option<Charges> {
        self.policy.as_ref().and_then(|p| self.fees.compute(p.premium_amount))
    }

    pub fn submit_policy(&mut self, form: &PolicyForm) -> std::result::Result<(), WizardError> {
        self.expect_step(Step::PolicyEntry, "submit policy information")?;
        let policy = form.validate()?;
        self.policy = Some(policy);
        self.move_to(Step::PersonalEntry);
        Ok(())
    }

    pub fn submit_personal(&mut self, form: &PersonalForm) -> std::result::Result<(), WizardError> {
        self.expect_step(Step::PersonalEntry, "submit personal information")?;
        let personal = form.validate()?;
        self.personal = Some(personal);
        self.move_to(Step::Review);
        Ok(())
    }

    /// Steps back one step. A no-op at `PolicyEntry`.
    pub fn back(&mut self) -> std::result::Result<(), WizardError> {
        self.expect_idle()?;
        match self.step {
            Step::PolicyEntry => Ok(()),
            Step::PersonalEntry => {
                self.move_to(Step::PolicyEntry);
                Ok(())
            }
            Step::Review => {
                self.move_to(Step::PersonalEntry);
                Ok(())
            }
            Step::Confirmed => Err(self.invalid("go back")),
        }
    }

    /// Jumps from `Review` to one of the entry steps, keeping all captured data.
    pub fn edit_step(&mut self, target: Step) -> std::result::Result<(), WizardError> {
        self.expect_step(Step::Review, "edit a step")?;
        self.expect_idle()?;
        match target {
            Step::PolicyEntry | Step::PersonalEntry => {
                self.move_to(target);
                Ok(())
            }
            Step::Review | Step::Confirmed => Err(self.invalid("edit that step")),
        }
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) -> std::result::Result<(), WizardError> {
        self.expect_step(Step::Review, "accept the terms")?;
        self.expect_idle()?;
        self.terms_accepted = accepted;
        Ok(())
    }

    /// Submits the payment and moves to `Confirmed` on success.
    ///
    /// On failure the wizard stays at `Review` with the error recorded in
    /// [`Wizard::last_error`]. If the returned future is dropped before it
    /// resolves, the wizard is left idle at `Review`.
    pub async fn confirm_and_pay(&mut self) -> std::result::Result<&PaymentTransaction, WizardError> {
        let submission = self.begin_submission()?;
        let result = submission.send().await;
        self.complete_submission(submission, result)
    }

    /// Enters processing and hands out the submission to send.
    pub fn begin_submission(&mut self) -> std::result::Result<Submission, WizardError> {
        self.expect_step(Step::Review, "confirm the payment")?;
        self.expect_idle()?;
        if !self.terms_accepted {
            return Err(WizardError::TermsNotAccepted);
        }
        let (Some(policy), Some(personal)) = (&self.policy, &self.personal) else {
            return Err(WizardError::MissingData);
        };
        let data = PaymentData {
            policy: policy.clone(),
            personal: personal.clone(),
        };

        self.in_flight.store(true, Ordering::Release);
        self.last_error = None;
        debug!(policy_number = %data.policy.policy_number, "payment submission started");
        Ok(Submission {
            data,
            gateway: self.gateway.clone(),
            timeout: self.submit_timeout,
            in_flight: self.in_flight.clone(),
        })
    }

    /// Applies the outcome of `submission`, which must have been started by
    /// this wizard's [`Wizard::begin_submission`].
    pub fn complete_submission(
        &mut self,
        submission: Submission,
        result: Result<PaymentTransaction>,
    ) -> std::result::Result<&PaymentTransaction, WizardError> {
        if !Arc::ptr_eq(&submission.in_flight, &self.in_flight) {
            return Err(self.invalid("complete another wizard's payment"));
        }
        drop(submission);

        match result {
            Ok(tx) => {
                self.move_to(Step::Confirmed);
                Ok(self.transaction.insert(tx))
            }
            Err(err) => {
                warn!(error = %err, "payment submission failed");
                self.last_error = Some(err.to_string());
                Err(WizardError::Payment(err))
            }
        }
    }

    /// Clears everything and starts over at `PolicyEntry`.
    pub fn finish(&mut self) -> std::result::Result<(), WizardError> {
        self.expect_step(Step::Confirmed, "finish")?;
        self.policy = None;
        self.personal = None;
        self.transaction = None;
        self.last_error = None;
        self.terms_accepted = false;
        self.move_to(Step::PolicyEntry);
        Ok(())
    }

    fn move_to(&mut self, next: Step) {
        debug!(from = %self.step, to = %next, "wizard step changed");
        if next == Step::Review {
            self.terms_accepted = false;
        }
        self.step = next;
    }

    fn expect_step(&self, expected: Step, action: &'static str) -> std::result::Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn expect_idle(&self) -> std::result::Result<(), WizardError> {
        if self.is_processing() {
            Err(WizardError::AlreadyProcessing)
        } else {
            Ok(())
        }
    }

    fn invalid(&self, action: &'static str) -> WizardError {
        WizardError::InvalidTransition {
            from: self.step,
            action,
        }
    }
}
