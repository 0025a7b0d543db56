//! # Checkout State Machine
//!
//! A strict three-step checkout flow with per-step validation gates.
//!
//! ## State Diagram
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Flow                                       │
//! │                                                                         │
//! │   ┌───────────┐  advance  ┌───────────┐  advance  ┌───────────┐        │
//! │   │  Step 1   │──────────►│  Step 2   │──────────►│  Step 3   │        │
//! │   │ Personal  │◄──────────│ Shipping  │◄──────────│ Payment   │        │
//! │   │   Data    │   back    │  Address  │   back    │  Method   │        │
//! │   └───────────┘           └───────────┘           └─────┬─────┘        │
//! │                                                         │              │
//! │        each advance is gated by step-local               │ begin_submit │
//! │        validation; failures stay on the step             ▼              │
//! │        and fill a field-keyed error map           ┌────────────┐        │
//! │                                                   │ Submitting │        │
//! │                                                   └─────┬──────┘        │
//! │                                        complete() │     │ fail()        │
//! │                                     ┌─────────────┘     └───────────┐  │
//! │                                     ▼                               ▼  │
//! │                              ┌───────────┐                  ┌────────┐ │
//! │                              │ Completed │                  │ Failed │ │
//! │                              └───────────┘                  └───┬────┘ │
//! │                               (redirect                         │      │
//! │                                initiated)      retry begin_submit      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The machine is pure: it never performs I/O. The session layer drives it,
//! runs the orchestrator while `Submitting`, and resolves the outcome with
//! [`CheckoutFlow::complete`] or [`CheckoutFlow::fail`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::types::{Department, PaymentMethod, PaymentProvider, UserProfile};
use crate::validation::{validate_email, validate_required, FieldErrors};

// =============================================================================
// Steps & States
// =============================================================================

/// The three interactive checkout steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    PersonalData,
    ShippingAddress,
    PaymentMethod,
}

impl CheckoutStep {
    /// 1-based step number for the progress indicator.
    pub const fn number(&self) -> u8 {
        match self {
            CheckoutStep::PersonalData => 1,
            CheckoutStep::ShippingAddress => 2,
            CheckoutStep::PaymentMethod => 3,
        }
    }

    const fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::PersonalData => Some(CheckoutStep::ShippingAddress),
            CheckoutStep::ShippingAddress => Some(CheckoutStep::PaymentMethod),
            CheckoutStep::PaymentMethod => None,
        }
    }

    const fn previous(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::PersonalData => None,
            CheckoutStep::ShippingAddress => Some(CheckoutStep::PersonalData),
            CheckoutStep::PaymentMethod => Some(CheckoutStep::ShippingAddress),
        }
    }
}

/// Where the flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "state", content = "step")]
pub enum CheckoutState {
    /// One of the three interactive steps is on screen.
    Editing(CheckoutStep),
    /// Orchestration in flight; the form is read-only and re-submission
    /// is blocked.
    Submitting,
    /// The external redirect was initiated; control left the application.
    Completed,
    /// Orchestration failed; control is back on step 3 with a message.
    Failed,
}

// =============================================================================
// Draft Form State
// =============================================================================

/// Step 1 form fields. All required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Step 2 form fields. Apartment and note are optional.
///
/// Exists only as transient form state; on submission it becomes an
/// immutable backend Address record tied to the order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddressDraft {
    pub street: String,
    pub number: String,
    pub apartment: String,
    pub city: String,
    pub department: Option<Department>,
    pub postal_code: String,
    pub note: String,
}

/// The whole transient checkout form, across all three steps.
///
/// Created empty (or pre-filled from the user profile) when checkout starts,
/// discarded after a successful submission or on navigation away.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDraft {
    pub personal: PersonalData,
    pub address: AddressDraft,
    pub payment_method: Option<PaymentMethod>,
}

impl CheckoutDraft {
    /// Builds the validated submission snapshot.
    ///
    /// Returns `None` when a required selection is still missing; the step
    /// gates make that unreachable on the submit path.
    fn build_request(&self) -> Option<CheckoutRequest> {
        let department = self.address.department?;
        let method = self.payment_method?;

        Some(CheckoutRequest {
            recipient_name: format!(
                "{} {}",
                self.personal.first_name.trim(),
                self.personal.last_name.trim()
            ),
            email: self.personal.email.trim().to_string(),
            phone: self.personal.phone.trim().to_string(),
            street: self.address.street.trim().to_string(),
            number: self.address.number.trim().to_string(),
            apartment: optional(&self.address.apartment),
            city: self.address.city.trim().to_string(),
            department,
            postal_code: self.address.postal_code.trim().to_string(),
            note: optional(&self.address.note),
            method,
            provider: method.provider(),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// A validated, immutable snapshot of the form, ready for orchestration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub recipient_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub number: String,
    pub apartment: Option<String>,
    pub city: String,
    pub department: Department,
    pub postal_code: String,
    pub note: Option<String>,
    pub method: PaymentMethod,
    pub provider: PaymentProvider,
}

// =============================================================================
// Step Gates
// =============================================================================

/// Step 1 gate: all four personal fields present, email well-formed.
pub fn validate_personal(personal: &PersonalData) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Err(e) = validate_required("first_name", &personal.first_name) {
        errors.insert(e);
    }
    if let Err(e) = validate_required("last_name", &personal.last_name) {
        errors.insert(e);
    }
    if let Err(e) = validate_email(&personal.email) {
        errors.insert(e);
    }
    if let Err(e) = validate_required("phone", &personal.phone) {
        errors.insert(e);
    }

    errors
}

/// Step 2 gate: street, number, city, department, postal code all present.
///
/// Department membership in the enumerated region set is enforced by the
/// type: the only way to set one is through [`Department`].
pub fn validate_address(address: &AddressDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Err(e) = validate_required("street", &address.street) {
        errors.insert(e);
    }
    if let Err(e) = validate_required("number", &address.number) {
        errors.insert(e);
    }
    if let Err(e) = validate_required("city", &address.city) {
        errors.insert(e);
    }
    if address.department.is_none() {
        errors.insert(crate::error::ValidationError::Required {
            field: "department".to_string(),
        });
    }
    if let Err(e) = validate_required("postal_code", &address.postal_code) {
        errors.insert(e);
    }

    errors
}

/// Step 3 gate: a method is selected and currently enabled by the store.
///
/// Methods are toggled server-side at any time, so the caller passes a fresh
/// enablement snapshot; an earlier selection that got disabled fails here.
pub fn validate_payment(
    selection: Option<PaymentMethod>,
    enabled: &[PaymentMethod],
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match selection {
        None => errors.insert(crate::error::ValidationError::Required {
            field: "payment_method".to_string(),
        }),
        Some(method) if !enabled.contains(&method) => {
            errors.insert(crate::error::ValidationError::NotAllowed {
                field: "payment_method".to_string(),
                allowed: enabled
                    .iter()
                    .map(|m| m.provider().identifier().to_string())
                    .collect(),
            })
        }
        Some(_) => {}
    }

    errors
}

// =============================================================================
// Submit Gate Errors
// =============================================================================

/// Why `begin_submit` refused to enter `Submitting`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A submission is already in flight (re-entrancy guard).
    #[error("a submission is already in flight")]
    InFlight,

    /// The flow already completed; a new session is required.
    #[error("checkout already completed")]
    AlreadyCompleted,

    /// Submission is only reachable from the payment step.
    #[error("not on the payment step")]
    NotAtPaymentStep,

    /// Full-form validation failed; the error map holds the fields.
    #[error("checkout form is not valid")]
    Invalid,
}

// =============================================================================
// The Flow
// =============================================================================

/// The checkout state machine: draft + position + field errors.
///
/// All mutation goes through the setters so the error map stays in sync and
/// the read-only `Submitting` window is enforced in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFlow {
    draft: CheckoutDraft,
    state: CheckoutState,
    errors: FieldErrors,
    submit_error: Option<String>,
}

impl Default for CheckoutState {
    fn default() -> Self {
        CheckoutState::Editing(CheckoutStep::PersonalData)
    }
}

impl CheckoutFlow {
    /// Starts an empty checkout at step 1.
    pub fn new() -> Self {
        CheckoutFlow {
            draft: CheckoutDraft::default(),
            state: CheckoutState::default(),
            errors: FieldErrors::new(),
            submit_error: None,
        }
    }

    /// Starts a checkout pre-filled from the authenticated user's profile.
    pub fn with_profile(profile: &UserProfile) -> Self {
        let mut flow = CheckoutFlow::new();
        flow.draft.personal = PersonalData {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        };
        flow
    }

    // ---- accessors ----------------------------------------------------------

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// The step whose form is (or was last) on screen.
    ///
    /// `Submitting`/`Failed`/`Completed` all map to the payment step, which
    /// is where control returns on failure.
    pub fn current_step(&self) -> CheckoutStep {
        match self.state {
            CheckoutState::Editing(step) => step,
            _ => CheckoutStep::PaymentMethod,
        }
    }

    pub fn draft(&self) -> &CheckoutDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The form-level message from the last failed submission, if any.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.state == CheckoutState::Submitting
    }

    pub fn is_completed(&self) -> bool {
        self.state == CheckoutState::Completed
    }

    /// The committed destination department, once chosen.
    pub fn department(&self) -> Option<Department> {
        self.draft.address.department
    }

    /// Whether field setters currently take effect.
    ///
    /// The form is read-only while a submission is in flight and after
    /// completion; after a failure it is editable again.
    fn editable(&self) -> bool {
        matches!(self.state, CheckoutState::Editing(_) | CheckoutState::Failed)
    }

    // ---- field setters ------------------------------------------------------
    //
    // Each setter clears its own field's error so a correction removes the
    // inline message immediately. Setters are ignored while read-only.

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.draft.personal.first_name = value.into();
            self.errors.remove("first_name");
        }
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.draft.personal.last_name = value.into();
            self.errors.remove("last_name");
        }
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.draft.personal.email = value.into();
            self.errors.remove("email");
        }
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.draft.personal.phone = value.into();
            self.errors.remove("phone");
        }
    }

    pub fn set_street(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.draft.address.street = value.into();
            self.errors.remove("street");
        }
    }

    pub fn set_number(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.draft.address.number = value.into();
            self.errors.remove("number");
        }
    }

    pub fn set_apartment(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.draft.address.apartment = value.into();
        }
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.draft.address.city = value.into();
            self.errors.remove("city");
        }
    }

    pub fn set_postal_code(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.draft.address.postal_code = value.into();
            self.errors.remove("postal_code");
        }
    }

    pub fn set_note(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.draft.address.note = value.into();
        }
    }

    /// Commits a destination department.
    ///
    /// Returns `true` when the committed value actually changed. The
    /// session layer uses that signal to trigger exactly one shipping-cost
    /// resolution, and nothing on mere re-commits of the same value.
    pub fn set_department(&mut self, department: Department) -> bool {
        if !self.editable() {
            return false;
        }
        let changed = self.draft.address.department != Some(department);
        self.draft.address.department = Some(department);
        self.errors.remove("department");
        changed
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        if self.editable() {
            self.draft.payment_method = Some(method);
            self.errors.remove("payment_method");
        }
    }

    // ---- transitions --------------------------------------------------------

    /// Attempts to advance to the next step.
    ///
    /// The current step's gate runs first; on failure the flow stays put and
    /// the error map holds exactly the offending fields. Advancing past the
    /// payment step is not a thing; submission is its own action.
    pub fn advance(&mut self) -> bool {
        let step = match self.state {
            CheckoutState::Editing(step) => step,
            _ => return false,
        };

        let errors = match step {
            CheckoutStep::PersonalData => validate_personal(&self.draft.personal),
            CheckoutStep::ShippingAddress => validate_address(&self.draft.address),
            CheckoutStep::PaymentMethod => return false,
        };

        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }

        match step.next() {
            Some(next) => {
                self.errors.clear();
                self.state = CheckoutState::Editing(next);
                true
            }
            None => false,
        }
    }

    /// Moves back one step.
    ///
    /// Always permitted from steps 2 and 3 (and from `Failed`, which sits on
    /// step 3). Clears the error map for the step being left; never clears
    /// any entered data.
    pub fn back(&mut self) -> bool {
        let step = match self.state {
            CheckoutState::Editing(step) => step,
            CheckoutState::Failed => CheckoutStep::PaymentMethod,
            _ => return false,
        };

        match step.previous() {
            Some(previous) => {
                self.errors.clear();
                self.submit_error = None;
                self.state = CheckoutState::Editing(previous);
                true
            }
            None => false,
        }
    }

    /// The terminal submission action: full-form validation, then
    /// `Submitting`.
    ///
    /// Reachable from the payment step and from `Failed` (retry). While
    /// `Submitting`, further calls return [`SubmitError::InFlight`]; the
    /// single logical submitter needs no stronger lock than this flag.
    ///
    /// On success the flow hands back the validated snapshot for the
    /// orchestrator; the outcome is resolved later via [`Self::complete`]
    /// or [`Self::fail`].
    pub fn begin_submit(
        &mut self,
        enabled_methods: &[PaymentMethod],
    ) -> Result<CheckoutRequest, SubmitError> {
        match self.state {
            CheckoutState::Submitting => return Err(SubmitError::InFlight),
            CheckoutState::Completed => return Err(SubmitError::AlreadyCompleted),
            CheckoutState::Editing(CheckoutStep::PaymentMethod) | CheckoutState::Failed => {}
            CheckoutState::Editing(_) => return Err(SubmitError::NotAtPaymentStep),
        }

        let mut errors = validate_personal(&self.draft.personal);
        errors.merge(validate_address(&self.draft.address));
        errors.merge(validate_payment(self.draft.payment_method, enabled_methods));

        if !errors.is_empty() {
            self.errors = errors;
            return Err(SubmitError::Invalid);
        }

        let request = match self.draft.build_request() {
            Some(request) => request,
            None => return Err(SubmitError::Invalid),
        };

        self.errors.clear();
        self.submit_error = None;
        self.state = CheckoutState::Submitting;
        Ok(request)
    }

    /// Resolves an in-flight submission as completed (redirect initiated).
    pub fn complete(&mut self) {
        if self.state == CheckoutState::Submitting {
            self.state = CheckoutState::Completed;
        }
    }

    /// Resolves an in-flight submission as failed.
    ///
    /// Control returns to the payment step with a surfaced message; the
    /// user may edit and retry.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.state == CheckoutState::Submitting {
            self.submit_error = Some(message.into());
            self.state = CheckoutState::Failed;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ENABLED: [PaymentMethod; 2] = [PaymentMethod::MercadoPago, PaymentMethod::Simulation];

    fn fill_personal(flow: &mut CheckoutFlow) {
        flow.set_first_name("Ana");
        flow.set_last_name("Pérez");
        flow.set_email("ana@example.com");
        flow.set_phone("099123456");
    }

    fn fill_address(flow: &mut CheckoutFlow) {
        flow.set_street("Av. 18 de Julio");
        flow.set_number("1234");
        flow.set_city("Montevideo");
        flow.set_department(Department::Montevideo);
        flow.set_postal_code("11200");
    }

    fn flow_at_payment_step() -> CheckoutFlow {
        let mut flow = CheckoutFlow::new();
        fill_personal(&mut flow);
        assert!(flow.advance());
        fill_address(&mut flow);
        assert!(flow.advance());
        flow
    }

    #[test]
    fn test_starts_at_step_one() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.state(), CheckoutState::Editing(CheckoutStep::PersonalData));
        assert_eq!(flow.current_step().number(), 1);
    }

    #[test]
    fn test_step1_empty_fields_populate_exact_error_keys() {
        let mut flow = CheckoutFlow::new();
        assert!(!flow.advance());

        assert_eq!(flow.current_step(), CheckoutStep::PersonalData);
        assert_eq!(flow.errors().len(), 4);
        for field in ["first_name", "last_name", "email", "phone"] {
            assert!(flow.errors().contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_step1_bad_email_stays_with_email_error_only() {
        let mut flow = CheckoutFlow::new();
        fill_personal(&mut flow);
        flow.set_email("not-an-email");

        assert!(!flow.advance());
        assert_eq!(flow.current_step(), CheckoutStep::PersonalData);
        assert_eq!(flow.errors().len(), 1);
        assert!(flow.errors().contains("email"));
    }

    #[test]
    fn test_editing_a_field_clears_its_error() {
        let mut flow = CheckoutFlow::new();
        assert!(!flow.advance());
        assert!(flow.errors().contains("email"));

        flow.set_email("ana@example.com");
        assert!(!flow.errors().contains("email"));
        // untouched fields keep theirs
        assert!(flow.errors().contains("phone"));
    }

    #[test]
    fn test_step2_requires_address_fields() {
        let mut flow = CheckoutFlow::new();
        fill_personal(&mut flow);
        assert!(flow.advance());

        assert!(!flow.advance());
        assert_eq!(flow.current_step(), CheckoutStep::ShippingAddress);
        for field in ["street", "number", "city", "department", "postal_code"] {
            assert!(flow.errors().contains(field), "missing error for {field}");
        }
        // optional fields never error
        assert!(!flow.errors().contains("apartment"));
        assert!(!flow.errors().contains("note"));
    }

    #[test]
    fn test_back_transition_keeps_step1_data() {
        let mut flow = CheckoutFlow::new();
        fill_personal(&mut flow);
        assert!(flow.advance());

        // provoke errors on step 2, then leave
        assert!(!flow.advance());
        assert!(!flow.errors().is_empty());

        assert!(flow.back());
        assert_eq!(flow.current_step(), CheckoutStep::PersonalData);
        assert!(flow.errors().is_empty());
        assert_eq!(flow.draft().personal.first_name, "Ana");
        assert_eq!(flow.draft().personal.email, "ana@example.com");
    }

    #[test]
    fn test_back_from_step1_is_a_no_op() {
        let mut flow = CheckoutFlow::new();
        assert!(!flow.back());
        assert_eq!(flow.current_step(), CheckoutStep::PersonalData);
    }

    #[test]
    fn test_department_commit_reports_changes_only() {
        let mut flow = CheckoutFlow::new();
        assert!(flow.set_department(Department::Montevideo));
        assert!(!flow.set_department(Department::Montevideo));
        assert!(flow.set_department(Department::Canelones));
    }

    #[test]
    fn test_submit_requires_payment_step() {
        let mut flow = CheckoutFlow::new();
        fill_personal(&mut flow);
        assert_eq!(flow.begin_submit(&ENABLED), Err(SubmitError::NotAtPaymentStep));
    }

    #[test]
    fn test_submit_without_selection_errors_on_payment_method() {
        let mut flow = flow_at_payment_step();
        assert_eq!(flow.begin_submit(&ENABLED), Err(SubmitError::Invalid));
        assert!(flow.errors().contains("payment_method"));
    }

    #[test]
    fn test_submit_rejects_disabled_method() {
        let mut flow = flow_at_payment_step();
        flow.select_payment_method(PaymentMethod::DLocal);

        // dlocal was toggled off server-side
        assert_eq!(flow.begin_submit(&ENABLED), Err(SubmitError::Invalid));
        assert!(flow.errors().contains("payment_method"));
        assert_eq!(flow.state(), CheckoutState::Editing(CheckoutStep::PaymentMethod));
    }

    #[test]
    fn test_submit_builds_request_and_enters_submitting() {
        let mut flow = flow_at_payment_step();
        flow.set_apartment("Apto 401");
        flow.select_payment_method(PaymentMethod::MercadoPago);

        let request = flow.begin_submit(&ENABLED).unwrap();
        assert!(flow.is_submitting());

        assert_eq!(request.recipient_name, "Ana Pérez");
        assert_eq!(request.phone, "099123456");
        assert_eq!(request.department, Department::Montevideo);
        assert_eq!(request.apartment.as_deref(), Some("Apto 401"));
        assert_eq!(request.note, None);
        assert_eq!(request.provider, PaymentProvider::MercadoPago);
    }

    #[test]
    fn test_reentrancy_guard_blocks_double_submit() {
        let mut flow = flow_at_payment_step();
        flow.select_payment_method(PaymentMethod::MercadoPago);

        assert!(flow.begin_submit(&ENABLED).is_ok());
        assert_eq!(flow.begin_submit(&ENABLED), Err(SubmitError::InFlight));
    }

    #[test]
    fn test_form_is_read_only_while_submitting() {
        let mut flow = flow_at_payment_step();
        flow.select_payment_method(PaymentMethod::MercadoPago);
        assert!(flow.begin_submit(&ENABLED).is_ok());

        flow.set_first_name("Bruno");
        assert_eq!(flow.draft().personal.first_name, "Ana");
    }

    #[test]
    fn test_fail_returns_control_to_payment_step_and_allows_retry() {
        let mut flow = flow_at_payment_step();
        flow.select_payment_method(PaymentMethod::MercadoPago);
        assert!(flow.begin_submit(&ENABLED).is_ok());

        flow.fail("Order could not be created");
        assert_eq!(flow.state(), CheckoutState::Failed);
        assert_eq!(flow.current_step(), CheckoutStep::PaymentMethod);
        assert_eq!(flow.submit_error(), Some("Order could not be created"));

        // retry straight from Failed
        let retry = flow.begin_submit(&ENABLED);
        assert!(retry.is_ok());
        assert!(flow.is_submitting());
        assert_eq!(flow.submit_error(), None);
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut flow = flow_at_payment_step();
        flow.select_payment_method(PaymentMethod::Simulation);
        assert!(flow.begin_submit(&ENABLED).is_ok());

        flow.complete();
        assert!(flow.is_completed());
        assert_eq!(flow.begin_submit(&ENABLED), Err(SubmitError::AlreadyCompleted));
    }

    #[test]
    fn test_back_from_failed_lands_on_address_step() {
        let mut flow = flow_at_payment_step();
        flow.select_payment_method(PaymentMethod::MercadoPago);
        assert!(flow.begin_submit(&ENABLED).is_ok());
        flow.fail("boom");

        assert!(flow.back());
        assert_eq!(flow.current_step(), CheckoutStep::ShippingAddress);
        assert_eq!(flow.submit_error(), None);
        assert_eq!(flow.draft().address.street, "Av. 18 de Julio");
    }

    #[test]
    fn test_prefill_from_profile() {
        let profile = UserProfile {
            first_name: "Ana".to_string(),
            last_name: "Pérez".to_string(),
            email: "ana@example.com".to_string(),
            phone: "099123456".to_string(),
        };
        let flow = CheckoutFlow::with_profile(&profile);
        assert_eq!(flow.draft().personal.email, "ana@example.com");
        assert_eq!(flow.current_step(), CheckoutStep::PersonalData);
    }
}
