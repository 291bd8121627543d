use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::definition::{StepDefinition, WizardDefinition};
use super::notice::Notice;
use super::record::{FieldValue, FormRecord};
use super::validation::ValidationResult;
use crate::errors::{CommunityError, Result};

/// User edit routed through the controller so the field's pending error is cleared.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(String),
    Flag(bool),
    Toggle { item: String, present: bool },
    Numeric(String),
    Replace(FieldValue),
}

/// Presentation side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEffect {
    ScrollToTop,
    Focus(String),
    Notify(Notice),
    NavigateTo(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Moved { step: usize },
    /// Nothing to do: already at the boundary in that direction.
    Stayed,
    Blocked { focus: String, notice: Notice },
}

impl StepOutcome {
    pub fn effects(&self) -> Vec<WizardEffect> {
        match self {
            StepOutcome::Moved { .. } => vec![WizardEffect::ScrollToTop],
            StepOutcome::Stayed => Vec::new(),
            StepOutcome::Blocked { focus, notice } => vec![
                WizardEffect::Notify(notice.clone()),
                WizardEffect::Focus(focus.clone()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitGate {
    Ready,
    Blocked { focus: String, notice: Notice },
}

#[derive(Debug)]
pub enum SubmitOutcome<T> {
    Completed {
        output: T,
        notice: Notice,
        navigate_to: &'static str,
    },
    Blocked {
        focus: String,
        notice: Notice,
    },
    Failed {
        error: CommunityError,
        notice: Notice,
    },
}

impl<T> SubmitOutcome<T> {
    pub fn effects(&self) -> Vec<WizardEffect> {
        match self {
            SubmitOutcome::Completed {
                notice,
                navigate_to,
                ..
            } => vec![
                WizardEffect::Notify(notice.clone()),
                WizardEffect::NavigateTo(*navigate_to),
            ],
            SubmitOutcome::Blocked { focus, notice } => vec![
                WizardEffect::Notify(notice.clone()),
                WizardEffect::Focus(focus.clone()),
            ],
            SubmitOutcome::Failed { notice, .. } => vec![WizardEffect::Notify(notice.clone())],
        }
    }
}

/// Receives the validated record when the wizard is submitted.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    type Output: Send;

    async fn submit(&self, record: &FormRecord) -> Result<Self::Output>;

    fn success_notice(&self, record: &FormRecord) -> Notice;

    fn failure_notice(&self, error: &CommunityError) -> Notice {
        Notice::from_error(error, "Something went wrong. Please try again.")
    }

    /// Route shown after a successful submit.
    fn destination(&self) -> &'static str;
}

/// Step state machine over a [`WizardDefinition`].
///
/// Starts on step 1 with no errors. `next` validates before moving forward,
/// `previous` never validates, and submission is only possible from the
/// final step. After a successful submit the controller is finished and
/// rejects further transitions.
#[derive(Debug, Clone)]
pub struct WizardController {
    definition: &'static WizardDefinition,
    current_step: usize,
    record: FormRecord,
    errors: ValidationResult,
    submitting: bool,
    finished: bool,
}

impl WizardController {
    pub fn new(definition: &'static WizardDefinition, record: FormRecord) -> Self {
        Self {
            definition,
            current_step: 1,
            record,
            errors: ValidationResult::default(),
            submitting: false,
            finished: false,
        }
    }

    pub fn definition(&self) -> &'static WizardDefinition {
        self.definition
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.definition.total_steps()
    }

    pub fn step(&self) -> Option<&'static StepDefinition> {
        self.definition.step(self.current_step)
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_final_step(&self) -> bool {
        self.current_step == self.total_steps()
    }

    pub fn can_go_back(&self) -> bool {
        self.current_step > 1
    }

    fn ensure_interactive(&self) -> Result<()> {
        if self.finished {
            return Err(CommunityError::InvalidState(
                "this form has already been submitted".into(),
            ));
        }
        if self.submitting {
            return Err(CommunityError::InvalidState(
                "a submission is already in progress".into(),
            ));
        }
        Ok(())
    }

    /// Applies a user edit and clears that field's pending error.
    pub fn apply(&mut self, name: &str, input: FieldInput) -> Result<()> {
        self.ensure_interactive()?;
        match input {
            FieldInput::Text(text) => self.record.set_text(name, text)?,
            FieldInput::Flag(checked) => self.record.set_flag(name, checked)?,
            FieldInput::Toggle { item, present } => {
                self.record.toggle_set_membership(name, &item, present)?
            }
            FieldInput::Numeric(raw) => self.record.set_numeric_field(name, &raw)?,
            FieldInput::Replace(value) => self.record.set_field(name, value)?,
        }
        self.errors.clear_field(name);
        Ok(())
    }

    fn check_current(&mut self) -> Option<String> {
        self.errors = self.definition.validate(self.current_step, &self.record);
        self.errors.first_invalid().map(str::to_string)
    }

    pub fn next(&mut self) -> Result<StepOutcome> {
        self.ensure_interactive()?;
        if let Some(focus) = self.check_current() {
            debug!(
                wizard = self.definition.name,
                step = self.current_step,
                missing = self.errors.len(),
                "step blocked"
            );
            return Ok(StepOutcome::Blocked {
                focus,
                notice: Notice::missing_fields_on_advance(),
            });
        }
        if self.current_step < self.total_steps() {
            self.current_step += 1;
            Ok(StepOutcome::Moved {
                step: self.current_step,
            })
        } else {
            Ok(StepOutcome::Stayed)
        }
    }

    pub fn previous(&mut self) -> Result<StepOutcome> {
        self.ensure_interactive()?;
        if !self.can_go_back() {
            return Ok(StepOutcome::Stayed);
        }
        self.current_step -= 1;
        Ok(StepOutcome::Moved {
            step: self.current_step,
        })
    }

    /// First half of a submit: validates the final step and raises the
    /// `submitting` guard when it passes.
    pub fn begin_submit(&mut self) -> Result<SubmitGate> {
        self.ensure_interactive()?;
        if !self.is_final_step() {
            return Err(CommunityError::InvalidState(format!(
                "submit is only available on step {}",
                self.total_steps()
            )));
        }
        if let Some(focus) = self.check_current() {
            return Ok(SubmitGate::Blocked {
                focus,
                notice: Notice::missing_fields_on_submit(),
            });
        }
        self.submitting = true;
        Ok(SubmitGate::Ready)
    }

    /// Second half of a submit: lowers the guard and settles the outcome.
    pub fn finish_submit<H: SubmitHandler + ?Sized>(
        &mut self,
        handler: &H,
        result: Result<H::Output>,
    ) -> SubmitOutcome<H::Output> {
        self.submitting = false;
        match result {
            Ok(output) => {
                self.finished = true;
                info!(wizard = self.definition.name, "form submitted");
                SubmitOutcome::Completed {
                    output,
                    notice: handler.success_notice(&self.record),
                    navigate_to: handler.destination(),
                }
            }
            Err(error) => {
                warn!(wizard = self.definition.name, error = %error, "submit failed");
                SubmitOutcome::Failed {
                    notice: handler.failure_notice(&error),
                    error,
                }
            }
        }
    }

    pub async fn submit<H: SubmitHandler + ?Sized>(
        &mut self,
        handler: &H,
    ) -> Result<SubmitOutcome<H::Output>> {
        if let SubmitGate::Blocked { focus, notice } = self.begin_submit()? {
            return Ok(SubmitOutcome::Blocked { focus, notice });
        }
        let result = handler.submit(&self.record).await;
        Ok(self.finish_submit(handler, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::definition::{FieldSpec, RequiredField};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ONE: &[FieldSpec] = &[FieldSpec::text("title", "Title")];
    const TWO: &[FieldSpec] = &[FieldSpec::text("body", "Body")];
    static DEFINITION: WizardDefinition = WizardDefinition {
        name: "note",
        steps: &[
            StepDefinition {
                label: "Title",
                description: "",
                fields: ONE,
                required: &[RequiredField::new("title", "Title is required")],
            },
            StepDefinition {
                label: "Body",
                description: "",
                fields: TWO,
                required: &[RequiredField::new("body", "Body is required")],
            },
        ],
        hidden: &[],
    };

    struct Recorder {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SubmitHandler for Recorder {
        type Output = String;

        async fn submit(&self, record: &FormRecord) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CommunityError::Network("connection refused".into()))
            } else {
                Ok(record.text("title").to_string())
            }
        }

        fn success_notice(&self, _record: &FormRecord) -> Notice {
            Notice::success("Saved", "")
        }

        fn destination(&self) -> &'static str {
            "/notes"
        }
    }

    fn controller() -> WizardController {
        WizardController::new(&DEFINITION, DEFINITION.blank_record())
    }

    #[test]
    fn next_blocks_on_missing_fields() {
        let mut wizard = controller();
        let outcome = wizard.next().unwrap();
        assert_eq!(wizard.current_step(), 1);
        assert!(matches!(outcome, StepOutcome::Blocked { ref focus, .. } if focus == "title"));
        assert_eq!(wizard.errors().get("title"), Some("Title is required"));
    }

    #[test]
    fn editing_clears_that_fields_error() {
        let mut wizard = controller();
        wizard.next().unwrap();
        wizard
            .apply("title", FieldInput::Text("Hello".into()))
            .unwrap();
        assert!(wizard.errors().is_empty());
        assert_eq!(wizard.next().unwrap(), StepOutcome::Moved { step: 2 });
        assert_eq!(
            wizard.next().unwrap().effects(),
            vec![
                WizardEffect::Notify(Notice::missing_fields_on_advance()),
                WizardEffect::Focus("body".into())
            ]
        );
    }

    #[test]
    fn previous_never_validates() {
        let mut wizard = controller();
        wizard.apply("title", FieldInput::Text("x".into())).unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.previous().unwrap(), StepOutcome::Moved { step: 1 });
        assert_eq!(wizard.previous().unwrap(), StepOutcome::Stayed);
        assert!(!wizard.can_go_back());
    }

    #[test]
    fn submit_requires_final_step() {
        let mut wizard = controller();
        assert!(matches!(
            wizard.begin_submit(),
            Err(CommunityError::InvalidState(_))
        ));
    }

    #[test]
    fn second_submit_is_rejected_while_in_flight() {
        let mut wizard = controller();
        wizard.apply("title", FieldInput::Text("x".into())).unwrap();
        wizard.next().unwrap();
        wizard.apply("body", FieldInput::Text("y".into())).unwrap();
        assert_eq!(wizard.begin_submit().unwrap(), SubmitGate::Ready);
        assert!(wizard.is_submitting());
        assert!(wizard.begin_submit().is_err());
    }

    #[tokio::test]
    async fn successful_submit_finishes_the_wizard() {
        let handler = Recorder {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let mut wizard = controller();
        wizard.apply("title", FieldInput::Text("Hi".into())).unwrap();
        wizard.next().unwrap();
        wizard.apply("body", FieldInput::Text("There".into())).unwrap();
        let outcome = wizard.submit(&handler).await.unwrap();
        assert!(matches!(
            outcome,
            SubmitOutcome::Completed { ref output, navigate_to: "/notes", .. } if output == "Hi"
        ));
        assert!(wizard.is_finished());
        assert!(!wizard.is_submitting());
        assert!(wizard.next().is_err());
    }

    #[tokio::test]
    async fn failed_submit_returns_to_interactive() {
        let handler = Recorder {
            calls: AtomicUsize::new(0),
            fail: true,
        };
        let mut wizard = controller();
        wizard.apply("title", FieldInput::Text("Hi".into())).unwrap();
        wizard.next().unwrap();
        wizard.apply("body", FieldInput::Text("There".into())).unwrap();
        let outcome = wizard.submit(&handler).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert!(!wizard.is_submitting());
        assert!(!wizard.is_finished());
        assert_eq!(wizard.current_step(), 2);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blocked_submit_never_reaches_the_handler() {
        let handler = Recorder {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let mut wizard = controller();
        wizard.apply("title", FieldInput::Text("Hi".into())).unwrap();
        wizard.next().unwrap();
        let outcome = wizard.submit(&handler).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Blocked { ref focus, .. } if focus == "body"));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }
}
