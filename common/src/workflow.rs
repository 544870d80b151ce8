//! Submission workflow controller.
//!
//! Drives the "fill new form" modal as a message-driven state machine: the UI
//! feeds it `WorkflowEvent`s and performs the `Effect`s it returns. No I/O happens
//! here, which keeps every transition testable without a browser.
//!
//! ```text
//! Idle -> TemplatesLoading -> TemplatesLoaded -> FieldsLoading -> FieldsLoaded
//!      -> Submitting -> SubmitSucceeded | SubmitFailed
//! ```
//!
//! Two counters guard against late responses:
//! - `epoch` changes whenever the modal opens or closes; anything tagged with an
//!   older epoch belongs to a dismissed modal.
//! - `generation` changes on every template selection; only the field schema of
//!   the latest selection is accepted.

use crate::error::ApiError;
use crate::fields::{apply_change, build_form, ControlSpec, FieldChange};
use crate::model::field::{FieldDescriptor, FieldValue, FormDraft};
use crate::model::template::Template;

/// How long the success message stays visible before the modal closes.
pub const SUCCESS_CLOSE_DELAY_MS: u32 = 1_500;

pub const TEMPLATES_ERROR: &str = "Could not fetch available forms.";
pub const FIELDS_ERROR: &str = "Could not load the selected form.";
pub const SUBMIT_SUCCESS: &str = "Submission successful!";
pub const SUBMIT_ERROR: &str = "Submission failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    TemplatesLoading,
    TemplatesLoaded,
    FieldsLoading,
    FieldsLoaded,
    Submitting,
    SubmitSucceeded,
    SubmitFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub severity: Severity,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    Opened,
    TemplatesFetched {
        epoch: u64,
        result: Result<Vec<Template>, ApiError>,
    },
    /// New value of the template selector; empty means "nothing selected".
    TemplateSelected(String),
    FieldsFetched {
        generation: u64,
        result: Result<Vec<FieldDescriptor>, ApiError>,
    },
    FieldChanged(FieldChange),
    SubmitRequested,
    SubmitFinished {
        epoch: u64,
        result: Result<(), ApiError>,
    },
    CloseTimerElapsed {
        epoch: u64,
    },
    CloseRequested,
}

/// Work the UI must carry out on the controller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchTemplates { epoch: u64 },
    FetchFields { generation: u64, form_key: String },
    PostSubmission {
        epoch: u64,
        form_key: String,
        draft: FormDraft,
    },
    /// Tell the owner a submission was recorded so it can refresh its list.
    NotifySubmitted,
    CloseAfter { epoch: u64, delay_ms: u32 },
    Close,
    /// A request came back 401; the session must be dropped.
    SessionExpired,
}

#[derive(Debug, Clone)]
pub struct SubmissionWorkflow {
    phase: Phase,
    templates: Vec<Template>,
    selected: Option<String>,
    fields: Vec<FieldDescriptor>,
    draft: FormDraft,
    feedback: Option<Feedback>,
    epoch: u64,
    generation: u64,
}

impl Default for SubmissionWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionWorkflow {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            templates: Vec::new(),
            selected: None,
            fields: Vec::new(),
            draft: FormDraft::new(),
            feedback: None,
            epoch: 0,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn value_of(&self, field_id: &str) -> Option<&FieldValue> {
        self.draft.get(field_id)
    }

    pub fn controls(&self) -> Vec<ControlSpec> {
        build_form(&self.fields)
    }

    pub fn is_loading_templates(&self) -> bool {
        self.phase == Phase::TemplatesLoading
    }

    pub fn is_loading_fields(&self) -> bool {
        self.phase == Phase::FieldsLoading
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Submit is enabled only with a selected template, a non-empty schema, and
    /// no request in flight.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some()
            && !self.fields.is_empty()
            && matches!(self.phase, Phase::FieldsLoaded | Phase::SubmitFailed)
    }

    fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::FieldsLoaded | Phase::SubmitFailed)
    }

    fn reset(&mut self) {
        self.templates.clear();
        self.selected = None;
        self.fields.clear();
        self.draft.clear();
        self.feedback = None;
        self.epoch += 1;
        self.generation += 1;
    }

    fn expired(err: &ApiError) -> Option<Effect> {
        err.is_unauthorized().then_some(Effect::SessionExpired)
    }

    pub fn handle(&mut self, event: WorkflowEvent) -> Vec<Effect> {
        match event {
            WorkflowEvent::Opened => {
                self.reset();
                self.phase = Phase::TemplatesLoading;
                vec![Effect::FetchTemplates { epoch: self.epoch }]
            }
            WorkflowEvent::TemplatesFetched { epoch, result } => {
                if epoch != self.epoch || self.phase != Phase::TemplatesLoading {
                    return Vec::new();
                }
                self.phase = Phase::TemplatesLoaded;
                match result {
                    Ok(templates) => {
                        self.templates = templates;
                        Vec::new()
                    }
                    Err(err) => {
                        self.templates.clear();
                        self.feedback = Some(Feedback::error(TEMPLATES_ERROR));
                        Self::expired(&err).into_iter().collect()
                    }
                }
            }
            WorkflowEvent::TemplateSelected(form_key) => {
                if matches!(
                    self.phase,
                    Phase::Idle | Phase::TemplatesLoading | Phase::Submitting | Phase::SubmitSucceeded
                ) {
                    return Vec::new();
                }
                self.generation += 1;
                self.fields.clear();
                self.draft.clear();
                self.feedback = None;
                if form_key.is_empty() {
                    self.selected = None;
                    self.phase = Phase::TemplatesLoaded;
                    return Vec::new();
                }
                self.selected = Some(form_key.clone());
                self.phase = Phase::FieldsLoading;
                vec![Effect::FetchFields {
                    generation: self.generation,
                    form_key,
                }]
            }
            WorkflowEvent::FieldsFetched { generation, result } => {
                if generation != self.generation || self.phase != Phase::FieldsLoading {
                    log::debug!("discarding stale field schema (generation {generation})");
                    return Vec::new();
                }
                self.phase = Phase::FieldsLoaded;
                match result {
                    Ok(fields) => {
                        self.fields = fields;
                        Vec::new()
                    }
                    Err(err) => {
                        self.fields.clear();
                        self.feedback = Some(Feedback::error(FIELDS_ERROR));
                        Self::expired(&err).into_iter().collect()
                    }
                }
            }
            WorkflowEvent::FieldChanged(change) => {
                if self.accepts_input() {
                    apply_change(&mut self.draft, &self.fields, change);
                }
                Vec::new()
            }
            WorkflowEvent::SubmitRequested => {
                if !self.can_submit() {
                    return Vec::new();
                }
                let Some(form_key) = self.selected.clone() else {
                    return Vec::new();
                };
                self.phase = Phase::Submitting;
                self.feedback = None;
                vec![Effect::PostSubmission {
                    epoch: self.epoch,
                    form_key,
                    draft: self.draft.clone(),
                }]
            }
            WorkflowEvent::SubmitFinished { epoch, result } => {
                if epoch != self.epoch || self.phase != Phase::Submitting {
                    return Vec::new();
                }
                match result {
                    Ok(()) => {
                        self.phase = Phase::SubmitSucceeded;
                        self.feedback = Some(Feedback::success(SUBMIT_SUCCESS));
                        vec![
                            Effect::NotifySubmitted,
                            Effect::CloseAfter {
                                epoch: self.epoch,
                                delay_ms: SUCCESS_CLOSE_DELAY_MS,
                            },
                        ]
                    }
                    Err(err) => {
                        self.phase = Phase::SubmitFailed;
                        let message = match err.detail() {
                            Some(detail) => format!("Submission failed: {detail}"),
                            None => SUBMIT_ERROR.to_string(),
                        };
                        self.feedback = Some(Feedback::error(message));
                        Self::expired(&err).into_iter().collect()
                    }
                }
            }
            WorkflowEvent::CloseTimerElapsed { epoch } => {
                if epoch != self.epoch || self.phase != Phase::SubmitSucceeded {
                    return Vec::new();
                }
                self.reset();
                self.phase = Phase::Idle;
                vec![Effect::Close]
            }
            WorkflowEvent::CloseRequested => {
                if matches!(self.phase, Phase::Idle | Phase::Submitting) {
                    return Vec::new();
                }
                self.reset();
                self.phase = Phase::Idle;
                vec![Effect::Close]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldInput;
    use crate::model::field::FieldKind;

    fn template(id: &str, title: &str) -> Template {
        serde_json::from_value(serde_json::json!({"id": id, "title": title})).unwrap()
    }

    fn short_text(id: &str, name: &str) -> FieldDescriptor {
        FieldDescriptor {
            id: id.into(),
            name: name.into(),
            kind: FieldKind::ShortText,
            required: false,
            options: Vec::new(),
        }
    }

    fn typed(field_id: &str, text: &str) -> WorkflowEvent {
        WorkflowEvent::FieldChanged(FieldChange {
            field_id: field_id.into(),
            input: FieldInput::Text(text.into()),
        })
    }

    /// Opens the modal and loads one template plus its single `f1` field.
    fn loaded() -> SubmissionWorkflow {
        let mut wf = SubmissionWorkflow::new();
        let effects = wf.handle(WorkflowEvent::Opened);
        let [Effect::FetchTemplates { epoch }] = effects[..] else {
            panic!("expected template fetch, got {effects:?}");
        };
        wf.handle(WorkflowEvent::TemplatesFetched {
            epoch,
            result: Ok(vec![template("template1", "Test Template")]),
        });
        let effects = wf.handle(WorkflowEvent::TemplateSelected("template1".into()));
        let Some(Effect::FetchFields { generation, .. }) = effects.first().cloned() else {
            panic!("expected field fetch");
        };
        wf.handle(WorkflowEvent::FieldsFetched {
            generation,
            result: Ok(vec![short_text("f1", "Name")]),
        });
        wf
    }

    #[test]
    fn fill_and_submit_scenario() {
        let mut wf = loaded();
        assert_eq!(wf.phase(), Phase::FieldsLoaded);
        wf.handle(typed("f1", "Jane"));

        let effects = wf.handle(WorkflowEvent::SubmitRequested);
        let [Effect::PostSubmission {
            epoch,
            ref form_key,
            ref draft,
        }] = effects[..]
        else {
            panic!("expected submission, got {effects:?}");
        };
        assert_eq!(form_key, "template1");
        assert_eq!(
            serde_json::to_value(draft).unwrap(),
            serde_json::json!({"f1": "Jane"})
        );
        assert!(wf.is_submitting());
        assert!(!wf.can_submit());

        let effects = wf.handle(WorkflowEvent::SubmitFinished {
            epoch,
            result: Ok(()),
        });
        assert_eq!(
            effects,
            vec![
                Effect::NotifySubmitted,
                Effect::CloseAfter {
                    epoch,
                    delay_ms: 1_500
                }
            ]
        );
        assert_eq!(wf.feedback(), Some(&Feedback::success("Submission successful!")));

        let effects = wf.handle(WorkflowEvent::CloseTimerElapsed { epoch });
        assert_eq!(effects, vec![Effect::Close]);
        assert_eq!(wf.phase(), Phase::Idle);
        assert!(wf.draft().is_empty());
    }

    #[test]
    fn submit_disabled_without_selection_or_fields() {
        let mut wf = SubmissionWorkflow::new();
        assert!(!wf.can_submit());
        let effects = wf.handle(WorkflowEvent::Opened);
        let [Effect::FetchTemplates { epoch }] = effects[..] else {
            panic!()
        };
        wf.handle(WorkflowEvent::TemplatesFetched {
            epoch,
            result: Ok(vec![template("t", "T")]),
        });
        assert!(!wf.can_submit(), "no template selected");
        assert!(wf.handle(WorkflowEvent::SubmitRequested).is_empty());

        let effects = wf.handle(WorkflowEvent::TemplateSelected("t".into()));
        assert!(!wf.can_submit(), "fields still loading");
        let [Effect::FetchFields { generation, .. }] = effects[..] else {
            panic!()
        };
        wf.handle(WorkflowEvent::FieldsFetched {
            generation,
            result: Ok(Vec::new()),
        });
        assert!(!wf.can_submit(), "empty schema");
        assert!(wf.handle(WorkflowEvent::SubmitRequested).is_empty());
    }

    #[test]
    fn reselection_clears_draft_and_fields() {
        let mut wf = loaded();
        wf.handle(typed("f1", "Jane"));
        assert_eq!(wf.draft().len(), 1);

        wf.handle(WorkflowEvent::TemplateSelected("other".into()));
        assert!(wf.draft().is_empty());
        assert!(wf.fields().is_empty());
        assert!(wf.is_loading_fields());

        let effects = wf.handle(WorkflowEvent::TemplateSelected(String::new()));
        assert!(effects.is_empty());
        assert_eq!(wf.selected(), None);
        assert_eq!(wf.phase(), Phase::TemplatesLoaded);
    }

    #[test]
    fn stale_field_schema_is_discarded() {
        let mut wf = SubmissionWorkflow::new();
        let [Effect::FetchTemplates { epoch }] = wf.handle(WorkflowEvent::Opened)[..] else {
            panic!()
        };
        wf.handle(WorkflowEvent::TemplatesFetched {
            epoch,
            result: Ok(vec![template("a", "A"), template("b", "B")]),
        });
        let [Effect::FetchFields { generation: first, .. }] =
            wf.handle(WorkflowEvent::TemplateSelected("a".into()))[..]
        else {
            panic!()
        };
        let [Effect::FetchFields { generation: second, .. }] =
            wf.handle(WorkflowEvent::TemplateSelected("b".into()))[..]
        else {
            panic!()
        };
        assert_ne!(first, second);

        wf.handle(WorkflowEvent::FieldsFetched {
            generation: second,
            result: Ok(vec![short_text("b1", "B field")]),
        });
        wf.handle(WorkflowEvent::FieldsFetched {
            generation: first,
            result: Ok(vec![short_text("a1", "A field")]),
        });
        assert_eq!(wf.selected(), Some("b"));
        assert_eq!(wf.fields()[0].id, "b1");
    }

    #[test]
    fn failed_submit_keeps_modal_open_and_draft() {
        let mut wf = loaded();
        wf.handle(typed("f1", "Jane"));
        let [Effect::PostSubmission { epoch, .. }] = wf.handle(WorkflowEvent::SubmitRequested)[..]
        else {
            panic!()
        };
        let effects = wf.handle(WorkflowEvent::SubmitFinished {
            epoch,
            result: Err(ApiError::Transport("offline".into())),
        });
        assert!(effects.is_empty());
        assert_eq!(wf.phase(), Phase::SubmitFailed);
        assert_eq!(wf.feedback(), Some(&Feedback::error(SUBMIT_ERROR)));
        assert_eq!(wf.value_of("f1"), Some(&FieldValue::Text("Jane".into())));
        assert!(wf.can_submit(), "retry is allowed");
    }

    #[test]
    fn template_list_failure_is_non_fatal() {
        let mut wf = SubmissionWorkflow::new();
        let [Effect::FetchTemplates { epoch }] = wf.handle(WorkflowEvent::Opened)[..] else {
            panic!()
        };
        let effects = wf.handle(WorkflowEvent::TemplatesFetched {
            epoch,
            result: Err(ApiError::Status {
                status: 500,
                detail: None,
            }),
        });
        assert!(effects.is_empty());
        assert!(wf.templates().is_empty());
        assert_eq!(wf.feedback(), Some(&Feedback::error(TEMPLATES_ERROR)));
        assert_eq!(wf.phase(), Phase::TemplatesLoaded);
    }

    #[test]
    fn field_schema_failure_disables_submit() {
        let mut wf = SubmissionWorkflow::new();
        let [Effect::FetchTemplates { epoch }] = wf.handle(WorkflowEvent::Opened)[..] else {
            panic!()
        };
        wf.handle(WorkflowEvent::TemplatesFetched {
            epoch,
            result: Ok(vec![template("t", "T")]),
        });
        let [Effect::FetchFields { generation, .. }] =
            wf.handle(WorkflowEvent::TemplateSelected("t".into()))[..]
        else {
            panic!()
        };
        let effects = wf.handle(WorkflowEvent::FieldsFetched {
            generation,
            result: Err(ApiError::Unauthorized { detail: None }),
        });
        assert_eq!(effects, vec![Effect::SessionExpired]);
        assert_eq!(wf.feedback(), Some(&Feedback::error(FIELDS_ERROR)));
        assert!(!wf.can_submit());
    }

    #[test]
    fn responses_after_close_are_ignored() {
        let mut wf = SubmissionWorkflow::new();
        let [Effect::FetchTemplates { epoch }] = wf.handle(WorkflowEvent::Opened)[..] else {
            panic!()
        };
        assert_eq!(wf.handle(WorkflowEvent::CloseRequested), vec![Effect::Close]);
        wf.handle(WorkflowEvent::TemplatesFetched {
            epoch,
            result: Ok(vec![template("t", "T")]),
        });
        assert!(wf.templates().is_empty());
        assert_eq!(wf.phase(), Phase::Idle);
    }

    #[test]
    fn close_is_blocked_while_submitting() {
        let mut wf = loaded();
        wf.handle(typed("f1", "x"));
        wf.handle(WorkflowEvent::SubmitRequested);
        assert!(wf.handle(WorkflowEvent::CloseRequested).is_empty());
        assert!(wf.is_submitting());
    }

    #[test]
    fn server_detail_is_surfaced_on_submit_failure() {
        let mut wf = loaded();
        let [Effect::PostSubmission { epoch, .. }] = wf.handle(WorkflowEvent::SubmitRequested)[..]
        else {
            panic!()
        };
        wf.handle(WorkflowEvent::SubmitFinished {
            epoch,
            result: Err(ApiError::Status {
                status: 404,
                detail: Some("Template not found".into()),
            }),
        });
        assert_eq!(
            wf.feedback().map(|f| f.message.as_str()),
            Some("Submission failed: Template not found")
        );
    }
}
