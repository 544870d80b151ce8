use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SubmissionModalProps {
    /// Opening resets the modal and fetches the available forms.
    pub open: bool,
    pub on_close: Callback<()>,
    /// Called once a submission was accepted, before the modal closes.
    pub on_submitted: Callback<()>,
}
