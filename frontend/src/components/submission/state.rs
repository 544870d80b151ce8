use gloo_timers::callback::Timeout;
use yew::context::ContextHandle;

use common::workflow::SubmissionWorkflow;

use crate::api::Api;
use crate::app::AppContext;

pub struct SubmissionModal {
    pub workflow: SubmissionWorkflow,
    pub api: Api,
    /// Pending auto-close after a successful submit. Dropping it cancels the close.
    pub close_timer: Option<Timeout>,
    pub context: AppContext,
    pub _context_handle: Option<ContextHandle<AppContext>>,
}
