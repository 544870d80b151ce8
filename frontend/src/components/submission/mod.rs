//! "Fill New Form" modal.
//!
//! The component is a thin shell around [`SubmissionWorkflow`]: every DOM event
//! and every request completion becomes a `WorkflowEvent`, and `update` carries
//! out the effects the workflow asks for.

use yew::prelude::*;

use common::workflow::{SubmissionWorkflow, WorkflowEvent};

use crate::api::api;
use crate::app::subscribe;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::SubmissionModalProps;
pub use state::SubmissionModal;

impl Component for SubmissionModal {
    type Message = Msg;
    type Properties = SubmissionModalProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (context, handle) = subscribe(ctx, Msg::ContextChanged);
        if ctx.props().open {
            ctx.link().send_message(WorkflowEvent::Opened);
        }
        Self {
            workflow: SubmissionWorkflow::new(),
            api: api(),
            close_timer: None,
            context,
            _context_handle: handle,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        match (old_props.open, ctx.props().open) {
            (false, true) => ctx.link().send_message(WorkflowEvent::Opened),
            (true, false) => ctx.link().send_message(WorkflowEvent::CloseRequested),
            _ => {}
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
