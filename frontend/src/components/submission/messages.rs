use common::workflow::WorkflowEvent;

use crate::app::AppContext;

pub enum Msg {
    Workflow(WorkflowEvent),
    ContextChanged(AppContext),
}

impl From<WorkflowEvent> for Msg {
    fn from(event: WorkflowEvent) -> Self {
        Msg::Workflow(event)
    }
}
