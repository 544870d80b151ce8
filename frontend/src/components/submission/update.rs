use gloo_timers::callback::Timeout;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::workflow::{Effect, WorkflowEvent};

use super::messages::Msg;
use super::state::SubmissionModal;

pub fn update(modal: &mut SubmissionModal, ctx: &Context<SubmissionModal>, msg: Msg) -> bool {
    match msg {
        Msg::Workflow(event) => {
            for effect in modal.workflow.handle(event) {
                run_effect(modal, ctx, effect);
            }
            true
        }
        Msg::ContextChanged(context) => {
            modal.context = context;
            false
        }
    }
}

fn run_effect(modal: &mut SubmissionModal, ctx: &Context<SubmissionModal>, effect: Effect) {
    let link = ctx.link().clone();
    match effect {
        Effect::FetchTemplates { epoch } => {
            let api = modal.api.clone();
            spawn_local(async move {
                let result = api.available_templates().await;
                link.send_message(WorkflowEvent::TemplatesFetched { epoch, result });
            });
        }
        Effect::FetchFields {
            generation,
            form_key,
        } => {
            let api = modal.api.clone();
            spawn_local(async move {
                let result = api.template_fields(&form_key).await;
                link.send_message(WorkflowEvent::FieldsFetched { generation, result });
            });
        }
        Effect::PostSubmission {
            epoch,
            form_key,
            draft,
        } => {
            let api = modal.api.clone();
            spawn_local(async move {
                let result = api.submit_form(&form_key, &draft).await;
                link.send_message(WorkflowEvent::SubmitFinished { epoch, result });
            });
        }
        Effect::NotifySubmitted => ctx.props().on_submitted.emit(()),
        Effect::CloseAfter { epoch, delay_ms } => {
            modal.close_timer = Some(Timeout::new(delay_ms, move || {
                link.send_message(WorkflowEvent::CloseTimerElapsed { epoch });
            }));
        }
        Effect::Close => {
            modal.close_timer = None;
            ctx.props().on_close.emit(());
        }
        Effect::SessionExpired => modal.context.sign_out.emit(()),
    }
}
