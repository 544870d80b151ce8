use web_sys::HtmlSelectElement;
use yew::prelude::*;

use common::fields::FieldChange;
use common::workflow::WorkflowEvent;

use crate::components::fields::field_control;
use crate::components::helpers::{alert, spinner};
use crate::tops_sheet::modal_sheet::ModalSheet;

use super::state::SubmissionModal;

pub fn view(modal: &SubmissionModal, ctx: &Context<SubmissionModal>) -> Html {
    let link = ctx.link();
    let workflow = &modal.workflow;
    let submitting = workflow.is_submitting();
    let controls = workflow.controls();

    let on_close = link.callback(|_: ()| WorkflowEvent::CloseRequested);
    let on_select = link.callback(|e: Event| {
        WorkflowEvent::TemplateSelected(e.target_unchecked_into::<HtmlSelectElement>().value())
    });
    let on_field: Callback<FieldChange> = link.callback(WorkflowEvent::FieldChanged);

    let actions = html! {
        <>
            <button
                class="btn btn-secondary"
                disabled={submitting}
                onclick={link.callback(|_: MouseEvent| WorkflowEvent::CloseRequested)}
            >
                {"Cancel"}
            </button>
            <button
                class="btn btn-primary"
                disabled={!workflow.can_submit()}
                onclick={link.callback(|_: MouseEvent| WorkflowEvent::SubmitRequested)}
            >
                { if submitting { "Submitting..." } else { "Submit Form" } }
            </button>
        </>
    };

    html! {
        <ModalSheet
            open={ctx.props().open}
            title="Fill New Form"
            on_close={on_close}
            dismissable={!submitting}
            actions={actions}
        >
            if let Some(feedback) = workflow.feedback() {
                { alert(feedback) }
            }
            if workflow.is_loading_templates() {
                { spinner() }
            } else {
                <div class="field">
                    <label for="template-select" class="field-label">{"Select a Form"}</label>
                    <select
                        id="template-select"
                        class="field-input"
                        disabled={submitting}
                        onchange={on_select}
                    >
                        <option value="" selected={workflow.selected().is_none()}>{"-- Select a Form --"}</option>
                        { for workflow.templates().iter().map(|template| {
                            let key = template.form_key();
                            let selected = workflow.selected() == Some(key.as_str());
                            html! {
                                <option value={key} selected={selected}>{ &template.title }</option>
                            }
                        }) }
                    </select>
                </div>
            }
            if workflow.is_loading_fields() {
                { spinner() }
            }
            <form
                class="fields"
                onsubmit={link.callback(|e: SubmitEvent| {
                    e.prevent_default();
                    WorkflowEvent::SubmitRequested
                })}
            >
                { for controls.iter().map(|control| {
                    field_control(control, workflow.value_of(&control.field_id), submitting, &on_field)
                }) }
            </form>
        </ModalSheet>
    }
}
