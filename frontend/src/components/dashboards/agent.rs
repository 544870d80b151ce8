//! Agent page: template management.

use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ApiError;
use common::listing::{format_optional_date, ListLayout, ListState};
use common::model::template::Template;

use crate::api::{api, Api};
use crate::app::{subscribe, AppContext};
use crate::components::dashboards::{list_body, page_header};
use crate::components::helpers::{empty_state, show_toast, EmptyAction};
use crate::components::upload::UploadModal;

const LOAD_ERROR: &str = "Failed to load templates. Please try refreshing the page.";
const DELETE_ERROR: &str = "Could not delete the template.";

pub enum Msg {
    Load,
    Loaded(Result<Vec<Template>, ApiError>),
    OpenUpload,
    CloseUpload,
    Delete(Template),
    Deleted(Result<(), ApiError>),
    ContextChanged(AppContext),
}

pub struct AgentDashboard {
    api: Api,
    templates: ListState<Template>,
    upload_open: bool,
    deleting: Option<String>,
    context: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

impl AgentDashboard {
    fn expire_on_unauthorized(&self, err: &ApiError) {
        if err.is_unauthorized() {
            self.context.sign_out.emit(());
        }
    }

    fn delete_button(&self, ctx: &Context<Self>, template: &Template) -> Html {
        let id = template.id.to_string();
        let busy = self.deleting.as_deref() == Some(id.as_str());
        let template = template.clone();
        html! {
            <button
                class="btn btn-danger"
                disabled={busy}
                onclick={ctx.link().callback(move |_: MouseEvent| Msg::Delete(template.clone()))}
            >
                { if busy { "Deleting..." } else { "Delete" } }
            </button>
        }
    }

    fn rows(&self, ctx: &Context<Self>, templates: &[Template]) -> Html {
        match self.context.layout {
            ListLayout::Table => html! {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Template Title"}</th>
                            <th>{"Date Uploaded"}</th>
                            <th style="text-align:right;">{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for templates.iter().map(|template| html! {
                            <tr key={template.id.to_string()}>
                                <td>{ &template.title }</td>
                                <td>{ format_optional_date(template.created_at.as_deref()) }</td>
                                <td style="text-align:right;">{ self.delete_button(ctx, template) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            },
            ListLayout::Cards => html! {
                <div class="card-list">
                    { for templates.iter().map(|template| html! {
                        <div class="card" key={template.id.to_string()}>
                            <div class="card-title">{ &template.title }</div>
                            <div class="card-subtitle">{ format_optional_date(template.created_at.as_deref()) }</div>
                            <div class="card-actions">{ self.delete_button(ctx, template) }</div>
                        </div>
                    }) }
                </div>
            },
        }
    }
}

impl Component for AgentDashboard {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (context, handle) = subscribe(ctx, Msg::ContextChanged);
        ctx.link().send_message(Msg::Load);
        Self {
            api: api(),
            templates: ListState::Loading,
            upload_open: false,
            deleting: None,
            context,
            _context_handle: handle,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Load => {
                self.templates = ListState::Loading;
                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Loaded(api.list_templates().await));
                });
                true
            }
            Msg::Loaded(result) => {
                if let Err(err) = &result {
                    self.expire_on_unauthorized(err);
                }
                self.templates = ListState::from_result(result, LOAD_ERROR);
                true
            }
            Msg::OpenUpload => {
                self.upload_open = true;
                true
            }
            Msg::CloseUpload => {
                self.upload_open = false;
                true
            }
            Msg::Delete(template) => {
                if self.deleting.is_some() {
                    return false;
                }
                if !confirm(&format!("Delete template '{}'?", template.title)) {
                    return false;
                }
                let id = template.id.to_string();
                self.deleting = Some(id.clone());
                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Deleted(api.delete_template(&id).await));
                });
                true
            }
            Msg::Deleted(result) => {
                self.deleting = None;
                match result {
                    Ok(()) => {
                        show_toast("Template deleted.");
                        ctx.link().send_message(Msg::Load);
                    }
                    Err(err) => {
                        log::warn!("template delete failed: {err}");
                        show_toast(&err.user_message(DELETE_ERROR));
                        self.expire_on_unauthorized(&err);
                    }
                }
                true
            }
            Msg::ContextChanged(context) => {
                let relayout = context.layout != self.context.layout;
                self.context = context;
                relayout
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let upload_button = html! {
            <button class="btn btn-primary" onclick={link.callback(|_: MouseEvent| Msg::OpenUpload)}>
                {"Upload Template"}
            </button>
        };
        html! {
            <div class="paper">
                { page_header("Template Management", upload_button) }
                {
                    list_body(
                        &self.templates,
                        || empty_state(
                            "No Templates Yet",
                            "Start by uploading your first template.",
                            Some(EmptyAction {
                                label: "Upload Template",
                                on_click: link.callback(|_: MouseEvent| Msg::OpenUpload),
                            }),
                        ),
                        |templates| self.rows(ctx, templates),
                    )
                }
                <UploadModal
                    open={self.upload_open}
                    on_close={link.callback(|_: ()| Msg::CloseUpload)}
                    on_uploaded={link.callback(|_: ()| Msg::Load)}
                />
            </div>
        }
    }
}
