//! Buyer page: previous submissions, PDF preview and the fill-form modal.

use gloo_file::ObjectUrl;
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ApiError;
use common::listing::{format_optional_date, ListLayout, ListState};
use common::model::submission::Submission;

use crate::api::{api, Api};
use crate::app::{subscribe, AppContext};
use crate::components::dashboards::{list_body, page_header};
use crate::components::helpers::{empty_state, pdf_object_url, show_toast, EmptyAction};
use crate::components::pdf_preview::pdf_dialog;
use crate::components::submission::SubmissionModal;

const LOAD_ERROR: &str = "Could not fetch your submissions. Please try again later.";
const PREVIEW_ERROR: &str = "Failed to load PDF. Please try again.";

pub enum Msg {
    Load,
    Loaded(Result<Vec<Submission>, ApiError>),
    OpenForm,
    CloseForm,
    View(String),
    PdfFetched {
        key: String,
        result: Result<Vec<u8>, ApiError>,
    },
    ClosePreview,
    ContextChanged(AppContext),
}

pub struct BuyerDashboard {
    api: Api,
    submissions: ListState<Submission>,
    form_open: bool,
    /// Object URL of the PDF on screen; dropping it revokes the URL.
    preview: Option<ObjectUrl>,
    /// Download key of the PDF being fetched for preview.
    preview_pending: Option<String>,
    context: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
}

impl BuyerDashboard {
    fn view_action(&self, ctx: &Context<Self>, submission: &Submission) -> Html {
        if !submission.has_pdf() {
            return html! { <span class="muted">{"Not Available"}</span> };
        }
        let key = submission.download_key();
        let loading = self.preview_pending.as_deref() == Some(key.as_str());
        html! {
            <button
                class="btn btn-tonal"
                disabled={loading}
                onclick={ctx.link().callback(move |_: MouseEvent| Msg::View(key.clone()))}
            >
                { if loading { "Loading..." } else { "View" } }
            </button>
        }
    }

    fn rows(&self, ctx: &Context<Self>, submissions: &[Submission]) -> Html {
        match self.context.layout {
            ListLayout::Table => html! {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Form Title"}</th>
                            <th>{"Date Submitted"}</th>
                            <th style="text-align:right;">{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for submissions.iter().map(|submission| html! {
                            <tr key={submission.id.to_string()}>
                                <td>{ submission.title() }</td>
                                <td>{ format_optional_date(submission.created_at.as_deref()) }</td>
                                <td style="text-align:right;">{ self.view_action(ctx, submission) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            },
            ListLayout::Cards => html! {
                <div class="card-list">
                    { for submissions.iter().map(|submission| html! {
                        <div class="card" key={submission.id.to_string()}>
                            <div class="card-title">{ submission.title() }</div>
                            <div class="card-subtitle">{ format_optional_date(submission.created_at.as_deref()) }</div>
                            <div class="card-actions">{ self.view_action(ctx, submission) }</div>
                        </div>
                    }) }
                </div>
            },
        }
    }
}

impl Component for BuyerDashboard {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (context, handle) = subscribe(ctx, Msg::ContextChanged);
        ctx.link().send_message(Msg::Load);
        Self {
            api: api(),
            submissions: ListState::Loading,
            form_open: false,
            preview: None,
            preview_pending: None,
            context,
            _context_handle: handle,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Load => {
                self.submissions = ListState::Loading;
                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Loaded(api.list_submissions().await));
                });
                true
            }
            Msg::Loaded(result) => {
                if matches!(&result, Err(err) if err.is_unauthorized()) {
                    self.context.sign_out.emit(());
                }
                self.submissions = ListState::from_result(result, LOAD_ERROR);
                true
            }
            Msg::OpenForm => {
                self.form_open = true;
                true
            }
            Msg::CloseForm => {
                self.form_open = false;
                true
            }
            Msg::View(key) => {
                if self.preview_pending.is_some() {
                    return false;
                }
                self.preview = None;
                self.preview_pending = Some(key.clone());
                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.download_submission(&key).await;
                    link.send_message(Msg::PdfFetched { key, result });
                });
                true
            }
            Msg::PdfFetched { key, result } => {
                if self.preview_pending.as_deref() != Some(key.as_str()) {
                    return false;
                }
                self.preview_pending = None;
                match result {
                    Ok(bytes) => self.preview = Some(pdf_object_url(&bytes)),
                    Err(err) => {
                        log::warn!("preview of {key} failed: {err}");
                        show_toast(PREVIEW_ERROR);
                        if err.is_unauthorized() {
                            self.context.sign_out.emit(());
                        }
                    }
                }
                true
            }
            Msg::ClosePreview => {
                self.preview = None;
                self.preview_pending = None;
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
        let fill_button = html! {
            <button class="btn btn-primary" onclick={link.callback(|_: MouseEvent| Msg::OpenForm)}>
                {"Fill New Form"}
            </button>
        };
        html! {
            <div class="paper">
                { page_header("Buyer Dashboard", fill_button) }
                <h2 class="section-title">{"My Previous Submissions"}</h2>
                {
                    list_body(
                        &self.submissions,
                        || empty_state(
                            "No Submissions Yet",
                            "Start by filling out a new form to submit your first document.",
                            Some(EmptyAction {
                                label: "Fill New Form",
                                on_click: link.callback(|_: MouseEvent| Msg::OpenForm),
                            }),
                        ),
                        |submissions| self.rows(ctx, submissions),
                    )
                }
                <SubmissionModal
                    open={self.form_open}
                    on_close={link.callback(|_: ()| Msg::CloseForm)}
                    on_submitted={link.callback(|_: ()| Msg::Load)}
                />
                {
                    pdf_dialog(
                        self.preview.as_deref(),
                        self.preview_pending.is_some(),
                        link.callback(|_: ()| Msg::ClosePreview),
                    )
                }
            </div>
        }
    }
}
