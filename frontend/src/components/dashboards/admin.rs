use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ApiError;
use common::listing::{format_optional_date, ListLayout, ListState};
use common::model::dashboard::{DashboardRow, PdfSource};

use crate::api::{api, Api};
use crate::app::{subscribe, AppContext};
use crate::components::dashboards::{list_body, page_header};
use crate::components::helpers::{empty_state, save_pdf, show_toast};

const LOAD_ERROR: &str = "Failed to fetch dashboard data. Please try again later.";
const DOWNLOAD_ERROR: &str = "Failed to download PDF. Please try again.";

pub enum Msg {
    Loaded(Result<Vec<DashboardRow>, ApiError>),
    Download(PdfSource),
    Downloaded {
        source: PdfSource,
        result: Result<Vec<u8>, ApiError>,
    },
    ContextChanged(AppContext),
}

pub struct AdminDashboard {
    api: Api,
    rows: ListState<DashboardRow>,
    downloading: Option<String>,
    context: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
}

impl AdminDashboard {
    fn download_action(&self, ctx: &Context<Self>, row: &DashboardRow) -> Html {
        let Some(source) = row.pdf_source() else {
            return html! { <span class="muted">{"N/A"}</span> };
        };
        let busy = self.downloading.as_deref() == Some(source.key());
        html! {
            <button
                class="btn btn-tonal"
                disabled={busy}
                onclick={ctx.link().callback(move |_: MouseEvent| Msg::Download(source.clone()))}
            >
                { if busy { "Downloading..." } else { "Download" } }
            </button>
        }
    }

    fn latest_date(row: &DashboardRow) -> String {
        format_optional_date(
            row.latest_submission
                .as_ref()
                .and_then(|latest| latest.created_at.as_deref()),
        )
    }

    fn table(&self, ctx: &Context<Self>, rows: &[DashboardRow]) -> Html {
        if self.context.layout == ListLayout::Cards {
            return html! {
                <div class="card-list">
                    { for rows.iter().map(|row| html! {
                        <div class="card" key={row.template.id.to_string()}>
                            <div class="card-title">{ &row.template.title }</div>
                            <div class="card-subtitle">{ &row.owner.email }</div>
                            <div class="card-subtitle">{ format!("Latest submission: {}", Self::latest_date(row)) }</div>
                            <div class="card-actions">{ self.download_action(ctx, row) }</div>
                        </div>
                    }) }
                </div>
            };
        }
        html! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Template Title"}</th>
                        <th>{"Agent"}</th>
                        <th>{"Latest Submission"}</th>
                        <th style="text-align:right;">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.iter().map(|row| html! {
                        <tr key={row.template.id.to_string()}>
                            <td>{ &row.template.title }</td>
                            <td>{ &row.owner.email }</td>
                            <td>{ Self::latest_date(row) }</td>
                            <td style="text-align:right;">{ self.download_action(ctx, row) }</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        }
    }
}

impl Component for AdminDashboard {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (context, handle) = subscribe(ctx, Msg::ContextChanged);
        let admin = Self {
            api: api(),
            rows: ListState::Loading,
            downloading: None,
            context,
            _context_handle: handle,
        };
        let api = admin.api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api.dashboard().await));
        });
        admin
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(result) => {
                if matches!(&result, Err(err) if err.is_unauthorized()) {
                    self.context.sign_out.emit(());
                }
                self.rows = ListState::from_result(result, LOAD_ERROR);
                true
            }
            Msg::Download(source) => {
                if self.downloading.is_some() {
                    return false;
                }
                self.downloading = Some(source.key().to_string());
                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.download_pdf(&source).await;
                    link.send_message(Msg::Downloaded { source, result });
                });
                true
            }
            Msg::Downloaded { source, result } => {
                self.downloading = None;
                let saved = result
                    .map_err(|err| {
                        if err.is_unauthorized() {
                            self.context.sign_out.emit(());
                        }
                        err.to_string()
                    })
                    .and_then(|bytes| save_pdf(&bytes, &source.file_name()));
                if let Err(reason) = saved {
                    log::warn!("download of {} failed: {reason}", source.key());
                    show_toast(DOWNLOAD_ERROR);
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
        html! {
            <div class="paper">
                { page_header("Admin Dashboard", html! {}) }
                {
                    list_body(
                        &self.rows,
                        || empty_state("No templates have been uploaded yet.", "Templates uploaded by agents appear here.", None),
                        |rows| self.table(ctx, rows),
                    )
                }
            </div>
        }
    }
}
