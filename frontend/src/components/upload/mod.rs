//! Agent's "Upload New PDF Template" dialog.

use gloo_file::futures::read_as_bytes;
use gloo_timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ApiError;
use common::requests::{upload_error_message, TemplateUpload};
use common::workflow::{Feedback, SUCCESS_CLOSE_DELAY_MS};

use crate::api::{api, Api};
use crate::app::{subscribe, AppContext};
use crate::components::helpers::{alert, spinner};
use crate::tops_sheet::modal_sheet::ModalSheet;

pub enum Msg {
    FileChosen(web_sys::File),
    Uploaded {
        upload: TemplateUpload,
        result: Result<(), ApiError>,
    },
    ReadFailed(String),
    Close,
    ContextChanged(AppContext),
}

#[derive(Properties, PartialEq, Clone)]
pub struct UploadModalProps {
    pub open: bool,
    pub on_close: Callback<()>,
    pub on_uploaded: Callback<()>,
}

pub struct UploadModal {
    api: Api,
    busy: bool,
    feedback: Option<Feedback>,
    close_timer: Option<Timeout>,
    input_ref: NodeRef,
    context: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
}

impl UploadModal {
    fn reset(&mut self) {
        self.busy = false;
        self.feedback = None;
        self.close_timer = None;
        if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
            input.set_value("");
        }
    }
}

impl Component for UploadModal {
    type Message = Msg;
    type Properties = UploadModalProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (context, handle) = subscribe(ctx, Msg::ContextChanged);
        Self {
            api: api(),
            busy: false,
            feedback: None,
            close_timer: None,
            input_ref: NodeRef::default(),
            context,
            _context_handle: handle,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().open && !old_props.open {
            self.reset();
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileChosen(file) => {
                if self.busy {
                    return false;
                }
                let file_name = file.name();
                if !TemplateUpload::is_pdf(&file.type_(), &file_name) {
                    self.feedback = Some(Feedback::error("Error: Only PDF files are accepted."));
                    return true;
                }
                self.busy = true;
                self.feedback = None;
                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let bytes = match read_as_bytes(&gloo_file::File::from(file)).await {
                        Ok(bytes) => bytes,
                        Err(err) => {
                            link.send_message(Msg::ReadFailed(err.to_string()));
                            return;
                        }
                    };
                    let upload = TemplateUpload { file_name, bytes };
                    let result = api.upload_template(upload.clone()).await;
                    link.send_message(Msg::Uploaded { upload, result });
                });
                true
            }
            Msg::Uploaded { upload, result } => {
                self.busy = false;
                match result {
                    Ok(()) => {
                        log::info!("uploaded template {}", upload.file_name);
                        self.feedback = Some(Feedback::success(upload.success_message()));
                        ctx.props().on_uploaded.emit(());
                        let link = ctx.link().clone();
                        self.close_timer = Some(Timeout::new(SUCCESS_CLOSE_DELAY_MS, move || {
                            link.send_message(Msg::Close)
                        }));
                    }
                    Err(err) => {
                        self.feedback = Some(Feedback::error(upload_error_message(&err)));
                        if err.is_unauthorized() {
                            self.context.sign_out.emit(());
                        }
                    }
                }
                true
            }
            Msg::ReadFailed(reason) => {
                log::warn!("could not read selected file: {reason}");
                self.busy = false;
                self.feedback = Some(Feedback::error("Error: Could not read the selected file."));
                true
            }
            Msg::Close => {
                if self.busy {
                    return false;
                }
                self.reset();
                ctx.props().on_close.emit(());
                true
            }
            Msg::ContextChanged(context) => {
                self.context = context;
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_change = link.batch_callback(|e: Event| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            input
                .files()
                .and_then(|files| files.get(0))
                .map(Msg::FileChosen)
        });
        let actions = html! {
            <button
                class="btn btn-secondary"
                disabled={self.busy}
                onclick={link.callback(|_: MouseEvent| Msg::Close)}
            >
                {"Cancel"}
            </button>
        };

        html! {
            <ModalSheet
                open={ctx.props().open}
                title="Upload New PDF Template"
                on_close={link.callback(|_: ()| Msg::Close)}
                dismissable={!self.busy}
                actions={actions}
            >
                <label class="dropzone" for="template-file">
                    <input
                        id="template-file"
                        ref={self.input_ref.clone()}
                        type="file"
                        accept="application/pdf,.pdf"
                        style="display:none;"
                        disabled={self.busy}
                        onchange={on_change}
                    />
                    <p style="margin:0;">{"Click to select a PDF file"}</p>
                    <p style="margin:4px 0 0 0;color:#666;font-size:0.875rem;">{"PDF files only"}</p>
                </label>
                if self.busy {
                    { spinner() }
                }
                if let Some(feedback) = &self.feedback {
                    { alert(feedback) }
                }
            </ModalSheet>
        }
    }
}
