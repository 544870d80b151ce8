use web_sys::HtmlInputElement;
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ApiError;
use common::session::{authenticate, login_outcome, Credentials};

use crate::api::{api, Api};
use crate::app::{subscribe, AppContext};

pub enum Msg {
    Email(String),
    Password(String),
    Submit,
    Done(Result<Credentials, ApiError>),
    ContextChanged(AppContext),
}

pub struct LoginPage {
    api: Api,
    email: String,
    password: String,
    error: Option<&'static str>,
    submitting: bool,
    context: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
}

impl Component for LoginPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (context, handle) = subscribe(ctx, Msg::ContextChanged);
        Self {
            api: api(),
            email: String::new(),
            password: String::new(),
            error: None,
            submitting: false,
            context,
            _context_handle: handle,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Email(email) => {
                self.email = email;
                true
            }
            Msg::Password(password) => {
                self.password = password;
                true
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                self.submitting = true;
                self.error = None;
                let api = self.api.clone();
                let (email, password) = (self.email.clone(), self.password.clone());
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Done(authenticate(&api, &email, &password).await));
                });
                true
            }
            Msg::Done(result) => {
                self.submitting = false;
                match login_outcome(result) {
                    Ok(credentials) => {
                        self.password.clear();
                        self.context.sign_in.emit(credentials);
                    }
                    Err(message) => self.error = Some(message),
                }
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
        html! {
            <div class="login-wrapper">
                <form
                    class="paper login-card"
                    onsubmit={link.callback(|e: SubmitEvent| {
                        e.prevent_default();
                        Msg::Submit
                    })}
                >
                    <h1 class="page-title" style="text-align:center;">{"Reeble"}</h1>
                    <p style="text-align:center;color:#666;margin-top:0;">{"Sign in to continue"}</p>
                    if let Some(error) = self.error {
                        <div role="alert" class="alert-error">{ error }</div>
                    }
                    <div class="field">
                        <label for="email" class="field-label">{"Email Address"}</label>
                        <input
                            id="email"
                            class="field-input"
                            type="email"
                            autocomplete="email"
                            required={true}
                            value={self.email.clone()}
                            disabled={self.submitting}
                            oninput={link.callback(|e: InputEvent| Msg::Email(e.target_unchecked_into::<HtmlInputElement>().value()))}
                        />
                    </div>
                    <div class="field">
                        <label for="password" class="field-label">{"Password"}</label>
                        <input
                            id="password"
                            class="field-input"
                            type="password"
                            autocomplete="current-password"
                            required={true}
                            value={self.password.clone()}
                            disabled={self.submitting}
                            oninput={link.callback(|e: InputEvent| Msg::Password(e.target_unchecked_into::<HtmlInputElement>().value()))}
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" style="width:100%;" disabled={self.submitting}>
                        { if self.submitting { "Signing In..." } else { "Sign In" } }
                    </button>
                </form>
            </div>
        }
    }
}
