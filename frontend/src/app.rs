//! Routing shell: owns the auth session, keeps the address bar in sync and
//! renders the page for the current route once the guard lets it through.

use yew::context::ContextHandle;
use yew::{html, Callback, Component, Context, ContextProvider, Html};

use common::error::ApiError;
use common::listing::ListLayout;
use common::model::user::{User, UserRole};
use common::routing::{after_login, guard, AppRoute, GuardOutcome};
use common::session::{self, AuthSession, Credentials, SessionSnapshot};

use crate::api::api;
use crate::browser::{current_pathname, push_route, replace_route, viewport_width, WindowListener};
use crate::components::dashboards::admin::AdminDashboard;
use crate::components::dashboards::agent::AgentDashboard;
use crate::components::dashboards::buyer::BuyerDashboard;
use crate::components::helpers::{spinner, BRAND_COLOR};
use crate::components::login::LoginPage;
use crate::layout::PageLayout;
use crate::storage::LocalStorage;

/// Shared with every page through a `ContextProvider`.
#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub session: SessionSnapshot,
    pub layout: ListLayout,
    pub navigate: Callback<AppRoute>,
    pub sign_in: Callback<Credentials>,
    /// Logout, also used when the backend rejects the token.
    pub sign_out: Callback<()>,
}

impl Default for AppContext {
    fn default() -> Self {
        Self {
            session: SessionSnapshot::default(),
            layout: ListLayout::Table,
            navigate: Callback::noop(),
            sign_in: Callback::noop(),
            sign_out: Callback::noop(),
        }
    }
}

/// Subscribes a struct component to the [`AppContext`].
pub fn subscribe<C>(
    ctx: &Context<C>,
    to_msg: fn(AppContext) -> C::Message,
) -> (AppContext, Option<ContextHandle<AppContext>>)
where
    C: Component,
{
    match ctx.link().context::<AppContext>(ctx.link().callback(to_msg)) {
        Some((context, handle)) => (context, Some(handle)),
        None => {
            log::error!("component mounted outside of the app context");
            (AppContext::default(), None)
        }
    }
}

pub enum Msg {
    Navigate(AppRoute),
    RouteChanged(AppRoute),
    Validated(Result<User, ApiError>),
    SignedIn(Credentials),
    SignOut,
    Resized(f64),
}

pub struct App {
    session: AuthSession<LocalStorage>,
    route: AppRoute,
    return_to: Option<AppRoute>,
    layout: ListLayout,
    navigate: Callback<AppRoute>,
    sign_in: Callback<Credentials>,
    sign_out: Callback<()>,
    _popstate: Option<WindowListener>,
    _resize: Option<WindowListener>,
}

impl App {
    /// Applies guard redirects until the current route can render or must wait.
    fn settle(&mut self) {
        let snapshot = self.session.snapshot();
        for _ in 0..3 {
            match guard(self.route, &snapshot) {
                GuardOutcome::Redirect { to, from } => {
                    if from.is_some() {
                        self.return_to = from;
                    }
                    log::debug!("redirecting {} -> {}", self.route.to_path(), to.to_path());
                    self.route = to;
                    replace_route(to);
                }
                GuardOutcome::Render | GuardOutcome::Pending => return,
            }
        }
    }

    fn context(&self) -> AppContext {
        AppContext {
            session: self.session.snapshot(),
            layout: self.layout,
            navigate: self.navigate.clone(),
            sign_in: self.sign_in.clone(),
            sign_out: self.sign_out.clone(),
        }
    }

    fn dashboard(role: UserRole) -> Html {
        match role {
            UserRole::Agent => html! { <AgentDashboard /> },
            UserRole::Buyer => html! { <BuyerDashboard /> },
            UserRole::Admin => html! { <AdminDashboard /> },
        }
    }

    fn page(&self) -> Html {
        let snapshot = self.session.snapshot();
        match guard(self.route, &snapshot) {
            GuardOutcome::Pending | GuardOutcome::Redirect { .. } => spinner(),
            GuardOutcome::Render => match (self.route, snapshot.user.as_ref()) {
                (AppRoute::Login, _) => html! { <LoginPage /> },
                (AppRoute::Unauthorized, _) => unauthorized(),
                (AppRoute::Agent, _) => html! { <AgentDashboard /> },
                (AppRoute::Buyer, _) => html! { <BuyerDashboard /> },
                (AppRoute::Admin, _) => html! { <AdminDashboard /> },
                (AppRoute::Dashboard | AppRoute::Home, Some(user)) => Self::dashboard(user.role),
                (AppRoute::Dashboard | AppRoute::Home, None) => spinner(),
            },
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let auth = AuthSession::restore(LocalStorage);
        if auth.needs_validation() {
            let link = link.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = session::validate(&api()).await;
                link.send_message(Msg::Validated(result));
            });
        }

        let popstate = {
            let link = link.clone();
            WindowListener::new("popstate", move |_| {
                link.send_message(Msg::RouteChanged(AppRoute::from_path(&current_pathname())));
            })
        };
        let resize = {
            let link = link.clone();
            WindowListener::new("resize", move |_| link.send_message(Msg::Resized(viewport_width())))
        };

        let mut app = Self {
            session: auth,
            route: AppRoute::from_path(&current_pathname()),
            return_to: None,
            layout: ListLayout::for_width(viewport_width()),
            navigate: link.callback(Msg::Navigate),
            sign_in: link.callback(Msg::SignedIn),
            sign_out: link.callback(|_| Msg::SignOut),
            _popstate: popstate,
            _resize: resize,
        };
        app.settle();
        app
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(route) => {
                self.route = route;
                push_route(route);
                self.settle();
                true
            }
            Msg::RouteChanged(route) => {
                self.route = route;
                self.settle();
                true
            }
            Msg::Validated(result) => {
                self.session.complete_validation(result);
                self.settle();
                true
            }
            Msg::SignedIn(credentials) => {
                self.session.establish(credentials);
                if let Some(user) = self.session.user() {
                    self.route = after_login(user, self.return_to.take());
                    push_route(self.route);
                }
                self.settle();
                true
            }
            Msg::SignOut => {
                if !self.session.is_authenticated() && self.route == AppRoute::Login {
                    return false;
                }
                log::info!("signing out");
                self.session.logout();
                self.return_to = None;
                self.route = AppRoute::Login;
                push_route(AppRoute::Login);
                true
            }
            Msg::Resized(width) => {
                let layout = ListLayout::for_width(width);
                let changed = layout != self.layout;
                self.layout = layout;
                changed
            }
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let page = self.page();
        let framed = self.route != AppRoute::Login && self.session.is_authenticated();
        html! {
            <ContextProvider<AppContext> context={self.context()}>
                if framed {
                    <PageLayout>{ page }</PageLayout>
                } else {
                    { page }
                }
            </ContextProvider<AppContext>>
        }
    }
}

fn unauthorized() -> Html {
    html! {
        <div style="max-width:640px;margin:64px auto;text-align:center;">
            <h1 style={format!("color:{BRAND_COLOR};")}>{"Unauthorized"}</h1>
            <p>{"You do not have permission to view this page."}</p>
            <a href="/dashboard">{"Back to your dashboard"}</a>
        </div>
    }
}
