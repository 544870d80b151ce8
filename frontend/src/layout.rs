use yew::context::ContextHandle;
use yew::{html, Children, Component, Context, Html, MouseEvent, Properties};

use common::routing::AppRoute;

use crate::app::{subscribe, AppContext};

#[derive(Properties, PartialEq)]
pub struct PageLayoutProps {
    pub children: Children,
}

pub enum Msg {
    ContextChanged(AppContext),
}

/// App bar plus a centered content column.
pub struct PageLayout {
    context: AppContext,
    _context_handle: Option<ContextHandle<AppContext>>,
}

impl Component for PageLayout {
    type Message = Msg;
    type Properties = PageLayoutProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (context, handle) = subscribe(ctx, Msg::ContextChanged);
        PageLayout {
            context,
            _context_handle: handle,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ContextChanged(context) => {
                let changed = context.session != self.context.session;
                self.context = context;
                changed
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let navigate = self.context.navigate.clone();
        let sign_out = self.context.sign_out.clone();

        html! {
            <>
                <header class="app-bar">
                    <span
                        class="app-bar-brand"
                        onclick={move |_: MouseEvent| navigate.emit(AppRoute::Dashboard)}
                    >
                        {"Reeble"}
                    </span>
                    if let Some(user) = &self.context.session.user {
                        <span class="app-bar-user">{ format!("{} ({})", user.email, user.role) }</span>
                        <button class="btn btn-on-dark" onclick={move |_: MouseEvent| sign_out.emit(())}>
                            {"Logout"}
                        </button>
                    }
                </header>
                <main class="content">
                    { for props.children.iter() }
                </main>
            </>
        }
    }
}
