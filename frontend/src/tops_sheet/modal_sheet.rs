use uuid::Uuid;
use yew::{html, Callback, Children, Component, Context, Html, MouseEvent, Properties};

/// Dialog sheet sliding down over a dimmed backdrop.
///
/// The sheet stays mounted while closed so the `show` transition can run; children
/// are only rendered while it is open.
pub struct ModalSheet {
    title_id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub open: bool,
    pub title: String,
    pub on_close: Callback<()>,
    /// Backdrop clicks are ignored while `false`, e.g. during a request.
    #[prop_or(true)]
    pub dismissable: bool,
    #[prop_or_default]
    pub wide: bool,
    #[prop_or_default]
    pub actions: Html,
    #[prop_or_default]
    pub children: Children,
}

impl Component for ModalSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            title_id: format!("sheet-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_backdrop = {
            let on_close = props.on_close.clone();
            let dismissable = props.dismissable;
            Callback::from(move |_: MouseEvent| {
                if dismissable {
                    on_close.emit(());
                }
            })
        };
        let width = if props.wide { "min(1100px, 96vw)" } else { "min(600px, 96vw)" };

        html! {
            <div class={if props.open { "top-sheet-backdrop show" } else { "top-sheet-backdrop" }}>
                <div class="top-sheet-scrim" onclick={on_backdrop} />
                <div
                    class="top-sheet"
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby={self.title_id.clone()}
                    style={format!("width:{width};")}
                >
                    <h2 id={self.title_id.clone()} class="top-sheet-title">{ &props.title }</h2>
                    <div class="top-sheet-body">
                        if props.open {
                            { for props.children.iter() }
                        }
                    </div>
                    <div class="top-sheet-actions">{ props.actions.clone() }</div>
                </div>
            </div>
        }
    }
}
