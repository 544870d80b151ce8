use yew::prelude::*;

use crate::components::helpers::spinner;
use crate::tops_sheet::modal_sheet::ModalSheet;

/// PDF preview dialog. `url` is an object URL owned by the caller, who revokes
/// it when the dialog closes.
pub fn pdf_dialog(url: Option<&str>, loading: bool, on_close: Callback<()>) -> Html {
    let open = loading || url.is_some();
    let actions = {
        let on_close = on_close.clone();
        html! {
            <button class="btn btn-secondary" onclick={Callback::from(move |_: MouseEvent| on_close.emit(()))}>
                {"Close"}
            </button>
        }
    };

    html! {
        <ModalSheet open={open} title="PDF Preview" on_close={on_close} wide={true} actions={actions}>
            if let Some(url) = url {
                <iframe
                    src={url.to_string()}
                    title="PDF Preview"
                    style="width:100%;height:75vh;border:none;background:#fff;border-radius:4px;"
                />
            } else if loading {
                { spinner() }
            } else {
                <div style="color:#666;">{"No PDF available"}</div>
            }
        </ModalSheet>
    }
}
