//! Draws one input per field control and reports edits through a single
//! `Callback<FieldChange>`.

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use common::fields::{Adornment, ControlKind, ControlSpec, FieldChange, FieldInput};
use common::model::field::FieldValue;

fn text_change(on_change: &Callback<FieldChange>, field_id: &str) -> Callback<InputEvent> {
    let on_change = on_change.clone();
    let field_id = field_id.to_string();
    Callback::from(move |e: InputEvent| {
        let value = e.target_unchecked_into::<HtmlInputElement>().value();
        on_change.emit(FieldChange {
            field_id: field_id.clone(),
            input: FieldInput::Text(value),
        });
    })
}

pub fn field_control(
    spec: &ControlSpec,
    value: Option<&FieldValue>,
    disabled: bool,
    on_change: &Callback<FieldChange>,
) -> Html {
    let input_id = format!("field-{}", spec.field_id);
    let text = value.map(FieldValue::as_text).unwrap_or_default().to_string();

    let control = match &spec.kind {
        ControlKind::SingleLine {
            input_type,
            adornment,
            letter_spaced,
        } => {
            let style = if *letter_spaced {
                "font-family:monospace;letter-spacing:0.5em;"
            } else {
                ""
            };
            let input = html! {
                <input
                    id={input_id.clone()}
                    class="field-input"
                    type={input_type.as_str()}
                    value={text}
                    style={style}
                    required={spec.required}
                    disabled={disabled}
                    oninput={text_change(on_change, &spec.field_id)}
                />
            };
            match adornment {
                Adornment::None => input,
                Adornment::Prefix(mark) => html! {
                    <div class="adorned"><span class="adornment">{ *mark }</span>{ input }</div>
                },
                Adornment::Suffix(mark) => html! {
                    <div class="adorned">{ input }<span class="adornment">{ *mark }</span></div>
                },
            }
        }
        ControlKind::MultiLine { rows } => {
            let on_change = on_change.clone();
            let field_id = spec.field_id.clone();
            html! {
                <textarea
                    id={input_id.clone()}
                    class="field-input"
                    rows={rows.to_string()}
                    value={text}
                    required={spec.required}
                    disabled={disabled}
                    oninput={Callback::from(move |e: InputEvent| {
                        let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
                        on_change.emit(FieldChange { field_id: field_id.clone(), input: FieldInput::Text(value) });
                    })}
                />
            }
        }
        ControlKind::Checkbox => {
            let on_change = on_change.clone();
            let field_id = spec.field_id.clone();
            let checked = value.map(FieldValue::is_checked).unwrap_or(false);
            return html! {
                <div class="field">
                    <label for={input_id.clone()} style="display:flex;align-items:center;gap:8px;">
                        <input
                            id={input_id}
                            type="checkbox"
                            checked={checked}
                            disabled={disabled}
                            onchange={Callback::from(move |e: Event| {
                                let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
                                on_change.emit(FieldChange { field_id: field_id.clone(), input: FieldInput::Checked(checked) });
                            })}
                        />
                        { &spec.label }
                    </label>
                </div>
            };
        }
        ControlKind::RadioGroup { options } => {
            let group = input_id;
            let current = text;
            return html! {
                <fieldset class="field radio-group">
                    <legend class="field-label">
                        { &spec.label }
                        if spec.required { <span style="color:#d32f2f;">{" *"}</span> }
                    </legend>
                    { for options.iter().map(|option| {
                        let on_change = on_change.clone();
                        let field_id = spec.field_id.clone();
                        let value = option.value.clone();
                        html! {
                            <label style="display:flex;align-items:center;gap:6px;">
                                <input
                                    type="radio"
                                    name={group.clone()}
                                    value={option.value.clone()}
                                    checked={current == option.value}
                                    required={spec.required}
                                    disabled={disabled}
                                    onchange={Callback::from(move |_: Event| {
                                        on_change.emit(FieldChange { field_id: field_id.clone(), input: FieldInput::Text(value.clone()) });
                                    })}
                                />
                                { &option.label }
                            </label>
                        }
                    }) }
                </fieldset>
            };
        }
    };

    html! {
        <div class="field">
            <label for={input_id.clone()} class="field-label">
                { &spec.label }
                if spec.required { <span style="color:#d32f2f;">{" *"}</span> }
            </label>
            { control }
        </div>
    }
}
