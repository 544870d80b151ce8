//! Field renderer: turns a field schema entry into a control description and
//! turns raw control input back into a draft value.
//!
//! The description is platform-neutral; the frontend maps each `ControlKind` to
//! exactly one input element. Keeping the tag dispatch here means a new tag only
//! touches `FieldKind` and the match in [`control_for`].

use crate::model::field::{FieldDescriptor, FieldKind, FieldValue, FormDraft};

/// HTML input type of a single-line control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Date,
    Email,
    Tel,
    Number,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Date => "date",
            InputType::Email => "email",
            InputType::Tel => "tel",
            InputType::Number => "number",
        }
    }
}

/// Text drawn before or after the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adornment {
    None,
    Prefix(&'static str),
    Suffix(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    SingleLine {
        input_type: InputType,
        adornment: Adornment,
        /// Monospace with wide letter spacing, one box per character.
        letter_spaced: bool,
    },
    MultiLine {
        rows: u32,
    },
    Checkbox,
    RadioGroup {
        options: Vec<RadioOption>,
    },
}

/// Everything needed to draw one field's control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSpec {
    pub field_id: String,
    pub label: String,
    pub kind: ControlKind,
    pub required: bool,
}

pub const MULTILINE_ROWS: u32 = 4;

/// Values offered by a radio group whose schema does not list any.
pub const DEFAULT_RADIO_VALUES: [&str; 3] = ["option1", "option2", "option3"];

fn single_line(input_type: InputType) -> ControlKind {
    ControlKind::SingleLine {
        input_type,
        adornment: Adornment::None,
        letter_spaced: false,
    }
}

fn radio_options(field: &FieldDescriptor) -> Vec<RadioOption> {
    if field.options.is_empty() {
        DEFAULT_RADIO_VALUES
            .iter()
            .enumerate()
            .map(|(idx, value)| RadioOption {
                value: value.to_string(),
                label: format!("Option {}", idx + 1),
            })
            .collect()
    } else {
        field
            .options
            .iter()
            .map(|option| RadioOption {
                value: option.value.clone(),
                label: option.label.clone(),
            })
            .collect()
    }
}

pub fn control_for(field: &FieldDescriptor) -> ControlSpec {
    let mut label = field.name.clone();
    let kind = match &field.kind {
        FieldKind::ShortText | FieldKind::FullName | FieldKind::UsAddress => {
            single_line(InputType::Text)
        }
        FieldKind::LongText | FieldKind::TextWrap => ControlKind::MultiLine {
            rows: MULTILINE_ROWS,
        },
        FieldKind::Date => single_line(InputType::Date),
        FieldKind::Email => single_line(InputType::Email),
        FieldKind::Phone => single_line(InputType::Tel),
        FieldKind::Number => single_line(InputType::Number),
        FieldKind::Dollar => ControlKind::SingleLine {
            input_type: InputType::Number,
            adornment: Adornment::Prefix("$"),
            letter_spaced: false,
        },
        FieldKind::Percent => ControlKind::SingleLine {
            input_type: InputType::Number,
            adornment: Adornment::Suffix("%"),
            letter_spaced: false,
        },
        FieldKind::CharList => ControlKind::SingleLine {
            input_type: InputType::Text,
            adornment: Adornment::None,
            letter_spaced: true,
        },
        FieldKind::Checkbox => ControlKind::Checkbox,
        FieldKind::RadioGroup => ControlKind::RadioGroup {
            options: radio_options(field),
        },
        FieldKind::Unknown(tag) => {
            label = format!("{} (type: {})", field.name, tag);
            single_line(InputType::Text)
        }
    };
    ControlSpec {
        field_id: field.id.clone(),
        label,
        kind,
        required: field.required,
    }
}

/// One control per field, in schema order.
pub fn build_form(fields: &[FieldDescriptor]) -> Vec<ControlSpec> {
    fields.iter().map(control_for).collect()
}

/// Raw value coming out of a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Checked(bool),
}

/// A change event from the shared handler: which field, and what it now holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field_id: String,
    pub input: FieldInput,
}

/// Converts control input into the value stored for a field of `kind`.
/// Checkboxes always store a boolean; every other kind stores the raw string.
pub fn value_for(kind: &FieldKind, input: FieldInput) -> FieldValue {
    match (kind, input) {
        (FieldKind::Checkbox, FieldInput::Checked(checked)) => FieldValue::Bool(checked),
        (FieldKind::Checkbox, FieldInput::Text(raw)) => {
            FieldValue::Bool(matches!(raw.as_str(), "true" | "on"))
        }
        (_, FieldInput::Text(raw)) => FieldValue::Text(raw),
        (_, FieldInput::Checked(checked)) => FieldValue::Text(checked.to_string()),
    }
}

/// Applies a change to the draft. Changes for ids outside the schema are ignored.
pub fn apply_change(draft: &mut FormDraft, fields: &[FieldDescriptor], change: FieldChange) -> bool {
    let Some(field) = fields.iter().find(|f| f.id == change.field_id) else {
        log::warn!("ignoring input for unknown field `{}`", change.field_id);
        return false;
    };
    draft.set(change.field_id, value_for(&field.kind, change.input));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::FieldOption;

    fn field(id: &str, name: &str, kind: FieldKind) -> FieldDescriptor {
        FieldDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            required: false,
            options: Vec::new(),
        }
    }

    fn all_kinds() -> Vec<FieldDescriptor> {
        FieldKind::KNOWN
            .into_iter()
            .chain([FieldKind::Unknown("signature".into())])
            .enumerate()
            .map(|(idx, kind)| field(&format!("f{idx}"), &format!("Field {idx}"), kind))
            .collect()
    }

    #[test]
    fn one_control_per_field_id() {
        let fields = all_kinds();
        let controls = build_form(&fields);
        assert_eq!(controls.len(), fields.len());
        for (control, field) in controls.iter().zip(&fields) {
            assert_eq!(control.field_id, field.id);
        }
    }

    #[test]
    fn text_family_maps_to_single_line() {
        for kind in [FieldKind::ShortText, FieldKind::FullName, FieldKind::UsAddress] {
            assert_eq!(
                control_for(&field("a", "A", kind)).kind,
                single_line(InputType::Text)
            );
        }
        assert_eq!(
            control_for(&field("a", "A", FieldKind::TextWrap)).kind,
            ControlKind::MultiLine { rows: 4 }
        );
        assert_eq!(
            control_for(&field("a", "A", FieldKind::Phone)).kind,
            single_line(InputType::Tel)
        );
    }

    #[test]
    fn money_and_percent_are_decorated_numbers() {
        let dollar = control_for(&field("d", "Price", FieldKind::Dollar));
        assert_eq!(
            dollar.kind,
            ControlKind::SingleLine {
                input_type: InputType::Number,
                adornment: Adornment::Prefix("$"),
                letter_spaced: false
            }
        );
        let percent = control_for(&field("p", "Rate", FieldKind::Percent));
        assert!(matches!(
            percent.kind,
            ControlKind::SingleLine {
                adornment: Adornment::Suffix("%"),
                ..
            }
        ));
        let chars = control_for(&field("c", "Code", FieldKind::CharList));
        assert!(matches!(
            chars.kind,
            ControlKind::SingleLine {
                letter_spaced: true,
                ..
            }
        ));
    }

    #[test]
    fn unknown_tag_gets_annotated_text_input() {
        let control = control_for(&field("s", "Signature", FieldKind::Unknown("signature".into())));
        assert_eq!(control.label, "Signature (type: signature)");
        assert_eq!(control.kind, single_line(InputType::Text));
    }

    #[test]
    fn radio_group_uses_schema_options_or_defaults() {
        let control = control_for(&field("r", "Choice", FieldKind::RadioGroup));
        let ControlKind::RadioGroup { options } = control.kind else {
            panic!("expected radio group");
        };
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "option1");
        assert_eq!(options[2].label, "Option 3");

        let mut with_options = field("r", "Choice", FieldKind::RadioGroup);
        with_options.options = vec![
            FieldOption::new("Yes"),
            FieldOption {
                value: "no".into(),
                label: "No".into(),
            },
        ];
        let ControlKind::RadioGroup { options } = control_for(&with_options).kind else {
            panic!("expected radio group");
        };
        assert_eq!(
            options.iter().map(|o| o.value.as_str()).collect::<Vec<_>>(),
            ["Yes", "no"]
        );
        assert_eq!(options[1].label, "No");
    }

    #[test]
    fn checkbox_stores_boolean_never_string() {
        let fields = vec![field("agree", "Agree", FieldKind::Checkbox)];
        let mut draft = FormDraft::new();
        apply_change(
            &mut draft,
            &fields,
            FieldChange {
                field_id: "agree".into(),
                input: FieldInput::Checked(true),
            },
        );
        assert_eq!(draft.get("agree"), Some(&FieldValue::Bool(true)));

        apply_change(
            &mut draft,
            &fields,
            FieldChange {
                field_id: "agree".into(),
                input: FieldInput::Text("false".into()),
            },
        );
        assert_eq!(draft.get("agree"), Some(&FieldValue::Bool(false)));
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"agree": false})
        );
    }

    #[test]
    fn editing_touches_only_that_field() {
        let fields = all_kinds();
        let mut draft = FormDraft::new();
        for f in &fields {
            draft.set(f.id.clone(), value_for(&f.kind, FieldInput::Text(String::new())));
        }
        let before = draft.clone();

        apply_change(
            &mut draft,
            &fields,
            FieldChange {
                field_id: "f0".into(),
                input: FieldInput::Text("Jane".into()),
            },
        );
        for (id, value) in draft.iter() {
            if id == "f0" {
                assert_eq!(value, &FieldValue::Text("Jane".into()));
            } else {
                assert_eq!(Some(value), before.get(id));
            }
        }
        assert_eq!(draft.len(), before.len());
    }

    #[test]
    fn change_for_unknown_field_is_ignored() {
        let fields = vec![field("f1", "Name", FieldKind::ShortText)];
        let mut draft = FormDraft::new();
        let applied = apply_change(
            &mut draft,
            &fields,
            FieldChange {
                field_id: "nope".into(),
                input: FieldInput::Text("x".into()),
            },
        );
        assert!(!applied);
        assert!(draft.is_empty());
    }
}
