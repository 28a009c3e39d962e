use super::*;
use crate::config::ChatSettings;

fn form() -> ChatForm {
    ChatForm {
        title: "  Rust mentor ".into(),
        description: "   ".into(),
        context: "You review Rust code.".into(),
        model: "gpt-4".into(),
        temperature: 0.3,
    }
}

#[test]
fn valid_form_produces_trimmed_draft() {
    let draft = form().validate(&ChatSettings::default()).into_result().unwrap();
    assert_eq!(draft.title, "Rust mentor");
    assert_eq!(draft.description, None);
    assert_eq!(draft.model.as_str(), "gpt-4");
    assert_eq!(draft.temperature.value(), 0.3);
}

#[test]
fn every_failing_field_is_reported_in_order() {
    let bad = ChatForm {
        title: " ".into(),
        description: "d".repeat(501),
        context: String::new(),
        model: "davinci".into(),
        temperature: f32::NAN,
    };
    let validation = bad.validate(&ChatSettings::default());
    assert!(!validation.is_valid());

    let fields: Vec<Field> = validation.errors().iter().map(|e| e.field).collect();
    assert_eq!(
        fields,
        vec![
            Field::Title,
            Field::Description,
            Field::Context,
            Field::Model,
            Field::Temperature
        ]
    );
    assert_eq!(validation.errors()[0].problem, FieldProblem::Required);
    assert_eq!(validation.errors()[1].problem, FieldProblem::TooLong { max: 500 });
    assert_eq!(
        validation.errors()[3].problem,
        FieldProblem::UnknownModel {
            name: "davinci".into()
        }
    );
}

#[test]
fn temperature_bounds_are_inclusive() {
    let settings = ChatSettings::default();
    for t in [0.0, 2.0] {
        assert!(ChatForm { temperature: t, ..form() }.validate(&settings).is_valid());
    }
    for t in [-0.1, 2.01, f32::INFINITY] {
        let validation = ChatForm { temperature: t, ..form() }.validate(&settings);
        assert_eq!(validation.errors().len(), 1);
        assert_eq!(validation.errors()[0].field, Field::Temperature);
    }
}

#[test]
fn length_limits_count_characters() {
    let settings = ChatSettings {
        max_title_len: 3,
        ..ChatSettings::default()
    };
    assert!(ChatForm { title: "äöü".into(), ..form() }.validate(&settings).is_valid());
    let validation = ChatForm { title: "äöüß".into(), ..form() }.validate(&settings);
    assert_eq!(validation.errors()[0].problem, FieldProblem::TooLong { max: 3 });
}

#[test]
fn field_errors_read_like_messages() {
    let err = FieldError {
        field: Field::Temperature,
        problem: FieldProblem::OutOfRange { min: 0.0, max: 2.0 },
    };
    assert_eq!(err.to_string(), "temperature must be between 0 and 2");

    let json = serde_json::to_value(FieldError {
        field: Field::Title,
        problem: FieldProblem::Required,
    })
    .unwrap();
    assert_eq!(json, serde_json::json!({"field": "title", "problem": "required"}));
}

#[test]
fn create_and_edit_round_through_the_form() {
    let settings = ChatSettings::default();
    let draft = form().validate(&settings).into_result().unwrap();
    let mut chat = Chat::create(draft);
    assert_eq!(chat.created_at, chat.updated_at);

    let mut edit = ChatForm::from_chat(&chat);
    assert_eq!(edit.title, "Rust mentor");
    assert_eq!(edit.description, "");
    edit.description = "Strict but fair".into();

    let id = chat.id;
    chat.apply(edit.validate(&settings).into_result().unwrap());
    assert_eq!(chat.id, id);
    assert_eq!(chat.description.as_deref(), Some("Strict but fair"));
    assert!(chat.updated_at >= chat.created_at);
}

#[test]
fn chat_serializes_for_the_backend() {
    let chat = Chat::create(form().validate(&ChatSettings::default()).into_result().unwrap());
    let json = serde_json::to_value(&chat).unwrap();
    assert_eq!(json["id"], serde_json::json!(chat.id.to_string()));
    assert_eq!(json["model"], "gpt-4");
    assert!(json.get("description").is_none());

    let back: Chat = serde_json::from_value(json).unwrap();
    assert_eq!(back, chat);
}

#[test]
fn out_of_range_temperature_is_rejected_on_load() {
    assert!(serde_json::from_str::<Temperature>("5.0").is_err());
    assert!(serde_json::from_str::<Temperature>("-0.1").is_err());
    let t: Temperature = serde_json::from_str("1.5").unwrap();
    assert_eq!(t.value(), 1.5);
    assert_eq!(serde_json::to_string(&t).unwrap(), "1.5");
    assert_eq!(Temperature::try_from(2.5), Err(TemperatureOutOfRange(2.5)));

    let chat = Chat::create(form().validate(&ChatSettings::default()).into_result().unwrap());
    let mut json = serde_json::to_value(&chat).unwrap();
    json["temperature"] = serde_json::json!(9.0);
    assert!(serde_json::from_value::<Chat>(json).is_err());
}

#[test]
fn loaded_model_names_are_checked_against_the_configured_list() {
    let settings = ChatSettings::default();
    let foreign: ModelChoice = serde_json::from_str("\"not-configured\"").unwrap();
    assert!(!foreign.is_available(&settings.models));
    let known = ModelChoice::select("gpt-4", &settings.models).unwrap();
    assert!(known.is_available(&settings.models));
}

#[test]
fn blank_form_uses_configured_defaults() {
    let settings = ChatSettings::default();
    let blank = ChatForm::blank(&settings);
    assert_eq!(blank.model, settings.default_model);
    assert_eq!(blank.temperature, settings.default_temperature);
    assert!(!blank.validate(&settings).is_valid());
}

#[test]
fn builtin_templates_prefill_valid_forms() {
    let settings = ChatSettings::default();
    for template in ChatTemplate::builtin() {
        assert!(template.to_form(&settings).validate(&settings).is_valid(), "{}", template.name);
    }
    assert!(ChatTemplate::find("reasoning-agent").is_some());
    assert!(ChatTemplate::find("missing").is_none());
}
