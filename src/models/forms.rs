// src/models/forms.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::content::Author;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "form_field_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    ShortText,
    LongText,
    SingleChoice,
    MultipleChoice,
    Number,
    Date,
    Rating,
}

impl FieldType {
    pub fn has_options(self) -> bool {
        matches!(self, FieldType::SingleChoice | FieldType::MultipleChoice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct FormField {
    pub id: Uuid,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Form {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FormField>,
    pub response_count: i64,
    pub is_published: bool,
    pub created_by: Author,
    pub created_at: DateTime<Utc>,
}

impl Form {
    /// Ids dos campos obrigatórios sem resposta (ausentes, nulos ou texto vazio).
    pub fn missing_required(&self, answers: &serde_json::Map<String, Value>) -> Vec<Uuid> {
        self.fields
            .iter()
            .filter(|field| field.required)
            .filter(|field| match answers.get(&field.id.to_string()) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(Value::Array(items)) => items.is_empty(),
                Some(_) => false,
            })
            .map(|field| field.id)
            .collect()
    }

    /// Campos de escolha cuja resposta não está entre as opções.
    /// Resposta ausente ou nula fica com `missing_required`.
    pub fn invalid_choices(&self, answers: &serde_json::Map<String, Value>) -> Vec<Uuid> {
        self.fields
            .iter()
            .filter(|field| field.field_type.has_options())
            .filter(|field| {
                let allowed = |v: &Value| v.as_str().is_some_and(|s| field.options.iter().any(|o| o == s));
                match answers.get(&field.id.to_string()) {
                    None | Some(Value::Null) => false,
                    Some(Value::Array(items)) if field.field_type == FieldType::MultipleChoice => {
                        !items.iter().all(allowed)
                    }
                    Some(answer) => field.field_type == FieldType::MultipleChoice || !allowed(answer),
                }
            })
            .map(|field| field.id)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FormResponse {
    pub id: Uuid,
    pub form_id: Uuid,
    pub respondent: Author,
    /// Chave = id do campo.
    #[schema(value_type = Object)]
    pub answers: Value,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewFormField {
    #[validate(length(min = 1, max = 200, message = "O rótulo do campo é obrigatório."))]
    pub label: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFormPayload {
    #[validate(length(min = 1, max = 200, message = "O título do formulário é obrigatório."))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "O formulário precisa de pelo menos um campo."))]
    #[validate(nested)]
    pub fields: Vec<NewFormField>,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct NewForm {
    pub created_by: Author,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FormField>,
    pub is_published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitResponsePayload {
    /// Chave = id do campo.
    #[schema(value_type = Object)]
    #[validate(custom(function = "answer_keys_are_field_ids"))]
    pub answers: serde_json::Map<String, Value>,
}

fn answer_keys_are_field_ids(answers: &serde_json::Map<String, Value>) -> Result<(), ValidationError> {
    if answers.keys().all(|key| Uuid::parse_str(key).is_ok()) {
        Ok(())
    } else {
        Err(ValidationError::new("answer_keys")
            .with_message("As respostas devem ser indexadas pelo id do campo.".into()))
    }
}

#[derive(Debug, Clone)]
pub struct NewFormResponse {
    pub respondent: Author,
    pub answers: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form_with(fields: Vec<FormField>) -> Form {
        Form {
            id: Uuid::new_v4(),
            title: "Pulse".into(),
            description: None,
            fields,
            response_count: 0,
            is_published: true,
            created_by: Author {
                id: Uuid::new_v4(),
                name: "Sarah".into(),
                avatar_url: None,
            },
            created_at: Utc::now(),
        }
    }

    fn field(required: bool) -> FormField {
        FormField {
            id: Uuid::new_v4(),
            label: "Q".into(),
            field_type: FieldType::ShortText,
            required,
            options: vec![],
        }
    }

    #[test]
    fn blank_and_missing_required_answers_are_reported() {
        let (a, b, optional) = (field(true), field(true), field(false));
        let form = form_with(vec![a.clone(), b.clone(), optional]);

        let answers = json!({ a.id.to_string(): "  " });
        let missing = form.missing_required(answers.as_object().expect("object"));
        assert_eq!(missing, vec![a.id, b.id]);

        let answers = json!({ a.id.to_string(): "yes", b.id.to_string(): 4 });
        assert!(form
            .missing_required(answers.as_object().expect("object"))
            .is_empty());
    }

    fn choice(field_type: FieldType) -> FormField {
        FormField {
            field_type,
            options: vec!["Product".into(), "Design".into()],
            ..field(false)
        }
    }

    #[test]
    fn choice_answers_must_come_from_the_options() {
        let (single, multi) = (choice(FieldType::SingleChoice), choice(FieldType::MultipleChoice));
        let form = form_with(vec![single.clone(), multi.clone(), field(false)]);

        let answers = json!({ single.id.to_string(): "Design", multi.id.to_string(): ["Product", "Design"] });
        assert!(form.invalid_choices(answers.as_object().expect("object")).is_empty());

        let answers = json!({ single.id.to_string(): "Marketing", multi.id.to_string(): ["Product", "Sales"] });
        assert_eq!(form.invalid_choices(answers.as_object().expect("object")), vec![single.id, multi.id]);

        let answers = json!({ single.id.to_string(): ["Design"], multi.id.to_string(): "Design" });
        assert_eq!(form.invalid_choices(answers.as_object().expect("object")), vec![single.id, multi.id]);

        let answers = json!({ single.id.to_string(): null });
        assert!(form.invalid_choices(answers.as_object().expect("object")).is_empty());
    }

    #[test]
    fn answers_keyed_by_anything_but_a_field_id_fail_validation() {
        let payload = SubmitResponsePayload {
            answers: json!({ "mood": 5 }).as_object().expect("object").clone(),
        };
        assert!(payload.validate().is_err());

        let payload = SubmitResponsePayload {
            answers: json!({ Uuid::new_v4().to_string(): 5 }).as_object().expect("object").clone(),
        };
        assert!(payload.validate().is_ok());
    }
}
