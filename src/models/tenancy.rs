// src/models/tenancy.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const DEFAULT_SCHEMA: &str = "public";

const MAX_TENANT_ID_LEN: usize = 64;
const MAX_SCHEMA_LEN: usize = 63;

// ---
// Tenant (o "Espaço de Trabalho")
// ---
// Reconstruído a cada requisição a partir dos cabeçalhos ou do token.
// Nunca é guardado em cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tenant {
    #[schema(example = "acme")]
    pub id: String,
    #[schema(example = "public")]
    pub schema: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TenantError {
    #[error("o id do tenant não pode ser vazio")]
    EmptyId,
    #[error("id de tenant '{0}' deve ter até 64 caracteres de [A-Za-z0-9_-]")]
    InvalidId(String),
    #[error("schema '{0}' não é um identificador SQL válido")]
    InvalidSchema(String),
}

impl Tenant {
    /// Valida o id e o schema. Schema ausente ou vazio vira `public`.
    pub fn parse(id: &str, schema: Option<&str>) -> Result<Self, TenantError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(TenantError::EmptyId);
        }
        let valid_id = id.len() <= MAX_TENANT_ID_LEN
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_id {
            return Err(TenantError::InvalidId(id.to_string()));
        }

        let schema = match schema.map(str::trim) {
            None | Some("") => DEFAULT_SCHEMA,
            Some(s) => s,
        };
        if !is_sql_identifier(schema) {
            return Err(TenantError::InvalidSchema(schema.to_string()));
        }

        Ok(Self {
            id: id.to_string(),
            schema: schema.to_string(),
        })
    }
}

// O schema vai para o search_path, então só aceitamos identificadores simples.
fn is_sql_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    value.len() <= MAX_SCHEMA_LEN
        && (first.is_ascii_lowercase() || first == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_defaults_to_public() {
        let tenant = Tenant::parse("t1", None).expect("tenant");
        assert_eq!(tenant.schema, DEFAULT_SCHEMA);
        let tenant = Tenant::parse("t1", Some("  ")).expect("tenant");
        assert_eq!(tenant.schema, DEFAULT_SCHEMA);
    }

    #[test]
    fn keeps_explicit_schema() {
        let tenant = Tenant::parse("t1", Some("s1")).expect("tenant");
        assert_eq!(
            tenant,
            Tenant {
                id: "t1".into(),
                schema: "s1".into()
            }
        );
    }

    #[test]
    fn rejects_bad_ids_and_schemas() {
        assert_eq!(Tenant::parse("  ", None), Err(TenantError::EmptyId));
        assert!(matches!(
            Tenant::parse("acme corp", None),
            Err(TenantError::InvalidId(_))
        ));
        assert!(matches!(
            Tenant::parse("acme", Some("public; drop table posts")),
            Err(TenantError::InvalidSchema(_))
        ));
        assert!(matches!(
            Tenant::parse("acme", Some("9tenant")),
            Err(TenantError::InvalidSchema(_))
        ));
    }
}
