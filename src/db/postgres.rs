// src/db/postgres.rs
//
// Implementação SQL da camada de dados. Cada operação abre uma transação
// "escopada" ao tenant: `app.tenant_id` e o `search_path` valem só dentro
// dela (set_config com is_local = true), e toda consulta ainda filtra por
// `tenant_id` explicitamente.

use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    common::error::AppError,
    db::{DataMode, Repository},
    models::{content::Author, tenancy::Tenant},
};

mod chat;
mod directory;
mod docs;
mod feed;
mod forms;
mod meetings;
mod tasks;

#[derive(Clone)]
pub struct SqlRepository {
    pool: PgPool,
}

impl SqlRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Abre uma transação com o contexto do tenant aplicado.
    pub(crate) async fn begin_scoped(
        &self,
        tenant: &Tenant,
    ) -> Result<Transaction<'static, Postgres>, AppError> {
        let mut tx = self.pool.begin().await?;

        // O schema já foi validado como identificador em `Tenant::parse`.
        let search_path = format!("{}, public", tenant.schema);
        sqlx::query(
            r#"
            SELECT set_config('app.tenant_id', $1, true),
                   set_config('search_path', $2, true)
            "#,
        )
        .bind(&tenant.id)
        .bind(&search_path)
        .execute(&mut *tx)
        .await?;

        Ok(tx)
    }
}

impl Repository for SqlRepository {
    fn mode(&self) -> DataMode {
        DataMode::Sql
    }
}

// Colunas desnormalizadas de autor ({prefixo}_id, _name, _avatar_url)
pub(crate) fn author(id: uuid::Uuid, name: String, avatar_url: Option<String>) -> Author {
    Author {
        id,
        name,
        avatar_url,
    }
}

/// Resolve ids do diretório do tenant mantendo a ordem pedida.
/// Id desconhecido é erro do cliente.
pub(crate) async fn resolve_authors(
    tx: &mut Transaction<'static, Postgres>,
    tenant: &Tenant,
    ids: &[uuid::Uuid],
) -> Result<Vec<Author>, AppError> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let rows: Vec<(uuid::Uuid, String, Option<String>)> = sqlx::query_as(
        r#"
        SELECT id, name, avatar_url
        FROM users
        WHERE tenant_id = $1 AND id = ANY($2)
        "#,
    )
    .bind(&tenant.id)
    .bind(ids)
    .fetch_all(&mut **tx)
    .await?;

    ids.iter()
        .map(|id| {
            rows.iter()
                .find(|(row_id, _, _)| row_id == id)
                .map(|(id, name, avatar_url)| author(*id, name.clone(), avatar_url.clone()))
                .ok_or_else(|| AppError::BadRequest(format!("usuário desconhecido {id}")))
        })
        .collect()
}
