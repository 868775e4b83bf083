// src/common/pagination.rs

use chrono::{DateTime, Utc};

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Normaliza o `limit` vindo da query string para 1..=MAX_LIMIT.
pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// Tamanho do conjunto filtrado, antes do cursor e do limite.
    pub total: usize,
    pub has_more: bool,
}

/// Aplica cursor (`before`, exclusivo) e limite a uma lista já filtrada e
/// ordenada do mais novo para o mais antigo.
pub fn paginate<T, F>(
    items: Vec<T>,
    before: Option<DateTime<Utc>>,
    limit: Option<u32>,
    created_at: F,
) -> PageSlice<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let total = items.len();
    let limit = clamp_limit(limit) as usize;

    let mut remaining: Vec<T> = items
        .into_iter()
        .filter(|item| before.is_none_or(|cursor| created_at(item) < cursor))
        .collect();

    let has_more = remaining.len() > limit;
    remaining.truncate(limit);

    PageSlice {
        items: remaining,
        total,
        has_more,
    }
}
