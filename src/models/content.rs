// src/models/content.rs
//
// Formatos aninhados compartilhados por posts, mensagens, documentos etc.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::users::User;

// Quem escreveu (snapshot do usuário no momento da criação)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: Uuid,
    #[schema(example = "Sarah Chen")]
    pub name: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Attachment {
    pub id: Uuid,
    #[schema(example = "roadmap.pdf")]
    pub name: String,
    pub url: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reaction {
    #[schema(example = "🎉")]
    pub emoji: String,
    pub count: i64,
    pub user_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewAttachment {
    #[validate(length(min = 1, max = 255, message = "O nome do anexo é obrigatório."))]
    pub name: String,
    #[validate(url(message = "A URL do anexo é inválida."))]
    pub url: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<i64>,
}

impl NewAttachment {
    pub fn into_attachment(self) -> Attachment {
        Attachment {
            id: Uuid::new_v4(),
            name: self.name,
            url: self.url,
            mime_type: self.mime_type,
            size_bytes: self.size_bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReactionPayload {
    #[validate(length(min = 1, max = 16, message = "Emoji inválido."))]
    #[schema(example = "👍")]
    pub emoji: String,
}

/// Liga/desliga a reação de `user_id` com `emoji`, mantendo a ordem de
/// chegada das reações.
pub fn toggle_reaction(reactions: &mut Vec<Reaction>, user_id: Uuid, emoji: &str) {
    if let Some(pos) = reactions.iter().position(|r| r.emoji == emoji) {
        let reaction = &mut reactions[pos];
        if let Some(idx) = reaction.user_ids.iter().position(|id| *id == user_id) {
            reaction.user_ids.remove(idx);
        } else {
            reaction.user_ids.push(user_id);
        }
        reaction.count = reaction.user_ids.len() as i64;
        if reaction.count == 0 {
            reactions.remove(pos);
        }
    } else {
        reactions.push(Reaction {
            emoji: emoji.to_string(),
            count: 1,
            user_ids: vec![user_id],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_removes_the_reaction() {
        let user = Uuid::new_v4();
        let mut reactions = Vec::new();
        toggle_reaction(&mut reactions, user, "🎉");
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].count, 1);
        toggle_reaction(&mut reactions, user, "🎉");
        assert!(reactions.is_empty());
    }

    #[test]
    fn second_user_increments_count() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut reactions = Vec::new();
        toggle_reaction(&mut reactions, a, "👍");
        toggle_reaction(&mut reactions, b, "👍");
        assert_eq!(reactions[0].count, 2);
        assert_eq!(reactions[0].user_ids, vec![a, b]);
    }
}
