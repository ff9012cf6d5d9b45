use crate::db::log::ttlog_soft;
use crate::db::participants::{
    delete_participant, insert_participant, load_participant, load_participants,
};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Participant, new_id};

#[derive(Debug, Clone, Default)]
pub struct ParticipantInput {
    pub name: String,
    pub roles: Vec<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub languages: Vec<String>,
}

pub struct ParticipantLogic;

impl ParticipantLogic {
    pub fn add(pool: &mut DbPool, input: ParticipantInput) -> AppResult<Participant> {
        if input.name.trim().is_empty() {
            return Err(AppError::Other("Participant name cannot be empty".into()));
        }

        let p = Participant {
            id: new_id(),
            name: input.name.trim().to_string(),
            roles: input.roles,
            email: input.email,
            phone: input.phone,
            languages: input.languages,
            assigned_block_ids: Vec::new(),
        };
        insert_participant(&pool.conn, &p)?;

        ttlog_soft(&pool.conn, "add", &p.id, &format!("Participant '{}' created", p.name));
        Ok(p)
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Participant>> {
        load_participants(&pool.conn)
    }

    /// The participant with `assigned_block_ids` derived from the blocks.
    pub fn get(pool: &DbPool, id: &str) -> AppResult<Participant> {
        load_participant(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Participant", id))
    }

    pub fn delete(pool: &mut DbPool, id: &str) -> AppResult<Participant> {
        let p = Self::get(pool, id)?;
        delete_participant(&pool.conn, id)?;
        ttlog_soft(&pool.conn, "del", id, &format!("Participant '{}' deleted", p.name));
        Ok(p)
    }
}
