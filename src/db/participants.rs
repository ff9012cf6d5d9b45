use crate::db::blocks::block_ids_for_participant;
use crate::db::db_utils::{from_json_list, non_empty, to_json_list};
use crate::errors::AppResult;
use crate::models::Participant;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_participant(row: &Row) -> Result<Participant> {
    Ok(Participant {
        id: row.get("id")?,
        name: row.get("name")?,
        roles: from_json_list(row.get("roles")?),
        email: non_empty(row.get("email")?),
        phone: non_empty(row.get("phone")?),
        languages: from_json_list(row.get("languages")?),
        assigned_block_ids: Vec::new(),
    })
}

fn with_assignments(conn: &Connection, mut p: Participant) -> AppResult<Participant> {
    p.assigned_block_ids = block_ids_for_participant(conn, &p.id)?;
    Ok(p)
}

pub fn insert_participant(conn: &Connection, p: &Participant) -> AppResult<()> {
    conn.execute(
        "INSERT INTO participants (id, name, roles, email, phone, languages)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            p.id,
            p.name,
            to_json_list(&p.roles),
            p.email,
            p.phone,
            to_json_list(&p.languages),
        ],
    )?;
    Ok(())
}

/// All participants by name, with their assigned blocks derived from the
/// block participant lists.
pub fn load_participants(conn: &Connection) -> AppResult<Vec<Participant>> {
    let rows: Vec<Participant> = {
        let mut stmt = conn.prepare("SELECT * FROM participants ORDER BY name ASC")?;
        let rows = stmt.query_map([], map_participant)?;
        rows.collect::<Result<_>>()?
    };

    rows.into_iter().map(|p| with_assignments(conn, p)).collect()
}

pub fn load_participant(conn: &Connection, id: &str) -> AppResult<Option<Participant>> {
    let p = conn
        .query_row(
            "SELECT * FROM participants WHERE id = ?1",
            [id],
            map_participant,
        )
        .optional()?;

    p.map(|p| with_assignments(conn, p)).transpose()
}

pub fn participant_exists(conn: &Connection, id: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM participants WHERE id = ?1")?;
    Ok(stmt.exists([id])?)
}

/// Removes the participant from the roster, every block list and every
/// vehicle (as passenger; as driver the seat is left empty).
pub fn delete_participant(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM participants WHERE id = ?1", [id])?)
}
