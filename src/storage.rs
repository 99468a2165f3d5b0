use crate::api::models::StoryRecord;
use directories::ProjectDirs;
use rusqlite::{params, Connection};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionSummary {
    pub id: String,
    pub name: String,
    pub tel: String,
    pub submitted_at: i64,
}

fn db_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "example", "StorynestGtk")?;
    let dir = proj.data_dir().to_path_buf();
    Some(dir.join("journal.sqlite"))
}

fn ensure_dir(path: &PathBuf) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn open_conn() -> rusqlite::Result<Connection> {
    let path = db_path().ok_or_else(|| rusqlite::Error::InvalidPath("no data dir".into()))?;
    let _ = ensure_dir(&path);
    Connection::open(path)
}

// Local journal of stories that made it to the server. The store itself is
// never read back; this is what feeds the "Recent submissions" list.
pub fn init() -> Result<(), String> {
    let conn = open_conn().map_err(|e| e.to_string())?;
    init_schema(&conn)
}

fn init_schema(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS submissions (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            tel TEXT NOT NULL,
            email TEXT NOT NULL,
            submitted_at INTEGER NOT NULL,
            raw_json TEXT
        );
        "#,
    )
    .map_err(|e| e.to_string())
}

pub fn record_submission(id: &str, record: &StoryRecord) -> Result<(), String> {
    let conn = open_conn().map_err(|e| e.to_string())?;
    record_in(&conn, id, record)
}

fn record_in(conn: &Connection, id: &str, record: &StoryRecord) -> Result<(), String> {
    let raw = serde_json::to_string(record).map_err(|e| e.to_string())?;
    conn.execute(
        r#"
        INSERT INTO submissions (id, name, tel, email, submitted_at, raw_json)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(id) DO UPDATE SET
            name=excluded.name,
            tel=excluded.tel,
            email=excluded.email,
            submitted_at=excluded.submitted_at,
            raw_json=excluded.raw_json
        "#,
        params![id, record.name, record.tel, record.email, record.timestamp, raw],
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

pub fn recent_submissions(limit: Option<usize>) -> Result<Vec<SubmissionSummary>, String> {
    let conn = open_conn().map_err(|e| e.to_string())?;
    recent_in(&conn, limit)
}

fn recent_in(conn: &Connection, limit: Option<usize>) -> Result<Vec<SubmissionSummary>, String> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, tel, submitted_at FROM submissions ORDER BY submitted_at DESC, id ASC LIMIT ?1",
        )
        .map_err(|e| e.to_string())?;
    let lim = limit.unwrap_or(500) as i64;
    let rows = stmt
        .query_map(params![lim], |row| {
            Ok(SubmissionSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                tel: row.get(2)?,
                submitted_at: row.get(3)?,
            })
        })
        .map_err(|e| e.to_string())?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| e.to_string())?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::SubmissionInput;

    fn record(name: &str, tel: &str, ts: i64) -> StoryRecord {
        StoryRecord::from_input(
            &SubmissionInput {
                name: name.into(),
                number: tel.into(),
                email: "a@b.com".into(),
                address: "X".into(),
                message: "hi".into(),
            },
            ts,
        )
    }

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn journal_round_trips_a_submission() {
        let conn = test_conn();
        record_in(&conn, "s1", &record("A", "123", 1000)).unwrap();

        let rows = recent_in(&conn, None).unwrap();
        assert_eq!(
            rows,
            vec![SubmissionSummary {
                id: "s1".into(),
                name: "A".into(),
                tel: "123".into(),
                submitted_at: 1000,
            }]
        );
    }

    #[test]
    fn reads_come_back_newest_first() {
        let conn = test_conn();
        record_in(&conn, "old", &record("A", "1", 1000)).unwrap();
        record_in(&conn, "new", &record("B", "2", 2000)).unwrap();

        let ids: Vec<String> = recent_in(&conn, None).unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["new", "old"]);
    }

    #[test]
    fn recording_the_same_id_twice_replaces_the_row() {
        let conn = test_conn();
        record_in(&conn, "s1", &record("A", "1", 1000)).unwrap();
        record_in(&conn, "s1", &record("A2", "9", 3000)).unwrap();

        let rows = recent_in(&conn, None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "A2");
        assert_eq!(rows[0].submitted_at, 3000);
    }

    #[test]
    fn limit_caps_the_result() {
        let conn = test_conn();
        for i in 0..5 {
            record_in(&conn, &format!("s{i}"), &record("A", "1", i)).unwrap();
        }
        assert_eq!(recent_in(&conn, Some(2)).unwrap().len(), 2);
    }
}
