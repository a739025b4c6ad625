//! SQLite persistence layer.
//!
//! RULE: Only this module talks to the database. Engine code calls
//! store methods — it never executes SQL directly.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings
//! (microsecond precision, "Z" suffix) so lexicographic comparison in
//! SQL matches chronological order.

use crate::{
    complaint::{ComplaintRecord, Status},
    error::{TriageError, TriageResult},
    event::EventLogEntry,
    severity::Severity,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

pub struct TriageStore {
    conn: Connection,
}

impl TriageStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> TriageResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> TriageResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> TriageResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_triage.sql"))?;
        Ok(())
    }

    // ── Complaint ──────────────────────────────────────────────────

    pub fn insert_complaint(&self, c: &ComplaintRecord) -> TriageResult<()> {
        self.conn.execute(
            "INSERT INTO complaint (
                complaint_id, user_id, title, description, category, location,
                severity, status, priority_score, created_at, updated_at, sla_deadline
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                &c.complaint_id,
                &c.user_id,
                &c.title,
                &c.description,
                &c.category,
                &c.location,
                c.severity.as_str(),
                c.status.as_str(),
                c.priority_score,
                ts_to_sql(c.created_at),
                ts_to_sql(c.updated_at),
                ts_to_sql(c.sla_deadline),
            ],
        )?;
        Ok(())
    }

    pub fn get_complaint(&self, complaint_id: &str) -> TriageResult<ComplaintRecord> {
        self.conn
            .query_row(
                &format!("{COMPLAINT_SELECT} WHERE complaint_id = ?1"),
                params![complaint_id],
                complaint_row_mapper,
            )
            .optional()?
            .ok_or_else(|| TriageError::ComplaintNotFound {
                id: complaint_id.to_string(),
            })
    }

    /// The staff work queue: every complaint, highest priority first.
    pub fn queue(&self) -> TriageResult<Vec<ComplaintRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMPLAINT_SELECT} ORDER BY priority_score DESC, created_at ASC"
        ))?;
        let rows = stmt.query_map([], complaint_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn complaints_for_user(&self, user_id: &str) -> TriageResult<Vec<ComplaintRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMPLAINT_SELECT} WHERE user_id = ?1
             ORDER BY priority_score DESC, created_at ASC"
        ))?;
        let rows = stmt.query_map(params![user_id], complaint_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Complaints past their SLA deadline that are still actionable.
    /// RESOLVED and ESCALATED are terminal for the sweep.
    pub fn overdue_complaints(&self, now: DateTime<Utc>) -> TriageResult<Vec<ComplaintRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMPLAINT_SELECT}
             WHERE status NOT IN ('RESOLVED', 'ESCALATED') AND sla_deadline < ?1
             ORDER BY sla_deadline ASC"
        ))?;
        let rows = stmt.query_map(params![ts_to_sql(now)], complaint_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Escalate in a single guarded UPDATE: status and score move
    /// together, and the status predicate makes the write a no-op if a
    /// concurrent sweep (or a manual resolve) got there first. Returns
    /// the new score, or None when the row was no longer eligible.
    pub fn escalate_complaint(
        &self,
        complaint_id: &str,
        boost: i64,
        now: DateTime<Utc>,
    ) -> TriageResult<Option<i64>> {
        let changed = self.conn.execute(
            "UPDATE complaint
             SET status = 'ESCALATED',
                 priority_score = priority_score + ?2,
                 updated_at = ?3
             WHERE complaint_id = ?1
               AND status NOT IN ('RESOLVED', 'ESCALATED')",
            params![complaint_id, boost, ts_to_sql(now)],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        let new_score = self.conn.query_row(
            "SELECT priority_score FROM complaint WHERE complaint_id = ?1",
            params![complaint_id],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(Some(new_score))
    }

    pub fn update_status(
        &self,
        complaint_id: &str,
        status: Status,
        now: DateTime<Utc>,
    ) -> TriageResult<ComplaintRecord> {
        let changed = self.conn.execute(
            "UPDATE complaint SET status = ?2, updated_at = ?3 WHERE complaint_id = ?1",
            params![complaint_id, status.as_str(), ts_to_sql(now)],
        )?;
        if changed == 0 {
            return Err(TriageError::ComplaintNotFound {
                id: complaint_id.to_string(),
            });
        }
        self.get_complaint(complaint_id)
    }

    /// created_at timestamps of the most recent complaints, newest
    /// first. Feeds the trend analyzer.
    pub fn recent_created_at(&self, limit: u32) -> TriageResult<Vec<DateTime<Utc>>> {
        let mut stmt = self.conn.prepare(
            "SELECT created_at FROM complaint ORDER BY created_at DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            let raw: String = row.get(0)?;
            parse_ts(0, &raw)
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn complaint_count(&self) -> TriageResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM complaint", [], |row| row.get(0))
            .map_err(Into::into)
    }

    // ── Audit log ──────────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> TriageResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (complaint_id, event_type, payload, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                &entry.complaint_id,
                &entry.event_type,
                &entry.payload,
                ts_to_sql(entry.created_at),
            ],
        )?;
        Ok(())
    }

    pub fn events_for_complaint(&self, complaint_id: &str) -> TriageResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, complaint_id, event_type, payload, created_at
             FROM event_log WHERE complaint_id = ?1
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![complaint_id], |row| {
            let raw: String = row.get(4)?;
            Ok(EventLogEntry {
                id: Some(row.get(0)?),
                complaint_id: row.get(1)?,
                event_type: row.get(2)?,
                payload: row.get(3)?,
                created_at: parse_ts(4, &raw)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

const COMPLAINT_SELECT: &str = "SELECT complaint_id, user_id, title, description, category, \
     location, severity, status, priority_score, created_at, updated_at, sla_deadline \
     FROM complaint";

fn complaint_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<ComplaintRecord> {
    let severity_raw: String = row.get(6)?;
    let status_raw: String = row.get(7)?;
    let created_raw: String = row.get(9)?;
    let updated_raw: String = row.get(10)?;
    let deadline_raw: String = row.get(11)?;
    Ok(ComplaintRecord {
        complaint_id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        location: row.get(5)?,
        severity: Severity::from_label(&severity_raw)
            .ok_or_else(|| conversion_error(6, &severity_raw))?,
        status: Status::from_label(&status_raw)
            .ok_or_else(|| conversion_error(7, &status_raw))?,
        priority_score: row.get(8)?,
        created_at: parse_ts(9, &created_raw)?,
        updated_at: parse_ts(10, &updated_raw)?,
        sla_deadline: parse_ts(11, &deadline_raw)?,
    })
}

fn ts_to_sql(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(column: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

fn conversion_error(column: usize, raw: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        format!("unrecognized value '{raw}'").into(),
    )
}
