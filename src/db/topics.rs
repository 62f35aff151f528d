//! Topic CRUD and scheduler-fragment persistence

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::Topic;
use crate::revision::{CompletionUpdate, RevisionUpdate};

const TOPIC_COLUMNS: &str =
    "id, course_id, name, completed, completed_at, revision_count, last_revision_at, created_at";

pub fn insert_topic(conn: &Connection, topic: &Topic) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO topics (course_id, name, completed, completed_at, revision_count, last_revision_at, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
        params![
            topic.course_id,
            topic.name,
            topic.completed,
            topic.completed_at.map(|dt| dt.to_rfc3339()),
            topic.revision_count,
            topic.last_revision_at.map(|dt| dt.to_rfc3339()),
            topic.created_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_topic_by_id(conn: &Connection, id: i64) -> Result<Option<Topic>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM topics WHERE id = ?1",
        TOPIC_COLUMNS
    ))?;

    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_topic(row)?))
    } else {
        Ok(None)
    }
}

pub fn get_topics_by_course(conn: &Connection, course_id: i64) -> Result<Vec<Topic>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM topics WHERE course_id = ?1 ORDER BY name, id",
        TOPIC_COLUMNS
    ))?;

    let topics = stmt
        .query_map(params![course_id], row_to_topic)?
        .collect::<Result<Vec<_>>>()?;
    Ok(topics)
}

/// All topics across the hierarchy, for dashboard stats and chat context.
pub fn get_all_topics(conn: &Connection) -> Result<Vec<Topic>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM topics ORDER BY course_id, name, id",
        TOPIC_COLUMNS
    ))?;

    let topics = stmt
        .query_map([], row_to_topic)?
        .collect::<Result<Vec<_>>>()?;
    Ok(topics)
}

pub fn delete_topic(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM topics WHERE id = ?1", params![id])
}

/// Persist a completion toggle produced by the scheduler.
/// Touches only the completion columns; revision history stays as-is.
pub fn apply_completion(conn: &Connection, id: i64, update: &CompletionUpdate) -> Result<usize> {
    conn.execute(
        "UPDATE topics SET completed = ?1, completed_at = ?2 WHERE id = ?3",
        params![
            update.completed,
            update.completed_at.map(|dt| dt.to_rfc3339()),
            id
        ],
    )
}

/// Persist a recorded revision produced by the scheduler.
/// Touches only the revision columns; completion state stays as-is.
pub fn apply_revision(conn: &Connection, id: i64, update: &RevisionUpdate) -> Result<usize> {
    conn.execute(
        "UPDATE topics SET revision_count = ?1, last_revision_at = ?2 WHERE id = ?3",
        params![
            update.revision_count,
            update.last_revision_at.to_rfc3339(),
            id
        ],
    )
}

pub(crate) fn row_to_topic(row: &rusqlite::Row) -> Result<Topic> {
    let completed_int: i64 = row.get(3)?;
    let completed_at_str: Option<String> = row.get(4)?;
    let last_revision_at_str: Option<String> = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    Ok(Topic {
        id: row.get(0)?,
        course_id: row.get(1)?,
        name: row.get(2)?,
        completed: completed_int != 0,
        completed_at: completed_at_str.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }),
        revision_count: row.get(5)?,
        last_revision_at: last_revision_at_str.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }),
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::courses::insert_course;
    use crate::db::departments::insert_department;
    use crate::db::open_test_db;
    use crate::domain::{Course, Department};
    use crate::revision;
    use chrono::Duration;

    fn seed_course(conn: &Connection) -> i64 {
        let dept_id =
            insert_department(conn, &Department::new("Science".to_string())).unwrap();
        insert_course(conn, &Course::new(dept_id, "Chemistry".to_string())).unwrap()
    }

    #[test]
    fn test_insert_and_get_topic() {
        let conn = open_test_db();
        let course_id = seed_course(&conn);
        let id = insert_topic(&conn, &Topic::new(course_id, "Stoichiometry".to_string())).unwrap();

        let topic = get_topic_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(topic.name, "Stoichiometry");
        assert!(!topic.completed);
        assert!(topic.completed_at.is_none());
        assert_eq!(topic.revision_count, 0);
        assert!(topic.last_revision_at.is_none());
    }

    #[test]
    fn test_timestamps_round_trip() {
        let conn = open_test_db();
        let course_id = seed_course(&conn);

        let mut topic = Topic::new(course_id, "Bonding".to_string());
        let completed_at = Utc::now() - Duration::days(10);
        let last_revision_at = Utc::now() - Duration::days(2);
        topic.completed = true;
        topic.completed_at = Some(completed_at);
        topic.revision_count = 2;
        topic.last_revision_at = Some(last_revision_at);

        let id = insert_topic(&conn, &topic).unwrap();
        let loaded = get_topic_by_id(&conn, id).unwrap().unwrap();

        assert!(loaded.completed);
        assert_eq!(loaded.revision_count, 2);
        // RFC 3339 keeps sub-second precision, so round-trips are exact
        assert_eq!(loaded.completed_at.unwrap(), completed_at);
        assert_eq!(loaded.last_revision_at.unwrap(), last_revision_at);
    }

    #[test]
    fn test_apply_completion_leaves_revision_columns() {
        let conn = open_test_db();
        let course_id = seed_course(&conn);

        let mut topic = Topic::new(course_id, "Bonding".to_string());
        topic.completed = true;
        topic.completed_at = Some(Utc::now());
        topic.revision_count = 3;
        topic.last_revision_at = Some(Utc::now() - Duration::days(1));
        let id = insert_topic(&conn, &topic).unwrap();

        let stored = get_topic_by_id(&conn, id).unwrap().unwrap();
        let update = revision::toggle_completion(&stored, Utc::now());
        apply_completion(&conn, id, &update).unwrap();

        let after = get_topic_by_id(&conn, id).unwrap().unwrap();
        assert!(!after.completed);
        assert!(after.completed_at.is_none());
        assert_eq!(after.revision_count, 3);
        assert!(after.last_revision_at.is_some());
    }

    #[test]
    fn test_apply_revision_leaves_completion_columns() {
        let conn = open_test_db();
        let course_id = seed_course(&conn);

        let mut topic = Topic::new(course_id, "Bonding".to_string());
        let completed_at = Utc::now() - Duration::days(5);
        topic.completed = true;
        topic.completed_at = Some(completed_at);
        let id = insert_topic(&conn, &topic).unwrap();

        let stored = get_topic_by_id(&conn, id).unwrap().unwrap();
        let now = Utc::now();
        let update = revision::record_revision(&stored, now).unwrap();
        apply_revision(&conn, id, &update).unwrap();

        let after = get_topic_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(after.revision_count, 1);
        assert_eq!(after.last_revision_at.unwrap(), now);
        assert!(after.completed);
        assert_eq!(after.completed_at.unwrap(), completed_at);
    }

    #[test]
    fn test_deleting_course_cascades_to_topics() {
        let conn = open_test_db();
        let course_id = seed_course(&conn);
        let id = insert_topic(&conn, &Topic::new(course_id, "Bonding".to_string())).unwrap();

        crate::db::courses::delete_course(&conn, course_id).unwrap();
        assert!(get_topic_by_id(&conn, id).unwrap().is_none());
    }

    #[test]
    fn test_get_all_topics_spans_courses() {
        let conn = open_test_db();
        let dept_id =
            insert_department(&conn, &Department::new("Science".to_string())).unwrap();
        let first = insert_course(&conn, &Course::new(dept_id, "Chemistry".to_string())).unwrap();
        let second = insert_course(&conn, &Course::new(dept_id, "Physics".to_string())).unwrap();

        insert_topic(&conn, &Topic::new(first, "Bonding".to_string())).unwrap();
        insert_topic(&conn, &Topic::new(second, "Optics".to_string())).unwrap();

        assert_eq!(get_all_topics(&conn).unwrap().len(), 2);
    }
}
