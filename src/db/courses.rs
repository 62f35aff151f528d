//! Course CRUD operations

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::Course;

pub fn insert_course(conn: &Connection, course: &Course) -> Result<i64> {
    conn.execute(
        "INSERT INTO courses (department_id, name, created_at) VALUES (?1, ?2, ?3)",
        params![
            course.department_id,
            course.name,
            course.created_at.to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_course_by_id(conn: &Connection, id: i64) -> Result<Option<Course>> {
    let mut stmt = conn
        .prepare("SELECT id, department_id, name, created_at FROM courses WHERE id = ?1")?;

    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_course(row)?))
    } else {
        Ok(None)
    }
}

pub fn get_courses_by_department(conn: &Connection, department_id: i64) -> Result<Vec<Course>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, department_id, name, created_at
    FROM courses
    WHERE department_id = ?1
    ORDER BY name, id
    "#,
    )?;

    let courses = stmt
        .query_map(params![department_id], row_to_course)?
        .collect::<Result<Vec<_>>>()?;
    Ok(courses)
}

pub fn get_all_courses(conn: &Connection) -> Result<Vec<Course>> {
    let mut stmt = conn.prepare(
        "SELECT id, department_id, name, created_at FROM courses ORDER BY department_id, name, id",
    )?;

    let courses = stmt
        .query_map([], row_to_course)?
        .collect::<Result<Vec<_>>>()?;
    Ok(courses)
}

pub fn count_topics(conn: &Connection, course_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM topics WHERE course_id = ?1",
        params![course_id],
        |row| row.get(0),
    )
}

/// Delete a course; its topics go with it (cascade).
pub fn delete_course(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM courses WHERE id = ?1", params![id])
}

fn row_to_course(row: &rusqlite::Row) -> Result<Course> {
    let created_at_str: String = row.get(3)?;

    Ok(Course {
        id: row.get(0)?,
        department_id: row.get(1)?,
        name: row.get(2)?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}
