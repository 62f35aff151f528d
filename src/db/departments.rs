//! Department CRUD operations

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::Department;

pub fn insert_department(conn: &Connection, department: &Department) -> Result<i64> {
    conn.execute(
        "INSERT INTO departments (name, created_at) VALUES (?1, ?2)",
        params![department.name, department.created_at.to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_department_by_id(conn: &Connection, id: i64) -> Result<Option<Department>> {
    let mut stmt =
        conn.prepare("SELECT id, name, created_at FROM departments WHERE id = ?1")?;

    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_department(row)?))
    } else {
        Ok(None)
    }
}

pub fn get_all_departments(conn: &Connection) -> Result<Vec<Department>> {
    let mut stmt =
        conn.prepare("SELECT id, name, created_at FROM departments ORDER BY name, id")?;

    let departments = stmt
        .query_map([], row_to_department)?
        .collect::<Result<Vec<_>>>()?;
    Ok(departments)
}

pub fn count_courses(conn: &Connection, department_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM courses WHERE department_id = ?1",
        params![department_id],
        |row| row.get(0),
    )
}

// TODO: Planned feature - inline rename in the department list
#[allow(dead_code)]
pub fn rename_department(conn: &Connection, id: i64, name: &str) -> Result<usize> {
    conn.execute(
        "UPDATE departments SET name = ?1 WHERE id = ?2",
        params![name, id],
    )
}

/// Delete a department; courses and topics underneath go with it (cascade).
pub fn delete_department(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM departments WHERE id = ?1", params![id])
}

fn row_to_department(row: &rusqlite::Row) -> Result<Department> {
    let created_at_str: String = row.get(2)?;

    Ok(Department {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}
