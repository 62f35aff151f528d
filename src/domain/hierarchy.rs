use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top level of the study hierarchy (e.g. "Computer Science").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
  pub id: i64,
  pub name: String,
  pub created_at: DateTime<Utc>,
}

impl Department {
  pub fn new(name: String) -> Self {
    Self {
      id: 0,
      name,
      created_at: Utc::now(),
    }
  }
}

/// Middle level of the hierarchy; belongs to a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
  pub id: i64,
  pub department_id: i64,
  pub name: String,
  pub created_at: DateTime<Utc>,
}

impl Course {
  pub fn new(department_id: i64, name: String) -> Self {
    Self {
      id: 0,
      department_id,
      name,
      created_at: Utc::now(),
    }
  }
}
