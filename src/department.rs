use rusqlite::{params, Row};
use serde::Serialize;

use crate::choice::Choosable;
use crate::gateway::{Gateway, Result};
use crate::ids::DepartmentId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Department {
    id: DepartmentId,
    name: String,
}

impl Department {
    pub fn id(&self) -> DepartmentId {
        self.id
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Department {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }

    /// Every department, oldest first.
    pub fn all(gateway: &Gateway) -> Result<Vec<Department>> {
        gateway.query(
            "SELECT id, name FROM departments ORDER BY id",
            [],
            Department::from_row,
        )
    }

    /// Insert a department and return it with its generated id. Names are not required to be
    /// unique.
    pub fn insert(gateway: &Gateway, name: &str) -> Result<Department> {
        gateway.execute("INSERT INTO departments (name) VALUES (?1)", params![name])?;

        Ok(Department {
            id: DepartmentId(gateway.last_insert_id()),
            name: String::from(name),
        })
    }
}

impl Choosable for Department {
    type Id = DepartmentId;

    fn label(&self) -> String {
        self.name.clone()
    }

    fn id(&self) -> DepartmentId {
        self.id
    }
}
