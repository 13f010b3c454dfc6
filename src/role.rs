use rusqlite::{params, Row};
use serde::Serialize;

use crate::choice::Choosable;
use crate::gateway::{Gateway, Result};
use crate::ids::{DepartmentId, RoleId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Role {
    id: RoleId,
    title: String,
    salary: f64,
    department_id: DepartmentId,
}

/// A role as shown by "View all roles": the department reference resolved to its name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleRow {
    pub id: RoleId,
    pub title: String,
    pub department: String,
    pub salary: f64,
}

impl Role {
    pub fn id(&self) -> RoleId {
        self.id
    }

    pub fn title(&self) -> &String {
        &self.title
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Role {
            id: row.get("id")?,
            title: row.get("title")?,
            salary: row.get("salary")?,
            department_id: row.get("department_id")?,
        })
    }

    pub fn all(gateway: &Gateway) -> Result<Vec<Role>> {
        gateway.query(
            "SELECT id, title, salary, department_id FROM roles ORDER BY id",
            [],
            Role::from_row,
        )
    }

    /// Every role joined with the name of its department.
    pub fn all_with_department(gateway: &Gateway) -> Result<Vec<RoleRow>> {
        gateway.query(
            "SELECT roles.id, roles.title, departments.name AS department, roles.salary
             FROM roles
             JOIN departments ON roles.department_id = departments.id
             ORDER BY roles.id",
            [],
            |row| {
                Ok(RoleRow {
                    id: row.get("id")?,
                    title: row.get("title")?,
                    department: row.get("department")?,
                    salary: row.get("salary")?,
                })
            },
        )
    }

    /// Insert a role. Fails with a constraint violation when `department_id` does not exist.
    pub fn insert(
        gateway: &Gateway,
        title: &str,
        salary: f64,
        department_id: DepartmentId,
    ) -> Result<Role> {
        gateway.execute(
            "INSERT INTO roles (title, salary, department_id) VALUES (?1, ?2, ?3)",
            params![title, salary, department_id],
        )?;

        Ok(Role {
            id: RoleId(gateway.last_insert_id()),
            title: String::from(title),
            salary,
            department_id,
        })
    }
}

impl Choosable for Role {
    type Id = RoleId;

    fn label(&self) -> String {
        self.title.clone()
    }

    fn id(&self) -> RoleId {
        self.id
    }
}
