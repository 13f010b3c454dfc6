use rusqlite::{params, Row};
use serde::Serialize;
use std::fmt;

use crate::choice::Choosable;
use crate::gateway::{Gateway, Result};
use crate::ids::{EmployeeId, RoleId};

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Name {
    pub first: String,
    pub last: String,
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    id: EmployeeId,
    name: Name,
    role_id: RoleId,
    manager_id: Option<EmployeeId>,
}

/// An employee as shown by "View all employees". `manager` is the manager's full name, or
/// `None` when the employee has no manager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRow {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub department: String,
    pub salary: f64,
    pub manager: Option<String>,
}

impl Employee {
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn role_id(&self) -> RoleId {
        self.role_id
    }

    pub fn manager_id(&self) -> Option<EmployeeId> {
        self.manager_id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Employee {
            id: row.get("id")?,
            name: Name {
                first: row.get("first_name")?,
                last: row.get("last_name")?,
            },
            role_id: row.get("role_id")?,
            manager_id: row.get("manager_id")?,
        })
    }

    pub fn all(gateway: &Gateway) -> Result<Vec<Employee>> {
        gateway.query(
            "SELECT id, first_name, last_name, role_id, manager_id FROM employees ORDER BY id",
            [],
            Employee::from_row,
        )
    }

    pub fn find(gateway: &Gateway, id: EmployeeId) -> Result<Option<Employee>> {
        let mut found = gateway.query(
            "SELECT id, first_name, last_name, role_id, manager_id FROM employees WHERE id = ?1",
            params![id],
            Employee::from_row,
        )?;

        Ok(found.pop())
    }

    /// Every employee with role title, department name, salary and the manager's full name.
    /// The manager join is a left join so employees without a manager are kept.
    pub fn all_with_details(gateway: &Gateway) -> Result<Vec<EmployeeRow>> {
        gateway.query(
            "SELECT e.id, e.first_name, e.last_name, r.title, d.name AS department, r.salary,
                    m.first_name || ' ' || m.last_name AS manager
             FROM employees e
             JOIN roles r ON e.role_id = r.id
             JOIN departments d ON r.department_id = d.id
             LEFT JOIN employees m ON e.manager_id = m.id
             ORDER BY e.id",
            [],
            |row| {
                Ok(EmployeeRow {
                    id: row.get("id")?,
                    first_name: row.get("first_name")?,
                    last_name: row.get("last_name")?,
                    title: row.get("title")?,
                    department: row.get("department")?,
                    salary: row.get("salary")?,
                    manager: row.get("manager")?,
                })
            },
        )
    }

    /// Insert a new employee. The role and the manager, when given, must already exist.
    pub fn insert(gateway: &Gateway, new: &NewEmployee) -> Result<Employee> {
        gateway.execute(
            "INSERT INTO employees (first_name, last_name, role_id, manager_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![new.name.first, new.name.last, new.role_id, new.manager_id],
        )?;

        Ok(Employee {
            id: EmployeeId(gateway.last_insert_id()),
            name: new.name.clone(),
            role_id: new.role_id,
            manager_id: new.manager_id,
        })
    }

    /// Point one employee at a new role. Returns the number of rows changed: 1, or 0 when
    /// no employee has this id.
    pub fn set_role(gateway: &Gateway, id: EmployeeId, role_id: RoleId) -> Result<usize> {
        gateway.execute(
            "UPDATE employees SET role_id = ?1 WHERE id = ?2",
            params![role_id, id],
        )
    }
}

impl Choosable for Employee {
    type Id = EmployeeId;

    fn label(&self) -> String {
        self.name.to_string()
    }

    fn id(&self) -> EmployeeId {
        self.id
    }
}

/// A fully specified employee that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    name: Name,
    role_id: RoleId,
    manager_id: Option<EmployeeId>,
}

impl NewEmployee {
    /// `manager` of `None` leaves the employee without a manager.
    pub fn new(name: Name, role_id: RoleId, manager_id: Option<EmployeeId>) -> Self {
        NewEmployee {
            name,
            role_id,
            manager_id,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }
}
