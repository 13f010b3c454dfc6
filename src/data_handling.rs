use crate::choice::ChoiceList;
use crate::department::Department;
use crate::gateway::{Gateway, GatewayError};
use crate::ids::{DepartmentId, EmployeeId, RoleId};
use crate::personnel::{Employee, EmployeeRow, NewEmployee};
use crate::role::{Role, RoleRow};

use thiserror::Error;
use tracing::info;

pub type Result<T> = std::result::Result<T, DataError>;

/// Label of the "no manager" entry in the manager choice list.
pub const NO_MANAGER: &str = "None";

/// ProgramData and its related methods represent the main API for reading and writing
/// department, role and employee data.  It owns the single gateway connection; nothing else
/// in the program talks to the database.
pub struct ProgramData {
    gateway: Gateway,
}

impl ProgramData {
    pub fn new(gateway: Gateway) -> Self {
        ProgramData { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn departments(&self) -> Result<Vec<Department>> {
        Ok(Department::all(&self.gateway)?)
    }

    pub fn roles(&self) -> Result<Vec<RoleRow>> {
        Ok(Role::all_with_department(&self.gateway)?)
    }

    pub fn employees(&self) -> Result<Vec<EmployeeRow>> {
        Ok(Employee::all_with_details(&self.gateway)?)
    }

    pub fn add_department(&self, name: &str) -> Result<Department> {
        let name = required("department name", name)?;
        let department = Department::insert(&self.gateway, name)?;

        info!(id = %department.id(), name, "department added");
        Ok(department)
    }

    pub fn add_role(&self, title: &str, salary: f64, department: DepartmentId) -> Result<Role> {
        let title = required("role title", title)?;
        if !salary.is_finite() {
            return Err(DataError::InvalidSalary(salary));
        }
        let role = Role::insert(&self.gateway, title, salary, department)?;

        info!(id = %role.id(), title, salary, department = %department, "role added");
        Ok(role)
    }

    pub fn add_employee(&self, new: &NewEmployee) -> Result<Employee> {
        required("first name", &new.name().first)?;
        required("last name", &new.name().last)?;
        let employee = Employee::insert(&self.gateway, new)?;

        info!(id = %employee.id(), name = %employee.name(), "employee added");
        Ok(employee)
    }

    /// Change the role of one employee. No other row is touched.
    pub fn update_employee_role(&self, employee: EmployeeId, role: RoleId) -> Result<()> {
        if Employee::set_role(&self.gateway, employee, role)? == 0 {
            return Err(DataError::NoSuchEmployee(employee));
        }

        info!(employee = %employee, role = %role, "employee role updated");
        Ok(())
    }

    // Choice lists are rebuilt from a fresh read every time they are asked for.

    pub fn department_choices(&self) -> Result<ChoiceList<DepartmentId>> {
        Ok(ChoiceList::from_rows(&Department::all(&self.gateway)?))
    }

    pub fn role_choices(&self) -> Result<ChoiceList<RoleId>> {
        Ok(ChoiceList::from_rows(&Role::all(&self.gateway)?))
    }

    pub fn employee_choices(&self) -> Result<ChoiceList<EmployeeId>> {
        Ok(ChoiceList::from_rows(&Employee::all(&self.gateway)?))
    }

    /// Every employee, plus a leading "None" entry for no manager.
    pub fn manager_choices(&self) -> Result<ChoiceList<EmployeeId>> {
        Ok(self.employee_choices()?.with_nothing(NO_MANAGER))
    }

    /// Close the connection. Consumes the data handle.
    pub fn close(self) -> Result<()> {
        Ok(self.gateway.close()?)
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DataError::EmptyField(field));
    }
    Ok(value)
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("salary must be a finite number, got {0}")]
    InvalidSalary(f64),
    #[error("no employee with id {0}")]
    NoSuchEmployee(EmployeeId),
}
