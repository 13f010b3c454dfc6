use std::io::Cursor;
use std::path::Path;

use employee_tracker::data_handling::ProgramData;
use employee_tracker::department::Department;
use employee_tracker::gateway::Gateway;
use employee_tracker::ids::{EmployeeId, RoleId};
use employee_tracker::personnel::Employee;
use employee_tracker::textinterface::TextInterface;

/// Run one interactive session against the database file at `db` and return everything
/// the session printed.
fn session(db: &Path, script: &str) -> String {
    session_bytes(db, script.as_bytes())
}

fn session_bytes(db: &Path, script: &[u8]) -> String {
    let gateway = Gateway::open(db).unwrap();
    gateway.ensure_schema().unwrap();

    let mut output = Vec::new();
    TextInterface::new(ProgramData::new(gateway), Cursor::new(script), &mut output)
        .run()
        .unwrap();

    String::from_utf8(output).unwrap()
}

fn reopen(db: &Path) -> Gateway {
    Gateway::open(db).unwrap()
}

const ENGINEERING: &str = "4\nEngineering\n";
const ENGINEER_ROLE: &str = "5\nEngineer\n60000\n1\n";

#[test]
fn add_department_then_view_shows_it_once() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    let out = session(&db, "4\nSales\n4\nSupport\n1\n8\n");

    assert!(out.contains("Added department 'Sales'."));
    assert_eq!(out.matches("| Sales ").count(), 1);
    assert_eq!(out.matches("| Support |").count(), 1);
}

#[test]
fn duplicate_department_names_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    session(&db, "4\nOps\n4\nOps\n8\n");

    let names: Vec<String> = Department::all(&reopen(&db))
        .unwrap()
        .into_iter()
        .map(|d| d.name().clone())
        .collect();
    assert_eq!(names, vec!["Ops".to_string(), "Ops".to_string()]);
}

#[test]
fn role_shows_the_chosen_department() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    let out = session(&db, "4\nSales\n4\nFinance\n5\nAccountant\n52500.5\n2\n2\n8\n");

    let expected = "\
+----+------------+------------+---------+
| id | title      | department | salary  |
+----+------------+------------+---------+
| 1  | Accountant | Finance    | 52500.5 |
+----+------------+------------+---------+
";
    assert!(out.contains("Added role 'Accountant'."));
    assert!(out.contains(expected), "{}", out);
}

#[test]
fn department_prompt_lists_live_departments() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    let out = session(&db, "4\nSales\n4\nFinance\n5\nClerk\n1\n1\n8\n");

    assert!(out.contains("Select a department for this role:\n  1: Sales\n  2: Finance\n"));
}

#[test]
fn non_numeric_salary_is_asked_again() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    let script = format!("{}5\nEngineer\nlots\n12k\n60000\n1\n8\n", ENGINEERING);
    let out = session(&db, &script);

    assert_eq!(out.matches("Salary must be a number.").count(), 2);
    assert!(out.contains("Added role 'Engineer'."));
}

#[test]
fn out_of_range_choice_is_asked_again() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    let script = format!("{}5\nEngineer\n60000\n0\n2\nEngineering\n1\n8\n", ENGINEERING);
    let out = session(&db, &script);

    assert_eq!(out.matches("Enter a number from 1 to 1.").count(), 3);
    assert!(out.contains("Added role 'Engineer'."));
}

#[test]
fn ada_lovelace_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    let script = format!("{}{}6\nAda\nLovelace\n1\n1\n3\n8\n", ENGINEERING, ENGINEER_ROLE);
    let out = session(&db, &script);

    let expected = "\
+----+------------+-----------+----------+-------------+--------+---------+
| id | first_name | last_name | title    | department  | salary | manager |
+----+------------+-----------+----------+-------------+--------+---------+
| 1  | Ada        | Lovelace  | Engineer | Engineering | 60000  |         |
+----+------------+-----------+----------+-------------+--------+---------+
";
    assert!(out.contains("Added employee 'Ada Lovelace'."));
    assert!(out.contains(expected), "{}", out);
}

#[test]
fn manager_choice_offers_none_first() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    let script = format!(
        "{}{}6\nAda\nLovelace\n1\n1\n6\nAlan\nTuring\n1\n2\n8\n",
        ENGINEERING, ENGINEER_ROLE
    );
    let out = session(&db, &script);

    assert!(out.contains("Select a manager for the employee:\n  1: None\n  2: Ada Lovelace\n"));
}

#[test]
fn manager_column_shows_full_name() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    let script = format!(
        "{}{}5\nLead\n90000\n1\n6\nGrace\nHopper\n2\n1\n6\nAlan\nTuring\n1\n2\n3\n8\n",
        ENGINEERING, ENGINEER_ROLE
    );
    let out = session(&db, &script);

    let expected = "\
+----+------------+-----------+----------+-------------+--------+--------------+
| id | first_name | last_name | title    | department  | salary | manager      |
+----+------------+-----------+----------+-------------+--------+--------------+
| 1  | Grace      | Hopper    | Lead     | Engineering | 90000  |              |
| 2  | Alan       | Turing    | Engineer | Engineering | 60000  | Grace Hopper |
+----+------------+-----------+----------+-------------+--------+--------------+
";
    assert!(out.contains(expected), "{}", out);
}

#[test]
fn update_role_changes_only_the_chosen_employee() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    let setup = format!(
        "{}{}5\nLead\n90000\n1\n6\nAda\nLovelace\n1\n1\n6\nAlan\nTuring\n1\n2\n8\n",
        ENGINEERING, ENGINEER_ROLE
    );
    session(&db, &setup);
    let before = Employee::all(&reopen(&db)).unwrap();

    let out = session(&db, "7\n1\n2\n8\n");
    let after = Employee::all(&reopen(&db)).unwrap();

    assert!(out.contains("Updated role of 'Ada Lovelace' to 'Lead'."));
    assert_eq!(after.len(), 2);
    assert_eq!(after[0].id(), EmployeeId(1));
    assert_eq!(after[0].role_id(), RoleId(2));
    assert_eq!(after[0].name(), before[0].name());
    assert_eq!(after[0].manager_id(), before[0].manager_id());
    assert_eq!(after[1], before[1]);
}

#[test]
fn data_survives_between_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    session(&db, "4\nLegal\n8\n");
    let out = session(&db, "1\n8\n");

    assert!(out.contains("| 1  | Legal |"));
}

#[test]
fn garbled_bytes_do_not_end_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("staff.db");

    let mut script = b"4\nSales\n".to_vec();
    script.extend_from_slice(&[0xff, 0xfe, b'\n']);
    script.extend_from_slice(b"1\n8\n");
    let out = session_bytes(&db, &script);

    assert!(out.contains("Input must be text."));
    assert!(out.contains("| 1  | Sales |"));
    assert!(out.ends_with("Goodbye!\n"));
    assert_eq!(Department::all(&reopen(&db)).unwrap().len(), 1);
}
