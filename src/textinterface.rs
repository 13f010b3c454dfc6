use std::io::{self, BufRead, Write};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::choice::{Choice, ChoiceList, Pick};
use crate::data_handling::{DataError, ProgramData};
use crate::personnel::{Name, NewEmployee};
use crate::table;

pub type Result<T> = std::result::Result<T, TextInterfaceError>;

/// What the menu loop does after an action returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

struct Command<R, W> {
    label: &'static str,
    operation: fn(&mut TextInterface<R, W>) -> Result<Flow>,
}

struct TextIO<R, W> {
    input: R,
    output: W,
}

/// The interactive menu. Reads answers from `R`, writes prompts and tables to `W`.
pub struct TextInterface<R, W> {
    io: TextIO<R, W>,
    data: ProgramData,
    commands: Vec<Command<R, W>>,
}

impl<R: BufRead, W: Write> TextInterface<R, W> {
    pub fn new(data: ProgramData, input: R, output: W) -> Self {
        let commands: Vec<Command<R, W>> = vec![
            Command {
                label: "View all departments",
                operation: Self::view_departments,
            },
            Command {
                label: "View all roles",
                operation: Self::view_roles,
            },
            Command {
                label: "View all employees",
                operation: Self::view_employees,
            },
            Command {
                label: "Add a department",
                operation: Self::add_department,
            },
            Command {
                label: "Add a role",
                operation: Self::add_role,
            },
            Command {
                label: "Add an employee",
                operation: Self::add_employee,
            },
            Command {
                label: "Update an employee role",
                operation: Self::update_employee_role,
            },
            Command {
                label: "Exit",
                operation: Self::quit,
            },
        ];

        TextInterface {
            io: TextIO { input, output },
            data,
            commands,
        }
    }

    /// Show the menu and run actions until Exit is picked or input runs out, then close the
    /// database connection.
    pub fn run(mut self) -> Result<()> {
        let mut running = true;

        while running {
            self.show_menu()?;

            let answer = match self.read_line()? {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    writeln!(self.io.output, "{}", e)?;
                    continue;
                }
                None => break,
            };

            let command = self
                .find_command(&answer)
                .map(|command| (command.label, command.operation));

            match command {
                Some((label, operation)) => {
                    info!(action = label, "menu selection");
                    if operation(&mut self)? == Flow::Exit {
                        running = false;
                    }
                }
                None => {
                    writeln!(
                        self.io.output,
                        "Type a number from 1 to {}, or the name of an action.",
                        self.commands.len()
                    )?;
                }
            }
        }

        self.data.close()?;
        writeln!(self.io.output, "Goodbye!")?;
        self.io.output.flush()?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.io.output)?;
        writeln!(self.io.output, "What would you like to do?")?;
        for (index, command) in self.commands.iter().enumerate() {
            writeln!(self.io.output, "  {}: {}", index + 1, command.label)?;
        }
        write!(self.io.output, "?> ")?;
        self.io.output.flush()?;
        Ok(())
    }

    /// Matches a menu number or a label, ignoring case.
    fn find_command(&self, answer: &str) -> Option<&Command<R, W>> {
        if let Ok(number) = answer.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|index| self.commands.get(index));
        }

        self.commands
            .iter()
            .find(|command| command.label.eq_ignore_ascii_case(answer))
    }

    fn view_departments(&mut self) -> Result<Flow> {
        let rows = self.data.departments()?;
        self.show_table(&rows)?;
        Ok(Flow::Continue)
    }

    fn view_roles(&mut self) -> Result<Flow> {
        let rows = self.data.roles()?;
        self.show_table(&rows)?;
        Ok(Flow::Continue)
    }

    fn view_employees(&mut self) -> Result<Flow> {
        let rows = self.data.employees()?;
        self.show_table(&rows)?;
        Ok(Flow::Continue)
    }

    fn add_department(&mut self) -> Result<Flow> {
        let name = self.prompt_text("Enter the name of the department:")?;

        let department = self.data.add_department(&name)?;
        writeln!(self.io.output, "Added department '{}'.", department.name())?;
        Ok(Flow::Continue)
    }

    fn add_role(&mut self) -> Result<Flow> {
        let departments = self.data.department_choices()?;
        if departments.is_empty() {
            writeln!(
                self.io.output,
                "Cannot add a role: no departments found. Add a department first."
            )?;
            return Ok(Flow::Continue);
        }

        let title = self.prompt_text("Enter the title of the role:")?;
        let salary = self.prompt_salary("Enter the salary for the role:")?;
        let (department, _) =
            self.prompt_entry("Select a department for this role:", &departments)?;

        let role = self.data.add_role(&title, salary, department)?;
        writeln!(self.io.output, "Added role '{}'.", role.title())?;
        Ok(Flow::Continue)
    }

    fn add_employee(&mut self) -> Result<Flow> {
        let roles = self.data.role_choices()?;
        if roles.is_empty() {
            writeln!(
                self.io.output,
                "Cannot add an employee: no roles found. Add a role first."
            )?;
            return Ok(Flow::Continue);
        }
        let managers = self.data.manager_choices()?;

        let first = self.prompt_text("Enter the first name of the employee:")?;
        let last = self.prompt_text("Enter the last name of the employee:")?;
        let (role, _) = self.prompt_entry("Select a role for the employee:", &roles)?;
        let manager = self
            .prompt_choice("Select a manager for the employee:", &managers)?
            .pick()
            .into_option();

        let employee = self
            .data
            .add_employee(&NewEmployee::new(Name { first, last }, role, manager))?;
        writeln!(self.io.output, "Added employee '{}'.", employee.name())?;
        Ok(Flow::Continue)
    }

    fn update_employee_role(&mut self) -> Result<Flow> {
        let employees = self.data.employee_choices()?;
        if employees.is_empty() {
            writeln!(
                self.io.output,
                "Cannot update a role: no employees found. Add an employee first."
            )?;
            return Ok(Flow::Continue);
        }
        let roles = self.data.role_choices()?;
        if roles.is_empty() {
            writeln!(
                self.io.output,
                "Cannot update a role: no roles found. Add a role first."
            )?;
            return Ok(Flow::Continue);
        }

        let (employee, name) =
            self.prompt_entry("Select an employee to update their role:", &employees)?;
        let (role, title) = self.prompt_entry("Select a new role for the employee:", &roles)?;

        self.data.update_employee_role(employee, role)?;
        writeln!(self.io.output, "Updated role of '{}' to '{}'.", name, title)?;
        Ok(Flow::Continue)
    }

    fn quit(&mut self) -> Result<Flow> {
        Ok(Flow::Exit)
    }

    fn show_table<T: Serialize>(&mut self, rows: &[T]) -> Result<()> {
        let rendered = table::render(rows)?;
        write!(self.io.output, "{}", rendered)?;
        Ok(())
    }

    /// Next line of input with surrounding whitespace removed. `None` once input is closed;
    /// a line that is not UTF-8 comes back as `InvalidInput::NotText`.
    fn read_line(&mut self) -> Result<Option<std::result::Result<String, InvalidInput>>> {
        let mut buffer = Vec::new();
        if self.io.input.read_until(b'\n', &mut buffer)? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8(buffer)
            .map(|text| String::from(text.trim()))
            .map_err(|_| InvalidInput::NotText);
        Ok(Some(line))
    }

    fn answer(&mut self, prompt: &str) -> Result<String> {
        loop {
            write!(self.io.output, "{} ", prompt)?;
            self.io.output.flush()?;

            match self.read_line()? {
                Some(Ok(line)) => return Ok(line),
                Some(Err(e)) => writeln!(self.io.output, "{}", e)?,
                None => return Err(TextInterfaceError::InputClosed),
            }
        }
    }

    fn prompt_text(&mut self, prompt: &str) -> Result<String> {
        loop {
            let answer = self.answer(prompt)?;
            match non_empty(&answer) {
                Ok(()) => return Ok(answer),
                Err(e) => writeln!(self.io.output, "{}", e)?,
            }
        }
    }

    fn prompt_salary(&mut self, prompt: &str) -> Result<f64> {
        loop {
            let answer = self.answer(prompt)?;
            match parse_salary(&answer) {
                Ok(salary) => return Ok(salary),
                Err(e) => writeln!(self.io.output, "{}", e)?,
            }
        }
    }

    /// Show a numbered choice list and ask until a listed number is entered.
    fn prompt_choice<Id: Copy>(&mut self, prompt: &str, choices: &ChoiceList<Id>) -> Result<Choice<Id>> {
        writeln!(self.io.output, "{}", prompt)?;
        write!(self.io.output, "{}", choices)?;

        loop {
            let answer = self.answer("?>")?;
            match parse_choice(&answer, choices) {
                Ok(choice) => return Ok(choice.clone()),
                Err(e) => writeln!(self.io.output, "{}", e)?,
            }
        }
    }

    /// Like `prompt_choice`, for lists where an actual row has to be picked. Returns the
    /// row's id and label.
    fn prompt_entry<Id: Copy>(
        &mut self,
        prompt: &str,
        choices: &ChoiceList<Id>,
    ) -> Result<(Id, String)> {
        loop {
            let choice = self.prompt_choice(prompt, choices)?;
            match choice.pick() {
                Pick::Entry(id) => return Ok((id, String::from(choice.label()))),
                Pick::Nothing => writeln!(self.io.output, "{}", InvalidInput::EntryRequired)?,
            }
        }
    }
}

/// Why an answer was refused. The prompt is repeated after showing one of these.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidInput {
    #[error("Please enter a value.")]
    Empty,
    #[error("Salary must be a number.")]
    NotANumber,
    #[error("Enter a number from 1 to {0}.")]
    NotInList(usize),
    #[error("Pick one of the listed entries.")]
    EntryRequired,
    #[error("Input must be text.")]
    NotText,
}

fn non_empty(answer: &str) -> std::result::Result<(), InvalidInput> {
    if answer.trim().is_empty() {
        Err(InvalidInput::Empty)
    } else {
        Ok(())
    }
}

/// Accepts any finite decimal number, e.g. `60000`, `52500.50`, `-1e3`.
pub fn parse_salary(answer: &str) -> std::result::Result<f64, InvalidInput> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(InvalidInput::Empty);
    }

    match answer.parse::<f64>() {
        Ok(salary) if salary.is_finite() => Ok(salary),
        _ => Err(InvalidInput::NotANumber),
    }
}

fn parse_choice<'a, Id: Copy>(
    answer: &str,
    choices: &'a ChoiceList<Id>,
) -> std::result::Result<&'a Choice<Id>, InvalidInput> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|number| choices.get(number))
        .ok_or_else(|| InvalidInput::NotInList(choices.len()))
}

#[derive(Debug, Error)]
pub enum TextInterfaceError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not render table: {0}")]
    Render(#[from] serde_json::Error),
    #[error("input closed in the middle of an action")]
    InputClosed,
}
