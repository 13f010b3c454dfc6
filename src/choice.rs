//! Choice lists: the numbered (label, identifier) menus offered for every foreign-key prompt.
//!
//! A list is always built from a fresh table read, right before the prompt that uses it.

use std::fmt;

/// A row that can be offered as an entry in a choice list.
pub trait Choosable {
    type Id: Copy;

    fn label(&self) -> String;
    fn id(&self) -> Self::Id;
}

/// What picking a choice yields. `Nothing` is the explicit "no selection" entry, used for
/// the manager field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick<Id> {
    Entry(Id),
    Nothing,
}

impl<Id> Pick<Id> {
    pub fn into_option(self) -> Option<Id> {
        match self {
            Pick::Entry(id) => Some(id),
            Pick::Nothing => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Choice<Id> {
    label: String,
    pick: Pick<Id>,
}

impl<Id: Copy> Choice<Id> {
    pub fn new(label: impl Into<String>, pick: Pick<Id>) -> Self {
        Choice {
            label: label.into(),
            pick,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pick(&self) -> Pick<Id> {
        self.pick
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceList<Id> {
    choices: Vec<Choice<Id>>,
}

impl<Id: Copy> ChoiceList<Id> {
    /// One entry per row, in row order.
    pub fn from_rows<T>(rows: &[T]) -> Self
    where
        T: Choosable<Id = Id>,
    {
        ChoiceList {
            choices: rows
                .iter()
                .map(|row| Choice::new(row.label(), Pick::Entry(row.id())))
                .collect(),
        }
    }

    /// Put a "no selection" entry with the given label at the top of the list.
    pub fn with_nothing(mut self, label: &str) -> Self {
        self.choices.insert(0, Choice::new(label, Pick::Nothing));
        self
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// True when there is nothing to pick. A list holding only the "no selection" entry
    /// is not empty.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Look up a choice by its 1-based menu number.
    pub fn get(&self, number: usize) -> Option<&Choice<Id>> {
        number.checked_sub(1).and_then(|i| self.choices.get(i))
    }
}

/// Renders the list as numbered lines, starting at 1.
impl<Id> fmt::Display for ChoiceList<Id> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, choice) in self.choices.iter().enumerate() {
            writeln!(f, "  {}: {}", index + 1, choice.label)?;
        }
        Ok(())
    }
}
