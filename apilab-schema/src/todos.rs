use serde::{Deserialize, Serialize};

use crate::validation::{Validate, Violation, check_length, finish};

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 50;
pub const DESCRIPTION_MIN: usize = 5;
pub const DESCRIPTION_MAX: usize = 200;

/// Ranked priority, carried on the wire as its integer rank.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    #[default]
    Low = 1,
    Medium = 2,
    High = 3,
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(format!("priority must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub todo_id: i64,
    pub todo_name: String,
    pub todo_description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoCreate {
    pub todo_name: String,
    pub todo_description: String,
    #[serde(default)]
    pub priority: Priority,
}

impl TodoCreate {
    pub fn into_todo(self, todo_id: i64) -> Todo {
        Todo {
            todo_id,
            todo_name: self.todo_name,
            todo_description: self.todo_description,
            priority: self.priority,
        }
    }
}

impl Validate for TodoCreate {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut out = Vec::new();
        check_length(
            &["body", "todo_name"],
            &self.todo_name,
            NAME_MIN,
            NAME_MAX,
            &mut out,
        );
        check_length(
            &["body", "todo_description"],
            &self.todo_description,
            DESCRIPTION_MIN,
            DESCRIPTION_MAX,
            &mut out,
        );
        finish(out)
    }
}

/// Partial update: only supplied fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoUpdate {
    pub todo_name: Option<String>,
    pub todo_description: Option<String>,
    pub priority: Option<Priority>,
}

impl TodoUpdate {
    pub fn apply_to(self, todo: &mut Todo) {
        if let Some(name) = self.todo_name {
            todo.todo_name = name;
        }
        if let Some(description) = self.todo_description {
            todo.todo_description = description;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
    }
}

impl Validate for TodoUpdate {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut out = Vec::new();
        if let Some(name) = &self.todo_name {
            check_length(&["body", "todo_name"], name, NAME_MIN, NAME_MAX, &mut out);
        }
        if let Some(description) = &self.todo_description {
            check_length(
                &["body", "todo_description"],
                description,
                DESCRIPTION_MIN,
                DESCRIPTION_MAX,
                &mut out,
            );
        }
        finish(out)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoCreated {
    pub message: String,
    pub todo: Todo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoUpdated {
    pub message: String,
    pub updated_todo: Todo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoDeleted {
    pub message: String,
    pub deleted_todo: Todo,
}
