use apilab_schema::{Priority, Todo, TodoCreate, TodoUpdate};

/// Ordered in-memory todo list. Lookups are first-match linear scans.
#[derive(Debug, Clone, Default)]
pub struct TodoList {
    todos: Vec<Todo>,
}

impl TodoList {
    pub fn seeded() -> Self {
        let todo = |todo_id, name: &str, description: &str, priority| Todo {
            todo_id,
            todo_name: name.to_string(),
            todo_description: description.to_string(),
            priority,
        };
        Self {
            todos: vec![
                todo(
                    1,
                    "Learn FastAPI",
                    "Learn how to build APIs with FastAPI",
                    Priority::High,
                ),
                todo(
                    2,
                    "Learn Pydantic",
                    "Learn how to use Pydantic for data validation",
                    Priority::Medium,
                ),
                todo(
                    3,
                    "Build a full-stack App",
                    "Build a full-stack application using FastAPI and React",
                    Priority::Low,
                ),
            ],
        }
    }

    pub fn all(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, todo_id: i64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.todo_id == todo_id)
    }

    /// Next id: one past the current maximum, or 1 for an empty list.
    pub fn next_id(&self) -> i64 {
        self.todos.iter().map(|t| t.todo_id).max().unwrap_or(0) + 1
    }

    pub fn create(&mut self, create: TodoCreate) -> Todo {
        let todo = create.into_todo(self.next_id());
        self.todos.push(todo.clone());
        todo
    }

    pub fn update(&mut self, todo_id: i64, update: TodoUpdate) -> Option<Todo> {
        let todo = self.todos.iter_mut().find(|t| t.todo_id == todo_id)?;
        update.apply_to(todo);
        Some(todo.clone())
    }

    pub fn remove(&mut self, todo_id: i64) -> Option<Todo> {
        let idx = self.todos.iter().position(|t| t.todo_id == todo_id)?;
        Some(self.todos.remove(idx))
    }
}
