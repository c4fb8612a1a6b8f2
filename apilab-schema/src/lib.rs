pub mod items;
pub mod orders;
pub mod todos;
pub mod uploads;
pub mod validation;

pub use items::Item;
pub use orders::{ErrorReply, Message, Order, OrderFilters, OrderUpdate, UserProfile};
pub use todos::{Priority, Todo, TodoCreate, TodoUpdate};
pub use uploads::{BatchUploadReceipt, UploadReceipt, UploadStrategy};
pub use validation::{Validate, Violation};
