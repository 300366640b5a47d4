mod error;
mod requests;
mod types;

pub use error::ValidationError;
pub use requests::{CreateTodoRequest, UpdateTodoRequest};
pub use types::{Todo, TodoId};
