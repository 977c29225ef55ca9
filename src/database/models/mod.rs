pub mod todo;
pub mod user;

pub use todo::{Category, Todo};
pub use user::User;
