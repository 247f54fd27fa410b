//! Board commands

mod add;
mod delete;
mod update;

pub use add::AddBoard;
pub use delete::DeleteBoard;
pub use update::UpdateBoard;
