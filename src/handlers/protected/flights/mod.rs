pub mod create;
pub mod list;
pub mod update;

pub use create::flights_post;
pub use list::flights_get;
pub use update::flights_put;
