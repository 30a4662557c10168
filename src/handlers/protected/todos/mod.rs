pub mod collection;
pub mod record;
pub mod utils;

// Re-export handler functions for use in routing
pub use collection::get as todos_get;
pub use collection::post as todos_post;

pub use record::delete as todo_delete;
pub use record::put as todo_put;
pub use record::toggle as todo_toggle;
