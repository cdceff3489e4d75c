pub mod recovery;
pub mod store_io;

pub use store_io::{StorageError, load_tasks, save_tasks};
