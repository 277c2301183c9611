pub mod store;

pub use store::{LibraryEntry, MediaLibrary, SaveError, SavedMedia};
