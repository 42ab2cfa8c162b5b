pub mod decor;

pub use decor::{DecorService, Decoration};
