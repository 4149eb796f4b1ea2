pub mod favourite_handler;

pub use favourite_handler::{add_test_favourite, list_favourites};
