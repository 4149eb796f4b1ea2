mod favourite;

pub use favourite::Favourite;
