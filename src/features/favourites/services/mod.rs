mod favourite_service;

pub use favourite_service::FavouriteService;
