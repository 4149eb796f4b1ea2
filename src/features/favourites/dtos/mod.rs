pub mod favourite_dto;

pub use favourite_dto::{AddFavouriteRequest, FavouriteResponseDto};
