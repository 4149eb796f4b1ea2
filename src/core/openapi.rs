use utoipa::OpenApi;

use crate::features::favourites::dtos as favourites_dtos;
use crate::features::favourites::handlers as favourites_handlers;
use crate::features::recommendations::dtos as recommendations_dtos;
use crate::features::recommendations::handlers as recommendations_handlers;
use crate::shared::genre::Genre;
use crate::shared::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Moodreel API",
        description = "Mood-based movie recommendation API backed by Gemini, TMDB and MySQL"
    ),
    paths(
        // Recommendations
        recommendations_handlers::recommendation_handler::root,
        recommendations_handlers::recommendation_handler::recommend,
        // Favourites
        favourites_handlers::favourite_handler::add_test_favourite,
        favourites_handlers::favourite_handler::list_favourites,
    ),
    components(schemas(
        Genre,
        MessageResponse,
        recommendations_dtos::MoodRequest,
        recommendations_dtos::RecommendResponse,
        favourites_dtos::AddFavouriteRequest,
        favourites_dtos::FavouriteResponseDto,
    )),
    tags(
        (name = "recommendations", description = "Mood-to-movie recommendation endpoints"),
        (name = "favourites", description = "Favourite movie bookkeeping endpoints"),
    )
)]
pub struct ApiDoc;
