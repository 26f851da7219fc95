use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/v1/movies/`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct MovieIn {
    #[schema(max_length = 50, example = "The Matrix")]
    pub name: String,
    #[schema(max_length = 250)]
    pub plot: String,
    pub genres: Vec<String>,
    /// Ids of casts registered in cast-service
    pub casts_id: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, sqlx::FromRow, ToSchema)]
pub struct MovieOut {
    pub id: i32,
    pub name: String,
    pub plot: String,
    pub genres: Vec<String>,
    pub casts_id: Vec<i32>,
}

/// Body of `PUT /api/v1/movies/{id}/`; omitted fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct MovieUpdate {
    pub name: Option<String>,
    pub plot: Option<String>,
    pub genres: Option<Vec<String>>,
    pub casts_id: Option<Vec<i32>>,
}

impl MovieUpdate {
    pub fn apply_to(&self, movie: &mut MovieOut) {
        if let Some(name) = &self.name {
            movie.name = name.clone();
        }
        if let Some(plot) = &self.plot {
            movie.plot = plot.clone();
        }
        if let Some(genres) = &self.genres {
            movie.genres = genres.clone();
        }
        if let Some(casts_id) = &self.casts_id {
            movie.casts_id = casts_id.clone();
        }
    }
}
