use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/v1/casts/`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct CastIn {
    #[schema(max_length = 50, example = "Keanu Reeves")]
    pub name: String,
    #[schema(max_length = 20, example = "Canadian")]
    #[serde(default)]
    pub nationality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, sqlx::FromRow, ToSchema)]
pub struct CastOut {
    pub id: i32,
    pub name: String,
    pub nationality: Option<String>,
}
