//! # Recipe Handlers
//!
//! The five canonical recipe routes. Handlers decode the wire payload,
//! resolve an uploaded image through the [`ImageStore`](crate::upload::ImageStore)
//! collaborator, and hand a structured [`NewRecipe`] to the repository -
//! they never format storage errors themselves.
//!
//! ## Accepted Write Bodies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /recipes  and  PUT /recipes/{id}                                  │
//! │                                                                         │
//! │  application/json:                                                      │
//! │    { "name": ..., "ingredients": [...] | "json string", ... }          │
//! │    image arrives as an already-resolved "image" URL, if at all         │
//! │                                                                         │
//! │  multipart/form-data:                                                   │
//! │    text fields + ingredients/steps as JSON-encoded strings             │
//! │    optional "image" file part, uploaded to the object store first      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::{header, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use savora_core::input::parse_list_field;
use savora_core::{IngredientInput, ListField, NewRecipe, RecipeWithDetails, ValidationError};

use crate::error::ApiError;
use crate::state::AppState;

/// Upper bound for JSON bodies; images never travel in them.
const MAX_JSON_BODY: usize = 1024 * 1024;

// =============================================================================
// Wire Types
// =============================================================================

/// A recipe write payload as it appears in a JSON body.
///
/// Everything is optional at the wire level; presence rules are enforced by
/// the repository's validation so that a missing field produces a precise
/// `ValidationError` instead of a serde decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeForm {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    servings: Option<i64>,
    #[serde(default)]
    preparation_time: Option<i64>,
    #[serde(default)]
    cooking_time: Option<i64>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    country: Option<String>,
    /// Already-resolved image reference (URL or object key).
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    ingredients: Option<ListField<IngredientInput>>,
    #[serde(default)]
    steps: Option<ListField<String>>,
}

impl RecipeForm {
    /// Resolves the loosely-typed form into the repository input.
    fn into_input(self) -> Result<NewRecipe, ValidationError> {
        let ingredients = match self.ingredients {
            Some(field) => field.into_items("ingredients")?,
            None => Vec::new(),
        };
        let steps = match self.steps {
            Some(field) => field.into_items("steps")?,
            None => Vec::new(),
        };

        Ok(NewRecipe {
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            servings: self.servings,
            preparation_time: self.preparation_time,
            cooking_time: self.cooking_time,
            difficulty: self.difficulty,
            country: self.country,
            image: self.image,
            ingredients,
            steps,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeResponse {
    pub id: i64,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn create_recipe(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, Json<CreateRecipeResponse>), ApiError> {
    debug!("create_recipe request");

    let input = decode_request(&state, req).await?;
    let id = state.db.recipes().create(&input).await?;

    info!(id, name = %input.name, "Recipe created");
    Ok((StatusCode::CREATED, Json(CreateRecipeResponse { id })))
}

pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeWithDetails>>, ApiError> {
    debug!("list_recipes request");

    let recipes = state.db.recipes().list().await?;
    Ok(Json(recipes))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeWithDetails>, ApiError> {
    debug!(id, "get_recipe request");

    let recipe = state.db.recipes().get(id).await?;
    Ok(Json(recipe))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    req: Request,
) -> Result<StatusCode, ApiError> {
    debug!(id, "update_recipe request");

    let input = decode_request(&state, req).await?;
    state.db.recipes().update(id, &input).await?;

    info!(id, "Recipe updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    debug!(id, "delete_recipe request");

    state.db.recipes().delete(id).await?;

    info!(id, "Recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Liveness probe: answers once the database can execute a statement.
pub async fn health(State(state): State<AppState>) -> StatusCode {
    if state.db.health_check().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

// =============================================================================
// Request Decoding
// =============================================================================

/// Turns a write request into the repository input, branching on content
/// type. Both branches end in the same [`NewRecipe`]; validation proper
/// happens in the repository.
async fn decode_request(state: &AppState, req: Request) -> Result<NewRecipe, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| ApiError::validation(format!("malformed multipart body: {e}")))?;
        decode_multipart(state, multipart).await
    } else {
        let bytes = axum::body::to_bytes(req.into_body(), MAX_JSON_BODY)
            .await
            .map_err(|e| ApiError::validation(format!("unreadable request body: {e}")))?;

        let form: RecipeForm = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::validation(format!("invalid JSON body: {e}")))?;

        Ok(form.into_input()?)
    }
}

/// Decodes a multipart form: scalar text fields, JSON-encoded child lists,
/// and an optional image file part resolved through the object store.
async fn decode_multipart(state: &AppState, mut multipart: Multipart) -> Result<NewRecipe, ApiError> {
    let mut input = NewRecipe::default();
    let mut ingredients_raw: Option<String> = None;
    let mut steps_raw: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "name" => input.name = text_field(field).await?.unwrap_or_default(),
            "description" => input.description = text_field(field).await?.unwrap_or_default(),
            "servings" => input.servings = int_field("servings", field).await?,
            "preparation_time" => {
                input.preparation_time = int_field("preparation_time", field).await?
            }
            "cooking_time" => input.cooking_time = int_field("cooking_time", field).await?,
            "difficulty" => input.difficulty = text_field(field).await?,
            "country" => input.country = text_field(field).await?,
            "ingredients" => ingredients_raw = text_field(field).await?,
            "steps" => steps_raw = text_field(field).await?,
            "image" => {
                if let Some(url) = store_image(state, field).await? {
                    input.image = Some(url);
                }
            }
            // Unknown fields are ignored, like any form backend would
            _ => {}
        }
    }

    if let Some(raw) = ingredients_raw {
        input.ingredients = parse_list_field("ingredients", &raw)?;
    }
    if let Some(raw) = steps_raw {
        input.steps = parse_list_field("steps", &raw)?;
    }

    Ok(input)
}

/// Reads a text field; whitespace-only values count as absent.
async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<Option<String>, ApiError> {
    let text = field
        .text()
        .await
        .map_err(|e| ApiError::validation(format!("unreadable form field: {e}")))?;

    let text = text.trim().to_string();
    Ok(if text.is_empty() { None } else { Some(text) })
}

/// Reads an integer field arriving as form text.
async fn int_field(
    name: &str,
    field: axum::extract::multipart::Field<'_>,
) -> Result<Option<i64>, ApiError> {
    match text_field(field).await? {
        Some(text) => {
            let value = text.parse::<i64>().map_err(|_| {
                ApiError::from(ValidationError::InvalidNumber {
                    field: name.to_string(),
                })
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Uploads an image file part and returns its public URL.
///
/// An empty part (a form submitted with no file chosen) resolves to `None`.
async fn store_image(
    state: &AppState,
    field: axum::extract::multipart::Field<'_>,
) -> Result<Option<String>, ApiError> {
    let filename = field.file_name().map(str::to_string);
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::validation(format!("unreadable image upload: {e}")))?;

    if bytes.is_empty() {
        return Ok(None);
    }

    if bytes.len() > state.max_upload_bytes {
        return Err(crate::upload::UploadError::TooLarge {
            max: state.max_upload_bytes,
        }
        .into());
    }

    let store = state
        .images
        .as_ref()
        .ok_or_else(|| ApiError::internal("image storage is not configured"))?;

    let url = store
        .upload(filename.as_deref(), &content_type, bytes.to_vec())
        .await?;

    Ok(Some(url))
}

// =============================================================================
// Unit Tests
// =============================================================================
