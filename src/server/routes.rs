//! Listing and voting routes.

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use imagerank_common::{Error, ImageEntry, VoteDirection};
use serde::Deserialize;

use super::error::AppError;
use super::render::render_index;
use super::AppContext;

pub fn voting_routes() -> Router<AppContext> {
    Router::new()
        .route("/", get(index))
        .route("/vote", post(vote))
        .route("/api/images", get(list_images))
}

/// Form fields posted by the vote buttons.
///
/// Both are optional at the extractor level so that missing fields turn into
/// a validation error rather than a form rejection.
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub image_key: Option<String>,
    pub vote: Option<String>,
}

impl VoteForm {
    fn parse(self) -> Result<(String, VoteDirection), Error> {
        let key = self
            .image_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::validation("image_key is required"))?;
        let direction = self
            .vote
            .ok_or_else(|| Error::validation("vote is required"))?
            .parse()?;
        Ok((key, direction))
    }
}

async fn index(State(ctx): State<AppContext>) -> Result<Html<String>, AppError> {
    let entries = ctx.service.list().await?;
    Ok(Html(render_index(&entries)))
}

async fn vote(
    State(ctx): State<AppContext>,
    Form(form): Form<VoteForm>,
) -> Result<Redirect, AppError> {
    let (key, direction) = form.parse()?;
    ctx.service.vote(&key, direction).await?;
    Ok(Redirect::to("/"))
}

async fn list_images(State(ctx): State<AppContext>) -> Result<Json<Vec<ImageEntry>>, AppError> {
    Ok(Json(ctx.service.list().await?))
}
