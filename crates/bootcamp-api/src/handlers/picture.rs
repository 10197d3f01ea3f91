//! Profile picture page, upload and crop.
//!
//! Upload and crop always answer with a redirect back to the picture page;
//! failures are only visible in the logs.

use crate::auth::CurrentUser;
use crate::error::found;
use crate::forms::CropForm;
use crate::services::AvatarError;
use crate::state::AppState;
use axum::{
    extract::{
        multipart::MultipartRejection, rejection::FormRejection, Multipart, Query, State,
    },
    response::Response,
    Form, Json,
};
use bootcamp_core::constants::UPLOADED_FLAG;
use bootcamp_processing::{CropRect, PictureSize};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;
use tokio_util::io::StreamReader;

pub const PICTURE_PAGE: &str = "/settings/picture/";

#[derive(Debug, Default, Deserialize)]
pub struct PictureQuery {
    pub upload_picture: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PicturePage {
    pub uploaded_picture: bool,
    pub media_url: String,
    pub picture_url: String,
    pub temp_picture_url: String,
}

#[tracing::instrument(skip(state), fields(operation = "picture_page", username = %user.username))]
pub async fn picture_page(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Query(query): Query<PictureQuery>,
) -> Json<PicturePage> {
    let uploaded_picture = query.upload_picture.as_deref() == Some(UPLOADED_FLAG);

    Json(PicturePage {
        uploaded_picture,
        media_url: state.config.media_url.clone(),
        picture_url: state.avatars.picture_url(&user.username).await,
        temp_picture_url: state.avatars.temp_picture_url(&user.username),
    })
}

/// Receive the `picture` field and store it as the temporary upload.
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_picture", username = %user.username))]
pub async fn upload_picture(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let result = match multipart {
        Ok(multipart) => receive_picture(&state, &user.username, multipart).await,
        Err(rejection) => Err(AvatarError::Upload(rejection.body_text())),
    };

    match result {
        Ok(size) => {
            tracing::debug!(width = size.width, height = size.height, "Upload ready for cropping");
            found(&format!("{}?upload_picture={}", PICTURE_PAGE, UPLOADED_FLAG))
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                kind = e.kind(),
                username = %user.username,
                "Profile picture upload failed"
            );
            found(PICTURE_PAGE)
        }
    }
}

async fn receive_picture(
    state: &AppState,
    username: &str,
    mut multipart: Multipart,
) -> Result<PictureSize, AvatarError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(AvatarError::MissingPicture),
            Err(e) => return Err(AvatarError::Upload(e.body_text())),
        };

        if field.name() != Some("picture") {
            continue;
        }

        // Browsers send an empty, nameless part when no file was chosen; it
        // must not overwrite the pending upload.
        if field.file_name().map_or(true, str::is_empty) {
            return Err(AvatarError::MissingPicture);
        }

        let reader = StreamReader::new(field.map_err(io::Error::other));
        tokio::pin!(reader);
        return state.avatars.store_upload(username, &mut reader).await;
    }
}

/// Crop the temporary upload into the avatar.
#[tracing::instrument(skip(state, form), fields(operation = "save_picture", username = %user.username))]
pub async fn save_picture(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    form: Result<Form<CropForm>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(form)) => crop_rect(&form),
        Err(rejection) => Err(AvatarError::InvalidCrop(rejection.body_text())),
    };

    let result = match result {
        Ok(rect) => state.avatars.crop(&user.username, rect).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(
            error = %e,
            kind = e.kind(),
            username = %user.username,
            "Profile picture crop failed"
        );
    }

    found(PICTURE_PAGE)
}

fn crop_rect(form: &CropForm) -> Result<CropRect, AvatarError> {
    CropRect::parse(
        form.x.as_deref(),
        form.y.as_deref(),
        form.w.as_deref(),
        form.h.as_deref(),
    )
    .map_err(AvatarError::from)
}
