use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::quiz_dto::UploadResponse,
    error::{Error, Result},
    AppState,
};

struct UploadedFile {
    filename: String,
    data: bytes::Bytes,
}

#[axum::debug_handler]
pub async fn upload_questions(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    let mut multipart = multipart?;
    let mut file: Option<UploadedFile> = None;
    let mut topic: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to get next field: {}", e);
        Error::Multipart(e)
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "file" if file.is_none() => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                if !data.is_empty() {
                    file = Some(UploadedFile { filename, data });
                }
            }
            "topic" => {
                let value = field.text().await?;
                let value = value.trim();
                if !value.is_empty() {
                    topic = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    let file = file.ok_or(Error::NoFileProvided)?;
    let topic = topic.as_deref().unwrap_or(&state.default_topic);
    tracing::info!(filename = %file.filename, bytes = file.data.len(), "Upload received");

    let questions = state
        .upload_service
        .process_upload(&file.filename, &file.data, topic)
        .await?;

    Ok(Json(UploadResponse { questions }))
}
