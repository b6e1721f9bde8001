use crate::error::{Error, Result};
use crate::models::question::Question;
use crate::services::extract_service::{extract_text, FileKind};
use crate::services::parse_service::parse_questions;
use crate::utils::ids::QuestionIds;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

#[derive(Clone)]
pub struct UploadService {
    uploads_dir: PathBuf,
    ids: Arc<QuestionIds>,
}

impl UploadService {
    pub fn new(uploads_dir: PathBuf, ids: Arc<QuestionIds>) -> Self {
        Self { uploads_dir, ids }
    }

    /// Stages `data`, extracts its text, and parses it into questions on `topic`.
    ///
    /// The staged copy is removed whether or not processing succeeds.
    pub async fn process_upload(&self, filename: &str, data: &[u8], topic: &str) -> Result<Vec<Question>> {
        let kind = FileKind::from_path(filename)?;
        let staged = self.stage_file(kind, data).await?;

        let result = self.questions_from_file(&staged, kind, topic).await;

        if let Err(e) = fs::remove_file(&staged).await {
            tracing::warn!(path = %staged.display(), "Failed to remove staged upload: {}", e);
        }

        let questions = result?;
        tracing::info!(filename, count = questions.len(), topic, "Parsed uploaded questions");
        Ok(questions)
    }

    pub async fn questions_from_file(&self, path: &Path, kind: FileKind, topic: &str) -> Result<Vec<Question>> {
        let text = extract_text(path, kind).await?;
        Ok(parse_questions(&text)
            .into_iter()
            .map(|fragment| fragment.into_question(self.ids.next_id(), topic))
            .collect())
    }

    async fn stage_file(&self, kind: FileKind, data: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.uploads_dir)
            .await
            .map_err(|e| Error::Internal(format!("Failed to create upload directory: {}", e)))?;

        let path = self
            .uploads_dir
            .join(format!("{}.{}", uuid::Uuid::new_v4(), kind.extension()));

        fs::write(&path, data).await.map_err(|e| {
            tracing::error!("Failed to stage upload: {}", e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;

    fn service(dir: &Path) -> UploadService {
        UploadService::new(dir.to_path_buf(), Arc::new(QuestionIds::new()))
    }

    #[tokio::test]
    async fn txt_upload_produces_complete_questions() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());
        let body = b"Q1,a,b,c,d,c,because\nnot a question\nQ2,w,x,y,z,w\n";

        let questions = svc.process_upload("quiz.txt", body, "Trivia").await.unwrap();

        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.question_type == QuestionType::Solo));
        assert!(questions.iter().all(|q| q.topic == "Trivia"));
        assert_eq!(questions[0].correct_answer_index, 2);
        assert_eq!(questions[1].correct_answer_index, 0);
        assert_ne!(questions[0].id, questions[1].id);
    }

    #[tokio::test]
    async fn staged_file_is_removed_after_processing() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());

        svc.process_upload("quiz.txt", b"Q,a,b,c,d,a", "General").await.unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let _ = svc.process_upload("broken.pdf", b"nope", "General").await;
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn unsupported_type_is_rejected_before_staging() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());

        let err = svc.process_upload("data.xyz", b"Q,a,b,c,d,a", "General").await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn parsing_twice_differs_only_in_ids() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());
        let body = b"Q1,a,b,c,d,b,x\nQ2,a,b,c,d,d,y";

        let first = svc.process_upload("a.txt", body, "T").await.unwrap();
        let second = svc.process_upload("a.txt", body, "T").await.unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_ne!(a.id, b.id);
            assert_eq!(Question { id: b.id, ..a.clone() }, *b);
        }
    }
}
