//! HTTP handlers for the chat surface.
//!
//! Two inbound events drive the whole service: uploading documents and
//! submitting a message. The transcript endpoint exposes the ordered
//! conversation for rendering.

mod documents;
mod messages;

pub use documents::DocumentsUploaded;
pub use messages::{Health, MessageSent, SendMessage, Transcript};

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::service::ServiceState;

/// Upper bound for upload request bodies.
const UPLOAD_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Builds the API router.
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .route("/health", get(messages::health))
        .route("/api/documents", post(documents::upload_documents))
        .route("/api/messages", post(messages::send_message))
        .route("/api/transcript", get(messages::get_transcript))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use askpdf_core::ProviderConfig;
    use askpdf_core::session::MessageRole;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::json;

    use super::*;
    use crate::service::ServiceState;

    fn offline_server() -> TestServer {
        let state = ServiceState::from_config(ProviderConfig::default()).unwrap();
        TestServer::new(routes(state)).unwrap()
    }

    /// Assembles a one-page PDF with the given text, uncompressed,
    /// with a correct cross-reference table.
    fn minimal_pdf(text: &str) -> Vec<u8> {
        let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ),
        ];

        let mut pdf = String::from("%PDF-1.4\n");
        let mut offsets = Vec::new();
        for (index, object) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", index + 1, object));
        }
        let xref_offset = pdf.len();
        pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            pdf.push_str(&format!("{offset:010} 00000 n \n"));
        }
        pdf.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
            objects.len() + 1,
            xref_offset
        ));
        pdf.into_bytes()
    }

    fn pdf_form(mode: &str, name: &str, data: Vec<u8>) -> MultipartForm {
        MultipartForm::new().add_text("mode", mode).add_part(
            "file",
            Part::bytes(data)
                .file_name(name)
                .mime_type("application/pdf"),
        )
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let server = offline_server();
        let response = server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Health>().status, "ok");
    }

    #[tokio::test]
    async fn upload_then_ask_answers_from_extracted_text() {
        let server = offline_server();

        let response = server
            .post("/api/documents")
            .multipart(pdf_form("text", "invoice.pdf", minimal_pdf("Total: $42")))
            .await;
        response.assert_status(StatusCode::CREATED);

        let uploaded = response.json::<DocumentsUploaded>();
        assert_eq!(uploaded.files, ["invoice.pdf"]);
        assert!(uploaded.context_preview.contains("answers questions strictly"));

        // Offline fallback echoes the grounding, which must carry the
        // extracted document text.
        let response = server
            .post("/api/messages")
            .json(&json!({"text": "What is the total?"}))
            .await;
        response.assert_status_ok();
        assert!(response.json::<MessageSent>().reply.contains("Total: $42"));
    }

    #[tokio::test]
    async fn transcript_interleaves_turns() {
        let server = offline_server();

        let response = server.get("/api/transcript").await;
        response.assert_status_ok();
        assert!(response.json::<Transcript>().messages.is_empty());

        for text in ["first", "second"] {
            server
                .post("/api/messages")
                .json(&json!({"text": text}))
                .await
                .assert_status_ok();
        }

        let transcript = server.get("/api/transcript").await.json::<Transcript>();
        assert_eq!(transcript.messages.len(), 4);

        let roles: Vec<MessageRole> = transcript
            .messages
            .iter()
            .map(|message| message.role())
            .collect();
        assert_eq!(
            roles,
            [
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
            ]
        );
        assert_eq!(transcript.messages[0].content(), "first");
        assert_eq!(transcript.messages[2].content(), "second");
    }

    #[tokio::test]
    async fn unknown_mode_is_rejected() {
        let server = offline_server();
        let response = server
            .post("/api/documents")
            .multipart(pdf_form("ocr", "scan.pdf", minimal_pdf("hello")))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upload_without_files_is_rejected() {
        let server = offline_server();
        let response = server
            .post("/api/documents")
            .multipart(MultipartForm::new().add_text("mode", "text"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn scanned_mode_without_credential_is_rejected() {
        let server = offline_server();
        let response = server
            .post("/api/documents")
            .multipart(pdf_form("scanned", "scan.pdf", minimal_pdf("hello")))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let server = offline_server();
        let response = server
            .post("/api/messages")
            .json(&json!({"text": "   "}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_upload_keeps_previous_agent_and_history() {
        let server = offline_server();

        server
            .post("/api/documents")
            .multipart(pdf_form("text", "invoice.pdf", minimal_pdf("Total: $42")))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/messages")
            .json(&json!({"text": "What is the total?"}))
            .await
            .assert_status_ok();

        let response = server
            .post("/api/documents")
            .multipart(pdf_form("text", "junk.pdf", b"not a pdf at all".to_vec()))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // The earlier agent still answers, and the earlier turns survive.
        let reply = server
            .post("/api/messages")
            .json(&json!({"text": "And again, what is the total?"}))
            .await
            .json::<MessageSent>();
        assert!(reply.reply.contains("Total: $42"));

        let transcript = server.get("/api/transcript").await.json::<Transcript>();
        assert_eq!(transcript.messages.len(), 4);
        assert_eq!(transcript.messages[0].content(), "What is the total?");
    }
}
