//! Grounding prompt rendering.
//!
//! Every agent answers under the same fixed instruction template; only the
//! slot holding the ingested content differs between modes. The refusal
//! wording is a contract: clients and tests match on it verbatim.

use crate::document::{FileHandle, IngestedContext};

/// Exact refusal emitted when the answer is not present in the documents.
pub const REFUSAL: &str = "Sorry, I can't find that information in the provided documents.";

/// Renders the grounding instructions for an ingested context.
///
/// Plain text is embedded verbatim; file handles become a human-readable
/// manifest, since their content travels with the request instead.
pub fn render(context: &IngestedContext) -> String {
    let slot = match context {
        IngestedContext::PlainText(text) => text.clone(),
        IngestedContext::FileHandles(handles) => manifest(handles),
    };

    format!(
        "You are a helpful assistant that answers questions strictly based on \
         the provided PDF documents.\n\
         If the answer is not present in the documents, reply: \"{REFUSAL}\"\n\
         Do not make up information or provide advice beyond what is contained \
         in the documents.\n\
         Use only the information from the following document content:\n\n\
         {slot}"
    )
}

/// Human-readable description of attached files for the template slot.
fn manifest(handles: &[FileHandle]) -> String {
    if handles.is_empty() {
        return "PDF(s) attached: none".to_string();
    }
    let names: Vec<&str> = handles.iter().map(|handle| handle.name.as_str()).collect();
    format!(
        "PDF(s) attached: {} (the file content accompanies the request separately)",
        names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_wording_is_stable() {
        assert_eq!(
            REFUSAL,
            "Sorry, I can't find that information in the provided documents."
        );
    }

    #[test]
    fn rendered_template_carries_the_refusal_contract() {
        let rendered = render(&IngestedContext::PlainText(String::new()));
        assert!(rendered.contains(REFUSAL));
    }

    #[test]
    fn plain_text_is_embedded_verbatim() {
        let rendered = render(&IngestedContext::PlainText("Total: $42".to_string()));
        assert!(rendered.ends_with("Total: $42"));
    }

    #[test]
    fn file_handles_become_a_manifest() {
        let context = IngestedContext::FileHandles(vec![
            FileHandle::new("file-1", "report.pdf"),
            FileHandle::new("file-2", "appendix.pdf"),
        ]);
        let rendered = render(&context);
        assert!(rendered.contains("PDF(s) attached: report.pdf, appendix.pdf"));
        // The raw provider ids never leak into the prompt.
        assert!(!rendered.contains("file-1"));
    }

    #[test]
    fn same_context_renders_identically() {
        let context = IngestedContext::PlainText("stable".to_string());
        assert_eq!(render(&context), render(&context));
    }
}
