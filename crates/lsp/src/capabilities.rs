use tower_lsp::lsp_types::*;

pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(
            TextDocumentSyncKind::INCREMENTAL,
        )),
        completion_provider: Some(CompletionOptions {
            // `namespace ` is usually followed by a space before the name
            trigger_characters: Some(vec![" ".to_string()]),
            ..Default::default()
        }),
        ..Default::default()
    }
}
