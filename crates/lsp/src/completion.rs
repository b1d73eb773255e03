use crate::LspServer;
use crate::util::{line_prefix, uri_to_path};
use nsfill_core::Suggestion;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

pub async fn completion(
    server: &LspServer,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;

    let Some(path) = uri_to_path(&uri) else {
        return Ok(None);
    };
    let Some(prefix) = server
        .documents
        .get(&uri)
        .and_then(|doc| line_prefix(&doc.content, position))
    else {
        return Ok(None);
    };

    let engine = server.engine().await;

    // Directory walks and descriptor reads stay off the JSON-RPC loop
    let suggestion = match tokio::task::spawn_blocking(move || engine.suggest(&path, &prefix)).await
    {
        Ok(suggestion) => suggestion,
        Err(e) => {
            tracing::warn!("completion lookup for {} did not finish: {}", uri, e);
            None
        }
    };

    Ok(suggestion.map(|s| CompletionResponse::Array(vec![to_completion_item(s)])))
}

pub fn to_completion_item(suggestion: Suggestion) -> CompletionItem {
    CompletionItem {
        label: suggestion.label,
        kind: Some(CompletionItemKind::MODULE),
        detail: Some(suggestion.detail),
        insert_text: Some(suggestion.insert_text),
        ..Default::default()
    }
}
