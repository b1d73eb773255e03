pub mod capabilities;
pub mod completion;
pub mod util;

use crate::util::Document;
use dashmap::DashMap;
use nsfill_core::{InferenceConfig, NamespaceEngine};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub struct LspServer {
    client: Client,
    engine: RwLock<Arc<NamespaceEngine>>,
    pub documents: DashMap<Url, Arc<Document>>,
}

impl LspServer {
    pub fn new(client: Client, engine: Arc<NamespaceEngine>) -> Self {
        Self {
            client,
            engine: RwLock::new(engine),
            documents: DashMap::new(),
        }
    }

    pub async fn engine(&self) -> Arc<NamespaceEngine> {
        self.engine.read().await.clone()
    }

    /// Replaces the engine when the client sent `initializationOptions`.
    async fn configure(&self, options: serde_json::Value) {
        let engine = InferenceConfig::from_json(options).and_then(NamespaceEngine::new);
        match engine {
            Ok(engine) => {
                tracing::info!("configured from initialization options: {:?}", engine.config());
                *self.engine.write().await = Arc::new(engine);
            }
            Err(e) => {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Ignoring initialization options: {}", e),
                    )
                    .await;
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = params.initialization_options {
            self.configure(options).await;
        }

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "nsfill".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "nsfill language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.documents.clear();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.documents
            .insert(doc.uri, Arc::new(Document::new(doc.text, doc.version)));
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        if let Some(mut doc_ref) = self.documents.get_mut(&uri) {
            let doc = doc_ref.value_mut();
            match doc.apply(version, params.content_changes) {
                Some(updated) => *doc = Arc::new(updated),
                None => tracing::debug!(
                    "dropping stale change for {} (v{} < v{})",
                    uri,
                    version,
                    doc.version
                ),
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.remove(&params.text_document.uri);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;
        tracing::debug!(
            "LSP Request: textDocument/completion uri={} pos={}:{}",
            uri,
            pos.line,
            pos.character
        );

        let uri = uri.clone();
        let result = completion::completion(self, params).await;
        match &result {
            Ok(Some(CompletionResponse::Array(items))) if !items.is_empty() => {
                self.client
                    .log_message(
                        MessageType::LOG,
                        format!("Suggested namespace {} for {}", items[0].label, uri),
                    )
                    .await
            }
            Ok(_) => tracing::trace!("no namespace suggestion for {}", uri),
            Err(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("LSP Error: {}", e))
                    .await
            }
        }
        result
    }
}

/// Serves the language server on stdio until the client disconnects.
pub async fn run_server(config: InferenceConfig) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let engine = Arc::new(NamespaceEngine::new(config)?);

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        tower_lsp::LspService::new(move |client| LspServer::new(client, engine.clone()));
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}
