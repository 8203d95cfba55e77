//! Cross-cutting, shared constants.

/// Service name reported by the status endpoint.
pub const SERVICE_NAME: &str = "vLLM Rerank API";

/// Model loaded at startup when `RERANK_DEFAULT_MODEL` is not set.
pub const DEFAULT_MODEL_NAME: &str = "BAAI/bge-reranker-large";

/// Maximum tokenized length of a `(query, document)` pair.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Maximum number of pairs per forward pass.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Default Hugging Face endpoint used for remote model fetches.
pub const DEFAULT_HF_ENDPOINT: &str = "https://huggingface.co";

/// Number of query characters included in request logs.
pub const QUERY_LOG_PREFIX_CHARS: usize = 50;

/// Files a cross-encoder model directory must contain.
pub const MODEL_CONFIG_FILE: &str = "config.json";
pub const MODEL_WEIGHTS_FILE: &str = "model.safetensors";
pub const MODEL_TOKENIZER_FILE: &str = "tokenizer.json";

/// All files fetched for a remote model, in download order.
pub const MODEL_FILES: [&str; 3] = [MODEL_CONFIG_FILE, MODEL_TOKENIZER_FILE, MODEL_WEIGHTS_FILE];
