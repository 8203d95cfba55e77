use std::io;
use std::path::Path;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

use crate::constants::MODEL_TOKENIZER_FILE;

const PAD_TOKEN_CANDIDATES: [&str; 2] = ["<pad>", "[PAD]"];

/// Loads `tokenizer.json` from a model directory, truncating pairs to `max_len`
/// and padding batches to their longest member.
pub fn load_pair_tokenizer(model_dir: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let tokenizer_path = model_dir.join(MODEL_TOKENIZER_FILE);
    let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    // Keep the tokenizer's own padding config when it ships one; XLM-R style models
    // need the real pad id because position ids are derived from it.
    if tokenizer.get_padding().is_none() {
        let (pad_token, pad_id) = PAD_TOKEN_CANDIDATES
            .iter()
            .find_map(|token| tokenizer.token_to_id(token).map(|id| (*token, id)))
            .unwrap_or(("[PAD]", 0));

        tokenizer.with_padding(Some(PaddingParams {
            pad_id,
            pad_token: pad_token.to_string(),
            ..Default::default()
        }));
    }

    Ok(tokenizer)
}
