use candle_core::{Device, Tensor};
use tokenizers::{Encoding, Tokenizer};
use tracing::{debug, info};

use crate::constants::{MODEL_CONFIG_FILE, MODEL_TOKENIZER_FILE, MODEL_WEIGHTS_FILE};
use crate::scoring::{RelevanceScorer, ScoringError};

use super::classifier::SequenceClassifier;
use super::config::CrossEncoderConfig;
use super::device::select_device;
use super::error::CrossEncoderError;
use super::tokenizer::load_pair_tokenizer;

/// Candle-backed cross-encoder. Scores are sigmoid-activated logits in `[0, 1]`.
pub struct CrossEncoder {
    model_name: String,
    device: Device,
    config: CrossEncoderConfig,
    model: SequenceClassifier,
    tokenizer: Tokenizer,
}

impl std::fmt::Debug for CrossEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossEncoder")
            .field("model_name", &self.model_name)
            .field("device", &format!("{:?}", self.device))
            .field("architecture", &self.model.architecture())
            .field("config", &self.config)
            .finish()
    }
}

impl CrossEncoder {
    /// Loads model weights and tokenizer from `config.model_dir`.
    pub fn load(
        model_name: impl Into<String>,
        config: CrossEncoderConfig,
    ) -> Result<Self, CrossEncoderError> {
        let model_name = model_name.into();

        if let Err(reason) = config.validate() {
            return Err(CrossEncoderError::InvalidConfig { reason });
        }

        let model_dir = &config.model_dir;
        if !model_dir.is_dir() {
            return Err(CrossEncoderError::ModelNotFound {
                path: model_dir.clone(),
            });
        }

        for file in [MODEL_CONFIG_FILE, MODEL_WEIGHTS_FILE, MODEL_TOKENIZER_FILE] {
            if !model_dir.join(file).is_file() {
                return Err(CrossEncoderError::ModelLoadFailed {
                    reason: format!("Missing {} in {}", file, model_dir.display()),
                });
            }
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for cross-encoder");

        info!(
            model = %model_name,
            model_dir = %model_dir.display(),
            max_length = config.max_length,
            "Loading cross-encoder model"
        );

        let model = SequenceClassifier::load(model_dir, &device).map_err(|e| {
            CrossEncoderError::ModelLoadFailed {
                reason: format!("Failed to load classifier: {}", e),
            }
        })?;

        let tokenizer = load_pair_tokenizer(model_dir, config.max_length).map_err(|e| {
            CrossEncoderError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            model = %model_name,
            architecture = ?model.architecture(),
            "Cross-encoder model loaded successfully"
        );

        Ok(Self {
            model_name,
            device,
            config,
            model,
            tokenizer,
        })
    }

    pub fn config(&self) -> &CrossEncoderConfig {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Scores `documents` against `query`, one forward pass per `batch_size` chunk.
    pub fn predict(&self, query: &str, documents: &[String]) -> Result<Vec<f32>, CrossEncoderError> {
        let mut scores = Vec::with_capacity(documents.len());

        for chunk in documents.chunks(self.config.batch_size) {
            let pairs: Vec<(&str, &str)> = chunk.iter().map(|doc| (query, doc.as_str())).collect();

            let encodings = self.tokenizer.encode_batch(pairs, true).map_err(|e| {
                CrossEncoderError::TokenizationFailed {
                    reason: e.to_string(),
                }
            })?;

            let logits = self.forward_batch(&encodings)?;
            scores.extend(logits.into_iter().map(sigmoid));
        }

        debug!(
            model = %self.model_name,
            num_documents = documents.len(),
            "Scored document batch"
        );

        Ok(scores)
    }

    fn forward_batch(&self, encodings: &[Encoding]) -> Result<Vec<f32>, CrossEncoderError> {
        let batch = encodings.len();
        let seq_len = encodings.first().map(|e| e.get_ids().len()).unwrap_or(0);

        let mut input_ids = Vec::with_capacity(batch * seq_len);
        let mut type_ids = Vec::with_capacity(batch * seq_len);
        let mut attention_mask = Vec::with_capacity(batch * seq_len);

        for encoding in encodings {
            if encoding.get_ids().len() != seq_len {
                return Err(CrossEncoderError::InferenceFailed {
                    reason: "tokenizer returned unpadded batch".to_string(),
                });
            }
            input_ids.extend_from_slice(encoding.get_ids());
            type_ids.extend_from_slice(encoding.get_type_ids());
            // The tokenizer's mask excludes padding; an all-ones mask would not.
            attention_mask.extend_from_slice(encoding.get_attention_mask());
        }

        let shape = (batch, seq_len);
        let input_ids = Tensor::from_vec(input_ids, shape, &self.device)?;
        let type_ids = Tensor::from_vec(type_ids, shape, &self.device)?;
        let attention_mask = Tensor::from_vec(attention_mask, shape, &self.device)?;

        let logits = self
            .model
            .forward(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| CrossEncoderError::InferenceFailed {
                reason: e.to_string(),
            })?;

        Ok(logits.flatten_all()?.to_vec1::<f32>()?)
    }
}

impl RelevanceScorer for CrossEncoder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn score_batch(&self, query: &str, documents: &[String]) -> Result<Vec<f32>, ScoringError> {
        Ok(self.predict(query, documents)?)
    }
}

/// Maps a raw logit to `(0, 1)`.
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
