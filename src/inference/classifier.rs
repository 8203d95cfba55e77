use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use candle_transformers::models::xlm_roberta::{
    Config as XlmRobertaConfig, XLMRobertaForSequenceClassification,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use crate::constants::{MODEL_CONFIG_FILE, MODEL_WEIGHTS_FILE};

/// Single-logit relevance head.
const NUM_LABELS: usize = 1;

/// Encoder family, read from `model_type` in `config.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    Bert,
    XlmRoberta,
}

#[derive(Deserialize)]
struct ModelTypeField {
    #[serde(default)]
    model_type: Option<String>,
}

impl Architecture {
    /// Anything that is not a RoBERTa variant is loaded as BERT.
    pub fn detect(config_json: &str) -> Result<Self> {
        let header: ModelTypeField = serde_json::from_str(config_json)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        Ok(match header.model_type.as_deref() {
            Some("xlm-roberta") | Some("roberta") => Architecture::XlmRoberta,
            _ => Architecture::Bert,
        })
    }
}

struct BertForSequenceClassification {
    bert: BertModel,
    classifier: Linear,
}

impl BertForSequenceClassification {
    fn load(vb: VarBuilder, config: &BertConfig) -> Result<Self> {
        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), config)?
        } else {
            BertModel::load(vb.clone(), config)?
        };

        let classifier = candle_nn::linear(config.hidden_size, NUM_LABELS, vb.pp("classifier"))?;

        Ok(Self { bert, classifier })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let output = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;
        let cls_token = output.i((.., 0, ..))?;
        self.classifier.forward(&cls_token)
    }
}

enum ClassifierImpl {
    Bert(BertForSequenceClassification),
    XlmRoberta(XLMRobertaForSequenceClassification),
}

/// Sequence-pair classifier producing one relevance logit per row.
#[derive(Clone)]
pub struct SequenceClassifier {
    inner: Arc<ClassifierImpl>,
    architecture: Architecture,
}

impl SequenceClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_content = std::fs::read_to_string(model_dir.join(MODEL_CONFIG_FILE))?;
        let architecture = Architecture::detect(&config_content)?;
        let weights_path = model_dir.join(MODEL_WEIGHTS_FILE);

        // SAFETY: the weights file is memory-mapped read-only and is not modified
        // while the model is alive.
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let inner = match architecture {
            Architecture::Bert => {
                let config: BertConfig = serde_json::from_str(&config_content)
                    .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;
                ClassifierImpl::Bert(BertForSequenceClassification::load(vb, &config)?)
            }
            Architecture::XlmRoberta => {
                let config: XlmRobertaConfig = serde_json::from_str(&config_content)
                    .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;
                ClassifierImpl::XlmRoberta(XLMRobertaForSequenceClassification::new(
                    NUM_LABELS, &config, vb,
                )?)
            }
        };

        Ok(Self {
            inner: Arc::new(inner),
            architecture,
        })
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// Returns logits of shape `(batch, 1)`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        match self.inner.as_ref() {
            ClassifierImpl::Bert(model) => model.forward(input_ids, token_type_ids, attention_mask),
            ClassifierImpl::XlmRoberta(model) => {
                model.forward(input_ids, attention_mask, token_type_ids)
            }
        }
    }
}
