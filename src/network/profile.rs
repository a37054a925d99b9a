use std::path::Path;

use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::layers::dense::Layer;
use crate::loss;
use crate::math::Matrix;
use crate::network::network::Network;
use crate::optim;
use crate::train::train_config::TrainProps;

/// A strategy reference: registry name plus its JSON parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyAttr {
    pub name: String,
    #[serde(default)]
    pub props: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    /// `source_size` rows × `target_size` columns.
    pub w: Vec<Vec<f64>>,
    pub b: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerProfile {
    pub source_size: usize,
    pub target_size: usize,
    pub weight: WeightProfile,
    pub activation: StrategyAttr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropsProfile {
    pub loss: StrategyAttr,
    pub optimizer: StrategyAttr,
    pub err_limit: f64,
    pub max_epoch: usize,
    #[serde(default)]
    pub patience: Option<usize>,
}

/// Flat, serializable snapshot of a [`Network`]: shape, parameters, and the
/// training configuration (the progress channel excluded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub input_size: usize,
    pub output_size: usize,
    pub props: PropsProfile,
    pub synaptics: Vec<LayerProfile>,
}

impl NetworkProfile {
    pub(crate) fn capture(network: &Network) -> NetworkProfile {
        let config = network.config();
        NetworkProfile {
            input_size: network.input_size(),
            output_size: network.output_size(),
            props: PropsProfile {
                loss: StrategyAttr {
                    name: config.loss.name().to_string(),
                    props: config.loss.props(),
                },
                optimizer: StrategyAttr {
                    name: config.optimizer.name().to_string(),
                    props: config.optimizer.props(),
                },
                err_limit: config.err_limit,
                max_epoch: config.max_epoch,
                patience: Some(config.patience),
            },
            synaptics: network
                .layers()
                .iter()
                .map(|layer| LayerProfile {
                    source_size: layer.source_size(),
                    target_size: layer.target_size(),
                    weight: WeightProfile {
                        w: layer.weights.data.clone(),
                        b: layer.biases.clone(),
                    },
                    activation: StrategyAttr {
                        name: layer.activation.name().to_string(),
                        props: layer.activation.props(),
                    },
                })
                .collect(),
        }
    }

    pub(crate) fn restore_layers(&self) -> Result<Vec<Layer>> {
        self.synaptics
            .iter()
            .map(|sy| {
                let activation = ActivationFunction::load(&sy.activation.name, &sy.activation.props)?;
                Layer::from_parts(
                    sy.source_size,
                    sy.target_size,
                    Matrix::from_data(sy.weight.w.clone()),
                    sy.weight.b.clone(),
                    activation,
                )
            })
            .collect()
    }

    /// Serializes the profile to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a profile from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<NetworkProfile> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl PropsProfile {
    pub(crate) fn restore(&self) -> Result<TrainProps> {
        Ok(TrainProps {
            loss: Some(loss::load(&self.loss.name, &self.loss.props)?),
            optimizer: Some(optim::load(&self.optimizer.name, &self.optimizer.props)?),
            err_limit: Some(self.err_limit),
            max_epoch: Some(self.max_epoch),
            patience: self.patience,
            progress_tx: None,
        })
    }
}
