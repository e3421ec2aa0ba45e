use std::path::Path;

use candle_core::{DType, Device, Module, ModuleT, Tensor};
use candle_nn::{batch_norm, linear, BatchNorm, Linear, VarBuilder, VarMap};

use crate::config::DqnConfig;

/// MLP estimating one Q-value per action from a flat observation.
pub struct QNetwork {
    batch_norm: BatchNorm,
    layers: Vec<Linear>,
    output_layer: Linear,
    pub var_map: VarMap,
    device: Device,
}

impl QNetwork {
    pub fn new(config: &DqnConfig, device: Device) -> anyhow::Result<QNetwork> {
        let var_map = VarMap::new();
        let vb = VarBuilder::from_varmap(&var_map, DType::F32, &device);

        let state_size = config.state_size();
        let batch_norm = batch_norm(state_size, 1e-5, vb.pp("batch_norm"))?;

        let mut layers = Vec::with_capacity(config.mlp_layers.len());
        let mut in_dim = state_size;
        for (i, &out_dim) in config.mlp_layers.iter().enumerate() {
            layers.push(linear(in_dim, out_dim, vb.pp(format!("mlp_{}", i)))?);
            in_dim = out_dim;
        }

        let output_layer = linear(in_dim, config.num_actions, vb.pp("output"))?;

        Ok(QNetwork {
            batch_norm,
            layers,
            output_layer,
            var_map,
            device,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// `x` is (batch, state_size), output is (batch, num_actions).
    pub fn forward(&self, x: &Tensor) -> anyhow::Result<Tensor> {
        // Running statistics only, the network is never trained here
        let mut x = self.batch_norm.forward_t(x, false)?;
        for layer in &self.layers {
            x = layer.forward(&x)?.tanh()?;
        }
        Ok(self.output_layer.forward(&x)?)
    }

    pub fn load_var_map<P: AsRef<Path>>(&mut self, path: P) -> anyhow::Result<()> {
        self.var_map.load(path)?;
        Ok(())
    }

    pub fn save_var_map<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        self.var_map.save(path)?;
        Ok(())
    }
}
