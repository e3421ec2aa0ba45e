use anyhow::bail;
use candle_core::Tensor;

/// Flattens a tensor, failing on NaN or infinite entries.
pub fn to_checked_vec(tensor: &Tensor) -> anyhow::Result<Vec<f32>> {
    let values = tensor.flatten_all()?.to_vec1::<f32>()?;

    let mut err = String::new();
    if values.iter().any(|x| x.is_nan()) {
        err += "NaN in tensor ";
    }
    if values.iter().any(|x| x.is_infinite()) {
        err += "Inf in tensor";
    }

    if err.is_empty() {
        Ok(values)
    } else {
        bail!(err.trim_end().to_string())
    }
}
