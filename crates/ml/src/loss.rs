use crate::{MlError, Tensor};

/// Mean squared error over every element, together with its gradient with
/// respect to `pred`.
pub fn mse(pred: &Tensor, target: &Tensor) -> Result<(f32, Tensor), MlError> {
    if pred.shape != target.shape {
        return Err(MlError::shape(&pred.shape, &target.shape));
    }
    let n = pred.len().max(1) as f32;
    let diff: Vec<f32> = pred.data.iter().zip(&target.data).map(|(p, t)| p - t).collect();
    let loss = diff.iter().map(|d| d * d).sum::<f32>() / n;
    let grad = diff.iter().map(|d| 2.0 * d / n).collect();
    Ok((loss, Tensor::from_vec(pred.shape.clone(), grad)))
}
