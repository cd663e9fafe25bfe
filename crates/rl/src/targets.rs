use ml::{QFunction, Tensor};

use crate::step::Window;
use crate::RlError;

/// Builds one supervised regression example per window.
///
/// For a window `s0..sk` the input is `s0.state` and the target is the current
/// output of `q` on `s0.state` with only `s0.action` replaced by the n-step
/// return: the rewards of `s0..s(k-1)` folded backwards on top of
/// `max_a q(sk.state, a)`, or on top of `0` when `sk` ended its episode.
///
/// All head and tail states of the batch go through `q` in a single forward call.
pub fn build_targets<Q: QFunction + ?Sized>(
    batch: &[&Window],
    q: &Q,
    gamma: f32,
) -> Result<(Tensor, Tensor), RlError> {
    let n = batch.len();
    let boundary: Vec<&[f32]> = batch
        .iter()
        .map(|w| &*w.head().state)
        .chain(batch.iter().map(|w| &*w.tail().state))
        .collect();
    let output = q.forward(&Tensor::stack(&boundary)?)?;
    if output.rows() != 2 * n {
        return Err(ml::MlError::ShapeMismatch(format!(
            "approximator returned {} rows for {} states",
            output.rows(),
            2 * n
        ))
        .into());
    }
    let num_actions = output.cols();
    let bootstrap = output.max_rows();

    let mut targets = Tensor::zeros(vec![n, num_actions]);
    for (i, window) in batch.iter().enumerate() {
        let head = window.head();
        if head.action >= num_actions {
            return Err(RlError::InvalidAction { action: head.action, num_actions });
        }
        let tail_value = if window.tail().done { 0.0 } else { bootstrap[n + i] };
        let target = targets.row_mut(i);
        target.copy_from_slice(output.row(i));
        target[head.action] = window.discounted_return(gamma, tail_value);
    }

    let inputs = Tensor::stack(&boundary[..n])?;
    Ok((inputs, targets))
}
