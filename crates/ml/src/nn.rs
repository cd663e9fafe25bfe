use crate::{MlError, Tensor};

/// A differentiable layer operating on `[batch, features]` tensors.
pub trait Layer {
    fn forward(&self, x: &Tensor) -> Result<Tensor, MlError>;
    /// Returns the gradient with respect to `x` and one gradient per parameter,
    /// in the same order as [`Layer::params_mut`].
    fn backward(&self, x: &Tensor, grad: &Tensor) -> (Tensor, Vec<Tensor>);
    fn params(&self) -> Vec<&Tensor> {
        Vec::new()
    }
    fn params_mut(&mut self) -> Vec<&mut Tensor> {
        Vec::new()
    }
}

/// A fully connected layer computing `y = x Wᵀ + b`.
#[derive(Clone, Debug)]
pub struct Dense {
    /// Weight matrix, `[out_dim, in_dim]`.
    pub w: Tensor,
    /// Bias vector, `[out_dim]`.
    pub b: Tensor,
    in_dim: usize,
    out_dim: usize,
}

impl Dense {
    pub fn new(weights: Vec<f32>, bias: Vec<f32>, in_dim: usize, out_dim: usize) -> Self {
        assert_eq!(weights.len(), in_dim * out_dim);
        assert_eq!(bias.len(), out_dim);
        Self {
            w: Tensor::from_vec(vec![out_dim, in_dim], weights),
            b: Tensor::from_vec(vec![out_dim], bias),
            in_dim,
            out_dim,
        }
    }

    /// Glorot-uniform weights, zero bias.
    pub fn xavier(in_dim: usize, out_dim: usize, rng: &fastrand::Rng) -> Self {
        let limit = (6.0 / (in_dim + out_dim) as f32).sqrt();
        let weights = (0..in_dim * out_dim)
            .map(|_| rng.f32() * 2.0 * limit - limit)
            .collect();
        Self::new(weights, vec![0.0; out_dim], in_dim, out_dim)
    }

}

impl Layer for Dense {
    fn forward(&self, x: &Tensor) -> Result<Tensor, MlError> {
        if x.cols() != self.in_dim {
            return Err(MlError::shape(&[x.rows(), self.in_dim], &x.shape));
        }
        let batch = x.rows();
        let mut y = vec![0f32; batch * self.out_dim];
        for (n, row) in x.iter_rows().enumerate() {
            for o in 0..self.out_dim {
                let weights = &self.w.data[o * self.in_dim..(o + 1) * self.in_dim];
                let dot: f32 = weights.iter().zip(row).map(|(w, v)| w * v).sum();
                y[n * self.out_dim + o] = dot + self.b.data[o];
            }
        }
        Ok(Tensor::from_vec(vec![batch, self.out_dim], y))
    }

    fn backward(&self, x: &Tensor, grad: &Tensor) -> (Tensor, Vec<Tensor>) {
        let batch = x.rows();
        let mut grad_input = vec![0.0; batch * self.in_dim];
        let mut grad_w = vec![0.0; self.in_dim * self.out_dim];
        let mut grad_b = vec![0.0; self.out_dim];
        for n in 0..batch {
            let xs = x.row(n);
            let gs = grad.row(n);
            for (o, &go) in gs.iter().enumerate() {
                for i in 0..self.in_dim {
                    grad_w[o * self.in_dim + i] += go * xs[i];
                    grad_input[n * self.in_dim + i] += self.w.data[o * self.in_dim + i] * go;
                }
                grad_b[o] += go;
            }
        }
        (
            Tensor::from_vec(vec![batch, self.in_dim], grad_input),
            vec![
                Tensor::from_vec(vec![self.out_dim, self.in_dim], grad_w),
                Tensor::from_vec(vec![self.out_dim], grad_b),
            ],
        )
    }

    fn params(&self) -> Vec<&Tensor> {
        vec![&self.w, &self.b]
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor> {
        vec![&mut self.w, &mut self.b]
    }
}

#[derive(Default)]
pub struct Relu;

impl Layer for Relu {
    fn forward(&self, x: &Tensor) -> Result<Tensor, MlError> {
        let data = x.data.iter().map(|&v| v.max(0.0)).collect();
        Ok(Tensor::from_vec(x.shape.clone(), data))
    }

    fn backward(&self, x: &Tensor, grad: &Tensor) -> (Tensor, Vec<Tensor>) {
        let data = x
            .data
            .iter()
            .zip(&grad.data)
            .map(|(&v, &g)| if v > 0.0 { g } else { 0.0 })
            .collect();
        (Tensor::from_vec(x.shape.clone(), data), Vec::new())
    }
}

/// Layers applied in order.
#[derive(Default)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
}

impl Sequential {
    #[must_use]
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn push<L: Layer + 'static>(&mut self, layer: L) {
        self.layers.push(Box::new(layer));
    }

    /// Forward pass keeping every intermediate activation for [`Sequential::backward`].
    ///
    /// The returned activations start with `x` itself and end with the output.
    pub fn forward(&self, x: &Tensor) -> Result<(Tensor, Vec<Tensor>), MlError> {
        let mut out = x.clone();
        let mut activations = vec![out.clone()];
        for layer in &self.layers {
            out = layer.forward(&out)?;
            activations.push(out.clone());
        }
        Ok((out, activations))
    }

    /// Forward pass without recording activations.
    pub fn predict(&self, x: &Tensor) -> Result<Tensor, MlError> {
        self.layers
            .iter()
            .try_fold(x.clone(), |out, layer| layer.forward(&out))
    }

    /// Back-propagates `grad` through the recorded activations.
    ///
    /// Parameter gradients come back in the order of [`Sequential::params_mut`].
    pub fn backward(&self, activations: &[Tensor], grad: &Tensor) -> (Tensor, Vec<Tensor>) {
        let mut grad_out = grad.clone();
        let mut per_layer = Vec::with_capacity(self.layers.len());
        for (layer, input) in self
            .layers
            .iter()
            .rev()
            .zip(activations.iter().rev().skip(1))
        {
            let (g_in, p) = layer.backward(input, &grad_out);
            grad_out = g_in;
            per_layer.push(p);
        }
        let param_grads = per_layer.into_iter().rev().flatten().collect();
        (grad_out, param_grads)
    }

    pub fn params(&self) -> Vec<&Tensor> {
        self.layers.iter().flat_map(|l| l.params()).collect()
    }

    pub fn params_mut(&mut self) -> Vec<&mut Tensor> {
        let mut out = Vec::new();
        for layer in &mut self.layers {
            out.extend(layer.params_mut());
        }
        out
    }
}
