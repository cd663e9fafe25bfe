use ml::{Dense, Layer, Relu, Sequential, Tensor};

fn close(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (*x - *y).abs() < 1e-5)
}

#[test]
fn dense_forward_known_case() {
    let w = vec![1.0, 0.5, -1.0,
                 2.0, 0.2, 0.2];
    let b = vec![0.1, -0.1];
    let dense = Dense::new(w, b, 3, 2);
    let x = Tensor::from_vec(vec![2, 3], vec![1.0, 2.0, 3.0,
                                             0.0, -1.0, 1.0]);
    let y = dense.forward(&x).unwrap();
    assert_eq!(y.shape, vec![2, 2]);
    let expected = vec![
        1.0 + 1.0 - 3.0 + 0.1, 2.0 + 0.4 + 0.6 - 0.1,
        0.0 - 0.5 - 1.0 + 0.1, 0.0 - 0.2 + 0.2 - 0.1,
    ];
    assert!(close(&y.data, &expected), "{:?}", y.data);
}

#[test]
fn dense_rejects_wrong_width() {
    let dense = Dense::new(vec![1.0, 1.0], vec![0.0], 2, 1);
    let x = Tensor::from_vec(vec![1, 3], vec![1.0, 2.0, 3.0]);
    assert!(dense.forward(&x).is_err());
}

#[test]
fn dense_backward_gradients() {
    let w = vec![1.0, 2.0,
                 -3.0, 0.5];
    let b = vec![0.1, -0.2];
    let x = Tensor::from_vec(vec![1, 2], vec![0.5, -1.0]);
    let dense = Dense::new(w, b, 2, 2);
    let grad_out = Tensor::from_vec(vec![1, 2], vec![1.0, -2.0]);
    let (dx, grads) = dense.backward(&x, &grad_out);
    let expected_dx = vec![1.0 * 1.0 + -3.0 * (-2.0), 2.0 * 1.0 + 0.5 * (-2.0)];
    let expected_dw = vec![0.5 * 1.0, -1.0 * 1.0,
                           0.5 * (-2.0), -1.0 * (-2.0)];
    assert!(close(&dx.data, &expected_dx));
    assert!(close(&grads[0].data, &expected_dw));
    assert!(close(&grads[1].data, &grad_out.data));
}

#[test]
fn dense_backward_sums_over_batch() {
    let dense = Dense::new(vec![1.0, -1.0], vec![0.0], 2, 1);
    let x = Tensor::from_vec(vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]);
    let grad_out = Tensor::from_vec(vec![2, 1], vec![1.0, 0.5]);
    let (dx, grads) = dense.backward(&x, &grad_out);
    assert!(close(&grads[0].data, &[1.0 + 1.5, 2.0 + 2.0]));
    assert!(close(&grads[1].data, &[1.5]));
    assert!(close(&dx.data, &[1.0, -1.0, 0.5, -0.5]));
}

fn sum_output(net: &Sequential, x: &Tensor) -> f32 {
    net.predict(x).unwrap().data.iter().sum()
}

#[test]
fn sequential_backward_matches_finite_differences() {
    let rng = fastrand::Rng::with_seed(7);
    let mut net = Sequential::new();
    net.push(Dense::xavier(3, 4, &rng));
    net.push(Dense::xavier(4, 2, &rng));
    let x = Tensor::from_vec(vec![2, 3], vec![0.9, -0.1, 0.3, -0.4, 0.8, 0.2]);

    let (out, activations) = net.forward(&x).unwrap();
    let ones = Tensor::from_vec(out.shape.clone(), vec![1.0; out.len()]);
    let (_, grads) = net.backward(&activations, &ones);
    assert_eq!(grads.len(), 4);

    let epsilon = 1e-3;
    let n_params = net.params().len();
    for p in 0..n_params {
        let len = net.params()[p].len();
        for i in 0..len {
            net.params_mut()[p].data[i] += epsilon;
            let plus = sum_output(&net, &x);
            net.params_mut()[p].data[i] -= 2.0 * epsilon;
            let minus = sum_output(&net, &x);
            net.params_mut()[p].data[i] += epsilon;

            let numerical = (plus - minus) / (2.0 * epsilon);
            let analytical = grads[p].data[i];
            assert!(
                (numerical - analytical).abs() < 1e-2,
                "param {p}[{i}]: numerical {numerical}, analytical {analytical}"
            );
        }
    }
}

#[test]
fn relu_forward_backward() {
    let x = Tensor::from_vec(vec![1, 3], vec![-1.0, 0.0, 2.0]);
    let y = Relu.forward(&x).unwrap();
    assert_eq!(y.data, vec![0.0, 0.0, 2.0]);
    let grad_out = Tensor::from_vec(vec![1, 3], vec![0.1, 0.2, 0.3]);
    let (dx, _) = Relu.backward(&x, &grad_out);
    assert_eq!(dx.data, vec![0.0, 0.0, 0.3]);
}
