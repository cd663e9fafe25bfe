use ml::Tensor;

#[test]
fn stack_builds_batch() {
    let a = vec![1.0, 2.0];
    let b = vec![3.0, 4.0];
    let t = Tensor::stack(&[&a[..], &b[..]]).unwrap();
    assert_eq!(t.shape, vec![2, 2]);
    assert_eq!(t.row(1), &[3.0, 4.0]);
}

#[test]
fn stack_rejects_ragged_or_empty() {
    let a = vec![1.0, 2.0];
    let b = vec![3.0];
    assert!(Tensor::stack(&[&a[..], &b[..]]).is_err());
    let empty: [&[f32]; 0] = [];
    assert!(Tensor::stack(&empty).is_err());
}

#[test]
fn row_reductions() {
    let t = Tensor::from_vec(vec![2, 3], vec![0.5, 2.0, -1.0, 3.0, 3.0, 1.0]);
    assert_eq!(t.max_rows(), vec![2.0, 3.0]);
    assert_eq!(t.argmax_rows(), vec![1, 0]);
}

#[test]
fn row_mut_edits_in_place() {
    let mut t = Tensor::zeros(vec![2, 2]);
    t.row_mut(1)[0] = 5.0;
    assert_eq!(t.data, vec![0.0, 0.0, 5.0, 0.0]);
    assert!(t.all_finite());
    t.data[0] = f32::NAN;
    assert!(!t.all_finite());
}
