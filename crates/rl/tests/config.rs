use rl::{RlError, TrainConfig};

#[test]
fn defaults_are_valid() {
    let config = TrainConfig::default();
    config.validate().unwrap();
    assert_eq!(config.n_step, 10);
    assert_eq!(config.capacity, 10_000);
    assert_eq!(config.batch_size, 128);
}

#[test]
fn json_overrides_only_given_keys() {
    let config = TrainConfig::from_json(r#"{ "n_step": 3, "gamma": 0.9 }"#).unwrap();
    assert_eq!(config.n_step, 3);
    assert_eq!(config.gamma, 0.9);
    assert_eq!(config.samples_per_epoch, TrainConfig::default().samples_per_epoch);
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(TrainConfig::from_json("{ n_step: }"), Err(RlError::Config(_))));
}

#[test]
fn invalid_values_are_rejected_eagerly() {
    let cases: Vec<fn(&mut TrainConfig)> = vec![
        |c| c.n_step = 0,
        |c| c.gamma = 1.0,
        |c| c.gamma = -0.1,
        |c| c.capacity = 0,
        |c| c.batch_size = 0,
        |c| c.batch_size = c.capacity + 1,
        |c| c.samples_per_epoch = 0,
        |c| c.epochs = 0,
        |c| c.learning_rate = 0.0,
        |c| c.reward_window = 0,
        |c| c.temperature = 0.0,
        |c| c.hidden = 0,
    ];
    for (i, mutate) in cases.into_iter().enumerate() {
        let mut config = TrainConfig::default();
        mutate(&mut config);
        assert!(matches!(config.validate(), Err(RlError::Config(_))), "case {i} accepted");
    }
}
