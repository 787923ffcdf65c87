use fxconv::core::{ConversionState, Currency, PriceBoard, RateResolver, Refresher};
use std::fs;
use std::time::Duration;
use tracing::info;

mod test_utils {
    pub fn write_config(content: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        std::fs::write(config_file.path(), content).expect("Failed to write config file");
        config_file
    }
}

#[test_log::test(tokio::test)]
async fn test_convert_command_with_config() {
    let config_file = test_utils::write_config(
        r#"
        pairs:
          - symbol: "USD/INR"
            price: 83.0
        "#,
    );

    let result = fxconv::run_command(
        fxconv::AppCommand::Convert {
            from: Currency::Usd,
            to: Currency::Inr,
            amount: "2".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_unavailable_rate_is_not_an_error() {
    let config_file = test_utils::write_config("source: EUR\ntarget: AUD\n");

    let result = fxconv::run_command(
        fxconv::AppCommand::Convert {
            from: Currency::Eur,
            to: Currency::Aud,
            amount: "10".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_invalid_config_is_reported() {
    let config_file = test_utils::write_config(
        r#"
        pairs:
          - symbol: "EUR/USD"
            price: -1.0
        "#,
    );

    let result = fxconv::run_command(
        fxconv::AppCommand::Board {
            ticks: 1,
            json: true,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    let err = result.expect_err("Negative seed price should be rejected");
    assert!(format!("{err:#}").contains("positive price"));
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_board_command_runs_ticks() {
    let config_file = test_utils::write_config("refresh_interval_ms: 200\nseed: 7\n");

    let result = fxconv::run_command(
        fxconv::AppCommand::Board {
            ticks: 3,
            json: true,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Board command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_path_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml");

    let result = fxconv::run_command(
        fxconv::AppCommand::Board {
            ticks: 0,
            json: false,
        },
        Some(missing.to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_live_session_conversion_tracks_ticks() {
    let refresher = Refresher::start(
        PriceBoard::seeded(),
        Duration::from_millis(1000),
        3.0,
        <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(21),
    );
    let mut prices = refresher.subscribe();

    let mut state = ConversionState::default().with_amount("100");
    for _ in 0..5 {
        prices.changed().await.unwrap();
        let board = prices.borrow_and_update().clone();
        let rate = board
            .resolve_rate(Currency::Usd, Currency::Inr)
            .expect("USD/INR is stored directly");
        state = state.converted(&board);
        info!(tick = board.tick, rate, converted = state.converted_amount, "Converted");

        assert!((state.converted_amount - fxconv::core::round2(rate * 100.0)).abs() < 1e-9);
        assert!(rate >= 80.05 * 0.97 - 0.005 && rate <= 80.05 * 1.03 + 0.005);
    }

    refresher.stop().await;
    assert!(prices.changed().await.is_err());
}

#[test]
fn test_setup_writes_loadable_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fxconv::cli::setup::setup_at_path(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("USD/INR"));

    let config = fxconv::core::config::AppConfig::load_from_path(&path).unwrap();
    assert_eq!(config.board().unwrap().pairs(), PriceBoard::seeded().pairs());
}
