use fxconv::AppCommand;
use fxconv::cli::convert::ConvertRequest;
use std::fs;
use tracing::{error, info};

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const USD_RESPONSE: &str = r#"{
        "result": "success",
        "time_last_update_unix": 1760745751,
        "base_code": "USD",
        "rates": {"USD": 1, "EUR": 0.857, "NGN": 1466.52}
    }"#;

    pub const NGN_RESPONSE: &str = r#"{
        "result": "success",
        "base_code": "NGN",
        "rates": {"NGN": 1, "EUR": 0.000584, "USD": 0.000682}
    }"#;

    pub async fn mount_latest(mock_server: &MockServer, base: &str, body: &str, calls: u64) {
        let url_path = format!("/v6/latest/{base}");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(calls)
            .mount(mock_server)
            .await;
    }

    pub fn write_config(base_url: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
            providers:
              open_er:
                base_url: {base_url}
                retries: 0
            defaults:
              from: "USD"
              to: "NGN"
        "#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

fn convert(amount: &str, from: Option<&str>, to: Option<&str>, swap: bool) -> AppCommand {
    AppCommand::Convert(ConvertRequest {
        amount: amount.to_string(),
        from: from.map(str::to_string),
        to: to.map(str::to_string),
        swap,
    })
}

#[test_log::test(tokio::test)]
async fn test_convert_with_defaults_reuses_listing_response() {
    let mock_server = wiremock::MockServer::start().await;
    // The list and the USD rate lookup share one request
    test_utils::mount_latest(&mock_server, "USD", test_utils::USD_RESPONSE, 1).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxconv::run_command(
        convert("250", None, None, false),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Conversion failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_convert_swapped_pair() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_latest(&mock_server, "USD", test_utils::USD_RESPONSE, 1).await;
    test_utils::mount_latest(&mock_server, "NGN", test_utils::NGN_RESPONSE, 1).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxconv::run_command(
        convert("10000", None, None, true),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Conversion failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_convert_rejects_unknown_currency() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_latest(&mock_server, "USD", test_utils::USD_RESPONSE, 1).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxconv::run_command(
        convert("1", Some("usd"), Some("JPY"), false),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Unknown currency code: JPY"
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_rejects_invalid_amount_without_requests() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_latest(&mock_server, "USD", test_utils::USD_RESPONSE, 0).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxconv::run_command(
        convert("abc", None, None, false),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Invalid amount: Please enter a valid positive number"
    );
}

#[test_log::test(tokio::test)]
async fn test_list_with_search() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_latest(&mock_server, "USD", test_utils::USD_RESPONSE, 1).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxconv::run_command(
        AppCommand::List {
            search: Some("naira".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Listing failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_list_reports_api_failure() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_latest(
        &mock_server,
        "USD",
        r#"{"result": "error", "error-type": "quota-reached"}"#,
        1,
    )
    .await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let err = fxconv::run_command(
        AppCommand::List { search: None },
        Some(config_file.path().to_str().unwrap()),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Failed to load currency list");
    assert!(format!("{err:#}").contains("quota-reached"));
}

#[test_log::test(tokio::test)]
async fn test_missing_config_path_fails() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("config.yaml");

    let result =
        fxconv::run_command(AppCommand::List { search: None }, missing.to_str()).await;
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file")
    );
    assert!(fs::metadata(&missing).is_err());
}

#[test_log::test(tokio::test)]
#[ignore = "talks to open.er-api.com"]
async fn test_real_open_er_api() {
    use fxconv::core::CurrencyRateProvider;
    use fxconv::providers::OpenErProvider;

    let cache = std::sync::Arc::new(fxconv::core::cache::Cache::new());
    let provider = OpenErProvider::new("https://open.er-api.com", cache);

    info!("Fetching USD to NGN rate from open.er-api.com");
    match provider.get_rate("USD", "NGN").await {
        Ok(rate) => {
            info!(?rate, "Received successful rate response");
            assert!(rate > 0.0, "Currency rate should be positive");
        }
        Err(e) => {
            error!("Rate API request failed: {e}\n{e:?}");
            panic!("Rate API request failed: {e}");
        }
    }
}
