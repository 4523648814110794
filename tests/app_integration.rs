use std::fs;
use std::path::Path;
use tempfile::TempDir;
use ubci::AppCommand;
use ubci::core::catalog::{self, Category};

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const BASKETS_PATH: &str = "/v1/crix/index/baskets";

    pub const UBMI_BASKET: &str = r#"{
        "markets": [
            {"code": "CRIX.UPBIT.KRW-BTC", "weight": 5, "componentRatio": 0.2345},
            {"code": "CRIX.UPBIT.KRW-ETH", "weight": 3, "componentRatio": 0.1234}
        ]
    }"#;

    /// UBMI answers with a two market basket, every other index with an
    /// empty one.
    pub async fn create_mock_server() -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(BASKETS_PATH))
            .and(query_param("code", "IDX.UPBIT.UBMI"))
            .respond_with(ResponseTemplate::new(200).set_body_string(UBMI_BASKET))
            .with_priority(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path(BASKETS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"markets": []}"#))
            .with_priority(10)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn create_failing_server() -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(BASKETS_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn request_count(mock_server: &MockServer) -> usize {
        mock_server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

fn write_config(dir: &Path, base_url: &str) -> (String, std::path::PathBuf) {
    let cache_path = dir.join("cache").join("ubci_index_cache.json");
    let config_path = dir.join("config.yaml");
    let config_content = format!(
        r#"
        providers:
          ubci:
            base_url: "{}"
        cache_path: "{}"
    "#,
        base_url,
        cache_path.display()
    );
    fs::write(&config_path, config_content).expect("Failed to write config file");
    (config_path.to_string_lossy().into_owned(), cache_path)
}

#[test_log::test(tokio::test)]
async fn test_index_tickers_fetches_and_caches() {
    let mock_server = test_utils::create_mock_server().await;
    let temp_dir = TempDir::new().unwrap();
    let (config_path, cache_path) = write_config(temp_dir.path(), &mock_server.uri());

    let result = ubci::run_command(
        AppCommand::Tickers {
            category: Category::Market,
            index: "UBMI".to_string(),
        },
        Some(&config_path),
    )
    .await;
    assert!(result.is_ok(), "Command failed with: {:?}", result.err());

    assert_eq!(
        test_utils::request_count(&mock_server).await,
        catalog::entries().count()
    );
    assert!(cache_path.exists());
    let cached = fs::read_to_string(&cache_path).unwrap();
    assert!(cached.contains("IDX.UPBIT.UBMI"));
    assert!(cached.contains("CRIX.UPBIT.KRW-BTC"));
}

#[test_log::test(tokio::test)]
async fn test_second_run_reads_cache() {
    let mock_server = test_utils::create_mock_server().await;
    let temp_dir = TempDir::new().unwrap();
    let (config_path, _) = write_config(temp_dir.path(), &mock_server.uri());

    ubci::run_command(AppCommand::Query("KRW-BTC".to_string()), Some(&config_path))
        .await
        .unwrap();
    let first = test_utils::request_count(&mock_server).await;

    ubci::run_command(AppCommand::Query("UBMI".to_string()), Some(&config_path))
        .await
        .unwrap();
    assert_eq!(test_utils::request_count(&mock_server).await, first);
}

#[test_log::test(tokio::test)]
async fn test_refresh_ignores_cache() {
    let mock_server = test_utils::create_mock_server().await;
    let temp_dir = TempDir::new().unwrap();
    let (config_path, _) = write_config(temp_dir.path(), &mock_server.uri());
    let entries = catalog::entries().count();

    ubci::run_command(AppCommand::Refresh, Some(&config_path))
        .await
        .unwrap();
    ubci::run_command(AppCommand::Refresh, Some(&config_path))
        .await
        .unwrap();

    assert_eq!(test_utils::request_count(&mock_server).await, entries * 2);
}

#[test_log::test(tokio::test)]
async fn test_failed_fetches_do_not_fail_the_command() {
    let mock_server = test_utils::create_failing_server().await;
    let temp_dir = TempDir::new().unwrap();
    let (config_path, cache_path) = write_config(temp_dir.path(), &mock_server.uri());

    let result = ubci::run_command(AppCommand::Refresh, Some(&config_path)).await;
    assert!(result.is_ok(), "Command failed with: {:?}", result.err());

    // Failed indices are stored as empty baskets.
    let cached = fs::read_to_string(&cache_path).unwrap();
    assert!(cached.contains("IDX.UPBIT.UBMI"));
    assert!(!cached.contains("CRIX.UPBIT"));
}

#[test_log::test(tokio::test)]
async fn test_unknown_query_is_not_an_error() {
    let mock_server = test_utils::create_mock_server().await;
    let temp_dir = TempDir::new().unwrap();
    let (config_path, _) = write_config(temp_dir.path(), &mock_server.uri());

    let result = ubci::run_command(AppCommand::Query("NOPE".to_string()), Some(&config_path)).await;
    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_index_outside_category_is_rejected_without_fetching() {
    let mock_server = test_utils::create_mock_server().await;
    let temp_dir = TempDir::new().unwrap();
    let (config_path, cache_path) = write_config(temp_dir.path(), &mock_server.uri());

    let result = ubci::run_command(
        AppCommand::Tickers {
            category: Category::Theme,
            index: "UBMI".to_string(),
        },
        Some(&config_path),
    )
    .await;
    assert!(result.is_ok());

    assert_eq!(test_utils::request_count(&mock_server).await, 0);
    assert!(!cache_path.exists());
}

#[test_log::test(tokio::test)]
async fn test_listing_needs_no_network() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, cache_path) = write_config(temp_dir.path(), "http://127.0.0.1:1");

    let result = ubci::run_command(AppCommand::List(Category::Sector), Some(&config_path)).await;
    assert!(result.is_ok());
    assert!(!cache_path.exists());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.yaml");

    let result = ubci::run_command(
        AppCommand::List(Category::Market),
        Some(missing.to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}
