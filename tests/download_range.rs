use std::time::Duration;

use energy_balance::{download_range, EnergyBalanceClient, Error};
use mockito::{Matcher, Server, ServerGuard};
use tempfile::TempDir;

const PATH: &str = "^/rest/pvms/web/station/v3/overview/energy-balance";

async fn mock_day(
    server: &mut ServerGuard,
    date: &str,
    status: usize,
    hits: usize,
) -> mockito::Mock {
    server
        .mock("GET", Matcher::Regex(PATH.into()))
        .match_query(Matcher::UrlEncoded("dateStr".into(), format!("{date} 00:00:00")))
        .match_header("cookie", "session=abc")
        .with_status(status)
        .with_body(format!(r#"{{"data":{{"day":"{date}"}}}}"#))
        .expect(hits)
        .create_async()
        .await
}

fn client(server: &ServerGuard, dir: &TempDir) -> EnergyBalanceClient {
    EnergyBalanceClient::new("session=abc", dir.path())
        .unwrap()
        .with_host(server.url())
}

#[tokio::test]
async fn test_range_saves_one_file_per_day_in_order() {
    let mut server = Server::new_async().await;
    let mocks = vec![
        mock_day(&mut server, "2025-08-12", 200, 1).await,
        mock_day(&mut server, "2025-08-13", 200, 1).await,
        mock_day(&mut server, "2025-08-14", 200, 1).await,
    ];

    let dir = TempDir::new().unwrap();
    let paths = download_range(
        &client(&server, &dir),
        "2025-08-12",
        "2025-08-14",
        Duration::from_millis(10),
    )
    .await
    .unwrap();

    for mock in &mocks {
        mock.assert_async().await;
    }
    let names: Vec<_> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["2025-08-12.json", "2025-08-13.json", "2025-08-14.json"]
    );
    assert!(paths.iter().all(|p| p.is_absolute() && p.is_file()));
    assert_eq!(
        std::fs::read_to_string(&paths[1]).unwrap(),
        "{\n  \"data\": {\n    \"day\": \"2025-08-13\"\n  }\n}"
    );
}

#[tokio::test]
async fn test_failure_mid_range_keeps_earlier_files() {
    let mut server = Server::new_async().await;
    let first = mock_day(&mut server, "2025-08-12", 200, 1).await;
    let second = mock_day(&mut server, "2025-08-13", 500, 1).await;
    let third = mock_day(&mut server, "2025-08-14", 200, 0).await;

    let dir = TempDir::new().unwrap();
    let err = download_range(
        &client(&server, &dir),
        "2025-08-12",
        "2025-08-14",
        Duration::ZERO,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Http { status: 500 }), "{err:?}");
    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;

    assert!(dir.path().join("2025-08-12.json").is_file());
    assert!(!dir.path().join("2025-08-13.json").exists());
    assert!(!dir.path().join("2025-08-14.json").exists());
}

#[tokio::test]
async fn test_reversed_range_sends_nothing() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let paths = download_range(
        &client(&server, &dir),
        "2025-08-14",
        "2025-08-12",
        Duration::from_secs(2),
    )
    .await
    .unwrap();

    any.assert_async().await;
    assert!(paths.is_empty());
}
