use super::*;
use mockito::Server;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_networking_manager_creation() {
    let manager = NetworkingManager::new(NetworkingConfig::default());

    assert!(manager.is_ok(), "Should create networking manager");
    let manager = manager.unwrap();
    assert!(manager.jobs() > 0, "Should derive a positive job count");
    assert!(manager.jobs() <= MAX_AUTO_JOBS);
}

#[test]
fn test_explicit_job_count_is_respected() {
    let config = NetworkingConfig {
        max_jobs: Some(3),
        ..Default::default()
    };
    let manager = NetworkingManager::new(config).unwrap();
    assert_eq!(manager.jobs(), 3);
}

#[test]
fn test_zero_jobs_rejected() {
    let config = NetworkingConfig {
        max_jobs: Some(0),
        ..Default::default()
    };
    assert!(matches!(
        NetworkingManager::new(config),
        Err(NetworkingError::InvalidJobCount { count: 0 })
    ));
}

#[test]
fn test_zero_timeout_rejected() {
    let config = NetworkingConfig {
        timeout_seconds: 0,
        ..Default::default()
    };
    assert!(matches!(
        NetworkingManager::new(config),
        Err(NetworkingError::InvalidTimeout { .. })
    ));
}

#[tokio::test]
async fn test_get_returns_non_success_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/missing")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let manager = NetworkingManager::new(NetworkingConfig {
        trace_requests: true,
        ..Default::default()
    })
    .unwrap();

    let response = manager
        .get_text(&format!("{}/missing", server.url()))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_sends_user_agent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/ua")
        .match_header(
            "user-agent",
            mockito::Matcher::Regex("^depviz/".to_string()),
        )
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    let response = manager
        .get_text(&format!("{}/ua", server.url()))
        .await
        .unwrap();

    assert!(response.status.is_success());
    assert_eq!(response.body, "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_slot_covers_body_download() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let mut server = Server::new_async().await;
    let mock = {
        let in_flight = Arc::clone(&in_flight);
        let peak = Arc::clone(&peak);
        server
            .mock("GET", "/slow")
            .with_status(200)
            .with_chunked_body(move |w| {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                w.write_all(b"first ")?;
                std::thread::sleep(std::time::Duration::from_millis(150));
                w.write_all(b"second")?;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            })
            .expect(2)
            .create_async()
            .await
    };

    let manager = NetworkingManager::new(NetworkingConfig {
        max_jobs: Some(1),
        ..Default::default()
    })
    .unwrap();
    let url = format!("{}/slow", server.url());

    let (first, second) = tokio::join!(manager.get_text(&url), manager.get_text(&url));

    assert_eq!(first.unwrap().body, "first second");
    assert_eq!(second.unwrap().body, "first second");
    assert_eq!(peak.load(Ordering::SeqCst), 1);
    mock.assert_async().await;
}
