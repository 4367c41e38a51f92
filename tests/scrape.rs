//! End-to-end tests for the connect / retrieve pipeline against a local
//! mock server.

use mockito::Matcher;
use seloger_scout::{Credentials, ScrapeError, SearchParams, SelogerScraper, Transport};
use tokio_util::sync::CancellationToken;
use url::Url;

const CONNECT_PATH: &str = "/AuthentificationService.svc/ConnecterUtilisateur";

fn scraper_for(server: &mockito::ServerGuard) -> SelogerScraper {
    let base = Url::parse(&server.url()).unwrap();
    SelogerScraper::with_endpoints(
        Transport::new(false).unwrap(),
        base.join(CONNECT_PATH).unwrap(),
        base.join("/list.htm").unwrap(),
    )
}

fn credentials(token: &str) -> Credentials {
    Credentials {
        token: token.to_string(),
        datadome: String::new(),
    }
}

#[tokio::test]
async fn connect_returns_token_from_cookie() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", CONNECT_PATH)
        .match_header("content-type", "application/json; charset=utf-8")
        .match_body(Matcher::Json(serde_json::json!({
            "request": { "Email": "user@example.com", "MotDePasse": "secret" }
        })))
        .with_status(200)
        .with_header("set-cookie", "Token=tok123; path=/; Max-Age=315360000")
        .with_header("set-cookie", "Datadome=dd42; path=/")
        .create_async()
        .await;

    let scraper = scraper_for(&server);
    let cancel = CancellationToken::new();
    let creds = scraper
        .connect("user@example.com", "secret", &cancel)
        .await
        .unwrap();

    assert_eq!(creds.token, "tok123");
    assert_eq!(creds.datadome, "dd42");
    mock.assert_async().await;
}

#[tokio::test]
async fn connect_rejects_non_2xx() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", CONNECT_PATH)
        .with_status(401)
        .create_async()
        .await;

    let scraper = scraper_for(&server);
    let cancel = CancellationToken::new();
    let err = scraper
        .connect("user@example.com", "wrong", &cancel)
        .await
        .unwrap_err();

    match err {
        ScrapeError::Authentication { status, .. } => assert_eq!(status, 401),
        other => panic!("expected Authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn connect_requires_token_cookie_even_on_200() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", CONNECT_PATH)
        .with_status(200)
        .with_header("set-cookie", "Datadome=dd42; path=/")
        .create_async()
        .await;

    let scraper = scraper_for(&server);
    let cancel = CancellationToken::new();
    let err = scraper
        .connect("user@example.com", "secret", &cancel)
        .await
        .unwrap_err();

    match err {
        ScrapeError::Authentication { status, reason } => {
            assert_eq!(status, 200);
            assert_eq!(reason, "no auth cookie acquired");
        }
        other => panic!("expected Authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn connect_rejects_empty_input_without_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", CONNECT_PATH)
        .expect(0)
        .create_async()
        .await;

    let scraper = scraper_for(&server);
    let cancel = CancellationToken::new();
    let err = scraper.connect("", "secret", &cancel).await.unwrap_err();

    assert!(matches!(err, ScrapeError::InvalidCredentials));
    mock.assert_async().await;
}

#[tokio::test]
async fn get_listings_extracts_classified_anchors() {
    let page = r#"
        <html><body>
            <a name="classified-link-0"
               href="/annonces/achat/appartement/paris-15/168670255.htm?projects=2,5#top">a</a>
            <a name="classified-link-1"
               href="/annonces/achat/maison/sens-89/171223344.htm">b</a>
            <a href="/not-a-listing.htm">c</a>
        </body></html>
    "#;

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/list.htm")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("types".into(), "1,2".into()),
            Matcher::UrlEncoded("price".into(), "0/800000".into()),
        ]))
        .match_header("cookie", "ep-authorization=tok123")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(page)
        .create_async()
        .await;

    let scraper = scraper_for(&server);
    let cancel = CancellationToken::new();
    let params = SearchParams {
        types: vec![1, 2],
        min_price: Some(0),
        max_price: Some(800_000),
        ..Default::default()
    };

    let listings = scraper
        .get_listings(&credentials("tok123"), &params, &cancel)
        .await
        .unwrap();

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].id, "168670255");
    assert_eq!(listings[0].path, "annonces/168670255.htm");
    assert_eq!(listings[1].path, "annonces/171223344.htm");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_listings_with_empty_token_makes_no_network_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/list.htm")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let scraper = scraper_for(&server);
    let cancel = CancellationToken::new();
    let err = scraper
        .get_listings(&credentials(""), &SearchParams::default(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::InvalidCredentials));
    mock.assert_async().await;
}

#[tokio::test]
async fn get_listings_surfaces_remote_rejection() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/list.htm")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let scraper = scraper_for(&server);
    let cancel = CancellationToken::new();
    let err = scraper
        .get_listings(&credentials("tok123"), &SearchParams::default(), &cancel)
        .await
        .unwrap_err();

    match &err {
        ScrapeError::Retrieval { status, .. } => assert_eq!(*status, 503),
        other => panic!("expected Retrieval error, got {other:?}"),
    }
    // Transient rejection: the caller may retry with backoff.
    assert!(err.is_retryable());
}

#[tokio::test]
async fn deadline_expiry_surfaces_as_transport_error() {
    use std::io::Write;
    use std::time::Duration;

    let stall = |w: &mut dyn Write| {
        std::thread::sleep(Duration::from_millis(500));
        w.write_all(b"late")
    };

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", CONNECT_PATH)
        .with_status(200)
        .with_header("set-cookie", "Token=tok123; path=/")
        .with_chunked_body(stall)
        .create_async()
        .await;
    server
        .mock("GET", "/list.htm")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_chunked_body(stall)
        .create_async()
        .await;

    let base = Url::parse(&server.url()).unwrap();
    let scraper = SelogerScraper::with_endpoints(
        Transport::with_timeout(false, Duration::from_millis(100)).unwrap(),
        base.join(CONNECT_PATH).unwrap(),
        base.join("/list.htm").unwrap(),
    );
    let cancel = CancellationToken::new();

    let err = scraper
        .connect("user@example.com", "secret", &cancel)
        .await
        .unwrap_err();
    match err {
        ScrapeError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected Transport error, got {other:?}"),
    }

    let err = scraper
        .get_listings(&credentials("tok123"), &SearchParams::default(), &cancel)
        .await
        .unwrap_err();
    match err {
        ScrapeError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected Transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn cancellation_is_distinct_from_other_failures() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", CONNECT_PATH)
        .with_status(200)
        .with_header("set-cookie", "Token=tok123; path=/")
        .create_async()
        .await;

    let scraper = scraper_for(&server);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = scraper
        .connect("user@example.com", "secret", &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Cancelled));
    assert!(!err.is_retryable());
}
