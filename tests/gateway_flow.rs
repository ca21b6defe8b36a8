//! End-to-end canonicalization flows through a running gateway.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

use locale_gateway::config::GatewayConfig;
use locale_gateway::engine::locale::Locale;
use locale_gateway::http::HttpServer;
use locale_gateway::lifecycle::Shutdown;

mod common;

fn dictionaries() -> BTreeMap<Locale, BTreeMap<String, String>> {
    let table = |pairs: &[(&str, &str)]| -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    };
    let mut dictionaries = BTreeMap::new();
    dictionaries.insert(
        Locale::En,
        table(&[("contact", "contact"), ("news", "news"), ("careers", "careers")]),
    );
    dictionaries.insert(
        Locale::Vi,
        table(&[("contact", "lien_he"), ("news", "tin_tuc"), ("careers", "tuyen_dung")]),
    );
    dictionaries.insert(
        Locale::Zh,
        table(&[
            ("contact", "lian_xi_wo_men"),
            ("news", "xin_wen"),
            ("careers", "zhao_pin"),
        ]),
    );
    dictionaries
}

async fn start_gateway(
    gateway_addr: SocketAddr,
    upstream_addr: SocketAddr,
    allowed_origins: Vec<String>,
) -> Shutdown {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = gateway_addr.to_string();
    config.upstream.address = upstream_addr.to_string();
    config.locales.dictionaries = dictionaries();
    config.cors.allowed_origins = allowed_origins;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let listener = tokio::net::TcpListener::bind(gateway_addr).await.unwrap();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    shutdown
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_trailing_slash_redirects_preserving_query() {
    let upstream: SocketAddr = "127.0.0.1:29101".parse().unwrap();
    let gateway: SocketAddr = "127.0.0.1:29102".parse().unwrap();
    common::start_mock_upstream(upstream).await;
    let shutdown = start_gateway(gateway, upstream, Vec::new()).await;

    let res = client()
        .get(format!("http://{}/en/about/?x=1&y=2", gateway))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status().as_u16(), 308);
    assert_eq!(res.headers()["location"], "/en/about?x=1&y=2");

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_locale_redirects_to_default() {
    let upstream: SocketAddr = "127.0.0.1:29111".parse().unwrap();
    let gateway: SocketAddr = "127.0.0.1:29112".parse().unwrap();
    common::start_mock_upstream(upstream).await;
    let shutdown = start_gateway(gateway, upstream, Vec::new()).await;

    let res = client()
        .get(format!("http://{}/about", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 308);
    assert_eq!(res.headers()["location"], "/en/about");

    let res = client()
        .get(format!("http://{}/fr/about", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 308);
    assert_eq!(res.headers()["location"], "/en/about");

    shutdown.trigger();
}

#[tokio::test]
async fn test_cross_locale_slug_redirects_in_one_hop() {
    let upstream: SocketAddr = "127.0.0.1:29121".parse().unwrap();
    let gateway: SocketAddr = "127.0.0.1:29122".parse().unwrap();
    common::start_mock_upstream(upstream).await;
    let shutdown = start_gateway(gateway, upstream, Vec::new()).await;

    let res = client()
        .get(format!("http://{}/en/lien_he", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 308);
    assert_eq!(res.headers()["location"], "/en/contact");

    // Slash, locale, and slug corrections fold into one redirect.
    let res = client()
        .get(format!("http://{}/lien_he/?q=1", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 308);
    assert_eq!(res.headers()["location"], "/en/contact?q=1");

    shutdown.trigger();
}

#[tokio::test]
async fn test_canonical_request_forwards_with_annotations() {
    let upstream: SocketAddr = "127.0.0.1:29131".parse().unwrap();
    let gateway: SocketAddr = "127.0.0.1:29132".parse().unwrap();
    common::start_mock_upstream(upstream).await;
    let shutdown = start_gateway(
        gateway,
        upstream,
        vec!["https://example.com".to_string()],
    )
    .await;

    let res = client()
        .get(format!("http://{}/en/careers/123", gateway))
        .header("Origin", "https://example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "https://example.com"
    );
    assert_eq!(res.headers()["access-control-allow-credentials"], "true");

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["path"], "/en/careers/123");
    assert_eq!(body["locale"], "en");
    assert!(!body["request_id"].as_str().unwrap().is_empty());

    let route: serde_json::Value =
        serde_json::from_str(body["route"].as_str().unwrap()).unwrap();
    assert_eq!(route["kind"], "page");
    assert_eq!(route["parent_slug"], "careers");
    assert_eq!(route["child_slug"], "123");
    assert_eq!(route["is_career"], true);
    assert_eq!(route["is_news"], false);

    shutdown.trigger();
}

#[tokio::test]
async fn test_preflight_answers_immediately() {
    let upstream: SocketAddr = "127.0.0.1:29141".parse().unwrap();
    let gateway: SocketAddr = "127.0.0.1:29142".parse().unwrap();
    // No mock upstream: a preflight must never reach it.
    let shutdown = start_gateway(
        gateway,
        upstream,
        vec!["https://example.com".to_string()],
    )
    .await;

    let res = client()
        .request(reqwest::Method::OPTIONS, format!("http://{}/en/about/", gateway))
        .header("Origin", "https://example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 204);
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "https://example.com"
    );
    assert_eq!(res.headers()["access-control-allow-credentials"], "true");
    assert!(res.headers().contains_key("access-control-allow-methods"));
    assert!(res.headers().contains_key("access-control-allow-headers"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_unlisted_origin_gets_star_without_credentials() {
    let upstream: SocketAddr = "127.0.0.1:29151".parse().unwrap();
    let gateway: SocketAddr = "127.0.0.1:29152".parse().unwrap();
    common::start_mock_upstream(upstream).await;
    let shutdown = start_gateway(
        gateway,
        upstream,
        vec!["https://example.com".to_string()],
    )
    .await;

    let res = client()
        .get(format!("http://{}/en/about", gateway))
        .header("Origin", "https://unlisted.org")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert!(!res.headers().contains_key("access-control-allow-credentials"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_reserved_prefix_bypasses_untouched() {
    let upstream: SocketAddr = "127.0.0.1:29161".parse().unwrap();
    let gateway: SocketAddr = "127.0.0.1:29162".parse().unwrap();
    common::start_mock_upstream(upstream).await;
    let shutdown = start_gateway(gateway, upstream, Vec::new()).await;

    let res = client()
        .get(format!("http://{}/api/v1/pages", gateway))
        .header("Origin", "https://example.com")
        .send()
        .await
        .unwrap();

    // Forwarded as-is: no redirect, no CORS mutation, no annotations.
    assert_eq!(res.status().as_u16(), 200);
    assert!(!res.headers().contains_key("access-control-allow-origin"));
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["path"], "/api/v1/pages");
    assert_eq!(body["locale"], "");
    assert_eq!(body["route"], "");

    shutdown.trigger();
}

#[tokio::test]
async fn test_dead_upstream_maps_to_bad_gateway() {
    let upstream: SocketAddr = "127.0.0.1:29171".parse().unwrap();
    let gateway: SocketAddr = "127.0.0.1:29172".parse().unwrap();
    // Upstream intentionally not started.
    let shutdown = start_gateway(gateway, upstream, Vec::new()).await;

    let res = client()
        .get(format!("http://{}/en/about", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 502);

    shutdown.trigger();
}
