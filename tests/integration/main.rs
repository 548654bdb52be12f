//! Integration tests for the order book client and the reporting loop.
//!
//! These run the real HTTP client against a local stub server, so they need
//! no network access.

mod stub;

use cross_arb::config::Config;
use cross_arb::error::QuoteError;
use cross_arb::exchange::{BookFormat, Endpoint, Registry};
use cross_arb::market::{QuoteClient, QuoteSource};
use cross_arb::orderbook::PriceLevel;
use cross_arb::report::Reporter;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn stub_config(addr: std::net::SocketAddr) -> Config {
    Config {
        bitbay_url_template: stub::flat_template(addr),
        bittrex_url_template: stub::nested_template(addr),
        http_timeout_ms: 2_000,
        ..Config::default()
    }
}

#[tokio::test]
async fn flat_and_nested_books_normalize_identically() {
    let addr = stub::spawn().await;
    let config = stub_config(addr);
    let registry = Registry::from_config(&config);
    let client = QuoteClient::new(&config).unwrap();

    let flat = client
        .fetch_quote(&registry.primary, "BTC", "USD", 2)
        .await
        .expect("flat quote");
    let nested = client
        .fetch_quote(&registry.secondary, "BTC", "USD", 2)
        .await
        .expect("nested quote");

    assert_eq!(
        flat.bids,
        vec![
            PriceLevel::new(dec!(9000.5), dec!(0.25)),
            PriceLevel::new(dec!(8999), dec!(1.5)),
        ]
    );
    assert_eq!(flat.bids, nested.bids);
    assert_eq!(flat.asks, nested.asks);
    assert_eq!(nested.exchange, "BITTREX");
}

#[tokio::test]
async fn depth_one_keeps_only_best_levels() {
    let addr = stub::spawn().await;
    let config = stub_config(addr);
    let registry = Registry::from_config(&config);
    let client = QuoteClient::new(&config).unwrap();

    let quote = client
        .fetch_quote(&registry.secondary, "BTC", "USD", 1)
        .await
        .unwrap();

    assert_eq!(quote.bids, vec![PriceLevel::new(dec!(9000.5), dec!(0.25))]);
    assert_eq!(quote.asks, vec![PriceLevel::new(dec!(9010), dec!(0.4))]);
}

#[tokio::test]
async fn non_success_status_yields_none() {
    let addr = stub::spawn().await;
    let client = QuoteClient::new(&stub_config(addr)).unwrap();
    let endpoint = Endpoint::new(
        "DOWN",
        format!("http://{addr}/down/{{base}}{{quote}}"),
        dec!(0.01),
        dec!(0),
        BookFormat::Flat,
    );

    assert!(client.fetch_quote(&endpoint, "BTC", "USD", 1).await.is_none());

    match client.try_fetch_quote(&endpoint, "BTC", "USD", 1).await {
        Err(QuoteError::Status { status, reason, .. }) => {
            assert_eq!(status, 503);
            assert_eq!(reason, "Service Unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_pair_on_flat_exchange_is_status_error() {
    let addr = stub::spawn().await;
    let config = stub_config(addr);
    let registry = Registry::from_config(&config);
    let client = QuoteClient::new(&config).unwrap();

    let err = client
        .try_fetch_quote(&registry.primary, "ETH", "USD", 1)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "status");
}

#[tokio::test]
async fn rejected_market_on_nested_exchange() {
    let addr = stub::spawn().await;
    let config = stub_config(addr);
    let registry = Registry::from_config(&config);
    let client = QuoteClient::new(&config).unwrap();

    let err = client
        .try_fetch_quote(&registry.secondary, "ETH", "USD", 1)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "rejected");
    assert!(err.to_string().contains("INVALID_MARKET"));
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let addr = stub::dead_addr().await;
    let config = stub_config(addr);
    let registry = Registry::from_config(&config);
    let client = QuoteClient::new(&config).unwrap();

    let err = client
        .try_fetch_quote(&registry.primary, "BTC", "USD", 1)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "transport");
    assert!(client
        .fetch_quote(&registry.primary, "BTC", "USD", 1)
        .await
        .is_none());
}

#[tokio::test]
async fn slow_exchange_is_timeout_error() {
    let addr = stub::spawn().await;
    let config = Config {
        http_timeout_ms: 200,
        ..stub_config(addr)
    };
    let client = QuoteClient::new(&config).unwrap();
    let endpoint = Endpoint::new(
        "SLOW",
        format!("http://{addr}/slow/{{base}}{{quote}}"),
        dec!(0.01),
        dec!(0),
        BookFormat::Flat,
    );

    let started = std::time::Instant::now();
    let err = client
        .try_fetch_quote(&endpoint, "BTC", "USD", 1)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "timeout");
    assert!(started.elapsed() < stub::SLOW_RESPONSE);
    assert!(client.fetch_quote(&endpoint, "BTC", "USD", 1).await.is_none());
}

#[tokio::test]
async fn full_cycle_against_stub_exchanges() {
    let addr = stub::spawn().await;
    let config = stub_config(addr);
    let registry = Registry::from_config(&config);
    let client = QuoteClient::new(&config).unwrap();

    let report = Reporter::new(&registry, &client).run_cycle().await;

    // Identical books: spreads are zero.
    assert!(report.is_complete());
    assert_eq!(report.buy_ratio, Some(dec!(0)));
    assert_eq!(report.sell_ratio, Some(dec!(0)));
    assert!(report.opportunities().is_empty());
    assert!(report.to_string().contains("buy ratio for BTCUSD: 0.00%"));
}

#[tokio::test]
async fn cycle_with_one_exchange_down_still_reports() {
    let addr = stub::spawn().await;
    let dead = stub::dead_addr().await;
    let config = Config {
        bittrex_url_template: stub::nested_template(dead),
        ..stub_config(addr)
    };
    let registry = Registry::from_config(&config);
    let client = QuoteClient::new(&config).unwrap();

    let report = Reporter::new(&registry, &client).run_cycle().await;
    let text = report.to_string();

    assert!(!report.is_complete());
    assert!(text.contains("sell ratio for BTCUSD: n/a"));
    assert!(text.contains("no quote available for BITTREX"));
}
