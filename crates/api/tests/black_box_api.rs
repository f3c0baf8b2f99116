use std::sync::Arc;

use ntt_auth::Role;
use ntt_core::{AccountId, TokenAmount};
use ntt_infra::{EntityDetails, InMemoryLedgerSource};
use ntt_ledger::{CsvOptions, RawTransactionRecord, TransactionRecord, TxKind};
use reqwest::StatusCode;

const ADMIN: AccountId = AccountId::from_bytes([0xA0; 20]);
const SHOP: AccountId = AccountId::from_bytes([0xE1; 20]);
const ALICE: AccountId = AccountId::from_bytes([0x11; 20]);

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(source: InMemoryLedgerSource) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = ntt_api::app::build_app(Arc::new(source), CsvOptions::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn record(kind: TxKind, from: AccountId, to: AccountId, tokens: u64, timestamp: u64) -> RawTransactionRecord {
    RawTransactionRecord::from(&TransactionRecord::new(
        kind,
        from,
        to,
        TokenAmount::from_tokens(tokens),
        timestamp,
    ))
}

fn ledger() -> InMemoryLedgerSource {
    let source = InMemoryLedgerSource::new();
    source.grant_role(Role::ADMIN, ADMIN);
    source.register_entity(
        SHOP,
        EntityDetails {
            name: "Corner Shop".to_string(),
            physical_address: "12 High St".to_string(),
            balance: TokenAmount::from_tokens(55),
        },
    );
    source.record_transaction(SHOP, record(TxKind::AdminToEntity, ADMIN, SHOP, 100, 1_700_000_000));
    source.record_transaction(SHOP, record(TxKind::EntityToUser, SHOP, ALICE, 50, 1_700_000_100));
    source.record_transaction(SHOP, record(TxKind::UserToEntity, ALICE, SHOP, 5, 1_700_000_200));
    source
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn(ledger()).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn admin_dashboard_requires_caller() {
    let srv = TestServer::spawn(ledger()).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/admin/dashboard", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/admin/dashboard", srv.base_url))
        .header("x-account", "not-an-address")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_dashboard_denies_non_admin() {
    let srv = TestServer::spawn(ledger()).await;

    let res = reqwest::Client::new()
        .get(format!("{}/admin/dashboard", srv.base_url))
        .header("x-account", ALICE.to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn admin_dashboard_totals() {
    let srv = TestServer::spawn(ledger()).await;

    // Addresses are case-insensitive.
    let res = reqwest::Client::new()
        .get(format!("{}/admin/dashboard", srv.base_url))
        .header("x-account", ADMIN.to_string().to_uppercase().replacen("0X", "0x", 1))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["mintedTotal"], "100.0");
    assert_eq!(body["revokedTotal"], "0.0");
    assert_eq!(body["entities"][0]["name"], "Corner Shop");
    assert_eq!(body["entities"][0]["balance"], "55.0");
}

#[tokio::test]
async fn entity_history_reports_totals_most_recent_first() {
    let srv = TestServer::spawn(ledger()).await;

    let res = reqwest::get(format!("{}/entities/{}/history", srv.base_url, SHOP))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["totals"]["received"], "105.0");
    assert_eq!(body["totals"]["sentToUsers"], "50.0");
    assert_eq!(body["totals"]["net"], "55.0");
    assert_eq!(body["transactions"][0]["type"], "userToNTT");
    assert_eq!(body["transactions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_entity_is_not_found() {
    let srv = TestServer::spawn(ledger()).await;

    let res = reqwest::get(format!("{}/entities/{}/history", srv.base_url, ALICE))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = reqwest::get(format!("{}/entities/0x1234/history", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn entity_history_downloads_as_csv() {
    let srv = TestServer::spawn(ledger()).await;

    let res = reqwest::get(format!("{}/entities/{}/history.csv", srv.base_url, SHOP))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    let disposition = res.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.contains(&format!("ntt_transactions_{}.csv", SHOP)));

    let body = res.text().await.unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], "Type,From,To,Amount,Time");
    assert_eq!(lines.len(), 4);
    // Same order as the history page.
    assert_eq!(
        lines[1],
        format!("userToNTT,{},{},5.0,2023-11-14T22:16:40Z", ALICE, SHOP)
    );
    assert_eq!(
        lines[3],
        format!("adminToNTT,{},{},100.0,2023-11-14T22:13:20Z", ADMIN, SHOP)
    );
}

#[tokio::test]
async fn user_dashboard_lists_payouts_per_entity() {
    let srv = TestServer::spawn(ledger()).await;

    let res = reqwest::get(format!("{}/users/{}/dashboard", srv.base_url, ALICE))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["totalReceived"], "50.0");
    assert_eq!(body["entities"][0]["name"], "Corner Shop");
    assert_eq!(body["entities"][0]["paid"], "5.0");
    assert_eq!(body["entities"][0]["net"], "45.0");
}
