mod common;

use gateway_bridge::domain::results::{EmbeddedModuleResult, NativeError, TransactionResponse};
use gateway_bridge::error::BridgeError;
use gateway_bridge::infrastructure::simulated::Scripted;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

#[tokio::test]
async fn configured_broker_list_feeds_later_transactions() {
    let harness = common::foreground();
    harness
        .bridge
        .configure(&json!({ "gatewayName": "acme", "brokerList": ["X", "Y"] }))
        .await
        .unwrap();

    harness
        .bridge
        .trigger_transaction("txn-1", None, None)
        .await
        .unwrap();

    let recorded = harness.native.recorded();
    assert_eq!(recorded.transactions[0].broker_list, vec!["X", "Y"]);
}

#[tokio::test]
async fn explicit_broker_list_wins_over_default() {
    let harness = common::foreground();
    harness
        .bridge
        .configure(&json!({ "brokerList": ["X", "Y"] }))
        .await
        .unwrap();

    harness
        .bridge
        .trigger_transaction("txn-1", None, Some(&json!(["Z"])))
        .await
        .unwrap();

    assert_eq!(harness.native.recorded().transactions[0].broker_list, vec!["Z"]);
}

#[tokio::test]
async fn empty_explicit_broker_list_falls_back_to_default() {
    let harness = common::foreground();
    harness
        .bridge
        .configure(&json!({ "brokerList": ["X"] }))
        .await
        .unwrap();

    harness
        .bridge
        .trigger_transaction("txn-1", None, Some(&json!([])))
        .await
        .unwrap();

    assert_eq!(harness.native.recorded().transactions[0].broker_list, vec!["X"]);
}

#[tokio::test]
async fn utm_params_are_flattened_before_reaching_native() {
    let harness = common::foreground();

    harness
        .bridge
        .trigger_transaction("txn-1", Some(&json!({ "a": "1", "b": 2, "c": "3" })), None)
        .await
        .unwrap();

    let expected: HashMap<String, String> = [("a", "1"), ("c", "3")]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    assert_eq!(harness.native.recorded().transactions[0].utm_params, expected);
}

#[tokio::test]
async fn transaction_success_carries_data_and_status_label() {
    let harness = common::foreground();
    harness
        .native
        .script_transaction(Scripted::Succeed(TransactionResponse {
            data: Some("order-batch-7".to_owned()),
            transaction: "TRANSACTION".to_owned(),
        }));

    let response = harness
        .bridge
        .trigger_transaction("txn-1", None, None)
        .await
        .unwrap();

    assert_eq!(response.data.as_deref(), Some("order-batch-7"));
    assert_eq!(response.transaction, "TRANSACTION");
}

#[tokio::test]
async fn transaction_failure_surfaces_error_object_with_data() {
    let harness = common::foreground();
    harness.native.script_transaction(Scripted::Fail(
        NativeError::new(1011, "user cancelled").with_data("partial"),
    ));

    let err = harness
        .bridge
        .trigger_transaction("txn-1", None, None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BridgeError::Native(NativeError::new(1011, "user cancelled").with_data("partial"))
    );
}

#[tokio::test]
async fn init_session_rejection_matches_documented_error_shape() {
    let harness = common::foreground();
    harness
        .native
        .script_init(Scripted::Fail(NativeError::new(401, "bad token")));

    let err = harness.bridge.init_session("stale").await.unwrap_err();
    let BridgeError::Native(native) = err else {
        panic!("expected a native error, got {err:?}");
    };

    assert_eq!(
        serde_json::to_value(&native).unwrap(),
        json!({ "errorCode": 401, "errorMessage": "bad token" })
    );
}

#[tokio::test]
async fn archive_response_is_passed_through_unmodified() {
    let harness = common::foreground();
    let payload = json!({ "status": "archived", "iscid": "isc-42" });
    harness
        .native
        .script_archive(Scripted::Succeed(payload.clone()));

    let response = harness.bridge.archive_item("isc-42").await.unwrap();
    assert_eq!(response, payload);
    assert_eq!(harness.native.recorded().archive_requests[0].item_id, "isc-42");
}

#[tokio::test]
async fn embedded_module_resolves_with_auth_token() {
    let harness = common::foreground();
    harness
        .native
        .script_embedded_module(Scripted::Succeed(EmbeddedModuleResult {
            success: true,
            auth_token: Some("jwt-abc".to_owned()),
        }));

    let result = harness
        .bridge
        .launch_embedded_module("dashboard", "theme=dark")
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.auth_token.as_deref(), Some("jwt-abc"));

    let recorded = harness.native.recorded();
    assert_eq!(recorded.embedded_launches[0].target_endpoint, "dashboard");
    assert_eq!(recorded.embedded_launches[0].params, "theme=dark");
}

#[tokio::test]
async fn lead_gen_with_status_resolves_native_string() {
    let harness = common::foreground();
    harness
        .native
        .script_lead_status(Scripted::Succeed("lead-created".to_owned()));

    let status = harness
        .bridge
        .trigger_lead_gen_with_status(Some(&json!({ "name": "Ada" })))
        .await
        .unwrap();

    assert_eq!(status, "lead-created");
    assert_eq!(
        harness.native.recorded().lead_status_calls[0]
            .get("name")
            .map(String::as_str),
        Some("Ada")
    );
}

#[tokio::test(start_paused = true)]
async fn concurrent_transactions_settle_independently() {
    let harness = common::foreground();
    harness.native.set_latency(Duration::from_millis(25));
    harness
        .native
        .script_transaction(Scripted::Succeed(TransactionResponse {
            data: None,
            transaction: "TRANSACTION".to_owned(),
        }));

    let (first, second) = tokio::join!(
        harness.bridge.trigger_transaction("txn-a", None, None),
        harness.bridge.trigger_transaction("txn-b", None, None),
    );

    assert!(first.is_ok());
    assert!(second.is_ok());

    let recorded = harness.native.recorded();
    let ids: Vec<&str> = recorded
        .transactions
        .iter()
        .map(|t| t.transaction_id.as_str())
        .collect();
    assert_eq!(ids, vec!["txn-a", "txn-b"]);
}
