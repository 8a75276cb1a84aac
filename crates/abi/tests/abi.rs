//! Document-to-output flow over a realistic token ABI.

use std::collections::HashMap;

use mica_abi::value::render;
use mica_abi::{bind, AbiDocument, ContractInfo, StructuredValue};

const TOKEN_ABI: &str = r#"{
    "methods": [
        {
            "name": "transfer",
            "input": "TransferRequest",
            "output": "TransferReceipt",
            "entry": "0x00000002",
            "description": "move tokens between accounts"
        },
        {
            "name": "balance_of",
            "input": "BalanceRequest",
            "output": "BalanceReply",
            "entry": "0x00000003",
            "description": "query an account balance",
            "readonly": true
        }
    ],
    "types": {
        "TransferRequest": {"fields": [
            {"name": "to", "type": "address"},
            {"name": "amount", "type": "uint"},
            {"name": "note", "type": "Note"}
        ]},
        "Note": {"fields": [{"name": "text", "type": "string"}]},
        "TransferReceipt": {"fields": [
            {"name": "accepted", "type": "bool"},
            {"name": "txid", "type": "hex"}
        ]},
        "BalanceRequest": {"fields": [{"name": "owner", "type": "address"}]},
        "BalanceReply": {"fields": [{"name": "amount", "type": "uint"}]}
    }
}"#;

fn flat_args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn resolves_binds_and_marshals_a_call() {
    let doc = AbiDocument::from_json(TOKEN_ABI).unwrap();
    let contract = ContractInfo::from_document("token", vec![0xAA; 20], &doc).unwrap();
    let method = &contract.methods["transfer"];

    let to = bs58::encode([7u8; 20]).into_string();
    let message = bind(
        &method.params,
        &flat_args(&[("to", to.as_str()), ("amount", "100"), ("text", "rent")]),
    )
    .unwrap();

    let payload = message.to_json();
    assert_eq!(payload["to"], serde_json::json!(hex::encode([7u8; 20])));
    assert_eq!(payload["amount"], serde_json::json!(100));
    assert_eq!(payload["note"]["text"], serde_json::json!("rent"));
}

#[test]
fn decodes_and_renders_a_reply() {
    let doc = AbiDocument::from_json(TOKEN_ABI).unwrap();
    let contract = ContractInfo::from_document("token", vec![0xAA; 20], &doc).unwrap();
    let returns = contract.methods["transfer"].returns.as_ref().unwrap();

    let reply = serde_json::json!({"accepted": true, "txid": "c0ffee"});
    let value = StructuredValue::decode(returns, &reply).unwrap();
    let lines = render(returns, &value);
    assert_eq!(lines, vec!["accepted: true", "txid: c0ffee"]);
}

#[test]
fn readonly_flag_and_entry_points_carry_through() {
    let doc = AbiDocument::from_json(TOKEN_ABI).unwrap();
    let contract = ContractInfo::from_document("token", vec![1], &doc).unwrap();
    assert!(!contract.methods["transfer"].read_only);
    assert!(contract.methods["balance_of"].read_only);
    assert_eq!(contract.methods["balance_of"].entry_point, 3);
}
