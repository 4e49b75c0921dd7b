use std::sync::Arc;

use chain_sdk::{
    create_assets, requests_from_json, responses_to_json, test::BlsPair, BatchOptions,
    MemoryAssetRegistry, RequestContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // An in-memory registry bound to the default network values.
    let registry = Arc::new(MemoryAssetRegistry::default());

    let alice = hex::encode(BlsPair::new(1).pk.to_bytes());
    let bob = hex::encode(BlsPair::new(2).pk.to_bytes());

    // The second request has no root keys, so only it fails.
    let requests = requests_from_json(&format!(
        r#"[
            {{
                "alias": "gold",
                "root_xpubs": ["{alice}", "{bob}"],
                "quorum": 2,
                "definition": {{ "type": "metal" }},
                "tags": {{ "vault": "zurich" }}
            }},
            {{ "alias": "", "root_xpubs": [], "quorum": 1 }}
        ]"#
    ))?;

    let ctx = RequestContext::default();
    println!("Creating {} assets in request {}", requests.len(), ctx.request_id());

    let responses = create_assets(&ctx, registry.clone(), requests, BatchOptions::default()).await;

    println!("{}", responses_to_json(&responses)?);
    println!("The registry now holds {} asset(s).", registry.len());

    Ok(())
}
