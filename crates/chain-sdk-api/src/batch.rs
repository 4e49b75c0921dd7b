use std::{any::Any, sync::Arc};

use chain_sdk_assets::{parse_document, AssetRegistry, Document, NewAsset, RequestContext};
use chain_sdk_types::parse_public_keys;
use chia_protocol::Bytes;
use tokio::{sync::Semaphore, task::JoinError};
use tracing::{debug, debug_span, warn, Instrument};

use crate::{ApiError, AssetPayload, CreateAssetRequest, CreateAssetResponse};

/// Settings for a single call to [`create_assets`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// The most items processed at once. Unbounded when `None`.
    pub concurrency_limit: Option<usize>,
}

/// Creates every requested asset concurrently, one task per request.
///
/// The responses line up with the requests by index. A failure of any kind, including a panic,
/// only affects the response of the request that caused it, so this never fails as a whole.
pub async fn create_assets<R>(
    ctx: &RequestContext,
    registry: Arc<R>,
    requests: Vec<CreateAssetRequest>,
    options: BatchOptions,
) -> Vec<CreateAssetResponse>
where
    R: AssetRegistry + Send + Sync + 'static,
{
    let semaphore = options
        .concurrency_limit
        .map(|limit| Arc::new(Semaphore::new(limit.clamp(1, Semaphore::MAX_PERMITS))));

    debug!(
        request_id = %ctx.request_id(),
        items = requests.len(),
        "creating assets"
    );

    let handles: Vec<_> = requests
        .into_iter()
        .enumerate()
        .map(|(index, request)| {
            let ctx = *ctx;
            let registry = registry.clone();
            let semaphore = semaphore.clone();
            let span = debug_span!("create_asset", index, parent_id = %ctx.request_id());

            tokio::spawn(
                async move {
                    let _permit = match semaphore {
                        Some(semaphore) => Some(semaphore.acquire_owned().await.map_err(|_| {
                            ApiError::internal("the batch was shut down before this item ran")
                        })?),
                        None => None,
                    };

                    let sub_ctx = ctx.sub_context();
                    debug!(request_id = %sub_ctx.request_id(), "creating asset");
                    create_asset(&sub_ctx, registry.as_ref(), request).await
                }
                .instrument(span),
            )
        })
        .collect();

    let mut responses = Vec::with_capacity(handles.len());
    for (index, handle) in handles.into_iter().enumerate() {
        responses.push(settle(index, handle.await));
    }
    responses
}

/// Creates one asset, validating the request before it reaches the registry.
pub async fn create_asset<R>(
    ctx: &RequestContext,
    registry: &R,
    request: CreateAssetRequest,
) -> Result<AssetPayload, ApiError>
where
    R: AssetRegistry,
{
    let tags = parse_field("tags", request.tags.as_ref())?;
    let definition = parse_field("definition", request.definition.as_ref())?;
    let root_keys = parse_public_keys(&request.root_xpubs)?;

    let quorum = u32::try_from(request.quorum).map_err(|_| {
        ApiError::bad_request(format!("quorum must not be negative, found {}", request.quorum))
    })?;

    let asset = registry
        .define(
            ctx,
            NewAsset {
                root_keys,
                quorum,
                definition,
                alias: request.alias,
                tags,
                client_token: request.client_token,
            },
        )
        .await?;

    AssetPayload::new(&asset, request.definition, request.tags)
}

/// Turns the outcome of an item's task into its response.
///
/// A task that panicked or was cancelled becomes an `INTERNAL` error for that item alone.
pub fn settle(
    index: usize,
    result: Result<Result<AssetPayload, ApiError>, JoinError>,
) -> CreateAssetResponse {
    match result {
        Ok(result) => {
            if let Err(error) = &result {
                debug!(index, %error, "asset creation failed");
            }
            result.into()
        }
        Err(error) if error.is_panic() => {
            let reason = panic_message(error.into_panic());
            warn!(index, reason = %reason, "asset creation panicked");
            CreateAssetResponse::Error(ApiError::internal("unexpected failure while creating asset"))
        }
        Err(error) => {
            warn!(index, %error, "asset creation did not finish");
            CreateAssetResponse::Error(ApiError::internal("asset creation did not finish"))
        }
    }
}

fn parse_field(name: &str, bytes: Option<&Bytes>) -> Result<Option<Document>, ApiError> {
    let Some(bytes) = bytes else {
        return Ok(None);
    };

    parse_document(bytes.as_ref()).map_err(|error| {
        ApiError::bad_request(format!("invalid {name}")).with_details(error.to_string())
    })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
