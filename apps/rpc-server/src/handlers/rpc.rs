//! The RPC endpoint.

use actix_web::{HttpResponse, web};

use crate::codec;
use crate::error::AppResult;
use crate::state::AppState;

/// POST /rpc
///
/// A body the decoder rejects is a transport error (400) and never reaches
/// dispatch. Everything past decode produces exactly one in-band reply,
/// except a store failure, which terminates this request with a 500.
pub async fn rpc_call(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let call = codec::decode(&body)?;
    tracing::debug!(method = %call.method, "RPC call");

    let reply = state.registry.dispatch(call).await?;
    Ok(HttpResponse::Ok().json(reply))
}
