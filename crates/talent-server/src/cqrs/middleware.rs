//! Dispatch helpers wrapping the mediator
//!
//! Every request sent through the mediator is tagged as either a [`Query`]
//! (read) or a [`Command`] (write). Dispatch logs the request kind and how long
//! the handler took.

use mediator::{AsyncMediator, Request};
use std::time::Instant;

use super::AppMediator;
use crate::error::AppError;

/// Read-only request
pub trait Query {
    const NAME: &'static str;
}

/// State-changing request
pub trait Command {
    const NAME: &'static str;
}

async fn dispatch<R, T>(
    mediator: &AppMediator,
    kind: &'static str,
    name: &'static str,
    request: R,
) -> Result<T, AppError>
where
    R: Request<T> + Send + 'static,
    T: Send + 'static,
{
    let mut mediator = mediator.clone();
    let started = Instant::now();

    let result = mediator.send(request).await.map_err(|e| {
        tracing::error!(kind, request = name, error = ?e, "Mediator dispatch failed");
        AppError::Dispatch(format!("{:?}", e))
    })?;

    tracing::debug!(
        kind,
        request = name,
        elapsed_us = started.elapsed().as_micros() as u64,
        "Request handled"
    );

    Ok(result)
}

/// Send a query and return the handler's result
pub async fn send_query<Q, T, E>(mediator: &AppMediator, query: Q) -> Result<Result<T, E>, AppError>
where
    Q: Query + Request<Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    dispatch(mediator, "query", Q::NAME, query).await
}

/// Send a command and return the handler's result
pub async fn send_command<C, T, E>(
    mediator: &AppMediator,
    command: C,
) -> Result<Result<T, E>, AppError>
where
    C: Command + Request<Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    dispatch(mediator, "command", C::NAME, command).await
}
