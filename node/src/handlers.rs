use crate::ReadState;
use backend::error::LimitError;
use backend::limit::ExponentLimit;
use backend::mersenne_prime::{generate_mersenne_primes, is_mersenne_prime};
use backend::message::{GenerateRequest, Generation, Problem, Verification};
use core::result::Result;
use log::{error, info, warn};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::{PoisonError, RwLockReadGuard, RwLockWriteGuard};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

#[derive(Debug)]
pub struct InvalidLimit(pub LimitError);

impl warp::reject::Reject for InvalidLimit {}

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub limit: Option<String>,
}

fn read(state: &ReadState) -> RwLockReadGuard<'_, backend::state::State> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(state: &ReadState) -> RwLockWriteGuard<'_, backend::state::State> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

fn reject(err: LimitError) -> Rejection {
    warn!("rejected limit: {}", err);
    warp::reject::custom(InvalidLimit(err))
}

fn respond_with_generation(limit: ExponentLimit, state: &ReadState) -> impl Reply {
    let primes = generate_mersenne_primes(limit.get());
    info!("found {} Mersenne primes up to exponent {}", primes.len(), limit);
    write(state).record_generation(limit);
    warp::reply::json(&Generation::new(limit, primes))
}

pub async fn get(state: ReadState) -> Result<impl Reply, Infallible> {
    let state = read(&state);
    Ok(warp::reply::json(&*state))
}

pub async fn generate(query: GenerateQuery, state: ReadState) -> Result<impl Reply, Rejection> {
    let limit: Result<ExponentLimit, LimitError> = match query.limit {
        Some(raw) => raw.parse(),
        None => Ok(read(&state).default_limit()),
    };
    let limit = limit.map_err(reject)?;
    Ok(respond_with_generation(limit, &state))
}

pub async fn generate_from_body(
    request: GenerateRequest,
    state: ReadState,
) -> Result<impl Reply, Rejection> {
    let limit: Result<ExponentLimit, LimitError> = match request.limit {
        Some(raw) => raw.resolve(),
        None => Ok(read(&state).default_limit()),
    };
    let limit = limit.map_err(reject)?;
    Ok(respond_with_generation(limit, &state))
}

pub async fn verify(exponent: String) -> Result<impl Reply, Rejection> {
    let exponent = exponent.parse::<ExponentLimit>().map_err(reject)?;
    let candidate = exponent.candidate();
    let prime = is_mersenne_prime(exponent);
    info!("Lucas-Lehmer: 2^{} - 1 = {} prime={}", exponent, candidate, prime);

    Ok(warp::reply::json(&Verification {
        exponent,
        candidate,
        prime,
    }))
}

/// Renders a rejection as a JSON problem. Client errors other than unknown
/// routes and methods are counted on the node's state.
pub async fn recover(err: Rejection, state: ReadState) -> Result<impl Reply, Infallible> {
    let (code, description) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, String::from("Not Found"))
    } else if let Some(InvalidLimit(e)) = err.find::<InvalidLimit>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            String::from("Unsupported Media Type"),
        )
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, String::from("Length Required"))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, String::from("Payload Too Large"))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, String::from("Method Not Allowed"))
    } else {
        error!("unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            String::from("An error occurred while generating primes."),
        )
    };

    let routed = code != StatusCode::NOT_FOUND && code != StatusCode::METHOD_NOT_ALLOWED;
    if code.is_client_error() && routed {
        write(&state).record_rejection();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&Problem::new(description)),
        code,
    ))
}
