use super::handlers;
use crate::ReadState;
use backend::message;
use std::convert::Infallible;
use warp::Filter;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Every route the node serves, with rejections rendered as JSON problems.
pub fn api(
    state: ReadState,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let rejections = state.clone();
    index()
        .or(generate(state.clone()))
        .or(generate_from_body(state.clone()))
        .or(verify())
        .or(get(state))
        .recover(move |err: warp::Rejection| handlers::recover(err, rejections.clone()))
}

pub fn index() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML))
}

pub fn get(
    state: ReadState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("state")
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::get)
}

pub fn generate(
    state: ReadState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("api" / "primes")
        .and(warp::get())
        .and(warp::query::<handlers::GenerateQuery>())
        .and(with_state(state))
        .and_then(handlers::generate)
}

pub fn generate_from_body(
    state: ReadState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("api" / "primes")
        .and(warp::post())
        .and(json_body())
        .and(with_state(state))
        .and_then(handlers::generate_from_body)
}

pub fn verify() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("api" / "verify" / String)
        .and(warp::get())
        .and_then(handlers::verify)
}

fn with_state(
    state: ReadState,
) -> impl Filter<Extract = (ReadState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn json_body(
) -> impl Filter<Extract = (message::GenerateRequest,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(1024 * 16).and(warp::body::json())
}

#[cfg(test)]
mod tests {
    use super::api;
    use crate::ReadState;
    use backend::limit::ExponentLimit;
    use backend::state::State;
    use serde_json::{json, Value};
    use std::sync::{Arc, RwLock};
    use warp::http::StatusCode;

    fn state_with_default(limit: i64) -> ReadState {
        Arc::new(RwLock::new(State::new(
            String::from("node1"),
            5000,
            ExponentLimit::new(limit).unwrap(),
        )))
    }

    fn body(res: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[tokio::test]
    async fn index_serves_the_page() {
        let res = warp::test::request()
            .path("/")
            .reply(&api(state_with_default(31)))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let page = String::from_utf8_lossy(res.body());
        assert!(page.contains("Mersenne Prime Generator"));
        assert!(page.contains(r#"limitInput.addEventListener("input", () => generate(false))"#));
    }

    #[tokio::test]
    async fn generates_up_to_the_query_limit() {
        let res = warp::test::request()
            .path("/api/primes?limit=5")
            .reply(&api(state_with_default(31)))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let json = body(&res);
        assert_eq!(json["limit"], 5);
        assert_eq!(json["primes"], json!([3, 7, 31]));
        assert_eq!(json["notice"]["description"], "Found 3 Mersenne primes.");
    }

    #[tokio::test]
    async fn missing_limit_uses_the_node_default() {
        let res = warp::test::request()
            .path("/api/primes")
            .reply(&api(state_with_default(7)))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body(&res)["primes"], json!([3, 7, 31, 127]));
    }

    #[tokio::test]
    async fn full_range_matches_the_known_primes() {
        let res = warp::test::request()
            .path("/api/primes?limit=31")
            .reply(&api(state_with_default(2)))
            .await;

        assert_eq!(
            body(&res)["primes"],
            json!([3, 7, 31, 127, 8191, 131071, 524287, 2147483647u64])
        );
        assert_eq!(body(&res)["count"], 8);
    }

    #[tokio::test]
    async fn out_of_range_limit_is_rejected() {
        let res = warp::test::request()
            .path("/api/primes?limit=40")
            .reply(&api(state_with_default(31)))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body(&res);
        assert_eq!(json["title"], "Error");
        assert!(json["description"].as_str().unwrap().contains("out of range"));
    }

    #[tokio::test]
    async fn non_integer_limit_is_rejected() {
        let res = warp::test::request()
            .path("/api/primes?limit=abc")
            .reply(&api(state_with_default(31)))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body(&res)["description"]
            .as_str()
            .unwrap()
            .contains("whole number"));
    }

    #[tokio::test]
    async fn post_accepts_text_and_numbers() {
        let filter = api(state_with_default(31));

        let res = warp::test::request()
            .method("POST")
            .path("/api/primes")
            .json(&json!({ "limit": "3" }))
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body(&res)["primes"], json!([3, 7]));

        let res = warp::test::request()
            .method("POST")
            .path("/api/primes")
            .json(&json!({ "limit": 2 }))
            .reply(&filter)
            .await;
        assert_eq!(body(&res)["primes"], json!([3]));

        let res = warp::test::request()
            .method("POST")
            .path("/api/primes")
            .json(&json!({ "limit": 1 }))
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let res = warp::test::request()
            .method("POST")
            .path("/api/primes")
            .header("content-type", "application/json")
            .body("{\"limit\": 2.5}")
            .reply(&api(state_with_default(31)))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(&res)["title"], "Error");
    }

    #[tokio::test]
    async fn malformed_query_is_a_bad_request() {
        let res = warp::test::request()
            .path("/api/primes?limit=3&limit=5")
            .reply(&api(state_with_default(31)))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(&res)["title"], "Error");
    }

    #[tokio::test]
    async fn non_json_body_is_unsupported() {
        let res = warp::test::request()
            .method("POST")
            .path("/api/primes")
            .header("content-type", "text/plain")
            .body("limit=5")
            .reply(&api(state_with_default(31)))
            .await;

        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body(&res)["title"], "Error");
    }

    #[tokio::test]
    async fn every_rejected_request_is_counted() {
        let state = state_with_default(31);
        let filter = api(state.clone());

        warp::test::request()
            .method("POST")
            .path("/api/primes")
            .header("content-type", "application/json")
            .body("{\"limit\": 2.5}")
            .reply(&filter)
            .await;
        warp::test::request()
            .path("/api/primes?limit=3&limit=5")
            .reply(&filter)
            .await;
        warp::test::request()
            .path("/api/verify/99")
            .reply(&filter)
            .await;
        warp::test::request().path("/nowhere").reply(&filter).await;

        assert_eq!(state.read().unwrap().rejections(), 3);
        assert_eq!(state.read().unwrap().generations(), 0);
    }

    #[tokio::test]
    async fn verify_uses_lucas_lehmer() {
        let filter = api(state_with_default(31));

        let res = warp::test::request()
            .path("/api/verify/13")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body(&res), json!({ "exponent": 13, "candidate": 8191, "prime": true }));

        let res = warp::test::request()
            .path("/api/verify/11")
            .reply(&filter)
            .await;
        assert_eq!(body(&res)["prime"], false);

        let res = warp::test::request()
            .path("/api/verify/64")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn state_counts_generations_and_rejections() {
        let state = state_with_default(31);
        let filter = api(state.clone());

        for path in ["/api/primes?limit=5", "/api/primes?limit=13", "/api/primes?limit=0"] {
            warp::test::request().path(path).reply(&filter).await;
        }

        let res = warp::test::request().path("/state").reply(&filter).await;
        let json = body(&res);
        assert_eq!(json["name"], "node1");
        assert_eq!(json["generations"], 2);
        assert_eq!(json["rejections"], 1);
        assert_eq!(json["last_limit"], 13);
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let res = warp::test::request()
            .path("/nowhere")
            .reply(&api(state_with_default(31)))
            .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(&res)["title"], "Error");
    }
}
