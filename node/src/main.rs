use backend::state::State;
use clap::Parser;
use log::info;
use std::sync::{Arc, RwLock};
use warp::Filter;

mod arguments;
mod filters;
mod handlers;

use crate::arguments::Arguments;

type ReadState = Arc<RwLock<State>>;

#[tokio::main]
async fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "node=info");
    }
    pretty_env_logger::init();

    let args = Arguments::parse();
    let default_limit = args.default_limit();

    info!(
        "Booting node {} ({}), default limit {}",
        args.port, args.name, default_limit
    );

    let shared_state: ReadState = Arc::new(RwLock::new(State::new(
        args.name.clone(),
        args.port,
        default_limit,
    )));

    let api = filters::api(shared_state).with(warp::log("node::api"));

    info!("Starting web server on http://{}:{}", args.host, args.port);
    warp::serve(api).run((args.host, args.port)).await;
}
