use serde::Serialize;

use crate::limit::ExponentLimit;
use crate::message::Port;

/// What a node reports about itself on `/state`.
///
/// Nothing here feeds back into enumeration; every generation is computed
/// from its limit alone.
#[derive(Serialize)]
pub struct State {
    name: String,
    port: Port,
    default_limit: ExponentLimit,
    generations: u64,
    rejections: u64,
    last_limit: Option<ExponentLimit>,
}

impl State {
    pub fn new(name: String, port: Port, default_limit: ExponentLimit) -> Self {
        State {
            name,
            port,
            default_limit,
            generations: 0,
            rejections: 0,
            last_limit: None,
        }
    }

    pub fn my_port(&self) -> Port {
        self.port
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_limit(&self) -> ExponentLimit {
        self.default_limit
    }

    pub fn record_generation(&mut self, limit: ExponentLimit) {
        self.generations += 1;
        self.last_limit = Some(limit);
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn rejections(&self) -> u64 {
        self.rejections
    }

    pub fn last_limit(&self) -> Option<ExponentLimit> {
        self.last_limit
    }
}
