pub mod error;
pub mod limit;
pub mod mersenne_prime;
pub mod message;
pub mod state;
