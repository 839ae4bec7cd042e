//! Token gate: stateless issuance and verification of signed, time-limited
//! bearer tokens (HS256 JWTs).
//!
//! Nothing is stored; a token is valid while its signature checks out and
//! `exp` has not passed.

pub mod domain;
pub mod errors;
pub mod service;

pub use service::TokenService;
