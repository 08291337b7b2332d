//! Advent of Code 2023 solutions built on a shared grid toolkit.
//!
//! - [`grid`]: cells, directions and rectangular grids.
//! - [`heat_loss`]: minimal heat loss paths with bounded straight runs (day 17).
//! - [`platform`]: tilting platforms of rolling rocks and spin cycle projection (day 14).
//! - [`solutions`]: the runnable days.

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::option_if_let_else,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(clippy::unwrap_used)]

pub mod grid;
pub mod heat_loss;
pub mod platform;
pub mod solutions;
