//! mlp-rs: a small feed-forward neural network trainer for Rust.
//!
//! This crate provides a native Rust implementation of full-batch gradient
//! descent for a fixed-topology multilayer perceptron (input, 20, 3, 1 units;
//! ReLU, ReLU, Sigmoid), with support for L2 weight-penalty and
//! inverted-dropout regularization, plus rendering of cost curves and learned
//! decision boundaries.

pub mod data;
pub mod linalg;
pub mod network;
pub mod predict;
pub mod report;
pub mod testing;
pub mod training;
