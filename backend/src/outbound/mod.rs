//! Outbound adapters: implementations of the domain's persistence ports.

pub mod persistence;
