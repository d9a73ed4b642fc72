#![cfg(test)]

pub mod common;
pub mod event_tests;
