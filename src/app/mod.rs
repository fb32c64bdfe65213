//! Core application logic: state, events, key handling, and the actions they produce.

pub mod action;
pub mod event;
pub mod form;
pub mod handler;
pub mod state;
