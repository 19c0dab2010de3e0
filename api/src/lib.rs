//! # OpenLogic API
//!
//! HTTP surface of the course marketplace: teacher and student accounts,
//! course management and purchases, served by actix-web.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
