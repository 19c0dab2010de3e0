//! Course service module
//!
//! Course authoring for teachers, the public catalogue, and purchases
//! for students.

mod service;


pub use service::CourseService;
