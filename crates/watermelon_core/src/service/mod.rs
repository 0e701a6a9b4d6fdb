//! Use-case services for the presentation layer.
//!
//! # Responsibility
//! - Enforce user-input rules before state reaches `NoteStore`.

pub mod note_service;
