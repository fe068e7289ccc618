//! Core journal engine: entry model, markup parsing and rendering,
//! media URL resolution. Pure and synchronous; retrieval lives in
//! `quill_store`.

pub mod archive;
pub mod display;
pub mod html;
pub mod inline;
pub mod markup;
pub mod media;
pub mod model;
pub mod time;
pub mod visibility;
