//! UI layer: the gating app shell, fallback screens, and window-title metadata.

pub mod app;
pub mod doc_title;
pub mod fallback;
