//! Storage layer abstraction trait definition

mod popup_repository;

pub use popup_repository::{InMemoryPopupRepository, PopupRepository};
