//! Assets module - domain models for assets and their taxonomy elements.

mod assets_model;


pub use assets_model::{Asset, AssetElement, ElementReference, TermReference};
