//! Element mapping between the source and target asset schemas.

mod element_mapping;

pub use element_mapping::ElementMapping;
