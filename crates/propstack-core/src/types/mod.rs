//! Core data types shared by sources, resolvers and accessors

mod property_map;

pub use property_map::PropertyMap;
