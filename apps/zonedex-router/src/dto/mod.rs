//! Request and response bodies

pub mod zones;
