pub mod entitlement;
pub mod scoring;
