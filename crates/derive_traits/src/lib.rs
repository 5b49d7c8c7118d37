//! The parameter trait lives in its own crate so that the attribute
//! macro in `derive_custom` can refer to it by an absolute path,
//! both from the main crate and from its benches.
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A struct that is read from one named top-level section of the
/// parameter file.
pub trait QuadsimParameters: Serialize + DeserializeOwned {
    fn section_name() -> &'static str;
}
