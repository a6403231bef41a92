use snafu::Snafu;

use crate::primitives::ValueKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display(
        "`{}` must be a scalar or unset, but {} values were given",
        argument,
        length
    ))]
    ScalarArgumentExpected {
        argument: &'static str,
        length: usize,
    },

    #[snafu(display(
        "Cannot combine listings: column `{}` is {} in one listing and {} in the other",
        column,
        left,
        right
    ))]
    IncompatibleListingColumn {
        column: String,
        left: ValueKind,
        right: ValueKind,
    },

    #[snafu(display("Chunk size must be at least 1"))]
    InvalidChunkSize,

    #[snafu(display("InvalidSpatialReferenceString: {}", spatial_reference_string))]
    InvalidSpatialReferenceString {
        spatial_reference_string: String,
    },

    #[snafu(display("ParseU32: {}", source))]
    ParseU32 {
        source: <u32 as std::str::FromStr>::Err,
    },
}
