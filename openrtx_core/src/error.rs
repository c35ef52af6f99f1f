//! Error taxonomy shared across the OpenRTX workspace.
//!
//! Mirrors the error categories used by the audio-stream substrate and the
//! protocol layer: resource busy, invalid argument, hardware failure,
//! protocol failure, and pre-emption. Crates that need a narrower enum
//! define their own and convert into/from this one at their boundary.

use core::fmt;

/// Error codes shared by the stream substrate, the DSP pipeline, and the
/// platform crate.
///
/// Uses `#[repr(C)]` for C-compatible memory layout, matching the
/// `streamId`/`pathId`-style C ABI this firmware's abstract interfaces are
/// specified against.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreError {
    /// No error occurred.
    Ok = 0,
    /// A null pointer was passed where a valid pointer was expected.
    NullPointer = 1,
    /// An invalid parameter value was provided (bad sample rate, etc.).
    InvalidParameter = 2,
    /// An invalid buffer size was specified (e.g. odd length in circular-double mode).
    InvalidBufferSize = 3,
    /// The requested resource is already owned at equal or higher priority.
    ResourceBusy = 4,
    /// The underlying hardware reported a transfer error.
    HardwareFailure = 5,
    /// The caller's stream was pre-empted by a higher-priority owner.
    PreEmpted = 6,
    /// Memory allocation failed.
    AllocationFailed = 7,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Ok => write!(f, "no error"),
            CoreError::NullPointer => write!(f, "null pointer"),
            CoreError::InvalidParameter => write!(f, "invalid parameter"),
            CoreError::InvalidBufferSize => write!(f, "invalid buffer size"),
            CoreError::ResourceBusy => write!(f, "resource busy"),
            CoreError::HardwareFailure => write!(f, "hardware failure"),
            CoreError::PreEmpted => write!(f, "pre-empted by higher priority owner"),
            CoreError::AllocationFailed => write!(f, "allocation failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

/// Result type alias for OpenRTX core operations.
pub type Result<T> = core::result::Result<T, CoreError>;
