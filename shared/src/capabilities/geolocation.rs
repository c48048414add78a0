use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::{AppError, ErrorKind};

/// One-shot device position lookup.
#[derive(crux_core::macros::Capability)]
pub struct Geolocation<Ev> {
    context: CapabilityContext<GeolocationOperation, Ev>,
}

impl<Ev> Geolocation<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<GeolocationOperation, Ev>) -> Self {
        Self { context }
    }

    /// Asks the shell for the current position. The shell answers with
    /// [`GeolocationError::Unsupported`] when the platform has no location API.
    pub fn get_current_position<F>(&self, callback: F)
    where
        F: FnOnce(GeolocationResult) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context
                .request_from_shell(GeolocationOperation::GetCurrentPosition)
                .await;
            context.update_app(callback(result));
        });
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GeolocationOperation {
    GetCurrentPosition,
}

impl Operation for GeolocationOperation {
    type Output = GeolocationResult;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
}

impl Position {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
        }
    }

    /// # Errors
    /// [`GeolocationError::InvalidPosition`] for NaN, infinite or out-of-range values.
    pub fn validated(self) -> Result<Self, GeolocationError> {
        let valid = self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude);
        if valid {
            Ok(self)
        } else {
            Err(GeolocationError::InvalidPosition {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Formats as `"{latitude}, {longitude}"`, the value written to the location field.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum GeolocationError {
    #[error("geolocation is not available on this platform")]
    Unsupported,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {reason}")]
    PositionUnavailable { reason: String },

    #[error("location request timed out")]
    Timeout,

    #[error("invalid position: lat={latitude}, lon={longitude}")]
    InvalidPosition { latitude: f64, longitude: f64 },
}

impl From<GeolocationError> for AppError {
    fn from(e: GeolocationError) -> Self {
        let kind = match e {
            GeolocationError::Unsupported => ErrorKind::LocationUnsupported,
            GeolocationError::PermissionDenied => ErrorKind::LocationPermissionDenied,
            GeolocationError::PositionUnavailable { .. }
            | GeolocationError::Timeout
            | GeolocationError::InvalidPosition { .. } => ErrorKind::Location,
        };
        AppError::new(kind, e.to_string())
    }
}

pub type GeolocationResult = Result<Position, GeolocationError>;
