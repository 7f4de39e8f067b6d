//! Location used for the weather panel.

use tracing::warn;

use crate::types::Coordinates;

/// Source of the user's coordinates.
#[allow(async_fn_in_trait)]
pub trait LocationSource {
    /// Returns `None` when the location is unknown or access was denied.
    async fn locate(&self) -> Option<Coordinates>;
}

/// Location fixed by the configuration file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredLocation(pub Option<Coordinates>);

impl LocationSource for ConfiguredLocation {
    async fn locate(&self) -> Option<Coordinates> {
        self.0.filter(Coordinates::is_valid)
    }
}

/// Resolves the location, falling back to [`Coordinates::DEFAULT`].
pub async fn resolve_location<L: LocationSource>(source: &L) -> Coordinates {
    match source.locate().await {
        Some(coords) => coords,
        None => {
            warn!("Location unavailable, using default");
            Coordinates::DEFAULT
        }
    }
}
