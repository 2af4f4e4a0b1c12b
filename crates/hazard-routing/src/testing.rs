use async_trait::async_trait;
use hazard_core::{HazardError, HazardResult};
use hazard_geo::{Coordinate, Route};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::collaborator::{Geocoder, Router};

type Respond = dyn Fn(Coordinate, Coordinate) -> HazardResult<Option<Route>> + Send + Sync;

pub(crate) fn line(from: Coordinate, to: Coordinate) -> Route {
    Route::new(vec![from, to]).unwrap()
}

/// Router answering from a closure and recording every request.
pub(crate) struct FnRouter {
    respond: Box<Respond>,
    calls: Mutex<Vec<(Coordinate, Coordinate)>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FnRouter {
    pub(crate) fn new(
        respond: impl Fn(Coordinate, Coordinate) -> HazardResult<Option<Route>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
            delay: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub(crate) fn straight_lines() -> Self {
        Self::new(|from, to| Ok(Some(line(from, to))))
    }

    pub(crate) fn failing() -> Self {
        Self::new(|_, _| Err(HazardError::upstream("router offline")))
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(Coordinate, Coordinate)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Router for FnRouter {
    async fn route(&self, from: Coordinate, to: Coordinate) -> HazardResult<Option<Route>> {
        self.calls.lock().unwrap().push((from, to));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.respond)(from, to)
    }
}

/// Geocoder backed by a fixed address book.
pub(crate) struct MapGeocoder {
    places: HashMap<String, Coordinate>,
    offline: bool,
}

impl MapGeocoder {
    pub(crate) fn new(places: &[(&str, Coordinate)]) -> Self {
        Self {
            places: places
                .iter()
                .map(|(name, coord)| (name.to_string(), *coord))
                .collect(),
            offline: false,
        }
    }

    pub(crate) fn offline() -> Self {
        Self {
            places: HashMap::new(),
            offline: true,
        }
    }
}

#[async_trait]
impl Geocoder for MapGeocoder {
    async fn geocode(&self, address: &str) -> HazardResult<Option<Coordinate>> {
        if self.offline {
            return Err(HazardError::upstream("geocoder offline"));
        }
        Ok(self.places.get(address).copied())
    }
}
