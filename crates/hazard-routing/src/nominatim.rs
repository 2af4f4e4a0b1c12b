use async_trait::async_trait;
use hazard_core::HazardResult;
use hazard_geo::Coordinate;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::client::{join, parse_base_url, ClientError};
use crate::collaborator::Geocoder;

/// Address lookup against a Nominatim `search` endpoint.
#[derive(Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(client: Client, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> HazardResult<Option<Coordinate>> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(None);
        }
        let url = join(&self.base_url, "search")?;
        let response = self
            .client
            .get(url)
            .query(&[("format", "json"), ("limit", "1"), ("q", address)])
            .send()
            .await
            .map_err(ClientError::from)?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()).into());
        }
        let places = response
            .json::<Vec<NominatimPlace>>()
            .await
            .map_err(ClientError::from)?;
        Ok(first_match(places)?)
    }
}

fn first_match(places: Vec<NominatimPlace>) -> Result<Option<Coordinate>, ClientError> {
    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };
    let latitude = place
        .lat
        .parse::<f64>()
        .map_err(|err| ClientError::Decode(format!("latitude {:?}: {err}", place.lat)))?;
    let longitude = place
        .lon
        .parse::<f64>()
        .map_err(|err| ClientError::Decode(format!("longitude {:?}: {err}", place.lon)))?;
    tracing::debug!(
        place = place.display_name.as_deref().unwrap_or(""),
        latitude,
        longitude,
        "Geocoded address"
    );
    Ok(Some(Coordinate::new(latitude, longitude)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places(json: &str) -> Vec<NominatimPlace> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn takes_the_first_place() {
        let found = first_match(places(
            r#"[{"lat":"17.385","lon":"78.4867","display_name":"Hyderabad"},
                {"lat":"0","lon":"0"}]"#,
        ))
        .unwrap();
        assert_eq!(found, Some(Coordinate::new(17.385, 78.4867)));
    }

    #[test]
    fn no_places_is_no_match() {
        assert_eq!(first_match(places("[]")).unwrap(), None);
    }

    #[test]
    fn garbage_coordinates_fail_to_decode() {
        let err = first_match(places(r#"[{"lat":"north","lon":"78.4"}]"#)).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn blank_address_skips_the_request() {
        // Unroutable base URL: any request would fail.
        let geocoder = NominatimGeocoder::new(Client::new(), "http://127.0.0.1:9").unwrap();
        assert_eq!(geocoder.geocode("   ").await.unwrap(), None);
    }
}
