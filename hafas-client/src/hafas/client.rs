//! HaFAS client.
//!
//! Each operation runs the same pipeline: format the query through the
//! profile, wrap it in the envelope, serialize, sign, send, and hand the raw
//! response back to the profile's parser. The client itself knows nothing
//! about operators.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::{Journey, Station};

use super::error::HafasError;
use super::profile::Profile;
use super::query::{
    BoardDirection, JourneyQuery, JourneysQuery, LocationsQuery, StationBoardQuery,
};
use super::request::{RequestEnvelope, ServiceRequest};
use super::transport::{Headers, Transport};

/// Configuration for [`HafasClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent override; the profile's default is used if unset
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self { user_agent: None }
    }

    /// Send a custom `User-Agent`.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for one HaFAS operator.
///
/// Holds no mutable state; share it across tasks freely. Pooling and
/// rate limiting belong to the transport.
#[derive(Debug, Clone)]
pub struct HafasClient<T> {
    profile: Arc<Profile>,
    transport: T,
    user_agent: String,
}

impl<T: Transport> HafasClient<T> {
    /// Create a client with the default configuration.
    pub fn new(profile: Profile, transport: T) -> Self {
        Self::with_config(profile, transport, ClientConfig::default())
    }

    pub fn with_config(profile: Profile, transport: T, config: ClientConfig) -> Self {
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| profile.default_user_agent().to_string());

        Self {
            profile: Arc::new(profile),
            transport,
            user_agent,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Stations matching a free-text name, best match first.
    pub async fn locations(&self, query: &LocationsQuery) -> Result<Vec<Station>, HafasError> {
        let ops = self.profile.operations();
        let request = (ops.format_locations)(&self.profile, query)?;
        let raw = self.send(request).await?;
        (ops.parse_locations)(&self.profile, &raw)
    }

    /// Journeys departing from `station` within the next minute.
    pub async fn departures(&self, station: Station) -> Result<Vec<Journey>, HafasError> {
        self.station_board(&StationBoardQuery::new(station, BoardDirection::Departure))
            .await
    }

    /// Journeys arriving at `station` within the next minute.
    pub async fn arrivals(&self, station: Station) -> Result<Vec<Journey>, HafasError> {
        self.station_board(&StationBoardQuery::new(station, BoardDirection::Arrival))
            .await
    }

    /// Station board. Returned journeys carry their id only.
    pub async fn station_board(
        &self,
        query: &StationBoardQuery,
    ) -> Result<Vec<Journey>, HafasError> {
        let ops = self.profile.operations();
        let request = (ops.format_station_board)(&self.profile, query)?;
        let raw = self.send(request).await?;
        (ops.parse_station_board)(&self.profile, &raw)
    }

    /// Search journeys between two stations.
    pub async fn journeys(&self, query: &JourneysQuery) -> Result<Vec<Journey>, HafasError> {
        let ops = self.profile.operations();
        let request = (ops.format_journeys)(&self.profile, query)?;
        let raw = self.send(request).await?;
        (ops.parse_journeys)(&self.profile, &raw)
    }

    /// Fetch the current state of a journey, optionally with fare offers.
    pub async fn journey(&self, query: &JourneyQuery) -> Result<Journey, HafasError> {
        let ops = self.profile.operations();
        let request = (ops.format_journey)(&self.profile, query)?;
        let raw = self.send(request).await?;
        (ops.parse_journey)(&self.profile, &raw, query)
    }

    async fn send(&self, request: ServiceRequest) -> Result<String, HafasError> {
        let method = request.method();
        let requests = [request];
        let envelope = RequestEnvelope {
            svc_req_l: &requests,
            defaults: self.profile.request_defaults(),
        };
        let body = serde_json::to_vec(&envelope).map_err(|e| {
            HafasError::invalid_argument(format!("could not serialize {method} request: {e}"))
        })?;

        let url = match self.profile.sign(&body) {
            Some(query) => format!("{}?{query}", self.profile.base_url()),
            None => self.profile.base_url().to_string(),
        };

        let mut headers = Headers::new();
        headers.insert("User-Agent", self.user_agent.clone());
        headers.insert("Content-Type", "application/json".to_string());

        debug!(method, %url, profile = self.profile.name(), "sending HaFAS request");
        trace!(bytes = body.len(), "request body");

        let raw = self.transport.send(&url, body, &headers).await?;

        trace!(method, bytes = raw.len(), "received HaFAS response");
        Ok(raw)
    }
}
