//! HaFAS request DTOs.
//!
//! These types serialize to the exact JSON the `mgate` endpoint expects.
//! Every service request is `{"meth": "<Method>", "req": {...}}`, and is
//! wrapped in an envelope together with the profile's client/auth defaults.

use serde::Serialize;
use serde_json::{Map, Value};

/// One service request, tagged with its method name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "meth", content = "req")]
pub enum ServiceRequest {
    LocMatch(LocMatchRequest),
    StationBoard(StationBoardRequest),
    TripSearch(TripSearchRequest),
    Reconstruction(ReconstructionRequest),
}

impl ServiceRequest {
    /// The wire method name.
    pub fn method(&self) -> &'static str {
        match self {
            ServiceRequest::LocMatch(_) => "LocMatch",
            ServiceRequest::StationBoard(_) => "StationBoard",
            ServiceRequest::TripSearch(_) => "TripSearch",
            ServiceRequest::Reconstruction(_) => "Reconstruction",
        }
    }
}

/// Top-level request body: `{"svcReqL": [...], ...profile defaults}`.
#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a> {
    #[serde(rename = "svcReqL")]
    pub svc_req_l: &'a [ServiceRequest],

    #[serde(flatten)]
    pub defaults: &'a Map<String, Value>,
}

/// A location reference by `lid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Location type; `"S"` for stations. Omitted on board requests.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,

    /// Composite location id, `A=1@L=<id>@`
    pub lid: String,
}

/// Wrapper used inside `viaLocL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViaLocation {
    pub loc: Location,
}

/// `LocMatch` request body: `{"input": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocMatchRequest {
    pub input: LocMatchInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocMatchInput {
    pub loc: LocationName,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_loc: Option<u32>,

    /// Input field the text was typed into; always `"S"`
    pub field: &'static str,
}

/// A free-text location to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationName {
    pub name: String,

    /// `"S"` for stations only, `"ALL"` for any location
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// `StationBoard` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationBoardRequest {
    /// `"DEP"` or `"ARR"`
    #[serde(rename = "type")]
    pub board_type: &'static str,

    pub stb_loc: Location,

    /// Window length in minutes
    pub dur: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_jny: Option<u32>,
}

/// Journey filter entry in `jnyFltrL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyFilter {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub value: String,
}

/// `TripSearch` request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSearchRequest {
    pub dep_loc_l: Vec<Location>,
    pub arr_loc_l: Vec<Location>,
    pub via_loc_l: Vec<ViaLocation>,

    /// `YYYYMMDD`
    pub out_date: String,

    /// `HHMMSS`
    pub out_time: String,

    pub jny_fltr_l: Vec<JourneyFilter>,
    pub min_chg_time: u32,

    /// `-1` for unlimited
    pub max_chg: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trf_req: Option<TariffRequest>,
}

/// `Reconstruction` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructionRequest {
    pub ctx_recon: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trf_req: Option<TariffRequest>,
}

/// Fare request block (`trfReq`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffRequest {
    /// Travel class: 1 or 2
    pub jny_cl: u8,
    pub c_type: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub r_type: Option<&'static str>,

    pub tvlr_prof: Vec<TravelerProfile>,
}

/// One traveler in `tvlrProf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerProfile {
    /// Age group code
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub age: i32,
    pub redtn_card: u8,
}
