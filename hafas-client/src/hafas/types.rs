//! HaFAS response DTOs.
//!
//! These types map directly to the `mgate` JSON responses. The envelope keeps
//! `res` and `common` as raw JSON so the status check can run before any
//! operation-specific shape is imposed. HaFAS omits empty lists and unknown
//! optional fields rather than sending null, hence the liberal `default`.

use serde::Deserialize;
use serde_json::Value;

/// Top-level response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Envelope-level status; only present on envelope-level failures.
    pub err: Option<String>,

    pub err_txt: Option<String>,

    #[serde(default)]
    pub svc_res_l: Vec<ServiceResult>,

    /// Shared entity table, when not nested inside `res`.
    pub common: Option<Value>,
}

/// One entry of `svcResL`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResult {
    pub meth: Option<String>,

    /// `"OK"` on success, an error code otherwise
    pub err: String,

    pub err_txt: Option<String>,

    pub res: Option<Value>,
}

/// Shared entity table referenced by index from journeys and sections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Common {
    #[serde(default)]
    pub loc_l: Vec<WireLocation>,

    #[serde(default)]
    pub prod_l: Vec<WireProduct>,
}

/// Location entry in `common.locL`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLocation {
    /// Composite id, e.g. `A=1@O=Basel SBB@X=7589563@Y=47547412@L=8500010@`
    pub lid: Option<String>,

    pub name: Option<String>,

    /// Plain station id
    pub ext_id: Option<String>,

    pub crd: Option<WireCoordinate>,
}

/// Coordinates in microdegrees.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WireCoordinate {
    pub x: i64,
    pub y: i64,
}

/// Product entry in `common.prodL`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProduct {
    /// Display name, e.g. "IC 2013"
    pub name: Option<String>,

    /// Product class bitmask value
    pub cls: Option<u32>,
}

/// `res` of a `LocMatch` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LocMatchResult {
    #[serde(rename = "match")]
    pub matches: LocMatchList,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocMatchList {
    #[serde(default)]
    pub loc_l: Vec<WireLocation>,
}

/// `res` of a `StationBoard` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationBoardResult {
    #[serde(default)]
    pub jny_l: Vec<BoardJourney>,
}

/// Board entry in `jnyL`.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardJourney {
    pub jid: String,
}

/// `res` of a `TripSearch` or `Reconstruction` response.
///
/// Connections stay raw so each can be decoded with its own index in error
/// paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResult {
    pub common: Option<Common>,

    #[serde(default)]
    pub out_con_l: Vec<Value>,
}

/// Connection entry in `outConL`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Reconstruction token
    pub ctx_recon: String,

    /// `YYYYMMDD`
    pub date: String,

    /// `(DD)HHMMSS`
    pub dur: String,

    #[serde(default)]
    pub sec_l: Vec<Section>,

    pub trf_res: Option<TariffResult>,
}

/// Section entry in `secL`: one leg.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    /// `"JNY"`, `"WALK"`, `"TRSF"`, ...
    #[serde(rename = "type")]
    pub kind: String,

    pub dep: SectionDeparture,
    pub arr: SectionArrival,
    pub jny: Option<SectionJourney>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDeparture {
    /// Index into `common.locL`
    pub loc_x: usize,
    pub d_time_s: String,
    pub d_time_r: Option<String>,
    pub d_platf_s: Option<String>,
    pub d_platf_r: Option<String>,
    pub d_cncl: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionArrival {
    /// Index into `common.locL`
    pub loc_x: usize,
    pub a_time_s: String,
    pub a_time_r: Option<String>,
    pub a_platf_s: Option<String>,
    pub a_platf_r: Option<String>,
    pub a_cncl: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionJourney {
    pub jid: Option<String>,

    /// Index into `common.prodL`
    pub prod_x: Option<usize>,

    pub is_cncl: Option<bool>,
}

/// Fare result (`trfRes`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffResult {
    #[serde(default)]
    pub fare_set_l: Vec<FareSet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareSet {
    /// Base64-encoded JSON object
    pub add_data: String,

    /// Price in cents
    pub prc: Option<i64>,

    #[serde(default)]
    pub fare_l: Vec<Fare>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fare {
    pub name: String,
    pub prc: Option<i64>,

    #[serde(default)]
    pub ticket_l: Vec<WireTicket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTicket {
    pub cur: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_error_envelope() {
        let json = r#"{
            "ver": "1.15",
            "svcResL": [{"meth": "TripSearch", "err": "LOCATION", "errTxt": "location missing"}]
        }"#;

        let envelope: ResponseEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.err.is_none());
        assert_eq!(envelope.svc_res_l[0].err, "LOCATION");
        assert_eq!(envelope.svc_res_l[0].err_txt.as_deref(), Some("location missing"));
        assert!(envelope.svc_res_l[0].res.is_none());
    }

    #[test]
    fn deserialize_common() {
        let json = r#"{
            "locL": [{
                "lid": "A=1@O=Basel SBB@X=7589563@Y=47547412@U=80@L=8500010@",
                "type": "S",
                "name": "Basel SBB",
                "extId": "8500010",
                "crd": {"x": 7589563, "y": 47547412}
            }],
            "prodL": [{"name": "IC 2013", "cls": 2, "icoX": 0}]
        }"#;

        let common: Common = serde_json::from_str(json).unwrap();
        assert_eq!(common.loc_l[0].ext_id.as_deref(), Some("8500010"));
        assert_eq!(common.loc_l[0].crd.unwrap().x, 7589563);
        assert_eq!(common.prod_l[0].cls, Some(2));
    }

    #[test]
    fn deserialize_section() {
        let json = r#"{
            "type": "JNY",
            "icoX": 0,
            "dep": {"locX": 0, "dTimeS": "093200", "dTimeR": "093500", "dPlatfS": "7"},
            "arr": {"locX": 1, "aTimeS": "01001500", "aPlatfS": "12"},
            "jny": {"jid": "1|1|0|80|15032024", "prodX": 0}
        }"#;

        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section.kind, "JNY");
        assert_eq!(section.dep.d_time_r.as_deref(), Some("093500"));
        assert_eq!(section.arr.a_time_s, "01001500");
        assert_eq!(section.jny.unwrap().prod_x, Some(0));
    }

    #[test]
    fn missing_required_field() {
        let json = r#"{"date": "20240315", "dur": "013000"}"#;
        let err = serde_json::from_str::<Connection>(json).unwrap_err();
        assert!(err.to_string().contains("ctxRecon"));
    }
}
