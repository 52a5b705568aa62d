//! Response parsers shared by all operators.
//!
//! Parsing always runs in two steps: the envelope status check, which never
//! looks at `res`, and then the operation-specific decoding of `res` into
//! domain types. Stations and lines are referenced by index into the
//! response's `common` table; that table is resolved once per response into a
//! [`CommonTable`] and threaded through leg parsing.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::domain::{Coordinates, Journey, Leg, LegMode, Product, Station, StationId};

use super::error::HafasError;
use super::profile::Profile;
use super::query::JourneyQuery;
use super::time::{parse_date, parse_duration, parse_time};
use super::types::{
    Common, Connection, LocMatchResult, ResponseEnvelope, Section, StationBoardResult, TripResult,
    WireLocation,
};

/// Status value signalling success.
const STATUS_OK: &str = "OK";

/// Path of the operation result in every response.
const RES_PATH: &str = "svcResL[0].res";

/// The payload of a successful response, still undecoded.
#[derive(Debug)]
pub struct ResultBody {
    pub res: Value,
    /// Top-level `common`, used when `res` carries none
    pub common: Option<Value>,
}

/// Check the envelope status and extract `res`.
///
/// # Errors
///
/// `Protocol` if the envelope or the first result reports anything but `OK`;
/// `Parse` if the envelope itself is malformed or `res` is missing.
pub fn check_result(raw: &str) -> Result<ResultBody, HafasError> {
    let envelope: ResponseEnvelope =
        serde_json::from_str(raw).map_err(|e| HafasError::parse("svcResL", e))?;

    if let Some(code) = envelope.err.filter(|code| code != STATUS_OK) {
        return Err(HafasError::Protocol {
            code,
            text: envelope.err_txt.unwrap_or_default(),
        });
    }

    let first = envelope
        .svc_res_l
        .into_iter()
        .next()
        .ok_or_else(|| HafasError::parse("svcResL[0]", "empty result list"))?;

    if first.err != STATUS_OK {
        return Err(HafasError::Protocol {
            code: first.err,
            text: first.err_txt.unwrap_or_default(),
        });
    }

    let res = first
        .res
        .ok_or_else(|| HafasError::parse(RES_PATH, "missing"))?;

    Ok(ResultBody {
        res,
        common: envelope.common,
    })
}

/// Decode a raw JSON value, reporting failures against `field`.
pub fn decode<T: DeserializeOwned>(value: Value, field: &str) -> Result<T, HafasError> {
    serde_json::from_value(value).map_err(|e| HafasError::parse(field, e))
}

/// A line as referenced by `prodX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub name: Option<String>,
    pub product: Option<Product>,
}

/// The response's `common` table, resolved to domain values.
#[derive(Debug, Clone, Default)]
pub struct CommonTable {
    stations: Vec<Station>,
    lines: Vec<Line>,
}

impl CommonTable {
    /// Resolve every `locL` and `prodL` entry once.
    pub fn resolve(profile: &Profile, common: &Common, path: &str) -> Result<Self, HafasError> {
        let stations = common
            .loc_l
            .iter()
            .enumerate()
            .map(|(i, loc)| location_to_station(loc, &format!("{path}.locL[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        let lines = common
            .prod_l
            .iter()
            .map(|prod| Line {
                name: prod.name.clone(),
                product: prod.cls.and_then(|cls| profile.product_for_class(cls)),
            })
            .collect();

        Ok(Self { stations, lines })
    }

    /// Station at `locX`.
    pub fn station(&self, index: usize, field: &str) -> Result<&Station, HafasError> {
        self.stations.get(index).ok_or_else(|| {
            HafasError::parse(
                field,
                format!("locX {index} out of range ({} locations)", self.stations.len()),
            )
        })
    }

    /// Line at `prodX`.
    pub fn line(&self, index: usize, field: &str) -> Result<&Line, HafasError> {
        self.lines.get(index).ok_or_else(|| {
            HafasError::parse(
                field,
                format!("prodX {index} out of range ({} products)", self.lines.len()),
            )
        })
    }
}

/// Convert a `locL` entry to a station.
///
/// The id comes from `extId`, falling back to the `L=` field of `lid`.
/// Coordinates are microdegrees.
fn location_to_station(loc: &WireLocation, field: &str) -> Result<Station, HafasError> {
    let id = loc
        .ext_id
        .clone()
        .or_else(|| loc.lid.as_deref().and_then(lid_station_id))
        .ok_or_else(|| HafasError::parse(field, "neither extId nor lid with L= present"))?;

    let mut station = Station::new(StationId::new(id));
    if let Some(name) = &loc.name {
        station = station.with_name(name.clone());
    }
    if let Some(crd) = loc.crd {
        station = station.with_coordinates(Coordinates::new(
            crd.y as f64 / 1_000_000.0,
            crd.x as f64 / 1_000_000.0,
        ));
    }
    Ok(station)
}

/// Extract the `L=` value from a composite location id.
fn lid_station_id(lid: &str) -> Option<String> {
    lid.split('@')
        .find_map(|part| part.strip_prefix("L="))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Decoded `TripSearch`/`Reconstruction` result.
#[derive(Debug)]
pub struct TripData {
    pub table: CommonTable,
    pub connections: Vec<Connection>,
}

impl TripData {
    /// First connection with its path, as a reconstruction returns.
    pub fn first(&self) -> Result<(&Connection, String), HafasError> {
        self.connections
            .first()
            .map(|con| (con, connection_path(0)))
            .ok_or_else(|| {
                HafasError::parse(format!("{RES_PATH}.outConL"), "empty connection list")
            })
    }
}

fn connection_path(index: usize) -> String {
    format!("{RES_PATH}.outConL[{index}]")
}

/// Check status, then decode connections and the common table.
pub fn trip_data(profile: &Profile, raw: &str) -> Result<TripData, HafasError> {
    let body = check_result(raw)?;
    let result: TripResult = decode(body.res, RES_PATH)?;

    let common = match (result.common, body.common) {
        (Some(common), _) => common,
        (None, Some(top_level)) => decode(top_level, "common")?,
        (None, None) => Common::default(),
    };
    let table = CommonTable::resolve(profile, &common, &format!("{RES_PATH}.common"))?;

    let connections = result
        .out_con_l
        .into_iter()
        .enumerate()
        .map(|(i, value)| decode(value, &connection_path(i)))
        .collect::<Result<Vec<Connection>, _>>()?;

    trace!(
        connections = connections.len(),
        locations = table.stations.len(),
        "decoded trip result"
    );

    Ok(TripData { table, connections })
}

/// Convert a connection to a journey (without tickets).
pub fn connection_to_journey(
    profile: &Profile,
    table: &CommonTable,
    con: &Connection,
    path: &str,
) -> Result<Journey, HafasError> {
    let date =
        parse_date(&con.date).map_err(|e| HafasError::parse(format!("{path}.date"), e))?;
    let duration =
        parse_duration(&con.dur).map_err(|e| HafasError::parse(format!("{path}.dur"), e))?;

    let legs = con
        .sec_l
        .iter()
        .enumerate()
        .map(|(i, section)| {
            section_to_leg(profile, table, section, date, &format!("{path}.secL[{i}]"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Journey::new(con.ctx_recon.clone(), date, duration, legs))
}

/// Convert one `secL` entry to a leg.
fn section_to_leg(
    profile: &Profile,
    table: &CommonTable,
    section: &Section,
    date: NaiveDate,
    path: &str,
) -> Result<Leg, HafasError> {
    let mode = match section.kind.as_str() {
        "JNY" => LegMode::PublicTransport,
        "WALK" => LegMode::Walking,
        "TRSF" | "DEVI" => LegMode::Transfer,
        other => {
            debug!(path, kind = other, "unknown section type, treating as transfer");
            LegMode::Transfer
        }
    };

    let tz = profile.timezone();
    let time = |value: &str, field: &str| {
        parse_time(value, date, tz).map_err(|e| HafasError::parse(format!("{path}.{field}"), e))
    };

    let dep = &section.dep;
    let arr = &section.arr;

    let origin = table.station(dep.loc_x, &format!("{path}.dep.locX"))?.clone();
    let destination = table.station(arr.loc_x, &format!("{path}.arr.locX"))?.clone();

    let mut leg = Leg::new(
        origin,
        destination,
        time(&dep.d_time_s, "dep.dTimeS")?,
        time(&arr.a_time_s, "arr.aTimeS")?,
    );
    leg.mode = mode;
    leg.realtime_departure = dep
        .d_time_r
        .as_deref()
        .map(|t| time(t, "dep.dTimeR"))
        .transpose()?;
    leg.realtime_arrival = arr
        .a_time_r
        .as_deref()
        .map(|t| time(t, "arr.aTimeR"))
        .transpose()?;
    leg.departure_platform = dep.d_platf_r.clone().or_else(|| dep.d_platf_s.clone());
    leg.arrival_platform = arr.a_platf_r.clone().or_else(|| arr.a_platf_s.clone());
    leg.cancelled = dep.d_cncl.unwrap_or(false) || arr.a_cncl.unwrap_or(false);

    if mode == LegMode::PublicTransport {
        let jny = section
            .jny
            .as_ref()
            .ok_or_else(|| HafasError::parse(format!("{path}.jny"), "missing"))?;

        leg.id = jny.jid.clone();
        leg.cancelled |= jny.is_cncl.unwrap_or(false);

        if let Some(prod_x) = jny.prod_x {
            let line = table.line(prod_x, &format!("{path}.jny.prodX"))?;
            leg.name = line.name.clone();
            leg.product = line.product;
        } else {
            debug!(path, "journey section without prodX");
        }
    }

    Ok(leg)
}

/// Generic `LocMatch` parser, in the operator's ranking order.
pub fn locations(_profile: &Profile, raw: &str) -> Result<Vec<Station>, HafasError> {
    let body = check_result(raw)?;
    let result: LocMatchResult = decode(body.res, RES_PATH)?;

    result
        .matches
        .loc_l
        .iter()
        .enumerate()
        .map(|(i, loc)| location_to_station(loc, &format!("{RES_PATH}.match.locL[{i}]")))
        .collect()
}

/// Generic `StationBoard` parser: journeys carry their id only.
pub fn station_board(_profile: &Profile, raw: &str) -> Result<Vec<Journey>, HafasError> {
    let body = check_result(raw)?;
    let result: StationBoardResult = decode(body.res, RES_PATH)?;

    Ok(result
        .jny_l
        .into_iter()
        .map(|entry| Journey::from_id(entry.jid))
        .collect())
}

/// Generic `TripSearch` parser.
pub fn journeys(profile: &Profile, raw: &str) -> Result<Vec<Journey>, HafasError> {
    let data = trip_data(profile, raw)?;

    data.connections
        .iter()
        .enumerate()
        .map(|(i, con)| connection_to_journey(profile, &data.table, con, &connection_path(i)))
        .collect()
}

/// Generic `Reconstruction` parser.
pub fn journey(profile: &Profile, raw: &str, _query: &JourneyQuery) -> Result<Journey, HafasError> {
    let data = trip_data(profile, raw)?;
    let (con, path) = data.first()?;
    connection_to_journey(profile, &data.table, con, &path)
}
