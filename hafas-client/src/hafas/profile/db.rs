//! Deutsche Bahn.
//!
//! Requests are signed with a checksum. Journey details can carry fare
//! offers, requested through `trfReq` and returned as `trfRes.fareSetL`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::domain::{Journey, Ticket};
use crate::hafas::error::HafasError;
use crate::hafas::format::{reconstruction, traveler_profiles};
use crate::hafas::parse::{connection_to_journey, trip_data};
use crate::hafas::query::{JourneyQuery, TicketOptions};
use crate::hafas::request::{ServiceRequest, TariffRequest};
use crate::hafas::signing::Signing;
use crate::hafas::types::{FareSet, TariffResult};

use super::{Locale, Operations, Profile, ProductTable, STANDARD_PRODUCTS};

pub const BASE_URL: &str = "https://reiseauskunft.bahn.de/bin/mgate.exe";

const USER_AGENT: &str = "DB Navigator/19.10.04 (iPhone; iOS 13.1.2; Scale/2.00)";

const SALT: &str = "bdI8UVj40K5fvxwf";

/// DB encodes the ten standard classes with the standard bit values.
pub const PRODUCTS: ProductTable = STANDARD_PRODUCTS;

const FIRST_CLASS: &str = "1. Klasse";
const SECOND_CLASS: &str = "2. Klasse";

/// `Upsell` marker of first class fare sets.
const UPSELL_FIRST_CLASS: &str = "S1";

pub fn profile() -> Profile {
    Profile::generic(BASE_URL)
        .with_name("db")
        .with_locale(Locale::default())
        .with_signing(Signing::Checksum { salt: SALT.into() })
        .with_user_agent(USER_AGENT)
        .with_request_defaults(request_defaults())
        .with_products(PRODUCTS)
        .with_operations(Operations {
            format_journey,
            parse_journey,
            ..Operations::GENERIC
        })
}

fn request_defaults() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert(
        "client".into(),
        json!({"id": "DB", "v": "20100000", "type": "IPH", "name": "DB Navigator"}),
    );
    defaults.insert("ext".into(), json!("DB.R21.12.a"));
    defaults.insert("ver".into(), json!("1.15"));
    defaults.insert("auth".into(), json!({"type": "AID", "aid": "n91dB8Z77MLdoR0K"}));
    defaults
}

/// `Reconstruction` with an optional fare request.
fn format_journey(_profile: &Profile, query: &JourneyQuery) -> Result<ServiceRequest, HafasError> {
    let mut request = reconstruction(query);

    if let Some(tickets) = &query.tickets {
        request.trf_req = Some(TariffRequest {
            jny_cl: if tickets.first_class { 1 } else { 2 },
            c_type: "PK",
            r_type: Some("DB-PE"),
            tvlr_prof: traveler_profiles(&tickets.travelers)?,
        });
    }

    Ok(ServiceRequest::Reconstruction(request))
}

/// `Reconstruction` response, with fare offers when they were requested.
fn parse_journey(
    profile: &Profile,
    raw: &str,
    query: &JourneyQuery,
) -> Result<Journey, HafasError> {
    let data = trip_data(profile, raw)?;
    let (con, path) = data.first()?;
    let journey = connection_to_journey(profile, &data.table, con, &path)?;

    let Some(options) = &query.tickets else {
        return Ok(journey);
    };

    let trf_path = format!("{path}.trfRes");
    let trf_res = con.trf_res.as_ref().ok_or_else(|| {
        debug!(journey = journey.id(), "tickets requested but no trfRes returned");
        HafasError::parse(&trf_path, "missing")
    })?;
    let tickets = parse_tickets(trf_res, options, &trf_path)?;

    Ok(journey.with_tickets(tickets))
}

/// Decoded `addData` of a fare set. Only `Upsell` is read; its type varies.
#[derive(Debug, Deserialize)]
struct FareSetData {
    #[serde(rename = "Upsell")]
    upsell: Option<Value>,
}

impl FareSetData {
    fn is_first_class(&self) -> bool {
        self.upsell.as_ref().and_then(Value::as_str) == Some(UPSELL_FIRST_CLASS)
    }
}

fn parse_tickets(
    trf_res: &TariffResult,
    options: &TicketOptions,
    path: &str,
) -> Result<Vec<Ticket>, HafasError> {
    trf_res
        .fare_set_l
        .iter()
        .enumerate()
        .map(|(i, set)| parse_fare_set(set, options, &format!("{path}.fareSetL[{i}]")))
        .collect()
}

fn parse_fare_set(
    set: &FareSet,
    options: &TicketOptions,
    path: &str,
) -> Result<Ticket, HafasError> {
    let data = decode_add_data(&set.add_data, &format!("{path}.addData"))?;
    let first_class = options.first_class || data.is_first_class();

    let fare = set
        .fare_l
        .first()
        .ok_or_else(|| HafasError::parse(format!("{path}.fareL[0]"), "missing"))?;

    let price = set
        .prc
        .or(fare.prc)
        .ok_or_else(|| HafasError::parse(format!("{path}.prc"), "no price on fare set or fare"))?;

    let currency = fare
        .ticket_l
        .first()
        .map(|ticket| ticket.cur.clone())
        .ok_or_else(|| HafasError::parse(format!("{path}.fareL[0].ticketL[0].cur"), "missing"))?;

    Ok(Ticket::new(
        fare.name.clone(),
        if first_class { FIRST_CLASS } else { SECOND_CLASS },
        price,
        currency,
    ))
}

fn decode_add_data(encoded: &str, field: &str) -> Result<FareSetData, HafasError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| HafasError::parse(field, e))?;
    serde_json::from_slice(&bytes).map_err(|e| HafasError::parse(field, e))
}
