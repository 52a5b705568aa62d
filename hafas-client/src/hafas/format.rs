//! Request formatters shared by all operators.
//!
//! Each formatter is a pure function from a typed query to a
//! [`ServiceRequest`]. Operator profiles reuse the building blocks here when
//! they extend a request with their own fields.

use crate::domain::{AgeGroup, Station};

use super::error::HafasError;
use super::profile::Profile;
use super::query::{
    JourneyQuery, JourneysQuery, LocationsQuery, MAX_TRAVELERS, StationBoardQuery, Traveler,
};
use super::request::{
    JourneyFilter, LocMatchInput, LocMatchRequest, Location, LocationName, ReconstructionRequest,
    ServiceRequest, StationBoardRequest, TravelerProfile, TripSearchRequest, ViaLocation,
};
use super::time::{format_date, format_time};

/// Composite location id for a station: `A=1@L=<id>@`.
///
/// # Examples
///
/// ```
/// use hafas_client::domain::Station;
/// use hafas_client::hafas::format::location_id;
///
/// assert_eq!(location_id(&Station::new(8096009_u64)), "A=1@L=8096009@");
/// ```
pub fn location_id(station: &Station) -> String {
    format!("A=1@L={}@", station.id())
}

/// A `{"type": "S", "lid": ...}` station location.
pub fn station_location(station: &Station) -> Location {
    Location {
        kind: Some("S"),
        lid: location_id(station),
    }
}

/// `LocMatch` request for a free-text location search.
pub fn locations(_profile: &Profile, query: &LocationsQuery) -> Result<ServiceRequest, HafasError> {
    let name = query.name.trim();
    if name.is_empty() {
        return Err(HafasError::invalid_argument("location search text is empty"));
    }

    Ok(ServiceRequest::LocMatch(LocMatchRequest {
        input: LocMatchInput {
            loc: LocationName {
                name: name.to_string(),
                kind: query.kind.code(),
            },
            max_loc: query.max_results,
            field: "S",
        },
    }))
}

/// `StationBoard` request.
pub fn station_board(
    _profile: &Profile,
    query: &StationBoardQuery,
) -> Result<ServiceRequest, HafasError> {
    Ok(ServiceRequest::StationBoard(StationBoardRequest {
        board_type: query.direction.code(),
        stb_loc: Location {
            kind: None,
            lid: location_id(&query.station),
        },
        dur: query.duration_mins,
        date: query.when.map(|when| format_date(when.date())),
        time: query.when.map(|when| format_time(when.time())),
        max_jny: query.max_journeys,
    }))
}

/// `TripSearch` request.
pub fn journeys(profile: &Profile, query: &JourneysQuery) -> Result<ServiceRequest, HafasError> {
    if query.max_changes < -1 {
        return Err(HafasError::invalid_argument(format!(
            "max_changes must be -1 (unlimited) or non-negative, got {}",
            query.max_changes
        )));
    }

    let products = profile.encode_products(&query.products)?;

    Ok(ServiceRequest::TripSearch(TripSearchRequest {
        dep_loc_l: vec![station_location(&query.origin)],
        arr_loc_l: vec![station_location(&query.destination)],
        via_loc_l: query
            .via
            .iter()
            .map(|station| ViaLocation {
                loc: station_location(station),
            })
            .collect(),
        out_date: format_date(query.when.date()),
        out_time: format_time(query.when.time()),
        jny_fltr_l: vec![JourneyFilter {
            kind: "PROD",
            mode: "INC",
            value: products.to_string(),
        }],
        min_chg_time: query.min_change_time,
        max_chg: query.max_changes,
        trf_req: None,
    }))
}

/// Base `Reconstruction` body without fare data.
pub fn reconstruction(query: &JourneyQuery) -> ReconstructionRequest {
    ReconstructionRequest {
        ctx_recon: query.id.clone(),
        trf_req: None,
    }
}

/// `Reconstruction` request. Ticket requests need an operator profile.
pub fn journey(profile: &Profile, query: &JourneyQuery) -> Result<ServiceRequest, HafasError> {
    if query.tickets.is_some() {
        return Err(HafasError::invalid_argument(format!(
            "profile '{}' does not support ticket requests",
            profile.name()
        )));
    }
    Ok(ServiceRequest::Reconstruction(reconstruction(query)))
}

/// `tvlrProf` entries, one per traveler.
///
/// # Errors
///
/// Fails with `InvalidArgument` for an empty list, more than
/// [`MAX_TRAVELERS`] travelers, or an invalid age.
pub fn traveler_profiles(travelers: &[Traveler]) -> Result<Vec<TravelerProfile>, HafasError> {
    if travelers.is_empty() {
        return Err(HafasError::invalid_argument("at least one traveler is required"));
    }
    if travelers.len() > MAX_TRAVELERS {
        return Err(HafasError::invalid_argument(format!(
            "at most {MAX_TRAVELERS} travelers per request, got {}",
            travelers.len()
        )));
    }

    travelers
        .iter()
        .map(|traveler| -> Result<TravelerProfile, HafasError> {
            let group = AgeGroup::from_age(f64::from(traveler.age))?;
            Ok(TravelerProfile {
                kind: group.code(),
                age: traveler.age,
                redtn_card: traveler.reduction_card.code(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ReductionCard};
    use crate::hafas::query::{BoardDirection, LocationKind, TicketOptions};
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::{Value, json};

    fn profile() -> Profile {
        Profile::generic("https://example.invalid/mgate.exe")
    }

    fn when() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(7, 4, 9)
            .unwrap()
    }

    fn body(request: &ServiceRequest) -> Value {
        serde_json::to_value(request).unwrap()["req"].clone()
    }

    #[test]
    fn locations_request() {
        let query = LocationsQuery::new("Basel").with_max_results(3);
        let request = locations(&profile(), &query).unwrap();

        assert_eq!(request.method(), "LocMatch");
        assert_eq!(
            body(&request),
            json!({"input": {"loc": {"name": "Basel", "type": "S"}, "maxLoc": 3, "field": "S"}})
        );
    }

    #[test]
    fn locations_request_any_kind() {
        let query = LocationsQuery::new(" Karlsruhe ").with_kind(LocationKind::All);
        let req = body(&locations(&profile(), &query).unwrap());

        assert_eq!(req["input"]["loc"], json!({"name": "Karlsruhe", "type": "ALL"}));
        assert!(req["input"].get("maxLoc").is_none());
    }

    #[test]
    fn empty_location_search() {
        for name in ["", "   "] {
            assert!(matches!(
                locations(&profile(), &LocationsQuery::new(name)),
                Err(HafasError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn board_request() {
        let query = StationBoardQuery::new(Station::new(8011160_u64), BoardDirection::Departure);
        let request = station_board(&profile(), &query).unwrap();

        assert_eq!(request.method(), "StationBoard");
        assert_eq!(
            body(&request),
            json!({"type": "DEP", "stbLoc": {"lid": "A=1@L=8011160@"}, "dur": 1})
        );
    }

    #[test]
    fn board_request_with_window() {
        let query = StationBoardQuery::new(Station::new("8000105"), BoardDirection::Arrival)
            .at(when())
            .with_duration(60)
            .with_max_journeys(10);
        let req = body(&station_board(&profile(), &query).unwrap());

        assert_eq!(req["type"], "ARR");
        assert_eq!(req["date"], "20240305");
        assert_eq!(req["time"], "070409");
        assert_eq!(req["dur"], 60);
        assert_eq!(req["maxJny"], 10);
    }

    #[test]
    fn search_literal_fields() {
        let origin = Station::new(8096009_u64);
        let destination = Station::new(8011160_u64);
        let all_off = Product::ALL
            .into_iter()
            .fold(crate::domain::ProductFilter::new(), |f, p| f.with(p, false));
        let query = JourneysQuery::new(origin, destination, when()).products(all_off);

        let request = journeys(&profile(), &query).unwrap();
        assert_eq!(request.method(), "TripSearch");

        let req = body(&request);
        assert_eq!(req["depLocL"][0]["lid"], "A=1@L=8096009@");
        assert_eq!(req["depLocL"][0]["type"], "S");
        assert_eq!(req["arrLocL"][0]["lid"], "A=1@L=8011160@");
        assert_eq!(req["viaLocL"], json!([]));

        let out_date = req["outDate"].as_str().unwrap();
        let out_time = req["outTime"].as_str().unwrap();
        assert_eq!(out_date, "20240305");
        assert_eq!(out_time, "070409");
        assert!(out_date.len() == 8 && out_date.bytes().all(|b| b.is_ascii_digit()));
        assert!(out_time.len() == 6 && out_time.bytes().all(|b| b.is_ascii_digit()));

        assert_eq!(req["minChgTime"], 0);
        assert_eq!(req["maxChg"], -1);
        assert_eq!(
            req["jnyFltrL"],
            json!([{"type": "PROD", "mode": "INC", "value": "0"}])
        );
        assert!(req.get("trfReq").is_none());
    }

    #[test]
    fn search_via_order_preserved() {
        let query = JourneysQuery::new(Station::new("1"), Station::new("4"), when())
            .via(Station::new("2"))
            .via(Station::new("3"));
        let req = body(&journeys(&profile(), &query).unwrap());

        assert_eq!(
            req["viaLocL"],
            json!([
                {"loc": {"type": "S", "lid": "A=1@L=2@"}},
                {"loc": {"type": "S", "lid": "A=1@L=3@"}}
            ])
        );
    }

    #[test]
    fn search_rejects_bad_max_changes() {
        let query =
            JourneysQuery::new(Station::new("1"), Station::new("2"), when()).max_changes(-2);
        assert!(matches!(
            journeys(&profile(), &query),
            Err(HafasError::InvalidArgument(_))
        ));
    }

    #[test]
    fn reconstruction_request() {
        let request = journey(&profile(), &JourneyQuery::new("¶HKI¶T$A=1@L=8096009@")).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"meth": "Reconstruction", "req": {"ctxRecon": "¶HKI¶T$A=1@L=8096009@"}})
        );
    }

    #[test]
    fn generic_profile_rejects_tickets() {
        let query =
            JourneyQuery::new("x").with_tickets(TicketOptions::single(30, ReductionCard::None));
        assert!(matches!(
            journey(&profile(), &query),
            Err(HafasError::InvalidArgument(_))
        ));
    }

    #[test]
    fn traveler_profile_for_adult() {
        let profiles = traveler_profiles(&[Traveler::new(30, ReductionCard::None)]).unwrap();
        assert_eq!(
            serde_json::to_value(&profiles).unwrap(),
            json!([{"type": "E", "age": 30, "redtnCard": 0}])
        );
    }

    #[test]
    fn traveler_limits() {
        assert!(traveler_profiles(&[]).is_err());

        let five = vec![Traveler::new(40, ReductionCard::BahnCard25SecondClass); MAX_TRAVELERS];
        assert_eq!(traveler_profiles(&five).unwrap().len(), 5);

        let six = vec![Traveler::new(40, ReductionCard::None); MAX_TRAVELERS + 1];
        assert!(matches!(
            traveler_profiles(&six),
            Err(HafasError::InvalidArgument(_))
        ));
    }

    #[test]
    fn negative_age_fails_fast() {
        let err = traveler_profiles(&[Traveler::new(-1, ReductionCard::None)]).unwrap_err();
        assert!(matches!(err, HafasError::InvalidArgument(ref m) if m.contains("invalid age")));
    }
}
