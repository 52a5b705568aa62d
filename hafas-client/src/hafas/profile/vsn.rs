//! Verkehrsverbund Süd-Niedersachsen.

use serde_json::{Map, Value, json};

use crate::hafas::signing::Signing;

use super::{Profile, STANDARD_PRODUCTS};

pub const BASE_URL: &str = "https://fahrplaner.vsninfo.de/hafas/mgate.exe";

const SALT: &str = "SP31mBufSyCLmNxp";

pub fn profile() -> Profile {
    Profile::generic(BASE_URL)
        .with_name("vsn")
        .with_signing(Signing::MicMac { salt: SALT.into() })
        .with_request_defaults(request_defaults())
        .with_products(STANDARD_PRODUCTS)
}

fn request_defaults() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert(
        "client".into(),
        json!({"id": "VSN", "v": "5030100", "type": "IPA", "name": "VSN", "os": "iOS 13.3"}),
    );
    defaults.insert("ver".into(), json!("1.24"));
    defaults.insert("auth".into(), json!({"type": "AID", "aid": "Mpf5UPC0DmzV8jkg"}));
    defaults
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReductionCard;
    use crate::hafas::error::HafasError;
    use crate::hafas::query::{JourneyQuery, TicketOptions};

    #[test]
    fn profile_settings() {
        let profile = profile();
        assert_eq!(profile.name(), "vsn");
        assert_eq!(profile.base_url(), BASE_URL);
        assert_eq!(profile.request_defaults()["client"]["id"], "VSN");
        assert_eq!(profile.request_defaults()["ver"], "1.24");
        assert_eq!(profile.request_defaults()["lang"], "de");
    }

    #[test]
    fn signs_with_mic_and_mac() {
        let query = profile().sign(br#"{"svcReqL":[]}"#).unwrap();
        let (mic, mac) = query.split_once('&').unwrap();
        assert!(mic.starts_with("mic=") && mic.len() == 4 + 32);
        assert!(mac.starts_with("mac=") && mac.len() == 4 + 32);
    }

    #[test]
    fn no_fare_support() {
        let profile = profile();
        let query =
            JourneyQuery::new("x").with_tickets(TicketOptions::single(30, ReductionCard::None));
        assert!(matches!(
            (profile.operations().format_journey)(&profile, &query),
            Err(HafasError::InvalidArgument(_))
        ));
    }
}
