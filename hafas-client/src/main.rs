use chrono::{Days, NaiveTime, Utc};
use tracing_subscriber::EnvFilter;

use hafas_client::domain::{Product, ProductFilter, ReductionCard, Station};
use hafas_client::hafas::{
    ClientConfig, HafasClient, HafasError, JourneyQuery, JourneysQuery, LocationsQuery, Profile,
    ReqwestTransport, TicketOptions, TransportConfig,
};

const ORIGIN_NAME: &str = "Zürich HB";
/// Zürich HB, used if the name lookup finds nothing
const ORIGIN: u64 = 8096009;
/// Berlin Hbf
const DESTINATION: u64 = 8011160;

const TRAVELER_AGE: i32 = 30;

#[tokio::main]
async fn main() -> Result<(), HafasError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = ClientConfig::new();
    if let Ok(user_agent) = std::env::var("HAFAS_USER_AGENT") {
        config = config.with_user_agent(user_agent);
    }

    let profile = Profile::db();
    let tz = profile.timezone();
    let transport = ReqwestTransport::new(TransportConfig::default())?;
    let client = HafasClient::with_config(profile, transport, config);

    // Tomorrow evening, operator local time
    let today = Utc::now().with_timezone(&tz).date_naive();
    let when = today
        .checked_add_days(Days::new(1))
        .unwrap_or(today)
        .and_time(NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN));

    let origin = client
        .locations(&LocationsQuery::new(ORIGIN_NAME).with_max_results(1))
        .await?
        .into_iter()
        .next()
        .unwrap_or_else(|| Station::new(ORIGIN));
    let origin_id = origin.id().clone();

    let query = JourneysQuery::new(origin, Station::new(DESTINATION), when)
        .max_changes(0)
        .products(ProductFilter::only(&[
            Product::LongDistanceExpress,
            Product::LongDistance,
        ]));

    println!("Searching direct IC/ICE journeys {origin_id} -> {DESTINATION} from {when}...");
    let journeys = client.journeys(&query).await?;

    let direct: Vec<_> = journeys
        .iter()
        .filter(|journey| {
            journey.legs().len() == 1
                && journey.legs()[0]
                    .name
                    .as_deref()
                    .is_some_and(|name| name.contains("IC"))
        })
        .collect();
    println!("Found {} journeys, {} direct IC/ICE", journeys.len(), direct.len());

    for journey in direct {
        let leg = &journey.legs()[0];
        println!();
        println!(
            "{} {} -> {}",
            leg.name.as_deref().unwrap_or("?"),
            leg.departure().format("%d.%m. %H:%M"),
            leg.arrival().format("%d.%m. %H:%M"),
        );

        let detail = client
            .journey(
                &JourneyQuery::for_journey(journey)
                    .with_tickets(TicketOptions::single(TRAVELER_AGE, ReductionCard::None)),
            )
            .await?;

        match detail.tickets() {
            Some(tickets) if !tickets.is_empty() => {
                for ticket in tickets {
                    println!("  {ticket}");
                }
            }
            _ => println!("  no fares offered"),
        }
    }

    Ok(())
}
