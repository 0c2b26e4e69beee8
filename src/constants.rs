use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use crate::domain::entities::card::Card;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const SNAPSHOT_FILE_NAME: &str = "cards.json";

/// Collection the dashboard starts from when no snapshot exists yet.
/// Kept in the exact wire format so an export can be pasted back here.
pub const SEED_CARDS_JSON: &str = r#"[
  {
    "id": "1773857124000",
    "title": "FC Barcelona home match",
    "description": "League game during the trip. Gates open 90 minutes before kickoff, bring the printed tickets and passports for the name check.",
    "category": "EVENTS",
    "imageUrl": "https://picsum.photos/seed/campnou/800/600",
    "link": "https://www.fcbarcelona.com/en/tickets",
    "dateAdded": 1773857124000,
    "location": "Spotify Camp Nou",
    "date": "2026-04-18",
    "time": "18:30",
    "address": "C. d'Aristides Maillol, 12, 08028 Barcelona",
    "price": "45"
  },
  {
    "id": "1773783611000",
    "title": "Opium Barcelona",
    "description": "Beachfront club on Barceloneta. Guest list closes at midnight, dress code enforced at the door.",
    "category": "NIGHTLIFE",
    "imageUrl": "https://picsum.photos/seed/opium/800/600",
    "link": "https://opiumbarcelona.com",
    "dateAdded": 1773783611000
  },
  {
    "id": "1773663345000",
    "title": "La Boqueria Market",
    "description": "Covered market just off La Rambla. Go before noon for the fruit stalls and the tapas bars at the back.",
    "category": "FOOD",
    "imageUrl": "https://picsum.photos/seed/boqueria/800/600",
    "link": "https://www.boqueria.barcelona",
    "dateAdded": 1773663345000
  },
  {
    "id": "1773568953000",
    "title": "Park Guell",
    "description": "Gaudi's mosaic park above Gracia. The monumental zone needs a timed ticket, the free part of the park does not.",
    "category": "SIGHTS",
    "imageUrl": "https://picsum.photos/seed/parkguell/800/600",
    "link": "https://parkguell.barcelona",
    "dateAdded": 1773568953000
  },
  {
    "id": "1773480600000",
    "title": "Sagrada Familia",
    "description": "Book the earliest morning slot to beat the queues. Tower access is a separate ticket, the east towers catch the sunrise light.",
    "category": "SIGHTS",
    "imageUrl": "https://picsum.photos/seed/sagrada/800/600",
    "link": "https://sagradafamilia.org",
    "dateAdded": 1773480600000
  },
  {
    "id": "1773305110000",
    "title": "Getting around: T-casual",
    "description": "The T-casual card gives 10 metro or bus rides and is per person, it cannot be shared. Buy it at any metro vending machine. The airport metro (L9 Sud) is excluded, that ride needs a separate airport ticket or the Aerobus.",
    "category": "INFO",
    "dateAdded": 1773305110000
  }
]"#;

pub fn seed_cards() -> Vec<Card> {
    serde_json::from_str(SEED_CARDS_JSON).unwrap_or_else(|e| {
        tracing::error!("Built-in seed collection failed to parse: {}", e);
        Vec::new()
    })
}
