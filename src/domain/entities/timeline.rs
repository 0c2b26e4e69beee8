use serde::Serialize;

/// Fixed header block for the trip. This is trip data, not user content,
/// so it ships with the binary and has no edit surface.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripOverview {
    pub destination: String,
    pub hotel: String,
    pub date_range: String,
    pub address: String,
    pub hero_image_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineIcon {
    Plane,
    Hotel,
    Info,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub date: String,
    pub time: String,
    pub title: String,
    pub description: String,
    pub icon: TimelineIcon,
    pub is_return: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    pub trip: TripOverview,
    pub events: Vec<TimelineEvent>,
}

pub fn trip_timeline() -> TimelineResponse {
    TimelineResponse {
        trip: TripOverview {
            destination: "Barcelona 2026".to_string(),
            hotel: "Hostel Urbany BCN GO".to_string(),
            date_range: "16 – 20.04.2026".to_string(),
            address: "Avinguda de la Granvia de l'Hospitalet, 12, Barcelona".to_string(),
            hero_image_url:
                "https://images.unsplash.com/photo-1558642084-fd07fae5282e?q=80&w=2072&auto=format&fit=crop"
                    .to_string(),
            reminder: Some("Pay the balance to the account by 12.04!".to_string()),
        },
        events: vec![
            TimelineEvent {
                id: "t1".to_string(),
                date: "16.04.".to_string(),
                time: "06:25".to_string(),
                title: "Departure flight".to_string(),
                description: "Belgrade (BEG) to Barcelona (BCN)".to_string(),
                icon: TimelineIcon::Plane,
                is_return: false,
            },
            TimelineEvent {
                id: "t2".to_string(),
                date: "16.04.".to_string(),
                time: "15:00".to_string(),
                title: "Hostel check-in".to_string(),
                description: "Hostel Urbany BCN GO, rooms ready from 15:00".to_string(),
                icon: TimelineIcon::Hotel,
                is_return: false,
            },
            TimelineEvent {
                id: "t3".to_string(),
                date: "17.04.".to_string(),
                time: "10:00".to_string(),
                title: "Old town day".to_string(),
                description: "Gothic Quarter, La Rambla and the Boqueria market".to_string(),
                icon: TimelineIcon::Info,
                is_return: false,
            },
            TimelineEvent {
                id: "t4".to_string(),
                date: "18.04.".to_string(),
                time: "18:30".to_string(),
                title: "Match day".to_string(),
                description: "Meet in the lobby at 16:00, metro to the stadium together".to_string(),
                icon: TimelineIcon::Info,
                is_return: false,
            },
            TimelineEvent {
                id: "t5".to_string(),
                date: "20.04.".to_string(),
                time: "11:00".to_string(),
                title: "Check-out".to_string(),
                description: "Rooms free by 11:00, luggage storage in the lobby".to_string(),
                icon: TimelineIcon::Hotel,
                is_return: false,
            },
            TimelineEvent {
                id: "t6".to_string(),
                date: "20.04.".to_string(),
                time: "21:40".to_string(),
                title: "Return flight".to_string(),
                description: "Barcelona (BCN) to Belgrade (BEG)".to_string(),
                icon: TimelineIcon::Plane,
                is_return: true,
            },
        ],
    }
}
