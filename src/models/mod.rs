pub mod degradation;
pub mod hotel_record;
pub mod itinerary;
pub mod location;
pub mod venue;

pub use degradation::{DayNote, Degradation};
pub use hotel_record::{GeocodedHotelRecord, HotelRecord, GEOCODED_COLUMNS};
pub use itinerary::{
    AlternativesRequest, BudgetTier, DayPlan, Itinerary, ItineraryRequest, PlanRequest,
    RegenerateRequest, TravelType, TripMeta, VenuePools,
};
pub use location::{CityAnchor, CityAnchors};
pub use venue::{Attraction, Category, Coordinates, Hotel, Place, Tour, Venue};
