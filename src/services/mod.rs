pub mod alternatives_service;
pub mod cleaning_service;
pub mod distance_service;
pub mod geocoding_service;
pub mod hotel_file_service;
pub mod hotel_selection_service;
pub mod itinerary_generation_service;
pub mod replacement_service;
pub mod venue_repository;
