//! Test data builders

use chrono::{Duration, NaiveDate};
use fake::faker::address::en::CityName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use pereirinha::models::NewRegistration;

/// A submission that passes every validation rule
pub fn registration_request(category: &str) -> NewRegistration {
    let birth_date = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap() + Duration::days((0..2000).fake::<i64>());
    let phone = format!("(11) 9{}-{}", (1000..9999).fake::<u32>(), (1000..9999).fake::<u32>());

    NewRegistration {
        full_name: Name().fake(),
        email: SafeEmail().fake(),
        birth_date,
        category: category.to_string(),
        guardian_name: Name().fake(),
        phone,
        neighborhood: CityName().fake(),
    }
}

/// A submission with fixed searchable fields
pub fn named_registration(full_name: &str, email: &str, neighborhood: &str) -> NewRegistration {
    NewRegistration {
        full_name: full_name.to_string(),
        email: email.to_string(),
        neighborhood: neighborhood.to_string(),
        ..registration_request("Sub-11")
    }
}
